//! View arena: ownership, geometry and invalidation for every view.
//!
//! Views live in a single [`ViewTree`] keyed by [`ViewId`]. A container owns
//! its ordered child list; a child only stores the id of its parent, so
//! there are no ownership cycles. Child rectangles are expressed in the
//! coordinate space of their parent.

use crate::dirty::DirtyFlags;
use crate::error::{TreeError, TreeResult};
use crate::event::CursorType;
use crate::row_column::RowColumnState;
use crate::split_view::{SeparatorState, SplitViewState};
use indexmap::IndexMap;
use panelkit_core::{Point, Rect};

/// Handle of a view inside a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub usize);

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Scalar value of a control, kept inside `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    value: f32,
    min: f32,
    max: f32,
}

impl ControlState {
    pub fn new(value: f32, min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// What a view is, and the state that comes with it.
#[derive(Debug)]
pub enum ViewKind {
    /// A leaf without behavior of its own.
    Plain,
    /// A leaf exposing a scalar value.
    Control(ControlState),
    /// A container that leaves its children where they are put.
    Container,
    /// A container separating its children with draggable dividers.
    SplitView(SplitViewState),
    /// A divider created and owned by a split view.
    Separator(SeparatorState),
    /// A container stacking its children along one axis.
    RowColumn(RowColumnState),
}

impl ViewKind {
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ViewKind::Container
                | ViewKind::SplitView(_)
                | ViewKind::Separator(_)
                | ViewKind::RowColumn(_)
        )
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, ViewKind::Separator(_))
    }
}

/// A single view in the arena.
#[derive(Debug)]
pub struct ViewNode {
    pub(crate) kind: ViewKind,
    pub(crate) rect: Rect,
    pub(crate) mouseable_area: Rect,
    pub(crate) alpha: f32,
    pub(crate) visible: bool,
    pub(crate) parent: Option<ViewId>,
    pub(crate) children: Vec<ViewId>,
    pub(crate) attached: bool,
    pub(crate) dirty_flags: DirtyFlags,
}

impl ViewNode {
    fn new(kind: ViewKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            mouseable_area: rect,
            alpha: 1.0,
            visible: true,
            parent: None,
            children: Vec::new(),
            attached: false,
            dirty_flags: DirtyFlags::GEOMETRY | DirtyFlags::PAINT,
        }
    }

    pub fn kind(&self) -> &ViewKind {
        &self.kind
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    pub fn children(&self) -> &[ViewId] {
        &self.children
    }

    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty_flags
    }
}

/// A view resize that should be animated instead of applied directly.
///
/// Row/column containers with animated resizing enqueue these; the animator
/// turns each one into a view size animation the next time it flushes.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingResize {
    pub view: ViewId,
    pub name: &'static str,
    pub target: Rect,
    pub duration_ms: u32,
}

/// Arena owning every view of one frame.
pub struct ViewTree {
    nodes: IndexMap<ViewId, ViewNode>,
    root: ViewId,
    next_id: usize,
    invalid_rects: Vec<Rect>,
    destroyed: Vec<ViewId>,
    detached: Vec<ViewId>,
    pending_resizes: Vec<PendingResize>,
    cursor: CursorType,
}

impl ViewTree {
    /// Creates a tree with an attached root container covering `root_rect`.
    pub fn new(root_rect: Rect) -> Self {
        let mut tree = Self {
            nodes: IndexMap::new(),
            root: ViewId(0),
            next_id: 0,
            invalid_rects: Vec::new(),
            destroyed: Vec::new(),
            detached: Vec::new(),
            pending_resizes: Vec::new(),
            cursor: CursorType::Default,
        };
        let root = tree.insert_node(ViewKind::Container, root_rect);
        if let Some(node) = tree.nodes.get_mut(&root) {
            node.attached = true;
        }
        tree.root = root;
        tree
    }

    pub fn root(&self) -> ViewId {
        self.root
    }

    fn insert_node(&mut self, kind: ViewKind, rect: Rect) -> ViewId {
        let id = ViewId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, ViewNode::new(kind, rect));
        id
    }

    /// Creates a detached view of the given kind.
    pub fn create(&mut self, kind: ViewKind, rect: Rect) -> ViewId {
        self.insert_node(kind, rect)
    }

    /// Creates a detached leaf view.
    pub fn create_view(&mut self, rect: Rect) -> ViewId {
        self.insert_node(ViewKind::Plain, rect)
    }

    /// Creates a detached control holding `state`.
    pub fn create_control(&mut self, rect: Rect, state: ControlState) -> ViewId {
        self.insert_node(ViewKind::Control(state), rect)
    }

    /// Creates a detached plain container.
    pub fn create_container(&mut self, rect: Rect) -> ViewId {
        self.insert_node(ViewKind::Container, rect)
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: ViewId) -> Option<&ViewNode> {
        self.nodes.get(&id)
    }

    pub(crate) fn node_mut(&mut self, id: ViewId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(&id)
    }

    pub fn kind(&self, id: ViewId) -> Option<&ViewKind> {
        self.nodes.get(&id).map(|n| &n.kind)
    }

    pub(crate) fn kind_mut(&mut self, id: ViewId) -> Option<&mut ViewKind> {
        self.nodes.get_mut(&id).map(|n| &mut n.kind)
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Ordered children of `id`; empty for leaves and unknown ids.
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn child_index(&self, parent: ViewId, child: ViewId) -> Option<usize> {
        self.children(parent).iter().position(|c| *c == child)
    }

    pub fn is_attached(&self, id: ViewId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.attached)
    }

    // ---------------------------------------------------------------------
    // Properties
    // ---------------------------------------------------------------------

    pub fn view_size(&self, id: ViewId) -> Option<Rect> {
        self.nodes.get(&id).map(|n| n.rect)
    }

    /// Resizes a view.
    ///
    /// Split views redistribute the size change over their children and
    /// row/column views lay their children out again. Damage is not
    /// recorded here; callers invalidate what they need.
    pub fn set_view_size(&mut self, id: ViewId, rect: Rect) {
        let old = match self.nodes.get(&id) {
            Some(node) => node.rect,
            None => return,
        };
        self.apply_rect(id, rect);
        match self.kind(id) {
            Some(ViewKind::SplitView(_)) => self.split_view_resized(id, old),
            Some(ViewKind::RowColumn(_)) => self.layout_row_column(id),
            _ => {}
        }
    }

    /// Stores a new rectangle without running any container behavior.
    pub(crate) fn apply_rect(&mut self, id: ViewId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if node.rect == rect {
                return;
            }
            if node.mouseable_area == node.rect {
                node.mouseable_area = rect;
            }
            node.rect = rect;
            node.dirty_flags |= DirtyFlags::GEOMETRY;
        }
    }

    /// Sets both the rectangle and the hit-test area, invalidating the old
    /// and the new region if the rectangle changed.
    pub(crate) fn move_view(&mut self, id: ViewId, rect: Rect) {
        if self.view_size(id).is_some_and(|r| r != rect) {
            self.invalid(id);
            self.set_view_size(id, rect);
            self.set_mouseable_area(id, rect);
            self.invalid(id);
        }
    }

    pub fn mouseable_area(&self, id: ViewId) -> Option<Rect> {
        self.nodes.get(&id).map(|n| n.mouseable_area)
    }

    pub fn set_mouseable_area(&mut self, id: ViewId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.mouseable_area = rect;
        }
    }

    pub fn alpha(&self, id: ViewId) -> Option<f32> {
        self.nodes.get(&id).map(|n| n.alpha)
    }

    /// Sets the opacity, clamped to `[0, 1]`.
    pub fn set_alpha(&mut self, id: ViewId, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        let changed = match self.nodes.get_mut(&id) {
            Some(node) if node.alpha != alpha => {
                node.alpha = alpha;
                node.dirty_flags |= DirtyFlags::OPACITY;
                true
            }
            _ => false,
        };
        if changed {
            self.invalid(id);
        }
    }

    pub fn is_visible(&self, id: ViewId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.visible)
    }

    pub fn set_visible(&mut self, id: ViewId, visible: bool) {
        let changed = match self.nodes.get_mut(&id) {
            Some(node) if node.visible != visible => {
                node.visible = visible;
                node.dirty_flags |= DirtyFlags::VISIBILITY;
                true
            }
            _ => false,
        };
        if changed {
            self.invalid(id);
        }
    }

    /// Value of a control, `None` if the view is not a control.
    pub fn control_value(&self, id: ViewId) -> Option<f32> {
        match self.kind(id) {
            Some(ViewKind::Control(state)) => Some(state.value),
            _ => None,
        }
    }

    /// Sets a control value, clamped to the control range.
    ///
    /// Returns `false` if the view is not a control.
    pub fn set_control_value(&mut self, id: ViewId, value: f32) -> bool {
        let changed = match self.nodes.get_mut(&id) {
            Some(ViewNode {
                kind: ViewKind::Control(state),
                dirty_flags,
                ..
            }) => {
                let value = value.clamp(state.min, state.max);
                let changed = state.value != value;
                state.value = value;
                if changed {
                    *dirty_flags |= DirtyFlags::VALUE;
                }
                changed
            }
            _ => return false,
        };
        if changed {
            self.invalid(id);
        }
        true
    }

    pub fn control_state(&self, id: ViewId) -> Option<&ControlState> {
        match self.kind(id) {
            Some(ViewKind::Control(state)) => Some(state),
            _ => None,
        }
    }

    // ---------------------------------------------------------------------
    // Invalidation
    // ---------------------------------------------------------------------

    /// Marks a view for redraw and records its frame rectangle as damage.
    pub fn invalid(&mut self, id: ViewId) {
        let Some(frame) = self.frame_rect(id) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(&id) {
            node.dirty_flags |= DirtyFlags::PAINT;
            if node.attached {
                self.invalid_rects.push(frame);
            }
        }
    }

    /// Damage rectangles (root coordinates) recorded since the last call.
    pub fn take_invalid_rects(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.invalid_rects)
    }

    pub fn has_invalid_rects(&self) -> bool {
        !self.invalid_rects.is_empty()
    }

    pub fn dirty_flags(&self, id: ViewId) -> DirtyFlags {
        self.nodes
            .get(&id)
            .map(|n| n.dirty_flags)
            .unwrap_or_default()
    }

    pub(crate) fn mark_dirty(&mut self, id: ViewId, flags: DirtyFlags) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.dirty_flags |= flags;
        }
    }

    /// Clears the dirty flags of every view.
    pub fn clear_dirty_flags(&mut self) {
        for node in self.nodes.values_mut() {
            node.dirty_flags = DirtyFlags::NONE;
        }
    }

    // ---------------------------------------------------------------------
    // Coordinates
    // ---------------------------------------------------------------------

    /// The view rectangle converted to root coordinates.
    pub fn frame_rect(&self, id: ViewId) -> Option<Rect> {
        let node = self.nodes.get(&id)?;
        let mut rect = node.rect;
        let mut parent = node.parent;
        while let Some(p) = parent {
            let parent_node = self.nodes.get(&p)?;
            rect = rect.translated(parent_node.rect.top_left());
            parent = parent_node.parent;
        }
        Some(rect)
    }

    /// Converts a root-coordinate point into the coordinate space of `id`'s
    /// children (the space its own rectangle is not in).
    pub fn to_local(&self, id: ViewId, point: Point) -> Option<Point> {
        let frame = self.frame_rect(id)?;
        Some(point - frame.top_left())
    }

    /// The deepest visible view whose hit-test area contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<ViewId> {
        self.hit_test_from(self.root, point)
    }

    fn hit_test_from(&self, id: ViewId, point_in_parent: Point) -> Option<ViewId> {
        let node = self.nodes.get(&id)?;
        if !node.visible || !node.mouseable_area.contains(point_in_parent) {
            return None;
        }
        let local = point_in_parent - node.rect.top_left();
        node.children
            .iter()
            .rev()
            .find_map(|child| self.hit_test_from(*child, local))
            .or(Some(id))
    }

    /// All ids of the subtree rooted at `id`, parents before children.
    pub fn subtree(&self, id: ViewId) -> Vec<ViewId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                out.push(current);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn is_ancestor(&self, ancestor: ViewId, id: ViewId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    // ---------------------------------------------------------------------
    // Structure
    // ---------------------------------------------------------------------

    fn check_insertable(&self, parent: ViewId, child: ViewId) -> TreeResult<()> {
        let parent_node = self
            .nodes
            .get(&parent)
            .ok_or(TreeError::UnknownView(parent))?;
        let child_node = self
            .nodes
            .get(&child)
            .ok_or(TreeError::UnknownView(child))?;
        if !parent_node.kind.is_container() {
            return Err(TreeError::NotAContainer(parent));
        }
        if child == self.root {
            return Err(TreeError::RootView);
        }
        if let Some(existing) = child_node.parent {
            return Err(TreeError::AlreadyParented {
                view: child,
                parent: existing,
            });
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(TreeError::Cycle {
                view: child,
                parent,
            });
        }
        Ok(())
    }

    /// Appends `child` to `parent`.
    ///
    /// Split views insert a separator in front of every child but the first;
    /// row/column views lay out again.
    pub fn add_view(&mut self, parent: ViewId, child: ViewId) -> TreeResult<()> {
        self.check_insertable(parent, child)?;
        match self.kind(parent) {
            Some(ViewKind::SplitView(_)) => self.split_view_append(parent, child),
            Some(ViewKind::RowColumn(_)) => {
                self.link_child(parent, child, None);
                self.layout_row_column(parent);
            }
            _ => self.link_child(parent, child, None),
        }
        Ok(())
    }

    /// Inserts `child` into `parent` in front of `before`.
    ///
    /// Split views manage their own child order and refuse positional
    /// inserts.
    pub fn insert_view(&mut self, parent: ViewId, child: ViewId, before: ViewId) -> TreeResult<()> {
        self.check_insertable(parent, child)?;
        let index = self
            .child_index(parent, before)
            .ok_or(TreeError::NotAChild {
                container: parent,
                view: before,
            })?;
        match self.kind(parent) {
            Some(ViewKind::SplitView(_)) => return Err(TreeError::OrderedContainer(parent)),
            Some(ViewKind::RowColumn(_)) => {
                self.link_child(parent, child, Some(index));
                self.layout_row_column(parent);
            }
            _ => self.link_child(parent, child, Some(index)),
        }
        Ok(())
    }

    /// Takes `child` out of its parent without destroying it.
    ///
    /// The view keeps its id and can be added somewhere else. Removing a
    /// split-view child also destroys the separator next to it.
    pub fn detach_view(&mut self, child: ViewId) -> TreeResult<()> {
        let node = self.nodes.get(&child).ok_or(TreeError::UnknownView(child))?;
        let Some(parent) = node.parent else {
            return Ok(());
        };
        if node.kind.is_separator() {
            return Err(TreeError::ManagedSeparator(child));
        }
        match self.kind(parent) {
            Some(ViewKind::SplitView(_)) => self.split_view_remove(parent, child),
            Some(ViewKind::RowColumn(_)) => {
                self.unlink_child(child);
                self.layout_row_column(parent);
            }
            _ => self.unlink_child(child),
        }
        Ok(())
    }

    /// Removes `child` from its parent and destroys its whole subtree.
    pub fn remove_view(&mut self, child: ViewId) -> TreeResult<()> {
        if child == self.root {
            return Err(TreeError::RootView);
        }
        self.detach_view(child)?;
        self.destroy_subtree(child);
        Ok(())
    }

    /// Links a checked child into `parent` at `index` (append if `None`) and
    /// attaches it when the parent is attached.
    pub(crate) fn link_child(&mut self, parent: ViewId, child: ViewId, index: Option<usize>) {
        let attached = match self.nodes.get_mut(&parent) {
            Some(parent_node) => {
                match index {
                    Some(i) if i <= parent_node.children.len() => {
                        parent_node.children.insert(i, child)
                    }
                    _ => parent_node.children.push(child),
                }
                parent_node.dirty_flags |= DirtyFlags::CHILDREN_ORDER;
                parent_node.attached
            }
            None => return,
        };
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if attached {
            self.attach_subtree(child);
            self.invalid(child);
        }
    }

    /// Unlinks `child` from its parent, running detach hooks first.
    pub(crate) fn unlink_child(&mut self, child: ViewId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if self.is_attached(child) {
            self.invalid(child);
            self.detach_subtree(child);
        }
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|c| *c != child);
            parent_node.dirty_flags |= DirtyFlags::CHILDREN_ORDER;
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
    }

    /// Drops every node of the subtree and queues the ids for the animator.
    pub(crate) fn destroy_subtree(&mut self, id: ViewId) {
        for view in self.subtree(id) {
            self.nodes.shift_remove(&view);
            self.destroyed.push(view);
        }
        tracing::trace!("Destroyed subtree rooted at {}", id);
    }

    fn attach_subtree(&mut self, id: ViewId) {
        let views = self.subtree(id);
        for view in &views {
            if let Some(node) = self.nodes.get_mut(view) {
                node.attached = true;
            }
        }
        // Children settle before their containers.
        for view in views.into_iter().rev() {
            match self.kind(view) {
                Some(ViewKind::SplitView(_)) => self.split_view_attached(view),
                Some(ViewKind::RowColumn(_)) => self.layout_row_column(view),
                _ => {}
            }
        }
    }

    fn detach_subtree(&mut self, id: ViewId) {
        for view in self.subtree(id) {
            match self.kind(view) {
                Some(ViewKind::SplitView(_)) => self.split_view_detached(view),
                Some(ViewKind::Separator(_)) => self.separator_detached(view),
                _ => {}
            }
            if let Some(node) = self.nodes.get_mut(&view) {
                node.attached = false;
            }
            self.detached.push(view);
        }
    }

    /// Ids destroyed since the last call.
    pub fn take_destroyed(&mut self) -> Vec<ViewId> {
        std::mem::take(&mut self.destroyed)
    }

    /// Ids that left the attached tree since the last call, in subtree order.
    pub fn take_detached(&mut self) -> Vec<ViewId> {
        std::mem::take(&mut self.detached)
    }

    pub(crate) fn push_pending_resize(&mut self, resize: PendingResize) {
        self.pending_resizes.retain(|r| r.view != resize.view || r.name != resize.name);
        self.pending_resizes.push(resize);
    }

    /// Animated resizes requested since the last call.
    pub fn take_pending_resizes(&mut self) -> Vec<PendingResize> {
        std::mem::take(&mut self.pending_resizes)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.destroyed.is_empty() || !self.detached.is_empty() || !self.pending_resizes.is_empty()
    }

    // ---------------------------------------------------------------------
    // Cursor
    // ---------------------------------------------------------------------

    /// Cursor most recently requested by a view.
    pub fn cursor(&self) -> CursorType {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorType) {
        self.cursor = cursor;
    }
}

impl std::fmt::Debug for ViewTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewTree")
            .field("root", &self.root)
            .field("views", &self.nodes.len())
            .field("invalid_rects", &self.invalid_rects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> ViewTree {
        ViewTree::new(Rect::from_size(400.0, 300.0))
    }

    #[test]
    fn test_add_view_links_parent_and_attaches() {
        let mut tree = tree();
        let container = tree.create_container(Rect::new(10.0, 10.0, 110.0, 110.0));
        let child = tree.create_view(Rect::new(5.0, 5.0, 15.0, 15.0));

        tree.add_view(container, child).unwrap();
        assert!(!tree.is_attached(child));

        tree.add_view(tree.root(), container).unwrap();
        assert!(tree.is_attached(container));
        assert!(tree.is_attached(child));
        assert_eq!(tree.parent(child), Some(container));
        assert_eq!(tree.children(container), &[child]);
    }

    #[test]
    fn test_add_view_rejects_misuse() {
        let mut tree = tree();
        let leaf = tree.create_view(Rect::from_size(10.0, 10.0));
        let other = tree.create_view(Rect::from_size(10.0, 10.0));
        assert_eq!(tree.add_view(leaf, other), Err(TreeError::NotAContainer(leaf)));

        let a = tree.create_container(Rect::from_size(10.0, 10.0));
        let b = tree.create_container(Rect::from_size(10.0, 10.0));
        tree.add_view(a, b).unwrap();
        assert_eq!(
            tree.add_view(b, a),
            Err(TreeError::Cycle { view: a, parent: b })
        );
        assert_eq!(
            tree.add_view(tree.root(), b),
            Err(TreeError::AlreadyParented { view: b, parent: a })
        );
        assert_eq!(tree.add_view(a, ViewId(999)), Err(TreeError::UnknownView(ViewId(999))));
    }

    #[test]
    fn test_frame_rect_and_local_points() {
        let mut tree = tree();
        let outer = tree.create_container(Rect::new(10.0, 20.0, 210.0, 220.0));
        let inner = tree.create_view(Rect::new(5.0, 5.0, 25.0, 25.0));
        tree.add_view(tree.root(), outer).unwrap();
        tree.add_view(outer, inner).unwrap();

        assert_eq!(tree.frame_rect(inner), Some(Rect::new(15.0, 25.0, 35.0, 45.0)));
        assert_eq!(
            tree.to_local(outer, Point::new(15.0, 25.0)),
            Some(Point::new(5.0, 5.0))
        );
        assert_eq!(tree.hit_test(Point::new(20.0, 30.0)), Some(inner));
        assert_eq!(tree.hit_test(Point::new(100.0, 100.0)), Some(outer));
    }

    #[test]
    fn test_hidden_views_are_not_hit() {
        let mut tree = tree();
        let view = tree.create_view(Rect::new(0.0, 0.0, 50.0, 50.0));
        tree.add_view(tree.root(), view).unwrap();
        tree.set_visible(view, false);
        assert_eq!(tree.hit_test(Point::new(10.0, 10.0)), Some(tree.root()));
    }

    #[test]
    fn test_remove_view_destroys_subtree() {
        let mut tree = tree();
        let container = tree.create_container(Rect::from_size(50.0, 50.0));
        let child = tree.create_view(Rect::from_size(10.0, 10.0));
        tree.add_view(container, child).unwrap();
        tree.add_view(tree.root(), container).unwrap();

        tree.remove_view(container).unwrap();
        assert!(!tree.contains(container));
        assert!(!tree.contains(child));
        assert!(tree.children(tree.root()).is_empty());
        assert_eq!(tree.take_destroyed(), vec![container, child]);
        assert_eq!(tree.remove_view(tree.root()), Err(TreeError::RootView));
    }

    #[test]
    fn test_detach_keeps_view_alive() {
        let mut tree = tree();
        let view = tree.create_view(Rect::from_size(10.0, 10.0));
        tree.add_view(tree.root(), view).unwrap();
        tree.detach_view(view).unwrap();
        assert!(tree.contains(view));
        assert!(!tree.is_attached(view));
        assert_eq!(tree.parent(view), None);
        tree.add_view(tree.root(), view).unwrap();
        assert!(tree.is_attached(view));
    }

    #[test]
    fn test_detach_queues_whole_subtree() {
        let mut tree = tree();
        let container = tree.create_container(Rect::from_size(50.0, 50.0));
        let child = tree.create_view(Rect::from_size(10.0, 10.0));
        tree.add_view(container, child).unwrap();
        tree.add_view(tree.root(), container).unwrap();
        assert!(!tree.has_pending_events());

        tree.detach_view(container).unwrap();
        assert!(tree.has_pending_events());
        assert_eq!(tree.take_detached(), vec![container, child]);
        assert!(tree.take_destroyed().is_empty());

        // Detaching a view that was never attached queues nothing.
        let loose = tree.create_view(Rect::from_size(10.0, 10.0));
        tree.add_view(container, loose).unwrap();
        tree.detach_view(loose).unwrap();
        assert!(tree.take_detached().is_empty());
    }

    #[test]
    fn test_invalid_records_frame_rect_only_when_attached() {
        let mut tree = tree();
        let view = tree.create_view(Rect::new(1.0, 2.0, 3.0, 4.0));
        tree.invalid(view);
        assert!(tree.take_invalid_rects().is_empty());

        tree.add_view(tree.root(), view).unwrap();
        tree.take_invalid_rects();
        tree.invalid(view);
        assert_eq!(tree.take_invalid_rects(), vec![Rect::new(1.0, 2.0, 3.0, 4.0)]);
        assert!(tree.dirty_flags(view).contains(DirtyFlags::PAINT));
    }

    #[test]
    fn test_control_value_is_clamped() {
        let mut tree = tree();
        let control = tree.create_control(Rect::from_size(10.0, 10.0), ControlState::new(0.5, 0.0, 1.0));
        assert!(tree.set_control_value(control, 3.0));
        assert_eq!(tree.control_value(control), Some(1.0));

        let plain = tree.create_view(Rect::from_size(10.0, 10.0));
        assert!(!tree.set_control_value(plain, 0.3));
        assert_eq!(tree.control_value(plain), None);
    }

    #[test]
    fn test_alpha_is_clamped_and_marks_opacity() {
        let mut tree = tree();
        let view = tree.create_view(Rect::from_size(10.0, 10.0));
        tree.clear_dirty_flags();
        tree.set_alpha(view, 1.5);
        assert_eq!(tree.alpha(view), Some(1.0));
        tree.set_alpha(view, 0.25);
        assert_eq!(tree.alpha(view), Some(0.25));
        assert!(tree.dirty_flags(view).is_paint_only());
    }

    #[test]
    fn test_insert_view_before_sibling() {
        let mut tree = tree();
        let a = tree.create_view(Rect::from_size(10.0, 10.0));
        let b = tree.create_view(Rect::from_size(10.0, 10.0));
        tree.add_view(tree.root(), a).unwrap();
        tree.insert_view(tree.root(), b, a).unwrap();
        assert_eq!(tree.children(tree.root()), &[b, a]);
    }
}
