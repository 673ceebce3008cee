//! Split views.
//!
//! A split view arranges its children along one axis and keeps a separator
//! between every two neighbours, so the child list always reads
//! `content, separator, content, ..., content`. Dragging a separator moves
//! the boundary between its two neighbours; resizing the split view itself
//! distributes the change according to its [`ResizeMethod`].
//!
//! An optional [`SplitViewController`] limits the size of each content view
//! and remembers sizes while the split view is detached.

mod controller;
mod separator;

pub use controller::{SizeConstraint, SplitViewController};
pub use separator::{DefaultSeparatorDrawer, SeparatorDrawer, SeparatorFlags, SeparatorState};

use crate::error::TreeResult;
use crate::tree::{ViewId, ViewKind, ViewTree};
use panelkit_core::profiling::profile_function;
use panelkit_core::{Point, Rect};
use separator::clamp_along;
use std::cell::RefCell;
use std::rc::Rc;

/// Separator thickness used by [`SplitViewState::new`].
pub const DEFAULT_SEPARATOR_WIDTH: f64 = 10.0;

/// Split axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SplitStyle {
    /// Children side by side, separators are vertical bars.
    #[default]
    Horizontal,
    /// Children stacked, separators are horizontal bars.
    Vertical,
}

impl SplitStyle {
    fn main(self, p: Point) -> f64 {
        match self {
            SplitStyle::Horizontal => p.x,
            SplitStyle::Vertical => p.y,
        }
    }

    fn main_size(self, r: &Rect) -> f64 {
        self.main(r.size())
    }

    fn set_main_size(self, r: &mut Rect, size: f64) {
        match self {
            SplitStyle::Horizontal => r.set_width(size),
            SplitStyle::Vertical => r.set_height(size),
        };
    }

    fn offset_main(self, r: &mut Rect, amount: f64) {
        match self {
            SplitStyle::Horizontal => r.offset(amount, 0.0),
            SplitStyle::Vertical => r.offset(0.0, amount),
        };
    }

    fn grow_main(self, r: &mut Rect, amount: f64) {
        match self {
            SplitStyle::Horizontal => r.right += amount,
            SplitStyle::Vertical => r.bottom += amount,
        }
    }

    fn grow_cross(self, r: &mut Rect, diff: Point) {
        match self {
            SplitStyle::Horizontal => r.bottom += diff.y,
            SplitStyle::Vertical => r.right += diff.x,
        }
    }

    fn leading(self, r: &Rect) -> f64 {
        match self {
            SplitStyle::Horizontal => r.left,
            SplitStyle::Vertical => r.top,
        }
    }

    fn trailing(self, r: &Rect) -> f64 {
        match self {
            SplitStyle::Horizontal => r.right,
            SplitStyle::Vertical => r.bottom,
        }
    }

    fn set_leading(self, r: &mut Rect, value: f64) {
        match self {
            SplitStyle::Horizontal => r.left = value,
            SplitStyle::Vertical => r.top = value,
        }
    }

    fn set_trailing(self, r: &mut Rect, value: f64) {
        match self {
            SplitStyle::Horizontal => r.right = value,
            SplitStyle::Vertical => r.bottom = value,
        }
    }
}

/// How a size change of the split view is distributed over its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResizeMethod {
    /// The first view absorbs the change.
    First,
    /// The second view absorbs the change.
    Second,
    /// The last view absorbs the change.
    #[default]
    Last,
    /// Every content view gets an equal share.
    All,
}

/// Parameters of a split view.
#[derive(Clone)]
pub struct SplitViewState {
    style: SplitStyle,
    resize_method: ResizeMethod,
    separator_width: f64,
    controller: Option<Rc<RefCell<dyn SplitViewController>>>,
    separator_drawer: Option<Rc<dyn SeparatorDrawer>>,
}

impl SplitViewState {
    pub fn new(style: SplitStyle) -> Self {
        Self {
            style,
            resize_method: ResizeMethod::default(),
            separator_width: DEFAULT_SEPARATOR_WIDTH,
            controller: None,
            separator_drawer: None,
        }
    }

    pub fn with_resize_method(mut self, resize_method: ResizeMethod) -> Self {
        self.resize_method = resize_method;
        self
    }

    pub fn with_separator_width(mut self, width: f64) -> Self {
        self.separator_width = width;
        self
    }

    pub fn with_controller(mut self, controller: Rc<RefCell<dyn SplitViewController>>) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn with_separator_drawer(mut self, drawer: Rc<dyn SeparatorDrawer>) -> Self {
        self.separator_drawer = Some(drawer);
        self
    }

    pub fn style(&self) -> SplitStyle {
        self.style
    }

    pub fn resize_method(&self) -> ResizeMethod {
        self.resize_method
    }

    pub fn separator_width(&self) -> f64 {
        self.separator_width
    }

    pub fn controller(&self) -> Option<&Rc<RefCell<dyn SplitViewController>>> {
        self.controller.as_ref()
    }
}

impl Default for SplitViewState {
    fn default() -> Self {
        Self::new(SplitStyle::Horizontal)
    }
}

impl std::fmt::Debug for SplitViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitViewState")
            .field("style", &self.style)
            .field("resize_method", &self.resize_method)
            .field("separator_width", &self.separator_width)
            .field("controller", &self.controller.is_some())
            .field("separator_drawer", &self.separator_drawer.is_some())
            .finish()
    }
}

/// Mutable access to one split view.
pub struct SplitView<'a> {
    tree: &'a mut ViewTree,
    id: ViewId,
}

impl ViewTree {
    /// Creates a detached split view.
    pub fn create_split_view(&mut self, rect: Rect, state: SplitViewState) -> ViewId {
        self.create(ViewKind::SplitView(state), rect)
    }

    pub fn split_view(&self, id: ViewId) -> Option<&SplitViewState> {
        match self.kind(id) {
            Some(ViewKind::SplitView(state)) => Some(state),
            _ => None,
        }
    }

    fn split_view_state_mut(&mut self, id: ViewId) -> Option<&mut SplitViewState> {
        match self.kind_mut(id) {
            Some(ViewKind::SplitView(state)) => Some(state),
            _ => None,
        }
    }

    /// Handle for changing a split view, `None` for other views.
    pub fn split_view_mut(&mut self, id: ViewId) -> Option<SplitView<'_>> {
        self.split_view(id)?;
        Some(SplitView { tree: self, id })
    }

    /// Drawer for the separators of `id`: the controller's drawer if it has
    /// one, otherwise the split view's own.
    pub fn split_view_separator_drawer(&self, id: ViewId) -> Option<Rc<dyn SeparatorDrawer>> {
        let state = self.split_view(id)?;
        state
            .controller
            .as_ref()
            .and_then(|c| c.borrow().separator_drawer(id))
            .or_else(|| state.separator_drawer.clone())
    }

    fn split_view_constraint(&self, id: ViewId, index: usize) -> SizeConstraint {
        self.split_view(id)
            .and_then(|s| s.controller.as_ref())
            .and_then(|c| c.borrow().size_constraint(index, id))
            .unwrap_or_default()
    }

    /// Appends `view` behind a new separator. The view spans the cross
    /// axis and starts right after the separator.
    pub(crate) fn split_view_append(&mut self, id: ViewId, view: ViewId) {
        let Some((style, separator_width)) = self.split_view(id).map(|s| (s.style, s.separator_width)) else {
            return;
        };
        let (Some(bounds), Some(current)) = (self.view_size(id), self.view_size(view)) else {
            return;
        };
        let mut rect = current.originized();
        match style {
            SplitStyle::Horizontal => rect.set_height(bounds.height()),
            SplitStyle::Vertical => rect.set_width(bounds.width()),
        };

        let last = self.children(id).last().copied();
        if let Some(last_rect) = last.and_then(|last| self.view_size(last)) {
            let mut separator_rect = last_rect;
            style.set_leading(&mut separator_rect, style.trailing(&last_rect));
            style.set_main_size(&mut separator_rect, separator_width);
            style.offset_main(&mut rect, style.trailing(&separator_rect));

            let index = self.children(id).len() / 2;
            let separator = self.create(
                ViewKind::Separator(SeparatorState::new(index, style)),
                separator_rect,
            );
            self.link_child(id, separator, None);
        }

        self.set_view_size(view, rect);
        self.set_mouseable_area(view, rect);
        self.link_child(id, view, None);
    }

    /// Unlinks `view` together with one neighbouring separator.
    pub(crate) fn split_view_remove(&mut self, id: ViewId, view: ViewId) {
        let children = self.children(id).to_vec();
        let Some(position) = children.iter().position(|c| *c == view) else {
            return;
        };
        let separator = children
            .get(position + 1)
            .or_else(|| position.checked_sub(1).and_then(|i| children.get(i)))
            .copied()
            .filter(|s| self.kind(*s).is_some_and(ViewKind::is_separator));

        self.unlink_child(view);
        if let Some(separator) = separator {
            self.unlink_child(separator);
            self.destroy_subtree(separator);
        }
        self.renumber_separators(id);
    }

    fn renumber_separators(&mut self, id: ViewId) {
        let children = self.children(id).to_vec();
        for (position, child) in children.into_iter().enumerate() {
            if let Some(ViewKind::Separator(state)) = self.kind_mut(child) {
                state.set_index(position / 2);
            }
        }
    }

    fn split_view_separators(&self, id: ViewId) -> Vec<ViewId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.kind(*c).is_some_and(ViewKind::is_separator))
            .collect()
    }

    fn split_view_content(&self, id: ViewId) -> Vec<ViewId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| !self.kind(*c).is_some_and(ViewKind::is_separator))
            .collect()
    }

    /// Distributes a size change of the split view over its children.
    pub(crate) fn split_view_resized(&mut self, id: ViewId, old: Rect) {
        profile_function!();

        let Some((style, method)) = self.split_view(id).map(|s| (s.style, s.resize_method)) else {
            return;
        };
        let Some(new) = self.view_size(id) else {
            return;
        };
        let diff = new.size() - old.size();
        if diff == Point::ZERO {
            return;
        }
        let children = self.children(id).to_vec();
        if children.is_empty() {
            return;
        }
        let is_separator = |tree: &ViewTree, view: ViewId| tree.kind(view).is_some_and(ViewKind::is_separator);
        let mut separators = Vec::new();

        match method {
            ResizeMethod::First => {
                for (position, child) in children.iter().copied().enumerate() {
                    let Some(mut r) = self.view_size(child) else { continue };
                    if position == 0 {
                        r.right += diff.x;
                        r.bottom += diff.y;
                    } else {
                        if is_separator(self, child) {
                            separators.push(child);
                        }
                        style.offset_main(&mut r, style.main(diff));
                        style.grow_cross(&mut r, diff);
                    }
                    self.move_view(child, r);
                }
            }
            ResizeMethod::Second => {
                let mut content_index = 0;
                for child in children.iter().copied() {
                    let Some(mut r) = self.view_size(child) else { continue };
                    let separator = is_separator(self, child);
                    if separator {
                        separators.push(child);
                    } else {
                        content_index += 1;
                    }
                    if !separator && content_index == 2 {
                        r.right += diff.x;
                        r.bottom += diff.y;
                    } else if content_index == 1 {
                        style.grow_cross(&mut r, diff);
                    } else if content_index > 1 {
                        style.offset_main(&mut r, style.main(diff));
                        style.grow_cross(&mut r, diff);
                    }
                    self.move_view(child, r);
                }
            }
            ResizeMethod::Last => {
                let last = children.len() - 1;
                for (position, child) in children.iter().copied().enumerate().rev() {
                    let Some(mut r) = self.view_size(child) else { continue };
                    if position == last {
                        r.right += diff.x;
                        r.bottom += diff.y;
                    } else {
                        if is_separator(self, child) {
                            separators.push(child);
                        }
                        style.grow_cross(&mut r, diff);
                    }
                    self.move_view(child, r);
                }
            }
            ResizeMethod::All => {
                let content_count = children.len() - children.len() / 2;
                let share = style.main(diff) / content_count as f64;
                let mut offset = 0.0;
                for child in children.iter().copied() {
                    let Some(mut r) = self.view_size(child) else { continue };
                    style.offset_main(&mut r, offset);
                    style.grow_cross(&mut r, diff);
                    if is_separator(self, child) {
                        separators.push(child);
                    } else {
                        style.grow_main(&mut r, share);
                        offset += share;
                    }
                    self.move_view(child, r);
                }
            }
        }

        for separator in separators {
            if let Some(r) = self.view_size(separator) {
                self.request_new_separator_size(id, separator, r);
            }
        }
    }

    /// Applies the sizes the controller remembers for each content view.
    pub(crate) fn split_view_attached(&mut self, id: ViewId) {
        let Some((style, controller)) = self
            .split_view(id)
            .and_then(|s| s.controller.clone().map(|c| (s.style, c)))
        else {
            return;
        };

        let mut offset = 0.0;
        let mut index = 0;
        for child in self.children(id).to_vec() {
            let Some(mut r) = self.view_size(child) else { continue };
            style.offset_main(&mut r, offset);
            if !self.kind(child).is_some_and(ViewKind::is_separator) {
                if let Some(size) = controller.borrow().restore_view_size(index, id) {
                    offset += size - style.main_size(&r);
                    style.set_main_size(&mut r, size);
                }
                index += 1;
            }
            self.set_view_size(child, r);
            self.set_mouseable_area(child, r);
        }
    }

    /// Hands the size of every content view to the controller.
    pub(crate) fn split_view_detached(&mut self, id: ViewId) {
        let Some((style, controller)) = self
            .split_view(id)
            .and_then(|s| s.controller.clone().map(|c| (s.style, c)))
        else {
            return;
        };
        for (index, child) in self.split_view_content(id).into_iter().enumerate() {
            if let Some(r) = self.view_size(child) {
                controller
                    .borrow_mut()
                    .store_view_size(index, style.main_size(&r), id);
            }
        }
    }

    /// Limits for a separator at child `position`: the split view bounds,
    /// narrowed to the neighbouring separators.
    fn separator_limits(&self, id: ViewId, style: SplitStyle, children: &[ViewId], position: usize) -> Option<Rect> {
        let mut limits = self.view_size(id)?.originized();
        let previous = if position > 2 {
            children.get(position - 2).and_then(|v| self.view_size(*v))
        } else {
            None
        };
        if let Some(previous) = previous {
            style.set_leading(&mut limits, style.trailing(&previous));
        }
        if let Some(next) = children.get(position + 2).and_then(|v| self.view_size(*v)) {
            style.set_trailing(&mut limits, style.leading(&next));
        }
        Some(limits)
    }

    /// Moves `separator` to `proposed` and resizes its two neighbours.
    ///
    /// The proposal is rounded to whole pixels and kept inside the split
    /// view and between the neighbouring separators. If either neighbour
    /// would then break its size constraint nothing changes and `false` is
    /// returned.
    pub(crate) fn request_new_separator_size(&mut self, id: ViewId, separator: ViewId, proposed: Rect) -> bool {
        profile_function!();

        let Some(style) = self.split_view(id).map(SplitViewState::style) else {
            return false;
        };
        let children = self.children(id).to_vec();
        let Some(position) = children.iter().position(|c| *c == separator) else {
            return false;
        };
        if !self.kind(separator).is_some_and(ViewKind::is_separator) || position == 0 {
            return false;
        }
        let (Some(view1), Some(view2)) = (children.get(position - 1).copied(), children.get(position + 1).copied())
        else {
            return false;
        };
        let (Some(mut r1), Some(mut r2)) = (self.view_size(view1), self.view_size(view2)) else {
            return false;
        };
        let Some(limits) = self.separator_limits(id, style, &children, position) else {
            return false;
        };

        let mut proposed = proposed;
        proposed.make_integral();
        let new_size = clamp_along(proposed, limits, style);

        style.set_trailing(&mut r1, style.leading(&new_size));
        style.set_leading(&mut r2, style.trailing(&new_size));

        let c1 = self.split_view_constraint(id, position / 2);
        let c2 = self.split_view_constraint(id, position / 2 + 1);
        if !c1.allows(style.main_size(&r1)) || !c2.allows(style.main_size(&r2)) {
            tracing::trace!(
                "Rejected separator move on {}: sizes {} / {} violate constraints",
                id,
                style.main_size(&r1),
                style.main_size(&r2)
            );
            return false;
        }

        self.move_view(view1, r1);
        self.move_view(view2, r2);
        self.move_view(separator, new_size);
        true
    }

    /// Region a separator may be dragged in: the split view bounds between
    /// the neighbouring separators, shrunk by the minimum sizes of the two
    /// adjacent content views.
    pub(crate) fn separator_constraint_rect(&self, id: ViewId, separator: ViewId) -> Option<Rect> {
        let style = self.split_view(id)?.style;
        let children = self.children(id);
        let position = children.iter().position(|c| *c == separator)?;
        let mut limits = self.separator_limits(id, style, children, position)?;

        if let Some(min) = self.split_view_constraint(id, position / 2).min_size() {
            let edge = style.leading(&limits) + min;
            style.set_leading(&mut limits, edge);
        }
        if let Some(min) = self.split_view_constraint(id, position / 2 + 1).min_size() {
            let edge = style.trailing(&limits) - min;
            style.set_trailing(&mut limits, edge);
        }
        Some(limits)
    }
}

impl SplitView<'_> {
    pub fn id(&self) -> ViewId {
        self.id
    }

    fn state_mut(&mut self) -> Option<&mut SplitViewState> {
        self.tree.split_view_state_mut(self.id)
    }

    /// Changes the split axis. Only allowed while the split view is empty.
    pub fn set_style(&mut self, style: SplitStyle) -> bool {
        if !self.tree.children(self.id).is_empty() {
            tracing::warn!("Refusing to change the orientation of populated split view {}", self.id);
            return false;
        }
        match self.state_mut() {
            Some(state) => {
                state.style = style;
                true
            }
            None => false,
        }
    }

    pub fn set_resize_method(&mut self, resize_method: ResizeMethod) {
        if let Some(state) = self.state_mut() {
            state.resize_method = resize_method;
        }
    }

    /// Resizes every separator to `width` along the split axis.
    pub fn set_separator_width(&mut self, width: f64) {
        let Some(state) = self.tree.split_view(self.id) else {
            return;
        };
        if state.separator_width == width {
            return;
        }
        let style = state.style;
        for separator in self.tree.split_view_separators(self.id).into_iter().rev() {
            if let Some(mut r) = self.tree.view_size(separator) {
                style.set_main_size(&mut r, width);
                self.tree.request_new_separator_size(self.id, separator, r);
            }
        }
        if let Some(state) = self.state_mut() {
            state.separator_width = width;
        }
    }

    pub fn set_controller(&mut self, controller: Option<Rc<RefCell<dyn SplitViewController>>>) {
        if let Some(state) = self.state_mut() {
            state.controller = controller;
        }
    }

    pub fn set_separator_drawer(&mut self, drawer: Option<Rc<dyn SeparatorDrawer>>) {
        if let Some(state) = self.state_mut() {
            state.separator_drawer = drawer;
        }
    }

    /// Places `view` inside the separator at gap `index`.
    ///
    /// Returns `Ok(false)` if there is no such separator.
    pub fn add_view_to_separator(&mut self, index: usize, view: ViewId) -> TreeResult<bool> {
        let Some(separator) = self.separators().get(index).copied() else {
            return Ok(false);
        };
        self.tree.add_view(separator, view)?;
        Ok(true)
    }

    /// See [`ViewTree`]'s separator request: moves `separator` and resizes
    /// its neighbours, returning `false` if a size constraint is violated.
    pub fn request_new_separator_size(&mut self, separator: ViewId, proposed: Rect) -> bool {
        self.tree.request_new_separator_size(self.id, separator, proposed)
    }

    pub fn separator_constraint_rect(&self, separator: ViewId) -> Option<Rect> {
        self.tree.separator_constraint_rect(self.id, separator)
    }

    /// Split views never size themselves to their content.
    pub fn size_to_fit(&mut self) -> bool {
        false
    }

    pub fn separators(&self) -> Vec<ViewId> {
        self.tree.split_view_separators(self.id)
    }

    pub fn content_views(&self) -> Vec<ViewId> {
        self.tree.split_view_content(self.id)
    }
}
