//! The frame: owner of a view tree and its animator.
//!
//! [`Frame`] is the piece a host application talks to. It forwards timer
//! ticks to the animator, routes pointer events to split-view separators
//! and walks the tree for drawing. Every mutating call flushes the tree's
//! queued events into the animator before returning, so detached views never
//! keep animations alive and animated layout requests start immediately.

use crate::animation::{AnimationTarget, Animator, Finished, TimingFunction};
use crate::draw::DrawContext;
use crate::error::TreeResult;
use crate::event::{MouseButtons, MouseEventResult};
use crate::row_column::{RowColumnState, RowColumnStyle};
use crate::split_view::{DefaultSeparatorDrawer, SeparatorDrawer, SplitStyle, SplitViewState};
use crate::tree::{ViewId, ViewKind, ViewTree};
use panelkit_core::profiling::{self, profile_function};
use panelkit_core::{Config, Point, ProfilingMode, Rect};

pub struct Frame {
    tree: ViewTree,
    animator: Animator,
    config: Config,
    drag_separator: Option<ViewId>,
    hovered_separator: Option<ViewId>,
    default_drawer: DefaultSeparatorDrawer,
}

impl Frame {
    pub fn new(root_rect: Rect) -> Self {
        Self::with_config(root_rect, Config::default())
    }

    pub fn with_config(root_rect: Rect, config: Config) -> Self {
        match config.profiling {
            ProfilingMode::Off => {}
            ProfilingMode::On => profiling::enable_scopes(),
            #[cfg(feature = "profiling")]
            ProfilingMode::WithServer => profiling::init_profiling(),
            #[cfg(not(feature = "profiling"))]
            ProfilingMode::WithServer => {
                tracing::warn!("Profiling server requested but the `profiling` feature is off");
                profiling::enable_scopes();
            }
        }
        tracing::debug!("Created frame {:?} at {} Hz", root_rect, config.frame_rate_hz);

        Self {
            tree: ViewTree::new(root_rect),
            animator: Animator::new(),
            config,
            drag_separator: None,
            hovered_separator: None,
            default_drawer: DefaultSeparatorDrawer::default(),
        }
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    /// Direct tree access. Queued tree events are applied by the next
    /// mutating frame call or [`tick`](Self::tick).
    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> ViewId {
        self.tree.root()
    }

    /// Milliseconds the host timer should wait between two ticks.
    pub fn frame_interval_ms(&self) -> u32 {
        self.config.frame_interval_ms()
    }

    /// Whether the host timer needs to keep running.
    pub fn has_animations(&self) -> bool {
        self.animator.has_animations() || self.tree.has_pending_events()
    }

    /// Advances all animations to `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        if profiling::scopes_enabled() {
            profiling::new_frame();
        }
        self.animator.tick(&mut self.tree, now_ms);
    }

    fn flush(&mut self) {
        self.animator.flush_tree_events(&mut self.tree);
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    /// Creates a split view using the configured separator width.
    pub fn create_split_view(&mut self, rect: Rect, style: SplitStyle) -> ViewId {
        let state = SplitViewState::new(style).with_separator_width(self.config.default_separator_width);
        self.tree.create_split_view(rect, state)
    }

    /// Creates a row/column view using the configured resize animation time.
    pub fn create_row_column(&mut self, rect: Rect, style: RowColumnStyle) -> ViewId {
        let state = RowColumnState::new(style)
            .with_view_resize_animation_time(self.config.row_column_resize_animation_ms);
        self.tree.create_row_column(rect, state)
    }

    pub fn add_view(&mut self, parent: ViewId, child: ViewId) -> TreeResult<()> {
        let result = self.tree.add_view(parent, child);
        self.flush();
        result
    }

    pub fn remove_view(&mut self, view: ViewId) -> TreeResult<()> {
        let result = self.tree.remove_view(view);
        self.forget_separators();
        self.flush();
        result
    }

    pub fn set_view_size(&mut self, view: ViewId, rect: Rect) {
        self.tree.set_view_size(view, rect);
        self.flush();
    }

    fn forget_separators(&mut self) {
        if self.drag_separator.is_some_and(|s| !self.tree.contains(s)) {
            self.drag_separator = None;
        }
        if self.hovered_separator.is_some_and(|s| !self.tree.contains(s)) {
            self.hovered_separator = None;
        }
    }

    // ---------------------------------------------------------------------
    // Animations
    // ---------------------------------------------------------------------

    pub fn add_animation(
        &mut self,
        view: ViewId,
        name: impl Into<String>,
        target: impl Into<AnimationTarget>,
        timing: impl TimingFunction + 'static,
    ) {
        self.animator
            .add_animation(&mut self.tree, view, name, target, timing);
        self.flush();
    }

    pub fn add_animation_with_done(
        &mut self,
        view: ViewId,
        name: impl Into<String>,
        target: impl Into<AnimationTarget>,
        timing: impl TimingFunction + 'static,
        on_done: impl FnOnce(&mut Animator, &mut ViewTree, &Finished) + 'static,
    ) {
        self.animator
            .add_animation_with_done(&mut self.tree, view, name, target, timing, on_done);
        self.flush();
    }

    pub fn remove_animation(&mut self, view: ViewId, name: &str) {
        self.animator.remove_animation(&mut self.tree, view, name);
        self.flush();
    }

    pub fn remove_animations(&mut self, view: ViewId) {
        self.animator.remove_animations(&mut self.tree, view);
        self.flush();
    }

    pub fn is_running(&self, view: ViewId, name: &str) -> bool {
        self.animator.is_running(view, name)
    }

    // ---------------------------------------------------------------------
    // Pointer input
    // ---------------------------------------------------------------------

    /// Separator under `point` (root coordinates), also when the point lies
    /// on one of the separator's own children.
    fn separator_at(&self, point: Point) -> Option<ViewId> {
        let mut current = self.tree.hit_test(point);
        while let Some(view) = current {
            if self.tree.kind(view).is_some_and(ViewKind::is_separator) {
                return Some(view);
            }
            current = self.tree.parent(view);
        }
        None
    }

    /// `point` converted into the coordinate space of the separator's split view.
    fn split_local(&self, separator: ViewId, point: Point) -> Option<Point> {
        let split = self.tree.parent(separator)?;
        self.tree.to_local(split, point)
    }

    pub fn on_mouse_down(&mut self, point: Point, buttons: MouseButtons) -> MouseEventResult {
        let Some(separator) = self.separator_at(point) else {
            return MouseEventResult::NotHandled;
        };
        let Some(local) = self.split_local(separator, point) else {
            return MouseEventResult::NotHandled;
        };
        let result = self.tree.separator_mouse_down(separator, local, buttons);
        if result.is_handled() {
            self.drag_separator = Some(separator);
        }
        self.flush();
        result
    }

    pub fn on_mouse_moved(&mut self, point: Point, buttons: MouseButtons) -> MouseEventResult {
        profile_function!();

        if let Some(separator) = self.drag_separator {
            let result = match self.split_local(separator, point) {
                Some(local) => self.tree.separator_mouse_moved(separator, local, buttons),
                None => MouseEventResult::NotHandled,
            };
            self.flush();
            return result;
        }

        let under = self.separator_at(point);
        if let Some(previous) = self.hovered_separator
            && under != Some(previous)
        {
            self.tree.separator_mouse_exited(previous);
            self.hovered_separator = None;
        }

        let Some(separator) = under else {
            return MouseEventResult::NotHandled;
        };
        self.hovered_separator = Some(separator);
        match self.split_local(separator, point) {
            Some(local) => self.tree.separator_mouse_moved(separator, local, buttons),
            None => MouseEventResult::NotHandled,
        }
    }

    pub fn on_mouse_up(&mut self, point: Point, buttons: MouseButtons) -> MouseEventResult {
        let Some(separator) = self.drag_separator.take() else {
            return MouseEventResult::NotHandled;
        };
        match self.split_local(separator, point) {
            Some(local) => self.tree.separator_mouse_up(separator, local, buttons),
            None => MouseEventResult::NotHandled,
        }
    }

    // ---------------------------------------------------------------------
    // Drawing
    // ---------------------------------------------------------------------

    /// Draws the separators of every visible split view and clears the
    /// accumulated damage. Returns the damage rectangles that were pending.
    pub fn draw(&mut self, ctx: &mut dyn DrawContext) -> Vec<Rect> {
        self.draw_with(ctx, |_, _, _| {})
    }

    /// Like [`draw`](Self::draw), calling `paint_view` for every visible view
    /// that is not a separator, parents before children.
    pub fn draw_with(
        &mut self,
        ctx: &mut dyn DrawContext,
        mut paint_view: impl FnMut(&mut dyn DrawContext, ViewId, Rect),
    ) -> Vec<Rect> {
        profile_function!();

        let mut stack = vec![(self.tree.root(), 1.0_f32)];
        while let Some((view, parent_alpha)) = stack.pop() {
            let Some(node) = self.tree.node(view) else {
                continue;
            };
            if !node.is_visible() {
                continue;
            }
            let alpha = parent_alpha * node.alpha();
            let Some(frame) = self.tree.frame_rect(view) else {
                continue;
            };
            ctx.set_global_alpha(alpha);

            match node.kind() {
                ViewKind::Separator(state) => {
                    let split = node.parent().unwrap_or(view);
                    let drawer = self.tree.split_view_separator_drawer(split);
                    let drawer: &dyn SeparatorDrawer = match &drawer {
                        Some(custom) => custom.as_ref(),
                        None => &self.default_drawer,
                    };
                    drawer.draw_separator(ctx, frame, state.flags(), state.index(), split);
                }
                _ => paint_view(ctx, view, frame),
            }

            stack.extend(node.children().iter().rev().map(|child| (*child, alpha)));
        }

        self.tree.clear_dirty_flags();
        self.tree.take_invalid_rects()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("tree", &self.tree)
            .field("animator", &self.animator)
            .field("drag_separator", &self.drag_separator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AlphaValueAnimation, LinearTimingFunction};
    use crate::draw::NullDrawContext;

    #[test]
    fn test_frame_uses_config() {
        let config = Config {
            frame_rate_hz: 50,
            default_separator_width: 6.0,
            row_column_resize_animation_ms: 120,
            ..Config::default()
        };
        let mut frame = Frame::with_config(Rect::from_size(300.0, 200.0), config);
        assert_eq!(frame.frame_interval_ms(), 20);

        let sv = frame.create_split_view(Rect::from_size(100.0, 100.0), SplitStyle::Horizontal);
        assert_eq!(frame.tree().split_view(sv).map(|s| s.separator_width()), Some(6.0));
        let rc = frame.create_row_column(Rect::from_size(100.0, 100.0), RowColumnStyle::Column);
        assert_eq!(
            frame.tree().row_column(rc).map(|s| s.view_resize_animation_time()),
            Some(120)
        );
    }

    #[test]
    fn test_removing_view_cancels_animation() {
        let mut frame = Frame::new(Rect::from_size(300.0, 200.0));
        let view = frame.tree_mut().create_view(Rect::from_size(10.0, 10.0));
        frame.add_view(frame.root(), view).unwrap();
        frame.add_animation(view, "fade", AlphaValueAnimation::new(0.0, false), LinearTimingFunction::new(100));
        assert!(frame.has_animations());

        frame.remove_view(view).unwrap();
        assert!(!frame.is_running(view, "fade"));
        assert!(!frame.has_animations());
    }

    #[test]
    fn test_draw_clears_damage() {
        let mut frame = Frame::new(Rect::from_size(300.0, 200.0));
        let view = frame.tree_mut().create_view(Rect::new(10.0, 10.0, 20.0, 20.0));
        frame.add_view(frame.root(), view).unwrap();
        let damage = frame.draw(&mut NullDrawContext);
        assert_eq!(damage, vec![Rect::new(10.0, 10.0, 20.0, 20.0)]);
        assert!(frame.draw(&mut NullDrawContext).is_empty());
    }
}
