//! Animation targets: what an animation changes on its view.
//!
//! The built-in targets cover view opacity, view geometry, control values
//! and the exchange of one view for another. Anything else plugs in through
//! [`AnimationTargetHandler`] and [`AnimationTarget::Custom`].

use crate::tree::{ViewId, ViewTree};
use panelkit_core::Rect;

/// Callbacks the animator drives for one running animation.
///
/// `view` and `name` identify the animation. Views may disappear while an
/// animation runs, so implementations have to tolerate ids the tree no
/// longer knows.
pub trait AnimationTargetHandler {
    fn animation_start(&mut self, tree: &mut ViewTree, view: ViewId, name: &str);

    fn animation_tick(&mut self, tree: &mut ViewTree, view: ViewId, name: &str, position: f32);

    fn animation_finished(&mut self, tree: &mut ViewTree, view: ViewId, name: &str, canceled: bool);
}

fn lerp(start: f32, end: f32, position: f32) -> f32 {
    start + (end - start) * position
}

/// Fades a view's opacity from its current value to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaValueAnimation {
    start: f32,
    end: f32,
    force_end_value_on_finish: bool,
}

impl AlphaValueAnimation {
    /// With `force_end_value_on_finish` the end value is applied even if the
    /// animation gets canceled.
    pub fn new(end: f32, force_end_value_on_finish: bool) -> Self {
        Self {
            start: 0.0,
            end,
            force_end_value_on_finish,
        }
    }
}

impl AnimationTargetHandler for AlphaValueAnimation {
    fn animation_start(&mut self, tree: &mut ViewTree, view: ViewId, _name: &str) {
        self.start = tree.alpha(view).unwrap_or(self.end);
    }

    fn animation_tick(&mut self, tree: &mut ViewTree, view: ViewId, _name: &str, position: f32) {
        tree.set_alpha(view, lerp(self.start, self.end, position));
    }

    fn animation_finished(&mut self, tree: &mut ViewTree, view: ViewId, _name: &str, canceled: bool) {
        if !canceled || self.force_end_value_on_finish {
            tree.set_alpha(view, self.end);
        }
    }
}

/// Moves and resizes a view towards `target`.
///
/// Every edge is interpolated on its own and truncated to whole units while
/// running; the final rectangle is exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSizeAnimation {
    start: Rect,
    target: Rect,
    force_end_value_on_finish: bool,
}

impl ViewSizeAnimation {
    pub fn new(target: Rect, force_end_value_on_finish: bool) -> Self {
        Self {
            start: Rect::ZERO,
            target,
            force_end_value_on_finish,
        }
    }

    fn apply(tree: &mut ViewTree, view: ViewId, rect: Rect) {
        if tree.view_size(view).is_some_and(|current| current != rect) {
            tree.invalid(view);
            tree.set_view_size(view, rect);
            tree.set_mouseable_area(view, rect);
            tree.invalid(view);
        }
    }
}

impl AnimationTargetHandler for ViewSizeAnimation {
    fn animation_start(&mut self, tree: &mut ViewTree, view: ViewId, _name: &str) {
        self.start = tree.view_size(view).unwrap_or(self.target);
    }

    fn animation_tick(&mut self, tree: &mut ViewTree, view: ViewId, _name: &str, position: f32) {
        let p = position as f64;
        let edge = |from: f64, to: f64| (from + (to - from) * p).trunc();
        let rect = Rect::new(
            edge(self.start.left, self.target.left),
            edge(self.start.top, self.target.top),
            edge(self.start.right, self.target.right),
            edge(self.start.bottom, self.target.bottom),
        );
        Self::apply(tree, view, rect);
    }

    fn animation_finished(&mut self, tree: &mut ViewTree, view: ViewId, _name: &str, canceled: bool) {
        if !canceled || self.force_end_value_on_finish {
            Self::apply(tree, view, self.target);
        }
    }
}

/// Animates the value of a control. Does nothing on other views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlValueAnimation {
    start: f32,
    end: f32,
    force_end_value_on_finish: bool,
}

impl ControlValueAnimation {
    pub fn new(end: f32, force_end_value_on_finish: bool) -> Self {
        Self {
            start: 0.0,
            end,
            force_end_value_on_finish,
        }
    }
}

impl AnimationTargetHandler for ControlValueAnimation {
    fn animation_start(&mut self, tree: &mut ViewTree, view: ViewId, _name: &str) {
        if let Some(value) = tree.control_value(view) {
            self.start = value;
        }
    }

    fn animation_tick(&mut self, tree: &mut ViewTree, view: ViewId, _name: &str, position: f32) {
        if tree.control_value(view).is_some() {
            tree.set_control_value(view, lerp(self.start, self.end, position));
        }
    }

    fn animation_finished(&mut self, tree: &mut ViewTree, view: ViewId, _name: &str, canceled: bool) {
        if (!canceled || self.force_end_value_on_finish) && tree.control_value(view).is_some() {
            tree.set_control_value(view, self.end);
        }
    }
}

/// How an [`ExchangeViewAnimation`] moves the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeStyle {
    /// Cross-fades the outgoing view out and the incoming view in.
    AlphaFade,
    PushInFromLeft,
    PushInFromRight,
    PushInFromTop,
    PushInFromBottom,
    /// Slides the incoming view in from the left while the outgoing view
    /// leaves to the right.
    PushInOutFromLeft,
    /// Slides the incoming view in from the right while the outgoing view
    /// leaves to the left.
    PushInOutFromRight,
}

/// Replaces one view by another inside the same parent.
///
/// Register it on the common parent. When it finishes the outgoing view is
/// removed, and a canceled exchange jumps to its end state first, so the
/// swap always completes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeViewAnimation {
    old_view: ViewId,
    new_view: ViewId,
    style: ExchangeStyle,
    destination: Rect,
    old_alpha_start: f32,
    new_alpha_end: f32,
}

impl ExchangeViewAnimation {
    /// Inserts `new_view` into the parent of `old_view` and puts both views
    /// into their start state.
    ///
    /// `old_view` must be attached and `new_view` must not be.
    pub fn new(tree: &mut ViewTree, old_view: ViewId, new_view: ViewId, style: ExchangeStyle) -> Self {
        debug_assert!(tree.is_attached(old_view), "outgoing view must be attached");
        debug_assert!(!tree.is_attached(new_view), "incoming view must not be attached");

        if let Some(parent) = tree.parent(old_view)
            && tree.parent(new_view).is_none()
            && let Err(err) = tree.add_view(parent, new_view)
        {
            tracing::warn!("Exchange could not insert {}: {}", new_view, err);
        }

        let mut animation = Self {
            old_view,
            new_view,
            style,
            destination: tree.view_size(old_view).unwrap_or_default(),
            old_alpha_start: 1.0,
            new_alpha_end: 1.0,
        };
        animation.init(tree);
        animation
    }

    pub fn old_view(&self) -> ViewId {
        self.old_view
    }

    pub fn new_view(&self) -> ViewId {
        self.new_view
    }

    fn init(&mut self, tree: &mut ViewTree) {
        if self.style == ExchangeStyle::AlphaFade {
            self.old_alpha_start = tree.alpha(self.old_view).unwrap_or(1.0);
            self.new_alpha_end = tree.alpha(self.new_view).unwrap_or(1.0);
            tree.set_alpha(self.new_view, 0.0);
        } else {
            self.apply(tree, 0.0);
        }
    }

    fn place(tree: &mut ViewTree, view: ViewId, rect: Rect) {
        tree.invalid(view);
        tree.set_view_size(view, rect);
        tree.set_mouseable_area(view, rect);
        tree.invalid(view);
    }

    fn apply(&self, tree: &mut ViewTree, position: f32) {
        let p = position as f64;
        let dest = self.destination;
        let (width, height) = (dest.width(), dest.height());
        let mut incoming = dest;
        let mut outgoing = None;

        match self.style {
            ExchangeStyle::AlphaFade => {
                let old_alpha = self.old_alpha_start - self.old_alpha_start * position;
                tree.set_alpha(self.old_view, old_alpha);
                tree.set_alpha(self.new_view, self.new_alpha_end * position);
                return;
            }
            ExchangeStyle::PushInFromLeft => {
                incoming.offset(-width * (1.0 - p), 0.0);
            }
            ExchangeStyle::PushInFromRight => {
                incoming.offset(width * (1.0 - p), 0.0);
            }
            ExchangeStyle::PushInFromTop => {
                incoming.offset(0.0, -height * (1.0 - p));
            }
            ExchangeStyle::PushInFromBottom => {
                incoming.offset(0.0, height * (1.0 - p));
            }
            ExchangeStyle::PushInOutFromLeft => {
                incoming.offset(-width * (1.0 - p), 0.0);
                outgoing = Some(dest.translated(panelkit_core::Point::new(width * p, 0.0)));
            }
            ExchangeStyle::PushInOutFromRight => {
                incoming.offset(width * (1.0 - p), 0.0);
                outgoing = Some(dest.translated(panelkit_core::Point::new(-width * p, 0.0)));
            }
        }

        Self::place(tree, self.new_view, incoming);
        if let Some(rect) = outgoing {
            Self::place(tree, self.old_view, rect);
        }
    }
}

impl AnimationTargetHandler for ExchangeViewAnimation {
    fn animation_start(&mut self, tree: &mut ViewTree, view: ViewId, _name: &str) {
        debug_assert_eq!(
            tree.parent(self.old_view),
            Some(view),
            "exchange animations run on the parent of the outgoing view"
        );
    }

    fn animation_tick(&mut self, tree: &mut ViewTree, _view: ViewId, _name: &str, position: f32) {
        self.apply(tree, position);
    }

    fn animation_finished(&mut self, tree: &mut ViewTree, _view: ViewId, _name: &str, canceled: bool) {
        if canceled {
            self.apply(tree, 1.0);
        }
        if tree.parent(self.old_view).is_some()
            && let Err(err) = tree.remove_view(self.old_view)
        {
            tracing::warn!("Exchange could not remove {}: {}", self.old_view, err);
        }
    }
}

/// The target of one animation.
pub enum AnimationTarget {
    AlphaValue(AlphaValueAnimation),
    ViewSize(ViewSizeAnimation),
    ExchangeView(ExchangeViewAnimation),
    ControlValue(ControlValueAnimation),
    Custom(Box<dyn AnimationTargetHandler>),
}

impl AnimationTarget {
    /// Wraps a user-defined target.
    pub fn custom(handler: impl AnimationTargetHandler + 'static) -> Self {
        AnimationTarget::Custom(Box::new(handler))
    }

    fn handler(&mut self) -> &mut dyn AnimationTargetHandler {
        match self {
            AnimationTarget::AlphaValue(target) => target,
            AnimationTarget::ViewSize(target) => target,
            AnimationTarget::ExchangeView(target) => target,
            AnimationTarget::ControlValue(target) => target,
            AnimationTarget::Custom(target) => target.as_mut(),
        }
    }

    pub(crate) fn start(&mut self, tree: &mut ViewTree, view: ViewId, name: &str) {
        self.handler().animation_start(tree, view, name);
    }

    pub(crate) fn tick(&mut self, tree: &mut ViewTree, view: ViewId, name: &str, position: f32) {
        self.handler().animation_tick(tree, view, name, position);
    }

    pub(crate) fn finished(&mut self, tree: &mut ViewTree, view: ViewId, name: &str, canceled: bool) {
        self.handler().animation_finished(tree, view, name, canceled);
    }
}

impl std::fmt::Debug for AnimationTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimationTarget::AlphaValue(target) => target.fmt(f),
            AnimationTarget::ViewSize(target) => target.fmt(f),
            AnimationTarget::ExchangeView(target) => target.fmt(f),
            AnimationTarget::ControlValue(target) => target.fmt(f),
            AnimationTarget::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<AlphaValueAnimation> for AnimationTarget {
    fn from(target: AlphaValueAnimation) -> Self {
        AnimationTarget::AlphaValue(target)
    }
}

impl From<ViewSizeAnimation> for AnimationTarget {
    fn from(target: ViewSizeAnimation) -> Self {
        AnimationTarget::ViewSize(target)
    }
}

impl From<ExchangeViewAnimation> for AnimationTarget {
    fn from(target: ExchangeViewAnimation) -> Self {
        AnimationTarget::ExchangeView(target)
    }
}

impl From<ControlValueAnimation> for AnimationTarget {
    fn from(target: ControlValueAnimation) -> Self {
        AnimationTarget::ControlValue(target)
    }
}

impl From<Box<dyn AnimationTargetHandler>> for AnimationTarget {
    fn from(handler: Box<dyn AnimationTargetHandler>) -> Self {
        AnimationTarget::Custom(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ControlState;

    fn tree_with_view(rect: Rect) -> (ViewTree, ViewId) {
        let mut tree = ViewTree::new(Rect::from_size(500.0, 500.0));
        let view = tree.create_view(rect);
        tree.add_view(tree.root(), view).unwrap();
        (tree, view)
    }

    #[test]
    fn test_alpha_snaps_on_finish_but_not_on_cancel() {
        let (mut tree, view) = tree_with_view(Rect::from_size(10.0, 10.0));
        tree.set_alpha(view, 0.0);

        let mut fade = AlphaValueAnimation::new(0.7, false);
        fade.animation_start(&mut tree, view, "fade");
        fade.animation_tick(&mut tree, view, "fade", 0.5);
        assert!((tree.alpha(view).unwrap() - 0.35).abs() < 1e-6);
        fade.animation_finished(&mut tree, view, "fade", true);
        assert!((tree.alpha(view).unwrap() - 0.35).abs() < 1e-6);

        fade.animation_finished(&mut tree, view, "fade", false);
        assert_eq!(tree.alpha(view), Some(0.7));
    }

    #[test]
    fn test_forced_end_value_applies_on_cancel() {
        let (mut tree, view) = tree_with_view(Rect::from_size(10.0, 10.0));
        let mut fade = AlphaValueAnimation::new(0.3, true);
        fade.animation_start(&mut tree, view, "fade");
        fade.animation_finished(&mut tree, view, "fade", true);
        assert_eq!(tree.alpha(view), Some(0.3));
    }

    #[test]
    fn test_view_size_truncates_while_running() {
        let (mut tree, view) = tree_with_view(Rect::new(0.0, 0.0, 10.0, 10.0));
        let target = Rect::new(5.0, 5.0, 20.5, 31.0);
        let mut resize = ViewSizeAnimation::new(target, false);
        resize.animation_start(&mut tree, view, "size");

        resize.animation_tick(&mut tree, view, "size", 0.5);
        assert_eq!(tree.view_size(view), Some(Rect::new(2.0, 2.0, 15.0, 20.0)));

        resize.animation_finished(&mut tree, view, "size", false);
        assert_eq!(tree.view_size(view), Some(target));
        assert_eq!(tree.mouseable_area(view), Some(target));
    }

    #[test]
    fn test_control_value_ignores_plain_views() {
        let (mut tree, plain) = tree_with_view(Rect::from_size(10.0, 10.0));
        let control = tree.create_control(Rect::from_size(10.0, 10.0), ControlState::new(0.0, 0.0, 10.0));
        tree.add_view(tree.root(), control).unwrap();

        let mut animation = ControlValueAnimation::new(8.0, false);
        animation.animation_start(&mut tree, control, "value");
        animation.animation_tick(&mut tree, control, "value", 0.25);
        assert_eq!(tree.control_value(control), Some(2.0));
        animation.animation_finished(&mut tree, control, "value", false);
        assert_eq!(tree.control_value(control), Some(8.0));

        let mut other = ControlValueAnimation::new(8.0, true);
        other.animation_start(&mut tree, plain, "value");
        other.animation_tick(&mut tree, plain, "value", 0.5);
        other.animation_finished(&mut tree, plain, "value", false);
        assert_eq!(tree.control_value(plain), None);
    }

    #[test]
    fn test_exchange_push_in_from_left_path() {
        let mut tree = ViewTree::new(Rect::from_size(500.0, 500.0));
        let parent = tree.create_container(Rect::from_size(200.0, 100.0));
        tree.add_view(tree.root(), parent).unwrap();
        let old = tree.create_view(Rect::new(0.0, 0.0, 100.0, 50.0));
        tree.add_view(parent, old).unwrap();
        let new = tree.create_view(Rect::new(0.0, 0.0, 100.0, 50.0));

        let mut exchange = ExchangeViewAnimation::new(&mut tree, old, new, ExchangeStyle::PushInFromLeft);
        assert_eq!(tree.parent(new), Some(parent));
        assert_eq!(tree.view_size(new), Some(Rect::new(-100.0, 0.0, 0.0, 50.0)));

        exchange.animation_start(&mut tree, parent, "exchange");
        exchange.animation_tick(&mut tree, parent, "exchange", 0.5);
        assert_eq!(tree.view_size(new), Some(Rect::new(-50.0, 0.0, 50.0, 50.0)));

        exchange.animation_finished(&mut tree, parent, "exchange", false);
        assert!(!tree.contains(old));
        assert_eq!(tree.children(parent), &[new]);
    }

    #[test]
    fn test_exchange_alpha_fade() {
        let mut tree = ViewTree::new(Rect::from_size(500.0, 500.0));
        let old = tree.create_view(Rect::from_size(10.0, 10.0));
        tree.add_view(tree.root(), old).unwrap();
        let new = tree.create_view(Rect::from_size(10.0, 10.0));
        tree.set_alpha(new, 0.8);

        let mut exchange = ExchangeViewAnimation::new(&mut tree, old, new, ExchangeStyle::AlphaFade);
        assert_eq!(tree.alpha(new), Some(0.0));
        let root = tree.root();
        exchange.animation_tick(&mut tree, root, "exchange", 0.5);
        assert_eq!(tree.alpha(old), Some(0.5));
        assert_eq!(tree.alpha(new), Some(0.4));
    }
}
