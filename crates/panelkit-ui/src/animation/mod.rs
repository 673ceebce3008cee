//! Time-driven view property animation.
//!
//! An animation is identified by a view and a name; starting a second one
//! with the same pair cancels the first. Each animation pairs an
//! [`AnimationTarget`] (what changes) with a [`TimingFunction`] (how fast).
//!
//! # Example
//!
//! ```
//! use panelkit_core::Rect;
//! use panelkit_ui::ViewTree;
//! use panelkit_ui::animation::{AlphaValueAnimation, Animator, LinearTimingFunction};
//!
//! let mut tree = ViewTree::new(Rect::from_size(200.0, 100.0));
//! let view = tree.create_view(Rect::from_size(50.0, 50.0));
//! tree.add_view(tree.root(), view).unwrap();
//!
//! let mut animator = Animator::new();
//! animator.add_animation(
//!     &mut tree,
//!     view,
//!     "fade",
//!     AlphaValueAnimation::new(0.0, false),
//!     LinearTimingFunction::new(200),
//! );
//!
//! animator.tick(&mut tree, 0);
//! animator.tick(&mut tree, 200);
//! assert_eq!(tree.alpha(view), Some(0.0));
//! assert!(animator.is_empty());
//! ```

mod animator;
mod easing;
mod targets;
mod timing;

pub use animator::{Animator, DoneFunction, Finished};
pub use easing::EasingFunction;
pub use targets::{
    AlphaValueAnimation, AnimationTarget, AnimationTargetHandler, ControlValueAnimation,
    ExchangeStyle, ExchangeViewAnimation, ViewSizeAnimation,
};
pub use timing::{
    CubicBezierTimingFunction, EasingTimingFunction, InterpolationTimingFunction,
    LinearTimingFunction, PowerTimingFunction, RepeatTimingFunction, TimingFunction,
};
