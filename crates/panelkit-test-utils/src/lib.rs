//! Test utilities for panelkit.
//!
//! Recording implementations of the collaborator traits `panelkit-ui`
//! consumes, so tests can assert on what the library asked for.
//!
//! - [`RecordingDrawContext`] - keeps every draw call as a [`DrawCommand`]
//! - [`MemorySplitViewController`] - size constraints and remembered sizes
//!   held in memory
//! - [`RecordingAnimationTarget`] - custom animation target logging every
//!   callback into a shared [`TargetLog`]
//!
//! # Example
//!
//! ```rust
//! use panelkit_core::Rect;
//! use panelkit_test_utils::{DrawCommand, RecordingDrawContext};
//! use panelkit_ui::{Frame, SplitStyle};
//!
//! let mut frame = Frame::new(Rect::from_size(200.0, 100.0));
//! let split = frame.create_split_view(Rect::from_size(200.0, 100.0), SplitStyle::Horizontal);
//! frame.add_view(frame.root(), split).unwrap();
//! for width in [95.0, 95.0] {
//!     let view = frame.tree_mut().create_view(Rect::from_size(width, 100.0));
//!     frame.add_view(split, view).unwrap();
//! }
//!
//! let mut ctx = RecordingDrawContext::new();
//! frame.draw(&mut ctx);
//! assert_eq!(ctx.fills().len(), 1);
//! ```

pub mod controller;
pub mod draw;
pub mod target;

pub use controller::MemorySplitViewController;
pub use draw::{DrawCommand, RecordingDrawContext};
pub use target::{RecordingAnimationTarget, TargetEvent, TargetLog};
