//! panelkit UI - split views, row/column layout and view animation
//!
//! This crate provides the layout and animation core of panelkit:
//! - An arena [`ViewTree`] owning every view
//! - Time-driven property animations through the [`animation`] module
//! - [`RowColumnView`] auto layout along one axis
//! - [`SplitView`] containers with draggable separators
//!
//! Nothing here renders or opens windows. A host owns a [`Frame`], calls
//! [`Frame::tick`] from its timer, forwards pointer events and hands a
//! [`DrawContext`] to [`Frame::draw`].
//!
//! ## Quick Start
//!
//! ```rust
//! use panelkit_core::Rect;
//! use panelkit_ui::{Frame, SplitStyle};
//!
//! let mut frame = Frame::new(Rect::from_size(800.0, 600.0));
//! let split = frame.create_split_view(Rect::from_size(800.0, 600.0), SplitStyle::Horizontal);
//! frame.add_view(frame.root(), split).unwrap();
//!
//! let left = frame.tree_mut().create_view(Rect::from_size(300.0, 600.0));
//! let right = frame.tree_mut().create_view(Rect::from_size(490.0, 600.0));
//! frame.add_view(split, left).unwrap();
//! frame.add_view(split, right).unwrap();
//!
//! // One separator now sits between the two views.
//! assert_eq!(frame.tree().children(split).len(), 3);
//! ```

pub mod animation;
pub mod dirty;
pub mod draw;
pub mod error;
pub mod event;
pub mod frame;
pub mod row_column;
pub mod split_view;
pub mod tree;

pub use dirty::DirtyFlags;
pub use draw::{DrawContext, NullDrawContext};
pub use error::{TreeError, TreeResult};
pub use event::{CursorType, MouseButtons, MouseEventResult};
pub use frame::Frame;
pub use tree::{ControlState, PendingResize, ViewId, ViewKind, ViewNode, ViewTree};

// Re-export main types
pub use animation::{Animator, AnimationTarget, Finished, TimingFunction};
pub use row_column::{LayoutStyle, RowColumnFlags, RowColumnState, RowColumnStyle, RowColumnView};
pub use split_view::{
    DefaultSeparatorDrawer, ResizeMethod, SeparatorDrawer, SeparatorFlags, SeparatorState,
    SizeConstraint, SplitStyle, SplitView, SplitViewController, SplitViewState,
};

// Re-export common types from dependencies
pub use panelkit_core::{Color, Insets, Point, Rect};
