//! panelkit - layout containers and view animation
//!
//! panelkit is the layout and animation core of a retained view toolkit:
//!
//! - **Split views**: containers with draggable separators, size
//!   constraints and remembered sizes
//! - **Row/column views**: auto layout along one axis with spacing,
//!   margins and alignment
//! - **Animation**: time-driven opacity, geometry, control value and view
//!   exchange transitions
//!
//! # Quick Start
//!
//! ```rust
//! use panelkit::prelude::*;
//!
//! let mut frame = Frame::new(Rect::from_size(640.0, 480.0));
//! let column = frame.create_row_column(Rect::from_size(200.0, 480.0), RowColumnStyle::Column);
//! frame.add_view(frame.root(), column).unwrap();
//!
//! let item = frame.tree_mut().create_view(Rect::from_size(200.0, 24.0));
//! frame.add_view(column, item).unwrap();
//! frame.add_animation(item, "fade-out", AlphaValueAnimation::new(0.0, false), LinearTimingFunction::new(150));
//!
//! let mut now = 0;
//! while frame.has_animations() {
//!     frame.tick(now);
//!     now += u64::from(frame.frame_interval_ms());
//! }
//! assert_eq!(frame.tree().alpha(item), Some(0.0));
//! ```

// Re-export core types
pub use panelkit_core as core;
pub use panelkit_core::{Color, Config, Insets, Point, ProfilingMode, Rect};

#[cfg(feature = "ui")]
pub use panelkit_ui as ui;

#[cfg(feature = "ui")]
pub use panelkit_ui::{Frame, ViewId, ViewTree};

/// Installs the default `tracing` subscriber and, when requested, starts the
/// profiler server.
///
/// Returns `false` if a subscriber was already installed.
pub fn init(config: &Config) -> bool {
    let installed = panelkit_core::logging::try_init();
    #[cfg(feature = "profiling")]
    if config.profiling == ProfilingMode::WithServer {
        panelkit_core::profiling::init_profiling();
    }
    if config.profiling != ProfilingMode::Off {
        panelkit_core::profiling::enable_scopes();
    }
    tracing::debug!("panelkit initialized with {:?}", config.profiling);
    installed
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use panelkit_core::{Color, Config, Insets, Point, ProfilingMode, Rect};

    #[cfg(feature = "ui")]
    pub use panelkit_ui::animation::{
        AlphaValueAnimation, AnimationTarget, AnimationTargetHandler, Animator,
        ControlValueAnimation, CubicBezierTimingFunction, EasingFunction, EasingTimingFunction,
        ExchangeStyle, ExchangeViewAnimation, Finished, InterpolationTimingFunction,
        LinearTimingFunction, PowerTimingFunction, RepeatTimingFunction, TimingFunction,
        ViewSizeAnimation,
    };

    #[cfg(feature = "ui")]
    pub use panelkit_ui::{
        ControlState, CursorType, DrawContext, Frame, LayoutStyle, MouseButtons,
        MouseEventResult, ResizeMethod, RowColumnState, RowColumnStyle, SeparatorDrawer,
        SizeConstraint, SplitStyle, SplitViewController, SplitViewState, TreeError, ViewId,
        ViewTree,
    };
}
