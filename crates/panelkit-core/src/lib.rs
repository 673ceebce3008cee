//! panelkit core
//!
//! Geometry, colors, collections and the ambient logging/profiling setup
//! shared by the panelkit crates.

pub mod alloc;
pub mod color;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod profiling;

pub use color::Color;
pub use config::{Config, ProfilingMode};
pub use geometry::{Insets, Point, Rect};
