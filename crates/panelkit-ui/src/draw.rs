//! Drawing collaborator interface.
//!
//! The crate never rasterizes anything itself. A host backend implements
//! [`DrawContext`] and receives the views' rectangles in root coordinates.

use panelkit_core::{Color, Point, Rect};

/// Minimal immediate-mode drawing surface.
pub trait DrawContext {
    /// Opacity multiplied into every following primitive until changed.
    fn set_global_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f64);
}

/// Draw context that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDrawContext;

impl DrawContext for NullDrawContext {
    fn set_global_alpha(&mut self, _alpha: f32) {}

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}

    fn stroke_rect(&mut self, _rect: Rect, _color: Color, _width: f64) {}

    fn draw_line(&mut self, _from: Point, _to: Point, _color: Color, _width: f64) {}
}
