//! Rectangle and point arithmetic shared by every layout routine.
//!
//! Coordinates are `f64`. A [`Rect`] is stored as its four edges; callers are
//! expected to keep `right >= left` and `bottom >= top`, but the operations
//! here do not enforce it.

use glam::DVec2;

/// A point (or size) in view coordinates.
pub type Point = DVec2;

/// An axis-aligned rectangle described by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle of the given size at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Point {
        Point::new(self.width(), self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Moves the right edge so the rectangle has the given width.
    pub fn set_width(&mut self, width: f64) -> &mut Self {
        self.right = self.left + width;
        self
    }

    /// Moves the bottom edge so the rectangle has the given height.
    pub fn set_height(&mut self, height: f64) -> &mut Self {
        self.bottom = self.top + height;
        self
    }

    /// Moves the rectangle by `(dx, dy)` in place.
    pub fn offset(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
        self
    }

    /// Returns a copy moved by `delta`.
    pub fn translated(self, delta: Point) -> Rect {
        let mut r = self;
        r.offset(delta.x, delta.y);
        r
    }

    /// Moves the rectangle so its top-left corner is at the origin.
    pub fn originize(&mut self) -> &mut Self {
        let (dx, dy) = (-self.left, -self.top);
        self.offset(dx, dy)
    }

    /// Returns a copy with the top-left corner at the origin.
    pub fn originized(self) -> Rect {
        let mut r = self;
        r.originize();
        r
    }

    /// Returns a copy shrunk by the given per-edge insets.
    pub fn inset_by(self, insets: Insets) -> Rect {
        Rect::new(
            self.left + insets.left,
            self.top + insets.top,
            self.right - insets.right,
            self.bottom - insets.bottom,
        )
    }

    /// Rounds every edge to the nearest integer coordinate.
    pub fn make_integral(&mut self) -> &mut Self {
        self.left = self.left.round();
        self.top = self.top.round();
        self.right = self.right.round();
        self.bottom = self.bottom.round();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Half-open containment test: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Returns true if `other` lies completely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Returns the overlapping area, or `None` if the rectangles are disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        Some(Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        ))
    }

    /// Returns the smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }
}

/// Per-edge distances, used for margins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Insets {
    pub const ZERO: Insets = Insets::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same inset on every edge.
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}
