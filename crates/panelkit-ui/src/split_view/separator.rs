//! Separator views: state, pointer interaction and drawing.

use super::SplitStyle;
use crate::dirty::DirtyFlags;
use crate::draw::DrawContext;
use crate::event::{CursorType, MouseButtons, MouseEventResult};
use crate::tree::{ViewId, ViewKind, ViewTree};
use bitflags::bitflags;
use panelkit_core::{Color, Point, Rect};

bitflags! {
    /// Interaction state of a separator, handed to its drawer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SeparatorFlags: u8 {
        const MOUSE_OVER = 1 << 0;
        const MOUSE_DOWN = 1 << 1;
    }
}

/// State of one separator inside a split view.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorState {
    index: usize,
    style: SplitStyle,
    flags: SeparatorFlags,
    last_mouse_pos: Point,
    start_size: Rect,
}

impl SeparatorState {
    pub(crate) fn new(index: usize, style: SplitStyle) -> Self {
        Self {
            index,
            style,
            flags: SeparatorFlags::empty(),
            last_mouse_pos: Point::ZERO,
            start_size: Rect::ZERO,
        }
    }

    /// Position of the gap this separator represents, counted from 0.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn style(&self) -> SplitStyle {
        self.style
    }

    pub fn flags(&self) -> SeparatorFlags {
        self.flags
    }

    pub fn is_dragging(&self) -> bool {
        self.flags.contains(SeparatorFlags::MOUSE_DOWN)
    }
}

/// Draws split-view separators.
pub trait SeparatorDrawer {
    fn draw_separator(
        &self,
        ctx: &mut dyn DrawContext,
        rect: Rect,
        flags: SeparatorFlags,
        index: usize,
        split_view: ViewId,
    );
}

/// Flat separator with a grip line, highlighted while hovered or dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultSeparatorDrawer {
    pub color: Color,
    pub hover_color: Color,
    pub grip_color: Color,
}

impl Default for DefaultSeparatorDrawer {
    fn default() -> Self {
        Self {
            color: Color::from_rgb_u8(60, 60, 70),
            hover_color: Color::from_rgb_u8(80, 100, 140),
            grip_color: Color::from_rgb_u8(120, 120, 130),
        }
    }
}

impl SeparatorDrawer for DefaultSeparatorDrawer {
    fn draw_separator(
        &self,
        ctx: &mut dyn DrawContext,
        rect: Rect,
        flags: SeparatorFlags,
        _index: usize,
        _split_view: ViewId,
    ) {
        let active = flags.intersects(SeparatorFlags::MOUSE_OVER | SeparatorFlags::MOUSE_DOWN);
        ctx.fill_rect(rect, if active { self.hover_color } else { self.color });

        let center = rect.center();
        let (from, to) = if rect.height() >= rect.width() {
            let half = (rect.height() / 8.0).min(12.0);
            (Point::new(center.x, center.y - half), Point::new(center.x, center.y + half))
        } else {
            let half = (rect.width() / 8.0).min(12.0);
            (Point::new(center.x - half, center.y), Point::new(center.x + half, center.y))
        };
        ctx.draw_line(from, to, self.grip_color, 1.0);
    }
}

impl ViewTree {
    pub fn separator(&self, id: ViewId) -> Option<&SeparatorState> {
        match self.kind(id) {
            Some(ViewKind::Separator(state)) => Some(state),
            _ => None,
        }
    }

    fn separator_mut(&mut self, id: ViewId) -> Option<&mut SeparatorState> {
        match self.kind_mut(id) {
            Some(ViewKind::Separator(state)) => Some(state),
            _ => None,
        }
    }

    fn set_separator_flag(&mut self, id: ViewId, flag: SeparatorFlags, on: bool) {
        if let Some(state) = self.separator_mut(id) {
            state.flags.set(flag, on);
        }
        self.mark_dirty(id, DirtyFlags::INTERACTION);
        self.invalid(id);
    }

    /// Whether `point` (split-view coordinates) lands on a child of the
    /// separator.
    fn separator_hits_subview(&self, id: ViewId, point: Point) -> bool {
        let Some(rect) = self.view_size(id) else {
            return false;
        };
        let local = point - rect.top_left();
        self.children(id).iter().any(|child| {
            self.is_visible(*child)
                && self
                    .mouseable_area(*child)
                    .is_some_and(|area| area.contains(local))
        })
    }

    /// Mouse press on a separator. `point` is in split-view coordinates.
    ///
    /// A left click that does not land on one of the separator's own
    /// children starts a drag.
    pub fn separator_mouse_down(&mut self, id: ViewId, point: Point, buttons: MouseButtons) -> MouseEventResult {
        if self.separator_hits_subview(id, point) || !buttons.is_left_button() {
            return MouseEventResult::NotHandled;
        }
        let Some(rect) = self.view_size(id) else {
            return MouseEventResult::NotHandled;
        };
        let Some(state) = self.separator_mut(id) else {
            return MouseEventResult::NotHandled;
        };
        state.flags.insert(SeparatorFlags::MOUSE_DOWN);
        state.last_mouse_pos = point;
        state.start_size = rect;
        self.mark_dirty(id, DirtyFlags::INTERACTION);
        self.invalid(id);
        tracing::trace!("Separator {} drag started at {:?}", id, point);
        self.separator_mouse_moved(id, point, buttons)
    }

    /// Mouse movement over or while dragging a separator.
    pub fn separator_mouse_moved(&mut self, id: ViewId, point: Point, buttons: MouseButtons) -> MouseEventResult {
        let Some(state) = self.separator(id).cloned() else {
            return MouseEventResult::NotHandled;
        };

        if state.flags.contains(SeparatorFlags::MOUSE_DOWN) {
            if point != state.last_mouse_pos {
                let delta = point - state.last_mouse_pos;
                let mut proposed = state.start_size;
                match state.style {
                    SplitStyle::Horizontal => proposed.offset(delta.x, 0.0),
                    SplitStyle::Vertical => proposed.offset(0.0, delta.y),
                };
                if let Some(split) = self.parent(id) {
                    if let Some(limits) = self.separator_constraint_rect(split, id) {
                        proposed = clamp_along(proposed, limits, state.style);
                    }
                    self.request_new_separator_size(split, id, proposed);
                }
            }
        } else if !state.flags.contains(SeparatorFlags::MOUSE_OVER) {
            let inside = self.view_size(id).is_some_and(|r| r.contains(point));
            if inside && !self.separator_hits_subview(id, point) {
                self.separator_mouse_entered(id, point, buttons);
            }
        } else if self.separator_hits_subview(id, point) {
            self.separator_mouse_exited(id);
        }
        MouseEventResult::Handled
    }

    /// Ends a drag.
    pub fn separator_mouse_up(&mut self, id: ViewId, _point: Point, _buttons: MouseButtons) -> MouseEventResult {
        if self.separator(id).is_some_and(SeparatorState::is_dragging) {
            self.set_separator_flag(id, SeparatorFlags::MOUSE_DOWN, false);
            tracing::trace!("Separator {} drag ended", id);
            return MouseEventResult::Handled;
        }
        MouseEventResult::NotHandled
    }

    /// Pointer entered the separator: highlight it and request a resize cursor.
    pub fn separator_mouse_entered(&mut self, id: ViewId, point: Point, _buttons: MouseButtons) -> MouseEventResult {
        let Some(style) = self.separator(id).map(SeparatorState::style) else {
            return MouseEventResult::NotHandled;
        };
        if self.separator_hits_subview(id, point) {
            return MouseEventResult::Handled;
        }
        self.set_separator_flag(id, SeparatorFlags::MOUSE_OVER, true);
        self.set_cursor(match style {
            SplitStyle::Horizontal => CursorType::ResizeHorizontal,
            SplitStyle::Vertical => CursorType::ResizeVertical,
        });
        MouseEventResult::Handled
    }

    /// Pointer left the separator.
    pub fn separator_mouse_exited(&mut self, id: ViewId) -> MouseEventResult {
        if self.separator(id).is_none() {
            return MouseEventResult::NotHandled;
        }
        self.set_separator_flag(id, SeparatorFlags::MOUSE_OVER, false);
        self.set_cursor(CursorType::Default);
        MouseEventResult::Handled
    }

    pub(crate) fn separator_detached(&mut self, id: ViewId) {
        if self
            .separator(id)
            .is_some_and(|s| s.flags.contains(SeparatorFlags::MOUSE_OVER))
        {
            self.set_cursor(CursorType::Default);
        }
    }
}

/// Shifts `rect` along the split axis so it lies inside `limits`.
pub(crate) fn clamp_along(mut rect: Rect, limits: Rect, style: SplitStyle) -> Rect {
    match style {
        SplitStyle::Horizontal => {
            if rect.left < limits.left {
                rect.offset(limits.left - rect.left, 0.0);
            } else if rect.right > limits.right {
                rect.offset(limits.right - rect.right, 0.0);
            }
        }
        SplitStyle::Vertical => {
            if rect.top < limits.top {
                rect.offset(0.0, limits.top - rect.top);
            } else if rect.bottom > limits.bottom {
                rect.offset(0.0, limits.bottom - rect.bottom);
            }
        }
    }
    rect
}
