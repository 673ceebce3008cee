//! Pointer input types.

use bitflags::bitflags;

bitflags! {
    /// Mouse buttons held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT   = 1 << 0;
        const RIGHT  = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

impl MouseButtons {
    pub fn is_left_button(&self) -> bool {
        self.contains(Self::LEFT)
    }
}

/// Whether a view consumed a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventResult {
    Handled,
    NotHandled,
}

impl MouseEventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, MouseEventResult::Handled)
    }
}

/// Cursor shape requested from the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorType {
    #[default]
    Default,
    /// Left/right resize arrows, shown over vertical separators.
    ResizeHorizontal,
    /// Up/down resize arrows, shown over horizontal separators.
    ResizeVertical,
}
