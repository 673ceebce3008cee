//! Per-view change tracking.

use bitflags::bitflags;

bitflags! {
    /// What changed on a view since the host last cleared its flags.
    ///
    /// The flags let the drawing collaborator skip work: an opacity-only
    /// change needs a repaint but no new geometry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u16 {
        const NONE           = 0;

        /// The view rectangle moved or resized.
        const GEOMETRY       = 1 << 0;

        /// Children were added, removed or reordered.
        const CHILDREN_ORDER = 1 << 1;

        /// The container has to lay out its children again.
        const LAYOUT         = 1 << 2;

        /// Alpha changed.
        const OPACITY        = 1 << 3;

        /// Visible/hidden toggle changed.
        const VISIBILITY     = 1 << 4;

        /// A control value changed.
        const VALUE          = 1 << 5;

        /// The view asked to be redrawn.
        const PAINT          = 1 << 6;

        /// Hover or press state of an interactive part changed.
        const INTERACTION    = 1 << 7;
    }
}

impl DirtyFlags {
    /// Flags that change where things are.
    pub const LAYOUT_GROUP: Self = Self::GEOMETRY
        .union(Self::CHILDREN_ORDER)
        .union(Self::LAYOUT);

    /// Flags that only change how things look.
    pub const PAINT_GROUP: Self = Self::OPACITY
        .union(Self::VISIBILITY)
        .union(Self::VALUE)
        .union(Self::PAINT)
        .union(Self::INTERACTION);

    pub fn needs_layout(&self) -> bool {
        self.intersects(Self::LAYOUT_GROUP)
    }

    pub fn needs_repaint(&self) -> bool {
        !self.is_empty()
    }

    /// True if only paint-affecting flags are set.
    pub fn is_paint_only(&self) -> bool {
        !self.is_empty() && !self.needs_layout()
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_clean() {
        let flags = DirtyFlags::NONE;
        assert!(flags.is_empty());
        assert!(!flags.needs_layout());
        assert!(!flags.needs_repaint());
        assert!(!flags.is_paint_only());
    }

    #[test]
    fn test_geometry_needs_layout() {
        let flags = DirtyFlags::GEOMETRY;
        assert!(flags.needs_layout());
        assert!(!flags.is_paint_only());
    }

    #[test]
    fn test_opacity_is_paint_only() {
        let flags = DirtyFlags::OPACITY | DirtyFlags::PAINT;
        assert!(flags.is_paint_only());
        assert!(flags.needs_repaint());
    }
}
