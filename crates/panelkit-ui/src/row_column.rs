//! Row/column auto layout.
//!
//! A row/column view stacks its children along one axis, separated by a
//! fixed spacing and inset by a margin. The layout runs again whenever a
//! child is added or removed, the container is resized, or one of its
//! parameters changes, so the children always reflect the current settings.

use crate::dirty::DirtyFlags;
use crate::tree::{PendingResize, ViewId, ViewKind, ViewTree};
use bitflags::bitflags;
use panelkit_core::profiling::profile_function;
use panelkit_core::{Insets, Point, Rect};

/// Animation name used for animated child resizes.
pub const ROW_COLUMN_RESIZE_ANIMATION: &str = "RowColumnResizing";

/// Default duration of animated child resizes.
pub const DEFAULT_VIEW_RESIZE_ANIMATION_MS: u32 = 200;

/// Main axis of a row/column view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowColumnStyle {
    /// Children run left to right.
    #[default]
    Row,
    /// Children run top to bottom.
    Column,
}

/// Placement of the children.
///
/// The `*Equally` styles align every child on the cross axis of the margin
/// area. The nine group styles treat all children as one block, place the
/// block inside the margin area and align the children inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutStyle {
    #[default]
    LeftTopEqually,
    CenterEqually,
    RightBottomEqually,
    /// Every child gets the full cross extent.
    StretchEqually,
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl LayoutStyle {
    /// Horizontal and vertical alignment factors of a group style.
    fn group_alignment(self) -> Option<(f64, f64)> {
        let factors = match self {
            LayoutStyle::TopLeft => (0.0, 0.0),
            LayoutStyle::TopCenter => (0.5, 0.0),
            LayoutStyle::TopRight => (1.0, 0.0),
            LayoutStyle::MiddleLeft => (0.0, 0.5),
            LayoutStyle::MiddleCenter => (0.5, 0.5),
            LayoutStyle::MiddleRight => (1.0, 0.5),
            LayoutStyle::BottomLeft => (0.0, 1.0),
            LayoutStyle::BottomCenter => (0.5, 1.0),
            LayoutStyle::BottomRight => (1.0, 1.0),
            _ => return None,
        };
        Some(factors)
    }
}

bitflags! {
    /// Optional row/column behaviors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RowColumnFlags: u8 {
        /// Animate child resizes while attached.
        const ANIMATE_VIEW_RESIZING = 1 << 0;
        /// Hide children that do not fit completely inside the container.
        const HIDE_CLIPPED_SUBVIEWS = 1 << 1;
    }
}

/// Parameters of a row/column view.
#[derive(Debug, Clone, PartialEq)]
pub struct RowColumnState {
    style: RowColumnStyle,
    layout_style: LayoutStyle,
    spacing: f64,
    margin: Insets,
    flags: RowColumnFlags,
    view_resize_animation_time: u32,
    layout_guard: bool,
}

impl RowColumnState {
    pub fn new(style: RowColumnStyle) -> Self {
        Self {
            style,
            layout_style: LayoutStyle::default(),
            spacing: 0.0,
            margin: Insets::ZERO,
            flags: RowColumnFlags::empty(),
            view_resize_animation_time: DEFAULT_VIEW_RESIZE_ANIMATION_MS,
            layout_guard: false,
        }
    }

    pub fn with_layout_style(mut self, layout_style: LayoutStyle) -> Self {
        self.layout_style = layout_style;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_flags(mut self, flags: RowColumnFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_view_resize_animation_time(mut self, ms: u32) -> Self {
        self.view_resize_animation_time = ms;
        self
    }

    pub fn style(&self) -> RowColumnStyle {
        self.style
    }

    pub fn layout_style(&self) -> LayoutStyle {
        self.layout_style
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn margin(&self) -> Insets {
        self.margin
    }

    pub fn flags(&self) -> RowColumnFlags {
        self.flags
    }

    pub fn view_resize_animation_time(&self) -> u32 {
        self.view_resize_animation_time
    }

    fn is_row(&self) -> bool {
        self.style == RowColumnStyle::Row
    }
}

impl Default for RowColumnState {
    fn default() -> Self {
        Self::new(RowColumnStyle::Row)
    }
}

/// Mutable access to one row/column view.
pub struct RowColumnView<'a> {
    tree: &'a mut ViewTree,
    id: ViewId,
}

impl ViewTree {
    /// Creates a detached row/column view.
    pub fn create_row_column(&mut self, rect: Rect, state: RowColumnState) -> ViewId {
        self.create(ViewKind::RowColumn(state), rect)
    }

    pub fn row_column(&self, id: ViewId) -> Option<&RowColumnState> {
        match self.kind(id) {
            Some(ViewKind::RowColumn(state)) => Some(state),
            _ => None,
        }
    }

    /// Handle for changing a row/column view, `None` for other views.
    pub fn row_column_mut(&mut self, id: ViewId) -> Option<RowColumnView<'_>> {
        self.row_column(id)?;
        Some(RowColumnView { tree: self, id })
    }

    /// Places the children of a row/column view.
    pub(crate) fn layout_row_column(&mut self, id: ViewId) {
        profile_function!();

        let Some(bounds) = self.view_size(id).map(Rect::originized) else {
            return;
        };
        let state = match self.kind_mut(id) {
            Some(ViewKind::RowColumn(state)) if !state.layout_guard => {
                state.layout_guard = true;
                state.clone()
            }
            _ => return,
        };
        let children = self.children(id).to_vec();
        let sizes: Vec<Point> = children
            .iter()
            .map(|child| self.view_size(*child).map(|r| r.size()).unwrap_or_default())
            .collect();
        let rects = compute_layout(&state, bounds, &sizes);

        let animate = self.is_attached(id)
            && state.flags.contains(RowColumnFlags::ANIMATE_VIEW_RESIZING)
            && state.view_resize_animation_time > 0;

        for (child, rect) in children.iter().zip(&rects) {
            if self.view_size(*child) == Some(*rect) {
                continue;
            }
            if animate {
                self.push_pending_resize(PendingResize {
                    view: *child,
                    name: ROW_COLUMN_RESIZE_ANIMATION,
                    target: *rect,
                    duration_ms: state.view_resize_animation_time,
                });
            } else {
                self.move_view(*child, *rect);
            }
        }

        if state.flags.contains(RowColumnFlags::HIDE_CLIPPED_SUBVIEWS) {
            for (child, rect) in children.iter().zip(&rects) {
                self.set_visible(*child, bounds.contains_rect(rect));
            }
        }

        self.mark_dirty(id, DirtyFlags::LAYOUT);
        if let Some(ViewKind::RowColumn(state)) = self.kind_mut(id) {
            state.layout_guard = false;
        }
    }
}

/// Child rectangles for the given container bounds and child sizes.
fn compute_layout(state: &RowColumnState, bounds: Rect, sizes: &[Point]) -> Vec<Rect> {
    let area = bounds.inset_by(state.margin);
    let row = state.is_row();
    let main = |size: &Point| if row { size.x } else { size.y };
    let cross = |size: &Point| if row { size.y } else { size.x };

    let largest_cross = sizes.iter().map(cross).fold(0.0, f64::max);
    let (area_main_start, area_cross_start) = if row {
        (area.left, area.top)
    } else {
        (area.top, area.left)
    };

    // Returns (main origin, cross origin, main size, cross size) per child.
    let mut placed: Vec<(f64, f64, f64, f64)> = Vec::with_capacity(sizes.len());

    if let Some((align_x, align_y)) = state.layout_style.group_alignment() {
        let total_main = sizes.iter().map(main).sum::<f64>()
            + state.spacing * sizes.len().saturating_sub(1) as f64;
        let (align_main, align_cross) = if row {
            (align_x, align_y)
        } else {
            (align_y, align_x)
        };
        let (area_main, area_cross) = if row {
            (area.width(), area.height())
        } else {
            (area.height(), area.width())
        };
        let group_main = area_main_start + (area_main - total_main) * align_main;
        let group_cross = area_cross_start + (area_cross - largest_cross) * align_cross;

        let mut location = group_main;
        for size in sizes {
            let cross_offset = (largest_cross - cross(size)) * align_cross;
            placed.push((location, group_cross + cross_offset, main(size), cross(size)));
            location += main(size) + state.spacing;
        }
    } else {
        let area_cross = (if row { area.height() } else { area.width() }).max(0.0);
        let extent = area_cross.max(largest_cross);

        let mut location = area_main_start;
        for size in sizes {
            let (offset, cross_size) = match state.layout_style {
                LayoutStyle::CenterEqually => ((extent - cross(size)) / 2.0, cross(size)),
                LayoutStyle::RightBottomEqually => (extent - cross(size), cross(size)),
                LayoutStyle::StretchEqually => (0.0, extent.max(0.0)),
                _ => (0.0, cross(size)),
            };
            placed.push((location, area_cross_start + offset, main(size), cross_size));
            location += main(size) + state.spacing;
        }
    }

    placed
        .into_iter()
        .map(|(m, c, main_size, cross_size)| {
            if row {
                Rect::new(m, c, m + main_size, c + cross_size)
            } else {
                Rect::new(c, m, c + cross_size, m + main_size)
            }
        })
        .collect()
}

impl RowColumnView<'_> {
    pub fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, change: impl FnOnce(&mut RowColumnState) -> bool) {
        let changed = match self.tree.kind_mut(self.id) {
            Some(ViewKind::RowColumn(state)) => change(state),
            _ => false,
        };
        if changed {
            self.tree.layout_row_column(self.id);
        }
    }

    pub fn set_style(&mut self, style: RowColumnStyle) {
        self.update(|state| std::mem::replace(&mut state.style, style) != style);
    }

    pub fn set_layout_style(&mut self, layout_style: LayoutStyle) {
        self.update(|state| std::mem::replace(&mut state.layout_style, layout_style) != layout_style);
    }

    pub fn set_spacing(&mut self, spacing: f64) {
        self.update(|state| std::mem::replace(&mut state.spacing, spacing) != spacing);
    }

    pub fn set_margin(&mut self, margin: Insets) {
        self.update(|state| std::mem::replace(&mut state.margin, margin) != margin);
    }

    pub fn set_animate_view_resizing(&mut self, animate: bool) {
        self.update(|state| {
            state.flags.set(RowColumnFlags::ANIMATE_VIEW_RESIZING, animate);
            false
        });
    }

    pub fn set_hide_clipped_subviews(&mut self, hide: bool) {
        self.update(|state| {
            let changed = state.flags.contains(RowColumnFlags::HIDE_CLIPPED_SUBVIEWS) != hide;
            state.flags.set(RowColumnFlags::HIDE_CLIPPED_SUBVIEWS, hide);
            changed
        });
    }

    pub fn set_view_resize_animation_time(&mut self, ms: u32) {
        self.update(|state| {
            state.view_resize_animation_time = ms;
            false
        });
    }

    /// Lays the children out again.
    pub fn layout_views(&mut self) {
        self.tree.layout_row_column(self.id);
    }

    /// Shrinks or grows the container to the tight bounds of its children
    /// plus margins. Without children it collapses to the margins.
    ///
    /// Returns `true` when children exist or the container size changed.
    pub fn size_to_fit(&mut self) -> bool {
        profile_function!();

        let Some(state) = self.tree.row_column(self.id).cloned() else {
            return false;
        };
        let Some(current) = self.tree.view_size(self.id) else {
            return false;
        };
        let sizes: Vec<Point> = self
            .tree
            .children(self.id)
            .iter()
            .filter_map(|child| self.tree.view_size(*child).map(|r| r.size()))
            .collect();

        let total_main = sizes
            .iter()
            .map(|s| if state.is_row() { s.x } else { s.y })
            .sum::<f64>()
            + state.spacing * sizes.len().saturating_sub(1) as f64;
        let largest_cross = sizes
            .iter()
            .map(|s| if state.is_row() { s.y } else { s.x })
            .fold(0.0, f64::max);
        let (width, height) = if state.is_row() {
            (total_main, largest_cross)
        } else {
            (largest_cross, total_main)
        };

        let mut fitted = current;
        fitted
            .set_width(width + state.margin.horizontal())
            .set_height(height + state.margin.vertical());

        let changed = fitted != current;
        if changed {
            self.tree.invalid(self.id);
            self.tree.set_view_size(self.id, fitted);
            self.tree.set_mouseable_area(self.id, fitted);
            self.tree.invalid(self.id);
        }
        changed || !sizes.is_empty()
    }
}
