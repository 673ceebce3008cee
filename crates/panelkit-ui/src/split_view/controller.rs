use super::separator::SeparatorDrawer;
use crate::tree::ViewId;
use std::rc::Rc;

/// Size limits of one split-view child along the split axis.
///
/// `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeConstraint {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SizeConstraint {
    pub const UNCONSTRAINED: SizeConstraint = SizeConstraint {
        min: None,
        max: None,
    };

    /// Only a lower bound.
    pub fn min(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Only an upper bound.
    pub fn max(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn min_max(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Lower bound, ignoring negative values.
    pub fn min_size(&self) -> Option<f64> {
        self.min.filter(|m| *m >= 0.0)
    }

    /// Upper bound, ignoring negative values.
    pub fn max_size(&self) -> Option<f64> {
        self.max.filter(|m| *m >= 0.0)
    }

    /// Whether `size` lies within both bounds.
    pub fn allows(&self, size: f64) -> bool {
        self.min_size().is_none_or(|min| size >= min) && self.max_size().is_none_or(|max| size <= max)
    }
}

/// Supplies size policy and persistence for the children of a split view.
///
/// Child indices count content views only; separators are skipped.
pub trait SplitViewController {
    /// Size limits of child `index`, `None` if unconstrained.
    fn size_constraint(&self, index: usize, split_view: ViewId) -> Option<SizeConstraint>;

    /// Called for each child when the split view is detached.
    fn store_view_size(&mut self, index: usize, size: f64, split_view: ViewId) -> bool;

    /// Called for each child when the split view is attached. A returned
    /// size replaces the child's current size along the split axis.
    fn restore_view_size(&self, index: usize, split_view: ViewId) -> Option<f64>;

    /// Drawer overriding the split view's own.
    fn separator_drawer(&self, _split_view: ViewId) -> Option<Rc<dyn SeparatorDrawer>> {
        None
    }
}
