//! In-memory split view controller.

use panelkit_core::alloc::HashMap;
use panelkit_ui::{SeparatorDrawer, SizeConstraint, SplitViewController, ViewId};
use std::rc::Rc;

/// Split view controller backed by plain maps.
///
/// Constraints are configured up front; stored sizes are handed back on
/// the next attach. Every store is also appended to [`stores`](Self::stores)
/// so tests can check what was persisted and when.
#[derive(Default)]
pub struct MemorySplitViewController {
    constraints: HashMap<usize, SizeConstraint>,
    sizes: HashMap<usize, f64>,
    stores: Vec<(usize, f64)>,
    drawer: Option<Rc<dyn SeparatorDrawer>>,
}

impl MemorySplitViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constraint(mut self, index: usize, constraint: SizeConstraint) -> Self {
        self.constraints.insert(index, constraint);
        self
    }

    /// Pre-seeds a size returned by `restore_view_size`.
    pub fn with_size(mut self, index: usize, size: f64) -> Self {
        self.sizes.insert(index, size);
        self
    }

    pub fn with_drawer(mut self, drawer: Rc<dyn SeparatorDrawer>) -> Self {
        self.drawer = Some(drawer);
        self
    }

    pub fn size(&self, index: usize) -> Option<f64> {
        self.sizes.get(&index).copied()
    }

    /// Every `store_view_size` call as `(index, size)`.
    pub fn stores(&self) -> &[(usize, f64)] {
        &self.stores
    }
}

impl SplitViewController for MemorySplitViewController {
    fn size_constraint(&self, index: usize, _split_view: ViewId) -> Option<SizeConstraint> {
        self.constraints.get(&index).copied()
    }

    fn store_view_size(&mut self, index: usize, size: f64, _split_view: ViewId) -> bool {
        self.sizes.insert(index, size);
        self.stores.push((index, size));
        true
    }

    fn restore_view_size(&self, index: usize, _split_view: ViewId) -> Option<f64> {
        self.sizes.get(&index).copied()
    }

    fn separator_drawer(&self, _split_view: ViewId) -> Option<Rc<dyn SeparatorDrawer>> {
        self.drawer.clone()
    }
}
