use crate::tree::ViewId;

/// Structural errors reported by [`ViewTree`](crate::ViewTree) mutations.
///
/// Layout and animation operations never produce these; they report
/// rejection through `bool`/`Option` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No view with this id exists (never created, or already destroyed).
    UnknownView(ViewId),

    /// The view cannot hold children.
    NotAContainer(ViewId),

    /// The view already has a parent and must be removed first.
    AlreadyParented { view: ViewId, parent: ViewId },

    /// The root view cannot be inserted anywhere.
    RootView,

    /// Inserting would make a view its own ancestor.
    Cycle { view: ViewId, parent: ViewId },

    /// The insertion anchor is not a child of the container.
    NotAChild { container: ViewId, view: ViewId },

    /// The container decides the order of its children itself.
    OrderedContainer(ViewId),

    /// Separators come and go with the split view children around them.
    ManagedSeparator(ViewId),
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::UnknownView(id) => write!(f, "Unknown view: {}", id),
            TreeError::NotAContainer(id) => write!(f, "View {} cannot contain children", id),
            TreeError::AlreadyParented { view, parent } => {
                write!(f, "View {} is already a child of {}", view, parent)
            }
            TreeError::RootView => write!(f, "The root view cannot be inserted"),
            TreeError::Cycle { view, parent } => write!(
                f,
                "Adding {} to {} would make it its own ancestor",
                view, parent
            ),
            TreeError::NotAChild { container, view } => {
                write!(f, "View {} is not a child of {}", view, container)
            }
            TreeError::OrderedContainer(id) => {
                write!(f, "Container {} does not accept positional inserts", id)
            }
            TreeError::ManagedSeparator(id) => {
                write!(f, "Separator {} cannot be removed directly", id)
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_views() {
        let err = TreeError::AlreadyParented {
            view: ViewId(3),
            parent: ViewId(1),
        };
        assert_eq!(err.to_string(), "View #3 is already a child of #1");
    }
}
