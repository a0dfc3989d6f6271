//! Configurable construction of an [ItemTree].

use crate::error::TreeError;
use crate::model::item::{Item, ItemId, ROOT_PARENT};
use crate::model::tree::ItemTree;
use tracing::debug;

// =#========================================================================#=
// ITEM TREE BUILDER
// =#========================================================================#=
/// Builder for an [ItemTree] with non-default settings.
///
/// Defaults match [`ItemTree::new`]:
/// - Root sentinel is [ROOT_PARENT] (`0`)
/// - Lenient: unreachable items and duplicate ids are excluded silently
///
/// # Example
/// ```
/// use itemtree::model::{Item, ItemTreeBuilder};
/// use itemtree::TreeError;
///
/// let items = vec![Item::new(1, "A", 0), Item::new(2, "orphan", 42)];
///
/// let result = ItemTreeBuilder::new().strict().build(&items);
/// assert_eq!(result.unwrap_err(), TreeError::UnreachableItems { ids: vec![2] });
///
/// let tree = ItemTreeBuilder::new().build(&items)?;
/// assert_eq!(tree.num_indexed(), 1);
/// # Ok::<(), TreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ItemTreeBuilder {
    root_parent: ItemId,
    strict: bool,
}

impl Default for ItemTreeBuilder {
    fn default() -> Self {
        ItemTreeBuilder {
            root_parent: ROOT_PARENT,
            strict: false,
        }
    }
}

impl ItemTreeBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the parent value that marks an item as root.
    ///
    /// # Arguments
    /// * `root_parent` - Sentinel parent id (default [ROOT_PARENT])
    pub fn root_parent(mut self, root_parent: ItemId) -> Self {
        self.root_parent = root_parent;
        self
    }

    /// Configure a **strict** build: [`build()`](Self::build) fails on
    /// duplicate ids or unreachable items instead of excluding them.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Configure a **lenient** build (default): duplicate ids and
    /// unreachable items are excluded from the index and only reported via
    /// [`ItemTree::duplicate_ids`] and [`ItemTree::unreachable_items`].
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Indexes the given items with this configuration.
    ///
    /// # Arguments
    /// * `items` - The flat collection; borrowed for the lifetime of the tree
    ///
    /// # Errors
    /// Only in strict mode:
    /// * [TreeError::DuplicateId] for the first id occurring twice
    /// * [TreeError::UnreachableItems] listing all items no root leads to
    pub fn build<'a>(&self, items: &'a [Item]) -> Result<ItemTree<'a>, TreeError> {
        let tree = ItemTree::index_with_root(items, self.root_parent);

        if self.strict {
            if let Some(&id) = tree.duplicate_ids().first() {
                return Err(TreeError::DuplicateId(id));
            }

            let unreachable = tree.unreachable_items();
            if !unreachable.is_empty() {
                return Err(TreeError::UnreachableItems {
                    ids: unreachable.iter().map(|item| item.id()).collect(),
                });
            }
            debug!("strict build passed");
        }

        Ok(tree)
    }
}
