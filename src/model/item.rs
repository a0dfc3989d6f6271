//! Item module for flat parent-referencing records.

use std::fmt;

/// Identifier of an [Item], unique within one collection (caller-guaranteed).
pub type ItemId = u64;

/// Parent value marking an item as root, i.e. without parent in the collection.
pub const ROOT_PARENT: ItemId = 0;

// =#========================================================================#=
// ITEM
// =#========================================================================#=
/// A flat record referencing its parent by id.
///
/// Items are plain data: they know their own id, a display name and the id
/// of their parent ([ROOT_PARENT] for roots). They never reference a tree;
/// an [ItemTree](crate::model::ItemTree) borrows a slice of them and derives
/// the hierarchy.
///
/// # Invariants
/// None enforced. Callers are responsible for unique ids and for `parent`
/// being either [ROOT_PARENT] or the id of another item in the same
/// collection. Items violating the latter are *unreachable* and excluded
/// from all structural queries of a tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    id: ItemId,
    name: String,
    parent: ItemId,
}

impl Item {
    /// Creates a new item. No validation is performed.
    ///
    /// # Arguments
    /// * `id` - Identifier of this item (expected positive)
    /// * `name` - Display name
    /// * `parent` - Id of the parent item, or [ROOT_PARENT] for a root
    pub fn new(id: ItemId, name: impl Into<String>, parent: ItemId) -> Self {
        Item {
            id,
            name: name.into(),
            parent,
        }
    }

    /// Returns the id of this item.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the display name of this item.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the id of the parent, [ROOT_PARENT] for roots.
    pub fn parent(&self) -> ItemId {
        self.parent
    }

    /// Returns whether this item declares itself a root (parent is [ROOT_PARENT]).
    pub fn is_root(&self) -> bool {
        self.parent == ROOT_PARENT
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}
