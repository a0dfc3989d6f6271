//! Itemtree indexes a flat collection of parent-referencing records into a
//! navigable hierarchy.
//!
//! Each record ([Item]) only knows its own id and the id of its parent.
//! An [ItemTree] derives the hierarchy once and then answers structural
//! queries without re-walking the collection.
//! Core functionality provided:
//! - Construction in O(n): parent-to-children grouping plus one depth-first
//!   pass assigning each reachable item its level and parent link; the
//!   materialized path of an item is assembled on demand.
//! - Queries: children, descendants (with counts), ancestors, siblings,
//!   level of an item and maximum level of the tree.
//! - Diagnostics: items not reachable from any root and duplicate ids are
//!   excluded from the index and listed; a strict build rejects them.
//! - Configurability via [ItemTreeBuilder]: root sentinel, strictness.
//!
//! Limitations:
//! - Immutable after construction, no insertion or removal
//! - Ids must be unique (caller-guaranteed)
//!
//! # Usage patterns
//! 1. [`index_items`] or [`ItemTree::new`] for default settings.
//! 2. [ItemTreeBuilder] for full control.
//!
//! ## Example
//! ```
//! use itemtree::{Item, index_items};
//!
//! let items = vec![
//!     Item::new(1, "A", 0),
//!     Item::new(2, "A-1", 1),
//!     Item::new(3, "A-2", 1),
//!     Item::new(9, "A-2-1", 3),
//!     Item::new(5, "B", 0),
//! ];
//! let tree = index_items(&items);
//!
//! let leaf = tree.find_item(9).unwrap();
//! let ancestors = tree.ancestors(leaf, false)?;
//! let ids: Vec<_> = ancestors.iter().map(|item| item.id()).collect();
//! assert_eq!(ids, vec![1, 3]);
//! assert_eq!(tree.level(leaf), Some(3));
//! # Ok::<(), itemtree::TreeError>(())
//! ```
//!
//! # Logging
//! The crate emits [tracing] events (`debug` build summary, `warn` for
//! excluded items, `trace` per indexed item) and installs no subscriber.

pub mod error;
pub mod model;

pub use crate::error::{PathParseError, TreeError};
pub use crate::model::{Item, ItemId, ItemPath, ItemTree, ItemTreeBuilder, ROOT_PARENT};

// ============================================================================
// Quick API
// ============================================================================
/// Indexes a collection of items using default settings,
/// returning an [ItemTree] borrowing them.
///
/// See [`ItemTree::new`] for full documentation.
pub fn index_items(items: &[Item]) -> ItemTree<'_> {
    ItemTree::new(items)
}
