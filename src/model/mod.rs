//! Data model for indexing flat parent-referencing records.
//!
//! # Representation
//! Records are [Item]s: an id, a name and the id of their parent, with
//! [ROOT_PARENT] (`0`) marking roots. An [ItemTree] borrows a slice of items
//! and derives, once at construction, an id index, a level and parent link
//! per reachable item, child lists and subtree sizes. The materialized
//! [ItemPath] of an item (the chain of ids from its root down to itself) is
//! assembled from the parent links when asked for.
//!
//! | Type | Role |
//! |------|------|
//! | [Item] | Caller-owned record, never mutated |
//! | [ItemPath] | Root-to-item id chain, dotted text form `1.3.9` |
//! | [ItemTree] | Immutable index answering structural queries |
//! | [ItemTreeBuilder] | Configuration (root sentinel, strictness) |
//!
//! # Building trees
//! - [`ItemTree::new`] for the lenient default
//! - [ItemTreeBuilder] to change the root sentinel or to fail on
//!   unreachable items and duplicate ids
//!
//! There is no mutation API; to reflect changes, build a new tree from the
//! updated collection.

pub mod builder;
pub mod item;
pub mod path;
pub mod tree;

pub use builder::ItemTreeBuilder;
pub use item::{Item, ItemId, ROOT_PARENT};
pub use path::ItemPath;
pub use tree::{ItemPosition, ItemTree, PreOrderIter};
