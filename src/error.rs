//! Error types for tree construction, queries and path parsing.

use crate::model::ItemId;
use thiserror::Error;

// =#========================================================================#=
// TREE ERROR
// =#========================================================================#=
/// Errors reported by [ItemTree](crate::model::ItemTree) and its builder.
///
/// A lenient tree (the default) never reports the first two variants;
/// unreachable items and duplicate ids are excluded and only listed via
/// [`unreachable_items`](crate::model::ItemTree::unreachable_items) and
/// [`duplicate_ids`](crate::model::ItemTree::duplicate_ids).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Strict build: items whose parent is neither the root sentinel nor
    /// reachable from a root.
    #[error("{} item(s) not reachable from any root: {ids:?}", .ids.len())]
    UnreachableItems {
        /// Ids of the excluded items, in input order
        ids: Vec<ItemId>,
    },

    /// Strict build: an id occurs more than once in the input.
    #[error("item id {0} occurs more than once")]
    DuplicateId(ItemId),

    /// A segment of an item's path does not resolve to an indexed item.
    #[error("ancestor {segment} in path of item {item} is not indexed")]
    UnresolvedAncestor {
        /// Item whose ancestors were requested
        item: ItemId,
        /// Path segment that failed to resolve
        segment: ItemId,
    },
}

// =#========================================================================#=
// PATH PARSE ERROR
// =#========================================================================#=
/// Errors when parsing the dotted text form of an [ItemPath](crate::model::ItemPath).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    #[error("empty path")]
    Empty,

    #[error("empty segment at position {position}")]
    EmptySegment { position: usize },

    #[error("invalid segment '{segment}'")]
    InvalidSegment { segment: String },
}
