//! Materialized-path index over a flat collection of [Item]s.
//!
//! Provides [`ItemTree`], which borrows a slice of items, derives the
//! hierarchy from their parent references once, and answers structural
//! queries (children, descendants, ancestors, siblings, levels) from that
//! index without re-walking the collection.
//!
//! Items are referenced internally by their [ItemPosition] in the borrowed
//! slice (arena pattern), so no item is copied and results are plain
//! `&Item` references into the caller's collection.

use crate::error::TreeError;
use crate::model::item::{Item, ItemId, ROOT_PARENT};
use crate::model::path::ItemPath;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace, warn};

/// Position of an item in the borrowed slice.
pub type ItemPosition = usize;

/// Level reported when the tree holds no items.
const BASELINE_MAX_LEVEL: usize = 1;

// =$========================================================================$=
// ITEM TREE
// =$========================================================================$=
/// Index of a forest described by parent-referencing [Item]s.
///
/// # Structure
/// - `items` is the caller's slice, untouched and in original order.
/// - Every item reachable from a root gets exactly one entry in the id
///   index, together with its level and the position of its parent.
/// - Per indexed item, the positions of its direct children are kept in
///   input order, together with the size of its subtree.
/// - [ItemPath]s are not stored; [`path_of`](Self::path_of) assembles one
///   from the parent chain on demand, so the index stays linear in size.
///
/// # Unreachable items
/// An item whose parent is neither the root sentinel nor an indexed item
/// (missing parent, cycle without root) gets no path. It is still returned
/// by [`items`](Self::items), but every structural query treats it as
/// nonexistent. Such items are listed by
/// [`unreachable_items`](Self::unreachable_items).
///
/// # Duplicate ids
/// Ids are expected to be unique. If they are not, the first occurrence
/// reached by the traversal is indexed and later ones are skipped (listed by
/// [`duplicate_ids`](Self::duplicate_ids)).
///
/// # Ordering
/// Query results come in the order of the input slice, not in traversal
/// order. Only [`pre_order_iter`](Self::pre_order_iter) follows the traversal.
///
/// # Example
/// ```
/// use itemtree::model::{Item, ItemTree};
///
/// let items = vec![
///     Item::new(1, "A", 0),
///     Item::new(2, "A-1", 1),
///     Item::new(3, "A-2", 1),
///     Item::new(4, "A-2-1", 3),
/// ];
/// let tree = ItemTree::new(&items);
///
/// let a = tree.find_item(1).unwrap();
/// assert_eq!(tree.children_count(a), 2);
/// assert_eq!(tree.descendants_count(a), 3);
/// assert_eq!(tree.max_level(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ItemTree<'a> {
    /// Caller's collection
    items: &'a [Item],

    /// Parent value marking roots
    root_parent: ItemId,

    /// Positions of items declaring the root sentinel as parent
    root_positions: Vec<ItemPosition>,

    /// Parent position per position; `None` for roots and items never indexed
    parents: Vec<Option<ItemPosition>>,

    /// Level per position, starting at 1 for roots; 0 for items never indexed
    levels: Vec<usize>,

    /// Id to position, only for indexed items
    index: HashMap<ItemId, ItemPosition>,

    /// Positions of direct children per position, in input order
    children: Vec<Vec<ItemPosition>>,

    /// Number of descendants per position
    subtree_sizes: Vec<usize>,

    /// Positions never reached from a root, in input order
    unreachable: Vec<ItemPosition>,

    /// Ids occurring more than once in the input
    duplicate_ids: Vec<ItemId>,

    /// Maximum level over all indexed items
    max_level: usize,
}

// ============================================================================
// Construction
// ============================================================================
impl<'a> ItemTree<'a> {
    /// Indexes the given items, treating parent [ROOT_PARENT] as root.
    ///
    /// Unreachable items and duplicate ids are excluded silently (logged at
    /// `warn`). Use [ItemTreeBuilder](crate::model::ItemTreeBuilder) for a
    /// strict build or a different root sentinel.
    ///
    /// # Arguments
    /// * `items` - The flat collection; borrowed for the lifetime of the tree
    pub fn new(items: &'a [Item]) -> Self {
        Self::index_with_root(items, ROOT_PARENT)
    }

    /// Builds the index in two passes:
    /// 1. Group item positions by parent id (input order kept).
    /// 2. Depth-first traversal from each root in input order with an
    ///    explicit stack, assigning levels and parent positions in pre-order.
    pub(crate) fn index_with_root(items: &'a [Item], root_parent: ItemId) -> Self {
        let num_items = items.len();

        // Pass 1: adjacency by parent id
        let mut root_positions = Vec::new();
        let mut positions_by_parent: HashMap<ItemId, Vec<ItemPosition>> = HashMap::new();
        let mut seen_ids = HashSet::with_capacity(num_items);
        let mut duplicate_ids = Vec::new();

        for (position, item) in items.iter().enumerate() {
            if !seen_ids.insert(item.id()) && !duplicate_ids.contains(&item.id()) {
                warn!(id = item.id(), "duplicate item id, only first reached occurrence is indexed");
                duplicate_ids.push(item.id());
            }

            if item.parent() == root_parent {
                root_positions.push(position);
            } else {
                positions_by_parent
                    .entry(item.parent())
                    .or_default()
                    .push(position);
            }
        }

        // Pass 2: pre-order traversal, stack holds (position, parent position)
        let mut levels: Vec<usize> = vec![0; num_items];
        let mut parents: Vec<Option<ItemPosition>> = vec![None; num_items];
        let mut children: Vec<Vec<ItemPosition>> = vec![Vec::new(); num_items];
        let mut reached = vec![false; num_items];
        let mut index = HashMap::with_capacity(num_items);
        let mut pre_order = Vec::with_capacity(num_items);
        let mut max_level = BASELINE_MAX_LEVEL;

        let mut stack: Vec<(ItemPosition, Option<ItemPosition>)> =
            root_positions.iter().rev().map(|&p| (p, None)).collect();

        while let Some((position, parent_position)) = stack.pop() {
            reached[position] = true;
            let item = &items[position];

            // Same id already indexed: skip, including its would-be subtree
            if index.contains_key(&item.id()) {
                continue;
            }

            let level = parent_position.map_or(1, |parent| levels[parent] + 1);
            trace!(id = item.id(), level, "indexed item");

            max_level = max_level.max(level);
            index.insert(item.id(), position);
            levels[position] = level;
            parents[position] = parent_position;
            if let Some(parent) = parent_position {
                children[parent].push(position);
            }
            pre_order.push(position);

            // Push children reversed, so they get popped in input order
            if let Some(child_positions) = positions_by_parent.get(&item.id()) {
                for &child in child_positions.iter().rev() {
                    stack.push((child, Some(position)));
                }
            }
        }

        // Subtree sizes: reverse pre-order visits children before parents
        let mut subtree_sizes = vec![0; num_items];
        for &position in pre_order.iter().rev() {
            if let Some(parent) = parents[position] {
                subtree_sizes[parent] += subtree_sizes[position] + 1;
            }
        }

        let unreachable: Vec<ItemPosition> = (0..num_items).filter(|&p| !reached[p]).collect();
        for &position in &unreachable {
            let item = &items[position];
            warn!(
                id = item.id(),
                parent = item.parent(),
                "item not reachable from any root, excluded from index"
            );
        }

        debug!(
            items = num_items,
            indexed = index.len(),
            roots = root_positions.len(),
            unreachable = unreachable.len(),
            max_level,
            "built item tree"
        );

        ItemTree {
            items,
            root_parent,
            root_positions,
            parents,
            levels,
            index,
            children,
            subtree_sizes,
            unreachable,
            duplicate_ids,
            max_level,
        }
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl<'a> ItemTree<'a> {
    /// Returns the full original collection, unfiltered and in original order.
    pub fn items(&self) -> &'a [Item] {
        self.items
    }

    /// Returns the number of items in the original collection.
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of items that are part of the index.
    pub fn num_indexed(&self) -> usize {
        self.index.len()
    }

    /// Returns the parent value that marks root items in this tree.
    pub fn root_parent(&self) -> ItemId {
        self.root_parent
    }

    /// Returns all items declaring the root sentinel as parent, in input order.
    pub fn root_items(&self) -> Vec<&'a Item> {
        self.collect_positions(&self.root_positions)
    }

    /// Looks up an indexed item by id.
    ///
    /// # Returns
    /// `None` if no item with this id was indexed, including unreachable items.
    pub fn find_item(&self, id: ItemId) -> Option<&'a Item> {
        self.index.get(&id).map(|&position| &self.items[position])
    }

    /// Returns whether the item (by id) is part of the index.
    pub fn contains(&self, item: &Item) -> bool {
        self.index.contains_key(&item.id())
    }

    /// Returns the materialized path of an item, `None` if not indexed.
    ///
    /// The path is assembled from the parent chain, in O(level).
    pub fn path_of(&self, item: &Item) -> Option<ItemPath> {
        self.position_of(item).map(|position| self.path_at(position))
    }

    /// Returns the items excluded because no root leads to them, in input order.
    pub fn unreachable_items(&self) -> Vec<&'a Item> {
        self.collect_positions(&self.unreachable)
    }

    /// Returns ids occurring more than once in the input, in order of their
    /// first repetition.
    pub fn duplicate_ids(&self) -> &[ItemId] {
        &self.duplicate_ids
    }

    /// Position of an indexed item, looked up by id.
    fn position_of(&self, item: &Item) -> Option<ItemPosition> {
        self.index.get(&item.id()).copied()
    }

    /// Whether the item at this position received a level (skipped
    /// duplicates and unreachable items did not).
    fn is_indexed_position(&self, position: ItemPosition) -> bool {
        self.levels[position] > 0
    }

    /// Path of an indexed position, collected leaf to root and reversed.
    fn path_at(&self, position: ItemPosition) -> ItemPath {
        let mut segments = Vec::with_capacity(self.levels[position]);
        let mut current = Some(position);
        while let Some(p) = current {
            segments.push(self.items[p].id());
            current = self.parents[p];
        }
        segments.reverse();
        ItemPath::from_segments(segments)
    }

    fn collect_positions(&self, positions: &[ItemPosition]) -> Vec<&'a Item> {
        positions.iter().map(|&p| &self.items[p]).collect()
    }
}

// ============================================================================
// Structural queries (pub)
// ============================================================================
impl<'a> ItemTree<'a> {
    /// Returns the direct children of an item, in input order.
    ///
    /// Empty if the item has no children or is not indexed.
    pub fn children(&self, item: &Item) -> Vec<&'a Item> {
        match self.position_of(item) {
            Some(position) => self.collect_positions(&self.children[position]),
            None => Vec::new(),
        }
    }

    /// Returns the number of direct children of an item (0 if not indexed).
    pub fn children_count(&self, item: &Item) -> usize {
        self.position_of(item)
            .map_or(0, |position| self.children[position].len())
    }

    /// Returns all items below an item (any depth), in input order.
    ///
    /// Empty if the item has no descendants or is not indexed.
    pub fn descendants(&self, item: &Item) -> Vec<&'a Item> {
        let Some(position) = self.position_of(item) else {
            return Vec::new();
        };

        let mut found = Vec::with_capacity(self.subtree_sizes[position]);
        let mut stack: Vec<ItemPosition> = self.children[position].clone();
        while let Some(current) = stack.pop() {
            found.push(current);
            stack.extend_from_slice(&self.children[current]);
        }
        found.sort_unstable();

        self.collect_positions(&found)
    }

    /// Returns the number of items below an item (0 if not indexed).
    pub fn descendants_count(&self, item: &Item) -> usize {
        self.position_of(item)
            .map_or(0, |position| self.subtree_sizes[position])
    }

    /// Returns whether any item lies below the given item.
    pub fn has_descendants(&self, item: &Item) -> bool {
        self.position_of(item)
            .is_some_and(|position| !self.children[position].is_empty())
    }

    /// Returns the ancestors of an item, root first.
    ///
    /// # Arguments
    /// * `item` - Target item
    /// * `include_target` - Whether to append the target itself as last element
    ///
    /// # Returns
    /// Empty vector if the item is not indexed.
    ///
    /// # Errors
    /// [TreeError::UnresolvedAncestor] if the parent chain passes through an
    /// item that is not indexed. Construction never links such a chain, so
    /// this signals a broken index rather than bad input.
    pub fn ancestors(&self, item: &Item, include_target: bool) -> Result<Vec<&'a Item>, TreeError> {
        let Some(position) = self.position_of(item) else {
            return Ok(Vec::new());
        };

        let mut chain = Vec::with_capacity(self.levels[position]);
        let mut current = if include_target {
            Some(position)
        } else {
            self.parents[position]
        };
        while let Some(p) = current {
            if !self.is_indexed_position(p) {
                return Err(TreeError::UnresolvedAncestor {
                    item: item.id(),
                    segment: self.items[p].id(),
                });
            }
            chain.push(&self.items[p]);
            current = self.parents[p];
        }
        chain.reverse();

        Ok(chain)
    }

    /// Returns the other items sharing the parent of an item, in input order.
    ///
    /// For a root these are the other roots; otherwise the other children of
    /// its parent. Exclusion of the item itself is by id.
    /// Empty if the item is not indexed.
    pub fn siblings(&self, item: &Item) -> Vec<&'a Item> {
        if !self.contains(item) {
            return Vec::new();
        }

        let candidates = if item.parent() == self.root_parent {
            // Skipped duplicates among roots are not part of the index
            self.root_positions
                .iter()
                .filter(|&&p| self.is_indexed_position(p))
                .map(|&p| &self.items[p])
                .collect()
        } else {
            match self.find_item(item.parent()) {
                Some(parent) => self.children(parent),
                None => Vec::new(),
            }
        };

        candidates
            .into_iter()
            .filter(|sibling| sibling.id() != item.id())
            .collect()
    }

    /// Returns the level of an item, 1 for roots.
    ///
    /// # Returns
    /// `None` if the item is not indexed.
    pub fn level(&self, item: &Item) -> Option<usize> {
        self.position_of(item).map(|position| self.levels[position])
    }

    /// Returns the maximum level over the whole tree, 1 for an empty tree.
    pub fn max_level(&self) -> usize {
        self.max_level
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl<'a> ItemTree<'a> {
    /// Validates the index against the borrowed items.
    ///
    /// Checks:
    /// - Every index entry points to an item with that id and a positive level
    /// - Roots sit at level 1 without parent position
    /// - Non-roots link to the indexed item named by their parent id, one
    ///   level below it, and their path extends the parent's path by exactly
    ///   one segment
    /// - Child lists agree with the parent links
    /// - Maximum level matches the deepest item
    ///
    /// Paths are assembled per item, so this runs in O(n · max level).
    ///
    /// # Returns
    /// `true` if the index is consistent, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let mut deepest = BASELINE_MAX_LEVEL;

        for (&id, &position) in &self.index {
            let item = &self.items[position];
            if item.id() != id || !self.is_indexed_position(position) {
                return false;
            }
            let level = self.levels[position];
            deepest = deepest.max(level);

            let path = self.path_at(position);
            if path.target() != id || path.level() != level {
                return false;
            }

            // Parent consistency
            match self.parents[position] {
                None => {
                    if item.parent() != self.root_parent || level != 1 {
                        return false;
                    }
                }
                Some(parent) => {
                    if self.index.get(&item.parent()) != Some(&parent)
                        || self.levels[parent] + 1 != level
                        || !path.is_child_of(&self.path_at(parent))
                    {
                        return false;
                    }
                }
            }

            // Children point back
            for &child in &self.children[position] {
                if self.items[child].parent() != id || self.parents[child] != Some(position) {
                    return false;
                }
            }
        }

        deepest == self.max_level
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
impl<'a> ItemTree<'a> {
    /// Renders the indexed items as an indented outline.
    ///
    /// # Example Output
    /// ```text
    /// A (#1)
    /// ├─ A-1 (#2)
    /// └─ A-2 (#3)
    ///    └─ A-2-1 (#9)
    /// B (#5)
    /// ```
    ///
    /// Uses an explicit stack, so arbitrarily deep chains render without
    /// recursion.
    pub fn render(&self) -> String {
        let mut out = String::new();

        // (position, prefix, is_last); `is_last` is `None` for roots
        let mut stack: Vec<(ItemPosition, String, Option<bool>)> = self
            .root_positions
            .iter()
            .rev()
            .filter(|&&p| self.is_indexed_position(p))
            .map(|&p| (p, String::new(), None))
            .collect();

        while let Some((position, prefix, is_last)) = stack.pop() {
            let connector = match is_last {
                None => "",
                Some(true) => "└─ ",
                Some(false) => "├─ ",
            };
            out.push_str(&prefix);
            out.push_str(connector);
            out.push_str(&self.items[position].to_string());
            out.push('\n');

            let child_prefix = match is_last {
                None => prefix,
                Some(true) => prefix + "   ",
                Some(false) => prefix + "│  ",
            };

            // Push children reversed, so the first child is rendered first
            let children = &self.children[position];
            for (i, &child) in children.iter().enumerate().rev() {
                stack.push((child, child_prefix.clone(), Some(i + 1 == children.len())));
            }
        }

        out
    }

    /// Prints a summary line and the outline from [`render`](Self::render).
    pub fn print_tree(&self) {
        println!(
            "Tree with {} items ({} indexed, max level {}):",
            self.num_items(),
            self.num_indexed(),
            self.max_level
        );
        print!("{}", self.render());
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl<'a> ItemTree<'a> {
    /// Returns an iterator over indexed items in pre-order (parents before
    /// children), roots and siblings in input order, yielding each item with
    /// its level.
    ///
    /// # Example
    /// ```
    /// use itemtree::model::{Item, ItemTree};
    ///
    /// let items = vec![Item::new(1, "A", 0), Item::new(2, "B", 0), Item::new(3, "A-1", 1)];
    /// let tree = ItemTree::new(&items);
    ///
    /// let ids: Vec<_> = tree.pre_order_iter().map(|(item, _)| item.id()).collect();
    /// assert_eq!(ids, vec![1, 3, 2]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_, 'a> {
        PreOrderIter::new(self)
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
pub struct PreOrderIter<'t, 'a> {
    tree: &'t ItemTree<'a>,
    stack: Vec<(ItemPosition, usize)>, // (position, level)
}

impl<'t, 'a> PreOrderIter<'t, 'a> {
    fn new(tree: &'t ItemTree<'a>) -> Self {
        let stack = tree
            .root_positions
            .iter()
            .rev()
            .filter(|&&p| tree.is_indexed_position(p))
            .map(|&p| (p, 1))
            .collect();
        PreOrderIter { tree, stack }
    }
}

impl<'t, 'a> Iterator for PreOrderIter<'t, 'a> {
    type Item = (&'a Item, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (position, level) = self.stack.pop()?;

        // Push children reversed, so the first child is visited first
        for &child in self.tree.children[position].iter().rev() {
            self.stack.push((child, level + 1));
        }

        Some((&self.tree.items[position], level))
    }
}
