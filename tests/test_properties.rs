//! Structural properties checked over generated forests.

use itemtree::model::{Item, ItemId, ItemTree, ROOT_PARENT};
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::HashMap;

/// Ids of orphans' parents start here, never used as item ids.
const MISSING_PARENT_BASE: ItemId = 1_000;

/// Generates up to 40 items with unique ids `1..=n`, shuffled.
/// Each item is a root, a child of an item with smaller id, or an orphan.
fn arb_items() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((0u8..10, any::<Index>()), 0..40)
        .prop_map(|shapes| {
            shapes
                .into_iter()
                .enumerate()
                .map(|(i, (kind, index))| {
                    let id = i as ItemId + 1;
                    let parent = match kind {
                        _ if i == 0 => ROOT_PARENT,
                        0 | 1 => ROOT_PARENT,
                        9 => MISSING_PARENT_BASE + id,
                        _ => index.index(i) as ItemId + 1,
                    };
                    Item::new(id, format!("item {id}"), parent)
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

/// Dotted paths computed by rescanning the whole collection from each root.
fn rescan_paths(items: &[Item]) -> HashMap<ItemId, String> {
    fn expand(items: &[Item], parent: &Item, paths: &mut HashMap<ItemId, String>) {
        for child in items.iter().filter(|c| c.parent() == parent.id()) {
            let path = format!("{}.{}", paths[&parent.id()], child.id());
            paths.insert(child.id(), path);
            expand(items, child, paths);
        }
    }

    let mut paths = HashMap::new();
    for root in items.iter().filter(|item| item.parent() == ROOT_PARENT) {
        paths.insert(root.id(), root.id().to_string());
        expand(items, root, &mut paths);
    }
    paths
}

fn ids(items: &[&Item]) -> Vec<ItemId> {
    items.iter().map(|item| item.id()).collect()
}

proptest! {
    #[test]
    fn test_paths_match_full_rescan(items in arb_items()) {
        let tree = ItemTree::new(&items);
        let expected = rescan_paths(&items);

        prop_assert_eq!(tree.num_indexed(), expected.len());
        for item in &items {
            let path = tree.path_of(item).map(|p| p.to_string());
            prop_assert_eq!(path.as_ref(), expected.get(&item.id()));
        }
        prop_assert!(tree.is_valid());
    }

    #[test]
    fn test_construction_is_deterministic(items in arb_items()) {
        let first = ItemTree::new(&items);
        let second = ItemTree::new(&items);

        prop_assert_eq!(first.max_level(), second.max_level());
        for item in &items {
            prop_assert_eq!(first.path_of(item), second.path_of(item));
            prop_assert_eq!(ids(&first.descendants(item)), ids(&second.descendants(item)));
            prop_assert_eq!(ids(&first.siblings(item)), ids(&second.siblings(item)));
        }
    }

    #[test]
    fn test_level_matches_path_and_ancestors(items in arb_items()) {
        let tree = ItemTree::new(&items);
        let mut deepest = 1;

        for item in &items {
            let Some(level) = tree.level(item) else { continue };
            let path = tree.path_of(item).unwrap();
            prop_assert_eq!(level, path.segments().len());
            prop_assert_eq!(level, path.to_string().split('.').count());
            prop_assert_eq!(level, tree.ancestors(item, true).unwrap().len());
            deepest = deepest.max(level);
        }
        prop_assert_eq!(tree.max_level(), deepest);
    }

    #[test]
    fn test_children_within_descendants(items in arb_items()) {
        let tree = ItemTree::new(&items);

        for item in &items {
            let children = ids(&tree.children(item));
            let descendants = ids(&tree.descendants(item));

            prop_assert_eq!(children.len(), tree.children_count(item));
            prop_assert_eq!(descendants.len(), tree.descendants_count(item));
            prop_assert_eq!(!descendants.is_empty(), tree.has_descendants(item));

            for child in &children {
                prop_assert!(descendants.contains(child));
            }

            // Every descendant is a child or below some child
            for descendant in &descendants {
                let via_child = tree.children(item).iter().any(|child| {
                    ids(&tree.descendants(child)).contains(descendant)
                });
                prop_assert!(children.contains(descendant) || via_child);
            }
        }
    }

    #[test]
    fn test_siblings_are_symmetric(items in arb_items()) {
        let tree = ItemTree::new(&items);

        for item in &items {
            for sibling in tree.siblings(item) {
                prop_assert_ne!(sibling.id(), item.id());
                prop_assert_eq!(sibling.parent(), item.parent());
                prop_assert!(ids(&tree.siblings(sibling)).contains(&item.id()));
            }
        }
    }

    #[test]
    fn test_ancestors_round_trip(items in arb_items()) {
        let tree = ItemTree::new(&items);

        for item in &items {
            if !tree.contains(item) {
                continue;
            }
            let with_target = ids(&tree.ancestors(item, true).unwrap());
            let without_target = ids(&tree.ancestors(item, false).unwrap());

            prop_assert_eq!(with_target.last(), Some(&item.id()));
            prop_assert_eq!(&with_target[..with_target.len() - 1], without_target.as_slice());
        }
    }

    #[test]
    fn test_unreachable_items_never_surface(items in arb_items()) {
        let tree = ItemTree::new(&items);
        let unreachable = ids(&tree.unreachable_items());

        for id in &unreachable {
            prop_assert!(tree.find_item(*id).is_none());
        }
        prop_assert_eq!(tree.num_indexed() + unreachable.len(), items.len());

        for item in &items {
            let mut surfaced = ids(&tree.children(item));
            surfaced.extend(ids(&tree.descendants(item)));
            surfaced.extend(ids(&tree.siblings(item)));
            surfaced.extend(ids(&tree.ancestors(item, true).unwrap()));
            for id in &unreachable {
                prop_assert!(!surfaced.contains(id));
            }
        }
    }

    #[test]
    fn test_results_follow_input_order(items in arb_items()) {
        let tree = ItemTree::new(&items);
        let position: HashMap<ItemId, usize> =
            items.iter().enumerate().map(|(p, item)| (item.id(), p)).collect();

        for item in &items {
            let descendants: Vec<usize> =
                tree.descendants(item).iter().map(|d| position[&d.id()]).collect();
            prop_assert!(descendants.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
