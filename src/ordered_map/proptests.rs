use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn subtree_size<K, V>(map: &OrderedMap<K, V>, id: Option<NodeId>) -> usize {
    match id {
        None => 0,
        Some(id) => {
            let node = &map.nodes[id];
            1 + subtree_size(map, node.left) + subtree_size(map, node.right_child())
        }
    }
}

/// Walk the whole tree and check counts, balance, order and threads.
fn validate_map<K: Ord + std::fmt::Debug, V>(map: &OrderedMap<K, V>) {
    let order = match map.root {
        Some(root) => map.collect_in_order(root),
        None => Vec::new(),
    };
    assert_eq!(order.len(), map.len(), "every arena slot must be reachable");

    for pair in order.windows(2) {
        assert!(
            map.nodes[pair[0]].key < map.nodes[pair[1]].key,
            "keys out of order: {:?} then {:?}",
            map.nodes[pair[0]].key,
            map.nodes[pair[1]].key
        );
    }

    for (i, &id) in order.iter().enumerate() {
        let node = &map.nodes[id];
        assert_eq!(node.left_count, subtree_size(map, node.left));
        assert_eq!(node.right_count, subtree_size(map, node.right_child()));
        assert!(
            node.is_balanced(),
            "node {:?} has {} left and {} right",
            node.key,
            node.left_count,
            node.right_count
        );
        if node.is_linked {
            assert_eq!(node.right, order.get(i + 1).copied(), "bad thread at {:?}", node.key);
        } else {
            assert!(node.right.is_some(), "unlinked node must have a right child");
        }
    }

    let walked: Vec<&K> = map.keys().collect();
    let expected: Vec<&K> = order.iter().map(|&id| &map.nodes[id].key).collect();
    assert_eq!(walked, expected);
}

proptest! {
    #[test]
    fn put_matches_btreemap(ops in prop::collection::vec((0..200u16, any::<u32>()), 0..400)) {
        let mut map = OrderedMap::new();
        let mut model = BTreeMap::new();
        for (k, v) in ops {
            map.put(k, v).unwrap();
            model.insert(k, v);
        }
        prop_assert_eq!(map.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(map.get(k), *v);
        }
        let ours: Vec<(u16, u32)> = map.to_vec();
        let theirs: Vec<(u16, u32)> = model.into_iter().collect();
        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn invariants_hold_after_every_put(keys in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut map = OrderedMap::new();
        for k in keys {
            map.put(k, ()).unwrap();
            validate_map(&map);
        }
    }

    #[test]
    fn sorted_runs_stay_balanced(n in 1..500usize, descending in any::<bool>()) {
        let mut map = OrderedMap::new();
        for i in 0..n {
            let k = if descending { n - i } else { i };
            map.put(k, i).unwrap();
        }
        validate_map(&map);
        prop_assert_eq!(map.keys().len(), n);
    }

    #[test]
    fn clone_preserves_structure(keys in prop::collection::vec(0..1000u32, 1..200)) {
        let mut map = OrderedMap::new();
        for k in &keys {
            *map.get_or_insert_default(*k).unwrap() += 1u32;
        }
        let copy = map.clone();
        validate_map(&copy);
        prop_assert_eq!(copy.balance_report(), map.balance_report());
        prop_assert_eq!(copy.to_vec(), map.to_vec());
        let total: u32 = copy.values().sum();
        prop_assert_eq!(total as usize, keys.len());
    }
}
