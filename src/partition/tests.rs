use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PartitionError;
use crate::partition::immutable::ImmutablePartition;
use crate::partition::union_find::UnionFindPartition;
use crate::partition::Partition;

macro_rules! set {
    ($($value: expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut set = HashSet::new();
        $(set.insert($value);)*
        set
    }};
}

fn filled(n: u32) -> UnionFindPartition<u32> {
    let mut p = UnionFindPartition::new();
    for i in 0..n {
        assert!(p.add(i).unwrap());
    }
    p
}

/// Drives every operation against a randomly mutated partition; the
/// structural checks run after each mutator in debug builds.
#[test]
fn random_operations_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(1479651034875);
    let size = 200u32;
    let mut p = filled(size);
    for _ in 0..400 {
        assert_eq!(p.len(), size as usize);
        assert!(p.subset_count() >= 1);
        let x = rng.gen_range(0..size);
        let y = rng.gen_range(0..size);

        assert!(p.contains(&x));
        assert!(p.subset(&x).unwrap().contains(&x));
        assert_eq!(
            p.connected(&x, &y).unwrap(),
            p.subset(&x).unwrap().contains(&y)
        );

        assert!(p.remove(&x).unwrap());
        assert!(p.add(x).unwrap());

        p.union(&rng.gen_range(0..size), &rng.gen_range(0..size))
            .unwrap();
        p.split(&rng.gen_range(0..size)).unwrap();
        p.move_to(&rng.gen_range(0..size), &rng.gen_range(0..size))
            .unwrap();
    }
}

#[test]
fn simple_union_scenario() {
    let mut p = UnionFindPartition::new();
    for i in 1..=5 {
        assert!(p.add(i).unwrap());
    }
    assert!(p.union(&2, &3).unwrap());
    assert!(p.union(&4, &5).unwrap());
    assert!(p.remove(&1).is_ok());
    assert!(p.add(1).unwrap());

    assert_eq!(p.len(), 5);
    assert_eq!(p.subset_count(), 3);
    assert!(p.connected(&2, &3).unwrap());
    assert!(p.connected(&4, &5).unwrap());
    assert!(!p.connected(&2, &4).unwrap());

    let blocks: HashSet<Vec<i32>> = p
        .subsets()
        .map(|s| {
            let mut block: Vec<i32> = s.iter().copied().collect();
            block.sort_unstable();
            block
        })
        .collect();
    let expected: HashSet<Vec<i32>> =
        [vec![1], vec![2, 3], vec![4, 5]].into_iter().collect();
    assert_eq!(blocks, expected);

    let mut q = UnionFindPartition::new();
    q.add_subset(set![1]).unwrap();
    q.add_subset(set![2, 3]).unwrap();
    q.add_subset(set![4, 5]).unwrap();
    assert_eq!(p, q);
    assert_eq!(p.partition_hash(), q.partition_hash());
}

#[test]
fn union_returns_false_within_same_subset() {
    let mut p = filled(4);
    assert!(p.union(&0, &1).unwrap());
    assert!(!p.union(&0, &1).unwrap());
    assert!(!p.union(&1, &0).unwrap());
    assert!(!p.union(&0, &0).unwrap());
    assert_eq!(p.subset_count(), 3);
}

#[test]
fn copy_preserves_structure() {
    let mut rng = StdRng::seed_from_u64(82465);
    for _ in 0..50 {
        let size = 60u32;
        let mut p = filled(size);
        for _ in 0..size / 2 {
            p.union(&rng.gen_range(0..size), &rng.gen_range(0..size))
                .unwrap();
        }
        let copy = UnionFindPartition::from_partition(&p);
        assert_eq!(p, copy);
        assert_eq!(p.len(), copy.len());
        assert_eq!(p.subset_count(), copy.subset_count());
        for i in 0..size {
            assert_eq!(p.subset(&i).unwrap(), copy.subset(&i).unwrap());
            for j in 0..size {
                assert_eq!(
                    p.connected(&i, &j).unwrap(),
                    copy.connected(&i, &j).unwrap()
                );
            }
        }
    }
}

#[test]
fn subsets_are_disjoint_and_cover() {
    let mut rng = StdRng::seed_from_u64(7);
    let size = 80u32;
    let mut p = filled(size);
    for _ in 0..200 {
        p.union(&rng.gen_range(0..size), &rng.gen_range(0..size))
            .unwrap();
        p.split(&rng.gen_range(0..size)).unwrap();
    }
    let mut all: HashSet<u32> = HashSet::new();
    let mut block_count = 0;
    for block in p.subsets() {
        block_count += 1;
        assert!(!block.is_empty());
        assert_eq!(block.len(), block.iter().count());
        for t in block.iter() {
            // disjointness: every element appears in exactly one subset
            assert!(all.insert(*t));
            assert!(p.connected(t, block.iter().next().unwrap()).unwrap());
        }
    }
    assert_eq!(block_count, p.subset_count());
    assert_eq!(all.len(), p.len());
}

#[test]
fn removing_root_keeps_lookup_consistent() {
    let mut p = UnionFindPartition::new();
    p.add_subset(set![10, 20, 30, 40]).unwrap();
    let root = *p.root(&10).unwrap();
    assert!(p.remove(&root).unwrap());

    assert_eq!(p.len(), 3);
    assert_eq!(p.subset_count(), 1);
    assert!(!p.contains(&root));
    let rest: Vec<u32> = [10, 20, 30, 40]
        .into_iter()
        .filter(|v| *v != root)
        .collect();
    for v in &rest {
        let subset = p.subset(v).unwrap();
        assert_eq!(subset.len(), 3);
        assert!(subset.contains(v));
        assert!(!subset.contains(&root));
        for u in &rest {
            assert!(p.connected(v, u).unwrap());
        }
    }
}

#[test]
fn remove_only_element_drops_subset() {
    let mut p = UnionFindPartition::new();
    p.add(7).unwrap();
    assert!(p.remove(&7).unwrap());
    assert!(!p.remove(&7).unwrap());
    assert_eq!(p.len(), 0);
    assert_eq!(p.subset_count(), 0);
    assert!(p.is_empty());
    assert_eq!(p.subsets().count(), 0);
}

#[test]
fn split_isolates_and_reports_singletons() {
    let mut p = UnionFindPartition::new();
    p.add_subset(set![1, 2, 3]).unwrap();
    assert!(p.split(&2).unwrap());
    assert_eq!(p.subset_count(), 2);
    assert_eq!(p.subset(&2).unwrap().len(), 1);
    assert_eq!(p.subset(&1).unwrap().len(), 2);
    assert!(!p.split(&2).unwrap());
    assert_eq!(p.split(&9).unwrap_err(), PartitionError::NotFound);
}

#[test]
fn split_root_keeps_remainder_connected() {
    let mut p = UnionFindPartition::new();
    p.add_subset(set![1, 2, 3, 4]).unwrap();
    let root = *p.root(&1).unwrap();
    assert!(p.split(&root).unwrap());
    assert_eq!(p.subset(&root).unwrap().len(), 1);
    let rest: Vec<u32> = [1, 2, 3, 4].into_iter().filter(|v| *v != root).collect();
    for v in &rest {
        assert_eq!(p.subset(v).unwrap().len(), 3);
        assert!(!p.connected(v, &root).unwrap());
    }
}

#[test]
fn move_to_matches_split_then_union() {
    let mut rng = StdRng::seed_from_u64(55);
    let size = 40u32;
    let mut p = filled(size);
    for _ in 0..size {
        p.union(&rng.gen_range(0..size), &rng.gen_range(0..size))
            .unwrap();
    }
    for _ in 0..100 {
        let x = rng.gen_range(0..size);
        let y = rng.gen_range(0..size);
        let mut moved = p.clone();
        let mut manual = p.clone();
        let changed = moved.move_to(&x, &y).unwrap();
        if manual.connected(&x, &y).unwrap() {
            assert!(!changed);
        } else {
            assert!(changed);
            manual.split(&x).unwrap();
            manual.union(&x, &y).unwrap();
        }
        if changed {
            assert_eq!(moved, manual);
        } else {
            assert_eq!(moved, p);
        }
        p = moved;
    }
}

#[test]
fn merge_matches_add_then_union() {
    let mut p = UnionFindPartition::new();
    p.add_subset(set![1, 2]).unwrap();
    assert!(p.merge(3, &1).unwrap());
    assert_eq!(p.subset(&1).unwrap().len(), 3);
    assert!(p.connected(&3, &2).unwrap());
    // already present: no-op
    assert!(!p.merge(3, &1).unwrap());
    assert_eq!(p.len(), 3);
    assert_eq!(p.merge(9, &42).unwrap_err(), PartitionError::NotFound);
    // merging a new element with itself just adds it
    assert!(p.merge(7, &7).unwrap());
    assert_eq!(p.subset(&7).unwrap().len(), 1);
}

#[test]
fn remove_subset_drops_every_member() {
    let mut p = UnionFindPartition::new();
    p.add_subset(set![1, 2, 3]).unwrap();
    p.add_subset(set![4, 5]).unwrap();
    assert!(p.remove_subset(&2).unwrap());
    assert_eq!(p.len(), 2);
    assert_eq!(p.subset_count(), 1);
    for v in [1, 2, 3] {
        assert!(!p.contains(&v));
    }
    assert!(p.contains(&4));
    assert!(!p.remove_subset(&2).unwrap());
}

#[test]
fn clear_empties_the_partition() {
    let mut p = filled(10);
    p.union(&1, &2).unwrap();
    p.clear().unwrap();
    assert!(p.is_empty());
    assert_eq!(p.subset_count(), 0);
    assert_eq!(p.elements().count(), 0);
    assert!(p.add(1).unwrap());
    assert_eq!(p.len(), 1);
}

#[test]
fn add_subset_rejects_empty_and_present() {
    let mut p = filled(3);
    assert_eq!(
        p.add_subset(HashSet::new()).unwrap_err(),
        PartitionError::EmptySubset
    );
    assert_eq!(
        p.add_subset(set![2, 10]).unwrap_err(),
        PartitionError::AlreadyPresent
    );
    // the failed call must not have inserted anything
    assert!(!p.contains(&10));
    assert_eq!(p.len(), 3);
}

#[test]
fn missing_elements_are_reported() {
    let mut p = filled(3);
    assert_eq!(p.subset(&9).unwrap_err(), PartitionError::NotFound);
    assert_eq!(p.connected(&0, &9).unwrap_err(), PartitionError::NotFound);
    assert_eq!(p.connected(&9, &0).unwrap_err(), PartitionError::NotFound);
    assert_eq!(p.union(&0, &9).unwrap_err(), PartitionError::NotFound);
    assert_eq!(p.move_to(&9, &0).unwrap_err(), PartitionError::NotFound);
    assert_eq!(p.root(&9).unwrap_err(), PartitionError::NotFound);
    assert!(!p.remove(&9).unwrap());
    assert!(!p.remove_subset(&9).unwrap());
}

#[test]
fn root_is_stable_within_a_subset() {
    let mut p = UnionFindPartition::new();
    p.add_subset(set![1, 2, 3, 4, 5]).unwrap();
    let root = *p.root(&1).unwrap();
    for v in [1, 2, 3, 4, 5] {
        assert_eq!(*p.root(&v).unwrap(), root);
    }
    assert!(p.contains(&root));
}

#[test]
fn from_map_groups_by_label() {
    let mut map = HashMap::new();
    map.insert("a", 0);
    map.insert("b", 1);
    map.insert("c", 0);
    map.insert("d", 2);
    let p = UnionFindPartition::from_map(map);
    assert_eq!(p.len(), 4);
    assert_eq!(p.subset_count(), 3);
    assert!(p.connected(&"a", &"c").unwrap());
    assert!(!p.connected(&"a", &"b").unwrap());
}

#[test]
fn immutable_matches_mutable_source() {
    let mut rng = StdRng::seed_from_u64(99);
    let size = 50u32;
    let mut p = filled(size);
    for _ in 0..120 {
        p.union(&rng.gen_range(0..size), &rng.gen_range(0..size))
            .unwrap();
        p.split(&rng.gen_range(0..size)).unwrap();
        let x = rng.gen_range(0..size);
        p.remove(&x).unwrap();
        p.add(x).unwrap();

        let frozen = ImmutablePartition::from_partition(&p);
        assert_eq!(p, frozen);
        assert_eq!(frozen, p);
        assert_eq!(p.partition_hash(), frozen.partition_hash());
        for i in 0..size {
            assert_eq!(p.subset(&i).unwrap(), frozen.subset(&i).unwrap());
        }
    }
}

#[test]
fn immutable_rejects_mutation() {
    let source = {
        let mut p = filled(4);
        p.union(&0, &1).unwrap();
        p
    };
    let mut frozen = ImmutablePartition::from_partition(&source);
    assert_eq!(frozen.add(9).unwrap_err(), PartitionError::Unsupported);
    assert_eq!(
        frozen.add_subset(set![9]).unwrap_err(),
        PartitionError::Unsupported
    );
    assert_eq!(frozen.merge(9, &0).unwrap_err(), PartitionError::Unsupported);
    assert_eq!(frozen.remove(&0).unwrap_err(), PartitionError::Unsupported);
    assert_eq!(
        frozen.remove_subset(&0).unwrap_err(),
        PartitionError::Unsupported
    );
    assert_eq!(frozen.union(&0, &2).unwrap_err(), PartitionError::Unsupported);
    assert_eq!(frozen.split(&0).unwrap_err(), PartitionError::Unsupported);
    assert_eq!(
        frozen.move_to(&0, &2).unwrap_err(),
        PartitionError::Unsupported
    );
    assert_eq!(frozen.clear().unwrap_err(), PartitionError::Unsupported);
    // the failed mutations changed nothing
    assert_eq!(frozen, source);
}

#[test]
fn immutable_reads() {
    let mut p = UnionFindPartition::new();
    p.add_subset(set![1, 2]).unwrap();
    p.add_subset(set![3]).unwrap();
    let frozen = ImmutablePartition::from_partition(&p);
    assert_eq!(frozen.len(), 3);
    assert_eq!(frozen.subset_count(), 2);
    assert!(frozen.contains(&1));
    assert!(!frozen.contains(&4));
    assert!(frozen.connected(&1, &2).unwrap());
    assert!(!frozen.connected(&1, &3).unwrap());
    assert_eq!(
        frozen.connected(&1, &9).unwrap_err(),
        PartitionError::NotFound
    );
    assert_eq!(frozen.subset(&3).unwrap().len(), 1);
    let elements: HashSet<u32> = frozen.elements().copied().collect();
    assert_eq!(elements, set![1, 2, 3]);
}

#[test]
fn immutable_from_map_and_label_fn_agree() {
    let elements: indexmap::IndexSet<u32> = (0..10).collect();
    let by_fn = ImmutablePartition::from_label_fn(&elements, |t| t % 3);
    let mut map = HashMap::new();
    for t in 0..10u32 {
        map.insert(t, t % 3);
    }
    let by_map = ImmutablePartition::from_map(map);
    assert_eq!(by_fn, by_map);
    assert_eq!(by_fn.subset_count(), 3);

    let mutable = UnionFindPartition::from_label_fn(&elements, |t| t % 3);
    assert_eq!(mutable, by_fn);
}

#[test]
fn equality_ignores_label_identity() {
    let elements: indexmap::IndexSet<u32> = (0..6).collect();
    let p = UnionFindPartition::from_label_fn(&elements, |t| t % 2);
    let q = UnionFindPartition::from_label_fn(&elements, |t| (t % 2) + 10);
    assert_eq!(p, q);
    assert_eq!(p.partition_hash(), q.partition_hash());
    let r = UnionFindPartition::from_label_fn(&elements, |t| t % 3);
    assert_ne!(p, r);
}

#[test]
fn vacated_nodes_are_recycled() {
    let size = 100u32;
    let mut p = filled(size);
    for i in 1..size {
        p.union(&0, &i).unwrap();
    }
    let peak = p.occupied_slots();
    assert_eq!(peak, size as usize);
    // Deleting everything must hand every slot back to the free list:
    // interior vacant nodes are reclaimed as their children retarget.
    for i in 0..size {
        assert!(p.remove(&i).unwrap());
        assert!(p.occupied_slots() <= peak);
    }
    assert_eq!(p.occupied_slots(), 0);

    // Slots are reused rather than grown after churn.
    for i in 0..size {
        p.add(i).unwrap();
    }
    assert_eq!(p.occupied_slots(), size as usize);
    for _ in 0..5 {
        for i in 0..size {
            assert!(p.remove(&i).unwrap());
            assert!(p.add(i).unwrap());
        }
    }
    assert_eq!(p.occupied_slots(), size as usize);
}

#[test]
fn display_is_canonical() {
    let mut p = UnionFindPartition::new();
    p.add_subset(set![1, 2]).unwrap();
    p.add_subset(set![3]).unwrap();
    let text = p.to_string();
    let reparsed =
        UnionFindPartition::from_str_with(&text, |s| s.parse::<u32>()).unwrap();
    assert_eq!(p, reparsed);

    let empty: UnionFindPartition<u32> = UnionFindPartition::new();
    assert_eq!(empty.to_string(), "[]");
}
