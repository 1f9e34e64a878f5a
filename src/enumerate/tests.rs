use std::collections::HashSet;

use indexmap::IndexSet;

use crate::enumerate::{lexicographic, reverse_lexicographic, BlockCount, EnumerateError};
use crate::partition::immutable::ImmutablePartition;
use crate::partition::union_find::UnionFindPartition;
use crate::partition::Partition;
use rgs::BoundsError;

fn immutable_factory(
    els: &IndexSet<u32>,
    label: &dyn Fn(&u32) -> usize,
) -> ImmutablePartition<u32> {
    ImmutablePartition::from_label_fn(els, label)
}

fn union_find_factory(
    els: &IndexSet<u32>,
    label: &dyn Fn(&u32) -> usize,
) -> UnionFindPartition<u32> {
    UnionFindPartition::from_label_fn(els, label)
}

/// Counts the partitions produced and checks they are pairwise distinct
/// and all of the full element set.
fn count_distinct(elements: std::ops::RangeInclusive<u32>, counts: BlockCount) -> usize {
    let n = elements.clone().count();
    let iter = lexicographic(elements, counts, immutable_factory).unwrap();
    let mut seen = HashSet::new();
    for p in iter {
        assert_eq!(p.len(), n);
        assert!(seen.insert(p));
    }
    seen.len()
}

#[test]
fn all_partitions_of_eight() {
    assert_eq!(count_distinct(1..=8, BlockCount::Any), 4140);
}

#[test]
fn small_bell_counts() {
    for (n, expected) in [(1, 1), (2, 2), (3, 5), (4, 15), (5, 52), (6, 203)] {
        assert_eq!(count_distinct(1..=n, BlockCount::Any), expected, "n = {n}");
    }
}

#[test]
fn discrete_counts_of_ten() {
    assert_eq!(
        count_distinct(1..=10, BlockCount::In(vec![2, 6, 9])),
        23383
    );
    // duplicates and ordering in the allowed set are irrelevant
    assert_eq!(
        count_distinct(1..=10, BlockCount::In(vec![9, 6, 2, 6, 6])),
        23383
    );
}

#[test]
fn between_counts_of_ten() {
    assert_eq!(count_distinct(1..=10, BlockCount::Between(4, 6)), 99457);
    assert_eq!(count_distinct(1..=10, BlockCount::Between(5, 5)), 42525);
    assert_eq!(count_distinct(1..=10, BlockCount::Between(1, 5)), 86472);
}

#[test]
fn exact_and_at_most_counts_of_ten() {
    assert_eq!(count_distinct(1..=10, BlockCount::Exactly(6)), 22827);
    assert_eq!(count_distinct(1..=10, BlockCount::AtMost(6)), 109299);
}

#[test]
fn block_counts_respect_the_constraint() {
    for p in lexicographic(1..=7u32, BlockCount::Between(3, 5), immutable_factory).unwrap() {
        assert!((3..=5).contains(&p.subset_count()));
    }
    for p in lexicographic(1..=7u32, BlockCount::Exactly(4), immutable_factory).unwrap() {
        assert_eq!(p.subset_count(), 4);
    }
    for p in lexicographic(1..=7u32, BlockCount::In(vec![2, 6]), immutable_factory).unwrap() {
        assert!([2, 6].contains(&p.subset_count()));
    }
}

#[test]
fn reverse_is_the_exact_reversal() {
    for counts in [
        BlockCount::Any,
        BlockCount::Exactly(4),
        BlockCount::AtMost(3),
        BlockCount::Between(2, 5),
        BlockCount::In(vec![2, 6, 7]),
    ] {
        let forward: Vec<_> =
            lexicographic(1..=7u32, counts.clone(), immutable_factory)
                .unwrap()
                .collect();
        let mut reverse: Vec<_> =
            reverse_lexicographic(1..=7u32, counts.clone(), immutable_factory)
                .unwrap()
                .collect();
        reverse.reverse();
        assert_eq!(forward.len(), reverse.len(), "{counts:?}");
        for (a, b) in forward.iter().zip(&reverse) {
            assert_eq!(a, b, "{counts:?}");
        }
    }
}

#[test]
fn reverse_discrete_count_of_ten() {
    let reverse = reverse_lexicographic(
        1..=10u32,
        BlockCount::In(vec![2, 6, 9]),
        immutable_factory,
    )
    .unwrap();
    assert_eq!(reverse.count(), 23383);
}

#[test]
fn first_partitions_follow_the_encoding() {
    // The all-zero string comes first: one block holding everything.
    let mut iter = lexicographic(1..=5u32, BlockCount::Any, immutable_factory).unwrap();
    let first = iter.next().unwrap();
    assert_eq!(first.subset_count(), 1);
    // In reverse order the singletons come first.
    let mut iter =
        reverse_lexicographic(1..=5u32, BlockCount::Any, immutable_factory).unwrap();
    let first = iter.next().unwrap();
    assert_eq!(first.subset_count(), 5);
}

#[test]
fn union_find_and_immutable_factories_agree() {
    let mutable: Vec<_> = lexicographic(1..=6u32, BlockCount::Any, union_find_factory)
        .unwrap()
        .collect();
    let frozen: Vec<_> = lexicographic(1..=6u32, BlockCount::Any, immutable_factory)
        .unwrap()
        .collect();
    assert_eq!(mutable.len(), frozen.len());
    for (m, f) in mutable.iter().zip(&frozen) {
        assert_eq!(*m, *f);
    }
}

#[test]
fn yielded_partitions_are_independent() {
    let mut iter = lexicographic(1..=4u32, BlockCount::Any, union_find_factory).unwrap();
    let first = iter.next().unwrap();
    let mut second = iter.next().unwrap();
    let second_copy = second.clone();
    second.union(&1, &2).unwrap();
    second.remove(&3).unwrap();
    // mutating one yield affects neither earlier yields nor the iterator
    assert_eq!(first.subset_count(), 1);
    assert_eq!(first.len(), 4);
    let third = iter.next().unwrap();
    assert_ne!(third, second_copy);
    assert_eq!(iter.count(), 15 - 3);
}

#[test]
fn exhaustion_is_permanent() {
    let mut iter = lexicographic(1..=3u32, BlockCount::Any, immutable_factory).unwrap();
    for _ in 0..5 {
        assert!(iter.next().is_some());
    }
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn rejected_arguments() {
    let empty: Vec<u32> = Vec::new();
    assert_eq!(
        lexicographic(empty, BlockCount::Any, immutable_factory).unwrap_err(),
        EnumerateError::EmptyElements
    );
    assert_eq!(
        lexicographic(1..=4u32, BlockCount::Exactly(0), immutable_factory).unwrap_err(),
        EnumerateError::Bounds(BoundsError::ZeroBound)
    );
    assert_eq!(
        lexicographic(1..=4u32, BlockCount::Exactly(5), immutable_factory).unwrap_err(),
        EnumerateError::Bounds(BoundsError::BoundTooLarge { bound: 5, len: 4 })
    );
    assert_eq!(
        lexicographic(1..=4u32, BlockCount::Between(3, 2), immutable_factory).unwrap_err(),
        EnumerateError::Bounds(BoundsError::InvertedBounds { lo: 3, hi: 2 })
    );
    assert_eq!(
        lexicographic(1..=4u32, BlockCount::In(vec![]), immutable_factory).unwrap_err(),
        EnumerateError::Bounds(BoundsError::EmptyCountSet)
    );
    assert_eq!(
        reverse_lexicographic(1..=4u32, BlockCount::In(vec![0]), immutable_factory)
            .unwrap_err(),
        EnumerateError::Bounds(BoundsError::ZeroBound)
    );
    assert_eq!(
        reverse_lexicographic(1..=4u32, BlockCount::AtMost(9), immutable_factory)
            .unwrap_err(),
        EnumerateError::Bounds(BoundsError::BoundTooLarge { bound: 9, len: 4 })
    );
}

#[test]
fn single_element_set() {
    let parts: Vec<_> = lexicographic(5..=5u32, BlockCount::Any, immutable_factory)
        .unwrap()
        .collect();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].subset_count(), 1);
    assert!(parts[0].contains(&5));
}
