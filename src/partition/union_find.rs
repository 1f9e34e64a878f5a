//! A mutable partition backed by union-find with constant-time deletions,
//! after the Union-Find-Delete scheme of Alstrup, Gørtz, Rauhe, Thorup and
//! Zwick.
//!
//! The classic structure (union by size, path splitting during find) is
//! extended with two cyclic doubly linked lists: one through the nodes of
//! each subset, so a subset can be iterated in time proportional to its
//! size, and one through the roots of all trees, so the subsets themselves
//! can be enumerated without touching non-root nodes. Union splices the
//! subset lists of its arguments in constant time.
//!
//! Deletion works through vacant nodes. A removed element's node is
//! unlinked from its subset list and its value slot is emptied; the node
//! itself must survive as long as other nodes' parent pointers reference
//! it. Each node therefore counts the parent references to it, and a
//! vacant node whose counter reaches zero is recycled on the spot, either
//! when it is vacated or when path splitting retargets its last child.
//! Removing a root first swaps its value with a neighbour on the subset
//! list, so a root is never vacant.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;

use crate::error::PartitionError;
use crate::parse;
use crate::parse::ParseError;
use crate::partition::{fmt_partition, Elements, Partition, Subset, Subsets};

const NIL: u32 = u32::MAX;

#[derive(Debug, Clone)]
struct Node<T> {
    /// `Some` while an element lives here, `None` once the node is vacant.
    value: Option<T>,
    parent: u32,
    /// Number of elements in the subset; meaningful at roots only.
    size: u32,
    /// Cyclic list through all nodes of the same subset.
    next: u32,
    prev: u32,
    /// Cyclic list through all roots; meaningful at roots only.
    next_root: u32,
    prev_root: u32,
    /// How many other nodes name this one as their parent.
    children: u32,
}

/// A mutable [`Partition`] supporting union, find, deletion, move and
/// split in amortized near-constant time, plus constant-time iteration
/// entry points for subsets and elements.
#[derive(Debug, Clone)]
pub struct UnionFindPartition<T> {
    nodes: Vec<Node<T>>,
    free: Vec<u32>,
    lookup: HashMap<T, u32>,
    any_root: u32,
    count: usize,
}

impl<T: Clone + Eq + Hash> UnionFindPartition<T> {
    /// Creates an empty partition with no elements and no subsets.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            lookup: HashMap::new(),
            any_root: NIL,
            count: 0,
        }
    }

    /// Creates a partition with the same subsets as `source`.
    pub fn from_partition<P>(source: &P) -> Self
    where
        P: Partition<T>,
    {
        let mut out = Self::new();
        for block in source.subsets() {
            out.insert_subset(block.iter().cloned().collect());
        }
        debug_assert!(out.eq_partition(source));
        out
    }

    /// Creates a partition from an explicit element-to-label map: two
    /// elements share a subset iff their labels are equal.
    pub fn from_map<L: Eq + Hash>(map: HashMap<T, L>) -> Self {
        let mut inverse: HashMap<L, HashSet<T>> = HashMap::new();
        for (t, label) in map {
            inverse.entry(label).or_default().insert(t);
        }
        let mut out = Self::new();
        for (_, block) in inverse {
            out.insert_subset(block);
        }
        out
    }

    /// Creates a partition from an implicit map: `label` is applied to
    /// every element and two elements share a subset iff their labels are
    /// equal.
    pub fn from_label_fn<L, F>(elements: &IndexSet<T>, mut label: F) -> Self
    where
        L: Eq + Hash,
        F: FnMut(&T) -> L,
    {
        let mut inverse: HashMap<L, HashSet<T>> = HashMap::new();
        for t in elements {
            inverse.entry(label(t)).or_default().insert(t.clone());
        }
        let mut out = Self::new();
        for (_, block) in inverse {
            out.insert_subset(block);
        }
        out
    }

    /// Parses a partition from its canonical string form, deserializing
    /// each element token with `de`.
    pub fn from_str_with<F, E>(input: &str, de: F) -> Result<Self, ParseError>
    where
        F: FnMut(&str) -> Result<T, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let mut out = Self::new();
        for block in parse::parse_blocks(input, de)? {
            out.insert_subset(block);
        }
        Ok(out)
    }

    /// The representative element of the subset containing `t`. All
    /// elements of a subset report the same representative until the
    /// partition is mutated.
    pub fn root(&self, t: &T) -> Result<&T, PartitionError> {
        let &i = self.lookup.get(t).ok_or(PartitionError::NotFound)?;
        Ok(self.block_value(self.root_no_compress(i)))
    }

    fn alloc(&mut self, value: T) -> u32 {
        let i = match self.free.pop() {
            Some(i) => i,
            None => {
                self.nodes.push(Node {
                    value: None,
                    parent: NIL,
                    size: 1,
                    next: NIL,
                    prev: NIL,
                    next_root: NIL,
                    prev_root: NIL,
                    children: 0,
                });
                (self.nodes.len() - 1) as u32
            }
        };
        self.nodes[i as usize] = Node {
            value: Some(value),
            parent: i,
            size: 1,
            next: i,
            prev: i,
            next_root: NIL,
            prev_root: NIL,
            children: 0,
        };
        i
    }

    /// Root lookup without path splitting, usable through a shared
    /// reference. Read-only operations and views go through this.
    fn root_no_compress(&self, mut i: u32) -> u32 {
        while self.nodes[i as usize].parent != i {
            i = self.nodes[i as usize].parent;
        }
        i
    }

    /// Root lookup with path splitting: every node on the walk is
    /// retargeted to its grandparent. Vacant nodes that lose their last
    /// child in the process are recycled afterwards.
    fn find(&mut self, mut i: u32) -> u32 {
        let mut passed = Vec::new();
        let root = loop {
            let p = self.nodes[i as usize].parent;
            let g = self.nodes[p as usize].parent;
            if p == g {
                break p;
            }
            self.nodes[i as usize].parent = g;
            self.nodes[p as usize].children -= 1;
            self.nodes[g as usize].children += 1;
            passed.push(p);
            i = p;
        };
        // A vacated node freed here can only push its parent to zero
        // children, and that parent is either a later entry of `passed`
        // or the (live) root, so one in-order pass suffices.
        for p in passed {
            let node = &self.nodes[p as usize];
            if node.value.is_none() && node.children == 0 {
                let parent = node.parent;
                debug_assert_ne!(parent, p);
                self.free.push(p);
                self.nodes[parent as usize].children -= 1;
            }
        }
        root
    }

    /// Recycles `i` if it is vacant and unreferenced, cascading up the
    /// parent chain: freeing a node may leave its parent unreferenced too.
    fn release(&mut self, mut i: u32) {
        loop {
            let node = &self.nodes[i as usize];
            if node.value.is_some() || node.children > 0 {
                break;
            }
            let parent = node.parent;
            self.free.push(i);
            if parent == i {
                break;
            }
            self.nodes[parent as usize].children -= 1;
            i = parent;
        }
    }

    fn attach_root(&mut self, i: u32) {
        if self.any_root == NIL {
            self.nodes[i as usize].next_root = i;
            self.nodes[i as usize].prev_root = i;
            self.any_root = i;
        } else {
            let anchor = self.any_root;
            let old_next = self.nodes[anchor as usize].next_root;
            self.nodes[i as usize].next_root = old_next;
            self.nodes[i as usize].prev_root = anchor;
            self.nodes[anchor as usize].next_root = i;
            self.nodes[old_next as usize].prev_root = i;
        }
    }

    fn detach_root(&mut self, i: u32) {
        if self.nodes[i as usize].next_root == i {
            self.any_root = NIL;
        } else {
            let prev = self.nodes[i as usize].prev_root;
            let next = self.nodes[i as usize].next_root;
            self.any_root = prev;
            self.nodes[prev as usize].next_root = next;
            self.nodes[next as usize].prev_root = prev;
        }
    }

    fn unlink_cycle(&mut self, i: u32) {
        let prev = self.nodes[i as usize].prev;
        let next = self.nodes[i as usize].next;
        self.nodes[prev as usize].next = next;
        self.nodes[next as usize].prev = prev;
    }

    /// Moves the root's value onto its subset-list neighbour so the root
    /// slot stays occupied, and returns the neighbour, which now holds
    /// the value being removed or split off.
    fn swap_root_value(&mut self, i: u32) -> u32 {
        let j = self.nodes[i as usize].next;
        debug_assert_ne!(i, j);
        let vi = self.nodes[i as usize].value.take();
        let vj = self.nodes[j as usize].value.take();
        self.nodes[i as usize].value = vj;
        self.nodes[j as usize].value = vi;
        let vi_now = self.block_value(i).clone();
        let vj_now = self.block_value(j).clone();
        self.lookup.insert(vi_now, i);
        self.lookup.insert(vj_now, j);
        j
    }

    /// Links a pre-validated subset into the structure: the first element
    /// becomes the root, the rest its children, all chained into one
    /// subset cycle.
    fn insert_subset(&mut self, subset: HashSet<T>) {
        debug_assert!(!subset.is_empty());
        debug_assert!(subset.iter().all(|t| !self.lookup.contains_key(t)));
        let size = subset.len() as u32;
        let mut iter = subset.into_iter();
        let first = iter.next().expect("subset checked non-empty");
        let root = self.alloc(first.clone());
        self.lookup.insert(first, root);
        self.nodes[root as usize].size = size;
        let mut current = root;
        for t in iter {
            let i = self.alloc(t.clone());
            self.lookup.insert(t, i);
            self.nodes[i as usize].parent = root;
            self.nodes[root as usize].children += 1;
            self.nodes[current as usize].next = i;
            self.nodes[i as usize].prev = current;
            current = i;
        }
        self.attach_root(root);
        self.nodes[current as usize].next = root;
        self.nodes[root as usize].prev = current;
        self.count += 1;
        self.validate();
    }

    pub(super) fn block_value(&self, i: u32) -> &T {
        self.nodes[i as usize]
            .value
            .as_ref()
            .expect("node on a subset cycle is never vacant")
    }

    pub(super) fn block_next(&self, i: u32) -> u32 {
        self.nodes[i as usize].next
    }

    pub(super) fn root_next(&self, i: u32) -> u32 {
        self.nodes[i as usize].next_root
    }

    pub(super) fn block_size(&self, root: u32) -> usize {
        self.nodes[root as usize].size as usize
    }

    pub(super) fn root_of(&self, t: &T) -> Option<u32> {
        self.lookup.get(t).map(|&i| self.root_no_compress(i))
    }

    /// Arena slots currently holding a live or vacant node.
    #[cfg(test)]
    pub(crate) fn occupied_slots(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    #[cfg(debug_assertions)]
    fn validate(&self) {
        use std::collections::HashMap as Map;

        for (t, &i) in &self.lookup {
            assert!(self.nodes[i as usize].value.as_ref() == Some(t));
        }
        let roots: HashSet<u32> = self
            .lookup
            .values()
            .map(|&i| self.root_no_compress(i))
            .collect();
        assert_eq!(roots.len(), self.count);
        assert_eq!((self.lookup.is_empty()), (self.count == 0));

        if self.any_root == NIL {
            assert_eq!(self.count, 0);
        } else {
            assert_eq!(self.nodes[self.any_root as usize].parent, self.any_root);
            let mut cycle = 0;
            let mut current = self.any_root;
            loop {
                cycle += 1;
                assert!(roots.contains(&current));
                let next = self.nodes[current as usize].next_root;
                assert_eq!(self.nodes[next as usize].prev_root, current);
                current = next;
                if current == self.any_root {
                    break;
                }
                assert!(cycle <= self.count);
            }
            assert_eq!(cycle, self.count);
        }

        for &root in &roots {
            assert_eq!(self.nodes[root as usize].parent, root);
            assert!(self.nodes[root as usize].value.is_some());
            let size = self.nodes[root as usize].size as usize;
            let mut cycle = 0;
            let mut current = root;
            loop {
                cycle += 1;
                assert!(self.nodes[current as usize].value.is_some());
                assert_eq!(self.root_no_compress(current), root);
                let next = self.nodes[current as usize].next;
                assert_eq!(self.nodes[next as usize].prev, current);
                current = next;
                if current == root {
                    break;
                }
                assert!(cycle <= size);
            }
            assert_eq!(cycle, size);
        }

        for &i in self.lookup.values() {
            let node = &self.nodes[i as usize];
            if node.next == i {
                assert_eq!(node.prev, i);
                assert_eq!(node.parent, i);
                assert_eq!(node.size, 1);
            }
        }

        let free: HashSet<u32> = self.free.iter().copied().collect();
        assert_eq!(free.len(), self.free.len());
        let mut child_counts: Map<u32, u32> = Map::new();
        for i in 0..self.nodes.len() as u32 {
            if free.contains(&i) {
                continue;
            }
            let parent = self.nodes[i as usize].parent;
            if parent != i {
                assert!(!free.contains(&parent));
                *child_counts.entry(parent).or_default() += 1;
            }
        }
        for i in 0..self.nodes.len() as u32 {
            if free.contains(&i) {
                continue;
            }
            let node = &self.nodes[i as usize];
            assert_eq!(node.children, child_counts.get(&i).copied().unwrap_or(0));
            if node.value.is_none() {
                // an unreferenced vacant node should have been recycled
                assert!(node.children > 0);
            }
        }
    }

    #[cfg(not(debug_assertions))]
    fn validate(&self) {}
}

impl<T: Clone + Eq + Hash> Partition<T> for UnionFindPartition<T> {
    fn len(&self) -> usize {
        self.lookup.len()
    }

    fn subset_count(&self) -> usize {
        self.count
    }

    fn contains(&self, t: &T) -> bool {
        self.lookup.contains_key(t)
    }

    fn elements(&self) -> Elements<'_, T> {
        Elements::lookup(self.lookup.keys())
    }

    fn subsets(&self) -> Subsets<'_, T> {
        Subsets::linked(self, self.any_root, self.count)
    }

    fn subset(&self, t: &T) -> Result<Subset<'_, T>, PartitionError> {
        let &i = self.lookup.get(t).ok_or(PartitionError::NotFound)?;
        let root = self.root_no_compress(i);
        Ok(Subset::linked(self, i, root))
    }

    fn connected(&self, x: &T, y: &T) -> Result<bool, PartitionError> {
        let &i = self.lookup.get(x).ok_or(PartitionError::NotFound)?;
        let &j = self.lookup.get(y).ok_or(PartitionError::NotFound)?;
        Ok(self.root_no_compress(i) == self.root_no_compress(j))
    }

    fn add(&mut self, t: T) -> Result<bool, PartitionError> {
        if self.lookup.contains_key(&t) {
            return Ok(false);
        }
        let i = self.alloc(t.clone());
        self.lookup.insert(t, i);
        self.attach_root(i);
        self.count += 1;
        self.validate();
        Ok(true)
    }

    fn add_subset(&mut self, subset: HashSet<T>) -> Result<(), PartitionError> {
        if subset.is_empty() {
            return Err(PartitionError::EmptySubset);
        }
        if subset.iter().any(|t| self.lookup.contains_key(t)) {
            return Err(PartitionError::AlreadyPresent);
        }
        self.insert_subset(subset);
        Ok(())
    }

    fn merge(&mut self, x: T, y: &T) -> Result<bool, PartitionError> {
        if self.lookup.contains_key(&x) {
            return Ok(false);
        }
        // When x and y coincide, the union below is a no-op on the freshly
        // added singleton, so y does not need to pre-exist.
        if x != *y && !self.lookup.contains_key(y) {
            return Err(PartitionError::NotFound);
        }
        let added = self.add(x.clone())?;
        debug_assert!(added);
        self.union(&x, y)?;
        Ok(true)
    }

    fn remove(&mut self, t: &T) -> Result<bool, PartitionError> {
        let Some(&i) = self.lookup.get(t) else {
            return Ok(false);
        };

        // A subset by itself: its whole subset disappears with it.
        if self.nodes[i as usize].next == i {
            self.detach_root(i);
            self.lookup.remove(t);
            self.nodes[i as usize].value = None;
            self.release(i);
            self.count -= 1;
            self.validate();
            return Ok(true);
        }

        let mut i = i;
        if self.nodes[i as usize].parent == i {
            i = self.swap_root_value(i);
        }
        debug_assert_eq!(self.lookup.get(t), Some(&i));

        let root = self.find(i);
        debug_assert_ne!(root, i);
        self.unlink_cycle(i);
        self.lookup.remove(t);
        self.nodes[root as usize].size -= 1;
        self.nodes[i as usize].value = None;
        self.release(i);
        self.validate();
        Ok(true)
    }

    fn remove_subset(&mut self, t: &T) -> Result<bool, PartitionError> {
        let Some(&i) = self.lookup.get(t) else {
            return Ok(false);
        };
        let root = self.root_no_compress(i);
        self.detach_root(root);
        let mut current = root;
        loop {
            let next = self.nodes[current as usize].next;
            let value = self.nodes[current as usize]
                .value
                .take()
                .expect("subset cycle member is live");
            self.lookup.remove(&value);
            self.release(current);
            if next == root {
                break;
            }
            current = next;
        }
        self.count -= 1;
        self.validate();
        Ok(true)
    }

    fn union(&mut self, x: &T, y: &T) -> Result<bool, PartitionError> {
        let Some(&i1) = self.lookup.get(x) else {
            return Err(PartitionError::NotFound);
        };
        let Some(&i2) = self.lookup.get(y) else {
            return Err(PartitionError::NotFound);
        };
        let r1 = self.find(i1);
        let r2 = self.find(i2);
        if r1 == r2 {
            return Ok(false);
        }

        // Union by size; ties keep x's root.
        let (winner, loser) = if self.nodes[r1 as usize].size >= self.nodes[r2 as usize].size {
            (r1, r2)
        } else {
            (r2, r1)
        };
        self.nodes[loser as usize].parent = winner;
        self.nodes[winner as usize].children += 1;
        self.detach_root(loser);
        self.nodes[winner as usize].size += self.nodes[loser as usize].size;

        // Splice the two subset cycles at the argument nodes.
        let tmp = self.nodes[i1 as usize].next;
        let next2 = self.nodes[i2 as usize].next;
        self.nodes[i1 as usize].next = next2;
        self.nodes[next2 as usize].prev = i1;
        self.nodes[i2 as usize].next = tmp;
        self.nodes[tmp as usize].prev = i2;

        self.count -= 1;
        self.validate();
        Ok(true)
    }

    fn split(&mut self, t: &T) -> Result<bool, PartitionError> {
        let Some(&start) = self.lookup.get(t) else {
            return Err(PartitionError::NotFound);
        };
        if self.nodes[start as usize].next == start {
            return Ok(false);
        }

        let mut i = start;
        if self.nodes[i as usize].parent == i {
            i = self.swap_root_value(i);
        }

        let root = self.find(i);
        debug_assert_ne!(root, i);
        self.unlink_cycle(i);
        let value = self.nodes[i as usize]
            .value
            .take()
            .expect("node holding the split element is live");
        self.release(i);

        let fresh = self.alloc(value.clone());
        self.lookup.insert(value, fresh);
        self.attach_root(fresh);
        self.nodes[root as usize].size -= 1;
        self.count += 1;
        self.validate();
        Ok(true)
    }

    fn move_to(&mut self, x: &T, y: &T) -> Result<bool, PartitionError> {
        let Some(&i1) = self.lookup.get(x) else {
            return Err(PartitionError::NotFound);
        };
        let Some(&i2) = self.lookup.get(y) else {
            return Err(PartitionError::NotFound);
        };
        if self.find(i1) == self.find(i2) {
            return Ok(false);
        }
        self.split(x)?;
        self.union(x, y)?;
        self.validate();
        Ok(true)
    }

    fn clear(&mut self) -> Result<(), PartitionError> {
        self.nodes.clear();
        self.free.clear();
        self.lookup.clear();
        self.any_root = NIL;
        self.count = 0;
        self.validate();
        Ok(())
    }
}

impl<T: Clone + Eq + Hash> Default for UnionFindPartition<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash + fmt::Display> fmt::Display for UnionFindPartition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_partition(f, self.subsets())
    }
}
