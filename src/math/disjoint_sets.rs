//! Merging of overlapping sets into maximal pairwise-disjoint groups.
//!
//! Every input set is a node of an undirected graph; two nodes are joined
//! when their sets share an element. Each connected component is unioned
//! into one output set. Empty input sets are all joined to each other (and
//! to nothing else), so any number of empty sets minimizes to exactly one
//! empty output set.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Union-find over set indices.
struct Components {
    parent: Vec<usize>,
}

impl Components {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Joins two components, keeping the smaller index as the root so
    /// roots always name the first set of their component.
    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (keep, merge) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[merge] = keep;
        }
    }

    /// Returns the components as lists of set indices, ordered by their
    /// first member.
    fn groups(mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for i in 0..n {
            let root = self.find(i);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(i);
        }
        groups
    }
}

/// Connects every pair of non-disjoint sets given as element iterators.
fn connect<'a, T, I>(sets: I, n: usize) -> Components
where
    T: Eq + Hash + 'a,
    I: IntoIterator,
    I::Item: IntoIterator<Item = &'a T>,
{
    let mut components = Components::new(n);
    let mut owner: HashMap<&'a T, usize> = HashMap::new();
    let mut first_empty: Option<usize> = None;

    for (index, set) in sets.into_iter().enumerate() {
        let mut is_empty = true;
        for element in set {
            is_empty = false;
            match owner.get(element) {
                Some(&other) => components.union(index, other),
                None => {
                    owner.insert(element, index);
                }
            }
        }
        if is_empty {
            match first_empty {
                Some(other) => components.union(index, other),
                None => first_empty = Some(index),
            }
        }
    }
    components
}

/// Merges sets sharing any element into maximal disjoint groups.
///
/// Output groups appear in the order of the first input set of each
/// component. The result is pairwise disjoint and its union equals the
/// union of the input.
#[must_use]
pub fn minimize<T>(sets: &[HashSet<T>]) -> Vec<HashSet<T>>
where
    T: Eq + Hash + Clone,
{
    let components = connect(sets.iter(), sets.len());
    components
        .groups()
        .into_iter()
        .map(|group| {
            group
                .into_iter()
                .flat_map(|i| sets[i].iter().cloned())
                .collect()
        })
        .collect()
}

/// Order-preserving variant of [`minimize`].
///
/// Each output group lists its elements in first-seen order (scanning the
/// member sequences in input order) without duplicates.
#[must_use]
pub fn minimize_ordered<T>(seqs: &[Vec<T>]) -> Vec<Vec<T>>
where
    T: Eq + Hash + Clone,
{
    let components = connect(seqs.iter(), seqs.len());
    components
        .groups()
        .into_iter()
        .map(|group| {
            let mut seen: HashSet<&T> = HashSet::new();
            let mut merged = Vec::new();
            for element in group.iter().flat_map(|&i| seqs[i].iter()) {
                if seen.insert(element) {
                    merged.push(element.clone());
                }
            }
            merged
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[i32]) -> HashSet<i32> {
        items.iter().copied().collect()
    }

    #[test]
    fn chain_merges_into_one_group() {
        let result = minimize(&[set(&[0, 1, 2]), set(&[2, 3, 4]), set(&[4, 5, 6])]);
        assert_eq!(result, vec![set(&[0, 1, 2, 3, 4, 5, 6])]);
    }

    #[test]
    fn disjoint_sets_stay_apart() {
        let result = minimize(&[set(&[1, 2]), set(&[3]), set(&[4, 5])]);
        assert_eq!(result, vec![set(&[1, 2]), set(&[3]), set(&[4, 5])]);
    }

    #[test]
    fn late_bridge_joins_earlier_groups() {
        let result = minimize(&[set(&[1]), set(&[2]), set(&[3]), set(&[1, 3])]);
        assert_eq!(result, vec![set(&[1, 3]), set(&[2])]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let result: Vec<HashSet<i32>> = minimize(&[]);
        assert!(result.is_empty());
    }

    #[test]
    fn empty_sets_collapse_to_one() {
        let result: Vec<HashSet<i32>> = minimize(&[set(&[]), set(&[]), set(&[])]);
        assert_eq!(result, vec![HashSet::new()]);
    }

    #[test]
    fn empty_set_does_not_join_non_empty() {
        let result = minimize(&[set(&[1]), set(&[]), set(&[1, 2])]);
        assert_eq!(result, vec![set(&[1, 2]), HashSet::new()]);
    }

    #[test]
    fn output_is_disjoint_and_preserves_union() {
        let input = vec![
            set(&[1, 9]),
            set(&[2, 3]),
            set(&[9, 4]),
            set(&[5]),
            set(&[3, 6]),
            set(&[7, 5]),
        ];
        let output = minimize(&input);
        for (i, a) in output.iter().enumerate() {
            for b in &output[i + 1..] {
                assert!(a.is_disjoint(b));
            }
        }
        let union_in: HashSet<i32> = input.iter().flatten().copied().collect();
        let union_out: HashSet<i32> = output.iter().flatten().copied().collect();
        assert_eq!(union_in, union_out);
    }

    #[test]
    fn minimizing_twice_is_idempotent() {
        let once = minimize(&[set(&[1, 2]), set(&[2, 3]), set(&[8])]);
        let twice = minimize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn ordered_variant_keeps_first_seen_order() {
        let result = minimize_ordered(&[vec![3, 1], vec![7], vec![1, 2], vec![7, 8]]);
        assert_eq!(result, vec![vec![3, 1, 2], vec![7, 8]]);
    }
}
