use std::collections::BTreeMap;

use crate::DocId;

/// Sparse docID -> count map. Missing keys count as zero.
///
/// Iteration is in ascending docID order, so two walks over the same
/// counter always agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    counts: BTreeMap<DocId, u32>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: DocId) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Insert or overwrite. Returns false, leaving the counter untouched,
    /// when `key` is 0.
    pub fn set(&mut self, key: DocId, value: u32) -> bool {
        if key == 0 {
            return false;
        }
        self.counts.insert(key, value);
        true
    }

    /// Increment the count for `key`, inserting it at 1 if absent. Returns
    /// the new count, or 0 when `key` is 0. Counts saturate at `u32::MAX`.
    pub fn add(&mut self, key: DocId) -> u32 {
        if key == 0 {
            return 0;
        }
        let count = self.counts.entry(key).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, u32)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Pairwise minimum of both counters. A key missing on either side
    /// counts as 0, and zero results are dropped, so only keys with a
    /// nonzero count in both survive.
    pub fn intersect(&self, other: &Counter) -> Counter {
        let counts = self
            .iter()
            .map(|(key, count)| (key, count.min(other.get(key))))
            .filter(|&(_, count)| count > 0)
            .collect();
        Counter { counts }
    }

    /// Add every count of `other` into `self`, saturating at `u32::MAX`.
    pub fn union_with(&mut self, other: &Counter) {
        for (key, count) in other.iter() {
            let sum = self.counts.entry(key).or_insert(0);
            *sum = sum.saturating_add(count);
        }
    }
}

impl FromIterator<(DocId, u32)> for Counter {
    fn from_iter<I: IntoIterator<Item = (DocId, u32)>>(iter: I) -> Self {
        let mut counter = Counter::new();
        for (key, value) in iter {
            counter.set(key, value);
        }
        counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_zero() {
        let c = Counter::new();
        assert_eq!(c.get(7), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn add_and_set() {
        let mut c = Counter::new();
        assert_eq!(c.add(3), 1);
        assert_eq!(c.add(3), 2);
        assert!(c.set(3, 10));
        assert!(c.set(3, 10));
        assert_eq!(c.get(3), 10);
        assert_eq!(c.add(3), 11);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn zero_key_rejected() {
        let mut c = Counter::new();
        assert!(!c.set(0, 4));
        assert_eq!(c.add(0), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn iteration_is_repeatable() {
        let c: Counter = [(9, 1), (2, 5), (4, 4)].into_iter().collect();
        let a: Vec<_> = c.iter().collect();
        let b: Vec<_> = c.iter().collect();
        assert_eq!(a, b);
        assert_eq!(a, vec![(2, 5), (4, 4), (9, 1)]);
    }

    #[test]
    fn intersect_takes_min_and_drops_missing() {
        let cat: Counter = [(1, 3), (2, 1)].into_iter().collect();
        let dog: Counter = [(1, 2), (3, 5)].into_iter().collect();
        let both = cat.intersect(&dog);
        assert_eq!(both.iter().collect::<Vec<_>>(), vec![(1, 2)]);
        // operands untouched
        assert_eq!(cat.len(), 2);
        assert_eq!(dog.get(3), 5);
    }

    #[test]
    fn intersect_drops_zero_counts() {
        let a: Counter = [(1, 0), (2, 4)].into_iter().collect();
        let b: Counter = [(1, 6), (2, 1)].into_iter().collect();
        assert_eq!(a.intersect(&b).iter().collect::<Vec<_>>(), vec![(2, 1)]);
    }

    #[test]
    fn union_sums() {
        let mut acc: Counter = [(1, 3), (2, 1)].into_iter().collect();
        let dog: Counter = [(1, 2), (3, 5)].into_iter().collect();
        acc.union_with(&dog);
        assert_eq!(acc.iter().collect::<Vec<_>>(), vec![(1, 5), (2, 1), (3, 5)]);
    }

    #[test]
    fn sums_saturate_near_max() {
        let big: Counter = [(1, u32::MAX), (2, u32::MAX - 1)].into_iter().collect();
        let mut acc = big.clone();
        acc.union_with(&big);
        assert_eq!(acc.get(1), u32::MAX);
        assert_eq!(acc.get(2), u32::MAX);

        let mut c: Counter = [(4, u32::MAX - 1)].into_iter().collect();
        assert_eq!(c.add(4), u32::MAX);
        assert_eq!(c.add(4), u32::MAX);
    }
}
