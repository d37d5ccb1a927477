//! Label input: validated `(label, weight)` pairs in rank order.
//!
//! Whatever order the tag index hands us, a `LabelSet` is always sorted by
//! weight descending (ties by label ascending), so ranks, colours and sphere
//! positions never depend on map iteration order.

pub mod loader;

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{CloudError, Result};

/// One input label and its importance.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelWeight {
    pub label: String,
    pub weight: f32,
}

/// Validated, rank-sorted label set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSet {
    entries: Vec<LabelWeight>,
    index: HashMap<String, usize>,
}

impl LabelSet {
    /// Build a set from `(label, weight)` pairs.
    ///
    /// Rejects empty labels, duplicates and weights that are negative or not
    /// finite.
    pub fn new<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for (label, weight) in pairs {
            let label = label.into();
            if label.is_empty() {
                return Err(CloudError::EmptyLabel);
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(CloudError::InvalidWeight { label, weight });
            }
            if !seen.insert(label.clone()) {
                return Err(CloudError::DuplicateLabel(label));
            }
            entries.push(LabelWeight { label, weight });
        }

        entries.sort_by(rank_order);

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.label.clone(), i))
            .collect();

        Ok(Self { entries, index })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in rank order (heaviest first).
    pub fn iter(&self) -> std::slice::Iter<'_, LabelWeight> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[LabelWeight] {
        &self.entries
    }

    pub fn get(&self, label: &str) -> Option<&LabelWeight> {
        self.index.get(label).map(|&i| &self.entries[i])
    }

    /// 0-based rank of `label`, heaviest = 0.
    pub fn rank_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// The `k` heaviest entries (fewer if the set is smaller).
    pub fn top(&self, k: usize) -> &[LabelWeight] {
        &self.entries[..k.min(self.entries.len())]
    }

    /// Smallest weight, `None` on an empty set.
    pub fn min_weight(&self) -> Option<f32> {
        self.entries.last().map(|e| e.weight)
    }

    /// Largest weight, `None` on an empty set.
    pub fn max_weight(&self) -> Option<f32> {
        self.entries.first().map(|e| e.weight)
    }

    /// Sum of all weights ("N posts" on the tags page).
    pub fn total_weight(&self) -> f32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// One-line count for headers: `12 tags across 30 posts`.
    pub fn summary(&self, noun: &str, total_noun: &str) -> String {
        format!(
            "{} {} across {} {}",
            self.len(),
            noun,
            format_weight(self.total_weight()),
            total_noun
        )
    }

    /// Content hash over `(label, weight bits)` in rank order.
    ///
    /// Two sets built from the same pairs in any insertion order share a
    /// fingerprint; this is the memoisation key for derived layouts.
    pub fn fingerprint(&self) -> u64 {
        let mut h = FNV_OFFSET;
        for e in &self.entries {
            h = fnv1a(h, e.label.as_bytes());
            h = fnv1a(h, &[0xff]);
            h = fnv1a(h, &e.weight.to_bits().to_le_bytes());
        }
        h
    }
}

/// Weights are usually counts: whole numbers print without a fraction.
pub fn format_weight(weight: f32) -> String {
    if weight.fract() == 0.0 && weight.abs() < 1e9 {
        format!("{:.0}", weight)
    } else {
        format!("{:.1}", weight)
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a LabelWeight;
    type IntoIter = std::slice::Iter<'a, LabelWeight>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn rank_order(a: &LabelWeight, b: &LabelWeight) -> Ordering {
    b.weight
        .partial_cmp(&a.weight)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.label.cmp(&b.label))
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(mut h: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_by_weight_desc() {
        let set = LabelSet::new([("C", 1.0), ("A", 10.0), ("B", 5.0)]).unwrap();
        let labels: Vec<&str> = set.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", "C"]);
        assert_eq!(set.rank_of("B"), Some(1));
        assert_eq!(set.max_weight(), Some(10.0));
        assert_eq!(set.min_weight(), Some(1.0));
        assert!((set.total_weight() - 16.0).abs() < 1e-6);
    }

    #[test]
    fn test_summary_and_weight_format() {
        let set = LabelSet::new([("rust", 12.0), ("go", 3.0), ("zig", 1.0)]).unwrap();
        assert_eq!(set.summary("tags", "posts"), "3 tags across 16 posts");
        assert_eq!(LabelSet::empty().summary("tags", "posts"), "0 tags across 0 posts");
        assert_eq!(format_weight(7.0), "7");
        assert_eq!(format_weight(2.5), "2.5");
    }

    #[test]
    fn test_ties_broken_by_label() {
        let set = LabelSet::new([("zeta", 3.0), ("alpha", 3.0), ("mid", 3.0)]).unwrap();
        let labels: Vec<&str> = set.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_empty_set_has_no_extremes() {
        let set = LabelSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.min_weight(), None);
        assert_eq!(set.max_weight(), None);
        assert!(set.top(10).is_empty());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            LabelSet::new([("", 1.0)]),
            Err(CloudError::EmptyLabel)
        ));
        assert!(matches!(
            LabelSet::new([("a", 1.0), ("a", 2.0)]),
            Err(CloudError::DuplicateLabel(l)) if l == "a"
        ));
        assert!(matches!(
            LabelSet::new([("a", -1.0)]),
            Err(CloudError::InvalidWeight { .. })
        ));
        assert!(matches!(
            LabelSet::new([("a", f32::NAN)]),
            Err(CloudError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_fingerprint_ignores_insertion_order() {
        let a = LabelSet::new([("x", 1.0), ("y", 2.0)]).unwrap();
        let b = LabelSet::new([("y", 2.0), ("x", 1.0)]).unwrap();
        let c = LabelSet::new([("y", 2.0), ("x", 1.5)]).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_top_k() {
        let set = LabelSet::new([("a", 3.0), ("b", 2.0), ("c", 1.0)]).unwrap();
        assert_eq!(set.top(2).len(), 2);
        assert_eq!(set.top(2)[0].label, "a");
        assert_eq!(set.top(99).len(), 3);
    }
}
