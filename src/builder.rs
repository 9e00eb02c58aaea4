//! Two-step construction of a bijective map.
//!
//! Construction is the only window in which the two halves of a pair may
//! disagree, so it gets its own type: a [`PairBuilder`] accumulates raw
//! entries with no invariant checking, and sealing it produces a
//! [`BiMap`](crate::BiMap) on which every mutation is guarded. This makes
//! the temporarily-inconsistent phase visible in the types instead of
//! tracking it with a runtime flag.
//!
//! The lenient seal ([`PairBuilder::finish_unchecked`]) never fails: with
//! repeated values it silently drops one association per collision, and the
//! resulting map reports the damage through
//! [`BiMap::is_consistent`](crate::BiMap::is_consistent). The strict seal
//! ([`PairBuilder::finish`]) runs repair and rejects such input. External
//! callers should prefer the strict path; the lenient one exists for
//! best-effort construction followed by an explicit
//! [`repair`](crate::BiMap::repair).

use crate::bimap::BiMap;
use crate::core::{HalfMap, PairError};
use crate::invert::inverted;
use indexmap::IndexMap;
use std::hash::Hash;

/// Accumulates raw entries for both halves of a bijective map.
///
/// # Invariants
/// - None. A builder is the explicitly-unchecked construction phase; the
///   inverse-consistency invariant is only established when the builder is
///   sealed into a `BiMap`.
#[derive(Debug, Clone)]
pub struct PairBuilder<K, V> {
    forward: IndexMap<K, V>,
    backward: Option<IndexMap<V, K>>,
}

impl<K, V> PairBuilder<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            forward: IndexMap::new(),
            backward: None,
        }
    }

    /// Creates a builder populated with forward entries.
    ///
    /// Ordinary last-write-wins insertion; duplicate keys in `pairs` are
    /// collapsed without error.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            forward: pairs.into_iter().collect(),
            backward: None,
        }
    }

    /// Adds one forward entry, last write wins.
    pub fn insert(&mut self, key: K, value: V) -> &mut Self {
        self.forward.insert(key, value);
        self
    }

    /// Supplies a pre-built backward table.
    ///
    /// Advanced use. When a backward table is present, sealing overlays it
    /// with the inverse of the forward entries and then rebuilds the forward
    /// entries from the result, so the backward table as it stands after the
    /// overlay drives the final forward contents.
    pub fn with_backward<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (V, K)>,
    {
        self.backward = Some(entries.into_iter().collect());
        self
    }

    /// Seals the builder without checking invertibility.
    ///
    /// With no explicit backward table, the backward half is the unchecked
    /// inverse of the forward entries and the forward half is left exactly
    /// as built. Repeated values lose one association per collision; the
    /// damage is observable via `is_consistent` and repairable only by
    /// removing the offending entries.
    pub fn finish_unchecked(self) -> BiMap<K, V> {
        let (forward, backward) = match self.backward {
            None => {
                let backward = inverted(&self.forward);
                (self.forward, backward)
            }
            Some(mut backward) => {
                // Overlay, then mirror back: the explicitly supplied table
                // drives the forward contents wherever the two disagree.
                backward.extend(inverted(&self.forward));
                let mut forward = self.forward;
                forward.extend(inverted(&backward));
                (forward, backward)
            }
        };
        BiMap::from_halves(HalfMap::from_entries(forward), HalfMap::from_entries(backward))
    }

    /// Seals the builder, validating that the entries form a bijection.
    ///
    /// Runs [`BiMap::repair`] on the sealed map and re-checks full
    /// bidirectional consistency. Fails with [`PairError::NotInvertible`]
    /// when repeated values made the pair un-invertible. This is the entry
    /// point ordinary callers should use.
    pub fn finish(self) -> Result<BiMap<K, V>, PairError> {
        let mut map = self.finish_unchecked();
        map.repair()?;
        if !map.is_consistent() {
            return Err(PairError::NotInvertible);
        }
        Ok(map)
    }
}

impl<K, V> Default for PairBuilder<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_finish_accepts_bijection() {
        let map = PairBuilder::from_pairs([(1, "a"), (2, "b")]).finish().unwrap();
        assert!(map.is_consistent());
        assert_eq!(map.get(&1), Some(&"a"));
        assert_eq!(map.get_backward(&"b"), Some(&2));
    }

    #[test]
    fn strict_finish_rejects_repeated_values() {
        let err = PairBuilder::from_pairs([(1, "a"), (2, "a")]).finish().unwrap_err();
        assert_eq!(err, PairError::NotInvertible);
    }

    #[test]
    fn unchecked_finish_tolerates_repeated_values() {
        let map = PairBuilder::from_pairs([(1, "a"), (2, "a")]).finish_unchecked();
        // Forward kept both keys, backward kept the last writer.
        assert_eq!(map.forward().len(), 2);
        assert_eq!(map.backward().len(), 1);
        assert_eq!(map.get_backward(&"a"), Some(&2));
        assert!(!map.is_consistent());
    }

    #[test]
    fn duplicate_keys_collapse_during_phase_a() {
        let map = PairBuilder::from_pairs([(1, "a"), (1, "b")]).finish().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"b"));
    }

    #[test]
    fn explicit_backward_drives_forward() {
        // Builder starts with 1 -> "a", but the supplied backward table says
        // "a" belongs to 9. The supplied table wins after sealing.
        let map = PairBuilder::from_pairs([(1, "a")])
            .with_backward([("a", 9)])
            .finish_unchecked();
        // Overlay: backward gets ("a", 1) from the forward inverse, then the
        // forward half is rebuilt from backward.
        assert_eq!(map.get_backward(&"a"), Some(&1));
        assert_eq!(map.get(&1), Some(&"a"));
        assert!(map.is_consistent());
    }

    #[test]
    fn explicit_backward_extra_entries_survive() {
        let map = PairBuilder::from_pairs([(1, "a")])
            .with_backward([("z", 26)])
            .finish_unchecked();
        // The extra backward association is mirrored into the forward half.
        assert_eq!(map.get(&26), Some(&"z"));
        assert_eq!(map.get(&1), Some(&"a"));
        assert!(map.is_consistent());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn empty_builder_seals_to_empty_map() {
        let map: BiMap<i32, char> = PairBuilder::new().finish().unwrap();
        assert!(map.is_empty());
        assert!(map.is_consistent());
    }

    #[test]
    fn incremental_insert_matches_from_pairs() {
        let mut builder = PairBuilder::new();
        builder.insert(1, 'x');
        builder.insert(2, 'y');
        let a = builder.finish().unwrap();
        let b = PairBuilder::from_pairs([(1, 'x'), (2, 'y')]).finish().unwrap();
        assert_eq!(a, b);
    }
}
