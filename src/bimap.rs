//! The bijective map façade.
//!
//! A [`BiMap`] owns both directional halves by value, so the pair shares one
//! lifetime and the two slots can never be mutated independently: every
//! mutation takes `&mut BiMap` and updates both halves before returning.
//! The statement `map.get(&k) == Some(&v)` holds precisely when
//! `map.get_backward(&v) == Some(&k)` after any public operation returns.
//!
//! # Invariants
//! - Inverse consistency: both halves have equal cardinality and every
//!   `(k, v)` in the forward half is mirrored as `(v, k)` in the backward
//!   half. Established by the strict constructor, preserved by every guarded
//!   mutation, checkable with [`BiMap::is_consistent`].
//! - A `BiMap` built through the lenient path may start inconsistent
//!   (repeated values drop one association per collision); the guarded
//!   mutations still behave deterministically on such a map, and
//!   [`BiMap::repair`] either heals it or reports `NotInvertible`.
//!
//! # Concurrency
//! Single-threaded and synchronous. Multi-writer use requires wrapping whole
//! `BiMap` operations in one critical section per map instance; `&mut`
//! exclusivity makes the finer-grained mistake (locking the halves
//! separately) unrepresentable.

use crate::builder::PairBuilder;
use crate::core::{Direction, HalfMap, PairError};
use crate::invert::{are_inverses, inverted};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::hash::Hash;

/// A one-to-one key/value correspondence with lock-step halves.
///
/// Both key and value types must be hashable, and each must be unique within
/// its domain for the map to be a bijection. `Clone` is required because
/// every association is stored in both halves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiMap<K: Hash + Eq, V: Hash + Eq> {
    pub(crate) forward: HalfMap<K, V>,
    pub(crate) backward: HalfMap<V, K>,
}

impl<K, V> BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            forward: HalfMap::new(),
            backward: HalfMap::new(),
        }
    }

    /// Strict construction from pairs.
    ///
    /// Builds the forward half, derives the backward half, repairs, and
    /// validates full bidirectional consistency. Fails with
    /// [`PairError::NotInvertible`] if repeated values make the pairs
    /// un-invertible. This is the entry point ordinary callers should use.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, PairError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        PairBuilder::from_pairs(pairs).finish()
    }

    /// Lenient construction from pairs.
    ///
    /// Never fails; repeated values silently lose one association per
    /// collision (last write wins) and leave the map inconsistent, which
    /// [`BiMap::is_consistent`] reports.
    pub fn from_pairs_unchecked<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        PairBuilder::from_pairs(pairs).finish_unchecked()
    }

    /// Returns a fresh construction builder.
    pub fn builder() -> PairBuilder<K, V> {
        PairBuilder::new()
    }

    /// Seals two raw halves. Construction-only; invariant not checked.
    pub(crate) fn from_halves(forward: HalfMap<K, V>, backward: HalfMap<V, K>) -> Self {
        Self { forward, backward }
    }

    /// Looks up the value paired with `key`.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    /// Looks up the key paired with `value`.
    #[inline]
    pub fn get_backward(&self, value: &V) -> Option<&K> {
        self.backward.get(value)
    }

    /// Checks whether `key` is present in the forward direction.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains(key)
    }

    /// Checks whether `value` is present in the backward direction.
    #[inline]
    pub fn contains_value(&self, value: &V) -> bool {
        self.backward.contains(value)
    }

    /// Returns the number of associations in the forward half.
    ///
    /// Equals the backward count whenever the map is consistent.
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Checks whether the map holds no associations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterates over `(key, value)` pairs in forward insertion order.
    ///
    /// The backward half iterates in its own insertion order; the two orders
    /// are not guaranteed to correspond.
    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.forward.iter()
    }

    /// Associates `key` with `value` in the forward direction.
    ///
    /// Last write wins, fully displacing both endpoints: any previous
    /// association involving `key` (in the forward half) or `value` (in the
    /// backward half) is removed before the new pair is installed in both
    /// halves. The eviction steps complete before installation, so no error
    /// surface exists mid-mutation.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(old_value) = self.forward.remove_raw(&key) {
            self.backward.remove_raw(&old_value);
        }
        if let Some(old_key) = self.backward.remove_raw(&value) {
            self.forward.remove_raw(&old_key);
        }
        self.backward.insert_raw(value.clone(), key.clone());
        self.forward.insert_raw(key, value);
    }

    /// Associates `value` with `key` in the backward direction.
    ///
    /// The same displacement policy as [`BiMap::insert`] with the roles of
    /// the two halves swapped; the resulting association is identical, only
    /// the backward half's insertion order differs.
    pub fn insert_backward(&mut self, value: V, key: K) {
        if let Some(old_key) = self.backward.remove_raw(&value) {
            self.forward.remove_raw(&old_key);
        }
        if let Some(old_value) = self.forward.remove_raw(&key) {
            self.backward.remove_raw(&old_value);
        }
        self.forward.insert_raw(key.clone(), value.clone());
        self.backward.insert_raw(value, key);
    }

    /// Removes the association holding `key`, returning its value.
    ///
    /// Removes the mirrored entry from the backward half in the same call.
    /// Fails with [`PairError::KeyNotFound`] if `key` is absent.
    pub fn remove_key(&mut self, key: &K) -> Result<V, PairError> {
        let value = self
            .forward
            .remove_raw(key)
            .ok_or(PairError::KeyNotFound(Direction::Forward))?;
        self.backward.remove_raw(&value);
        Ok(value)
    }

    /// Removes the association holding `value`, returning its key.
    ///
    /// The backward counterpart of [`BiMap::remove_key`].
    pub fn remove_value(&mut self, value: &V) -> Result<K, PairError> {
        let key = self
            .backward
            .remove_raw(value)
            .ok_or(PairError::KeyNotFound(Direction::Backward))?;
        self.forward.remove_raw(&key);
        Ok(key)
    }

    /// Removes an association addressed from the union of both key-spaces.
    ///
    /// Searches the forward keys first, then the backward keys, and removes
    /// the pair from whichever direction contains `key`. Fails with
    /// [`PairError::KeyNotFoundEither`] when neither does. Requires both
    /// domains to borrow as the same lookup type; maps over two unrelated
    /// types address removals through [`BiMap::remove_key`] and
    /// [`BiMap::remove_value`] instead.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<(K, V), PairError>
    where
        Q: ?Sized + Hash + Eq,
        K: Borrow<Q>,
        V: Borrow<Q>,
    {
        if let Some((k, v)) = self.forward.remove_entry_raw(key) {
            self.backward.remove_raw(&v);
            return Ok((k, v));
        }
        if let Some((v, k)) = self.backward.remove_entry_raw(key) {
            self.forward.remove_raw(&k);
            return Ok((k, v));
        }
        Err(PairError::KeyNotFoundEither)
    }

    /// Checks the inverse-consistency invariant.
    ///
    /// True iff the halves have equal cardinality and every forward pair is
    /// mirrored in the backward half. The back-link identity of the source
    /// design (`inverse.inverse is self`) holds structurally here and needs
    /// no check.
    pub fn is_consistent(&self) -> bool {
        are_inverses(self.forward.entries(), self.backward.entries())
    }

    /// Rebuilds the backward half from the forward half if they disagree.
    ///
    /// Overlays the backward entries with the inverse of the forward
    /// entries, bypassing the guarded path so no cascading mutation occurs.
    /// No-op when the map is already consistent. Overlay rather than
    /// clear-and-rebuild keeps un-invertible damage observable: entries the
    /// other half never mentioned survive, so a later consistency check
    /// still fails instead of silently forgetting data.
    pub fn repair_backward_from_forward(&mut self) {
        if self.is_consistent() {
            return;
        }
        for (value, key) in inverted(self.forward.entries()) {
            self.backward.insert_raw(value, key);
        }
    }

    /// Rebuilds the forward half from the backward half if they disagree.
    ///
    /// Mirror image of [`BiMap::repair_backward_from_forward`].
    pub fn repair_forward_from_backward(&mut self) {
        if self.is_consistent() {
            return;
        }
        for (key, value) in inverted(self.backward.entries()) {
            self.forward.insert_raw(key, value);
        }
    }

    /// Authoritative repair entry point.
    ///
    /// First tries repairing the backward half from the forward half, then
    /// (if still inconsistent) the forward half from the backward half.
    /// Fails with [`PairError::NotInvertible`] if consistency cannot be
    /// achieved, which is the only path that detects duplicate-value
    /// corruption. On failure the map is no worse than before the call;
    /// callers that hit this during construction should discard the map.
    pub fn repair(&mut self) -> Result<(), PairError> {
        self.repair_backward_from_forward();
        self.repair_forward_from_backward();
        if !self.is_consistent() {
            return Err(PairError::NotInvertible);
        }
        Ok(())
    }
}

impl<K, V> Default for BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V> IntoIterator for &'a BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BiMap<i32, char> {
        BiMap::from_pairs([(1, 'a'), (2, 'b'), (3, 'c')]).unwrap()
    }

    #[test]
    fn round_trip_invariant() {
        let map = sample();
        for (k, v) in map.iter() {
            assert_eq!(map.get_backward(v), Some(k));
        }
    }

    #[test]
    fn deletion_is_symmetric() {
        let mut map = sample();
        let value = map.remove_key(&2).unwrap();
        assert_eq!(value, 'b');
        assert!(!map.contains_key(&2));
        assert!(!map.contains_value(&'b'));
        assert!(map.is_consistent());
    }

    #[test]
    fn displacement_evicts_both_endpoints() {
        // 1 <-> a, 2 <-> b, then insert(1, 'b'): the old partners of both
        // endpoints (value 'a' and key 2) must be fully gone.
        let mut map = sample();
        map.insert(1, 'b');
        assert_eq!(map.get(&1), Some(&'b'));
        assert_eq!(map.get_backward(&'b'), Some(&1));
        assert!(!map.contains_key(&2));
        assert!(!map.contains_value(&'a'));
        assert_eq!(map.len(), 2);
        assert!(map.is_consistent());
    }

    #[test]
    fn insert_backward_mirrors_forward_policy() {
        let mut map = sample();
        map.insert_backward('b', 3);
        assert_eq!(map.get(&3), Some(&'b'));
        assert_eq!(map.get_backward(&'b'), Some(&3));
        assert!(!map.contains_key(&2));
        assert!(!map.contains_value(&'c'));
        assert_eq!(map.len(), 2);
        assert!(map.is_consistent());
    }

    #[test]
    fn insert_same_pair_is_idempotent() {
        let mut map = sample();
        map.insert(2, 'b');
        assert_eq!(map.len(), 3);
        assert!(map.is_consistent());
        assert_eq!(map.get(&2), Some(&'b'));
    }

    #[test]
    fn remove_missing_key_fails() {
        let mut map = sample();
        assert_eq!(
            map.remove_key(&9),
            Err(PairError::KeyNotFound(Direction::Forward))
        );
        assert_eq!(
            map.remove_value(&'z'),
            Err(PairError::KeyNotFound(Direction::Backward))
        );
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn union_removal_searches_forward_then_backward() {
        let mut map: BiMap<String, String> =
            BiMap::from_pairs([("north".into(), "south".into()), ("east".into(), "west".into())])
                .unwrap();
        // Backward key.
        let (k, v) = map.remove("west").unwrap();
        assert_eq!((k.as_str(), v.as_str()), ("east", "west"));
        // Forward key.
        let (k, _) = map.remove("north").unwrap();
        assert_eq!(k, "north");
        assert!(map.is_empty());
        assert_eq!(map.remove("north"), Err(PairError::KeyNotFoundEither));
    }

    #[test]
    fn union_removal_prefers_forward_on_collision() {
        // "b" is a forward key of one pair and a backward key of another.
        let mut map: BiMap<String, String> =
            BiMap::from_pairs([("a".into(), "b".into()), ("b".into(), "c".into())]).unwrap();
        let (k, v) = map.remove("b").unwrap();
        assert_eq!((k.as_str(), v.as_str()), ("b", "c"));
        assert_eq!(map.get(&"a".to_string()).map(String::as_str), Some("b"));
        assert!(map.is_consistent());
    }

    #[test]
    fn repair_heals_missing_backward_entries() {
        let mut map = sample();
        // Manual surgery: drop one backward entry with the raw primitive.
        map.backward.remove_raw(&'b');
        assert!(!map.is_consistent());
        map.repair().unwrap();
        assert!(map.is_consistent());
        assert_eq!(map.get_backward(&'b'), Some(&2));
    }

    #[test]
    fn repair_heals_missing_forward_entries() {
        let mut map = sample();
        map.forward.remove_raw(&3);
        // Backward-from-forward overlay cannot help; the forward half must
        // be rebuilt from the backward half.
        assert!(!map.is_consistent());
        map.repair().unwrap();
        assert!(map.is_consistent());
        assert_eq!(map.get(&3), Some(&'c'));
    }

    #[test]
    fn repair_rejects_repeated_values() {
        let mut map = BiMap::from_pairs_unchecked([(1, 'a'), (2, 'a')]);
        assert!(!map.is_consistent());
        assert_eq!(map.repair(), Err(PairError::NotInvertible));
        // Failed repair leaves the structure no worse: both keys intact.
        assert!(map.contains_key(&1));
        assert!(map.contains_key(&2));
    }

    #[test]
    fn iteration_follows_forward_insertion_order() {
        let mut map = sample();
        map.remove_key(&2).unwrap();
        map.insert(4, 'd');
        let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 3, 4]);
    }

    #[test]
    fn serde_round_trip_stays_consistent() {
        let map = sample();
        let bytes = serde_cbor::to_vec(&map).unwrap();
        let decoded: BiMap<i32, char> = serde_cbor::from_slice(&bytes).unwrap();
        assert_eq!(decoded, map);
        assert!(decoded.is_consistent());
    }
}
