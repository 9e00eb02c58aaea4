//! Directional views over a bijective map.
//!
//! A view selects one of the two slots of a [`BiMap`] and presents it as an
//! ordinary single-direction mapping. Shared views ([`ForwardView`],
//! [`BackwardView`]) are read-only; exclusive views ([`ForwardViewMut`],
//! [`BackwardViewMut`]) expose the guarded mutations for callers who need
//! asymmetric access. Every view borrows the whole pair, so a mutation
//! through one direction is always observed by the other, and the two halves
//! can never drift apart between a view's operations.

use crate::bimap::BiMap;
use crate::core::PairError;
use std::hash::Hash;

/// Read-only view of the key-to-value direction.
#[derive(Debug, Clone, Copy)]
pub struct ForwardView<'a, K: Hash + Eq, V: Hash + Eq> {
    map: &'a BiMap<K, V>,
}

/// Read-only view of the value-to-key direction.
#[derive(Debug, Clone, Copy)]
pub struct BackwardView<'a, K: Hash + Eq, V: Hash + Eq> {
    map: &'a BiMap<K, V>,
}

/// Read-write view of the key-to-value direction.
#[derive(Debug)]
pub struct ForwardViewMut<'a, K: Hash + Eq, V: Hash + Eq> {
    map: &'a mut BiMap<K, V>,
}

/// Read-write view of the value-to-key direction.
#[derive(Debug)]
pub struct BackwardViewMut<'a, K: Hash + Eq, V: Hash + Eq> {
    map: &'a mut BiMap<K, V>,
}

impl<K, V> BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    /// Borrows the forward direction as a read-only mapping.
    #[inline]
    pub fn forward(&self) -> ForwardView<'_, K, V> {
        ForwardView { map: self }
    }

    /// Borrows the backward direction as a read-only mapping.
    #[inline]
    pub fn backward(&self) -> BackwardView<'_, K, V> {
        BackwardView { map: self }
    }

    /// Borrows the forward direction for guarded mutation.
    #[inline]
    pub fn forward_mut(&mut self) -> ForwardViewMut<'_, K, V> {
        ForwardViewMut { map: self }
    }

    /// Borrows the backward direction for guarded mutation.
    #[inline]
    pub fn backward_mut(&mut self) -> BackwardViewMut<'_, K, V> {
        BackwardViewMut { map: self }
    }
}

impl<'a, K, V> ForwardView<'a, K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    /// Looks up the value paired with `key`.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&'a V> {
        self.map.forward.get(key)
    }

    /// Checks whether `key` is present.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.forward.contains(key)
    }

    /// Returns the number of entries in this direction.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.forward.len()
    }

    /// Checks whether this direction is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.forward.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'a, K, V> {
        self.map.forward.iter()
    }
}

impl<'a, K, V> BackwardView<'a, K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    /// Looks up the key paired with `value`.
    #[inline]
    pub fn get(&self, value: &V) -> Option<&'a K> {
        self.map.backward.get(value)
    }

    /// Checks whether `value` is present.
    #[inline]
    pub fn contains(&self, value: &V) -> bool {
        self.map.backward.contains(value)
    }

    /// Returns the number of entries in this direction.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.backward.len()
    }

    /// Checks whether this direction is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.backward.is_empty()
    }

    /// Iterates over `(value, key)` pairs in this half's insertion order.
    ///
    /// Not guaranteed to correspond to the forward half's order.
    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'a, V, K> {
        self.map.backward.iter()
    }
}

impl<K, V> ForwardViewMut<'_, K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    /// Guarded insertion; same displacement policy as [`BiMap::insert`].
    #[inline]
    pub fn set(&mut self, key: K, value: V) {
        self.map.insert(key, value);
    }

    /// Guarded removal addressed by forward key.
    #[inline]
    pub fn delete(&mut self, key: &K) -> Result<V, PairError> {
        self.map.remove_key(key)
    }

    /// Looks up the value paired with `key`.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.forward.get(key)
    }

    /// Returns the number of entries in this direction.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.forward.len()
    }

    /// Overlays this direction with the inverse of the other, if they
    /// disagree. See [`BiMap::repair_forward_from_backward`].
    #[inline]
    pub fn repair_from_inverse(&mut self) {
        self.map.repair_forward_from_backward();
    }
}

impl<K, V> BackwardViewMut<'_, K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    /// Guarded insertion applied to the backward direction; same
    /// displacement policy as [`BiMap::insert_backward`].
    #[inline]
    pub fn set(&mut self, value: V, key: K) {
        self.map.insert_backward(value, key);
    }

    /// Guarded removal addressed by backward key.
    #[inline]
    pub fn delete(&mut self, value: &V) -> Result<K, PairError> {
        self.map.remove_value(value)
    }

    /// Looks up the key paired with `value`.
    #[inline]
    pub fn get(&self, value: &V) -> Option<&K> {
        self.map.backward.get(value)
    }

    /// Returns the number of entries in this direction.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.backward.len()
    }

    /// Overlays this direction with the inverse of the other, if they
    /// disagree. See [`BiMap::repair_backward_from_forward`].
    #[inline]
    pub fn repair_from_inverse(&mut self) {
        self.map.repair_backward_from_forward();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Direction;

    fn sample() -> BiMap<i32, char> {
        BiMap::from_pairs([(1, 'a'), (2, 'b'), (3, 'c')]).unwrap()
    }

    #[test]
    fn read_views_agree() {
        let map = sample();
        assert_eq!(map.forward().get(&2), Some(&'b'));
        assert_eq!(map.backward().get(&'b'), Some(&2));
        assert_eq!(map.forward().len(), map.backward().len());
    }

    #[test]
    fn mutation_through_forward_view_updates_backward() {
        let mut map = sample();
        map.forward_mut().set(1, 'b');
        assert_eq!(map.backward().get(&'b'), Some(&1));
        assert!(!map.backward().contains(&'a'));
        assert_eq!(map.len(), 2);
        assert!(map.is_consistent());
    }

    #[test]
    fn mutation_through_backward_view_updates_forward() {
        let mut map = sample();
        map.backward_mut().set('c', 1);
        assert_eq!(map.forward().get(&1), Some(&'c'));
        assert!(!map.forward().contains(&3));
        assert!(map.is_consistent());
    }

    #[test]
    fn delete_through_backward_view() {
        let mut map = sample();
        assert_eq!(map.backward_mut().delete(&'c'), Ok(3));
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.backward_mut().delete(&'c'),
            Err(PairError::KeyNotFound(Direction::Backward))
        );
    }

    #[test]
    fn backward_iteration_order_is_independent() {
        // Sealing with an explicit backward table gives each half its own
        // insertion order; the pairs agree, their positions need not.
        let map = crate::builder::PairBuilder::from_pairs([(1, 'a')])
            .with_backward([('z', 26)])
            .finish_unchecked();
        assert!(map.is_consistent());
        let forward_keys: Vec<_> = map.forward().iter().map(|(k, _)| *k).collect();
        let backward_keys: Vec<_> = map.backward().iter().map(|(v, _)| *v).collect();
        assert_eq!(forward_keys, vec![1, 26]);
        assert_eq!(backward_keys, vec!['z', 'a']);
    }
}
