//! Core storage for one direction of a bijective map.
//!
//! A [`HalfMap`] is one of the two slots owned by a [`BiMap`](crate::BiMap):
//! an insertion-ordered association table plus the unguarded mutation
//! primitives (`*_raw`) that the guarded paths and the repair routines are
//! built on. A `HalfMap` on its own maintains no cross-structure invariant;
//! keeping the pair consistent is the owner's job.
//!
//! # Invariants
//! - Keys are unique (property of the underlying `IndexMap`).
//! - Iteration order is insertion order, preserved across removals.
//! - The inverse-consistency invariant (`forward[k] == v` iff
//!   `backward[v] == k`) is a pair-level property checked by the owner,
//!   never by a single half.
//!
//! # Citations
//! - Bidirectional associative containers: boost::bimap (Boost C++ Libraries)
//! - Insertion-ordered hashing: Python 3.7 dict ordering guarantee

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Identifies one of the two slots of a bijective map.
///
/// Each direction's inverse is the other slot; no half holds a reference to
/// its partner, the owner dispatches on this tag instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// The key-to-value slot.
    Forward,
    /// The value-to-key slot.
    Backward,
}

impl Direction {
    /// Returns the opposite direction.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

/// Error type for bijective map operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairError {
    /// The entries cannot form a bijection (repeated values), detected only
    /// by the strict construction/repair path.
    NotInvertible,
    /// The requested key is absent from the direction that was searched.
    KeyNotFound(Direction),
    /// The requested key is absent from both directions (union-addressed
    /// removal only).
    KeyNotFoundEither,
}

impl fmt::Display for PairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairError::NotInvertible => {
                write!(f, "entries are not invertible (repeated keys or values?)")
            }
            PairError::KeyNotFound(direction) => {
                write!(f, "key not found in {} direction", direction)
            }
            PairError::KeyNotFoundEither => {
                write!(f, "key not found in either direction")
            }
        }
    }
}

impl std::error::Error for PairError {}

/// One direction of a bijective map: an insertion-ordered `K -> V` table.
///
/// All mutating methods are `pub(crate)` raw primitives that bypass
/// invariant maintenance; external callers mutate through the owning
/// [`BiMap`](crate::BiMap), whose guarded path keeps both halves in
/// lock-step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfMap<K: Hash + Eq, V> {
    entries: IndexMap<K, V>,
}

impl<K, V> HalfMap<K, V>
where
    K: Hash + Eq,
{
    /// Creates an empty half.
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Wraps pre-built entries without any checking.
    #[inline]
    pub(crate) fn from_entries(entries: IndexMap<K, V>) -> Self {
        Self { entries }
    }

    /// Inserts without touching the partner half.
    ///
    /// Last write wins; returns the displaced value, if any. Re-inserting an
    /// existing key keeps its original position in iteration order.
    #[inline]
    pub(crate) fn insert_raw(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Removes without touching the partner half.
    ///
    /// Uses `shift_remove` so the remaining entries keep insertion order.
    #[inline]
    pub(crate) fn remove_raw(&mut self, key: &K) -> Option<V> {
        self.entries.shift_remove(key)
    }

    /// Removes by a borrowed form of the key, returning the full entry.
    ///
    /// Same ordering behavior as [`HalfMap::remove_raw`].
    #[inline]
    pub(crate) fn remove_entry_raw<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        Q: ?Sized + Hash + Eq,
        K: std::borrow::Borrow<Q>,
    {
        self.entries.shift_remove_entry(key)
    }

    /// Drops all entries without touching the partner half.
    #[inline]
    pub(crate) fn clear_raw(&mut self) {
        self.entries.clear();
    }

    /// Borrows the raw entry table.
    #[inline]
    pub(crate) fn entries(&self) -> &IndexMap<K, V> {
        &self.entries
    }

    /// Looks up a value by key.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Checks whether a key is present.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether the half is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.entries.iter()
    }

    /// Iterates over keys in insertion order.
    #[inline]
    pub fn keys(&self) -> indexmap::map::Keys<'_, K, V> {
        self.entries.keys()
    }
}

impl<K, V> Default for HalfMap<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_inverse_involutive() {
        assert_eq!(Direction::Forward.inverse(), Direction::Backward);
        assert_eq!(Direction::Backward.inverse(), Direction::Forward);
        assert_eq!(Direction::Forward.inverse().inverse(), Direction::Forward);
    }

    #[test]
    fn raw_insert_is_last_write_wins() {
        let mut half: HalfMap<&str, i32> = HalfMap::new();
        assert_eq!(half.insert_raw("a", 1), None);
        assert_eq!(half.insert_raw("a", 2), Some(1));
        assert_eq!(half.get(&"a"), Some(&2));
        assert_eq!(half.len(), 1);
    }

    #[test]
    fn removal_preserves_insertion_order() {
        let mut half: HalfMap<&str, i32> = HalfMap::new();
        half.insert_raw("a", 1);
        half.insert_raw("b", 2);
        half.insert_raw("c", 3);
        half.insert_raw("d", 4);
        assert_eq!(half.remove_raw(&"b"), Some(2));
        let order: Vec<_> = half.keys().copied().collect();
        assert_eq!(order, vec!["a", "c", "d"]);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            PairError::KeyNotFound(Direction::Backward).to_string(),
            "key not found in backward direction"
        );
        assert!(PairError::NotInvertible.to_string().contains("not invertible"));
    }
}
