//! Entry-table inversion primitives.
//!
//! Free functions over raw entry tables, used by the builder and the repair
//! routines. These operate on plain `IndexMap`s and know nothing about the
//! pair-level invariant.

use crate::core::PairError;
use indexmap::IndexMap;
use std::hash::Hash;

/// Swaps keys and values, unchecked.
///
/// Assumes values are distinct; if they are not, later entries silently
/// displace earlier ones (last write wins) and the result is smaller than
/// the input. Callers that need to detect that case use
/// [`inverted_checked`].
pub fn inverted<K, V>(entries: &IndexMap<K, V>) -> IndexMap<V, K>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    entries
        .iter()
        .map(|(k, v)| (v.clone(), k.clone()))
        .collect()
}

/// Swaps keys and values, failing on repeated values.
///
/// Returns `PairError::NotInvertible` if the swap lost entries, i.e. two
/// keys mapped to the same value.
pub fn inverted_checked<K, V>(entries: &IndexMap<K, V>) -> Result<IndexMap<V, K>, PairError>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    let swapped = inverted(entries);
    if swapped.len() < entries.len() {
        return Err(PairError::NotInvertible);
    }
    Ok(swapped)
}

/// Tests whether two entry tables are exact set-inverses of each other.
///
/// Checks equal cardinality and `b[v] == k` for every `(k, v)` in `a`.
/// Entry order is not compared.
pub fn are_inverses<K, V>(a: &IndexMap<K, V>, b: &IndexMap<V, K>) -> bool
where
    K: Hash + Eq,
    V: Hash + Eq,
{
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(k, v)| b.get(v) == Some(k))
}
