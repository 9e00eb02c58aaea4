//! Content digests for bijective maps.
//!
//! Provides a deterministic fingerprint of a map's associations, usable to
//! detect drift between two maps (e.g. a snapshot and a live instance)
//! without comparing them entry by entry. Two maps holding the same set of
//! pairs fingerprint identically regardless of insertion order.
//!
//! # Citations
//! - SHA-256: NIST FIPS 180-4 (2015)
//! - Domain separation & length prefixing: Bernstein et al., "How to hash
//!   into elliptic curves" (2009)

use crate::bimap::BiMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::hash::Hash;

/// Domain separation constant for map content digests (version 0).
const DOMAIN_MAP_CONTENT_V0: &[u8] = b"MAP_CONTENT_V0";

/// A 256-bit content digest.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest256(pub [u8; 32]);

impl Digest256 {
    /// The all-zero digest.
    #[inline]
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Wraps a raw byte array.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw byte array.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Computes SHA-256 of `data` with domain separation.
    ///
    /// The digest covers `b"LSM:" || domain || b":v1" || le64(len) || data`,
    /// so equal payloads hashed under different domains never collide by
    /// construction.
    pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"LSM:");
        hasher.update(domain);
        hasher.update(b":v1");
        hasher.update((data.len() as u64).to_le_bytes());
        hasher.update(data);
        Self(hasher.finalize().into())
    }
}

impl std::fmt::Display for Digest256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Digest256({:02x}{:02x}{:02x}{:02x}…)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

impl<K, V> BiMap<K, V>
where
    K: Hash + Eq + Clone + Serialize,
    V: Hash + Eq + Clone + Serialize,
{
    /// Computes the content fingerprint of this map.
    ///
    /// Each forward pair is CBOR-encoded, the encodings are sorted and
    /// length-prefixed, and the concatenation is hashed under a dedicated
    /// domain. Sorting makes the digest depend only on the set of pairs,
    /// not on insertion order.
    pub fn fingerprint(&self) -> Result<Digest256, serde_cbor::Error> {
        let mut encodings: Vec<Vec<u8>> = Vec::with_capacity(self.len());
        for pair in self.iter() {
            encodings.push(serde_cbor::to_vec(&pair)?);
        }
        encodings.sort();
        let mut data = Vec::new();
        data.extend_from_slice(&(encodings.len() as u64).to_le_bytes());
        for encoding in &encodings {
            data.extend_from_slice(&(encoding.len() as u64).to_le_bytes());
            data.extend_from_slice(encoding);
        }
        Ok(Digest256::hash_with_domain(DOMAIN_MAP_CONTENT_V0, &data))
    }
}
