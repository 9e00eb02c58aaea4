//! Lockstep: a bijective map whose two directions are mutated in lock-step.
//!
//! This crate implements a strict one-to-one key/value correspondence as a
//! pair of insertion-ordered halves owned by a single [`BiMap`], providing:
//! - Guarded mutation with a "last write wins, fully displacing both
//!   endpoints" policy: `map.get(&k) == Some(&v)` holds precisely when
//!   `map.get_backward(&v) == Some(&k)` after any public operation returns.
//! - An explicit two-step construction protocol ([`PairBuilder`]): raw,
//!   unchecked population first, then a sealing step that either validates
//!   invertibility (strict) or tolerates repeated values (lenient).
//! - Consistency diagnostics and repair ([`BiMap::is_consistent`],
//!   [`BiMap::repair`]) for callers that bypassed the strict constructor or
//!   performed manual surgery on a half.
//!
//! # Design
//!
//! Both halves live by value in one struct, so the pair shares a single
//! lifetime and "which slot is my inverse" is a type-level fact rather than
//! a pointer. There is no cyclic ownership and no construction-time
//! handshake: while a [`PairBuilder`] exists the invariant may not hold; a
//! sealed [`BiMap`] only mutates through the guarded path.
//!
//! The lenient and strict construction paths are deliberately distinct:
//! unchecked construction is cheap and silently collapses repeated values
//! (last write wins), while the strict path rejects them with
//! [`PairError::NotInvertible`]. Best-effort callers build leniently and
//! call [`BiMap::repair`] when they are ready to pay for validation.
//!
//! # Example
//!
//! ```
//! use lockstep::prelude::*;
//!
//! let mut map = BiMap::from_pairs([(1, 'a'), (2, 'b'), (3, 'c')]).unwrap();
//! assert_eq!(map.get(&2), Some(&'b'));
//! assert_eq!(map.get_backward(&'b'), Some(&2));
//!
//! map.insert(1, 'b'); // displaces (1, 'a') and (2, 'b')
//! assert_eq!(map.get(&1), Some(&'b'));
//! assert_eq!(map.len(), 2);
//! ```

pub mod bimap;
pub mod builder;
pub mod core;
pub mod fingerprint;
pub mod invert;
pub mod view;

pub use crate::bimap::BiMap;
pub use crate::builder::PairBuilder;
pub use crate::core::{Direction, HalfMap, PairError};
pub use crate::fingerprint::Digest256;
pub use crate::view::{BackwardView, BackwardViewMut, ForwardView, ForwardViewMut};

/// Prelude for convenient usage.
pub mod prelude {
    pub use crate::bimap::BiMap;
    pub use crate::builder::PairBuilder;
    pub use crate::core::{Direction, PairError};
    pub use crate::fingerprint::Digest256;
    pub use crate::invert::{are_inverses, inverted, inverted_checked};
    pub use crate::view::{BackwardView, BackwardViewMut, ForwardView, ForwardViewMut};
}
