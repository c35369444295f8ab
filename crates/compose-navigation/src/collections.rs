//! Map and set types used for host bookkeeping.
//!
//! `hashbrown` backs the maps unless the `std-hash` feature asks for the
//! standard library containers. Entry order matters for destruction, so the
//! id keyed host entry map is an [`IndexMap`] using the same hasher.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use hashbrown::{HashMap, HashSet};
}

#[cfg(feature = "std-hash")]
pub type IndexMap<K, V> = indexmap::IndexMap<K, V>;

#[cfg(not(feature = "std-hash"))]
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, ahash::RandomState>;

#[inline]
pub(crate) fn index_map<K, V>() -> IndexMap<K, V> {
    IndexMap::default()
}
