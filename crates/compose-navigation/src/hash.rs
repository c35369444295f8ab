use std::hash::{Hash, Hasher};

#[cfg(feature = "std-hash")]
pub mod default {
    pub use std::collections::hash_map::DefaultHasher;

    #[inline]
    pub fn new() -> DefaultHasher {
        DefaultHasher::new()
    }
}

#[cfg(not(feature = "std-hash"))]
pub mod default {
    pub use ahash::AHasher as DefaultHasher;

    #[inline]
    pub fn new() -> DefaultHasher {
        DefaultHasher::default()
    }
}

/// Order sensitive hash of an id sequence. Used as the key for "did the
/// displayed entries change" checks between frames.
pub fn hash_sequence<V: Hash>(values: impl IntoIterator<Item = V>) -> u64 {
    let mut hasher = default::new();
    let mut len = 0usize;
    for value in values {
        value.hash(&mut hasher);
        len += 1;
    }
    hasher.write_usize(len);
    hasher.finish()
}
