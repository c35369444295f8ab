use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NAV_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a backstack entry.
///
/// Two entries holding equal destinations are still different entries; only
/// the id decides. Ids are never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NavId(u64);

impl NavId {
    /// Allocates a fresh id.
    pub fn new() -> Self {
        Self(NEXT_NAV_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Default for NavId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NavId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nav#{}", self.0)
    }
}
