use std::fmt;

use crate::NavId;

/// A single item of a backstack with its own identity.
///
/// The backstack may contain several equal destinations; the [`NavId`] is what
/// tells them apart. Every entry with a distinct id is served its own
/// resource holder by the host.
#[derive(Clone)]
pub struct NavEntry<T> {
    id: NavId,
    destination: T,
}

impl<T> NavEntry<T> {
    /// Wraps `destination` with a freshly allocated id.
    pub fn new(destination: T) -> Self {
        Self {
            id: NavId::new(),
            destination,
        }
    }

    #[inline]
    pub fn id(&self) -> NavId {
        self.id
    }

    #[inline]
    pub fn destination(&self) -> &T {
        &self.destination
    }

    pub fn into_parts(self) -> (NavId, T) {
        (self.id, self.destination)
    }
}

impl<T> PartialEq for NavEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for NavEntry<T> {}

impl<T: fmt::Debug> fmt::Debug for NavEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavEntry")
            .field("id", &self.id)
            .field("destination", &self.destination)
            .finish()
    }
}

/// Creates a new [`NavEntry`] with a new unique id.
pub fn nav_entry<T>(destination: T) -> NavEntry<T> {
    NavEntry::new(destination)
}
