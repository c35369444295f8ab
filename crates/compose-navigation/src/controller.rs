//! Backstack ownership and the mutation surface used by application code.
//!
//! Every mutation replaces the backstack wholesale and bumps
//! [`NavController::version`]; the host compares versions to decide when the
//! target snapshot must be derived again.

use crate::{NavEntry, NavId};

/// The kind of change that produced the current backstack.
///
/// Transitions read this from the target snapshot to choose a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavAction {
    /// Initial state, nothing has been done yet.
    #[default]
    Idle,
    Navigate,
    Replace,
    Pop,
}

/// Ordered entries plus the action that produced them. Top is the last entry.
#[derive(Debug, Clone)]
pub struct NavBackstack<T> {
    entries: Vec<NavEntry<T>>,
    action: NavAction,
}

impl<T> NavBackstack<T> {
    pub fn new(entries: Vec<NavEntry<T>>, action: NavAction) -> Self {
        Self { entries, action }
    }

    pub fn entries(&self) -> &[NavEntry<T>] {
        &self.entries
    }

    pub fn action(&self) -> NavAction {
        self.action
    }

    pub fn last(&self) -> Option<&NavEntry<T>> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NavId> + '_ {
        self.entries.iter().map(NavEntry::id)
    }
}

impl<T> Default for NavBackstack<T> {
    fn default() -> Self {
        Self::new(Vec::new(), NavAction::Idle)
    }
}

#[derive(Debug)]
pub struct NavController<T> {
    backstack: NavBackstack<T>,
    version: u64,
}

impl<T> NavController<T> {
    /// Creates a controller whose backstack holds one entry per destination.
    pub fn new(initial: impl IntoIterator<Item = T>) -> Self {
        Self::with_entries(initial.into_iter().map(NavEntry::new).collect())
    }

    /// Creates a controller from prepared entries, keeping their ids.
    pub fn with_entries(entries: Vec<NavEntry<T>>) -> Self {
        Self {
            backstack: NavBackstack::new(entries, NavAction::Idle),
            version: 0,
        }
    }

    pub fn backstack(&self) -> &NavBackstack<T> {
        &self.backstack
    }

    /// Incremented on every mutation, including ones that leave the entries
    /// unchanged.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replaces the whole backstack. All other operations go through here.
    pub fn set_new_backstack(&mut self, entries: Vec<NavEntry<T>>, action: NavAction) {
        log::trace!(
            "backstack -> {} entries ({action:?}), version {}",
            entries.len(),
            self.version + 1
        );
        self.backstack = NavBackstack::new(entries, action);
        self.version += 1;
    }

    fn take_entries(&mut self) -> Vec<NavEntry<T>> {
        std::mem::take(&mut self.backstack.entries)
    }

    pub fn navigate(&mut self, destination: T) {
        self.navigate_all([destination]);
    }

    pub fn navigate_all(&mut self, destinations: impl IntoIterator<Item = T>) {
        let mut entries = self.take_entries();
        entries.extend(destinations.into_iter().map(NavEntry::new));
        self.set_new_backstack(entries, NavAction::Navigate);
    }

    /// Moves the last entry matching `predicate` to the top, keeping its id.
    /// Returns `false` and leaves the backstack untouched if nothing matches.
    pub fn move_to_top(&mut self, predicate: impl Fn(&T) -> bool) -> bool {
        let Some(index) = self.last_index_of(&predicate) else {
            return false;
        };
        let mut entries = self.take_entries();
        let entry = entries.remove(index);
        entries.push(entry);
        self.set_new_backstack(entries, NavAction::Navigate);
        true
    }

    /// Removes the top entry. Returns `false` if the backstack was empty.
    pub fn pop(&mut self) -> bool {
        if self.backstack.is_empty() {
            return false;
        }
        let mut entries = self.take_entries();
        entries.pop();
        self.set_new_backstack(entries, NavAction::Pop);
        true
    }

    /// Pops everything above the last entry matching `predicate`, and that
    /// entry too when `inclusive`. Returns `false` if nothing matches.
    pub fn pop_up_to(&mut self, predicate: impl Fn(&T) -> bool, inclusive: bool) -> bool {
        let Some(index) = self.last_index_of(&predicate) else {
            return false;
        };
        let keep = if inclusive { index } else { index + 1 };
        let mut entries = self.take_entries();
        entries.truncate(keep);
        self.set_new_backstack(entries, NavAction::Pop);
        true
    }

    pub fn pop_all(&mut self) {
        self.set_new_backstack(Vec::new(), NavAction::Pop);
    }

    /// Replaces the top entry with a new one. On an empty backstack the new
    /// entry simply becomes the only one.
    pub fn replace_last(&mut self, destination: T) {
        let mut entries = self.take_entries();
        entries.pop();
        entries.push(NavEntry::new(destination));
        self.set_new_backstack(entries, NavAction::Replace);
    }

    /// Replaces everything above the last entry matching `predicate` (and that
    /// entry too when `inclusive`) with `destination`.
    pub fn replace_up_to(
        &mut self,
        destination: T,
        predicate: impl Fn(&T) -> bool,
        inclusive: bool,
    ) -> bool {
        let Some(index) = self.last_index_of(&predicate) else {
            return false;
        };
        let keep = if inclusive { index } else { index + 1 };
        let mut entries = self.take_entries();
        entries.truncate(keep);
        entries.push(NavEntry::new(destination));
        self.set_new_backstack(entries, NavAction::Replace);
        true
    }

    pub fn replace_all(&mut self, destination: T) {
        self.set_new_backstack(vec![NavEntry::new(destination)], NavAction::Replace);
    }

    fn last_index_of(&self, predicate: &impl Fn(&T) -> bool) -> Option<usize> {
        self.backstack
            .entries
            .iter()
            .rposition(|entry| predicate(entry.destination()))
    }
}

impl<T> Default for NavController<T> {
    fn default() -> Self {
        Self::with_entries(Vec::new())
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
