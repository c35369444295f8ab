//! Immutable ordered views of host entries.
//!
//! The host hands out two of these per frame: the *target* snapshot derived
//! from the backstack, and the *current* snapshot the transition reports as
//! displayed. Equality only looks at the ordered id sequence.

use std::fmt;
use std::rc::Rc;

use crate::hash::hash_sequence;
use crate::host_entry::{NavHostEntry, ScopedNavHostEntry};
use crate::{NavAction, NavError, NavId, NavResult};

/// One entry of a snapshot together with the scoped holders its destination
/// maps to. The scoped list is empty for hosts without a scope spec.
pub struct NavSnapshotItem<T, S, H> {
    host_entry: Rc<NavHostEntry<T, H>>,
    scoped_host_entries: Vec<Rc<ScopedNavHostEntry<S, H>>>,
}

impl<T, S, H> NavSnapshotItem<T, S, H> {
    pub(crate) fn new(
        host_entry: Rc<NavHostEntry<T, H>>,
        scoped_host_entries: Vec<Rc<ScopedNavHostEntry<S, H>>>,
    ) -> Self {
        Self {
            host_entry,
            scoped_host_entries,
        }
    }

    pub fn host_entry(&self) -> &Rc<NavHostEntry<T, H>> {
        &self.host_entry
    }

    pub fn scoped_host_entries(&self) -> &[Rc<ScopedNavHostEntry<S, H>>] {
        &self.scoped_host_entries
    }

    pub fn id(&self) -> NavId {
        self.host_entry.id()
    }
}

impl<T: fmt::Debug, S: PartialEq + fmt::Debug, H> NavSnapshotItem<T, S, H> {
    /// Returns the scoped holder for `scope`, failing when the entry's
    /// destination is not associated with it.
    pub fn scoped(&self, scope: &S) -> NavResult<&Rc<ScopedNavHostEntry<S, H>>> {
        self.scoped_host_entries
            .iter()
            .find(|scoped| scoped.scope() == scope)
            .ok_or_else(|| NavError::ScopeNotAssociated {
                scope: format!("{scope:?}"),
                destination: format!("{:?}", self.host_entry.destination()),
            })
    }
}

impl<T, S, H> Clone for NavSnapshotItem<T, S, H> {
    fn clone(&self) -> Self {
        Self {
            host_entry: Rc::clone(&self.host_entry),
            scoped_host_entries: self.scoped_host_entries.clone(),
        }
    }
}

impl<T: fmt::Debug, S: fmt::Debug, H> fmt::Debug for NavSnapshotItem<T, S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavSnapshotItem")
            .field("host_entry", &self.host_entry)
            .field("scoped_host_entries", &self.scoped_host_entries)
            .finish()
    }
}

pub struct NavSnapshot<T, S, H> {
    items: Rc<[NavSnapshotItem<T, S, H>]>,
    action: NavAction,
}

impl<T, S, H> NavSnapshot<T, S, H> {
    pub(crate) fn new(items: Vec<NavSnapshotItem<T, S, H>>, action: NavAction) -> Self {
        Self {
            items: items.into(),
            action,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), NavAction::Idle)
    }

    pub fn items(&self) -> &[NavSnapshotItem<T, S, H>] {
        &self.items
    }

    pub fn host_entries(&self) -> impl Iterator<Item = &Rc<NavHostEntry<T, H>>> + '_ {
        self.items.iter().map(NavSnapshotItem::host_entry)
    }

    pub fn ids(&self) -> impl Iterator<Item = NavId> + '_ {
        self.items.iter().map(NavSnapshotItem::id)
    }

    pub fn last(&self) -> Option<&NavSnapshotItem<T, S, H>> {
        self.items.last()
    }

    pub fn last_id(&self) -> Option<NavId> {
        self.last().map(NavSnapshotItem::id)
    }

    pub fn get(&self, id: NavId) -> Option<&NavSnapshotItem<T, S, H>> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: NavId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The backstack action this snapshot was derived from.
    pub fn action(&self) -> NavAction {
        self.action
    }

    /// Order sensitive hash of the id sequence.
    pub fn fingerprint(&self) -> u64 {
        hash_sequence(self.ids())
    }
}

impl<T, S, H> Clone for NavSnapshot<T, S, H> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
            action: self.action,
        }
    }
}

impl<T, S, H> PartialEq for NavSnapshot<T, S, H> {
    fn eq(&self, other: &Self) -> bool {
        self.ids().eq(other.ids())
    }
}

impl<T, S, H> Eq for NavSnapshot<T, S, H> {}

impl<T, S, H> Default for NavSnapshot<T, S, H> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug, S: fmt::Debug, H> fmt::Debug for NavSnapshot<T, S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavSnapshot")
            .field("items", &self.items)
            .field("action", &self.action)
            .finish()
    }
}
