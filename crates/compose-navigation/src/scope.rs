//! Scoped resource holders shared between destinations.
//!
//! A [`NavScopeSpec`] maps each destination to the scopes it belongs to. The
//! [`ScopeRegistry`] creates one holder per scope the first time a derived
//! snapshot needs it and releases it once no relevant entry maps to the scope
//! any more. Reference counts are only lowered while pruning, so a scope that
//! is briefly unreferenced by the target alone survives a transition.
//!
//! Scoped holders follow the host lifecycle: activated on create (or on
//! creation while the host is created) and deactivated on dispose.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::collections::map::{HashMap, HashSet};
use crate::host_entry::ScopedNavHostEntry;
use crate::resources::{HolderOwner, ResourceHolderFactory};

/// Maps a destination to the set of scopes it belongs to.
///
/// Called on every snapshot derivation and every prune, so it must be cheap,
/// deterministic and free of side effects.
pub trait NavScopeSpec<T, S> {
    fn destination_scopes(&self, destination: &T) -> HashSet<S>;
}

impl<T, S, F> NavScopeSpec<T, S> for F
where
    F: Fn(&T) -> HashSet<S>,
{
    fn destination_scopes(&self, destination: &T) -> HashSet<S> {
        self(destination)
    }
}

/// Scope spec that assigns no scopes to any destination.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyScopeSpec;

impl<T, S> NavScopeSpec<T, S> for EmptyScopeSpec {
    fn destination_scopes(&self, _destination: &T) -> HashSet<S> {
        HashSet::default()
    }
}

/// Scope type of hosts built without a scope spec. Has no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoScope {}

pub(crate) struct ScopeRegistry<T, S, H> {
    spec: Box<dyn NavScopeSpec<T, S>>,
    entries: HashMap<S, Rc<ScopedNavHostEntry<S, H>>>,
    ref_counts: HashMap<S, usize>,
    active: bool,
}

impl<T, S, H> ScopeRegistry<T, S, H>
where
    S: Eq + Hash + Clone + fmt::Debug,
    H: crate::ResourceHolder,
{
    pub(crate) fn new(spec: Box<dyn NavScopeSpec<T, S>>) -> Self {
        Self {
            spec,
            entries: HashMap::default(),
            ref_counts: HashMap::default(),
            active: false,
        }
    }

    /// Scoped entries for `destination`, creating the missing ones.
    pub(crate) fn scoped_entries_for<F>(
        &mut self,
        destination: &T,
        factory: &mut F,
    ) -> Vec<Rc<ScopedNavHostEntry<S, H>>>
    where
        F: ResourceHolderFactory<S, Holder = H>,
    {
        self.spec
            .destination_scopes(destination)
            .into_iter()
            .map(|scope| {
                if let Some(existing) = self.entries.get(&scope) {
                    return Rc::clone(existing);
                }
                log::trace!("creating scoped entry for {scope:?}");
                let holder = factory.create(HolderOwner::Scope(&scope));
                let entry = Rc::new(ScopedNavHostEntry::new(scope.clone(), holder));
                if self.active {
                    entry.activate();
                }
                self.entries.insert(scope, Rc::clone(&entry));
                entry
            })
            .collect()
    }

    /// Raises each count to at least the number of `target` destinations
    /// mapping to the scope. Counts only drop in [`Self::remove_outdated`].
    pub(crate) fn seed_counts<'a>(&mut self, target: impl IntoIterator<Item = &'a T>)
    where
        T: 'a,
    {
        let mut counts: HashMap<S, usize> = HashMap::default();
        for destination in target {
            for scope in self.spec.destination_scopes(destination) {
                *counts.entry(scope).or_insert(0) += 1;
            }
        }
        for (scope, count) in counts {
            let seeded = self.ref_counts.entry(scope).or_insert(0);
            *seeded = (*seeded).max(count);
        }
    }

    pub(crate) fn activate_all(&mut self) {
        self.active = true;
        for (scope, entry) in &self.entries {
            if entry.activate() {
                log::trace!("scoped entry {scope:?} -> Active");
            }
        }
    }

    pub(crate) fn deactivate_all(&mut self) {
        self.active = false;
        for (scope, entry) in &self.entries {
            if entry.deactivate() {
                log::trace!("scoped entry {scope:?} -> Inactive");
            }
        }
    }

    /// Recounts scope membership over `relevant` destinations and destroys
    /// every scope nobody maps to. Returns the destroyed scopes.
    pub(crate) fn remove_outdated<'a>(&mut self, relevant: impl IntoIterator<Item = &'a T>) -> Vec<S>
    where
        T: 'a,
    {
        let mut counts: HashMap<S, usize> = HashMap::default();
        for destination in relevant {
            for scope in self.spec.destination_scopes(destination) {
                *counts.entry(scope).or_insert(0) += 1;
            }
        }

        let outdated: Vec<S> = self
            .entries
            .keys()
            .filter(|scope| !counts.contains_key(*scope))
            .cloned()
            .collect();
        for scope in &outdated {
            if let Some(entry) = self.entries.remove(scope) {
                if entry.destroy() {
                    log::debug!("scoped entry {scope:?} destroyed");
                }
            }
        }
        counts.retain(|scope, _| self.entries.contains_key(scope));
        self.ref_counts = counts;
        outdated
    }

    pub(crate) fn get(&self, scope: &S) -> Option<&Rc<ScopedNavHostEntry<S, H>>> {
        self.entries.get(scope)
    }

    /// Exact as of the last prune; raised by derivations since then.
    pub(crate) fn ref_count(&self, scope: &S) -> usize {
        self.ref_counts.get(scope).copied().unwrap_or(0)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<T, S, H: crate::ResourceHolder> ScopeRegistry<T, S, H> {
    pub(crate) fn destroy_all(&mut self) {
        for (_, entry) in self.entries.drain() {
            entry.destroy();
        }
        self.ref_counts.clear();
    }
}

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod tests;
