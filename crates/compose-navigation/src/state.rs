//! The NavHost state machine.
//!
//! [`NavHostState`] owns the backstack, the id keyed host entries and,
//! optionally, the scope registry. It derives the target snapshot whenever the
//! backstack changes and exposes the lifecycle hooks the render layer calls:
//!
//! * [`NavHostState::on_create`] / [`NavHostState::on_dispose`] bracket the
//!   time the host is operating;
//! * [`NavHostState::on_transition_start`] fires when the target top changed;
//! * [`NavHostState::on_transition_finish`] fires once the displayed top caught
//!   up with the target top;
//! * [`NavHostState::remove_outdated_host_entries`] runs when the displayed
//!   entries equal the target entries and releases everything neither snapshot
//!   references.
//!
//! Destruction only ever happens in the last hook, so it always lags visual
//! convergence. [`crate::NavHost`] calls the hooks in the right order for
//! hosts that do not drive them by hand.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::collections::map::HashSet;
use crate::collections::{index_map, IndexMap};
use crate::host_entry::{NavHostEntry, ScopedNavHostEntry};
use crate::resources::{HolderOwner, ResourceHolderFactory};
use crate::scope::{NavScopeSpec, NoScope, ScopeRegistry};
use crate::snapshot::{NavSnapshot, NavSnapshotItem};
use crate::{NavController, NavError, NavId, NavResult};

/// Behaviour switches for a [`NavHostState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavHostConfig {
    /// Activate every target entry in `on_create`. When off, the first
    /// `on_transition_finish` activates the target top instead.
    pub activate_on_create: bool,
    /// Destroy every remaining holder when the state is dropped.
    pub destroy_on_drop: bool,
}

impl NavHostConfig {
    pub fn activate_on_create(mut self, value: bool) -> Self {
        self.activate_on_create = value;
        self
    }

    pub fn destroy_on_drop(mut self, value: bool) -> Self {
        self.destroy_on_drop = value;
        self
    }
}

impl Default for NavHostConfig {
    fn default() -> Self {
        Self {
            activate_on_create: true,
            destroy_on_drop: true,
        }
    }
}

type Holder<S, F> = <F as ResourceHolderFactory<S>>::Holder;

pub struct NavHostState<T, S, F>
where
    F: ResourceHolderFactory<S>,
{
    controller: NavController<T>,
    factory: F,
    config: NavHostConfig,
    host_entries: IndexMap<NavId, Rc<NavHostEntry<T, Holder<S, F>>>>,
    scopes: Option<ScopeRegistry<T, S, Holder<S, F>>>,
    target: NavSnapshot<T, S, Holder<S, F>>,
    target_version: u64,
    current: Option<NavSnapshot<T, S, Holder<S, F>>>,
    created: bool,
}

impl<T, F> NavHostState<T, NoScope, F>
where
    T: Clone,
    F: ResourceHolderFactory<NoScope>,
{
    /// Creates a host without scoped holders.
    pub fn new(controller: NavController<T>, factory: F) -> Self {
        Self::build(controller, None, factory)
    }
}

impl<T, S, F> NavHostState<T, S, F>
where
    T: Clone,
    S: Eq + Hash + Clone + fmt::Debug,
    F: ResourceHolderFactory<S>,
{
    /// Creates a host that also keeps one shared holder per scope reachable
    /// from the relevant destinations.
    pub fn with_scope_spec(
        controller: NavController<T>,
        scope_spec: impl NavScopeSpec<T, S> + 'static,
        factory: F,
    ) -> Self {
        Self::build(controller, Some(ScopeRegistry::new(Box::new(scope_spec))), factory)
    }

    /// Creates a host typed for scope `S` but without a scope spec. Scoped
    /// lookups fail with [`NavError::ScopingDisabled`].
    pub fn unscoped(controller: NavController<T>, factory: F) -> Self {
        Self::build(controller, None, factory)
    }

    fn build(
        controller: NavController<T>,
        scopes: Option<ScopeRegistry<T, S, Holder<S, F>>>,
        factory: F,
    ) -> Self {
        let target_version = controller.version();
        let mut state = Self {
            controller,
            factory,
            config: NavHostConfig::default(),
            host_entries: index_map(),
            scopes,
            target: NavSnapshot::empty(),
            target_version,
            current: None,
            created: false,
        };
        state.target = state.derive_target_snapshot();
        state
    }

    pub fn with_config(mut self, config: NavHostConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> NavHostConfig {
        self.config
    }

    pub fn controller(&self) -> &NavController<T> {
        &self.controller
    }

    /// Mutates the backstack and re-derives the target snapshot if anything
    /// changed.
    pub fn update_backstack<R>(&mut self, update: impl FnOnce(&mut NavController<T>) -> R) -> R {
        let result = update(&mut self.controller);
        if self.controller.version() != self.target_version {
            self.target_version = self.controller.version();
            self.target = self.derive_target_snapshot();
        }
        result
    }

    /// The desired snapshot, in backstack order.
    pub fn target_snapshot(&self) -> &NavSnapshot<T, S, Holder<S, F>> {
        &self.target
    }

    /// The snapshot last reported as displayed, if any.
    pub fn current_snapshot(&self) -> Option<&NavSnapshot<T, S, Holder<S, F>>> {
        self.current.as_ref()
    }

    /// Records what the render layer currently displays.
    pub fn report_current_snapshot(&mut self, snapshot: NavSnapshot<T, S, Holder<S, F>>) {
        self.current = Some(snapshot);
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Number of host entries currently owned, including ones waiting to be
    /// pruned.
    pub fn host_entry_count(&self) -> usize {
        self.host_entries.len()
    }

    pub fn owned_ids(&self) -> impl Iterator<Item = NavId> + '_ {
        self.host_entries.keys().copied()
    }

    pub fn scoped_entry_count(&self) -> usize {
        self.scopes.as_ref().map_or(0, ScopeRegistry::len)
    }

    /// How many relevant entries map to `scope`.
    ///
    /// Exact after each [`Self::remove_outdated_host_entries`]. In between it
    /// never drops below the count over the target snapshot, so a scope whose
    /// holder is alive reports a non-zero count.
    pub fn scope_ref_count(&self, scope: &S) -> usize {
        self.scopes.as_ref().map_or(0, |scopes| scopes.ref_count(scope))
    }

    fn derive_target_snapshot(&mut self) -> NavSnapshot<T, S, Holder<S, F>> {
        let backstack = self.controller.backstack();
        let mut items = Vec::with_capacity(backstack.len());
        for entry in backstack.entries() {
            let id = entry.id();
            let host_entry = match self.host_entries.get(&id) {
                Some(existing) => Rc::clone(existing),
                None => {
                    log::trace!("creating host entry {id}");
                    let holder = self.factory.create(HolderOwner::Entry(id));
                    let created = Rc::new(NavHostEntry::new(id, entry.destination().clone(), holder));
                    self.host_entries.insert(id, Rc::clone(&created));
                    created
                }
            };
            let scoped = match self.scopes.as_mut() {
                Some(scopes) => scopes.scoped_entries_for(entry.destination(), &mut self.factory),
                None => Vec::new(),
            };
            items.push(NavSnapshotItem::new(host_entry, scoped));
        }
        if let Some(scopes) = self.scopes.as_mut() {
            scopes.seed_counts(backstack.entries().iter().map(|entry| entry.destination()));
        }
        log::trace!(
            "target snapshot derived: {} entries, action {:?}",
            items.len(),
            backstack.action()
        );
        NavSnapshot::new(items, backstack.action())
    }

    /// The host begins operating. Activates every entry of the target
    /// snapshot and every scoped holder. Entries left inactive by a previous
    /// dispose become active again.
    pub fn on_create(&mut self) {
        log::debug!("nav host created");
        self.created = true;
        if self.config.activate_on_create {
            for entry in self.target.host_entries() {
                entry.activate();
            }
        }
        if let Some(scopes) = self.scopes.as_mut() {
            scopes.activate_all();
        }
    }

    /// The host stops operating. Every owned holder is deactivated, none is
    /// destroyed.
    pub fn on_dispose(&mut self) {
        log::debug!("nav host disposed");
        self.created = false;
        for entry in self.host_entries.values() {
            entry.deactivate();
        }
        if let Some(scopes) = self.scopes.as_mut() {
            scopes.deactivate_all();
        }
    }

    /// The target top changed. Everything but the new target top becomes
    /// inactive while staying alive for the transition.
    pub fn on_transition_start(&mut self) {
        if !self.created {
            log::warn!("transition start before the host was created; ignored");
            return;
        }
        let top = self.target.last_id();
        log::debug!("transition start towards {top:?}");
        for (id, entry) in &self.host_entries {
            if Some(*id) != top {
                entry.deactivate();
            }
        }
    }

    /// The displayed top equals the target top. Activates it.
    pub fn on_transition_finish(&mut self) {
        if !self.created {
            log::warn!("transition finish before the host was created; ignored");
            return;
        }
        let top = self.target.last_id();
        log::debug!("transition finish at {top:?}");
        if let Some(item) = self.target.last() {
            item.host_entry().activate();
        }
    }

    /// Destroys every owned entry that is in neither the target nor the
    /// current snapshot, then recounts scope membership. Returns the ids of
    /// the destroyed entries in creation order.
    pub fn remove_outdated_host_entries(&mut self) -> Vec<NavId> {
        let current = self.current.as_ref().unwrap_or(&self.target);
        let relevant: HashSet<NavId> = self.target.ids().chain(current.ids()).collect();

        let mut removed = Vec::new();
        self.host_entries.retain(|id, entry| {
            if relevant.contains(id) {
                return true;
            }
            entry.destroy();
            removed.push(*id);
            false
        });

        if let Some(scopes) = self.scopes.as_mut() {
            let destinations = self
                .target
                .items()
                .iter()
                .chain(
                    current
                        .items()
                        .iter()
                        .filter(|item| !self.target.contains(item.id())),
                )
                .map(|item| item.host_entry().destination());
            scopes.remove_outdated(destinations);
        }

        if !removed.is_empty() {
            log::debug!("removed {} outdated host entries", removed.len());
        }
        removed
    }

    /// Looks up the host entry for `id` in the target or current snapshot.
    pub fn host_entry(&self, id: NavId) -> NavResult<Rc<NavHostEntry<T, Holder<S, F>>>> {
        self.find_item(id)
            .map(|item| Rc::clone(item.host_entry()))
            .ok_or(NavError::EntryNotFound { id })
    }

    /// The entry on top of what is displayed, falling back to the target.
    pub fn current_host_entry(&self) -> NavResult<Rc<NavHostEntry<T, Holder<S, F>>>> {
        self.current
            .as_ref()
            .and_then(NavSnapshot::last)
            .or_else(|| self.target.last())
            .map(|item| Rc::clone(item.host_entry()))
            .ok_or(NavError::EmptyBackstack)
    }

    fn find_item(&self, id: NavId) -> Option<&NavSnapshotItem<T, S, Holder<S, F>>> {
        self.target
            .get(id)
            .or_else(|| self.current.as_ref().and_then(|current| current.get(id)))
    }

    /// Looks up the holder shared under `scope` by the entry `id`.
    pub fn scoped_host_entry(
        &self,
        id: NavId,
        scope: &S,
    ) -> NavResult<Rc<ScopedNavHostEntry<S, Holder<S, F>>>>
    where
        T: fmt::Debug,
    {
        if self.scopes.is_none() {
            return Err(NavError::ScopingDisabled);
        }
        let item = self.find_item(id).ok_or(NavError::EntryNotFound { id })?;
        item.scoped(scope).map(Rc::clone)
    }

    /// Looks up a scope's holder without going through an entry.
    pub fn scope_entry(&self, scope: &S) -> Option<Rc<ScopedNavHostEntry<S, Holder<S, F>>>> {
        self.scopes.as_ref()?.get(scope).map(Rc::clone)
    }
}

impl<T, S, F> Drop for NavHostState<T, S, F>
where
    F: ResourceHolderFactory<S>,
{
    fn drop(&mut self) {
        if !self.config.destroy_on_drop {
            return;
        }
        for (_, entry) in self.host_entries.drain(..) {
            entry.destroy();
        }
        if let Some(scopes) = self.scopes.as_mut() {
            scopes.destroy_all();
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
