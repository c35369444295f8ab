//! Resource holders: the opaque per-entry (or per-scope) bundles whose
//! lifetime the host manages.
//!
//! The host only ever calls [`ResourceHolder::activate`],
//! [`ResourceHolder::deactivate`] and [`ResourceHolder::destroy`], and it never
//! calls `destroy` twice on the same holder. Implementations must still treat
//! a repeated `destroy` as a no-op.
//!
//! [`EntryResources`] is a ready-made holder with a saved-state slot and a
//! view-model store, enough for hosts that do not bring their own.

use std::any::{Any, TypeId};
use std::fmt;

use crate::collections::map::HashMap;
use crate::NavId;

/// Lifecycle of a host entry's resource holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    /// Created but never shown.
    #[default]
    Initializing,
    /// Part of the backstack of a created host and not superseded since.
    Active,
    /// Superseded, or the host is disposed. Still alive.
    Inactive,
    /// Released. Terminal.
    Destroyed,
}

impl Lifecycle {
    pub fn is_destroyed(self) -> bool {
        matches!(self, Lifecycle::Destroyed)
    }
}

/// What a resource holder is being created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolderOwner<'a, S> {
    Entry(NavId),
    Scope(&'a S),
}

pub trait ResourceHolder {
    fn activate(&mut self);

    fn deactivate(&mut self);

    /// Releases everything the holder owns. Calling it again must do nothing.
    fn destroy(&mut self);
}

/// Creates resource holders for host entries and scoped entries.
pub trait ResourceHolderFactory<S> {
    type Holder: ResourceHolder;

    fn create(&mut self, owner: HolderOwner<'_, S>) -> Self::Holder;
}

/// Default holder: lifecycle, saved-state slot and view-model store.
#[derive(Default)]
pub struct EntryResources {
    lifecycle: Lifecycle,
    saved_state: HashMap<String, Box<dyn Any>>,
    view_models: HashMap<TypeId, Box<dyn Any>>,
    #[cfg(test)]
    destroy_calls: usize,
}

impl EntryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Number of times `destroy` was called, including ignored repeats.
    #[cfg(test)]
    pub(crate) fn destroy_calls(&self) -> usize {
        self.destroy_calls
    }

    /// Stores a value under `key`. Ignored once destroyed.
    pub fn save<V: Any>(&mut self, key: impl Into<String>, value: V) {
        if self.lifecycle.is_destroyed() {
            log::warn!("save into destroyed resources ignored");
            return;
        }
        self.saved_state.insert(key.into(), Box::new(value));
    }

    pub fn restore<V: Any>(&self, key: &str) -> Option<&V> {
        self.saved_state.get(key)?.downcast_ref::<V>()
    }

    /// Returns the view model of type `V`, creating it on first access.
    ///
    /// Returns `None` after the holder was destroyed.
    pub fn view_model<V: Any>(&mut self, init: impl FnOnce() -> V) -> Option<&mut V> {
        if self.lifecycle.is_destroyed() {
            return None;
        }
        self.view_models
            .entry(TypeId::of::<V>())
            .or_insert_with(|| Box::new(init()) as Box<dyn Any>)
            .downcast_mut::<V>()
    }

    pub fn has_view_model<V: Any>(&self) -> bool {
        self.view_models.contains_key(&TypeId::of::<V>())
    }
}

impl fmt::Debug for EntryResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryResources")
            .field("lifecycle", &self.lifecycle)
            .field("saved_state", &self.saved_state.len())
            .field("view_models", &self.view_models.len())
            .finish()
    }
}

impl ResourceHolder for EntryResources {
    fn activate(&mut self) {
        if !self.lifecycle.is_destroyed() {
            self.lifecycle = Lifecycle::Active;
        }
    }

    fn deactivate(&mut self) {
        if !self.lifecycle.is_destroyed() {
            self.lifecycle = Lifecycle::Inactive;
        }
    }

    fn destroy(&mut self) {
        #[cfg(test)]
        {
            self.destroy_calls += 1;
        }
        if self.lifecycle.is_destroyed() {
            return;
        }
        self.lifecycle = Lifecycle::Destroyed;
        self.saved_state.clear();
        self.view_models.clear();
    }
}

/// Factory producing [`EntryResources`] for every owner.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntryResourcesFactory;

impl<S> ResourceHolderFactory<S> for EntryResourcesFactory {
    type Holder = EntryResources;

    fn create(&mut self, _owner: HolderOwner<'_, S>) -> EntryResources {
        EntryResources::new()
    }
}
