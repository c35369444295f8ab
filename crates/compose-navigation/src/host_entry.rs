use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;

use crate::resources::{Lifecycle, ResourceHolder};
use crate::NavId;

/// Lifecycle bookkeeping around a resource holder. The holder only sees calls
/// that actually change the lifecycle, so `destroy` reaches it at most once.
struct HolderCell<H> {
    lifecycle: Cell<Lifecycle>,
    holder: RefCell<H>,
}

impl<H: ResourceHolder> HolderCell<H> {
    fn new(holder: H) -> Self {
        Self {
            lifecycle: Cell::new(Lifecycle::Initializing),
            holder: RefCell::new(holder),
        }
    }

    fn activate(&self) -> bool {
        match self.lifecycle.get() {
            Lifecycle::Active | Lifecycle::Destroyed => false,
            Lifecycle::Initializing | Lifecycle::Inactive => {
                self.lifecycle.set(Lifecycle::Active);
                self.holder.borrow_mut().activate();
                true
            }
        }
    }

    fn deactivate(&self) -> bool {
        if self.lifecycle.get() != Lifecycle::Active {
            return false;
        }
        self.lifecycle.set(Lifecycle::Inactive);
        self.holder.borrow_mut().deactivate();
        true
    }

    fn destroy(&self) -> bool {
        if self.lifecycle.replace(Lifecycle::Destroyed).is_destroyed() {
            return false;
        }
        self.holder.borrow_mut().destroy();
        true
    }
}

/// Host side of one backstack entry: the entry's identity and destination plus
/// the resource holder owned on its behalf.
pub struct NavHostEntry<T, H> {
    id: NavId,
    destination: T,
    cell: HolderCell<H>,
}

impl<T, H: ResourceHolder> NavHostEntry<T, H> {
    pub(crate) fn new(id: NavId, destination: T, holder: H) -> Self {
        Self {
            id,
            destination,
            cell: HolderCell::new(holder),
        }
    }

    pub(crate) fn activate(&self) {
        if self.cell.activate() {
            log::trace!("{} -> Active", self.id);
        }
    }

    pub(crate) fn deactivate(&self) {
        if self.cell.deactivate() {
            log::trace!("{} -> Inactive", self.id);
        }
    }

    pub(crate) fn destroy(&self) {
        if self.cell.destroy() {
            log::debug!("{} destroyed", self.id);
        }
    }
}

impl<T, H> NavHostEntry<T, H> {
    #[inline]
    pub fn id(&self) -> NavId {
        self.id
    }

    #[inline]
    pub fn destination(&self) -> &T {
        &self.destination
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.cell.lifecycle.get()
    }

    /// Borrows the resource holder.
    ///
    /// Panics if the holder is mutably borrowed, like any `RefCell`.
    pub fn holder(&self) -> Ref<'_, H> {
        self.cell.holder.borrow()
    }

    pub fn holder_mut(&self) -> RefMut<'_, H> {
        self.cell.holder.borrow_mut()
    }
}

impl<T: fmt::Debug, H> fmt::Debug for NavHostEntry<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavHostEntry")
            .field("id", &self.id)
            .field("destination", &self.destination)
            .field("lifecycle", &self.lifecycle())
            .finish()
    }
}

/// Resource holder shared by every relevant entry whose destination maps to
/// `scope`.
pub struct ScopedNavHostEntry<S, H> {
    scope: S,
    cell: HolderCell<H>,
}

impl<S, H: ResourceHolder> ScopedNavHostEntry<S, H> {
    pub(crate) fn new(scope: S, holder: H) -> Self {
        Self {
            scope,
            cell: HolderCell::new(holder),
        }
    }

    pub(crate) fn activate(&self) -> bool {
        self.cell.activate()
    }

    pub(crate) fn deactivate(&self) -> bool {
        self.cell.deactivate()
    }

    pub(crate) fn destroy(&self) -> bool {
        self.cell.destroy()
    }
}

impl<S, H> ScopedNavHostEntry<S, H> {
    pub fn scope(&self) -> &S {
        &self.scope
    }

    /// Follows the host: `Active` while it is created, `Inactive` after
    /// dispose, `Destroyed` once no relevant entry maps to the scope.
    pub fn lifecycle(&self) -> Lifecycle {
        self.cell.lifecycle.get()
    }

    pub fn holder(&self) -> Ref<'_, H> {
        self.cell.holder.borrow()
    }

    pub fn holder_mut(&self) -> RefMut<'_, H> {
        self.cell.holder.borrow_mut()
    }
}

impl<S: fmt::Debug, H> fmt::Debug for ScopedNavHostEntry<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedNavHostEntry")
            .field("scope", &self.scope)
            .field("lifecycle", &self.lifecycle())
            .finish()
    }
}
