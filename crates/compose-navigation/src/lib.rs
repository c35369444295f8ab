#![doc = r"Backstack navigation for Compose-RS: per-entry resource holders and the NavHost state machine that decides when they live and die."]

pub mod collections;
pub mod controller;
pub mod entry;
pub mod error;
pub mod hash;
pub mod host;
pub mod host_entry;
pub mod id;
pub mod resources;
pub mod scope;
pub mod snapshot;
pub mod state;
pub mod transition;

pub use controller::{NavAction, NavBackstack, NavController};
pub use entry::{nav_entry, NavEntry};
pub use error::{NavError, NavResult};
pub use host::{FrameReport, NavHost};
pub use host_entry::{NavHostEntry, ScopedNavHostEntry};
pub use id::NavId;
pub use resources::{
    EntryResources, EntryResourcesFactory, HolderOwner, Lifecycle, ResourceHolder,
    ResourceHolderFactory,
};
pub use scope::{EmptyScopeSpec, NavScopeSpec, NoScope};
pub use snapshot::{NavSnapshot, NavSnapshotItem};
pub use state::{NavHostConfig, NavHostState};
pub use transition::{FrameTransition, InstantTransition, NavTransition};

pub mod prelude {
    pub use crate::{
        nav_entry, EntryResources, EntryResourcesFactory, FrameTransition, InstantTransition,
        Lifecycle, NavAction, NavController, NavEntry, NavHost, NavHostState, NavId,
        NavScopeSpec, NavSnapshot,
    };
}
