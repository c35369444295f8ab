//! Explicit render-cycle driver for a [`NavHostState`].
//!
//! [`NavHost::frame`] is called once per frame. It runs `on_create` the first
//! time, asks the transition for the displayed snapshot and then compares it
//! with the target to decide which hooks to fire:
//!
//! 1. target top changed since the last frame: `on_transition_start`;
//! 2. a start (or a new displayed top) is pending and the displayed top equals
//!    the target top: `on_transition_finish`;
//! 3. displayed entries equal target entries: `remove_outdated_host_entries`.
//!
//! Each comparison only looks at the latest snapshots, so a backstack that
//! changes again before the previous transition settled simply re-targets it.

use std::fmt;
use std::hash::Hash;

use crate::resources::ResourceHolderFactory;
use crate::snapshot::NavSnapshot;
use crate::state::NavHostState;
use crate::transition::NavTransition;
use crate::{NavController, NavId};

type Holder<S, F> = <F as ResourceHolderFactory<S>>::Holder;

/// What happened during one [`NavHost::frame`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub created: bool,
    pub transition_started: bool,
    pub transition_finished: bool,
    /// `true` when the displayed entries equal the target entries.
    pub settled: bool,
    pub removed: Vec<NavId>,
}

pub struct NavHost<T, S, F>
where
    F: ResourceHolderFactory<S>,
{
    state: NavHostState<T, S, F>,
    active: bool,
    target_top: Option<NavId>,
    current_key: Option<u64>,
    current_top: Option<NavId>,
    finish_pending: bool,
}

impl<T, S, F> NavHost<T, S, F>
where
    T: Clone,
    S: Eq + Hash + Clone + fmt::Debug,
    F: ResourceHolderFactory<S>,
{
    pub fn new(state: NavHostState<T, S, F>) -> Self {
        Self {
            state,
            active: false,
            target_top: None,
            current_key: None,
            current_top: None,
            finish_pending: false,
        }
    }

    pub fn state(&self) -> &NavHostState<T, S, F> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut NavHostState<T, S, F> {
        &mut self.state
    }

    pub fn into_state(self) -> NavHostState<T, S, F> {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn update_backstack<R>(&mut self, update: impl FnOnce(&mut NavController<T>) -> R) -> R {
        self.state.update_backstack(update)
    }

    /// Runs one render cycle and returns the displayed snapshot.
    pub fn frame(
        &mut self,
        transition: &mut impl NavTransition<T, S, Holder<S, F>>,
    ) -> NavSnapshot<T, S, Holder<S, F>> {
        self.frame_with_report(transition).0
    }

    pub fn frame_with_report(
        &mut self,
        transition: &mut impl NavTransition<T, S, Holder<S, F>>,
    ) -> (NavSnapshot<T, S, Holder<S, F>>, FrameReport) {
        let mut report = FrameReport::default();
        let target = self.state.target_snapshot().clone();

        if !self.active {
            self.state.on_create();
            self.active = true;
            self.target_top = target.last_id();
            self.current_key = None;
            self.finish_pending = true;
            report.created = true;
        }

        let current = transition.transition(&target);
        self.state.report_current_snapshot(current.clone());

        if target.last_id() != self.target_top {
            self.target_top = target.last_id();
            self.state.on_transition_start();
            self.finish_pending = true;
            report.transition_started = true;
        }

        let current_key = current.fingerprint();
        if self.current_key != Some(current_key) || current.last_id() != self.current_top {
            self.current_key = Some(current_key);
            self.current_top = current.last_id();
            self.finish_pending = true;
        }
        if self.finish_pending && current.last_id() == target.last_id() {
            self.finish_pending = false;
            self.state.on_transition_finish();
            report.transition_finished = true;
        }

        if current == target {
            report.settled = true;
            report.removed = self.state.remove_outdated_host_entries();
        }

        (current, report)
    }

    /// The host stops operating: deactivates every entry and prunes whatever
    /// is no longer referenced. A later frame creates the host again.
    pub fn dispose(&mut self) -> Vec<NavId> {
        if !self.active {
            return Vec::new();
        }
        self.active = false;
        self.state.on_dispose();
        self.state.remove_outdated_host_entries()
    }
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod tests;
