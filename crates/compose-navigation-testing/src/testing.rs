use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use compose_navigation::{
    FrameReport, FrameTransition, HolderOwner, Lifecycle, NavController, NavHost, NavHostState,
    NavId, NavScopeSpec, NavSnapshot, NoScope, ResourceHolder, ResourceHolderFactory,
};

/// Who a recorded holder belongs to. Scopes are identified by their `Debug`
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HolderLabel {
    Entry(NavId),
    Scope(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolderEventKind {
    Created,
    Activated,
    Deactivated,
    Destroyed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderEvent {
    pub label: HolderLabel,
    pub kind: HolderEventKind,
}

/// Shared, append-only log of holder events.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<HolderEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, label: &HolderLabel, kind: HolderEventKind) {
        log::trace!("{label:?}: {kind:?}");
        self.events.borrow_mut().push(HolderEvent {
            label: label.clone(),
            kind,
        });
    }

    pub fn events(&self) -> Vec<HolderEvent> {
        self.events.borrow().clone()
    }

    /// Returns and clears everything recorded so far.
    pub fn take(&self) -> Vec<HolderEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Event kinds recorded for `label`, in order.
    pub fn kinds_for(&self, label: &HolderLabel) -> Vec<HolderEventKind> {
        self.events
            .borrow()
            .iter()
            .filter(|event| &event.label == label)
            .map(|event| event.kind)
            .collect()
    }

    pub fn entry_kinds(&self, id: NavId) -> Vec<HolderEventKind> {
        self.kinds_for(&HolderLabel::Entry(id))
    }

    pub fn count(&self, label: &HolderLabel, kind: HolderEventKind) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| &event.label == label && event.kind == kind)
            .count()
    }
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.events.borrow().iter()).finish()
    }
}

/// Resource holder that records every call it receives, repeats included.
#[derive(Debug)]
pub struct RecordingHolder {
    label: HolderLabel,
    log: EventLog,
}

impl RecordingHolder {
    pub fn label(&self) -> &HolderLabel {
        &self.label
    }
}

impl ResourceHolder for RecordingHolder {
    fn activate(&mut self) {
        self.log.record(&self.label, HolderEventKind::Activated);
    }

    fn deactivate(&mut self) {
        self.log.record(&self.label, HolderEventKind::Deactivated);
    }

    fn destroy(&mut self) {
        self.log.record(&self.label, HolderEventKind::Destroyed);
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    log: EventLog,
}

impl RecordingFactory {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }
}

impl<S: fmt::Debug> ResourceHolderFactory<S> for RecordingFactory {
    type Holder = RecordingHolder;

    fn create(&mut self, owner: HolderOwner<'_, S>) -> RecordingHolder {
        let label = match owner {
            HolderOwner::Entry(id) => HolderLabel::Entry(id),
            HolderOwner::Scope(scope) => HolderLabel::Scope(format!("{scope:?}")),
        };
        self.log.record(&label, HolderEventKind::Created);
        RecordingHolder {
            label,
            log: self.log.clone(),
        }
    }
}

pub type RecordingHost<T, S> = NavHost<T, S, RecordingFactory>;
pub type RecordingSnapshot<T, S> = NavSnapshot<T, S, RecordingHolder>;

/// Headless harness for driving a [`NavHost`] frame by frame.
///
/// `NavTestRule` owns the host, a [`FrameTransition`] standing in for the
/// animated render layer and the [`EventLog`] every holder writes to. With the
/// default of zero frames each change settles on the next frame.
pub struct NavTestRule<T, S = NoScope>
where
    S: fmt::Debug,
{
    host: RecordingHost<T, S>,
    transition: FrameTransition<T, S, RecordingHolder>,
    log: EventLog,
}

impl<T: Clone> NavTestRule<T, NoScope> {
    pub fn new(initial: impl IntoIterator<Item = T>) -> Self {
        let log = EventLog::new();
        let state = NavHostState::new(
            NavController::new(initial),
            RecordingFactory::new(log.clone()),
        );
        Self::from_parts(NavHost::new(state), log)
    }
}

impl<T, S> NavTestRule<T, S>
where
    T: Clone,
    S: Eq + Hash + Clone + fmt::Debug,
{
    pub fn with_scope_spec(
        initial: impl IntoIterator<Item = T>,
        scope_spec: impl NavScopeSpec<T, S> + 'static,
    ) -> Self {
        let log = EventLog::new();
        let state = NavHostState::with_scope_spec(
            NavController::new(initial),
            scope_spec,
            RecordingFactory::new(log.clone()),
        );
        Self::from_parts(NavHost::new(state), log)
    }

    fn from_parts(host: RecordingHost<T, S>, log: EventLog) -> Self {
        Self {
            host,
            transition: FrameTransition::new(0),
            log,
        }
    }

    /// Number of frames every transition keeps showing the old snapshot.
    pub fn with_frames(mut self, frames: usize) -> Self {
        self.transition.set_frames(frames);
        self
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn host(&self) -> &RecordingHost<T, S> {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut RecordingHost<T, S> {
        &mut self.host
    }

    pub fn state(&self) -> &NavHostState<T, S, RecordingFactory> {
        self.host.state()
    }

    pub fn update_backstack<R>(&mut self, update: impl FnOnce(&mut NavController<T>) -> R) -> R {
        self.host.update_backstack(update)
    }

    /// Pushes `destination` and returns the id of the new entry.
    pub fn navigate(&mut self, destination: T) -> NavId {
        self.host.update_backstack(|controller| {
            controller.navigate(destination);
            controller
                .backstack()
                .last()
                .map(|entry| entry.id())
                .expect("navigate leaves a top entry")
        })
    }

    pub fn pop(&mut self) -> bool {
        self.host.update_backstack(|controller| controller.pop())
    }

    pub fn top_id(&self) -> Option<NavId> {
        self.state().target_snapshot().last_id()
    }

    /// Lifecycle of `id`, or `None` once it is no longer part of a snapshot.
    pub fn lifecycle_of(&self, id: NavId) -> Option<Lifecycle> {
        self.state().host_entry(id).ok().map(|entry| entry.lifecycle())
    }

    /// Runs a single frame.
    pub fn advance_frame(&mut self) -> FrameReport {
        self.host.frame_with_report(&mut self.transition).1
    }

    /// Runs frames until the displayed snapshot equals the target. Gives up
    /// after enough frames for any transition to finish.
    pub fn pump_until_settled(&mut self) -> Vec<FrameReport> {
        let limit = self.transition.frames() + 2;
        let mut reports = Vec::new();
        for _ in 0..limit {
            let report = self.advance_frame();
            let settled = report.settled;
            reports.push(report);
            if settled {
                break;
            }
        }
        reports
    }

    pub fn dispose(&mut self) -> Vec<NavId> {
        self.host.dispose()
    }
}
