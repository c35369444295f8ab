use super::*;
use crate::{EntryResources, EntryResourcesFactory, NavController, NavHostState, NoScope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    A,
    B,
    C,
}

type Snapshot = NavSnapshot<Screen, NoScope, EntryResources>;

fn snapshots() -> (NavHostState<Screen, NoScope, EntryResourcesFactory>, Snapshot, Snapshot) {
    let mut state = NavHostState::new(NavController::new([Screen::A]), EntryResourcesFactory);
    let first = state.target_snapshot().clone();
    state.update_backstack(|controller| controller.navigate(Screen::B));
    let second = state.target_snapshot().clone();
    (state, first, second)
}

#[test]
fn instant_transition_returns_target() {
    let (_state, first, _) = snapshots();
    let current = InstantTransition.transition(&first);
    assert_eq!(current, first);
}

#[test]
fn first_frame_is_settled() {
    let (_state, first, _) = snapshots();
    let mut transition = FrameTransition::new(5);
    assert_eq!(transition.transition(&first), first);
    assert!(!transition.is_running());
}

#[test]
fn holds_previous_snapshot_for_configured_frames() {
    let (_state, first, second) = snapshots();
    let mut transition = FrameTransition::new(2);
    transition.transition(&first);

    assert_eq!(transition.transition(&second), first);
    assert!(transition.is_running());
    assert_eq!(transition.transition(&second), first);
    assert_eq!(transition.transition(&second), second);
    assert!(!transition.is_running());
    assert_eq!(transition.transition(&second), second);
}

#[test]
fn zero_frames_settles_immediately() {
    let (_state, first, second) = snapshots();
    let mut transition = FrameTransition::new(0);
    transition.transition(&first);
    assert_eq!(transition.transition(&second), second);
}

#[test]
fn new_target_restarts_the_count() {
    let (mut state, first, second) = snapshots();
    state.update_backstack(|controller| controller.navigate(Screen::C));
    let third = state.target_snapshot().clone();

    let mut transition = FrameTransition::new(1);
    transition.transition(&first);
    assert_eq!(transition.transition(&second), first);
    assert_eq!(transition.transition(&third), first);
    assert_eq!(transition.transition(&third), third);
}

#[test]
fn returning_to_displayed_target_cancels() {
    let (_state, first, second) = snapshots();
    let mut transition = FrameTransition::new(3);
    transition.transition(&first);
    transition.transition(&second);
    assert_eq!(transition.transition(&first), first);
    assert!(!transition.is_running());
}

#[test]
fn finish_now_settles_on_next_frame() {
    let (_state, first, second) = snapshots();
    let mut transition = FrameTransition::new(10);
    transition.transition(&first);
    transition.transition(&second);
    transition.finish_now();
    assert_eq!(transition.transition(&second), second);
}
