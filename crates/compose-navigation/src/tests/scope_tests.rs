use super::*;
use crate::{
    EntryResourcesFactory, Lifecycle, NavController, NavError, NavHostState, NavId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Flow {
    Checkout,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Home,
    Cart,
    Payment,
    Account,
}

struct FlowSpec;

impl NavScopeSpec<Screen, Flow> for FlowSpec {
    fn destination_scopes(&self, destination: &Screen) -> HashSet<Flow> {
        match destination {
            Screen::Home => HashSet::default(),
            Screen::Cart | Screen::Payment => [Flow::Checkout].into_iter().collect(),
            Screen::Account => [Flow::Profile, Flow::Checkout].into_iter().collect(),
        }
    }
}

type ScopedState = NavHostState<Screen, Flow, EntryResourcesFactory>;

fn scoped_state(screens: impl IntoIterator<Item = Screen>) -> ScopedState {
    NavHostState::with_scope_spec(NavController::new(screens), FlowSpec, EntryResourcesFactory)
}

fn settle(state: &mut ScopedState) {
    state.report_current_snapshot(state.target_snapshot().clone());
}

fn id_at(state: &ScopedState, index: usize) -> NavId {
    state.target_snapshot().items()[index].id()
}

#[test]
fn scoped_entry_is_shared_between_destinations() {
    let state = scoped_state([Screen::Home, Screen::Cart, Screen::Payment]);
    let cart = state.scoped_host_entry(id_at(&state, 1), &Flow::Checkout).unwrap();
    let payment = state.scoped_host_entry(id_at(&state, 2), &Flow::Checkout).unwrap();
    assert!(Rc::ptr_eq(&cart, &payment));
    assert_eq!(state.scoped_entry_count(), 1);
    assert_eq!(cart.lifecycle(), Lifecycle::Initializing);
}

#[test]
fn snapshot_items_carry_their_scopes() {
    let state = scoped_state([Screen::Home, Screen::Account]);
    let items = state.target_snapshot().items();
    assert!(items[0].scoped_host_entries().is_empty());
    assert_eq!(items[1].scoped_host_entries().len(), 2);
    assert!(items[1].scoped(&Flow::Profile).is_ok());
}

#[test]
fn unassociated_scope_is_a_configuration_error() {
    let state = scoped_state([Screen::Home, Screen::Cart]);
    let err = state
        .scoped_host_entry(id_at(&state, 1), &Flow::Profile)
        .unwrap_err();
    assert_eq!(
        err,
        NavError::ScopeNotAssociated {
            scope: "Profile".to_string(),
            destination: "Cart".to_string(),
        }
    );
    let message = err.to_string();
    assert!(message.contains("Profile"));
    assert!(message.contains("Cart"));
}

#[test]
fn scoped_lookup_for_unknown_entry_fails() {
    let state = scoped_state([Screen::Cart]);
    let stranger = NavId::new();
    assert_eq!(
        state.scoped_host_entry(stranger, &Flow::Checkout).unwrap_err(),
        NavError::EntryNotFound { id: stranger }
    );
}

#[test]
fn unscoped_host_reports_scoping_disabled() {
    let state: ScopedState =
        NavHostState::unscoped(NavController::new([Screen::Cart]), EntryResourcesFactory);
    assert_eq!(
        state
            .scoped_host_entry(id_at(&state, 0), &Flow::Checkout)
            .unwrap_err(),
        NavError::ScopingDisabled
    );
    assert_eq!(state.scoped_entry_count(), 0);
}

#[test]
fn empty_scope_spec_maps_nothing() {
    let state: ScopedState = NavHostState::with_scope_spec(
        NavController::new([Screen::Cart]),
        EmptyScopeSpec,
        EntryResourcesFactory,
    );
    assert!(matches!(
        state.scoped_host_entry(id_at(&state, 0), &Flow::Checkout),
        Err(NavError::ScopeNotAssociated { .. })
    ));
}

#[test]
fn reference_counts_follow_relevant_entries() {
    let mut state = scoped_state([Screen::Home, Screen::Cart, Screen::Payment, Screen::Account]);
    settle(&mut state);
    state.remove_outdated_host_entries();
    assert_eq!(state.scope_ref_count(&Flow::Checkout), 3);
    assert_eq!(state.scope_ref_count(&Flow::Profile), 1);

    state.update_backstack(|controller| controller.pop());
    settle(&mut state);
    state.remove_outdated_host_entries();
    assert_eq!(state.scope_ref_count(&Flow::Checkout), 2);
    assert_eq!(state.scope_ref_count(&Flow::Profile), 0);
    assert!(state.scope_entry(&Flow::Profile).is_none());
    assert!(state.scope_entry(&Flow::Checkout).is_some());
}

#[test]
fn scope_survives_until_transition_settles() {
    let mut state = scoped_state([Screen::Home, Screen::Cart]);
    state.on_create();
    settle(&mut state);
    let checkout = state.scope_entry(&Flow::Checkout).unwrap();

    state.update_backstack(|controller| controller.pop());
    state.on_transition_start();
    state.remove_outdated_host_entries();
    assert_eq!(checkout.lifecycle(), Lifecycle::Active);
    assert_eq!(state.scope_ref_count(&Flow::Checkout), 1);

    settle(&mut state);
    state.remove_outdated_host_entries();
    assert_eq!(checkout.lifecycle(), Lifecycle::Destroyed);
    assert_eq!(checkout.holder().destroy_calls(), 1);
    assert_eq!(state.scoped_entry_count(), 0);
}

#[test]
fn scope_is_recreated_after_release() {
    let mut state = scoped_state([Screen::Home, Screen::Cart]);
    let first = state.scope_entry(&Flow::Checkout).unwrap();
    state.update_backstack(|controller| controller.pop());
    settle(&mut state);
    state.remove_outdated_host_entries();

    state.update_backstack(|controller| controller.navigate(Screen::Payment));
    let second = state.scope_entry(&Flow::Checkout).unwrap();
    assert!(!Rc::ptr_eq(&first, &second));
    assert_eq!(second.lifecycle(), Lifecycle::Initializing);
}

#[test]
fn scoped_holder_keeps_shared_view_model() {
    let state = scoped_state([Screen::Cart, Screen::Payment]);
    let cart = state.scoped_host_entry(id_at(&state, 0), &Flow::Checkout).unwrap();
    *cart.holder_mut().view_model(|| 0u32).unwrap() = 7;

    let payment = state.scoped_host_entry(id_at(&state, 1), &Flow::Checkout).unwrap();
    assert_eq!(payment.holder_mut().view_model(|| 0u32).copied(), Some(7));
}

#[test]
fn drop_destroys_scoped_holders() {
    let state = scoped_state([Screen::Account]);
    let profile = state.scope_entry(&Flow::Profile).unwrap();
    drop(state);
    assert_eq!(profile.lifecycle(), Lifecycle::Destroyed);
}

#[test]
fn scoped_holders_follow_host_lifecycle() {
    let mut state = scoped_state([Screen::Home, Screen::Cart]);
    let checkout = state.scope_entry(&Flow::Checkout).unwrap();
    assert_eq!(checkout.lifecycle(), Lifecycle::Initializing);

    state.on_create();
    assert_eq!(checkout.lifecycle(), Lifecycle::Active);
    assert_eq!(checkout.holder().lifecycle(), Lifecycle::Active);

    state.on_dispose();
    assert_eq!(checkout.lifecycle(), Lifecycle::Inactive);
    assert_eq!(checkout.holder().lifecycle(), Lifecycle::Inactive);

    state.on_create();
    assert_eq!(checkout.lifecycle(), Lifecycle::Active);
}

#[test]
fn scope_created_while_host_is_created_starts_active() {
    let mut state = scoped_state([Screen::Home]);
    state.on_create();
    state.update_backstack(|controller| controller.navigate(Screen::Account));

    let profile = state.scope_entry(&Flow::Profile).unwrap();
    assert_eq!(profile.lifecycle(), Lifecycle::Active);

    state.on_dispose();
    state.update_backstack(|controller| controller.navigate(Screen::Cart));
    assert_eq!(profile.lifecycle(), Lifecycle::Inactive);
}

#[test]
fn new_scope_reports_count_before_first_prune() {
    let mut state = scoped_state([Screen::Home]);
    assert_eq!(state.scope_ref_count(&Flow::Checkout), 0);

    state.update_backstack(|controller| controller.navigate(Screen::Cart));
    state.update_backstack(|controller| controller.navigate(Screen::Payment));
    assert!(state.scope_entry(&Flow::Checkout).is_some());
    assert_eq!(state.scope_ref_count(&Flow::Checkout), 2);

    state.update_backstack(|controller| controller.pop());
    assert_eq!(state.scope_ref_count(&Flow::Checkout), 2);
    settle(&mut state);
    state.remove_outdated_host_entries();
    assert_eq!(state.scope_ref_count(&Flow::Checkout), 1);
}
