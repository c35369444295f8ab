use compose_navigation::{Lifecycle, NavAction};
use compose_navigation_testing::{EventLog, HolderEvent, HolderEventKind, HolderLabel, NavTestRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    First,
    Second,
}

#[test]
fn navigate_returns_new_top() {
    let mut rule = NavTestRule::new([Screen::First]);
    let second = rule.navigate(Screen::Second);
    assert_eq!(rule.top_id(), Some(second));
    assert_eq!(
        rule.state().target_snapshot().action(),
        NavAction::Navigate
    );
    assert_eq!(rule.lifecycle_of(second), Some(Lifecycle::Initializing));
}

#[test]
fn factory_records_creation_in_derivation_order() {
    let rule = NavTestRule::new([Screen::First, Screen::Second]);
    let ids: Vec<_> = rule.state().target_snapshot().ids().collect();
    let events = rule.log().events();
    assert_eq!(
        events,
        vec![
            HolderEvent {
                label: HolderLabel::Entry(ids[0]),
                kind: HolderEventKind::Created,
            },
            HolderEvent {
                label: HolderLabel::Entry(ids[1]),
                kind: HolderEventKind::Created,
            },
        ]
    );
}

#[test]
fn pump_until_settled_stops_on_settled_frame() {
    let mut rule = NavTestRule::new([Screen::First]).with_frames(3);
    assert_eq!(rule.pump_until_settled().len(), 1);

    rule.navigate(Screen::Second);
    let reports = rule.pump_until_settled();
    assert_eq!(reports.len(), 4);
    assert!(reports.last().map_or(false, |report| report.settled));
}

#[test]
fn take_clears_the_log() {
    let rule = NavTestRule::new([Screen::First]);
    assert_eq!(rule.log().take().len(), 1);
    assert!(rule.log().events().is_empty());
}

#[test]
fn dropping_the_rule_destroys_remaining_holders() {
    let rule = NavTestRule::new([Screen::First]);
    let first = rule.top_id().unwrap();
    let log: EventLog = rule.log().clone();
    drop(rule);
    assert_eq!(
        log.entry_kinds(first),
        vec![HolderEventKind::Created, HolderEventKind::Destroyed]
    );
}
