use std::sync::Once;

use pretty_assertions::assert_eq;
use rollcall_core::{update, AppState, Effect, Msg, OverlapPolicy, Participant};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(rollcall_logging::initialize_for_tests);
}

fn completed(state: AppState, participants: Vec<Participant>) -> AppState {
    let (state, effects) = update(
        state,
        Msg::ScrapeCompleted {
            participants,
            checked_at: Some("12:00:00".to_string()),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn roster_load_starts_polling_and_checks_immediately() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::RosterLoaded(vec!["Alice".into()]));

    assert_eq!(effects, vec![Effect::StartPolling, Effect::RequestScrape]);
    assert_eq!(state.scrapes_in_flight(), 1);
    assert!(!state.view().loading);
}

#[test]
fn ticks_before_load_do_nothing() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::PollTick);
    assert!(effects.is_empty());

    let (_state, effects) = update(state, Msg::CheckClicked);
    assert!(effects.is_empty());
}

#[test]
fn tick_is_skipped_while_request_in_flight() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RosterLoaded(Vec::new()));

    let (state, effects) = update(state, Msg::PollTick);
    assert!(effects.is_empty());
    assert_eq!(state.scrapes_in_flight(), 1);

    let state = completed(state, Vec::new());
    assert_eq!(state.scrapes_in_flight(), 0);

    let (state, effects) = update(state, Msg::PollTick);
    assert_eq!(effects, vec![Effect::RequestScrape]);
    assert_eq!(state.scrapes_in_flight(), 1);
}

#[test]
fn allow_overlap_issues_every_tick() {
    init_logging();
    let state = AppState::with_overlap_policy(OverlapPolicy::AllowOverlap);
    let (state, _) = update(state, Msg::RosterLoaded(Vec::new()));

    let (state, effects) = update(state, Msg::PollTick);
    assert_eq!(effects, vec![Effect::RequestScrape]);
    let (state, effects) = update(state, Msg::CheckClicked);
    assert_eq!(effects, vec![Effect::RequestScrape]);
    assert_eq!(state.scrapes_in_flight(), 3);
    assert!(state.view().scrape_in_flight);
}

#[test]
fn failed_scrape_keeps_last_known_participants() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RosterLoaded(vec!["Alice".into()]));
    let state = completed(state, vec![Participant::new("Alice")]);
    let (state, _) = update(state, Msg::PollTick);

    let (mut state, effects) = update(state, Msg::ScrapeFailed("No active tab".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.scrapes_in_flight(), 0);
    let view = state.view();
    assert_eq!(view.present_count, 1);
    assert_eq!(view.participant_count, Some(1));
    assert_eq!(view.last_error.as_deref(), Some("No active tab"));
    assert_eq!(view.last_checked_at.as_deref(), Some("12:00:00"));
    assert!(state.consume_dirty());
}

#[test]
fn success_clears_previous_error() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RosterLoaded(Vec::new()));
    let (state, _) = update(state, Msg::ScrapeFailed("boom".to_string()));
    let (state, _) = update(state, Msg::PollTick);
    let state = completed(state, Vec::new());

    assert_eq!(state.view().last_error, None);
    assert_eq!(state.view().participant_count, Some(0));
}

#[test]
fn checking_marker_renders_on_start_and_finish() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RosterLoaded(Vec::new()));
    let (mut state, _) = update(state, Msg::ScrapeFailed("boom".to_string()));
    assert!(state.consume_dirty());
    assert!(!state.view().scrape_in_flight);

    let (mut state, _) = update(state, Msg::PollTick);
    assert!(state.consume_dirty());
    assert!(state.view().scrape_in_flight);

    // Same error again, but the marker has to go away.
    let (mut state, _) = update(state, Msg::ScrapeFailed("boom".to_string()));
    assert!(state.consume_dirty());
    assert!(!state.view().scrape_in_flight);
}

#[test]
fn stray_identical_failure_does_not_rerender() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RosterLoaded(Vec::new()));
    let (mut state, _) = update(state, Msg::ScrapeFailed("boom".to_string()));
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::ScrapeFailed("boom".to_string()));
    assert!(!state.consume_dirty());
}

#[test]
fn unanswered_request_holds_up_only_one_tick() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::RosterLoaded(Vec::new()));

    let mut requests = 0;
    for _ in 0..100 {
        let (next, effects) = update(state, Msg::PollTick);
        state = next;
        requests += effects
            .iter()
            .filter(|e| **e == Effect::RequestScrape)
            .count();
    }

    assert_eq!(requests, 50);
    assert_eq!(state.scrapes_in_flight(), 1);
}

#[test]
fn late_answer_from_stale_request_is_applied() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RosterLoaded(vec!["Alice".into()]));
    let (state, skipped) = update(state, Msg::PollTick);
    assert!(skipped.is_empty());
    let (state, effects) = update(state, Msg::PollTick);
    assert_eq!(effects, vec![Effect::RequestScrape]);

    let state = completed(state, vec![Participant::new("Alice")]);
    assert_eq!(state.view().present_count, 1);
    assert_eq!(state.scrapes_in_flight(), 0);

    let (_state, effects) = update(state, Msg::PollTick);
    assert_eq!(effects, vec![Effect::RequestScrape]);
}

#[test]
fn second_roster_load_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RosterLoaded(vec!["Alice".into()]));
    let (state, effects) = update(state, Msg::RosterLoaded(vec!["Mallory".into()]));

    assert!(effects.is_empty());
    assert_eq!(state.roster().names(), &["Alice".to_string()]);
}
