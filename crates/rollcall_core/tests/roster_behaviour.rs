use std::sync::Once;

use pretty_assertions::assert_eq;
use rollcall_core::{update, AppState, Effect, Msg};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(rollcall_logging::initialize_for_tests);
}

fn loaded(names: &[&str]) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::RosterLoaded(names.iter().map(|n| n.to_string()).collect()),
    );
    state
}

fn add_name(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::AddClicked)
}

#[test]
fn add_trims_and_persists() {
    init_logging();
    let (mut state, effects) = add_name(loaded(&[]), "  Alice  ");

    assert_eq!(state.roster().names(), &["Alice".to_string()]);
    assert_eq!(effects, vec![Effect::SaveRoster(vec!["Alice".to_string()])]);
    assert_eq!(state.view().input, "");
    assert!(state.consume_dirty());
}

#[test]
fn add_is_idempotent_for_same_trimmed_name() {
    init_logging();
    let (state, _) = add_name(loaded(&[]), "Bob");
    let (state, effects) = add_name(state, " Bob ");

    assert_eq!(state.roster().len(), 1);
    assert!(effects.is_empty());
    // Rejected input stays in the box.
    assert_eq!(state.view().input, " Bob ");
}

#[test]
fn add_ignores_blank_input() {
    init_logging();
    let (state, effects) = add_name(loaded(&["Alice"]), "   \t ");

    assert_eq!(state.roster().len(), 1);
    assert!(effects.is_empty());
}

#[test]
fn add_is_case_sensitive() {
    init_logging();
    let (state, _) = add_name(loaded(&["Alice"]), "alice");

    assert_eq!(
        state.roster().names(),
        &["Alice".to_string(), "alice".to_string()]
    );
}

#[test]
fn remove_deletes_and_persists() {
    init_logging();
    let (state, effects) = update(
        loaded(&["Alice", "Bob"]),
        Msg::DeleteClicked("Alice".to_string()),
    );

    assert_eq!(state.roster().names(), &["Bob".to_string()]);
    assert_eq!(effects, vec![Effect::SaveRoster(vec!["Bob".to_string()])]);
}

#[test]
fn remove_of_unknown_name_leaves_roster_unchanged() {
    init_logging();
    let mut before = loaded(&["Alice", "Bob"]);
    before.consume_dirty();

    let (mut after, effects) = update(before.clone(), Msg::DeleteClicked("Carol".to_string()));

    assert_eq!(after.roster(), before.roster());
    assert!(!after.consume_dirty());
    assert_eq!(
        effects,
        vec![Effect::SaveRoster(vec![
            "Alice".to_string(),
            "Bob".to_string()
        ])]
    );
}

#[test]
fn edits_before_load_are_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::InputChanged("Alice".to_string()));
    let (state, effects) = update(state, Msg::AddClicked);

    assert!(state.roster().is_empty());
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::DeleteClicked("Alice".to_string()));
    assert!(state.is_loading());
    assert!(effects.is_empty());
}

#[test]
fn loaded_duplicates_are_collapsed() {
    init_logging();
    let state = loaded(&["Alice", "Bob", "Alice"]);

    assert_eq!(
        state.roster().names(),
        &["Alice".to_string(), "Bob".to_string()]
    );
}

#[test]
fn empty_roster_view_has_no_rows() {
    init_logging();
    let view = loaded(&[]).view();

    assert!(!view.loading);
    assert_eq!(view.roster_len, 0);
    assert!(view.rows.is_empty());
    assert_eq!(view.participant_count, None);
}
