use rollcall_logging::{rollcall_debug, rollcall_info, rollcall_warn};

use crate::{AddOutcome, AppState, Effect, Msg};

/// Initial state plus the effects needed to get the popup going.
pub fn init(state: AppState) -> (AppState, Vec<Effect>) {
    (state, vec![Effect::LoadRoster])
}

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RosterLoaded(names) => {
            if !state.is_loading() {
                return (state, Vec::new());
            }
            let dropped = state.finish_loading(names);
            if dropped > 0 {
                rollcall_warn!("Dropped {} duplicate roster entries on load", dropped);
            }
            let mut effects = Vec::with_capacity(2);
            if !state.is_polling() {
                state.start_polling();
                effects.push(Effect::StartPolling);
            }
            // Immediate check once the roster is known.
            if state.try_begin_scrape() {
                effects.push(Effect::RequestScrape);
            }
            effects
        }
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::AddClicked => {
            if state.is_loading() {
                return (state, Vec::new());
            }
            match state.add_from_input() {
                AddOutcome::Added(name) => {
                    rollcall_info!("Added roster entry name_len={}", name.len());
                    vec![Effect::SaveRoster(state.roster_snapshot())]
                }
                AddOutcome::Duplicate(name) => {
                    rollcall_debug!("Ignoring duplicate roster entry {:?}", name);
                    Vec::new()
                }
                AddOutcome::Empty => Vec::new(),
            }
        }
        Msg::DeleteClicked(name) => {
            if state.is_loading() {
                return (state, Vec::new());
            }
            let removed = state.remove_name(&name);
            rollcall_info!("Removed {} roster entries", removed);
            vec![Effect::SaveRoster(state.roster_snapshot())]
        }
        Msg::PollTick | Msg::CheckClicked => {
            if state.is_loading() {
                return (state, Vec::new());
            }
            if state.try_begin_scrape() {
                vec![Effect::RequestScrape]
            } else {
                rollcall_debug!("Scrape still in flight; skipping this check");
                Vec::new()
            }
        }
        Msg::ScrapeCompleted {
            participants,
            checked_at,
        } => {
            state.apply_participants(participants, checked_at);
            Vec::new()
        }
        Msg::ScrapeFailed(error) => {
            rollcall_warn!("Participant check failed: {}", error);
            state.apply_scrape_failure(error);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
