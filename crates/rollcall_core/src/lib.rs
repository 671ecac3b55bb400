//! Roll call core: pure roster state machine, name matching and view-model helpers.
mod effect;
mod matching;
mod msg;
mod normalize;
mod roster;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, OverlapPolicy};
pub use matching::{compare_names, match_roster, sort_for_display, MatchResult};
pub use msg::Msg;
pub use normalize::{names_match, normalize_name};
pub use roster::{AddOutcome, Participant, Roster};
pub use state::AppState;
pub use update::{init, update};
pub use view_model::{AppViewModel, RosterRowView};
