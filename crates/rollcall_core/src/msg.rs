use crate::Participant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Initial roster read from storage finished (empty on any failure).
    RosterLoaded(Vec<String>),
    /// User edited the name input box.
    InputChanged(String),
    /// User submitted the current input (Add button or Enter).
    AddClicked,
    /// User clicked Delete on a roster row.
    DeleteClicked(String),
    /// User asked for an immediate attendance check.
    CheckClicked,
    /// Poll interval elapsed.
    PollTick,
    /// Page answered a scrape request.
    ScrapeCompleted {
        participants: Vec<Participant>,
        checked_at: Option<String>,
    },
    /// Scrape round-trip failed or could not be issued.
    ScrapeFailed(String),
    /// Fallback for placeholder wiring.
    NoOp,
}
