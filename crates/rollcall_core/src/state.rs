use crate::matching::{match_roster, sort_for_display};
use crate::view_model::{AppViewModel, RosterRowView};
use crate::{AddOutcome, OverlapPolicy, Participant, Roster};

/// Checks skipped behind one outstanding request before it counts as stale.
const MAX_SKIPPED_CHECKS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    roster: Roster,
    input: String,
    loading: bool,
    participants: Vec<Participant>,
    participant_count: Option<usize>,
    in_flight: usize,
    skipped_checks: u32,
    overlap_policy: OverlapPolicy,
    polling: bool,
    last_error: Option<String>,
    last_checked_at: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            roster: Roster::new(),
            input: String::new(),
            loading: true,
            participants: Vec::new(),
            participant_count: None,
            in_flight: 0,
            skipped_checks: 0,
            overlap_policy: OverlapPolicy::default(),
            polling: false,
            last_error: None,
            last_checked_at: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overlap_policy(policy: OverlapPolicy) -> Self {
        Self {
            overlap_policy: policy,
            ..Self::default()
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn scrapes_in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn view(&self) -> AppViewModel {
        let mut results = match_roster(&self.roster, &self.participants);
        sort_for_display(&mut results);
        let present_count = results.iter().filter(|r| r.present).count();
        let rows = results
            .into_iter()
            .map(|r| RosterRowView {
                name: r.name,
                present: r.present,
                avatar_url: r.avatar_url,
            })
            .collect();

        AppViewModel {
            loading: self.loading,
            input: self.input.clone(),
            participant_count: self.participant_count,
            roster_len: self.roster.len(),
            present_count,
            rows,
            scrape_in_flight: self.in_flight > 0,
            last_error: self.last_error.clone(),
            last_checked_at: self.last_checked_at.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn finish_loading(&mut self, names: Vec<String>) -> usize {
        let (roster, dropped) = Roster::from_persisted(names);
        self.roster = roster;
        self.loading = false;
        self.mark_dirty();
        dropped
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    /// Add the current input to the roster; the input is cleared on success.
    pub(crate) fn add_from_input(&mut self) -> AddOutcome {
        let outcome = self.roster.add(&self.input);
        if matches!(outcome, AddOutcome::Added(_)) {
            self.input.clear();
            self.mark_dirty();
        }
        outcome
    }

    pub(crate) fn remove_name(&mut self, name: &str) -> usize {
        let removed = self.roster.remove(name);
        if removed > 0 {
            self.mark_dirty();
        }
        removed
    }

    pub(crate) fn roster_snapshot(&self) -> Vec<String> {
        self.roster.names().to_vec()
    }

    pub(crate) fn is_polling(&self) -> bool {
        self.polling
    }

    pub(crate) fn start_polling(&mut self) {
        self.polling = true;
    }

    /// Reserve a scrape slot. Returns false when the overlap policy says the
    /// request must be skipped.
    ///
    /// Under `SkipWhileInFlight` an outstanding request only holds back
    /// [`MAX_SKIPPED_CHECKS`] checks. After that it is considered stale and
    /// the new request takes over its slot.
    pub(crate) fn try_begin_scrape(&mut self) -> bool {
        if self.in_flight > 0 && self.overlap_policy == OverlapPolicy::SkipWhileInFlight {
            if self.skipped_checks < MAX_SKIPPED_CHECKS {
                self.skipped_checks += 1;
                return false;
            }
            self.skipped_checks = 0;
            return true;
        }
        self.skipped_checks = 0;
        self.in_flight += 1;
        self.mark_dirty();
        true
    }

    fn finish_scrape(&mut self) -> bool {
        let was_in_flight = self.in_flight > 0;
        self.in_flight = self.in_flight.saturating_sub(1);
        self.skipped_checks = 0;
        was_in_flight && self.in_flight == 0
    }

    pub(crate) fn apply_participants(
        &mut self,
        participants: Vec<Participant>,
        checked_at: Option<String>,
    ) {
        self.finish_scrape();
        self.participant_count = Some(participants.len());
        self.participants = participants;
        self.last_error = None;
        if checked_at.is_some() {
            self.last_checked_at = checked_at;
        }
        self.mark_dirty();
    }

    /// Keeps the last known participants in place.
    pub(crate) fn apply_scrape_failure(&mut self, error: String) {
        let settled = self.finish_scrape();
        if self.last_error.as_deref() != Some(error.as_str()) {
            self.last_error = Some(error);
            self.mark_dirty();
        } else if settled {
            self.mark_dirty();
        }
    }
}
