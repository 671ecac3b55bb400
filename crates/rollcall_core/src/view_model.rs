#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub loading: bool,
    pub input: String,
    /// `None` until the first successful check.
    pub participant_count: Option<usize>,
    pub roster_len: usize,
    pub present_count: usize,
    /// Present rows first, each group in name order.
    pub rows: Vec<RosterRowView>,
    pub scrape_in_flight: bool,
    pub last_error: Option<String>,
    pub last_checked_at: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRowView {
    pub name: String,
    pub present: bool,
    pub avatar_url: Option<String>,
}
