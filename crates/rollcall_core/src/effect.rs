#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadRoster,
    SaveRoster(Vec<String>),
    StartPolling,
    RequestScrape,
}

/// What to do when a poll tick fires while a scrape is still outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    #[default]
    SkipWhileInFlight,
    AllowOverlap,
}
