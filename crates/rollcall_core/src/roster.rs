use crate::normalize::is_name_whitespace;

/// A live attendee as seen on the call page for one scrape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Participant {
    pub avatar_url: Option<String>,
    pub name: Option<String>,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            avatar_url: None,
            name: Some(name.into()),
        }
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}

/// Outcome of [`Roster::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(String),
    Empty,
    Duplicate(String),
}

/// User-curated list of expected attendees.
///
/// Names are unique (exact, case-sensitive) and keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from a persisted list, dropping repeated names.
    ///
    /// Returns the roster and the number of duplicates that were dropped.
    pub fn from_persisted(names: Vec<String>) -> (Self, usize) {
        let mut roster = Self::new();
        let mut dropped = 0;
        for name in names {
            if roster.contains(&name) {
                dropped += 1;
            } else {
                roster.names.push(name);
            }
        }
        (roster, dropped)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Trim and append `raw` unless it is empty or already present.
    pub fn add(&mut self, raw: &str) -> AddOutcome {
        let trimmed = raw.trim_matches(is_name_whitespace);
        if trimmed.is_empty() {
            return AddOutcome::Empty;
        }
        if self.contains(trimmed) {
            return AddOutcome::Duplicate(trimmed.to_string());
        }
        self.names.push(trimmed.to_string());
        AddOutcome::Added(trimmed.to_string())
    }

    /// Remove every entry exactly equal to `name`; returns how many went.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        before - self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_case_sensitive() {
        let mut roster = Roster::new();
        assert_eq!(roster.add("Alice"), AddOutcome::Added("Alice".into()));
        assert_eq!(roster.add("alice"), AddOutcome::Added("alice".into()));
        assert_eq!(roster.add(" Alice "), AddOutcome::Duplicate("Alice".into()));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn add_trims_like_a_browser() {
        let mut roster = Roster::new();
        assert_eq!(
            roster.add("\u{feff}Alice\u{feff}"),
            AddOutcome::Added("Alice".into())
        );
        assert_eq!(roster.add("\u{a0}Alice\n"), AddOutcome::Duplicate("Alice".into()));
        assert_eq!(roster.add("\u{85}Bob"), AddOutcome::Added("\u{85}Bob".into()));
        assert_eq!(roster.add("\u{feff} \u{3000}"), AddOutcome::Empty);
    }

    #[test]
    fn persisted_duplicates_are_dropped() {
        let (roster, dropped) =
            Roster::from_persisted(vec!["A".into(), "B".into(), "A".into()]);
        assert_eq!(roster.names(), &["A".to_string(), "B".to_string()]);
        assert_eq!(dropped, 1);
    }
}
