use std::cmp::Ordering;

use feruca::Collator;

use crate::normalize::normalize_name;
use crate::{Participant, Roster};

/// A roster entry paired with the participant it matched, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub name: String,
    pub present: bool,
    pub avatar_url: Option<String>,
}

/// Pair every roster entry with the first participant whose normalized name
/// equals it. Output follows roster order.
pub fn match_roster(roster: &Roster, participants: &[Participant]) -> Vec<MatchResult> {
    // Normalize each participant once; absent names can never match.
    let keys: Vec<Option<String>> = participants
        .iter()
        .map(|p| p.name.as_deref().map(normalize_name))
        .collect();

    roster
        .names()
        .iter()
        .map(|name| {
            let wanted = normalize_name(name);
            let hit = keys
                .iter()
                .position(|key| key.as_deref() == Some(wanted.as_str()))
                .map(|idx| &participants[idx]);
            MatchResult {
                name: name.clone(),
                present: hit.is_some(),
                avatar_url: hit.and_then(|p| p.avatar_url.clone()),
            }
        })
        .collect()
}

/// Present entries first, then absent; each group by [`compare_names`].
pub fn sort_for_display(results: &mut [MatchResult]) {
    let mut collator = Collator::default();
    results.sort_by(|a, b| {
        b.present
            .cmp(&a.present)
            .then_with(|| collate(&mut collator, &a.name, &b.name))
    });
}

/// Locale-aware ordering for display names.
///
/// Uses Unicode collation with the CLDR root tailoring, so `Émile` sorts
/// next to `Emma` rather than after `Zoe`. Raw text breaks ties so the order
/// is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collate(&mut Collator::default(), a, b)
}

fn collate(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}
