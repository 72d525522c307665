//! Month-scoped aggregates over one user's entries. Computed on demand.

use std::collections::BTreeMap;

use crate::models::mood::Mood;
use crate::models::user::MoodEntry;

/// Occurrences per mood label, iterated in ascending label order.
pub type MoodCounts = BTreeMap<&'static str, usize>;

/// Count `month`'s entries per mood. `None` when the month has no entries at
/// all, so callers can tell "nothing recorded" from a zero count.
pub fn general_report(entries: &[MoodEntry], month: i32) -> Option<MoodCounts> {
    let mut counts = MoodCounts::new();
    for entry in entries.iter().filter(|e| e.month == month) {
        *counts.entry(entry.mood.label()).or_insert(0) += 1;
    }

    if counts.is_empty() {
        None
    } else {
        Some(counts)
    }
}

pub fn mood_report(entries: &[MoodEntry], month: i32, mood: Mood) -> usize {
    entries
        .iter()
        .filter(|e| e.month == month && e.mood == mood)
        .count()
}
