use serde::{Deserialize, Serialize};

use crate::models::mood::Mood;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
    pub day: i32,
    pub month: i32,
    pub mood: Mood,
}

impl MoodEntry {
    pub fn is_on(&self, day: i32, month: i32) -> bool {
        self.month == month && self.day == day
    }
}

/// A diary owner and their entries, in insertion order.
///
/// At most one entry exists per `(month, day)`; this is upheld by
/// [`User::upsert_entry`], which is the only way entries are added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub entries: Vec<MoodEntry>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            entries: Vec::new(),
        }
    }

    /// Replace the mood of the entry dated `(month, day)` in place, or append
    /// a new entry. Returns `true` when an existing entry was updated.
    pub fn upsert_entry(&mut self, day: i32, month: i32, mood: Mood) -> bool {
        match self.entries.iter_mut().find(|e| e.is_on(day, month)) {
            Some(existing) => {
                existing.mood = mood;
                true
            }
            None => {
                self.entries.push(MoodEntry { day, month, mood });
                false
            }
        }
    }

    pub fn find_entry(&self, day: i32, month: i32) -> Option<&MoodEntry> {
        self.entries.iter().find(|e| e.is_on(day, month))
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.clone(),
            entries_count: self.entries.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub entries_count: usize,
}
