use serde::{Deserialize, Serialize};

/// Month names, January first. Indexed by `month - 1`.
pub const MONTH_NAMES: [&str; 12] = [
    "январь", "февраль", "март", "апрель", "май", "июнь",
    "июль", "август", "сентябрь", "октябрь", "ноябрь", "декабрь",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mood {
    #[serde(rename = "Грустное")]
    Sad,
    #[serde(rename = "Спокойное")]
    Calm,
    #[serde(rename = "Нейтральное")]
    Neutral,
    #[serde(rename = "Радостное")]
    Happy,
    #[serde(rename = "Злое")]
    Angry,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Sad, Mood::Calm, Mood::Neutral, Mood::Happy, Mood::Angry];

    /// The wire/storage label. Must stay in sync with the serde renames above.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Sad => "Грустное",
            Mood::Calm => "Спокойное",
            Mood::Neutral => "Нейтральное",
            Mood::Happy => "Радостное",
            Mood::Angry => "Злое",
        }
    }

    /// Exact, case-sensitive label match.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|m| m.label()).collect()
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn month_name(month: i32) -> Option<&'static str> {
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|idx| MONTH_NAMES.get(idx).copied())
}
