//! # Mood Tracker — Request/Response DTOs
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Query`    → deserialized from query params
//! - `*Response` → serialized to client JSON
//! - Shape checks are expressed via `validator` derive macros; calendar and
//!   mood rules live in `crate::validation`

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::mood::Mood;
use crate::models::user::MoodEntry;
use crate::services::reports::MoodCounts;

// ============================================================================
// Common
// ============================================================================

/// GET /
#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub moods: Vec<&'static str>,
}

// ============================================================================
// Auth
// ============================================================================

/// POST /auth/register
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
}

/// POST /auth/login, POST /auth/switch
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

/// Response for register, login and switch
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub message: String,
    pub username: String,
}

// ============================================================================
// Entries
// ============================================================================

/// POST /entries
#[derive(Debug, Deserialize, Validate)]
pub struct AddEntryRequest {
    #[validate(range(min = 1, max = 31, message = "Day must be between 1 and 31"))]
    pub day: i32,

    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(custom = "crate::validation::validate_mood")]
    pub mood: String,
}

#[derive(Debug, Serialize)]
pub struct AddEntryResponse {
    pub message: String,
    pub created: bool,
    pub entry: MoodEntry,
}

/// GET /entries/view
#[derive(Debug, Deserialize)]
pub struct ViewEntryQuery {
    pub day: Option<i32>,
    pub month: Option<i32>,
}

impl ViewEntryQuery {
    pub fn require(&self) -> AppResult<(i32, i32)> {
        match (self.day, self.month) {
            (Some(day), Some(month)) => Ok((day, month)),
            _ => Err(AppError::Validation("Both day and month are required".into())),
        }
    }
}

/// GET /entries
#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub username: String,
    pub entries: Vec<MoodEntry>,
}

// ============================================================================
// Reports
// ============================================================================

/// GET /reports/general, GET /reports/mood
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub month: Option<i32>,
    pub mood: Option<String>,
}

impl ReportQuery {
    pub fn require_month(&self) -> AppResult<i32> {
        self.month
            .ok_or_else(|| AppError::Validation("Month is required".into()))
    }

    pub fn require_mood(&self) -> AppResult<&str> {
        self.mood
            .as_deref()
            .filter(|m| !m.is_empty())
            .ok_or_else(|| AppError::Validation("Mood is required".into()))
    }
}

/// A month either has counts or carries only a message; `counts` is never
/// present with zero entries.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GeneralReportResponse {
    Counts {
        month: i32,
        month_name: &'static str,
        counts: MoodCounts,
        total: usize,
    },
    Empty {
        message: String,
        month: i32,
    },
}

#[derive(Debug, Serialize)]
pub struct MoodReportResponse {
    pub month: i32,
    pub mood: Mood,
    pub count: usize,
}
