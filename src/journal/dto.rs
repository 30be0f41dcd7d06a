use serde::{Deserialize, Serialize};

use super::repo_types::{DailyTotals, LogEntry};

/// Form body for `POST /text`.
#[derive(Debug, Deserialize)]
pub struct TextEntryForm {
    pub food: String,
    pub grams: String,
}

/// JSON view of the day for `GET /api/log`.
#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub entries: Vec<LogEntry>,
    pub totals: DailyTotals,
}
