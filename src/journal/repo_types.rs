use serde::Serialize;
use time::OffsetDateTime;

/// One recorded intake, already scaled to the eaten weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub food: String,
    pub grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

/// Field-wise sum over the log, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}
