//! Numeric field parsing.
//!
//! Reference-table cells are ingested leniently: a missing or malformed
//! value becomes `0.0`. Request fields are strict and report the offending
//! field back to the caller.

use crate::error::{AppError, AppResult};

/// Parses a reference-table cell, substituting `0.0` for absent or bad values.
pub fn lenient_f64(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parses a required decimal request field.
pub fn required_f64(field: &'static str, raw: &str) -> AppResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::invalid(field, raw))
}

/// Parses a required whole-number request field (age).
pub fn required_u32(field: &'static str, raw: &str) -> AppResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| AppError::invalid(field, raw))
}

/// Rounds to two decimal places, ties away from zero.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
