//! Loose JSON input: numbers may arrive as strings, dates as `YYYY-MM-DD`
//! or a full timestamp, and blank strings count as missing.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::error::ApiError;

/// A JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    fn is_blank(&self) -> bool {
        matches!(self, NumberInput::Text(s) if s.trim().is_empty())
    }

    pub fn to_f64(&self, field: &str) -> Result<f64, ApiError> {
        let value = match self {
            NumberInput::Number(n) => Some(*n),
            NumberInput::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value
            .filter(|n| n.is_finite())
            .ok_or_else(|| ApiError::validation(format!("{field} must be a number")))
    }

    pub fn to_year(&self, field: &str) -> Result<i32, ApiError> {
        let n = self.to_f64(field)?;
        if n.fract() != 0.0 || n < f64::from(i32::MIN) || n > f64::from(i32::MAX) {
            return Err(ApiError::validation(format!("{field} must be a whole year")));
        }
        Ok(n as i32)
    }
}

/// Present and non-blank text.
pub fn text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Present and non-blank number.
pub fn number(value: Option<NumberInput>) -> Option<NumberInput> {
    value.filter(|n| !n.is_blank())
}

/// Present, non-blank and non-zero year. Zero counts as absent.
pub fn year(value: Option<NumberInput>) -> Result<Option<i32>, ApiError> {
    match number(value) {
        None => Ok(None),
        Some(raw) => raw.to_year("year").map(|y| (y != 0).then_some(y)),
    }
}

pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ApiError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .ok_or_else(|| ApiError::validation(format!("{field} must be a date (YYYY-MM-DD)")))
}
