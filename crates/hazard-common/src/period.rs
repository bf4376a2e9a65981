//! Period and timestamp parsing for climate queries.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HazardError, HazardResult};

/// An inclusive range of calendar years parsed from a "YYYY-YYYY" string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub start_year: i32,
    pub end_year: i32,
}

impl PeriodRange {
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
        }
    }

    /// Parse a "YYYY-YYYY" period string.
    ///
    /// Whitespace around the years is tolerated. A missing dash, a chunk
    /// count other than two, non-integer years or end < start are all
    /// rejected.
    pub fn parse(period: &str) -> HazardResult<Self> {
        let raw = period.trim();
        if raw.is_empty() || !raw.contains('-') {
            return Err(HazardError::InvalidPeriod(period.to_string()));
        }

        let chunks: Vec<&str> = raw
            .split('-')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if chunks.len() != 2 {
            return Err(HazardError::InvalidPeriod(period.to_string()));
        }

        let start_year: i32 = chunks[0]
            .parse()
            .map_err(|_| HazardError::InvalidPeriod(period.to_string()))?;
        let end_year: i32 = chunks[1]
            .parse()
            .map_err(|_| HazardError::InvalidPeriod(period.to_string()))?;

        if end_year < start_year {
            return Err(HazardError::InvalidPeriod(period.to_string()));
        }

        Ok(Self {
            start_year,
            end_year,
        })
    }

    /// Check whether a calendar year falls inside this period.
    pub fn contains_year(&self, year: i32) -> bool {
        year >= self.start_year && year <= self.end_year
    }

    /// Check whether this period overlaps an inclusive year interval.
    pub fn overlaps(&self, start: i32, end: i32) -> bool {
        self.start_year <= end && self.end_year >= start
    }
}

impl std::fmt::Display for PeriodRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start_year, self.end_year)
    }
}

/// Parse a timestamp into a UTC instant.
///
/// Accepts RFC 3339, a naive "YYYY-MM-DDTHH:MM:SS" (assumed UTC, trailing
/// "Z" tolerated) and a bare "YYYY-MM-DD" date.
pub fn parse_instant(timestamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = timestamp.trim_end_matches('Z');
    if let Ok(ndt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(naive, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    None
}

/// Extract the calendar year from a free-form timestamp.
///
/// Strict date/time parsing is attempted first; on failure the leading
/// four characters are read as the year. The fallback is deliberate:
/// upstream timestamps arrive in non-ISO forms ("2035-07", "2035W2") and
/// only the year matters for dataset routing. Inputs whose first four
/// characters are not digits are rejected.
pub fn parse_year(timestamp: &str) -> HazardResult<i32> {
    if let Some(instant) = parse_instant(timestamp) {
        return Ok(instant.year());
    }

    timestamp
        .get(..4)
        .and_then(|prefix| prefix.parse::<i32>().ok())
        .ok_or_else(|| HazardError::InvalidTimestamp(timestamp.to_string()))
}
