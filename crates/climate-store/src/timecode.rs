//! CF-conventions time axis decoding.
//!
//! Archival time axes store offsets relative to an epoch declared in the
//! variable's `units` attribute ("days since 1950-01-01 00:00:00").
//! Supported resolutions: seconds, minutes, hours, days.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use hazard_common::{HazardError, HazardResult};

/// Decode a CF time axis into UTC instants.
pub fn decode_time_axis(units: &str, offsets: &[f64]) -> HazardResult<Vec<DateTime<Utc>>> {
    let (unit_seconds, epoch) = parse_units(units)?;
    Ok(offsets
        .iter()
        .map(|&offset| {
            let millis = (offset * unit_seconds * 1000.0).round() as i64;
            epoch + Duration::milliseconds(millis)
        })
        .collect())
}

/// Parse a CF `units` string into (seconds per unit, epoch).
fn parse_units(units: &str) -> HazardResult<(f64, DateTime<Utc>)> {
    let mut parts = units.splitn(2, " since ");
    let unit_name = parts.next().unwrap_or_default().trim().to_lowercase();
    let epoch_str = parts
        .next()
        .ok_or_else(|| bad_units(units, "missing 'since'"))?
        .trim();

    let unit_seconds = match unit_name.as_str() {
        "seconds" | "second" | "s" => 1.0,
        "minutes" | "minute" | "min" => 60.0,
        "hours" | "hour" | "h" => 3600.0,
        "days" | "day" | "d" => 86_400.0,
        _ => return Err(bad_units(units, "unsupported unit")),
    };

    let epoch = parse_epoch(epoch_str).ok_or_else(|| bad_units(units, "unparsable epoch"))?;
    Ok((unit_seconds, epoch))
}

fn parse_epoch(s: &str) -> Option<DateTime<Utc>> {
    let naive = s.trim_end_matches('Z').trim();
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(naive, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

fn bad_units(units: &str, reason: &str) -> HazardError {
    HazardError::DataRead(format!("invalid time units '{units}': {reason}"))
}
