//! Picks the single timezone used for every date computation of a request.

use crate::errors::{Result, TimelineError};
use crate::models::Profile;
use chrono_tz::Tz;
use std::str::FromStr;

/// The profile's stored timezone, or the device default when none is set.
pub fn resolve_timezone(profile: &Profile) -> Result<Tz> {
    match profile.timezone.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => parse_timezone(name),
        _ => Ok(device_timezone()),
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    Tz::from_str(name).map_err(|_| TimelineError::InvalidTimezone(name.to_string()))
}

/// Detects the host timezone: `TZ` first, then the system setting, then UTC.
pub fn device_timezone() -> Tz {
    if let Ok(name) = std::env::var("TZ")
        && let Ok(tz) = Tz::from_str(name.trim_start_matches(':'))
    {
        return tz;
    }

    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| Tz::from_str(&name).ok())
        .unwrap_or(Tz::UTC)
}
