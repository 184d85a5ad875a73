use crate::dates::{day_difference, days_between, parse_naive_date};
use crate::errors::Result;
use crate::models::{Profile, SlipUp};
use crate::streak::{ordered_by_recency, select_streak_anchor};
use crate::timezone::resolve_timezone;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyState {
    /// No journey-start date and no slip-ups recorded.
    NotStarted,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakMetrics {
    pub days_sober: u32,
    pub journey_days: u32,
    pub has_slip_ups: bool,
    pub most_recent_slip_up: Option<SlipUp>,
    pub journey_start_date: Option<String>,
    pub current_streak_start_date: Option<String>,
    pub timezone: String,
    pub state: JourneyState,
}

/// Current streak and total journey length as of `now`.
pub fn compute_metrics(profile: &Profile, slip_ups: &[SlipUp], now: DateTime<Utc>) -> Result<StreakMetrics> {
    let tz = resolve_timezone(profile)?;
    compute_metrics_in(profile, slip_ups, now, tz)
}

/// Same as [`compute_metrics`] with the timezone already resolved.
pub fn compute_metrics_in(
    profile: &Profile,
    slip_ups: &[SlipUp],
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<StreakMetrics> {
    // Every stored date must parse, including ones that never become the anchor.
    for slip_up in slip_ups {
        parse_naive_date(&slip_up.slip_up_date)?;
        parse_naive_date(&slip_up.recovery_restart_date)?;
    }
    let anchor = select_streak_anchor(profile.journey_start_date.as_deref(), slip_ups);

    let days_sober = match anchor.anchor_date.as_deref() {
        Some(date) => day_difference(date, Some(now), tz)?,
        None => 0,
    };
    let journey_days = match anchor.journey_start_date.as_deref() {
        Some(date) => day_difference(date, Some(now), tz)?,
        None => 0,
    };
    let state = if anchor.is_not_started() {
        JourneyState::NotStarted
    } else {
        JourneyState::Active
    };

    Ok(StreakMetrics {
        days_sober,
        journey_days,
        has_slip_ups: anchor.has_slip_ups,
        most_recent_slip_up: anchor.most_recent_slip_up,
        journey_start_date: anchor.journey_start_date,
        current_streak_start_date: anchor.anchor_date,
        timezone: tz.name().to_string(),
        state,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub slip_up: SlipUp,
    /// Length of the streak this slip-up ended.
    pub streak_days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
    pub longest_completed_streak: u32,
}

/// Past slip-ups oldest first, each with the streak it ended.
///
/// Each streak runs from the previous anchor (the journey start, then each
/// restart) to the slip-up date. Records whose slip-up precedes the previous
/// anchor count as zero-length streaks.
pub fn build_timeline(profile: &Profile, slip_ups: &[SlipUp]) -> Result<Timeline> {
    let mut previous_anchor = profile
        .journey_start_date
        .as_deref()
        .map(parse_naive_date)
        .transpose()?;

    let mut timeline = Timeline::default();
    for slip_up in ordered_by_recency(slip_ups) {
        let slipped_on = parse_naive_date(&slip_up.slip_up_date)?;
        let restarted_on = parse_naive_date(&slip_up.recovery_restart_date)?;

        let streak_days = previous_anchor
            .map(|anchor| days_between(anchor, slipped_on))
            .unwrap_or(0);
        timeline.longest_completed_streak = timeline.longest_completed_streak.max(streak_days);
        timeline.entries.push(TimelineEntry {
            slip_up: slip_up.clone(),
            streak_days,
        });
        previous_anchor = Some(restarted_on);
    }

    Ok(timeline)
}
