//! Chooses the date the current streak counts from.
//!
//! The current streak runs from the most recent recovery restart; the journey
//! runs from the original start date. Both are reported side by side.

use crate::models::SlipUp;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreakAnchor {
    pub anchor_date: Option<String>,
    pub journey_start_date: Option<String>,
    pub has_slip_ups: bool,
    pub most_recent_slip_up: Option<SlipUp>,
}

impl StreakAnchor {
    /// No start date and no slip-ups: nothing to count from yet.
    pub fn is_not_started(&self) -> bool {
        self.anchor_date.is_none()
    }
}

pub fn select_streak_anchor(journey_start_date: Option<&str>, slip_ups: &[SlipUp]) -> StreakAnchor {
    let journey_start_date = journey_start_date.map(str::to_string);

    match most_recent_slip_up(slip_ups) {
        Some(latest) => StreakAnchor {
            anchor_date: Some(latest.recovery_restart_date.clone()),
            journey_start_date,
            has_slip_ups: true,
            most_recent_slip_up: Some(latest.clone()),
        },
        None => StreakAnchor {
            anchor_date: journey_start_date.clone(),
            journey_start_date,
            has_slip_ups: false,
            most_recent_slip_up: None,
        },
    }
}

/// Latest recovery restart; equal restarts go to the newest record.
pub fn most_recent_slip_up(slip_ups: &[SlipUp]) -> Option<&SlipUp> {
    slip_ups.iter().max_by(|a, b| recency(a, b))
}

/// Slip-ups oldest first, by the same ordering as [`most_recent_slip_up`].
pub fn ordered_by_recency(slip_ups: &[SlipUp]) -> Vec<&SlipUp> {
    let mut ordered: Vec<&SlipUp> = slip_ups.iter().collect();
    ordered.sort_by(|a, b| recency(a, b));
    ordered
}

// `YYYY-MM-DD` strings sort chronologically as plain text.
fn recency(a: &SlipUp, b: &SlipUp) -> Ordering {
    a.recovery_restart_date
        .cmp(&b.recovery_restart_date)
        .then_with(|| a.created_at.cmp(&b.created_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn slip(id: &str, restart: &str, created_hour: u32) -> SlipUp {
        SlipUp {
            id: id.to_string(),
            user_id: "u1".to_string(),
            slip_up_date: restart.to_string(),
            recovery_restart_date: restart.to_string(),
            note: None,
            created_at: Utc
                .with_ymd_and_hms(2024, 6, 1, created_hour, 0, 0)
                .single()
                .unwrap(),
        }
    }

    #[test]
    fn without_slip_ups_anchor_is_journey_start() {
        let anchor = select_streak_anchor(Some("2024-01-01"), &[]);
        assert!(!anchor.has_slip_ups);
        assert_eq!(anchor.anchor_date.as_deref(), Some("2024-01-01"));
        assert_eq!(anchor.journey_start_date.as_deref(), Some("2024-01-01"));
        assert!(anchor.most_recent_slip_up.is_none());
        assert!(!anchor.is_not_started());
    }

    #[test]
    fn latest_restart_wins_regardless_of_input_order() {
        let slips = vec![
            slip("b", "2024-03-02", 1),
            slip("c", "2024-01-15", 5),
            slip("a", "2024-02-02", 9),
        ];
        let anchor = select_streak_anchor(Some("2024-01-01"), &slips);
        assert!(anchor.has_slip_ups);
        assert_eq!(anchor.anchor_date.as_deref(), Some("2024-03-02"));
        assert_eq!(anchor.most_recent_slip_up.map(|s| s.id), Some("b".to_string()));
        assert_eq!(anchor.journey_start_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn equal_restart_dates_prefer_newest_record() {
        let slips = vec![slip("older", "2024-03-02", 1), slip("newer", "2024-03-02", 8)];
        let latest = most_recent_slip_up(&slips).unwrap();
        assert_eq!(latest.id, "newer");

        let reversed = vec![slips[1].clone(), slips[0].clone()];
        assert_eq!(most_recent_slip_up(&reversed).unwrap().id, "newer");
    }

    #[test]
    fn nothing_recorded_is_not_started() {
        let anchor = select_streak_anchor(None, &[]);
        assert!(anchor.is_not_started());
        assert_eq!(anchor, StreakAnchor::default());
    }

    #[test]
    fn slip_up_without_journey_start_still_anchors() {
        let anchor = select_streak_anchor(None, &[slip("a", "2024-02-02", 0)]);
        assert_eq!(anchor.anchor_date.as_deref(), Some("2024-02-02"));
        assert!(anchor.journey_start_date.is_none());
    }

    #[test]
    fn restart_before_slip_up_does_not_panic() {
        let mut odd = slip("odd", "2024-02-01", 0);
        odd.slip_up_date = "2024-03-01".to_string();
        let anchor = select_streak_anchor(Some("2024-01-01"), &[odd]);
        assert_eq!(anchor.anchor_date.as_deref(), Some("2024-02-01"));
    }

    #[test]
    fn ordering_is_oldest_first() {
        let slips = vec![slip("b", "2024-03-02", 1), slip("a", "2024-02-02", 1)];
        let ids: Vec<&str> = ordered_by_recency(&slips).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
