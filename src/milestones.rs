//! Milestone badges, always counted from the current streak's start.

use crate::dates::{date_key, parse_naive_date};
use crate::errors::Result;
use chrono::Days;
use serde::Serialize;

pub const DEFAULT_MILESTONES: &[u32] = &[1, 3, 7, 14, 30, 60, 90, 180, 365, 730, 1095, 1825];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub days: u32,
    pub label: String,
    pub reached_on: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpcomingMilestone {
    pub days: u32,
    pub days_remaining: u32,
}

/// Every threshold reached by `days_sober`, ascending.
pub fn detect_milestones(days_sober: u32, thresholds: &[u32]) -> Vec<u32> {
    let mut reached: Vec<u32> = thresholds
        .iter()
        .copied()
        .filter(|&days| days > 0 && days <= days_sober)
        .collect();
    reached.sort_unstable();
    reached.dedup();
    reached
}

pub fn next_milestone(days_sober: u32, thresholds: &[u32]) -> Option<UpcomingMilestone> {
    thresholds
        .iter()
        .copied()
        .filter(|&days| days > days_sober)
        .min()
        .map(|days| UpcomingMilestone {
            days,
            days_remaining: days - days_sober,
        })
}

/// Reached milestones with the calendar date each one fell on.
pub fn milestone_badges(anchor_date: &str, days_sober: u32, thresholds: &[u32]) -> Result<Vec<Milestone>> {
    let anchor = parse_naive_date(anchor_date)?;

    Ok(detect_milestones(days_sober, thresholds)
        .into_iter()
        .filter_map(|days| {
            let reached = anchor.checked_add_days(Days::new(u64::from(days)))?;
            Some(Milestone {
                days,
                label: milestone_label(days),
                reached_on: date_key(reached),
            })
        })
        .collect())
}

pub fn milestone_label(days: u32) -> String {
    if days == 1 {
        "1 Day Sober".to_string()
    } else {
        format!("{days} Days Sober")
    }
}
