use crate::metrics::{StreakMetrics, TimelineEntry};
use crate::milestones::{Milestone, UpcomingMilestone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub journey_start_date: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            journey_start_date: None,
            timezone: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlipUp {
    pub id: String,
    pub user_id: String,
    pub slip_up_date: String,
    pub recovery_restart_date: String,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub slip_ups: Vec<SlipUp>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub journey_start_date: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewSlipUpRequest {
    pub slip_up_date: String,
    #[serde(default)]
    pub recovery_restart_date: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub metrics: StreakMetrics,
    pub milestones: Vec<u32>,
    pub next_milestone: Option<UpcomingMilestone>,
}

#[derive(Debug, Serialize)]
pub struct MilestonesResponse {
    pub days_sober: u32,
    pub current_streak_start_date: Option<String>,
    pub reached: Vec<Milestone>,
    pub next: Option<UpcomingMilestone>,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub journey_start_date: Option<String>,
    pub entries: Vec<TimelineEntry>,
    pub longest_completed_streak: u32,
}
