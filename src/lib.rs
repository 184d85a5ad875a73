pub mod app;
pub mod config;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod milestones;
pub mod models;
pub mod state;
pub mod storage;
pub mod streak;
pub mod timezone;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use dates::{day_difference, format_calendar_date, parse_calendar_date};
pub use errors::TimelineError;
pub use metrics::{compute_metrics, JourneyState, StreakMetrics};
pub use milestones::detect_milestones;
pub use state::AppState;
pub use storage::load_data;
pub use streak::{select_streak_anchor, StreakAnchor};
pub use timezone::resolve_timezone;
