use crate::dates::parse_naive_date;
use crate::errors::{AppError, TimelineError};
use crate::metrics::{build_timeline, compute_metrics, StreakMetrics};
use crate::milestones::{detect_milestones, milestone_badges, next_milestone, Milestone};
use crate::models::{
    AppData, MetricsResponse, MilestonesResponse, NewSlipUpRequest, Profile, SlipUp,
    TimelineResponse, UpdateProfileRequest,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::streak::ordered_by_recency;
use crate::timezone::parse_timezone;
use crate::ui::render_index;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let now = Utc::now();
    let data = state.data.lock().await;
    let metrics = metrics_at(&data, now)?;
    let badges = badges_for(&metrics, &state.milestones)?;
    let next = next_milestone(metrics.days_sober, &state.milestones);
    let timeline = build_timeline(&data.profile, &data.slip_ups).map_err(surface)?;

    Ok(Html(render_index(&metrics, &badges, next, &timeline)))
}

pub async fn get_metrics(State(state): State<AppState>) -> Result<Json<MetricsResponse>, AppError> {
    let data = state.data.lock().await;
    let metrics = metrics_at(&data, Utc::now())?;

    Ok(Json(MetricsResponse {
        milestones: detect_milestones(metrics.days_sober, &state.milestones),
        next_milestone: next_milestone(metrics.days_sober, &state.milestones),
        metrics,
    }))
}

pub async fn get_milestones(
    State(state): State<AppState>,
) -> Result<Json<MilestonesResponse>, AppError> {
    let data = state.data.lock().await;
    let metrics = metrics_at(&data, Utc::now())?;
    let reached = badges_for(&metrics, &state.milestones)?;

    Ok(Json(MilestonesResponse {
        days_sober: metrics.days_sober,
        next: next_milestone(metrics.days_sober, &state.milestones),
        current_streak_start_date: metrics.current_streak_start_date,
        reached,
    }))
}

pub async fn get_timeline(State(state): State<AppState>) -> Result<Json<TimelineResponse>, AppError> {
    let data = state.data.lock().await;
    let timeline = build_timeline(&data.profile, &data.slip_ups).map_err(surface)?;

    Ok(Json(TimelineResponse {
        journey_start_date: data.profile.journey_start_date.clone(),
        entries: timeline.entries,
        longest_completed_streak: timeline.longest_completed_streak,
    }))
}

pub async fn get_profile(State(state): State<AppState>) -> Json<Profile> {
    let data = state.data.lock().await;
    Json(data.profile.clone())
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    let profile = apply_profile_update(&state, payload).await?;
    Ok(Json(profile))
}

pub async fn submit_profile(
    State(state): State<AppState>,
    Form(payload): Form<UpdateProfileRequest>,
) -> Result<Redirect, AppError> {
    apply_profile_update(&state, payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn list_slip_ups(State(state): State<AppState>) -> Json<Vec<SlipUp>> {
    let data = state.data.lock().await;
    let newest_first = ordered_by_recency(&data.slip_ups)
        .into_iter()
        .rev()
        .cloned()
        .collect();
    Json(newest_first)
}

pub async fn create_slip_up(
    State(state): State<AppState>,
    Json(payload): Json<NewSlipUpRequest>,
) -> Result<Json<SlipUp>, AppError> {
    let slip_up = record_slip_up(&state, payload, Utc::now()).await?;
    Ok(Json(slip_up))
}

pub async fn submit_slip_up(
    State(state): State<AppState>,
    Form(payload): Form<NewSlipUpRequest>,
) -> Result<Redirect, AppError> {
    record_slip_up(&state, payload, Utc::now()).await?;
    Ok(Redirect::to("/"))
}

async fn apply_profile_update(
    state: &AppState,
    payload: UpdateProfileRequest,
) -> Result<Profile, AppError> {
    let journey_start_date = payload.journey_start_date.map(|value| blank_to_none(&value));
    let timezone = payload.timezone.map(|value| blank_to_none(&value));

    if let Some(Some(date)) = &journey_start_date {
        parse_naive_date(date).map_err(reject)?;
    }
    if let Some(Some(name)) = &timezone {
        parse_timezone(name).map_err(reject)?;
    }

    let mut data = state.data.lock().await;
    let mut updated = data.clone();
    if let Some(date) = journey_start_date {
        updated.profile.journey_start_date = date;
    }
    if let Some(name) = timezone {
        updated.profile.timezone = name;
    }
    persist_data(&state.data_path, &updated).await?;
    *data = updated;

    info!(
        journey_start_date = ?data.profile.journey_start_date,
        timezone = ?data.profile.timezone,
        "profile updated"
    );
    Ok(data.profile.clone())
}

async fn record_slip_up(
    state: &AppState,
    payload: NewSlipUpRequest,
    now: DateTime<Utc>,
) -> Result<SlipUp, AppError> {
    let slip_up_date = payload.slip_up_date.trim().to_string();
    let recovery_restart_date = payload
        .recovery_restart_date
        .as_deref()
        .and_then(blank_to_none)
        .unwrap_or_else(|| slip_up_date.clone());

    let slipped_on = parse_naive_date(&slip_up_date).map_err(reject)?;
    let restarted_on = parse_naive_date(&recovery_restart_date).map_err(reject)?;
    if restarted_on < slipped_on {
        return Err(AppError::bad_request(
            "recovery restart date must be on or after the slip-up date",
        ));
    }

    let mut data = state.data.lock().await;
    let slip_up = SlipUp {
        id: Uuid::new_v4().to_string(),
        user_id: data.profile.id.clone(),
        slip_up_date,
        recovery_restart_date,
        note: payload.note.as_deref().and_then(blank_to_none),
        created_at: now,
    };
    // Memory only changes once the file write has succeeded.
    let mut updated = data.clone();
    updated.slip_ups.push(slip_up.clone());
    persist_data(&state.data_path, &updated).await?;
    *data = updated;

    info!(
        id = %slip_up.id,
        restart = %slip_up.recovery_restart_date,
        "slip-up recorded"
    );
    Ok(slip_up)
}

fn metrics_at(data: &AppData, now: DateTime<Utc>) -> Result<StreakMetrics, AppError> {
    compute_metrics(&data.profile, &data.slip_ups, now).map_err(surface)
}

fn badges_for(metrics: &StreakMetrics, thresholds: &[u32]) -> Result<Vec<Milestone>, AppError> {
    match metrics.current_streak_start_date.as_deref() {
        Some(anchor) => milestone_badges(anchor, metrics.days_sober, thresholds).map_err(surface),
        None => Ok(Vec::new()),
    }
}

fn surface(err: TimelineError) -> AppError {
    warn!("stored timeline data is invalid: {err}");
    AppError::from(err)
}

fn reject(err: TimelineError) -> AppError {
    AppError::bad_request(err.to_string())
}

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
