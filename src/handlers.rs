use crate::auth;
use crate::errors::AppError;
use crate::metrics::{
    add_meal, already_shared, apply_day_update, day_progress, group_snapshots_by_date, remove_meal,
    sort_most_recent_first,
};
use crate::models::{
    AppData, DailyMetrics, DateGroup, DayResponse, DayUpdate, GoalsResponse, LoginRequest,
    MacroGoals, MealInput, Role, SessionResponse, SharedSnapshot, User,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use chrono::{Local, Utc};
use uuid::Uuid;

pub async fn index() -> Html<String> {
    Html(render_index(&today_string()))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<User>, AppError> {
    let user = auth::login(&payload.email, &payload.password)
        .ok_or_else(|| AppError::bad_request("email and password are required"))?;

    let mut data = state.data.lock().await;
    data.user = Some(user.clone());
    persist_data(&state.data_path, &data).await?;

    Ok(Json(user))
}

pub async fn logout(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.user = None;
    persist_data(&state.data_path, &data).await?;

    Ok(Json(SessionResponse { user: None }))
}

pub async fn session(State(state): State<AppState>) -> Json<SessionResponse> {
    let data = state.data.lock().await;
    Json(SessionResponse {
        user: data.user.clone(),
    })
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<DayResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(day_response(&data, today_string())))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(day_response(&data, date)))
}

pub async fn save_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<DayUpdate>,
) -> Result<Json<DayResponse>, AppError> {
    let mut data = state.data.lock().await;
    let updated = apply_day_update(data.metrics.get(&date).cloned(), &date, &payload);
    data.metrics.insert(date.clone(), updated);
    persist_data(&state.data_path, &data).await?;

    Ok(Json(day_response(&data, date)))
}

pub async fn add_day_meal(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<MealInput>,
) -> Result<Json<DayResponse>, AppError> {
    let mut data = state.data.lock().await;
    let updated = add_meal(data.metrics.get(&date).cloned(), &date, &payload)?;
    data.metrics.insert(date.clone(), updated);
    persist_data(&state.data_path, &data).await?;

    Ok(Json(day_response(&data, date)))
}

pub async fn remove_day_meal(
    State(state): State<AppState>,
    Path((date, meal_id)): Path<(String, Uuid)>,
) -> Result<Json<DayResponse>, AppError> {
    let mut data = state.data.lock().await;
    if let Some(current) = data.metrics.get(&date).cloned() {
        let updated = remove_meal(current, meal_id);
        data.metrics.insert(date.clone(), updated);
        persist_data(&state.data_path, &data).await?;
    }

    Ok(Json(day_response(&data, date)))
}

pub async fn get_goals(State(state): State<AppState>) -> Json<GoalsResponse> {
    let data = state.data.lock().await;
    Json(GoalsResponse {
        customized: data.macro_goals.is_some(),
        goals: data.macro_goals.clone().unwrap_or_default(),
    })
}

pub async fn save_goals(
    State(state): State<AppState>,
    Json(payload): Json<MacroGoals>,
) -> Result<Json<GoalsResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.macro_goals = Some(payload);
    persist_data(&state.data_path, &data).await?;

    Ok(Json(GoalsResponse {
        customized: true,
        goals: data.macro_goals.clone().unwrap_or_default(),
    }))
}

pub async fn share_today(
    State(state): State<AppState>,
) -> Result<Json<SharedSnapshot>, AppError> {
    let date = today_string();
    let mut data = state.data.lock().await;

    let user = data
        .user
        .clone()
        .ok_or_else(|| AppError::bad_request("log in before sharing"))?;
    let metrics = data
        .metrics
        .get(&date)
        .cloned()
        .ok_or_else(|| AppError::bad_request("nothing tracked today"))?;

    if already_shared(&data.shared_data, user.id, &date) {
        return Err(AppError::conflict("today's data is already shared"));
    }

    let snapshot = SharedSnapshot {
        client_id: user.id,
        client_name: user.name,
        date,
        metrics,
        shared_at: Utc::now(),
    };
    data.shared_data.push(snapshot.clone());
    persist_data(&state.data_path, &data).await?;

    Ok(Json(snapshot))
}

pub async fn coach_overview(
    State(state): State<AppState>,
) -> Result<Json<Vec<DateGroup>>, AppError> {
    let data = state.data.lock().await;
    let is_coach = data
        .user
        .as_ref()
        .is_some_and(|user| user.role == Role::Coach);
    if !is_coach {
        // routing convenience, not a security boundary
        return Err(AppError::forbidden("coach role required"));
    }

    let mut snapshots = data.shared_data.clone();
    sort_most_recent_first(&mut snapshots);
    Ok(Json(group_snapshots_by_date(&snapshots)))
}

fn day_response(data: &AppData, date: String) -> DayResponse {
    let (tracked, metrics) = match data.metrics.get(&date) {
        Some(metrics) => (true, metrics.clone()),
        None => (false, DailyMetrics::empty(&date)),
    };
    let goals = data.macro_goals.clone().unwrap_or_default();
    let progress = day_progress(&metrics, &goals);
    let is_shared = data
        .user
        .as_ref()
        .is_some_and(|user| already_shared(&data.shared_data, user.id, &date));

    DayResponse {
        date,
        tracked,
        metrics,
        goals,
        progress,
        is_shared,
    }
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
