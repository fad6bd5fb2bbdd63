use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Coach,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub time: String,
}

/// One day's record, keyed by its `YYYY-MM-DD` date string.
///
/// Total fields are maintained incrementally: meal operations apply deltas,
/// and a whole-day save can overwrite them independently of `meals`, so the
/// totals may drift from the meal sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub date: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub water: f64,
    pub sleep: f64,
    pub meals: Vec<Meal>,
}

impl DailyMetrics {
    pub fn empty(date: &str) -> Self {
        Self {
            date: date.to_string(),
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            water: 0.0,
            sleep: 0.0,
            meals: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroGoals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub water: f64,
    pub sleep: f64,
}

impl Default for MacroGoals {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein: 150.0,
            carbs: 200.0,
            fat: 65.0,
            water: 2000.0,
            sleep: 8.0,
        }
    }
}

/// Copy of a client's day captured at share time. Later edits to the live
/// record do not touch snapshots already in the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedSnapshot {
    pub client_id: Uuid,
    pub client_name: String,
    pub date: String,
    pub metrics: DailyMetrics,
    pub shared_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub user: Option<User>,
    pub metrics: BTreeMap<String, DailyMetrics>,
    pub shared_data: Vec<SharedSnapshot>,
    pub macro_goals: Option<MacroGoals>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Raw meal form fields. Numeric fields arrive as strings so the aggregator
/// applies its own coercion rules instead of failing at the serde layer.
#[derive(Debug, Clone, Deserialize)]
pub struct MealInput {
    pub name: String,
    pub calories: String,
    #[serde(default)]
    pub protein: Option<String>,
    #[serde(default)]
    pub carbs: Option<String>,
    #[serde(default)]
    pub fat: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DayUpdate {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub water: f64,
    pub sleep: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Met,
    Near,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Progress {
    NoTarget,
    Toward { percent: f64, ratio: f64, band: Band },
}

#[derive(Debug, Serialize)]
pub struct DayProgress {
    pub calories: Progress,
    pub protein: Progress,
    pub carbs: Progress,
    pub fat: Progress,
    pub water: Progress,
    pub sleep: Progress,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: String,
    pub tracked: bool,
    pub metrics: DailyMetrics,
    pub goals: MacroGoals,
    pub progress: DayProgress,
    pub is_shared: bool,
}

#[derive(Debug, Serialize)]
pub struct GoalsResponse {
    pub goals: MacroGoals,
    pub customized: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup {
    pub date: String,
    pub snapshots: Vec<SharedSnapshot>,
}
