use crate::errors::MealInputError;
use crate::models::{
    Band, DailyMetrics, DateGroup, DayProgress, DayUpdate, MacroGoals, Meal, MealInput, Progress,
    SharedSnapshot,
};
use chrono::{Local, NaiveDate, NaiveTime};
use uuid::Uuid;

/// Band thresholds, in percent of goal.
pub const MET_PERCENT: f64 = 100.0;
pub const NEAR_PERCENT: f64 = 75.0;

/// Appends a meal to the day and bumps the running totals by the meal's
/// amounts. `current` being absent means nothing was tracked yet; the meal
/// lands on a zeroed record for `date`. Rejection leaves no partial change.
pub fn add_meal(
    current: Option<DailyMetrics>,
    date: &str,
    input: &MealInput,
) -> Result<DailyMetrics, MealInputError> {
    add_meal_at(current, date, input, Local::now().time())
}

pub fn add_meal_at(
    current: Option<DailyMetrics>,
    date: &str,
    input: &MealInput,
    now: NaiveTime,
) -> Result<DailyMetrics, MealInputError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(MealInputError::MissingName);
    }
    let calories_raw = input.calories.trim();
    if calories_raw.is_empty() {
        return Err(MealInputError::MissingCalories);
    }
    let calories = calories_raw
        .parse::<f64>()
        .map_err(|_| MealInputError::InvalidCalories)?;

    let time = match input.time.as_deref().map(str::trim) {
        Some(time) if !time.is_empty() => time.to_string(),
        _ => now.format("%H:%M").to_string(),
    };

    let meal = Meal {
        id: Uuid::new_v4(),
        name: name.to_string(),
        calories: clamp_amount(calories),
        protein: coerce_amount(input.protein.as_deref()),
        carbs: coerce_amount(input.carbs.as_deref()),
        fat: coerce_amount(input.fat.as_deref()),
        time,
    };

    let mut day = current.unwrap_or_else(|| DailyMetrics::empty(date));
    day.calories += meal.calories;
    day.protein += meal.protein;
    day.carbs += meal.carbs;
    day.fat += meal.fat;
    day.meals.push(meal);
    Ok(day)
}

/// Removes the meal with the given id and subtracts its contribution from
/// the totals, clamping at zero. An unknown id returns the record unchanged.
pub fn remove_meal(current: DailyMetrics, meal_id: Uuid) -> DailyMetrics {
    let Some(index) = current.meals.iter().position(|meal| meal.id == meal_id) else {
        return current;
    };

    let mut day = current;
    let meal = day.meals.remove(index);
    day.calories = clamp_amount(day.calories - meal.calories);
    day.protein = clamp_amount(day.protein - meal.protein);
    day.carbs = clamp_amount(day.carbs - meal.carbs);
    day.fat = clamp_amount(day.fat - meal.fat);
    day
}

/// Whole-day save of the directly editable fields. The stored meal list is
/// preserved; totals take whatever the caller sent (clamped at zero), which
/// is what lets them drift from the meal sums.
pub fn apply_day_update(
    current: Option<DailyMetrics>,
    date: &str,
    update: &DayUpdate,
) -> DailyMetrics {
    let mut day = current.unwrap_or_else(|| DailyMetrics::empty(date));
    day.calories = clamp_amount(update.calories);
    day.protein = clamp_amount(update.protein);
    day.carbs = clamp_amount(update.carbs);
    day.fat = clamp_amount(update.fat);
    day.water = clamp_amount(update.water);
    day.sleep = clamp_amount(update.sleep);
    day
}

/// Progress of one value against one goal. A missing goal, or a goal at or
/// below zero, yields `NoTarget`. `percent` is unrounded; `ratio` is the
/// same quotient clamped to [0, 1] for bar rendering.
pub fn compute_progress(value: f64, goal: Option<f64>) -> Progress {
    let Some(goal) = goal.filter(|goal| *goal > 0.0) else {
        return Progress::NoTarget;
    };

    let percent = value / goal * 100.0;
    let band = if percent >= MET_PERCENT {
        Band::Met
    } else if percent >= NEAR_PERCENT {
        Band::Near
    } else {
        Band::Low
    };

    Progress::Toward {
        percent,
        ratio: (value / goal).clamp(0.0, 1.0),
        band,
    }
}

pub fn day_progress(metrics: &DailyMetrics, goals: &MacroGoals) -> DayProgress {
    DayProgress {
        calories: compute_progress(metrics.calories, Some(goals.calories)),
        protein: compute_progress(metrics.protein, Some(goals.protein)),
        carbs: compute_progress(metrics.carbs, Some(goals.carbs)),
        fat: compute_progress(metrics.fat, Some(goals.fat)),
        water: compute_progress(metrics.water, Some(goals.water)),
        sleep: compute_progress(metrics.sleep, Some(goals.sleep)),
    }
}

/// Partitions snapshots by exact date string. Within a group the input
/// order is preserved; the groups themselves are ordered by calendar date
/// descending (parsed, not lexicographic, so unpadded months still sort
/// correctly). Dates that fail to parse sort after all valid dates.
pub fn group_snapshots_by_date(snapshots: &[SharedSnapshot]) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    for snapshot in snapshots {
        match groups.iter_mut().find(|group| group.date == snapshot.date) {
            Some(group) => group.snapshots.push(snapshot.clone()),
            None => groups.push(DateGroup {
                date: snapshot.date.clone(),
                snapshots: vec![snapshot.clone()],
            }),
        }
    }

    groups.sort_by(|a, b| parse_date(&b.date).cmp(&parse_date(&a.date)));
    groups
}

/// Newest share first. Applied to the full list before grouping, so each
/// date group lists the most recent share first.
pub fn sort_most_recent_first(snapshots: &mut [SharedSnapshot]) {
    snapshots.sort_by(|a, b| b.shared_at.cmp(&a.shared_at));
}

pub fn already_shared(snapshots: &[SharedSnapshot], client_id: Uuid, date: &str) -> bool {
    snapshots
        .iter()
        .any(|snapshot| snapshot.client_id == client_id && snapshot.date == date)
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn clamp_amount(value: f64) -> f64 {
    value.max(0.0)
}

fn coerce_amount(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .map(clamp_amount)
        .unwrap_or(0.0)
}
