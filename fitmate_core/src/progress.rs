//! Progress history bookkeeping and statistics.
//!
//! Weight and workout entries are keyed by date: recording an entry for a
//! date that already exists updates it in place. Both lists stay sorted
//! ascending by date.

use crate::{UserProgress, WeightEntry, WorkoutEntry};
use chrono::{Duration, NaiveDate};
use std::str::FromStr;

impl UserProgress {
    /// Insert or replace the weight entry for its date
    pub fn upsert_weight(&mut self, entry: WeightEntry) {
        match self.weights.iter_mut().find(|e| e.date == entry.date) {
            Some(existing) => *existing = entry,
            None => {
                self.weights.push(entry);
                self.weights.sort_by_key(|e| e.date);
            }
        }
    }

    /// Insert or replace the workout entry for its date
    pub fn upsert_workout(&mut self, entry: WorkoutEntry) {
        match self.workouts.iter_mut().find(|e| e.date == entry.date) {
            Some(existing) => *existing = entry,
            None => {
                self.workouts.push(entry);
                self.workouts.sort_by_key(|e| e.date);
            }
        }
    }

    /// Merge a partial progress update for `date`
    ///
    /// - `weight` is recorded only when present and positive
    /// - the workout entry is touched when `calories` or `completed` is
    ///   present; absent fields keep their previous value (or the
    ///   `{completed: false, calories: 0}` default for a new entry)
    pub fn record(
        &mut self,
        date: NaiveDate,
        weight: Option<f64>,
        calories: Option<u32>,
        completed: Option<bool>,
    ) {
        if let Some(weight) = weight.filter(|w| *w > 0.0) {
            self.upsert_weight(WeightEntry { date, weight });
        }

        if calories.is_none() && completed.is_none() {
            return;
        }

        let mut entry = self
            .workout_on(date)
            .cloned()
            .unwrap_or(WorkoutEntry {
                date,
                completed: false,
                calories_burned: 0,
            });
        if let Some(completed) = completed {
            entry.completed = completed;
        }
        if let Some(calories) = calories {
            entry.calories_burned = calories;
        }
        self.upsert_workout(entry);
    }

    pub fn workout_on(&self, date: NaiveDate) -> Option<&WorkoutEntry> {
        self.workouts.iter().find(|e| e.date == date)
    }

    pub fn completed_workouts(&self) -> usize {
        self.workouts.iter().filter(|w| w.completed).count()
    }

    /// Entries on or after the timeframe's start date
    pub fn within(&self, timeframe: Timeframe, today: NaiveDate) -> UserProgress {
        let start = timeframe.start(today);
        let keep = |date: NaiveDate| start.map_or(true, |s| date >= s);

        UserProgress {
            weights: self.weights.iter().filter(|e| keep(e.date)).cloned().collect(),
            workouts: self.workouts.iter().filter(|e| keep(e.date)).cloned().collect(),
        }
    }
}

/// Aggregate figures over a progress history
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressStats {
    pub workouts_completed: usize,
    pub total_calories: u64,
    /// Last minus first recorded weight; 0 with fewer than two entries
    pub weight_change: f64,
}

impl From<&UserProgress> for ProgressStats {
    fn from(progress: &UserProgress) -> Self {
        let weight_change = match (progress.weights.first(), progress.weights.last()) {
            (Some(first), Some(last)) if progress.weights.len() >= 2 => last.weight - first.weight,
            _ => 0.0,
        };

        Self {
            workouts_completed: progress.completed_workouts(),
            total_calories: progress
                .workouts
                .iter()
                .map(|w| u64::from(w.calories_burned))
                .sum(),
            weight_change,
        }
    }
}

/// Trailing window used for charts and exports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Timeframe {
    Week,
    Month,
    Quarter,
    #[default]
    All,
}

impl Timeframe {
    /// First date inside the window, or None for the whole history
    pub fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        let days = match self {
            Timeframe::Week => 7,
            Timeframe::Month => 30,
            Timeframe::Quarter => 90,
            Timeframe::All => return None,
        };
        Some(today - Duration::days(days))
    }
}

impl FromStr for Timeframe {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "7d" | "7days" | "week" => Ok(Timeframe::Week),
            "30d" | "30days" | "month" => Ok(Timeframe::Month),
            "90d" | "90days" | "quarter" => Ok(Timeframe::Quarter),
            "all" => Ok(Timeframe::All),
            other => Err(crate::Error::Other(format!("Unknown timeframe: {}", other))),
        }
    }
}
