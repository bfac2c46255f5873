//! Consecutive-day streak tracking.
//!
//! Two paths keep a `UserStreak` up to date:
//! - `record_completion` applies one completion incrementally
//! - `recalculate_streak` rebuilds the streak from the full workout history
//!
//! Both treat `best_streak` as the historical maximum run.

use crate::{UserStreak, WorkoutEntry};
use chrono::NaiveDate;

impl UserStreak {
    /// Apply a workout completion for `date`
    ///
    /// Rules (only when `completed` is true):
    /// 1. No previous workout, or previous workout the day before → increment
    /// 2. Previous workout on the same day → unchanged
    /// 3. Anything else (gap, or a date before the last one) → reset to 1
    ///
    /// Returns whether the streak record changed.
    pub fn record_completion(&mut self, date: NaiveDate, completed: bool) -> bool {
        if !completed {
            return false;
        }

        let before = self.clone();

        match self.last_workout_date {
            None => self.current_streak += 1,
            Some(last) if last.succ_opt() == Some(date) => self.current_streak += 1,
            Some(last) if last == date => {
                tracing::debug!("Workout on {} already counted", date);
            }
            Some(last) => {
                tracing::info!(
                    "Streak broken (last workout {}, now {}), resetting",
                    last,
                    date
                );
                self.current_streak = 1;
            }
        }

        self.best_streak = self.best_streak.max(self.current_streak);
        self.last_workout_date = Some(date);

        tracing::debug!(
            "Streak now {} (best {})",
            self.current_streak,
            self.best_streak
        );

        *self != before
    }
}

/// Rebuild a streak from workout history
///
/// Only completed entries count, and several entries on one day count once.
/// `current_streak` is the run of consecutive days ending at the most recent
/// completed entry; `best_streak` is the longest run anywhere in the history.
pub fn recalculate_streak(workouts: &[WorkoutEntry]) -> UserStreak {
    let mut days: Vec<NaiveDate> = workouts
        .iter()
        .filter(|w| w.completed)
        .map(|w| w.date)
        .collect();
    days.sort();
    days.dedup();

    let Some(&last) = days.last() else {
        return UserStreak::default();
    };

    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &day in &days {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(day);
    }

    // `run` is the trailing run once the loop finishes
    let streak = UserStreak {
        current_streak: run,
        best_streak: best,
        last_workout_date: Some(last),
    };

    tracing::debug!(
        "Recalculated streak from {} completed days: {:?}",
        days.len(),
        streak
    );

    streak
}
