//! Application session: in-memory state backed by a progress store.
//!
//! A `Session` owns the loaded records, the typed store and the random
//! source used for workout generation. Every mutation is persisted before
//! the in-memory copy is updated.

use crate::achievements::{check_achievements, initialize_achievements, newly_earned};
use crate::catalog::validate_exercise;
use crate::generator::create_daily_workout;
use crate::streak::recalculate_streak;
use crate::store::{KeyValueStore, ProgressStore};
use crate::{
    estimate_calories_burned, get_default_catalog, Achievement, Catalog, DailyWorkout, Error,
    Exercise, Result, UserProfile, UserProgress, UserSettings, UserStreak,
};
use chrono::NaiveDate;
use rand::Rng;

/// Everything the user sees, loaded from the store
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub profile: Option<UserProfile>,
    pub progress: UserProgress,
    pub today_workout: Option<DailyWorkout>,
    pub streak: UserStreak,
    pub achievements: Vec<Achievement>,
}

pub struct Session<S, R> {
    store: ProgressStore<S>,
    rng: R,
    catalog: Catalog,
    state: AppState,
}

impl<S: KeyValueStore, R: Rng> Session<S, R> {
    /// Load every record and bring today's state up to date
    pub fn open(store: S, rng: R, today: NaiveDate) -> Result<Self> {
        let mut store = ProgressStore::new(store);

        let persisted = store.achievements();
        let seeded = persisted.is_empty();
        let achievements = initialize_achievements(persisted);
        if seeded {
            store.save_achievements(&achievements)?;
        }

        let catalog = get_default_catalog().with_custom(&store.custom_exercises());

        let state = AppState {
            profile: store.profile(),
            progress: store.progress(),
            today_workout: store.daily_workout_for(today),
            streak: store.streak(),
            achievements,
        };

        let mut session = Self {
            store,
            rng,
            catalog,
            state,
        };

        if session.state.profile.is_some() {
            if session.state.today_workout.is_none() {
                session.generate_workout(today)?;
            }
            session.evaluate_achievements(today)?;
        }

        Ok(session)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> UserSettings {
        self.store.settings()
    }

    pub fn save_settings(&mut self, settings: &UserSettings) -> Result<()> {
        self.store.save_settings(settings)
    }

    /// Validate and persist the profile, generating today's workout if missing
    pub fn save_profile(&mut self, profile: UserProfile, today: NaiveDate) -> Result<()> {
        profile.validate()?;
        self.store.save_profile(&profile)?;
        tracing::info!("Saved profile for {}", profile.name);
        self.state.profile = Some(profile);

        if self.store.daily_workout_for(today).is_none() {
            self.generate_workout(today)?;
        }
        Ok(())
    }

    /// Create and persist a fresh workout for `today`, replacing any existing one
    ///
    /// Returns `None` when there is no profile to generate for.
    pub fn generate_workout(&mut self, today: NaiveDate) -> Result<Option<DailyWorkout>> {
        let Some(profile) = self.state.profile.as_ref() else {
            tracing::warn!("No profile set, not generating a workout");
            return Ok(None);
        };

        let workout = create_daily_workout(&self.catalog, profile, today, &mut self.rng);
        self.store.save_daily_workout(&workout)?;
        self.state.today_workout = Some(workout.clone());
        Ok(Some(workout))
    }

    /// Mark today's workout complete (or not) and record it as progress
    ///
    /// Does nothing when the loaded workout is not dated `today`.
    pub fn complete_workout(
        &mut self,
        completed: bool,
        today: NaiveDate,
    ) -> Result<Vec<Achievement>> {
        let Some(mut workout) = self
            .state
            .today_workout
            .clone()
            .filter(|w| w.date == today)
        else {
            tracing::warn!("No workout for {}, nothing to complete", today);
            return Ok(Vec::new());
        };

        workout.completed = completed;
        self.store.save_daily_workout(&workout)?;

        let calories = match (&self.state.profile, completed) {
            (Some(profile), true) => Some(estimate_calories_burned(&workout.exercises, profile)),
            _ => None,
        };
        self.state.today_workout = Some(workout);

        self.update_progress(today, None, calories, Some(completed), today)
    }

    /// Merge a progress update for `date` and re-evaluate achievements
    ///
    /// The streak is only touched when `completed` is supplied. Entries dated
    /// before the last recorded workout rebuild the streak from history;
    /// everything else advances it incrementally. Returns the achievements
    /// earned by this update.
    pub fn update_progress(
        &mut self,
        date: NaiveDate,
        weight: Option<f64>,
        calories: Option<u32>,
        completed: Option<bool>,
        today: NaiveDate,
    ) -> Result<Vec<Achievement>> {
        let mut progress = self.state.progress.clone();
        progress.record(date, weight, calories, completed);
        self.store.save_progress(&progress)?;
        self.state.progress = progress;

        if let Some(completed) = completed {
            let mut streak = self.state.streak.clone();
            let backfill = streak.last_workout_date.is_some_and(|last| date < last);

            let changed = if backfill {
                let mut rebuilt = recalculate_streak(&self.state.progress.workouts);
                rebuilt.best_streak = rebuilt.best_streak.max(streak.best_streak);
                tracing::info!("Backfilled entry for {}, rebuilt streak {:?}", date, rebuilt);
                let changed = rebuilt != streak;
                streak = rebuilt;
                changed
            } else {
                streak.record_completion(date, completed)
            };

            if changed {
                self.store.save_streak(&streak)?;
                self.state.streak = streak;
            }
        }

        self.evaluate_achievements(today)
    }

    /// Persist a user-defined exercise and make it available for generation
    pub fn add_custom_exercise(&mut self, exercise: Exercise) -> Result<()> {
        let errors = validate_exercise(&exercise);
        if !errors.is_empty() {
            return Err(Error::CatalogValidation(errors.join("; ")));
        }
        if self.catalog.get(&exercise.id).is_some() {
            return Err(Error::Other(format!(
                "Exercise id '{}' already exists",
                exercise.id
            )));
        }
        self.store.add_custom_exercise(&exercise)?;
        tracing::info!("Added custom exercise {}", exercise.id);
        self.catalog = self.catalog.with_custom(std::slice::from_ref(&exercise));
        Ok(())
    }

    /// Clear everything except settings
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset()?;
        let achievements = initialize_achievements(Vec::new());
        self.store.save_achievements(&achievements)?;
        self.state = AppState {
            achievements,
            ..AppState::default()
        };
        self.catalog = get_default_catalog().clone();
        Ok(())
    }

    fn evaluate_achievements(&mut self, today: NaiveDate) -> Result<Vec<Achievement>> {
        let Some(profile) = self.state.profile.as_ref() else {
            return Ok(Vec::new());
        };

        let mut achievements = self.state.achievements.clone();
        let changed = check_achievements(
            &mut achievements,
            Some(profile),
            &self.state.progress,
            &self.state.streak,
            today,
        );
        if !changed {
            return Ok(Vec::new());
        }

        self.store.save_achievements(&achievements)?;
        let earned = newly_earned(&self.state.achievements, &achievements);
        self.state.achievements = achievements;
        Ok(earned)
    }
}
