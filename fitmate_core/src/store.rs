//! Key-value persistence for profile, workouts, progress and settings.
//!
//! Every record lives under its own stable key as a JSON blob wrapped in a
//! schema-version envelope. Missing or unreadable blobs degrade to the
//! record's documented default instead of failing.

use crate::{
    Achievement, DailyWorkout, Error, Exercise, Result, UserProfile, UserProgress, UserSettings,
    UserStreak, WeightEntry, WorkoutEntry,
};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const PROFILE_KEY: &str = "fitmate-user-profile";
pub const DAILY_WORKOUTS_KEY: &str = "fitmate-daily-workouts";
pub const PROGRESS_KEY: &str = "fitmate-user-progress";
pub const SETTINGS_KEY: &str = "fitmate-user-settings";
pub const STREAK_KEY: &str = "fitmate-user-streak";
pub const ACHIEVEMENTS_KEY: &str = "fitmate-user-achievements";
pub const CUSTOM_EXERCISES_KEY: &str = "fitmate-custom-exercises";

/// Keys cleared by a reset (settings survive)
pub const RESETTABLE_KEYS: [&str; 6] = [
    PROFILE_KEY,
    DAILY_WORKOUTS_KEY,
    PROGRESS_KEY,
    STREAK_KEY,
    ACHIEVEMENTS_KEY,
    CUSTOM_EXERCISES_KEY,
];

/// Current blob schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Raw string-keyed storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store, mostly for tests
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
///
/// Reads take a shared lock; writes go through a locked temp file that is
/// synced and atomically renamed over the target.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(Error::Store(format!("Invalid key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Temp file in the same directory so the rename stays atomic
        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} to {:?}", key, path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Typed access to the persisted records over any `KeyValueStore`
#[derive(Debug)]
pub struct ProgressStore<S> {
    inner: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Load a record, falling back to `default` when absent or unreadable
    ///
    /// Accepts the versioned envelope as well as bare, unversioned blobs.
    fn load_or<T, F>(&self, key: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let raw = match self.inner.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default(),
            Err(e) => {
                tracing::warn!("Unable to read {}: {}. Using defaults.", key, e);
                return default();
            }
        };

        if let Ok(envelope) = serde_json::from_str::<Envelope<T>>(&raw) {
            if envelope.version <= SCHEMA_VERSION {
                return envelope.data;
            }
            tracing::warn!(
                "{} has schema version {} (newer than {}). Using defaults.",
                key,
                envelope.version,
                SCHEMA_VERSION
            );
            return default();
        }

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                tracing::debug!("Loaded unversioned {}", key);
                value
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}. Using defaults.", key, e);
                default()
            }
        }
    }

    fn store<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let contents = serde_json::to_string(&EnvelopeRef {
            version: SCHEMA_VERSION,
            data: value,
        })?;
        self.inner.set(key, &contents)
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.load_or(PROFILE_KEY, || None)
    }

    pub fn save_profile(&mut self, profile: &UserProfile) -> Result<()> {
        self.store(PROFILE_KEY, profile)
    }

    pub fn daily_workouts(&self) -> Vec<DailyWorkout> {
        self.load_or(DAILY_WORKOUTS_KEY, Vec::new)
    }

    pub fn daily_workout_for(&self, date: NaiveDate) -> Option<DailyWorkout> {
        self.daily_workouts().into_iter().find(|w| w.date == date)
    }

    /// Insert or replace the workout stored for the same date
    pub fn save_daily_workout(&mut self, workout: &DailyWorkout) -> Result<()> {
        let mut workouts = self.daily_workouts();
        match workouts.iter_mut().find(|w| w.date == workout.date) {
            Some(existing) => *existing = workout.clone(),
            None => workouts.push(workout.clone()),
        }
        self.store(DAILY_WORKOUTS_KEY, &workouts)
    }

    pub fn progress(&self) -> UserProgress {
        self.load_or(PROGRESS_KEY, UserProgress::default)
    }

    pub fn save_progress(&mut self, progress: &UserProgress) -> Result<()> {
        self.store(PROGRESS_KEY, progress)
    }

    pub fn save_weight_entry(&mut self, entry: WeightEntry) -> Result<()> {
        let mut progress = self.progress();
        progress.upsert_weight(entry);
        self.save_progress(&progress)
    }

    pub fn save_workout_entry(&mut self, entry: WorkoutEntry) -> Result<()> {
        let mut progress = self.progress();
        progress.upsert_workout(entry);
        self.save_progress(&progress)
    }

    pub fn settings(&self) -> UserSettings {
        self.load_or(SETTINGS_KEY, UserSettings::default)
    }

    pub fn save_settings(&mut self, settings: &UserSettings) -> Result<()> {
        self.store(SETTINGS_KEY, settings)
    }

    pub fn streak(&self) -> UserStreak {
        self.load_or(STREAK_KEY, UserStreak::default)
    }

    pub fn save_streak(&mut self, streak: &UserStreak) -> Result<()> {
        self.store(STREAK_KEY, streak)
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        self.load_or(ACHIEVEMENTS_KEY, Vec::new)
    }

    pub fn save_achievements(&mut self, achievements: &[Achievement]) -> Result<()> {
        self.store(ACHIEVEMENTS_KEY, &achievements)
    }

    pub fn custom_exercises(&self) -> Vec<Exercise> {
        self.load_or(CUSTOM_EXERCISES_KEY, Vec::new)
    }

    pub fn add_custom_exercise(&mut self, exercise: &Exercise) -> Result<()> {
        let mut exercises = self.custom_exercises();
        exercises.push(exercise.clone());
        self.store(CUSTOM_EXERCISES_KEY, &exercises)
    }

    /// Remove every record except settings
    pub fn reset(&mut self) -> Result<()> {
        for key in RESETTABLE_KEYS {
            self.inner.remove(key)?;
        }
        tracing::info!("Reset all data (settings kept)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FitnessGoal, FitnessLevel, Gender, MeasurementUnit};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile {
            name: "Robin".into(),
            age: 33,
            gender: Gender::Female,
            height: 168.0,
            weight: 64.0,
            fitness_goal: FitnessGoal::WeightLoss,
            fitness_level: FitnessLevel::Intermediate,
            created_at: day("2025-01-01"),
        }
    }

    fn workout(date: &str, id: &str) -> DailyWorkout {
        DailyWorkout {
            id: id.into(),
            date: day(date),
            exercises: vec![],
            completed: false,
        }
    }

    #[test]
    fn test_defaults_on_absence() {
        let store = ProgressStore::new(MemoryStore::new());
        assert_eq!(store.profile(), None);
        assert!(store.daily_workouts().is_empty());
        assert_eq!(store.progress(), UserProgress::default());
        assert_eq!(store.settings(), UserSettings::default());
        assert_eq!(store.streak(), UserStreak::default());
        assert!(store.achievements().is_empty());
        assert!(store.custom_exercises().is_empty());
    }

    #[test]
    fn test_blobs_are_versioned() {
        let mut store = ProgressStore::new(MemoryStore::new());
        store.save_profile(&profile()).unwrap();

        let raw = store.inner().get(PROFILE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["data"]["fitnessGoal"], "weight_loss");
        assert_eq!(store.profile(), Some(profile()));
    }

    #[test]
    fn test_reads_unversioned_blob() {
        let mut kv = MemoryStore::new();
        kv.set(
            STREAK_KEY,
            r#"{"currentStreak":4,"bestStreak":6,"lastWorkoutDate":"2025-02-03"}"#,
        )
        .unwrap();

        let store = ProgressStore::new(kv);
        assert_eq!(
            store.streak(),
            UserStreak {
                current_streak: 4,
                best_streak: 6,
                last_workout_date: Some(day("2025-02-03")),
            }
        );
    }

    #[test]
    fn test_newer_schema_and_garbage_fall_back_to_defaults() {
        let mut kv = MemoryStore::new();
        kv.set(SETTINGS_KEY, r#"{"version":99,"data":{"darkMode":true,"reminders":false,"measurementUnit":"imperial"}}"#)
            .unwrap();
        kv.set(PROGRESS_KEY, "{ invalid json }").unwrap();

        let store = ProgressStore::new(kv);
        assert_eq!(store.settings(), UserSettings::default());
        assert_eq!(store.progress(), UserProgress::default());
    }

    #[test]
    fn test_daily_workout_upsert_by_date() {
        let mut store = ProgressStore::new(MemoryStore::new());
        store.save_daily_workout(&workout("2025-01-01", "a")).unwrap();
        store.save_daily_workout(&workout("2025-01-02", "b")).unwrap();
        store.save_daily_workout(&workout("2025-01-01", "c")).unwrap();

        assert_eq!(store.daily_workouts().len(), 2);
        assert_eq!(store.daily_workout_for(day("2025-01-01")).unwrap().id, "c");
        assert!(store.daily_workout_for(day("2025-01-03")).is_none());
    }

    #[test]
    fn test_entry_upserts() {
        let mut store = ProgressStore::new(MemoryStore::new());
        store
            .save_weight_entry(WeightEntry { date: day("2025-01-02"), weight: 70.0 })
            .unwrap();
        store
            .save_weight_entry(WeightEntry { date: day("2025-01-01"), weight: 71.0 })
            .unwrap();
        store
            .save_workout_entry(WorkoutEntry {
                date: day("2025-01-01"),
                completed: true,
                calories_burned: 180,
            })
            .unwrap();

        let progress = store.progress();
        assert_eq!(progress.weights[0].date, day("2025-01-01"));
        assert_eq!(progress.workouts.len(), 1);
    }

    #[test]
    fn test_reset_keeps_settings() {
        let mut store = ProgressStore::new(MemoryStore::new());
        let settings = UserSettings {
            dark_mode: true,
            reminders: false,
            measurement_unit: MeasurementUnit::Imperial,
        };
        store.save_settings(&settings).unwrap();
        store.save_profile(&profile()).unwrap();
        store.save_streak(&UserStreak { current_streak: 2, best_streak: 2, last_workout_date: None }).unwrap();

        store.reset().unwrap();

        assert_eq!(store.profile(), None);
        assert_eq!(store.streak(), UserStreak::default());
        assert_eq!(store.settings(), settings);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = ProgressStore::new(JsonFileStore::new(temp_dir.path().join("data")));

        store.save_profile(&profile()).unwrap();
        assert!(temp_dir.path().join("data/fitmate-user-profile.json").exists());

        let reopened = ProgressStore::new(JsonFileStore::new(temp_dir.path().join("data")));
        assert_eq!(reopened.profile(), Some(profile()));
    }

    #[test]
    fn test_file_store_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut kv = JsonFileStore::new(temp_dir.path());
        kv.set(STREAK_KEY, "{}").unwrap();
        kv.set(STREAK_KEY, "{}").unwrap();

        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["fitmate-user-streak.json".to_string()]);
    }

    #[test]
    fn test_file_store_remove_missing_is_ok() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut kv = JsonFileStore::new(temp_dir.path());
        kv.remove(PROFILE_KEY).unwrap();
        assert_eq!(kv.get(PROFILE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut kv = JsonFileStore::new(temp_dir.path());
        assert!(matches!(kv.set("../escape", "{}"), Err(Error::Store(_))));
    }

    #[test]
    fn test_corrupted_file_falls_back_to_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("fitmate-user-progress.json"), "{ invalid json }}}").unwrap();

        let store = ProgressStore::new(JsonFileStore::new(temp_dir.path()));
        assert_eq!(store.progress(), UserProgress::default());
    }
}
