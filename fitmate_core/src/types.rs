//! Core domain types for the FitMate system.
//!
//! This module defines the fundamental types used throughout the system:
//! - User profile and its enumerations
//! - Exercises and generated daily workouts
//! - Progress history (weight and workout entries)
//! - Streak, achievement and settings records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Profile Types
// ============================================================================

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Objective that shapes which exercise categories dominate a workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Endurance,
    GeneralFitness,
}

impl FitnessGoal {
    pub fn title(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "Weight Loss",
            FitnessGoal::MuscleGain => "Muscle Gain",
            FitnessGoal::Endurance => "Endurance",
            FitnessGoal::GeneralFitness => "General Fitness",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    /// Whether an exercise of the given difficulty is suitable for this level
    ///
    /// Beginners only get easy exercises, intermediates get easy or medium,
    /// advanced users get everything.
    pub fn allows(&self, difficulty: Difficulty) -> bool {
        match self {
            FitnessLevel::Beginner => difficulty == Difficulty::Easy,
            FitnessLevel::Intermediate => {
                matches!(difficulty, Difficulty::Easy | Difficulty::Medium)
            }
            FitnessLevel::Advanced => true,
        }
    }
}

/// The user's profile, created once at setup and replaced wholesale on edit
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Height in centimetres
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    pub fitness_goal: FitnessGoal,
    pub fitness_level: FitnessLevel,
    pub created_at: NaiveDate,
}

// ============================================================================
// Exercise Types
// ============================================================================

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseCategory {
    Warmup,
    Arms,
    Legs,
    Core,
    Cardio,
    FullBody,
    Cooldown,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 7] = [
        ExerciseCategory::Warmup,
        ExerciseCategory::Arms,
        ExerciseCategory::Legs,
        ExerciseCategory::Core,
        ExerciseCategory::Cardio,
        ExerciseCategory::FullBody,
        ExerciseCategory::Cooldown,
    ];

    /// Identifier as it appears in persisted records
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseCategory::Warmup => "warmup",
            ExerciseCategory::Arms => "arms",
            ExerciseCategory::Legs => "legs",
            ExerciseCategory::Core => "core",
            ExerciseCategory::Cardio => "cardio",
            ExerciseCategory::FullBody => "fullBody",
            ExerciseCategory::Cooldown => "cooldown",
        }
    }

    /// Parse a user-supplied category name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "warmup" | "warm-up" => Some(ExerciseCategory::Warmup),
            "arms" => Some(ExerciseCategory::Arms),
            "legs" => Some(ExerciseCategory::Legs),
            "core" => Some(ExerciseCategory::Core),
            "cardio" => Some(ExerciseCategory::Cardio),
            "fullbody" | "full-body" | "full_body" => Some(ExerciseCategory::FullBody),
            "cooldown" | "cool-down" => Some(ExerciseCategory::Cooldown),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// A catalog exercise (immutable, identified by id)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: ExerciseCategory,
    pub difficulty: Difficulty,
    /// Duration in minutes
    pub duration: u32,
    pub image_url: String,
    pub target_muscles: Vec<String>,
    pub instructions: Vec<String>,
}

/// The generated workout for one calendar day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyWorkout {
    pub id: String,
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
    pub completed: bool,
}

// ============================================================================
// Progress Types
// ============================================================================

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    pub date: NaiveDate,
    pub weight: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    pub completed: bool,
    pub calories_burned: u32,
}

/// Weight and workout history, each list date-unique and sorted ascending
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct UserProgress {
    #[serde(default)]
    pub weights: Vec<WeightEntry>,
    #[serde(default)]
    pub workouts: Vec<WorkoutEntry>,
}

// ============================================================================
// Streak, Achievement and Settings Types
// ============================================================================

/// Consecutive-day completion counters
///
/// `best_streak >= current_streak` always holds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserStreak {
    pub current_streak: u32,
    pub best_streak: u32,
    pub last_workout_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub earned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earned_date: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementUnit {
    Metric,
    Imperial,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub dark_mode: bool,
    pub reminders: bool,
    pub measurement_unit: MeasurementUnit,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            reminders: true,
            measurement_unit: MeasurementUnit::Metric,
        }
    }
}
