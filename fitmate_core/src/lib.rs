#![forbid(unsafe_code)]

//! Core domain model and business logic for FitMate.
//!
//! This crate provides:
//! - Domain types (profiles, exercises, workouts, progress, streaks)
//! - The built-in exercise catalog
//! - Workout generation and calorie estimation
//! - Streak tracking and achievement evaluation
//! - Persistence (versioned JSON key-value store, CSV export)

pub mod types;
pub mod error;
pub mod catalog;
pub mod calories;
pub mod generator;
pub mod streak;
pub mod achievements;
pub mod progress;
pub mod profile;
pub mod tips;
pub mod export;
pub mod store;
pub mod session;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog, ExerciseFilter};
pub use calories::estimate_calories_burned;
pub use generator::{create_daily_workout, generate_workout, WorkoutSummary};
pub use streak::recalculate_streak;
pub use achievements::check_achievements;
pub use progress::{ProgressStats, Timeframe};
pub use profile::BmiCategory;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, ProgressStore};
pub use session::{AppState, Session};
pub use config::Config;
