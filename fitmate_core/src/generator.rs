//! Daily workout generation.
//!
//! A workout is built from category blocks:
//! - 2 warmup exercises first
//! - a main block whose recipe depends on the fitness goal
//! - 2 cooldown exercises last
//!
//! Within a block, eligible exercises (matching category, difficulty allowed
//! by the fitness level) are shuffled and the first `count` are taken.
//! Shortages are not errors: the block simply contributes fewer exercises.

use crate::{
    estimate_calories_burned, Catalog, DailyWorkout, Exercise, ExerciseCategory, FitnessGoal,
    FitnessLevel, UserProfile,
};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

pub const WARMUP_COUNT: usize = 2;
pub const COOLDOWN_COUNT: usize = 2;

const ID_SUFFIX_LEN: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Main-block recipe for a goal, as ordered (category, count) pairs
pub fn main_block(goal: FitnessGoal) -> &'static [(ExerciseCategory, usize)] {
    use ExerciseCategory::*;

    match goal {
        FitnessGoal::WeightLoss => &[(Cardio, 3), (Core, 2), (FullBody, 2)],
        FitnessGoal::MuscleGain => &[(Arms, 2), (Legs, 2), (Core, 2), (FullBody, 1), (Cardio, 1)],
        FitnessGoal::Endurance => &[(Cardio, 3), (FullBody, 3), (Core, 1)],
        FitnessGoal::GeneralFitness => &[
            (Cardio, 2),
            (Arms, 1),
            (Legs, 1),
            (Core, 2),
            (FullBody, 1),
        ],
    }
}

/// Randomly pick up to `count` eligible exercises from one category
pub fn select_exercises<R: Rng + ?Sized>(
    catalog: &Catalog,
    category: ExerciseCategory,
    level: FitnessLevel,
    count: usize,
    rng: &mut R,
) -> Vec<Exercise> {
    let mut candidates: Vec<&Exercise> = catalog
        .by_category(category)
        .filter(|e| level.allows(e.difficulty))
        .collect();

    if candidates.len() < count {
        tracing::debug!(
            "Only {} eligible {} exercises for {:?} (wanted {})",
            candidates.len(),
            category.as_str(),
            level,
            count
        );
    }

    candidates.shuffle(rng);
    candidates.into_iter().take(count).cloned().collect()
}

/// Generate the ordered exercise list for a profile
pub fn generate_workout<R: Rng + ?Sized>(
    catalog: &Catalog,
    profile: &UserProfile,
    rng: &mut R,
) -> Vec<Exercise> {
    let level = profile.fitness_level;

    let mut workout =
        select_exercises(catalog, ExerciseCategory::Warmup, level, WARMUP_COUNT, rng);

    for &(category, count) in main_block(profile.fitness_goal) {
        workout.extend(select_exercises(catalog, category, level, count, rng));
    }

    workout.extend(select_exercises(
        catalog,
        ExerciseCategory::Cooldown,
        level,
        COOLDOWN_COUNT,
        rng,
    ));

    tracing::debug!(
        "Generated {} exercises for goal {:?} at level {:?}",
        workout.len(),
        profile.fitness_goal,
        level
    );

    workout
}

/// Generate a fresh, incomplete workout stamped with `date`
pub fn create_daily_workout<R: Rng + ?Sized>(
    catalog: &Catalog,
    profile: &UserProfile,
    date: NaiveDate,
    rng: &mut R,
) -> DailyWorkout {
    let exercises = generate_workout(catalog, profile, rng);
    let id = workout_id(date, rng);

    tracing::info!("Created workout {} with {} exercises", id, exercises.len());

    DailyWorkout {
        id,
        date,
        exercises,
        completed: false,
    }
}

fn workout_id<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("workout-{}-{}", date.format("%Y-%m-%d"), suffix)
}

/// At-a-glance figures for a workout
#[derive(Clone, Debug, PartialEq)]
pub struct WorkoutSummary {
    pub exercise_count: usize,
    pub total_duration_minutes: u32,
    pub estimated_calories: u32,
    pub category_counts: BTreeMap<ExerciseCategory, usize>,
}

impl WorkoutSummary {
    pub fn of(workout: &DailyWorkout, profile: &UserProfile) -> Self {
        let mut category_counts = BTreeMap::new();
        for exercise in &workout.exercises {
            *category_counts.entry(exercise.category).or_insert(0) += 1;
        }

        Self {
            exercise_count: workout.exercises.len(),
            total_duration_minutes: workout
                .exercises
                .iter()
                .fold(0u32, |total, e| total.saturating_add(e.duration)),
            estimated_calories: estimate_calories_burned(&workout.exercises, profile),
            category_counts,
        }
    }
}
