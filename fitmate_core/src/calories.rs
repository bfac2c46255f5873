//! Calorie estimation from MET values.
//!
//! `calories = MET × weight (kg) × duration (hours)`, summed over the
//! workout and rounded once at the end.

use crate::{Exercise, ExerciseCategory, UserProfile};

/// Metabolic equivalent for an exercise category
pub fn met_value(category: ExerciseCategory) -> f64 {
    match category {
        ExerciseCategory::Warmup => 2.5,
        ExerciseCategory::Cooldown => 2.0,
        ExerciseCategory::Arms => 3.5,
        ExerciseCategory::Legs => 4.0,
        ExerciseCategory::Core => 3.5,
        ExerciseCategory::Cardio => 6.0,
        ExerciseCategory::FullBody => 5.0,
    }
}

/// Estimate energy expenditure for a list of exercises
///
/// An empty list yields 0. Rounding happens after summation, not per
/// exercise.
pub fn estimate_calories_burned(exercises: &[Exercise], profile: &UserProfile) -> u32 {
    let total: f64 = exercises
        .iter()
        .map(|exercise| {
            let hours = f64::from(exercise.duration) / 60.0;
            met_value(exercise.category) * profile.weight * hours
        })
        .sum();

    total.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{get_default_catalog, FitnessGoal, FitnessLevel, Gender};
    use chrono::NaiveDate;

    fn profile(weight: f64) -> UserProfile {
        UserProfile {
            name: "Test".into(),
            age: 30,
            gender: Gender::Female,
            height: 170.0,
            weight,
            fitness_goal: FitnessGoal::GeneralFitness,
            fitness_level: FitnessLevel::Intermediate,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    fn with_duration(id: &str, minutes: u32) -> Exercise {
        let mut exercise = get_default_catalog().get(id).unwrap().clone();
        exercise.duration = minutes;
        exercise
    }

    #[test]
    fn test_empty_workout_burns_nothing() {
        assert_eq!(estimate_calories_burned(&[], &profile(70.0)), 0);
        assert_eq!(estimate_calories_burned(&[], &profile(0.0)), 0);
    }

    #[test]
    fn test_single_cardio_half_hour() {
        let exercises = vec![with_duration("cardio-1", 30)];
        // 6.0 × 70 × 0.5
        assert_eq!(estimate_calories_burned(&exercises, &profile(70.0)), 210);
    }

    #[test]
    fn test_rounds_after_summation() {
        // Each cooldown minute at 1 kg is 2.0/60 ≈ 0.033 kcal; per-exercise
        // rounding would give 0 for each, summing first gives 1.
        let exercises: Vec<_> = (0..20).map(|_| with_duration("cooldown-1", 1)).collect();
        assert_eq!(estimate_calories_burned(&exercises, &profile(1.0)), 1);
    }

    #[test]
    fn test_linear_in_weight() {
        let exercises: Vec<_> = get_default_catalog().exercises().to_vec();
        let single = estimate_calories_burned(&exercises, &profile(60.0));
        let double = estimate_calories_burned(&exercises, &profile(120.0));
        assert!((i64::from(double) - 2 * i64::from(single)).abs() <= 1);
    }

    #[test]
    fn test_met_table() {
        assert_eq!(met_value(ExerciseCategory::Cardio), 6.0);
        assert_eq!(met_value(ExerciseCategory::FullBody), 5.0);
        assert_eq!(met_value(ExerciseCategory::Cooldown), 2.0);
    }
}
