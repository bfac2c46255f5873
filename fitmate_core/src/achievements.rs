//! Achievement definitions and evaluation.
//!
//! Five fixed achievements are seeded on first use. Evaluation only ever
//! flips `earned` from false to true; an earned achievement is never
//! re-checked.

use crate::{Achievement, FitnessGoal, UserProfile, UserProgress, UserStreak};
use chrono::NaiveDate;

pub const FIRST_WORKOUT: &str = "first-workout";
pub const THREE_DAY_STREAK: &str = "three-day-streak";
pub const SEVEN_DAY_STREAK: &str = "seven-day-streak";
pub const WEIGHT_GOAL: &str = "weight-goal";
pub const TEN_WORKOUTS: &str = "ten-workouts";

/// Fraction of the first recorded weight the latest weight must reach
const WEIGHT_GOAL_RATIO: f64 = 0.95;

fn definition(id: &str, name: &str, description: &str, icon: &str) -> Achievement {
    Achievement {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        icon: icon.into(),
        earned: false,
        earned_date: None,
    }
}

/// The full, unearned achievement list
pub fn default_achievements() -> Vec<Achievement> {
    vec![
        definition(FIRST_WORKOUT, "First Step", "Complete your first workout", "award"),
        definition(
            THREE_DAY_STREAK,
            "Consistency",
            "Complete workouts for 3 days in a row",
            "flame",
        ),
        definition(
            SEVEN_DAY_STREAK,
            "Week Warrior",
            "Complete workouts for 7 days in a row",
            "trophy",
        ),
        definition(WEIGHT_GOAL, "Goal Getter", "Reach your target weight", "target"),
        definition(TEN_WORKOUTS, "Dedicated", "Complete 10 workouts", "medal"),
    ]
}

/// Return the persisted list, or the default list when nothing is stored yet
pub fn initialize_achievements(existing: Vec<Achievement>) -> Vec<Achievement> {
    if existing.is_empty() {
        tracing::info!("Seeding default achievements");
        default_achievements()
    } else {
        existing
    }
}

fn weight_goal_reached(profile: Option<&UserProfile>, progress: &UserProgress) -> bool {
    let Some(profile) = profile else {
        return false;
    };
    if profile.fitness_goal != FitnessGoal::WeightLoss || progress.weights.len() < 2 {
        return false;
    }

    let (Some(first), Some(last)) = (progress.weights.first(), progress.weights.last()) else {
        return false;
    };

    first.weight > 0.0 && last.weight <= first.weight * WEIGHT_GOAL_RATIO
}

/// Evaluate every unearned achievement and mark the satisfied ones
///
/// Newly earned achievements get `today` as their earned date. Returns
/// whether anything changed, so callers only persist when needed.
pub fn check_achievements(
    achievements: &mut [Achievement],
    profile: Option<&UserProfile>,
    progress: &UserProgress,
    streak: &UserStreak,
    today: NaiveDate,
) -> bool {
    let completed_workouts = progress.workouts.iter().filter(|w| w.completed).count();
    let mut changed = false;

    for achievement in achievements.iter_mut().filter(|a| !a.earned) {
        let satisfied = match achievement.id.as_str() {
            FIRST_WORKOUT => completed_workouts >= 1,
            THREE_DAY_STREAK => streak.current_streak >= 3,
            SEVEN_DAY_STREAK => streak.current_streak >= 7,
            WEIGHT_GOAL => weight_goal_reached(profile, progress),
            TEN_WORKOUTS => completed_workouts >= 10,
            other => {
                tracing::debug!("No rule for achievement '{}'", other);
                false
            }
        };

        if satisfied {
            achievement.earned = true;
            achievement.earned_date = Some(today);
            changed = true;
            tracing::info!("Achievement earned: {}", achievement.name);
        }
    }

    changed
}

/// Achievements earned in `current` that were not yet earned in `previous`
pub fn newly_earned(previous: &[Achievement], current: &[Achievement]) -> Vec<Achievement> {
    current
        .iter()
        .filter(|c| {
            c.earned
                && previous
                    .iter()
                    .find(|p| p.id == c.id)
                    .map_or(false, |p| !p.earned)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FitnessLevel, Gender, WeightEntry, WorkoutEntry};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn profile(goal: FitnessGoal) -> UserProfile {
        UserProfile {
            name: "Test".into(),
            age: 40,
            gender: Gender::Female,
            height: 165.0,
            weight: 100.0,
            fitness_goal: goal,
            fitness_level: FitnessLevel::Beginner,
            created_at: day("2025-01-01"),
        }
    }

    fn weights(values: &[f64]) -> UserProgress {
        UserProgress {
            weights: values
                .iter()
                .enumerate()
                .map(|(i, w)| WeightEntry {
                    date: day("2025-01-01") + chrono::Duration::days(i as i64),
                    weight: *w,
                })
                .collect(),
            workouts: vec![],
        }
    }

    fn completed_workouts(n: usize) -> UserProgress {
        UserProgress {
            weights: vec![],
            workouts: (0..n)
                .map(|i| WorkoutEntry {
                    date: day("2025-01-01") + chrono::Duration::days(i as i64),
                    completed: true,
                    calories_burned: 100,
                })
                .collect(),
        }
    }

    fn earned(achievements: &[Achievement], id: &str) -> bool {
        achievements.iter().find(|a| a.id == id).unwrap().earned
    }

    #[test]
    fn test_seeding() {
        let seeded = initialize_achievements(vec![]);
        assert_eq!(seeded.len(), 5);
        assert!(seeded.iter().all(|a| !a.earned && a.earned_date.is_none()));

        let mut existing = default_achievements();
        existing[0].earned = true;
        let kept = initialize_achievements(existing.clone());
        assert_eq!(kept, existing);
    }

    #[test]
    fn test_first_workout_earned_once() {
        let today = day("2025-02-01");
        let mut achievements = default_achievements();
        let streak = UserStreak::default();
        let p = profile(FitnessGoal::GeneralFitness);

        let mut progress = UserProgress::default();
        progress.workouts.push(WorkoutEntry {
            date: day("2025-01-31"),
            completed: false,
            calories_burned: 0,
        });
        assert!(!check_achievements(&mut achievements, Some(&p), &progress, &streak, today));
        assert!(!earned(&achievements, FIRST_WORKOUT));

        progress.workouts[0].completed = true;
        assert!(check_achievements(&mut achievements, Some(&p), &progress, &streak, today));
        assert!(earned(&achievements, FIRST_WORKOUT));

        // Never reverts, date is kept from the first evaluation
        progress.workouts[0].completed = false;
        let later = day("2025-03-01");
        assert!(!check_achievements(&mut achievements, Some(&p), &progress, &streak, later));
        let first = achievements.iter().find(|a| a.id == FIRST_WORKOUT).unwrap();
        assert!(first.earned);
        assert_eq!(first.earned_date, Some(today));
    }

    #[test]
    fn test_streak_achievements() {
        let mut achievements = default_achievements();
        let progress = UserProgress::default();
        let mut streak = UserStreak {
            current_streak: 3,
            best_streak: 3,
            last_workout_date: Some(day("2025-01-03")),
        };

        check_achievements(&mut achievements, None, &progress, &streak, day("2025-01-03"));
        assert!(earned(&achievements, THREE_DAY_STREAK));
        assert!(!earned(&achievements, SEVEN_DAY_STREAK));

        streak.current_streak = 7;
        streak.best_streak = 7;
        check_achievements(&mut achievements, None, &progress, &streak, day("2025-01-07"));
        assert!(earned(&achievements, SEVEN_DAY_STREAK));
    }

    #[test]
    fn test_weight_goal_reached_at_five_percent() {
        let mut achievements = default_achievements();
        let p = profile(FitnessGoal::WeightLoss);
        let progress = weights(&[100.0, 95.0]);

        check_achievements(&mut achievements, Some(&p), &progress, &UserStreak::default(), day("2025-01-02"));
        assert!(earned(&achievements, WEIGHT_GOAL));
    }

    #[test]
    fn test_weight_goal_not_reached() {
        let mut achievements = default_achievements();
        let p = profile(FitnessGoal::WeightLoss);
        let progress = weights(&[100.0, 96.0]);

        check_achievements(&mut achievements, Some(&p), &progress, &UserStreak::default(), day("2025-01-02"));
        assert!(!earned(&achievements, WEIGHT_GOAL));
    }

    #[test]
    fn test_weight_goal_requires_weight_loss_goal_and_profile() {
        let progress = weights(&[100.0, 90.0]);
        let streak = UserStreak::default();

        let mut achievements = default_achievements();
        let p = profile(FitnessGoal::MuscleGain);
        check_achievements(&mut achievements, Some(&p), &progress, &streak, day("2025-01-02"));
        assert!(!earned(&achievements, WEIGHT_GOAL));

        check_achievements(&mut achievements, None, &progress, &streak, day("2025-01-02"));
        assert!(!earned(&achievements, WEIGHT_GOAL));
    }

    #[test]
    fn test_weight_goal_guards() {
        let p = profile(FitnessGoal::WeightLoss);
        let streak = UserStreak::default();

        let mut achievements = default_achievements();
        check_achievements(&mut achievements, Some(&p), &weights(&[90.0]), &streak, day("2025-01-02"));
        assert!(!earned(&achievements, WEIGHT_GOAL));

        check_achievements(&mut achievements, Some(&p), &weights(&[0.0, 0.0]), &streak, day("2025-01-02"));
        assert!(!earned(&achievements, WEIGHT_GOAL));
    }

    #[test]
    fn test_ten_workouts() {
        let streak = UserStreak::default();
        let mut achievements = default_achievements();

        check_achievements(&mut achievements, None, &completed_workouts(9), &streak, day("2025-01-09"));
        assert!(!earned(&achievements, TEN_WORKOUTS));
        assert!(earned(&achievements, FIRST_WORKOUT));

        check_achievements(&mut achievements, None, &completed_workouts(10), &streak, day("2025-01-10"));
        assert!(earned(&achievements, TEN_WORKOUTS));
    }

    #[test]
    fn test_unknown_achievements_are_left_alone() {
        let mut achievements = vec![definition("mystery", "Mystery", "?", "question")];
        let changed = check_achievements(
            &mut achievements,
            None,
            &completed_workouts(20),
            &UserStreak::default(),
            day("2025-01-01"),
        );
        assert!(!changed);
        assert!(!achievements[0].earned);
    }

    #[test]
    fn test_newly_earned_diff() {
        let previous = default_achievements();
        let mut current = previous.clone();
        current[0].earned = true;
        current[0].earned_date = Some(day("2025-01-01"));

        let fresh = newly_earned(&previous, &current);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].id, FIRST_WORKOUT);

        // Already earned before, or missing from previous: not new
        assert!(newly_earned(&current, &current).is_empty());
        assert!(newly_earned(&[], &current).is_empty());
    }
}
