//! Built-in exercise catalog.
//!
//! This module provides the static exercise library used for workout
//! generation, plus filtering and validation helpers.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// An ordered collection of exercises
///
/// Order is preserved so that seeded generation is reproducible.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    exercises: Vec<Exercise>,
}

/// Exercise library filter; all set criteria must match
#[derive(Clone, Debug, Default)]
pub struct ExerciseFilter {
    /// Case-insensitive substring matched against name or description
    pub search: Option<String>,
    pub category: Option<ExerciseCategory>,
    pub difficulty: Option<Difficulty>,
}

impl ExerciseFilter {
    pub fn matches(&self, exercise: &Exercise) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                exercise.name.to_lowercase().contains(&term)
                    || exercise.description.to_lowercase().contains(&term)
            }
        };
        let matches_category = self.category.map_or(true, |c| exercise.category == c);
        let matches_difficulty = self.difficulty.map_or(true, |d| exercise.difficulty == d);

        matches_search && matches_category && matches_difficulty
    }
}

/// Longest duration, in minutes, a single exercise may have
pub const MAX_EXERCISE_MINUTES: u32 = 240;

/// Problems with a single exercise definition, empty if it is usable
pub fn validate_exercise(exercise: &Exercise) -> Vec<String> {
    let mut errors = Vec::new();
    if exercise.id.is_empty() {
        errors.push(format!("Exercise '{}' has empty ID", exercise.name));
    }
    if exercise.name.trim().is_empty() {
        errors.push(format!("Exercise '{}' has empty name", exercise.id));
    }
    if exercise.duration == 0 {
        errors.push(format!("Exercise '{}' has zero duration", exercise.id));
    } else if exercise.duration > MAX_EXERCISE_MINUTES {
        errors.push(format!(
            "Exercise '{}' lasts {} min (max {})",
            exercise.id, exercise.duration, MAX_EXERCISE_MINUTES
        ));
    }
    errors
}

/// Id for a user-defined exercise
pub fn custom_exercise_id() -> String {
    format!("custom-{}", uuid::Uuid::new_v4())
}

impl Catalog {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn by_category(&self, category: ExerciseCategory) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter().filter(move |e| e.category == category)
    }

    /// Exercises matching the filter, in catalog order
    pub fn search(&self, filter: &ExerciseFilter) -> Vec<&Exercise> {
        self.exercises.iter().filter(|e| filter.matches(e)).collect()
    }

    /// A new catalog with the user's custom exercises appended
    ///
    /// Custom exercises whose id collides with an existing entry are skipped.
    pub fn with_custom(&self, custom: &[Exercise]) -> Catalog {
        let mut exercises = self.exercises.clone();
        for exercise in custom {
            if exercises.iter().any(|e| e.id == exercise.id) {
                tracing::warn!("Ignoring custom exercise with duplicate id '{}'", exercise.id);
                continue;
            }
            exercises.push(exercise.clone());
        }
        Catalog { exercises }
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for exercise in &self.exercises {
            errors.extend(validate_exercise(exercise));
            if !exercise.id.is_empty() && !seen.insert(exercise.id.as_str()) {
                errors.push(format!("Duplicate exercise ID '{}'", exercise.id));
            }
        }

        for category in [ExerciseCategory::Warmup, ExerciseCategory::Cooldown] {
            if self.by_category(category).next().is_none() {
                errors.push(format!("Catalog has no {} exercises", category.as_str()));
            }
        }

        errors
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builds the default catalog of built-in exercises
///
/// Prefer `get_default_catalog()` outside of tests.
pub fn build_default_catalog() -> Catalog {
    Catalog::new(vec![
        Exercise {
            id: "warmup-1".into(),
            name: "Jumping Jacks".into(),
            description: "A classic warm-up exercise to get your heart rate up".into(),
            category: ExerciseCategory::Warmup,
            difficulty: Difficulty::Easy,
            duration: 3,
            image_url: "https://images.pexels.com/photos/4498151/pexels-photo-4498151.jpeg".into(),
            target_muscles: strings(&["full body"]),
            instructions: strings(&[
                "Stand with your feet together and arms at your sides",
                "Jump and spread your legs while raising your arms above your head",
                "Return to the starting position in one fluid movement",
                "Repeat at a moderate pace for the duration",
            ]),
        },
        Exercise {
            id: "warmup-2".into(),
            name: "Arm Circles".into(),
            description: "Simple movement to warm up shoulders and increase mobility".into(),
            category: ExerciseCategory::Warmup,
            difficulty: Difficulty::Easy,
            duration: 2,
            image_url: "https://images.pexels.com/photos/8128565/pexels-photo-8128565.jpeg".into(),
            target_muscles: strings(&["shoulders", "upper back"]),
            instructions: strings(&[
                "Stand with feet shoulder-width apart",
                "Extend your arms out to the sides at shoulder height",
                "Make small circles with your arms, gradually increasing the size",
                "Reverse direction halfway through",
            ]),
        },
        Exercise {
            id: "arms-1".into(),
            name: "Push-Ups".into(),
            description: "Effective upper body exercise for chest, shoulders, and triceps".into(),
            category: ExerciseCategory::Arms,
            difficulty: Difficulty::Medium,
            duration: 5,
            image_url: "https://images.pexels.com/photos/4162487/pexels-photo-4162487.jpeg".into(),
            target_muscles: strings(&["chest", "shoulders", "triceps"]),
            instructions: strings(&[
                "Start in a plank position with hands slightly wider than shoulder-width",
                "Lower your body until your chest nearly touches the floor",
                "Push back up to the starting position",
                "Keep your body in a straight line throughout the movement",
            ]),
        },
        Exercise {
            id: "arms-2".into(),
            name: "Tricep Dips".into(),
            description: "Targets the triceps using a chair or bench".into(),
            category: ExerciseCategory::Arms,
            difficulty: Difficulty::Medium,
            duration: 4,
            image_url: "https://images.pexels.com/photos/4162509/pexels-photo-4162509.jpeg".into(),
            target_muscles: strings(&["triceps", "shoulders"]),
            instructions: strings(&[
                "Sit on the edge of a chair or bench with hands beside your hips",
                "Slide your butt off the edge with legs extended",
                "Lower your body by bending your elbows",
                "Push back up to the starting position using your arms",
            ]),
        },
        Exercise {
            id: "arms-3".into(),
            name: "Bicep Curls".into(),
            description: "Classic arm exercise targeting the biceps".into(),
            category: ExerciseCategory::Arms,
            difficulty: Difficulty::Easy,
            duration: 4,
            image_url: "https://images.pexels.com/photos/1638336/pexels-photo-1638336.jpeg".into(),
            target_muscles: strings(&["biceps", "forearms"]),
            instructions: strings(&[
                "Stand with feet shoulder-width apart, holding weights at your sides",
                "Keep elbows close to your torso and rotate palms to face forward",
                "Curl the weights while contracting your biceps",
                "Lower back to the starting position with control",
            ]),
        },
        Exercise {
            id: "legs-1".into(),
            name: "Squats".into(),
            description: "Fundamental lower body exercise for overall leg strength".into(),
            category: ExerciseCategory::Legs,
            difficulty: Difficulty::Medium,
            duration: 5,
            image_url: "https://images.pexels.com/photos/4498150/pexels-photo-4498150.jpeg".into(),
            target_muscles: strings(&["quadriceps", "hamstrings", "glutes"]),
            instructions: strings(&[
                "Stand with feet slightly wider than hip-width apart",
                "Lower your body as if sitting in a chair, keeping chest up",
                "Lower until thighs are parallel to the ground (or as low as comfortable)",
                "Push through heels to return to standing position",
            ]),
        },
        Exercise {
            id: "legs-2".into(),
            name: "Lunges".into(),
            description: "Excellent for leg strength and balance".into(),
            category: ExerciseCategory::Legs,
            difficulty: Difficulty::Medium,
            duration: 5,
            image_url: "https://images.pexels.com/photos/2780762/pexels-photo-2780762.jpeg".into(),
            target_muscles: strings(&["quadriceps", "hamstrings", "glutes", "calves"]),
            instructions: strings(&[
                "Stand with feet hip-width apart",
                "Step forward with one leg and lower your body until both knees are bent at 90°",
                "Push through the front heel to return to standing",
                "Repeat with the other leg and continue alternating",
            ]),
        },
        Exercise {
            id: "legs-3".into(),
            name: "Calf Raises".into(),
            description: "Isolates and strengthens the calf muscles".into(),
            category: ExerciseCategory::Legs,
            difficulty: Difficulty::Easy,
            duration: 3,
            image_url: "https://images.pexels.com/photos/2294361/pexels-photo-2294361.jpeg".into(),
            target_muscles: strings(&["calves"]),
            instructions: strings(&[
                "Stand with feet hip-width apart, optionally holding onto something for balance",
                "Raise your heels off the ground, standing on the balls of your feet",
                "Hold the raised position briefly",
                "Lower your heels back to the ground with control",
            ]),
        },
        Exercise {
            id: "core-1".into(),
            name: "Plank".into(),
            description: "Excellent for core stability and strength".into(),
            category: ExerciseCategory::Core,
            difficulty: Difficulty::Medium,
            duration: 3,
            image_url: "https://images.pexels.com/photos/6456134/pexels-photo-6456134.jpeg".into(),
            target_muscles: strings(&["abs", "lower back", "shoulders"]),
            instructions: strings(&[
                "Start in a forearm plank position with elbows aligned beneath shoulders",
                "Keep your body in a straight line from head to heels",
                "Engage your core and glutes",
                "Hold the position for the designated time",
            ]),
        },
        Exercise {
            id: "core-2".into(),
            name: "Russian Twists".into(),
            description: "Great for obliques and rotational core strength".into(),
            category: ExerciseCategory::Core,
            difficulty: Difficulty::Medium,
            duration: 4,
            image_url: "https://images.pexels.com/photos/3757954/pexels-photo-3757954.jpeg".into(),
            target_muscles: strings(&["obliques", "abs"]),
            instructions: strings(&[
                "Sit on the floor with knees bent and feet slightly off the ground",
                "Lean back slightly to engage core, keeping back straight",
                "Clasp hands together and twist torso to right, then to left",
                "Each twist to right and left counts as one rep",
            ]),
        },
        Exercise {
            id: "core-3".into(),
            name: "Bicycle Crunches".into(),
            description: "Dynamic core exercise targeting multiple abdominal muscles".into(),
            category: ExerciseCategory::Core,
            difficulty: Difficulty::Medium,
            duration: 4,
            image_url: "https://images.pexels.com/photos/6456201/pexels-photo-6456201.jpeg".into(),
            target_muscles: strings(&["abs", "obliques"]),
            instructions: strings(&[
                "Lie on your back with hands behind your head and knees bent",
                "Lift shoulders off the ground and bring right elbow to left knee while extending right leg",
                "Switch sides, bringing left elbow to right knee",
                "Continue alternating in a pedaling motion",
            ]),
        },
        Exercise {
            id: "cardio-1".into(),
            name: "High Knees".into(),
            description: "High-intensity cardio that targets core and legs".into(),
            category: ExerciseCategory::Cardio,
            difficulty: Difficulty::Medium,
            duration: 3,
            image_url: "https://images.pexels.com/photos/6456297/pexels-photo-6456297.jpeg".into(),
            target_muscles: strings(&["core", "hip flexors", "quads"]),
            instructions: strings(&[
                "Stand with feet hip-width apart",
                "Run in place, bringing knees up to hip height",
                "Pump arms for added intensity",
                "Maintain a quick pace throughout",
            ]),
        },
        Exercise {
            id: "cardio-2".into(),
            name: "Burpees".into(),
            description: "Full-body, high-intensity exercise".into(),
            category: ExerciseCategory::Cardio,
            difficulty: Difficulty::Hard,
            duration: 5,
            image_url: "https://images.pexels.com/photos/1153370/pexels-photo-1153370.jpeg".into(),
            target_muscles: strings(&["full body"]),
            instructions: strings(&[
                "Start standing, then squat and place hands on floor",
                "Jump feet back to plank position",
                "Perform a push-up (optional)",
                "Jump feet forward to hands, then explosively jump up with arms overhead",
            ]),
        },
        Exercise {
            id: "cardio-3".into(),
            name: "Mountain Climbers".into(),
            description: "Dynamic exercise for cardio and core strength".into(),
            category: ExerciseCategory::Cardio,
            difficulty: Difficulty::Medium,
            duration: 4,
            image_url: "https://images.pexels.com/photos/4162495/pexels-photo-4162495.jpeg".into(),
            target_muscles: strings(&["core", "shoulders", "hip flexors"]),
            instructions: strings(&[
                "Start in a plank position with wrists under shoulders",
                "Drive right knee toward chest, then quickly switch legs",
                "Continue alternating legs in a running motion",
                "Maintain a flat back and engaged core throughout",
            ]),
        },
        Exercise {
            id: "fullbody-1".into(),
            name: "Kettlebell Swings".into(),
            description: "Explosive full-body exercise".into(),
            category: ExerciseCategory::FullBody,
            difficulty: Difficulty::Medium,
            duration: 5,
            image_url: "https://images.pexels.com/photos/4498290/pexels-photo-4498290.jpeg".into(),
            target_muscles: strings(&["hamstrings", "glutes", "lower back", "shoulders"]),
            instructions: strings(&[
                "Stand with feet wider than hip-width, holding kettlebell with both hands",
                "Hinge at hips and swing kettlebell back between legs",
                "Thrust hips forward to swing kettlebell up to chest height",
                "Let momentum bring kettlebell back down between legs",
            ]),
        },
        Exercise {
            id: "fullbody-2".into(),
            name: "Thruster".into(),
            description: "Compound movement combining squats and shoulder press".into(),
            category: ExerciseCategory::FullBody,
            difficulty: Difficulty::Hard,
            duration: 5,
            image_url: "https://images.pexels.com/photos/28080/pexels-photo.jpg".into(),
            target_muscles: strings(&["quads", "glutes", "shoulders", "triceps"]),
            instructions: strings(&[
                "Hold weights at shoulder height with feet shoulder-width apart",
                "Perform a squat, keeping weights at shoulders",
                "As you stand up, press weights overhead",
                "Lower weights back to shoulders and repeat",
            ]),
        },
        Exercise {
            id: "fullbody-3".into(),
            name: "Bodyweight Circuit".into(),
            description: "Sequence of exercises performed with minimal rest".into(),
            category: ExerciseCategory::FullBody,
            difficulty: Difficulty::Medium,
            duration: 8,
            image_url: "https://images.pexels.com/photos/3763115/pexels-photo-3763115.jpeg".into(),
            target_muscles: strings(&["full body"]),
            instructions: strings(&[
                "Perform 10 jumping jacks",
                "Do 10 push-ups",
                "Complete 10 squats",
                "Hold plank for 30 seconds",
                "Repeat circuit 2-3 times with minimal rest",
            ]),
        },
        Exercise {
            id: "cooldown-1".into(),
            name: "Forward Fold".into(),
            description: "Stretches hamstrings and lower back".into(),
            category: ExerciseCategory::Cooldown,
            difficulty: Difficulty::Easy,
            duration: 2,
            image_url: "https://images.pexels.com/photos/6456169/pexels-photo-6456169.jpeg".into(),
            target_muscles: strings(&["hamstrings", "lower back"]),
            instructions: strings(&[
                "Stand with feet hip-width apart",
                "Slowly bend forward from the hips",
                "Let arms hang toward the floor or hold elbows",
                "Hold the stretch, allowing gravity to deepen it",
            ]),
        },
        Exercise {
            id: "cooldown-2".into(),
            name: "Child's Pose".into(),
            description: "Relaxing stretch for back, shoulders, and hips".into(),
            category: ExerciseCategory::Cooldown,
            difficulty: Difficulty::Easy,
            duration: 2,
            image_url: "https://images.pexels.com/photos/5384538/pexels-photo-5384538.jpeg".into(),
            target_muscles: strings(&["back", "shoulders", "hips"]),
            instructions: strings(&[
                "Kneel on the floor with big toes touching and knees apart",
                "Sit back on heels and extend arms forward",
                "Rest forehead on the floor and relax into the stretch",
                "Breathe deeply and hold",
            ]),
        },
    ])
}
