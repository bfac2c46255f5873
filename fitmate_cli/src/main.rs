use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use fitmate_core::catalog::custom_exercise_id;
use fitmate_core::export::write_progress_csv;
use fitmate_core::tips::daily_tip;
use fitmate_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

const KG_PER_LB: f64 = 0.453_592_37;

#[derive(Parser)]
#[command(name = "fitmate")]
#[command(about = "Personal workout planner and progress tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override today's date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or show the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Show today's workout (default)
    Workout {
        /// Replace today's workout with a freshly generated one
        #[arg(long)]
        new: bool,

        /// Seed for reproducible generation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Mark today's workout as completed
    Complete {
        /// Mark it as not completed instead
        #[arg(long)]
        undo: bool,
    },

    /// Record weight, calories or completion for a day
    Log {
        /// Day to record (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Body weight (in the configured unit)
        #[arg(long)]
        weight: Option<f64>,

        /// Calories burned
        #[arg(long)]
        calories: Option<u32>,

        /// Whether a workout was completed
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Show progress statistics
    Stats {
        /// Window: 7d, 30d, 90d or all
        #[arg(long, default_value = "all")]
        timeframe: Timeframe,
    },

    /// List achievements
    Achievements,

    /// Browse the exercise library
    Exercises {
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        difficulty: Option<String>,

        /// Match against name or description
        #[arg(long)]
        search: Option<String>,
    },

    /// Add a custom exercise to the library
    AddExercise {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        category: String,

        #[arg(long, default_value = "easy")]
        difficulty: String,

        /// Duration in minutes
        #[arg(long)]
        duration: u32,

        /// Target muscle (repeatable)
        #[arg(long = "muscle")]
        muscles: Vec<String>,

        /// Instruction step (repeatable)
        #[arg(long = "instruction")]
        instructions: Vec<String>,

        #[arg(long, default_value = "")]
        image_url: String,
    },

    /// Show the tip of the day
    Tip,

    /// Show or change settings
    Settings {
        #[arg(long)]
        dark_mode: Option<bool>,

        #[arg(long)]
        reminders: Option<bool>,

        /// metric or imperial
        #[arg(long)]
        unit: Option<String>,
    },

    /// Export progress history to CSV
    Export {
        #[arg(long)]
        out: PathBuf,

        /// Window: 7d, 30d, 90d or all
        #[arg(long, default_value = "all")]
        timeframe: Timeframe,
    },

    /// Delete all data except settings
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Save the profile (replaces any existing one)
    Set {
        #[arg(long)]
        name: String,

        #[arg(long)]
        age: u32,

        /// male, female or other
        #[arg(long)]
        gender: String,

        /// Height in centimetres
        #[arg(long)]
        height: f64,

        /// Weight (in the configured unit)
        #[arg(long)]
        weight: f64,

        /// weight_loss, muscle_gain, endurance or general_fitness
        #[arg(long)]
        goal: String,

        /// beginner, intermediate or advanced
        #[arg(long)]
        level: String,
    },

    /// Show the saved profile
    Show,
}

type FitSession = Session<JsonFileStore, StdRng>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    fitmate_core::logging::init_with_level(&config.logging.level);

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let seed = match &cli.command {
        Some(Commands::Workout { seed: Some(seed), .. }) => Some(*seed),
        _ => config.workout.seed,
    };

    tracing::debug!("Using data dir {:?}, today {}", data_dir, today);

    let ctx = Context {
        data_dir,
        today,
        seed,
    };

    match cli.command {
        Some(Commands::Profile { action }) => cmd_profile(&ctx, action),
        Some(Commands::Workout { new, .. }) => cmd_workout(&ctx, new),
        Some(Commands::Complete { undo }) => cmd_complete(&ctx, !undo),
        Some(Commands::Log {
            date,
            weight,
            calories,
            completed,
        }) => cmd_log(&ctx, date, weight, calories, completed),
        Some(Commands::Stats { timeframe }) => cmd_stats(&ctx, timeframe),
        Some(Commands::Achievements) => cmd_achievements(&ctx),
        Some(Commands::Exercises {
            category,
            difficulty,
            search,
        }) => cmd_exercises(&ctx, category, difficulty, search),
        Some(Commands::AddExercise {
            name,
            description,
            category,
            difficulty,
            duration,
            muscles,
            instructions,
            image_url,
        }) => {
            let exercise = Exercise {
                id: custom_exercise_id(),
                name,
                description,
                category: parse_category(&category)?,
                difficulty: parse_difficulty(&difficulty)?,
                duration,
                image_url,
                target_muscles: muscles,
                instructions,
            };
            cmd_add_exercise(&ctx, exercise)
        }
        Some(Commands::Tip) => cmd_tip(&ctx),
        Some(Commands::Settings {
            dark_mode,
            reminders,
            unit,
        }) => cmd_settings(&ctx, dark_mode, reminders, unit),
        Some(Commands::Export { out, timeframe }) => cmd_export(&ctx, out, timeframe),
        Some(Commands::Reset { yes }) => cmd_reset(&ctx, yes),
        None => cmd_workout(&ctx, false),
    }
}

struct Context {
    data_dir: PathBuf,
    today: NaiveDate,
    seed: Option<u64>,
}

impl Context {
    fn open_session(&self) -> Result<FitSession> {
        let errors = get_default_catalog().validate();
        if !errors.is_empty() {
            eprintln!("Catalog validation errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            return Err(Error::CatalogValidation("Invalid catalog".into()));
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Session::open(JsonFileStore::new(&self.data_dir), rng, self.today)
    }
}

fn cmd_profile(ctx: &Context, action: ProfileAction) -> Result<()> {
    let mut session = ctx.open_session()?;
    let unit = session.settings().measurement_unit;

    match action {
        ProfileAction::Set {
            name,
            age,
            gender,
            height,
            weight,
            goal,
            level,
        } => {
            let created_at = session
                .state()
                .profile
                .as_ref()
                .map_or(ctx.today, |p| p.created_at);

            let profile = UserProfile {
                name,
                age,
                gender: parse_gender(&gender)?,
                height,
                weight: weight_to_kg(weight, unit),
                fitness_goal: parse_goal(&goal)?,
                fitness_level: parse_level(&level)?,
                created_at,
            };
            session.save_profile(profile, ctx.today)?;

            println!("✓ Profile saved!");
            if let Some(workout) = &session.state().today_workout {
                println!("  Today's workout: {} exercises", workout.exercises.len());
            }
            Ok(())
        }
        ProfileAction::Show => {
            match &session.state().profile {
                Some(profile) => display_profile(profile, unit),
                None => println!("No profile set. Run `fitmate profile set` to create one."),
            }
            Ok(())
        }
    }
}

fn cmd_workout(ctx: &Context, new: bool) -> Result<()> {
    let mut session = ctx.open_session()?;

    let Some(profile) = session.state().profile.clone() else {
        println!("No profile set. Run `fitmate profile set` to create one.");
        return Ok(());
    };

    if new {
        session.generate_workout(ctx.today)?;
        println!("✓ Generated a new workout");
    }

    if let Some(workout) = &session.state().today_workout {
        display_workout(workout, &profile);
    }
    Ok(())
}

fn cmd_complete(ctx: &Context, completed: bool) -> Result<()> {
    let mut session = ctx.open_session()?;

    if session.state().today_workout.is_none() {
        println!("No workout for today. Run `fitmate profile set` to create one.");
        return Ok(());
    }

    let earned = session.complete_workout(completed, ctx.today)?;

    if completed {
        println!("✓ Workout completed!");
        if let Some(entry) = session.state().progress.workout_on(ctx.today) {
            println!("  Calories burned: ~{}", entry.calories_burned);
        }
    } else {
        println!("✓ Workout marked as not completed");
    }

    let streak = &session.state().streak;
    println!(
        "  Streak: {} day(s) (best {})",
        streak.current_streak, streak.best_streak
    );
    display_earned(&earned);
    Ok(())
}

fn cmd_log(
    ctx: &Context,
    date: Option<NaiveDate>,
    weight: Option<f64>,
    calories: Option<u32>,
    completed: Option<bool>,
) -> Result<()> {
    if weight.is_none() && calories.is_none() && completed.is_none() {
        return Err(Error::Other(
            "Nothing to log: pass --weight, --calories or --completed".into(),
        ));
    }

    let mut session = ctx.open_session()?;
    let unit = session.settings().measurement_unit;
    let date = date.unwrap_or(ctx.today);

    let earned = session.update_progress(
        date,
        weight.map(|w| weight_to_kg(w, unit)),
        calories,
        completed,
        ctx.today,
    )?;

    println!("✓ Progress logged for {}", date);
    display_earned(&earned);
    Ok(())
}

fn cmd_stats(ctx: &Context, timeframe: Timeframe) -> Result<()> {
    let session = ctx.open_session()?;
    let unit = session.settings().measurement_unit;
    let state = session.state();

    let stats = ProgressStats::from(&state.progress.within(timeframe, ctx.today));

    println!("Progress ({:?})", timeframe);
    println!("  Workouts completed: {}", stats.workouts_completed);
    println!("  Calories burned:    {}", stats.total_calories);
    println!(
        "  Weight change:      {:+.1} {}",
        weight_from_kg(stats.weight_change, unit),
        unit_label(unit)
    );
    println!(
        "  Current streak:     {} day(s)",
        state.streak.current_streak
    );
    println!("  Best streak:        {} day(s)", state.streak.best_streak);

    if let Some(profile) = &state.profile {
        if let (Some(bmi), Some(category)) = (profile.bmi(), profile.bmi_category()) {
            println!("  BMI:                {:.1} ({})", bmi, category.label());
        }
    }
    Ok(())
}

fn cmd_achievements(ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;

    for achievement in &session.state().achievements {
        let mark = if achievement.earned { "x" } else { " " };
        print!(
            "[{}] {} - {}",
            mark, achievement.name, achievement.description
        );
        match achievement.earned_date {
            Some(date) => println!(" (earned {})", date),
            None => println!(),
        }
    }
    Ok(())
}

fn cmd_exercises(
    ctx: &Context,
    category: Option<String>,
    difficulty: Option<String>,
    search: Option<String>,
) -> Result<()> {
    let filter = ExerciseFilter {
        search,
        category: category.as_deref().map(parse_category).transpose()?,
        difficulty: difficulty.as_deref().map(parse_difficulty).transpose()?,
    };

    let session = ctx.open_session()?;
    let matches = session.catalog().search(&filter);

    if matches.is_empty() {
        println!("No exercises found.");
        return Ok(());
    }

    for exercise in matches {
        println!(
            "{:<12} {:<28} {:<9} {:<7} {} min",
            exercise.id,
            exercise.name,
            exercise.category.as_str(),
            format!("{:?}", exercise.difficulty).to_lowercase(),
            exercise.duration
        );
    }
    Ok(())
}

fn cmd_add_exercise(ctx: &Context, exercise: Exercise) -> Result<()> {
    if exercise.name.trim().is_empty() {
        return Err(Error::Other("Exercise name must not be empty".into()));
    }

    let mut session = ctx.open_session()?;
    let id = exercise.id.clone();
    session.add_custom_exercise(exercise)?;

    println!("✓ Added exercise {}", id);
    Ok(())
}

fn cmd_tip(ctx: &Context) -> Result<()> {
    let tip = daily_tip(ctx.today);
    println!("Tip of the day ({}):", tip.category.name());
    println!("  {}", tip.text);
    Ok(())
}

fn cmd_settings(
    ctx: &Context,
    dark_mode: Option<bool>,
    reminders: Option<bool>,
    unit: Option<String>,
) -> Result<()> {
    let mut session = ctx.open_session()?;
    let mut settings = session.settings();

    let changed = dark_mode.is_some() || reminders.is_some() || unit.is_some();
    if let Some(dark_mode) = dark_mode {
        settings.dark_mode = dark_mode;
    }
    if let Some(reminders) = reminders {
        settings.reminders = reminders;
    }
    if let Some(unit) = unit {
        settings.measurement_unit = parse_unit(&unit)?;
    }

    if changed {
        session.save_settings(&settings)?;
        println!("✓ Settings saved");
    }

    println!("  Dark mode: {}", settings.dark_mode);
    println!("  Reminders: {}", settings.reminders);
    println!(
        "  Units:     {}",
        format!("{:?}", settings.measurement_unit).to_lowercase()
    );
    Ok(())
}

fn cmd_export(ctx: &Context, out: PathBuf, timeframe: Timeframe) -> Result<()> {
    let session = ctx.open_session()?;
    let progress = session.state().progress.within(timeframe, ctx.today);

    let count = write_progress_csv(&progress, &out)?;

    println!("✓ Exported {} rows to CSV", count);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn cmd_reset(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        return Err(Error::Other(
            "Refusing to reset without --yes (this deletes all data except settings)".into(),
        ));
    }

    let mut session = ctx.open_session()?;
    session.reset()?;

    println!("✓ All data reset (settings kept)");
    Ok(())
}

fn display_profile(profile: &UserProfile, unit: MeasurementUnit) {
    println!("{}", profile.name);
    println!("  Age:    {}", profile.age);
    println!("  Gender: {:?}", profile.gender);
    println!("  Height: {:.0} cm", profile.height);
    println!(
        "  Weight: {:.1} {}",
        weight_from_kg(profile.weight, unit),
        unit_label(unit)
    );
    println!("  Goal:   {}", profile.fitness_goal.title());
    println!("  Level:  {:?}", profile.fitness_level);
    if let (Some(bmi), Some(category)) = (profile.bmi(), profile.bmi_category()) {
        println!("  BMI:    {:.1} ({})", bmi, category.label());
    }
    println!("  Since:  {}", profile.created_at);
}

fn display_workout(workout: &DailyWorkout, profile: &UserProfile) {
    let summary = WorkoutSummary::of(workout, profile);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WORKOUT {}", workout.date);
    println!("╰─────────────────────────────────────────╯");
    println!();

    for (i, exercise) in workout.exercises.iter().enumerate() {
        println!(
            "  {}. {} ({}, {} min)",
            i + 1,
            exercise.name,
            exercise.category.as_str(),
            exercise.duration
        );
    }

    println!();
    println!(
        "  {} exercises · {} min · ~{} kcal",
        summary.exercise_count, summary.total_duration_minutes, summary.estimated_calories
    );
    if workout.completed {
        println!("  ✓ Completed");
    }
    println!();
}

fn display_earned(earned: &[Achievement]) {
    for achievement in earned {
        println!(
            "🏆 Achievement unlocked: {} - {}",
            achievement.name, achievement.description
        );
    }
}

fn unit_label(unit: MeasurementUnit) -> &'static str {
    match unit {
        MeasurementUnit::Metric => "kg",
        MeasurementUnit::Imperial => "lb",
    }
}

fn weight_to_kg(weight: f64, unit: MeasurementUnit) -> f64 {
    match unit {
        MeasurementUnit::Metric => weight,
        MeasurementUnit::Imperial => weight * KG_PER_LB,
    }
}

fn weight_from_kg(weight: f64, unit: MeasurementUnit) -> f64 {
    match unit {
        MeasurementUnit::Metric => weight,
        MeasurementUnit::Imperial => weight / KG_PER_LB,
    }
}

fn parse_gender(s: &str) -> Result<Gender> {
    match s.to_lowercase().as_str() {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        "other" => Ok(Gender::Other),
        _ => Err(Error::Other(format!("Unknown gender: {}", s))),
    }
}

fn parse_goal(s: &str) -> Result<FitnessGoal> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "weight_loss" => Ok(FitnessGoal::WeightLoss),
        "muscle_gain" => Ok(FitnessGoal::MuscleGain),
        "endurance" => Ok(FitnessGoal::Endurance),
        "general_fitness" => Ok(FitnessGoal::GeneralFitness),
        _ => Err(Error::Other(format!("Unknown fitness goal: {}", s))),
    }
}

fn parse_level(s: &str) -> Result<FitnessLevel> {
    match s.to_lowercase().as_str() {
        "beginner" => Ok(FitnessLevel::Beginner),
        "intermediate" => Ok(FitnessLevel::Intermediate),
        "advanced" => Ok(FitnessLevel::Advanced),
        _ => Err(Error::Other(format!("Unknown fitness level: {}", s))),
    }
}

fn parse_category(s: &str) -> Result<ExerciseCategory> {
    ExerciseCategory::parse(s).ok_or_else(|| Error::Other(format!("Unknown category: {}", s)))
}

fn parse_difficulty(s: &str) -> Result<Difficulty> {
    Difficulty::parse(s).ok_or_else(|| Error::Other(format!("Unknown difficulty: {}", s)))
}

fn parse_unit(s: &str) -> Result<MeasurementUnit> {
    match s.to_lowercase().as_str() {
        "metric" => Ok(MeasurementUnit::Metric),
        "imperial" => Ok(MeasurementUnit::Imperial),
        _ => Err(Error::Other(format!("Unknown unit: {}", s))),
    }
}
