mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use crate::commands::{
    cmd_dashboard, cmd_exercise_add, cmd_exercise_done, cmd_exercise_list, cmd_exercise_stats,
    cmd_export, cmd_goal_add, cmd_goal_remove, cmd_import_csv, cmd_import_json, cmd_init, cmd_log,
    cmd_meals, cmd_profile_set, cmd_profile_show, cmd_skincare_add, cmd_skincare_done,
    cmd_skincare_list, cmd_streak_reset, cmd_streak_show, cmd_summary, cmd_target_clear,
    cmd_target_set, cmd_target_show,
};
use crate::config::Config;
use aura_core::service::AuraService;

#[derive(Parser)]
#[command(
    name = "aura",
    version,
    about = "A simple, local-first wellness tracker CLI",
    long_about = "\n\n   █████╗ ██╗   ██╗██████╗  █████╗
  ██╔══██╗██║   ██║██╔══██╗██╔══██╗
  ███████║██║   ██║██████╔╝███████║
  ██╔══██║██║   ██║██╔══██╗██╔══██║
  ██║  ██║╚██████╔╝██║  ██║██║  ██║
  ╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝
       your day, in balance.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create your profile (interactive onboarding)
    Init {
        /// Output the created profile as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or update your profile and goals
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Log a meal
    Log {
        /// Meal name
        name: String,
        /// Calories (kcal)
        calories: f64,
        /// Protein in grams
        #[arg(long, default_value = "0")]
        protein: f64,
        /// Carbs in grams
        #[arg(long, default_value = "0")]
        carbs: f64,
        /// Fats in grams
        #[arg(long, default_value = "0")]
        fats: f64,
        /// Date to log for (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Optional notes
        #[arg(long)]
        notes: Option<String>,
        /// Optional recipe text
        #[arg(long)]
        recipe: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List logged meals
    Meals {
        /// Date to list (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Show the N most recent meals across all dates instead
        #[arg(long, value_name = "N", conflicts_with = "date")]
        last: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show daily nutrition summary (defaults to today)
    Summary {
        /// Date to show (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Track exercises with a completion checklist
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Habit streak timer (bare `aura streak` shows it)
    Streak {
        #[command(subcommand)]
        command: Option<StreakCommands>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Daily skincare routines
    Skincare {
        #[command(subcommand)]
        command: SkincareCommands,
    },
    /// Show all of the day's cards in one screen
    Dashboard {
        /// Date to show (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the daily calorie target
    Target {
        #[command(subcommand)]
        command: TargetCommands,
    },
    /// Export all data as a JSON document
    Export {
        /// Write to a file instead of stdout
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Import data from a file
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show your profile with BMI
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update profile fields
    Set {
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New age in years
        #[arg(long)]
        age: Option<i64>,
        /// New gender: male, female, other
        #[arg(long)]
        gender: Option<String>,
        /// New weight in kg
        #[arg(long)]
        weight: Option<f64>,
        /// New height in cm
        #[arg(long)]
        height: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage wellness goals
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
}

#[derive(Subcommand)]
enum GoalCommands {
    /// Add a goal
    Add {
        /// Goal text (e.g. "Better Sleep")
        goal: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a goal
    Remove {
        /// Goal text to remove
        goal: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ExerciseCommands {
    /// Add an exercise to the checklist
    Add {
        /// Exercise name
        name: String,
        /// Category: home, gym, cardio, yoga
        #[arg(short, long, default_value = "home")]
        category: String,
        /// Duration in minutes
        #[arg(short, long, default_value = "30")]
        duration: i64,
        /// Estimated calories burned
        #[arg(long, default_value = "0")]
        calories: f64,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List exercises for a period
    List {
        /// Filter by category: home, gym, cardio, yoga
        #[arg(short, long)]
        category: Option<String>,
        /// Period: daily, weekly, monthly
        #[arg(short, long, default_value = "daily")]
        period: String,
        /// Reference date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle an exercise's completion by ID
    Done {
        /// Exercise ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Completion stats for a period
    Stats {
        /// Filter by category: home, gym, cardio, yoga
        #[arg(short, long)]
        category: Option<String>,
        /// Period: daily, weekly, monthly
        #[arg(short, long, default_value = "daily")]
        period: String,
        /// Reference date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum StreakCommands {
    /// Show the running streak
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reset the streak timer (records a relapse)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SkincareCommands {
    /// Add a skincare routine
    Add {
        /// Routine name
        name: String,
        /// Comma-separated product list (e.g. "Cleanser, Toner, SPF")
        #[arg(short, long)]
        products: String,
        /// Time of day: morning, evening
        #[arg(short, long, default_value = "morning")]
        time: String,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List a day's routines
    List {
        /// Filter by time of day: morning, evening
        #[arg(short, long)]
        time: Option<String>,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a routine's completion by ID
    Done {
        /// Routine ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum TargetCommands {
    /// Set the daily calorie target
    Set {
        /// Daily calorie target
        calories: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the current target
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear the target (falls back to the 2000 kcal default)
    Clear {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ImportCommands {
    /// Import a JSON export document
    Json {
        /// Path to the export file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import meals from a CSV file
    Csv {
        /// Path to the CSV file
        file: PathBuf,
        /// Preview import without making changes
        #[arg(long)]
        dry_run: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[allow(clippy::too_many_lines)]
fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let svc = AuraService::new(&config.db_path)?;

    match cli.command {
        Commands::Init { json } => cmd_init(&svc, json),
        Commands::Profile { command } => match command {
            ProfileCommands::Show { json } => cmd_profile_show(&svc, json),
            ProfileCommands::Set {
                name,
                age,
                gender,
                weight,
                height,
                json,
            } => cmd_profile_set(&svc, name, age, gender, weight, height, json),
            ProfileCommands::Goal { command } => match command {
                GoalCommands::Add { goal, json } => cmd_goal_add(&svc, &goal, json),
                GoalCommands::Remove { goal, json } => cmd_goal_remove(&svc, &goal, json),
            },
        },
        Commands::Log {
            name,
            calories,
            protein,
            carbs,
            fats,
            date,
            notes,
            recipe,
            json,
        } => cmd_log(
            &svc, &name, calories, protein, carbs, fats, date, notes, recipe, json,
        ),
        Commands::Meals { date, last, json } => cmd_meals(&svc, date, last, json),
        Commands::Summary { date, json } => cmd_summary(&svc, date, json),
        Commands::Exercise { command } => match command {
            ExerciseCommands::Add {
                name,
                category,
                duration,
                calories,
                date,
                json,
            } => cmd_exercise_add(&svc, &name, &category, duration, calories, date, json),
            ExerciseCommands::List {
                category,
                period,
                date,
                json,
            } => cmd_exercise_list(&svc, category.as_deref(), &period, date, json),
            ExerciseCommands::Done { id, json } => cmd_exercise_done(&svc, id, json),
            ExerciseCommands::Stats {
                category,
                period,
                date,
                json,
            } => cmd_exercise_stats(&svc, category.as_deref(), &period, date, json),
        },
        Commands::Streak { command, json } => match command {
            Some(StreakCommands::Reset { yes, json }) => cmd_streak_reset(&svc, yes, json),
            Some(StreakCommands::Show { json }) => cmd_streak_show(&svc, json),
            None => cmd_streak_show(&svc, json),
        },
        Commands::Skincare { command } => match command {
            SkincareCommands::Add {
                name,
                products,
                time,
                date,
                json,
            } => cmd_skincare_add(&svc, &name, &products, &time, date, json),
            SkincareCommands::List { time, date, json } => {
                cmd_skincare_list(&svc, time.as_deref(), date, json)
            }
            SkincareCommands::Done { id, json } => cmd_skincare_done(&svc, id, json),
        },
        Commands::Dashboard { date, json } => cmd_dashboard(&svc, date, json),
        Commands::Target { command } => match command {
            TargetCommands::Set { calories, json } => cmd_target_set(&svc, calories, json),
            TargetCommands::Show { json } => cmd_target_show(&svc, json),
            TargetCommands::Clear { json } => cmd_target_clear(&svc, json),
        },
        Commands::Export { out } => cmd_export(&svc, out.as_deref()),
        Commands::Import { command } => match command {
            ImportCommands::Json { file, json } => cmd_import_json(&svc, &file, json),
            ImportCommands::Csv {
                file,
                dry_run,
                json,
            } => cmd_import_csv(&svc, &file, dry_run, json),
        },
    }
}
