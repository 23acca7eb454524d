//! GymLog - Personal Workout Logger
//!
//! Command-line entry point.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use gymlog::diary::DiaryUpdate;
use gymlog::workouts::TemplateCategory;

mod app;

#[derive(Parser)]
#[command(name = "gymlog")]
#[command(author, version, about = "Personal gym workout logger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Data directory (overrides the platform default)
    #[arg(long, global = true, env = "GYMLOG_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard statistics over all workouts
    Stats,
    /// Progression of one exercise over time
    Progression {
        /// Exercise name (exact)
        exercise: String,
    },
    /// Exercise name catalog
    Exercises {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Workout history, newest first
    History {
        /// Number of workouts to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Workout commands
    Workout {
        #[command(subcommand)]
        command: WorkoutCommands,
    },
    /// Diary commands
    Diary {
        #[command(subcommand)]
        command: DiaryCommands,
    },
    /// Profile commands
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Template commands
    Templates {
        #[command(subcommand)]
        command: TemplateCommands,
    },
}

#[derive(Subcommand)]
enum ExerciseCommands {
    /// List catalog names
    List,
    /// Add a name to the catalog
    Add {
        /// Exercise name
        name: String,
    },
    /// List distinct names from logged workouts
    Logged,
}

#[derive(Subcommand)]
enum WorkoutCommands {
    /// Log a workout
    Add {
        /// Workout name
        #[arg(short, long)]
        name: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Strength exercise as NAME:SETS:REPS:WEIGHT (repeatable)
        #[arg(short, long)]
        strength: Vec<String>,
        /// Cardio exercise as NAME:MINUTES[:KM] (repeatable)
        #[arg(short, long)]
        cardio: Vec<String>,
        /// Workout notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Log a workout from a template
    FromTemplate {
        /// Template ID or name
        template: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Show one workout with its exercises
    Show {
        /// Workout ID
        id: Uuid,
    },
    /// Delete a workout
    Delete {
        /// Workout ID
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum DiaryCommands {
    /// List diary entries
    List,
    /// Show the entry for a date
    Show {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Set fields on the entry for a date; fields not given are kept
    Set {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Mood (1-5)
        #[arg(short, long)]
        mood: Option<u8>,
        /// Energy (1-5)
        #[arg(short, long)]
        energy: Option<u8>,
        /// Body weight in kg (0 clears it)
        #[arg(short, long)]
        weight: Option<f64>,
    },
    /// Delete the entry for a date
    Delete {
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the profile
    Show,
    /// Set body weight in kg
    SetWeight {
        /// Weight in kilograms
        weight: f64,
    },
}

#[derive(Subcommand)]
enum TemplateCommands {
    /// List templates
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<TemplateCategory>,
    },
    /// Create a template
    Add {
        /// Template name
        #[arg(short, long)]
        name: String,
        /// Category
        #[arg(short, long, default_value = "full-body")]
        category: TemplateCategory,
        /// Short description
        #[arg(short, long)]
        description: Option<String>,
        /// Strength exercise as NAME:SETS:REPS:WEIGHT (repeatable)
        #[arg(short, long)]
        strength: Vec<String>,
        /// Cardio exercise as NAME:MINUTES[:KM] (repeatable)
        #[arg(long)]
        cardio: Vec<String>,
    },
    /// Delete a template
    Delete {
        /// Template ID
        id: Uuid,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    tracing::debug!("Starting gymlog v{}", env!("CARGO_PKG_VERSION"));

    let mut app = app::GymLogApp::new(cli.data_dir.as_deref(), cli.format)?;

    match cli.command {
        Commands::Stats => app.stats(),
        Commands::Progression { exercise } => app.progression(&exercise),
        Commands::Exercises { command } => match command {
            ExerciseCommands::List => app.exercise_catalog(),
            ExerciseCommands::Add { name } => app.exercise_add(&name),
            ExerciseCommands::Logged => app.exercises_logged(),
        },
        Commands::History { limit } => app.history(limit),
        Commands::Workout { command } => match command {
            WorkoutCommands::Add {
                name,
                date,
                strength,
                cardio,
                notes,
            } => app.add_workout(&name, date, &strength, &cardio, notes),
            WorkoutCommands::FromTemplate { template, date } => {
                app.workout_from_template(&template, date)
            }
            WorkoutCommands::Show { id } => app.show_workout(&id),
            WorkoutCommands::Delete { id } => app.delete_workout(&id),
        },
        Commands::Diary { command } => match command {
            DiaryCommands::List => app.diary_list(),
            DiaryCommands::Show { date } => app.diary_show(date),
            DiaryCommands::Set {
                date,
                notes,
                mood,
                energy,
                weight,
            } => app.diary_set(
                date,
                DiaryUpdate {
                    notes,
                    mood,
                    energy,
                    weight_kg: weight,
                },
            ),
            DiaryCommands::Delete { date } => app.diary_delete(date),
        },
        Commands::Profile { command } => match command {
            ProfileCommands::Show => app.profile_show(),
            ProfileCommands::SetWeight { weight } => app.profile_set_weight(weight),
        },
        Commands::Templates { command } => match command {
            TemplateCommands::List { category } => app.templates_list(category),
            TemplateCommands::Add {
                name,
                category,
                description,
                strength,
                cardio,
            } => app.template_add(&name, category, description, &strength, &cardio),
            TemplateCommands::Delete { id } => app.template_delete(&id),
        },
    }
}
