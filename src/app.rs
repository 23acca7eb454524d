//! Command handlers for the gymlog CLI.
//!
//! Owns the open record store and renders results as tables or JSON.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

use gymlog::diary::{entry_for_date, format_display_date, DiaryEntry, DiaryUpdate};
use gymlog::metrics::{
    available_exercises, exercise_calories, exercise_volume, workout_calories, workout_volume,
    ProgressionDetail, ProgressionSeries, WorkoutStats,
};
use gymlog::storage::config::{self, AppConfig};
use gymlog::storage::{open_store, RecordStore};
use gymlog::workouts::library::{is_builtin, search, SearchCriteria};
use gymlog::workouts::{Exercise, ExerciseKind, TemplateCategory, Workout, WorkoutTemplate};

use crate::OutputFormat;

/// CLI application state.
pub struct GymLogApp {
    config: AppConfig,
    store: Box<dyn RecordStore>,
    format: OutputFormat,
    today: NaiveDate,
}

impl GymLogApp {
    /// Load configuration and open the configured store.
    pub fn new(data_dir: Option<&Path>, format: OutputFormat) -> Result<Self> {
        let config = match data_dir {
            Some(dir) => config::load_config_from(dir),
            None => config::load_config(),
        }
        .context("Failed to load configuration")?;

        let store = open_store(&config).with_context(|| {
            format!(
                "Failed to open {} store in {}",
                config.storage.backend,
                config.data_dir.display()
            )
        })?;

        Ok(Self {
            config,
            store,
            format,
            today: Local::now().date_naive(),
        })
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Dashboard statistics.
    pub fn stats(&self) -> Result<()> {
        let workouts = self.store.list_workouts()?;
        let stats = WorkoutStats::compute_with_window(
            &workouts,
            self.today,
            self.config.stats.frequency_window(),
        );

        if self.format == OutputFormat::Json {
            return self.print_json(&stats);
        }

        let Some(stats) = stats else {
            println!("No workouts logged yet.");
            return Ok(());
        };

        println!("Total workouts:    {}", stats.total_workouts);
        println!("Total exercises:   {}", stats.total_exercises);
        println!("Total volume:      {:.0} kg", stats.total_volume);
        println!("Weekly frequency:  {:.1}", stats.weekly_frequency);
        match &stats.most_frequent_exercise {
            Some(top) => println!("Most frequent:     {} ({}x)", top.name, top.count),
            None => println!("Most frequent:     -"),
        }

        Ok(())
    }

    /// Progression series for one exercise.
    pub fn progression(&self, exercise: &str) -> Result<()> {
        let workouts = self.store.list_workouts()?;
        let series = ProgressionSeries::for_exercise(&workouts, exercise);

        if self.format == OutputFormat::Json {
            #[derive(Serialize)]
            struct Output<'a> {
                #[serde(flatten)]
                series: &'a ProgressionSeries,
                summary: Option<gymlog::metrics::ProgressionSummary>,
            }
            return self.print_json(&Output {
                series: &series,
                summary: series.summary(),
            });
        }

        let Some(summary) = series.summary() else {
            println!("No sessions found for '{}'.", exercise);
            return Ok(());
        };

        println!("{:<12} {:>10} {:>8} {:>6} {:>10}", "Date", "Value", "Reps", "Sets", "Volume");
        println!("{}", "-".repeat(50));
        for point in &series.points {
            println!(
                "{:<12} {:>10.1} {:>8} {:>6} {:>10.0}",
                point.date.to_string(),
                point.primary_value,
                point.reps.as_deref().unwrap_or("-"),
                point.sets.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
                point.volume
            );
        }
        println!();
        println!("Sessions: {}", summary.sessions);
        match summary.detail {
            ProgressionDetail::Strength { max_volume } => {
                println!("Max weight: {:.1} kg", summary.max_primary);
                println!("Max volume: {:.0} kg", max_volume);
            }
            ProgressionDetail::Cardio { mean_primary } => {
                println!("Max distance: {:.1} km", summary.max_primary);
                println!("Mean distance: {:.1} km", mean_primary);
            }
        }

        Ok(())
    }

    /// The exercise name catalog.
    pub fn exercise_catalog(&self) -> Result<()> {
        let names = self.store.list_exercise_names()?;

        if self.format == OutputFormat::Json {
            return self.print_json(&names);
        }

        for name in names {
            println!("{}", name);
        }
        Ok(())
    }

    /// Add a name to the exercise catalog.
    pub fn exercise_add(&mut self, name: &str) -> Result<()> {
        if self.store.add_exercise_name(name)? {
            println!("Added {} to the exercise catalog", name.trim());
        } else {
            println!("{} is already in the exercise catalog", name.trim());
        }
        Ok(())
    }

    /// Distinct exercise names across the history.
    pub fn exercises_logged(&self) -> Result<()> {
        let names = available_exercises(&self.store.list_workouts()?);

        if self.format == OutputFormat::Json {
            return self.print_json(&names);
        }

        for name in names {
            println!("{}", name);
        }
        Ok(())
    }

    /// Recent workouts with volume and estimated calories.
    pub fn history(&self, limit: usize) -> Result<()> {
        let workouts = self.store.list_workouts()?;
        let weight = self.store.load_profile()?.weight_kg;

        if self.format == OutputFormat::Json {
            #[derive(Serialize)]
            struct Row<'a> {
                #[serde(flatten)]
                workout: &'a Workout,
                volume: f64,
                calories: f64,
            }
            let rows: Vec<Row> = workouts
                .iter()
                .take(limit)
                .map(|w| Row {
                    workout: w,
                    volume: workout_volume(w),
                    calories: workout_calories(w, weight),
                })
                .collect();
            return self.print_json(&rows);
        }

        if workouts.is_empty() {
            println!("No workouts logged yet.");
            return Ok(());
        }
        if weight.is_none() {
            println!("Set your body weight to see calorie estimates (gymlog profile set-weight).");
        }

        println!(
            "{:<36} {:<12} {:<20} {:>5} {:>10} {:>8}",
            "ID", "Date", "Name", "Ex", "Volume", "kcal"
        );
        println!("{}", "-".repeat(96));
        for workout in workouts.iter().take(limit) {
            println!(
                "{:<36} {:<12} {:<20} {:>5} {:>10.0} {:>8.0}",
                workout.id,
                format_display_date(workout.date, self.today),
                truncate(&workout.name, 20),
                workout.exercises.len(),
                workout_volume(workout),
                workout_calories(workout, weight)
            );
        }

        Ok(())
    }

    /// Log a workout assembled from command-line exercise specs.
    pub fn add_workout(
        &mut self,
        name: &str,
        date: Option<NaiveDate>,
        strength: &[String],
        cardio: &[String],
        notes: Option<String>,
    ) -> Result<()> {
        let mut workout = Workout::new(name, date.unwrap_or(self.today));
        workout.notes = notes;

        for spec in strength {
            workout = workout.with_exercise(parse_strength_spec(spec)?);
        }
        for spec in cardio {
            workout = workout.with_exercise(parse_cardio_spec(spec)?);
        }

        self.store.save_workout(&workout)?;
        for exercise in &workout.exercises {
            self.store.add_exercise_name(&exercise.name)?;
        }
        println!("Logged workout {} ({})", workout.name, workout.id);
        Ok(())
    }

    /// Log a workout from a template, looked up by ID or name.
    pub fn workout_from_template(&mut self, template: &str, date: Option<NaiveDate>) -> Result<()> {
        let templates = self.store.list_templates()?;
        let found = match template.parse::<Uuid>() {
            Ok(id) => templates.iter().find(|t| t.id == id),
            Err(_) => templates
                .iter()
                .find(|t| t.name.eq_ignore_ascii_case(template)),
        };

        let Some(found) = found else {
            bail!("No template matches '{}'", template);
        };

        let workout = found.instantiate(date.unwrap_or(self.today));
        self.store.save_workout(&workout)?;
        println!("Logged workout {} ({}) from template", workout.name, workout.id);
        Ok(())
    }

    /// One workout with per-exercise volume and calories.
    pub fn show_workout(&self, id: &Uuid) -> Result<()> {
        let Some(workout) = self.store.get_workout(id)? else {
            bail!("Workout {} not found", id);
        };

        if self.format == OutputFormat::Json {
            return self.print_json(&workout);
        }

        let body_weight = self.store.load_profile()?.weight_kg;

        println!("{} ({})", workout.name, format_display_date(workout.date, self.today));
        if let Some(notes) = &workout.notes {
            println!("{}", notes);
        }
        println!();
        println!("{:<24} {:<9} {:<16} {:>10} {:>8}", "Exercise", "Type", "Detail", "Volume", "kcal");
        println!("{}", "-".repeat(71));
        for exercise in &workout.exercises {
            let detail = match &exercise.kind {
                ExerciseKind::Strength { sets, reps, weight } => {
                    format!("{}x{} @ {}", sets, reps, weight)
                }
                ExerciseKind::Cardio { duration, distance } => match distance {
                    Some(km) => format!("{} min, {} km", duration, km),
                    None => format!("{} min", duration),
                },
            };
            let calories = body_weight.map_or(0.0, |kg| exercise_calories(exercise, kg));
            println!(
                "{:<24} {:<9} {:<16} {:>10.0} {:>8.0}",
                truncate(&exercise.name, 24),
                exercise.kind.label(),
                truncate(&detail, 16),
                exercise_volume(exercise),
                calories
            );
        }
        println!();
        println!(
            "Total: {:.0} kg volume, {:.0} kcal",
            workout_volume(&workout),
            workout_calories(&workout, body_weight)
        );
        Ok(())
    }

    /// Delete a workout.
    pub fn delete_workout(&mut self, id: &Uuid) -> Result<()> {
        self.store.delete_workout(id)?;
        println!("Deleted workout {}", id);
        Ok(())
    }

    /// List diary entries, newest first.
    pub fn diary_list(&self) -> Result<()> {
        let entries = self.store.list_diary_entries()?;

        if self.format == OutputFormat::Json {
            return self.print_json(&entries);
        }

        if entries.is_empty() {
            println!("No diary entries yet.");
            return Ok(());
        }

        for entry in &entries {
            self.print_entry(entry);
            println!();
        }
        Ok(())
    }

    /// Show the entry for one date.
    pub fn diary_show(&self, date: Option<NaiveDate>) -> Result<()> {
        let date = date.unwrap_or(self.today);
        let entries = self.store.list_diary_entries()?;
        let entry = entry_for_date(&entries, date);

        if self.format == OutputFormat::Json {
            return self.print_json(&entry);
        }

        match entry {
            Some(entry) => self.print_entry(entry),
            None => println!("No diary entry for {}.", format_display_date(date, self.today)),
        }
        Ok(())
    }

    /// Write the given fields on a date's entry, keeping the others.
    pub fn diary_set(&mut self, date: Option<NaiveDate>, update: DiaryUpdate) -> Result<()> {
        if update.is_empty() {
            bail!("Nothing to set; pass --notes, --mood, --energy or --weight");
        }

        let date = date.unwrap_or(self.today);
        let entries = self.store.list_diary_entries()?;
        let entry = update.apply(entry_for_date(&entries, date), date)?;

        let stored = self.store.upsert_diary_entry(entry)?;
        println!("Saved diary entry for {}", stored.date);
        Ok(())
    }

    /// Delete the entry for a date.
    pub fn diary_delete(&mut self, date: NaiveDate) -> Result<()> {
        self.store.delete_diary_entry(date)?;
        println!("Deleted diary entry for {}", date);
        Ok(())
    }

    fn print_entry(&self, entry: &DiaryEntry) {
        println!("{}", format_display_date(entry.date, self.today));
        if let Some(mood) = entry.mood {
            println!("  Mood:   {}", mood);
        }
        if let Some(energy) = entry.energy {
            println!("  Energy: {}", energy);
        }
        if let Some(weight) = entry.weight_kg {
            println!("  Weight: {:.1} kg", weight);
        }
        if !entry.notes.is_empty() {
            println!("  {}", entry.notes);
        }
    }

    /// Show the profile.
    pub fn profile_show(&self) -> Result<()> {
        let profile = self.store.load_profile()?;

        if self.format == OutputFormat::Json {
            return self.print_json(&profile);
        }

        match profile.weight_kg {
            Some(weight) => println!("Body weight: {:.1} kg", weight),
            None => println!("Body weight: not set"),
        }
        println!("Updated:     {}", profile.updated_at.format("%Y-%m-%d %H:%M"));
        Ok(())
    }

    /// Set the profile body weight.
    pub fn profile_set_weight(&mut self, weight: f64) -> Result<()> {
        let mut profile = self.store.load_profile()?;
        profile
            .set_weight(weight)
            .with_context(|| format!("Cannot set body weight to {}", weight))?;
        self.store.save_profile(&profile)?;
        println!("Body weight set to {:.1} kg", weight);
        Ok(())
    }

    /// List templates, optionally for one category.
    pub fn templates_list(&self, category: Option<TemplateCategory>) -> Result<()> {
        let templates = self.store.list_templates()?;
        let criteria = SearchCriteria {
            category,
            ..Default::default()
        };
        let matching = search(&templates, &criteria);

        if self.format == OutputFormat::Json {
            return self.print_json(&matching);
        }

        println!("{:<36} {:<20} {:<12} {:>5}  {}", "ID", "Name", "Category", "Ex", "Source");
        println!("{}", "-".repeat(84));
        for template in matching {
            println!(
                "{:<36} {:<20} {:<12} {:>5}  {}",
                template.id,
                truncate(&template.name, 20),
                template.category.to_string(),
                template.exercises.len(),
                if is_builtin(&template.id) { "built-in" } else { "user" }
            );
        }
        Ok(())
    }

    /// Create a template from command-line exercise specs.
    pub fn template_add(
        &mut self,
        name: &str,
        category: TemplateCategory,
        description: Option<String>,
        strength: &[String],
        cardio: &[String],
    ) -> Result<()> {
        if name.trim().is_empty() {
            bail!("Template name must not be empty");
        }

        let mut template = WorkoutTemplate::new(name, category);
        template.description = description;
        for spec in strength {
            template = template.with_exercise(parse_strength_spec(spec)?);
        }
        for spec in cardio {
            template = template.with_exercise(parse_cardio_spec(spec)?);
        }

        self.store.save_template(&template)?;
        println!("Saved template {} ({})", template.name, template.id);
        Ok(())
    }

    /// Delete a template.
    pub fn template_delete(&mut self, id: &Uuid) -> Result<()> {
        self.store.delete_template(id)?;
        println!("Deleted template {}", id);
        Ok(())
    }
}

/// Parse `NAME:SETS:REPS:WEIGHT`.
fn parse_strength_spec(spec: &str) -> Result<Exercise> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    let [name, sets, reps, weight] = parts.as_slice() else {
        bail!("Expected NAME:SETS:REPS:WEIGHT, got '{}'", spec);
    };
    let sets: u32 = sets
        .parse()
        .with_context(|| format!("Invalid set count '{}' in '{}'", sets, spec))?;

    let exercise = Exercise::strength(*name, sets, *reps, *weight);
    exercise.validate()?;
    Ok(exercise)
}

/// Parse `NAME:MINUTES[:KM]`.
fn parse_cardio_spec(spec: &str) -> Result<Exercise> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    let exercise = match parts.as_slice() {
        [name, duration] => Exercise::cardio(*name, *duration, None),
        [name, duration, distance] => Exercise::cardio(*name, *duration, Some(*distance)),
        _ => bail!("Expected NAME:MINUTES[:KM], got '{}'", spec),
    };
    exercise.validate()?;
    Ok(exercise)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
