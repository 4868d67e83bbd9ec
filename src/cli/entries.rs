//! Meal and workout CLI commands
//!
//! Both entry kinds share one set of subcommands.

use clap::Subcommand;

use crate::display::{format_entry_list, format_summary};
use crate::error::CalorieResult;
use crate::models::IdGenerator;
use crate::services::TrackerService;
use crate::storage::KeyValueStore;

/// Subcommands for meals and workouts
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Log a new entry
    Add {
        /// What was eaten or done
        name: String,
        /// Calorie value
        calories: i64,
    },
    /// List entries
    #[command(alias = "ls")]
    List {
        /// Only show entries whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Remove an entry
    #[command(alias = "rm")]
    Remove {
        /// Entry ID (full UUID, display form, or unique prefix)
        id: String,
    },
}

/// Handle a meal command
pub fn handle_meal_command<S, G>(
    tracker: &mut TrackerService<S, G>,
    cmd: EntryCommands,
) -> CalorieResult<()>
where
    S: KeyValueStore,
    G: IdGenerator,
{
    match cmd {
        EntryCommands::Add { name, calories } => {
            let meal = tracker.add_meal(&name, calories)?;
            println!("Added meal: {} ({} cal) [{}]", meal.name, meal.calories, meal.id);
            println!();
            println!("{}", format_summary(&tracker.summary()));
        }
        EntryCommands::List { search } => {
            let meals = tracker.filter_meals(search.as_deref().unwrap_or(""));
            println!("{}", format_entry_list("Meals", &meals));
        }
        EntryCommands::Remove { id } => {
            let meal_id = tracker.find_meal(&id)?.id;
            let meal = tracker.remove_meal(meal_id)?;
            println!("Removed meal: {} ({} cal)", meal.name, meal.calories);
            println!();
            println!("{}", format_summary(&tracker.summary()));
        }
    }

    Ok(())
}

/// Handle a workout command
pub fn handle_workout_command<S, G>(
    tracker: &mut TrackerService<S, G>,
    cmd: EntryCommands,
) -> CalorieResult<()>
where
    S: KeyValueStore,
    G: IdGenerator,
{
    match cmd {
        EntryCommands::Add { name, calories } => {
            let workout = tracker.add_workout(&name, calories)?;
            println!(
                "Added workout: {} ({} cal) [{}]",
                workout.name, workout.calories, workout.id
            );
            println!();
            println!("{}", format_summary(&tracker.summary()));
        }
        EntryCommands::List { search } => {
            let workouts = tracker.filter_workouts(search.as_deref().unwrap_or(""));
            println!("{}", format_entry_list("Workouts", &workouts));
        }
        EntryCommands::Remove { id } => {
            let workout_id = tracker.find_workout(&id)?.id;
            let workout = tracker.remove_workout(workout_id)?;
            println!("Removed workout: {} ({} cal)", workout.name, workout.calories);
            println!();
            println!("{}", format_summary(&tracker.summary()));
        }
    }

    Ok(())
}
