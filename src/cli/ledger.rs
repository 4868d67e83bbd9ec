//! Ledger-wide CLI commands: limit, status, reset and audit history

use crate::audit::AuditLogger;
use crate::display::format_summary;
use crate::error::CalorieResult;
use crate::models::IdGenerator;
use crate::services::TrackerService;
use crate::storage::KeyValueStore;

/// Handle `limit <CALORIES>`
pub fn handle_limit_command<S, G>(
    tracker: &mut TrackerService<S, G>,
    calories: i64,
) -> CalorieResult<()>
where
    S: KeyValueStore,
    G: IdGenerator,
{
    tracker.set_limit(calories)?;
    println!("Daily calorie limit set to {}", calories);
    println!();
    println!("{}", format_summary(&tracker.summary()));
    Ok(())
}

/// Handle `status`
pub fn handle_status_command<S, G>(tracker: &TrackerService<S, G>) -> CalorieResult<()>
where
    S: KeyValueStore,
    G: IdGenerator,
{
    let state = tracker.state();
    println!(
        "{} meals, {} workouts logged",
        state.meals.len(),
        state.workouts.len()
    );
    println!();
    println!("{}", format_summary(&tracker.summary()));
    Ok(())
}

/// Handle `reset`; without `force` only reports what would be cleared
pub fn handle_reset_command<S, G>(tracker: &mut TrackerService<S, G>, force: bool) -> CalorieResult<()>
where
    S: KeyValueStore,
    G: IdGenerator,
{
    let state = tracker.state();
    if !force {
        println!(
            "About to clear {} meals, {} workouts and the calorie limit",
            state.meals.len(),
            state.workouts.len()
        );
        println!("Use --force to confirm reset");
        return Ok(());
    }

    tracker.reset()?;
    println!("Tracker reset.");
    println!();
    println!("{}", format_summary(&tracker.summary()));
    Ok(())
}

/// Handle `log`: print the most recent audit entries
pub fn handle_log_command(logger: &AuditLogger, limit: usize) -> CalorieResult<()> {
    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries recorded.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
