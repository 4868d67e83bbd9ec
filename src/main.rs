use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use calorie::audit::AuditLogger;
use calorie::cli::{
    handle_limit_command, handle_log_command, handle_meal_command, handle_reset_command,
    handle_status_command, handle_workout_command, EntryCommands,
};
use calorie::config::{CaloriePaths, Settings};
use calorie::models::RandomIdGenerator;
use calorie::services::TrackerService;
use calorie::storage::open_file_store;

#[derive(Parser)]
#[command(
    name = "calorie",
    version,
    about = "Track meals and workouts against a daily calorie limit",
    long_about = "Log what you eat and how you exercise. The running total is \
                  calories consumed minus calories burned, compared against \
                  your daily limit. State is kept between runs."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Meal commands
    #[command(subcommand)]
    Meal(EntryCommands),

    /// Workout commands
    #[command(subcommand, alias = "wo")]
    Workout(EntryCommands),

    /// Set the daily calorie limit
    Limit {
        /// New limit in calories
        calories: i64,
    },

    /// Show totals against the limit
    Status,

    /// Clear all meals, workouts and the limit
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show recent audit history
    Log {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let paths = CaloriePaths::new().context("failed to resolve data directory")?;
    let settings = Settings::load_or_create(&paths).context("failed to load settings")?;
    tracing::debug!(?settings, base_dir = %paths.base_dir().display(), "loaded configuration");

    let store = open_file_store(&paths).context("failed to open store")?;
    let mut tracker = TrackerService::load(store, RandomIdGenerator, settings.default_calorie_limit)
        .context("failed to load ledger")?;
    if settings.audit_enabled {
        tracker = tracker.with_audit(AuditLogger::new(paths.audit_log()));
    }

    match cli.command {
        Some(Commands::Meal(cmd)) => handle_meal_command(&mut tracker, cmd)?,
        Some(Commands::Workout(cmd)) => handle_workout_command(&mut tracker, cmd)?,
        Some(Commands::Limit { calories }) => handle_limit_command(&mut tracker, calories)?,
        Some(Commands::Status) | None => handle_status_command(&tracker)?,
        Some(Commands::Reset { force }) => handle_reset_command(&mut tracker, force)?,
        Some(Commands::Log { limit }) => {
            handle_log_command(&AuditLogger::new(paths.audit_log()), limit)?
        }
        Some(Commands::Config) => {
            println!("Calorie Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Store file:     {}", paths.store_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Default calorie limit: {}", settings.default_calorie_limit);
            println!("  Audit log enabled:     {}", settings.audit_enabled);
        }
    }

    Ok(())
}
