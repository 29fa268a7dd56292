use analytics::{WeeklyAnalyzer, daily};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::LoggingConfig;
use configuration::settings::Config;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod input;
mod render;

/// The main entry point for the weekly trading report tool.
fn main() -> Result<()> {
    // Load WEEKLY_REPORT__* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Weekly(args) => handle_weekly(args, &config),
        Commands::Daily(args) => handle_daily(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Weekly performance reports from exported daily trading tables.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-week trajectory, streaks and volatility.
    Weekly(ReportArgs),
    /// Day-level split of positive and negative changes.
    Daily(ReportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// The CSV export to analyze; the first row must be the header.
    #[arg(long, short)]
    input: PathBuf,

    /// Field delimiter of the CSV file.
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Print the report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_weekly(args: ReportArgs, config: &Config) -> Result<()> {
    let table = input::read_table(&args.input, args.delimiter)?;
    tracing::info!(
        path = %args.input.display(),
        rows = table.data_row_count(),
        "Loaded input table."
    );

    let analyzer = WeeklyAnalyzer::new(config.analysis.clone())?;
    let analysis = analyzer
        .process_table(&table)
        .with_context(|| format!("Failed to analyze {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        render::print_weekly(&analysis);
    }
    Ok(())
}

fn handle_daily(args: ReportArgs) -> Result<()> {
    let table = input::read_table(&args.input, args.delimiter)?;
    let analysis = daily::process_table(&table)
        .with_context(|| format!("Failed to analyze {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        render::print_daily(&analysis);
    }
    Ok(())
}

/// Installs the global subscriber. Logs go to stderr so that JSON on stdout stays
/// clean, or to a daily-rolling file when `logging.directory` is configured.
fn init_tracing(logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("Invalid logging.level filter")?;

    match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "weekly-report.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(Some(guard))
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(None)
        }
    }
}
