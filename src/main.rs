use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{LogLevel, LoggingSettings, Overrides};
use dashboard::Dashboard;
use data_loader::{CsvSource, DataSource};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use web_server::AppState;

mod summary;

/// The main entry point for the price history dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let overrides = Overrides {
        data_path: cli.data.clone(),
        port: match &cli.command {
            Commands::Serve(args) => args.port,
            Commands::Summary(_) => None,
        },
        log_level: cli.log_level,
    };
    let settings = configuration::load_config(&cli.config, &overrides)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    let _log_guard = init_tracing(&settings.logging);

    // The dataset and every derived statistic are built once, up front.
    // Any failure here is fatal: there is no dashboard without them.
    let dataset = CsvSource::new(&settings.data.path)
        .load()
        .with_context(|| format!("Failed to load {}", settings.data.path.display()))?;
    let dashboard = Dashboard::build(dataset)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(_) => {
            let state = AppState {
                dashboard,
                title: settings.server.title.clone(),
            };
            web_server::run_server(settings.server.addr(), state).await?;
        }
        Commands::Summary(args) => handle_summary(&dashboard, args)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// An analytic dashboard over a monthly price history.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "dashboard.toml")]
    config: PathBuf,

    /// Overrides `data.path` from the configuration.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Overrides `logging.level` from the configuration.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the interactive dashboard over HTTP.
    Serve(ServeArgs),
    /// Print the KPIs and descriptive statistics to the terminal.
    Summary(SummaryArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.port` from the configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct SummaryArgs {
    /// Print JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_summary(dashboard: &Dashboard, args: SummaryArgs) -> anyhow::Result<()> {
    if args.json {
        let body = serde_json::json!({
            "kpis": dashboard.kpis(),
            "statistics": dashboard.statistics(),
            "span": dashboard.span(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let span = dashboard.span();
    println!(
        "{} records from {} to {}\n",
        dashboard.dataset().len(),
        span.first,
        span.last
    );
    for line in summary::kpi_lines(dashboard.kpis()) {
        println!("{line}");
    }
    println!("\nDescriptive Statistics");
    println!("{}", summary::statistics_table(dashboard.statistics()));

    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// The returned guard flushes the log file on drop and must be held until exit.
fn init_tracing(logging: &LoggingSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    let console = fmt::layer().with_target(false);

    match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "pricedash.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(filter).with(console).init();
            None
        }
    }
}
