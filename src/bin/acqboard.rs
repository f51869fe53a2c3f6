use acqboard::config::Config;
use acqboard::dashboard::DashboardContext;
use acqboard::services::DataService;
use acqboard::{ChartBuilder, logging, server};
use clap::{Parser, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use std::path::PathBuf;
use tracing::{debug, error};

/// Interactive dashboard over a CSV of tech company acquisitions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable file logging at the given level (overrides RUST_LOG)
    #[arg(long = "logging", value_enum)]
    logging: Option<LogLevel>,
    /// Path to a config file (overrides default config discovery)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Re-render the page on every request, disable caching and log to stderr
    #[arg(long = "debug")]
    debug: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel { Error, Warn, Info, Debug, Trace }

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let cfg = Config::from_path(args.config.as_ref()).wrap_err("Failed to load configuration")?;
    let debug_mode = args.debug || cfg.debug;

    let cwd = std::env::current_dir()?;
    let log_path = cwd.join(logging::LOG_FILE.clone());
    let level = match args.logging {
        Some(LogLevel::Error) => Some(tracing::Level::ERROR),
        Some(LogLevel::Warn)  => Some(tracing::Level::WARN),
        Some(LogLevel::Info)  => Some(tracing::Level::INFO),
        Some(LogLevel::Debug) => Some(tracing::Level::DEBUG),
        Some(LogLevel::Trace) => Some(tracing::Level::TRACE),
        None if debug_mode => Some(tracing::Level::DEBUG),
        None => None,
    };
    logging::init_with(Some(log_path), level, debug_mode)?;
    debug!("Loaded configuration: {cfg:?}");

    let loaded = DataService::load_acquisitions_async(cfg.data.path.clone(), cfg.csv_options()?).await;
    let table = match loaded {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to load acquisitions: {e:?}");
            return Err(e.wrap_err(format!("Could not load {}", cfg.data.path.display())));
        }
    };

    let builder = ChartBuilder::new(cfg.chart_theme()?);
    let settings = cfg.view_settings();
    let context = tokio::task::spawn_blocking(move || {
        DashboardContext::build(table, builder, settings, debug_mode)
    })
    .await??;

    let address = cfg.address();
    println!("Dashboard running on http://{address}/");
    server::serve(context, &address).await
}
