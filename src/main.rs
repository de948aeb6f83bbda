use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::*;
use std::io::Write;
use std::path::PathBuf;

use loadtrend::config::AppConfig;
use loadtrend::error::ErrorSeverity;
use loadtrend::export::{self, DateRange, ExportFormat};
use loadtrend::logging::{init_logging, LogLevel};
use loadtrend::{
    ActivityType, Clock, DayFitnessTrend, FitnessTrendService, FixedClock, HeartRateImpulseMode,
    JsonFileSource, PmcCalculator, SystemClock, TrendError, TsbInterpretation,
};

/// loadtrend - Training load trend CLI
///
/// Turns an activity history into daily training stress and a
/// fitness (CTL), fatigue (ATL) and form (TSB) trend.
#[derive(Parser)]
#[command(name = "loadtrend")]
#[command(version)]
#[command(about = "Training load trend CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the fitness trend from an activity file
    Trend {
        /// JSON array of activities
        #[arg(short, long, value_name = "FILE")]
        activities: PathBuf,

        /// Heart rate scoring mode (trimp, hrss)
        #[arg(short, long)]
        mode: Option<HeartRateImpulseMode>,

        /// Score rides from power meter data
        #[arg(long)]
        power: bool,

        /// Score swims from pace
        #[arg(long)]
        swim: bool,

        /// Activity types to leave out (repeatable)
        #[arg(long, value_name = "TYPE")]
        skip: Vec<String>,

        /// Use this date as today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// First date to display (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last date to display (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only show the most recent N days
        #[arg(short, long)]
        limit: Option<usize>,

        /// Hide the preview days after today
        #[arg(long)]
        no_preview: bool,

        /// Output format (table, json, csv)
        #[arg(short = 'f', long, default_value = "table")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage the configuration file
    Config {
        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Print the active configuration
        #[arg(long)]
        show: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load_or_default(),
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_trend(
    mut config: AppConfig,
    activities: PathBuf,
    mode: Option<HeartRateImpulseMode>,
    power: bool,
    swim: bool,
    skip: Vec<String>,
    today: Option<NaiveDate>,
    range: DateRange,
    limit: Option<usize>,
    no_preview: bool,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    if let Some(mode) = mode {
        config.options.mode = mode;
    }
    config.options.power_enabled |= power;
    config.options.swim_enabled |= swim;
    config
        .options
        .skip_types
        .extend(skip.into_iter().map(ActivityType::from));

    let source = JsonFileSource::new(&activities);
    let trend = match today {
        Some(date) => compute(source, FixedClock(date), config).await?,
        None => compute(source, SystemClock, config).await?,
    };

    let mut selected: Vec<&DayFitnessTrend> = range
        .filter_trend(&trend)
        .into_iter()
        .filter(|day| !(no_preview && day.preview))
        .collect();
    if let Some(limit) = limit {
        let skip = selected.len().saturating_sub(limit);
        selected.drain(..skip);
    }

    match &output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            export::export_trend(&selected, format, file)?;
            eprintln!("{}", format!("✓ Trend written to {}", path.display()).green());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            export::export_trend(&selected, format, &mut handle)?;
            handle.flush()?;
        }
    }

    if format == ExportFormat::Table {
        if let Some(latest) = PmcCalculator::latest(&trend) {
            let form = TsbInterpretation::from_tsb(latest.tsb);
            println!(
                "{} CTL {:.1}  ATL {:.1}  TSB {:.1}  {}",
                latest.date.format("%Y-%m-%d").to_string().bold(),
                latest.ctl,
                latest.atl,
                latest.tsb,
                form.description().cyan()
            );
        }
    }

    Ok(())
}

async fn compute<C: Clock>(
    source: JsonFileSource,
    clock: C,
    config: AppConfig,
) -> std::result::Result<Vec<DayFitnessTrend>, TrendError> {
    let service = FitnessTrendService::new(source, clock, config.athlete, config.options);
    service.compute_trend().await
}

fn run_config(config_path: Option<PathBuf>, init: bool, show: bool) -> Result<()> {
    let path = config_path.unwrap_or_else(AppConfig::default_config_path);

    if init {
        if path.exists() {
            anyhow::bail!("Configuration already exists: {}", path.display());
        }
        AppConfig::default().save_to_file(&path)?;
        println!("{}", format!("✓ Configuration written to {}", path.display()).green());
    }

    if show || !init {
        let config = AppConfig::load_from_file(&path)?;
        println!("{}", toml::to_string_pretty(&config)?);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Trend {
            activities,
            mode,
            power,
            swim,
            skip,
            today,
            from,
            to,
            limit,
            no_preview,
            format,
            output,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            if cli.verbose > 0 {
                config.logging.level = LogLevel::from_verbosity(cli.verbose);
            }
            init_logging(&config.logging)?;

            run_trend(
                config,
                activities,
                mode,
                power,
                swim,
                skip,
                today,
                DateRange::new(from, to),
                limit,
                no_preview,
                format,
                output,
            )
            .await
        }

        Commands::Config { init, show } => run_config(cli.config, init, show),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        let message = match e.downcast_ref::<TrendError>() {
            Some(trend_error) => {
                match trend_error.severity() {
                    ErrorSeverity::Warning => tracing::warn!(error = %trend_error, "Trend not computed"),
                    ErrorSeverity::Error => tracing::error!(error = %trend_error, "Trend failed"),
                }
                trend_error.user_message()
            }
            None => format!("{:#}", e),
        };
        eprintln!("{} {}", "error:".red().bold(), message);
        std::process::exit(1);
    }
}
