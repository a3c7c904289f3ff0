//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::frame_csv_adapter::CsvFrameAdapter;
use crate::domain::config_validation::{parse_date, validate_config};
use crate::domain::error::CompounderError;
use crate::domain::interpolator::{from_states, interpolate};
use crate::domain::observation::Granularity;
use crate::domain::pacer::{FramePlan, Timing};
use crate::domain::settings::RunSettings;
use crate::domain::simulator::{simulate, InvestmentPlan, PortfolioState};
use crate::domain::summary::Summary;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::frame_port::FramePort;

#[derive(Parser, Debug)]
#[command(
    name = "compounder",
    about = "Animate the growth of a recurring investment"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate the investment and write the frame manifest
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        granularity: Option<Granularity>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the stored data range for a ticker
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
}

/// Values given on the command line that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub ticker: Option<String>,
    pub granularity: Option<Granularity>,
    pub output: Option<PathBuf>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            output,
            ticker,
            granularity,
            dry_run,
        } => {
            let overrides = Overrides {
                ticker,
                granularity,
                output,
            };
            if dry_run {
                run_dry_run(&config, &overrides)
            } else {
                run_simulate(&config, &overrides)
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::Info { config, ticker } => run_info(&config, ticker.as_deref()),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = CompounderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn load_settings(config_path: &Path, overrides: &Overrides) -> Result<RunSettings, ExitCode> {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = load_config(config_path)?;

    validate_config(&adapter)
        .and_then(|()| build_settings(&adapter, overrides))
        .map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        })
}

/// Resolve run settings from configuration, applying command-line overrides.
pub fn build_settings(
    adapter: &dyn ConfigPort,
    overrides: &Overrides,
) -> Result<RunSettings, CompounderError> {
    let ticker = match &overrides.ticker {
        Some(t) => t.trim().to_uppercase(),
        None => adapter
            .get_string("data", "ticker")
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CompounderError::ConfigMissing {
                section: "data".into(),
                key: "ticker".into(),
            })?,
    };

    let start_date = parse_date(
        adapter.get_string("data", "start_date").as_deref(),
        "start_date",
    )?;
    let end_date = parse_date(adapter.get_string("data", "end_date").as_deref(), "end_date")?;

    let granularity = match overrides.granularity {
        Some(g) => g,
        None => match adapter.get_string("animation", "granularity") {
            Some(s) => s.parse().map_err(|_| CompounderError::ConfigInvalid {
                section: "animation".into(),
                key: "granularity".into(),
                reason: "granularity must be daily, weekly or monthly".into(),
            })?,
            None => Granularity::default(),
        },
    };

    let defaults = Timing::default();
    let frame_rate = adapter.get_int("animation", "frame_rate", defaults.frame_rate as i64)?;
    let frame_rate = u32::try_from(frame_rate).map_err(|_| CompounderError::ConfigInvalid {
        section: "animation".into(),
        key: "frame_rate".into(),
        reason: "frame_rate must be a positive integer".into(),
    })?;

    let output_path = overrides
        .output
        .clone()
        .or_else(|| adapter.get_string("output", "path").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("frames.csv"));

    Ok(RunSettings {
        ticker,
        start_date,
        end_date,
        data_dir: adapter
            .get_string("data", "data_dir")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data")),
        plan: InvestmentPlan {
            contribution: adapter.get_double("investment", "contribution", 0.0)?,
            initial_balance: adapter.get_double("investment", "initial_balance", 0.0)?,
        },
        timing: Timing {
            chart_duration: adapter.get_double(
                "animation",
                "chart_duration",
                defaults.chart_duration,
            )?,
            ending_duration: adapter.get_double(
                "animation",
                "ending_duration",
                defaults.ending_duration,
            )?,
            frame_rate,
        },
        granularity,
        output_path,
    })
}

/// Output of a full pipeline run.
#[derive(Debug)]
pub struct PipelineOutput {
    pub states: Vec<PortfolioState>,
    pub plan: FramePlan,
}

/// Provider -> simulator -> interpolator -> pacer.
///
/// The monthly series always drives the simulation; a denser series is only
/// fetched when the display granularity asks for one.
pub fn run_pipeline(
    data_port: &dyn DataPort,
    settings: &RunSettings,
) -> Result<PipelineOutput, CompounderError> {
    let monthly = data_port.fetch_series(
        &settings.ticker,
        Granularity::Monthly,
        settings.start_date,
        settings.end_date,
    )?;
    eprintln!("  Monthly periods: {}", monthly.len());

    let states = simulate(&monthly, &settings.plan)?;

    let series = match settings.granularity {
        Granularity::Monthly => from_states(&states)?,
        dense => {
            let observations = data_port.fetch_series(
                &settings.ticker,
                dense,
                settings.start_date,
                settings.end_date,
            )?;
            eprintln!("  {} points: {}", dense, observations.len());
            interpolate(&observations, &states)?
        }
    };

    let plan = FramePlan::build(series, &settings.timing)?;
    Ok(PipelineOutput { states, plan })
}

fn run_simulate(config_path: &Path, overrides: &Overrides) -> ExitCode {
    let settings = match load_settings(config_path, overrides) {
        Ok(s) => s,
        Err(code) => return code,
    };

    eprintln!(
        "Simulating {}: {} to {}, {} display",
        settings.ticker, settings.start_date, settings.end_date, settings.granularity
    );

    let data_port = CsvAdapter::new(settings.data_dir.clone());
    let output = match run_pipeline(&data_port, &settings) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Some(summary) = Summary::compute(&output.states) {
        print_summary(&summary);
    }

    eprintln!(
        "\nFrames: {} growth + {} freeze = {}",
        output.plan.growth_frame_count(),
        output.plan.freeze_frame_count(),
        output.plan.frame_count()
    );

    match CsvFrameAdapter.write(&output.plan, &settings.output_path) {
        Ok(()) => {
            eprintln!("Frame manifest written to: {}", settings.output_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write frames: {e}");
            (&e).into()
        }
    }
}

fn print_summary(summary: &Summary) {
    eprintln!("\n=== Summary ===");
    eprintln!("Periods:          {}", summary.periods);
    eprintln!("Total Invested:   ${:.2}", summary.total_contributed);
    eprintln!("Final Value:      ${:.2}", summary.final_value);
    eprintln!("Dividends:        ${:.2}", summary.total_dividends);
    eprintln!("Shares Held:      {}", summary.shares_held);
    eprintln!("Uninvested Cash:  ${:.2}", summary.cash_balance);
    eprintln!("Total Return:     {:.2}%", summary.total_return * 100.0);
}

pub fn run_dry_run(config_path: &Path, overrides: &Overrides) -> ExitCode {
    let settings = match load_settings(config_path, overrides) {
        Ok(s) => s,
        Err(code) => return code,
    };
    eprintln!("Config validated successfully");

    eprintln!("\nData:");
    eprintln!("  ticker:       {}", settings.ticker);
    eprintln!("  range:        {} to {}", settings.start_date, settings.end_date);
    eprintln!("  source:       {}", settings.data_dir.display());

    eprintln!("\nInvestment:");
    eprintln!("  contribution: {:.2}", settings.plan.contribution);
    eprintln!("  initial:      {:.2}", settings.plan.initial_balance);

    eprintln!("\nAnimation:");
    eprintln!("  granularity:  {}", settings.granularity);
    eprintln!(
        "  frames:       {} chart + {} ending at {} fps",
        settings.timing.chart_frames(),
        settings.timing.end_frames(),
        settings.timing.frame_rate
    );
    eprintln!("  output:       {}", settings.output_path.display());

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match validate_config(&adapter) {
        Ok(()) => {
            eprintln!("Configuration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &Path, ticker: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let ticker = match ticker
        .map(str::to_string)
        .or_else(|| config.get_string("data", "ticker"))
    {
        Some(t) => t.trim().to_uppercase(),
        None => {
            eprintln!("error: ticker is required (use --ticker or set in config)");
            return ExitCode::from(2);
        }
    };

    let data_dir = config
        .get_string("data", "data_dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    let adapter = CsvAdapter::new(data_dir);

    match adapter.get_data_range(&ticker) {
        Ok(Some((first, last, count))) => {
            println!("{}: {} days, {} to {}", ticker, count, first, last);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}: no data found", ticker);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error querying {}: {}", ticker, e);
            (&e).into()
        }
    }
}
