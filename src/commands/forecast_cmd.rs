use std::path::Path;
use std::process::ExitCode;

use thiserror::Error;
use tracing::{error, info};

use crate::commands::base_commands::{INVOCATION_HELP, RunArgs};
use crate::commands::report_format::format_percentile_report;
use crate::domain::simulation_mode::SimulationMode;
use crate::services::forecast_config::{
    ConfigError, ConfigOverrides, ForecastConfig, ForecastSettings,
};
use crate::services::histogram::write_histogram_png;
use crate::services::report_output::write_report_file;
use crate::services::simulation::{RunOptions, SimulationError, simulate_from_history_file};

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Cannot find the historic file '{0}'")]
    HistoryNotFound(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),
}

impl ForecastError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ForecastError::HistoryNotFound(_) => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}

pub fn forecast_command(
    mode: SimulationMode,
    history: &str,
    simulations: usize,
    options: &RunArgs,
) -> ExitCode {
    match run_forecast(mode, history, simulations, options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            if matches!(e, ForecastError::HistoryNotFound(_)) {
                eprintln!("\n{INVOCATION_HELP}");
            }
            e.exit_code()
        }
    }
}

fn run_forecast(
    mode: SimulationMode,
    history: &str,
    simulations: usize,
    options: &RunArgs,
) -> Result<(), ForecastError> {
    if !Path::new(history).is_file() {
        return Err(ForecastError::HistoryNotFound(history.to_string()));
    }

    let settings = resolve_settings(options)?;
    let run_options = RunOptions {
        percentiles: settings.percentiles.clone(),
        seed: settings.seed,
        threads: settings.threads,
    };
    info!(%mode, simulations, threads = settings.threads, "starting forecast");

    let simulation = simulate_from_history_file(history, mode, simulations, &run_options)?;

    match write_histogram_png(
        &settings.chart_path,
        &simulation.results.histogram(),
        simulation.results.mode(),
        settings.chart_dimensions,
    ) {
        Ok(()) => println!("Chart saved to {}", settings.chart_path),
        Err(e) => error!("failed to write histogram {}: {e}", settings.chart_path),
    }

    println!("{}", format_percentile_report(&simulation.report));

    if let Some(output) = &options.output {
        match write_report_file(output, &simulation.report) {
            Ok(()) => println!("Report written to {output}"),
            Err(e) => error!("{e}"),
        }
    }

    Ok(())
}

fn resolve_settings(options: &RunArgs) -> Result<ForecastSettings, ForecastError> {
    let config = match &options.config {
        Some(path) => ForecastConfig::from_yaml_file(path)?,
        None => ForecastConfig::default(),
    };
    let overrides = ConfigOverrides {
        chart_path: options.chart.clone(),
        seed: options.seed,
        threads: options.threads,
    };
    Ok(ForecastSettings::resolve(config, overrides)?)
}
