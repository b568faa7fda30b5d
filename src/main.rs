mod commands;
mod domain;
mod logging;
mod services;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use crate::commands::base_commands::{CliArgs, Commands, normalize_mode_keyword};
use crate::commands::completions_cmd::completions_command;
use crate::commands::forecast_cmd::forecast_command;
use crate::domain::simulation_mode::SimulationMode;
use clap::Parser;

fn main() -> ExitCode {
    logging::init_tracing();
    let args = CliArgs::parse_from(normalize_mode_keyword(std::env::args_os()));
    match args.command {
        Commands::HowMany {
            history,
            simulations,
            periods,
            options,
        } => forecast_command(
            SimulationMode::HowMany { periods },
            &history,
            simulations,
            &options,
        ),
        Commands::HowLong {
            history,
            simulations,
            items,
            options,
        } => forecast_command(
            SimulationMode::HowLong {
                target_items: items,
            },
            &history,
            simulations,
            &options,
        ),
        Commands::Completions { shell } => {
            completions_command(shell);
            ExitCode::SUCCESS
        }
    }
}
