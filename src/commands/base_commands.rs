use std::ffi::OsString;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

pub const INVOCATION_HELP: &str = "\
Usage:
----------
forecast howmany [history input file] [number of simulations] [number of periods]
OR
forecast howlong [history input file] [number of simulations] [items to complete]

The mode keyword is case-insensitive (HOWMANY, HowLong, ...).";

#[derive(Parser)]
#[command(name = "forecast", author, version, about, after_help = INVOCATION_HELP)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast how many items are delivered over a number of periods
    #[command(name = "howmany")]
    HowMany {
        /// History file, one "label,delivered items" line per period
        history: String,
        /// Number of simulations
        #[arg(value_parser = parse_positive_count)]
        simulations: usize,
        /// Number of periods in each simulation
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        periods: u64,
        #[command(flatten)]
        options: RunArgs,
    },
    /// Forecast how many periods are needed to complete a number of items
    #[command(name = "howlong")]
    HowLong {
        /// History file, one "label,delivered items" line per period
        history: String,
        /// Number of simulations
        #[arg(value_parser = parse_positive_count)]
        simulations: usize,
        /// Number of items to complete
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        items: u64,
        #[command(flatten)]
        options: RunArgs,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Histogram PNG path [default: MonteCarloResults.png]
    #[arg(long)]
    pub chart: Option<String>,
    /// Also write the report to this file (YAML, or JSON for *.json)
    #[arg(short, long)]
    pub output: Option<String>,
    /// Seed for reproducible simulations
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Number of worker threads
    #[arg(short, long)]
    pub threads: Option<usize>,
    /// Optional YAML config file
    #[arg(short, long)]
    pub config: Option<String>,
}

const MAX_SIMULATIONS: usize = i32::MAX as usize;

fn parse_positive_count(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(count) if (1..=MAX_SIMULATIONS).contains(&count) => Ok(count),
        Ok(_) => Err(format!("must be between 1 and {MAX_SIMULATIONS}")),
        Err(e) => Err(e.to_string()),
    }
}

/// Lowercases the mode keyword so `HOWMANY`, `HowMany` and `howmany` all match.
pub fn normalize_mode_keyword<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if let Some(keyword) = args.get_mut(1) {
        let lowered = keyword.to_string_lossy().to_ascii_lowercase();
        if lowered == "howmany" || lowered == "howlong" {
            *keyword = OsString::from(lowered);
        }
    }
    args
}
