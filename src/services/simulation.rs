use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::history::HistoricalSample;
use crate::domain::simulation_mode::SimulationMode;
use crate::services::history_loader::load_history;
use crate::services::index_source::IndexSource;
use crate::services::simulation_types::{ResultSet, SimulationReport};

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("history contains no usable samples")]
    EmptyHistory,
    #[error("number of simulations must be greater than zero")]
    InvalidSimulations,
    #[error("number of periods must be greater than zero")]
    InvalidPeriods,
    #[error("items to complete must be greater than zero")]
    InvalidTargetItems,
    #[error("history has no nonzero values, {target_items} items can never be completed")]
    NonTerminating { target_items: u64 },
    #[error("cannot hold results of {simulations} simulations in memory")]
    TooManySimulations { simulations: usize },
    #[error("simulation was cancelled")]
    Cancelled,
    #[error("failed to start simulation workers: {0}")]
    Workers(#[from] rayon::ThreadPoolBuildError),
}

const TRIALS_PER_CHUNK: usize = 4096;

/// Knobs for a run that do not change what is being simulated.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub percentiles: Vec<f64>,
    pub seed: Option<u64>,
    pub threads: usize,
}

#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub report: SimulationReport,
    pub results: ResultSet,
}

pub(crate) fn simulate_from_history_file(
    history_path: &str,
    mode: SimulationMode,
    simulations: usize,
    options: &RunOptions,
) -> Result<SimulationOutput, SimulationError> {
    let values = load_history(history_path);
    let sample = HistoricalSample::new(values).ok_or(SimulationError::EmptyHistory)?;
    info!(
        history = history_path,
        periods = sample.len(),
        max_per_period = sample.max(),
        "loaded historical throughput"
    );

    let results = run_simulation(mode, simulations, &sample, options)?;
    info!(%mode, trials = results.len(), "simulation finished");
    let report = SimulationReport {
        data_source: data_source_name(history_path),
        mode,
        simulations,
        history_periods: sample.len(),
        seed: options.seed,
        percentiles: results.percentile_report(&options.percentiles),
    };

    Ok(SimulationOutput { report, results })
}

/// Picks the sequential or the parallel engine depending on `options.threads`.
pub(crate) fn run_simulation(
    mode: SimulationMode,
    simulations: usize,
    sample: &HistoricalSample,
    options: &RunOptions,
) -> Result<ResultSet, SimulationError> {
    if options.threads > 1 {
        let seed = options
            .seed
            .unwrap_or_else(|| rand::thread_rng().next_u64());
        let cancel = AtomicBool::new(false);
        return simulate_parallel(mode, simulations, sample, options.threads, seed, &cancel);
    }

    match options.seed {
        Some(seed) => simulate(mode, simulations, sample, &mut StdRng::seed_from_u64(seed)),
        None => simulate(mode, simulations, sample, &mut rand::thread_rng()),
    }
}

/// Runs `simulations` independent trials drawing indices from `source`.
///
/// The returned set is sorted best-first for `mode`: descending totals for
/// `HowMany`, ascending period counts for `HowLong`.
pub fn simulate<S: IndexSource + ?Sized>(
    mode: SimulationMode,
    simulations: usize,
    sample: &HistoricalSample,
    source: &mut S,
) -> Result<ResultSet, SimulationError> {
    validate(mode, simulations, sample)?;
    debug!(%mode, simulations, "running sequential simulation");

    let mut outcomes = allocate_outcomes(simulations)?;
    outcomes.extend((0..simulations).map(|_| run_trial(mode, sample, source)));
    Ok(ResultSet::from_outcomes(mode, outcomes))
}

/// Runs the trials on up to `threads` workers.
///
/// Trials are split into fixed-size chunks, each drawing from its own `StdRng`
/// seeded from `seed`, so the same seed reproduces the same results whatever
/// the worker count. The pool never has more workers than chunks or than the
/// machine's available parallelism. `cancel` is checked between trials.
pub fn simulate_parallel(
    mode: SimulationMode,
    simulations: usize,
    sample: &HistoricalSample,
    threads: usize,
    seed: u64,
    cancel: &AtomicBool,
) -> Result<ResultSet, SimulationError> {
    validate(mode, simulations, sample)?;
    let chunk_count = simulations.div_ceil(TRIALS_PER_CHUNK);
    let workers = worker_count(threads, chunk_count);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
    debug!(%mode, simulations, requested = threads, workers, seed, "running parallel simulation");

    let mut seeder = StdRng::seed_from_u64(seed);
    let chunk_seeds: Vec<u64> = (0..chunk_count).map(|_| seeder.next_u64()).collect();

    let mut outcomes = allocate_outcomes(simulations)?;
    outcomes.resize(simulations, 0);
    let completed = pool.install(|| {
        outcomes
            .par_chunks_mut(TRIALS_PER_CHUNK)
            .enumerate()
            .map(|(chunk_index, chunk)| {
                let mut rng = StdRng::seed_from_u64(chunk_seeds[chunk_index]);
                for slot in chunk.iter_mut() {
                    if cancel.load(Ordering::Relaxed) {
                        return false;
                    }
                    *slot = run_trial(mode, sample, &mut rng);
                }
                true
            })
            .all(|finished| finished)
    });

    if !completed {
        return Err(SimulationError::Cancelled);
    }
    Ok(ResultSet::from_outcomes(mode, outcomes))
}

fn worker_count(requested: usize, chunk_count: usize) -> usize {
    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    requested.min(chunk_count).min(available).max(1)
}

fn allocate_outcomes(simulations: usize) -> Result<Vec<u64>, SimulationError> {
    let mut outcomes = Vec::new();
    outcomes
        .try_reserve_exact(simulations)
        .map_err(|_| SimulationError::TooManySimulations { simulations })?;
    Ok(outcomes)
}

fn validate(
    mode: SimulationMode,
    simulations: usize,
    sample: &HistoricalSample,
) -> Result<(), SimulationError> {
    if simulations == 0 {
        return Err(SimulationError::InvalidSimulations);
    }
    match mode {
        SimulationMode::HowMany { periods } if periods == 0 => {
            Err(SimulationError::InvalidPeriods)
        }
        SimulationMode::HowLong { target_items } if target_items == 0 => {
            Err(SimulationError::InvalidTargetItems)
        }
        SimulationMode::HowLong { target_items } if !sample.has_positive_value() => {
            Err(SimulationError::NonTerminating { target_items })
        }
        _ => Ok(()),
    }
}

fn run_trial<S: IndexSource + ?Sized>(
    mode: SimulationMode,
    sample: &HistoricalSample,
    source: &mut S,
) -> u64 {
    match mode {
        SimulationMode::HowMany { periods } => (0..periods).fold(0u64, |total, _| {
            total.saturating_add(draw(sample, source))
        }),
        SimulationMode::HowLong { target_items } => {
            let mut delivered = 0u64;
            let mut periods = 0u64;
            while delivered < target_items {
                delivered = delivered.saturating_add(draw(sample, source));
                periods += 1;
            }
            periods
        }
    }
}

fn draw<S: IndexSource + ?Sized>(sample: &HistoricalSample, source: &mut S) -> u64 {
    sample.values()[source.next_index(sample.len())]
}

fn data_source_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}
