use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::simulation_mode::SimulationMode;
use crate::services::percentiles::value_sorted;

pub const DEFAULT_PERCENTILES: [f64; 5] = [50.0, 75.0, 80.0, 85.0, 90.0];

/// Trial outcomes of one run, sorted best-first for the run's mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    mode: SimulationMode,
    outcomes: Vec<u64>,
}

impl ResultSet {
    pub fn from_outcomes(mode: SimulationMode, mut outcomes: Vec<u64>) -> Self {
        outcomes.sort_unstable_by(|a, b| mode.compare_outcomes(a, b));
        Self { mode, outcomes }
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    pub fn outcomes(&self) -> &[u64] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn percentile(&self, percentile: f64) -> Option<u64> {
        value_sorted(self.outcomes(), percentile)
    }

    /// Number of trials per distinct outcome, ascending by outcome.
    pub fn histogram(&self) -> BTreeMap<u64, usize> {
        let mut counts = BTreeMap::new();
        for outcome in self.outcomes() {
            *counts.entry(*outcome).or_insert(0usize) += 1;
        }
        counts
    }

    pub fn percentile_report(&self, percentiles: &[f64]) -> PercentileReport {
        let entries = percentiles
            .iter()
            .filter_map(|p| {
                self.percentile(*p).map(|value| PercentileEntry {
                    percentile: *p,
                    value,
                })
            })
            .collect();
        PercentileReport { entries }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PercentileEntry {
    pub percentile: f64,
    pub value: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct PercentileReport {
    pub entries: Vec<PercentileEntry>,
}

#[cfg(test)]
impl PercentileReport {
    pub fn get(&self, percentile: f64) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.percentile == percentile)
            .map(|entry| entry.value)
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct SimulationReport {
    pub data_source: String,
    pub mode: SimulationMode,
    pub simulations: usize,
    pub history_periods: usize,
    pub seed: Option<u64>,
    pub percentiles: PercentileReport,
}
