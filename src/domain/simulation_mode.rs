use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// The question a simulation run answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimulationMode {
    /// How many items are delivered over `periods` future periods?
    HowMany { periods: u64 },
    /// How many periods are needed to deliver `target_items`?
    HowLong { target_items: u64 },
}

impl SimulationMode {
    /// Orders two trial outcomes so that the better one comes first.
    ///
    /// More items is better for `HowMany`, fewer periods is better for `HowLong`.
    pub fn compare_outcomes(&self, a: &u64, b: &u64) -> Ordering {
        match self {
            SimulationMode::HowMany { .. } => b.cmp(a),
            SimulationMode::HowLong { .. } => a.cmp(b),
        }
    }

    pub fn outcome_label(&self) -> &'static str {
        match self {
            SimulationMode::HowMany { .. } => "Total Delivered Items",
            SimulationMode::HowLong { .. } => "Number of Periods",
        }
    }
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationMode::HowMany { periods } => write!(f, "HOWMANY over {periods} periods"),
            SimulationMode::HowLong { target_items } => {
                write!(f, "HOWLONG to complete {target_items} items")
            }
        }
    }
}
