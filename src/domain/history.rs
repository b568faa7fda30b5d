/// Delivered items per observed period, in the order they were recorded.
///
/// A sample always holds at least one value, so drawing a random index from it
/// is always defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalSample {
    values: Vec<u64>,
}

impl HistoricalSample {
    /// Returns `None` for an empty sequence.
    pub fn new(values: Vec<u64>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self { values })
        }
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn max(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// True when at least one period delivered something.
    pub fn has_positive_value(&self) -> bool {
        self.values.iter().any(|value| *value > 0)
    }
}
