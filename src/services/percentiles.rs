//! Percentile helpers for result sets that are already sorted best-first.
//!
//! - Empty input => `None`.
//! - The index is `ceil(p / 100 * len) - 1`, clamped into `[0, len-1]`, so
//!   `percentile <= 0` gives the first element and `percentile >= 100` the last.
//! - No interpolation: the returned value is always one of the inputs.

/// Returns the value at `percentile` from a slice sorted in the order the
/// caller considers best-first.
pub fn value_sorted<T: Copy>(sorted_values: &[T], percentile: f64) -> Option<T> {
    if sorted_values.is_empty() {
        return None;
    }

    let last = sorted_values.len() - 1;
    let rank = ((percentile / 100.0) * sorted_values.len() as f64).ceil();
    let index = if rank.is_nan() || rank < 1.0 {
        0
    } else {
        (rank as usize - 1).min(last)
    };

    sorted_values.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn value_sorted_returns_none_for_empty_input() {
        let values: [u64; 0] = [];
        assert_eq!(value_sorted(&values, 50.0), None);
    }

    #[test]
    fn value_sorted_clamps_to_first_and_last() {
        let values = [10, 20, 30];
        assert_eq!(value_sorted(&values, -1.0), Some(10));
        assert_eq!(value_sorted(&values, 0.0), Some(10));
        assert_eq!(value_sorted(&values, 100.0), Some(30));
        assert_eq!(value_sorted(&values, 1000.0), Some(30));
    }

    #[test]
    fn value_sorted_uses_ceiling_rank() {
        // len=5: p50 => ceil(2.5)-1 = 2, p75 => ceil(3.75)-1 = 3,
        // p80 => ceil(4.0)-1 = 3, p85 => ceil(4.25)-1 = 4
        let values = [5, 4, 3, 2, 1];
        assert_eq!(value_sorted(&values, 50.0), Some(3));
        assert_eq!(value_sorted(&values, 75.0), Some(2));
        assert_eq!(value_sorted(&values, 80.0), Some(2));
        assert_eq!(value_sorted(&values, 85.0), Some(1));
        assert_eq!(value_sorted(&values, 90.0), Some(1));
    }

    #[test]
    fn value_sorted_does_not_interpolate() {
        let values = [10, 20, 30, 40];
        // linear interpolation would give 25
        assert_eq!(value_sorted(&values, 50.0), Some(20));
        assert_eq!(value_sorted(&values, 51.0), Some(30));
    }

    #[test]
    fn single_value_is_returned_for_every_percentile() {
        let values = [42];
        for p in [0.5, 1.0, 50.0, 85.0, 99.9, 100.0] {
            assert_eq!(value_sorted(&values, p), Some(42));
        }
    }

    proptest! {
        #[test]
        fn hundredth_percentile_is_last_element(
            values in prop::collection::vec(0u64..1000, 1..200)
        ) {
            prop_assert_eq!(value_sorted(&values, 100.0), values.last().copied());
        }

        #[test]
        fn percentile_never_moves_backwards(
            mut values in prop::collection::vec(0u64..1000, 1..200),
            p1 in 0.1f64..=100.0,
            p2 in 0.1f64..=100.0,
        ) {
            values.sort_unstable();
            let (low, high) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            let at_low = value_sorted(&values, low).unwrap();
            let at_high = value_sorted(&values, high).unwrap();
            prop_assert!(at_low <= at_high);
        }

        #[test]
        fn repeated_queries_agree(
            values in prop::collection::vec(0u64..1000, 1..50),
            p in 0.1f64..=100.0,
        ) {
            prop_assert_eq!(value_sorted(&values, p), value_sorted(&values, p));
        }
    }
}
