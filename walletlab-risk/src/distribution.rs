//! Distribution helpers — pure functions shared by the risk and statistics
//! layers.
//!
//! Percentile lookups everywhere in this crate use the same rule: sort
//! ascending, index at `floor(n·p)` clamped into range. Keeping the rule in
//! one place stops the VaR and summary-statistics copies from drifting.

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n, not n-1).
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Copy and sort ascending. NaN-free inputs are assumed; ties are stable.
pub fn sorted_ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// The `floor(n·p)` percentile index, clamped into `0..n`.
///
/// Callers validate `p ∈ [0, 1]` before indexing; `n` must be non-zero.
pub fn floor_index(n: usize, p: f64) -> usize {
    ((n as f64 * p).floor() as usize).min(n - 1)
}

/// Round to a fixed number of decimal places (nearest, ties away from zero).
pub fn round_dp(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn population_std_dev_divides_by_n() {
        // Population variance of [2, 4] is 1.0 (sample variance would be 2.0).
        assert_eq!(population_std_dev(&[2.0, 4.0]), 1.0);
    }

    #[test]
    fn floor_index_matches_rule() {
        assert_eq!(floor_index(100, 0.05), 5);
        assert_eq!(floor_index(100, 0.5), 50);
        assert_eq!(floor_index(10, 0.0), 0);
        // p = 1.0 clamps to the last element
        assert_eq!(floor_index(10, 1.0), 9);
        assert_eq!(floor_index(3, 0.95), 2);
    }

    #[test]
    fn sorted_ascending_orders() {
        assert_eq!(sorted_ascending(&[3.0, -1.0, 2.0]), vec![-1.0, 2.0, 3.0]);
    }

    #[test]
    fn round_dp_rounds_to_nearest() {
        assert_eq!(round_dp(0.051_49, 4), 0.051_5);
        assert_eq!(round_dp(12.346, 2), 12.35);
        assert_eq!(round_dp(-1.005_1, 2), -1.01);
    }
}
