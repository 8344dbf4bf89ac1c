//! Structured error types for ensemble analysis.
//!
//! Empty inputs and out-of-range percentiles fail fast here instead of
//! surfacing later as NaN means or empty-sequence lookups.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("ensemble is empty: at least one trajectory is required")]
    EmptyEnsemble,

    #[error("trajectory {index} has zero days")]
    EmptyTrajectory { index: usize },

    #[error("percentile {p} outside [0, 1]")]
    PercentileOutOfRange { p: f64 },
}
