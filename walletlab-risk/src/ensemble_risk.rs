//! Ensemble-level risk reduction — the composed risk packet.
//!
//! Per-trajectory scans are independent and fan out across rayon workers;
//! the reductions that follow are cheap and sequential. Everything is a pure
//! function of the ensemble value.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use walletlab_core::domain::Trajectory;

use crate::distribution::{floor_index, mean, round_dp, sorted_ascending};
use crate::error::AnalysisError;
use crate::trajectory_risk::{
    collapse_event, max_drawdown, recovery_slope, shock_clustering_density, CollapseEvent,
};

/// Risk classification from ensemble collapse probability.
///
/// Thresholds are exclusive upper bounds except the final catch-all; the
/// same table backs both packet computation and the presentation helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

/// (exclusive upper bound, level) in ascending order; ≥ the last bound is
/// [`RiskLevel::Critical`].
pub const RISK_LEVEL_BOUNDS: [(f64, RiskLevel); 3] = [
    (0.10, RiskLevel::Low),
    (0.25, RiskLevel::Moderate),
    (0.50, RiskLevel::High),
];

/// Classify a collapse probability.
pub fn risk_level(collapse_probability: f64) -> RiskLevel {
    for (bound, level) in RISK_LEVEL_BOUNDS {
        if collapse_probability < bound {
            return level;
        }
    }
    RiskLevel::Critical
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        write!(f, "{name}")
    }
}

/// Ensemble risk measures, reduced from all trajectories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskPacket {
    /// Share of trajectories with a detected collapse, rounded to 4 decimals.
    pub collapse_probability: f64,
    /// Mean collapse day across collapsed trajectories, rounded to the
    /// nearest integer; 0 when none collapsed.
    pub average_collapse_day: u32,
    /// Share of collapsed trajectories that later recovered; 1.0 when none
    /// collapsed.
    pub recovery_rate: f64,
    /// Worst drawdown observed on any day of any trajectory, as a
    /// percentage rounded to 2 decimals.
    pub max_drawdown_pct: f64,
    /// Percentile used for the VaR/CVaR fields below.
    pub var_percentile: f64,
    pub value_at_risk: f64,
    pub conditional_value_at_risk: f64,
    /// Mean of positive per-trajectory recovery slopes, rounded to the
    /// nearest integer; 0 when none recovered.
    pub average_recovery_slope: u32,
    /// Mean per-trajectory shock clustering density.
    pub average_shock_clustering: f64,
    pub risk_level: RiskLevel,
}

/// Fail fast on inputs that would otherwise surface as NaN statistics.
pub(crate) fn validate_ensemble(ensemble: &[Trajectory]) -> Result<(), AnalysisError> {
    if ensemble.is_empty() {
        return Err(AnalysisError::EmptyEnsemble);
    }
    for (index, trajectory) in ensemble.iter().enumerate() {
        if trajectory.is_empty() {
            return Err(AnalysisError::EmptyTrajectory { index });
        }
    }
    Ok(())
}

pub(crate) fn validate_percentile(p: f64) -> Result<(), AnalysisError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(AnalysisError::PercentileOutOfRange { p })
    }
}

fn final_balances_sorted(ensemble: &[Trajectory]) -> Vec<f64> {
    let balances: Vec<f64> = ensemble
        .iter()
        .filter_map(|t| t.final_state().map(|s| s.balance))
        .collect();
    sorted_ascending(&balances)
}

/// Value-at-Risk of the final-day balance distribution at percentile `p`.
///
/// Sorted ascending, indexed at `floor(n·p)`, clamped to at least zero.
pub fn value_at_risk(ensemble: &[Trajectory], p: f64) -> Result<f64, AnalysisError> {
    validate_ensemble(ensemble)?;
    validate_percentile(p)?;
    let sorted = final_balances_sorted(ensemble);
    Ok(sorted[floor_index(sorted.len(), p)].max(0.0))
}

/// Conditional VaR: mean of the sorted final balances from the worst outcome
/// through index `floor(n·p)` inclusive.
pub fn conditional_value_at_risk(ensemble: &[Trajectory], p: f64) -> Result<f64, AnalysisError> {
    validate_ensemble(ensemble)?;
    validate_percentile(p)?;
    let sorted = final_balances_sorted(ensemble);
    let cut = floor_index(sorted.len(), p);
    Ok(mean(&sorted[..=cut]))
}

/// Everything one pass over a single trajectory yields.
struct TrajectoryScan {
    collapse: Option<CollapseEvent>,
    max_drawdown: f64,
    clustering: f64,
    slope: Option<usize>,
}

/// Reduce an ensemble to its composed [`RiskPacket`].
pub fn compute_risk_packet(
    ensemble: &[Trajectory],
    var_percentile: f64,
) -> Result<RiskPacket, AnalysisError> {
    validate_ensemble(ensemble)?;
    validate_percentile(var_percentile)?;

    let scans: Vec<TrajectoryScan> = ensemble
        .par_iter()
        .map(|t| TrajectoryScan {
            collapse: collapse_event(t),
            max_drawdown: max_drawdown(t),
            clustering: shock_clustering_density(t),
            slope: recovery_slope(t),
        })
        .collect();

    let n = scans.len() as f64;
    let collapses: Vec<&CollapseEvent> = scans.iter().filter_map(|s| s.collapse.as_ref()).collect();
    let collapse_probability = round_dp(collapses.len() as f64 / n, 4);

    let average_collapse_day = if collapses.is_empty() {
        0
    } else {
        let days: Vec<f64> = collapses.iter().map(|c| c.day as f64).collect();
        mean(&days).round() as u32
    };

    let recovery_rate = if collapses.is_empty() {
        1.0
    } else {
        collapses.iter().filter(|c| c.recovered).count() as f64 / collapses.len() as f64
    };

    let worst_drawdown = scans.iter().map(|s| s.max_drawdown).fold(0.0_f64, f64::max);

    let slopes: Vec<f64> = scans.iter().filter_map(|s| s.slope).map(|d| d as f64).collect();
    let average_recovery_slope = if slopes.is_empty() {
        0
    } else {
        mean(&slopes).round() as u32
    };

    let clustering: Vec<f64> = scans.iter().map(|s| s.clustering).collect();

    Ok(RiskPacket {
        collapse_probability,
        average_collapse_day,
        recovery_rate,
        max_drawdown_pct: round_dp(worst_drawdown * 100.0, 2),
        var_percentile,
        value_at_risk: value_at_risk(ensemble, var_percentile)?,
        conditional_value_at_risk: conditional_value_at_risk(ensemble, var_percentile)?,
        average_recovery_slope,
        average_shock_clustering: mean(&clustering),
        risk_level: risk_level(collapse_probability),
    })
}
