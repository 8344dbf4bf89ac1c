//! Per-trajectory risk measures — pure functions over one simulated path.
//!
//! A trajectory collapses at most once for these measures: the first day the
//! balance goes negative. Later dips extend nothing; later positive days
//! mark recovery.

use serde::{Deserialize, Serialize};
use walletlab_core::domain::Trajectory;

/// The first negative-balance day of a trajectory, plus whether any later
/// day closed positive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollapseEvent {
    /// Day index of the first `balance < 0`.
    pub day: usize,
    /// Whether any later day has `balance > 0`, independent of how many
    /// times the balance crosses zero afterward.
    pub recovered: bool,
}

/// Detect the (single) collapse of a trajectory, if any.
pub fn collapse_event(trajectory: &Trajectory) -> Option<CollapseEvent> {
    let days = trajectory.days();
    let day = days.iter().position(|s| s.balance < 0.0)?;
    let recovered = days[day + 1..].iter().any(|s| s.balance > 0.0);
    Some(CollapseEvent { day, recovered })
}

/// Worst drawdown of the trajectory as a fraction.
///
/// Running peak and running trough of the balance only extend, never reset,
/// over the whole trajectory. A day's drawdown is `(peak - trough) / peak`
/// when the peak is positive, else 0; the trajectory value is the maximum
/// over days.
pub fn max_drawdown(trajectory: &Trajectory) -> f64 {
    let days = trajectory.days();
    if days.is_empty() {
        return 0.0;
    }
    let mut peak = days[0].balance;
    let mut trough = days[0].balance;
    let mut worst: f64 = 0.0;
    for state in days {
        peak = peak.max(state.balance);
        trough = trough.min(state.balance);
        let drawdown = if peak > 0.0 { (peak - trough) / peak } else { 0.0 };
        worst = worst.max(drawdown);
    }
    worst
}

/// Fraction of days under negative-balance conditions: the day's own balance
/// is negative, or the most recent entry in that day's embedded history is.
pub fn shock_clustering_density(trajectory: &Trajectory) -> f64 {
    let days = trajectory.days();
    if days.is_empty() {
        return 0.0;
    }
    let stressed = days
        .iter()
        .filter(|s| s.balance < 0.0 || s.history.last().is_some_and(|h| h.balance < 0.0))
        .count();
    stressed as f64 / days.len() as f64
}

/// Days from the first collapse to the first subsequent day with a
/// non-negative balance. `None` when the trajectory never collapsed or never
/// came back.
pub fn recovery_slope(trajectory: &Trajectory) -> Option<usize> {
    let days = trajectory.days();
    let collapse = days.iter().position(|s| s.balance < 0.0)?;
    let offset = days[collapse + 1..].iter().position(|s| s.balance >= 0.0)?;
    Some(offset + 1)
}
