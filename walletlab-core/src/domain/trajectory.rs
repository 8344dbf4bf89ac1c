//! Trajectories — one simulated run's ordered sequence of daily snapshots.

use serde::{Deserialize, Serialize};

use super::wallet::WalletState;

/// An ensemble is a set of trajectories analyzed together. Members share the
/// same day count by convention; this is not enforced here.
pub type Ensemble = Vec<Trajectory>;

/// One ensemble member's path: one [`WalletState`] per simulated day, in day
/// order. Immutable once produced — the risk layer consumes it read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trajectory {
    days: Vec<WalletState>,
}

impl Trajectory {
    pub fn new(days: Vec<WalletState>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[WalletState] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The last simulated day, if any.
    pub fn final_state(&self) -> Option<&WalletState> {
        self.days.last()
    }
}
