//! Wallet state — one daily snapshot of a simulated holder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::asset::Asset;
use super::liability::Liability;

/// Compact per-day history record embedded in a [`WalletState`].
///
/// History entries carry only what trajectory analysis reads back out
/// (day-over-day balance and score paths), not the full asset book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WalletSnapshot {
    pub day: usize,
    pub balance: f64,
    pub credit_score: f64,
}

/// Structural errors for a wallet snapshot sequence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletStateError {
    #[error("history length {history_len} does not match day index {day}")]
    HistoryMismatch { day: usize, history_len: usize },
}

/// One simulated day's wallet state for one ensemble member.
///
/// `balance` is signed cash in the base currency; a negative balance is a
/// deficit the liquidation waterfall will be asked to cover.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletState {
    pub balance: f64,
    pub assets: Vec<Asset>,
    pub liabilities: Vec<Liability>,
    pub credit_score: f64,
    /// Day index within the trajectory, starting at 0.
    pub day: usize,
    /// Ordered prior daily snapshots for this same run, used for volatility
    /// estimation. Length equals `day` for any valid state (day 0 may carry
    /// an empty or single seed entry).
    pub history: Vec<WalletSnapshot>,
}

impl WalletState {
    /// The compact history record for this state.
    pub fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            day: self.day,
            balance: self.balance,
            credit_score: self.credit_score,
        }
    }

    /// Validate the history-length invariant.
    pub fn check_invariants(&self) -> Result<(), WalletStateError> {
        let ok = if self.day == 0 {
            self.history.len() <= 1
        } else {
            self.history.len() == self.day
        };
        if ok {
            Ok(())
        } else {
            Err(WalletStateError::HistoryMismatch {
                day: self.day,
                history_len: self.history.len(),
            })
        }
    }
}
