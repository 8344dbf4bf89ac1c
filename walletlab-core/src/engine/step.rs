//! One-day wallet state transition.
//!
//! The external day-stepper calls this once per simulated day per
//! trajectory: revalue under the day's shocks, accrue yield, then cover any
//! cash deficit through the liquidation waterfall. Credit-score and
//! liability updates belong to upstream collaborators and pass through
//! untouched.

use chrono::NaiveDate;

use crate::domain::WalletState;
use crate::engine::liquidation::liquidate_for_deficit;
use crate::engine::revalue::{apply_yield, revalue_assets};
use crate::fx::{ExchangeRateTable, FxError};

/// Produce the next day's [`WalletState`] from the prior one.
///
/// The prior state is read-only; its snapshot is appended to the new state's
/// history, keeping the history-length invariant. A deficit the waterfall
/// cannot fully cover survives as a negative balance — insolvency for the
/// day, not an error.
pub fn step_wallet_day(
    prior: &WalletState,
    day_seed: u64,
    today: NaiveDate,
    rates: &ExchangeRateTable,
    base_currency: &str,
) -> Result<WalletState, FxError> {
    let revalued = revalue_assets(&prior.assets, day_seed);
    let accrued = apply_yield(&revalued, day_seed);

    let mut history = prior.history.clone();
    history.push(prior.snapshot());

    let mut next = WalletState {
        balance: prior.balance,
        assets: accrued,
        liabilities: prior.liabilities.clone(),
        credit_score: prior.credit_score,
        day: prior.day + 1,
        history,
    };

    if next.balance < 0.0 {
        let deficit = -next.balance;
        let outcome = liquidate_for_deficit(&next.assets, deficit, today, rates, base_currency)?;
        next.assets = outcome.assets;
        next.balance = if outcome.remaining_deficit > 0.0 {
            -outcome.remaining_deficit
        } else {
            0.0
        };
    }

    Ok(next)
}
