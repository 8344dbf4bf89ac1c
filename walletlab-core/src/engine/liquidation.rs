//! Liquidation waterfall and wealth measures.
//!
//! Assets sell in strict liquidity-priority order (liquid → yield → volatile
//! → illiquid), array order within a class. The caller's asset slice is a
//! borrowed, read-only view; the outcome carries an independent post-sale
//! collection.

use chrono::NaiveDate;

use crate::domain::{Asset, LiquidityClass, WalletState};
use crate::fx::{ExchangeRateTable, FxError};
use crate::precision::truncate6;

/// Result of running the waterfall against a deficit.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidationOutcome {
    /// Unmet deficit. Positive means insolvency for the day — not an error;
    /// the caller folds it into a negative balance.
    pub remaining_deficit: f64,
    /// Post-sale asset list, quantities depleted but never negative.
    pub assets: Vec<Asset>,
}

/// Sell assets to cover `deficit` units of base-currency cash need.
///
/// Per asset considered: sell `min(amount, remaining)` units (raw quantity),
/// convert proceeds to the base currency, apply the class liquidation
/// penalty, then subtract net proceeds from the remaining deficit. Stops the
/// instant the deficit reaches zero. Locked assets are excluded from the
/// sellable pool entirely.
pub fn liquidate_for_deficit(
    assets: &[Asset],
    deficit: f64,
    today: NaiveDate,
    rates: &ExchangeRateTable,
    base_currency: &str,
) -> Result<LiquidationOutcome, FxError> {
    let mut post_sale: Vec<Asset> = assets.to_vec();
    let mut remaining = deficit;

    'waterfall: for class in LiquidityClass::WATERFALL {
        for asset in post_sale.iter_mut().filter(|a| a.liquidity_class == class) {
            if remaining <= 0.0 {
                break 'waterfall;
            }
            if asset.is_locked(today) || asset.amount <= 0.0 {
                continue;
            }
            let sold = asset.amount.min(remaining);
            let proceeds = rates.convert(sold, &asset.currency, base_currency)?;
            let net = proceeds * (1.0 - class.liquidation_penalty());
            remaining -= net;
            asset.amount = truncate6(asset.amount - sold);
        }
    }

    Ok(LiquidationOutcome {
        remaining_deficit: remaining.max(0.0),
        assets: post_sale,
    })
}

/// Sum of all asset quantities converted to the base currency.
pub fn net_asset_value(
    assets: &[Asset],
    rates: &ExchangeRateTable,
    base_currency: &str,
) -> Result<f64, FxError> {
    let mut total = 0.0;
    for asset in assets {
        total += rates.convert(asset.amount, &asset.currency, base_currency)?;
    }
    Ok(total)
}

/// Liquid funds over total wealth, clamped to at most 1.
///
/// Liquid funds sum only unlocked liquid-class assets converted to base
/// currency; total wealth is cash balance plus net asset value. Defined as 0
/// when total wealth is non-positive.
pub fn liquidity_ratio(
    state: &WalletState,
    today: NaiveDate,
    rates: &ExchangeRateTable,
    base_currency: &str,
) -> Result<f64, FxError> {
    let nav = net_asset_value(&state.assets, rates, base_currency)?;
    let total_wealth = state.balance + nav;
    if total_wealth <= 0.0 {
        return Ok(0.0);
    }
    let mut liquid_funds = 0.0;
    for asset in &state.assets {
        if asset.liquidity_class == LiquidityClass::Liquid && !asset.is_locked(today) {
            liquid_funds += rates.convert(asset.amount, &asset.currency, base_currency)?;
        }
    }
    Ok((liquid_funds / total_wealth).min(1.0))
}
