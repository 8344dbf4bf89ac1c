//! Daily revaluation shocks and yield accrual.
//!
//! Both operations draw from seeded ChaCha8 streams: same seed and input ⇒
//! byte-identical output, on every platform. Draw order matches asset array
//! order exactly, which reproducible testing and seed-recorded replay rely
//! on.

use rand::Rng;

use crate::domain::{Asset, LiquidityClass};
use crate::precision::truncate6;
use crate::rng::{stream_rng, NoiseStream};

/// Annualized yield band for yield-class assets, drawn uniformly per day.
pub const YIELD_RATE_MIN: f64 = 0.02;
pub const YIELD_RATE_MAX: f64 = 0.05;

/// Apply one day of price noise to every asset.
///
/// One uniform draw per asset, in array order, mapped to a shock in
/// `[-volatility, +volatility]`. The new quantity is
/// `max(0, amount · (1 + shock))` truncated to six decimals. The input slice
/// is never mutated.
pub fn revalue_assets(assets: &[Asset], seed: u64) -> Vec<Asset> {
    let mut rng = stream_rng(seed, NoiseStream::Revalue);
    assets
        .iter()
        .map(|asset| {
            let draw: f64 = rng.gen();
            let shock = (draw * 2.0 - 1.0) * asset.volatility;
            let mut revalued = asset.clone();
            revalued.amount = truncate6((asset.amount * (1.0 + shock)).max(0.0));
            revalued
        })
        .collect()
}

/// Accrue one day of yield on yield-class assets.
///
/// Each yield asset draws (in array order) an annualized rate uniform in
/// [`YIELD_RATE_MIN`, `YIELD_RATE_MAX`] and accrues `amount · rate / 365`.
/// Non-yield assets pass through unchanged.
pub fn apply_yield(assets: &[Asset], seed: u64) -> Vec<Asset> {
    let mut rng = stream_rng(seed, NoiseStream::Yield);
    assets
        .iter()
        .map(|asset| {
            if asset.liquidity_class != LiquidityClass::Yield {
                return asset.clone();
            }
            let annual_rate = rng.gen_range(YIELD_RATE_MIN..=YIELD_RATE_MAX);
            let mut accrued = asset.clone();
            accrued.amount = truncate6(asset.amount + asset.amount * annual_rate / 365.0);
            accrued
        })
        .collect()
}
