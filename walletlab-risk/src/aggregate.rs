//! Descriptive ensemble statistics over final-day states.
//!
//! Balance percentiles use the same sorted-ascending `floor(n·p)` indexing
//! as VaR (one shared rule in `distribution`). The credit tier table lives
//! here once; the percentage distribution and the `credit_tier` presentation
//! helper both read it, so the two can never drift apart.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use walletlab_core::domain::Trajectory;
use walletlab_core::engine::{liquidity_ratio, net_asset_value};
use walletlab_core::fx::ExchangeRateTable;

use crate::distribution::{floor_index, mean, population_std_dev, round_dp, sorted_ascending};
use crate::ensemble_risk::{validate_ensemble, validate_percentile};
use crate::error::AnalysisError;

/// Final-day balance distribution across the ensemble.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceStats {
    pub mean: f64,
    pub median: f64,
    pub percentile_low: f64,
    pub percentile_high: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divides by n).
    pub std_dev: f64,
}

/// Fixed credit-score tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTier {
    Excellent,
    Good,
    Fair,
    Poor,
    Bad,
}

/// (tier, inclusive score floor) in descending order; below the last floor
/// is [`CreditTier::Bad`].
pub const CREDIT_TIER_FLOORS: [(CreditTier, f64); 4] = [
    (CreditTier::Excellent, 750.0),
    (CreditTier::Good, 670.0),
    (CreditTier::Fair, 580.0),
    (CreditTier::Poor, 450.0),
];

/// Map a credit score to its tier.
pub fn credit_tier(score: f64) -> CreditTier {
    for (tier, floor) in CREDIT_TIER_FLOORS {
        if score >= floor {
            return tier;
        }
    }
    CreditTier::Bad
}

/// Final-day credit-score distribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditStats {
    pub mean_score: f64,
    /// Percentage of ensemble members per tier, rounded to 2 decimals.
    pub tier_percentages: BTreeMap<CreditTier, f64>,
}

/// Final-day asset posture, averaged across the ensemble.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetStats {
    pub mean_net_asset_value: f64,
    pub mean_liquidity_ratio: f64,
}

fn final_states(ensemble: &[Trajectory]) -> impl Iterator<Item = &walletlab_core::domain::WalletState> {
    ensemble.iter().filter_map(|t| t.final_state())
}

/// Final-balance distribution statistics.
///
/// `low_percentile` / `high_percentile` are the summary band bounds
/// (defaults 0.05 and 0.95 via `AnalysisConfig`).
pub fn balance_stats(
    ensemble: &[Trajectory],
    low_percentile: f64,
    high_percentile: f64,
) -> Result<BalanceStats, AnalysisError> {
    validate_ensemble(ensemble)?;
    validate_percentile(low_percentile)?;
    validate_percentile(high_percentile)?;

    let balances: Vec<f64> = final_states(ensemble).map(|s| s.balance).collect();
    let sorted = sorted_ascending(&balances);
    let n = sorted.len();

    Ok(BalanceStats {
        mean: mean(&sorted),
        median: sorted[floor_index(n, 0.5)],
        percentile_low: sorted[floor_index(n, low_percentile)],
        percentile_high: sorted[floor_index(n, high_percentile)],
        min: sorted[0],
        max: sorted[n - 1],
        std_dev: population_std_dev(&sorted),
    })
}

/// Final-day credit-score mean and tier distribution.
pub fn credit_stats(ensemble: &[Trajectory]) -> Result<CreditStats, AnalysisError> {
    validate_ensemble(ensemble)?;

    let scores: Vec<f64> = final_states(ensemble).map(|s| s.credit_score).collect();
    let n = scores.len() as f64;

    let mut counts: BTreeMap<CreditTier, usize> = BTreeMap::new();
    for &score in &scores {
        *counts.entry(credit_tier(score)).or_insert(0) += 1;
    }
    let tier_percentages = counts
        .into_iter()
        .map(|(tier, count)| (tier, round_dp(count as f64 / n * 100.0, 2)))
        .collect();

    Ok(CreditStats {
        mean_score: mean(&scores),
        tier_percentages,
    })
}

/// Net asset value and liquidity ratio averaged over final-day states.
///
/// Lock windows are evaluated against the rate table's `as_of` date — the
/// market date the shared scenario was computed for.
pub fn asset_stats(
    ensemble: &[Trajectory],
    rates: &ExchangeRateTable,
    base_currency: &str,
) -> anyhow::Result<AssetStats> {
    validate_ensemble(ensemble)?;

    let today = rates.as_of();
    let mut navs = Vec::with_capacity(ensemble.len());
    let mut ratios = Vec::with_capacity(ensemble.len());
    for state in final_states(ensemble) {
        navs.push(net_asset_value(&state.assets, rates, base_currency)?);
        ratios.push(liquidity_ratio(state, today, rates, base_currency)?);
    }

    Ok(AssetStats {
        mean_net_asset_value: mean(&navs),
        mean_liquidity_ratio: mean(&ratios),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use walletlab_core::domain::{Asset, LiquidityClass, WalletState};

    fn member(final_balance: f64, credit_score: f64, assets: Vec<Asset>) -> Trajectory {
        Trajectory::new(vec![WalletState {
            balance: final_balance,
            assets,
            liabilities: vec![],
            credit_score,
            day: 0,
            history: vec![],
        }])
    }

    #[test]
    fn balance_stats_use_floor_indexing() {
        let ensemble: Vec<Trajectory> =
            (0..100).map(|i| member(i as f64, 700.0, vec![])).collect();
        let stats = balance_stats(&ensemble, 0.05, 0.95).unwrap();
        assert_eq!(stats.median, 50.0);
        assert_eq!(stats.percentile_low, 5.0);
        assert_eq!(stats.percentile_high, 95.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 99.0);
        assert_eq!(stats.mean, 49.5);
    }

    #[test]
    fn balance_stats_reject_bad_percentiles() {
        let ensemble = vec![member(1.0, 700.0, vec![])];
        assert!(balance_stats(&ensemble, -0.1, 0.95).is_err());
        assert!(balance_stats(&ensemble, 0.05, 1.1).is_err());
    }

    #[test]
    fn credit_tier_boundaries() {
        assert_eq!(credit_tier(750.0), CreditTier::Excellent);
        assert_eq!(credit_tier(749.9), CreditTier::Good);
        assert_eq!(credit_tier(670.0), CreditTier::Good);
        assert_eq!(credit_tier(580.0), CreditTier::Fair);
        assert_eq!(credit_tier(450.0), CreditTier::Poor);
        assert_eq!(credit_tier(449.9), CreditTier::Bad);
    }

    #[test]
    fn credit_distribution_sums_to_hundred() {
        let ensemble = vec![
            member(0.0, 780.0, vec![]),
            member(0.0, 700.0, vec![]),
            member(0.0, 600.0, vec![]),
            member(0.0, 400.0, vec![]),
        ];
        let stats = credit_stats(&ensemble).unwrap();
        assert_eq!(stats.mean_score, 620.0);
        let total: f64 = stats.tier_percentages.values().sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(stats.tier_percentages[&CreditTier::Excellent], 25.0);
        assert_eq!(stats.tier_percentages[&CreditTier::Bad], 25.0);
    }

    #[test]
    fn asset_stats_average_final_day_posture() {
        let rates = ExchangeRateTable::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let cash = |amount: f64| Asset {
            id: "cash".into(),
            name: "cash".into(),
            amount,
            currency: "USD".into(),
            volatility: 0.0,
            liquidity_class: LiquidityClass::Liquid,
            locked_until: None,
            base_value: None,
        };
        let ensemble = vec![
            member(100.0, 700.0, vec![cash(100.0)]), // ratio 0.5, nav 100
            member(300.0, 700.0, vec![cash(100.0)]), // ratio 0.25, nav 100
        ];
        let stats = asset_stats(&ensemble, &rates, "USD").unwrap();
        assert_eq!(stats.mean_net_asset_value, 100.0);
        assert!((stats.mean_liquidity_ratio - 0.375).abs() < 1e-12);
    }
}
