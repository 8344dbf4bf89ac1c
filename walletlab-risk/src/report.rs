//! The composed ensemble report packet.
//!
//! This is the single object handed to the presentation layer: descriptive
//! balance/credit/asset statistics plus the risk packet. No wire format or
//! persisted layout is mandated here; the markdown renderer is a
//! presentation convenience.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use walletlab_core::domain::Trajectory;
use walletlab_core::fx::ExchangeRateTable;

use crate::aggregate::{
    asset_stats, balance_stats, credit_stats, AssetStats, BalanceStats, CreditStats,
};
use crate::config::AnalysisConfig;
use crate::ensemble_risk::{compute_risk_packet, validate_ensemble, RiskPacket};

/// Everything the analysis produces for one ensemble.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnsembleReport {
    /// Hash of the [`AnalysisConfig`] that produced this report.
    pub config_id: String,
    pub ensemble_size: usize,
    /// Day count of the first trajectory; members share it by convention.
    pub day_count: usize,
    /// Market date of the rate table the asset statistics were valued with.
    pub rates_as_of: NaiveDate,
    pub balances: BalanceStats,
    pub credit: CreditStats,
    pub assets: AssetStats,
    pub risk: RiskPacket,
}

/// Reduce an ensemble to its full report.
///
/// Fails fast on an empty ensemble, any zero-day trajectory, an out-of-range
/// percentile, or a missing conversion path for some asset currency.
pub fn analyze_ensemble(
    ensemble: &[Trajectory],
    rates: &ExchangeRateTable,
    config: &AnalysisConfig,
) -> anyhow::Result<EnsembleReport> {
    config.validate()?;
    validate_ensemble(ensemble)?;

    Ok(EnsembleReport {
        config_id: config.config_id(),
        ensemble_size: ensemble.len(),
        day_count: ensemble[0].len(),
        rates_as_of: rates.as_of(),
        balances: balance_stats(ensemble, config.low_percentile, config.high_percentile)?,
        credit: credit_stats(ensemble)?,
        assets: asset_stats(ensemble, rates, &config.base_currency)?,
        risk: compute_risk_packet(ensemble, config.var_percentile)?,
    })
}

/// Render a report as a human-readable markdown summary.
pub fn render_markdown(report: &EnsembleReport) -> String {
    let mut out = format!(
        "# Ensemble Report\n\n\
Config: `{}`\n\
Members: {} × {} days\n\
Rates as of: {}\n\n\
## Risk\n\
- Risk Level: {}\n\
- Collapse Probability: {:.2}%\n\
- Average Collapse Day: {}\n\
- Recovery Rate: {:.1}%\n\
- Average Recovery Slope: {} days\n\
- Max Drawdown: {:.2}%\n\
- VaR (p={}): {:.2}\n\
- CVaR (p={}): {:.2}\n\
- Shock Clustering: {:.4}\n",
        report.config_id,
        report.ensemble_size,
        report.day_count,
        report.rates_as_of,
        report.risk.risk_level,
        report.risk.collapse_probability * 100.0,
        report.risk.average_collapse_day,
        report.risk.recovery_rate * 100.0,
        report.risk.average_recovery_slope,
        report.risk.max_drawdown_pct,
        report.risk.var_percentile,
        report.risk.value_at_risk,
        report.risk.var_percentile,
        report.risk.conditional_value_at_risk,
        report.risk.average_shock_clustering,
    );

    out.push_str(&format!(
        "\n## Final Balances\n\
- Mean: {:.2}\n\
- Median: {:.2}\n\
- Band: {:.2} … {:.2}\n\
- Range: {:.2} … {:.2}\n\
- Std Dev: {:.2}\n",
        report.balances.mean,
        report.balances.median,
        report.balances.percentile_low,
        report.balances.percentile_high,
        report.balances.min,
        report.balances.max,
        report.balances.std_dev,
    ));

    out.push_str(&format!(
        "\n## Credit\n- Mean Score: {:.1}\n",
        report.credit.mean_score
    ));
    out.push_str("\n| Tier | Share |\n|------|-------|\n");
    for (tier, pct) in &report.credit.tier_percentages {
        out.push_str(&format!("| {tier:?} | {pct:.2}% |\n"));
    }

    out.push_str(&format!(
        "\n## Assets\n\
- Mean Net Asset Value: {:.2}\n\
- Mean Liquidity Ratio: {:.4}\n",
        report.assets.mean_net_asset_value, report.assets.mean_liquidity_ratio,
    ));

    out
}
