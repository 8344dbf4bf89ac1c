//! WalletLab Risk — trajectory risk engine and ensemble statistics.
//!
//! This crate builds on `walletlab-core` to reduce an ensemble of simulated
//! wallet trajectories into:
//! - Per-trajectory measures (collapse, drawdown, clustering, recovery slope)
//! - Ensemble risk packet (collapse probability, VaR/CVaR, risk level)
//! - Descriptive statistics (balance percentiles, credit tiers, asset posture)
//! - A single composed report for the presentation layer
//!
//! Every function is pure: trajectories in, values out. Per-trajectory scans
//! fan out across rayon workers; there is no shared mutable state.

pub mod aggregate;
pub mod config;
pub mod distribution;
pub mod ensemble_risk;
pub mod error;
pub mod report;
pub mod trajectory_risk;

pub use aggregate::{
    asset_stats, balance_stats, credit_stats, credit_tier, AssetStats, BalanceStats, CreditStats,
    CreditTier, CREDIT_TIER_FLOORS,
};
pub use config::AnalysisConfig;
pub use ensemble_risk::{
    compute_risk_packet, conditional_value_at_risk, risk_level, value_at_risk, RiskLevel,
    RiskPacket, RISK_LEVEL_BOUNDS,
};
pub use error::AnalysisError;
pub use report::{analyze_ensemble, render_markdown, EnsembleReport};
pub use trajectory_risk::{
    collapse_event, max_drawdown, recovery_slope, shock_clustering_density, CollapseEvent,
};
