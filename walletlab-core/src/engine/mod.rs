//! State-transition engine: revaluation, yield accrual, liquidation.
//!
//! Every operation here is a pure function of its inputs plus a seed:
//! borrowed, read-only views in, newly owned collections out. The external
//! day-stepper drives these once per simulated day per trajectory.

pub mod liquidation;
pub mod revalue;
pub mod step;

pub use liquidation::{liquidate_for_deficit, liquidity_ratio, net_asset_value, LiquidationOutcome};
pub use revalue::{apply_yield, revalue_assets, YIELD_RATE_MAX, YIELD_RATE_MIN};
pub use step::step_wallet_day;
