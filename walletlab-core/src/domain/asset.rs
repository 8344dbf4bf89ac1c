//! Assets — quantities held in some currency, tagged with a liquidity class.
//!
//! The liquidity class is the single source of truth for both the
//! liquidation waterfall order and the per-class liquidation penalty; the
//! engine never carries a second copy of either table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Liquidity classification of an asset.
///
/// Controls the order in which assets are sold to cover a cash deficit and
/// the penalty applied to sale proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityClass {
    Liquid,
    Yield,
    Volatile,
    Illiquid,
}

impl LiquidityClass {
    /// Waterfall order: liquid assets sell first, illiquid last.
    pub const WATERFALL: [LiquidityClass; 4] = [
        LiquidityClass::Liquid,
        LiquidityClass::Yield,
        LiquidityClass::Volatile,
        LiquidityClass::Illiquid,
    ];

    /// Fraction of sale proceeds lost when liquidating this class.
    pub fn liquidation_penalty(self) -> f64 {
        match self {
            LiquidityClass::Liquid => 0.0,
            LiquidityClass::Yield => 0.02,
            LiquidityClass::Volatile => 0.05,
            LiquidityClass::Illiquid => 0.10,
        }
    }
}

/// A single holding: a non-negative quantity denominated in one currency.
///
/// Mutated daily by revaluation, yield accrual, and liquidation; never
/// destroyed, only driven to zero quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    pub id: String,
    pub name: String,
    /// Quantity held. Never negative.
    pub amount: f64,
    /// Denominating currency code.
    pub currency: String,
    /// Daily shock magnitude coefficient in [0, 1].
    pub volatility: f64,
    pub liquidity_class: LiquidityClass,
    /// Cannot be liquidated while the current date is before this date.
    #[serde(default)]
    pub locked_until: Option<NaiveDate>,
    /// Cost basis, read by the external gains-tax collaborator. Not mutated
    /// by this engine.
    #[serde(default)]
    pub base_value: Option<f64>,
}

impl Asset {
    /// Whether the asset is excluded from the sellable pool on `today`.
    pub fn is_locked(&self, today: NaiveDate) -> bool {
        self.locked_until.is_some_and(|until| today < until)
    }
}
