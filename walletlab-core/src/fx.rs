//! Exchange-rate table and conversion resolution.
//!
//! The table is an explicit, versioned value passed by reference into every
//! call — never ambient process state — so parallel trajectory workers can
//! share one immutable market scenario per simulated day and replays stay
//! reproducible.
//!
//! Resolution order for a `from → to` request:
//! 1. identity (`from == to`)
//! 2. stored forward pair `from/to`
//! 3. reciprocal of stored reverse pair `to/from`
//! 4. one hop through an intermediary currency, both legs forward
//!
//! The search depth is bounded at one hop. Deeper search would change which
//! rates existing seeded scenarios resolve to, so the bound is part of the
//! contract, not an optimization.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::precision::truncate6;
use crate::rng::{stream_rng, NoiseStream};

/// Intermediaries tried for one-hop resolution, in priority order. Earlier
/// entries win when more than one intermediary has both legs.
pub const DEFAULT_INTERMEDIARIES: [&str; 2] = ["USD", "EUR"];

/// Perturbed rates never fall below this floor, keeping every stored rate
/// strictly positive.
const MIN_RATE: f64 = 1e-6;

/// Structured error types for rate resolution.
#[derive(Debug, Error, PartialEq)]
pub enum FxError {
    #[error("no conversion path for {from}/{to}: no direct, reverse, or one-hop rate")]
    RateNotFound { from: String, to: String },

    #[error("rate for {from}/{to} must be positive, got {rate}")]
    NonPositiveRate { from: String, to: String, rate: f64 },
}

fn pair_key(from: &str, to: &str) -> String {
    format!("{from}/{to}")
}

/// Wholesale copy of a table's stored pairs, for deterministic scenario
/// replay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateTableSnapshot {
    rates: BTreeMap<String, f64>,
    as_of: NaiveDate,
}

/// Sparse table of known pair rates.
///
/// Only one direction per pair is stored; reverse and one-hop rates are
/// derived at resolution time. Stored in a `BTreeMap` so perturbation walks
/// pairs in a deterministic order regardless of insertion history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeRateTable {
    rates: BTreeMap<String, f64>,
    as_of: NaiveDate,
    /// Bumped on every mutation; lets callers detect that two table values
    /// represent different market states.
    version: u64,
    intermediaries: Vec<String>,
}

impl ExchangeRateTable {
    pub fn new(as_of: NaiveDate) -> Self {
        Self::with_intermediaries(
            as_of,
            DEFAULT_INTERMEDIARIES.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn with_intermediaries(as_of: NaiveDate, intermediaries: Vec<String>) -> Self {
        Self {
            rates: BTreeMap::new(),
            as_of,
            version: 0,
            intermediaries,
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn pair_count(&self) -> usize {
        self.rates.len()
    }

    /// Store (or overwrite) the forward rate for a pair.
    pub fn set_rate(&mut self, from: &str, to: &str, rate: f64) -> Result<(), FxError> {
        if rate <= 0.0 {
            return Err(FxError::NonPositiveRate {
                from: from.to_string(),
                to: to.to_string(),
                rate,
            });
        }
        self.rates.insert(pair_key(from, to), rate);
        self.version += 1;
        Ok(())
    }

    /// Resolve the effective rate for `from → to`.
    pub fn rate(&self, from: &str, to: &str) -> Result<f64, FxError> {
        if from == to {
            return Ok(1.0);
        }
        if let Some(&direct) = self.rates.get(&pair_key(from, to)) {
            return Ok(direct);
        }
        if let Some(&reverse) = self.rates.get(&pair_key(to, from)) {
            return Ok(1.0 / reverse);
        }
        // One hop, both legs forward. First intermediary with both legs wins.
        for hop in &self.intermediaries {
            if hop == from || hop == to {
                continue;
            }
            let first_leg = self.rates.get(&pair_key(from, hop));
            let second_leg = self.rates.get(&pair_key(hop, to));
            if let (Some(&a), Some(&b)) = (first_leg, second_leg) {
                return Ok(a * b);
            }
        }
        Err(FxError::RateNotFound {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// Convert an amount between currencies, truncated to six decimal
    /// places. The identity case truncates without any table lookup.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, FxError> {
        if from == to {
            return Ok(truncate6(amount));
        }
        let rate = self.rate(from, to)?;
        Ok(truncate6(amount * rate))
    }

    /// Apply an independent symmetric perturbation in
    /// `[-magnitude/2, +magnitude/2]` to every stored pair rate.
    ///
    /// Draws come from the `FxDrift` stream of `seed`, so currency noise is
    /// independent of asset revaluation noise even when both processes share
    /// a day seed. Derived (reverse / one-hop) rates shift implicitly through
    /// the stored pairs they are composed from.
    pub fn update_rates(&mut self, magnitude: f64, seed: u64, as_of: NaiveDate) {
        let mut rng = stream_rng(seed, NoiseStream::FxDrift);
        let half = magnitude / 2.0;
        for rate in self.rates.values_mut() {
            let delta = rng.gen_range(-half..=half);
            *rate = (*rate + delta).max(MIN_RATE);
        }
        self.as_of = as_of;
        self.version += 1;
    }

    /// Capture the stored pairs for later wholesale [`restore`].
    ///
    /// [`restore`]: ExchangeRateTable::restore
    pub fn snapshot(&self) -> RateTableSnapshot {
        RateTableSnapshot {
            rates: self.rates.clone(),
            as_of: self.as_of,
        }
    }

    /// Replace all stored pairs with a previously captured snapshot.
    pub fn restore(&mut self, snapshot: RateTableSnapshot) {
        self.rates = snapshot.rates;
        self.as_of = snapshot.as_of;
        self.version += 1;
    }
}
