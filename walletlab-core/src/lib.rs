//! WalletLab Core — wallet domain types, exchange-rate resolution, and the
//! per-day state-transition engine.
//!
//! This crate contains the simulation core:
//! - Domain types (assets, liabilities, wallet states, trajectories)
//! - Versioned exchange-rate table with direct/reverse/one-hop resolution
//! - Seeded daily revaluation and yield accrual
//! - Liquidation waterfall with per-class penalties
//! - One-day wallet step invoked by the external simulation driver
//!
//! Everything is a pure, replayable function of its inputs plus a seed: no
//! I/O, no ambient state, no wall clock.

pub mod domain;
pub mod engine;
pub mod fx;
pub mod precision;
pub mod rng;
