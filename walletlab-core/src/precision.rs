//! Fixed-precision truncation for monetary quantities.
//!
//! Every amount this engine produces is truncated (toward zero, not rounded)
//! to six decimal places. Truncation keeps revalued quantities and converted
//! amounts bit-identical across platforms for a given seed, which the replay
//! and determinism guarantees depend on.

/// Number of decimal places retained by [`truncate6`].
pub const AMOUNT_DECIMALS: u32 = 6;

const SCALE: f64 = 1_000_000.0;

/// Truncate a value toward zero to six decimal places.
pub fn truncate6(value: f64) -> f64 {
    (value * SCALE).trunc() / SCALE
}
