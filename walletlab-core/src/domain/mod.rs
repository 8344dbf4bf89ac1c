//! Domain types for WalletLab

pub mod asset;
pub mod liability;
pub mod trajectory;
pub mod wallet;

pub use asset::{Asset, LiquidityClass};
pub use liability::Liability;
pub use trajectory::{Ensemble, Trajectory};
pub use wallet::{WalletSnapshot, WalletState, WalletStateError};

/// Currency code type alias (ISO-4217 style, e.g. "USD").
pub type CurrencyCode = String;
