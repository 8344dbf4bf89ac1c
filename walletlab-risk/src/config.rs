//! Serializable analysis configuration.

use serde::{Deserialize, Serialize};

use crate::ensemble_risk::validate_percentile;
use crate::error::AnalysisError;

/// Parameters of one ensemble analysis run.
///
/// Loadable from TOML; identical configs hash to the same `config_id`, so
/// two reports over the same ensemble can be cache-keyed by callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Currency every balance and asset value is expressed in.
    pub base_currency: String,

    /// Percentile for the VaR/CVaR fields of the risk packet.
    pub var_percentile: f64,

    /// Lower bound of the balance summary band.
    pub low_percentile: f64,

    /// Upper bound of the balance summary band.
    pub high_percentile: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_currency: "USD".to_string(),
            var_percentile: 0.05,
            low_percentile: 0.05,
            high_percentile: 0.95,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a TOML document. Missing fields take defaults.
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// All percentile parameters must lie in [0, 1]; no silent clamping.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for p in [self.var_percentile, self.low_percentile, self.high_percentile] {
            validate_percentile(p)?;
        }
        Ok(())
    }

    /// Deterministic hash ID for this configuration.
    pub fn config_id(&self) -> String {
        let json = serde_json::to_string(self).expect("AnalysisConfig serialization failed");
        let hash = blake3::hash(json.as_bytes());
        format!("{}", hash.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AnalysisConfig::default();
        config.validate().unwrap();
        assert_eq!(config.base_currency, "USD");
        assert_eq!(config.var_percentile, 0.05);
    }

    #[test]
    fn toml_overrides_and_defaults_compose() {
        let config = AnalysisConfig::from_toml_str(
            r#"
base_currency = "EUR"
var_percentile = 0.01
"#,
        )
        .unwrap();
        assert_eq!(config.base_currency, "EUR");
        assert_eq!(config.var_percentile, 0.01);
        assert_eq!(config.high_percentile, 0.95);
    }

    #[test]
    fn out_of_range_percentile_rejected() {
        let err = AnalysisConfig::from_toml_str("var_percentile = 1.5");
        assert!(err.is_err());
    }

    #[test]
    fn config_id_is_stable_and_distinguishes() {
        let a = AnalysisConfig::default();
        let b = AnalysisConfig::default();
        assert_eq!(a.config_id(), b.config_id());

        let c = AnalysisConfig { var_percentile: 0.01, ..AnalysisConfig::default() };
        assert_ne!(a.config_id(), c.config_id());
    }
}
