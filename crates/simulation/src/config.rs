//! Run configuration (defaults for the report and agent front ends).
//!
//! Values that were previously baked into the front ends live in a single
//! [`SimulationConfig`] resource. A JSON document can override any subset of
//! fields; missing fields keep their defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::conversion::validate_mass;
use crate::error::ConversionError;
use crate::parameter_table::{ConversionMethod, WasteCategory};
use crate::sim_rng::{JitterRange, DEFAULT_SEED};

/// Default batch mass in kg.
pub const DEFAULT_MASS_KG: f64 = 200.0;

/// Default number of simulated days.
pub const DEFAULT_DAYS: u32 = 1000;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub default_category: WasteCategory,
    pub default_method: ConversionMethod,
    /// Batch mass (kg) used when the caller supplies none.
    pub default_mass_kg: f64,
    pub default_days: u32,
    /// Seed for `SimRng`.
    pub seed: u64,
    pub jitter: JitterRange,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_category: WasteCategory::Plastic,
            default_method: ConversionMethod::Pyrolysis,
            default_mass_kg: DEFAULT_MASS_KG,
            default_days: DEFAULT_DAYS,
            seed: DEFAULT_SEED,
            jitter: JitterRange::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse a JSON override document and validate the result.
    pub fn from_json_str(json: &str) -> Result<Self, ConversionError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConversionError> {
        validate_mass(self.default_mass_kg)?;
        if self.default_days == 0 {
            return Err(ConversionError::invalid("default_days must be at least 1"));
        }
        self.jitter.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.default_category, WasteCategory::Plastic);
        assert_eq!(config.default_method, ConversionMethod::Pyrolysis);
        assert!((config.default_mass_kg - 200.0).abs() < f64::EPSILON);
        assert_eq!(config.default_days, 1000);
        assert_eq!(config.seed, 42);
        assert_eq!(config.jitter, JitterRange::new(0.9, 1.1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_override() {
        let config = SimulationConfig::from_json_str(
            r#"{"default_method": "Plasma Gasification", "seed": 7}"#,
        )
        .unwrap();
        assert_eq!(config.default_method, ConversionMethod::PlasmaGasification);
        assert_eq!(config.seed, 7);
        assert_eq!(config.default_days, DEFAULT_DAYS);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = SimulationConfig::from_json_str("{seed: }").unwrap_err();
        assert!(matches!(err, ConversionError::Config(_)), "got: {err:?}");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = SimulationConfig::from_json_str(r#"{"default_days": 0}"#).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput(_)));

        let err = SimulationConfig::from_json_str(r#"{"default_mass_kg": -1.0}"#).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput(_)));

        let err =
            SimulationConfig::from_json_str(r#"{"jitter": {"low": 1.2, "high": 0.8}}"#).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput(_)));
    }

    #[test]
    fn test_constant_jitter_range_accepted() {
        let config =
            SimulationConfig::from_json_str(r#"{"jitter": {"low": 1.0, "high": 1.0}}"#).unwrap();
        assert_eq!(config.jitter, JitterRange::new(1.0, 1.0));
    }
}
