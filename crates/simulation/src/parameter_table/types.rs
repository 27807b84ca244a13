//! Closed enumerations and coefficient records for the parameter table.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

// =============================================================================
// WasteCategory
// =============================================================================

/// Input material classification.
///
/// Display names are part of the public surface: results keyed by these
/// names are shown to users and accepted by the agent protocol.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum WasteCategory {
    #[default]
    Plastic,
    Organic,
    Metal,
    #[serde(rename = "E-Waste")]
    EWaste,
}

impl WasteCategory {
    pub const ALL: [WasteCategory; 4] = [
        WasteCategory::Plastic,
        WasteCategory::Organic,
        WasteCategory::Metal,
        WasteCategory::EWaste,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WasteCategory::Plastic => "Plastic",
            WasteCategory::Organic => "Organic",
            WasteCategory::Metal => "Metal",
            WasteCategory::EWaste => "E-Waste",
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WasteCategory {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConversionError::invalid(format!("unknown waste category '{s}'")))
    }
}

// =============================================================================
// ConversionMethod
// =============================================================================

/// Processing technology applied to a batch of waste.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum ConversionMethod {
    #[default]
    Pyrolysis,
    #[serde(rename = "Plasma Gasification")]
    PlasmaGasification,
    #[serde(rename = "Anaerobic Digestion")]
    AnaerobicDigestion,
}

impl ConversionMethod {
    pub const ALL: [ConversionMethod; 3] = [
        ConversionMethod::Pyrolysis,
        ConversionMethod::PlasmaGasification,
        ConversionMethod::AnaerobicDigestion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConversionMethod::Pyrolysis => "Pyrolysis",
            ConversionMethod::PlasmaGasification => "Plasma Gasification",
            ConversionMethod::AnaerobicDigestion => "Anaerobic Digestion",
        }
    }
}

impl fmt::Display for ConversionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConversionMethod {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConversionError::invalid(format!("unknown conversion method '{s}'")))
    }
}

// =============================================================================
// FuelKind
// =============================================================================

/// An output product of conversion. Declaration order is display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelKind {
    Syngas,
    Char,
    Oil,
    Methane,
    Compost,
    /// Recovered metal residue (carries no energy in the reference data).
    Metal,
}

impl FuelKind {
    pub const ALL: [FuelKind; 6] = [
        FuelKind::Syngas,
        FuelKind::Char,
        FuelKind::Oil,
        FuelKind::Methane,
        FuelKind::Compost,
        FuelKind::Metal,
    ];

    /// Lowercase key, e.g. `"syngas"`.
    pub fn key(&self) -> &'static str {
        match self {
            FuelKind::Syngas => "syngas",
            FuelKind::Char => "char",
            FuelKind::Oil => "oil",
            FuelKind::Methane => "methane",
            FuelKind::Compost => "compost",
            FuelKind::Metal => "metal",
        }
    }
}

impl fmt::Display for FuelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Table key + coefficient record
// =============================================================================

/// Composite key of the parameter table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConversionKey {
    pub category: WasteCategory,
    pub method: ConversionMethod,
}

impl ConversionKey {
    pub fn new(category: WasteCategory, method: ConversionMethod) -> Self {
        Self { category, method }
    }
}

impl fmt::Display for ConversionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.category, self.method)
    }
}

/// Coefficients for one (category, method) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionParams {
    /// Fraction (0-1) of input mass that ends up as fuel products.
    pub efficiency: f64,
    /// Yield ratio of each fuel kind (0-1 each).
    pub fuel_fractions: BTreeMap<FuelKind, f64>,
    /// Energy needed to run the process, kWh per kg of waste.
    pub energy_input_cost: f64,
}

impl ConversionParams {
    pub fn new(efficiency: f64, energy_input_cost: f64, fractions: &[(FuelKind, f64)]) -> Self {
        Self {
            efficiency,
            fuel_fractions: fractions.iter().copied().collect(),
            energy_input_cost,
        }
    }
}
