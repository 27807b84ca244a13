//! Parameter table for waste-to-fuel conversion.
//!
//! Maps every (waste category, conversion method) pair to its efficiency, fuel
//! yield fractions, and energy input cost, and every fuel kind to its energy
//! content. The table is inserted once as a resource and never mutated while
//! the simulation runs.
//!
//! Lookups return `ConversionError::Configuration` for a missing entry instead
//! of a default, so a category or method added without table data fails loudly.

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::*;

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::error::ConversionError;

/// Immutable coefficient table keyed by [`ConversionKey`].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ParameterTable {
    entries: BTreeMap<ConversionKey, ConversionParams>,
    energy_content: BTreeMap<FuelKind, f64>,
}

impl Default for ParameterTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl ParameterTable {
    /// A table with no entries. Every lookup fails until rows are inserted.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            energy_content: BTreeMap::new(),
        }
    }

    /// The built-in reference data (see [`REFERENCE_PARAMS`]).
    pub fn reference() -> Self {
        let mut table = Self::empty();
        for (category, method, efficiency, cost, fractions) in REFERENCE_PARAMS {
            table.insert(
                category,
                method,
                ConversionParams::new(efficiency, cost, fractions),
            );
        }
        for (fuel, content) in REFERENCE_ENERGY_CONTENT {
            table.set_energy_content(fuel, content);
        }
        table
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    pub fn insert(
        &mut self,
        category: WasteCategory,
        method: ConversionMethod,
        params: ConversionParams,
    ) -> &mut Self {
        self.entries
            .insert(ConversionKey::new(category, method), params);
        self
    }

    pub fn remove(
        &mut self,
        category: WasteCategory,
        method: ConversionMethod,
    ) -> Option<ConversionParams> {
        self.entries.remove(&ConversionKey::new(category, method))
    }

    pub fn set_energy_content(&mut self, fuel: FuelKind, kwh_per_kg: f64) -> &mut Self {
        self.energy_content.insert(fuel, kwh_per_kg);
        self
    }

    pub fn remove_energy_content(&mut self, fuel: FuelKind) -> Option<f64> {
        self.energy_content.remove(&fuel)
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    pub fn params_of(&self, key: ConversionKey) -> Result<&ConversionParams, ConversionError> {
        self.entries
            .get(&key)
            .ok_or_else(|| ConversionError::missing(key.to_string()))
    }

    pub fn efficiency_of(
        &self,
        category: WasteCategory,
        method: ConversionMethod,
    ) -> Result<f64, ConversionError> {
        self.params_of(ConversionKey::new(category, method))
            .map(|p| p.efficiency)
    }

    pub fn fuel_fractions_of(
        &self,
        category: WasteCategory,
        method: ConversionMethod,
    ) -> Result<&BTreeMap<FuelKind, f64>, ConversionError> {
        self.params_of(ConversionKey::new(category, method))
            .map(|p| &p.fuel_fractions)
    }

    pub fn energy_input_cost_of(
        &self,
        category: WasteCategory,
        method: ConversionMethod,
    ) -> Result<f64, ConversionError> {
        self.params_of(ConversionKey::new(category, method))
            .map(|p| p.energy_input_cost)
    }

    pub fn energy_content_of(&self, fuel: FuelKind) -> Result<f64, ConversionError> {
        self.energy_content
            .get(&fuel)
            .copied()
            .ok_or_else(|| ConversionError::missing(format!("fuel '{fuel}'")))
    }

    /// All rows in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&ConversionKey, &ConversionParams)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Checks that every (category, method) pair has a row, every fuel it
    /// yields has an energy content, and all coefficients are in range.
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConversionError> {
        for category in WasteCategory::ALL {
            for method in ConversionMethod::ALL {
                let key = ConversionKey::new(category, method);
                let params = self.params_of(key)?;

                if !(0.0..=1.0).contains(&params.efficiency) {
                    return Err(ConversionError::bad_param(format!(
                        "{key}: efficiency {} outside [0, 1]",
                        params.efficiency
                    )));
                }
                if !params.energy_input_cost.is_finite() || params.energy_input_cost < 0.0 {
                    return Err(ConversionError::bad_param(format!(
                        "{key}: energy input cost {} must be >= 0",
                        params.energy_input_cost
                    )));
                }
                for (&fuel, &fraction) in &params.fuel_fractions {
                    if !(0.0..=1.0).contains(&fraction) {
                        return Err(ConversionError::bad_param(format!(
                            "{key}: {fuel} fraction {fraction} outside [0, 1]"
                        )));
                    }
                    self.energy_content_of(fuel)?;
                }
            }
        }

        for (fuel, &content) in &self.energy_content {
            if !content.is_finite() || content < 0.0 {
                return Err(ConversionError::bad_param(format!(
                    "fuel '{fuel}': energy content {content} must be >= 0"
                )));
            }
        }
        Ok(())
    }
}
