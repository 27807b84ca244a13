//! Single-batch waste-to-fuel conversion.
//!
//! Given a waste category, an input mass and a conversion method, looks up the
//! table coefficients and derives the fuel produced, the energy it carries, the
//! energy needed to run the process, and the resulting balance:
//!
//! - energy_required = mass * input_cost
//! - fuel_produced[f] = mass * efficiency * fraction[f]
//! - fuel_energy[f] = fuel_produced[f] * energy_content[f]
//! - net = sum(fuel_energy) - energy_required
//! - efficiency % = output / required * 100, or 0 when nothing is required
//!
//! Non-positive or non-finite mass is rejected with `InvalidInput` rather than
//! flowing through as a zero or negative balance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::parameter_table::{ConversionMethod, FuelKind, ParameterTable, WasteCategory};

/// Outcome of converting one batch of waste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub category: WasteCategory,
    pub method: ConversionMethod,
    /// Input mass in kg.
    pub mass_kg: f64,
    /// Mass efficiency copied from the table (0-1).
    pub efficiency: f64,
    /// Energy consumed by the process (kWh).
    pub energy_required_kwh: f64,
    /// Mass of each fuel produced (kg).
    pub fuel_produced_kg: BTreeMap<FuelKind, f64>,
    /// Energy carried by each fuel produced (kWh).
    pub fuel_energy_kwh: BTreeMap<FuelKind, f64>,
    /// Sum of `fuel_energy_kwh`.
    pub total_energy_output_kwh: f64,
    /// Output minus required; negative for an energy-negative process.
    pub net_energy_balance_kwh: f64,
    /// Output as a percentage of required energy. 0 when nothing is required.
    pub conversion_efficiency_pct: f64,
}

impl ConversionResult {
    pub fn total_fuel_mass_kg(&self) -> f64 {
        self.fuel_produced_kg.values().sum()
    }

    /// Each fuel's share of the total produced mass, in percent.
    /// Empty when no fuel mass was produced.
    pub fn fuel_distribution(&self) -> BTreeMap<FuelKind, f64> {
        let total = self.total_fuel_mass_kg();
        if total <= 0.0 {
            return BTreeMap::new();
        }
        self.fuel_produced_kg
            .iter()
            .map(|(&fuel, &mass)| (fuel, mass / total * 100.0))
            .collect()
    }

    pub fn is_energy_positive(&self) -> bool {
        self.net_energy_balance_kwh >= 0.0
    }
}

/// Rejects masses the formula cannot meaningfully convert.
pub fn validate_mass(mass_kg: f64) -> Result<(), ConversionError> {
    if !mass_kg.is_finite() {
        return Err(ConversionError::invalid(format!(
            "mass must be a finite number, got {mass_kg}"
        )));
    }
    if mass_kg <= 0.0 {
        return Err(ConversionError::invalid(format!(
            "mass must be greater than zero, got {mass_kg}"
        )));
    }
    Ok(())
}

/// Converts `mass_kg` of `category` waste with `method`.
///
/// Fails with `InvalidInput` for a non-positive or non-finite mass and with
/// `Configuration` when the table lacks the pair or a produced fuel's energy
/// content. Pure: identical inputs give bit-identical results.
pub fn calculate_conversion(
    table: &ParameterTable,
    category: WasteCategory,
    mass_kg: f64,
    method: ConversionMethod,
) -> Result<ConversionResult, ConversionError> {
    validate_mass(mass_kg)?;
    conversion_pipeline(table, category, mass_kg, method)
}

fn conversion_pipeline(
    table: &ParameterTable,
    category: WasteCategory,
    mass_kg: f64,
    method: ConversionMethod,
) -> Result<ConversionResult, ConversionError> {
    let efficiency = table.efficiency_of(category, method)?;
    let fractions = table.fuel_fractions_of(category, method)?;
    let input_cost = table.energy_input_cost_of(category, method)?;

    let energy_required_kwh = mass_kg * input_cost;

    let fuel_produced_kg: BTreeMap<FuelKind, f64> = fractions
        .iter()
        .map(|(&fuel, &fraction)| (fuel, mass_kg * efficiency * fraction))
        .collect();

    let mut fuel_energy_kwh = BTreeMap::new();
    for (&fuel, &produced) in &fuel_produced_kg {
        fuel_energy_kwh.insert(fuel, produced * table.energy_content_of(fuel)?);
    }

    let total_energy_output_kwh: f64 = fuel_energy_kwh.values().sum();
    let net_energy_balance_kwh = total_energy_output_kwh - energy_required_kwh;
    let conversion_efficiency_pct = if energy_required_kwh > 0.0 {
        (total_energy_output_kwh / energy_required_kwh) * 100.0
    } else {
        0.0
    };

    Ok(ConversionResult {
        category,
        method,
        mass_kg,
        efficiency,
        energy_required_kwh,
        fuel_produced_kg,
        fuel_energy_kwh,
        total_energy_output_kwh,
        net_energy_balance_kwh,
        conversion_efficiency_pct,
    })
}

// =============================================================================
// Unit tests
// =============================================================================
