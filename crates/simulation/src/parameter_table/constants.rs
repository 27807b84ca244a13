//! Reference coefficients for the built-in parameter table.
//!
//! Energy figures are kWh: input cost is kWh per kg of waste, energy content is
//! kWh per kg of produced fuel. Changing any value here changes published
//! results, not just their representation.

use super::types::ConversionMethod::{AnaerobicDigestion, PlasmaGasification, Pyrolysis};
use super::types::FuelKind::{Char, Compost, Metal, Methane, Oil, Syngas};
use super::types::WasteCategory::{EWaste, Metal as MetalWaste, Organic, Plastic};
use super::types::{ConversionMethod, FuelKind, WasteCategory};

/// One reference row: (category, method, efficiency, input cost, fuel fractions).
pub type ReferenceRow = (
    WasteCategory,
    ConversionMethod,
    f64,
    f64,
    &'static [(FuelKind, f64)],
);

pub const REFERENCE_PARAMS: [ReferenceRow; 12] = [
    (Plastic, Pyrolysis, 0.65, 0.5, &[(Syngas, 0.6), (Char, 0.3), (Oil, 0.1)]),
    (Plastic, PlasmaGasification, 0.70, 0.6, &[(Syngas, 0.7), (Char, 0.3)]),
    (Plastic, AnaerobicDigestion, 0.30, 0.2, &[(Methane, 0.8), (Compost, 0.2)]),
    (Organic, Pyrolysis, 0.55, 0.4, &[(Syngas, 0.5), (Char, 0.4), (Oil, 0.1)]),
    (Organic, PlasmaGasification, 0.60, 0.55, &[(Syngas, 0.65), (Char, 0.35)]),
    (Organic, AnaerobicDigestion, 0.75, 0.15, &[(Methane, 0.9), (Compost, 0.1)]),
    (MetalWaste, Pyrolysis, 0.20, 0.7, &[(Syngas, 0.3), (Metal, 0.7)]),
    (MetalWaste, PlasmaGasification, 0.85, 0.8, &[(Syngas, 0.6), (Metal, 0.4)]),
    (MetalWaste, AnaerobicDigestion, 0.10, 0.3, &[(Methane, 0.2), (Metal, 0.8)]),
    (EWaste, Pyrolysis, 0.45, 0.6, &[(Syngas, 0.4), (Char, 0.2), (Metal, 0.4)]),
    (EWaste, PlasmaGasification, 0.80, 0.7, &[(Syngas, 0.65), (Metal, 0.35)]),
    (
        EWaste,
        AnaerobicDigestion,
        0.15,
        0.25,
        &[(Methane, 0.3), (Compost, 0.1), (Metal, 0.6)],
    ),
];

/// Energy content per fuel kind (kWh/kg).
pub const REFERENCE_ENERGY_CONTENT: [(FuelKind, f64); 6] = [
    (Syngas, 5.0),
    (Char, 8.0),
    (Oil, 11.0),
    (Methane, 14.0),
    (Compost, 0.5),
    // Recovered metal is a material, not a fuel.
    (Metal, 0.0),
];
