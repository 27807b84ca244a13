//! Day-by-day conversion simulation.
//!
//! Each simulated day draws one jitter value, scales the nominal daily mass by
//! it, and runs a single-batch conversion on the result. Draws are consumed in
//! day order, so a seeded or replayed source always maps the same jitter to
//! the same day index.

use serde::{Deserialize, Serialize};

use crate::conversion::{calculate_conversion, validate_mass};
use crate::error::ConversionError;
use crate::parameter_table::{ConversionKey, ConversionMethod, ParameterTable, WasteCategory};
use crate::sim_rng::JitterSource;

/// Days used to spread an annual tonnage over daily batches.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// One simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRow {
    /// 1-based day index.
    pub day: u32,
    /// Multiplier applied to the nominal daily mass.
    pub jitter: f64,
    /// Mass actually converted that day (kg).
    pub mass_kg: f64,
    pub energy_required_kwh: f64,
    pub energy_output_kwh: f64,
    pub net_balance_kwh: f64,
}

/// Aggregate view of a finished series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesSummary {
    pub days: u32,
    pub total_mass_kg: f64,
    pub total_energy_required_kwh: f64,
    pub total_energy_output_kwh: f64,
    pub total_net_balance_kwh: f64,
    pub mean_net_balance_kwh: f64,
    pub energy_positive_days: u32,
}

/// Ordered rows, ascending by day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    rows: Vec<TimeSeriesRow>,
}

impl TimeSeries {
    pub fn rows(&self) -> &[TimeSeriesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn push(&mut self, row: TimeSeriesRow) {
        debug_assert_eq!(row.day as usize, self.rows.len() + 1, "rows must stay in day order");
        self.rows.push(row);
    }

    pub fn summary(&self) -> TimeSeriesSummary {
        let mut summary = TimeSeriesSummary {
            days: self.rows.len() as u32,
            ..Default::default()
        };
        for row in &self.rows {
            summary.total_mass_kg += row.mass_kg;
            summary.total_energy_required_kwh += row.energy_required_kwh;
            summary.total_energy_output_kwh += row.energy_output_kwh;
            summary.total_net_balance_kwh += row.net_balance_kwh;
            if row.net_balance_kwh >= 0.0 {
                summary.energy_positive_days += 1;
            }
        }
        if summary.days > 0 {
            summary.mean_net_balance_kwh = summary.total_net_balance_kwh / summary.days as f64;
        }
        summary
    }
}

/// Spreads an annual mass evenly over [`DAYS_PER_YEAR`] days.
pub fn annual_to_daily_mass(annual_mass_kg: f64) -> f64 {
    annual_mass_kg / DAYS_PER_YEAR
}

/// Computes a single day given its jitter draw.
pub fn simulate_day(
    table: &ParameterTable,
    category: WasteCategory,
    daily_mass_kg: f64,
    method: ConversionMethod,
    day: u32,
    jitter: f64,
) -> Result<TimeSeriesRow, ConversionError> {
    if !jitter.is_finite() || jitter <= 0.0 {
        return Err(ConversionError::invalid(format!(
            "day {day}: jitter must be a positive finite number, got {jitter}"
        )));
    }
    let mass_kg = daily_mass_kg * jitter;
    let result = calculate_conversion(table, category, mass_kg, method)?;
    Ok(TimeSeriesRow {
        day,
        jitter,
        mass_kg,
        energy_required_kwh: result.energy_required_kwh,
        energy_output_kwh: result.total_energy_output_kwh,
        net_balance_kwh: result.net_energy_balance_kwh,
    })
}

/// Simulates `days` consecutive days of `daily_mass_kg` nominal throughput.
///
/// Inputs are validated before the first draw, so a rejected call consumes
/// nothing from `source`.
pub fn simulate_over_time(
    table: &ParameterTable,
    category: WasteCategory,
    daily_mass_kg: f64,
    method: ConversionMethod,
    days: u32,
    mut source: impl JitterSource,
) -> Result<TimeSeries, ConversionError> {
    if days == 0 {
        return Err(ConversionError::invalid("days must be at least 1"));
    }
    validate_mass(daily_mass_kg)?;
    // Surface a missing table entry before any randomness is spent.
    table.params_of(ConversionKey::new(category, method))?;

    // Rows grow as days complete; `days` is caller-controlled and may be huge.
    let mut series = TimeSeries::default();
    for day in 1..=days {
        let jitter = source.next_jitter();
        series.push(simulate_day(table, category, daily_mass_kg, method, day, jitter)?);
    }
    Ok(series)
}

// =============================================================================
// Unit tests
// =============================================================================
