//! Live multi-day conversion run driven by `FixedUpdate`.
//!
//! A [`ConversionRun`] holds the request being simulated and the rows produced
//! so far. Each fixed tick advances the run by exactly one day, drawing that
//! day's jitter from the shared `SimRng`. Day computation goes through
//! [`simulate_day`], so a finished run matches `simulate_over_time` for the
//! same seed and range.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::conversion::validate_mass;
use crate::error::ConversionError;
use crate::parameter_table::{ConversionMethod, ParameterTable, WasteCategory};
use crate::sim_rng::{JitterSource, SimRng};
use crate::time_series::{simulate_day, TimeSeries};

/// Parameters of a multi-day run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub category: WasteCategory,
    pub method: ConversionMethod,
    /// Nominal mass per day before jitter (kg).
    pub daily_mass_kg: f64,
    pub days: u32,
}

impl RunRequest {
    pub fn validate(&self) -> Result<(), ConversionError> {
        if self.days == 0 {
            return Err(ConversionError::invalid("days must be at least 1"));
        }
        validate_mass(self.daily_mass_kg)
    }
}

/// The run in progress (or the last one finished).
#[derive(Resource, Debug, Clone, Default)]
pub struct ConversionRun {
    pub request: Option<RunRequest>,
    pub series: TimeSeries,
    pub last_error: Option<ConversionError>,
}

impl ConversionRun {
    /// Replace any previous run with `request`. Rejects invalid requests
    /// without touching the current state.
    pub fn start(&mut self, request: RunRequest) -> Result<(), ConversionError> {
        request.validate()?;
        self.request = Some(request);
        self.series = TimeSeries::default();
        self.last_error = None;
        Ok(())
    }

    /// True while a request is set and days remain.
    pub fn is_active(&self) -> bool {
        self.request
            .is_some_and(|r| (self.series.len() as u32) < r.days)
    }

    /// True once every requested day has a row.
    pub fn is_finished(&self) -> bool {
        self.request
            .is_some_and(|r| self.series.len() as u32 >= r.days)
    }

    pub fn days_remaining(&self) -> u32 {
        self.request
            .map_or(0, |r| r.days.saturating_sub(self.series.len() as u32))
    }
}

/// Advances the active run by one day.
pub fn advance_conversion_run(
    table: Res<ParameterTable>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<SimRng>,
    mut run: ResMut<ConversionRun>,
) {
    if !run.is_active() {
        return;
    }
    let Some(request) = run.request else {
        return;
    };

    let day = run.series.len() as u32 + 1;
    let jitter = rng.jitter(config.jitter).next_jitter();
    match simulate_day(
        &table,
        request.category,
        request.daily_mass_kg,
        request.method,
        day,
        jitter,
    ) {
        Ok(row) => {
            run.series.push(row);
            if run.is_finished() {
                let summary = run.series.summary();
                info!(
                    "Conversion run finished: {} / {}, {} days, net {:.2} kWh",
                    request.category,
                    request.method,
                    summary.days,
                    summary.total_net_balance_kwh
                );
            }
        }
        Err(e) => {
            warn!("Conversion run stopped on day {}: {}", day, e);
            run.request = None;
            run.last_error = Some(e);
        }
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct ConversionRunPlugin;

impl Plugin for ConversionRunPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConversionRun>()
            .add_systems(FixedUpdate, advance_conversion_run);
    }
}

// =============================================================================
// Unit tests
// =============================================================================
