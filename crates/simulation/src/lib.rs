use bevy::prelude::*;

pub mod agent_protocol;
pub mod config;
pub mod conversion;
pub mod conversion_run;
pub mod error;
pub mod formatting;
pub mod parameter_table;
pub mod sim_rng;
pub mod time_series;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use conversion::{calculate_conversion, ConversionResult};
pub use error::ConversionError;
pub use parameter_table::{ConversionMethod, FuelKind, ParameterTable, WasteCategory};
pub use time_series::{simulate_over_time, TimeSeries, TimeSeriesRow};

/// Registers the parameter table, run configuration, RNG, and the live
/// conversion run.
///
/// Resources inserted before the plugin is added (a custom `ParameterTable`,
/// a `SimulationConfig` override, a pre-seeded `SimRng`) are kept.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParameterTable>()
            .init_resource::<config::SimulationConfig>();

        if let Err(e) = app.world().resource::<ParameterTable>().validate() {
            warn!("ParameterTable failed validation: {}", e);
        }

        app.add_plugins((
            sim_rng::SimRngPlugin,
            conversion_run::ConversionRunPlugin,
        ));
    }
}
