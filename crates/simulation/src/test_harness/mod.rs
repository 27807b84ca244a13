//! # TestPlant: headless integration test harness
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running conversion runs without a window or renderer.

mod assertions;
mod queries;

use bevy::app::App;
use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::parameter_table::ParameterTable;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to set up the plant, start a run, then call `tick()`
/// to advance it one day per fixed update.
pub struct TestPlant {
    app: App,
}

impl Default for TestPlant {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPlant {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Reference parameter table and default configuration.
    pub fn new() -> Self {
        Self::build(SimulationConfig::default(), None)
    }

    /// Use `config` (seed, jitter range, defaults) instead of the defaults.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self::build(config, None)
    }

    /// Use a custom parameter table, e.g. one with a missing row.
    pub fn with_table(table: ParameterTable) -> Self {
        Self::build(SimulationConfig::default(), Some(table))
    }

    fn build(config: SimulationConfig, table: Option<ParameterTable>) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Insert overrides BEFORE SimulationPlugin so its init_resource calls keep them.
        app.insert_resource(config);
        if let Some(table) = table {
            app.insert_resource(table);
        }
        app.add_plugins(SimulationPlugin);

        // Run one update so Startup systems execute.
        app.update();

        Self { app }
    }
}
