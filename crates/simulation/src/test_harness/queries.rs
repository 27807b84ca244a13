//! Query and simulation-tick methods for `TestPlant`.

use bevy::prelude::*;

use crate::conversion_run::{ConversionRun, RunRequest};
use crate::error::ConversionError;
use crate::time_series::TimeSeries;

use super::TestPlant;

impl TestPlant {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule. This bypasses Bevy's time system, which `MinimalPlugins`
    /// would not advance between updates.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Start a new run, replacing any previous one.
    pub fn start_run(&mut self, request: RunRequest) -> Result<(), ConversionError> {
        self.app
            .world_mut()
            .resource_mut::<ConversionRun>()
            .start(request)
    }

    /// Tick until the active run finishes or stops, at most `request.days` ticks.
    pub fn run_to_completion(&mut self) {
        let remaining = self.run().days_remaining();
        self.tick(remaining);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Access the ECS world mutably.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// Get a reference to any resource.
    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn run(&self) -> &ConversionRun {
        self.resource::<ConversionRun>()
    }

    pub fn series(&self) -> &TimeSeries {
        &self.run().series
    }
}
