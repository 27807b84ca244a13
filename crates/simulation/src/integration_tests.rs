//! Integration tests using the `TestPlant` harness.
//!
//! These tests spin up a headless Bevy App with `SimulationPlugin` and verify
//! that the live conversion run agrees with the pure engine.

mod agent_session_tests;

use crate::config::SimulationConfig;
use crate::parameter_table::ParameterTable;
use crate::sim_rng::{JitterSource, SimRng};
use crate::test_harness::TestPlant;

#[test]
fn test_plugin_inserts_reference_table() {
    let plant = TestPlant::new();
    assert_eq!(plant.resource::<ParameterTable>(), &ParameterTable::reference());
    assert_eq!(plant.resource::<SimulationConfig>(), &SimulationConfig::default());
}

#[test]
fn test_plugin_keeps_preinserted_config() {
    let config = SimulationConfig {
        seed: 1234,
        ..Default::default()
    };
    let plant = TestPlant::with_config(config);
    assert_eq!(plant.resource::<SimulationConfig>().seed, 1234);

    // The RNG is seeded from the config, not the default seed.
    let mut from_config = SimRng::from_seed_u64(1234);
    let mut live = plant.resource::<SimRng>().clone();
    assert_eq!(live.next_jitter(), from_config.next_jitter());
}

#[test]
fn test_idle_plant_ticks_without_rows() {
    let mut plant = TestPlant::new();
    plant.tick(10);
    plant.assert_days_recorded(0);
    assert!(!plant.run().is_active());
}
