//! Agent text protocol types for the `--agent` headless mode.
//!
//! Defines the JSON command/response envelope that external programs
//! (scripts, dashboards, test harnesses) use to run conversions over
//! newline-delimited JSON on stdin/stdout.
//!
//! These types and the dispatcher live in the `simulation` crate so they can be
//! unit-tested without pulling in the app binary. The actual I/O loop lives in
//! `crates/app/src/agent_mode.rs`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::conversion::{calculate_conversion, ConversionResult};
use crate::parameter_table::{ConversionMethod, FuelKind, ParameterTable, WasteCategory};
use crate::sim_rng::SimRng;
use crate::time_series::{simulate_over_time, TimeSeriesRow, TimeSeriesSummary};

// ---------------------------------------------------------------------------
// Commands (stdin → simulation)
// ---------------------------------------------------------------------------

/// A single command sent by the external agent over stdin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd")]
pub enum AgentCommand {
    /// Convert one batch.
    #[serde(rename = "convert")]
    Convert {
        category: WasteCategory,
        method: ConversionMethod,
        mass_kg: f64,
    },

    /// Run a seeded multi-day simulation. `seed` defaults to the config seed.
    #[serde(rename = "simulate")]
    Simulate {
        category: WasteCategory,
        method: ConversionMethod,
        daily_mass_kg: f64,
        days: u32,
        #[serde(default)]
        seed: Option<u64>,
    },

    /// Dump the parameter table.
    #[serde(rename = "table")]
    Table,

    /// Gracefully shut down the agent session.
    #[serde(rename = "quit")]
    Quit,
}

// ---------------------------------------------------------------------------
// Responses (simulation → stdout)
// ---------------------------------------------------------------------------

/// Every response includes the protocol version and a tagged payload.
#[derive(Debug, Serialize)]
pub struct AgentResponse {
    /// Monotonically increasing protocol version (currently 1).
    pub protocol_version: u32,
    /// The response payload, flattened into this object.
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

/// One parameter table row as exposed over the protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableEntry {
    pub category: WasteCategory,
    pub method: ConversionMethod,
    pub efficiency: f64,
    pub energy_input_cost_kwh_per_kg: f64,
    pub fuel_fractions: BTreeMap<FuelKind, f64>,
}

/// Tagged payload variants for agent responses.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    /// The session is ready to accept commands.
    #[serde(rename = "ready")]
    Ready,

    #[serde(rename = "conversion")]
    Conversion { result: ConversionResult },

    #[serde(rename = "time_series")]
    TimeSeries {
        rows: Vec<TimeSeriesRow>,
        summary: TimeSeriesSummary,
    },

    #[serde(rename = "table")]
    Table {
        entries: Vec<TableEntry>,
        energy_content_kwh_per_kg: BTreeMap<FuelKind, f64>,
    },

    /// An error occurred while processing the command.
    #[serde(rename = "error")]
    Error { message: String },

    /// The session is ending (response to `quit`).
    #[serde(rename = "goodbye")]
    Goodbye,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Current protocol version. Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

/// Convenience constructor that wraps a payload with the current protocol version.
pub fn make_response(payload: ResponsePayload) -> AgentResponse {
    AgentResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

/// Executes one command against the table. Errors become `error` payloads.
pub fn handle_command(
    table: &ParameterTable,
    config: &SimulationConfig,
    cmd: AgentCommand,
) -> AgentResponse {
    let payload = match cmd {
        AgentCommand::Convert {
            category,
            method,
            mass_kg,
        } => match calculate_conversion(table, category, mass_kg, method) {
            Ok(result) => ResponsePayload::Conversion { result },
            Err(e) => ResponsePayload::Error {
                message: e.to_string(),
            },
        },
        AgentCommand::Simulate {
            category,
            method,
            daily_mass_kg,
            days,
            seed,
        } => {
            let mut rng = SimRng::from_seed_u64(seed.unwrap_or(config.seed));
            match simulate_over_time(
                table,
                category,
                daily_mass_kg,
                method,
                days,
                rng.jitter(config.jitter),
            ) {
                Ok(series) => ResponsePayload::TimeSeries {
                    summary: series.summary(),
                    rows: series.rows().to_vec(),
                },
                Err(e) => ResponsePayload::Error {
                    message: e.to_string(),
                },
            }
        }
        AgentCommand::Table => ResponsePayload::Table {
            entries: table_entries(table),
            energy_content_kwh_per_kg: FuelKind::ALL
                .into_iter()
                .filter_map(|f| table.energy_content_of(f).ok().map(|c| (f, c)))
                .collect(),
        },
        AgentCommand::Quit => ResponsePayload::Goodbye,
    };
    make_response(payload)
}

fn table_entries(table: &ParameterTable) -> Vec<TableEntry> {
    table
        .entries()
        .map(|(key, params)| TableEntry {
            category: key.category,
            method: key.method,
            efficiency: params.efficiency,
            energy_input_cost_kwh_per_kg: params.energy_input_cost,
            fuel_fractions: params.fuel_fractions.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
