//! Integration tests for a scripted agent session.
//!
//! Feeds newline-delimited JSON through the protocol dispatcher the same way
//! the `--agent` loop does and checks the wire format of the responses.

use crate::agent_protocol::*;
use crate::config::SimulationConfig;
use crate::parameter_table::ParameterTable;

/// Parse each line and dispatch it, returning the serialized responses.
fn run_session(lines: &[&str]) -> Vec<serde_json::Value> {
    let table = ParameterTable::reference();
    let config = SimulationConfig::default();
    let mut out = Vec::new();
    for line in lines {
        let response = match serde_json::from_str::<AgentCommand>(line) {
            Ok(cmd) => handle_command(&table, &config, cmd),
            Err(e) => make_response(ResponsePayload::Error {
                message: format!("Parse error: {e}"),
            }),
        };
        let json = serde_json::to_string(&response).unwrap();
        out.push(serde_json::from_str(&json).unwrap());
    }
    out
}

#[test]
fn test_session_convert_then_quit() {
    let responses = run_session(&[
        r#"{"cmd":"convert","category":"Plastic","method":"Plasma Gasification","mass_kg":200}"#,
        r#"{"cmd":"quit"}"#,
    ]);
    assert_eq!(responses.len(), 2);

    let conv = &responses[0];
    assert_eq!(conv["protocol_version"], 1);
    assert_eq!(conv["type"], "conversion");
    assert_eq!(conv["result"]["category"], "Plastic");
    assert_eq!(conv["result"]["method"], "Plasma Gasification");
    let net = conv["result"]["net_energy_balance_kwh"].as_f64().unwrap();
    assert!((net - 706.0).abs() < 1e-9, "got {net}");
    let syngas = conv["result"]["fuel_produced_kg"]["syngas"].as_f64().unwrap();
    assert!((syngas - 98.0).abs() < 1e-9, "got {syngas}");

    assert_eq!(responses[1]["type"], "goodbye");
}

#[test]
fn test_session_simulate_rows_are_day_ordered() {
    let responses = run_session(&[
        r#"{"cmd":"simulate","category":"Organic","method":"Anaerobic Digestion","daily_mass_kg":50,"days":12,"seed":9}"#,
    ]);
    let resp = &responses[0];
    assert_eq!(resp["type"], "time_series");
    let rows = resp["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 12);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row["day"].as_u64().unwrap(), i as u64 + 1);
        let jitter = row["jitter"].as_f64().unwrap();
        assert!((0.9..1.1).contains(&jitter), "day {}: {jitter}", i + 1);
    }
    assert_eq!(resp["summary"]["days"], 12);
}

#[test]
fn test_session_reports_errors_and_continues() {
    let responses = run_session(&[
        "not json",
        r#"{"cmd":"convert","category":"Metal","method":"Pyrolysis","mass_kg":-4}"#,
        r#"{"cmd":"simulate","category":"Metal","method":"Pyrolysis","daily_mass_kg":4,"days":0}"#,
        r#"{"cmd":"table"}"#,
    ]);
    assert_eq!(responses[0]["type"], "error");
    assert!(responses[0]["message"]
        .as_str()
        .unwrap()
        .starts_with("Parse error"));
    assert_eq!(responses[1]["type"], "error");
    assert_eq!(responses[2]["type"], "error");
    assert_eq!(responses[3]["type"], "table");
    assert_eq!(responses[3]["entries"].as_array().unwrap().len(), 12);
    assert_eq!(responses[3]["energy_content_kwh_per_kg"]["methane"], 14.0);
}
