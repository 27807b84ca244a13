//! Headless `--agent` mode: a blocking synchronous loop that reads JSON
//! commands from stdin and writes JSON responses to stdout.
//!
//! ## Protocol
//!
//! Each line of stdin is a JSON object with a `"cmd"` discriminator.
//! Each line of stdout is a JSON response with `"protocol_version"` and
//! `"type"` fields. See [`simulation::agent_protocol`] for the full schema.

use std::io::{BufRead, Write};

use bevy::prelude::*;

use simulation::agent_protocol::{
    handle_command, make_response, AgentCommand, AgentResponse, ResponsePayload,
    PROTOCOL_VERSION,
};
use simulation::config::SimulationConfig;
use simulation::ParameterTable;

pub fn run_agent_mode(config: SimulationConfig) {
    // -- Build a minimal Bevy App holding the table and config --------------
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(config);
    app.add_plugins(simulation::SimulationPlugin);
    app.update();

    if let Err(e) = app.world().resource::<ParameterTable>().validate() {
        eprintln!("parameter table failed validation: {e}");
    }

    // -- I/O setup -----------------------------------------------------------
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    // Send the "ready" message so the external program knows we are live.
    write_response(&mut stdout, &make_response(ResponsePayload::Ready));

    // Log to stderr so it does not interfere with the JSON protocol on stdout.
    eprintln!(
        "prometheus agent mode v{} ready, waiting for commands on stdin",
        PROTOCOL_VERSION
    );

    // -- Main command loop ---------------------------------------------------
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("stdin read error: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let cmd: AgentCommand = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => {
                let resp = make_response(ResponsePayload::Error {
                    message: format!("Parse error: {e}"),
                });
                write_response(&mut stdout, &resp);
                continue;
            }
        };

        let world = app.world();
        let response = handle_command(
            world.resource::<ParameterTable>(),
            world.resource::<SimulationConfig>(),
            cmd,
        );
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);

        write_response(&mut stdout, &response);

        if is_goodbye {
            break;
        }
    }

    eprintln!("prometheus agent mode shutting down");
}

fn write_response(out: &mut impl Write, response: &AgentResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            let _ = writeln!(out, "{json}");
            let _ = out.flush();
        }
        Err(e) => eprintln!("failed to serialize response: {e}"),
    }
}
