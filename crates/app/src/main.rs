use std::process::ExitCode;

use simulation::config::SimulationConfig;
use simulation::ConversionError;

mod agent_mode;
mod report;

/// Environment variable naming a JSON file of `SimulationConfig` overrides.
const CONFIG_ENV: &str = "PROMETHEUS_CONFIG";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", report::USAGE);
        return ExitCode::SUCCESS;
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("prometheus: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Agent mode: headless JSON protocol on stdin/stdout.
    if args.first().is_some_and(|a| a == "--agent") {
        agent_mode::run_agent_mode(config);
        return ExitCode::SUCCESS;
    }

    match report::run_report(&args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("prometheus: {e}");
            eprintln!("{}", report::USAGE);
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<SimulationConfig, ConversionError> {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return Ok(SimulationConfig::default());
    };
    let json = std::fs::read_to_string(&path)
        .map_err(|e| ConversionError::Config(format!("{path}: {e}")))?;
    SimulationConfig::from_json_str(&json)
}
