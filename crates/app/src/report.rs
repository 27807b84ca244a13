//! Report mode: one conversion summary plus a day-by-day run.
//!
//! The single-batch figures come straight from `calculate_conversion`. The
//! time series is driven through the ECS `ConversionRun`, one `FixedUpdate`
//! tick per day, treating the given mass as an annual total.

use bevy::prelude::*;

use simulation::config::SimulationConfig;
use simulation::conversion_run::{ConversionRun, RunRequest};
use simulation::formatting::{fuel_distribution_text, summary_text, time_series_text};
use simulation::time_series::annual_to_daily_mass;
use simulation::{
    calculate_conversion, ConversionError, ConversionMethod, ParameterTable, TimeSeries,
    WasteCategory,
};

pub const USAGE: &str = "\
usage: prometheus [CATEGORY] [MASS_KG] [METHOD] [DAYS]
       prometheus --agent

  CATEGORY  Plastic | Organic | Metal | E-Waste
  METHOD    Pyrolysis | \"Plasma Gasification\" | \"Anaerobic Digestion\"
  DAYS      days to simulate at MASS_KG / 365 per day (0 skips the run)

Set PROMETHEUS_CONFIG to a JSON file to override defaults.";

/// Positional arguments with config defaults filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ReportArgs {
    category: WasteCategory,
    mass_kg: f64,
    method: ConversionMethod,
    days: u32,
}

impl ReportArgs {
    fn parse(args: &[String], config: &SimulationConfig) -> Result<Self, ConversionError> {
        if args.len() > 4 {
            return Err(ConversionError::InvalidInput(format!(
                "expected at most 4 arguments, got {}",
                args.len()
            )));
        }

        let category = match args.first() {
            Some(s) => s.parse()?,
            None => config.default_category,
        };
        let mass_kg = match args.get(1) {
            Some(s) => s.trim().parse::<f64>().map_err(|_| {
                ConversionError::InvalidInput(format!("mass must be a number, got '{s}'"))
            })?,
            None => config.default_mass_kg,
        };
        let method = match args.get(2) {
            Some(s) => s.parse()?,
            None => config.default_method,
        };
        let days = match args.get(3) {
            Some(s) => s.trim().parse::<u32>().map_err(|_| {
                ConversionError::InvalidInput(format!(
                    "days must be a non-negative integer, got '{s}'"
                ))
            })?,
            None => config.default_days,
        };

        Ok(Self {
            category,
            mass_kg,
            method,
            days,
        })
    }
}

pub fn run_report(args: &[String], config: SimulationConfig) -> Result<(), ConversionError> {
    let report = ReportArgs::parse(args, &config)?;

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, bevy::log::LogPlugin::default()));
    app.insert_resource(config);
    app.add_plugins(simulation::SimulationPlugin);
    app.update();

    let result = calculate_conversion(
        app.world().resource::<ParameterTable>(),
        report.category,
        report.mass_kg,
        report.method,
    )?;
    println!("{}", summary_text(&result));
    println!();
    println!("{}", fuel_distribution_text(&result));

    if report.days == 0 {
        return Ok(());
    }

    let series = drive_run(
        &mut app,
        RunRequest {
            category: report.category,
            method: report.method,
            daily_mass_kg: annual_to_daily_mass(report.mass_kg),
            days: report.days,
        },
    )?;
    println!();
    println!("{}", time_series_text(&series));
    Ok(())
}

/// Ticks `FixedUpdate` until the run has a row for every requested day.
fn drive_run(app: &mut App, request: RunRequest) -> Result<TimeSeries, ConversionError> {
    app.world_mut()
        .resource_mut::<ConversionRun>()
        .start(request)?;

    while app.world().resource::<ConversionRun>().is_active() {
        app.world_mut().run_schedule(FixedUpdate);
    }

    let run = app.world().resource::<ConversionRun>();
    match &run.last_error {
        Some(e) => Err(e.clone()),
        None => Ok(run.series.clone()),
    }
}
