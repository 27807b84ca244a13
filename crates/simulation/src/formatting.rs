//! Text formatting for conversion results and time series.
//!
//! Shared by the report binary and anything else that prints results, so the
//! unit suffixes and report layout are defined once.

use std::fmt::Write;

use crate::conversion::ConversionResult;
use crate::time_series::TimeSeries;

/// Formats `value` with `precision` decimals and comma thousands separators.
pub fn fmt_number(value: f64, precision: usize) -> String {
    let raw = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (raw.as_str(), None),
    };

    let mut out = String::with_capacity(raw.len() + int_part.len() / 3 + 1);
    // Tiny negatives keep their sign ("-0.00"), like a plain `{:.2}`.
    if value.is_sign_negative() && !value.is_nan() {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `"1,234.50 kWh"`
pub fn fmt_energy(kwh: f64) -> String {
    format!("{} kWh", fmt_number(kwh, 2))
}

/// `"200.00 kg"`
pub fn fmt_mass(kg: f64) -> String {
    format!("{} kg", fmt_number(kg, 2))
}

/// Formats a percentage value (already scaled to 0-100) as `"45.6%"`.
pub fn fmt_pct(pct: f64) -> String {
    format!("{}%", fmt_number(pct, 1))
}

/// Energy with an explicit `+` for non-negative values.
pub fn fmt_signed_energy(kwh: f64) -> String {
    if kwh >= 0.0 {
        format!("+{}", fmt_energy(kwh))
    } else {
        fmt_energy(kwh)
    }
}

/// Uppercases the first character: `"syngas"` -> `"Syngas"`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Multi-line report of a single conversion.
pub fn summary_text(result: &ConversionResult) -> String {
    let mut lines = vec![
        "===== SIMULATION RESULTS =====".to_string(),
        format!("Waste Type: {}", result.category),
        format!("Mass: {}", fmt_mass(result.mass_kg)),
        format!("Conversion Method: {}", result.method),
        String::new(),
        "FUEL PRODUCTION:".to_string(),
    ];

    for (fuel, mass) in &result.fuel_produced_kg {
        let energy = result.fuel_energy_kwh.get(fuel).copied().unwrap_or(0.0);
        lines.push(format!(
            "  {}: {} ({})",
            capitalize(fuel.key()),
            fmt_mass(*mass),
            fmt_energy(energy)
        ));
    }

    lines.push(String::new());
    lines.push("ENERGY BALANCE:".to_string());
    lines.push(format!(
        "  Energy Required: {}",
        fmt_energy(result.energy_required_kwh)
    ));
    lines.push(format!(
        "  Energy Output: {}",
        fmt_energy(result.total_energy_output_kwh)
    ));
    lines.push(format!(
        "  Net Balance: {}",
        fmt_signed_energy(result.net_energy_balance_kwh)
    ));
    lines.push(format!(
        "  Efficiency: {}",
        fmt_pct(result.conversion_efficiency_pct)
    ));

    lines.join("\n")
}

/// Share of each fuel in the produced mass, with a `#` bar per 2%.
pub fn fuel_distribution_text(result: &ConversionResult) -> String {
    let mut out = String::from("FUEL DISTRIBUTION:");
    for (fuel, pct) in result.fuel_distribution() {
        let bar = "#".repeat((pct / 2.0).max(0.0) as usize);
        let _ = write!(out, "\n  {}: {} {}", capitalize(fuel.key()), fmt_pct(pct), bar);
    }
    out
}

/// Tabulates a time series followed by its summary.
pub fn time_series_text(series: &TimeSeries) -> String {
    let mut out = format!(
        "{:>5}  {:>12}  {:>16}  {:>16}  {:>16}",
        "DAY", "MASS (kg)", "REQUIRED (kWh)", "OUTPUT (kWh)", "NET (kWh)"
    );
    for row in series.rows() {
        let _ = write!(
            out,
            "\n{:>5}  {:>12}  {:>16}  {:>16}  {:>16}",
            row.day,
            fmt_number(row.mass_kg, 2),
            fmt_number(row.energy_required_kwh, 2),
            fmt_number(row.energy_output_kwh, 2),
            fmt_number(row.net_balance_kwh, 2),
        );
    }

    let summary = series.summary();
    let _ = write!(
        out,
        "\n\nTIME SERIES SUMMARY ({} days):\n  Total Mass: {}\n  Energy Required: {}\n  Energy Output: {}\n  Net Balance: {}\n  Mean Daily Net: {}\n  Energy-Positive Days: {}",
        summary.days,
        fmt_mass(summary.total_mass_kg),
        fmt_energy(summary.total_energy_required_kwh),
        fmt_energy(summary.total_energy_output_kwh),
        fmt_signed_energy(summary.total_net_balance_kwh),
        fmt_signed_energy(summary.mean_net_balance_kwh),
        summary.energy_positive_days,
    );
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::calculate_conversion;
    use crate::parameter_table::{ConversionMethod, ParameterTable, WasteCategory};
    use crate::sim_rng::FixedJitter;
    use crate::time_series::simulate_over_time;

    fn sample_result() -> ConversionResult {
        calculate_conversion(
            &ParameterTable::reference(),
            WasteCategory::Plastic,
            200.0,
            ConversionMethod::PlasmaGasification,
        )
        .unwrap()
    }

    #[test]
    fn test_fmt_number_grouping() {
        assert_eq!(fmt_number(0.0, 2), "0.00");
        assert_eq!(fmt_number(999.994, 2), "999.99");
        assert_eq!(fmt_number(1_000.0, 2), "1,000.00");
        assert_eq!(fmt_number(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(fmt_number(-12_345.5, 1), "-12,345.5");
        assert_eq!(fmt_number(42.0, 0), "42");
    }

    #[test]
    fn test_fmt_number_keeps_sign_of_tiny_negatives() {
        assert_eq!(fmt_number(-0.001, 2), "-0.00");
        assert_eq!(fmt_number(0.001, 2), "0.00");
        assert_eq!(fmt_signed_energy(-0.001), "-0.00 kWh");
    }

    #[test]
    fn test_unit_suffixes() {
        assert_eq!(fmt_energy(12.344), "12.34 kWh");
        assert_eq!(fmt_mass(200.0), "200.00 kg");
        assert_eq!(fmt_pct(45.6), "45.6%");
        assert_eq!(fmt_signed_energy(706.0), "+706.00 kWh");
        assert_eq!(fmt_signed_energy(-2.0), "-2.00 kWh");
        assert_eq!(fmt_signed_energy(0.0), "+0.00 kWh");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("syngas"), "Syngas");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_summary_text_layout() {
        let text = summary_text(&sample_result());
        let expected = "\
===== SIMULATION RESULTS =====
Waste Type: Plastic
Mass: 200.00 kg
Conversion Method: Plasma Gasification

FUEL PRODUCTION:
  Syngas: 98.00 kg (490.00 kWh)
  Char: 42.00 kg (336.00 kWh)

ENERGY BALANCE:
  Energy Required: 120.00 kWh
  Energy Output: 826.00 kWh
  Net Balance: +706.00 kWh
  Efficiency: 688.3%";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_fuel_distribution_text() {
        let text = fuel_distribution_text(&sample_result());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "FUEL DISTRIBUTION:");
        assert!(lines[1].starts_with("  Syngas: 70.0% ###"), "got: {}", lines[1]);
        assert!(lines[2].starts_with("  Char: 30.0% ###"), "got: {}", lines[2]);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_time_series_text() {
        let series = simulate_over_time(
            &ParameterTable::reference(),
            WasteCategory::Plastic,
            200.0,
            ConversionMethod::PlasmaGasification,
            2,
            FixedJitter(1.0),
        )
        .unwrap();
        let text = time_series_text(&series);
        assert!(text.contains("TIME SERIES SUMMARY (2 days)"), "got: {text}");
        assert!(text.contains("Net Balance: +1,412.00 kWh"), "got: {text}");
        assert!(text.contains("Energy-Positive Days: 2"), "got: {text}");
        // header + 2 rows
        assert_eq!(text.lines().take_while(|l| !l.is_empty()).count(), 3);
    }
}
