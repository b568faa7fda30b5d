use crate::services::simulation_types::SimulationReport;

pub fn format_percentile_report(report: &SimulationReport) -> String {
    let mut lines = Vec::new();
    lines.push("Monte Carlo Forecast".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    lines.push(format!("Mode: {}", report.mode));
    lines.push(format!("Simulations: {}", report.simulations));
    lines.push(format!("History periods: {}", report.history_periods));
    if let Some(seed) = report.seed {
        lines.push(format!("Seed: {seed}"));
    }
    lines.push(String::new());
    for entry in &report.percentiles.entries {
        lines.push(format!(
            "{} Percentile: {}",
            ordinal(entry.percentile),
            entry.value
        ));
    }

    lines.join("\n")
}

fn ordinal(percentile: f64) -> String {
    if percentile.fract() != 0.0 {
        return format!("{percentile}th");
    }
    let whole = percentile as u64;
    let suffix = match (whole % 10, whole % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{whole}{suffix}")
}
