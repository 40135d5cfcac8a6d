//! Compare built-in plans and saved presets side by side
//!
//! Usage: cargo run --bin compare_plans [preset.json ...]

use anyhow::{Context, Result};
use trust_fund_solvency::policy::load_preset;
use trust_fund_solvency::{PolicyInputs, ProjectionConfig, ProjectionResult, ScenarioRunner};

fn main() -> Result<()> {
    env_logger::init();

    let mut names = vec!["status quo".to_string(), "sample reform".to_string()];
    let mut plans = vec![PolicyInputs::status_quo(), PolicyInputs::sample_reform()];

    for path in std::env::args().skip(1) {
        let preset = load_preset(&path).with_context(|| format!("loading preset {}", path))?;
        names.push(preset.name);
        plans.push(preset.inputs);
    }

    let runner = ScenarioRunner::new();
    let results = runner.run_batch(&plans, ProjectionConfig::default())?;

    println!("{:<20} {:>10} {:>12} {:>12} {:>10}", "Plan", "Depletion", "2030 Surplus", "2050 Assets", "Min Months");
    println!("{}", "-".repeat(68));
    for (name, result) in names.iter().zip(&results) {
        let summary = result.summary();
        let depletion = match (summary.depletion_year, summary.depletion_extrapolated) {
            (Some(year), false) => year.to_string(),
            (Some(year), true) => format!("~{}", year),
            (None, _) => "none".to_string(),
        };
        println!(
            "{:<20} {:>10} {:>12.1} {:>12.1} {:>10.1}",
            name,
            depletion,
            summary.reference_surplus.unwrap_or(f64::NAN),
            value_at(result, 2050, |r| r.assets),
            summary.min_months_reserve,
        );
    }

    println!("\nAssets by decade ($B):");
    print!("{:>6}", "Year");
    for name in &names {
        print!(" {:>16}", name);
    }
    println!();
    for year in (2030..=2090).step_by(10) {
        print!("{:>6}", year);
        for result in &results {
            print!(" {:>16.1}", value_at(result, year, |r| r.assets));
        }
        println!();
    }

    Ok(())
}

fn value_at(result: &ProjectionResult, year: u32, field: impl Fn(&trust_fund_solvency::YearlyResult) -> f64) -> f64 {
    result.row(year).map(field).unwrap_or(f64::NAN)
}
