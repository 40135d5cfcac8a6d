//! Trust Fund Solvency CLI
//!
//! Command-line interface for projecting trust fund solvency under a plan

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use trust_fund_solvency::policy::{load_preset, save_preset};
use trust_fund_solvency::projection::{
    ApproximateRow, ReserveStatus, CHECKPOINT_YEAR, DEFAULT_END_YEAR, REFERENCE_SURPLUS_YEAR,
};
use trust_fund_solvency::{
    Baseline, CapOption, NamedPreset, PolicyInputs, ProjectionConfig, ProjectionResult, ScenarioRunner,
};

/// Built-in plans
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Plan {
    StatusQuo,
    SampleReform,
}

#[derive(Debug, Parser)]
#[command(name = "solvency", version, about = "Project trust fund income, cost and assets under policy reforms")]
struct Args {
    /// Built-in plan to run (ignored when --preset is given)
    #[arg(long, value_enum, default_value_t = Plan::StatusQuo)]
    plan: Plan,

    /// Load policy inputs from a saved preset
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Override the wage-base cap option, e.g. "+100 %" or "custom:20"
    #[arg(long)]
    cap: Option<CapOption>,

    /// Directory with baseline CSVs (defaults to the built-in baseline)
    #[arg(long)]
    baseline_dir: Option<PathBuf>,

    /// Last year to project
    #[arg(long, default_value_t = DEFAULT_END_YEAR)]
    end_year: u32,

    /// Append approximate rows through this year
    #[arg(long)]
    extend_through: Option<u32>,

    /// Write the yearly results to a CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Save the inputs that were run as a named preset
    #[arg(long, requires = "preset_out")]
    save_preset: Option<String>,

    /// Where to write the saved preset
    #[arg(long)]
    preset_out: Option<PathBuf>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    inputs: &'a PolicyInputs,
    result: &'a ProjectionResult,
    extended: &'a [ApproximateRow],
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let baseline = match &args.baseline_dir {
        Some(dir) => Baseline::from_csv_path(dir)
            .with_context(|| format!("loading baseline from {}", dir.display()))?,
        None => Baseline::ssa_2024_intermediate(),
    };

    let mut inputs = match &args.preset {
        Some(path) => {
            let preset = load_preset(path).with_context(|| format!("loading preset {}", path.display()))?;
            log::info!("loaded preset {:?} saved at {}", preset.name, preset.saved_at);
            preset.inputs
        }
        None => match args.plan {
            Plan::StatusQuo => PolicyInputs::status_quo(),
            Plan::SampleReform => PolicyInputs::sample_reform(),
        },
    };
    if let Some(cap) = args.cap {
        inputs.cap_option = cap;
    }

    let runner = ScenarioRunner::with_baseline(baseline);
    let config = ProjectionConfig {
        end_year: args.end_year,
        ..Default::default()
    };
    let result = runner.run(&inputs, config)?;

    let extended = match args.extend_through {
        Some(year) => runner.extend(&result, year)?,
        None => Vec::new(),
    };

    if let (Some(name), Some(path)) = (&args.save_preset, &args.preset_out) {
        let preset = NamedPreset::new(name.clone(), inputs.clone());
        save_preset(&preset, path).with_context(|| format!("saving preset to {}", path.display()))?;
        println!("Preset {:?} written to {}", name, path.display());
    }

    if let Some(path) = &args.output {
        write_csv(path, &result).with_context(|| format!("writing {}", path.display()))?;
    }

    if args.json {
        let output = JsonOutput {
            inputs: &inputs,
            result: &result,
            extended: &extended,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&result, &extended);
    }

    Ok(())
}

fn write_csv(path: &Path, result: &ProjectionResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in &result.yearly {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_report(result: &ProjectionResult, extended: &[ApproximateRow]) {
    println!("Trust Fund Solvency Projection");
    println!("==============================\n");

    let summary = result.summary();
    if let Some(surplus) = summary.reference_surplus {
        let label = if surplus >= 0.0 { "surplus" } else { "deficit" };
        println!("  {} {:<8} ${:.1}B", REFERENCE_SURPLUS_YEAR, label, surplus);
    }
    if let (Some(assets), Some(months)) = (summary.checkpoint_assets, summary.checkpoint_months_reserve) {
        println!("  {} balance  ${:.1}B ({:.1} months reserve)", CHECKPOINT_YEAR, assets, months);
    }

    match (summary.depletion_year, summary.depletion_extrapolated) {
        (Some(year), false) => println!("  Depletion     {} ({} years from {})", year, year - summary.first_year, summary.first_year),
        (Some(year), true) => println!("  Depletion     ~{} (extrapolated past {})", year, summary.last_year),
        (None, _) => println!("  Depletion     none through {}", summary.last_year),
    }
    println!();

    println!("{:>5} {:>10} {:>10} {:>10} {:>10} {:>8}  {}", "Year", "Income", "Cost", "Surplus", "Assets", "Months", "Status");
    println!("{}", "-".repeat(70));
    for row in &result.yearly {
        println!(
            "{:>5} {:>10.1} {:>10.1} {:>10.1} {:>10.1} {:>8.1}  {:?}",
            row.year,
            row.income,
            row.cost,
            row.surplus,
            row.assets,
            row.months_reserve,
            ReserveStatus::classify(row.months_reserve),
        );
    }

    if !extended.is_empty() {
        println!("\nApproximate extension (fixed growth rates, no policy levers):");
        for row in extended {
            println!(
                "{:>5} {:>10.1} {:>10.1} {:>10.1} {:>10.1} {:>8.1}  approx",
                row.year, row.income, row.cost, row.surplus, row.assets, row.months_reserve,
            );
        }
    }
}
