//! Estimate command implementation
//!
//! Runs the Monte Carlo sampler and reports the estimated walk count.

use std::time::Instant;

use saw_engine::EstimateResult;
use tracing::info;

use super::build_sampler;
use crate::{CliError, Result, SawConfig};

/// Run the estimate command
pub fn run(config: &SawConfig, format: &str) -> Result<()> {
    if !matches!(format, "table" | "json") {
        return Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: table, json",
            format
        )));
    }

    let sampler = build_sampler(config, config.trials)?;
    info!("Starting estimate...");
    info!("  Lattice: {}", sampler.shape());
    info!("  Trials: {}", config.trials);
    info!("  Policy: {}", sampler.config().policy());

    let start = Instant::now();
    let result = sampler.estimate();
    info!("Estimate complete in {:.2?}", start.elapsed());

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_table(&sampler.shape().to_string(), &result),
    }
    Ok(())
}

fn print_table(shape: &str, result: &EstimateResult) {
    let rows = [
        ("Lattice", shape.to_string()),
        ("Policy", result.policy.to_string()),
        ("Trials", result.n_trials.to_string()),
        ("Estimate", format!("{:.6e}", result.estimate)),
        ("Std error", format!("{:.3e}", result.std_error)),
        ("95% CI", format!("+/- {:.3e}", result.confidence_95())),
        ("ln(estimate)", format!("{:.6}", result.log_estimate)),
        ("Mean steps", format!("{:.2}", result.mean_steps)),
        ("Max steps", result.max_steps.to_string()),
        ("Trapped", format!("{:.1}%", 100.0 * result.trapped_fraction)),
    ];

    println!("\n┌──────────────┬──────────────────────────┐");
    println!("│ {:<12} │ {:<24} │", "Quantity", "Value");
    println!("├──────────────┼──────────────────────────┤");
    for (name, value) in rows {
        println!("│ {:<12} │ {:<24} │", name, value);
    }
    println!("└──────────────┴──────────────────────────┘");
}
