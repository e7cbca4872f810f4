//! Check command implementation
//!
//! Validates the effective configuration and prints it.

use tracing::info;

use crate::{Result, SawConfig};

/// Run the check command
pub fn run(config: &SawConfig) -> Result<()> {
    info!("Checking configuration...");
    config.validate()?;

    let extents = config.extents()?;
    let total: usize = extents.iter().product();

    println!("Configuration OK");
    println!("  Shape: {} ({} axes, {} points)", config.shape, extents.len(), total);
    println!("  Trials: {}", config.trials);
    println!("  Policy: {}", config.run_policy()?);
    match config.seed {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: 0 (default)"),
    }
    println!(
        "  Execution: {}",
        if config.sequential {
            "sequential".to_string()
        } else {
            format!("parallel ({} threads)", available_threads())
        }
    );
    println!("  Log level: {}", config.log_level);
    Ok(())
}

fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
