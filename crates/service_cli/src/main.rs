//! saw - Command Line Front End for the Self-Avoiding Walk Estimator
//!
//! # Commands
//!
//! - `saw estimate` - Estimate the number of self-avoiding walks on a lattice
//! - `saw walk` - Print sampled walks as JSON lines for external plotting
//! - `saw check` - Validate and print the effective configuration
//!
//! Settings are read from `saw.toml` (if present), then `SAW_*` environment
//! variables, then command-line flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use config::SawConfig;
pub use error::{CliError, Result};

/// Monte Carlo estimator of self-avoiding walk counts
#[derive(Parser)]
#[command(name = "saw")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "saw.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every command; each overrides the configuration file.
#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Lattice extents (e.g. 10x10, 10x10x10)
    #[arg(short, long)]
    shape: Option<String>,

    /// Run policy (unrestricted, bounded, early-stop, or 1, 2, 3)
    #[arg(short, long)]
    policy: Option<String>,

    /// Stop probability for the early-stop policy
    #[arg(long)]
    stop_probability: Option<f64>,

    /// Base random seed
    #[arg(long)]
    seed: Option<u64>,
}

impl RunArgs {
    fn apply(self, mut config: SawConfig) -> SawConfig {
        if let Some(shape) = self.shape {
            config.shape = shape;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(p) = self.stop_probability {
            config.stop_probability = p;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the number of self-avoiding walks
    Estimate {
        #[command(flatten)]
        run: RunArgs,

        /// Number of walks to sample
        #[arg(short = 'n', long)]
        trials: Option<usize>,

        /// Run every trial on the calling thread
        #[arg(long)]
        sequential: bool,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Print sampled walks as JSON lines
    Walk {
        #[command(flatten)]
        run: RunArgs,

        /// Number of walks to print
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Validate and print the effective configuration
    Check,
}

fn init_tracing(verbose: bool, log_level: &str) {
    let default_level = if verbose { "debug" } else { log_level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = SawConfig::load_or_default(&cli.config)?.with_env_override();
    init_tracing(cli.verbose, &config.log_level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Estimate {
            run,
            trials,
            sequential,
            format,
        } => {
            let mut config = run.apply(config);
            if let Some(trials) = trials {
                config.trials = trials;
            }
            config.sequential |= sequential;
            commands::estimate::run(&config, &format)
        }
        Commands::Walk { run, count } => {
            // Walks default to the bounded policy unless a flag says otherwise.
            let policy_given = run.policy.is_some();
            let mut config = run.apply(config);
            if !policy_given {
                config.policy = "bounded".to_string();
            }
            commands::walk::run(&config, count)
        }
        Commands::Check => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_override_config() {
        let args = RunArgs {
            shape: Some("4x4".to_string()),
            policy: None,
            stop_probability: Some(0.5),
            seed: Some(3),
        };
        let config = args.apply(SawConfig::default());
        assert_eq!(config.shape, "4x4");
        assert_eq!(config.policy, "unrestricted");
        assert_eq!(config.stop_probability, 0.5);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_cli_parses_estimate() {
        let cli = Cli::try_parse_from([
            "saw",
            "estimate",
            "--shape",
            "10x10x10",
            "-n",
            "500",
            "--policy",
            "3",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Estimate {
                run,
                trials,
                format,
                ..
            } => {
                assert_eq!(run.shape.as_deref(), Some("10x10x10"));
                assert_eq!(run.policy.as_deref(), Some("3"));
                assert_eq!(trials, Some(500));
                assert_eq!(format, "json");
            }
            _ => panic!("Expected estimate command"),
        }
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
