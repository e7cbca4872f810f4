//! Walk command implementation
//!
//! Prints sampled walks as JSON lines, one object per walk, for an external
//! plotting tool. Nothing is rendered here.

use saw_engine::{Position, WalkOutcome};
use serde::Serialize;
use tracing::info;

use super::build_sampler;
use crate::{CliError, Result, SawConfig};

/// One output line.
#[derive(Debug, Serialize)]
struct WalkRecord<'a> {
    index: usize,
    weight: f64,
    steps: usize,
    trapped: bool,
    target_length: Option<usize>,
    path: &'a [Position],
}

impl<'a> WalkRecord<'a> {
    fn new(index: usize, outcome: &'a WalkOutcome) -> Self {
        Self {
            index,
            weight: outcome.weight,
            steps: outcome.steps,
            trapped: outcome.trapped,
            target_length: outcome.target_length,
            path: &outcome.path,
        }
    }
}

/// Run the walk command
pub fn run(config: &SawConfig, count: usize) -> Result<()> {
    if count == 0 {
        return Err(CliError::InvalidArgument(
            "count must be greater than 0".to_string(),
        ));
    }

    let sampler = build_sampler(config, count)?;
    info!(
        "Sampling {} walk(s) on {} ({})",
        count,
        sampler.shape(),
        sampler.config().policy()
    );

    for line in render(&sampler.sample_walks(count))? {
        println!("{}", line);
    }
    Ok(())
}

fn render(walks: &[WalkOutcome]) -> Result<Vec<String>> {
    walks
        .iter()
        .enumerate()
        .map(|(i, outcome)| Ok(serde_json::to_string(&WalkRecord::new(i, outcome))?))
        .collect()
}
