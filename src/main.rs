mod board;
mod common;
mod config;
mod deadlock;
mod heuristic;
mod level;
mod solver;
mod stat;
mod state;
mod zobrist;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::SearchResult;
use config::{Cli, Config};
use level::Level;
use solver::{BestFirstSolver, Solver};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            let config_str = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {path}"))?;
            Config::from_yaml_str(&config_str)?
        }
        None => Config::default(),
    };
    let config = config.override_from_command_line(&cli)?;

    let level = Level::from_file(&cli.level)?;
    let mut solver = BestFirstSolver::new(level.width, level.height, &level.map_data, &level.items_data)?
        .with_time_limit(Duration::from_millis(config.time_limit_ms));

    match solver.solve() {
        SearchResult::Solved(solution) => {
            if !solver.verify(&solution) {
                warn!("solution failed replay verification");
            }
            info!("solved in {} moves", solution.moves.len());
            println!("{}", solution.moves);
        }
        SearchResult::NoSolution => warn!("no solution found"),
        SearchResult::TimedOut => warn!(
            "no solution within the {} ms budget",
            config.time_limit_ms
        ),
    }

    Ok(())
}
