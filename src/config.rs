use anyhow::bail;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "Sokoban Solver",
    about = "Heuristic best-first Sokoban solver implemented in Rust.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(help = "Path to the level file")]
    pub level: String,

    #[arg(long, short, help = "Path to the YAML config file")]
    pub config: Option<String>,

    #[arg(long, short, help = "Wall-clock budget in milliseconds")]
    pub time_limit_ms: Option<u64>,
}

#[derive(Serialize, Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub time_limit_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_limit_ms: 15_000,
        }
    }
}

impl Config {
    pub fn from_yaml_str(config_str: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(config_str)?;
        config.validate()
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(time_limit_ms) = cli.time_limit_ms {
            self.time_limit_ms = time_limit_ms;
        }
        self.validate()
    }

    pub fn validate(self) -> anyhow::Result<Self> {
        if self.time_limit_ms == 0 {
            bail!("time_limit_ms must be positive");
        }
        Ok(self)
    }
}
