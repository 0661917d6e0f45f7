use std::fs;
use std::path::PathBuf;

use log::LevelFilter;
use serde_json::Value;

use crate::error::{PercolationError, Result};

/// Settings for one run of the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub grid_size: usize,
    pub trials: usize,
    pub seed: Option<u64>,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub json: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            grid_size: 200,
            trials: 100,
            seed: None,
            log_level: LevelFilter::Info,
            log_file: None,
            json: false,
        }
    }
}

impl Config {
    /// Builds a config from command line arguments (without the program
    /// name): `[--config FILE] [--json] [N T [SEED]]`. Positional values win
    /// over the file.
    pub fn from_args<I: Iterator<Item = String>>(mut args: I) -> Result<Config> {
        let mut config = Config::default();
        let mut positional = Vec::new();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => config.json = true,
                "--config" => {
                    let path = args.next()
                        .ok_or_else(|| PercolationError::Config("--config needs a path".to_string()))?;
                    let text = fs::read_to_string(&path)?;
                    config.apply_constants(&serde_json::from_str::<Value>(&text)?)?;
                }
                _ => positional.push(arg),
            }
        }

        if positional.len() == 1 || positional.len() > 3 {
            return Err(PercolationError::Config(
                format!("expected N T [SEED], got {} values", positional.len())));
        }
        if positional.len() >= 2 {
            config.grid_size = parse_count("n", &positional[0])?;
            config.trials = parse_count("trials", &positional[1])?;
        }
        if let Some(seed) = positional.get(2) {
            config.seed = Some(seed.parse::<u64>()
                .map_err(|e| PercolationError::Config(format!("seed {:?}: {}", seed, e)))?);
        }
        Ok(config)
    }

    /// Overrides fields from a JSON constants object. Keys are optional:
    /// `GRID_SIZE`, `TRIALS`, `SEED`, `LOG_LEVEL`, `LOG_FILE`.
    pub fn apply_constants(&mut self, constants: &Value) -> Result<()> {
        if !constants.is_object() {
            return Err(PercolationError::Config("constants must be a JSON object".to_string()));
        }
        if let Some(v) = constants.get("GRID_SIZE") {
            self.grid_size = json_count("n", v)?;
        }
        if let Some(v) = constants.get("TRIALS") {
            self.trials = json_count("trials", v)?;
        }
        if let Some(v) = constants.get("SEED") {
            self.seed = Some(v.as_u64()
                .ok_or_else(|| PercolationError::Config(format!("SEED: {} is not a u64", v)))?);
        }
        if let Some(v) = constants.get("LOG_LEVEL") {
            self.log_level = v.as_str()
                .and_then(|s| s.parse::<LevelFilter>().ok())
                .ok_or_else(|| PercolationError::Config(format!("LOG_LEVEL: bad level {}", v)))?;
        }
        if let Some(v) = constants.get("LOG_FILE") {
            self.log_file = v.as_str().map(PathBuf::from);
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(PercolationError::InvalidArgument { name, value });
    }
    Ok(value as usize)
}

fn parse_count(name: &'static str, s: &str) -> Result<usize> {
    let value = s.trim().parse::<i64>()
        .map_err(|e| PercolationError::Config(format!("{} {:?}: {}", name, s, e)))?;
    positive(name, value)
}

fn json_count(name: &'static str, v: &Value) -> Result<usize> {
    let value = v.as_i64()
        .ok_or_else(|| PercolationError::Config(format!("{}: {} is not an integer", name, v)))?;
    positive(name, value)
}
