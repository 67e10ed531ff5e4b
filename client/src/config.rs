use std::{fs, path::Path};

use anyhow::Context;
use libgame::config::SimulationConfig;

/// Reads a JSON config, or returns the defaults when no path is given.
pub fn load(path: Option<&Path>) -> anyhow::Result<SimulationConfig> {
    let config = match path {
        Some(path) => {
            let config_serialized = fs::read(path)
                .with_context(|| format!("Couldn't read config {}", path.display()))?;

            serde_json::from_slice(&config_serialized)
                .with_context(|| format!("Couldn't deserialize config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    config.validate().context("Invalid config")?;
    Ok(config)
}
