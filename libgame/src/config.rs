use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

use crate::watchdog::WatchdogConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,

    pub tick_interval_ms: u64,

    // Dead cells are always black.
    pub live_color: [u8; 3],

    pub watchdog: WatchdogConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            tick_interval_ms: 75,
            live_color: [255, 0, 0],
            watchdog: WatchdogConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.width >= 1 && self.height >= 1,
            "Grid must be at least 1x1, got {}x{}",
            self.width,
            self.height
        );
        self.watchdog.validate().context("Invalid watchdog config")
    }
}
