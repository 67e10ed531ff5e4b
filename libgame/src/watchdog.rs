use anyhow::ensure;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::state::GridState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchdogConfig {
    /// Ticks between population samples. The comparison sample is taken one tick after the baseline.
    pub window: u64,

    pub max_ticks: u64,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            window: 100,
            // About 12 minutes at the default tick interval.
            max_ticks: 10_000,
        }
    }
}

impl WatchdogConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        // `t % 1` is never 1, so a single tick window could never compare.
        ensure!(
            self.window >= 2,
            "Watchdog window must be at least 2 ticks, got {}",
            self.window
        );
        ensure!(self.max_ticks >= 1, "Watchdog max_ticks must be at least 1");

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReseedReason {
    Stalled,
    Ceiling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reseed {
    pub reason: ReseedReason,
    pub ticks: u64,
}

/// Reseeds the grid when the population checksum stops changing.
///
/// This is a coarse heuristic: two different arrangements with the same population
/// look identical to it, and oscillators whose period doesn't line up with the window
/// are only caught by the `max_ticks` ceiling.
#[derive(Debug, Clone)]
pub struct StallWatchdog {
    config: WatchdogConfig,
    ticks: u64,
    baseline: usize,
}

impl StallWatchdog {
    pub fn new(config: WatchdogConfig) -> anyhow::Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            ticks: 0,
            baseline: 0,
        })
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn observe<R>(&mut self, state: &mut GridState, rng: &mut R) -> Option<Reseed>
    where
        R: Rng + ?Sized,
    {
        self.ticks += 1;

        let window_tick = self.ticks % self.config.window;
        let mut reason = None;

        if window_tick == 0 {
            self.baseline = state.population();
        } else if window_tick == 1 {
            if state.population() == self.baseline {
                reason = Some(ReseedReason::Stalled);
            }
            self.baseline = 0;
        }

        if reason.is_none() && self.ticks >= self.config.max_ticks {
            reason = Some(ReseedReason::Ceiling);
        }

        let reason = reason?;
        let reseed = Reseed {
            reason,
            ticks: self.ticks,
        };

        state.randomize(rng);
        self.ticks = 0;
        self.baseline = 0;

        Some(reseed)
    }
}
