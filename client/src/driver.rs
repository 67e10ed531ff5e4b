use std::time::{Duration, Instant};

use libgame::{
    config::SimulationConfig,
    render::{Palette, RenderSink, render},
    sim::Simulation,
    watchdog::ReseedReason,
};
use rand::Rng;

use crate::{log::notice, stop::StopFlag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Interrupted,
    BudgetExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped(StopReason),
}

#[derive(Debug, Clone, Copy)]
pub struct RunBudget {
    started: Instant,
    limit: Option<Duration>,
}

impl RunBudget {
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn exceeded(&self) -> bool {
        self.limit
            .is_some_and(|limit| self.started.elapsed() >= limit)
    }
}

pub struct Driver<R> {
    simulation: Simulation<R>,
    palette: Palette,
    stop: StopFlag,
    budget: RunBudget,
    stopped: Option<StopReason>,
}

impl<R> Driver<R>
where
    R: Rng,
{
    pub fn new(
        config: &SimulationConfig,
        rng: R,
        stop: StopFlag,
        budget: RunBudget,
    ) -> anyhow::Result<Self> {
        Ok(Self::with_simulation(
            Simulation::new(config, rng)?,
            Palette::new(config.live_color),
            stop,
            budget,
        ))
    }

    pub fn with_simulation(
        simulation: Simulation<R>,
        palette: Palette,
        stop: StopFlag,
        budget: RunBudget,
    ) -> Self {
        Self {
            simulation,
            palette,
            stop,
            budget,
            stopped: None,
        }
    }

    #[cfg(test)]
    fn simulation(&self) -> &Simulation<R> {
        &self.simulation
    }

    pub fn stop_flag(&self) -> &StopFlag {
        &self.stop
    }

    /// Looks at the stop flag and the budget between ticks, without stepping.
    pub fn poll(&mut self) -> DriverState {
        if let Some(reason) = self.stopped {
            return DriverState::Stopped(reason);
        }

        if self.stop.is_raised() {
            return self.stop_with(StopReason::Interrupted);
        }

        if self.budget.exceeded() {
            return self.stop_with(StopReason::BudgetExhausted);
        }

        DriverState::Running
    }

    /// A stop request is only honored before the tick starts, an exhausted budget only after it
    /// finished.
    pub fn tick<S>(&mut self, sink: &mut S) -> DriverState
    where
        S: RenderSink + ?Sized,
    {
        if let Some(reason) = self.stopped {
            return DriverState::Stopped(reason);
        }

        if self.stop.is_raised() {
            return self.stop_with(StopReason::Interrupted);
        }

        if let Some(reseed) = self.simulation.tick() {
            let why = match reseed.reason {
                ReseedReason::Stalled => "population stalled",
                ReseedReason::Ceiling => "tick ceiling reached",
            };
            notice!(
                "Reseeding after {} ticks ({why}), generation {}",
                reseed.ticks,
                self.simulation.game.generation()
            );
        }

        render(self.simulation.board(), &self.palette, sink);

        if self.budget.exceeded() {
            return self.stop_with(StopReason::BudgetExhausted);
        }

        DriverState::Running
    }

    fn stop_with(&mut self, reason: StopReason) -> DriverState {
        let why = match reason {
            StopReason::Interrupted => "interrupted",
            StopReason::BudgetExhausted => "run time is up",
        };
        notice!(
            "Stopping now ({why}) after {} generations",
            self.simulation.game.generation()
        );

        self.stopped = Some(reason);
        DriverState::Stopped(reason)
    }
}
