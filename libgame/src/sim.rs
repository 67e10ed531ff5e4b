use rand::Rng;

use crate::{
    Game,
    board::GameBoard,
    config::SimulationConfig,
    rule::Rule,
    state::GridState,
    watchdog::{Reseed, StallWatchdog},
};

pub struct Simulation<R> {
    pub game: Game,
    pub watchdog: StallWatchdog,
    rng: R,
}

impl<R> Simulation<R>
where
    R: Rng,
{
    pub fn new(config: &SimulationConfig, mut rng: R) -> anyhow::Result<Self> {
        config.validate()?;

        let mut state = GridState::new(config.width, config.height);
        state.randomize(&mut rng);

        Self::with_state(config, state, rng)
    }

    pub fn with_state(
        config: &SimulationConfig,
        state: GridState,
        rng: R,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            game: Game::new(state, Rule::default()),
            watchdog: StallWatchdog::new(config.watchdog)?,
            rng,
        })
    }

    /// Steps first, so the watchdog samples the generation about to be rendered.
    pub fn tick(&mut self) -> Option<Reseed> {
        self.game.tick();
        self.watchdog.observe(&mut self.game.state, &mut self.rng)
    }

    pub fn board(&self) -> &GameBoard {
        self.game.state.current()
    }
}
