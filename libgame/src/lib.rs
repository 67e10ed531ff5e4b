use rule::Rule;
use state::GridState;

pub mod board;
pub mod config;
pub mod pos;
pub mod render;
pub mod rule;
pub mod sim;
pub mod state;
pub mod watchdog;

#[derive(Debug, Clone)]
pub struct Game {
    pub state: GridState,
    pub rule: Rule,
    generation: u64,
}

impl Game {
    pub fn new(state: GridState, rule: Rule) -> Self {
        Self {
            state,
            rule,
            generation: 0,
        }
    }

    pub fn tick(&mut self) {
        let (current, next) = self.state.buffers_mut();

        for ((tile_pos, _), next_tile) in current.enumerate_tiles().zip(next.tiles.iter_mut()) {
            *next_tile = self.rule.next_state(current, tile_pos);
        }

        self.state.commit_next();
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
