use std::mem;

use rand::Rng;

use crate::board::GameBoard;

#[derive(Debug, Clone)]
pub struct GridState {
    current: GameBoard,
    next: GameBoard,
}

impl GridState {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_board(GameBoard::new(width, height))
    }

    pub fn with_board(board: GameBoard) -> Self {
        let next = GameBoard::new(board.width, board.height);

        Self {
            current: board,
            next,
        }
    }

    pub fn current(&self) -> &GameBoard {
        &self.current
    }

    #[cfg(test)]
    pub(crate) fn current_mut(&mut self) -> &mut GameBoard {
        &mut self.current
    }

    pub fn randomize<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.current.randomize(rng);
    }

    pub fn population(&self) -> usize {
        self.current.population()
    }

    pub fn commit_next(&mut self) {
        mem::swap(&mut self.current, &mut self.next);
    }

    pub(crate) fn buffers_mut(&mut self) -> (&GameBoard, &mut GameBoard) {
        (&self.current, &mut self.next)
    }
}
