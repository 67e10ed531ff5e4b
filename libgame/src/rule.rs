use crate::{
    board::{GameBoard, TileState},
    pos::Position,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub birth: Vec<usize>,
    pub survive: Vec<usize>,
}

impl Rule {
    pub fn next_state(&self, board: &GameBoard, pos: Position) -> TileState {
        let alive_neighbor_count = board.live_neighbors(pos);

        let alive = if board.is_alive(pos) {
            self.survive.contains(&alive_neighbor_count)
        } else {
            self.birth.contains(&alive_neighbor_count)
        };

        TileState::from(alive)
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            birth: vec![3],
            survive: vec![2, 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Center of a 5x5 board so wrapping can't bring extra neighbors in.
    fn center_of(rows: [&str; 3]) -> (GameBoard, Position) {
        let padded = [
            ".....".to_owned(),
            format!(".{}.", rows[0]),
            format!(".{}.", rows[1]),
            format!(".{}.", rows[2]),
            ".....".to_owned(),
        ];
        let rows = padded.each_ref().map(String::as_str);

        let board = GameBoard::from_rows(&rows).unwrap();
        (board, Position { x: 2, y: 2 })
    }

    fn next(rows: [&str; 3]) -> TileState {
        let (board, pos) = center_of(rows);
        Rule::default().next_state(&board, pos)
    }

    #[test]
    fn lonely_cell_dies() {
        assert_eq!(next(["...", ".#.", "..."]), TileState::Dead);
    }

    #[test]
    fn cell_with_one_neighbor_dies() {
        assert_eq!(next(["#..", ".#.", "..."]), TileState::Dead);
    }

    #[test]
    fn cell_with_two_neighbors_survives() {
        assert_eq!(next(["#..", ".#.", "..#"]), TileState::Alive);
    }

    #[test]
    fn cell_with_three_neighbors_survives() {
        assert_eq!(next(["#.#", ".#.", "..#"]), TileState::Alive);
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        assert_eq!(next(["#.#", "...", ".#."]), TileState::Alive);
    }

    #[test]
    fn dead_cell_with_two_or_four_neighbors_stays_dead() {
        assert_eq!(next(["#.#", "...", "..."]), TileState::Dead);
        assert_eq!(next(["#.#", "...", "#.#"]), TileState::Dead);
    }

    #[test]
    fn crowded_cell_dies() {
        assert_eq!(next(["#.#", ".#.", "#.#"]), TileState::Dead);
        assert_eq!(next(["###", "###", "###"]), TileState::Dead);
    }

    #[test]
    fn neighbors_across_the_edge_count() {
        // Three live cells on the far column are neighbors of (0, 1) through the wrap.
        let board = GameBoard::from_rows(&["...#", "...#", "...#", "...."]).unwrap();

        assert_eq!(
            Rule::default().next_state(&board, Position { x: 0, y: 1 }),
            TileState::Alive
        );
    }
}
