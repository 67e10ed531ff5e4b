use anyhow::{bail, ensure};
use itertools::Itertools;
use rand::Rng;

use super::pos::Position;

const NEIGHBOR_RELATIVE_POSITIONS: &[[isize; 2]] = &[
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];

// Row-major, `x` is the column and `y` the row. Edges wrap around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBoard {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileState>,
}

impl GameBoard {
    pub fn new(width: usize, height: usize) -> Self {
        let tiles = vec![TileState::default(); width * height];
        Self::with_tiles(width, height, tiles)
    }

    pub fn with_tiles(width: usize, height: usize, tiles: Vec<TileState>) -> Self {
        assert!(width >= 1 && height >= 1, "Board must be at least 1x1");
        assert_eq!(tiles.len(), width * height, "Tile count doesn't match board size");

        Self {
            width,
            height,
            tiles,
        }
    }

    /// Parses a board from rows of `#` (alive) and `.` (dead).
    pub fn from_rows(rows: &[&str]) -> anyhow::Result<Self> {
        ensure!(!rows.is_empty(), "No rows given");
        ensure!(
            rows.iter().map(|row| row.len()).all_equal(),
            "Rows have different widths"
        );

        let width = rows[0].len();
        ensure!(width > 0, "Rows are empty");

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                tiles.push(match ch {
                    '#' => TileState::Alive,
                    '.' => TileState::Dead,
                    other => bail!("Unexpected {other:?} at {x},{y}"),
                });
            }
        }

        Ok(Self::with_tiles(width, rows.len(), tiles))
    }

    pub fn tile<P>(&self, pos: P) -> Option<&TileState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.tiles.get(index)
    }

    pub fn tile_mut<P>(&mut self, pos: P) -> Option<&mut TileState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.tiles.get_mut(index)
    }

    pub fn is_alive<P>(&self, pos: P) -> bool
    where
        P: Into<Position>,
    {
        self.tile(pos).is_some_and(|tile| tile.is_alive())
    }

    #[cfg(test)]
    pub(crate) fn set_alive<I, P>(&mut self, positions: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        for pos in positions {
            if let Some(tile) = self.tile_mut(pos) {
                *tile = TileState::Alive;
            }
        }
    }

    pub fn enumerate_tiles(&self) -> impl Iterator<Item = (Position, &TileState)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (self.index_to_pos(index), tile))
    }

    pub fn randomize<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for tile in &mut self.tiles {
            *tile = TileState::from(rng.random_bool(0.5));
        }
    }

    pub fn population(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_alive()).count()
    }

    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width, self.height);

        NEIGHBOR_RELATIVE_POSITIONS
            .iter()
            .map(move |[dx, dy]| pos.wrapping_offset(*dx, *dy, width, height))
    }

    pub fn live_neighbors(&self, pos: Position) -> usize {
        self.neighbors(pos)
            .filter(|neighbor| self.is_alive(*neighbor))
            .count()
    }

    fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let Position { x, y } = pos.into();

        if x >= self.width {
            return None;
        }

        if y >= self.height {
            return None;
        }

        Some(x + (y * self.width))
    }

    fn index_to_pos(&self, index: usize) -> Position {
        let y = index / self.width;
        let x = index % self.width;
        Position { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileState {
    Alive,

    #[default]
    Dead,
}

impl TileState {
    pub fn is_alive(self) -> bool {
        self == TileState::Alive
    }
}

impl From<bool> for TileState {
    fn from(alive: bool) -> Self {
        if alive {
            TileState::Alive
        } else {
            TileState::Dead
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn corner_neighbors_wrap_around() {
        let board = GameBoard::new(32, 32);

        let neighbors = board
            .neighbors(Position { x: 0, y: 0 })
            .map(<[usize; 2]>::from)
            .sorted()
            .collect_vec();

        assert_eq!(
            neighbors,
            vec![
                [0, 1],
                [0, 31],
                [1, 0],
                [1, 1],
                [1, 31],
                [31, 0],
                [31, 1],
                [31, 31],
            ]
        );
    }

    #[test]
    fn live_neighbors_sees_across_edges() {
        let mut board = GameBoard::new(8, 8);
        board.set_alive([[7usize, 7], [7, 0], [0, 7], [0, 0]]);

        // (0, 0) itself is alive but never counts.
        assert_eq!(board.live_neighbors(Position { x: 0, y: 0 }), 3);
        assert_eq!(board.live_neighbors(Position { x: 4, y: 4 }), 0);
    }

    #[test]
    fn from_rows_reads_pattern() {
        let board = GameBoard::from_rows(&["#..", ".#.", "..#", "..."]).unwrap();

        assert_eq!((board.width, board.height), (3, 4));
        assert_eq!(board.population(), 3);
        assert!(board.is_alive([1usize, 1]));
        assert!(!board.is_alive([1usize, 0]));
        assert!(!board.is_alive([5usize, 5]));
    }

    #[test]
    fn from_rows_rejects_bad_input() {
        assert!(GameBoard::from_rows(&[]).is_err());
        assert!(GameBoard::from_rows(&["##", "#"]).is_err());
        assert!(GameBoard::from_rows(&["#x"]).is_err());
    }

    #[test]
    fn randomize_is_roughly_fair() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut board = GameBoard::new(64, 64);
        board.randomize(&mut rng);

        let population = board.population();
        assert!((1600..2500).contains(&population), "population {population}");
    }

    #[test]
    fn enumerate_tiles_is_row_major() {
        let board = GameBoard::new(3, 2);
        let positions = (0..2)
            .cartesian_product(0..3)
            .map(|(y, x)| Position { x, y })
            .collect_vec();

        assert_eq!(board.enumerate_tiles().map(|(pos, _)| pos).collect_vec(), positions);
    }
}
