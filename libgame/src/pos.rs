#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn wrapping_offset(self, dx: isize, dy: isize, width: usize, height: usize) -> Self {
        fn wrap(coord: usize, offset: isize, dimension: usize) -> usize {
            let dimension = dimension as isize;
            ((coord as isize + offset + dimension) % dimension) as usize
        }

        Self {
            x: wrap(self.x, dx, width),
            y: wrap(self.y, dy, height),
        }
    }
}

impl From<[usize; 2]> for Position {
    fn from(value: [usize; 2]) -> Self {
        Self {
            x: value[0],
            y: value[1],
        }
    }
}

impl From<Position> for [usize; 2] {
    fn from(value: Position) -> Self {
        [value.x, value.y]
    }
}
