use crate::{
    board::{GameBoard, TileState},
    pos::Position,
};

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];

pub trait RenderSink {
    fn set_pixel(&mut self, pos: Position, color: Rgb);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub alive: Rgb,
    pub dead: Rgb,
}

impl Palette {
    pub fn new(alive: Rgb) -> Self {
        Self { alive, dead: BLACK }
    }

    pub fn color(&self, tile: TileState) -> Rgb {
        match tile {
            TileState::Alive => self.alive,
            TileState::Dead => self.dead,
        }
    }
}

pub fn render<S>(board: &GameBoard, palette: &Palette, sink: &mut S)
where
    S: RenderSink + ?Sized,
{
    for (pos, tile) in board.enumerate_tiles() {
        sink.set_pixel(pos, palette.color(*tile));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        pixels: HashMap<Position, Rgb>,
        writes: usize,
    }

    impl RenderSink for RecordingSink {
        fn set_pixel(&mut self, pos: Position, color: Rgb) {
            self.pixels.insert(pos, color);
            self.writes += 1;
        }
    }

    #[test]
    fn every_cell_is_written_once() {
        let board = GameBoard::from_rows(&["#..", "..#"]).unwrap();
        let palette = Palette::new([0, 255, 0]);
        let mut sink = RecordingSink::default();

        render(&board, &palette, &mut sink);

        assert_eq!(sink.writes, 6);
        assert_eq!(sink.pixels[&Position { x: 0, y: 0 }], [0, 255, 0]);
        assert_eq!(sink.pixels[&Position { x: 2, y: 1 }], [0, 255, 0]);
        assert_eq!(sink.pixels[&Position { x: 1, y: 0 }], BLACK);
        assert_eq!(sink.pixels[&Position { x: 0, y: 1 }], BLACK);
    }
}
