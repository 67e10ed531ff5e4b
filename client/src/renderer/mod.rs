mod renderthing;

use std::{cell::RefCell, ops::ControlFlow, rc::Rc, time::Duration};

use libgame::{
    config::SimulationConfig,
    pos::Position,
    render::{RenderSink, Rgb},
};
use rand::Rng;
use renderthing::{
    Renderer,
    frame::{RenderFrame, Rgba},
    window::RendererWindowConfig,
};
use winit::event::WindowEvent;

use crate::{
    driver::{Driver, DriverState},
    log::notice,
};

const BACKGROUND: Rgba = [10, 10, 10, 255];
const MAX_TILE_SIZE: usize = 15;
const MAX_WINDOW_SIDE: usize = 960;

pub fn run<R>(config: &SimulationConfig, driver: Driver<R>) -> anyhow::Result<()>
where
    R: Rng + 'static,
{
    let driver = Rc::new(RefCell::new(driver));
    let tile_size = (MAX_WINDOW_SIDE / config.width.max(config.height)).clamp(1, MAX_TILE_SIZE);
    let (grid_width, grid_height) = (config.width as u32, config.height as u32);

    let renderer = Renderer::new(RendererWindowConfig {
        title: "gameoflife".to_owned(),
        width: config.width * tile_size,
        height: config.height * tile_size,
        frame_delay: Duration::from_millis(config.tick_interval_ms),
        draw_callback: Box::new({
            let driver = driver.clone();
            move |mut frame| {
                frame.fill(BACKGROUND);

                let mut sink = TileSink::new(frame, grid_width, grid_height);
                window_flow(driver.borrow_mut().tick(&mut sink))
            }
        }),
        idle_callback: Box::new({
            let driver = driver.clone();
            move || window_flow(driver.borrow_mut().poll())
        }),
        event_callback: Some(Box::new(|event| {
            if let WindowEvent::CloseRequested = event {
                notice!("Window closed, stopping now");
            }
        })),
    })?;

    // Signals arrive on another thread; wake the event loop so the stop is seen right away.
    let proxy = renderer.proxy();
    driver.borrow().stop_flag().set_waker(move || {
        let _ = proxy.send_event(());
    });

    renderer.run()
}

fn window_flow(state: DriverState) -> ControlFlow<()> {
    match state {
        DriverState::Running => ControlFlow::Continue(()),
        DriverState::Stopped(_) => ControlFlow::Break(()),
    }
}

struct TileSink<'a> {
    frame: RenderFrame<'a>,
    tile_width: u32,
    tile_height: u32,
    margin: u32,
}

impl<'a> TileSink<'a> {
    fn new(frame: RenderFrame<'a>, grid_width: u32, grid_height: u32) -> Self {
        let tile_width = frame.width / grid_width;
        let tile_height = frame.height / grid_height;

        // Leave a gap between tiles only when they are big enough to show it.
        const HALF_TILE_MARGIN: u32 = 1;
        let margin = if tile_width > 2 * HALF_TILE_MARGIN && tile_height > 2 * HALF_TILE_MARGIN {
            HALF_TILE_MARGIN
        } else {
            0
        };

        Self {
            frame,
            tile_width,
            tile_height,
            margin,
        }
    }
}

impl RenderSink for TileSink<'_> {
    fn set_pixel(&mut self, pos: Position, [r, g, b]: Rgb) {
        let tile_screen_x = pos.x as u32 * self.tile_width;
        let tile_screen_y = pos.y as u32 * self.tile_height;

        self.frame.draw_square(
            tile_screen_x + self.margin,
            tile_screen_y + self.margin,
            self.tile_width - self.margin * 2,
            self.tile_height - self.margin * 2,
            [r, g, b, 255],
        );
    }
}

#[cfg(test)]
mod tests {
    use libgame::{
        board::GameBoard,
        render::{Palette, render},
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::{renderthing::frame::PIXEL_BITS, *};
    use crate::{driver::RunBudget, stop::StopFlag};

    fn pixel(buffer: &[u8], width: u32, x: u32, y: u32) -> &[u8] {
        let index = (x + y * width) as usize * PIXEL_BITS;
        &buffer[index..index + PIXEL_BITS]
    }

    #[test]
    fn cells_become_tiles_with_margin() {
        let board = GameBoard::from_rows(&["#.", ".#"]).unwrap();
        let mut buffer = vec![0u8; 8 * 8 * PIXEL_BITS];

        let mut frame = RenderFrame {
            width: 8,
            height: 8,
            buffer: &mut buffer,
        };
        frame.fill(BACKGROUND);

        let mut sink = TileSink::new(frame, 2, 2);
        render(&board, &Palette::new([200, 0, 0]), &mut sink);

        // Tiles are 4x4 with a one pixel margin.
        assert_eq!(pixel(&buffer, 8, 0, 0), &BACKGROUND);
        assert_eq!(pixel(&buffer, 8, 1, 1), &[200u8, 0, 0, 255]);
        assert_eq!(pixel(&buffer, 8, 2, 2), &[200u8, 0, 0, 255]);
        assert_eq!(pixel(&buffer, 8, 3, 3), &BACKGROUND);
        assert_eq!(pixel(&buffer, 8, 5, 1), &[0u8, 0, 0, 255]);
        assert_eq!(pixel(&buffer, 8, 6, 6), &[200u8, 0, 0, 255]);
    }

    #[test]
    fn small_tiles_have_no_margin() {
        let board = GameBoard::from_rows(&["##", "##"]).unwrap();
        let mut buffer = vec![0u8; 4 * 4 * PIXEL_BITS];

        let frame = RenderFrame {
            width: 4,
            height: 4,
            buffer: &mut buffer,
        };
        let mut sink = TileSink::new(frame, 2, 2);
        render(&board, &Palette::new([1, 2, 3]), &mut sink);

        assert!(buffer.chunks_exact(PIXEL_BITS).all(|pixel| pixel == [1u8, 2, 3, 255]));
    }

    #[test]
    fn stop_between_frames_closes_the_window() {
        let stop = StopFlag::default();
        let config = SimulationConfig {
            width: 6,
            height: 6,
            ..Default::default()
        };
        let mut driver = Driver::new(
            &config,
            ChaCha8Rng::seed_from_u64(3),
            stop.clone(),
            RunBudget::new(None),
        )
        .unwrap();

        assert_eq!(window_flow(driver.poll()), ControlFlow::Continue(()));

        let (sender, receiver) = std::sync::mpsc::channel();
        stop.set_waker(move || {
            let _ = sender.send(());
        });
        stop.raise();

        // The waker fires without any frame being drawn, and the idle check then exits.
        assert!(receiver.try_recv().is_ok());
        assert_eq!(window_flow(driver.poll()), ControlFlow::Break(()));
    }
}
