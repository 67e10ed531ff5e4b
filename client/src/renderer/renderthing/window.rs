use std::{
    ops::ControlFlow,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, anyhow};
use pixels::{Pixels, PixelsBuilder, SurfaceTexture, wgpu::TextureFormat};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes},
};

use super::{frame::RenderFrame, sleeper::Sleeper};

pub(super) struct RendererWindow {
    config: RendererWindowConfig,
    resumed_window: Option<ResumedWindow>,
    sleeper: Sleeper,
    error: Option<anyhow::Error>,
}

impl RendererWindow {
    pub fn new(config: RendererWindowConfig) -> Self {
        let sleeper = Sleeper::new(config.frame_delay);

        Self {
            config,
            resumed_window: None,
            sleeper,
            error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        self.error = Some(error);
        event_loop.exit();
    }

    fn idle(&mut self, event_loop: &ActiveEventLoop) {
        if (self.config.idle_callback)().is_break() {
            event_loop.exit();
        }
    }
}

pub struct RendererWindowConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub frame_delay: Duration,

    // Returning `Break` from either callback closes the window. The idle callback also runs
    // when no frames are being drawn, e.g. while the window is hidden.
    pub draw_callback: Box<dyn FnMut(RenderFrame) -> ControlFlow<()>>,
    pub idle_callback: Box<dyn FnMut() -> ControlFlow<()>>,
    pub event_callback: Option<Box<dyn FnMut(&WindowEvent)>>,
}

struct ResumedWindow {
    window: Arc<Window>,
    pixels: Pixels<'static>,
}

fn create_window(
    event_loop: &ActiveEventLoop,
    config: &RendererWindowConfig,
) -> anyhow::Result<ResumedWindow> {
    let window = Arc::new({
        let window_size = LogicalSize::new(config.width as f64, config.height as f64);

        event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(config.title.clone())
                    .with_inner_size(window_size),
            )
            .context("Creating window")?
    });

    let pixels = {
        let window_size = window.inner_size();

        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());

        PixelsBuilder::new(window_size.width, window_size.height, surface_texture)
            .texture_format(TextureFormat::Rgba8UnormSrgb)
            .build()
            .context("Creating pixels buffer")?
    };

    window.request_redraw();

    Ok(ResumedWindow { window, pixels })
}

impl ApplicationHandler for RendererWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.resumed_window.is_some() {
            return;
        }

        match create_window(event_loop, &self.config) {
            Ok(resumed_window) => self.resumed_window = Some(resumed_window),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, (): ()) {
        self.idle(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.idle(event_loop);

        if !event_loop.exiting() {
            event_loop.set_control_flow(winit::event_loop::ControlFlow::WaitUntil(
                Instant::now() + self.config.frame_delay,
            ));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(ResumedWindow { window, pixels }) = self.resumed_window.as_mut() else {
            return;
        };

        let mut failure = None;

        match event {
            WindowEvent::RedrawRequested => {
                let PhysicalSize { width, height } = window.inner_size();

                let next_frame = RenderFrame {
                    width,
                    height,
                    buffer: pixels.frame_mut(),
                };

                let flow = (self.config.draw_callback)(next_frame);

                // Let pixels do the actual hard work
                if let Err(e) = pixels.render() {
                    failure = Some(anyhow!(e).context("Rendering with pixels"));
                } else if flow.is_break() {
                    event_loop.exit();
                } else {
                    // Hangs the event loop for the pause, which is fine since every frame is a tick.
                    self.sleeper.sleep();
                    window.request_redraw();
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if width > 0 && height > 0 {
                    let resized = pixels
                        .resize_surface(width, height)
                        .and_then(|()| pixels.resize_buffer(width, height));

                    if let Err(e) = resized {
                        failure = Some(anyhow!(e).context("Resizing pixels buffer"));
                    }
                }
                window.request_redraw();
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            _ => {}
        }

        if let Some(event_callback) = &mut self.config.event_callback {
            event_callback(&event);
        }

        if let Some(e) = failure {
            self.fail(event_loop, e);
        }
    }
}
