#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod tiles;

pub use tiles::{ALIVE_COLOR, BACKGROUND_COLOR, GRIDLINE_COLOR, TileLayout};

use error_iter::ErrorIter as _;
use life_grid::{ConfigError, Intent, World};
use log::{debug, error, info};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, KeyEvent, MouseButton, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Cursor, CursorIcon, Window, WindowId};

const FRAME_INTERVAL: Duration = Duration::from_micros(1_000_000 / 60);
const CLEAR_COLOR: Color = Color::BLACK;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid simulation settings")]
    Config(#[from] ConfigError),

    #[error("event loop failed")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window")]
    Window(#[from] winit::error::OsError),

    #[error("failed to render")]
    Pixels(#[from] pixels::Error),

    #[error("failed to resize surface")]
    Texture(#[from] pixels::TextureError),
}

/// Logs `err` and every error in its source chain.
pub fn log_error<E>(method_name: &str, err: &E)
where
    E: std::error::Error + 'static,
{
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnimateOptions {
    pub title: &'static str,
    pub layout: TileLayout,
    pub random_density: f64,
}

impl Default for AnimateOptions {
    fn default() -> Self {
        Self {
            title: "Game of Life",
            layout: TileLayout::default(),
            random_density: 0.3,
        }
    }
}

/// Opens a window on `world` and runs it until the window is closed.
///
/// Space starts and pauses, R resets, G fills the board randomly, Escape or Q quits. Holding
/// the left mouse button brings cells under the cursor to life, the right button kills them.
pub fn animate<W: World>(world: W, options: AnimateOptions) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut handler = AppEventHandler::new(world, options);
    event_loop.run_app(&mut handler)?;
    match handler.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    next_frame: Instant,
    last_frame: Instant,
}

impl App {
    fn new<W: World>(
        event_loop: &ActiveEventLoop,
        world: &W,
        options: &AnimateOptions,
    ) -> Result<Self, AppError> {
        let (width, height) = options.layout.frame_size(world.size());
        let window = Arc::new(Self::build_window(event_loop, options.title, width, height)?);
        let pixels = Self::build_pixels(&window, width, height)?;
        let now = Instant::now();
        Ok(Self {
            window,
            pixels,
            next_frame: now,
            last_frame: now,
        })
    }

    fn build_window(
        event_loop: &ActiveEventLoop,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<Window, AppError> {
        let size = LogicalSize::new(width as f64, height as f64);
        let window_attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(size)
            .with_min_inner_size(size)
            .with_cursor(Cursor::Icon(CursorIcon::Crosshair))
            .with_visible(false);
        Ok(event_loop.create_window(window_attributes)?)
    }

    fn build_pixels(
        window: &Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, AppError> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        Ok(PixelsBuilder::new(width, height, surface_texture)
            .clear_color(CLEAR_COLOR)
            .build()?)
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_frame_time(&mut self) {
        self.window.request_redraw();

        let now = Instant::now();
        while self.next_frame < now {
            self.next_frame += FRAME_INTERVAL;
        }
    }

    fn elapsed_since_last_frame(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;
        elapsed
    }

    /// The grid cell under a window position. Positions outside the drawn board still map to
    /// a cell, one that lies off the grid.
    fn cell_under(&self, layout: &TileLayout, position: PhysicalPosition<f64>) -> (i64, i64) {
        let (px, py) = match self
            .pixels
            .window_pos_to_pixel((position.x as f32, position.y as f32))
        {
            Ok((px, py)) => (px as i64, py as i64),
            Err((px, py)) => (px as i64, py as i64),
        };
        layout.cell_at(px, py)
    }
}

#[derive(Debug, Default)]
struct Pointer {
    position: Option<PhysicalPosition<f64>>,
    left_pressed: bool,
    right_pressed: bool,
}

impl Pointer {
    /// The state to paint under the cursor, if a button is held. Left wins over right.
    fn paint_alive(&self) -> Option<bool> {
        if self.left_pressed {
            Some(true)
        } else if self.right_pressed {
            Some(false)
        } else {
            None
        }
    }

    fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.left_pressed = pressed,
            MouseButton::Right => self.right_pressed = pressed,
            _ => (),
        }
    }
}

struct AppEventHandler<W: World> {
    world: W,
    options: AnimateOptions,
    pointer: Pointer,
    app: Option<App>,
    error: Option<AppError>,
}

impl<W: World> AppEventHandler<W> {
    fn new(world: W, options: AnimateOptions) -> Self {
        Self {
            world,
            options,
            pointer: Pointer::default(),
            app: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: impl Into<AppError>) {
        self.error = Some(err.into());
        event_loop.exit();
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        match code {
            KeyCode::Escape | KeyCode::KeyQ => event_loop.exit(),
            KeyCode::Space => self.world.apply(Intent::ToggleRun),
            KeyCode::KeyR => self.world.apply(Intent::Reset),
            KeyCode::KeyG => self.world.apply(Intent::Randomize {
                density: self.options.random_density,
            }),
            _ => (),
        }
    }

    fn on_redraw(&mut self) -> Result<(), AppError> {
        let Some(app) = self.app.as_mut() else {
            return Ok(());
        };

        if let (Some(alive), Some(position)) = (self.pointer.paint_alive(), self.pointer.position)
        {
            let (x, y) = app.cell_under(&self.options.layout, position);
            self.world.apply(Intent::Paint { x, y, alive });
        }

        let elapsed = app.elapsed_since_last_frame();
        self.world.advance(elapsed);

        self.options.layout.draw(&self.world, app.pixels.frame_mut());
        app.pixels.render()?;
        Ok(())
    }
}

impl<W: World> ApplicationHandler for AppEventHandler<W> {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(app) = self.app.as_mut()
        {
            app.on_frame_time();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        match App::new(event_loop, &self.world, &self.options) {
            Ok(mut app) => {
                app.on_create();
                info!(
                    "opened {}x{} board",
                    self.world.size().width,
                    self.world.size().height
                );
                self.app = Some(app);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.on_key(event_loop, code),
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.position = Some(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer.position = None;
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.pointer.on_button(button, state);
            }
            WindowEvent::Resized(size) => {
                debug!("resized to {}x{}", size.width, size.height);
                let resized = match self.app.as_mut() {
                    Some(app) => app.pixels.resize_surface(size.width, size.height),
                    None => Ok(()),
                };
                if let Err(err) = resized {
                    self.fail(event_loop, err);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.on_redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.as_ref() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_frame));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use error_iter::ErrorIter as _;

    #[test]
    fn left_button_paints_alive_and_wins_over_right() {
        let mut pointer = Pointer::default();
        assert_eq!(pointer.paint_alive(), None);

        pointer.on_button(MouseButton::Right, ElementState::Pressed);
        assert_eq!(pointer.paint_alive(), Some(false));

        pointer.on_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(pointer.paint_alive(), Some(true));

        pointer.on_button(MouseButton::Left, ElementState::Released);
        assert_eq!(pointer.paint_alive(), Some(false));

        pointer.on_button(MouseButton::Right, ElementState::Released);
        assert_eq!(pointer.paint_alive(), None);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut pointer = Pointer::default();
        pointer.on_button(MouseButton::Middle, ElementState::Pressed);
        assert_eq!(pointer.paint_alive(), None);
    }

    #[test]
    fn config_errors_keep_their_source() {
        let err: AppError = ConfigError::ZeroStepInterval.into();
        let sources: Vec<String> = err.sources().map(|e| e.to_string()).collect();
        assert_eq!(
            sources,
            vec![
                "invalid simulation settings".to_string(),
                "step interval must be positive".to_string(),
            ]
        );
    }
}
