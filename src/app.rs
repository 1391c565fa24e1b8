// Application shell: owns the window-facing systems and drives the game

use crate::engine::assets::AssetManager;
use crate::engine::game_loop::FrameClock;
use crate::engine::input::InputManager;
use crate::engine::renderer::{Canvas, Renderer};
use crate::game::{draw, GameState};
use anyhow::Result;
use glam::{UVec2, Vec2};
use log::{debug, info, warn};
use std::sync::Arc;
use winit::event::WindowEvent;
use winit::window::Window;

/// Returned by [`App::handle_window_event`] to tell the event loop what to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct App {
    window: Arc<Window>,
    renderer: Renderer,
    input: InputManager,
    clock: FrameClock,
    state: GameState,
    assets: AssetManager,
    canvas: Canvas,
}

impl App {
    pub fn new(window: Arc<Window>, renderer: Renderer, state: GameState, assets: AssetManager) -> Self {
        let display = state.settings().display.size();
        let clock = FrameClock::new(state.settings().display.tick_rate);
        let mut app = Self {
            window,
            renderer,
            input: InputManager::default(),
            clock,
            state,
            assets,
            canvas: Canvas::new(display),
        };
        let window_size = app.renderer.window_size();
        app.state.set_window_size(window_size);
        app
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Result<Flow> {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down...");
                return Ok(Flow::Exit);
            }
            WindowEvent::Resized(physical_size) => {
                info!("Window resized to {:?}", physical_size);
                self.renderer.resize(*physical_size);
                self.state
                    .set_window_size(UVec2::new(physical_size.width, physical_size.height));
            }
            WindowEvent::Focused(false) => self.input.reset(),
            WindowEvent::KeyboardInput { event, .. } => self.input.process_keyboard_event(event),
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(*button, *state)
            }
            WindowEvent::CursorMoved { position, .. } => self
                .input
                .process_cursor_moved(Vec2::new(position.x as f32, position.y as f32)),
            WindowEvent::RedrawRequested => return self.frame(),
            _ => {}
        }
        Ok(Flow::Continue)
    }

    /// Run the ticks owed for this frame, then draw and present
    fn frame(&mut self) -> Result<Flow> {
        if self.input.take_quit_request() {
            info!("Quit requested, shutting down...");
            return Ok(Flow::Exit);
        }
        if self.input.take_pause_request() {
            self.clock.toggle_pause();
            info!("Paused: {}", self.clock.is_paused());
        }

        let ticks = self.clock.begin_frame();
        for _ in 0..ticks {
            let input = self.input.snapshot();
            self.state.tick(&input)?;
            self.input.update();
        }

        if self.clock.frame_count() % 600 == 0 {
            debug!("{:.1} fps, level {}", self.clock.fps(), self.state.level());
        }

        draw::render(&self.state, &self.assets, &mut self.canvas);
        let shake = self.state.shake_offset();
        if let Err(e) = self.renderer.present(&self.canvas, shake) {
            // Lost or outdated surfaces recover after a reconfigure
            warn!("Failed to present frame: {e:#}");
            self.renderer.resize(self.window.inner_size());
        }
        Ok(Flow::Continue)
    }
}
