//! Live: the interactive demo loop.
//!
//! Steps the lizard toward the mouse once per tick, composes and rasterizes
//! the frame, and writes only the changed cells to the terminal.

mod input;

use std::time::Instant;

use anyhow::Result;
use crossterm::event;

use crate::config::DemoConfig;
use crate::engine::Engine;
use crate::engine::backdrop::Backdrop;
use crate::engine::lizard::Lizard;
use crate::menubar::render_menubar;
use crate::screen::{CANVAS_OFFSET, Screen, draw_frame, draw_status};
use crate::renderer::Renderer;
use crate::types::{Frame, Point, TerminalContract};

pub use input::{Buttons, Pointer};
use input::Action;

/// Frames between FPS readout refreshes.
const FPS_REFRESH_FRAMES: u64 = 30;

const HELP: &[&str] = &["[Mouse] lead", "[Space] pause", "[F11] fullscreen", "[Esc][q] quit"];

/// FPS readout that only refreshes every few frames so it stays legible.
#[derive(Debug, Default)]
pub struct FpsCounter {
    frames: u64,
    shown: u32,
}

impl FpsCounter {
    pub fn tick(&mut self, dt: f64) {
        if self.frames % FPS_REFRESH_FRAMES == 0 {
            self.shown = if dt > 0.0 { (1.0 / dt).round().min(999.0) as u32 } else { 999 };
        }
        self.frames += 1;
    }

    pub fn shown(&self) -> u32 {
        self.shown
    }
}

/// Canvas size for a terminal of `width` x `height`, leaving room for the
/// menu bar and status line.
pub fn canvas_contract(width: u16, height: u16) -> TerminalContract {
    TerminalContract {
        width: width.max(1),
        height: height.saturating_sub(CANVAS_OFFSET + 1).max(1),
    }
}

pub struct Live {
    config: DemoConfig,
    lizard: Lizard,
    backdrop: Backdrop,
    pointer: Pointer,
    renderer: Renderer,
    fps: FpsCounter,
    paused: bool,
}

impl Live {
    pub fn new(config: DemoConfig, contract: TerminalContract) -> Result<Self> {
        let seed = config.resolve_seed();
        let background = config.background_color()?;
        let pointer = Pointer::centered();
        log::info!(
            "live demo: seed {seed}, {} fps, canvas {}x{}",
            config.fps(),
            contract.width,
            contract.height
        );
        Ok(Live {
            lizard: Lizard::new(pointer.position, DemoConfig::rng(seed, 0)),
            backdrop: Backdrop::new(background, config.show_backdrop, DemoConfig::rng(seed, 1)),
            pointer,
            renderer: Renderer::new(contract),
            fps: FpsCounter::default(),
            paused: false,
            config,
        })
    }

    pub fn lizard(&self) -> &Lizard {
        &self.lizard
    }

    /// Advance the simulation by `dt` seconds (unless paused) and render.
    pub fn tick(&mut self, dt: f64) -> Frame {
        self.fps.tick(dt);
        if !self.paused {
            let Point { x, y } = self.pointer.position;
            self.lizard.update(x, y, dt);
        }
        let scene = Engine::compose_frame(&self.lizard, &mut self.backdrop, self.pointer.position);
        self.renderer.next_frame(&scene)
    }

    pub fn run(&mut self) -> Result<()> {
        let mut screen = Screen::enter(true)?;
        self.main_loop(&mut screen)
    }

    fn main_loop(&mut self, screen: &mut Screen) -> Result<()> {
        let interval = self.config.frame_interval();
        render_menubar(screen.out(), 0, HELP)?;

        let mut last = Instant::now();
        let mut next_tick = last + interval;
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                let contract = self.renderer.contract();
                let ev = event::read()?;
                match input::handle_event(ev, &self.config.key_bindings, contract, &mut self.pointer) {
                    Action::Continue => {}
                    Action::Quit => break,
                    Action::TogglePause => {
                        self.paused = !self.paused;
                        log::debug!("paused: {}", self.paused);
                    }
                    Action::ToggleFullscreen => screen.toggle_fullscreen()?,
                    Action::Resize(w, h) => {
                        let contract = canvas_contract(w, h);
                        log::debug!("resized canvas to {}x{}", contract.width, contract.height);
                        self.renderer = Renderer::new(contract);
                        screen.clear()?;
                        render_menubar(screen.out(), 0, HELP)?;
                    }
                }
                continue;
            }

            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f64();
            last = now;
            next_tick += interval;
            if next_tick < now {
                // Fell behind; don't try to catch up with a burst of frames.
                next_tick = now + interval;
            }

            let frame = self.tick(dt);
            draw_frame(screen.out(), &frame)?;
            let row = self.renderer.contract().height + CANVAS_OFFSET;
            draw_status(screen.out(), row, &self.status_line())?;
        }

        Ok(())
    }

    fn status_line(&self) -> String {
        let state = if self.paused { " | paused" } else { "" };
        format!(
            " FPS: {} | buttons: {}{state} ",
            self.fps.shown(),
            self.pointer.buttons.label()
        )
    }
}
