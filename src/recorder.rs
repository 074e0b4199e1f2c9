//! Headless recording: drive the lizard along a scripted pointer path at a
//! fixed timestep and capture the frames as a `PlayablePresentation`.

use anyhow::{Result, ensure};

use crate::config::{DemoConfig, WORLD_HEIGHT, WORLD_WIDTH};
use crate::engine::Engine;
use crate::engine::backdrop::Backdrop;
use crate::engine::lizard::Lizard;
use crate::renderer::Renderer;
use crate::types::{PlayablePresentation, Point, TerminalContract};

/// A slow figure-eight around the world centre, `t` in seconds.
pub fn pointer_path(t: f64) -> Point {
    Point::new(
        WORLD_WIDTH / 2.0 + (t * 0.9).cos() * 600.0,
        WORLD_HEIGHT / 2.0 + (t * 1.3).sin() * 300.0,
    )
}

pub fn record(config: &DemoConfig, contract: TerminalContract, frames: usize) -> Result<PlayablePresentation> {
    ensure!(frames > 0, "Nothing to record: frame count is zero");
    let fps = config.fps();
    let dt = 1.0 / fps as f64;
    let seed = config.resolve_seed();
    log::info!("recording {frames} frames at {fps} fps, seed {seed}");

    let mut lizard = Lizard::new(pointer_path(0.0), DemoConfig::rng(seed, 0));
    let mut backdrop = Backdrop::new(config.background_color()?, config.show_backdrop, DemoConfig::rng(seed, 1));
    let mut renderer = Renderer::new(contract);

    let mut out = Vec::with_capacity(frames);
    for n in 0..frames {
        let pointer = pointer_path(n as f64 * dt);
        lizard.update(pointer.x, pointer.y, dt);
        let scene = Engine::compose_frame(&lizard, &mut backdrop, pointer);
        out.push(renderer.next_frame(&scene));
    }
    Ok(PlayablePresentation { contract, fps, frames: out })
}
