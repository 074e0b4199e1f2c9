//! Procedural lizard that chases the pointer around a terminal canvas.
//!
//! Pipeline: `engine::lizard::Lizard` is updated once per tick, the
//! `engine::Engine` composes its state into an ordered `types::Scene`, the
//! `renderer::Renderer` rasterizes scenes into cell frames, and `live` or
//! `player` push those frames to the terminal.

pub mod color;
pub mod config;
pub mod engine;
pub mod live;
pub mod menubar;
pub mod player;
pub mod recorder;
pub mod renderer;
pub mod screen;
pub mod types;
