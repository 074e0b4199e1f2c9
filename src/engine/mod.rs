//! Engine: the procedural animation core.
//!
//! Owns nothing between frames: it reads a `Lizard`'s current state and
//! turns it into a `Scene`, an ordered batch of world-space draw ops.
//!
//! The engine understands the lizard's anatomy and the paint order. It never
//! deals with terminals, pixels, or cells.

pub mod backdrop;
pub mod geometry;
pub mod lizard;
pub mod profile;
pub mod stages;

use crate::config::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::types::{Point, Scene};
use backdrop::Backdrop;
use lizard::Lizard;
use stages::Stage;

pub struct Engine;

impl Engine {
    /// The lizard alone on an empty scene of the default background.
    pub fn compose(lizard: &Lizard) -> Scene {
        let mut scene = Scene::new(WORLD_WIDTH, WORLD_HEIGHT, crate::config::BG_COLOR);
        Self::compose_onto(lizard, &mut scene);
        scene
    }

    /// Append every draw stage, one layer each, in `Stage::ORDER`.
    pub fn compose_onto(lizard: &Lizard, scene: &mut Scene) {
        for stage in Stage::ORDER {
            scene.push_layer(stage.name(), |ops| stage.paint(lizard, ops));
        }
    }

    /// A full frame: floor, lizard, then the pointer crosshair on top.
    pub fn compose_frame(lizard: &Lizard, backdrop: &mut Backdrop, pointer: Point) -> Scene {
        let mut scene = Scene::new(WORLD_WIDTH, WORLD_HEIGHT, backdrop.background());
        scene.push_layer("backdrop", |ops| backdrop.paint(WORLD_WIDTH, WORLD_HEIGHT, ops));
        Self::compose_onto(lizard, &mut scene);
        scene.push_layer("cursor", |ops| backdrop::crosshair(pointer, ops));
        scene
    }
}
