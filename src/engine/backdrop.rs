//! Decorations around the lizard: the rock-tile floor, a vignette, and the
//! pointer crosshair.

use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::color::hex;
use crate::types::{Color, DrawOp, Point, Stroke};

const TILE_W: f64 = 80.0;
const TILE_H: f64 = 60.0;
const TILE_GAP: f64 = 2.0;
const TILE_SHADES: [Color; 3] = [hex(0x141008), hex(0x111006), hex(0x131007)];
const GROUT: Color = hex(0x0d0c06);
const VIGNETTE: Color = hex(0x050400);
const VIGNETTE_RINGS: usize = 8;

const CURSOR: Color = hex(0xcc3322);
const CURSOR_RIM: Color = hex(0xff5544);

pub struct Backdrop {
    background: Color,
    tiles: bool,
    rng: ChaCha8Rng,
}

impl Backdrop {
    pub fn new(background: Color, tiles: bool, rng: ChaCha8Rng) -> Self {
        Backdrop { background, tiles, rng }
    }

    pub fn seeded(background: Color, tiles: bool, seed: u64) -> Self {
        Self::new(background, tiles, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Base fill, then (if enabled) staggered tiles with a fresh random
    /// shade each frame and a darkened border.
    pub fn paint(&mut self, width: f64, height: f64, ops: &mut Vec<DrawOp>) {
        ops.push(DrawOp::Rect {
            min: Point::new(0.0, 0.0),
            max: Point::new(width, height),
            fill: Some(self.background),
            outline: None,
        });
        if !self.tiles {
            return;
        }

        let mut row = 0;
        while (row as f64) * TILE_H < height {
            let y = row as f64 * TILE_H;
            let stagger = (row % 2) as f64 * TILE_W / 2.0;
            let mut x = 0.0;
            while x < width {
                let shade = *TILE_SHADES.choose(&mut self.rng).unwrap_or(&TILE_SHADES[0]);
                let min = Point::new(x + stagger, y);
                ops.push(DrawOp::Rect {
                    min,
                    max: min + Point::new(TILE_W - TILE_GAP, TILE_H - TILE_GAP),
                    fill: Some(shade),
                    outline: Some(Stroke::new(GROUT, 1.0)),
                });
                x += TILE_W;
            }
            row += 1;
        }

        for ring in 0..VIGNETTE_RINGS {
            let inset = ring as f64 * 10.0;
            ops.push(DrawOp::Rect {
                min: Point::new(inset, inset),
                max: Point::new(width - inset, height - inset),
                fill: None,
                outline: Some(Stroke::new(VIGNETTE, 12.0)),
            });
        }
    }
}

/// Small red dot with a cross through it at the pointer.
pub fn crosshair(pointer: Point, ops: &mut Vec<DrawOp>) {
    ops.push(DrawOp::oval(pointer, 4.0, 4.0, CURSOR).outlined(Stroke::new(CURSOR_RIM, 1.0)));
    ops.push(DrawOp::line(pointer - Point::new(8.0, 0.0), pointer + Point::new(8.0, 0.0), CURSOR, 1.0));
    ops.push(DrawOp::line(pointer - Point::new(0.0, 8.0), pointer + Point::new(0.0, 8.0), CURSOR, 1.0));
}
