//! Renderer: the deterministic rasterizer.
//!
//! Takes `Scene`s (in-memory, from the engine) and produces terminal
//! `Frame`s, and from a run of scenes a `PlayablePresentation`.
//!
//! Each frame is painted from scratch: the raster is cleared to the scene
//! background and every op is drawn in order. The only state carried between
//! frames is the previous cell grid, kept for diffing.

pub mod raster;

use crate::types::{Cell, CellChange, Frame, PlayablePresentation, Scene, TerminalContract};
use raster::Raster;

pub struct Renderer {
    contract: TerminalContract,
    raster: Option<Raster>,
    prev_grid: Option<Vec<Vec<Cell>>>,
}

impl Renderer {
    pub fn new(contract: TerminalContract) -> Self {
        Renderer { contract, raster: None, prev_grid: None }
    }

    pub fn contract(&self) -> TerminalContract {
        self.contract
    }

    /// Render a sequence of scenes into a playable presentation.
    ///
    /// The first frame is always a full frame. Subsequent frames are diffs
    /// against the previous frame.
    pub fn render(scenes: &[Scene], contract: TerminalContract, fps: u32) -> PlayablePresentation {
        let mut renderer = Renderer::new(contract);
        let frames = scenes.iter().map(|scene| renderer.next_frame(scene)).collect();
        PlayablePresentation { contract, fps, frames }
    }

    /// Rasterize `scene` and return it as a frame relative to the last one.
    pub fn next_frame(&mut self, scene: &Scene) -> Frame {
        let grid = self.rasterize(scene);
        let frame = match &self.prev_grid {
            None => Frame::Full { cells: grid.clone() },
            Some(prev) => Frame::Diff { changes: Self::diff(prev, &grid) },
        };
        self.prev_grid = Some(grid);
        frame
    }

    /// Forget the previous grid so the next frame is a full one.
    pub fn invalidate(&mut self) {
        self.prev_grid = None;
    }

    /// Rasterize a scene onto the contract's cell grid.
    ///
    /// Ops are drawn in their scene order, so later ops paint over earlier
    /// ones.
    pub fn rasterize(&mut self, scene: &Scene) -> Vec<Vec<Cell>> {
        let (w, h) = self.contract.pixel_size();
        if !self.raster.as_ref().is_some_and(|r| r.world_size() == (scene.width, scene.height)) {
            self.raster = Some(Raster::new(w, h, scene.width, scene.height));
        }
        let Some(raster) = self.raster.as_mut() else {
            return Vec::new();
        };
        raster.clear(scene.background);
        for op in &scene.ops {
            raster.draw(op);
        }
        raster.to_cells()
    }

    /// Compute a cell-level diff between two grids.
    pub fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: next_cell.clone(),
                    });
                }
            }
        }
        changes
    }
}
