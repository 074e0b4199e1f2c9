//! Shared boundary types for the lizard demo.
//!
//! This module defines the two key data contracts:
//! - Engine → Renderer (in-memory): `Scene` containing `DrawOp`s in world units
//! - Renderer → Player (file): `PlayablePresentation` containing `Frame`s

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

/// An opaque 24-bit colour. Conversions and blending live in `crate::color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
}

impl Style {
    pub fn is_default(&self) -> bool {
        self.fg.is_none() && self.bg.is_none()
    }
}

// ---------------------------------------------------------------------------
// World-space geometry
// ---------------------------------------------------------------------------

/// A point (or vector) in world units; +y points down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

// ---------------------------------------------------------------------------
// Engine → Renderer boundary (in-memory only, never serialized)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapStyle {
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Color, width: f64) -> Self {
        Stroke { color, width }
    }
}

/// One immediate-mode drawing call. Later ops paint over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Closed polygon. With `smooth` the vertices act as spline control
    /// points rather than corners.
    Polygon {
        points: Vec<Point>,
        fill: Option<Color>,
        outline: Option<Stroke>,
        smooth: bool,
    },
    /// Axis-aligned ellipse inscribed in the box `min..max`.
    Oval {
        min: Point,
        max: Point,
        fill: Option<Color>,
        outline: Option<Stroke>,
    },
    /// Open polyline.
    Line {
        points: Vec<Point>,
        stroke: Stroke,
        cap: CapStyle,
        smooth: bool,
    },
    /// Axis-aligned rectangle spanning `min..max`.
    Rect {
        min: Point,
        max: Point,
        fill: Option<Color>,
        outline: Option<Stroke>,
    },
}

impl DrawOp {
    pub fn polygon(points: Vec<Point>, fill: Color) -> Self {
        DrawOp::Polygon { points, fill: Some(fill), outline: None, smooth: false }
    }

    pub fn smooth_polygon(points: Vec<Point>, fill: Color) -> Self {
        DrawOp::Polygon { points, fill: Some(fill), outline: None, smooth: true }
    }

    /// Oval centred on `c` with radii `rx`, `ry`.
    pub fn oval(c: Point, rx: f64, ry: f64, fill: Color) -> Self {
        DrawOp::Oval {
            min: Point::new(c.x - rx, c.y - ry),
            max: Point::new(c.x + rx, c.y + ry),
            fill: Some(fill),
            outline: None,
        }
    }

    pub fn line(from: Point, to: Point, color: Color, width: f64) -> Self {
        DrawOp::Line {
            points: vec![from, to],
            stroke: Stroke::new(color, width),
            cap: CapStyle::Butt,
            smooth: false,
        }
    }

    pub fn round_line(from: Point, to: Point, color: Color, width: f64) -> Self {
        DrawOp::Line {
            points: vec![from, to],
            stroke: Stroke::new(color, width),
            cap: CapStyle::Round,
            smooth: false,
        }
    }

    pub fn smooth_line(points: Vec<Point>, color: Color, width: f64) -> Self {
        DrawOp::Line {
            points,
            stroke: Stroke::new(color, width),
            cap: CapStyle::Butt,
            smooth: true,
        }
    }

    /// Attach an outline to a polygon, oval or rectangle. Lines are returned
    /// unchanged.
    pub fn outlined(mut self, stroke: Stroke) -> Self {
        match &mut self {
            DrawOp::Polygon { outline, .. }
            | DrawOp::Oval { outline, .. }
            | DrawOp::Rect { outline, .. } => *outline = Some(stroke),
            DrawOp::Line { .. } => {}
        }
        self
    }

    /// The fill colour, or the stroke colour for lines.
    pub fn color(&self) -> Option<Color> {
        match self {
            DrawOp::Polygon { fill, .. } | DrawOp::Oval { fill, .. } | DrawOp::Rect { fill, .. } => {
                *fill
            }
            DrawOp::Line { stroke, .. } => Some(stroke.color),
        }
    }
}

/// A contiguous run of ops in a `Scene`, produced by one named draw stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
}

/// Everything to paint for one frame, in paint order.
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub ops: Vec<DrawOp>,
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: Color) -> Self {
        Scene { width, height, background, ops: Vec::new(), layers: Vec::new() }
    }

    /// Append the ops emitted by `paint` and record them as a named layer.
    pub fn push_layer(&mut self, name: &'static str, paint: impl FnOnce(&mut Vec<DrawOp>)) {
        let start = self.ops.len();
        paint(&mut self.ops);
        self.layers.push(Layer { name, start, end: self.ops.len() });
    }

    /// Ops of the first layer called `name` (empty if absent).
    pub fn layer_ops(&self, name: &str) -> &[DrawOp] {
        self.layers
            .iter()
            .find(|l| l.name == name)
            .map(|l| &self.ops[l.start..l.end])
            .unwrap_or(&[])
    }

    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.name).collect()
    }
}

// ---------------------------------------------------------------------------
// Renderer → Player boundary (serialized to the playable file)
// ---------------------------------------------------------------------------

/// Size of the terminal canvas in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalContract {
    pub width: u16,
    pub height: u16,
}

impl TerminalContract {
    /// Raster size in pixels: every cell carries two vertical pixels.
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize * 2)
    }

    /// Map a canvas cell to the world-space point at its centre.
    pub fn cell_to_world(&self, column: u16, row: u16, world_width: f64, world_height: f64) -> Point {
        let w = self.width.max(1) as f64;
        let h = self.height.max(1) as f64;
        Point::new(
            (column as f64 + 0.5) * world_width / w,
            (row as f64 + 0.5) * world_height / h,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub ch: char,
    #[serde(default, skip_serializing_if = "Style::is_default")]
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: Style::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    Full { cells: Vec<Vec<Cell>> },
    Diff { changes: Vec<CellChange> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayablePresentation {
    pub contract: TerminalContract,
    pub fps: u32,
    pub frames: Vec<Frame>,
}
