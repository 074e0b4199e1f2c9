//! Pixel raster: the immediate-mode drawing surface.
//!
//! Shapes arrive in world units and are scaled to the pixel grid. A pixel is
//! covered when its centre lies inside the shape. Strokes are never thinner
//! than one pixel, so hairlines stay visible at coarse resolutions.

use crate::engine::geometry::{smooth_closed, smooth_open};
use crate::types::{CapStyle, Cell, Color, DrawOp, Point, Stroke, Style};

pub struct Raster {
    width: usize,
    height: usize,
    /// World units → pixels.
    sx: f64,
    sy: f64,
    world: (f64, f64),
    pixels: Vec<Color>,
}

impl Raster {
    pub fn new(width: usize, height: usize, world_width: f64, world_height: f64) -> Self {
        Raster {
            width,
            height,
            sx: width as f64 / world_width,
            sy: height as f64 / world_height,
            world: (world_width, world_height),
            pixels: vec![Color::rgb(0, 0, 0); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn world_size(&self) -> (f64, f64) {
        self.world
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn draw(&mut self, op: &DrawOp) {
        match op {
            DrawOp::Polygon { points, fill, outline, smooth } => {
                let path: Vec<Point> = if *smooth { smooth_closed(points) } else { points.clone() };
                let path: Vec<Point> = path.iter().map(|&p| self.to_pixels(p)).collect();
                if let Some(color) = fill {
                    self.fill_polygon(&path, *color);
                }
                if let Some(stroke) = outline {
                    self.stroke_path(&path, true, *stroke, CapStyle::Round);
                }
            }
            DrawOp::Oval { min, max, fill, outline } => {
                let (a, b) = (self.to_pixels(*min), self.to_pixels(*max));
                let centre = (a + b) * 0.5;
                let (rx, ry) = ((b.x - a.x).abs() / 2.0, (b.y - a.y).abs() / 2.0);
                if let Some(color) = fill {
                    self.fill_ellipse(centre, rx, ry, *color);
                }
                if let Some(stroke) = outline {
                    let hw = self.half_width(stroke.width);
                    self.ring_ellipse(centre, rx, ry, hw, stroke.color);
                }
            }
            DrawOp::Line { points, stroke, cap, smooth } => {
                let path: Vec<Point> = if *smooth { smooth_open(points) } else { points.clone() };
                let path: Vec<Point> = path.iter().map(|&p| self.to_pixels(p)).collect();
                self.stroke_path(&path, false, *stroke, *cap);
            }
            DrawOp::Rect { min, max, fill, outline } => {
                let (a, b) = (self.to_pixels(*min), self.to_pixels(*max));
                let corners = [a, Point::new(b.x, a.y), b, Point::new(a.x, b.y)];
                if let Some(color) = fill {
                    self.fill_polygon(&corners, *color);
                }
                if let Some(stroke) = outline {
                    self.stroke_path(&corners, true, *stroke, CapStyle::Butt);
                }
            }
        }
    }

    /// Fold pixel pairs into half-block cells: upper pixel as foreground,
    /// lower pixel as background.
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        (0..self.height / 2)
            .map(|row| {
                (0..self.width)
                    .map(|x| Cell {
                        ch: '\u{2580}',
                        style: Style {
                            fg: Some(self.pixels[2 * row * self.width + x]),
                            bg: Some(self.pixels[(2 * row + 1) * self.width + x]),
                        },
                    })
                    .collect()
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Primitives (pixel space)
    // -----------------------------------------------------------------------

    fn to_pixels(&self, p: Point) -> Point {
        Point::new(p.x * self.sx, p.y * self.sy)
    }

    fn half_width(&self, world_width: f64) -> f64 {
        (world_width * (self.sx + self.sy) / 4.0).max(0.5)
    }

    fn set(&mut self, x: usize, y: usize, color: Color) {
        self.pixels[y * self.width + x] = color;
    }

    /// Pixel index range whose centres may fall in `lo..=hi`.
    fn span(lo: f64, hi: f64, len: usize) -> std::ops::Range<usize> {
        let start = (lo - 0.5).ceil().max(0.0) as usize;
        let end = ((hi - 0.5).floor() + 1.0).clamp(0.0, len as f64) as usize;
        start..end.max(start)
    }

    /// Even-odd scanline fill.
    fn fill_polygon(&mut self, path: &[Point], color: Color) {
        if path.len() < 3 {
            return;
        }
        let (min_y, max_y) = path
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));

        let mut crossings = Vec::new();
        for y in Self::span(min_y, max_y, self.height) {
            let cy = y as f64 + 0.5;
            crossings.clear();
            for (i, a) in path.iter().enumerate() {
                let b = path[(i + 1) % path.len()];
                if (a.y <= cy) != (b.y <= cy) {
                    crossings.push(a.x + (cy - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                for x in Self::span(pair[0], pair[1], self.width) {
                    self.set(x, y, color);
                }
            }
        }
    }

    fn fill_ellipse(&mut self, c: Point, rx: f64, ry: f64, color: Color) {
        self.ring_ellipse_impl(c, rx, ry, None, color);
    }

    fn ring_ellipse(&mut self, c: Point, rx: f64, ry: f64, hw: f64, color: Color) {
        self.ring_ellipse_impl(c, rx + hw, ry + hw, Some((rx - hw, ry - hw)), color);
    }

    fn ring_ellipse_impl(&mut self, c: Point, rx: f64, ry: f64, hole: Option<(f64, f64)>, color: Color) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let inside = |dx: f64, dy: f64, rx: f64, ry: f64| (dx / rx).powi(2) + (dy / ry).powi(2) <= 1.0;
        for y in Self::span(c.y - ry, c.y + ry, self.height) {
            let dy = y as f64 + 0.5 - c.y;
            for x in Self::span(c.x - rx, c.x + rx, self.width) {
                let dx = x as f64 + 0.5 - c.x;
                if !inside(dx, dy, rx, ry) {
                    continue;
                }
                if let Some((hx, hy)) = hole {
                    if hx > 0.0 && hy > 0.0 && inside(dx, dy, hx, hy) {
                        continue;
                    }
                }
                self.set(x, y, color);
            }
        }
    }

    fn stroke_path(&mut self, path: &[Point], closed: bool, stroke: Stroke, cap: CapStyle) {
        let hw = self.half_width(stroke.width);
        if path.len() == 1 && cap == CapStyle::Round {
            self.stroke_segment(path[0], path[0], hw, cap, stroke.color);
            return;
        }
        let edges = if closed { path.len() } else { path.len().saturating_sub(1) };
        for i in 0..edges {
            let a = path[i];
            let b = path[(i + 1) % path.len()];
            // Interior joints are rounded so consecutive segments meet cleanly.
            let joint = if closed || (i > 0 && i + 1 < edges) { CapStyle::Round } else { cap };
            self.stroke_segment(a, b, hw, joint, stroke.color);
        }
    }

    fn stroke_segment(&mut self, a: Point, b: Point, hw: f64, cap: CapStyle, color: Color) {
        let d = b - a;
        let len2 = d.x * d.x + d.y * d.y;
        for y in Self::span(a.y.min(b.y) - hw, a.y.max(b.y) + hw, self.height) {
            let py = y as f64 + 0.5;
            for x in Self::span(a.x.min(b.x) - hw, a.x.max(b.x) + hw, self.width) {
                let p = Point::new(x as f64 + 0.5, py);
                let t = if len2 == 0.0 { 0.0 } else { ((p.x - a.x) * d.x + (p.y - a.y) * d.y) / len2 };
                let covered = match cap {
                    CapStyle::Round => (a + d * t.clamp(0.0, 1.0)).distance_to(p) <= hw,
                    CapStyle::Butt => len2 > 0.0 && (0.0..=1.0).contains(&t) && (a + d * t).distance_to(p) <= hw,
                };
                if covered {
                    self.set(x, y, color);
                }
            }
        }
    }
}
