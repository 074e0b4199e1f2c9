//! Geometry helpers shared by the simulator and the draw stages.

use crate::types::Point;

impl Point {
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Heading of the vector from `self` to `other`, in radians.
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// The point `radius` away from `self` along `angle`.
    pub fn polar(self, angle: f64, radius: f64) -> Point {
        Point::new(self.x + angle.cos() * radius, self.y + angle.sin() * radius)
    }
}

/// Unit normal `(-dy, dx) / len` of the direction `from → to`.
///
/// A zero-length direction is divided by 1 instead, yielding the zero vector.
pub fn normal(from: Point, to: Point) -> Point {
    let d = to - from;
    let len = match d.length() {
        l if l == 0.0 => 1.0,
        l => l,
    };
    Point::new(-d.y / len, d.x / len)
}

/// Translate-then-rotate transform from a local frame to world space.
///
/// The local +x axis points along `angle`; the local origin lands on
/// `origin`. Sine and cosine are computed once per transform.
#[derive(Debug, Clone, Copy)]
pub struct LocalFrame {
    origin: Point,
    cos: f64,
    sin: f64,
}

impl LocalFrame {
    pub fn new(origin: Point, angle: f64) -> Self {
        LocalFrame { origin, cos: angle.cos(), sin: angle.sin() }
    }

    pub fn to_world(&self, x: f64, y: f64) -> Point {
        Point::new(
            self.origin.x + x * self.cos - y * self.sin,
            self.origin.y + x * self.sin + y * self.cos,
        )
    }

    pub fn map(&self, local: &[(f64, f64)]) -> Vec<Point> {
        local.iter().map(|&(x, y)| self.to_world(x, y)).collect()
    }
}

/// Number of samples per quadratic span when smoothing.
const SPLINE_STEPS: usize = 8;

fn midpoint(a: Point, b: Point) -> Point {
    (a + b) * 0.5
}

fn quad(p0: Point, c: Point, p1: Point, out: &mut Vec<Point>) {
    for s in 1..=SPLINE_STEPS {
        let t = s as f64 / SPLINE_STEPS as f64;
        let u = 1.0 - t;
        out.push(p0 * (u * u) + c * (2.0 * u * t) + p1 * (t * t));
    }
}

/// Smooth an open polyline with quadratic splines through edge midpoints.
/// The first and last points are kept; interior vertices become control
/// points.
pub fn smooth_open(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let mut out = vec![points[0]];
    for i in 1..n - 1 {
        let start = if i == 1 { points[0] } else { midpoint(points[i - 1], points[i]) };
        let end = if i == n - 2 { points[n - 1] } else { midpoint(points[i], points[i + 1]) };
        quad(start, points[i], end, &mut out);
    }
    out
}

/// Smooth a closed polygon: every vertex becomes the control point of a
/// quadratic span between its two edge midpoints.
pub fn smooth_closed(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(n * SPLINE_STEPS);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let next = points[(i + 1) % n];
        quad(midpoint(prev, points[i]), points[i], midpoint(points[i], next), &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn normal_is_left_hand_perpendicular() {
        let n = normal(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!(close(n, Point::new(0.0, 1.0)));
        let n = normal(Point::new(1.0, 1.0), Point::new(1.0, 4.0));
        assert!(close(n, Point::new(-1.0, 0.0)));
    }

    #[test]
    fn normal_of_degenerate_direction_is_zero() {
        let p = Point::new(3.0, 3.0);
        assert_eq!(normal(p, p), Point::new(0.0, 0.0));
    }

    #[test]
    fn polar_and_angle_agree() {
        let o = Point::new(5.0, -2.0);
        let p = o.polar(0.7, 12.0);
        assert!((o.angle_to(p) - 0.7).abs() < 1e-12);
        assert!((o.distance_to(p) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn local_frame_rotates_then_translates() {
        let f = LocalFrame::new(Point::new(100.0, 50.0), FRAC_PI_2);
        assert!(close(f.to_world(10.0, 0.0), Point::new(100.0, 60.0)));
        assert!(close(f.to_world(0.0, 10.0), Point::new(90.0, 50.0)));

        let f = LocalFrame::new(Point::new(0.0, 0.0), PI);
        assert!(close(f.to_world(32.0, 0.0), Point::new(-32.0, 0.0)));
    }

    #[test]
    fn smooth_open_keeps_endpoints() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 10.0),
        ];
        let s = smooth_open(&pts);
        assert!(close(s[0], pts[0]));
        assert!(close(*s.last().unwrap(), pts[3]));
        assert_eq!(s.len(), 1 + 2 * SPLINE_STEPS);
    }

    #[test]
    fn short_paths_are_not_smoothed() {
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(smooth_open(&pts), pts.to_vec());
        assert_eq!(smooth_closed(&pts), pts.to_vec());
    }

    #[test]
    fn smooth_closed_stays_inside_hull() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let s = smooth_closed(&square);
        assert_eq!(s.len(), 4 * SPLINE_STEPS);
        assert!(s.iter().all(|p| (0.0..=10.0).contains(&p.x) && (0.0..=10.0).contains(&p.y)));
    }
}
