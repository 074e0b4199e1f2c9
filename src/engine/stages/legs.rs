use std::f64::consts::PI;

use crate::color::hex;
use crate::config::SEGMENT_COUNT;
use crate::engine::geometry::normal;
use crate::engine::lizard::{LegConfig, Lizard};
use crate::engine::profile::width_at;
use crate::types::{Color, DrawOp, Point};

const THIGH_LEN: f64 = 28.0;
const SHIN_LEN: f64 = 26.0;
const MAX_LIFT: f64 = 14.0;
const TOE_SPREAD: f64 = 0.25;
const CLAW_LEN: f64 = 3.0;

const THIGH: (Color, Color) = (hex(0x2e4418), hex(0x3d5820));
const SHIN: (Color, Color) = (hex(0x243010), hex(0x304018));
const FOOT_PAD: Color = hex(0x1a2010);
const TOE: Color = hex(0x121808);
const CLAW: Color = hex(0x0a1005);

/// Joint positions of one leg for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegPose {
    pub hip: Point,
    pub knee: Point,
    pub foot: Point,
    /// Heading of the shin, which the toes fan around.
    pub foot_angle: f64,
}

pub fn pose(lizard: &Lizard, leg: &LegConfig) -> LegPose {
    let a = lizard.segment(leg.segment);
    let b = lizard.segment((leg.segment + 1).min(SEGMENT_COUNT - 1));

    let hip = a + normal(a, b) * (width_at(leg.segment) * leg.side);
    let spread = a.angle_to(b) + leg.side * (PI / 2.3);

    let cycle = lizard.time() * 0.1 + leg.phase;
    let swing = cycle.cos() * 0.4;
    let lift = cycle.sin().max(0.0) * MAX_LIFT * lizard.walk_speed();

    let knee_angle = spread + swing;
    let knee = hip.polar(knee_angle, THIGH_LEN);
    let foot_angle = knee_angle + swing * 0.8;
    let foot = knee.polar(foot_angle, SHIN_LEN) - Point::new(0.0, lift);

    LegPose { hip, knee, foot, foot_angle }
}

/// Four legs: thigh and shin as two-tone strokes, a foot pad, five clawed toes.
pub fn paint(lizard: &Lizard, ops: &mut Vec<DrawOp>) {
    for leg in lizard.legs() {
        let p = pose(lizard, leg);

        ops.push(DrawOp::round_line(p.hip, p.knee, THIGH.0, 7.0));
        ops.push(DrawOp::round_line(p.hip, p.knee, THIGH.1, 4.0));
        ops.push(DrawOp::round_line(p.knee, p.foot, SHIN.0, 5.0));
        ops.push(DrawOp::round_line(p.knee, p.foot, SHIN.1, 3.0));
        ops.push(DrawOp::oval(p.foot, 4.0, 4.0, FOOT_PAD));

        // Middle toe longest, outer toes shortest.
        for toe in -2i32..=2 {
            let angle = p.foot_angle + toe as f64 * TOE_SPREAD;
            let tip = p.foot.polar(angle, 10.0 - toe.abs() as f64 * 1.5);
            ops.push(DrawOp::round_line(p.foot, tip, TOE, 2.0));
            ops.push(DrawOp::round_line(tip, tip.polar(angle, CLAW_LEN), CLAW, 1.0));
        }
    }
}
