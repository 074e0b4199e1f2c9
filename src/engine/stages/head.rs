//! Head stage.
//!
//! Every head feature is laid out in a local frame anchored on the first
//! spine segment with +x pointing at the fourth, then mapped to world space
//! by a single `LocalFrame`.

use crate::color::hex;
use crate::engine::geometry::LocalFrame;
use crate::engine::lizard::Lizard;
use crate::types::{Color, DrawOp, Point, Stroke};

const SKIN: Color = hex(0x5a7a3a);
const SKIN_LIGHT: Color = hex(0x6b8c45);
const OUTLINE: Color = hex(0x1e3010);
const RIDGE: Color = hex(0x7a9c55);
const DARK: Color = hex(0x1a2a08);
const SOCKET_RIM: Color = hex(0x0a1808);
const DEWLAP: Color = hex(0xc86432);
const TONGUE: Color = hex(0xcc2222);
const FORK: Color = hex(0xdd1111);

const OUTLINE_PTS: [(f64, f64); 7] = [
    (32.0, 0.0),
    (20.0, -14.0),
    (-8.0, -14.0),
    (-20.0, -10.0),
    (-20.0, 10.0),
    (-8.0, 14.0),
    (20.0, 14.0),
];
const SHADE_PTS: [(f64, f64); 6] = [
    (28.0, 0.0),
    (18.0, -11.0),
    (-5.0, -11.0),
    (-15.0, -7.0),
    (-5.0, -2.0),
    (15.0, -2.0),
];
const RIDGE_PTS: [(f64, f64); 4] = [(32.0, 0.0), (20.0, -4.0), (5.0, -5.0), (-3.0, -5.0)];
const MOUTH_PTS: [(f64, f64); 4] = [(32.0, 0.0), (18.0, -3.0), (0.0, -3.0), (-10.0, -3.0)];
const DEWLAP_PTS: [(f64, f64); 4] = [(-5.0, 5.0), (-10.0, 18.0), (-18.0, 16.0), (-16.0, 6.0)];

const NOSTRILS: [(f64, f64); 2] = [(24.0, -5.0), (24.0, 5.0)];
const EYE: (f64, f64) = (8.0, -12.0);
const EYE_SHINE: (f64, f64) = (10.0, -14.0);
const EAR: (f64, f64) = (-2.0, -11.0);
const TONGUE_BASE_X: f64 = 30.0;
const TONGUE_MAX: f64 = 28.0;

/// Local frame of the head: origin on segment 0, +x toward segment 3.
pub fn head_frame(lizard: &Lizard) -> LocalFrame {
    let head = lizard.segment(0);
    LocalFrame::new(head, head.angle_to(lizard.segment(3)))
}

pub fn paint(lizard: &Lizard, ops: &mut Vec<DrawOp>) {
    let frame = head_frame(lizard);
    let at = |(x, y): (f64, f64)| frame.to_world(x, y);

    ops.push(
        DrawOp::smooth_polygon(frame.map(&OUTLINE_PTS), SKIN).outlined(Stroke::new(OUTLINE, 1.0)),
    );
    ops.push(DrawOp::smooth_polygon(frame.map(&SHADE_PTS), SKIN_LIGHT));
    ops.push(DrawOp::smooth_line(frame.map(&RIDGE_PTS), RIDGE, 2.0));

    for nostril in NOSTRILS {
        ops.push(DrawOp::oval(at(nostril), 3.0, 2.0, DARK));
    }

    ops.push(DrawOp::smooth_line(frame.map(&MOUTH_PTS), DARK, 2.0));

    paint_eye(lizard, at(EYE), at(EYE_SHINE), ops);

    ops.push(DrawOp::oval(at(EAR), 4.0, 4.0, DARK).outlined(Stroke::new(SOCKET_RIM, 1.0)));
    ops.push(DrawOp::smooth_polygon(frame.map(&DEWLAP_PTS), DEWLAP));

    paint_tongue(lizard, &frame, ops);
}

fn paint_eye(lizard: &Lizard, eye: Point, shine: Point, ops: &mut Vec<DrawOp>) {
    let blink = lizard.blink_amount();

    ops.push(DrawOp::oval(eye, 9.0, 8.0, OUTLINE).outlined(Stroke::new(SOCKET_RIM, 1.0)));
    ops.push(DrawOp::oval(eye, 7.0, 7.0, hex(0x8b4513)));
    ops.push(DrawOp::oval(eye, 5.0, 5.0, hex(0xc8820a)));
    ops.push(DrawOp::oval(eye, 3.0, 3.0, hex(0xa06010)));

    // Vertical slit pupil, squeezed shut as the lid comes down.
    let open = 1.0 - blink * 0.95;
    ops.push(DrawOp::oval(eye, 2.0, 6.0 * open, hex(0x050200)));

    if open > 0.3 {
        ops.push(DrawOp::Oval {
            min: shine,
            max: shine + Point::new(3.0, 2.0),
            fill: Some(hex(0xffffff)),
            outline: None,
        });
    }

    if blink > 0.05 {
        let lid = (8.0 * blink).trunc();
        ops.push(DrawOp::Rect {
            min: eye - Point::new(9.0, 8.0),
            max: eye + Point::new(9.0, lid - 8.0),
            fill: Some(SKIN),
            outline: None,
        });
    }
}

fn paint_tongue(lizard: &Lizard, frame: &LocalFrame, ops: &mut Vec<DrawOp>) {
    let extension = lizard.tongue_extension();
    if extension <= 0.05 {
        return;
    }
    let len = extension * TONGUE_MAX;
    let base = frame.to_world(TONGUE_BASE_X, 0.0);
    let tip = frame.to_world(TONGUE_BASE_X + len, 0.0);
    ops.push(DrawOp::round_line(base, tip, TONGUE, 3.0));

    if len > 10.0 {
        let fork = 9.0 * (len / TONGUE_MAX);
        let reach = TONGUE_BASE_X + len + fork;
        for side in [-1.0, 1.0] {
            let prong = frame.to_world(reach, side * fork * 0.6);
            ops.push(DrawOp::round_line(tip, prong, FORK, 2.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing_right() -> Lizard {
        // Pointer far to the left drags the head left of the body, so
        // segment 3 trails to the right.
        let mut liz = Lizard::seeded(Point::new(500.0, 300.0), 11);
        for _ in 0..60 {
            liz.update(-2000.0, 300.0, 0.0);
        }
        liz
    }

    fn count(ops: &[DrawOp], color: Color) -> usize {
        ops.iter().filter(|op| op.color() == Some(color)).count()
    }

    #[test]
    fn snout_sits_32_units_along_the_head_axis() {
        let liz = facing_right();
        let frame = head_frame(&liz);
        let snout = frame.to_world(32.0, 0.0);
        let head = liz.segment(0);
        assert!((head.distance_to(snout) - 32.0).abs() < 1e-9);
        // The local +x axis points at segment 3.
        let toward = head.angle_to(liz.segment(3));
        assert!((head.angle_to(snout) - toward).abs() < 1e-9);
    }

    #[test]
    fn open_eye_has_shine_and_no_lid() {
        let liz = facing_right();
        assert_eq!(liz.blink_amount(), 0.0);
        let mut ops = Vec::new();
        paint(&liz, &mut ops);
        assert_eq!(count(&ops, hex(0xffffff)), 1);
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Rect { .. })));

        let pupil = ops.iter().find(|op| op.color() == Some(hex(0x050200))).unwrap();
        let DrawOp::Oval { min, max, .. } = pupil else { panic!() };
        assert!(((max.y - min.y) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn blinking_eye_closes_lid_and_hides_shine() {
        let mut liz = Lizard::seeded(Point::new(0.0, 0.0), 12);
        // Step just far enough to fire the blink with little decay.
        let timer = liz.blink_timer();
        liz.update(0.0, 0.0, timer);
        while liz.blink_amount() == 0.0 {
            liz.update(0.0, 0.0, 0.001);
        }
        let blink = liz.blink_amount();
        assert!(blink > 0.9);

        let mut ops = Vec::new();
        paint(&liz, &mut ops);
        assert_eq!(count(&ops, hex(0xffffff)), 0);
        let lid = ops.iter().find(|op| matches!(op, DrawOp::Rect { .. })).unwrap();
        let DrawOp::Rect { min, max, .. } = lid else { panic!() };
        assert!(((max.y - min.y) - (8.0 * blink).trunc()).abs() < 1e-9);
    }

    #[test]
    fn tongue_forks_only_when_long() {
        let mut liz = Lizard::seeded(Point::new(0.0, 0.0), 13);
        let mut saw_short = false;
        let mut saw_forked = false;
        for _ in 0..200 {
            liz.update(0.0, 0.0, 0.016);
            let mut ops = Vec::new();
            paint(&liz, &mut ops);
            let body = count(&ops, TONGUE);
            let prongs = count(&ops, FORK);
            let len = liz.tongue_extension() * TONGUE_MAX;
            if liz.tongue_extension() <= 0.05 {
                assert_eq!(body, 0);
            } else {
                assert_eq!(body, 1);
                if len > 10.0 {
                    assert_eq!(prongs, 2);
                    saw_forked = true;
                } else {
                    assert_eq!(prongs, 0);
                    saw_short = true;
                }
            }
        }
        assert!(saw_short && saw_forked);
    }
}
