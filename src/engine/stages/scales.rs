use std::f64::consts::FRAC_PI_2;

use crate::config::SEGMENT_COUNT;
use crate::engine::lizard::Lizard;
use crate::engine::profile::{skin_color_at, width_at};
use crate::types::{DrawOp, Stroke};

/// Ridge of small triangles along the back, every third segment.
pub fn paint(lizard: &Lizard, ops: &mut Vec<DrawOp>) {
    for i in (6..SEGMENT_COUNT - 12).step_by(3) {
        let a = lizard.segment(i);
        let heading = a.angle_to(lizard.segment(i + 1));
        let w = width_at(i);
        let half_base = w * 0.3;

        let tip = a.polar(heading - FRAC_PI_2, w * 0.8);
        let base_front = a.polar(heading, half_base);
        let base_back = a.polar(heading, -half_base);

        let fill = skin_color_at(i).darken(0.35);
        ops.push(
            DrawOp::polygon(vec![base_front, tip, base_back], fill)
                .outlined(Stroke::new(fill.darken(0.3), 1.0)),
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::types::Point;

    use super::*;

    #[test]
    fn scale_tips_point_away_from_spine() {
        let mut liz = Lizard::seeded(Point::new(0.0, 0.0), 2);
        for _ in 0..40 {
            liz.update(0.0, 600.0, 0.016);
        }
        let mut ops = Vec::new();
        paint(&liz, &mut ops);
        // 6, 9, ..., 45
        assert_eq!(ops.len(), 14);
        for (k, op) in ops.iter().enumerate() {
            let i = 6 + k * 3;
            let DrawOp::Polygon { points, outline, .. } = op else {
                panic!("expected a triangle");
            };
            assert_eq!(points.len(), 3);
            let tip_dist = liz.segment(i).distance_to(points[1]);
            assert!((tip_dist - width_at(i) * 0.8).abs() < 1e-9);
            assert!(outline.is_some());
        }
    }
}
