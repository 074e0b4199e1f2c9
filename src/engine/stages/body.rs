use crate::config::SEGMENT_COUNT;
use crate::engine::lizard::Lizard;
use crate::engine::profile::{skin_color_at, width_at};
use crate::types::DrawOp;

/// Segment quads from tail to head, so the head end lands on top.
pub fn paint(lizard: &Lizard, ops: &mut Vec<DrawOp>) {
    for i in (0..SEGMENT_COUNT - 1).rev() {
        let (a, b) = (lizard.segment(i), lizard.segment(i + 1));
        let (n0, n1) = (lizard.normal_at(i), lizard.normal_at(i + 1));
        let (w0, w1) = (width_at(i), width_at(i + 1));

        let left0 = a + n0 * w0;
        let right0 = a - n0 * w0;
        let left1 = b + n1 * w1;
        let right1 = b - n1 * w1;

        let color = skin_color_at(i);
        ops.push(DrawOp::smooth_polygon(vec![left0, left1, right1, right0], color));

        let edge = color.darken(0.4);
        ops.push(DrawOp::line(left0, left1, edge, 1.0));
        ops.push(DrawOp::line(right0, right1, edge, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use crate::types::Point;

    use super::*;

    #[test]
    fn quad_and_two_edges_per_segment_head_last() {
        let mut liz = Lizard::seeded(Point::new(0.0, 0.0), 1);
        for _ in 0..30 {
            liz.update(400.0, 0.0, 0.016);
        }
        let mut ops = Vec::new();
        paint(&liz, &mut ops);
        assert_eq!(ops.len(), (SEGMENT_COUNT - 1) * 3);

        let head_quad = &ops[ops.len() - 3];
        assert_eq!(head_quad.color(), Some(skin_color_at(0)));
        let tail_quad = &ops[0];
        assert_eq!(tail_quad.color(), Some(skin_color_at(SEGMENT_COUNT - 2)));
        assert_eq!(ops[1].color(), Some(skin_color_at(SEGMENT_COUNT - 2).darken(0.4)));
    }
}
