use crate::color::hex;
use crate::config::SEGMENT_COUNT;
use crate::engine::lizard::Lizard;
use crate::engine::profile::width_at;
use crate::types::{Color, DrawOp, Point};

const SHADOW: Color = hex(0x060400);
/// Light comes from the upper left.
const OFFSET: Point = Point::new(5.0, 12.0);

/// Soft ellipses under the belly, every fourth segment.
pub fn paint(lizard: &Lizard, ops: &mut Vec<DrawOp>) {
    for i in (5..SEGMENT_COUNT - 10).step_by(4) {
        let w = width_at(i);
        ops.push(DrawOp::oval(lizard.segment(i) + OFFSET, w * 1.8, w * 0.5, SHADOW));
    }
}
