use crate::color::hex;
use crate::config::SEGMENT_COUNT;
use crate::engine::lizard::Lizard;
use crate::types::DrawOp;

/// Pale stripe along the spine, a wide pass under a thin highlight.
pub fn paint(lizard: &Lizard, ops: &mut Vec<DrawOp>) {
    let points = lizard.spine()[5..SEGMENT_COUNT - 5].to_vec();
    if points.len() < 2 {
        return;
    }
    ops.push(DrawOp::smooth_line(points.clone(), hex(0xc8d898), 3.0));
    ops.push(DrawOp::smooth_line(points, hex(0xe0eaaa), 1.0));
}
