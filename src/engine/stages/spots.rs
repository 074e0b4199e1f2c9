use crate::config::SEGMENT_COUNT;
use crate::engine::lizard::Lizard;
use crate::engine::profile::{skin_color_at, width_at};
use crate::types::DrawOp;

/// Segments carrying a spot, in paint order.
pub const SPOT_SEGMENTS: [usize; 6] = [12, 16, 20, 25, 30, 18];

/// Two-tone spots, alternating left / centre / right of the spine.
pub fn paint(lizard: &Lizard, ops: &mut Vec<DrawOp>) {
    for (k, &i) in SPOT_SEGMENTS.iter().enumerate() {
        if i >= SEGMENT_COUNT {
            continue;
        }
        let w = width_at(i);
        let lateral = ((k % 3) as f64 - 1.0) * w * 0.5;
        let centre = lizard.segment(i) + lizard.normal_at(i) * lateral;
        let r = w * 1.1;
        let skin = skin_color_at(i);

        ops.push(DrawOp::oval(centre, r, r * 0.7, skin.darken(0.15)));
        ops.push(DrawOp::oval(centre, r * 0.5, r * 0.35, skin.lighten(0.2)));
    }
}
