//! Draw stages and their paint order.
//!
//! Each stage lives in its own module and appends `DrawOp`s for one part of
//! the lizard. Stages never read each other's output; the order they run in
//! is the only coupling between them and is declared once in `Stage::ORDER`.

mod belly;
mod body;
mod head;
mod legs;
mod scales;
mod shadow;
mod spots;

use crate::types::DrawOp;

use super::lizard::Lizard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Shadow,
    Body,
    BellyStripe,
    DorsalScales,
    Legs,
    Head,
    Spots,
}

impl Stage {
    /// Back to front: later stages paint over earlier ones.
    pub const ORDER: [Stage; 7] = [
        Stage::Shadow,
        Stage::Body,
        Stage::BellyStripe,
        Stage::DorsalScales,
        Stage::Legs,
        Stage::Head,
        Stage::Spots,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Shadow => "shadow",
            Stage::Body => "body",
            Stage::BellyStripe => "belly_stripe",
            Stage::DorsalScales => "dorsal_scales",
            Stage::Legs => "legs",
            Stage::Head => "head",
            Stage::Spots => "spots",
        }
    }

    pub fn paint(self, lizard: &Lizard, ops: &mut Vec<DrawOp>) {
        match self {
            Stage::Shadow => shadow::paint(lizard, ops),
            Stage::Body => body::paint(lizard, ops),
            Stage::BellyStripe => belly::paint(lizard, ops),
            Stage::DorsalScales => scales::paint(lizard, ops),
            Stage::Legs => legs::paint(lizard, ops),
            Stage::Head => head::paint(lizard, ops),
            Stage::Spots => spots::paint(lizard, ops),
        }
    }
}
