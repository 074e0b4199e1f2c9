//! Colour utilities: hex conversion, linear blending, darken and lighten.
//!
//! All operations work on 8-bit channels. Intermediate maths happens in
//! `f64`; results are clamped to `[0, 255]` and rounded to the nearest
//! integer on the way back.

use anyhow::{Context, Result, ensure};

use crate::types::Color;

const BLACK: Color = Color::rgb(0, 0, 0);
const WHITE: Color = Color::rgb(255, 255, 255);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        ensure!(
            digits.len() == 6 && digits.is_ascii(),
            "expected a 6-digit hex colour, got {hex:?}"
        );
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .with_context(|| format!("invalid hex colour {hex:?}"))
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Build a colour from unbounded channel values.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Color::rgb(to_channel(r), to_channel(g), to_channel(b))
    }

    /// Lower-case `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Per-channel linear interpolation: `t = 0` gives `self`, `t = 1`
    /// gives `other`. `t` outside `[0, 1]` extrapolates and is clamped.
    pub fn blend(self, other: Color, t: f64) -> Self {
        let lerp = |a: u8, b: u8| a as f64 + (b as f64 - a as f64) * t;
        Color::from_channels(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }

    /// Move toward black by `amount`.
    pub fn darken(self, amount: f64) -> Self {
        self.blend(BLACK, amount)
    }

    /// Move toward white by `amount`.
    pub fn lighten(self, amount: f64) -> Self {
        self.blend(WHITE, amount)
    }
}

fn to_channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// `#rrggbb` → `(r, g, b)`.
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8)> {
    let c = Color::from_hex(hex)?;
    Ok((c.r, c.g, c.b))
}

/// `(r, g, b)` → `#rrggbb`, clamping each channel to `[0, 255]`.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    Color::from_channels(r, g, b).to_hex()
}

/// Hex literal for colour tables: `hex(0x5a7a3a)`.
pub const fn hex(v: u32) -> Color {
    Color::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
}
