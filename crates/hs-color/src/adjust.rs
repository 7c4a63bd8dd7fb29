// SPDX-License-Identifier: MIT
//
// Hex-string color operations.
//
// Every function here takes and returns canonical-ish hex strings so the
// palette code can chain them without carrying parse results around. An
// input that does not parse is returned unchanged.

use crate::color::{Rgb, hex_to_hsl, hsl_to_hex, hue_delta, parse_color};

// ─── Blending ────────────────────────────────────────────────────────────────

/// Blend `a` toward `b` by `t` (clamped to [0, 1]), channel by channel.
///
/// Returns `a` unchanged if either side fails to parse.
#[must_use]
pub fn mix(a: &str, b: &str, t: f64) -> String {
    match (parse_color(a), parse_color(b)) {
        (Some(x), Some(y)) => x.mix(y, t).to_hex(),
        _ => a.to_owned(),
    }
}

/// Mix toward white.
#[must_use]
pub fn lighten(hex: &str, t: f64) -> String {
    blend_toward(hex, Rgb::WHITE, t)
}

/// Mix toward black.
#[must_use]
pub fn darken(hex: &str, t: f64) -> String {
    blend_toward(hex, Rgb::BLACK, t)
}

fn blend_toward(hex: &str, target: Rgb, t: f64) -> String {
    parse_color(hex).map_or_else(|| hex.to_owned(), |c| c.mix(target, t).to_hex())
}

// ─── HSL adjustments ─────────────────────────────────────────────────────────

/// Rotate the hue by `delta` degrees.
#[must_use]
pub fn adjust_hue(hex: &str, delta: f64) -> String {
    hex_to_hsl(hex).map_or_else(|| hex.to_owned(), |c| hsl_to_hex(c.h + delta, c.s, c.l))
}

/// Scale saturation by `factor`, clamped to [0, 1].
#[must_use]
pub fn adjust_saturation(hex: &str, factor: f64) -> String {
    hex_to_hsl(hex).map_or_else(
        || hex.to_owned(),
        |c| hsl_to_hex(c.h, (c.s * factor).clamp(0.0, 1.0), c.l),
    )
}

/// Shift lightness by `delta`, clamped to [0, 1].
#[must_use]
pub fn adjust_lightness(hex: &str, delta: f64) -> String {
    hex_to_hsl(hex).map_or_else(
        || hex.to_owned(),
        |c| hsl_to_hex(c.h, c.s, (c.l + delta).clamp(0.0, 1.0)),
    )
}

/// Circular hue distance between two colors, in [0, 180].
#[must_use]
pub fn hue_distance(a: &str, b: &str) -> Option<f64> {
    let a = hex_to_hsl(a)?;
    let b = hex_to_hsl(b)?;
    Some(hue_delta(a.h, b.h))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
