// SPDX-License-Identifier: MIT
//
// hs-color: color parsing, normalization and HSL/RGB math for huesmith.
//
// The palette engine works on three representations of the same color:
//
//   "#rrggbb"  canonical form, what every public API hands back
//   Rgb        interchange form, three bytes
//   Hsl        working form, h in [0, 360), s and l in [0, 1]
//
// Every string that enters the engine goes through `parse_color` or
// `normalize_hex` first. Neither of them panics: garbage in yields `None`,
// and the caller picks a documented fallback. The hex-string helpers in
// `adjust` follow the same rule and hand their input back untouched when
// it cannot be parsed.

pub mod adjust;
pub mod color;

pub use adjust::{
    adjust_hue, adjust_lightness, adjust_saturation, darken, hue_distance, lighten, mix,
};
pub use color::{
    Hsl, ParseColorError, Rgb, hex_to_hsl, hsl_to_hex, hue_delta, is_valid_hex, normalize_hex,
    normalize_hue, parse_color, rgb_to_hex, signed_hue_delta,
};
