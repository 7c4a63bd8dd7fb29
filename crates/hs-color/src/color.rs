// SPDX-License-Identifier: MIT
//
// Color model: hex strings, RGB bytes and HSL triples.
//
// Single-character names (r, g, b, h, s, l, c, x, m, d) mirror the
// reference HSL formulas.
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline:
//
//   "#rgb" / "#rrggbb" / "rgb(r, g, b)"  →  Rgb  ↔  Hsl
//                                           Rgb  →  "#rrggbb"
//
// HSL → RGB uses the six-sector reconstruction; RGB → HSL picks the hue
// sector from whichever channel is largest. A round trip through HSL lands
// within one step per channel of where it started.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use thiserror::Error;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// A color as three sRGB bytes.
///
/// This is the interchange form: it is what gets parsed out of hex and
/// `rgb()` strings, what the WCAG luminance formula consumes, and what gets
/// formatted back into the canonical `#rrggbb` string.
///
/// ```
/// use hs_color::color::Rgb;
///
/// let blue = Rgb::parse("#1d4ed8").unwrap();
/// assert_eq!(blue, Rgb::new(0x1d, 0x4e, 0xd8));
/// assert_eq!(blue.to_hex(), "#1d4ed8");
/// assert_eq!(Rgb::parse("rgb(29, 78, 216)"), Some(blue));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb` (any case) or `rgb(r, g, b)`.
    ///
    /// Returns `None` for anything else. See [`parse_color`].
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        parse_color(s)
    }

    /// Canonical lowercase `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to the HSL working form.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }

    /// The channels as an array, red first.
    #[inline]
    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Interpolate each channel toward `other`.
    ///
    /// `t` = 0.0 returns `self`, `t` = 1.0 returns `other`; `t` is clamped.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| {
            let a = f64::from(a);
            to_channel_byte((f64::from(b) - a).mul_add(t, a))
        };
        Self::new(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error returned by [`Rgb::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("empty color string")]
    Empty,
    #[error("unrecognized color `{0}` (expected #rgb, #rrggbb or rgb(r, g, b))")]
    Unrecognized(String),
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseColorError::Empty);
        }
        parse_color(s).ok_or_else(|| ParseColorError::Unrecognized(s.to_owned()))
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color in HSL, the form all palette arithmetic happens in.
///
/// - `h`: hue angle in degrees, [0, 360)
/// - `s`: saturation, [0, 1]
/// - `l`: lightness, [0, 1]
///
/// Values are not forced into range on construction; the `with_*` builders
/// and the conversion back to RGB clamp them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.h, self.s, self.l)
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }

    /// Set the hue (normalized to [0, 360)).
    #[inline]
    #[must_use]
    pub fn with_hue(self, h: f64) -> Self {
        Self {
            h: normalize_hue(h),
            ..self
        }
    }

    /// Set the saturation (clamped to [0, 1]).
    #[inline]
    #[must_use]
    pub fn with_saturation(self, s: f64) -> Self {
        Self {
            s: s.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Set the lightness (clamped to [0, 1]).
    #[inline]
    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hsl()
    }
}

// ─── Hex strings ─────────────────────────────────────────────────────────────

/// Parse a color string into RGB bytes.
///
/// Accepts `#rgb`, `#rrggbb` (case-insensitive) and `rgb(r, g, b)` with each
/// channel in [0, 255]. Surrounding whitespace is ignored. Everything else,
/// including bare hex without `#`, yields `None`.
#[must_use]
pub fn parse_color(s: &str) -> Option<Rgb> {
    let s = s.trim();
    if let Some(digits) = s.strip_prefix('#') {
        return parse_hex_digits(digits);
    }
    parse_rgb_function(s)
}

/// Whether `s` is 3- or 6-digit hex, with or without a leading `#`.
#[must_use]
pub fn is_valid_hex(s: &str) -> bool {
    let digits = strip_hash(s.trim());
    matches!(digits.len(), 3 | 6) && digits.bytes().all(|c| c.is_ascii_hexdigit())
}

/// Validate and canonicalize a hex color: expand shorthand, lowercase,
/// prefix with `#`.
///
/// Idempotent: `normalize_hex(&normalize_hex(x)?) == normalize_hex(x)`.
///
/// ```
/// use hs_color::normalize_hex;
///
/// assert_eq!(normalize_hex("#ABC").as_deref(), Some("#aabbcc"));
/// assert_eq!(normalize_hex("1D4ED8").as_deref(), Some("#1d4ed8"));
/// assert_eq!(normalize_hex("not-a-color"), None);
/// ```
#[must_use]
pub fn normalize_hex(s: &str) -> Option<String> {
    if !is_valid_hex(s) {
        return None;
    }
    let digits = strip_hash(s.trim());
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_owned()
    };
    Some(format!("#{}", expanded.to_ascii_lowercase()))
}

/// Format three bytes as `#rrggbb`.
#[must_use]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    Rgb::new(r, g, b).to_hex()
}

/// Parse a color string and convert it to HSL.
#[must_use]
pub fn hex_to_hsl(s: &str) -> Option<Hsl> {
    parse_color(s).map(Rgb::to_hsl)
}

/// Build a canonical hex string from HSL components.
///
/// The hue wraps; saturation and lightness are clamped to [0, 1].
#[must_use]
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    hsl_to_rgb(h, s, l).to_hex()
}

fn strip_hash(s: &str) -> &str {
    s.strip_prefix('#').unwrap_or(s)
}

fn parse_hex_digits(s: &str) -> Option<Rgb> {
    let bytes = s.as_bytes();
    match bytes.len() {
        // rgb
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Rgb::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // rrggbb
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

static RGB_FUNCTION: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^rgb\((\d+),\s*(\d+),\s*(\d+)\)$"));

fn parse_rgb_function(s: &str) -> Option<Rgb> {
    let re = RGB_FUNCTION.as_ref().ok()?;
    let caps = re.captures(s)?;
    // u8 parsing rejects anything above 255.
    let channel = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
    Some(Rgb::new(channel(1)?, channel(2)?, channel(3)?))
}

// ─── Hue arithmetic ──────────────────────────────────────────────────────────

/// Wrap a hue angle into [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    ((h % 360.0) + 360.0) % 360.0
}

/// Circular distance between two hues, in [0, 180].
#[inline]
#[must_use]
pub fn hue_delta(a: f64, b: f64) -> f64 {
    let d = normalize_hue(a - b).abs();
    if d > 180.0 { 360.0 - d } else { d }
}

/// Shortest signed rotation from `from` to `to`, in (-180, 180].
#[inline]
#[must_use]
pub fn signed_hue_delta(from: f64, to: f64) -> f64 {
    let d = normalize_hue(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

// ─── RGB ↔ HSL ───────────────────────────────────────────────────────────────

// The sector is picked by exact comparison against the channel that won
// `max`, so float equality is what we want here.
#[allow(clippy::float_cmp)]
fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h / 6.0 * 360.0, s, l)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = normalize_hue(h);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb::new(
        to_channel_byte((r + m) * 255.0),
        to_channel_byte((g + m) * 255.0),
        to_channel_byte((b + m) * 255.0),
    )
}

/// Round a 0–255 float to the nearest byte (halves round up).
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel_byte(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
