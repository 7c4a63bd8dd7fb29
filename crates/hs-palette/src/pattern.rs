//! Hue-offset patterns: curated theme menus and generic harmonies.
//!
//! A pattern places the accent and secondary hues relative to the primary.
//! Theme menus are hand-tuned and gated by the primary's hue band; the
//! generic harmonies apply to every primary and act as the fallback pool.

use serde::Serialize;

use crate::classify::{HueBand, Theme};

// ---------------------------------------------------------------------------
// Theme menus
// ---------------------------------------------------------------------------

/// Which primary hue bands a pattern applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bands {
    Any,
    GreenFamily,
    NonGreen,
    Only(&'static [HueBand]),
}

impl Bands {
    #[must_use]
    pub fn contains(self, band: HueBand) -> bool {
        match self {
            Self::Any => true,
            Self::GreenFamily => band.is_green_family(),
            Self::NonGreen => !band.is_green_family(),
            Self::Only(list) => list.contains(&band),
        }
    }
}

/// A curated accent/secondary placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pattern {
    pub name: &'static str,
    /// Secondary hue offset from the primary, degrees.
    pub secondary_offset: f64,
    /// Accent hue offset from the primary, degrees.
    pub accent_offset: f64,
    /// Scales the vibe × theme saturation multiplier for the accent.
    pub accent_saturation: f64,
    /// Scales the vibe × theme saturation multiplier for the secondary.
    pub secondary_saturation: f64,
    /// Replaces the envelope's accent lightness when set.
    pub accent_lightness: Option<f64>,
    /// Replaces the envelope's secondary lightness when set.
    pub secondary_lightness: Option<f64>,
    pub bands: Bands,
}

const WARM_BANDS: &[HueBand] = &[HueBand::Red, HueBand::Orange, HueBand::Yellow];
const COOL_BANDS: &[HueBand] = &[
    HueBand::Blue, HueBand::Indigo, HueBand::Violet, HueBand::Magenta, HueBand::Pink,
];
const BLUE_VIOLET_BANDS: &[HueBand] = &[HueBand::Blue, HueBand::Indigo, HueBand::Violet];
const SUNSET_BANDS: &[HueBand] = &[
    HueBand::Red, HueBand::Orange, HueBand::Yellow, HueBand::Magenta, HueBand::Pink,
];

#[allow(clippy::too_many_arguments)]
const fn pattern(
    name: &'static str,
    secondary_offset: f64,
    accent_offset: f64,
    accent_saturation: f64,
    secondary_saturation: f64,
    accent_lightness: Option<f64>,
    secondary_lightness: Option<f64>,
    bands: Bands,
) -> Pattern {
    Pattern {
        name,
        secondary_offset,
        accent_offset,
        accent_saturation,
        secondary_saturation,
        accent_lightness,
        secondary_lightness,
        bands,
    }
}

const EARTHY: &[Pattern] = &[
    pattern("sage-clay", 28.0, -100.0, 0.9, 0.85, Some(0.52), Some(0.58), Bands::GreenFamily),
    pattern("ochre-moss", -30.0, 95.0, 0.95, 0.9, None, None, Bands::Only(WARM_BANDS)),
    pattern("dusk-terracotta", 32.0, 140.0, 0.9, 0.85, Some(0.54), None, Bands::Any),
];

const PASTEL: &[Pattern] = &[
    pattern("sorbet", 35.0, 120.0, 1.0, 0.95, Some(0.74), Some(0.78), Bands::Any),
    pattern("mint-peach", -30.0, -105.0, 0.95, 0.9, None, None, Bands::GreenFamily),
    pattern("lilac-haze", 30.0, 90.0, 1.0, 1.0, Some(0.72), None, Bands::Only(COOL_BANDS)),
];

const NEON: &[Pattern] = &[
    pattern("electric-split", 40.0, 150.0, 1.1, 1.0, Some(0.52), Some(0.56), Bands::Any),
    pattern("acid-pop", -40.0, -90.0, 1.15, 1.0, None, None, Bands::GreenFamily),
    pattern("laser-triad", 45.0, 120.0, 1.1, 1.05, None, None, Bands::NonGreen),
];

const MUTED: &[Pattern] = &[
    pattern("slate-analog", 30.0, 120.0, 0.9, 0.85, None, None, Bands::Any),
    pattern("quiet-amber", 30.0, -100.0, 0.85, 0.8, Some(0.56), None, Bands::GreenFamily),
    pattern("fog-square", -30.0, 90.0, 0.9, 0.85, None, None, Bands::Only(BLUE_VIOLET_BANDS)),
];

const VINTAGE: &[Pattern] = &[
    pattern("faded-poster", 25.0, 135.0, 0.85, 0.8, Some(0.55), Some(0.6), Bands::Any),
    pattern("mustard-teal", -28.0, -110.0, 0.9, 0.85, None, None, Bands::GreenFamily),
];

const MONOCHROME: &[Pattern] = &[
    pattern("ink-wash", 45.0, 100.0, 0.6, 0.5, Some(0.56), Some(0.6), Bands::Any),
];

const VIBRANT: &[Pattern] = &[
    pattern("candy-triad", 35.0, 120.0, 1.1, 1.0, None, None, Bands::Any),
    pattern("citrus-pop", -35.0, -95.0, 1.1, 1.0, None, None, Bands::GreenFamily),
    pattern("sunset-split", 30.0, 150.0, 1.05, 1.0, None, None, Bands::Only(SUNSET_BANDS)),
];

/// The full curated menu for a theme, in declaration order.
#[must_use]
pub const fn menu(theme: Theme) -> &'static [Pattern] {
    match theme {
        Theme::Earthy => EARTHY,
        Theme::Pastel => PASTEL,
        Theme::Neon => NEON,
        Theme::Muted => MUTED,
        Theme::Vintage => VINTAGE,
        Theme::Monochrome => MONOCHROME,
        Theme::Vibrant => VIBRANT,
    }
}

/// Menu entries that apply to a primary in `band`.
#[must_use]
pub fn applicable(theme: Theme, band: HueBand) -> Vec<&'static Pattern> {
    menu(theme).iter().filter(|p| p.bands.contains(band)).collect()
}

/// Pick one applicable pattern for this primary hue and variant.
///
/// The index is `(variant + ⌊hue / 30⌋) mod n`, so neighbouring primaries and
/// successive variants walk through the menu.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn select(theme: Theme, hue: f64, variant: u32) -> Option<&'static Pattern> {
    let choices = applicable(theme, HueBand::of(hue));
    if choices.is_empty() {
        return None;
    }
    // hue is in [0, 360), so the sector fits in 0..12.
    let sector = (hs_color::normalize_hue(hue) / 30.0).floor() as u64;
    let index = (u64::from(variant) + sector) % choices.len() as u64;
    choices.get(index as usize).copied()
}

// ---------------------------------------------------------------------------
// Generic harmonies
// ---------------------------------------------------------------------------

/// Fixed-offset fallback placements tried for every primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Harmony {
    SplitComplement,
    Triadic,
    Analogous,
    Square,
    SoftComplement,
}

impl Harmony {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SplitComplement => "split-complement",
            Self::Triadic => "triadic",
            Self::Analogous => "analogous",
            Self::Square => "square",
            Self::SoftComplement => "soft-complement",
        }
    }

    /// Generation order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::SplitComplement,
            Self::Triadic,
            Self::Analogous,
            Self::Square,
            Self::SoftComplement,
        ]
    }

    /// `(accent_offset, secondary_offset)` in degrees.
    ///
    /// Green-family primaries get both offsets mirrored so the accent swings
    /// toward warm hues instead of violet.
    #[must_use]
    pub const fn offsets(self, mirrored: bool) -> (f64, f64) {
        let (accent, secondary) = match self {
            Self::SplitComplement => (150.0, 30.0),
            Self::Triadic => (120.0, 30.0),
            Self::Analogous => (40.0, -35.0),
            Self::Square => (90.0, 30.0),
            Self::SoftComplement => (180.0, 30.0),
        };
        if mirrored {
            (-accent, -secondary)
        } else {
            (accent, secondary)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
