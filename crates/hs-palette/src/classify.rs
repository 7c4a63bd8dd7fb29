//! Classification: hue bands, vibes and themes.
//!
//! Everything downstream branches on these three closed enums instead of
//! free strings. Vibe and theme come from ordered keyword rules: the first
//! rule that matches wins, so the order of the tables below is part of the
//! behavior.

use std::fmt;
use std::str::FromStr;

use hs_color::{hex_to_hsl, normalize_hue};
use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// HueBand
// ---------------------------------------------------------------------------

/// One of 11 fixed sectors of the hue wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HueBand {
    /// [345, 15)
    Red,
    /// [15, 45)
    Orange,
    /// [45, 75)
    Yellow,
    /// [75, 105)
    WarmGreen,
    /// [105, 150)
    Green,
    /// [150, 190)
    Cyan,
    /// [190, 250)
    Blue,
    /// [250, 275)
    Indigo,
    /// [275, 305)
    Violet,
    /// [305, 335)
    Magenta,
    /// [335, 345)
    Pink,
}

/// Upper bound (exclusive) of each band after red, in wheel order.
const BAND_ENDS: [(f64, HueBand); 10] = [
    (45.0, HueBand::Orange),
    (75.0, HueBand::Yellow),
    (105.0, HueBand::WarmGreen),
    (150.0, HueBand::Green),
    (190.0, HueBand::Cyan),
    (250.0, HueBand::Blue),
    (275.0, HueBand::Indigo),
    (305.0, HueBand::Violet),
    (335.0, HueBand::Magenta),
    (345.0, HueBand::Pink),
];

impl HueBand {
    /// The band containing hue `h` (any angle; it is wrapped first).
    #[must_use]
    pub fn of(h: f64) -> Self {
        let h = normalize_hue(h);
        if !(15.0..345.0).contains(&h) {
            return Self::Red;
        }
        BAND_ENDS
            .iter()
            .find(|(end, _)| h < *end)
            .map_or(Self::Red, |&(_, band)| band)
    }

    /// Band of a color string, `None` if it does not parse.
    #[must_use]
    pub fn of_color(hex: &str) -> Option<Self> {
        hex_to_hsl(hex).map(|c| Self::of(c.h))
    }

    /// Warm-green, green and cyan. These primaries get warm accents.
    #[must_use]
    pub const fn is_green_family(self) -> bool {
        matches!(self, Self::WarmGreen | Self::Green | Self::Cyan)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::WarmGreen => "warm-green",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Violet => "violet",
            Self::Magenta => "magenta",
            Self::Pink => "pink",
        }
    }

    /// All bands in wheel order starting at red.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Red, Self::Orange, Self::Yellow, Self::WarmGreen,
            Self::Green, Self::Cyan, Self::Blue, Self::Indigo,
            Self::Violet, Self::Magenta, Self::Pink,
        ]
    }
}

impl fmt::Display for HueBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a color sits in the green family or the blue band.
#[must_use]
pub fn is_green_or_blue_family(hex: &str) -> bool {
    HueBand::of_color(hex).is_some_and(|b| b.is_green_family() || b == HueBand::Blue)
}

/// The accent hue that reads well against a primary in `band`.
///
/// Green family → amber (36°), blue → magenta (310°), yellow → blue (220°),
/// every other band → teal (200°).
#[must_use]
pub const fn safe_accent_hue(band: HueBand) -> f64 {
    match band {
        HueBand::WarmGreen | HueBand::Green | HueBand::Cyan => 36.0,
        HueBand::Blue => 310.0,
        HueBand::Yellow => 220.0,
        HueBand::Red
        | HueBand::Orange
        | HueBand::Indigo
        | HueBand::Violet
        | HueBand::Magenta
        | HueBand::Pink => 200.0,
    }
}

// ---------------------------------------------------------------------------
// Vibe and Theme
// ---------------------------------------------------------------------------

/// Error returned when parsing a [`Vibe`] or [`Theme`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{name}`")]
pub struct ParseKindError {
    kind: &'static str,
    name: String,
}

/// Stylistic intensity inferred from tone tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    Subtle,
    Balanced,
    Bold,
}

impl Vibe {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Subtle => "subtle",
            Self::Balanced => "balanced",
            Self::Bold => "bold",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Subtle, Self::Balanced, Self::Bold]
    }

    /// Saturation multiplier applied before theme scaling.
    #[must_use]
    pub const fn saturation_multiplier(self) -> f64 {
        match self {
            Self::Bold => 1.15,
            Self::Subtle => 0.9,
            Self::Balanced => 1.0,
        }
    }

    /// Target accent lightness for a primary of lightness `l`.
    #[must_use]
    pub fn accent_lightness(self, l: f64) -> f64 {
        match self {
            Self::Bold => l.clamp(0.45, 0.58),
            Self::Subtle => (l + 0.06).clamp(0.56, 0.66),
            Self::Balanced => (l + 0.04).clamp(0.5, 0.62),
        }
    }

    /// Target secondary lightness for a primary of lightness `l`.
    #[must_use]
    pub fn secondary_lightness(self, l: f64) -> f64 {
        match self {
            Self::Bold => (l + 0.06).clamp(0.5, 0.65),
            Self::Subtle => (l + 0.08).clamp(0.58, 0.7),
            Self::Balanced => (l + 0.07).clamp(0.52, 0.68),
        }
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Vibe {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find_by_name(Self::all(), s, Self::name).ok_or_else(|| ParseKindError {
            kind: "vibe",
            name: s.to_owned(),
        })
    }
}

/// Aesthetic family inferred from tags and industry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Earthy,
    Pastel,
    Neon,
    Muted,
    Vintage,
    Monochrome,
    Vibrant,
}

/// Per-theme tuning for accent/secondary construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSettings {
    /// Multiplies the vibe's saturation multiplier.
    pub base_saturation: f64,
    /// Accent lightness band, inclusive.
    pub accent_band: (f64, f64),
    /// Secondary lightness band, inclusive.
    pub secondary_band: (f64, f64),
}

impl Theme {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Earthy => "earthy",
            Self::Pastel => "pastel",
            Self::Neon => "neon",
            Self::Muted => "muted",
            Self::Vintage => "vintage",
            Self::Monochrome => "monochrome",
            Self::Vibrant => "vibrant",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Earthy, Self::Pastel, Self::Neon, Self::Muted,
            Self::Vintage, Self::Monochrome, Self::Vibrant,
        ]
    }

    #[must_use]
    pub const fn settings(self) -> ThemeSettings {
        let (base_saturation, accent_band, secondary_band) = match self {
            Self::Earthy => (0.95, (0.5, 0.6), (0.52, 0.66)),
            Self::Pastel => (0.7, (0.68, 0.78), (0.7, 0.82)),
            Self::Neon | Self::Vibrant => (1.12, (0.48, 0.56), (0.5, 0.6)),
            Self::Muted => (0.85, (0.52, 0.64), (0.54, 0.66)),
            Self::Vintage => (0.9, (0.5, 0.62), (0.54, 0.66)),
            Self::Monochrome => (0.6, (0.5, 0.65), (0.52, 0.68)),
        };
        ThemeSettings { base_saturation, accent_band, secondary_band }
    }

    /// Themes that avoid loud, complement-heavy accents.
    #[must_use]
    pub const fn is_subtle(self) -> bool {
        !self.is_loud()
    }

    /// Neon and vibrant: the only themes allowed near-complement accents.
    #[must_use]
    pub const fn is_loud(self) -> bool {
        matches!(self, Self::Neon | Self::Vibrant)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find_by_name(Self::all(), s, Self::name).ok_or_else(|| ParseKindError {
            kind: "theme",
            name: s.to_owned(),
        })
    }
}

fn find_by_name<T: Copy>(all: &[T], s: &str, name: fn(T) -> &'static str) -> Option<T> {
    let lower = s.trim().to_ascii_lowercase();
    all.iter().copied().find(|&v| name(v) == lower)
}

// ---------------------------------------------------------------------------
// Keyword rules
// ---------------------------------------------------------------------------

const BOLD_TAGS: &[&str] = &[
    "bold", "vibrant", "energetic", "playful", "innovative", "disruptive", "confident",
];
const SUBTLE_TAGS: &[&str] = &[
    "calm", "trustworthy", "minimal", "minimalist", "refined", "elegant", "soft", "approachable",
];

/// Checked in order; bold outranks subtle.
const VIBE_RULES: &[(&[&str], Vibe)] = &[(BOLD_TAGS, Vibe::Bold), (SUBTLE_TAGS, Vibe::Subtle)];

/// A theme rule matches when any tag equals one of `tags` or the industry
/// contains one of `industries`.
struct ThemeRule {
    theme: Theme,
    tags: &'static [&'static str],
    industries: &'static [&'static str],
}

/// Checked in order; the first match wins, [`Theme::Muted`] otherwise.
const THEME_RULES: &[ThemeRule] = &[
    ThemeRule {
        theme: Theme::Earthy,
        tags: &["earthy", "grounded", "organic", "natural", "warm", "rustic"],
        industries: &["outdoor", "outdoors", "wellness", "sustainability", "green", "agriculture"],
    },
    ThemeRule {
        theme: Theme::Pastel,
        tags: &["pastel", "gentle", "soft", "friendly", "approachable", "calm"],
        industries: &[],
    },
    ThemeRule {
        theme: Theme::Neon,
        tags: &["neon", "edgy", "youthful", "street", "bold", "electric"],
        industries: &["gaming", "streetwear", "music", "festival"],
    },
    ThemeRule {
        theme: Theme::Vintage,
        tags: &["vintage", "heritage", "classic", "retro", "timeless"],
        industries: &["craft", "heritage", "artisan"],
    },
    ThemeRule {
        theme: Theme::Monochrome,
        tags: &["monochrome", "mono", "black", "white", "grayscale"],
        industries: &[],
    },
    ThemeRule {
        theme: Theme::Muted,
        tags: &["muted", "minimal", "professional", "understated", "subtle"],
        industries: &["finance", "legal", "enterprise", "b2b"],
    },
    ThemeRule {
        theme: Theme::Vibrant,
        tags: &["vibrant", "playful", "energetic", "lively"],
        industries: &["startup", "tech", "saas", "ecommerce"],
    },
];

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

fn has_any_tag(tags: &[String], keys: &[&str]) -> bool {
    tags.iter().any(|t| keys.contains(&t.as_str()))
}

/// Infer the vibe from tone tags (matched exactly, case-insensitive).
#[must_use]
pub fn vibe_from_tone<S: AsRef<str>>(tags: &[S]) -> Vibe {
    let tags: Vec<String> = tags.iter().map(|t| normalize_tag(t.as_ref())).collect();
    VIBE_RULES
        .iter()
        .find(|(keys, _)| has_any_tag(&tags, keys))
        .map_or(Vibe::Balanced, |&(_, vibe)| vibe)
}

/// Infer the theme from tone tags (exact) and industry (substring).
#[must_use]
pub fn theme_from_context<S: AsRef<str>>(tags: &[S], industry: &str) -> Theme {
    let tags: Vec<String> = tags.iter().map(|t| normalize_tag(t.as_ref())).collect();
    let industry = industry.to_lowercase();
    THEME_RULES
        .iter()
        .find(|rule| {
            has_any_tag(&tags, rule.tags) || rule.industries.iter().any(|k| industry.contains(k))
        })
        .map_or(Theme::Muted, |rule| rule.theme)
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Qualitative input to every derivation.
///
/// `variant` is the only source of controlled diversity: it picks among
/// equivalent patterns and applies small hue jitter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    /// Tone tags, trimmed and lowercased.
    pub tags: Vec<String>,
    pub industry: String,
    pub variant: u32,
}

impl Context {
    pub fn new<I, S>(tags: I, industry: impl Into<String>, variant: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|t| normalize_tag(t.as_ref()))
                .filter(|t| !t.is_empty())
                .collect(),
            industry: industry.into(),
            variant,
        }
    }

    /// Same tags and industry, different variant.
    #[must_use]
    pub fn with_variant(&self, variant: u32) -> Self {
        Self { variant, ..self.clone() }
    }

    #[must_use]
    pub fn vibe(&self) -> Vibe {
        vibe_from_tone(&self.tags)
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        theme_from_context(&self.tags, &self.industry)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
