//! Accent/secondary candidate generation and scoring.
//!
//! The pipeline is: generate an explicit list of candidates (family anchor,
//! one theme-menu pattern, five generic harmonies), push every hue at least
//! [`MIN_HUE_DELTA_DEG`] away from the primary and from each other, build
//! concrete colors, score each one with a pure function, and keep the
//! highest score. Ties go to the earliest candidate.

use std::fmt;

use hs_color::{Hsl, hex_to_hsl, hsl_to_hex, hue_delta, normalize_hue, signed_hue_delta};
use tracing::debug;

use crate::classify::{HueBand, Theme, ThemeSettings, Vibe, safe_accent_hue};
use crate::contrast::{TARGET_CONTRAST, ensure_contrast};
use crate::pattern::{self, Harmony};

/// Minimum circular distance between primary, accent and secondary hues.
pub const MIN_HUE_DELTA_DEG: f64 = 40.0;

/// Extra margin so 8-bit rounding of the final hex cannot pull a hue back
/// under [`MIN_HUE_DELTA_DEG`].
const SEPARATION_GUARD_DEG: f64 = 3.0;

/// Hue jitter per `variant % 5`.
const JITTER: [f64; 5] = [0.0, -6.0, 6.0, -4.0, 4.0];

/// Built saturation bounds.
const MIN_SATURATION: f64 = 0.28;
const MAX_SATURATION: f64 = 0.85;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Saturation multiplier and target lightness shared by every candidate,
/// resolved from vibe and theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub saturation: f64,
    pub accent_lightness: f64,
    pub secondary_lightness: f64,
}

impl Envelope {
    #[must_use]
    pub fn new(primary: Hsl, vibe: Vibe, theme: Theme) -> Self {
        let ThemeSettings { base_saturation, accent_band, secondary_band } = theme.settings();
        Self {
            saturation: vibe.saturation_multiplier() * base_saturation,
            accent_lightness: vibe
                .accent_lightness(primary.l)
                .clamp(accent_band.0, accent_band.1),
            secondary_lightness: vibe
                .secondary_lightness(primary.l)
                .clamp(secondary_band.0, secondary_band.1),
        }
    }
}

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// Where a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Safe accent family for the primary's band.
    Family,
    /// A theme menu pattern, by name.
    Menu(&'static str),
    Harmony(Harmony),
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Family => f.write_str("family"),
            Self::Menu(name) => write!(f, "menu:{name}"),
            Self::Harmony(h) => write!(f, "harmony:{}", h.name()),
        }
    }
}

/// One accent/secondary proposal, before colors are built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub source: CandidateSource,
    pub accent_hue: f64,
    pub secondary_hue: f64,
    pub accent_saturation: f64,
    pub secondary_saturation: f64,
    pub accent_lightness: f64,
    pub secondary_lightness: f64,
}

/// Inputs shared by generation and scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inputs {
    pub primary: Hsl,
    pub vibe: Vibe,
    pub theme: Theme,
    pub variant: u32,
}

impl Inputs {
    fn band(&self) -> HueBand {
        HueBand::of(self.primary.h)
    }

    fn jitter(&self) -> f64 {
        JITTER[(self.variant % 5) as usize]
    }

    const fn even_variant(&self) -> bool {
        self.variant % 2 == 0
    }
}

/// Accent anchor for the family candidate. Green-family primaries split the
/// amber target by vibe.
fn family_anchor(band: HueBand, vibe: Vibe) -> f64 {
    if band.is_green_family() {
        if vibe == Vibe::Bold { 32.0 } else { 38.0 }
    } else {
        safe_accent_hue(band)
    }
}

/// Generate every candidate in scoring order, already hue-separated.
#[must_use]
pub fn generate(inputs: &Inputs) -> Vec<Candidate> {
    let p = inputs.primary;
    let band = inputs.band();
    let jitter = inputs.jitter();
    let env = Envelope::new(p, inputs.vibe, inputs.theme);

    let mut out = Vec::with_capacity(2 + Harmony::all().len());

    let secondary_offset = if (60.0..=200.0).contains(&p.h) {
        -18.0
    } else {
        20.0
    };
    out.push(Candidate {
        source: CandidateSource::Family,
        accent_hue: family_anchor(band, inputs.vibe) + jitter,
        secondary_hue: p.h + secondary_offset - jitter / 2.0,
        accent_saturation: env.saturation,
        secondary_saturation: env.saturation * 0.95,
        accent_lightness: env.accent_lightness,
        secondary_lightness: env.secondary_lightness,
    });

    if let Some(pat) = pattern::select(inputs.theme, p.h, inputs.variant) {
        out.push(Candidate {
            source: CandidateSource::Menu(pat.name),
            accent_hue: p.h + pat.accent_offset + jitter,
            secondary_hue: p.h + pat.secondary_offset - jitter / 2.0,
            accent_saturation: env.saturation * pat.accent_saturation,
            secondary_saturation: env.saturation * pat.secondary_saturation,
            accent_lightness: pat.accent_lightness.unwrap_or(env.accent_lightness),
            secondary_lightness: pat.secondary_lightness.unwrap_or(env.secondary_lightness),
        });
    }

    let mirrored = band.is_green_family();
    for &harmony in Harmony::all() {
        let (accent_offset, secondary_offset) = harmony.offsets(mirrored);
        out.push(Candidate {
            source: CandidateSource::Harmony(harmony),
            accent_hue: p.h + accent_offset,
            secondary_hue: p.h + secondary_offset,
            accent_saturation: env.saturation,
            secondary_saturation: env.saturation * 0.95,
            accent_lightness: env.accent_lightness,
            secondary_lightness: env.secondary_lightness,
        });
    }

    for c in &mut out {
        let (accent, secondary) = separate(p.h, c.accent_hue, c.secondary_hue);
        c.accent_hue = accent;
        c.secondary_hue = secondary;
    }
    out
}

// ---------------------------------------------------------------------------
// Separation
// ---------------------------------------------------------------------------

/// Move `h` to the nearest boundary on its own side of `base` if it sits
/// closer than `min`.
fn push_away(base: f64, h: f64, min: f64) -> f64 {
    let h = normalize_hue(h);
    if hue_delta(base, h) >= min {
        return h;
    }
    let side: f64 = if signed_hue_delta(base, h) >= 0.0 {
        1.0
    } else {
        -1.0
    };
    normalize_hue(side.mul_add(min, base))
}

/// Enforce pairwise separation of primary, accent and secondary.
///
/// Returns `(accent, secondary)`, normalized. The accent only moves away
/// from the primary; the secondary yields to both.
#[must_use]
pub fn separate(primary: f64, accent: f64, secondary: f64) -> (f64, f64) {
    let min = MIN_HUE_DELTA_DEG + SEPARATION_GUARD_DEG;
    let accent = push_away(primary, accent, min);
    let mut secondary = push_away(primary, secondary, min);

    if hue_delta(accent, secondary) < min {
        let side: f64 = if signed_hue_delta(accent, secondary) >= 0.0 {
            1.0
        } else {
            -1.0
        };
        let near = normalize_hue(side.mul_add(min, accent));
        // At most one of the two boundaries can land next to the primary.
        secondary = if hue_delta(near, primary) < min {
            normalize_hue((-side).mul_add(min, accent))
        } else {
            near
        };
    }
    (accent, secondary)
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// A candidate with its built colors and score.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub candidate: Candidate,
    pub accent: String,
    pub secondary: String,
    pub score: f64,
}

/// Triangular preference: 1 at `center`, falling to 0 at ± `width`.
fn favor(x: f64, center: f64, width: f64) -> f64 {
    (1.0 - (x - center).abs() / width).max(0.0)
}

/// 1 inside `[lo, hi]`, triangular falloff around its midpoint outside.
fn in_band(l: f64, (lo, hi): (f64, f64)) -> f64 {
    if (lo..=hi).contains(&l) {
        1.0
    } else {
        favor(l, (lo + hi) / 2.0, (hi - lo) / 2.0)
    }
}

/// Weights for accent separations near 150°, 120° and 90°.
fn accent_weights(inputs: &Inputs) -> (f64, f64, f64) {
    if inputs.band().is_green_family() {
        (0.05, 0.15, 0.80)
    } else if inputs.theme.is_subtle() || inputs.vibe == Vibe::Subtle {
        (0.08, 0.48, 0.44)
    } else {
        (0.30, 0.45, 0.25)
    }
}

fn build(h: f64, primary_saturation: f64, multiplier: f64, lightness: f64) -> String {
    let s = (primary_saturation * multiplier).clamp(MIN_SATURATION, MAX_SATURATION);
    hsl_to_hex(h, s, lightness.clamp(0.0, 1.0))
}

/// Known combinations that read as clashing regardless of score.
fn clash_penalty(primary: HueBand, accent: HueBand, secondary: HueBand) -> f64 {
    use HueBand::{Cyan, Green, Magenta, Pink, Red, Violet, WarmGreen};

    let clash = (primary.is_green_family()
        && matches!(accent, Magenta | Violet)
        && matches!(secondary, Red | Pink))
        || (matches!(primary, Red | Pink)
            && matches!(accent, Green | WarmGreen)
            && secondary == Cyan);
    if clash { 1.0 } else { 0.0 }
}

/// Near-complement accents read as loud; only neon and vibrant want them.
fn complement_penalty(theme: Theme, sep_accent: f64) -> f64 {
    if !theme.is_loud() && (sep_accent - 180.0).abs() < 18.0 {
        0.8
    } else {
        0.0
    }
}

/// Build and score one candidate. Pure: no state beyond the arguments.
#[must_use]
pub fn score(inputs: &Inputs, c: &Candidate) -> Scored {
    let p = inputs.primary;
    let settings = inputs.theme.settings();

    let sep_accent = hue_delta(p.h, c.accent_hue);
    let sep_secondary = hue_delta(p.h, c.secondary_hue);
    let sep_pair = hue_delta(c.accent_hue, c.secondary_hue);

    let (w150, w120, w90) = accent_weights(inputs);
    let accent_pref = w150.mul_add(
        favor(sep_accent, 150.0, 60.0),
        w120.mul_add(favor(sep_accent, 120.0, 50.0), w90 * favor(sep_accent, 90.0, 45.0)),
    );
    let secondary_pref = favor(sep_secondary, 30.0, 22.0);
    let pair_pref =
        0.5f64.mul_add(favor(sep_pair, 90.0, 70.0), 0.5 * (1.0 - favor(sep_pair, 180.0, 25.0)));

    let (accent_tweak, secondary_tweak) = if inputs.even_variant() {
        (-0.03, -0.02)
    } else {
        (0.05, 0.04)
    };
    let accent = build(c.accent_hue, p.s, c.accent_saturation + accent_tweak, c.accent_lightness);
    let secondary = build(
        c.secondary_hue,
        p.s,
        (c.secondary_saturation + secondary_tweak).max(0.75),
        c.secondary_lightness,
    );

    // Penalties look at the built colors, after 8-bit rounding.
    let built_accent = hex_to_hsl(&accent).unwrap_or(Hsl::new(c.accent_hue, 0.0, 0.0));
    let built_secondary = hex_to_hsl(&secondary).unwrap_or(Hsl::new(c.secondary_hue, 0.0, 0.0));

    let mut saturation_penalty = 0.0;
    if built_accent.s > 0.85 && built_secondary.s > 0.75 {
        saturation_penalty += 0.6;
    }
    if built_accent.s > 0.9 || built_secondary.s > 0.9 {
        saturation_penalty += 0.4;
    }

    let accent_l_pref = in_band(built_accent.l, settings.accent_band);
    let secondary_l_pref = in_band(built_secondary.l, settings.secondary_band);

    let complement = complement_penalty(inputs.theme, sep_accent);

    let clash = clash_penalty(
        inputs.band(),
        HueBand::of(c.accent_hue),
        HueBand::of(c.secondary_hue),
    );

    let total = 2.2 * accent_pref
        + 1.6 * secondary_pref
        + pair_pref
        + 0.6 * accent_l_pref
        + 0.5 * secondary_l_pref
        - saturation_penalty
        - complement
        - clash;

    Scored { candidate: *c, accent, secondary, score: total }
}

/// Highest score wins; on a tie the earlier entry is kept.
#[must_use]
pub fn select_best<I: IntoIterator<Item = Scored>>(scored: I) -> Option<Scored> {
    let mut iter = scored.into_iter();
    let mut best = iter.next()?;
    for s in iter {
        if s.score > best.score {
            best = s;
        }
    }
    Some(best)
}

/// Whether the hues of three built colors are pairwise at least
/// [`MIN_HUE_DELTA_DEG`] apart. Unparsable colors count as not separated.
fn hues_separated(primary: f64, accent: &str, secondary: &str) -> bool {
    match (hex_to_hsl(accent), hex_to_hsl(secondary)) {
        (Some(a), Some(s)) => {
            hue_delta(primary, a.h) >= MIN_HUE_DELTA_DEG
                && hue_delta(primary, s.h) >= MIN_HUE_DELTA_DEG
                && hue_delta(a.h, s.h) >= MIN_HUE_DELTA_DEG
        }
        _ => false,
    }
}

/// Generate, score and select, then enforce contrast of both colors
/// against `background`.
///
/// Enforcement can drive a color to black or white, where its hue is gone.
/// When that breaks hue separation, the enforced colors are dropped one at
/// a time in favor of the built ones, secondary first.
///
/// Returns `(accent, secondary)`.
#[must_use]
pub fn accent_and_secondary(inputs: &Inputs, background: &str) -> (String, String) {
    let scored = generate(inputs).into_iter().map(|c| {
        let s = score(inputs, &c);
        debug!(
            source = %s.candidate.source,
            accent_hue = s.candidate.accent_hue,
            secondary_hue = s.candidate.secondary_hue,
            score = s.score,
            "scored candidate"
        );
        s
    });

    let Some(best) = select_best(scored.collect::<Vec<_>>()) else {
        // Only reachable with an empty candidate list.
        let fallback = hsl_to_hex(inputs.primary.h, inputs.primary.s, inputs.primary.l);
        return (fallback.clone(), fallback);
    };
    debug!(
        source = %best.candidate.source,
        accent = %best.accent,
        secondary = %best.secondary,
        score = best.score,
        "selected candidate"
    );

    let accent = ensure_contrast(&best.accent, background, TARGET_CONTRAST);
    let secondary = ensure_contrast(&best.secondary, background, TARGET_CONTRAST);
    let h = inputs.primary.h;
    if hues_separated(h, &accent, &secondary) {
        return (accent, secondary);
    }
    debug!(accent = %accent, secondary = %secondary, "enforced colors lost hue separation");
    if hues_separated(h, &accent, &best.secondary) {
        (accent, best.secondary)
    } else if hues_separated(h, &best.accent, &secondary) {
        (best.accent, secondary)
    } else {
        (best.accent, best.secondary)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
