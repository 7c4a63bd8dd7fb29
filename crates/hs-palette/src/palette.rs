//! Light-mode role derivation: the bridge from candidates to a full palette.
//!
//! Accent and secondary come from [`candidate`]; neutrals are tinted from
//! the *background*, not the primary, so they sit quietly behind content.
//! Every output color is contrast-enforced against the background.

use hs_color::{
    Hsl, adjust_hue, adjust_lightness, adjust_saturation, darken, hex_to_hsl, hsl_to_hex, lighten,
    normalize_hue, parse_color,
};
use serde::Serialize;
use tracing::instrument;

use crate::candidate::{self, Inputs};
use crate::classify::{Context, HueBand, Theme};
use crate::contrast::{
    TARGET_CONTRAST, best_text_on, ensure_contrast, prefers_dark_text, ratio_or_zero,
};

/// Substitute for an unparsable primary.
pub const DEFAULT_PRIMARY: &str = "#1d4ed8";
/// Substitute for a missing or unparsable background.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

// ---------------------------------------------------------------------------
// Role sets
// ---------------------------------------------------------------------------

/// The four roles derived by [`derive_extended_roles_aesthetic`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedRoles {
    pub accent: String,
    pub secondary: String,
    pub neutral_light: String,
    pub neutral_dark: String,
}

/// Every light-mode role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LightRoles {
    pub primary: String,
    pub background: String,
    pub text: String,
    pub link: String,
    pub accent: String,
    pub secondary: String,
    pub neutral_light: String,
    pub neutral_dark: String,
    pub on_primary: String,
}

// ---------------------------------------------------------------------------
// Input normalization
// ---------------------------------------------------------------------------

/// Canonical primary hex plus its HSL, falling back to [`DEFAULT_PRIMARY`].
pub(crate) fn resolve_primary(primary: &str) -> (String, Hsl) {
    let rgb = parse_color(primary)
        .or_else(|| parse_color(DEFAULT_PRIMARY))
        .unwrap_or_default();
    (rgb.to_hex(), rgb.to_hsl())
}

/// Canonical background hex, falling back to [`DEFAULT_BACKGROUND`].
pub(crate) fn resolve_background(background: Option<&str>) -> String {
    background
        .and_then(parse_color)
        .map_or_else(|| DEFAULT_BACKGROUND.to_owned(), |c| c.to_hex())
}

// ---------------------------------------------------------------------------
// Extended roles
// ---------------------------------------------------------------------------

/// Derive accent, secondary and the two neutrals.
///
/// Pure: identical arguments always produce identical colors.
#[must_use]
pub fn derive_extended_roles_aesthetic(
    primary: &str,
    background: Option<&str>,
    ctx: &Context,
) -> ExtendedRoles {
    let (_, p) = resolve_primary(primary);
    let bg = resolve_background(background);
    let theme = ctx.theme();

    let inputs = Inputs { primary: p, vibe: ctx.vibe(), theme, variant: ctx.variant };
    let (accent, secondary) = candidate::accent_and_secondary(&inputs, &bg);
    let (neutral_light, neutral_dark) = light_neutrals(&bg, theme, HueBand::of(p.h));

    ExtendedRoles { accent, secondary, neutral_light, neutral_dark }
}

/// Hue and saturation for neutrals tinted from `base`.
fn neutral_tint(base: Hsl, theme: Theme, primary_band: HueBand) -> (f64, f64) {
    let mut h = base.h;
    let mut s = base.s.clamp(0.0, 0.15);

    match theme {
        Theme::Earthy | Theme::Vintage => {
            h = normalize_hue(h + 10.0);
            s = (s + 0.03).clamp(0.05, 0.12);
        }
        Theme::Pastel => s = s.min(0.08),
        Theme::Neon | Theme::Vibrant => s = s.clamp(0.06, 0.15),
        Theme::Monochrome => s = 0.0,
        Theme::Muted => s = s.min(0.1),
    }
    // Green-family primaries already carry plenty of hue; keep neutrals gray.
    if primary_band.is_green_family() {
        s = s.min(0.06);
    }
    (h, s)
}

/// Background-tinted neutral pair, both enforced against `bg`.
fn light_neutrals(bg: &str, theme: Theme, primary_band: HueBand) -> (String, String) {
    let base = hex_to_hsl(bg).unwrap_or(Hsl::new(0.0, 0.0, 1.0));
    let (h, s) = neutral_tint(base, theme, primary_band);

    let light = hsl_to_hex(h, s, (base.l + 0.06).min(1.0));
    let dark = hsl_to_hex(h, s, (base.l - 0.78).max(0.0));
    (
        ensure_contrast(&light, bg, TARGET_CONTRAST),
        ensure_contrast(&dark, bg, TARGET_CONTRAST),
    )
}

// ---------------------------------------------------------------------------
// Link
// ---------------------------------------------------------------------------

/// How hard to push a link toward its contrast target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LinkTuning {
    pub target: f64,
    pub step: f64,
    pub max_steps: usize,
}

/// Light-palette link: 4.5:1 in at most 6 steps of 0.08.
pub(crate) const LIGHT_LINK: LinkTuning = LinkTuning { target: 4.5, step: 0.08, max_steps: 6 };

/// Link derived from the primary: a little more saturated, pushed toward
/// the readable side of `bg`, hue shifted −8°, then walked toward black or
/// white until it reaches the target.
pub(crate) fn derive_link(primary: &str, bg: &str, tuning: LinkTuning) -> String {
    let dark_text = prefers_dark_text(bg);

    let mut link = adjust_saturation(primary, 1.15);
    link = adjust_lightness(&link, if dark_text { -0.12 } else { 0.12 });
    link = adjust_hue(&link, -8.0);

    let mut steps = 0;
    while ratio_or_zero(&link, bg) < tuning.target && steps < tuning.max_steps {
        link = if dark_text {
            darken(&link, tuning.step)
        } else {
            lighten(&link, tuning.step)
        };
        steps += 1;
    }

    if link.eq_ignore_ascii_case(primary) {
        link = darken(&link, 0.15);
    }
    link
}

// ---------------------------------------------------------------------------
// Full light palette
// ---------------------------------------------------------------------------

/// Derive every light-mode role from a primary, optional background and
/// context.
#[must_use]
#[instrument(level = "debug", skip_all, fields(primary = %primary, variant = ctx.variant))]
pub fn derive_light_roles(primary: &str, background: Option<&str>, ctx: &Context) -> LightRoles {
    let (primary, _) = resolve_primary(primary);
    let background = resolve_background(background);

    let text = best_text_on(&background).to_owned();
    let link = derive_link(&primary, &background, LIGHT_LINK);
    let on_primary = best_text_on(&primary).to_owned();
    let ExtendedRoles { accent, secondary, neutral_light, neutral_dark } =
        derive_extended_roles_aesthetic(&primary, Some(&background), ctx);

    LightRoles {
        primary,
        background,
        text,
        link,
        accent,
        secondary,
        neutral_light,
        neutral_dark,
        on_primary,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
