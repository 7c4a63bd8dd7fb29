//! Dark-mode counterparts of the light palette.
//!
//! The dark background is a near-neutral tinted with the primary's hue.
//! Neutrals start with a wide lightness gap and are then settled by two
//! bounded correction loops:
//!
//! - loop A lowers the dark neutral until the neutral pair reaches 4.5:1
//! - loop B moves the light neutral away from the primary until the primary
//!   reaches 4.5:1 on it, re-deriving the dark neutral at each step
//!
//! Loop A runs once more after loop B, since B's re-derivation can undo it.

use hs_color::{
    Hsl, adjust_hue, adjust_lightness, adjust_saturation, darken, hex_to_hsl, hsl_to_hex,
    normalize_hue,
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::classify::{Context, Theme};
use crate::contrast::{AA_NORMAL, best_text_on, prefers_dark_text, ratio_or_zero};
use crate::palette::resolve_primary;

/// Iteration cap for every dark-mode correction loop.
const DARK_MAX_STEPS: usize = 12;
/// Lightness step for the link loop.
const LINK_STEP: f64 = 0.06;
/// Lightness step for both neutral loops.
const NEUTRAL_STEP: f64 = 0.04;

/// Every dark-mode role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DarkRoles {
    pub background_dark: String,
    pub text_dark: String,
    pub link_dark: String,
    pub neutral_light_dark: String,
    pub neutral_dark_dark: String,
}

/// `(saturation, lightness)` of the dark background for a theme and variant.
fn background_tone(theme: Theme, variant: u32) -> (f64, f64) {
    let (s, l): (f64, f64) = match theme {
        Theme::Monochrome => (0.0, 0.10),
        Theme::Pastel => (0.03, 0.12),
        Theme::Earthy | Theme::Vintage => (0.06, 0.12),
        Theme::Muted => (0.04, 0.115),
        Theme::Neon | Theme::Vibrant => (0.08, 0.12),
    };
    // Odd variants shift one step lighter to avoid banding across requests.
    let l = if variant % 2 == 1 {
        (l + 0.01).clamp(0.09, 0.13)
    } else {
        l
    };
    (s, l)
}

/// Hue and saturation of the dark neutrals, tinted from the dark background.
fn neutral_tint(bg: Hsl, theme: Theme) -> (f64, f64) {
    let s = bg.s.clamp(0.0, 0.12);
    match theme {
        Theme::Earthy | Theme::Vintage => (normalize_hue(bg.h + 8.0), (s + 0.02).clamp(0.04, 0.12)),
        Theme::Pastel => (bg.h, s.min(0.08)),
        Theme::Neon | Theme::Vibrant => (bg.h, s.clamp(0.06, 0.14)),
        Theme::Monochrome => (bg.h, 0.0),
        Theme::Muted => (bg.h, s.min(0.09)),
    }
}

/// Link for the dark background: more saturated, lighter, hue −8°, then
/// stepped until it reads at 4.5:1.
fn dark_link(primary: &str, bg: &str) -> String {
    let dark_text = prefers_dark_text(bg);

    let mut link = adjust_saturation(primary, 1.2);
    link = adjust_lightness(&link, if dark_text { -0.12 } else { 0.12 });
    link = adjust_hue(&link, -8.0);

    let mut steps = 0;
    while ratio_or_zero(&link, bg) < AA_NORMAL && steps < DARK_MAX_STEPS {
        link = if dark_text {
            darken(&link, LINK_STEP)
        } else {
            adjust_lightness(&link, LINK_STEP)
        };
        steps += 1;
    }
    link
}

/// Light/dark neutral pair being settled.
struct Neutrals {
    h: f64,
    s: f64,
    light_l: f64,
    dark_l: f64,
}

impl Neutrals {
    fn light(&self) -> String {
        hsl_to_hex(self.h, self.s, self.light_l)
    }

    fn dark(&self) -> String {
        hsl_to_hex(self.h, self.s, self.dark_l)
    }

    fn pair_ratio(&self) -> f64 {
        ratio_or_zero(&self.dark(), &self.light())
    }

    /// Loop A: lower the dark neutral until the pair reaches 4.5:1.
    fn settle_pair(&mut self) {
        let mut steps = 0;
        while self.pair_ratio() < AA_NORMAL && steps < DARK_MAX_STEPS {
            self.dark_l = (self.dark_l - NEUTRAL_STEP).max(0.05);
            steps += 1;
        }
    }

    /// Loop B: move the light neutral away from the primary's lightness
    /// until the primary reaches 4.5:1 on it.
    fn settle_primary(&mut self, primary: &str, primary_l: f64) {
        let mut steps = 0;
        while ratio_or_zero(primary, &self.light()) < AA_NORMAL && steps < DARK_MAX_STEPS {
            self.light_l = if primary_l >= self.light_l {
                (self.light_l - NEUTRAL_STEP).max(0.55)
            } else {
                (self.light_l + NEUTRAL_STEP).min(0.92)
            };
            self.dark_l = (self.light_l - 0.28).min(self.light_l - 0.18).max(0.05);
            steps += 1;
        }
    }
}

/// Derive the dark-mode roles.
///
/// `light_background` is recorded for tracing only: the dark palette is a
/// function of the primary and context.
#[must_use]
#[instrument(
    level = "debug",
    skip_all,
    fields(primary = %primary, light_background = ?light_background, variant = ctx.variant)
)]
pub fn derive_dark_mode_variants(
    primary: &str,
    light_background: Option<&str>,
    ctx: &Context,
) -> DarkRoles {
    let (primary, p) = resolve_primary(primary);
    let theme = ctx.theme();

    let (s_dark, l_dark) = background_tone(theme, ctx.variant);
    let background_dark = hsl_to_hex(p.h, s_dark, l_dark);
    let text_dark = best_text_on(&background_dark).to_owned();
    let link_dark = dark_link(&primary, &background_dark);

    let bg = hex_to_hsl(&background_dark).unwrap_or(Hsl::new(p.h, s_dark, l_dark));
    let (h, s) = neutral_tint(bg, theme);
    let light_l = (bg.l + 0.35).clamp(0.65, 0.9);
    let mut neutrals = Neutrals {
        h,
        s,
        light_l,
        dark_l: (light_l - 0.28).min(0.5).max(0.08),
    };
    neutrals.settle_pair();
    neutrals.settle_primary(&primary, p.l);
    neutrals.settle_pair();

    let neutral_light_dark = neutrals.light();
    let neutral_dark_dark = neutrals.dark();

    let pair = neutrals.pair_ratio();
    let on_light = ratio_or_zero(&primary, &neutral_light_dark);
    if pair < AA_NORMAL || on_light < AA_NORMAL {
        debug!(
            neutral_light = %neutral_light_dark,
            neutral_dark = %neutral_dark_dark,
            pair,
            primary_on_light = on_light,
            "dark neutrals below target"
        );
    }

    DarkRoles {
        background_dark,
        text_dark,
        link_dark,
        neutral_light_dark,
        neutral_dark_dark,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
