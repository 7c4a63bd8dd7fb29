//! "Try another" palettes: a fresh light palette for the same primary.
//!
//! The context's variant seeds everything that changes between attempts:
//! background lightness, the link's contrast target, the candidate pattern,
//! and how hard the neutrals are pushed apart.

use hs_color::{Hsl, hex_to_hsl, hsl_to_hex, normalize_hue};
use tracing::{debug, instrument};

use crate::classify::{Context, Theme};
use crate::contrast::{AA_LARGE, AA_NORMAL, best_text_on, ratio_or_zero};
use crate::palette::{
    ExtendedRoles, LightRoles, LinkTuning, derive_extended_roles_aesthetic, derive_link,
    resolve_primary,
};

/// Background lightness, indexed by `variant % 4`.
const BACKGROUND_LIGHTNESS: [f64; 4] = [0.98, 0.97, 0.965, 0.975];
/// Iteration cap shared by the link and both neutral passes.
const PASS_MAX_STEPS: usize = 12;
const NEUTRAL_LIGHT_STEP: f64 = 0.05;
const NEUTRAL_DARK_STEP: f64 = 0.06;

/// Near-white background tinted with the primary's hue.
fn background(p: Hsl, theme: Theme, variant: u32) -> String {
    let (h, s) = match theme {
        Theme::Monochrome => (p.h, 0.0),
        Theme::Pastel => (p.h, 0.03),
        Theme::Earthy | Theme::Vintage => (normalize_hue(p.h.mul_add(0.6, 45.0 * 0.4)), 0.05),
        Theme::Muted | Theme::Neon | Theme::Vibrant => (p.h, 0.02),
    };
    let l = BACKGROUND_LIGHTNESS[variant as usize % BACKGROUND_LIGHTNESS.len()];
    hsl_to_hex(h, s, l)
}

/// Contrast targets that climb with the variant.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Targets {
    link: f64,
    primary_on_neutral: f64,
    neutral_pair: f64,
}

impl Targets {
    fn for_variant(variant: u32) -> Self {
        let step = |modulus: u32, weight: f64| f64::from(variant % modulus + 1) * weight;
        Self {
            link: (AA_NORMAL + step(5, 0.5)).min(9.0),
            primary_on_neutral: (AA_NORMAL + step(6, 0.3)).min(7.0),
            neutral_pair: (AA_NORMAL + step(5, 0.4)).min(7.0),
        }
    }
}

/// Move the light neutral away from the primary's lightness until the
/// primary reads on it. Saturation is capped at 0.12 on every step.
fn lift_neutral_light(primary: &str, neutral_light: String, target: f64) -> String {
    let (Some(p), Some(mut n)) = (hex_to_hsl(primary), hex_to_hsl(&neutral_light)) else {
        return neutral_light;
    };
    let mut out = neutral_light;
    let mut steps = 0;
    while ratio_or_zero(primary, &out) < target && steps < PASS_MAX_STEPS {
        n.l = if p.l >= n.l {
            (n.l - NEUTRAL_LIGHT_STEP).max(0.0)
        } else {
            (n.l + NEUTRAL_LIGHT_STEP).min(1.0)
        };
        out = hsl_to_hex(n.h, n.s.min(0.12), n.l);
        steps += 1;
    }
    out
}

/// Darken the dark neutral until the neutral pair reaches `target`.
/// Saturation is capped at 0.15 on every step.
fn sink_neutral_dark(neutral_dark: String, neutral_light: &str, target: f64) -> String {
    let Some(mut n) = hex_to_hsl(&neutral_dark) else {
        return neutral_dark;
    };
    let mut out = neutral_dark;
    let mut steps = 0;
    while ratio_or_zero(&out, neutral_light) < target && steps < PASS_MAX_STEPS {
        n.l = (n.l - NEUTRAL_DARK_STEP).max(0.0);
        out = hsl_to_hex(n.h, n.s.min(0.15), n.l);
        steps += 1;
    }
    out
}

/// Synthesize a fresh light palette for `primary`, seeded by `ctx.variant`.
///
/// Same primary and context always give the same palette; changing only the
/// variant changes the background, link strength, candidate choice and
/// neutral spacing.
#[must_use]
#[instrument(level = "debug", skip_all, fields(primary = %primary, variant = ctx.variant))]
pub fn regenerate_palette(primary: &str, ctx: &Context) -> LightRoles {
    let (primary, p) = resolve_primary(primary);
    let theme = ctx.theme();
    let targets = Targets::for_variant(ctx.variant);

    let background = background(p, theme, ctx.variant);
    let link_tuning = LinkTuning { target: targets.link, step: 0.06, max_steps: PASS_MAX_STEPS };
    let link = derive_link(&primary, &background, link_tuning);

    let ExtendedRoles { accent, secondary, neutral_light, neutral_dark } =
        derive_extended_roles_aesthetic(&primary, Some(&background), ctx);
    let neutral_light = lift_neutral_light(&primary, neutral_light, targets.primary_on_neutral);
    let neutral_dark = sink_neutral_dark(neutral_dark, &neutral_light, targets.neutral_pair);

    let on_primary = best_text_on(&primary);
    let mut text = best_text_on(&background);
    let weak_on_primary = ratio_or_zero(text, &primary) < AA_LARGE;
    if weak_on_primary && ratio_or_zero(on_primary, &background) >= AA_NORMAL {
        debug!(from = text, to = on_primary, "text swapped toward primary contrast");
        text = on_primary;
    }

    LightRoles {
        primary,
        background,
        text: text.to_owned(),
        link,
        accent,
        secondary,
        neutral_light,
        neutral_dark,
        on_primary: on_primary.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::contrast_ratio;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn ctx(tags: &[&str], variant: u32) -> Context {
        Context::new(tags.iter().copied(), "", variant)
    }

    // ── Targets ─────────────────────────────────────────────────────

    #[test]
    fn targets_climb_with_variant() {
        let t = Targets::for_variant(0);
        assert!(approx_eq(t.link, 5.0));
        assert!(approx_eq(t.primary_on_neutral, 4.8));
        assert!(approx_eq(t.neutral_pair, 4.9));

        let t = Targets::for_variant(4);
        assert!(approx_eq(t.link, 7.0));
        assert!(approx_eq(t.primary_on_neutral, 6.0));
        assert!(approx_eq(t.neutral_pair, 6.5));

        // Wraps with the modulus.
        assert_eq!(Targets::for_variant(5).link, Targets::for_variant(0).link);
    }

    // ── Background ──────────────────────────────────────────────────

    #[test]
    fn background_lightness_cycles() {
        let p = Hsl::new(220.0, 0.7, 0.5);
        let ls: Vec<f64> = (0..4)
            .map(|v| hex_to_hsl(&background(p, Theme::Muted, v)).unwrap().l)
            .collect();
        for (got, want) in ls.iter().zip(BACKGROUND_LIGHTNESS) {
            assert!((got - want).abs() < 0.005, "{got} vs {want}");
        }
        assert_eq!(background(p, Theme::Muted, 1), background(p, Theme::Muted, 5));
    }

    #[test]
    fn monochrome_background_is_gray() {
        let bg = background(Hsl::new(10.0, 0.8, 0.5), Theme::Monochrome, 0);
        let rgb = hs_color::parse_color(&bg).unwrap();
        assert_eq!(rgb.r, rgb.g);
        assert_eq!(rgb.g, rgb.b);
    }

    // ── Neutral passes ──────────────────────────────────────────────

    #[test]
    fn sink_neutral_dark_reaches_target() {
        let out = sink_neutral_dark("#8a8f99".to_owned(), "#f4f5f7", 6.0);
        assert!(contrast_ratio(&out, "#f4f5f7").unwrap() >= 6.0, "{out}");
    }

    #[test]
    fn lift_neutral_light_moves_away_from_primary() {
        // Light neutral lighter than the primary: it gets lighter still.
        let out = lift_neutral_light("#1d4ed8", "#9aa3b5".to_owned(), 4.8);
        let before = hex_to_hsl("#9aa3b5").unwrap().l;
        assert!(hex_to_hsl(&out).unwrap().l > before, "{out}");
        assert!(hex_to_hsl(&out).unwrap().s <= 0.14);
    }

    #[test]
    fn passes_leave_met_colors_alone() {
        assert_eq!(sink_neutral_dark("#111111".to_owned(), "#ffffff", 4.9), "#111111");
        assert_eq!(lift_neutral_light("#1d4ed8", "#ffffff".to_owned(), 4.8), "#ffffff");
    }

    // ── Full regeneration ───────────────────────────────────────────

    #[test]
    fn regenerate_is_deterministic() {
        let c = ctx(&["earthy"], 3);
        assert_eq!(regenerate_palette("#1d4ed8", &c), regenerate_palette("#1d4ed8", &c));
    }

    #[test]
    fn variants_change_background() {
        let a = regenerate_palette("#1d4ed8", &ctx(&[], 0));
        let b = regenerate_palette("#1d4ed8", &ctx(&[], 1));
        assert_ne!(a.background, b.background);
        assert_eq!(a.primary, "#1d4ed8");
        assert_eq!(b.primary, "#1d4ed8");
    }

    #[test]
    fn link_meets_escalated_target() {
        for variant in 0..5 {
            let roles = regenerate_palette("#1d4ed8", &ctx(&[], variant));
            let target = Targets::for_variant(variant).link;
            let ratio = contrast_ratio(&roles.link, &roles.background).unwrap();
            assert!(ratio >= target, "variant {variant}: {ratio} < {target}");
        }
    }

    #[test]
    fn text_and_on_primary_on_light_background() {
        let roles = regenerate_palette("#1d4ed8", &ctx(&[], 0));
        assert_eq!(roles.text, "#000000");
        assert_eq!(roles.on_primary, "#ffffff");
    }

    #[test]
    fn every_role_is_canonical_hex() {
        let roles = regenerate_palette("not a color", &ctx(&["vintage"], 7));
        for hex in [
            &roles.primary,
            &roles.background,
            &roles.text,
            &roles.link,
            &roles.accent,
            &roles.secondary,
            &roles.neutral_light,
            &roles.neutral_dark,
            &roles.on_primary,
        ] {
            assert_eq!(hs_color::normalize_hex(hex).as_deref(), Some(hex.as_str()));
        }
    }
}
