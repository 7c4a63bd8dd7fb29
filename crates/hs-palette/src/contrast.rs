//! WCAG contrast math and bounded contrast enforcement.
//!
//! Thresholds follow WCAG 2.1:
//!
//! - Normal text: AA ≥ 4.5:1, AAA ≥ 7:1
//! - Large text:  AA ≥ 3:1,   AAA ≥ 4.5:1
//!
//! Enforcement walks HSL lightness in fixed steps with a hard iteration cap,
//! so it always terminates and may stop short of its target. Callers that
//! need to know use [`enforce_contrast`]; [`ensure_contrast`] keeps only the
//! color.

use bitflags::bitflags;
use hs_color::{Rgb, hex_to_hsl, parse_color};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::debug;

/// AA threshold for normal-size text.
pub const AA_NORMAL: f64 = 4.5;
/// AAA threshold for normal-size text.
pub const AAA_NORMAL: f64 = 7.0;
/// AA threshold for large text.
pub const AA_LARGE: f64 = 3.0;
/// AAA threshold for large text.
pub const AAA_LARGE: f64 = 4.5;

/// Default target for [`ensure_contrast`].
pub const TARGET_CONTRAST: f64 = AA_NORMAL;
/// Lightness shift applied per enforcement step.
pub const ENFORCE_STEP: f64 = 0.06;
/// Iteration cap for [`ensure_contrast`].
pub const ENFORCE_MAX_STEPS: usize = 10;

// ---------------------------------------------------------------------------
// Luminance and ratio
// ---------------------------------------------------------------------------

/// Relative luminance per WCAG 2.1, in [0.0, 1.0].
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let r = channel_to_linear(rgb.r);
    let g = channel_to_linear(rgb.g);
    let b = channel_to_linear(rgb.b);
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

fn channel_to_linear(c: u8) -> f64 {
    let v = f64::from(c) / 255.0;
    if v <= 0.039_28 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Contrast ratio between two parsed colors, in [1.0, 21.0].
#[must_use]
pub fn contrast_ratio_rgb(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two color strings.
///
/// Symmetric. `None` if either side does not parse.
#[must_use]
pub fn contrast_ratio(a: &str, b: &str) -> Option<f64> {
    Some(contrast_ratio_rgb(parse_color(a)?, parse_color(b)?))
}

/// Like [`contrast_ratio`] but an unparsable pair counts as 0, which
/// makes it fail every threshold.
pub(crate) fn ratio_or_zero(a: &str, b: &str) -> f64 {
    contrast_ratio(a, b).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

bitflags! {
    /// Which WCAG levels a color pair reaches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WcagPass: u8 {
        const AA        = 1 << 0;
        const AAA       = 1 << 1;
        const AA_LARGE  = 1 << 2;
        const AAA_LARGE = 1 << 3;
    }
}

impl WcagPass {
    /// Levels reached by a given ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        let mut passes = Self::empty();
        passes.set(Self::AA, ratio >= AA_NORMAL);
        passes.set(Self::AAA, ratio >= AAA_NORMAL);
        passes.set(Self::AA_LARGE, ratio >= AA_LARGE);
        passes.set(Self::AAA_LARGE, ratio >= AAA_LARGE);
        passes
    }
}

/// Result of [`assess_contrast`].
///
/// Serializes as `{ ratio, AA, AAA, AALarge, AAALarge }`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Assessment {
    /// `None` when either color failed to parse; every level then fails.
    pub ratio: Option<f64>,
    pub passes: WcagPass,
}

impl Assessment {
    #[must_use]
    pub const fn aa(&self) -> bool {
        self.passes.contains(WcagPass::AA)
    }

    #[must_use]
    pub const fn aaa(&self) -> bool {
        self.passes.contains(WcagPass::AAA)
    }

    #[must_use]
    pub const fn aa_large(&self) -> bool {
        self.passes.contains(WcagPass::AA_LARGE)
    }

    #[must_use]
    pub const fn aaa_large(&self) -> bool {
        self.passes.contains(WcagPass::AAA_LARGE)
    }
}

impl Serialize for Assessment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Assessment", 5)?;
        s.serialize_field("ratio", &self.ratio)?;
        s.serialize_field("AA", &self.aa())?;
        s.serialize_field("AAA", &self.aaa())?;
        s.serialize_field("AALarge", &self.aa_large())?;
        s.serialize_field("AAALarge", &self.aaa_large())?;
        s.end()
    }
}

/// Check a foreground/background pair against all four WCAG thresholds.
#[must_use]
pub fn assess_contrast(fg: &str, bg: &str) -> Assessment {
    contrast_ratio(fg, bg).map_or_else(Assessment::default, |ratio| Assessment {
        ratio: Some(ratio),
        passes: WcagPass::from_ratio(ratio),
    })
}

/// Black or white, whichever contrasts more with `bg`. Ties go to black.
#[must_use]
pub fn best_text_on(bg: &str) -> &'static str {
    let on_black = ratio_or_zero("#000000", bg);
    let on_white = ratio_or_zero("#ffffff", bg);
    if on_black >= on_white {
        "#000000"
    } else {
        "#ffffff"
    }
}

/// Whether black text beats white text on `bg`.
pub(crate) fn prefers_dark_text(bg: &str) -> bool {
    ratio_or_zero("#000000", bg) > ratio_or_zero("#ffffff", bg)
}

// ---------------------------------------------------------------------------
// Enforcement
// ---------------------------------------------------------------------------

/// Outcome of a bounded contrast correction.
#[derive(Debug, Clone, PartialEq)]
pub struct Enforced {
    /// The color reached when the loop stopped.
    pub color: String,
    /// Its ratio against the background (0 if unparsable).
    pub ratio: f64,
    /// Whether `ratio` reached the target.
    pub met: bool,
    /// Steps taken.
    pub steps: usize,
}

/// Walk lightness from `start` by `step` until `target` or `max_steps`.
fn walk(start: Rgb, bg: &str, target: f64, max_steps: usize, step: f64) -> Enforced {
    let mut hsl = start.to_hsl();
    let mut out = start.to_hex();
    let mut ratio = ratio_or_zero(&out, bg);
    let mut steps = 0;
    while ratio < target && steps < max_steps {
        hsl = hsl.with_lightness(hsl.l + step);
        out = hsl.to_hex();
        ratio = ratio_or_zero(&out, bg);
        steps += 1;
    }
    Enforced { color: out, ratio, met: ratio >= target, steps }
}

/// Shift `color`'s lightness in [`ENFORCE_STEP`] increments until it
/// reaches `target` against `bg`, for at most `max_steps` steps.
///
/// Direction: darken on a light background (HSL lightness ≥ 0.5, or
/// unparsable), lighten on a dark one. Mid-tone backgrounds can leave that
/// direction short of the target while the other one reaches it; the
/// opposite walk is then taken instead. Hue and saturation are held at the
/// input's values so repeated steps do not accumulate rounding drift.
#[must_use]
pub fn enforce_contrast(color: &str, bg: &str, target: f64, max_steps: usize) -> Enforced {
    let bg_is_light = hex_to_hsl(bg).is_none_or(|c| c.l >= 0.5);
    let step = if bg_is_light {
        -ENFORCE_STEP
    } else {
        ENFORCE_STEP
    };

    let Some(start) = parse_color(color) else {
        return Enforced { color: color.to_owned(), ratio: 0.0, met: false, steps: 0 };
    };
    let first = walk(start, bg, target, max_steps, step);
    if first.met {
        return first;
    }
    let second = walk(start, bg, target, max_steps, -step);
    if second.met {
        return second;
    }

    debug!(
        color = %first.color,
        background = bg,
        ratio = first.ratio,
        target,
        "contrast target not reached"
    );
    first
}

/// [`enforce_contrast`] with the default step cap, keeping only the color.
#[must_use]
pub fn ensure_contrast(color: &str, bg: &str, target: f64) -> String {
    enforce_contrast(color, bg, target, ENFORCE_MAX_STEPS).color
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_extremes() {
        assert!(approx_eq(relative_luminance(Rgb::BLACK), 0.0, 1e-12));
        assert!(approx_eq(relative_luminance(Rgb::WHITE), 1.0, 1e-12));
    }

    #[test]
    fn luminance_pure_channels() {
        assert!(approx_eq(relative_luminance(Rgb::new(255, 0, 0)), 0.2126, 1e-9));
        assert!(approx_eq(relative_luminance(Rgb::new(0, 255, 0)), 0.7152, 1e-9));
        assert!(approx_eq(relative_luminance(Rgb::new(0, 0, 255)), 0.0722, 1e-9));
    }

    #[test]
    fn luminance_uses_linear_segment_for_dark_channels() {
        // 10/255 ≈ 0.0392 sits under the 0.03928 knee.
        let lum = relative_luminance(Rgb::new(10, 10, 10));
        assert!(approx_eq(lum, 10.0 / 255.0 / 12.92, 1e-12), "lum = {lum}");
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn black_on_white_is_21() {
        let ratio = contrast_ratio("#000000", "#ffffff").unwrap();
        assert!(approx_eq(ratio, 21.0, 0.01), "ratio = {ratio}");
    }

    #[test]
    fn same_color_is_1() {
        assert!(approx_eq(contrast_ratio("#777777", "#777777").unwrap(), 1.0, 1e-12));
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = contrast_ratio("#1d4ed8", "#fafafa").unwrap();
        let b = contrast_ratio("#fafafa", "#1d4ed8").unwrap();
        assert!(approx_eq(a, b, 1e-12));
    }

    #[test]
    fn ratio_none_on_garbage() {
        assert_eq!(contrast_ratio("nope", "#ffffff"), None);
        assert_eq!(contrast_ratio("#ffffff", ""), None);
    }

    // ── Assessment ──────────────────────────────────────────────────

    #[test]
    fn assess_black_on_white_passes_all() {
        let a = assess_contrast("#000", "#fff");
        assert_eq!(a.passes, WcagPass::all());
        assert!(a.aa() && a.aaa() && a.aa_large() && a.aaa_large());
    }

    #[test]
    fn assess_near_identical_grays_fail() {
        let a = assess_contrast("#777777", "#7a7a7a");
        assert!(!a.aa());
        assert!(!a.aaa());
        assert!(!a.aa_large());
    }

    #[test]
    fn assess_thresholds_split_levels() {
        // 3.0 ≤ ratio < 4.5 → only AA large.
        assert_eq!(WcagPass::from_ratio(3.2), WcagPass::AA_LARGE);
        // 4.5 ≤ ratio < 7.0 → AA and both large levels.
        assert_eq!(
            WcagPass::from_ratio(5.0),
            WcagPass::AA | WcagPass::AA_LARGE | WcagPass::AAA_LARGE
        );
    }

    #[test]
    fn assess_unparsable_is_all_false() {
        let a = assess_contrast("bogus", "#fff");
        assert_eq!(a.ratio, None);
        assert_eq!(a.passes, WcagPass::empty());
    }

    #[test]
    fn assessment_serializes_with_level_keys() {
        let json = serde_json::to_value(assess_contrast("#000000", "#ffffff")).unwrap();
        assert_eq!(json["AA"], true);
        assert_eq!(json["AAALarge"], true);
        assert!(json["ratio"].as_f64().unwrap() > 20.9);

        let json = serde_json::to_value(assess_contrast("x", "#ffffff")).unwrap();
        assert!(json["ratio"].is_null());
        assert_eq!(json["AALarge"], false);
    }

    // ── Best text ───────────────────────────────────────────────────

    #[test]
    fn best_text_extremes() {
        assert_eq!(best_text_on("#ffffff"), "#000000");
        assert_eq!(best_text_on("#000000"), "#ffffff");
    }

    #[test]
    fn best_text_on_saturated_colors() {
        assert_eq!(best_text_on("#1d4ed8"), "#ffffff");
        assert_eq!(best_text_on("#facc15"), "#000000");
    }

    #[test]
    fn best_text_on_garbage_is_black() {
        // Both ratios fall back to 0, and ties favor black.
        assert_eq!(best_text_on("nope"), "#000000");
    }

    // ── Enforcement ─────────────────────────────────────────────────

    #[test]
    fn already_passing_color_is_untouched() {
        let e = enforce_contrast("#000000", "#ffffff", 4.5, 10);
        assert_eq!(e.color, "#000000");
        assert_eq!(e.steps, 0);
        assert!(e.met);
    }

    #[test]
    fn darkens_on_light_background() {
        let e = enforce_contrast("#ffd966", "#ffffff", 4.5, 10);
        assert!(e.met, "ratio = {}", e.ratio);
        assert!(e.steps > 0);
        let before = hex_to_hsl("#ffd966").unwrap().l;
        let after = hex_to_hsl(&e.color).unwrap().l;
        assert!(after < before);
    }

    #[test]
    fn lightens_on_dark_background() {
        let e = enforce_contrast("#1d4ed8", "#111111", 4.5, 10);
        assert!(e.met, "ratio = {}", e.ratio);
        let before = hex_to_hsl("#1d4ed8").unwrap().l;
        let after = hex_to_hsl(&e.color).unwrap().l;
        assert!(after > before);
    }

    #[test]
    fn stops_at_step_cap_and_reports_shortfall() {
        // Mid gray cannot reach 7:1 against itself in a single step.
        let e = enforce_contrast("#808080", "#808080", 7.0, 1);
        assert_eq!(e.steps, 1);
        assert!(!e.met);
        assert_eq!(ensure_contrast("#808080", "#808080", 7.0).len(), 7);
    }

    #[test]
    fn mid_tone_background_walks_the_other_way() {
        // White only reaches 4.48:1 on #777777, black reaches 4.69:1.
        let e = enforce_contrast("#3b82f6", "#777777", 4.5, 10);
        assert!(e.met, "ratio = {}", e.ratio);
        assert_eq!(e.color, "#000000");
        assert!(approx_eq(e.ratio, 4.69, 0.01));
    }

    #[test]
    fn enforcement_output_is_canonical_hex() {
        let out = ensure_contrast("#FD0", "#fff", 4.5);
        assert_eq!(out.len(), 7);
        assert!(out.starts_with('#'));
        assert_eq!(out, out.to_ascii_lowercase());
    }
}
