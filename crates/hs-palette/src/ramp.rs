//! Tonal ramps: tints and shades of one color at fixed lightness targets.

use hs_color::{hex_to_hsl, hsl_to_hex};

/// Display labels for the ramp steps, lightest first.
pub const RAMP_LABELS: [&str; 5] = ["50", "300", "500", "700", "900"];

/// Build up to five tints/shades of `hex`, lightest first.
///
/// Hue and saturation are kept; lightness moves to
/// `[l+.34 (≤.96), l+.18 (≤.90), l, l−.12 (≥.10), l−.24 (≥.04)]`.
/// `steps` above five is capped. An unparsable color yields `[hex]`.
#[must_use]
pub fn build_ramp(hex: &str, steps: usize) -> Vec<String> {
    let Some(c) = hex_to_hsl(hex) else {
        return vec![hex.to_owned()];
    };
    let targets = [
        (c.l + 0.34).min(0.96),
        (c.l + 0.18).min(0.90),
        c.l,
        (c.l - 0.12).max(0.10),
        (c.l - 0.24).max(0.04),
    ];
    targets
        .iter()
        .take(steps)
        .map(|&l| hsl_to_hex(c.h, c.s.clamp(0.0, 1.0), l.clamp(0.0, 1.0)))
        .collect()
}

/// [`build_ramp`] paired with [`RAMP_LABELS`].
#[must_use]
pub fn labeled_ramp(hex: &str, steps: usize) -> Vec<(&'static str, String)> {
    RAMP_LABELS.iter().copied().zip(build_ramp(hex, steps)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lightness(hex: &str) -> f64 {
        hex_to_hsl(hex).unwrap().l
    }

    #[test]
    fn five_steps_lightest_first() {
        let ramp = build_ramp("#1d4ed8", 5);
        assert_eq!(ramp.len(), 5);
        assert_eq!(ramp[2], "#1d4ed8");
        for pair in ramp.windows(2) {
            assert!(lightness(&pair[0]) > lightness(&pair[1]), "{pair:?}");
        }
    }

    #[test]
    fn steps_are_capped_and_truncated() {
        assert_eq!(build_ramp("#1d4ed8", 9).len(), 5);
        assert_eq!(build_ramp("#1d4ed8", 2).len(), 2);
        assert!(build_ramp("#1d4ed8", 0).is_empty());
    }

    #[test]
    fn extremes_are_clamped() {
        let ramp = build_ramp("#ffffff", 5);
        assert!((lightness(&ramp[0]) - 0.96).abs() < 0.01);
        let ramp = build_ramp("#000000", 5);
        assert!((lightness(&ramp[4]) - 0.04).abs() < 0.01);
        assert!((lightness(&ramp[3]) - 0.10).abs() < 0.01);
    }

    #[test]
    fn unparsable_returns_input() {
        assert_eq!(build_ramp("nope", 5), ["nope"]);
    }

    #[test]
    fn labels_line_up() {
        let ramp = labeled_ramp("#22c55e", 3);
        let labels: Vec<_> = ramp.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["50", "300", "500"]);
    }
}
