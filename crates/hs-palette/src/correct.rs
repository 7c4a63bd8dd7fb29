//! Repair of accent colors proposed by an outside service.
//!
//! A proposal keeps its saturation/lightness character but has its hue
//! coerced onto the safe accent family for the primary's band when it
//! strays too far (or always, for green-family primaries).

use hs_color::{hex_to_hsl, hsl_to_hex, hue_delta, parse_color};
use tracing::debug;

use crate::classify::{HueBand, safe_accent_hue, vibe_from_tone};

/// Hue distance from the safe target beyond which a proposal is coerced.
const MAX_DRIFT_DEG: f64 = 35.0;

/// Fix `accent` so it sits in the safe hue family for `primary`.
///
/// - unparsable primary or accent: the accent comes back as given
/// - accent close enough to the target (and primary not green-family):
///   returned unchanged, in canonical hex form
/// - otherwise: hue set to the target, saturation clamped to [0.5, 0.85],
///   lightness to [0.48, 0.64]
///
/// `tags` only annotate the trace event; they do not change the result.
#[must_use]
pub fn correct_accent_for_primary<S: AsRef<str>>(
    primary: &str,
    accent: &str,
    tags: &[S],
) -> String {
    let (Some(p), Some(a)) = (hex_to_hsl(primary), hex_to_hsl(accent)) else {
        return accent.to_owned();
    };

    let band = HueBand::of(p.h);
    let target = safe_accent_hue(band);
    let drift = hue_delta(a.h, target);
    if !band.is_green_family() && drift <= MAX_DRIFT_DEG {
        return parse_color(accent).map_or_else(|| accent.to_owned(), |c| c.to_hex());
    }

    let corrected = hsl_to_hex(target, a.s.clamp(0.5, 0.85), a.l.clamp(0.48, 0.64));
    debug!(
        %band,
        vibe = %vibe_from_tone(tags),
        proposed = accent,
        corrected = %corrected,
        drift,
        "coerced suggested accent"
    );
    corrected
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
