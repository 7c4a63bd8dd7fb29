// SPDX-License-Identifier: MIT
//
// Property tests for the conversion layer.

use hs_color::{Rgb, hex_to_hsl, hsl_to_hex, hue_delta, normalize_hex, parse_color};
use proptest::prelude::*;

fn within_one_step(a: Rgb, b: Rgb) -> bool {
    a.channels()
        .iter()
        .zip(b.channels())
        .all(|(x, y)| x.abs_diff(y) <= 1)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn hsl_round_trip_stays_within_one_step(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let original = Rgb::new(r, g, b);
        let hsl = hex_to_hsl(&original.to_hex()).unwrap();
        prop_assert!((0.0..360.0).contains(&hsl.h));
        prop_assert!((0.0..=1.0).contains(&hsl.s));
        prop_assert!((0.0..=1.0).contains(&hsl.l));

        let back = parse_color(&hsl_to_hex(hsl.h, hsl.s, hsl.l)).unwrap();
        prop_assert!(within_one_step(original, back), "{original} -> {back}");
    }

    #[test]
    fn normalize_hex_is_idempotent(s in "#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})") {
        let once = normalize_hex(&s).unwrap();
        prop_assert_eq!(once.len(), 7);
        prop_assert_eq!(normalize_hex(&once), Some(once.clone()));
    }

    #[test]
    fn normalize_hex_never_panics(s in ".{0,12}") {
        if let Some(once) = normalize_hex(&s) {
            prop_assert_eq!(normalize_hex(&once), Some(once.clone()));
        }
    }

    #[test]
    fn hue_delta_is_symmetric_and_bounded(a in -720.0f64..720.0, b in -720.0f64..720.0) {
        let d = hue_delta(a, b);
        prop_assert!((0.0..=180.0).contains(&d));
        prop_assert!((d - hue_delta(b, a)).abs() < 1e-9);
    }
}
