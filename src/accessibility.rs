//! WCAG contrast scoring and accessible palette generation.

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorValue, Hsl};
use crate::error::{PaletteError, Result};

/// Minimum contrast ratio for WCAG AA normal text.
pub const AA_MIN_RATIO: f64 = 4.5;
/// Minimum contrast ratio for WCAG AAA normal text.
pub const AAA_MIN_RATIO: f64 = 7.0;

/// Default candidates for [`best_contrast`]: black, then white.
pub const DEFAULT_TEXT_CANDIDATES: [&str; 2] = ["#000000", "#FFFFFF"];

const ACCESSIBLE_MIN_LIGHTNESS: f64 = 0.2;
const ACCESSIBLE_MAX_LIGHTNESS: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WcagLevel {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "fail")]
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Score {
    Pass,
    Fail,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::Aaa => write!(f, "AAA"),
            WcagLevel::Aa => write!(f, "AA"),
            WcagLevel::Fail => write!(f, "fail"),
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Score::Pass => write!(f, "pass"),
            Score::Fail => write!(f, "fail"),
        }
    }
}

/// Contrast of an ordered foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    pub ratio: f64,
    pub level: WcagLevel,
    pub score: Score,
}

impl ContrastResult {
    pub fn passes(&self) -> bool {
        self.score == Score::Pass
    }
}

/// WCAG contrast ratio between two hex colors.
///
/// Malformed input on either side yields 1.0 (no contrast).
pub fn contrast_ratio(hex_a: &str, hex_b: &str) -> f64 {
    match (Color::from_hex(hex_a), Color::from_hex(hex_b)) {
        (Ok(a), Ok(b)) => Color::contrast_ratio(&a, &b),
        _ => 1.0,
    }
}

/// Classify a ratio. Thresholds are inclusive: 7.0 is AAA, 4.5 is AA.
pub fn classify(ratio: f64) -> ContrastResult {
    let (level, score) = if ratio >= AAA_MIN_RATIO {
        (WcagLevel::Aaa, Score::Pass)
    } else if ratio >= AA_MIN_RATIO {
        (WcagLevel::Aa, Score::Pass)
    } else {
        (WcagLevel::Fail, Score::Fail)
    };
    ContrastResult {
        ratio,
        level,
        score,
    }
}

pub fn check_accessibility(foreground: &str, background: &str) -> ContrastResult {
    classify(contrast_ratio(foreground, background))
}

/// Pick the candidate with the highest contrast against `background`.
/// Ties go to the earliest candidate. `None` only when `candidates` is empty.
pub fn best_contrast<'a>(background: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let mut best: Option<(&'a str, f64)> = None;
    for &candidate in candidates {
        let ratio = contrast_ratio(candidate, background);
        match best {
            Some((_, best_ratio)) if ratio <= best_ratio => {}
            _ => best = Some((candidate, ratio)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Black or white, whichever reads better on `background`.
pub fn best_text_color(background: &str) -> &'static str {
    best_contrast(background, &DEFAULT_TEXT_CANDIDATES).unwrap_or(DEFAULT_TEXT_CANDIDATES[0])
}

/// Label color for a swatch: black above luminance 0.4, white otherwise.
/// Malformed input gets black.
pub fn contrast_text_color(hex: &str) -> &'static str {
    match Color::from_hex(hex) {
        Ok(c) if c.relative_luminance() > 0.4 => "#000000",
        Ok(_) => "#FFFFFF",
        Err(_) => "#000000",
    }
}

/// Derive `count` colors from `base_hex` keeping its HSL hue and saturation
/// and sweeping lightness linearly from 0.2 to 0.8. A single sample sits at 0.2.
pub fn generate_accessible_palette(base_hex: &str, count: usize) -> Result<Vec<ColorValue>> {
    if count == 0 {
        return Err(PaletteError::InvalidCount { count });
    }
    let base = Color::from_hex(base_hex)?.to_hsl();
    let span = ACCESSIBLE_MAX_LIGHTNESS - ACCESSIBLE_MIN_LIGHTNESS;

    let colors = (0..count)
        .map(|i| {
            let t = if count == 1 {
                0.0
            } else {
                i as f64 / (count - 1) as f64
            };
            let color = Color::from_hsl(Hsl {
                l: ACCESSIBLE_MIN_LIGHTNESS + t * span,
                ..base
            });
            ColorValue::from_color(
                format!("accessible-{i}"),
                color,
                Some(format!("Accessible {}", i + 1)),
            )
        })
        .collect();
    Ok(colors)
}

/// Percentage (0-100) of unordered color pairs that pass WCAG AA.
/// Palettes with fewer than two colors score 0.
pub fn accessibility_score(palette: &[ColorValue]) -> u32 {
    if palette.len() < 2 {
        return 0;
    }
    let mut total = 0u32;
    let mut passing = 0u32;
    for (i, a) in palette.iter().enumerate() {
        for b in &palette[i + 1..] {
            total += 1;
            if check_accessibility(a.hex(), b.hex()).passes() {
                passing += 1;
            }
        }
    }
    (f64::from(passing) / f64::from(total) * 100.0).round() as u32
}

/// Full pairwise grid: `matrix[row][col]` is row-as-foreground on col-as-background.
pub fn contrast_matrix(palette: &[ColorValue]) -> Vec<Vec<ContrastResult>> {
    palette
        .iter()
        .map(|fg| {
            palette
                .iter()
                .map(|bg| check_accessibility(fg.hex(), bg.hex()))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(hexes: &[&str]) -> Vec<ColorValue> {
        hexes
            .iter()
            .enumerate()
            .map(|(i, hex)| ColorValue::new(i.to_string(), hex, None).unwrap())
            .collect()
    }

    #[test]
    fn black_white_ratio_is_21() {
        let ratio = contrast_ratio("#000000", "#ffffff");
        assert!((ratio - 21.0).abs() < 0.01, "got {ratio}");
    }

    #[test]
    fn self_contrast_is_one() {
        for hex in ["#000000", "#FF6B6B", "#777", "#FFFFFF"] {
            assert!((contrast_ratio(hex, hex) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn invalid_input_has_no_contrast() {
        assert_eq!(contrast_ratio("#000000", "banana"), 1.0);
        assert_eq!(contrast_ratio("", "#FFFFFF"), 1.0);
    }

    #[test]
    fn classify_boundaries_are_inclusive() {
        assert_eq!(classify(7.0).level, WcagLevel::Aaa);
        assert_eq!(classify(7.0).score, Score::Pass);
        assert_eq!(classify(4.5).level, WcagLevel::Aa);
        assert_eq!(classify(4.5).score, Score::Pass);
        assert_eq!(classify(4.49).level, WcagLevel::Fail);
        assert_eq!(classify(4.49).score, Score::Fail);
        assert_eq!(classify(6.99).level, WcagLevel::Aa);
        assert_eq!(classify(f64::NAN).level, WcagLevel::Fail);
    }

    #[test]
    fn check_accessibility_carries_ratio() {
        let result = check_accessibility("#000000", "#FFFFFF");
        assert_eq!(result.level, WcagLevel::Aaa);
        assert!((result.ratio - 21.0).abs() < 0.01);
    }

    #[test]
    fn best_contrast_defaults() {
        assert_eq!(best_text_color("#FFFFFF"), "#000000");
        assert_eq!(best_text_color("#000000"), "#FFFFFF");
        assert_eq!(best_text_color("#002868"), "#FFFFFF");
    }

    #[test]
    fn best_contrast_tie_goes_to_first() {
        assert_eq!(
            best_contrast("#808080", &["#123456", "#123456"]),
            Some("#123456")
        );
        // both invalid: both ratio 1, first wins
        assert_eq!(best_contrast("#808080", &["nope", "also-nope"]), Some("nope"));
        assert_eq!(best_contrast("#808080", &[]), None);
    }

    #[test]
    fn contrast_text_color_threshold() {
        assert_eq!(contrast_text_color("#FFEAA7"), "#000000");
        assert_eq!(contrast_text_color("#002868"), "#FFFFFF");
        assert_eq!(contrast_text_color("garbage"), "#000000");
    }

    #[test]
    fn accessible_palette_sweeps_lightness() {
        let colors = generate_accessible_palette("#FF0000", 5).unwrap();
        assert_eq!(colors.len(), 5);

        let lightness: Vec<f64> = colors.iter().map(|c| c.color().to_hsl().l).collect();
        for pair in lightness.windows(2) {
            assert!(pair[0] < pair[1], "lightness not increasing: {lightness:?}");
        }
        assert!((lightness[0] - 0.2).abs() < 0.01);
        assert!((lightness[4] - 0.8).abs() < 0.01);
        assert_eq!(colors[2].hex(), "#FF0000");
    }

    #[test]
    fn accessible_palette_names_and_ids() {
        let colors = generate_accessible_palette("#4ECDC4", 3).unwrap();
        let names: Vec<_> = colors.iter().map(|c| c.name().unwrap()).collect();
        assert_eq!(names, ["Accessible 1", "Accessible 2", "Accessible 3"]);
        assert_eq!(colors[0].id(), "accessible-0");
    }

    #[test]
    fn accessible_palette_single_sample_is_darkest() {
        let colors = generate_accessible_palette("#FF0000", 1).unwrap();
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].hex(), "#660000");
    }

    #[test]
    fn accessible_palette_rejects_zero_and_bad_base() {
        assert_eq!(
            generate_accessible_palette("#FF0000", 0),
            Err(PaletteError::InvalidCount { count: 0 })
        );
        assert!(matches!(
            generate_accessible_palette("oops", 3),
            Err(PaletteError::InvalidColor { .. })
        ));
    }

    #[test]
    fn score_black_white_is_100() {
        assert_eq!(accessibility_score(&palette(&["#000000", "#FFFFFF"])), 100);
    }

    #[test]
    fn score_similar_grays_is_0() {
        assert_eq!(accessibility_score(&palette(&["#777777", "#888888"])), 0);
    }

    #[test]
    fn score_small_palettes_are_zero() {
        assert_eq!(accessibility_score(&[]), 0);
        assert_eq!(accessibility_score(&palette(&["#000000"])), 0);
    }

    #[test]
    fn score_rounds_fraction() {
        // pairs: (black, white) pass, (black, black) fail, (white, black) pass
        let p = palette(&["#000000", "#FFFFFF", "#000000"]);
        assert_eq!(accessibility_score(&p), 67);
    }

    #[test]
    fn matrix_is_square_with_unit_diagonal() {
        let p = palette(&["#000000", "#FF6B6B", "#FFFFFF"]);
        let m = contrast_matrix(&p);
        assert_eq!(m.len(), 3);
        for (i, row) in m.iter().enumerate() {
            assert_eq!(row.len(), 3);
            assert!((row[i].ratio - 1.0).abs() < 1e-12);
            assert_eq!(row[i].score, Score::Fail);
        }
    }

    #[test]
    fn serde_uses_wcag_labels() {
        let json = serde_json::to_string(&classify(7.5)).unwrap();
        assert!(json.contains("\"AAA\""), "got {json}");
        assert!(json.contains("\"pass\""), "got {json}");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_hex() -> impl Strategy<Value = String> {
            proptest::array::uniform3(0u8..=255u8).prop_map(|[r, g, b]| Color::new(r, g, b).to_hex())
        }

        proptest! {
            #[test]
            fn ratio_is_symmetric(a in arb_hex(), b in arb_hex()) {
                let ab = contrast_ratio(&a, &b);
                let ba = contrast_ratio(&b, &a);
                prop_assert!((ab - ba).abs() < 1e-12, "{} vs {}", ab, ba);
            }

            #[test]
            fn ratio_is_in_range(a in arb_hex(), b in arb_hex()) {
                let ratio = contrast_ratio(&a, &b);
                prop_assert!((1.0..=21.0 + 1e-9).contains(&ratio), "ratio {}", ratio);
            }

            #[test]
            fn score_is_a_percentage(hexes in proptest::collection::vec(arb_hex(), 0..8)) {
                let p: Vec<ColorValue> = hexes
                    .iter()
                    .enumerate()
                    .map(|(i, h)| ColorValue::new(i.to_string(), h, None).unwrap())
                    .collect();
                prop_assert!(accessibility_score(&p) <= 100);
            }
        }
    }
}
