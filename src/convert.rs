//! Hex-string facing color space conversion.
//!
//! Every function here is total: malformed hex input falls back to black
//! (zero channels) so callers can always render a formatted string. Only
//! [`parse_hex`] reports failure.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{Cmyk, Color, Hsl, Hsv, Lab};
use crate::error::Result;

/// A color rendered in every supported textual format.
///
/// The exact string shapes are consumed verbatim by clipboard and export
/// code and must not drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorFormats {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
    pub cmyk: String,
    pub lab: String,
}

/// Validate a hex color and return its canonical `#RRGGBB` form.
pub fn parse_hex(input: &str) -> Result<String> {
    Color::from_hex(input).map(Color::to_hex)
}

/// Whether `input` parses as a 3- or 6-digit hex color.
pub fn is_valid_hex(input: &str) -> bool {
    Color::from_hex(input).is_ok()
}

fn color_or_black(hex: &str) -> Color {
    Color::from_hex(hex).unwrap_or(Color::BLACK)
}

pub fn to_rgb(hex: &str) -> (u8, u8, u8) {
    let c = color_or_black(hex);
    (c.r, c.g, c.b)
}

pub fn to_hsl(hex: &str) -> Hsl {
    color_or_black(hex).to_hsl()
}

pub fn to_hsv(hex: &str) -> Hsv {
    color_or_black(hex).to_hsv()
}

/// Alias kept for picker code that thinks in HSV.
pub fn hex_to_hsv(hex: &str) -> Hsv {
    to_hsv(hex)
}

pub fn to_cmyk(hex: &str) -> Cmyk {
    color_or_black(hex).to_cmyk()
}

pub fn to_lab(hex: &str) -> Lab {
    color_or_black(hex).to_lab()
}

/// Convert HSV to canonical hex. `h` is normalized modulo 360, `s` and `v`
/// are clamped to [0, 100]. Non-finite input yields black.
pub fn hsv_to_hex(h: f64, s: f64, v: f64) -> String {
    Color::from_hsv(normalized_hsv(h, s, v)).to_hex()
}

pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let c = Color::from_hsv(normalized_hsv(h, s, v));
    (c.r, c.g, c.b)
}

fn normalized_hsv(h: f64, s: f64, v: f64) -> Hsv {
    if !(h.is_finite() && s.is_finite() && v.is_finite()) {
        return Hsv {
            h: 0.0,
            s: 0.0,
            v: 0.0,
        };
    }
    Hsv {
        h: h.rem_euclid(360.0),
        s: s.clamp(0.0, 100.0),
        v: v.clamp(0.0, 100.0),
    }
}

/// A uniformly sampled color from the thread-local RNG.
pub fn random_color() -> String {
    random_color_with(&mut rand::thread_rng())
}

/// A uniformly sampled color from the given RNG.
pub fn random_color_with<R: Rng>(rng: &mut R) -> String {
    Color::new(rng.gen(), rng.gen(), rng.gen()).to_hex()
}

/// Round half toward positive infinity, matching how export consumers
/// have always rounded these values.
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

fn pct(x: f64) -> i64 {
    round_half_up(x * 100.0)
}

pub fn format_rgb(c: Color) -> String {
    format!("rgb({}, {}, {})", c.r, c.g, c.b)
}

pub fn format_hsl(hsl: Hsl) -> String {
    format!(
        "hsl({}, {}%, {}%)",
        round_half_up(hsl.h),
        pct(hsl.s),
        pct(hsl.l)
    )
}

pub fn format_cmyk(cmyk: Cmyk) -> String {
    format!(
        "cmyk({}%, {}%, {}%, {}%)",
        pct(cmyk.c),
        pct(cmyk.m),
        pct(cmyk.y),
        pct(cmyk.k)
    )
}

pub fn format_lab(lab: Lab) -> String {
    format!(
        "lab({}, {}, {})",
        round_half_up(lab.l),
        round_half_up(lab.a),
        round_half_up(lab.b)
    )
}

/// Render `hex` in all five formats. Malformed input renders as black.
pub fn convert_color(hex: &str) -> ColorFormats {
    let c = color_or_black(hex);
    ColorFormats {
        hex: c.to_hex(),
        rgb: format_rgb(c),
        hsl: format_hsl(c.to_hsl()),
        cmyk: format_cmyk(c.to_cmyk()),
        lab: format_lab(c.to_lab()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parse_hex_canonicalizes() {
        assert_eq!(parse_hex("#ff6b6b").unwrap(), "#FF6B6B");
        assert_eq!(parse_hex("0af").unwrap(), "#00AAFF");
        assert!(parse_hex("red").is_err());
        assert!(!is_valid_hex("#12345"));
        assert!(is_valid_hex("#123"));
    }

    #[test]
    fn convert_color_coral() {
        let formats = convert_color("#FF6B6B");
        assert_eq!(formats.hex, "#FF6B6B");
        assert_eq!(formats.rgb, "rgb(255, 107, 107)");
        assert_eq!(formats.hsl, "hsl(0, 100%, 71%)");
        assert_eq!(formats.cmyk, "cmyk(0%, 58%, 58%, 0%)");
        assert!(formats.lab.starts_with("lab(6"), "got {}", formats.lab);
    }

    #[test]
    fn convert_color_white_and_black() {
        let white = convert_color("#fff");
        assert_eq!(white.rgb, "rgb(255, 255, 255)");
        assert_eq!(white.hsl, "hsl(0, 0%, 100%)");
        assert_eq!(white.cmyk, "cmyk(0%, 0%, 0%, 0%)");
        assert_eq!(white.lab, "lab(100, 0, 0)");

        let black = convert_color("#000000");
        assert_eq!(black.cmyk, "cmyk(0%, 0%, 0%, 100%)");
        assert_eq!(black.lab, "lab(0, 0, 0)");
    }

    #[test]
    fn convert_color_invalid_falls_back_to_black() {
        let formats = convert_color("not a color");
        assert_eq!(
            formats,
            ColorFormats {
                hex: "#000000".into(),
                rgb: "rgb(0, 0, 0)".into(),
                hsl: "hsl(0, 0%, 0%)".into(),
                cmyk: "cmyk(0%, 0%, 0%, 100%)".into(),
                lab: "lab(0, 0, 0)".into(),
            }
        );
    }

    #[test]
    fn channel_getters_fall_back_to_zero() {
        assert_eq!(to_rgb("xyz"), (0, 0, 0));
        let hsv = to_hsv("#12");
        assert_eq!((hsv.h, hsv.s, hsv.v), (0.0, 0.0, 0.0));
        assert_eq!(to_lab("").l, 0.0);
        assert_eq!(to_cmyk("").k, 1.0);
    }

    #[test]
    fn hsv_to_hex_normalizes_out_of_range() {
        assert_eq!(hsv_to_hex(0.0, 100.0, 100.0), "#FF0000");
        assert_eq!(hsv_to_hex(480.0, 100.0, 100.0), "#00FF00");
        assert_eq!(hsv_to_hex(-120.0, 100.0, 100.0), "#0000FF");
        assert_eq!(hsv_to_hex(0.0, -5.0, 150.0), "#FFFFFF");
        assert_eq!(hsv_to_hex(f64::NAN, 50.0, 50.0), "#000000");
    }

    #[test]
    fn hsv_to_rgb_rounds() {
        assert_eq!(hsv_to_rgb(30.0, 100.0, 100.0), (255, 128, 0));
    }

    #[test]
    fn lab_negative_components_round_half_up() {
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.5), -1);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(format_lab(Lab { l: 53.2, a: -0.4, b: -12.6 }), "lab(53, 0, -13)");
    }

    #[test]
    fn random_color_is_valid_and_seedable() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first = random_color_with(&mut a);
        assert!(is_valid_hex(&first));
        assert_eq!(first, random_color_with(&mut b));
        assert!(is_valid_hex(&random_color()));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hsv_round_trip_within_one(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
                let hex = Color::new(r, g, b).to_hex();
                let hsv = hex_to_hsv(&hex);
                let (r2, g2, b2) = to_rgb(&hsv_to_hex(hsv.h, hsv.s, hsv.v));
                prop_assert!((i16::from(r) - i16::from(r2)).abs() <= 1, "R {} vs {}", r, r2);
                prop_assert!((i16::from(g) - i16::from(g2)).abs() <= 1, "G {} vs {}", g, g2);
                prop_assert!((i16::from(b) - i16::from(b2)).abs() <= 1, "B {} vs {}", b, b2);
            }

            #[test]
            fn hsl_round_trip_within_one(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
                let original = Color::new(r, g, b);
                let back = Color::from_hsl(original.to_hsl());
                prop_assert!((i16::from(original.r) - i16::from(back.r)).abs() <= 1);
                prop_assert!((i16::from(original.g) - i16::from(back.g)).abs() <= 1);
                prop_assert!((i16::from(original.b) - i16::from(back.b)).abs() <= 1);
            }

            #[test]
            fn formats_never_panic(s in ".{0,10}") {
                let formats = convert_color(&s);
                prop_assert!(formats.hex.starts_with('#'));
                prop_assert_eq!(formats.hex.len(), 7);
            }
        }
    }
}
