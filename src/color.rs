use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, Result};

/// Core color type used throughout the engine.
/// Wraps sRGB u8 components and provides conversions to the other color models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue/saturation/lightness. `h` in [0, 360), `s` and `l` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Hue/saturation/value. `h` in [0, 360), `s` and `v` in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Naive device CMYK, every channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

/// CIE L*a*b* relative to the D65 white point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

// D65 reference white
const XN: f64 = 0.950_470;
const YN: f64 = 1.0;
const ZN: f64 = 1.088_830;

// CIE f(t) breakpoints: t1 = 6/29
const LAB_T0: f64 = 4.0 / 29.0;
const LAB_T1: f64 = 6.0 / 29.0;
const LAB_T2: f64 = 3.0 * LAB_T1 * LAB_T1;
const LAB_T3: f64 = LAB_T1 * LAB_T1 * LAB_T1;

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, with or without the `#`.
    pub fn from_hex(input: &str) -> Result<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PaletteError::invalid_color(input));
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(PaletteError::invalid_color(input)),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| PaletteError::invalid_color(input))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Serialize to the canonical uppercase form `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    fn unit_channels(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Hue in degrees plus the max/min channel and their spread.
    /// Achromatic colors report hue 0.
    fn hue_and_extremes(self) -> (f64, f64, f64) {
        let (r, g, b) = self.unit_channels();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        (hue % 360.0, max, min)
    }

    pub fn to_hsl(self) -> Hsl {
        let (h, max, min) = self.hue_and_extremes();
        let l = (max + min) / 2.0;
        let delta = max - min;
        let s = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * l - 1.0).abs())
        };
        Hsl { h, s, l }
    }

    pub fn to_hsv(self) -> Hsv {
        let (h, max, min) = self.hue_and_extremes();
        let s = if max == 0.0 { 0.0 } else { (max - min) / max };
        Hsv {
            h,
            s: s * 100.0,
            v: max * 100.0,
        }
    }

    /// Build from HSL. Hue wraps modulo 360; `s` and `l` are clamped to [0, 1].
    pub fn from_hsl(hsl: Hsl) -> Self {
        let s = hsl.s.clamp(0.0, 1.0);
        let l = hsl.l.clamp(0.0, 1.0);
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        Self::from_hue_chroma(hsl.h, chroma, l - chroma / 2.0)
    }

    /// Build from HSV. Hue wraps modulo 360; `s` and `v` are clamped to [0, 100].
    pub fn from_hsv(hsv: Hsv) -> Self {
        let s = hsv.s.clamp(0.0, 100.0) / 100.0;
        let v = hsv.v.clamp(0.0, 100.0) / 100.0;
        let chroma = v * s;
        Self::from_hue_chroma(hsv.h, chroma, v - chroma)
    }

    fn from_hue_chroma(hue: f64, chroma: f64, m: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        Self::from_unit_clamped(r + m, g + m, b + m)
    }

    /// Clamp unit-range channels to [0, 1] and convert to Color.
    fn from_unit_clamped(r: f64, g: f64, b: f64) -> Self {
        let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
        }
    }

    pub fn to_cmyk(self) -> Cmyk {
        let (r, g, b) = self.unit_channels();
        let k = 1.0 - r.max(g).max(b);
        if k >= 1.0 {
            return Cmyk {
                c: 0.0,
                m: 0.0,
                y: 0.0,
                k: 1.0,
            };
        }
        Cmyk {
            c: (1.0 - r - k) / (1.0 - k),
            m: (1.0 - g - k) / (1.0 - k),
            y: (1.0 - b - k) / (1.0 - k),
            k,
        }
    }

    /// Convert to CIELAB (D65) through linear sRGB and XYZ.
    pub fn to_lab(self) -> Lab {
        let r = linearize(self.r);
        let g = linearize(self.g);
        let b = linearize(self.b);

        let x = (0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b) / XN;
        let y = (0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b) / YN;
        let z = (0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b) / ZN;

        fn f(t: f64) -> f64 {
            if t > LAB_T3 {
                t.cbrt()
            } else {
                t / LAB_T2 + LAB_T0
            }
        }
        let (fx, fy, fz) = (f(x), f(y), f(z));
        let l = 116.0 * fy - 16.0;
        Lab {
            l: l.max(0.0),
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// WCAG 2.0 relative luminance.
    ///
    /// Linearizes each sRGB channel, then computes the weighted sum.
    pub fn relative_luminance(self) -> f64 {
        let r = linearize(self.r);
        let g = linearize(self.g);
        let b = linearize(self.b);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// WCAG 2.0 contrast ratio between two colors.
    ///
    /// Returns a value in [1, 21]. Higher means more contrast.
    pub fn contrast_ratio(c1: &Color, c2: &Color) -> f64 {
        let l1 = c1.relative_luminance();
        let l2 = c2.relative_luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

/// sRGB gamma decode of one 8-bit channel.
fn linearize(c: u8) -> f64 {
    let c = f64::from(c) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Color {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// One entry of a palette.
///
/// `hex` is always canonical `#RRGGBB`; every constructor and setter
/// revalidates it, including deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColorValueRepr")]
pub struct ColorValue {
    id: String,
    hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Deserialize)]
struct ColorValueRepr {
    id: String,
    hex: String,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<ColorValueRepr> for ColorValue {
    type Error = PaletteError;

    fn try_from(repr: ColorValueRepr) -> Result<Self> {
        Self::new(repr.id, &repr.hex, repr.name)
    }
}

impl ColorValue {
    pub fn new(id: impl Into<String>, hex: &str, name: Option<String>) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            hex: Color::from_hex(hex)?.to_hex(),
            name,
        })
    }

    pub fn from_color(id: impl Into<String>, color: Color, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            hex: color.to_hex(),
            name,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn color(&self) -> Color {
        // hex was validated on the way in
        Color::from_hex(&self.hex).unwrap_or(Color::BLACK)
    }

    /// Replace the hex value, rejecting malformed input without mutating.
    pub fn set_hex(&mut self, hex: &str) -> Result<()> {
        self.hex = Color::from_hex(hex)?.to_hex();
        Ok(())
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub(crate) fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Name shown in exports: the explicit name, else `Color N` (1-based).
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Color {}", index + 1),
        }
    }
}
