//! Color-vision-deficiency simulation.
//!
//! Each deficiency is a fixed 3x3 matrix applied directly to gamma-encoded
//! 0-255 sRGB channels. The coefficients are the widely circulated
//! approximation set, not a physiological model.

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorValue};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum VisionDeficiency {
    Protanopia,
    Deuteranopia,
    Tritanopia,
    Protanomaly,
    Deuteranomaly,
    Tritanomaly,
    Achromatopsia,
    Achromatomaly,
}

/// Display metadata for one deficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeficiencyInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub prevalence: &'static str,
}

type Matrix = [[f64; 3]; 3];

const PROTANOPIA: Matrix = [[0.567, 0.433, 0.0], [0.558, 0.442, 0.0], [0.0, 0.242, 0.758]];
const DEUTERANOPIA: Matrix = [[0.625, 0.375, 0.0], [0.7, 0.3, 0.0], [0.0, 0.3, 0.7]];
const TRITANOPIA: Matrix = [[0.95, 0.05, 0.0], [0.0, 0.433, 0.567], [0.0, 0.475, 0.525]];
const PROTANOMALY: Matrix = [[0.817, 0.183, 0.0], [0.333, 0.667, 0.0], [0.0, 0.125, 0.875]];
const DEUTERANOMALY: Matrix = [[0.8, 0.2, 0.0], [0.258, 0.742, 0.0], [0.0, 0.142, 0.858]];
const TRITANOMALY: Matrix = [[0.967, 0.033, 0.0], [0.0, 0.733, 0.267], [0.0, 0.183, 0.817]];
const ACHROMATOPSIA: Matrix = [
    [0.299, 0.587, 0.114],
    [0.299, 0.587, 0.114],
    [0.299, 0.587, 0.114],
];
const ACHROMATOMALY: Matrix = [
    [0.618, 0.320, 0.062],
    [0.163, 0.775, 0.062],
    [0.163, 0.320, 0.516],
];

impl VisionDeficiency {
    pub const ALL: [VisionDeficiency; 8] = [
        VisionDeficiency::Protanopia,
        VisionDeficiency::Deuteranopia,
        VisionDeficiency::Tritanopia,
        VisionDeficiency::Protanomaly,
        VisionDeficiency::Deuteranomaly,
        VisionDeficiency::Tritanomaly,
        VisionDeficiency::Achromatopsia,
        VisionDeficiency::Achromatomaly,
    ];

    fn matrix(self) -> &'static Matrix {
        match self {
            VisionDeficiency::Protanopia => &PROTANOPIA,
            VisionDeficiency::Deuteranopia => &DEUTERANOPIA,
            VisionDeficiency::Tritanopia => &TRITANOPIA,
            VisionDeficiency::Protanomaly => &PROTANOMALY,
            VisionDeficiency::Deuteranomaly => &DEUTERANOMALY,
            VisionDeficiency::Tritanomaly => &TRITANOMALY,
            VisionDeficiency::Achromatopsia => &ACHROMATOPSIA,
            VisionDeficiency::Achromatomaly => &ACHROMATOMALY,
        }
    }

    /// Cycle order used by the editor's simulation toggle.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&d| d == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn info(self) -> DeficiencyInfo {
        describe(self)
    }
}

impl std::fmt::Display for VisionDeficiency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(describe(*self).name)
    }
}

/// Apply the deficiency matrix to a color.
pub fn simulate_color(color: Color, kind: VisionDeficiency) -> Color {
    let m = kind.matrix();
    let rgb = [f64::from(color.r), f64::from(color.g), f64::from(color.b)];
    let channel = |row: &[f64; 3]| {
        let v = row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2];
        v.round().clamp(0.0, 255.0) as u8
    };
    Color::new(channel(&m[0]), channel(&m[1]), channel(&m[2]))
}

/// Simulate how `hex` appears under `kind`. Malformed input passes through
/// unchanged.
pub fn simulate(hex: &str, kind: VisionDeficiency) -> String {
    match Color::from_hex(hex) {
        Ok(color) => simulate_color(color, kind).to_hex(),
        Err(_) => hex.to_string(),
    }
}

/// Simulate every entry of a palette, keeping ids and names.
pub fn simulate_palette(palette: &[ColorValue], kind: VisionDeficiency) -> Vec<ColorValue> {
    palette
        .iter()
        .map(|value| {
            let mut simulated = value.clone();
            simulated.set_hex(&simulate(value.hex(), kind)).ok();
            simulated
        })
        .collect()
}

pub fn describe(kind: VisionDeficiency) -> DeficiencyInfo {
    let (name, description, prevalence) = match kind {
        VisionDeficiency::Protanopia => (
            "Protanopia",
            "Missing long-wavelength (red) photopigments",
            "~1% of males",
        ),
        VisionDeficiency::Deuteranopia => (
            "Deuteranopia",
            "Missing medium-wavelength (green) photopigments",
            "~1% of males",
        ),
        VisionDeficiency::Tritanopia => (
            "Tritanopia",
            "Missing short-wavelength (blue) photopigments",
            "~0.002% of population",
        ),
        VisionDeficiency::Protanomaly => (
            "Protanomaly",
            "Shifted long-wavelength (red) photopigments",
            "~1% of males",
        ),
        VisionDeficiency::Deuteranomaly => (
            "Deuteranomaly",
            "Shifted medium-wavelength (green) photopigments",
            "~5% of males, ~0.4% of females",
        ),
        VisionDeficiency::Tritanomaly => (
            "Tritanomaly",
            "Shifted short-wavelength (blue) photopigments",
            "~0.01% of population",
        ),
        VisionDeficiency::Achromatopsia => (
            "Achromatopsia",
            "Complete absence of color vision",
            "~0.003% of population",
        ),
        VisionDeficiency::Achromatomaly => (
            "Achromatomaly",
            "Partial absence of color vision",
            "~0.001% of population",
        ),
    };
    DeficiencyInfo {
        name,
        description,
        prevalence,
    }
}
