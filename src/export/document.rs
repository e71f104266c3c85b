//! Printable palette sheet laid out on A4-sized pages.
//!
//! Vertical positions are tracked in millimetres the way a PDF writer would
//! place them. A color block that would start below `PAGE_HEIGHT -
//! BOTTOM_RESERVE` moves to a fresh page. Pages are separated by a form feed.

use crate::color::ColorValue;
use crate::convert::convert_color;

use super::{local_date, PaletteExporter};

pub const PAGE_HEIGHT: f64 = 297.0;
const TOP_MARGIN: f64 = 20.0;
const BOTTOM_RESERVE: f64 = 80.0;
const TITLE_ADVANCE: f64 = 15.0;
const DATE_ADVANCE: f64 = 10.0;
const COUNT_ADVANCE: f64 = 20.0;
const SWATCH_SIZE: f64 = 30.0;
const BLOCK_SPACING: f64 = 10.0;
const BLOCK_PADDING: f64 = 10.0;

pub const PAGE_BREAK: &str = "\x0c\n";

#[derive(Debug, Clone)]
pub struct DocumentExporter {
    date: String,
}

impl DocumentExporter {
    pub fn today() -> Self {
        Self::with_date(local_date())
    }

    pub fn with_date(date: impl Into<String>) -> Self {
        Self { date: date.into() }
    }

    /// Palette indices grouped by the page they land on.
    pub fn paginate(palette_len: usize) -> Vec<Vec<usize>> {
        let mut pages = vec![Vec::new()];
        let mut y = TOP_MARGIN + TITLE_ADVANCE + DATE_ADVANCE + COUNT_ADVANCE;
        for i in 0..palette_len {
            if y > PAGE_HEIGHT - BOTTOM_RESERVE {
                pages.push(Vec::new());
                y = TOP_MARGIN;
            }
            if let Some(page) = pages.last_mut() {
                page.push(i);
            }
            y += SWATCH_SIZE + BLOCK_SPACING + BLOCK_PADDING;
        }
        pages
    }
}

impl Default for DocumentExporter {
    fn default() -> Self {
        Self::today()
    }
}

fn render_block(out: &mut String, color: &ColorValue, index: usize) {
    let formats = convert_color(color.hex());
    out.push_str(&format!("[{}] {}\n", formats.hex, color.display_name(index)));
    out.push_str(&format!("    HEX: {}\n", formats.hex));
    out.push_str(&format!("    RGB: {}\n", formats.rgb));
    out.push_str(&format!("    HSL: {}\n", formats.hsl));
    out.push_str(&format!("    CMYK: {}\n", formats.cmyk));
    out.push_str(&format!("    LAB: {}\n", formats.lab));
}

impl PaletteExporter for DocumentExporter {
    fn name(&self) -> &str {
        "document"
    }

    fn extension(&self) -> &str {
        "txt"
    }

    fn render(&self, palette: &[ColorValue], palette_name: &str) -> String {
        let mut out = String::new();
        out.push_str(palette_name);
        out.push('\n');
        out.push_str(&format!("Generated on: {}\n", self.date));
        out.push_str(&format!("Colors: {}\n", palette.len()));

        for (page_no, page) in Self::paginate(palette.len()).iter().enumerate() {
            if page_no > 0 {
                out.push_str(PAGE_BREAK);
            }
            for &i in page {
                out.push('\n');
                render_block(&mut out, &palette[i], i);
            }
        }
        out
    }
}
