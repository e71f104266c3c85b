use crate::color::ColorValue;
use crate::convert::convert_color;

use super::{local_date, PaletteExporter};

const HEADER: [&str; 9] = [
    "Palette Name",
    "Color Index",
    "Color Name",
    "HEX",
    "RGB",
    "HSL",
    "CMYK",
    "LAB",
    "Generated On",
];

/// One row per color with every format column. Fields are quoted only when
/// they contain a comma, quote or line break.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    date: String,
}

impl CsvExporter {
    /// Stamp rows with today's local date.
    pub fn today() -> Self {
        Self::with_date(local_date())
    }

    pub fn with_date(date: impl Into<String>) -> Self {
        Self { date: date.into() }
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::today()
    }
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    let row: Vec<String> = fields.into_iter().map(escape).collect();
    out.push_str(&row.join(","));
}

impl PaletteExporter for CsvExporter {
    fn name(&self) -> &str {
        "CSV"
    }

    fn extension(&self) -> &str {
        "csv"
    }

    fn render(&self, palette: &[ColorValue], palette_name: &str) -> String {
        let mut out = String::new();
        push_row(&mut out, HEADER);

        for (i, color) in palette.iter().enumerate() {
            let formats = convert_color(color.hex());
            let index = (i + 1).to_string();
            let name = color.display_name(i);
            out.push('\n');
            push_row(
                &mut out,
                [
                    palette_name,
                    index.as_str(),
                    name.as_str(),
                    formats.hex.as_str(),
                    formats.rgb.as_str(),
                    formats.hsl.as_str(),
                    formats.cmyk.as_str(),
                    formats.lab.as_str(),
                    self.date.as_str(),
                ],
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ColorValue> {
        vec![
            ColorValue::new("1", "#FF6B6B", Some("Coral Red".into())).unwrap(),
            ColorValue::new("2", "#000000", None).unwrap(),
        ]
    }

    #[test]
    fn header_and_one_row_per_color() {
        let csv = CsvExporter::with_date("10/16/2026").render(&sample(), "Warm");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Palette Name,Color Index,Color Name,HEX,RGB,HSL,CMYK,LAB,Generated On"
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn row_contents_and_quoting() {
        let csv = CsvExporter::with_date("10/16/2026").render(&sample(), "Warm");
        let row = csv.lines().nth(1).unwrap();
        assert!(
            row.starts_with(
                "Warm,1,Coral Red,#FF6B6B,\"rgb(255, 107, 107)\",\"hsl(0, 100%, 71%)\",\"cmyk(0%, 58%, 58%, 0%)\","
            ),
            "got {row}"
        );
        assert!(row.ends_with(",10/16/2026"));
    }

    #[test]
    fn unnamed_color_gets_positional_name() {
        let csv = CsvExporter::with_date("d").render(&sample(), "Warm");
        let row = csv.lines().nth(2).unwrap();
        assert!(row.starts_with("Warm,2,Color 2,#000000,"), "got {row}");
        assert!(row.contains("\"lab(0, 0, 0)\""));
    }

    #[test]
    fn palette_name_with_quote_is_escaped() {
        let csv = CsvExporter::with_date("d").render(&sample(), "The \"Best\", Palette");
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"The \"\"Best\"\", Palette\",1,"), "got {row}");
    }

    #[test]
    fn empty_palette_is_header_only() {
        let csv = CsvExporter::with_date("d").render(&[], "Nothing");
        assert_eq!(csv.lines().count(), 1);
    }
}
