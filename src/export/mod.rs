pub mod csv;
pub mod document;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::color::ColorValue;

pub use self::csv::CsvExporter;
pub use self::document::DocumentExporter;

/// A palette export format.
pub trait PaletteExporter {
    /// Human-readable format name.
    fn name(&self) -> &str;

    /// File extension without the dot.
    fn extension(&self) -> &str;

    /// Render the palette to the format's text.
    fn render(&self, palette: &[ColorValue], palette_name: &str) -> String;

    /// Write the palette to an arbitrary path.
    fn write_to(&self, palette: &[ColorValue], palette_name: &str, path: &Path) -> Result<()> {
        let content = self.render(palette, palette_name);
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {} export to {}", self.name(), path.display()))?;
        Ok(())
    }

    /// Write into `dir` under the conventional file name and return the path.
    fn export_to_dir(&self, palette: &[ColorValue], palette_name: &str, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create export directory: {}", dir.display()))?;
        let path = dir.join(export_file_name(palette_name, self.extension()));
        self.write_to(palette, palette_name, &path)?;
        Ok(path)
    }
}

/// `My Palette!` + `csv` -> `my_palette__palette.csv`.
pub fn export_file_name(palette_name: &str, extension: &str) -> String {
    let stem: String = palette_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}_palette.{extension}")
}

/// Today's date as the exports print it (`M/D/YYYY`).
pub fn local_date() -> String {
    chrono::Local::now().format("%-m/%-d/%Y").to_string()
}
