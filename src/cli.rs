use std::path::PathBuf;

use clap::{Parser, Subcommand};

use swatchbook::vision::VisionDeficiency;

/// Build color palettes and check them for contrast and color-vision accessibility.
#[derive(Parser, Debug)]
#[command(name = "swatchbook", version, about)]
pub struct Args {
    /// JSON configuration file (defaults are used when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log debug detail to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a color in HEX, RGB, HSL, CMYK and LAB
    Convert {
        /// Hex color (#RGB or #RRGGBB)
        hex: String,
    },

    /// WCAG contrast ratio and level of a foreground/background pair
    Contrast { foreground: String, background: String },

    /// Simulate color-vision deficiencies (all eight when --kind is omitted)
    Simulate {
        hex: String,

        #[arg(short, long, value_enum)]
        kind: Option<VisionDeficiency>,
    },

    /// Derive colors of the same hue with lightness from 20% to 80%
    Accessible {
        hex: String,

        /// Number of colors (config default when omitted)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Percentage of color pairs in a palette that pass WCAG AA
    Score {
        #[arg(required = true)]
        colors: Vec<String>,
    },

    /// Print random colors
    Random {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Export a palette as CSV or a printable document
    Export {
        #[arg(required = true)]
        colors: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Palette name (config default when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive terminal palette editor
    Edit {
        /// Persist recent colors in this JSON file
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Document,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_simulate_kind() {
        let args = Args::parse_from(["swatchbook", "simulate", "#ff0000", "--kind", "tritanopia"]);
        match args.command {
            Command::Simulate { kind, .. } => assert_eq!(kind, Some(VisionDeficiency::Tritanopia)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::parse_from(["swatchbook", "random", "-n", "3", "-v"]);
        assert!(args.verbose);
        assert!(matches!(args.command, Command::Random { count: 3 }));
    }
}
