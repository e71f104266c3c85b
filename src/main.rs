mod cli;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use swatchbook::accessibility::{accessibility_score, check_accessibility, generate_accessible_palette};
use swatchbook::convert::{convert_color, parse_hex, random_color};
use swatchbook::export::{CsvExporter, DocumentExporter, PaletteExporter};
use swatchbook::store::{JsonFileStore, KeyValueStore, MemoryStore};
use swatchbook::tui::{self, TuiApp};
use swatchbook::vision::{describe, simulate, VisionDeficiency};
use swatchbook::{ColorValue, Config, PaletteSession};

use cli::{Args, Command, ExportFormat};

fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.debug {
            EnvFilter::new("debug")
        } else if args.verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            Config::from_json_file(path)
        }
        None => Ok(Config::default()),
    }
}

/// Validate command-line hex values into palette entries with ids `1..=n`.
fn palette_from_args(colors: &[String]) -> Result<Vec<ColorValue>> {
    colors
        .iter()
        .enumerate()
        .map(|(i, hex)| {
            ColorValue::new((i + 1).to_string(), hex, None)
                .with_context(|| format!("color #{} on the command line", i + 1))
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);
    let config = load_config(&args)?;
    debug!(?config, "configuration");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Convert { hex } => {
            let hex = parse_hex(&hex)?;
            let formats = convert_color(&hex);
            writeln!(out, "HEX:  {}", formats.hex)?;
            writeln!(out, "RGB:  {}", formats.rgb)?;
            writeln!(out, "HSL:  {}", formats.hsl)?;
            writeln!(out, "CMYK: {}", formats.cmyk)?;
            writeln!(out, "LAB:  {}", formats.lab)?;
        }
        Command::Contrast {
            foreground,
            background,
        } => {
            let fg = parse_hex(&foreground)?;
            let bg = parse_hex(&background)?;
            let result = check_accessibility(&fg, &bg);
            writeln!(
                out,
                "{fg} on {bg}: {:.2}:1  {}  {}",
                result.ratio, result.level, result.score
            )?;
        }
        Command::Simulate { hex, kind } => {
            let hex = parse_hex(&hex)?;
            let kinds = match kind {
                Some(kind) => vec![kind],
                None => VisionDeficiency::ALL.to_vec(),
            };
            for kind in kinds {
                let info = describe(kind);
                writeln!(
                    out,
                    "{:<14} {}  {} ({})",
                    info.name,
                    simulate(&hex, kind),
                    info.description,
                    info.prevalence
                )?;
            }
        }
        Command::Accessible { hex, count } => {
            let count = count.unwrap_or(config.accessible_count);
            for color in generate_accessible_palette(&hex, count)? {
                writeln!(out, "{}  {}", color.hex(), color.name().unwrap_or_default())?;
            }
        }
        Command::Score { colors } => {
            let palette = palette_from_args(&colors)?;
            writeln!(out, "{}%", accessibility_score(&palette))?;
        }
        Command::Random { count } => {
            for _ in 0..count {
                writeln!(out, "{}", random_color())?;
            }
        }
        Command::Export {
            colors,
            format,
            name,
            output,
        } => {
            let palette = palette_from_args(&colors)?;
            let name = name.unwrap_or_else(|| config.palette_name.clone());
            let exporter: Box<dyn PaletteExporter> = match format {
                ExportFormat::Csv => Box::new(CsvExporter::today()),
                ExportFormat::Document => Box::new(DocumentExporter::today()),
            };
            match output {
                Some(path) => {
                    exporter.write_to(&palette, &name, &path)?;
                    info!(path = %path.display(), format = exporter.name(), "exported palette");
                }
                None => write!(out, "{}", exporter.render(&palette, &name))?,
            }
        }
        Command::Edit { store } => {
            drop(out);
            let store: Box<dyn KeyValueStore> = match store {
                Some(path) => Box::new(
                    JsonFileStore::open(&path)
                        .with_context(|| format!("failed to open store: {}", path.display()))?,
                ),
                None => Box::new(MemoryStore::new()),
            };
            let session = PaletteSession::new(&config, store)?;
            let session = tui::run(TuiApp::new(session))?;
            info!(colors = session.palette().len(), "editor closed");
        }
    }

    Ok(())
}
