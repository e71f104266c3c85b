//! # swatchbook
//!
//! Color palette engine: color-space conversion, WCAG contrast scoring,
//! color-vision-deficiency simulation and a bounded undo/redo history for
//! palette edits, plus CSV/document exporters and a terminal editor.
//!
//! ```
//! use swatchbook::{accessibility, convert};
//!
//! let formats = convert::convert_color("#ff6b6b");
//! assert_eq!(formats.rgb, "rgb(255, 107, 107)");
//!
//! let result = accessibility::check_accessibility("#000000", "#FFFFFF");
//! assert!(result.passes());
//! ```

pub mod accessibility;
pub mod color;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod geometry;
pub mod history;
pub mod session;
pub mod store;
pub mod tui;
pub mod vision;

pub use color::{Color, ColorValue};
pub use config::Config;
pub use error::{PaletteError, Result};
pub use history::History;
pub use session::PaletteSession;
