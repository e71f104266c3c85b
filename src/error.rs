//! Error types for palette editing and color parsing.

use thiserror::Error;

/// Result type alias for swatchbook operations.
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Errors raised at the boundary of the color engine.
///
/// Presentation helpers (format conversion, contrast scoring, simulation)
/// never return these; they degrade to a neutral value instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// Input is not a 3- or 6-digit hex color
    #[error("invalid color: {input:?} (expected #RGB or #RRGGBB)")]
    InvalidColor { input: String },

    /// A generator was asked for fewer than one color
    #[error("invalid color count: {count} (must be at least 1)")]
    InvalidCount { count: usize },

    /// No color with this id exists in the current palette
    #[error("no color with id {id:?} in palette")]
    UnknownColor { id: String },

    /// The key-value store could not be read or written
    #[error("store error: {message}")]
    Store { message: String },

    /// Configuration values are out of range
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl PaletteError {
    pub fn invalid_color(input: impl Into<String>) -> Self {
        Self::InvalidColor {
            input: input.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
