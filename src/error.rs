//! # Error Types
//!
//! This module defines error types used throughout the bitfig library.

use thiserror::Error;

/// Main error type for bitfig operations
#[derive(Debug, Error)]
pub enum FigureError {
    /// Canvas dimensions that cannot produce a drawing surface
    #[error("Invalid canvas: {0}")]
    InvalidCanvas(String),

    /// Ruled box geometry that cannot be laid out
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Unknown character in a tick program
    #[error("Invalid tick marker {marker:?} at position {position}")]
    TickMarker { position: usize, marker: char },

    /// Unknown character in a bit numbering
    #[error("Invalid numbering marker {marker:?} at position {position}")]
    NumberMarker { position: usize, marker: char },

    /// Tick program too short to describe a box
    #[error("Tick program has {actual} boundaries, need at least {minimum}")]
    TickCount { minimum: usize, actual: usize },

    /// Bit numbering does not cover the box
    #[error("Bit numbering covers {actual} bits, expected {expected}")]
    NumberCount { expected: usize, actual: usize },

    /// Field widths do not add up to the box width
    #[error("Field widths sum to {actual} bits, expected {expected}")]
    FieldWidthMismatch { expected: u32, actual: u32 },

    /// Field with no bits
    #[error("Field {index} has zero width")]
    EmptyField { index: usize },

    /// Font loading error
    #[error("Font error: {0}")]
    Font(String),

    /// Image encoding or writing error
    #[error("Image error: {0}")]
    Image(String),

    /// Figure sheet parsing error
    #[error("Sheet error: {0}")]
    Sheet(String),

    /// Figure name not present in the sheet
    #[error("Unknown figure '{0}'")]
    UnknownFigure(String),

    /// Style preset name not known
    #[error("Unknown style '{0}'")]
    UnknownStyle(String),

    /// Error raised while rendering a named figure
    #[error("Figure '{name}': {source}")]
    InFigure {
        name: String,
        #[source]
        source: Box<FigureError>,
    },

    /// Start-up failure (logging, arguments)
    #[error("Initialisation failure: {0}")]
    Init(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FigureError {
    /// Attach the name of the figure being rendered.
    pub fn in_figure(self, name: &str) -> Self {
        FigureError::InFigure {
            name: name.to_string(),
            source: Box::new(self),
        }
    }
}
