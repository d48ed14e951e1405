//! # Bitfig - Bit-Field Diagram Renderer
//!
//! Bitfig draws the word-format figures found in processor manuals: a ruled
//! box with tick marks at bit boundaries, bit numbers beside it, field names
//! inside it and an optional description row. It provides:
//!
//! - **Canvas**: raster surface in diagram units with optional unit grid
//! - **Diagram**: tick programs, bit numbering, field and description layout
//! - **Documents**: JSON figure sheets rendered in parallel to PNG files
//! - **Typefaces**: host outline fonts with an embedded bitmap fallback
//!
//! ## Quick Start
//!
//! ```
//! use bitfig::{
//!     canvas::{Canvas, CanvasSpec},
//!     diagram::{Field, Word},
//!     style::Style,
//!     typeface::Typeface,
//! };
//!
//! let face = Typeface::bitmap();
//! let spec = CanvasSpec::new(8, 32.0, 4.64, 11);
//! let mut canvas = Canvas::new(&spec, &Style::CP1600, &face)?;
//!
//! let word = Word::new(0.0, 2.64, "l...ll..........l".parse()?)
//!     .with_numbers("x..xxx.........x".parse()?)
//!     .with_fields(vec![
//!         Field::new(4, "Opcode"),
//!         Field::new(1, "R"),
//!         Field::new(11, "Address"),
//!     ]);
//! word.layout(canvas.right_handed())?.draw(&mut canvas);
//! canvas.caption(16.0, 0.32, "Jump Format");
//!
//! assert_eq!(canvas.size(), (369, 68));
//! # Ok::<(), bitfig::FigureError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`canvas`] | Drawing surface and coordinate mapping |
//! | [`diagram`] | Word diagrams: ruler, fields, description |
//! | [`document`] | Figure sheets and batch rendering |
//! | [`style`] | Per-manual rendering presets |
//! | [`typeface`] | Font discovery and glyph rasterization |
//! | [`error`] | Error types |

pub mod canvas;
pub mod diagram;
pub mod document;
pub mod error;
pub mod style;
pub mod typeface;

// Re-exports for convenience
pub use canvas::{Canvas, CanvasSpec};
pub use document::{Figure, Sheet};
pub use error::FigureError;
pub use style::Style;
pub use typeface::Typeface;
