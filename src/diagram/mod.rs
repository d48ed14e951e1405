//! # Bit-Field Diagrams
//!
//! Layout of instruction-word and register diagrams on a [`Canvas`].
//!
//! ```text
//!   name              syntax              time      ← description row
//! ┌───┬───┬───┬───────────────┬───────────────────┐
//! │   Opcode  │ R │          Address              │ ← field labels
//! └┴──┴┴──┴┴──┴───┴─┴─┴─┴─┴─┴─┴─┴─┴─┴─┴─┴─┴─┴─┴───┘ ← ticks: full / major / minor
//!  15      12 11 10                               0  ← bit numbers
//! ```
//!
//! Every component works in two steps: a pure layout pass producing
//! [`Segment`]s and [`TextRun`]s in diagram units, then a draw pass that
//! replays them on the canvas. Layouts serialize, so they double as
//! machine-readable figure metadata.

pub mod description;
pub mod fields;
pub mod ruler;
pub mod word;

pub use description::Description;
pub use fields::{Field, FieldPlacement, layout_fields};
pub use ruler::{BitNumbering, RulerLayout, TickMark, TickProgram, TickWeight, layout_ruler};
pub use word::{Word, WordLayout};

use serde::{Deserialize, Serialize};

use crate::canvas::{Align, Canvas};
use crate::error::FigureError;

/// Baseline drop below the box centre for vertically centred labels,
/// in multiples of the font size.
const LABEL_BASELINE_DROP: f32 = 0.36;

/// Geometry of one ruled box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    /// Left edge.
    pub x: f32,
    /// Lower logical edge; ticks rise from here.
    pub y: f32,
    /// Number of bit cells.
    pub bits: u32,
    /// Width of one bit cell.
    pub cell: f32,
    /// Box height.
    pub height: f32,
}

impl Frame {
    pub const CELL: f32 = 2.0;
    pub const HEIGHT: f32 = 2.0;

    /// A box with the standard 2×2 unit cells.
    pub fn new(x: f32, y: f32, bits: u32) -> Self {
        Self {
            x,
            y,
            bits,
            cell: Self::CELL,
            height: Self::HEIGHT,
        }
    }

    pub fn validate(&self) -> Result<(), FigureError> {
        if self.bits == 0 {
            return Err(FigureError::InvalidFrame("box has no bits".into()));
        }
        if !(self.cell.is_finite() && self.cell > 0.0) {
            return Err(FigureError::InvalidFrame(format!(
                "cell width must be positive, got {}",
                self.cell
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(FigureError::InvalidFrame(format!(
                "box height must be positive, got {}",
                self.height
            )));
        }
        Ok(())
    }

    /// Total width of the box.
    pub fn span(&self) -> f32 {
        self.bits as f32 * self.cell
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.span()
    }

    pub fn mid(&self) -> f32 {
        self.x + self.span() / 2.0
    }

    /// X of boundary `i`, counted from the left edge.
    pub fn boundary_x(&self, i: usize) -> f32 {
        self.x + i as f32 * self.cell
    }

    /// Bit index of the cell `column` places from the left.
    pub fn bit_at(&self, column: usize) -> u32 {
        self.bits - 1 - column as u32
    }

    /// Baseline for text of `size` beside the box on `side`.
    ///
    /// Sides are visual, so the result depends on the axis convention.
    pub fn baseline_beside(&self, side: Side, gap: f32, size: f32, right_handed: bool) -> f32 {
        match (side, right_handed) {
            (Side::Above, true) => self.y + self.height + gap,
            (Side::Below, true) => self.y - gap - size,
            (Side::Above, false) => self.y - gap,
            (Side::Below, false) => self.y + self.height + gap + size,
        }
    }

    /// Baseline for text of `size` vertically centred in the box.
    pub fn baseline_centred(&self, size: f32, right_handed: bool) -> f32 {
        let centre = self.y + self.height / 2.0;
        if right_handed {
            centre - LABEL_BASELINE_DROP * size
        } else {
            centre + LABEL_BASELINE_DROP * size
        }
    }
}

/// Visual side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Above,
    Below,
}

impl Side {
    pub(crate) fn above() -> Side {
        Side::Above
    }

    pub(crate) fn below() -> Side {
        Side::Below
    }
}

/// A straight line in diagram units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: [f32; 2],
    pub to: [f32; 2],
}

impl Segment {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            from: [x0, y0],
            to: [x1, y1],
        }
    }

    pub fn length(&self) -> f32 {
        let dx = self.to[0] - self.from[0];
        let dy = self.to[1] - self.from[1];
        (dx * dx + dy * dy).sqrt()
    }

    /// Add to the canvas's pending path.
    pub fn trace(&self, canvas: &mut Canvas<'_>) {
        canvas.line(self.from[0], self.from[1], self.to[0], self.to[1]);
    }
}

/// One piece of text placed in diagram units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    /// Anchor x; `align` says which part of the text sits on it.
    pub x: f32,
    /// Baseline.
    pub y: f32,
    pub size: f32,
    pub align: Align,
}

impl TextRun {
    pub fn draw(&self, canvas: &mut Canvas<'_>) {
        canvas.set_font_size(self.size);
        canvas.text(self.x, self.y, &self.text, self.align);
    }
}
