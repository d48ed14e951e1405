//! Element types of a figure.
//!
//! All types derive `Serialize + Deserialize` so the same types work for
//! both Rust construction and JSON figure sheets.

use serde::{Deserialize, Serialize};

use crate::canvas::{Align, CAPTION_NUDGE};
use crate::diagram::{Segment, TextRun, Word};

fn default_text_size() -> f32 {
    1.0
}

/// One thing drawn on a figure's canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// Ruled box with ticks, numbers, field labels and description.
    Word(Word),
    /// Centred caption, usually the figure title.
    Caption(Caption),
    /// Free text.
    Text(Label),
    /// Free line.
    Line(Line),
}

/// Centred text, nudged slightly left like the manuals' titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub x: f32,
    pub y: f32,
    pub text: String,
    #[serde(default = "default_text_size")]
    pub size: f32,
}

impl Caption {
    pub fn new(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            size: default_text_size(),
        }
    }

    pub fn run(&self) -> TextRun {
        TextRun {
            text: self.text.clone(),
            x: self.x - CAPTION_NUDGE,
            y: self.y,
            size: self.size,
            align: Align::Center,
        }
    }
}

/// Text placed at an anchor with explicit alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub x: f32,
    pub y: f32,
    pub text: String,
    #[serde(default)]
    pub align: Align,
    #[serde(default = "default_text_size")]
    pub size: f32,
}

impl Label {
    pub fn new(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            align: Align::Left,
            size: default_text_size(),
        }
    }

    pub fn run(&self) -> TextRun {
        TextRun {
            text: self.text.clone(),
            x: self.x,
            y: self.y,
            size: self.size,
            align: self.align,
        }
    }
}

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: [f32; 2],
    pub to: [f32; 2],
}

impl Line {
    pub fn segment(&self) -> Segment {
        Segment {
            from: self.from,
            to: self.to,
        }
    }
}
