//! A complete word diagram: ruler, field labels and description row on one
//! shared frame.

use serde::{Deserialize, Serialize};

use super::{
    BitNumbering, Description, Field, FieldPlacement, Frame, RulerLayout, Side, TextRun,
    TickProgram, layout_fields, layout_ruler,
};
use crate::canvas::Canvas;
use crate::error::FigureError;

fn default_cell() -> f32 {
    Frame::CELL
}

fn default_height() -> f32 {
    Frame::HEIGHT
}

/// One ruled box with everything drawn on and around it.
///
/// The bit count comes from the tick program; numbering and fields, when
/// present, must agree with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    #[serde(default)]
    pub x: f32,
    pub y: f32,
    pub ticks: TickProgram,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbers: Option<BitNumbering>,
    #[serde(default = "Side::below")]
    pub numbers_side: Side,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(default = "default_cell")]
    pub cell: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

impl Word {
    pub fn new(x: f32, y: f32, ticks: TickProgram) -> Self {
        Self {
            x,
            y,
            ticks,
            numbers: None,
            numbers_side: Side::Below,
            fields: Vec::new(),
            description: None,
            cell: Frame::CELL,
            height: Frame::HEIGHT,
        }
    }

    pub fn with_numbers(mut self, numbers: BitNumbering) -> Self {
        self.numbers = Some(numbers);
        self
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_description(mut self, description: Description) -> Self {
        self.description = Some(description);
        self
    }

    pub fn frame(&self) -> Frame {
        Frame {
            x: self.x,
            y: self.y,
            bits: self.ticks.bits(),
            cell: self.cell,
            height: self.height,
        }
    }

    pub fn layout(&self, right_handed: bool) -> Result<WordLayout, FigureError> {
        let frame = self.frame();
        let ruler = layout_ruler(
            &frame,
            &self.ticks,
            self.numbers.as_ref(),
            self.numbers_side,
            right_handed,
        )?;
        let fields = if self.fields.is_empty() {
            Vec::new()
        } else {
            layout_fields(&frame, &self.fields, right_handed)?
        };
        let description = self
            .description
            .as_ref()
            .map(|d| d.layout(&frame, right_handed))
            .unwrap_or_default();

        Ok(WordLayout {
            frame,
            ruler,
            fields,
            description,
        })
    }
}

/// Laid-out word, ready to draw or serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordLayout {
    pub frame: Frame,
    pub ruler: RulerLayout,
    pub fields: Vec<FieldPlacement>,
    pub description: Vec<TextRun>,
}

impl WordLayout {
    pub fn draw(&self, canvas: &mut Canvas<'_>) {
        self.ruler.draw(canvas);
        for field in &self.fields {
            field.draw(canvas);
        }
        for run in &self.description {
            run.draw(canvas);
        }
    }

    /// Every text run of the word, in drawing order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ruler
            .numbers
            .iter()
            .chain(self.fields.iter().filter_map(|f| f.label.as_ref()))
            .chain(self.description.iter())
    }
}
