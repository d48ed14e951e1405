//! Bit-field ruler: the ruled box with its tick marks and bit numbers.
//!
//! ## Tick Notation
//!
//! Tick programs can be written compactly, one marker per bit boundary,
//! left to right as drawn:
//!
//! | Marker | Weight | Height |
//! |--------|--------|--------|
//! | `l` `\|` | Full | box height |
//! | `o` | Major | height / 2.5 |
//! | `.` | Minor | height / 5 |
//! | ` ` `-` | None | |
//!
//! Bit numberings use `x` for a numbered cell and `.`, ` ` or `-` otherwise,
//! one marker per bit cell, most significant first.
//!
//! ```
//! use bitfig::diagram::{TickProgram, TickWeight};
//!
//! let program: TickProgram = "l...l...l".parse().unwrap();
//! assert_eq!(program.bits(), 8);
//! assert_eq!(program.weights()[4], TickWeight::Full);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::{Frame, Segment, Side, TextRun};
use crate::canvas::{Align, CAPTION_NUDGE, Canvas};
use crate::error::FigureError;

/// Font size of bit numbers.
pub const NUMBER_SIZE: f32 = 0.75;

/// Gap between the box and its bit numbers.
pub const NUMBER_GAP: f32 = 0.25;

/// Height category of a vertical divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickWeight {
    #[default]
    None,
    Minor,
    Major,
    Full,
}

impl TickWeight {
    /// Tick height as a fraction of the box height.
    pub fn ratio(self) -> f32 {
        match self {
            TickWeight::None => 0.0,
            TickWeight::Minor => 1.0 / 5.0,
            TickWeight::Major => 1.0 / 2.5,
            TickWeight::Full => 1.0,
        }
    }

    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'l' | '|' => Some(TickWeight::Full),
            'o' => Some(TickWeight::Major),
            '.' => Some(TickWeight::Minor),
            ' ' | '-' => Some(TickWeight::None),
            _ => None,
        }
    }

    pub fn marker(self) -> char {
        match self {
            TickWeight::None => '-',
            TickWeight::Minor => '.',
            TickWeight::Major => 'o',
            TickWeight::Full => 'l',
        }
    }
}

/// One weight per bit boundary, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickProgram {
    weights: Vec<TickWeight>,
}

impl TickProgram {
    pub fn new(weights: Vec<TickWeight>) -> Result<Self, FigureError> {
        if weights.len() < 2 {
            return Err(FigureError::TickCount {
                minimum: 2,
                actual: weights.len(),
            });
        }
        Ok(Self { weights })
    }

    /// Number of bit cells spanned.
    pub fn bits(&self) -> u32 {
        (self.weights.len() - 1) as u32
    }

    pub fn weights(&self) -> &[TickWeight] {
        &self.weights
    }

    /// Boundaries that get a tick.
    pub fn drawn(&self) -> usize {
        self.weights.iter().filter(|w| **w != TickWeight::None).count()
    }
}

impl FromStr for TickProgram {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let weights = s
            .chars()
            .enumerate()
            .map(|(position, marker)| {
                TickWeight::from_marker(marker).ok_or(FigureError::TickMarker { position, marker })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(weights)
    }
}

impl fmt::Display for TickProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for w in &self.weights {
            write!(f, "{}", w.marker())?;
        }
        Ok(())
    }
}

impl Serialize for TickProgram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Accepts the marker notation or a list of weight names.
impl<'de> Deserialize<'de> for TickProgram {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ProgramValue {
            Notation(String),
            Weights(Vec<TickWeight>),
        }

        match ProgramValue::deserialize(deserializer)? {
            ProgramValue::Notation(s) => s.parse().map_err(serde::de::Error::custom),
            ProgramValue::Weights(w) => TickProgram::new(w).map_err(serde::de::Error::custom),
        }
    }
}

/// Which bit cells get their index printed, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitNumbering {
    cells: Vec<bool>,
}

impl BitNumbering {
    /// Number the given bit indices of a `bits`-wide box.
    pub fn bits(bits: u32, numbered: &[u32]) -> Self {
        let cells = (0..bits).map(|column| numbered.contains(&(bits - 1 - column))).collect();
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_numbered(&self, column: usize) -> bool {
        self.cells.get(column).copied().unwrap_or(false)
    }
}

impl FromStr for BitNumbering {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .enumerate()
            .map(|(position, marker)| match marker {
                'x' => Ok(true),
                '.' | ' ' | '-' => Ok(false),
                _ => Err(FigureError::NumberMarker { position, marker }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { cells })
    }
}

impl fmt::Display for BitNumbering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &on in &self.cells {
            write!(f, "{}", if on { 'x' } else { '.' })?;
        }
        Ok(())
    }
}

impl Serialize for BitNumbering {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BitNumbering {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A drawn vertical divider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickMark {
    /// Boundary index from the left edge.
    pub boundary: usize,
    pub weight: TickWeight,
    pub segment: Segment,
}

/// Strokes and numbers of one ruled box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulerLayout {
    /// Bottom and top rules.
    pub rules: [Segment; 2],
    pub ticks: Vec<TickMark>,
    pub numbers: Vec<TextRun>,
}

impl RulerLayout {
    /// Strokes emitted: both rules plus every drawn tick.
    pub fn stroke_count(&self) -> usize {
        self.rules.len() + self.ticks.len()
    }

    pub fn draw(&self, canvas: &mut Canvas<'_>) {
        for rule in &self.rules {
            rule.trace(canvas);
        }
        for tick in &self.ticks {
            tick.segment.trace(canvas);
        }
        canvas.stroke();

        for number in &self.numbers {
            number.draw(canvas);
        }
    }
}

/// Lay out the ruled box described by `program` at `frame`.
///
/// Both horizontal rules are always emitted, so the box is closed on top
/// and bottom whatever the end weights are.
pub fn layout_ruler(
    frame: &Frame,
    program: &TickProgram,
    numbering: Option<&BitNumbering>,
    numbers_side: Side,
    right_handed: bool,
) -> Result<RulerLayout, FigureError> {
    frame.validate()?;
    if program.bits() != frame.bits {
        return Err(FigureError::TickCount {
            minimum: frame.bits as usize + 1,
            actual: program.weights().len(),
        });
    }

    let span = frame.span();
    let rules = [
        Segment::new(frame.x, frame.y, frame.x + span, frame.y),
        Segment::new(frame.x, frame.y + frame.height, frame.x + span, frame.y + frame.height),
    ];

    let ticks = program
        .weights()
        .iter()
        .enumerate()
        .filter(|(_, w)| **w != TickWeight::None)
        .map(|(boundary, &weight)| {
            let x = frame.boundary_x(boundary);
            TickMark {
                boundary,
                weight,
                segment: Segment::new(x, frame.y, x, frame.y + weight.ratio() * frame.height),
            }
        })
        .collect();

    let mut numbers = Vec::new();
    if let Some(numbering) = numbering {
        if numbering.len() != frame.bits as usize {
            return Err(FigureError::NumberCount {
                expected: frame.bits as usize,
                actual: numbering.len(),
            });
        }

        let y = frame.baseline_beside(numbers_side, NUMBER_GAP, NUMBER_SIZE, right_handed);
        for column in (0..numbering.len()).filter(|&c| numbering.is_numbered(c)) {
            let centre = frame.boundary_x(column) + frame.cell / 2.0;
            numbers.push(TextRun {
                text: frame.bit_at(column).to_string(),
                x: centre - CAPTION_NUDGE,
                y,
                size: NUMBER_SIZE,
                align: Align::Center,
            });
        }
    }

    Ok(RulerLayout {
        rules,
        ticks,
        numbers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_weight_ratios() {
        // Box height, height / 2.5 and height / 5
        assert_eq!(TickWeight::Full.ratio(), 1.0);
        assert_eq!(TickWeight::Major.ratio(), 0.4);
        assert_eq!(TickWeight::Minor.ratio(), 0.2);
        assert_eq!(TickWeight::None.ratio(), 0.0);
    }

    #[test]
    fn test_parse_notation() {
        let program: TickProgram = "lo.- |".parse().unwrap();
        assert_eq!(
            program.weights(),
            &[
                TickWeight::Full,
                TickWeight::Major,
                TickWeight::Minor,
                TickWeight::None,
                TickWeight::None,
                TickWeight::Full,
            ]
        );
        assert_eq!(program.bits(), 5);
        assert_eq!(program.to_string(), "lo.--l");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "l..x.l".parse::<TickProgram>(),
            Err(FigureError::TickMarker { position: 3, marker: 'x' })
        ));
        assert!(matches!(
            "l".parse::<TickProgram>(),
            Err(FigureError::TickCount { minimum: 2, actual: 1 })
        ));
        assert!(matches!(
            "x.o".parse::<BitNumbering>(),
            Err(FigureError::NumberMarker { position: 2, marker: 'o' })
        ));
    }

    #[test]
    fn test_deserialize_both_forms() {
        let a: TickProgram = serde_json::from_str(r#""l.l""#).unwrap();
        let b: TickProgram = serde_json::from_str(r#"["full", "minor", "full"]"#).unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_str::<TickProgram>(r#""l?l""#).is_err());
    }

    #[test]
    fn test_stroke_count() {
        let program: TickProgram = "l..-o--.l".parse().unwrap();
        let frame = Frame::new(0.0, 0.0, program.bits());
        let layout = layout_ruler(&frame, &program, None, Side::Below, true).unwrap();
        assert_eq!(layout.ticks.len(), program.drawn());
        assert_eq!(layout.stroke_count(), 6 + 2);
    }

    #[test]
    fn test_box_closed_without_end_ticks() {
        let program: TickProgram = "-...-".parse().unwrap();
        let frame = Frame::new(1.0, 2.0, 4);
        let layout = layout_ruler(&frame, &program, None, Side::Below, true).unwrap();
        assert_eq!(
            layout.rules,
            [
                Segment::new(1.0, 2.0, 9.0, 2.0),
                Segment::new(1.0, 4.0, 9.0, 4.0),
            ]
        );
        assert_eq!(layout.ticks.len(), 3);
    }

    #[test]
    fn test_tick_heights() {
        let program: TickProgram = "lo.l".parse().unwrap();
        let frame = Frame::new(0.0, 1.0, 3);
        let layout = layout_ruler(&frame, &program, None, Side::Below, true).unwrap();
        let heights: Vec<f32> = layout.ticks.iter().map(|t| t.segment.length()).collect();
        for (got, want) in heights.iter().zip([2.0, 0.8, 0.4, 2.0]) {
            assert!((got - want).abs() < 1e-5, "tick height {got}, expected {want}");
        }
        assert_eq!(layout.ticks[1].segment.from, [2.0, 1.0]);
    }

    #[test]
    fn test_bit_numbers_decrease_left_to_right() {
        let program: TickProgram = "l...ll..........l".parse().unwrap();
        let numbering: BitNumbering = "x..xxx.........x".parse().unwrap();
        let frame = Frame::new(0.0, 2.64, 16);
        let layout = layout_ruler(&frame, &program, Some(&numbering), Side::Below, true).unwrap();

        let labels: Vec<&str> = layout.numbers.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(labels, vec!["15", "12", "11", "10", "0"]);

        let first = &layout.numbers[0];
        assert!((first.x - 0.9).abs() < 1e-5);
        assert!((first.y - 1.64).abs() < 1e-5);
        assert_eq!(first.size, NUMBER_SIZE);
        assert_eq!(first.align, Align::Center);
        let last = layout.numbers.last().unwrap();
        assert!((last.x - 30.9).abs() < 1e-5);
    }

    #[test]
    fn test_numbering_length_checked() {
        let program: TickProgram = "l...l".parse().unwrap();
        let numbering: BitNumbering = "x..".parse().unwrap();
        let frame = Frame::new(0.0, 0.0, 4);
        assert!(matches!(
            layout_ruler(&frame, &program, Some(&numbering), Side::Below, true),
            Err(FigureError::NumberCount { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_numbering_from_bit_indices() {
        let numbering = BitNumbering::bits(16, &[15, 12, 0]);
        assert_eq!(numbering.to_string(), "x..x...........x");
    }
}
