//! Field labels: names of the sub-fields of a ruled box.
//!
//! Fields are listed most significant first. Each label is centred on its
//! span; fields without a label still take up their bits.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Frame, TextRun};
use crate::canvas::{Align, Canvas};
use crate::error::FigureError;

/// Font size of field labels.
pub const LABEL_SIZE: f32 = 1.0;

/// A contiguous run of bits, optionally labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub width: u32,
    pub label: Option<String>,
}

impl Field {
    pub fn new(width: u32, label: impl Into<String>) -> Self {
        Self {
            width,
            label: Some(label.into()),
        }
    }

    /// A field that takes space but shows nothing.
    pub fn blank(width: u32) -> Self {
        Self { width, label: None }
    }
}

/// Accepts `[width, label]`, `[width, null]`, a bare width, or
/// `{"width": .., "label": ..}`. Numeric labels become text.
impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum LabelValue {
            Text(String),
            Number(i64),
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FieldValue {
            Pair(u32, Option<LabelValue>),
            Bare(u32),
            Record {
                width: u32,
                #[serde(default)]
                label: Option<LabelValue>,
            },
        }

        let (width, label) = match FieldValue::deserialize(deserializer)? {
            FieldValue::Pair(width, label) => (width, label),
            FieldValue::Bare(width) => (width, None),
            FieldValue::Record { width, label } => (width, label),
        };

        Ok(Field {
            width,
            label: label.map(|l| match l {
                LabelValue::Text(s) => s,
                LabelValue::Number(n) => n.to_string(),
            }),
        })
    }
}

/// Where a field landed in the box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldPlacement {
    /// Position in the field list.
    pub index: usize,
    pub width: u32,
    /// Most significant bit covered.
    pub msb: u32,
    /// Least significant bit covered.
    pub lsb: u32,
    /// Left edge in units.
    pub left: f32,
    /// Right edge in units.
    pub right: f32,
    /// Absent for unlabelled fields.
    pub label: Option<TextRun>,
}

impl FieldPlacement {
    pub fn span(&self) -> f32 {
        self.right - self.left
    }

    pub fn draw(&self, canvas: &mut Canvas<'_>) {
        if let Some(label) = &self.label {
            label.draw(canvas);
        }
    }
}

/// Place `fields` left to right across `frame`.
///
/// The widths must be positive and add up to the box's bit count.
pub fn layout_fields(
    frame: &Frame,
    fields: &[Field],
    right_handed: bool,
) -> Result<Vec<FieldPlacement>, FigureError> {
    frame.validate()?;

    if let Some(index) = fields.iter().position(|f| f.width == 0) {
        return Err(FigureError::EmptyField { index });
    }
    let total: u64 = fields.iter().map(|f| f.width as u64).sum();
    if total != frame.bits as u64 {
        return Err(FigureError::FieldWidthMismatch {
            expected: frame.bits,
            actual: total.min(u32::MAX as u64) as u32,
        });
    }

    let y = frame.baseline_centred(LABEL_SIZE, right_handed);
    let mut offset = 0u32;

    let placements = fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let left = frame.boundary_x(offset as usize);
            let right = frame.boundary_x((offset + field.width) as usize);
            let placement = FieldPlacement {
                index,
                width: field.width,
                msb: frame.bits - 1 - offset,
                lsb: frame.bits - offset - field.width,
                left,
                right,
                label: field
                    .label
                    .as_ref()
                    .filter(|l| !l.is_empty())
                    .map(|text| TextRun {
                        text: text.clone(),
                        x: frame.x + (offset as f32 + field.width as f32 / 2.0) * frame.cell,
                        y,
                        size: LABEL_SIZE,
                        align: Align::Center,
                    }),
            };
            offset += field.width;
            placement
        })
        .collect();

    Ok(placements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasSpec;
    use crate::style::Style;
    use crate::typeface::Typeface;
    use pretty_assertions::assert_eq;

    fn labels(placements: &[FieldPlacement]) -> Vec<(&str, f32)> {
        placements
            .iter()
            .filter_map(|p| p.label.as_ref().map(|l| (l.text.as_str(), l.x)))
            .collect()
    }

    #[test]
    fn test_first_field_is_most_significant() {
        let frame = Frame::new(0.0, 2.0, 16);
        let fields = [Field::new(8, "A"), Field::new(8, "B")];
        let placed = layout_fields(&frame, &fields, true).unwrap();

        assert_eq!((placed[0].msb, placed[0].lsb), (15, 8));
        assert_eq!((placed[1].msb, placed[1].lsb), (7, 0));
        assert_eq!(labels(&placed), vec![("A", 8.0), ("B", 24.0)]);
    }

    #[test]
    fn test_conservation_and_disjoint_extents() {
        let frame = Frame::new(3.0, 0.0, 16);
        let fields = [
            Field::new(1, "v"),
            Field::new(3, "op"),
            Field::new(6, "src"),
            Field::new(6, "dst"),
        ];
        let placed = layout_fields(&frame, &fields, true).unwrap();

        let total: f32 = placed.iter().map(|p| p.span()).sum();
        assert!((total - frame.span()).abs() < 1e-5);
        assert_eq!(placed[0].left, frame.left());
        assert_eq!(placed.last().unwrap().right, frame.right());
        for pair in placed.windows(2) {
            assert!(pair[0].right <= pair[1].left);
        }

        // Same bookkeeping in device pixels
        let face = Typeface::bitmap();
        let spec = CanvasSpec::new(8, 38.0, 4.0, 11);
        let canvas = Canvas::new(&spec, &Style::CP1600, &face).unwrap();
        let pixel_spans: Vec<(f32, f32)> = placed
            .iter()
            .map(|p| (canvas.to_device(p.left, 0.0).0, canvas.to_device(p.right, 0.0).0))
            .collect();
        let pixel_total: f32 = pixel_spans.iter().map(|(l, r)| r - l).sum();
        assert!((pixel_total - frame.span() * canvas.unit()).abs() < 1e-3);
        for ((l, r), p) in pixel_spans.iter().zip(&placed) {
            assert!((r - l - p.span() * canvas.unit()).abs() < 1e-3, "field {}", p.index);
        }
        for pair in pixel_spans.windows(2) {
            assert!(pair[0].1 <= pair[1].0);
        }
    }

    #[test]
    fn test_unlabelled_fields_consume_width() {
        let frame = Frame::new(0.0, 2.0, 16);
        let fields = [
            Field::blank(10),
            Field::new(3, "Mode"),
            Field::new(3, ""),
        ];
        let placed = layout_fields(&frame, &fields, true).unwrap();
        assert_eq!(labels(&placed), vec![("Mode", 23.0)]);
        assert_eq!(placed.len(), 3);
        assert!(placed[2].label.is_none());
    }

    #[test]
    fn test_label_centred_vertically() {
        let frame = Frame::new(0.0, 2.64, 16);
        let placed = layout_fields(&frame, &[Field::new(16, "X")], true).unwrap();
        let label = placed[0].label.as_ref().unwrap();
        assert!((label.y - 3.28).abs() < 1e-5);
        assert_eq!(label.size, LABEL_SIZE);
        assert_eq!(label.align, Align::Center);
    }

    #[test]
    fn test_width_mismatch() {
        let frame = Frame::new(0.0, 0.0, 16);
        let result = layout_fields(&frame, &[Field::new(8, "A"), Field::new(7, "B")], true);
        assert!(matches!(
            result,
            Err(FigureError::FieldWidthMismatch { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn test_zero_width_rejected() {
        let frame = Frame::new(0.0, 0.0, 16);
        let fields = [Field::new(16, "A"), Field::blank(0)];
        assert!(matches!(
            layout_fields(&frame, &fields, true),
            Err(FigureError::EmptyField { index: 1 })
        ));
    }

    #[test]
    fn test_deserialize_forms() {
        let fields: Vec<Field> =
            serde_json::from_str(r#"[[11, "Address"], [1, null], 2, [1, 7], {"width": 1, "label": "Z"}]"#)
                .unwrap();
        assert_eq!(
            fields,
            vec![
                Field::new(11, "Address"),
                Field::blank(1),
                Field::blank(2),
                Field::new(1, "7"),
                Field::new(1, "Z"),
            ]
        );
    }
}
