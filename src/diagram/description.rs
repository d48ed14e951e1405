//! Description row: operation name, assembly syntax and timing beside a box.

use serde::{Deserialize, Serialize};

use super::{Frame, Side, TextRun};
use crate::canvas::Align;

/// Font size of the description row.
pub const DESCRIPTION_SIZE: f32 = 1.0;

/// Gap between the box and the description baseline.
pub const DESCRIPTION_GAP: f32 = 0.5;

/// Name, syntax and timing of one instruction. Any of them may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default = "Side::above")]
    pub side: Side,
}

impl Default for Description {
    fn default() -> Self {
        Self {
            name: None,
            syntax: None,
            time: None,
            side: Side::Above,
        }
    }
}

impl Description {
    pub fn new(name: impl Into<String>, syntax: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            syntax: Some(syntax.into()),
            time: Some(time.into()),
            side: Side::Above,
        }
    }

    /// Text runs anchored on the box's left edge, midpoint and right edge.
    pub fn layout(&self, frame: &Frame, right_handed: bool) -> Vec<TextRun> {
        let y = frame.baseline_beside(self.side, DESCRIPTION_GAP, DESCRIPTION_SIZE, right_handed);

        [
            (&self.name, frame.left(), Align::Left),
            (&self.syntax, frame.mid(), Align::Center),
            (&self.time, frame.right(), Align::Right),
        ]
        .into_iter()
        .filter_map(|(text, x, align)| {
            text.as_ref().map(|text| TextRun {
                text: text.clone(),
                x,
                y,
                size: DESCRIPTION_SIZE,
                align,
            })
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_row() {
        let frame = Frame::new(0.0, 1.0, 16);
        let runs = Description::new("MOVe", "MOV src,dst", "2.3 us").layout(&frame, true);

        let anchors: Vec<(&str, f32, Align)> =
            runs.iter().map(|r| (r.text.as_str(), r.x, r.align)).collect();
        assert_eq!(
            anchors,
            vec![
                ("MOVe", 0.0, Align::Left),
                ("MOV src,dst", 16.0, Align::Center),
                ("2.3 us", 32.0, Align::Right),
            ]
        );
        // Half a unit above the top rule
        assert!(runs.iter().all(|r| (r.y - 3.5).abs() < 1e-6));
    }

    #[test]
    fn test_syntax_only() {
        let frame = Frame::new(0.0, 1.0, 16);
        let description = Description {
            syntax: Some("Bxx loc".into()),
            ..Default::default()
        };
        let runs = description.layout(&frame, true);

        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].x, frame.mid());
        assert_eq!(runs[0].align, Align::Center);
    }

    #[test]
    fn test_omissions_do_not_move_others() {
        let frame = Frame::new(2.0, 0.0, 8);
        let description = Description {
            name: Some("BR".into()),
            time: Some("2.6 us".into()),
            ..Default::default()
        };
        let runs = description.layout(&frame, true);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].x, 2.0);
        assert_eq!(runs[1].x, 18.0);
    }

    #[test]
    fn test_below_side() {
        let frame = Frame::new(0.0, 3.0, 16);
        let description = Description {
            name: Some("HLT".into()),
            side: Side::Below,
            ..Default::default()
        };
        let runs = description.layout(&frame, true);
        assert!((runs[0].y - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_deserialize_defaults_above() {
        let description: Description = serde_json::from_str(r#"{"syntax": "J addr"}"#).unwrap();
        assert_eq!(description.side, Side::Above);
        assert!(description.name.is_none());
    }
}
