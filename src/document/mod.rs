//! # Figure Sheets
//!
//! A sheet is a list of figures plus the style they share. The same types
//! are the Rust API and the JSON format.
//!
//! ```
//! use bitfig::document::Sheet;
//!
//! let sheet = Sheet::from_json(r#"{
//!     "style": "cp1600",
//!     "figures": [{
//!         "name": "5-1-jmp",
//!         "canvas": {"margin": 8, "width": 32, "height": 4.64, "scale": 11},
//!         "elements": [
//!             {"ticks": "l...ll..........l", "y": 2.64, "numbers": "x..xxx.........x",
//!              "fields": [[4, "Opcode"], [1, "R"], [11, "Address"]]},
//!             {"caption": "Jump Format", "x": 16, "y": 0.32}
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! assert_eq!(sheet.names().collect::<Vec<_>>(), vec!["5-1-jmp"]);
//! ```
//!
//! ## Shorthand
//!
//! Elements without a `"type"` key are recognised by a distinctive key:
//!
//! | Key | Element | Moved to |
//! |-----|---------|----------|
//! | `ticks` | word | |
//! | `caption` | caption | `text` |
//! | `text` | text | |
//! | `from` | line | |

pub mod types;

pub use types::*;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::canvas::{Canvas, CanvasSpec};
use crate::diagram::{Segment, TextRun, WordLayout};
use crate::error::FigureError;
use crate::style::Style;
use crate::typeface::Typeface;

/// Sheets compiled into the binary.
pub const BUILTIN_SHEETS: &[(&str, &str)] = &[
    ("cp1600", include_str!("../fixtures/cp1600.json")),
    ("pdp11", include_str!("../fixtures/pdp11.json")),
    ("alpha", include_str!("../fixtures/alpha.json")),
];

// ============================================================================
// SHORTHAND DESERIALIZATION
// ============================================================================

/// Shorthand keys: (shorthand_key, type_name, target_field).
const SHORTHANDS: &[(&str, &str, &str)] = &[
    ("ticks", "word", "ticks"),
    ("caption", "caption", "text"),
    ("text", "text", "text"),
    ("from", "line", "from"),
];

/// Rewrite a shorthand JSON object to canonical `{"type": ...}` form.
/// Only called when the map has no `"type"` key.
fn normalize_shorthand(map: &mut serde_json::Map<String, serde_json::Value>) -> Result<(), String> {
    for &(key, type_name, field) in SHORTHANDS {
        if let Some(val) = map.remove(key) {
            map.insert("type".into(), serde_json::Value::String(type_name.into()));
            map.insert(field.into(), val);
            return Ok(());
        }
    }
    Err(format!(
        "element has no 'type' field and no shorthand key ({})",
        SHORTHANDS
            .iter()
            .map(|(k, _, _)| *k)
            .collect::<Vec<_>>()
            .join(", ")
    ))
}

/// Deserialize a `Vec<Element>` with shorthand support.
fn deserialize_elements<'de, D>(deserializer: D) -> Result<Vec<Element>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let mut obj = match v {
                serde_json::Value::Object(map) => map,
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "elements[{}]: expected object, got {}",
                        i, other
                    )));
                }
            };

            if !obj.contains_key("type") {
                normalize_shorthand(&mut obj)
                    .map_err(|e| serde::de::Error::custom(format!("elements[{}]: {}", i, e)))?;
            }

            serde_json::from_value(serde_json::Value::Object(obj))
                .map_err(|e| serde::de::Error::custom(format!("elements[{}]: {}", i, e)))
        })
        .collect()
}

// ============================================================================
// FIGURES
// ============================================================================

/// One image: canvas dimensions and the elements drawn on it, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub name: String,
    pub canvas: CanvasSpec,
    #[serde(default, deserialize_with = "deserialize_elements")]
    pub elements: Vec<Element>,
}

/// Everything drawn on a figure, in diagram units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureLayout {
    pub name: String,
    /// Image size in pixels.
    pub width: u32,
    pub height: u32,
    pub words: Vec<WordLayout>,
    /// Captions and free text.
    pub texts: Vec<TextRun>,
    pub lines: Vec<Segment>,
}

impl Figure {
    pub fn new(name: impl Into<String>, canvas: CanvasSpec) -> Self {
        Self {
            name: name.into(),
            canvas,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Draw every element on a fresh canvas.
    ///
    /// Consecutive free lines are stroked together so their joints are
    /// painted once.
    pub fn render<'f>(
        &self,
        style: &Style,
        typeface: &'f Typeface,
    ) -> Result<(Canvas<'f>, FigureLayout), FigureError> {
        let mut canvas =
            Canvas::new(&self.canvas, style, typeface).map_err(|e| e.in_figure(&self.name))?;
        let right_handed = canvas.right_handed();
        let (width, height) = canvas.size();

        let mut layout = FigureLayout {
            name: self.name.clone(),
            width,
            height,
            words: Vec::new(),
            texts: Vec::new(),
            lines: Vec::new(),
        };

        for element in &self.elements {
            if let Element::Line(line) = element {
                let segment = line.segment();
                segment.trace(&mut canvas);
                layout.lines.push(segment);
                continue;
            }
            canvas.stroke();

            match element {
                Element::Word(word) => {
                    let word_layout = word
                        .layout(right_handed)
                        .map_err(|e| e.in_figure(&self.name))?;
                    word_layout.draw(&mut canvas);
                    layout.words.push(word_layout);
                }
                Element::Caption(caption) => {
                    let run = caption.run();
                    run.draw(&mut canvas);
                    layout.texts.push(run);
                }
                Element::Text(label) => {
                    let run = label.run();
                    run.draw(&mut canvas);
                    layout.texts.push(run);
                }
                Element::Line(_) => {}
            }
        }
        canvas.stroke();

        debug!(
            figure = %self.name,
            strokes = canvas.stroke_count(),
            texts = canvas.text_run_count(),
            "figure rendered"
        );
        Ok((canvas, layout))
    }
}

// ============================================================================
// SHEETS
// ============================================================================

/// Style of a sheet: a preset name or a full inline style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleRef {
    Preset(String),
    Inline(Style),
}

impl Default for StyleRef {
    fn default() -> Self {
        StyleRef::Preset(Style::CP1600.name.to_string())
    }
}

/// A batch of figures sharing one style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    #[serde(default)]
    pub style: StyleRef,
    pub figures: Vec<Figure>,
}

/// A figure written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedFigure {
    pub path: PathBuf,
    pub layout: FigureLayout,
}

impl Sheet {
    pub fn from_json(json: &str) -> Result<Self, FigureError> {
        let sheet: Sheet =
            serde_json::from_str(json).map_err(|e| FigureError::Sheet(e.to_string()))?;
        sheet.check_names()?;
        Ok(sheet)
    }

    /// Figure names must be unique: each one becomes an output file.
    pub fn check_names(&self) -> Result<(), FigureError> {
        let mut seen = HashSet::new();
        match self.names().find(|name| !seen.insert(*name)) {
            Some(name) => Err(FigureError::Sheet(format!("duplicate figure name '{}'", name))),
            None => Ok(()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, FigureError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|e| match e {
            FigureError::Sheet(msg) => FigureError::Sheet(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// One of the [`BUILTIN_SHEETS`].
    pub fn builtin(name: &str) -> Result<Self, FigureError> {
        let (_, json) = BUILTIN_SHEETS
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| {
                FigureError::Sheet(format!(
                    "no built-in sheet '{}' (available: {})",
                    name,
                    builtin_names().join(", ")
                ))
            })?;
        Self::from_json(json)
    }

    /// Resolve the sheet's style reference.
    pub fn style(&self) -> Result<Style, FigureError> {
        match &self.style {
            StyleRef::Preset(name) => {
                Style::by_name(name).ok_or_else(|| FigureError::UnknownStyle(name.clone()))
            }
            StyleRef::Inline(style) => Ok(style.clone()),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.figures.iter().map(|f| f.name.as_str())
    }

    pub fn figure(&self, name: &str) -> Option<&Figure> {
        self.figures.iter().find(|f| f.name == name)
    }

    /// Figures selected by `only`; all of them when `only` is empty.
    ///
    /// Repeated names select their figure once, at the first mention.
    pub fn select(&self, only: &[String]) -> Result<Vec<&Figure>, FigureError> {
        if only.is_empty() {
            return Ok(self.figures.iter().collect());
        }
        let mut seen = HashSet::new();
        only.iter()
            .filter(|name| seen.insert(name.as_str()))
            .map(|name| self.figure(name).ok_or_else(|| FigureError::UnknownFigure(name.clone())))
            .collect()
    }

    /// Render the selected figures into `out_dir`, one worker per figure.
    ///
    /// Results come back in selection order.
    pub fn render_to_dir(
        &self,
        style: &Style,
        typeface: &Typeface,
        out_dir: &Path,
        only: &[String],
    ) -> Result<Vec<RenderedFigure>, FigureError> {
        self.check_names()?;
        let figures = self.select(only)?;
        std::fs::create_dir_all(out_dir)?;

        figures
            .par_iter()
            .map(|figure| {
                let (canvas, layout) = figure.render(style, typeface)?;
                let path = out_dir.join(style.file_name(&figure.name));
                canvas
                    .write_png(&path)
                    .map_err(|e| e.in_figure(&figure.name))?;
                info!(path = %path.display(), "wrote figure");
                Ok(RenderedFigure { path, layout })
            })
            .collect()
    }
}

/// Names of the [`BUILTIN_SHEETS`].
pub fn builtin_names() -> Vec<&'static str> {
    BUILTIN_SHEETS.iter().map(|(name, _)| *name).collect()
}
