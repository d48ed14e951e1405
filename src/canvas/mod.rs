//! # Diagram Canvas
//!
//! A raster drawing surface addressed in diagram units.
//!
//! ## Coordinate System
//!
//! ```text
//! ├─ M ─┼──────── SW = round(W * S) ────────┼─ M ─┼1┤
//!       (0,0) lands on the centre of the first content pixel
//! ```
//!
//! One unit is `S / step` pixels. With `right_handed` set, logical Y grows
//! upwards in the image, matching the way the figures were drafted.
//! Everything drawn after construction is clipped to the content area.
//!
//! ## Drawing Model
//!
//! Lines are collected into a pending path with [`Canvas::line`] and
//! rasterized together by [`Canvas::stroke`]; overlapping segments of one
//! stroke never darken each other. Text is drawn immediately and always
//! upright.

mod stroke;

pub use stroke::{aa_edge, dist_to_segment, stroke_coverage};

use image::{ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

use crate::error::FigureError;
use crate::style::Style;
use crate::typeface::Typeface;

/// Largest accepted image edge in pixels.
const MAX_EDGE: u32 = 16_384;

/// Distance between grid dots in device pixels.
const GRID_DOT_SPACING: usize = 4;

/// Leftward shift of centred captions, in units.
pub const CAPTION_NUDGE: f32 = 0.1;

fn default_scale() -> u32 {
    20
}

fn default_step() -> f32 {
    1.0
}

/// Canvas dimensions and coordinate options for one figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSpec {
    /// Margin around the content area, in pixels.
    pub margin: u32,
    /// Content width in units.
    pub width: f32,
    /// Content height in units.
    pub height: f32,
    /// Pixels per unit.
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Sub-units per unit.
    #[serde(default = "default_step")]
    pub step: f32,
    /// Overrides the style's grid default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<bool>,
    /// Overrides the style's axis convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_handed: Option<bool>,
}

impl CanvasSpec {
    pub fn new(margin: u32, width: f32, height: f32, scale: u32) -> Self {
        Self {
            margin,
            width,
            height,
            scale,
            step: default_step(),
            grid: None,
            right_handed: None,
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_right_handed(mut self, right_handed: bool) -> Self {
        self.right_handed = Some(right_handed);
        self
    }

    /// Content area size in pixels.
    pub fn content_size(&self) -> (u32, u32) {
        let scale = self.scale as f32;
        (
            (self.width * scale).round() as u32,
            (self.height * scale).round() as u32,
        )
    }

    /// Full image size in pixels, margins included.
    pub fn image_size(&self) -> (u32, u32) {
        let (sw, sh) = self.content_size();
        (sw + self.margin * 2 + 1, sh + self.margin * 2 + 1)
    }

    fn validate(&self) -> Result<(), FigureError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(FigureError::InvalidCanvas(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(FigureError::InvalidCanvas(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        if self.scale == 0 {
            return Err(FigureError::InvalidCanvas("scale must be positive".into()));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(FigureError::InvalidCanvas(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        let too_big = |edge: f32| edge + (self.margin as f32) * 2.0 + 1.0 > MAX_EDGE as f32;
        if too_big(self.width * self.scale as f32) || too_big(self.height * self.scale as f32) {
            return Err(FigureError::InvalidCanvas(format!(
                "surface exceeds {} pixels per edge",
                MAX_EDGE
            )));
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to the anchor point.
///
/// In sheets an alignment is a name (`"left"`, `"center"`, `"right"`) or the
/// fraction of the text width placed left of the anchor, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    /// Any other point along the text.
    Fraction(f32),
}

impl Align {
    /// Alignment from a fraction of the text width; `None` outside `[0, 1]`.
    ///
    /// The three named points come back as their named variants.
    pub fn from_factor(factor: f32) -> Option<Align> {
        if !(0.0..=1.0).contains(&factor) {
            return None;
        }
        Some(if factor == 0.0 {
            Align::Left
        } else if factor == 0.5 {
            Align::Center
        } else if factor == 1.0 {
            Align::Right
        } else {
            Align::Fraction(factor)
        })
    }

    /// Fraction of the text width placed left of the anchor.
    pub fn factor(self) -> f32 {
        match self {
            Align::Left => 0.0,
            Align::Center => 0.5,
            Align::Right => 1.0,
            Align::Fraction(f) => f.clamp(0.0, 1.0),
        }
    }
}

impl Serialize for Align {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Align::Left => serializer.serialize_str("left"),
            Align::Center => serializer.serialize_str("center"),
            Align::Right => serializer.serialize_str("right"),
            Align::Fraction(f) => serializer.serialize_f32(*f),
        }
    }
}

impl<'de> Deserialize<'de> for Align {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum AlignValue {
            Name(String),
            Factor(f32),
        }

        match AlignValue::deserialize(deserializer)? {
            AlignValue::Name(name) => match name.as_str() {
                "left" => Ok(Align::Left),
                "center" | "centre" => Ok(Align::Center),
                "right" => Ok(Align::Right),
                other => Err(serde::de::Error::custom(format!(
                    "unknown alignment '{}' (expected left, center, right or 0..1)",
                    other
                ))),
            },
            AlignValue::Factor(f) => Align::from_factor(f).ok_or_else(|| {
                serde::de::Error::custom(format!("alignment {} is outside 0..1", f))
            }),
        }
    }
}

/// Half-open pixel rectangle.
#[derive(Debug, Clone, Copy)]
struct Clip {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl Clip {
    #[inline]
    fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Segment in device coordinates.
#[derive(Debug, Clone, Copy)]
struct DeviceSegment {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

/// Drawing surface for one figure.
pub struct Canvas<'f> {
    image: RgbaImage,
    margin: f32,
    clip: Clip,
    /// Pixels per unit.
    unit: f32,
    right_handed: bool,
    ink: Rgba<u8>,
    /// Stroke width in units.
    line_width: f32,
    /// Em size in units.
    font_size: f32,
    path: Vec<DeviceSegment>,
    typeface: &'f Typeface,
    strokes: usize,
    text_runs: usize,
}

impl<'f> Canvas<'f> {
    /// Build a canvas: fill the background, clip to the content area and
    /// draw the unit grid when enabled.
    pub fn new(spec: &CanvasSpec, style: &Style, typeface: &'f Typeface) -> Result<Self, FigureError> {
        spec.validate()?;

        let (sw, sh) = spec.content_size();
        let (iw, ih) = spec.image_size();
        let margin = spec.margin as i64;
        let grid = spec.grid.unwrap_or(style.grid);
        let right_handed = spec.right_handed.unwrap_or(style.right_handed);

        let mut canvas = Canvas {
            image: RgbaImage::from_pixel(iw, ih, Rgba(style.background)),
            margin: spec.margin as f32,
            clip: Clip {
                x0: margin,
                y0: margin,
                x1: margin + sw as i64 + 1,
                y1: margin + sh as i64 + 1,
            },
            unit: spec.scale as f32 / spec.step,
            right_handed,
            ink: Rgba(style.ink),
            line_width: 0.0625 * spec.step,
            font_size: 0.5 * spec.step,
            path: Vec::new(),
            typeface,
            strokes: 0,
            text_runs: 0,
        };

        if grid {
            canvas.draw_grid(sw as usize, sh as usize, spec.scale as usize, Rgba(style.grid_ink));
        }

        debug!(width = iw, height = ih, grid, right_handed, "canvas created");
        Ok(canvas)
    }

    /// Dotted lines at every scale-unit boundary, placed in device pixels
    /// so the spacing is exact whatever the content scale.
    fn draw_grid(&mut self, sw: usize, sh: usize, spacing: usize, colour: Rgba<u8>) {
        for i in (0..=sw).step_by(spacing) {
            for j in (0..=sh).step_by(GRID_DOT_SPACING) {
                self.plot_offset(i, j, colour);
            }
        }
        for j in (0..=sh).step_by(spacing) {
            for i in (0..=sw).step_by(GRID_DOT_SPACING) {
                self.plot_offset(i, j, colour);
            }
        }
    }

    /// Plot the pixel at a device offset from the content origin.
    fn plot_offset(&mut self, i: usize, j: usize, colour: Rgba<u8>) {
        let margin = self.margin as i64;
        let x = margin + i as i64;
        let y = if self.right_handed {
            self.image.height() as i64 - 1 - margin - j as i64
        } else {
            margin + j as i64
        };
        self.blend_pixel(x, y, colour, 1.0);
    }

    /// Map a logical point to device coordinates.
    pub fn to_device(&self, x: f32, y: f32) -> (f32, f32) {
        let dx = self.margin + 0.5 + x * self.unit;
        let offset = self.margin + 0.5 + y * self.unit;
        let dy = if self.right_handed {
            self.image.height() as f32 - offset
        } else {
            offset
        };
        (dx, dy)
    }

    pub fn right_handed(&self) -> bool {
        self.right_handed
    }

    /// Pixels per unit.
    pub fn unit(&self) -> f32 {
        self.unit
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Append a segment to the pending path.
    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let (dx0, dy0) = self.to_device(x0, y0);
        let (dx1, dy1) = self.to_device(x1, y1);
        self.path.push(DeviceSegment {
            x0: dx0,
            y0: dy0,
            x1: dx1,
            y1: dy1,
        });
    }

    pub fn hline(&mut self, x0: f32, y0: f32, dx: f32) {
        self.line(x0, y0, x0 + dx, y0);
    }

    pub fn vline(&mut self, x0: f32, y0: f32, dy: f32) {
        self.line(x0, y0, x0, y0 + dy);
    }

    /// Rasterize and clear the pending path.
    ///
    /// Coverage is the maximum over all segments of the path, so joints and
    /// crossings are painted once.
    pub fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }

        let width = self.line_width * self.unit;
        let reach = width / 2.0 + 1.5;

        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for s in &self.path {
            min_x = min_x.min(s.x0.min(s.x1));
            min_y = min_y.min(s.y0.min(s.y1));
            max_x = max_x.max(s.x0.max(s.x1));
            max_y = max_y.max(s.y0.max(s.y1));
        }

        let x0 = ((min_x - reach).floor() as i64).max(self.clip.x0);
        let y0 = ((min_y - reach).floor() as i64).max(self.clip.y0);
        let x1 = ((max_x + reach).ceil() as i64).min(self.clip.x1);
        let y1 = ((max_y + reach).ceil() as i64).min(self.clip.y1);

        let segments = std::mem::take(&mut self.path);
        // Clipped segments still count as stroked.
        self.strokes += segments.len();
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let w = (x1 - x0) as usize;
        let h = (y1 - y0) as usize;
        let mut mask = vec![0.0f32; w * h];

        for s in &segments {
            let sx0 = ((s.x0.min(s.x1) - reach).floor() as i64).max(x0);
            let sy0 = ((s.y0.min(s.y1) - reach).floor() as i64).max(y0);
            let sx1 = ((s.x0.max(s.x1) + reach).ceil() as i64).min(x1);
            let sy1 = ((s.y0.max(s.y1) + reach).ceil() as i64).min(y1);

            for py in sy0..sy1 {
                for px in sx0..sx1 {
                    let d = dist_to_segment(
                        px as f32 + 0.5,
                        py as f32 + 0.5,
                        s.x0,
                        s.y0,
                        s.x1,
                        s.y1,
                    );
                    let coverage = stroke_coverage(d, width);
                    let idx = (py - y0) as usize * w + (px - x0) as usize;
                    if coverage > mask[idx] {
                        mask[idx] = coverage;
                    }
                }
            }
        }

        let ink = self.ink;
        for (idx, &coverage) in mask.iter().enumerate() {
            if coverage > 0.0 {
                self.blend_pixel(x0 + (idx % w) as i64, y0 + (idx / w) as i64, ink, coverage);
            }
        }
    }

    /// Width of `label` at the current font size, in units.
    pub fn text_width(&self, label: &str) -> f32 {
        self.typeface.advance_width(label, self.font_size * self.unit) / self.unit
    }

    /// Draw `label` with its baseline at `(x, y)`, aligned on `x`.
    pub fn text(&mut self, x: f32, y: f32, label: &str, align: Align) {
        if label.is_empty() {
            return;
        }

        let em = self.font_size * self.unit;
        let typeface = self.typeface;
        let width = typeface.advance_width(label, em);
        let (dx, dy) = self.to_device(x, y);
        let ink = self.ink;

        typeface.draw(label, em, dx - width * align.factor(), dy, |px, py, coverage| {
            self.blend_pixel(px, py, ink, coverage)
        });
        self.text_runs += 1;
    }

    /// Centred caption, nudged slightly left of `x`.
    pub fn caption(&mut self, x: f32, y: f32, label: &str) {
        self.text(x - CAPTION_NUDGE, y, label, Align::Center);
    }

    /// Number of segments stroked so far.
    pub fn stroke_count(&self) -> usize {
        self.strokes
    }

    /// Number of non-empty text runs drawn so far.
    pub fn text_run_count(&self) -> usize {
        self.text_runs
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode the surface as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, FigureError> {
        let mut png_bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
            .map_err(|e| FigureError::Image(format!("Failed to encode PNG: {}", e)))?;
        Ok(png_bytes)
    }

    /// Write the surface to a PNG file.
    pub fn write_png(&self, path: &Path) -> Result<(), FigureError> {
        if !self.path.is_empty() {
            debug!(segments = self.path.len(), "unstroked path discarded");
        }
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| FigureError::Image(format!("Failed to save {}: {}", path.display(), e)))
    }

    fn blend_pixel(&mut self, x: i64, y: i64, colour: Rgba<u8>, coverage: f32) {
        if !self.clip.contains(x, y) {
            return;
        }
        blend(self.image.get_pixel_mut(x as u32, y as u32), colour, coverage);
    }
}

/// Source-over compositing of `src` scaled by `coverage`.
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f32) {
    let sa = src[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for c in 0..3 {
        let v = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(p: &Rgba<u8>) -> bool {
        p.0 == [255, 255, 255, 255]
    }

    #[test]
    fn test_image_size() {
        let spec = CanvasSpec::new(8, 32.0, 4.64, 11);
        assert_eq!(spec.content_size(), (352, 51));
        assert_eq!(spec.image_size(), (369, 68));
    }

    #[test]
    fn test_background_and_mapping() {
        let face = Typeface::bitmap();
        let spec = CanvasSpec::new(4, 10.0, 5.0, 10).with_right_handed(false);
        let canvas = Canvas::new(&spec, &Style::PDP11, &face).unwrap();
        assert!(canvas.image().pixels().all(white));
        assert_eq!(canvas.to_device(0.0, 0.0), (4.5, 4.5));
        assert_eq!(canvas.to_device(1.0, 2.0), (14.5, 24.5));
    }

    #[test]
    fn test_right_handed_mapping() {
        let face = Typeface::bitmap();
        let spec = CanvasSpec::new(4, 10.0, 5.0, 10).with_right_handed(true);
        let canvas = Canvas::new(&spec, &Style::PDP11, &face).unwrap();
        let (_, ih) = canvas.size();
        assert_eq!(ih, 59);
        // Origin sits on the centre of the bottom-left content pixel
        assert_eq!(canvas.to_device(0.0, 0.0), (4.5, 54.5));
        assert_eq!(canvas.to_device(0.0, 5.0), (4.5, 4.5));
    }

    #[test]
    fn test_step_rescales_units() {
        let face = Typeface::bitmap();
        let spec = CanvasSpec::new(0, 4.0, 4.0, 20).with_step(4.0).with_right_handed(false);
        let canvas = Canvas::new(&spec, &Style::PDP11, &face).unwrap();
        assert_eq!(canvas.unit(), 5.0);
        assert_eq!(canvas.line_width(), 0.25);
        assert_eq!(canvas.font_size(), 2.0);
    }

    #[test]
    fn test_invalid_dimensions() {
        let face = Typeface::bitmap();
        for spec in [
            CanvasSpec::new(8, 0.0, 4.0, 11),
            CanvasSpec::new(8, 32.0, -1.0, 11),
            CanvasSpec::new(8, 32.0, 4.0, 0),
            CanvasSpec::new(8, 32.0, 4.0, 11).with_step(0.0),
            CanvasSpec::new(8, 1.0e6, 4.0, 11),
        ] {
            assert!(matches!(
                Canvas::new(&spec, &Style::PDP11, &face),
                Err(FigureError::InvalidCanvas(_))
            ));
        }
    }

    #[test]
    fn test_stroke_stays_inside_clip() {
        let face = Typeface::bitmap();
        let spec = CanvasSpec::new(5, 4.0, 2.0, 10).with_right_handed(false);
        let mut canvas = Canvas::new(&spec, &Style::PDP11, &face).unwrap();
        canvas.set_line_width(0.3);
        // Runs far outside the content area on both ends
        canvas.line(-10.0, 1.0, 20.0, 1.0);
        canvas.stroke();

        let (iw, ih) = canvas.size();
        for y in 0..ih {
            for x in 0..iw {
                let inside = (5..5 + 41).contains(&x) && (5..5 + 21).contains(&y);
                if !inside {
                    assert!(white(canvas.image().get_pixel(x, y)), "margin pixel ({x}, {y}) touched");
                }
            }
        }
        assert!(!white(canvas.image().get_pixel(5, 15)));
        assert!(!white(canvas.image().get_pixel(45, 15)));
    }

    #[test]
    fn test_clipped_out_stroke_is_counted() {
        let face = Typeface::bitmap();
        let spec = CanvasSpec::new(5, 4.0, 2.0, 10);
        let mut canvas = Canvas::new(&spec, &Style::PDP11, &face).unwrap();
        canvas.line(-20.0, -20.0, -10.0, -20.0);
        canvas.line(-20.0, -20.0, -20.0, -10.0);
        canvas.stroke();
        assert!(canvas.image().pixels().all(white));
        assert_eq!(canvas.stroke_count(), 2);

        canvas.hline(0.0, 1.0, 4.0);
        canvas.stroke();
        assert_eq!(canvas.stroke_count(), 3);
    }

    #[test]
    fn test_stroke_union_does_not_double_darken() {
        let face = Typeface::bitmap();
        let spec = CanvasSpec::new(0, 4.0, 4.0, 10).with_right_handed(false);

        let mut once = Canvas::new(&spec, &Style::PDP11, &face).unwrap();
        once.line(0.0, 2.0, 4.0, 2.0);
        once.stroke();

        let mut twice = Canvas::new(&spec, &Style::PDP11, &face).unwrap();
        twice.line(0.0, 2.0, 4.0, 2.0);
        twice.line(0.0, 2.0, 4.0, 2.0);
        twice.stroke();

        assert_eq!(once.image(), twice.image());
        assert_eq!(twice.stroke_count(), 2);
    }

    #[test]
    fn test_grid_dots() {
        let face = Typeface::bitmap();
        let spec = CanvasSpec::new(2, 2.0, 1.0, 8)
            .with_grid(true)
            .with_right_handed(false);
        let canvas = Canvas::new(&spec, &Style::PDP11, &face).unwrap();
        let img = canvas.image();

        // Vertical grid line at x offset 8, dots every 4 px
        assert!(!white(img.get_pixel(2 + 8, 2)));
        assert!(white(img.get_pixel(2 + 8, 2 + 1)));
        assert!(!white(img.get_pixel(2 + 8, 2 + 4)));
        // Between grid lines, off the horizontal rules
        assert!(white(img.get_pixel(2 + 5, 2 + 2)));
    }

    #[test]
    fn test_text_draws_and_counts_runs() {
        let face = Typeface::bitmap();
        let spec = CanvasSpec::new(0, 10.0, 2.0, 12).with_right_handed(true);
        let mut canvas = Canvas::new(&spec, &Style::PDP11, &face).unwrap();
        canvas.set_font_size(1.0);
        canvas.text(5.0, 0.5, "MOV", Align::Center);
        canvas.text(5.0, 0.5, "", Align::Center);

        assert_eq!(canvas.text_run_count(), 1);
        assert!(canvas.image().pixels().any(|p| !white(p)));
        assert!((canvas.text_width("MOV") - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_fractional_alignment() {
        let face = Typeface::bitmap();
        let spec = CanvasSpec::new(0, 10.0, 2.0, 12).with_right_handed(true);
        let leftmost_ink = |align: Align| {
            let mut canvas = Canvas::new(&spec, &Style::PDP11, &face).unwrap();
            canvas.set_font_size(1.0);
            canvas.text(5.0, 0.5, "MM", align);
            canvas
                .image()
                .enumerate_pixels()
                .filter(|(_, _, p)| !white(p))
                .map(|(x, _, _)| x)
                .min()
                .unwrap()
        };

        // "MM" is 12 px wide at this size
        let left = leftmost_ink(Align::Left);
        assert_eq!(leftmost_ink(Align::Fraction(0.25)), left - 3);
        assert_eq!(leftmost_ink(Align::Center), left - 6);
    }

    #[test]
    fn test_align_from_json() {
        let parse = |json: &str| serde_json::from_str::<Align>(json);
        assert_eq!(parse(r#""right""#).unwrap(), Align::Right);
        assert_eq!(parse("0.5").unwrap(), Align::Center);
        assert_eq!(parse("0.25").unwrap(), Align::Fraction(0.25));
        assert!(parse("1.5").is_err());
        assert!(parse(r#""middle""#).is_err());

        assert_eq!(serde_json::to_string(&Align::Fraction(0.25)).unwrap(), "0.25");
        assert_eq!(serde_json::to_string(&Align::Left).unwrap(), r#""left""#);
    }

    #[test]
    fn test_png_encoding() {
        let face = Typeface::bitmap();
        let spec = CanvasSpec::new(1, 1.0, 1.0, 4);
        let canvas = Canvas::new(&spec, &Style::CP1600, &face).unwrap();
        let png = canvas.to_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_blend_over_opaque() {
        let mut px = Rgba([255, 255, 255, 255]);
        blend(&mut px, Rgba([0, 0, 0, 255]), 0.5);
        assert_eq!(px.0, [128, 128, 128, 255]);
    }
}
