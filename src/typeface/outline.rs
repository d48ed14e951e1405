//! Outline (TrueType / OpenType) font rendering using ab_glyph.
//!
//! Sizes are em sizes, as in a font matrix: a 12 px face has 12 px between
//! the em square's top and bottom, not between ascender and descender.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use std::path::{Path, PathBuf};

use crate::error::FigureError;

/// A loaded outline font.
pub struct OutlineFace {
    family: String,
    path: PathBuf,
    font: FontArc,
}

impl OutlineFace {
    /// Load a font file for `family`.
    pub fn load(family: &str, path: &Path) -> Result<Self, FigureError> {
        let data = std::fs::read(path)?;
        let font = FontArc::try_from_vec(data)
            .map_err(|e| FigureError::Font(format!("{}: {}", path.display(), e)))?;

        Ok(Self {
            family: family.to_string(),
            path: path.to_path_buf(),
            font,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ab_glyph scale for an em size in pixels.
    fn scale(&self, em: f32) -> PxScale {
        let height = match self.font.units_per_em() {
            Some(upem) if upem > 0.0 => em * self.font.height_unscaled() / upem,
            _ => em,
        };
        PxScale::from(height)
    }

    pub fn advance_width(&self, text: &str, em: f32) -> f32 {
        let scaled = self.font.as_scaled(self.scale(em));
        let mut width = 0.0f32;
        let mut prev = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                width += scaled.kern(p, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }

        width
    }

    /// Rasterize `text` with its baseline at `baseline`, starting at `x`.
    pub fn draw(&self, text: &str, em: f32, x: f32, baseline: f32, mut plot: impl FnMut(i64, i64, f32)) {
        let scale = self.scale(em);
        let scaled = self.font.as_scaled(scale);
        let mut caret = x;
        let mut prev = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            prev = Some(id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    plot(
                        bounds.min.x as i64 + gx as i64,
                        bounds.min.y as i64 + gy as i64,
                        coverage.min(1.0),
                    );
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        let result = OutlineFace::load("Cantarell", Path::new("/nonexistent/Cantarell-Regular.otf"));
        assert!(matches!(result, Err(FigureError::Io(_))));
    }

    #[test]
    fn test_garbage_file_is_font_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Broken-Regular.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let result = OutlineFace::load("Broken", &path);
        assert!(matches!(result, Err(FigureError::Font(_))));
    }
}
