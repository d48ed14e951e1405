//! Embedded Spleen bitmap font, scaled to the requested em size.
//!
//! Always available, so figures render even on hosts without the manual's
//! font family installed. The 12x24 cell is treated as one em.

use spleen_font::{FONT_12X24, PSF2Font};
use tracing::warn;

const CELL_WIDTH: usize = 12;
const CELL_HEIGHT: usize = 24;

/// Baseline position within the cell, as a fraction of its height.
const ASCENT: f32 = 0.8;

/// Fixed-pitch fallback face.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFace;

impl BitmapFace {
    /// Advance of one character at `em` pixels.
    pub fn advance(&self, em: f32) -> f32 {
        CELL_WIDTH as f32 * em / CELL_HEIGHT as f32
    }

    pub fn advance_width(&self, text: &str, em: f32) -> f32 {
        text.chars().count() as f32 * self.advance(em)
    }

    /// Rasterize `text` with its baseline at `baseline`, starting at `x`.
    ///
    /// Glyph cells are scaled by nearest-neighbour sampling; `plot` receives
    /// device pixel coordinates and full coverage for every lit sample.
    pub fn draw(&self, text: &str, em: f32, x: f32, baseline: f32, mut plot: impl FnMut(i64, i64, f32)) {
        let scale = em / CELL_HEIGHT as f32;
        if !(scale > 0.0) {
            return;
        }

        let Ok(mut spleen) = PSF2Font::new(FONT_12X24) else {
            warn!("embedded bitmap font unavailable");
            return;
        };

        let advance = self.advance(em);
        let top = baseline - ASCENT * em;
        let mut utf8 = [0u8; 4];

        for (i, ch) in text.chars().enumerate() {
            if ch == ' ' {
                continue;
            }

            let mut cells = vec![false; CELL_WIDTH * CELL_HEIGHT];
            let bytes = ch.encode_utf8(&mut utf8).as_bytes();
            if let Some(glyph) = spleen.glyph_for_utf8(bytes) {
                for (row_y, row) in glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if row_y < CELL_HEIGHT && col_x < CELL_WIDTH {
                            cells[row_y * CELL_WIDTH + col_x] = on;
                        }
                    }
                }
            } else {
                draw_box(&mut cells);
            }

            let left = x + i as f32 * advance;
            let x0 = left.floor() as i64;
            let x1 = (left + advance).ceil() as i64;
            let y0 = top.floor() as i64;
            let y1 = (top + em).ceil() as i64;

            for py in y0..y1 {
                let sy = ((py as f32 + 0.5 - top) / scale).floor();
                if sy < 0.0 || sy >= CELL_HEIGHT as f32 {
                    continue;
                }
                for px in x0..x1 {
                    let sx = ((px as f32 + 0.5 - left) / scale).floor();
                    if sx < 0.0 || sx >= CELL_WIDTH as f32 {
                        continue;
                    }
                    if cells[sy as usize * CELL_WIDTH + sx as usize] {
                        plot(px, py, 1.0);
                    }
                }
            }
        }
    }
}

/// Outline box for characters the font does not cover.
fn draw_box(cells: &mut [bool]) {
    for x in 1..CELL_WIDTH - 1 {
        cells[4 * CELL_WIDTH + x] = true;
        cells[(CELL_HEIGHT - 5) * CELL_WIDTH + x] = true;
    }
    for y in 4..CELL_HEIGHT - 4 {
        cells[y * CELL_WIDTH + 1] = true;
        cells[y * CELL_WIDTH + CELL_WIDTH - 2] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink_bounds(text: &str, em: f32) -> Option<(i64, i64, i64, i64)> {
        let mut bounds: Option<(i64, i64, i64, i64)> = None;
        BitmapFace.draw(text, em, 0.0, ASCENT * em, |x, y, _| {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        });
        bounds
    }

    #[test]
    fn test_advance_scales_with_em() {
        assert_eq!(BitmapFace.advance(24.0), 12.0);
        assert_eq!(BitmapFace.advance_width("Opcode", 12.0), 36.0);
        assert_eq!(BitmapFace.advance_width("", 12.0), 0.0);
    }

    #[test]
    fn test_glyphs_stay_in_their_cells() {
        let (x0, y0, x1, y1) = ink_bounds("AB", 24.0).unwrap();
        assert!(x0 >= 0 && x1 < 24);
        assert!(y0 >= 0 && y1 < 24);
    }

    #[test]
    fn test_space_draws_nothing() {
        assert!(ink_bounds("   ", 24.0).is_none());
    }

    #[test]
    fn test_zero_em_draws_nothing() {
        assert!(ink_bounds("A", 0.0).is_none());
    }
}
