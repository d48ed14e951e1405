//! # Typefaces
//!
//! Text measurement and rasterization for figure labels.
//!
//! A family name is resolved against the host font directories the way a
//! desktop text stack would: any `.ttf` / `.otf` whose file name matches the
//! family is a candidate, regular weights first. When nothing matches, the
//! embedded Spleen bitmap font stands in and a warning is logged, so a
//! figure never fails to render for want of a font.
//!
//! ## Search Path
//!
//! 1. `$BITFIG_FONT_DIR`
//! 2. `~/.local/share/fonts`, `~/.fonts`
//! 3. `/usr/local/share/fonts`, `/usr/share/fonts`
//! 4. `/Library/Fonts`, `/System/Library/Fonts`

mod bitmap;
mod outline;

pub use bitmap::BitmapFace;
pub use outline::OutlineFace;

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::FigureError;

/// Font families the manuals were typeset with.
pub const FONT_FAMILIES: &[&str] = &[
    "Liberation Sans",
    "Cantarell",
    "Fontin Sans CR",
    "Latin Modern Sans",
];

/// File-name stems some families ship under.
const FILE_ALIASES: &[(&str, &str)] = &[("latinmodernsans", "lmsans10")];

/// Style words that disqualify a file from being the regular face.
const STYLE_WORDS: &[&str] = &[
    "bold", "italic", "oblique", "light", "thin", "black", "medium", "semibold", "extra",
    "condensed", "heavy",
];

/// Directory nesting followed while scanning for font files.
const MAX_SCAN_DEPTH: usize = 6;

/// Resolved face used for all text of a figure.
pub enum Typeface {
    Outline(OutlineFace),
    Bitmap(BitmapFace),
}

impl Typeface {
    /// The embedded bitmap face.
    pub fn bitmap() -> Self {
        Typeface::Bitmap(BitmapFace)
    }

    /// Resolve `family`, or load `font_path` directly when given.
    ///
    /// An explicit path that cannot be loaded is an error; a family that
    /// cannot be found falls back to the bitmap face.
    pub fn resolve(family: &str, font_path: Option<&Path>) -> Result<Self, FigureError> {
        if let Some(path) = font_path {
            return Ok(Typeface::Outline(OutlineFace::load(family, path)?));
        }

        let Some(path) = find_font_file(family, &font_dirs()) else {
            warn!(family, "no font file found, using embedded bitmap font");
            return Ok(Self::bitmap());
        };

        match OutlineFace::load(family, &path) {
            Ok(face) => {
                debug!(family, path = %path.display(), "resolved typeface");
                Ok(Typeface::Outline(face))
            }
            Err(e) => {
                warn!(family, path = %path.display(), "unusable font file ({}), using embedded bitmap font", e);
                Ok(Self::bitmap())
            }
        }
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, Typeface::Bitmap(_))
    }

    /// Human-readable description of what is being used.
    pub fn describe(&self) -> String {
        match self {
            Typeface::Outline(face) => format!("{} ({})", face.family(), face.path().display()),
            Typeface::Bitmap(_) => "Spleen 12x24 (embedded bitmap)".to_string(),
        }
    }

    /// Advance width of `text` at `em` pixels.
    pub fn advance_width(&self, text: &str, em: f32) -> f32 {
        match self {
            Typeface::Outline(face) => face.advance_width(text, em),
            Typeface::Bitmap(face) => face.advance_width(text, em),
        }
    }

    /// Rasterize `text`; `plot` receives device pixel coordinates and coverage.
    pub fn draw(&self, text: &str, em: f32, x: f32, baseline: f32, plot: impl FnMut(i64, i64, f32)) {
        match self {
            Typeface::Outline(face) => face.draw(text, em, x, baseline, plot),
            Typeface::Bitmap(face) => face.draw(text, em, x, baseline, plot),
        }
    }
}

/// Directories searched for font files, most specific first.
pub fn font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(dir) = std::env::var_os("BITFIG_FONT_DIR") {
        dirs.push(PathBuf::from(dir));
    }
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
    }
    dirs.push(PathBuf::from("/usr/local/share/fonts"));
    dirs.push(PathBuf::from("/usr/share/fonts"));
    dirs.push(PathBuf::from("/Library/Fonts"));
    dirs.push(PathBuf::from("/System/Library/Fonts"));

    dirs
}

/// Best font file for `family` under `dirs`, if any.
///
/// Ties between equally good candidates go to the first directory, then
/// to the lexicographically smallest path.
pub fn find_font_file(family: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let mut best: Option<(u8, usize, PathBuf)> = None;

    for (order, dir) in dirs.iter().enumerate() {
        let mut files = Vec::new();
        collect_font_files(dir, 0, &mut files);

        for path in files {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(rank) = match_rank(family, stem) else {
                continue;
            };
            let candidate = (rank, order, path);
            if best.as_ref().is_none_or(|b| candidate < *b) {
                best = Some(candidate);
            }
        }
    }

    best.map(|(_, _, path)| path)
}

fn collect_font_files(dir: &Path, depth: usize, out: &mut Vec<PathBuf>) {
    if depth > MAX_SCAN_DEPTH {
        return;
    }
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_font_files(&path, depth + 1, out);
        } else if is_font_file(&path) {
            out.push(path);
        }
    }
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
}

/// Lowercase alphanumerics only: "Latin Modern Sans" → "latinmodernsans".
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// How well a file stem matches a family; lower is better.
///
/// - 0: exact family, or family + "regular"
/// - 1: family prefix followed by no style words
/// - 2: family prefix with style words
fn match_rank(family: &str, stem: &str) -> Option<u8> {
    let family = normalize(family);
    if family.is_empty() {
        return None;
    }
    let stem = normalize(stem);

    let mut prefixes = vec![family.clone()];
    prefixes.extend(
        FILE_ALIASES
            .iter()
            .filter(|(name, _)| *name == family)
            .map(|(_, alias)| alias.to_string()),
    );

    prefixes
        .iter()
        .filter_map(|prefix| {
            let rest = stem.strip_prefix(prefix.as_str())?;
            if rest.is_empty() || rest == "regular" {
                Some(0)
            } else if STYLE_WORDS.iter().any(|w| rest.contains(w)) {
                Some(2)
            } else {
                Some(1)
            }
        })
        .min()
}
