//! # Figure Styles
//!
//! The handful of settings that differ between manuals: font family, grid
//! default, axis convention and output file naming.
//!
//! ## Presets
//!
//! | Preset | Manual | Font | Grid | File prefix |
//! |--------|--------|------|------|-------------|
//! | `cp1600` | MCP-1600 User's Manual (1977) | Latin Modern Sans | off | `fig-` |
//! | `pdp11` | PDP-11 Handbook (1969) | Latin Modern Sans | off | none |
//! | `alpha` | EC-H1689-10 (1992) | Cantarell | on | none |
//!
//! ## Usage
//!
//! ```
//! use bitfig::style::Style;
//!
//! let style = Style::by_name("pdp11").unwrap();
//! assert_eq!(style.font_family, "Latin Modern Sans");
//! assert!(style.right_handed);
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::PathBuf;

const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

fn default_true() -> bool {
    true
}

fn default_ink() -> [u8; 4] {
    BLACK
}

fn default_background() -> [u8; 4] {
    WHITE
}

/// # Figure Style
///
/// Rendering choices shared by every figure of one manual.
///
/// - **font_family**: family resolved against the host font directories
/// - **font_path**: explicit font file, bypassing family resolution
/// - **grid**: draw the dotted unit grid unless a figure says otherwise
/// - **right_handed**: logical Y grows upwards in the image
/// - **file_prefix**: prepended to figure names to form file names
/// - **ink / background / grid_ink**: RGBA colours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub name: Cow<'static, str>,

    pub font_family: Cow<'static, str>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    #[serde(default)]
    pub grid: bool,

    #[serde(default = "default_true")]
    pub right_handed: bool,

    #[serde(default)]
    pub file_prefix: Cow<'static, str>,

    #[serde(default = "default_ink")]
    pub ink: [u8; 4],

    #[serde(default = "default_background")]
    pub background: [u8; 4],

    #[serde(default = "default_ink")]
    pub grid_ink: [u8; 4],
}

impl Style {
    /// # MCP-1600 User's Manual (1977)
    pub const CP1600: Self = Self {
        name: Cow::Borrowed("cp1600"),
        font_family: Cow::Borrowed("Latin Modern Sans"),
        font_path: None,
        grid: false,
        right_handed: true,
        file_prefix: Cow::Borrowed("fig-"),
        ink: BLACK,
        background: WHITE,
        grid_ink: BLACK,
    };

    /// # PDP-11 Handbook (1969)
    pub const PDP11: Self = Self {
        name: Cow::Borrowed("pdp11"),
        font_family: Cow::Borrowed("Latin Modern Sans"),
        font_path: None,
        grid: false,
        right_handed: true,
        file_prefix: Cow::Borrowed(""),
        ink: BLACK,
        background: WHITE,
        grid_ink: BLACK,
    };

    /// # Alpha Architecture Handbook, EC-H1689-10 (1992)
    ///
    /// Figures from this manual were drafted on the unit grid, so it is on
    /// by default.
    pub const ALPHA: Self = Self {
        name: Cow::Borrowed("alpha"),
        font_family: Cow::Borrowed("Cantarell"),
        font_path: None,
        grid: true,
        right_handed: true,
        file_prefix: Cow::Borrowed(""),
        ink: BLACK,
        background: WHITE,
        grid_ink: BLACK,
    };

    /// Names accepted by [`Style::by_name`].
    pub fn preset_names() -> &'static [&'static str] {
        &["cp1600", "pdp11", "alpha"]
    }

    /// Look up a preset by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Style> {
        match name.to_ascii_lowercase().as_str() {
            "cp1600" => Some(Self::CP1600),
            "pdp11" => Some(Self::PDP11),
            "alpha" => Some(Self::ALPHA),
            _ => None,
        }
    }

    /// Output file name for a figure.
    pub fn file_name(&self, figure: &str) -> String {
        format!("{}{}.png", self.file_prefix, figure)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::CP1600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_by_name() {
        for name in Style::preset_names() {
            let style = Style::by_name(name).unwrap();
            assert_eq!(style.name, *name);
        }
        assert_eq!(Style::by_name("PDP11"), Some(Style::PDP11));
        assert!(Style::by_name("vax").is_none());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(Style::CP1600.file_name("5-1-jmp"), "fig-5-1-jmp.png");
        assert_eq!(Style::PDP11.file_name("fig-014-1"), "fig-014-1.png");
    }

    #[test]
    fn test_inline_style_defaults() {
        let style: Style =
            serde_json::from_str(r#"{"name": "custom", "font_family": "Liberation Sans"}"#)
                .unwrap();
        assert!(!style.grid);
        assert!(style.right_handed);
        assert_eq!(style.file_prefix, "");
        assert_eq!(style.ink, BLACK);
        assert_eq!(style.background, WHITE);
    }
}
