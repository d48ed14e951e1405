//! # Bitfig CLI
//!
//! Command-line interface for rendering bit-field figure sheets.
//!
//! ## Usage
//!
//! ```bash
//! # List built-in sheets
//! bitfig list
//!
//! # List the figures of a sheet
//! bitfig list --builtin pdp11
//! bitfig list figures.json
//!
//! # Render every figure of a sheet into a directory
//! bitfig render --builtin cp1600 --out-dir out
//!
//! # Render two figures with the unit grid and dump their layouts
//! bitfig render figures.json --only fig-1 --only fig-2 --grid --layout layout.json
//!
//! # Show which font file each known family resolves to
//! bitfig fonts
//! ```
//!
//! Set `RUST_LOG=debug` for per-figure details.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::prelude::*;

use bitfig::{
    FigureError, Sheet, Style, Typeface,
    document::{RenderedFigure, builtin_names},
    typeface::{FONT_FAMILIES, find_font_file, font_dirs},
};

/// Bitfig - Bit-field diagram renderer
#[derive(Parser, Debug)]
#[command(name = "bitfig")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where a sheet comes from: a JSON file or a built-in name.
#[derive(Args, Debug)]
struct SheetSource {
    /// Figure sheet (JSON)
    #[arg(value_name = "SHEET", conflicts_with = "builtin")]
    sheet: Option<PathBuf>,

    /// Use a built-in sheet instead of a file
    #[arg(long, value_name = "NAME")]
    builtin: Option<String>,
}

impl SheetSource {
    fn is_given(&self) -> bool {
        self.sheet.is_some() || self.builtin.is_some()
    }

    fn load(&self) -> Result<Sheet, FigureError> {
        match (&self.sheet, &self.builtin) {
            (Some(path), _) => Sheet::load(path),
            (None, Some(name)) => Sheet::builtin(name),
            (None, None) => Err(FigureError::Sheet(format!(
                "no sheet given (pass a file or --builtin with one of: {})",
                builtin_names().join(", ")
            ))),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List figures of a sheet (omit the sheet to see built-in sheets)
    List {
        #[command(flatten)]
        source: SheetSource,
    },

    /// Render figures to PNG files
    Render {
        #[command(flatten)]
        source: SheetSource,

        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Render only the named figures
        #[arg(long, value_name = "NAME")]
        only: Vec<String>,

        /// Font family, overriding the sheet's style
        #[arg(long, value_name = "FAMILY")]
        font: Option<String>,

        /// Font file, bypassing family lookup
        #[arg(long, value_name = "FILE")]
        font_path: Option<PathBuf>,

        /// Write the laid-out figures as JSON
        #[arg(long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Draw the unit grid on every figure
        #[arg(long)]
        grid: bool,
    },

    /// Show known font families and the files they resolve to
    Fonts,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() -> Result<(), FigureError> {
    // RUST_LOG selects which events are printed.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .map_err(|e| FigureError::Init(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| FigureError::Init(e.to_string()))
}

fn run() -> Result<(), FigureError> {
    let cli = Cli::parse();
    init_tracing()?;

    match cli.command {
        Commands::List { source } => {
            if !source.is_given() {
                println!("Built-in sheets:");
                for name in builtin_names() {
                    println!("  {}", name);
                }
                return Ok(());
            }

            let sheet = source.load()?;
            let style = sheet.style()?;
            for line in format_listing(&sheet, &style) {
                println!("{}", line);
            }
        }

        Commands::Render {
            source,
            out_dir,
            only,
            font,
            font_path,
            layout,
            grid,
        } => {
            let mut sheet = source.load()?;
            let mut style = sheet.style()?;
            if let Some(family) = font {
                style.font_family = family.into();
            }
            if font_path.is_some() {
                style.font_path = font_path;
            }
            if grid {
                for figure in &mut sheet.figures {
                    figure.canvas.grid = Some(true);
                }
            }

            let typeface = Typeface::resolve(&style.font_family, style.font_path.as_deref())?;
            info!(style = %style.name, typeface = %typeface.describe(), "rendering");

            let rendered = sheet.render_to_dir(&style, &typeface, &out_dir, &only)?;
            println!("Rendered {} figure(s) into {}", rendered.len(), out_dir.display());

            if let Some(path) = layout {
                write_layouts(&path, &rendered)?;
                println!("Layouts written to {}", path.display());
            }
        }

        Commands::Fonts => {
            let dirs = font_dirs();
            debug!(?dirs, "font search path");
            for family in FONT_FAMILIES {
                match find_font_file(family, &dirs) {
                    Some(path) => println!("{:<20} {}", family, path.display()),
                    None => println!("{:<20} (not found, embedded bitmap font used)", family),
                }
            }
        }
    }

    Ok(())
}

/// One line per figure: the name `--only` takes, then the file it renders to.
fn format_listing(sheet: &Sheet, style: &Style) -> Vec<String> {
    let width = sheet.names().map(|name| name.len()).max().unwrap_or(0);
    sheet
        .names()
        .map(|name| format!("{:<width$}  {}", name, style.file_name(name), width = width))
        .collect()
}

/// Save the layouts of rendered figures as pretty JSON.
fn write_layouts(path: &Path, rendered: &[RenderedFigure]) -> Result<(), FigureError> {
    let layouts: Vec<_> = rendered.iter().map(|r| &r.layout).collect();
    let json = serde_json::to_string_pretty(&layouts)
        .map_err(|e| FigureError::Sheet(format!("Failed to serialize layouts: {}", e)))?;
    std::fs::write(path, json)?;
    Ok(())
}
