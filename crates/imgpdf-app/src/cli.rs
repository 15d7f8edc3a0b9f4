// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use imgpdf_core::human_errors::ErrorCategory;
use imgpdf_core::types::{FitMode, Orientation, PageSize, PdfSettingsPatch};

#[derive(Parser)]
#[command(name = "imgpdf")]
#[command(about = "Combine images into a PDF, one image per page", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory for settings and config.json (default: platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add images, optionally reorder them, and export a PDF
    Convert {
        /// Image files, in page order
        images: Vec<PathBuf>,

        /// Output PDF (default: ask with a save dialog)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also choose images with the file picker
        #[arg(long)]
        pick: bool,

        /// Move the image at position FROM to position TO (1-based, repeatable)
        #[arg(long = "move", value_name = "FROM:TO", value_parser = parse_move)]
        moves: Vec<(usize, usize)>,
    },

    /// Validate images and show their metadata
    Inspect {
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },

    /// Show or change the saved PDF settings
    Settings {
        #[arg(long)]
        page_size: Option<PageSizeArg>,

        #[arg(long)]
        orientation: Option<OrientationArg>,

        #[arg(long)]
        fit: Option<FitArg>,

        /// Custom page width in millimetres
        #[arg(long)]
        width: Option<f32>,

        /// Custom page height in millimetres
        #[arg(long)]
        height: Option<f32>,

        /// Restore defaults before applying the other options
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PageSizeArg {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom,
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::A3 => PageSize::A3,
            PageSizeArg::A5 => PageSize::A5,
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::Legal => PageSize::Legal,
            PageSizeArg::Custom => PageSize::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::Landscape => Orientation::Landscape,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FitArg {
    Fit,
    Fill,
    Original,
}

impl From<FitArg> for FitMode {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Fit => FitMode::Fit,
            FitArg::Fill => FitMode::Fill,
            FitArg::Original => FitMode::Original,
        }
    }
}

/// Build a settings patch from the `settings` subcommand options.
pub fn settings_patch(
    page_size: Option<PageSizeArg>,
    orientation: Option<OrientationArg>,
    fit: Option<FitArg>,
    width: Option<f32>,
    height: Option<f32>,
) -> PdfSettingsPatch {
    PdfSettingsPatch {
        page_size: page_size.map(Into::into),
        custom_width: width,
        custom_height: height,
        orientation: orientation.map(Into::into),
        fit_mode: fit.map(Into::into),
    }
}

/// Process exit status for a failed run: 2 when the user has to change the
/// invocation, 1 otherwise.
pub fn exit_status(category: ErrorCategory) -> u8 {
    match category {
        ErrorCategory::User => 2,
        ErrorCategory::Validation | ErrorCategory::System => 1,
    }
}

/// Parse `FROM:TO` with 1-based positions.
fn parse_move(s: &str) -> Result<(usize, usize), String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got '{s}'"))?;
    let position = |part: &str| -> Result<usize, String> {
        match part.trim().parse::<usize>() {
            Ok(0) | Err(_) => Err(format!("'{part}' is not a position (1, 2, ...)")),
            Ok(n) => Ok(n),
        }
    };
    Ok((position(from)?, position(to)?))
}
