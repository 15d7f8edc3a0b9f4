// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for imgpdf.

use std::time::Duration;

use thiserror::Error;

/// Top-level error type for all imgpdf operations.
#[derive(Debug, Error)]
pub enum ImgPdfError {
    // -- Image validation --
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Image file not found: {0}")]
    ImageNotFound(String),

    #[error("Image file too large: {0} bytes (max 50 MB)")]
    ImageTooLarge(u64),

    // -- Image processing --
    #[error("Failed to read image: {0}")]
    ImageRead(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    // -- Export --
    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("Invalid custom page dimensions")]
    InvalidDimensions,

    #[error("No images provided")]
    NoImages,

    #[error("a PDF export is already running")]
    ExportInProgress,

    #[error("PDF generation timed out after {0:?}")]
    Timeout(Duration),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ImgPdfError>;
