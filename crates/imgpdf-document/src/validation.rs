// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Candidate file validation — existence, extension, and size checks run before
// an image is accepted into the list.

use std::path::{Path, PathBuf};

use imgpdf_core::error::{ImgPdfError, Result};
use imgpdf_core::types::{
    InvalidImage, MAX_FILE_SIZE, SUPPORTED_EXTENSIONS, ValidationResult, has_supported_extension,
};
use tracing::{debug, instrument};

/// Reject paths that do not point at an existing file.
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ImgPdfError::ImageNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Reject anything without one of the supported extensions.
pub fn validate_image_format(path: &Path) -> Result<()> {
    if has_supported_extension(path) {
        return Ok(());
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => Err(ImgPdfError::UnsupportedFormat(format!(
            ".{} (supported: {})",
            ext.to_ascii_lowercase(),
            SUPPORTED_EXTENSIONS.join(", ")
        ))),
        None => Err(ImgPdfError::UnsupportedFormat("No file extension".into())),
    }
}

/// Reject files larger than `MAX_FILE_SIZE`.
pub fn validate_file_size(path: &Path) -> Result<()> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_FILE_SIZE {
        return Err(ImgPdfError::ImageTooLarge(size));
    }
    Ok(())
}

/// Run every check on a single path.
pub fn validate_image(path: &Path) -> Result<()> {
    validate_file_exists(path)?;
    validate_image_format(path)?;
    validate_file_size(path)?;
    Ok(())
}

/// Partition `paths` into valid and invalid, preserving input order in both.
#[instrument(skip_all, fields(count = paths.len()))]
pub fn validate_images(paths: &[PathBuf]) -> ValidationResult {
    let mut result = ValidationResult::default();

    for path in paths {
        match validate_image(path) {
            Ok(()) => result.valid.push(path.clone()),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "image rejected");
                result.invalid.push(InvalidImage {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    result
}
