// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to a short message with a clear suggestion.
// The category decides whether the user, the file, or the system is at fault.

use crate::error::ImgPdfError;

/// Who or what an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A specific file was rejected (format, size, missing).
    Validation,
    /// The user must change something before retrying (no images, bad size).
    User,
    /// Disk, platform, or backend trouble.
    System,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Short summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    pub category: ErrorCategory,
}

/// Convert an `ImgPdfError` into a `HumanError`.
pub fn humanize_error(err: &ImgPdfError) -> HumanError {
    match err {
        ImgPdfError::UnsupportedFormat(detail) => HumanError {
            message: "This file type isn't supported.".into(),
            suggestion: format!("Use PNG, JPG, WEBP, BMP, GIF or TIFF images. ({detail})"),
            category: ErrorCategory::Validation,
        },

        ImgPdfError::ImageNotFound(path) => HumanError {
            message: "The image could not be found.".into(),
            suggestion: format!("It may have been moved or deleted: {path}"),
            category: ErrorCategory::Validation,
        },

        ImgPdfError::ImageTooLarge(_) => HumanError {
            message: "This image is too large.".into(),
            suggestion: "Images must be smaller than 50 MB. Try resizing or compressing it first."
                .into(),
            category: ErrorCategory::Validation,
        },

        ImgPdfError::ImageRead(_) | ImgPdfError::ImageProcessing(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The file may be damaged. Try opening it in another program, \
                         or save it again as PNG or JPEG."
                .into(),
            category: ErrorCategory::Validation,
        },

        ImgPdfError::NoImages => HumanError {
            message: "No images to export.".into(),
            suggestion: "Add at least one image, then try again.".into(),
            category: ErrorCategory::User,
        },

        ImgPdfError::InvalidDimensions => HumanError {
            message: "Custom page size is incomplete.".into(),
            suggestion: "Enter a width and a height greater than zero for the custom page size."
                .into(),
            category: ErrorCategory::User,
        },

        ImgPdfError::ExportInProgress => HumanError {
            message: "A PDF is already being created.".into(),
            suggestion: "Wait for the current export to finish.".into(),
            category: ErrorCategory::User,
        },

        ImgPdfError::PdfGeneration(detail) => HumanError {
            message: "The PDF could not be created.".into(),
            suggestion: detail.clone(),
            category: ErrorCategory::System,
        },

        ImgPdfError::Timeout(after) => HumanError {
            message: "Creating the PDF took too long.".into(),
            suggestion: format!("Gave up after {}s. Try fewer or smaller images.", after.as_secs()),
            category: ErrorCategory::System,
        },

        ImgPdfError::Io(e) => match e.kind() {
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied.".into(),
                suggestion: "Choose a location you are allowed to write to.".into(),
                category: ErrorCategory::System,
            },
            _ => HumanError {
                message: "A file could not be read or written.".into(),
                suggestion: format!("Check free disk space and try again. ({e})"),
                category: ErrorCategory::System,
            },
        },

        ImgPdfError::Serialization(_) => HumanError {
            message: "Saved settings could not be read.".into(),
            suggestion: "Settings were reset to defaults.".into(),
            category: ErrorCategory::System,
        },

        ImgPdfError::Bridge(detail) => HumanError {
            message: "The system dialog had a problem.".into(),
            suggestion: detail.clone(),
            category: ErrorCategory::System,
        },

        ImgPdfError::PlatformUnavailable => HumanError {
            message: "This isn't available here.".into(),
            suggestion: "Pass file paths on the command line instead.".into(),
            category: ErrorCategory::System,
        },
    }
}
