// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for everything the orchestration layer
// awaits: backend commands, file dialogs, and user notifications.
//
// The traits are object safe so services can hold `Arc<dyn ...>` handles and
// tests can swap in scripted implementations.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use imgpdf_core::error::Result;
use imgpdf_core::types::{GenerationResult, ImageInfo, Notification, PdfSettings, ValidationResult};

/// Boxed, sendable future returned by the boundary traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The image/PDF service. Every call may fail independently.
pub trait ImageBackend: Send + Sync {
    /// Partition `paths` into accepted and rejected files.
    fn validate_images<'a>(&'a self, paths: &'a [PathBuf])
    -> BoxFuture<'a, Result<ValidationResult>>;

    /// Read dimensions, format and size of one image.
    fn image_info<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<ImageInfo>>;

    /// Encode a preview no larger than `size` x `size`.
    fn image_thumbnail<'a>(&'a self, path: &'a Path, size: u32) -> BoxFuture<'a, Result<String>>;

    /// Write one page per image, in the given order, to `output_path`.
    ///
    /// Failures inside generation are reported through
    /// `GenerationResult::error`; an `Err` means the request itself failed.
    fn generate_pdf<'a>(
        &'a self,
        image_paths: &'a [PathBuf],
        output_path: &'a Path,
        settings: &'a PdfSettings,
    ) -> BoxFuture<'a, Result<GenerationResult>>;
}

/// Open and save dialogs.
pub trait FileDialogs: Send + Sync {
    /// Multi-select picker filtered to supported image extensions.
    /// Returns `Ok(None)` if the user cancelled.
    fn select_images(&self) -> BoxFuture<'_, Result<Option<Vec<PathBuf>>>>;

    /// Save dialog filtered to `.pdf`, pre-filled with `default_name`.
    /// Returns `Ok(None)` if the user cancelled.
    fn select_output_path<'a>(&'a self, default_name: &'a str)
    -> BoxFuture<'a, Result<Option<PathBuf>>>;
}

/// Shows messages to the user. Presentation (toast, alert, console line) is
/// up to the implementation.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
