// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native desktop dialogs via `rfd`.
//
// The blocking `rfd::FileDialog` runs on tokio's blocking pool so the caller's
// task stays responsive while the dialog is open.

use std::path::PathBuf;

use imgpdf_core::error::{ImgPdfError, Result};
use imgpdf_core::types::SUPPORTED_EXTENSIONS;
use tracing::debug;

use crate::traits::{BoxFuture, FileDialogs};

/// Dialogs backed by the operating system's file chooser.
pub struct DesktopDialogs;

impl FileDialogs for DesktopDialogs {
    fn select_images(&self) -> BoxFuture<'_, Result<Option<Vec<PathBuf>>>> {
        Box::pin(async {
            let picked = tokio::task::spawn_blocking(|| {
                rfd::FileDialog::new()
                    .set_title("Select images")
                    .add_filter("Images", SUPPORTED_EXTENSIONS)
                    .pick_files()
            })
            .await
            .map_err(|e| ImgPdfError::Bridge(format!("file picker task failed: {e}")))?;

            debug!(count = picked.as_ref().map_or(0, Vec::len), "file picker closed");
            Ok(picked)
        })
    }

    fn select_output_path<'a>(
        &'a self,
        default_name: &'a str,
    ) -> BoxFuture<'a, Result<Option<PathBuf>>> {
        let default_name = default_name.to_string();
        Box::pin(async move {
            let chosen = tokio::task::spawn_blocking(move || {
                rfd::FileDialog::new()
                    .set_title("Save PDF")
                    .set_file_name(default_name)
                    .add_filter("PDF Document", &["pdf"])
                    .save_file()
            })
            .await
            .map_err(|e| ImgPdfError::Bridge(format!("save dialog task failed: {e}")))?;

            debug!(chosen = ?chosen, "save dialog closed");
            Ok(chosen)
        })
    }
}
