// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for builds where no native dialogs are available.
//
// Dialog calls return `PlatformUnavailable`; notifications only go to the log.

use std::path::PathBuf;

use imgpdf_core::error::{ImgPdfError, Result};
use imgpdf_core::types::{Notification, NotifySeverity};

use crate::traits::{BoxFuture, FileDialogs, Notifier};

/// No-op bridge.
pub struct StubBridge;

impl FileDialogs for StubBridge {
    fn select_images(&self) -> BoxFuture<'_, Result<Option<Vec<PathBuf>>>> {
        Box::pin(async {
            tracing::warn!("FileDialogs::select_images called on stub bridge");
            Err(ImgPdfError::PlatformUnavailable)
        })
    }

    fn select_output_path<'a>(
        &'a self,
        _default_name: &'a str,
    ) -> BoxFuture<'a, Result<Option<PathBuf>>> {
        Box::pin(async {
            tracing::warn!("FileDialogs::select_output_path called on stub bridge");
            Err(ImgPdfError::PlatformUnavailable)
        })
    }
}

impl Notifier for StubBridge {
    fn notify(&self, notification: Notification) {
        let description = notification.description.as_deref().unwrap_or("");
        match notification.severity {
            NotifySeverity::Error => {
                tracing::error!(title = %notification.title, description, "notification")
            }
            NotifySeverity::Warning => {
                tracing::warn!(title = %notification.title, description, "notification")
            }
            NotifySeverity::Info | NotifySeverity::Success => {
                tracing::info!(title = %notification.title, description, "notification")
            }
        }
    }
}
