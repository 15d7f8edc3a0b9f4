// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imgpdf — Boundaries to everything outside the orchestration layer.
//
// The traits describe the image backend (validation, metadata, thumbnails,
// PDF generation), the platform file dialogs, and the user notification
// channel. Concrete dialog providers live next to them: native dialogs on
// desktop, preset answers for headless runs, and a stub for everything else.

pub mod preset;
pub mod stub;
pub mod traits;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod desktop;

pub use preset::PresetDialogs;
pub use traits::{BoxFuture, FileDialogs, ImageBackend, Notifier};

use std::sync::Arc;

/// Returns the native dialog provider for the target operating system.
pub fn platform_dialogs() -> Arc<dyn FileDialogs> {
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Arc::new(desktop::DesktopDialogs)
    }
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        Arc::new(stub::StubBridge)
    }
}
