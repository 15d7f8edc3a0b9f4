// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dialogs with answers fixed up front, for headless runs where the paths come
// from the command line instead of a chooser.

use std::path::PathBuf;

use imgpdf_core::error::Result;

use crate::traits::{BoxFuture, FileDialogs};

/// Answers every dialog with a preset value. `None` behaves like a cancel.
#[derive(Debug, Clone, Default)]
pub struct PresetDialogs {
    images: Option<Vec<PathBuf>>,
    output: Option<PathBuf>,
}

impl PresetDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_images(mut self, images: Vec<PathBuf>) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

impl FileDialogs for PresetDialogs {
    fn select_images(&self) -> BoxFuture<'_, Result<Option<Vec<PathBuf>>>> {
        let images = self.images.clone();
        Box::pin(async move { Ok(images) })
    }

    fn select_output_path<'a>(
        &'a self,
        _default_name: &'a str,
    ) -> BoxFuture<'a, Result<Option<PathBuf>>> {
        let output = self.output.clone();
        Box::pin(async move { Ok(output) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unset_answers_behave_like_cancel() {
        let dialogs = PresetDialogs::new();
        assert_eq!(dialogs.select_images().await.unwrap(), None);
        assert_eq!(dialogs.select_output_path("images.pdf").await.unwrap(), None);
    }

    #[tokio::test]
    async fn preset_answers_are_returned() {
        let dialogs = PresetDialogs::new()
            .with_images(vec![PathBuf::from("/a.png")])
            .with_output("/out.pdf");
        assert_eq!(
            dialogs.select_images().await.unwrap(),
            Some(vec![PathBuf::from("/a.png")])
        );
        assert_eq!(
            dialogs.select_output_path("images.pdf").await.unwrap(),
            Some(PathBuf::from("/out.pdf"))
        );
    }
}
