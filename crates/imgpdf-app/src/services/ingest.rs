// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ingestion pipeline — turns picked or dropped paths into enriched entries.
//
// validate (one batch call) → warn per rejected file → add the accepted ones
// → fetch metadata and thumbnail per file → one summary notification.
// Entries are visible in the store before their metadata arrives.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use imgpdf_bridge::{FileDialogs, ImageBackend, Notifier};
use imgpdf_core::types::{ImageId, InvalidImage, Notification, display_name};
use tracing::{debug, info, instrument, warn};

use crate::state::StoreHandle;

/// What one ingestion run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Ids of the entries appended, in order.
    pub added: Vec<ImageId>,
    /// Files validation turned away.
    pub rejected: Vec<InvalidImage>,
    /// Metadata or thumbnail requests that failed (entries are kept).
    pub enrichment_failures: usize,
}

#[derive(Clone)]
pub struct Ingestor {
    store: StoreHandle,
    backend: Arc<dyn ImageBackend>,
    dialogs: Arc<dyn FileDialogs>,
    notifier: Arc<dyn Notifier>,
    thumbnail_size: u32,
}

impl Ingestor {
    pub fn new(
        store: StoreHandle,
        backend: Arc<dyn ImageBackend>,
        dialogs: Arc<dyn FileDialogs>,
        notifier: Arc<dyn Notifier>,
        thumbnail_size: u32,
    ) -> Self {
        Self {
            store,
            backend,
            dialogs,
            notifier,
            thumbnail_size,
        }
    }

    /// Ask the user for images, then ingest them. Cancelling does nothing.
    pub async fn ingest_from_picker(&self) -> IngestReport {
        match self.dialogs.select_images().await {
            Ok(Some(paths)) if !paths.is_empty() => self.ingest_paths(paths).await,
            Ok(_) => {
                debug!("image picker cancelled");
                IngestReport::default()
            }
            Err(e) => {
                warn!("image picker failed: {e}");
                self.notifier.notify(
                    Notification::error("Error selecting files").with_description(e.to_string()),
                );
                IngestReport::default()
            }
        }
    }

    /// Run the pipeline on `paths` (drop handler and picker share this).
    #[instrument(skip_all, fields(count = paths.len()))]
    pub async fn ingest_paths(&self, paths: Vec<PathBuf>) -> IngestReport {
        let mut report = IngestReport::default();
        if paths.is_empty() {
            return report;
        }

        let validation = match self.backend.validate_images(&paths).await {
            Ok(validation) => validation,
            Err(e) => {
                warn!("validation request failed: {e}");
                self.notifier.notify(
                    Notification::error("Error processing images").with_description(e.to_string()),
                );
                return report;
            }
        };

        for invalid in &validation.invalid {
            self.notifier.notify(
                Notification::warning("Invalid file").with_description(format!(
                    "{}: {}",
                    display_name(&invalid.path),
                    invalid.error
                )),
            );
        }
        report.rejected = validation.invalid;

        if validation.valid.is_empty() {
            return report;
        }

        report.added = self.store.add_images(validation.valid.clone());

        for path in &validation.valid {
            report.enrichment_failures += self.enrich(path).await;
        }

        self.notifier.notify(
            Notification::success("Images added")
                .with_description(format!("Added: {}", report.added.len())),
        );

        info!(
            added = report.added.len(),
            rejected = report.rejected.len(),
            failures = report.enrichment_failures,
            "ingestion finished"
        );
        report
    }

    /// Fetch metadata and thumbnail for one path. Returns how many of the two
    /// requests failed.
    async fn enrich(&self, path: &Path) -> usize {
        let mut failures = 0;

        match self.backend.image_info(path).await {
            Ok(info) => self.store.update_image_info(path, info),
            Err(e) => {
                warn!(path = %path.display(), "metadata unavailable: {e}");
                failures += 1;
            }
        }

        match self.backend.image_thumbnail(path, self.thumbnail_size).await {
            Ok(thumbnail) => self.store.update_image_thumbnail(path, thumbnail),
            Err(e) => {
                warn!(path = %path.display(), "thumbnail unavailable: {e}");
                failures += 1;
            }
        }

        failures
    }
}
