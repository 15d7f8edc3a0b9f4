// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — builds the store from persisted settings and wires
// the ingestion, reorder and export workflows to the backend, dialogs and
// notifier.
//
// Settings persistence is a store subscriber: every settings transition is
// written through immediately, nothing else is ever saved.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use imgpdf_bridge::{FileDialogs, ImageBackend, Notifier};
use imgpdf_core::AppConfig;
use imgpdf_core::types::MoveIntent;
use tracing::{info, warn};

use super::data_dir;
use super::export::{ExportOutcome, ExportPhase, Exporter};
use super::ingest::{IngestReport, Ingestor};
use super::local_backend::LocalBackend;
use super::reorder;
use super::settings_store::SettingsStore;
use crate::state::{AppState, StoreHandle};

/// Shared application services. Cheap to clone.
#[derive(Clone)]
pub struct AppServices {
    store: StoreHandle,
    ingestor: Ingestor,
    exporter: Exporter,
    config: Arc<AppConfig>,
    data_dir: PathBuf,
}

impl AppServices {
    /// Initialise with the in-process backend. Call once at startup.
    ///
    /// Resolves the data directory, reads `config.json` (defaults if absent
    /// or unreadable), and restores the persisted settings.
    pub fn init(
        data_dir_override: Option<&Path>,
        dialogs: Arc<dyn FileDialogs>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let dir = data_dir::data_dir(data_dir_override);
        info!(path = %dir.display(), "initialising app services");

        let config = data_dir::load_config(&dir).unwrap_or_else(|e| {
            warn!("config unreadable, using defaults: {e}");
            AppConfig::default()
        });

        Self::with_parts(dir, config, Arc::new(LocalBackend), dialogs, notifier)
    }

    /// Assemble services from explicit collaborators.
    pub fn with_parts(
        data_dir: PathBuf,
        config: AppConfig,
        backend: Arc<dyn ImageBackend>,
        dialogs: Arc<dyn FileDialogs>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let settings_store = SettingsStore::new(&data_dir);
        let store = StoreHandle::new(AppState::with_settings(settings_store.load()));

        // Runs synchronously under the store lock. The settings file is a few
        // hundred bytes; move the write onto a channel if this ever blocks a UI.
        store.subscribe(move |state, action| {
            if !action.touches_settings() {
                return;
            }
            if let Err(e) = settings_store.save(&state.settings) {
                warn!("could not persist settings: {e}");
            }
        });

        let config = Arc::new(config);
        let ingestor = Ingestor::new(
            store.clone(),
            Arc::clone(&backend),
            Arc::clone(&dialogs),
            Arc::clone(&notifier),
            config.thumbnail_size,
        );
        let exporter = Exporter::new(
            store.clone(),
            backend,
            dialogs,
            notifier,
            Arc::clone(&config),
        );

        Self {
            store,
            ingestor,
            exporter,
            config,
            data_dir,
        }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // -- Images --------------------------------------------------------------

    /// Open the image picker and ingest the selection.
    pub async fn pick_images(&self) -> IngestReport {
        self.ingestor.ingest_from_picker().await
    }

    /// Ingest paths dropped onto the window or passed on the command line.
    pub async fn add_paths(&self, paths: Vec<PathBuf>) -> IngestReport {
        self.ingestor.ingest_paths(paths).await
    }

    /// Apply a drag-end move.
    pub fn move_image(&self, intent: MoveIntent) -> bool {
        reorder::apply_move(&self.store, intent)
    }

    // -- Export --------------------------------------------------------------

    pub async fn export(&self) -> ExportOutcome {
        self.exporter.export().await
    }

    pub async fn export_to(&self, output: PathBuf) -> ExportOutcome {
        self.exporter.export_to(output).await
    }

    pub fn export_phase(&self) -> ExportPhase {
        self.exporter.phase()
    }
}
