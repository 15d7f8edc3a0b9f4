// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings persistence.
//
// Only `PdfSettings` survives a restart. It is stored as
// `{"settings": {...}}` in `<data_dir>/image-pdf-storage.json`; the image
// list and export progress are never written.

use std::path::{Path, PathBuf};

use imgpdf_core::error::Result;
use imgpdf_core::types::{PdfSettings, SETTINGS_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    settings: PdfSettings,
}

/// Reads and writes the persisted settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{SETTINGS_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load persisted settings. A missing or unreadable file yields defaults.
    pub fn load(&self) -> PdfSettings {
        match self.try_load() {
            Ok(Some(settings)) => settings,
            Ok(None) => PdfSettings::default(),
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring stored settings: {e}");
                PdfSettings::default()
            }
        }
    }

    fn try_load(&self) -> Result<Option<PdfSettings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&self.path)?;
        let state: PersistedState = serde_json::from_str(&data)?;
        Ok(Some(state.settings))
    }

    pub fn save(&self, settings: &PdfSettings) -> Result<()> {
        let state = PersistedState {
            settings: settings.clone(),
        };
        let json = serde_json::to_string_pretty(&state)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "settings persisted");
        Ok(())
    }
}
