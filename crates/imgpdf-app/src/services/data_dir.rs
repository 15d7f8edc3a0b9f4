// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution and config loading.

use std::path::{Path, PathBuf};

use imgpdf_core::AppConfig;
use imgpdf_core::error::Result;
use tracing::{debug, warn};

const APP_DIR: &str = "imgpdf";
const CONFIG_FILE: &str = "config.json";

/// Return the application data directory, creating it if needed.
///
/// `override_dir` wins when given; otherwise the platform data directory is
/// used, falling back to the system temp directory.
pub fn data_dir(override_dir: Option<&Path>) -> PathBuf {
    let dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR),
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!(path = %dir.display(), "could not create data directory: {e}");
    }
    dir
}

/// Load `config.json` from `dir`. A missing file yields defaults.
pub fn load_config(dir: &Path) -> Result<AppConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }
    let data = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&data)?)
}
