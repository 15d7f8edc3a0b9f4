// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning knobs for the ingestion and export workflows.
///
/// Loaded read-only from `config.json` in the data directory; every field
/// falls back to its default when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Edge length (pixels) requested for list thumbnails.
    pub thumbnail_size: u32,
    /// Interval between synthetic progress ticks, in milliseconds.
    pub progress_tick_ms: u64,
    /// Percentage added on every tick.
    pub progress_step: u8,
    /// Highest value the ticker may reach before the real result arrives.
    pub progress_cap: u8,
    /// How long 100% stays visible after a successful export, in milliseconds.
    pub settle_delay_ms: u64,
    /// Optional upper bound on the generation request. `None` waits forever.
    pub generation_timeout_secs: Option<u64>,
    /// File name suggested by the save dialog.
    pub default_output_name: String,
}

impl AppConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms.max(1))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn generation_timeout(&self) -> Option<Duration> {
        self.generation_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: crate::DEFAULT_THUMBNAIL_SIZE,
            progress_tick_ms: 200,
            progress_step: 10,
            progress_cap: 90,
            settle_delay_ms: 500,
            generation_timeout_secs: None,
            default_output_name: crate::DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}
