// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Synthetic export progress.
//
// The backend reports no real progress, so the export shows a locally
// fabricated percentage: `step` every `period`, never past `cap`. The ticker
// is polled from the export's select loop and owns no task, so dropping it is
// the whole of cancellation.

use std::time::Duration;

use imgpdf_core::AppConfig;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

pub struct ProgressTicker {
    interval: Interval,
    step: u8,
    cap: u8,
    current: u8,
}

impl ProgressTicker {
    /// First tick fires one `period` after creation.
    pub fn new(period: Duration, step: u8, cap: u8) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            step,
            cap: cap.min(100),
            current: 0,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.tick_interval(), config.progress_step, config.progress_cap)
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    /// Wait for the next tick and return the new value. Once the cap is
    /// reached this never resolves.
    pub async fn next(&mut self) -> u8 {
        if self.current >= self.cap || self.step == 0 {
            std::future::pending::<()>().await;
        }
        self.interval.tick().await;
        self.current = self.current.saturating_add(self.step).min(self.cap);
        self.current
    }
}
