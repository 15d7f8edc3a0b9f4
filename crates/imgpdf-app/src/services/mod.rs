// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — the asynchronous workflows that sit between the front end
// and the store: ingestion, reordering and export, plus their wiring.
//
// Each workflow talks to the outside world only through the bridge traits, so
// the same code drives the CLI and the unit tests.

pub mod app_services;
pub mod data_dir;
pub mod export;
pub mod ingest;
pub mod local_backend;
pub mod notify;
pub mod progress;
pub mod reorder;
pub mod settings_store;

#[cfg(test)]
pub(crate) mod testing;
