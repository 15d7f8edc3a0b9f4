// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imgpdf — client orchestration: the state store, the ingestion and export
// workflows, and the command-line front end that drives them.

pub mod cli;
pub mod services;
pub mod state;

pub use services::app_services::AppServices;
pub use state::{Action, AppState, StoreHandle};
