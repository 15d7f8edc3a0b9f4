// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Terminal presentation of user notifications.

use std::io::Write;

use imgpdf_bridge::Notifier;
use imgpdf_core::types::{Notification, NotifySeverity};
use tracing::debug;

/// Prints notifications as single lines on stderr, keeping stdout free for
/// command output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    fn render(notification: &Notification) -> String {
        let label = match notification.severity {
            NotifySeverity::Info => "info",
            NotifySeverity::Success => "done",
            NotifySeverity::Warning => "warning",
            NotifySeverity::Error => "error",
        };
        match &notification.description {
            Some(description) => format!("[{label}] {}: {description}", notification.title),
            None => format!("[{label}] {}", notification.title),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        debug!(severity = ?notification.severity, title = %notification.title, "notify");
        let line = Self::render(&notification);
        // A closed stderr is not worth failing a workflow over.
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }
}
