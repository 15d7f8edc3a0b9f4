// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scripted bridge implementations shared by the service tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use imgpdf_bridge::{BoxFuture, ImageBackend, Notifier};
use imgpdf_core::error::{ImgPdfError, Result};
use imgpdf_core::types::{
    GenerationResult, ImageInfo, InvalidImage, Notification, NotifySeverity, PdfSettings,
    ValidationResult,
};

/// Every request the mock backend received, in order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Validate(Vec<PathBuf>),
    Info(PathBuf),
    Thumbnail(PathBuf, u32),
    Generate {
        paths: Vec<PathBuf>,
        output: PathBuf,
        settings: PdfSettings,
    },
}

/// How `generate_pdf` answers.
#[derive(Debug, Clone, Default)]
pub(crate) enum GenerationScript {
    #[default]
    Succeed,
    /// `success: false` with this message.
    Report(String),
    /// The request itself fails.
    Transport(String),
}

#[derive(Default)]
pub(crate) struct MockBackend {
    /// Paths validation rejects, with the reason.
    pub invalid: Vec<(PathBuf, String)>,
    pub fail_validation: bool,
    pub fail_info_for: Vec<PathBuf>,
    pub fail_thumbnail_for: Vec<PathBuf>,
    pub generation: GenerationScript,
    /// Virtual time `generate_pdf` takes before answering.
    pub generation_delay: Duration,
    pub log: Mutex<Vec<Call>>,
}

impl MockBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    pub fn generate_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Generate { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }
}

pub(crate) fn sample_info() -> ImageInfo {
    ImageInfo {
        width: 100,
        height: 50,
        format: "PNG".into(),
        size_bytes: 2048,
    }
}

impl ImageBackend for MockBackend {
    fn validate_images<'a>(
        &'a self,
        paths: &'a [PathBuf],
    ) -> BoxFuture<'a, Result<ValidationResult>> {
        Box::pin(async move {
            self.record(Call::Validate(paths.to_vec()));
            if self.fail_validation {
                return Err(ImgPdfError::Bridge("backend unreachable".into()));
            }
            let mut result = ValidationResult::default();
            for path in paths {
                match self.invalid.iter().find(|(p, _)| p == path) {
                    Some((_, error)) => result.invalid.push(InvalidImage {
                        path: path.clone(),
                        error: error.clone(),
                    }),
                    None => result.valid.push(path.clone()),
                }
            }
            Ok(result)
        })
    }

    fn image_info<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<ImageInfo>> {
        Box::pin(async move {
            self.record(Call::Info(path.to_path_buf()));
            if self.fail_info_for.iter().any(|p| p == path) {
                return Err(ImgPdfError::ImageRead(path.display().to_string()));
            }
            Ok(sample_info())
        })
    }

    fn image_thumbnail<'a>(&'a self, path: &'a Path, size: u32) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            self.record(Call::Thumbnail(path.to_path_buf(), size));
            if self.fail_thumbnail_for.iter().any(|p| p == path) {
                return Err(ImgPdfError::ImageProcessing("decode failed".into()));
            }
            Ok(format!("thumb:{}", path.display()))
        })
    }

    fn generate_pdf<'a>(
        &'a self,
        image_paths: &'a [PathBuf],
        output_path: &'a Path,
        settings: &'a PdfSettings,
    ) -> BoxFuture<'a, Result<GenerationResult>> {
        Box::pin(async move {
            self.record(Call::Generate {
                paths: image_paths.to_vec(),
                output: output_path.to_path_buf(),
                settings: settings.clone(),
            });
            if !self.generation_delay.is_zero() {
                tokio::time::sleep(self.generation_delay).await;
            }
            match &self.generation {
                GenerationScript::Succeed => Ok(GenerationResult::succeeded(output_path)),
                GenerationScript::Report(msg) => Ok(GenerationResult::failed(msg.clone())),
                GenerationScript::Transport(msg) => Err(ImgPdfError::Bridge(msg.clone())),
            }
        })
    }
}

/// Keeps every notification for later assertions.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn of(&self, severity: NotifySeverity) -> Vec<Notification> {
        self.all()
            .into_iter()
            .filter(|n| n.severity == severity)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}
