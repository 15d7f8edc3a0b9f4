// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export orchestrator.
//
// Idle → Validating → AwaitingPath → Generating → Settled → Idle
//
// Preconditions are checked before any backend call. While the generation
// request is outstanding a synthetic ticker raises the progress bar; the two
// share one select loop, so the ticker stops the moment the result arrives
// and can never write over the final 100%.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use imgpdf_bridge::{FileDialogs, ImageBackend, Notifier};
use imgpdf_core::AppConfig;
use imgpdf_core::error::ImgPdfError;
use imgpdf_core::human_errors::humanize_error;
use imgpdf_core::types::{Notification, PdfSettings};
use tracing::{debug, error, info, instrument, warn};

use super::progress::ProgressTicker;
use crate::state::StoreHandle;

const FAILURE_TITLE: &str = "Error creating PDF";

/// Why an export was turned down before it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportRefusal {
    NoImages,
    InvalidDimensions,
    ExportInProgress,
}

impl ExportRefusal {
    fn as_error(self) -> ImgPdfError {
        match self {
            Self::NoImages => ImgPdfError::NoImages,
            Self::InvalidDimensions => ImgPdfError::InvalidDimensions,
            Self::ExportInProgress => ImgPdfError::ExportInProgress,
        }
    }
}

/// How an export ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// The PDF was written here.
    Written(PathBuf),
    /// Generation failed with this message.
    Failed(String),
    /// The user dismissed the save dialog.
    Cancelled,
    Refused(ExportRefusal),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExportPhase {
    #[default]
    Idle,
    Validating,
    AwaitingPath,
    Generating,
    /// Result known; shown until the state is cleared.
    Settled(ExportOutcome),
}

impl ExportPhase {
    fn is_active(&self) -> bool {
        matches!(self, Self::Validating | Self::AwaitingPath | Self::Generating)
    }
}

#[derive(Clone)]
pub struct Exporter {
    store: StoreHandle,
    backend: Arc<dyn ImageBackend>,
    dialogs: Arc<dyn FileDialogs>,
    notifier: Arc<dyn Notifier>,
    config: Arc<AppConfig>,
    phase: Arc<Mutex<ExportPhase>>,
}

impl Exporter {
    pub fn new(
        store: StoreHandle,
        backend: Arc<dyn ImageBackend>,
        dialogs: Arc<dyn FileDialogs>,
        notifier: Arc<dyn Notifier>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            backend,
            dialogs,
            notifier,
            config,
            phase: Arc::new(Mutex::new(ExportPhase::Idle)),
        }
    }

    pub fn phase(&self) -> ExportPhase {
        self.phase.lock().expect("export phase lock poisoned").clone()
    }

    fn set_phase(&self, phase: ExportPhase) {
        debug!(?phase, "export phase");
        *self.phase.lock().expect("export phase lock poisoned") = phase;
    }

    /// Move to `Validating` unless another export is already running.
    fn begin(&self) -> bool {
        let mut phase = self.phase.lock().expect("export phase lock poisoned");
        if phase.is_active() {
            return false;
        }
        *phase = ExportPhase::Validating;
        true
    }

    fn finish(&self, outcome: ExportOutcome) -> ExportOutcome {
        self.set_phase(ExportPhase::Idle);
        outcome
    }

    /// Export the current list, asking the user where to save.
    pub async fn export(&self) -> ExportOutcome {
        self.run(None).await
    }

    /// Export the current list to a fixed path, skipping the save dialog.
    pub async fn export_to(&self, output: PathBuf) -> ExportOutcome {
        self.run(Some(output)).await
    }

    #[instrument(skip_all)]
    async fn run(&self, fixed_output: Option<PathBuf>) -> ExportOutcome {
        if !self.begin() {
            warn!("export requested while another is running");
            return ExportOutcome::Refused(ExportRefusal::ExportInProgress);
        }

        let (paths, settings, generating) = self
            .store
            .read(|s| (s.image_paths(), s.settings.clone(), s.is_generating));

        if generating {
            warn!("export requested while the store reports one in flight");
            return self.finish(ExportOutcome::Refused(ExportRefusal::ExportInProgress));
        }
        if paths.is_empty() {
            return self.refuse(ExportRefusal::NoImages);
        }
        if settings.validate().is_err() {
            return self.refuse(ExportRefusal::InvalidDimensions);
        }

        self.set_phase(ExportPhase::AwaitingPath);
        let output = match fixed_output {
            Some(path) => path,
            None => match self
                .dialogs
                .select_output_path(&self.config.default_output_name)
                .await
            {
                Ok(Some(path)) => path,
                Ok(None) => {
                    debug!("save dialog cancelled");
                    return self.finish(ExportOutcome::Cancelled);
                }
                Err(e) => {
                    warn!("save dialog failed: {e}");
                    let message = e.to_string();
                    self.notifier.notify(
                        Notification::error(FAILURE_TITLE).with_description(message.clone()),
                    );
                    return self.finish(ExportOutcome::Failed(message));
                }
            },
        };

        self.set_phase(ExportPhase::Generating);
        self.store.set_is_generating(true);
        self.store.set_progress(0);
        info!(images = paths.len(), output = %output.display(), "generating PDF");

        let result = self.generate(&paths, &output, &settings).await;
        self.store.set_progress(100);

        match result {
            Ok(written) => {
                info!(output = %written.display(), "PDF written");
                self.notifier.notify(
                    Notification::success("PDF created")
                        .with_description(written.display().to_string()),
                );
                let outcome = ExportOutcome::Written(written);
                self.set_phase(ExportPhase::Settled(outcome.clone()));
                tokio::time::sleep(self.config.settle_delay()).await;
                self.store.set_is_generating(false);
                self.finish(outcome)
            }
            Err(message) => {
                error!("PDF generation failed: {message}");
                self.notifier
                    .notify(Notification::error(FAILURE_TITLE).with_description(message.clone()));
                let outcome = ExportOutcome::Failed(message);
                self.set_phase(ExportPhase::Settled(outcome.clone()));
                self.store.set_is_generating(false);
                self.finish(outcome)
            }
        }
    }

    fn refuse(&self, refusal: ExportRefusal) -> ExportOutcome {
        let human = humanize_error(&refusal.as_error());
        debug!(?refusal, "export refused");
        self.notifier
            .notify(Notification::error(human.message).with_description(human.suggestion));
        self.finish(ExportOutcome::Refused(refusal))
    }

    /// Drive the generation request and the ticker together. Returns the
    /// written path or the failure message.
    async fn generate(
        &self,
        paths: &[PathBuf],
        output: &Path,
        settings: &PdfSettings,
    ) -> Result<PathBuf, String> {
        let request = self.backend.generate_pdf(paths, output, settings);
        let limit = self.config.generation_timeout();
        let request = async move {
            match limit {
                Some(limit) => tokio::time::timeout(limit, request)
                    .await
                    .unwrap_or(Err(ImgPdfError::Timeout(limit))),
                None => request.await,
            }
        };
        tokio::pin!(request);

        let mut ticker = ProgressTicker::from_config(&self.config);
        let response = loop {
            tokio::select! {
                biased;
                response = &mut request => break response,
                value = ticker.next() => self.store.set_progress(i64::from(value)),
            }
        };

        match response {
            Ok(result) if result.success => {
                Ok(result.output_path.unwrap_or_else(|| output.to_path_buf()))
            }
            Ok(result) => Err(result
                .error
                .unwrap_or_else(|| "PDF generation failed".to_string())),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{Call, GenerationScript, MockBackend, RecordingNotifier};
    use crate::state::{Action, AppState};
    use imgpdf_bridge::PresetDialogs;
    use imgpdf_core::types::{NotifySeverity, PageSize, PdfSettingsPatch};
    use std::time::Duration;

    struct Harness {
        store: StoreHandle,
        backend: Arc<MockBackend>,
        notifier: Arc<RecordingNotifier>,
        exporter: Exporter,
        /// `(is_generating, progress)` after every transition.
        history: Arc<Mutex<Vec<(bool, u8)>>>,
        /// Every value passed to `SetProgress` that changed the state.
        progress_writes: Arc<Mutex<Vec<i64>>>,
    }

    fn harness(backend: MockBackend, dialogs: PresetDialogs, config: AppConfig) -> Harness {
        let store = StoreHandle::new(AppState::default());
        let history = Arc::new(Mutex::new(Vec::new()));
        let progress_writes = Arc::new(Mutex::new(Vec::new()));
        {
            let history = Arc::clone(&history);
            let writes = Arc::clone(&progress_writes);
            store.subscribe(move |state, action| {
                history.lock().unwrap().push((state.is_generating, state.progress));
                if let Action::SetProgress(v) = action {
                    writes.lock().unwrap().push(*v);
                }
            });
        }
        let backend = Arc::new(backend);
        let notifier = Arc::new(RecordingNotifier::default());
        let exporter = Exporter::new(
            store.clone(),
            backend.clone(),
            Arc::new(dialogs),
            notifier.clone(),
            Arc::new(config),
        );
        Harness {
            store,
            backend,
            notifier,
            exporter,
            history,
            progress_writes,
        }
    }

    fn with_images(h: &Harness, names: &[&str]) {
        h.store.add_images(names.iter().map(PathBuf::from).collect());
    }

    fn slow(delay_ms: u64, generation: GenerationScript) -> MockBackend {
        MockBackend {
            generation,
            generation_delay: Duration::from_millis(delay_ms),
            ..Default::default()
        }
    }

    fn save_to(path: &str) -> PresetDialogs {
        PresetDialogs::new().with_output(path)
    }

    #[tokio::test(start_paused = true)]
    async fn success_shows_full_bar_then_clears_after_settle() {
        let h = harness(
            slow(1000, GenerationScript::Succeed),
            save_to("/out.pdf"),
            AppConfig::default(),
        );
        with_images(&h, &["/a.png"]);

        let exporter = h.exporter.clone();
        let task = tokio::spawn(async move { exporter.export().await });

        tokio::time::sleep(Duration::from_millis(1100)).await;
        let mid = h.store.snapshot();
        assert!(mid.is_generating);
        assert_eq!(mid.progress, 100);
        assert_eq!(
            h.exporter.phase(),
            ExportPhase::Settled(ExportOutcome::Written("/out.pdf".into()))
        );

        let outcome = task.await.unwrap();
        assert_eq!(outcome, ExportOutcome::Written("/out.pdf".into()));
        let end = h.store.snapshot();
        assert!(!end.is_generating);
        assert_eq!(end.progress, 0);
        assert_eq!(h.exporter.phase(), ExportPhase::Idle);

        let successes = h.notifier.of(NotifySeverity::Success);
        assert_eq!(successes.len(), 1);
        assert_eq!(successes[0].description.as_deref(), Some("/out.pdf"));
        assert_eq!(h.notifier.all().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_climbs_to_cap_and_never_overrides_completion() {
        let h = harness(
            slow(5000, GenerationScript::Succeed),
            save_to("/out.pdf"),
            AppConfig::default(),
        );
        with_images(&h, &["/a.png", "/b.png"]);

        let exporter = h.exporter.clone();
        let task = tokio::spawn(async move { exporter.export().await });

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(h.store.read(|s| s.progress), 90);
        assert_eq!(h.exporter.phase(), ExportPhase::Generating);

        task.await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        let writes = h.progress_writes.lock().unwrap().clone();
        assert_eq!(writes, [10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
        assert_eq!(h.store.read(|s| s.progress), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reported_failure_clears_immediately() {
        let h = harness(
            slow(300, GenerationScript::Report("disk full".into())),
            save_to("/out.pdf"),
            AppConfig::default(),
        );
        with_images(&h, &["/a.png"]);

        let start = tokio::time::Instant::now();
        let outcome = h.exporter.export().await;
        assert_eq!(outcome, ExportOutcome::Failed("disk full".into()));
        assert_eq!(start.elapsed(), Duration::from_millis(300));

        let history = h.history.lock().unwrap().clone();
        let full = history.iter().position(|&(g, p)| g && p == 100).unwrap();
        assert_eq!(history[full + 1..], [(false, 0)]);

        let errors = h.notifier.of(NotifySeverity::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].description.as_deref().unwrap().contains("disk full"));
        assert!(h.notifier.of(NotifySeverity::Success).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn transport_error_is_a_failure() {
        let h = harness(
            slow(0, GenerationScript::Transport("connection reset".into())),
            save_to("/out.pdf"),
            AppConfig::default(),
        );
        with_images(&h, &["/a.png"]);

        let outcome = h.exporter.export().await;
        assert!(matches!(&outcome, ExportOutcome::Failed(m) if m.contains("connection reset")));
        assert!(!h.store.read(|s| s.is_generating));
        assert_eq!(h.notifier.of(NotifySeverity::Error).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_settles_as_failure() {
        let h = harness(
            slow(10_000, GenerationScript::Succeed),
            save_to("/out.pdf"),
            AppConfig {
                generation_timeout_secs: Some(2),
                ..AppConfig::default()
            },
        );
        with_images(&h, &["/a.png"]);

        let start = tokio::time::Instant::now();
        let outcome = h.exporter.export().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
        assert!(matches!(outcome, ExportOutcome::Failed(_)));
        assert!(!h.store.read(|s| s.is_generating));
        assert_eq!(h.notifier.of(NotifySeverity::Error).len(), 1);
    }

    #[tokio::test]
    async fn empty_list_is_refused_without_backend_calls() {
        let h = harness(MockBackend::default(), save_to("/out.pdf"), AppConfig::default());

        let outcome = h.exporter.export().await;
        assert_eq!(outcome, ExportOutcome::Refused(ExportRefusal::NoImages));
        assert!(h.backend.calls().is_empty());
        assert_eq!(h.notifier.of(NotifySeverity::Error).len(), 1);
        assert!(!h.store.read(|s| s.is_generating));
        assert_eq!(h.exporter.phase(), ExportPhase::Idle);
    }

    #[tokio::test]
    async fn incomplete_custom_size_is_refused() {
        let h = harness(MockBackend::default(), save_to("/out.pdf"), AppConfig::default());
        with_images(&h, &["/a.png"]);

        h.store
            .update_settings(PdfSettingsPatch::default().page_size(PageSize::Custom));
        let outcome = h.exporter.export().await;
        assert_eq!(outcome, ExportOutcome::Refused(ExportRefusal::InvalidDimensions));

        h.store
            .update_settings(PdfSettingsPatch::default().custom_size(0.0, 100.0));
        let outcome = h.exporter.export().await;
        assert_eq!(outcome, ExportOutcome::Refused(ExportRefusal::InvalidDimensions));

        assert_eq!(h.backend.generate_calls(), 0);
        assert_eq!(h.notifier.of(NotifySeverity::Error).len(), 2);
    }

    #[tokio::test]
    async fn cancelled_dialog_is_silent() {
        let h = harness(MockBackend::default(), PresetDialogs::new(), AppConfig::default());
        with_images(&h, &["/a.png"]);

        let outcome = h.exporter.export().await;
        assert_eq!(outcome, ExportOutcome::Cancelled);
        assert!(h.notifier.all().is_empty());
        assert_eq!(h.backend.generate_calls(), 0);
        assert!(h.history.lock().unwrap().iter().all(|&(g, _)| !g));
    }

    #[tokio::test(start_paused = true)]
    async fn second_export_is_refused_while_first_runs() {
        let h = harness(
            slow(1000, GenerationScript::Succeed),
            save_to("/out.pdf"),
            AppConfig::default(),
        );
        with_images(&h, &["/a.png"]);

        let exporter = h.exporter.clone();
        let first = tokio::spawn(async move { exporter.export().await });
        tokio::time::sleep(Duration::from_millis(100)).await;

        let second = h.exporter.export().await;
        assert_eq!(second, ExportOutcome::Refused(ExportRefusal::ExportInProgress));

        assert!(matches!(first.await.unwrap(), ExportOutcome::Written(_)));
        assert_eq!(h.backend.generate_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn generation_uses_store_order_and_settings() {
        let h = harness(
            MockBackend::default(),
            save_to("/dialog.pdf"),
            AppConfig {
                settle_delay_ms: 0,
                ..AppConfig::default()
            },
        );
        with_images(&h, &["/a.png", "/b.png", "/c.png"]);
        h.store.reorder_images(2, 0);
        h.store
            .update_settings(PdfSettingsPatch::default().page_size(PageSize::Letter));

        let outcome = h.exporter.export_to("/fixed.pdf".into()).await;
        assert_eq!(outcome, ExportOutcome::Written("/fixed.pdf".into()));

        let generate = h
            .backend
            .calls()
            .into_iter()
            .find(|c| matches!(c, Call::Generate { .. }))
            .unwrap();
        let Call::Generate {
            paths,
            output,
            settings,
        } = generate
        else {
            unreachable!()
        };
        assert_eq!(
            paths,
            ["/c.png", "/a.png", "/b.png"].map(PathBuf::from).to_vec()
        );
        assert_eq!(output, PathBuf::from("/fixed.pdf"));
        assert_eq!(settings.page_size, PageSize::Letter);
    }
}
