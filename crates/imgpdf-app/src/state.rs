// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — the single source of truth for the front end.
//
// Every mutation is a named `Action` applied by `reduce`. `Store::dispatch`
// applies one action and then calls every subscriber with the new state, so
// observers never see a half-applied transition.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use imgpdf_core::types::{
    ImageId, ImageInfo, ImageItem, ImageKey, PdfSettings, PdfSettingsPatch,
};
use tracing::debug;

/// Snapshot of everything the UI renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Display order is export order. Duplicate paths are allowed.
    pub images: Vec<ImageItem>,
    /// Persisted across restarts.
    pub settings: PdfSettings,
    /// Whether an export is in flight.
    pub is_generating: bool,
    /// 0–100; only meaningful while `is_generating` is set.
    pub progress: u8,
}

impl AppState {
    /// Fresh session state around previously persisted settings.
    pub fn with_settings(settings: PdfSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// There is something to export and no export is running.
    pub fn can_generate(&self) -> bool {
        !self.images.is_empty() && !self.is_generating
    }

    /// Current index of the entry with `id`.
    pub fn position_of(&self, id: ImageId) -> Option<usize> {
        self.images.iter().position(|img| img.id == id)
    }

    /// Paths in display (= export) order.
    pub fn image_paths(&self) -> Vec<PathBuf> {
        self.images.iter().map(|img| img.path.clone()).collect()
    }
}

/// Named state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append fully formed entries in order.
    AddImages(Vec<ImageItem>),
    RemoveImage(ImageId),
    ClearImages,
    /// Move the entry at `from` to `to`, shifting the ones in between.
    ReorderImages { from: usize, to: usize },
    /// Move `source` to the position `target` holds now. Ids are resolved
    /// inside the transition; if either is gone nothing changes.
    MoveImage { source: ImageId, target: ImageId },
    /// Set metadata on every entry `key` matches.
    UpdateImageInfo { key: ImageKey, info: ImageInfo },
    /// Set the thumbnail on every entry `key` matches.
    UpdateImageThumbnail { key: ImageKey, thumbnail: String },
    UpdateSettings(PdfSettingsPatch),
    ResetSettings,
    /// Clearing the flag also resets progress to 0.
    SetIsGenerating(bool),
    /// Stored clamped to 0–100.
    SetProgress(i64),
}

impl Action {
    /// Whether applying this action can change the persisted settings.
    pub fn touches_settings(&self) -> bool {
        matches!(self, Self::UpdateSettings(_) | Self::ResetSettings)
    }
}

/// Apply `action` to `state`. Returns `false` when the state is unchanged.
pub fn reduce(state: &mut AppState, action: &Action) -> bool {
    match action {
        Action::AddImages(items) => {
            if items.is_empty() {
                return false;
            }
            state.images.extend(items.iter().cloned());
            true
        }

        Action::RemoveImage(id) => {
            let before = state.images.len();
            state.images.retain(|img| img.id != *id);
            state.images.len() != before
        }

        Action::ClearImages => {
            if state.images.is_empty() {
                return false;
            }
            state.images.clear();
            true
        }

        Action::ReorderImages { from, to } => move_index(&mut state.images, *from, *to),

        Action::MoveImage { source, target } => {
            match (state.position_of(*source), state.position_of(*target)) {
                (Some(from), Some(to)) => move_index(&mut state.images, from, to),
                _ => {
                    debug!(%source, %target, "move ignored: id not in list");
                    false
                }
            }
        }

        Action::UpdateImageInfo { key, info } => {
            let mut changed = false;
            for img in state.images.iter_mut().filter(|img| img.matches(key)) {
                img.info = Some(info.clone());
                changed = true;
            }
            changed
        }

        Action::UpdateImageThumbnail { key, thumbnail } => {
            let mut changed = false;
            for img in state.images.iter_mut().filter(|img| img.matches(key)) {
                img.thumbnail = Some(thumbnail.clone());
                changed = true;
            }
            changed
        }

        Action::UpdateSettings(patch) => {
            let before = state.settings.clone();
            state.settings.apply(patch);
            state.settings != before
        }

        Action::ResetSettings => {
            let defaults = PdfSettings::default();
            if state.settings == defaults {
                return false;
            }
            state.settings = defaults;
            true
        }

        Action::SetIsGenerating(flag) => {
            let before = (state.is_generating, state.progress);
            state.is_generating = *flag;
            if !flag {
                state.progress = 0;
            }
            (state.is_generating, state.progress) != before
        }

        Action::SetProgress(value) => {
            let clamped = (*value).clamp(0, 100) as u8;
            if state.progress == clamped {
                return false;
            }
            state.progress = clamped;
            true
        }
    }
}

/// Remove the entry at `from` and reinsert it at `to`.
fn move_index(images: &mut Vec<ImageItem>, from: usize, to: usize) -> bool {
    let len = images.len();
    if from >= len || to >= len || from == to {
        return false;
    }
    let moved = images.remove(from);
    images.insert(to, moved);
    true
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&AppState, &Action) + Send>;

/// The reducer plus its observers.
pub struct Store {
    state: AppState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply one action, then notify subscribers if anything changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let changed = reduce(&mut self.state, &action);
        debug!(?action, changed, "store transition");
        if changed {
            for (_, subscriber) in &self.subscribers {
                subscriber(&self.state, &action);
            }
        }
        changed
    }

    /// Register an observer. It runs after every state-changing dispatch and
    /// must not dispatch itself.
    pub fn subscribe(
        &mut self,
        subscriber: impl Fn(&AppState, &Action) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub, _)| *sub != id);
    }
}

/// Cheaply cloneable handle shared by the ingestion, reorder and export
/// services. Each method is one atomic transition.
#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<Mutex<Store>>,
}

impl StoreHandle {
    pub fn new(state: AppState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Store::new(state))),
        }
    }

    pub fn dispatch(&self, action: Action) -> bool {
        self.inner.lock().expect("store lock poisoned").dispatch(action)
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> AppState {
        self.read(AppState::clone)
    }

    /// Run `f` against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(self.inner.lock().expect("store lock poisoned").state())
    }

    pub fn subscribe(
        &self,
        subscriber: impl Fn(&AppState, &Action) + Send + 'static,
    ) -> SubscriptionId {
        self.inner.lock().expect("store lock poisoned").subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.lock().expect("store lock poisoned").unsubscribe(id);
    }

    // -- Images --------------------------------------------------------------

    /// Append one fresh entry per path, in input order. Returns the new ids.
    pub fn add_images(&self, paths: Vec<PathBuf>) -> Vec<ImageId> {
        let items: Vec<ImageItem> = paths.into_iter().map(ImageItem::new).collect();
        let ids = items.iter().map(|img| img.id).collect();
        self.dispatch(Action::AddImages(items));
        ids
    }

    pub fn remove_image(&self, id: ImageId) {
        self.dispatch(Action::RemoveImage(id));
    }

    pub fn clear_images(&self) {
        self.dispatch(Action::ClearImages);
    }

    pub fn reorder_images(&self, from: usize, to: usize) -> bool {
        self.dispatch(Action::ReorderImages { from, to })
    }

    /// Move `source` onto `target`'s slot in one transition.
    pub fn move_image(&self, source: ImageId, target: ImageId) -> bool {
        self.dispatch(Action::MoveImage { source, target })
    }

    pub fn update_image_info(&self, key: impl Into<ImageKey>, info: ImageInfo) {
        self.dispatch(Action::UpdateImageInfo {
            key: key.into(),
            info,
        });
    }

    pub fn update_image_thumbnail(&self, key: impl Into<ImageKey>, thumbnail: String) {
        self.dispatch(Action::UpdateImageThumbnail {
            key: key.into(),
            thumbnail,
        });
    }

    // -- Settings ------------------------------------------------------------

    pub fn update_settings(&self, patch: PdfSettingsPatch) {
        self.dispatch(Action::UpdateSettings(patch));
    }

    pub fn reset_settings(&self) {
        self.dispatch(Action::ResetSettings);
    }

    // -- Export progress -----------------------------------------------------

    pub fn set_is_generating(&self, flag: bool) {
        self.dispatch(Action::SetIsGenerating(flag));
    }

    pub fn set_progress(&self, value: i64) {
        self.dispatch(Action::SetProgress(value));
    }
}
