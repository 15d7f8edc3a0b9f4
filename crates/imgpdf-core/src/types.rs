// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: the image collection entries, the PDF settings model and
// the transient results exchanged with the backend.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ImgPdfError, Result};

/// Extensions accepted by the picker filter and by backend validation.
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tiff", "tif"];

/// Largest image file the backend accepts (50 MiB).
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Thumbnail edge length used when nothing else is configured.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 96;

/// File name suggested by the save dialog.
pub const DEFAULT_OUTPUT_NAME: &str = "images.pdf";

/// Fixed key the persisted settings live under.
pub const SETTINGS_STORAGE_KEY: &str = "image-pdf-storage";

/// Millimetres to PostScript points.
pub const MM_TO_PT: f32 = 2.834_65;

// ---------------------------------------------------------------------------
// Image collection
// ---------------------------------------------------------------------------

/// Unique identifier for an entry in the image list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub Uuid);

impl ImageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Image metadata reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Upper-cased format name (PNG, JPEG, WEBP, ...).
    pub format: String,
    /// File size on disk.
    pub size_bytes: u64,
}

/// One entry in the ordered image collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    pub id: ImageId,
    pub path: PathBuf,
    /// Display name derived from `path`.
    pub name: String,
    /// Populated once metadata arrives; never cleared afterwards.
    pub info: Option<ImageInfo>,
    /// Encoded preview (PNG data URL); same lifecycle as `info`.
    pub thumbnail: Option<String>,
}

impl ImageItem {
    /// Fresh entry with a new id and no metadata yet.
    pub fn new(path: PathBuf) -> Self {
        let name = display_name(&path);
        Self {
            id: ImageId::new(),
            path,
            name,
            info: None,
            thumbnail: None,
        }
    }

    /// Whether `key` names this entry. Paths compare exactly on the OS
    /// string, so names that are not valid UTF-8 still match.
    pub fn matches(&self, key: &ImageKey) -> bool {
        match key {
            ImageKey::Id(id) => self.id == *id,
            ImageKey::Path(path) => self.path == *path,
        }
    }

    /// String form of [`matches`](Self::matches): a UUID names an id,
    /// anything else a path.
    pub fn matches_key(&self, key: &str) -> bool {
        self.matches(&ImageKey::parse(key))
    }
}

/// Addresses entries in the image list by id or by source path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageKey {
    Id(ImageId),
    Path(PathBuf),
}

impl ImageKey {
    /// A UUID becomes an id key, anything else a path key.
    pub fn parse(key: &str) -> Self {
        match Uuid::parse_str(key) {
            Ok(uuid) => Self::Id(ImageId(uuid)),
            Err(_) => Self::Path(PathBuf::from(key)),
        }
    }
}

impl From<ImageId> for ImageKey {
    fn from(id: ImageId) -> Self {
        Self::Id(id)
    }
}

impl From<PathBuf> for ImageKey {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageKey {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for ImageKey {
    fn from(key: &str) -> Self {
        Self::parse(key)
    }
}

/// Last path segment, splitting on both `/` and `\` so that paths from either
/// platform produce a sensible name.
pub fn display_name(path: &Path) -> String {
    let raw = path.to_string_lossy();
    match raw.rsplit(|c: char| c == '/' || c == '\\').next() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => raw.into_owned(),
    }
}

/// Format a byte count as a short human-readable string (`"1.50 MB"`).
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Whether the path carries one of the supported image extensions.
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

// ---------------------------------------------------------------------------
// PDF settings model
// ---------------------------------------------------------------------------

/// Supported page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    /// Dimensions come from `PdfSettings::custom_width/custom_height`.
    Custom,
}

impl PageSize {
    /// Portrait dimensions in points (1/72 inch). `None` for `Custom`.
    pub fn dimensions_pt(&self) -> Option<(f32, f32)> {
        match self {
            Self::A4 => Some((595.0, 842.0)),
            Self::A3 => Some((842.0, 1191.0)),
            Self::A5 => Some((420.0, 595.0)),
            Self::Letter => Some((612.0, 792.0)),
            Self::Legal => Some((612.0, 1008.0)),
            Self::Custom => None,
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// How each image is placed on its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitMode {
    /// Scale to fit inside the page, preserving aspect ratio.
    Fit,
    /// Scale to cover the whole page; overflow is cropped.
    Fill,
    /// Keep the native pixel size (one pixel per point).
    Original,
}

/// Export configuration. The only state that survives a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfSettings {
    pub page_size: PageSize,
    /// Custom page width in millimetres (only used with `PageSize::Custom`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_width: Option<f32>,
    /// Custom page height in millimetres (only used with `PageSize::Custom`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_height: Option<f32>,
    pub orientation: Orientation,
    pub fit_mode: FitMode,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            custom_width: None,
            custom_height: None,
            orientation: Orientation::Portrait,
            fit_mode: FitMode::Fit,
        }
    }
}

impl PdfSettings {
    /// Check the custom-size invariant: with `PageSize::Custom` both
    /// dimensions must be present and positive.
    pub fn validate(&self) -> Result<()> {
        if self.page_size != PageSize::Custom {
            return Ok(());
        }
        match (self.custom_width, self.custom_height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Ok(()),
            _ => Err(ImgPdfError::InvalidDimensions),
        }
    }

    /// Page dimensions in points with orientation applied.
    pub fn page_dimensions_pt(&self) -> Result<(f32, f32)> {
        let (width, height) = match self.page_size.dimensions_pt() {
            Some(dims) => dims,
            None => {
                self.validate()?;
                let w = self.custom_width.ok_or(ImgPdfError::InvalidDimensions)?;
                let h = self.custom_height.ok_or(ImgPdfError::InvalidDimensions)?;
                (w * MM_TO_PT, h * MM_TO_PT)
            }
        };

        Ok(match self.orientation {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        })
    }

    /// Shallow merge: every field set in `patch` replaces the current value.
    pub fn apply(&mut self, patch: &PdfSettingsPatch) {
        if let Some(page_size) = patch.page_size {
            self.page_size = page_size;
        }
        if let Some(width) = patch.custom_width {
            self.custom_width = Some(width);
        }
        if let Some(height) = patch.custom_height {
            self.custom_height = Some(height);
        }
        if let Some(orientation) = patch.orientation {
            self.orientation = orientation;
        }
        if let Some(fit_mode) = patch.fit_mode {
            self.fit_mode = fit_mode;
        }
    }
}

/// Partial settings update; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfSettingsPatch {
    pub page_size: Option<PageSize>,
    pub custom_width: Option<f32>,
    pub custom_height: Option<f32>,
    pub orientation: Option<Orientation>,
    pub fit_mode: Option<FitMode>,
}

impl PdfSettingsPatch {
    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn custom_size(mut self, width_mm: f32, height_mm: f32) -> Self {
        self.custom_width = Some(width_mm);
        self.custom_height = Some(height_mm);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn fit_mode(mut self, fit_mode: FitMode) -> Self {
        self.fit_mode = Some(fit_mode);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// Backend results
// ---------------------------------------------------------------------------

/// A path rejected by validation, with the backend's reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidImage {
    pub path: PathBuf,
    pub error: String,
}

/// Partition of candidate paths into accepted and rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: Vec<PathBuf>,
    pub invalid: Vec<InvalidImage>,
}

/// Outcome of a generation request as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    pub output_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn succeeded(output_path: impl Into<PathBuf>) -> Self {
        Self {
            success: true,
            output_path: Some(output_path.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output_path: None,
            error: Some(error.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// UI-facing events
// ---------------------------------------------------------------------------

/// Severity of a user notification (drives icon/colour in a UI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifySeverity {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the user, independent of how it is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: NotifySeverity,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn new(severity: NotifySeverity, title: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NotifySeverity::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotifySeverity::Success, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NotifySeverity::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotifySeverity::Error, title)
    }
}

/// Drag-end event from the sortable list: move `source` to where `target`
/// is. Both ids refer to the order displayed before the drag started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub source: ImageId,
    pub target: Option<ImageId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_handles_both_separators() {
        assert_eq!(display_name(Path::new("/photos/a.png")), "a.png");
        assert_eq!(display_name(Path::new(r"C:\scans\b.jpg")), "b.jpg");
        assert_eq!(display_name(Path::new("plain.gif")), "plain.gif");
    }

    #[test]
    fn display_name_falls_back_to_full_path() {
        assert_eq!(display_name(Path::new("/trailing/")), "/trailing/");
    }

    #[test]
    fn items_match_by_id_or_path() {
        let item = ImageItem::new(PathBuf::from("/a.png"));
        assert!(item.matches_key("/a.png"));
        assert!(item.matches_key(&item.id.to_string()));
        assert!(!item.matches_key("/b.png"));
        assert!(!item.matches_key(&ImageId::new().to_string()));
    }

    #[test]
    fn key_parsing_splits_ids_from_paths() {
        let id = ImageId::new();
        assert_eq!(ImageKey::parse(&id.to_string()), ImageKey::Id(id));
        assert_eq!(
            ImageKey::parse("/a.png"),
            ImageKey::Path(PathBuf::from("/a.png"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_match_exactly() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/photos/\xffcat.png"));
        let item = ImageItem::new(path.to_path_buf());
        assert!(item.matches(&ImageKey::from(path)));
        assert!(item.matches(&ImageKey::Id(item.id)));

        let lossy = path.to_string_lossy();
        assert!(!item.matches_key(&lossy));
    }

    #[test]
    fn fresh_items_get_distinct_ids() {
        let a = ImageItem::new(PathBuf::from("/same.png"));
        let b = ImageItem::new(PathBuf::from("/same.png"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn file_size_formatting() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512.00 B");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_supported_extension(Path::new("/x/image.JPEG")));
        assert!(has_supported_extension(Path::new("/x/image.tif")));
        assert!(!has_supported_extension(Path::new("/x/file.txt")));
        assert!(!has_supported_extension(Path::new("/x/file")));
    }

    #[test]
    fn default_settings() {
        let s = PdfSettings::default();
        assert_eq!(s.page_size, PageSize::A4);
        assert_eq!(s.orientation, Orientation::Portrait);
        assert_eq!(s.fit_mode, FitMode::Fit);
        assert!(s.custom_width.is_none() && s.custom_height.is_none());
    }

    #[test]
    fn patch_touches_only_given_fields() {
        let mut s = PdfSettings::default();
        s.apply(&PdfSettingsPatch::default().orientation(Orientation::Landscape));
        assert_eq!(
            s,
            PdfSettings {
                orientation: Orientation::Landscape,
                ..PdfSettings::default()
            }
        );
    }

    #[test]
    fn custom_size_requires_both_positive_dimensions() {
        let mut s = PdfSettings {
            page_size: PageSize::Custom,
            ..PdfSettings::default()
        };
        assert!(matches!(s.validate(), Err(ImgPdfError::InvalidDimensions)));

        s.custom_width = Some(100.0);
        assert!(s.validate().is_err());

        s.custom_height = Some(0.0);
        assert!(s.validate().is_err());

        s.custom_height = Some(150.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn standard_sizes_ignore_custom_dimensions() {
        let s = PdfSettings {
            custom_width: Some(-1.0),
            ..PdfSettings::default()
        };
        assert!(s.validate().is_ok());
    }

    #[test]
    fn landscape_swaps_page_dimensions() {
        let s = PdfSettings {
            orientation: Orientation::Landscape,
            ..PdfSettings::default()
        };
        assert_eq!(s.page_dimensions_pt().unwrap(), (842.0, 595.0));
    }

    #[test]
    fn custom_dimensions_convert_from_mm() {
        let s = PdfSettings {
            page_size: PageSize::Custom,
            custom_width: Some(100.0),
            custom_height: Some(200.0),
            ..PdfSettings::default()
        };
        let (w, h) = s.page_dimensions_pt().unwrap();
        assert!((w - 283.465).abs() < 0.01);
        assert!((h - 566.93).abs() < 0.01);
    }

    #[test]
    fn settings_serialize_with_camel_case_keys() {
        let json = serde_json::to_value(PdfSettings::default()).unwrap();
        assert_eq!(json["pageSize"], "A4");
        assert_eq!(json["fitMode"], "Fit");
        assert!(json.get("customWidth").is_none());
    }
}
