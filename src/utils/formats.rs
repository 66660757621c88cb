//! Static format registry.
//!
//! Maps a file extension to its media [`Category`] and lists the formats a
//! file of that category can be converted to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const SUPPORTED_IMAGE_FORMATS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];
pub const SUPPORTED_VIDEO_FORMATS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv"];
pub const SUPPORTED_AUDIO_FORMATS: &[&str] = &["mp3", "wav", "aac", "flac"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Image,
    Video,
    Audio,
}

impl Category {
    /// Every extension of this category, in declaration order
    pub fn formats(&self) -> &'static [&'static str] {
        match self {
            Self::Image => SUPPORTED_IMAGE_FORMATS,
            Self::Video => SUPPORTED_VIDEO_FORMATS,
            Self::Audio => SUPPORTED_AUDIO_FORMATS,
        }
    }

    /// Check if the extension belongs to this category
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.formats().contains(&ext.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => f.write_str("image"),
            Self::Video => f.write_str("video"),
            Self::Audio => f.write_str("audio"),
        }
    }
}

/// Classify an extension (with or without case) into its category.
///
/// Returns `None` for anything outside the registry, which callers treat as
/// "unsupported".
pub fn classify(ext: &str) -> Option<Category> {
    [Category::Image, Category::Video, Category::Audio]
        .into_iter()
        .find(|category| category.matches_extension(ext))
}

/// Formats a file of `category` can be converted to, excluding its own
/// extension, in registry order.
pub fn target_formats(category: Category, current_ext: &str) -> Vec<&'static str> {
    let current = current_ext.to_lowercase();
    category
        .formats()
        .iter()
        .copied()
        .filter(|fmt| *fmt != current)
        .collect()
}

/// Check whether `target` is selectable for a file of `category` currently
/// stored as `current_ext`
pub fn is_target_allowed(category: Category, current_ext: &str, target: &str) -> bool {
    let target = target.to_lowercase();
    target_formats(category, current_ext).contains(&target.as_str())
}

/// Get file extension as lowercase string
pub fn extension_of(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
