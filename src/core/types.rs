//! Core types for tracked files, conversion requests and their results.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::utils::{Category, extract_filename, target_formats};

/// Presentation-level lifecycle of a tracked file.
///
/// `Listed -> Converting -> {Converted, Failed}`. Starting a new conversion
/// re-enters `Converting` from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileStatus {
    Listed,
    Converting,
    Converted,
    Failed,
}

/// Stable handle of a row, assigned in insertion order.
///
/// The webview addresses rows by id because a path that is not valid UTF-8
/// cannot round-trip through JSON.
pub type FileId = u64;

/// A file the user has added to the conversion list.
#[derive(Debug, Clone)]
pub struct TrackedFile {
    pub id: FileId,
    /// Path exactly as handed over by the picker or drop payload; unique in the queue
    pub path: PathBuf,
    /// Derived once from the extension when the file is added
    pub category: Category,
    /// Lower-cased source extension
    pub extension: String,
    /// Always one of [`TrackedFile::target_formats`]
    pub selected_target: String,
    pub status: FileStatus,
}

impl TrackedFile {
    /// Formats this file may be converted to, in registry order
    pub fn target_formats(&self) -> Vec<&'static str> {
        target_formats(self.category, &self.extension)
    }

    /// Row shown by the frontend for this file
    pub fn to_row(&self) -> FileRow {
        FileRow {
            id: self.id,
            path: self.path.to_string_lossy().into_owned(),
            file_name: extract_filename(&self.path),
            category: self.category,
            target_formats: self.target_formats().into_iter().map(str::to_string).collect(),
            selected_target: self.selected_target.clone(),
            status: self.status,
        }
    }
}

/// Serializable projection of a [`TrackedFile`] for the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRow {
    pub id: FileId,
    /// Display form of the path; lossy for names that are not UTF-8
    pub path: String,
    pub file_name: String,
    pub category: Category,
    pub target_formats: Vec<String>,
    pub selected_target: String,
    pub status: FileStatus,
}

/// One conversion handed to the worker pool.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub file_id: FileId,
    pub input_path: PathBuf,
    pub category: Category,
    pub target_format: String,
    pub output_path: PathBuf,
}

/// Result of one conversion attempt. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOutcome {
    pub success: bool,
    pub error_message: Option<String>,
    pub output_path: PathBuf,
}

impl ConversionOutcome {
    pub fn succeeded(output_path: PathBuf) -> Self {
        Self {
            success: true,
            error_message: None,
            output_path,
        }
    }

    pub fn failed(output_path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            output_path,
        }
    }
}

/// Message sent from a worker back to the completion loop.
#[derive(Debug, Clone)]
pub struct Completion {
    pub file_id: FileId,
    pub input_path: PathBuf,
    pub target_format: String,
    pub outcome: ConversionOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracked(path: &str, ext: &str, category: Category, target: &str) -> TrackedFile {
        TrackedFile {
            id: 7,
            path: PathBuf::from(path),
            category,
            extension: ext.to_string(),
            selected_target: target.to_string(),
            status: FileStatus::Listed,
        }
    }

    #[test]
    fn test_row_lists_other_formats_of_category() {
        let row = tracked("/music/song.wav", "wav", Category::Audio, "mp3").to_row();
        assert_eq!(row.file_name, "song.wav");
        assert_eq!(row.target_formats, vec!["mp3", "aac", "flac"]);
        assert_eq!(row.selected_target, "mp3");
        assert_eq!(row.status, FileStatus::Listed);
    }

    #[test]
    fn test_row_serializes_camel_case() {
        let row = tracked("/v/clip.mp4", "mp4", Category::Video, "avi").to_row();
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["fileName"], "clip.mp4");
        assert_eq!(json["category"], "video");
        assert_eq!(json["selectedTarget"], "avi");
        assert_eq!(json["status"], "listed");
    }

    #[test]
    fn test_outcome_constructors() {
        let ok = ConversionOutcome::succeeded(PathBuf::from("out/a.png"));
        assert!(ok.success);
        assert!(ok.error_message.is_none());

        let err = ConversionOutcome::failed(PathBuf::from("out/a.png"), "boom");
        assert!(!err.success);
        assert_eq!(err.error_message.as_deref(), Some("boom"));
    }
}
