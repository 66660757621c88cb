//! User-facing signals: modal notices and row updates.
//!
//! [`Notifier`] is the seam between application logic and the window. The
//! Tauri implementation shows native message boxes through the dialog plugin
//! and emits row events to the webview.

use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager, Runtime};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tracing::warn;
use crate::core::{Completion, FileRow};
use crate::utils::{QueueError, extract_filename};

pub const FILE_ADDED_EVENT: &str = "file-added";
pub const FILE_UPDATED_EVENT: &str = "file-updated";
/// Label of the window message boxes are attached to
pub const MAIN_WINDOW: &str = "main";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A blocking message shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, title: title.into(), message: message.into() }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title: title.into(), message: message.into() }
    }

    /// Notice for a file that could not be added
    pub fn for_rejection(err: &QueueError) -> Self {
        match err {
            QueueError::DuplicateFile(_) => Self::info("Duplicate File", err.to_string()),
            QueueError::UnsupportedFormat(_) => Self::error("Unsupported Format", err.to_string()),
            QueueError::NotFound(_) | QueueError::NotAFile(_) => Self::error("Invalid File", err.to_string()),
        }
    }

    /// Notice for a finished conversion
    pub fn for_completion(completion: &Completion) -> Self {
        match &completion.outcome.error_message {
            None => Self::info(
                "Conversion Complete",
                format!("The file has been converted to {}.", completion.target_format),
            ),
            Some(error) => Self::error(
                "Conversion Error",
                format!(
                    "Failed to convert {}:\n{}",
                    extract_filename(&completion.input_path),
                    error
                ),
            ),
        }
    }
}

pub trait Notifier: Send + Sync {
    /// Shows a blocking message to the user
    fn notify(&self, notice: Notice);

    /// A new row joined the file list
    fn row_added(&self, row: &FileRow);

    /// An existing row changed (target or status)
    fn row_updated(&self, row: &FileRow);
}

/// [`Notifier`] backed by the running Tauri app.
pub struct TauriNotifier<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriNotifier<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> Notifier for TauriNotifier<R> {
    fn notify(&self, notice: Notice) {
        let kind = match notice.level {
            NoticeLevel::Info => MessageDialogKind::Info,
            NoticeLevel::Error => MessageDialogKind::Error,
        };
        let mut dialog = self
            .app
            .dialog()
            .message(notice.message)
            .title(notice.title)
            .kind(kind);
        // Parented to the main window so the box is modal to it
        match self.app.get_webview_window(MAIN_WINDOW) {
            Some(window) => dialog = dialog.parent(&window),
            None => warn!("Window '{}' not found, showing unparented message box", MAIN_WINDOW),
        }
        dialog.show(|_| {});
    }

    fn row_added(&self, row: &FileRow) {
        if let Err(e) = self.app.emit(FILE_ADDED_EVENT, row) {
            warn!("Failed to emit {}: {}", FILE_ADDED_EVENT, e);
        }
    }

    fn row_updated(&self, row: &FileRow) {
        if let Err(e) = self.app.emit(FILE_UPDATED_EVENT, row) {
            warn!("Failed to emit {}: {}", FILE_UPDATED_EVENT, e);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use crate::core::ConversionOutcome;

    #[test]
    fn test_rejection_notices() {
        let dup = Notice::for_rejection(&QueueError::DuplicateFile("a.png".into()));
        assert_eq!(dup.level, NoticeLevel::Info);
        assert_eq!(dup.title, "Duplicate File");

        let unsupported = Notice::for_rejection(&QueueError::UnsupportedFormat("a.txt".into()));
        assert_eq!(unsupported.level, NoticeLevel::Error);
        assert_eq!(unsupported.message, "The file 'a.txt' is not supported.");
    }

    #[test]
    fn test_completion_notices() {
        let ok = Completion {
            file_id: 0,
            input_path: PathBuf::from("/pics/photo.png"),
            target_format: "webp".into(),
            outcome: ConversionOutcome::succeeded(PathBuf::from("converted/photo.webp")),
        };
        let notice = Notice::for_completion(&ok);
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.message, "The file has been converted to webp.");

        let failed = Completion {
            outcome: ConversionOutcome::failed(PathBuf::from("converted/photo.webp"), "Decode error: bad"),
            ..ok
        };
        let notice = Notice::for_completion(&failed);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Failed to convert photo.png:\nDecode error: bad");
    }

    #[test]
    fn test_message_box_parent_is_a_configured_window() {
        let conf: serde_json::Value = serde_json::from_str(include_str!("../../tauri.conf.json")).unwrap();
        let labels: Vec<&str> = conf["app"]["windows"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|w| w["label"].as_str())
            .collect();
        assert!(labels.contains(&MAIN_WINDOW), "{labels:?}");
    }
}
