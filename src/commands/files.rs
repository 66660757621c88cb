//! Tauri command handlers for the file list.

use std::path::PathBuf;
use tauri::{AppHandle, Manager, Runtime, State};
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_opener::OpenerExt;
use tracing::{debug, warn};
use crate::core::{AppConfig, AppState, FileId, FileRow, Notice, Notifier, TauriNotifier};
use crate::utils::{ConverterError, ConverterResult};

/// Returns every tracked file in the order it was added.
#[tauri::command]
pub fn list_files(state: State<'_, AppState>) -> ConverterResult<Vec<FileRow>> {
    Ok(state.queue()?.rows())
}

/// Adds files by path, the same way a drop does.
///
/// # Returns
/// The rows that were actually added; duplicates and unsupported files are
/// reported to the user instead.
#[tauri::command]
pub fn add_files(
    app: AppHandle,
    state: State<'_, AppState>,
    paths: Vec<String>,
) -> ConverterResult<Vec<FileRow>> {
    let notifier = TauriNotifier::new(app);
    state.add_paths(paths.into_iter().map(PathBuf::from), &notifier)
}

/// Handles paths dropped onto the window.
pub fn handle_drop<R: Runtime>(app: &AppHandle<R>, paths: Vec<PathBuf>) {
    debug!("Received drop of {} paths", paths.len());
    let state = app.state::<AppState>();
    let notifier = TauriNotifier::new(app.clone());
    if let Err(e) = state.add_paths(paths, &notifier) {
        warn!("Failed to add dropped files: {}", e);
        notifier.notify(Notice::error("Error", e.to_string()));
    }
}

/// Opens the native multi-select file picker; chosen files are added as they
/// would be by a drop.
#[tauri::command]
pub fn browse_files(app: AppHandle) {
    let handle = app.clone();
    app.dialog()
        .file()
        .set_title("Select Files")
        .pick_files(move |picked| {
            let paths: Vec<PathBuf> = picked
                .unwrap_or_default()
                .into_iter()
                .filter_map(|file| file.into_path().ok())
                .collect();
            handle_drop(&handle, paths);
        });
}

/// Changes the target format chosen in a row's dropdown.
#[tauri::command]
pub fn select_target_format(
    state: State<'_, AppState>,
    id: FileId,
    format: String,
) -> ConverterResult<FileRow> {
    state.select_target(id, &format)
}

/// Opens the output directory in the platform's file browser.
#[tauri::command]
pub fn open_output_folder(app: AppHandle, state: State<'_, AppState>) -> ConverterResult<()> {
    let notifier = TauriNotifier::new(app.clone());
    let result = state.output_dir().and_then(|dir| {
        app.opener()
            .open_path(dir.to_string_lossy(), None::<&str>)
            .map_err(|e| ConverterError::io(format!("Failed to open {}: {e}", dir.display())))
    });

    if let Err(e) = &result {
        notifier.notify(Notice::error("Error", e.to_string()));
    }
    result
}

/// Returns the settings in effect.
#[tauri::command]
pub fn get_settings(state: State<'_, AppState>) -> AppConfig {
    state.config().clone()
}
