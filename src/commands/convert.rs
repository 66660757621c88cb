//! Tauri command handler for starting a conversion.

use tauri::{AppHandle, State};
use tracing::debug;
use crate::core::{AppState, FileId, FileRow, Notifier, TauriNotifier};
use crate::utils::ConverterResult;

/// Starts converting one tracked file in the background.
///
/// # Arguments
/// * `id` - Row id of a file already in the list
/// * `format` - Target format; the row's current selection when omitted
///
/// # Returns
/// The row in its `converting` state. The outcome arrives later as a
/// `file-updated` event plus a message box.
#[tauri::command]
pub fn convert_file(
    app: AppHandle,
    state: State<'_, AppState>,
    id: FileId,
    format: Option<String>,
) -> ConverterResult<FileRow> {
    debug!("Received convert_file command for #{}", id);
    let row = state.start_conversion(id, format.as_deref())?;
    TauriNotifier::new(app).row_updated(&row);
    Ok(row)
}
