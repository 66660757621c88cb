//! Delivery of finished conversions back to the UI thread.

use tauri::{AppHandle, Manager, Runtime};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use crate::core::{AppState, Completion, FileStatus, Notice, Notifier, TauriNotifier};
use crate::utils::ConverterResult;

/// Records a finished conversion: updates the row status, then signals the
/// recolored row and shows the outcome notice.
pub fn apply_completion(state: &AppState, notifier: &dyn Notifier, completion: &Completion) -> ConverterResult<()> {
    let status = if completion.outcome.success {
        FileStatus::Converted
    } else {
        FileStatus::Failed
    };

    let row = {
        let mut queue = state.queue()?;
        queue.set_status(completion.file_id, status)?.to_row()
    };
    debug!("{} is now {:?}", completion.input_path.display(), status);

    notifier.row_updated(&row);
    notifier.notify(Notice::for_completion(completion));
    Ok(())
}

/// Drains the completion channel until every sender is gone, handing each
/// completion to the main thread.
pub async fn run_completion_loop<R: Runtime>(app: AppHandle<R>, mut rx: mpsc::UnboundedReceiver<Completion>) {
    info!("Completion loop started");
    while let Some(completion) = rx.recv().await {
        let handle = app.clone();
        let dispatched = app.run_on_main_thread(move || {
            let state = handle.state::<AppState>();
            let notifier = TauriNotifier::new(handle.clone());
            if let Err(e) = apply_completion(&state, &notifier, &completion) {
                warn!("Could not apply completion for {}: {}", completion.input_path.display(), e);
            }
        });
        if let Err(e) = dispatched {
            warn!("Failed to reach the main thread: {}", e);
        }
    }
    info!("Completion loop stopped");
}
