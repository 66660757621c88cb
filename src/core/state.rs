//! Application state management for Tauri.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tracing::{debug, info};
use crate::core::{AppConfig, Completion, ConversionRequest, FileId, FileQueue, FileRow, FileStatus, Notice, Notifier};
use crate::utils::{ConverterError, ConverterResult, output_path_for, validate_input_path};
use crate::worker::ConversionPool;

/// Application state managed by Tauri.
///
/// Owns the file list, the settings and the conversion pool. Nothing here is
/// a process-wide global; the app holds exactly one instance.
pub struct AppState {
    queue: Mutex<FileQueue>,
    config: Arc<AppConfig>,
    pool: ConversionPool,
}

impl AppState {
    /// Creates the state and hands back the pool's completion receiver,
    /// which the caller must drain (see [`crate::worker::run_completion_loop`]).
    pub fn new(config: AppConfig) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let config = Arc::new(config);
        let (pool, completions) = ConversionPool::new(Arc::clone(&config));
        let state = Self {
            queue: Mutex::new(FileQueue::new()),
            config,
            pool,
        };
        (state, completions)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn queue(&self) -> ConverterResult<MutexGuard<'_, FileQueue>> {
        Ok(self.queue.lock()?)
    }

    /// Adds files from a drop payload or the file picker.
    ///
    /// Paths that are not existing regular files are skipped. Every other
    /// rejection (duplicate, unsupported) produces exactly one notice.
    pub fn add_paths<I>(&self, paths: I, notifier: &dyn Notifier) -> ConverterResult<Vec<FileRow>>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut added = Vec::new();
        for path in paths {
            if let Err(e) = validate_input_path(&path) {
                debug!("Skipping {}: {}", path.display(), e);
                continue;
            }

            let result = self.queue()?.add_file(&path).map(|file| file.to_row());
            match result {
                Ok(row) => {
                    info!("Added {} ({})", row.file_name, row.category);
                    notifier.row_added(&row);
                    added.push(row);
                }
                Err(e) => {
                    info!("Rejected {}: {}", path.display(), e);
                    notifier.notify(Notice::for_rejection(&e));
                }
            }
        }
        Ok(added)
    }

    pub fn select_target(&self, id: FileId, format: &str) -> ConverterResult<FileRow> {
        Ok(self.queue()?.select_target(id, format)?.to_row())
    }

    /// Marks file `id` as converting and hands it to the pool.
    ///
    /// `format` overrides the row's selected target when given. Nothing
    /// prevents starting a file that is already converting.
    pub fn start_conversion(&self, id: FileId, format: Option<&str>) -> ConverterResult<FileRow> {
        let (request, row) = {
            let mut queue = self.queue()?;
            if let Some(format) = format {
                queue.select_target(id, format)?;
            }
            let file = queue.set_status(id, FileStatus::Converting)?;
            let request = ConversionRequest {
                file_id: file.id,
                input_path: file.path.clone(),
                category: file.category,
                target_format: file.selected_target.clone(),
                output_path: output_path_for(&self.config.output_dir, &file.path, &file.selected_target),
            };
            (request, file.to_row())
        };

        info!("Converting {} to {}", row.file_name, request.target_format);
        self.pool.submit(request);
        Ok(row)
    }

    /// The output directory, provided it still exists
    pub fn output_dir(&self) -> ConverterResult<&Path> {
        let dir = self.config.output_dir.as_path();
        if !dir.is_dir() {
            return Err(ConverterError::MissingOutputDirectory(dir.to_path_buf()));
        }
        Ok(dir)
    }
}
