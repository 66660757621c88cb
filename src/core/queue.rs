//! Ordered, path-deduplicated list of files the user has added.

use std::path::Path;
use tracing::debug;
use crate::core::{FileId, FileRow, FileStatus, TrackedFile};
use crate::utils::{ConverterError, ConverterResult, QueueError, classify, extension_of, extract_filename, is_target_allowed, target_formats};

/// Insertion-ordered list of [`TrackedFile`]s. Files are never removed.
#[derive(Debug, Default)]
pub struct FileQueue {
    files: Vec<TrackedFile>,
    next_id: FileId,
}

impl FileQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths compare by their OS representation, never a lossy string
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.find(path).is_some()
    }

    pub fn find(&self, path: impl AsRef<Path>) -> Option<&TrackedFile> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path == path)
    }

    pub fn get(&self, id: FileId) -> Option<&TrackedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    fn get_mut(&mut self, id: FileId) -> ConverterResult<&mut TrackedFile> {
        self.files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(ConverterError::UnknownFile(id))
    }

    /// Adds `path` to the end of the queue.
    ///
    /// Duplicates are rejected before the extension is looked at, so a
    /// second add of any path yields exactly one `DuplicateFile`.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<&TrackedFile, QueueError> {
        let path = path.as_ref();
        let name = extract_filename(path);
        if self.contains(path) {
            return Err(QueueError::DuplicateFile(name));
        }

        let extension = extension_of(path).unwrap_or_default();
        let category = classify(&extension).ok_or(QueueError::UnsupportedFormat(name))?;

        // Every category has more than one format, so there is always a first target
        let selected_target = target_formats(category, &extension)
            .first()
            .map(|s| s.to_string())
            .unwrap_or_default();

        let id = self.next_id;
        self.next_id += 1;

        debug!("Queued {} as {} #{} (default target {})", path.display(), category, id, selected_target);
        self.files.push(TrackedFile {
            id,
            path: path.to_path_buf(),
            category,
            extension,
            selected_target,
            status: FileStatus::Listed,
        });

        Ok(&self.files[self.files.len() - 1])
    }

    /// Changes the target format picked in the row's dropdown
    pub fn select_target(&mut self, id: FileId, format: &str) -> ConverterResult<&TrackedFile> {
        let file = self.get_mut(id)?;
        if !is_target_allowed(file.category, &file.extension, format) {
            return Err(QueueError::UnsupportedFormat(format!(
                "{}.{}",
                extract_filename(&file.path),
                format
            ))
            .into());
        }
        file.selected_target = format.to_lowercase();
        Ok(file)
    }

    pub fn set_status(&mut self, id: FileId, status: FileStatus) -> ConverterResult<&TrackedFile> {
        let file = self.get_mut(id)?;
        file.status = status;
        Ok(file)
    }

    /// Rows in insertion order
    pub fn rows(&self) -> Vec<FileRow> {
        self.files.iter().map(TrackedFile::to_row).collect()
    }
}
