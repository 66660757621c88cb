use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use crate::utils::{ConverterError, ConverterResult};

/// Create the output directory (and parents) if it does not exist yet
pub fn ensure_output_dir(dir: impl AsRef<Path>) -> ConverterResult<()> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        debug!("Creating output directory {}", dir.display());
    }
    std::fs::create_dir_all(dir)
        .map_err(|e| ConverterError::io(format!("Cannot create output directory {}: {e}", dir.display())))
}

/// Destination of a conversion: `<output_dir>/<source stem>.<target>`.
///
/// Two sources sharing a stem map to the same destination for the same
/// target; whichever conversion finishes last wins.
pub fn output_path_for(output_dir: &Path, source: &Path, target: &str) -> PathBuf {
    // Stays an OsString so stems that are not UTF-8 survive unchanged
    let mut name = source
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".");
    name.push(target.to_lowercase());
    output_dir.join(name)
}

/// Returns the final component of a path for display
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Best-effort removal of an output left behind by a failed conversion
pub fn remove_partial_output(path: &Path) {
    if !path.exists() {
        return;
    }
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Removed partial output {}", path.display()),
        Err(e) => warn!("Could not remove partial output {}: {e}", path.display()),
    }
}
