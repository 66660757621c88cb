use std::path::Path;
use crate::utils::QueueError;

/// Validates a path handed over by the file picker or a drop payload
pub fn validate_input_path(path: &Path) -> Result<(), QueueError> {
    if !path.exists() {
        return Err(QueueError::NotFound(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(QueueError::NotAFile(path.to_path_buf()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_input_path() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("song.mp3");
        std::fs::write(&file, b"id3").unwrap();

        assert_eq!(validate_input_path(&file), Ok(()));
        assert_eq!(
            validate_input_path(temp.path()),
            Err(QueueError::NotAFile(temp.path().to_path_buf()))
        );
        let missing = temp.path().join("missing.mp3");
        assert_eq!(validate_input_path(&missing), Err(QueueError::NotFound(missing.clone())));
    }
}
