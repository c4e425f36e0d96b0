//! Input checks that run before any cryptographic work begins.

use std::path::Path;

use crate::config::{BLOCKED_EXTENSIONS, MAX_FILE_SIZE};
use crate::error::{Error, Result};
use crate::secret::Secret;

pub fn validate_password(password: &Secret) -> Result<()> {
    if password.is_empty() {
        return Err(Error::EmptyPassword);
    }
    Ok(())
}

/// Rejects empty sources and sources over [`MAX_FILE_SIZE`].
pub fn validate_source_size(size: u64) -> Result<()> {
    if size == 0 {
        return Err(Error::EmptyInput);
    }
    if size > MAX_FILE_SIZE {
        return Err(Error::FileTooLarge { size, limit: MAX_FILE_SIZE });
    }
    Ok(())
}

pub fn validate_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(Error::InvalidChunkSize);
    }
    Ok(())
}

/// Rejects file names ending in one of [`BLOCKED_EXTENSIONS`]
/// (case-insensitive).
pub fn validate_file_name(path: &Path) -> Result<()> {
    let name = path.file_name().map(|n| n.to_string_lossy().to_lowercase()).unwrap_or_default();
    if BLOCKED_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        return Err(Error::BlockedFileType(name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password() {
        assert!(matches!(validate_password(&Secret::new("")), Err(Error::EmptyPassword)));
        assert!(validate_password(&Secret::new("x")).is_ok());
    }

    #[test]
    fn test_source_size_bounds() {
        assert!(matches!(validate_source_size(0), Err(Error::EmptyInput)));
        assert!(validate_source_size(1).is_ok());
        assert!(validate_source_size(MAX_FILE_SIZE).is_ok());
        assert!(matches!(validate_source_size(MAX_FILE_SIZE + 1), Err(Error::FileTooLarge { .. })));
    }

    #[test]
    fn test_chunk_size() {
        assert!(matches!(validate_chunk_size(0), Err(Error::InvalidChunkSize)));
        assert!(validate_chunk_size(1).is_ok());
    }

    #[test]
    fn test_blocked_file_names() {
        assert!(validate_file_name(Path::new("setup.EXE")).is_err());
        assert!(validate_file_name(Path::new("dir/run.sh")).is_err());
        assert!(validate_file_name(Path::new("app.js")).is_err());
        assert!(validate_file_name(Path::new("notes.txt")).is_ok());
        assert!(validate_file_name(Path::new("data.json")).is_ok());
    }
}
