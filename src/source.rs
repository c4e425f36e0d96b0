//! Plaintext sources for file encryption.
//!
//! A [`Source`] pairs an async reader with the descriptive fields that end
//! up in the container metadata: name, MIME type, size and modification
//! time.

use std::path::Path;
use std::time::UNIX_EPOCH;

use tokio::fs::File;

use crate::config::DEFAULT_MIME_TYPE;
use crate::error::Result;

pub struct Source<R> {
    pub(crate) reader: R,
    name: String,
    mime_type: String,
    size: u64,
    last_modified: u64,
}

impl<R> Source<R> {
    pub fn new(reader: R, name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let mime_type = guess_mime_type(&name).to_owned();
        Self { reader, name, mime_type, size, last_modified: 0 }
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        self.mime_type = if mime_type.is_empty() { DEFAULT_MIME_TYPE.to_owned() } else { mime_type };
        self
    }

    /// Modification time in milliseconds since the Unix epoch.
    #[must_use]
    pub fn with_last_modified(mut self, millis: u64) -> Self {
        self.last_modified = millis;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn last_modified(&self) -> u64 {
        self.last_modified
    }
}

impl<'a> Source<&'a [u8]> {
    pub fn from_bytes(name: impl Into<String>, data: &'a [u8]) -> Self {
        Self::new(data, name, data.len() as u64)
    }
}

impl Source<File> {
    /// Opens a file and reads its name, size and modification time.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).await?;
        let metadata = file.metadata().await?;

        let name = path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let last_modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .and_then(|d| u64::try_from(d.as_millis()).ok())
            .unwrap_or_default();

        Ok(Self::new(file, name, metadata.len()).with_last_modified(last_modified))
    }
}

/// Best-effort MIME type from a file name's extension.
pub fn guess_mime_type(name: &str) -> &'static str {
    let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).unwrap_or_default();
    match extension.as_str() {
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => DEFAULT_MIME_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type("photo.JPG"), "image/jpeg");
        assert_eq!(guess_mime_type("notes.txt"), "text/plain");
        assert_eq!(guess_mime_type("archive.unknown"), DEFAULT_MIME_TYPE);
        assert_eq!(guess_mime_type("no_extension"), DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_from_bytes() {
        let source = Source::from_bytes("hello.txt", b"hello world");
        assert_eq!(source.size(), 11);
        assert_eq!(source.mime_type(), "text/plain");
        assert_eq!(source.last_modified(), 0);
    }

    #[test]
    fn test_empty_mime_type_falls_back() {
        let source = Source::from_bytes("a.txt", b"x").with_mime_type("");
        assert_eq!(source.mime_type(), DEFAULT_MIME_TYPE);
    }

    #[tokio::test]
    async fn test_open_reads_file_info() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"file contents").unwrap();

        let source = Source::open(file.path()).await.unwrap();
        assert_eq!(source.size(), 13);
        assert!(source.last_modified() > 0);
        assert_eq!(source.name(), file.path().file_name().unwrap().to_string_lossy());
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        assert!(Source::open("/nonexistent/path/file.txt").await.is_err());
    }
}
