use serde::{Deserialize, Serialize};

use crate::cipher::Algorithm;
use crate::container::ChunkLayout;
use crate::error::{Error, Result};

/// Description of an encrypted file, sealed as the first segment of a file
/// container.
///
/// Serialized as JSON with camelCase keys:
/// `{originalName, mimeType, size, lastModified, algorithm, chunkSize, chunks, hash?}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
    /// Milliseconds since the Unix epoch.
    pub last_modified: u64,
    pub algorithm: Algorithm,
    pub chunk_size: usize,
    #[serde(rename = "chunks")]
    pub chunk_count: u64,
    /// Lowercase hex SHA-256 of the plaintext.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl FileMetadata {
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The chunk layout this metadata describes.
    ///
    /// # Errors
    /// [`Error::Corrupted`] when the recorded chunk count disagrees with
    /// `ceil(size / chunkSize)`, the chunk size is zero, or the sealed
    /// lengths would overflow.
    pub fn layout(&self) -> Result<ChunkLayout> {
        let layout = ChunkLayout::new(self.size, self.chunk_size).map_err(|e| match e {
            Error::InvalidChunkSize => Error::corrupted("metadata chunk size is zero"),
            other => other,
        })?;
        if layout.chunk_count() != self.chunk_count {
            return Err(Error::corrupted(format!("metadata records {} chunks, size implies {}", self.chunk_count, layout.chunk_count())));
        }
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FileMetadata {
        FileMetadata {
            original_name: "report.pdf".into(),
            mime_type: "application/pdf".into(),
            size: 2500,
            last_modified: 1_700_000_000_000,
            algorithm: Algorithm::AesGcm,
            chunk_size: 1024,
            chunk_count: 3,
            hash: None,
        }
    }

    #[test]
    fn test_json_field_names() {
        let json: serde_json::Value = serde_json::from_slice(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["originalName"], "report.pdf");
        assert_eq!(json["mimeType"], "application/pdf");
        assert_eq!(json["lastModified"], 1_700_000_000_000u64);
        assert_eq!(json["algorithm"], "AES-GCM");
        assert_eq!(json["chunkSize"], 1024);
        assert_eq!(json["chunks"], 3);
        assert!(json.get("hash").is_none());
    }

    #[test]
    fn test_parses_hash_when_present() {
        let json = br#"{"originalName":"a","mimeType":"text/plain","size":1,"lastModified":0,"algorithm":"ChaCha20-Poly1305","chunkSize":1,"chunks":1,"hash":"ABCD"}"#;
        let metadata = FileMetadata::from_json(json).unwrap();
        assert_eq!(metadata.hash.as_deref(), Some("ABCD"));
        assert_eq!(metadata.algorithm, Algorithm::ChaCha20Poly1305);
    }

    #[test]
    fn test_layout_checks_chunk_count() {
        assert_eq!(sample().layout().unwrap().chunk_count(), 3);

        let mut bad = sample();
        bad.chunk_count = 2;
        assert!(matches!(bad.layout(), Err(Error::Corrupted(_))));

        bad.chunk_size = 0;
        assert!(matches!(bad.layout(), Err(Error::Corrupted(_))));
    }

    #[test]
    fn test_layout_rejects_overflowing_size() {
        let mut huge = sample();
        huge.size = u64::MAX;
        huge.chunk_size = 1;
        huge.chunk_count = u64::MAX;
        assert!(matches!(huge.layout(), Err(Error::Corrupted(_))));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(FileMetadata::from_json(b"not json"), Err(Error::Metadata(_))));
    }
}
