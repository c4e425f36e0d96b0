//! Framing of the ciphertext region of a file container.
//!
//! ```text
//! [u32 BE metadata_len] [sealed metadata] [sealed chunk 0] ... [sealed chunk n-1]
//! ```
//!
//! The metadata ciphertext has no length known in advance, so it carries a
//! 4-byte prefix. Chunks carry none: their lengths follow from the decrypted
//! metadata through [`ChunkLayout`].

use crate::config::{MAX_METADATA_LEN, METADATA_LEN_SIZE};
use crate::container::ChunkLayout;
use crate::error::{Error, Result};

/// Appends the framed payload to `out`.
///
/// # Errors
/// [`Error::Corrupted`] if the sealed metadata exceeds [`MAX_METADATA_LEN`].
pub fn frame_into(out: &mut Vec<u8>, metadata: &[u8], chunks: &[u8]) -> Result<()> {
    if metadata.len() > MAX_METADATA_LEN {
        return Err(Error::corrupted(format!("metadata segment of {} bytes exceeds {MAX_METADATA_LEN}", metadata.len())));
    }
    let len = u32::try_from(metadata.len()).map_err(|_| Error::corrupted("metadata length overflow"))?;

    out.reserve(METADATA_LEN_SIZE + metadata.len() + chunks.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(metadata);
    out.extend_from_slice(chunks);
    Ok(())
}

/// The two parts of a framed ciphertext region.
#[derive(Clone, Copy, Debug)]
pub struct Payload<'a> {
    pub metadata: &'a [u8],
    pub chunks: &'a [u8],
}

impl<'a> Payload<'a> {
    /// Splits a ciphertext region at its metadata length prefix.
    ///
    /// # Errors
    /// [`Error::Corrupted`] if the prefix is missing, zero, oversized or
    /// points past the end of the region.
    pub fn split(region: &'a [u8]) -> Result<Self> {
        if region.len() < METADATA_LEN_SIZE {
            return Err(Error::corrupted("missing metadata length prefix"));
        }

        let (prefix, rest) = region.split_at(METADATA_LEN_SIZE);
        let prefix: [u8; METADATA_LEN_SIZE] = prefix.try_into().map_err(|_| Error::corrupted("metadata length prefix"))?;
        let len = u32::from_be_bytes(prefix) as usize;

        if len == 0 || len > MAX_METADATA_LEN {
            return Err(Error::corrupted(format!("invalid metadata length {len}")));
        }
        if len > rest.len() {
            return Err(Error::corrupted(format!("metadata length {len} exceeds remaining {} bytes", rest.len())));
        }

        let (metadata, chunks) = rest.split_at(len);
        Ok(Self { metadata, chunks })
    }

    /// Iterates sealed chunks as laid out by `layout`.
    ///
    /// # Errors
    /// [`Error::Corrupted`] unless the chunk region is exactly
    /// `layout.sealed_total()` bytes.
    pub fn chunks(&self, layout: ChunkLayout) -> Result<Chunks<'a>> {
        let expected = layout.sealed_total();
        if self.chunks.len() as u64 != expected {
            return Err(Error::corrupted(format!("chunk region is {} bytes, metadata implies {expected}", self.chunks.len())));
        }
        Ok(Chunks { rest: self.chunks, layout, index: 0 })
    }
}

/// Iterator over `(index, sealed chunk)` pairs.
pub struct Chunks<'a> {
    rest: &'a [u8],
    layout: ChunkLayout,
    index: u64,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = (u64, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.layout.chunk_count() {
            return None;
        }

        let len = self.layout.sealed_len(self.index).min(self.rest.len());
        let (chunk, rest) = self.rest.split_at(len);
        self.rest = rest;

        let index = self.index;
        self.index += 1;
        Some((index, chunk))
    }
}
