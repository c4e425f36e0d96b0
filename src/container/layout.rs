//! Chunk arithmetic for file containers.
//!
//! A source of `size` bytes split at `chunk_size` yields
//! `ceil(size / chunk_size)` chunks; every chunk but the last is full. Each
//! sealed chunk is its plaintext length plus [`TAG_SIZE`], which lets the
//! decryptor delimit chunks without per-chunk length prefixes.

use crate::config::TAG_SIZE;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkLayout {
    size: u64,
    chunk_size: usize,
}

impl ChunkLayout {
    /// # Errors
    /// - [`Error::InvalidChunkSize`] when `chunk_size` is zero
    /// - [`Error::Corrupted`] when the sealed lengths do not fit in `u64`
    pub fn new(size: u64, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidChunkSize);
        }

        let tag = TAG_SIZE as u64;
        let sealed_total = size.div_ceil(chunk_size as u64).checked_mul(tag).and_then(|tags| tags.checked_add(size));
        if chunk_size.checked_add(TAG_SIZE).is_none() || sealed_total.is_none() {
            return Err(Error::corrupted(format!("chunk layout of {size} bytes at {chunk_size} per chunk overflows")));
        }

        Ok(Self { size, chunk_size })
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// `ceil(size / chunk_size)`.
    #[inline]
    pub fn chunk_count(&self) -> u64 {
        self.size.div_ceil(self.chunk_size as u64)
    }

    /// Plaintext length of chunk `index`.
    pub fn plaintext_len(&self, index: u64) -> usize {
        let start = index.saturating_mul(self.chunk_size as u64);
        let remaining = self.size.saturating_sub(start);
        // Bounded by chunk_size, which is a usize.
        usize::try_from(remaining.min(self.chunk_size as u64)).unwrap_or(self.chunk_size)
    }

    /// Sealed length of chunk `index`. Cannot overflow, [`ChunkLayout::new`]
    /// checks the widest chunk.
    #[inline]
    pub fn sealed_len(&self, index: u64) -> usize {
        self.plaintext_len(index) + TAG_SIZE
    }

    /// Total sealed length of all chunks. Checked in [`ChunkLayout::new`].
    #[inline]
    pub fn sealed_total(&self) -> u64 {
        self.size + self.chunk_count() * TAG_SIZE as u64
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(matches!(ChunkLayout::new(10, 0), Err(Error::InvalidChunkSize)));
    }

    #[test]
    fn test_overflowing_layout_rejected() {
        assert!(matches!(ChunkLayout::new(u64::MAX, 1), Err(Error::Corrupted(_))));
        assert!(matches!(ChunkLayout::new(u64::MAX - 8, 1024), Err(Error::Corrupted(_))));
        assert!(matches!(ChunkLayout::new(10, usize::MAX), Err(Error::Corrupted(_))));
        assert!(ChunkLayout::new(u64::MAX / 2, usize::MAX / 2).is_ok());
    }

    #[test]
    fn test_exact_multiple() {
        let layout = ChunkLayout::new(4096, 1024).unwrap();
        assert_eq!(layout.chunk_count(), 4);
        assert_eq!(layout.plaintext_len(3), 1024);
        assert_eq!(layout.sealed_total(), 4096 + 4 * TAG_SIZE as u64);
    }

    #[test]
    fn test_short_last_chunk() {
        let layout = ChunkLayout::new(2500, 1024).unwrap();
        assert_eq!(layout.chunk_count(), 3);
        assert_eq!(layout.plaintext_len(0), 1024);
        assert_eq!(layout.plaintext_len(2), 452);
        assert_eq!(layout.sealed_len(2), 452 + TAG_SIZE);
    }

    #[test]
    fn test_empty_source() {
        let layout = ChunkLayout::new(0, 1024).unwrap();
        assert_eq!(layout.chunk_count(), 0);
        assert_eq!(layout.sealed_total(), 0);
    }

    proptest! {
        #[test]
        fn chunk_lengths_cover_source(size in 0u64..200_000, chunk_size in 16usize..70_000) {
            let layout = ChunkLayout::new(size, chunk_size).unwrap();
            let count = layout.chunk_count();

            prop_assert_eq!(count, size.div_ceil(chunk_size as u64));

            let total: u64 = (0..count).map(|i| layout.plaintext_len(i) as u64).sum();
            prop_assert_eq!(total, size);

            let sealed: u64 = (0..count).map(|i| layout.sealed_len(i) as u64).sum();
            prop_assert_eq!(sealed, layout.sealed_total());

            if count > 0 {
                prop_assert!(layout.plaintext_len(count - 1) > 0);
            }
        }
    }
}
