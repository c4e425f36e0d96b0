use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info};

use crate::cipher::{Algorithm, Cipher, ContentHasher, Derive, derive_key, generate_iv, segment_nonce};
use crate::container::{ChunkLayout, Container, FileMetadata, payload};
use crate::error::{Error, Result};
use crate::secret::Secret;
use crate::source::Source;
use crate::stream::observer::{Observer, Tracker};
use crate::types::{Processing, Stage};
use crate::validation::{validate_chunk_size, validate_password, validate_source_size};

/// Encrypts `source` into a file container.
///
/// The source is read and sealed one chunk at a time, strictly in order.
/// `observer` receives the processed fraction after every chunk.
///
/// # Errors
/// Validation errors are returned before any key is derived. A reader that
/// ends early fails with [`Error::Io`], one that yields bytes past the
/// declared size fails with [`Error::SourceSizeMismatch`]. Any later
/// failure moves the operation to [`Stage::Failed`] and no partial output is
/// returned.
pub async fn encrypt_large_file<R, O>(source: Source<R>, password: &Secret, algorithm: Algorithm, chunk_size: usize, observer: O) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
    O: Observer,
{
    let mut tracker = Tracker::new(observer, Processing::Encryption);
    let result = encrypt(source, password, algorithm, chunk_size, &mut tracker).await;
    tracker.finish(result)
}

async fn encrypt<R, O>(mut source: Source<R>, password: &Secret, algorithm: Algorithm, chunk_size: usize, tracker: &mut Tracker<O>) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
    O: Observer,
{
    validate_password(password)?;
    validate_chunk_size(chunk_size)?;
    validate_source_size(source.size())?;

    let layout = ChunkLayout::new(source.size(), chunk_size)?;
    let mut metadata = FileMetadata {
        original_name: source.name().to_owned(),
        mime_type: source.mime_type().to_owned(),
        size: source.size(),
        last_modified: source.last_modified(),
        algorithm,
        chunk_size,
        chunk_count: layout.chunk_count(),
        hash: None,
    };

    tracker.enter(Stage::DerivingKey);
    let salt = Derive::generate_salt()?;
    let key = derive_key(password, &salt).await?;
    let iv = generate_iv(algorithm)?;
    let cipher = Cipher::new(&key, algorithm)?;

    let mut sealed = Vec::with_capacity(usize::try_from(layout.sealed_total()).unwrap_or_default());
    let mut hasher = ContentHasher::new();
    let mut buffer = vec![0u8; layout.plaintext_len(0)];
    let mut processed = 0u64;
    let total = layout.chunk_count();

    for index in 0..total {
        tracker.enter(Stage::Processing { chunk: index + 1, of: total });

        let chunk = &mut buffer[..layout.plaintext_len(index)];
        source.reader.read_exact(chunk).await?;
        hasher.update(chunk);

        // Segment 0 is the metadata block; chunks start at 1.
        let encrypted = cipher.encrypt(&segment_nonce(&iv, index + 1), chunk)?;
        sealed.extend_from_slice(&encrypted);

        processed += chunk.len() as u64;
        debug!(chunk = index + 1, of = total, bytes = chunk.len(), "sealed chunk");
        tracker.progress(processed, layout.size());

        tokio::task::yield_now().await;
    }

    let mut trailing = [0u8; 1];
    if source.reader.read(&mut trailing).await? != 0 {
        return Err(Error::SourceSizeMismatch { declared: layout.size() });
    }

    tracker.enter(Stage::Finalizing);
    metadata.hash = Some(hasher.finalize_hex());
    let sealed_metadata = cipher.encrypt(&segment_nonce(&iv, 0), &metadata.to_json()?)?;

    let mut output = Container::new(&salt, &iv, &[]).encode();
    payload::frame_into(&mut output, &sealed_metadata, &sealed)?;

    info!(name = %metadata.original_name, %algorithm, chunks = total, bytes = output.len(), "file encrypted");
    Ok(output)
}
