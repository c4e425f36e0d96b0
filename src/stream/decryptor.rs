use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use crate::cipher::{Algorithm, Cipher, DerivedKey, Integrity, derive_key, segment_nonce};
use crate::config::{SALT_LEN, STANDARD_IV_SIZE};
use crate::container::payload::Payload;
use crate::container::{Container, FileMetadata};
use crate::error::{Error, Result};
use crate::secret::Secret;
use crate::stream::observer::{Observer, Tracker};
use crate::types::{Processing, Stage};
use crate::validation::validate_password;

/// Output of [`decrypt_data`].
#[derive(Debug)]
pub struct Decrypted {
    pub data: Vec<u8>,
    pub metadata: FileMetadata,
    pub integrity: Integrity,
}

impl Decrypted {
    /// Fail-closed view of the integrity flag.
    ///
    /// # Errors
    /// [`Error::IntegrityMismatch`] when the recorded digest did not match.
    pub fn ensure_intact(&self) -> Result<()> {
        match self.integrity {
            Integrity::Mismatch => Err(Error::IntegrityMismatch),
            Integrity::Verified | Integrity::Unchecked => Ok(()),
        }
    }
}

/// Decrypts a file container produced by
/// [`encrypt_large_file`](crate::stream::encrypt_large_file).
///
/// The algorithm is not stored in clear. It is identified by opening the
/// metadata segment with each supported algorithm; the key is derived only
/// once since it does not depend on the algorithm.
///
/// # Errors
/// - [`Error::Corrupted`] for containers too short or structurally invalid
/// - [`Error::Decryption`] for a wrong password or modified ciphertext
pub async fn decrypt_data<O: Observer>(container: &[u8], password: &Secret, observer: O) -> Result<Decrypted> {
    let mut tracker = Tracker::new(observer, Processing::Decryption);
    let result = decrypt(container, password, &mut tracker).await;
    tracker.finish(result)
}

async fn decrypt<O: Observer>(bytes: &[u8], password: &Secret, tracker: &mut Tracker<O>) -> Result<Decrypted> {
    validate_password(password)?;
    let header = Container::decode(bytes, STANDARD_IV_SIZE)?;

    tracker.enter(Stage::DerivingKey);
    let key = derive_key(password, header.salt).await?;

    let (container, payload, cipher, metadata) = open_metadata(bytes, &key)?;
    let layout = metadata.layout()?;
    let chunks = payload.chunks(layout)?;
    let total = layout.chunk_count();

    let mut data = Vec::with_capacity(usize::try_from(layout.size()).unwrap_or_default());
    for (index, sealed) in chunks {
        tracker.enter(Stage::Processing { chunk: index + 1, of: total });

        let chunk = cipher.decrypt(&segment_nonce(container.iv, index + 1), sealed)?;
        data.extend_from_slice(&chunk);

        debug!(chunk = index + 1, of = total, bytes = chunk.len(), "opened chunk");
        tracker.progress(data.len() as u64, layout.size());

        tokio::task::yield_now().await;
    }

    tracker.enter(Stage::Finalizing);
    let integrity = Integrity::check(&data, metadata.hash.as_deref());
    if integrity == Integrity::Mismatch {
        warn!(name = %metadata.original_name, "integrity check failed: decrypted data does not match the recorded hash");
    }

    info!(name = %metadata.original_name, algorithm = %metadata.algorithm, chunks = total, bytes = data.len(), ?integrity, "file decrypted");
    Ok(Decrypted { data, metadata, integrity })
}

/// Finds the algorithm whose metadata segment authenticates under `key`.
fn open_metadata<'a>(bytes: &'a [u8], key: &DerivedKey) -> Result<(Container<'a>, Payload<'a>, Cipher, FileMetadata)> {
    let mut structural = None;

    for algorithm in Algorithm::iter() {
        let framed = Container::decode(bytes, algorithm.iv_len()).and_then(|c| Payload::split(c.ciphertext).map(|p| (c, p)));
        let (container, payload) = match framed {
            Ok(framed) => framed,
            Err(e) => {
                structural.get_or_insert(e);
                continue;
            }
        };

        let cipher = Cipher::new(key, algorithm)?;
        let Ok(json) = cipher.decrypt(&segment_nonce(container.iv, 0), payload.metadata) else {
            continue;
        };

        let metadata = FileMetadata::from_json(&json)?;
        if metadata.algorithm != algorithm {
            return Err(Error::corrupted(format!("metadata names {} but was sealed with {algorithm}", metadata.algorithm)));
        }

        debug!(%algorithm, "identified container algorithm");
        return Ok((container, payload, cipher, metadata));
    }

    // Only report structure when no candidate layout even reached decryption.
    let attempted = Algorithm::iter().any(|a| Container::decode(bytes, a.iv_len()).is_ok_and(|c| Payload::split(c.ciphertext).is_ok()));
    if attempted {
        Err(Error::Decryption)
    } else {
        Err(structural.unwrap_or_else(|| Error::corrupted(format!("container shorter than {SALT_LEN} byte salt"))))
    }
}
