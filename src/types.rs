//! Common type definitions for cryptkit.
//!
//! - [`Processing`]: distinguishes encryption from decryption for labels
//! - [`Stage`]: the per-operation state machine reported to observers

use std::fmt::{Display, Formatter, Result};

/// Represents a processing operation in progress.
///
/// Provides display labels for progress indicators and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Processing {
    /// An encryption operation is in progress.
    Encryption,

    /// A decryption operation is in progress.
    Decryption,
}

impl Processing {
    /// Returns a progress label for the operation.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::Encryption => "Encrypting...",
            Self::Decryption => "Decrypting...",
        }
    }
}

impl Display for Processing {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.label())
    }
}

/// Lifecycle of a single encryption or decryption call.
///
/// `Idle -> DerivingKey -> Processing -> Finalizing -> Done`, with `Failed`
/// reachable from every stage. `Done` and `Failed` are terminal; a failed
/// operation is never resumed, the caller starts a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Idle,
    DerivingKey,
    /// `chunk` is 1-based; `of` is the total chunk count.
    Processing { chunk: u64, of: u64 },
    Finalizing,
    Done,
    Failed,
}

impl Stage {
    /// Whether no further transitions can follow.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::DerivingKey => f.write_str("deriving key"),
            Self::Processing { chunk, of } => write!(f, "chunk {chunk} of {of}"),
            Self::Finalizing => f.write_str("finalizing"),
            Self::Done => f.write_str("done"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_stages() {
        assert!(Stage::Done.is_terminal());
        assert!(Stage::Failed.is_terminal());
        assert!(!Stage::Idle.is_terminal());
        assert!(!Stage::Processing { chunk: 1, of: 2 }.is_terminal());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Processing { chunk: 3, of: 7 }.to_string(), "chunk 3 of 7");
        assert_eq!(Processing::Decryption.to_string(), "Decrypting...");
    }
}
