use rand::RngCore;
use rand::rngs::OsRng;
use strum::{Display, EnumIter, EnumString};

use crate::error::Result;

/// Sizes offered by the raw key generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum KeyLength {
    #[strum(to_string = "128")]
    Bits128,
    #[default]
    #[strum(to_string = "256")]
    Bits256,
    #[strum(to_string = "512")]
    Bits512,
}

impl KeyLength {
    pub fn bytes(self) -> usize {
        match self {
            Self::Bits128 => 16,
            Self::Bits256 => 32,
            Self::Bits512 => 64,
        }
    }
}

/// Random key material rendered as lowercase hex.
pub fn generate_key(length: KeyLength) -> Result<String> {
    let mut key = vec![0u8; length.bytes()];
    OsRng.try_fill_bytes(&mut key)?;
    Ok(hex::encode(key))
}
