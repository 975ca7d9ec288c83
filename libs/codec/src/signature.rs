//! Recoverable message signatures
//!
//! A `signMessage` signature is 65 bytes: a header byte followed by the
//! 64-byte compact `r || s`. The header encodes the recovery id and the
//! address format the signer claims:
//!
//! | header   | format                     |
//! |----------|----------------------------|
//! | 27..=30  | P2PKH, uncompressed key    |
//! | 31..=34  | P2PKH, compressed key      |
//! | 35..=38  | P2SH-wrapped segwit        |
//! | 39..=42  | native segwit              |

use crate::error::{CodecError, CodecResult};

pub const MESSAGE_SIGNATURE_LEN: usize = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureFormat {
    Uncompressed,
    Compressed,
    P2shSegwit,
    NativeSegwit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSignature {
    pub header: u8,
    pub compact: [u8; 64],
}

impl MessageSignature {
    pub fn from_hex(signature: &str) -> CodecResult<Self> {
        let bytes =
            hex::decode(signature).map_err(|e| CodecError::invalid_hex("message signature", e))?;
        Self::decode(&bytes)
    }

    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        if bytes.len() != MESSAGE_SIGNATURE_LEN {
            return Err(CodecError::SignatureLength { len: bytes.len() });
        }
        let header = bytes[0];
        if !(27..=42).contains(&header) {
            return Err(CodecError::SignatureHeader { header });
        }
        let mut compact = [0u8; 64];
        compact.copy_from_slice(&bytes[1..]);
        Ok(Self { header, compact })
    }

    pub fn format(&self) -> SignatureFormat {
        match self.header {
            27..=30 => SignatureFormat::Uncompressed,
            31..=34 => SignatureFormat::Compressed,
            35..=38 => SignatureFormat::P2shSegwit,
            _ => SignatureFormat::NativeSegwit,
        }
    }

    pub fn recovery_id(&self) -> u8 {
        (self.header - 27) % 4
    }
}
