//! Decoding errors for response wire shapes
//!
//! Each variant carries enough context (offset, buffer size, what was being
//! decoded) to point at the offending byte of a fixture or a core response.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input string is not hex
    #[error("Invalid hex in {context}: {reason}")]
    InvalidHex { context: String, reason: String },

    /// Buffer ended before a field could be read
    #[error("Truncated {context}: need {need} bytes at offset {offset}, buffer has {buffer_size}")]
    Truncated {
        need: usize,
        offset: usize,
        buffer_size: usize,
        context: String,
    },

    /// Bytes left over after a complete structure was decoded
    #[error("{count} trailing bytes after {context} (offset {offset})")]
    TrailingBytes {
        count: usize,
        offset: usize,
        context: String,
    },

    /// Script bytes are not a well-formed sequence of opcodes and pushes
    #[error("Malformed script at offset {offset}: {reason}")]
    MalformedScript { offset: usize, reason: String },

    /// Script is well formed but not an OP_CHECKMULTISIG redeem script
    #[error("Not a multisig redeem script: {reason}")]
    NotMultisig { reason: String },

    /// Message signature is not 65 bytes
    #[error("Message signature must be 65 bytes, got {len}")]
    SignatureLength { len: usize },

    /// Message signature header byte outside the recoverable range
    #[error("Unknown message signature header {header:#04x} (expected 27..=42)")]
    SignatureHeader { header: u8 },

    /// NEM address failed the shape check
    #[error("Invalid NEM address '{address}': {reason}")]
    NemAddress { address: String, reason: String },
}

impl CodecError {
    pub fn truncated(need: usize, offset: usize, buffer_size: usize, context: impl Into<String>) -> Self {
        Self::Truncated {
            need,
            offset,
            buffer_size,
            context: context.into(),
        }
    }

    pub fn invalid_hex(context: impl Into<String>, err: hex::FromHexError) -> Self {
        Self::InvalidHex {
            context: context.into(),
            reason: err.to_string(),
        }
    }

    pub fn malformed_script(offset: usize, reason: impl Into<String>) -> Self {
        Self::MalformedScript {
            offset,
            reason: reason.into(),
        }
    }

    pub fn nem_address(address: &str, reason: impl Into<String>) -> Self {
        Self::NemAddress {
            address: address.to_string(),
            reason: reason.into(),
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
