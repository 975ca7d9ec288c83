//! Error types for HD path parsing and request payload validation

use thiserror::Error;

/// Errors produced while parsing a textual derivation path
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A `/`-separated component was empty (e.g. `m/44'//0`)
    #[error("Empty component at position {position} in path '{path}'")]
    EmptyComponent { path: String, position: usize },

    /// A component is not a decimal index with an optional hardened marker
    #[error("Invalid path component '{component}' in path '{path}'")]
    InvalidComponent { path: String, component: String },

    /// Index does not fit below the hardened bit
    #[error("Index {index} in path '{path}' must be below 2^31")]
    IndexOutOfRange { path: String, index: u64 },
}

/// Errors produced while validating a request payload fixture
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error(transparent)]
    Path(#[from] PathError),

    /// A derivation path that must select a key is empty
    #[error("{field} must not be an empty derivation path")]
    EmptyPath { field: String },

    #[error("{field} must not be empty")]
    EmptyField { field: String },

    /// Previous transaction hash is not 32 bytes of hex
    #[error("{field} must be 64 hex characters, got '{value}'")]
    InvalidPrevHash { field: String, value: String },

    #[error("{field} is not valid hex: '{value}'")]
    InvalidHex { field: String, value: String },

    /// Multisig threshold outside 1..=n
    #[error("{field}: threshold m={m} is invalid for {n} cosigners")]
    InvalidThreshold { field: String, m: u32, n: usize },

    /// Multisig signature slots do not line up with the cosigners
    #[error("{field}: {signatures} signature slots for {pubkeys} cosigners")]
    SignatureSlotMismatch {
        field: String,
        signatures: usize,
        pubkeys: usize,
    },

    /// Script type and multisig descriptor disagree
    #[error("{field}: script type {script_type} {reason}")]
    ScriptTypeMismatch {
        field: String,
        script_type: String,
        reason: String,
    },

    #[error("{field} amounts overflow a 64-bit total")]
    AmountOverflow { field: String },

    /// Outputs spend more than the inputs provide
    #[error("Outputs total {outputs} exceeds inputs total {inputs}")]
    NegativeFee { inputs: u64, outputs: u64 },
}
