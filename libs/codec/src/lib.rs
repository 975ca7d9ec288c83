//! # Vaultline Response Codec
//!
//! ## Purpose
//!
//! Decodes the wire shapes a hardware-wallet core returns so the conformance
//! harness can check fixtures for internal consistency before running them:
//! - **Raw transactions**: legacy and segwit layouts, witness stacks
//! - **Scripts**: standard output templates, scriptSig pushes, OP_CHECKMULTISIG
//!   redeem scripts
//! - **Message signatures**: 65-byte recoverable signatures and their header
//!   flags
//! - **NEM addresses**: length, alphabet and network prefix
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → tests/conformance
//!     ↑           ↓              ↓
//!  Payloads   Wire shapes    Fixture checks
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Signing, key derivation or signature verification
//! - Address encoding for Base58/Bech32/CashAddr coins

pub mod error;
pub mod nem;
pub mod reader;
pub mod script;
pub mod signature;
pub mod transaction;

pub use error::{CodecError, CodecResult};
pub use nem::check_nem_address;
pub use reader::ByteReader;
pub use script::{decode_ops, push_only, MultisigScript, ScriptKind, ScriptOp};
pub use signature::{MessageSignature, SignatureFormat, MESSAGE_SIGNATURE_LEN};
pub use transaction::{RawInput, RawOutput, RawTransaction};
