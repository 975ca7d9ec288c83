//! # Vaultline Wallet Types
//!
//! Data model for the requests a conformance run sends to a hardware-wallet
//! communication core and the responses it expects back.
//!
//! ## Design Philosophy
//!
//! - **Wire-shaped**: every type serializes to the exact JSON shape the core
//!   accepts (`method`-tagged requests, `SCREAMING` script-type names,
//!   `address_n` index arrays)
//! - **Immutable fixtures**: payloads are built once per suite load and shared
//!   read-only across test cases
//! - **Validated at load**: [`RequestPayload::validate`] rejects malformed
//!   fixtures before any case runs
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{HdPath, NemGetAddress, NemNetwork, RequestPayload};
//!
//! let request = RequestPayload::NemGetAddress(NemGetAddress {
//!     path: HdPath::parse("m/44'/1'/0'/0'/0'").unwrap(),
//!     network: NemNetwork::MAINNET,
//! });
//! assert_eq!(request.method(), "nemGetAddress");
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Wire decoding of serialized transactions or signatures (belongs in `codec`)
//! - Anything that talks to a device core (belongs in the conformance harness)

pub mod errors;
pub mod hd_path;
pub mod payload;
pub mod response;
pub mod transaction;

pub use errors::{PathError, PayloadError};
pub use hd_path::{harden, HdPath, HARDENED};
pub use payload::{NemGetAddress, NemNetwork, RequestPayload, SignMessage, SignTransaction};
pub use response::{ExpectedResponse, ResponsePayload, SerializedTx};
pub use transaction::{
    HdNodePath, InputScriptType, MultisigRedeemScript, OutputDestination, OutputScriptType,
    TxInput, TxOutput,
};
