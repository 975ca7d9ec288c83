//! Expected response payloads
//!
//! An [`ExpectedResponse`] mirrors the `payload` of a successful response
//! event. Comparison against the actual event is structural, so the shape
//! here must match the core's output field for field.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedTx {
    pub serialized_tx: String,
}

/// Result payload of a single method call
///
/// Variant order matters for untagged deserialization: the signature shape
/// must be tried before the bare address shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    SignedTransaction { serialized: SerializedTx },
    MessageSignature { address: String, signature: String },
    Address { address: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedResponse {
    pub payload: ResponsePayload,
}

impl ExpectedResponse {
    pub fn address(address: impl Into<String>) -> Self {
        Self {
            payload: ResponsePayload::Address {
                address: address.into(),
            },
        }
    }

    pub fn message_signature(address: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            payload: ResponsePayload::MessageSignature {
                address: address.into(),
                signature: signature.into(),
            },
        }
    }

    pub fn signed_transaction(serialized_tx: impl Into<String>) -> Self {
        Self {
            payload: ResponsePayload::SignedTransaction {
                serialized: SerializedTx {
                    serialized_tx: serialized_tx.into(),
                },
            },
        }
    }

    /// JSON form of the payload, as compared against response events
    pub fn payload_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.payload)
    }
}
