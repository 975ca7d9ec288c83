//! Request payloads, one variant per core method
//!
//! Serialized with an inline `method` tag so a payload is exactly what the
//! core's dispatch surface receives:
//!
//! ```json
//! { "method": "nemGetAddress", "path": [2147483692, ...], "network": 104 }
//! ```

use crate::errors::PayloadError;
use crate::hd_path::HdPath;
use crate::transaction::{TxInput, TxOutput};
use serde::{Deserialize, Serialize};
use std::fmt;

/// NEM network byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NemNetwork(pub u8);

impl NemNetwork {
    pub const MAINNET: Self = Self(0x68);
    pub const TESTNET: Self = Self(0x98);
    pub const MIJIN: Self = Self(0x60);

    /// First character of every address on this network
    pub fn address_prefix(self) -> Option<char> {
        match self {
            Self::MAINNET => Some('N'),
            Self::TESTNET => Some('T'),
            Self::MIJIN => Some('M'),
            _ => None,
        }
    }
}

impl fmt::Display for NemNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MAINNET => f.write_str("MAINNET"),
            Self::TESTNET => f.write_str("TESTNET"),
            Self::MIJIN => f.write_str("MIJIN"),
            Self(other) => write!(f, "0x{:02x}", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NemGetAddress {
    pub path: HdPath,
    pub network: NemNetwork,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignMessage {
    pub coin: String,
    pub path: HdPath,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignTransaction {
    pub coin: String,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum RequestPayload {
    #[serde(rename = "nemGetAddress")]
    NemGetAddress(NemGetAddress),
    #[serde(rename = "signMessage")]
    SignMessage(SignMessage),
    #[serde(rename = "signTransaction")]
    SignTransaction(SignTransaction),
}

impl RequestPayload {
    /// Method name on the core's dispatch surface
    pub fn method(&self) -> &'static str {
        match self {
            Self::NemGetAddress(_) => "nemGetAddress",
            Self::SignMessage(_) => "signMessage",
            Self::SignTransaction(_) => "signTransaction",
        }
    }

    /// Derivation path of the key the request addresses, when it has one
    pub fn path(&self) -> Option<&HdPath> {
        match self {
            Self::NemGetAddress(request) => Some(&request.path),
            Self::SignMessage(request) => Some(&request.path),
            Self::SignTransaction(_) => None,
        }
    }

    pub fn coin(&self) -> Option<&str> {
        match self {
            Self::NemGetAddress(_) => None,
            Self::SignMessage(request) => Some(&request.coin),
            Self::SignTransaction(request) => Some(&request.coin),
        }
    }

    pub fn validate(&self) -> Result<(), PayloadError> {
        match self {
            Self::NemGetAddress(request) => {
                if request.path.is_empty() {
                    return Err(PayloadError::EmptyPath {
                        field: "path".to_string(),
                    });
                }
                Ok(())
            }
            Self::SignMessage(request) => {
                if request.coin.is_empty() {
                    return Err(PayloadError::EmptyField {
                        field: "coin".to_string(),
                    });
                }
                if request.path.is_empty() {
                    return Err(PayloadError::EmptyPath {
                        field: "path".to_string(),
                    });
                }
                Ok(())
            }
            Self::SignTransaction(request) => request.validate(),
        }
    }
}

impl SignTransaction {
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.coin.is_empty() {
            return Err(PayloadError::EmptyField {
                field: "coin".to_string(),
            });
        }
        if self.inputs.is_empty() {
            return Err(PayloadError::EmptyField {
                field: "inputs".to_string(),
            });
        }
        if self.outputs.is_empty() {
            return Err(PayloadError::EmptyField {
                field: "outputs".to_string(),
            });
        }

        for (i, input) in self.inputs.iter().enumerate() {
            input.validate(&format!("inputs[{i}]"))?;
        }
        for (i, output) in self.outputs.iter().enumerate() {
            output.validate(&format!("outputs[{i}]"))?;
        }

        let inputs = checked_total(self.inputs.iter().map(|i| i.amount), "inputs")?;
        let outputs = checked_total(self.outputs.iter().map(|o| o.amount), "outputs")?;
        if outputs > inputs {
            return Err(PayloadError::NegativeFee { inputs, outputs });
        }
        Ok(())
    }

    pub fn has_witness_input(&self) -> bool {
        self.inputs.iter().any(|input| input.script_type.is_witness())
    }
}

fn checked_total(mut amounts: impl Iterator<Item = u64>, field: &str) -> Result<u64, PayloadError> {
    amounts.try_fold(0u64, |total, amount| {
        total
            .checked_add(amount)
            .ok_or_else(|| PayloadError::AmountOverflow {
                field: field.to_string(),
            })
    })
}

impl fmt::Display for RequestPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NemGetAddress(request) => write!(
                f,
                "nemGetAddress {} on {}",
                request.path, request.network
            ),
            Self::SignMessage(request) => {
                write!(f, "signMessage {} {}", request.coin, request.path)
            }
            Self::SignTransaction(request) => write!(
                f,
                "signTransaction {} ({} in / {} out)",
                request.coin,
                request.inputs.len(),
                request.outputs.len()
            ),
        }
    }
}
