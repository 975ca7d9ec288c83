//! Transaction inputs, outputs and multisignature descriptors

use crate::errors::PayloadError;
use crate::hd_path::HdPath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an input is spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputScriptType {
    SpendAddress,
    SpendMultisig,
    External,
    SpendWitness,
    SpendP2shWitness,
}

impl InputScriptType {
    /// Input is signed with a witness (native or P2SH-wrapped)
    pub fn is_witness(self) -> bool {
        matches!(self, Self::SpendWitness | Self::SpendP2shWitness)
    }
}

impl fmt::Display for InputScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SpendAddress => "SPENDADDRESS",
            Self::SpendMultisig => "SPENDMULTISIG",
            Self::External => "EXTERNAL",
            Self::SpendWitness => "SPENDWITNESS",
            Self::SpendP2shWitness => "SPENDP2SHWITNESS",
        };
        f.write_str(name)
    }
}

/// How an output is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputScriptType {
    PayToAddress,
    PayToScriptHash,
    PayToMultisig,
    PayToOpReturn,
    PayToWitness,
    PayToP2shWitness,
}

impl fmt::Display for OutputScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PayToAddress => "PAYTOADDRESS",
            Self::PayToScriptHash => "PAYTOSCRIPTHASH",
            Self::PayToMultisig => "PAYTOMULTISIG",
            Self::PayToOpReturn => "PAYTOOPRETURN",
            Self::PayToWitness => "PAYTOWITNESS",
            Self::PayToP2shWitness => "PAYTOP2SHWITNESS",
        };
        f.write_str(name)
    }
}

/// One cosigner: an extended public key plus the suffix derived from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HdNodePath {
    pub node: String,
    pub address_n: HdPath,
}

/// Multisignature descriptor attached to an input or output
///
/// `signatures` has one slot per cosigner; empty strings are placeholders for
/// signatures the device is expected to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigRedeemScript {
    pub pubkeys: Vec<HdNodePath>,
    pub signatures: Vec<String>,
    pub m: u32,
}

impl MultisigRedeemScript {
    /// Pre-supplied (non-empty) signatures
    pub fn provided_signatures(&self) -> impl Iterator<Item = &str> {
        self.signatures
            .iter()
            .map(String::as_str)
            .filter(|sig| !sig.is_empty())
    }

    pub fn validate(&self, field: &str) -> Result<(), PayloadError> {
        let n = self.pubkeys.len();
        if self.m == 0 || self.m as usize > n {
            return Err(PayloadError::InvalidThreshold {
                field: field.to_string(),
                m: self.m,
                n,
            });
        }
        if self.signatures.len() != n {
            return Err(PayloadError::SignatureSlotMismatch {
                field: field.to_string(),
                signatures: self.signatures.len(),
                pubkeys: n,
            });
        }
        for (i, cosigner) in self.pubkeys.iter().enumerate() {
            if cosigner.node.is_empty() {
                return Err(PayloadError::EmptyField {
                    field: format!("{field}.pubkeys[{i}].node"),
                });
            }
        }
        for (i, sig) in self.signatures.iter().enumerate() {
            if !sig.is_empty() && hex::decode(sig).is_err() {
                return Err(PayloadError::InvalidHex {
                    field: format!("{field}.signatures[{i}]"),
                    value: sig.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Transaction input: the outpoint being spent and the key that signs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    pub address_n: HdPath,
    /// Previous transaction hash in display (big-endian) order
    pub prev_hash: String,
    pub prev_index: u32,
    pub amount: u64,
    pub script_type: InputScriptType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multisig: Option<MultisigRedeemScript>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
}

impl TxInput {
    pub fn validate(&self, field: &str) -> Result<(), PayloadError> {
        if self.address_n.is_empty() {
            return Err(PayloadError::EmptyPath {
                field: format!("{field}.address_n"),
            });
        }

        let hash_ok = self.prev_hash.len() == 64 && hex::decode(&self.prev_hash).is_ok();
        if !hash_ok {
            return Err(PayloadError::InvalidPrevHash {
                field: format!("{field}.prev_hash"),
                value: self.prev_hash.clone(),
            });
        }

        match (&self.multisig, self.script_type) {
            (None, InputScriptType::SpendMultisig) => Err(PayloadError::ScriptTypeMismatch {
                field: field.to_string(),
                script_type: self.script_type.to_string(),
                reason: "requires a multisig descriptor".to_string(),
            }),
            (Some(_), InputScriptType::SpendAddress | InputScriptType::External) => {
                Err(PayloadError::ScriptTypeMismatch {
                    field: field.to_string(),
                    script_type: self.script_type.to_string(),
                    reason: "cannot carry a multisig descriptor".to_string(),
                })
            }
            (Some(multisig), _) => multisig.validate(&format!("{field}.multisig")),
            (None, _) => Ok(()),
        }
    }
}

/// Where an output pays to: an external address or one of the wallet's own
/// keys (change)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputDestination {
    Address { address: String },
    Path { address_n: HdPath },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    #[serde(flatten)]
    pub destination: OutputDestination,
    pub amount: u64,
    pub script_type: OutputScriptType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multisig: Option<MultisigRedeemScript>,
}

impl TxOutput {
    pub fn to_address(address: impl Into<String>, amount: u64) -> Self {
        Self {
            destination: OutputDestination::Address {
                address: address.into(),
            },
            amount,
            script_type: OutputScriptType::PayToAddress,
            multisig: None,
        }
    }

    pub fn to_path(address_n: HdPath, amount: u64, script_type: OutputScriptType) -> Self {
        Self {
            destination: OutputDestination::Path { address_n },
            amount,
            script_type,
            multisig: None,
        }
    }

    /// Change outputs derive their script from the wallet's own key
    pub fn is_change(&self) -> bool {
        matches!(self.destination, OutputDestination::Path { .. })
    }

    pub fn validate(&self, field: &str) -> Result<(), PayloadError> {
        match &self.destination {
            OutputDestination::Address { address } if address.is_empty() => {
                return Err(PayloadError::EmptyField {
                    field: format!("{field}.address"),
                });
            }
            OutputDestination::Path { address_n } if address_n.is_empty() => {
                return Err(PayloadError::EmptyPath {
                    field: format!("{field}.address_n"),
                });
            }
            _ => {}
        }

        if let Some(multisig) = &self.multisig {
            multisig.validate(&format!("{field}.multisig"))?;
        }
        Ok(())
    }
}
