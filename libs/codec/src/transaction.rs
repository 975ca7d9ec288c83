//! Raw transaction decoder
//!
//! Decodes the serialized transactions returned by `signTransaction`:
//! legacy layout, and BIP-144 segwit layout with the `00 01` marker/flag and
//! per-input witness stacks.
//!
//! ```text
//! version:u32 [marker:00 flag:01] n_in:varint (prev_hash:32 prev_index:u32
//! script_sig:var sequence:u32)* n_out:varint (amount:u64 script:var)*
//! [witness stacks] lock_time:u32
//! ```

use crate::error::{CodecError, CodecResult};
use crate::reader::ByteReader;
use crate::script::{push_only, ScriptKind};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput {
    /// Previous transaction hash in display order (reversed from the wire)
    pub prev_hash: String,
    pub prev_index: u32,
    pub script_sig: Vec<u8>,
    pub sequence: u32,
    pub witness: Vec<Vec<u8>>,
}

impl RawInput {
    /// Signature stack of the input: the witness when present, otherwise the
    /// pushes of the scriptSig
    pub fn stack(&self) -> CodecResult<Vec<Vec<u8>>> {
        if self.witness.is_empty() {
            push_only(&self.script_sig)
        } else {
            Ok(self.witness.clone())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    pub amount: u64,
    pub script_pubkey: Vec<u8>,
}

impl RawOutput {
    pub fn kind(&self) -> ScriptKind {
        ScriptKind::classify(&self.script_pubkey)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    pub version: u32,
    pub segwit: bool,
    pub inputs: Vec<RawInput>,
    pub outputs: Vec<RawOutput>,
    pub lock_time: u32,
}

impl RawTransaction {
    pub fn from_hex(serialized: &str) -> CodecResult<Self> {
        let bytes = hex::decode(serialized)
            .map_err(|e| CodecError::invalid_hex("serialized transaction", e))?;
        Self::decode(&bytes)
    }

    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let version = reader.read_u32_le("version")?;

        let segwit = bytes.get(4) == Some(&0x00) && bytes.get(5) == Some(&0x01);
        if segwit {
            reader.read_bytes(2, "segwit marker")?;
        }

        let input_count = reader.read_varint("input count")?;
        let mut inputs = Vec::new();
        for i in 0..input_count {
            let context = format!("input {i}");
            let mut hash = reader.read_bytes(32, &context)?.to_vec();
            hash.reverse();
            let prev_index = reader.read_u32_le(&context)?;
            let script_sig = reader.read_var_bytes(&context)?.to_vec();
            let sequence = reader.read_u32_le(&context)?;
            inputs.push(RawInput {
                prev_hash: hex::encode(hash),
                prev_index,
                script_sig,
                sequence,
                witness: Vec::new(),
            });
        }

        let output_count = reader.read_varint("output count")?;
        let mut outputs = Vec::new();
        for i in 0..output_count {
            let context = format!("output {i}");
            let amount = reader.read_u64_le(&context)?;
            let script_pubkey = reader.read_var_bytes(&context)?.to_vec();
            outputs.push(RawOutput {
                amount,
                script_pubkey,
            });
        }

        if segwit {
            for (i, input) in inputs.iter_mut().enumerate() {
                let context = format!("witness {i}");
                let items = reader.read_varint(&context)?;
                for _ in 0..items {
                    input.witness.push(reader.read_var_bytes(&context)?.to_vec());
                }
            }
        }

        let lock_time = reader.read_u32_le("lock time")?;

        if !reader.is_empty() {
            return Err(CodecError::TrailingBytes {
                count: reader.remaining(),
                offset: reader.offset(),
                context: "lock time".to_string(),
            });
        }

        trace!(
            version,
            segwit,
            inputs = inputs.len(),
            outputs = outputs.len(),
            "Decoded raw transaction"
        );

        Ok(Self {
            version,
            segwit,
            inputs,
            outputs,
            lock_time,
        })
    }

    pub fn total_output(&self) -> u64 {
        self.outputs.iter().map(|o| o.amount).sum()
    }
}
