//! Script classification and push-data decoding
//!
//! Only what the conformance checks need: recognizing the standard output
//! templates, splitting a scriptSig into its pushes, and reading an
//! `OP_m <pubkey>... OP_n OP_CHECKMULTISIG` redeem script.

use crate::error::{CodecError, CodecResult};

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1: u8 = 0x51;
pub const OP_16: u8 = 0x60;
pub const OP_RETURN: u8 = 0x6a;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKMULTISIG: u8 = 0xae;

/// Standard output script templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    P2pkh,
    P2sh,
    P2wpkh,
    P2wsh,
    OpReturn,
    Multisig { m: u8, n: u8 },
    Unknown,
}

impl ScriptKind {
    pub fn classify(script: &[u8]) -> Self {
        match script {
            [OP_DUP, OP_HASH160, 0x14, .., OP_EQUALVERIFY, OP_CHECKSIG] if script.len() == 25 => {
                Self::P2pkh
            }
            [OP_HASH160, 0x14, .., OP_EQUAL] if script.len() == 23 => Self::P2sh,
            [OP_0, 0x14, ..] if script.len() == 22 => Self::P2wpkh,
            [OP_0, 0x20, ..] if script.len() == 34 => Self::P2wsh,
            [OP_RETURN, ..] => Self::OpReturn,
            _ => match MultisigScript::parse(script) {
                Ok(multisig) => Self::Multisig {
                    m: multisig.m,
                    n: multisig.n(),
                },
                Err(_) => Self::Unknown,
            },
        }
    }
}

/// One element of a decoded script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOp<'a> {
    Push(&'a [u8]),
    /// `OP_1`..`OP_16`
    SmallInt(u8),
    Opcode(u8),
}

/// Decode a script into pushes and opcodes
pub fn decode_ops(script: &[u8]) -> CodecResult<Vec<ScriptOp<'_>>> {
    let mut ops = Vec::new();
    let mut offset = 0;

    while offset < script.len() {
        let opcode = script[offset];
        let start = offset;
        offset += 1;

        let push_len = match opcode {
            OP_0 => Some(0),
            0x01..=0x4b => Some(usize::from(opcode)),
            OP_PUSHDATA1 => Some(usize::from(read_len(script, &mut offset, 1, start)?[0])),
            OP_PUSHDATA2 => {
                let raw = read_len(script, &mut offset, 2, start)?;
                Some(usize::from(u16::from_le_bytes([raw[0], raw[1]])))
            }
            OP_PUSHDATA4 => {
                let raw = read_len(script, &mut offset, 4, start)?;
                Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize)
            }
            _ => None,
        };

        match push_len {
            Some(len) => {
                let data = read_len(script, &mut offset, len, start)?;
                ops.push(ScriptOp::Push(data));
            }
            None if (OP_1..=OP_16).contains(&opcode) => {
                ops.push(ScriptOp::SmallInt(opcode - OP_1 + 1));
            }
            None => ops.push(ScriptOp::Opcode(opcode)),
        }
    }

    Ok(ops)
}

fn read_len<'a>(
    script: &'a [u8],
    offset: &mut usize,
    len: usize,
    op_start: usize,
) -> CodecResult<&'a [u8]> {
    let end = offset
        .checked_add(len)
        .filter(|&end| end <= script.len())
        .ok_or_else(|| {
            CodecError::malformed_script(
                op_start,
                format!("push of {} bytes overruns {}-byte script", len, script.len()),
            )
        })?;
    let data = &script[*offset..end];
    *offset = end;
    Ok(data)
}

/// Data pushes of a push-only script (scriptSig). Fails on any other opcode.
pub fn push_only(script: &[u8]) -> CodecResult<Vec<Vec<u8>>> {
    decode_ops(script)?
        .into_iter()
        .enumerate()
        .map(|(i, op)| match op {
            ScriptOp::Push(data) => Ok(data.to_vec()),
            ScriptOp::SmallInt(n) => Ok(vec![n]),
            ScriptOp::Opcode(opcode) => Err(CodecError::malformed_script(
                i,
                format!("opcode {:#04x} in push-only script", opcode),
            )),
        })
        .collect()
}

/// `OP_m <pubkey>... OP_n OP_CHECKMULTISIG`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigScript {
    pub m: u8,
    pub pubkeys: Vec<Vec<u8>>,
}

impl MultisigScript {
    pub fn parse(script: &[u8]) -> CodecResult<Self> {
        let ops = decode_ops(script)?;
        let not_multisig = |reason: &str| CodecError::NotMultisig {
            reason: reason.to_string(),
        };

        let (first, rest) = ops.split_first().ok_or_else(|| not_multisig("empty script"))?;
        let m = match first {
            ScriptOp::SmallInt(m) => *m,
            _ => return Err(not_multisig("missing OP_m threshold")),
        };

        match rest.last() {
            Some(ScriptOp::Opcode(OP_CHECKMULTISIG)) => {}
            _ => return Err(not_multisig("missing trailing OP_CHECKMULTISIG")),
        }
        let body = &rest[..rest.len() - 1];

        let (n, keys) = match body.split_last() {
            Some((ScriptOp::SmallInt(n), keys)) => (*n, keys),
            _ => return Err(not_multisig("missing OP_n key count")),
        };

        let pubkeys = keys
            .iter()
            .map(|op| match op {
                ScriptOp::Push(key) if key.len() == 33 || key.len() == 65 => Ok(key.to_vec()),
                _ => Err(not_multisig("cosigner entry is not a 33/65-byte public key")),
            })
            .collect::<CodecResult<Vec<_>>>()?;

        if pubkeys.len() != usize::from(n) {
            return Err(not_multisig(&format!(
                "OP_{} declares {} keys but script pushes {}",
                n,
                n,
                pubkeys.len()
            )));
        }
        if m == 0 || m > n {
            return Err(not_multisig(&format!("threshold {} of {} keys", m, n)));
        }

        Ok(Self { m, pubkeys })
    }

    pub fn n(&self) -> u8 {
        self.pubkeys.len() as u8
    }
}
