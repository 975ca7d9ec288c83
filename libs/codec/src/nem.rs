//! NEM address shape check
//!
//! NEM addresses are the base32 encoding of 25 bytes (network byte, 20-byte
//! key hash, 4-byte checksum): 40 characters from `A-Z2-7`, whose first
//! character is fixed by the network byte.

use crate::error::{CodecError, CodecResult};
use types::NemNetwork;

pub const NEM_ADDRESS_LEN: usize = 40;

/// Check an address is well formed and belongs to `network`
pub fn check_nem_address(address: &str, network: NemNetwork) -> CodecResult<()> {
    if address.len() != NEM_ADDRESS_LEN {
        return Err(CodecError::nem_address(
            address,
            format!("expected {} characters, got {}", NEM_ADDRESS_LEN, address.len()),
        ));
    }

    if let Some(bad) = address
        .chars()
        .find(|c| !(c.is_ascii_uppercase() || ('2'..='7').contains(c)))
    {
        return Err(CodecError::nem_address(
            address,
            format!("'{}' is not a base32 character", bad),
        ));
    }

    let expected = network.address_prefix().ok_or_else(|| {
        CodecError::nem_address(address, format!("unknown network {}", network))
    })?;
    if !address.starts_with(expected) {
        return Err(CodecError::nem_address(
            address,
            format!("{} addresses start with '{}'", network, expected),
        ));
    }

    Ok(())
}
