//! Memo codec
//!
//! Wire format: `"ADLSv1:" + lowercase_hex(ephemeral_pubkey)`, always
//! prefix length + 64 characters. Part of the public protocol; do not change
//! without a migration plan.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::error::MemoError;

/// Prefix identifying this protocol's memos
pub const MEMO_PREFIX: &str = "ADLSv1:";

/// Hex characters carrying the 32-byte ephemeral key
pub const MEMO_PAYLOAD_LEN: usize = 64;

/// SPL Memo program (v2)
pub const MEMO_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr");

pub fn encode_memo(ephemeral_pubkey: &[u8; 32]) -> String {
    format!("{}{}", MEMO_PREFIX, hex::encode(ephemeral_pubkey))
}

/// Strict parse with the reason for rejection
pub fn parse_memo(memo: &str) -> Result<[u8; 32], MemoError> {
    let payload = memo.strip_prefix(MEMO_PREFIX).ok_or(MemoError::MissingPrefix)?;

    if payload.len() != MEMO_PAYLOAD_LEN {
        return Err(MemoError::InvalidLength {
            expected: MEMO_PAYLOAD_LEN,
            actual: payload.len(),
        });
    }

    let mut ephemeral_pubkey = [0u8; 32];
    hex::decode_to_slice(payload, &mut ephemeral_pubkey).map_err(|_| MemoError::InvalidHex)?;
    Ok(ephemeral_pubkey)
}

/// `None` means "not this protocol's traffic"
pub fn decode_memo(memo: &str) -> Option<[u8; 32]> {
    parse_memo(memo).ok()
}

/// Memo instruction signed by `signer`
pub fn memo_instruction(memo: &str, signer: &Pubkey) -> Instruction {
    Instruction {
        program_id: MEMO_PROGRAM_ID,
        accounts: vec![AccountMeta::new_readonly(*signer, true)],
        data: memo.as_bytes().to_vec(),
    }
}
