//! Error types for each stage of the protocol
//!
//! Algebra never fails on well-sized input; only structural problems (wrong
//! lengths, undecodable points at a trust boundary, missing funds) surface
//! here, each carrying enough context to tell "not a match" from "fetch
//! error" from "insufficient funds".

use solana_sdk::{pubkey::Pubkey, signature::Signature};
use thiserror::Error;

use crate::ledger::LedgerError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid scalar length: expected 32 or 64 bytes, got {actual}")]
    InvalidScalarLength { actual: usize },

    #[error("invalid signature length: expected 64 bytes, got {actual}")]
    InvalidSignatureLength { actual: usize },

    #[error("meta public key is not a valid curve point")]
    InvalidMetaPublicKey,

    #[error("meta public key has small order")]
    DegenerateMetaPublicKey,

    #[error("ephemeral public key is not a valid curve point")]
    InvalidEphemeralKey,

    #[error("meta public key does not match meta secret key")]
    MetaKeyMismatch,

    #[error("secret scalar reduces to zero")]
    DegenerateScalar,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MemoError {
    #[error("memo does not start with the protocol prefix")]
    MissingPrefix,

    #[error("memo payload must be {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("memo payload is not valid hex")]
    InvalidHex,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to fetch signatures for {program}: {source}")]
    SignatureFetch {
        program: Pubkey,
        #[source]
        source: LedgerError,
    },

    #[error("failed to fetch transaction {signature}: {source}")]
    TransactionFetch {
        signature: Signature,
        #[source]
        source: LedgerError,
    },

    #[error("transaction {signature} not found")]
    TransactionNotFound { signature: Signature },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no meta-address registered for {owner}")]
    NotRegistered { owner: Pubkey },

    #[error("registry account {account} is malformed: {reason}")]
    InvalidAccount { account: Pubkey, reason: String },

    #[error("failed to fetch registry account {account}: {source}")]
    Fetch {
        account: Pubkey,
        #[source]
        source: LedgerError,
    },
}

#[derive(Debug, Error)]
pub enum TransferError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("payment of {amount} lamports is below the minimum of {minimum}")]
    PaymentTooSmall { amount: u64, minimum: u64 },

    #[error("insufficient balance in {account}: have {balance} lamports, need {required}")]
    InsufficientBalance {
        account: Pubkey,
        balance: u64,
        required: u64,
    },

    #[error("ledger error during {stage}: {source}")]
    Ledger {
        stage: &'static str,
        #[source]
        source: LedgerError,
    },

    #[error("transfer {signature} was not confirmed")]
    NotConfirmed { signature: Signature },
}

#[derive(Debug, Error)]
pub enum WithdrawError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("derived key {derived} does not match stealth address {expected}")]
    AddressMismatch { expected: Pubkey, derived: Pubkey },

    #[error("insufficient balance in {account}: have {balance} lamports, need at least {required}")]
    InsufficientBalance {
        account: Pubkey,
        balance: u64,
        required: u64,
    },

    #[error("ledger error during {stage}: {source}")]
    Ledger {
        stage: &'static str,
        #[source]
        source: LedgerError,
    },

    #[error("withdrawal {signature} was not confirmed")]
    NotConfirmed { signature: Signature },
}
