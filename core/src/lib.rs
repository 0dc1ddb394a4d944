//! ADLS - single-key stealth addresses for Solana
//!
//! A recipient publishes one meta public key. Every sender derives a fresh
//! one-time address from it and announces an ephemeral key in a memo; only
//! the meta key holder can recognise the payment and recover the one-time
//! secret needed to spend it.
//!
//! ## Protocol
//!
//! ### Sender
//! 1. Generate ephemeral key pair: (r, R) where R = r·G
//! 2. Shared secret: ss = H(r·M) where M is the recipient's meta public key
//! 3. Domain scalar: d = H_s(ss || tag)
//! 4. Stealth pubkey: P = M + d·G
//! 5. Transfer to P with memo `ADLSv1:<hex(R)>`
//!
//! ### Recipient
//! 1. For each memo carrying R: ss = H(m·R), d = H_s(ss || tag)
//! 2. If M + d·G is one of the transaction's accounts, the payment is ours
//! 3. Spending key: p = m + d (mod L), used directly as an Ed25519 scalar

// op_ref warnings are common with curve25519-dalek ergonomics
#![allow(clippy::op_ref)]

pub mod crypto;
pub mod error;
pub mod ledger;
pub mod log;
pub mod memo;
pub mod recover;
pub mod registry;
pub mod scanner;
pub mod transfer;
pub mod withdraw;


#[cfg(test)]
mod test_vectors;


#[cfg(test)]
mod integration_tests;

pub use crypto::{
    derive_stealth_address, recover_stealth_secret, sign_with_scalar, verify_signature,
    CurveEngine, Ed25519, EphemeralKeypair, MetaKeypair, SecretScalar, StealthAddress,
    StealthSigner,
};
pub use error::{CryptoError, MemoError, RegistryError, ScanError, TransferError, WithdrawError};
pub use ledger::{LedgerClient, LedgerError, LedgerTransaction};
pub use log::{LogLevel, Logger};
pub use memo::{decode_memo, encode_memo, MEMO_PREFIX, MEMO_PROGRAM_ID};
pub use recover::{recover, WithdrawableTransaction};
pub use scanner::{ScanReport, Scanner, SkippedCandidate, StealthTransaction};
