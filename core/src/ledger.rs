//! Ledger collaborator interface
//!
//! The protocol never speaks RPC itself. Everything it needs from the chain
//! goes through [`LedgerClient`]; the CLI backs it with Solana JSON-RPC and
//! the tests with an in-memory ledger. Every call blocks the caller until a
//! response or a transport error arrives; there is no timeout or retry here.

use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("rpc request failed: {0}")]
    Rpc(String),

    #[error("malformed ledger response: {0}")]
    Malformed(String),
}

/// The parts of a confirmed transaction the scanner reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerTransaction {
    pub signature: Signature,
    /// UTF-8 payloads of every memo-program instruction, in instruction order
    pub memos: Vec<String>,
    /// Static keys followed by any loaded addresses, aligned with balances
    pub account_keys: Vec<Pubkey>,
    pub pre_balances: Vec<u64>,
    pub post_balances: Vec<u64>,
    /// Unix timestamp, when the node reports one
    pub block_time: Option<i64>,
}

impl LedgerTransaction {
    /// Lamports gained by the account at `index`, clamped at zero
    ///
    /// A missing balance entry counts as zero.
    pub fn balance_delta(&self, index: usize) -> u64 {
        let pre = self.pre_balances.get(index).copied().unwrap_or(0);
        let post = self.post_balances.get(index).copied().unwrap_or(0);
        post.saturating_sub(pre)
    }

    pub fn account_index(&self, account: &Pubkey) -> Option<usize> {
        self.account_keys.iter().position(|key| key == account)
    }
}

pub trait LedgerClient {
    /// Most recent signatures touching `program`, newest first
    fn fetch_signatures(&self, program: &Pubkey, limit: usize) -> Result<Vec<Signature>, LedgerError>;

    /// `Ok(None)` when the ledger has no such transaction
    fn fetch_transaction(&self, signature: &Signature) -> Result<Option<LedgerTransaction>, LedgerError>;

    fn fetch_balance(&self, account: &Pubkey) -> Result<u64, LedgerError>;

    /// Raw account data, `Ok(None)` when the account does not exist
    fn fetch_account_data(&self, account: &Pubkey) -> Result<Option<Vec<u8>>, LedgerError>;

    fn latest_blockhash(&self) -> Result<Hash, LedgerError>;

    fn broadcast(&self, transaction: &Transaction) -> Result<Signature, LedgerError>;

    /// `Ok(true)` once the transaction landed without error
    fn confirm(&self, signature: &Signature) -> Result<bool, LedgerError>;
}
