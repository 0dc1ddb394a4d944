//! Sender side: pay a meta-address through a fresh stealth address
//!
//! The payment is one transaction with two instructions: a system transfer
//! to the one-time address and a memo announcing the ephemeral key.

use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Signature, Signer},
    system_instruction,
    transaction::Transaction,
};

use crate::crypto::{derive_stealth_address, StealthAddress};
use crate::error::TransferError;
use crate::ledger::LedgerClient;
use crate::log::Logger;
use crate::memo::memo_instruction;
use crate::registry::lookup_meta_pubkey;

/// Minimum payment in lamports; keeps the fresh account above the rent-exempt floor
pub const MIN_PAYMENT_LAMPORTS: u64 = 1_000_000;

/// Fee reserved for a single-signature transaction
pub const TRANSFER_FEE_LAMPORTS: u64 = 5_000;

/// Who to pay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// A meta public key given directly
    MetaPubkey([u8; 32]),
    /// A wallet whose meta public key lives in the registry
    Registered(Pubkey),
}

/// Resolve a recipient to its meta public key
///
/// An unregistered wallet is fatal here, before any funds move.
pub fn resolve_recipient<L: LedgerClient + ?Sized>(
    ledger: &L,
    registry_program: &Pubkey,
    recipient: &Recipient,
    logger: Logger,
) -> Result<[u8; 32], TransferError> {
    match recipient {
        Recipient::MetaPubkey(meta) => Ok(*meta),
        Recipient::Registered(owner) => Ok(lookup_meta_pubkey(ledger, registry_program, owner, logger)?),
    }
}

/// Instructions for a payment, not yet signed
pub struct PreparedTransfer {
    pub stealth: StealthAddress,
    pub amount: u64,
    pub instructions: Vec<Instruction>,
}

impl PreparedTransfer {
    pub fn stealth_address(&self) -> Pubkey {
        self.stealth.address()
    }
}

/// Outcome of a confirmed payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentTransfer {
    pub signature: Signature,
    pub stealth_address: Pubkey,
    pub ephemeral_pubkey: [u8; 32],
    pub memo: String,
    pub amount: u64,
}

pub fn prepare_stealth_transfer(
    payer: &Pubkey,
    meta_pubkey: &[u8; 32],
    lamports: u64,
) -> Result<PreparedTransfer, TransferError> {
    if lamports < MIN_PAYMENT_LAMPORTS {
        return Err(TransferError::PaymentTooSmall {
            amount: lamports,
            minimum: MIN_PAYMENT_LAMPORTS,
        });
    }

    let stealth = derive_stealth_address(meta_pubkey)?;
    let instructions = vec![
        system_instruction::transfer(payer, &stealth.address(), lamports),
        memo_instruction(&stealth.memo, payer),
    ];

    Ok(PreparedTransfer {
        stealth,
        amount: lamports,
        instructions,
    })
}

/// Derive, sign, broadcast and confirm a stealth payment
pub fn send_stealth_payment<L, S>(
    ledger: &L,
    payer: &S,
    meta_pubkey: &[u8; 32],
    lamports: u64,
    logger: Logger,
) -> Result<SentTransfer, TransferError>
where
    L: LedgerClient + ?Sized,
    S: Signer,
{
    let payer_pubkey = payer.pubkey();
    let prepared = prepare_stealth_transfer(&payer_pubkey, meta_pubkey, lamports)?;

    let balance = ledger
        .fetch_balance(&payer_pubkey)
        .map_err(|source| TransferError::Ledger {
            stage: "fetch_balance",
            source,
        })?;
    let required = lamports.saturating_add(TRANSFER_FEE_LAMPORTS);
    if balance < required {
        return Err(TransferError::InsufficientBalance {
            account: payer_pubkey,
            balance,
            required,
        });
    }

    logger.info_account(
        "transfer",
        &prepared.stealth_address(),
        format!("paying {} lamports (memo {})", lamports, prepared.stealth.memo),
    );

    let recent_blockhash = ledger
        .latest_blockhash()
        .map_err(|source| TransferError::Ledger {
            stage: "latest_blockhash",
            source,
        })?;

    let transaction = Transaction::new_signed_with_payer(
        &prepared.instructions,
        Some(&payer_pubkey),
        &[payer],
        recent_blockhash,
    );

    let signature = ledger
        .broadcast(&transaction)
        .map_err(|source| TransferError::Ledger {
            stage: "broadcast",
            source,
        })?;

    let confirmed = ledger
        .confirm(&signature)
        .map_err(|source| TransferError::Ledger {
            stage: "confirm",
            source,
        })?;
    if !confirmed {
        return Err(TransferError::NotConfirmed { signature });
    }

    logger.info_tx("transfer", &signature, "confirmed");

    Ok(SentTransfer {
        signature,
        stealth_address: prepared.stealth_address(),
        ephemeral_pubkey: prepared.stealth.ephemeral_pubkey,
        memo: prepared.stealth.memo.clone(),
        amount: lamports,
    })
}
