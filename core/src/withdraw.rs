//! Spending a recovered stealth address
//!
//! The stealth address pays its own fee, so a full withdrawal moves
//! balance - fee_buffer. Balance checks happen before anything is signed.

use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Signature, Signer},
    system_instruction,
    transaction::Transaction,
};

use crate::error::WithdrawError;
use crate::ledger::LedgerClient;
use crate::log::Logger;
use crate::recover::WithdrawableTransaction;

/// Default fee reserved by a withdrawal (0.000005 SOL)
pub const WITHDRAW_FEE_BUFFER_LAMPORTS: u64 = 5_000;

/// Lamports to move out of `account`
///
/// `requested = None` withdraws everything but the fee buffer.
pub fn withdrawal_amount(
    account: &Pubkey,
    balance: u64,
    requested: Option<u64>,
    fee_buffer: u64,
) -> Result<u64, WithdrawError> {
    match requested {
        None => {
            if balance <= fee_buffer {
                return Err(WithdrawError::InsufficientBalance {
                    account: *account,
                    balance,
                    required: fee_buffer.saturating_add(1),
                });
            }
            Ok(balance - fee_buffer)
        }
        Some(amount) => {
            let required = amount.saturating_add(fee_buffer);
            if amount == 0 || required > balance {
                return Err(WithdrawError::InsufficientBalance {
                    account: *account,
                    balance,
                    required: required.max(fee_buffer.saturating_add(1)),
                });
            }
            Ok(amount)
        }
    }
}

/// A signed withdrawal, ready to broadcast
#[derive(Debug, Clone)]
pub struct PreparedWithdrawal {
    pub transaction: Transaction,
    pub source: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedWithdrawal {
    pub signature: Signature,
    pub source: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}

/// Build and sign the transfer out of the stealth address
pub fn build_withdrawal(
    withdrawable: &WithdrawableTransaction,
    destination: &Pubkey,
    amount: u64,
    recent_blockhash: Hash,
) -> Result<PreparedWithdrawal, WithdrawError> {
    let signer = withdrawable.signer()?;
    let source = withdrawable.stealth_address();

    if signer.pubkey() != source {
        return Err(WithdrawError::AddressMismatch {
            expected: source,
            derived: signer.pubkey(),
        });
    }

    let instruction = system_instruction::transfer(&source, destination, amount);
    let transaction = Transaction::new_signed_with_payer(
        &[instruction],
        Some(&source),
        &[&signer],
        recent_blockhash,
    );

    Ok(PreparedWithdrawal {
        transaction,
        source,
        destination: *destination,
        amount,
    })
}

/// Fetch balance, size the withdrawal, sign, broadcast and confirm
pub fn execute_withdrawal<L: LedgerClient + ?Sized>(
    ledger: &L,
    withdrawable: &WithdrawableTransaction,
    destination: &Pubkey,
    requested: Option<u64>,
    fee_buffer: u64,
    logger: Logger,
) -> Result<CompletedWithdrawal, WithdrawError> {
    let source = withdrawable.stealth_address();

    let balance = ledger
        .fetch_balance(&source)
        .map_err(|source| WithdrawError::Ledger {
            stage: "fetch_balance",
            source,
        })?;
    let amount = withdrawal_amount(&source, balance, requested, fee_buffer)?;
    logger.info_account(
        "withdraw",
        &source,
        format!("holds {} lamports, moving {}", balance, amount),
    );

    let recent_blockhash = ledger
        .latest_blockhash()
        .map_err(|source| WithdrawError::Ledger {
            stage: "latest_blockhash",
            source,
        })?;

    let prepared = build_withdrawal(withdrawable, destination, amount, recent_blockhash)?;

    let signature = ledger
        .broadcast(&prepared.transaction)
        .map_err(|source| WithdrawError::Ledger {
            stage: "broadcast",
            source,
        })?;

    let confirmed = ledger
        .confirm(&signature)
        .map_err(|source| WithdrawError::Ledger {
            stage: "confirm",
            source,
        })?;
    if !confirmed {
        return Err(WithdrawError::NotConfirmed { signature });
    }

    logger.info_tx("withdraw", &signature, "confirmed");

    Ok(CompletedWithdrawal {
        signature,
        source,
        destination: *destination,
        amount,
    })
}
