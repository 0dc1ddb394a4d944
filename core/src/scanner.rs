//! Trial-decryption scanner
//!
//! One scan is a linear pass over the `limit` most recent signatures of the
//! memo stream: fetch each transaction, decode any protocol memo, recompute
//! the one-time address with the meta key and look for it among the
//! transaction's accounts. Results keep fetch order (newest first).
//!
//! Failure policy:
//! - signature list fetch fails: the whole scan fails
//! - a single transaction fetch fails or is missing: logged, skipped
//! - memo is not ours or does not decode: silently skipped

use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::crypto::{expected_stealth_address, MetaKeypair};
use crate::error::ScanError;
use crate::ledger::{LedgerClient, LedgerTransaction};
use crate::log::Logger;
use crate::memo::{decode_memo, MEMO_PROGRAM_ID};

/// A confirmed incoming stealth payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StealthTransaction {
    pub signature: Signature,
    pub block_time: Option<i64>,
    pub stealth_address: Pubkey,
    /// Lamports received by the stealth address in this transaction (never negative)
    pub amount: u64,
    pub ephemeral_pubkey: [u8; 32],
}

/// A candidate the scan could not examine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCandidate {
    pub signature: Signature,
    pub stage: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Signatures returned by the ledger
    pub examined: usize,
    pub matches: Vec<StealthTransaction>,
    pub skipped: Vec<SkippedCandidate>,
}

pub struct Scanner<'a, L: LedgerClient + ?Sized> {
    ledger: &'a L,
    meta: &'a MetaKeypair,
    logger: Logger,
    program: Pubkey,
}

impl<'a, L: LedgerClient + ?Sized> Scanner<'a, L> {
    pub fn new(ledger: &'a L, meta: &'a MetaKeypair, logger: Logger) -> Self {
        Self {
            ledger,
            meta,
            logger,
            program: MEMO_PROGRAM_ID,
        }
    }

    pub fn scan(&self, limit: usize) -> Result<Vec<StealthTransaction>, ScanError> {
        Ok(self.scan_report(limit)?.matches)
    }

    pub fn scan_report(&self, limit: usize) -> Result<ScanReport, ScanError> {
        let mut report = ScanReport::default();
        if limit == 0 {
            return Ok(report);
        }

        let signatures = self
            .ledger
            .fetch_signatures(&self.program, limit)
            .map_err(|source| ScanError::SignatureFetch {
                program: self.program,
                source,
            })?;

        self.logger.info_account(
            "fetch_signatures",
            &self.program,
            format!("scanning {} signatures", signatures.len()),
        );
        report.examined = signatures.len();

        for signature in signatures {
            match self.inspect(&signature) {
                Ok(Some(found)) => report.matches.push(found),
                Ok(None) => {}
                Err(err) => {
                    let stage = match &err {
                        ScanError::TransactionNotFound { .. } => "not_found",
                        _ => "fetch_transaction",
                    };
                    self.logger.warn_tx(stage, &signature, format!("skipping: {}", err));
                    report.skipped.push(SkippedCandidate {
                        signature,
                        stage,
                        reason: err.to_string(),
                    });
                }
            }
        }

        self.logger.info(
            "scan",
            format!(
                "{} match(es), {} skipped, {} examined",
                report.matches.len(),
                report.skipped.len(),
                report.examined
            ),
        );

        Ok(report)
    }

    /// Run the per-transaction pipeline for one signature
    pub fn inspect(&self, signature: &Signature) -> Result<Option<StealthTransaction>, ScanError> {
        let tx = self
            .ledger
            .fetch_transaction(signature)
            .map_err(|source| ScanError::TransactionFetch {
                signature: *signature,
                source,
            })?
            .ok_or(ScanError::TransactionNotFound {
                signature: *signature,
            })?;

        Ok(self.match_transaction(signature, &tx))
    }

    /// Trial decryption against an already fetched transaction
    pub fn match_transaction(
        &self,
        signature: &Signature,
        tx: &LedgerTransaction,
    ) -> Option<StealthTransaction> {
        for memo in &tx.memos {
            let Some(ephemeral_pubkey) = decode_memo(memo) else {
                continue;
            };

            let Some(expected) = expected_stealth_address(self.meta, &ephemeral_pubkey) else {
                self.logger
                    .debug_tx("trial_decrypt", signature, "ephemeral key is not a curve point");
                continue;
            };

            let stealth_address = Pubkey::new_from_array(expected);
            let Some(index) = tx.account_index(&stealth_address) else {
                self.logger.debug_tx("trial_decrypt", signature, "not ours");
                continue;
            };

            let amount = tx.balance_delta(index);
            if amount == 0 {
                self.logger
                    .debug_payment("balance", signature, &stealth_address, "did not gain lamports");
            }
            self.logger.info_payment(
                "match",
                signature,
                &stealth_address,
                format!("received {} lamports", amount),
            );

            return Some(StealthTransaction {
                signature: *signature,
                block_time: tx.block_time,
                stealth_address,
                amount,
                ephemeral_pubkey,
            });
        }

        None
    }
}

/// Scan the most recent `limit` memo program transactions for payments to `meta`
pub fn scan<L: LedgerClient + ?Sized>(
    ledger: &L,
    meta: &MetaKeypair,
    limit: usize,
    logger: Logger,
) -> Result<Vec<StealthTransaction>, ScanError> {
    Scanner::new(ledger, meta, logger).scan(limit)
}
