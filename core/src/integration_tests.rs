//! End-to-end tests against an in-memory ledger
//!
//! The mock ledger verifies transaction signatures, charges a flat fee,
//! applies system transfers and records memo-program payloads, which is
//! enough to drive send -> scan -> recover -> withdraw without a validator.

#[cfg(test)]
mod mock_ledger {
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, HashSet};

    use solana_sdk::{
        hash::Hash, pubkey::Pubkey, signature::Signature, system_program,
        transaction::Transaction,
    };

    use crate::ledger::{LedgerClient, LedgerError, LedgerTransaction};
    use crate::memo::MEMO_PROGRAM_ID;

    pub const FEE_LAMPORTS: u64 = 5_000;

    pub struct MockLedger {
        balances: RefCell<HashMap<Pubkey, u64>>,
        accounts: RefCell<HashMap<Pubkey, Vec<u8>>>,
        transactions: RefCell<HashMap<Signature, LedgerTransaction>>,
        /// Memo stream, newest first
        stream: RefCell<Vec<Signature>>,
        failing: RefCell<HashSet<Signature>>,
        fail_signature_list: Cell<bool>,
        confirm_result: Cell<bool>,
        broadcasts: Cell<usize>,
        blockhash: Hash,
    }

    impl MockLedger {
        pub fn new() -> Self {
            Self {
                balances: RefCell::new(HashMap::new()),
                accounts: RefCell::new(HashMap::new()),
                transactions: RefCell::new(HashMap::new()),
                stream: RefCell::new(Vec::new()),
                failing: RefCell::new(HashSet::new()),
                fail_signature_list: Cell::new(false),
                confirm_result: Cell::new(true),
                broadcasts: Cell::new(0),
                blockhash: Hash::new_unique(),
            }
        }

        pub fn fund(&self, account: &Pubkey, lamports: u64) {
            *self.balances.borrow_mut().entry(*account).or_insert(0) += lamports;
        }

        pub fn balance(&self, account: &Pubkey) -> u64 {
            self.balances.borrow().get(account).copied().unwrap_or(0)
        }

        pub fn set_account_data(&self, account: &Pubkey, data: Vec<u8>) {
            self.accounts.borrow_mut().insert(*account, data);
        }

        /// Push a hand-built transaction onto the memo stream
        pub fn insert(&self, tx: LedgerTransaction) -> Signature {
            let signature = tx.signature;
            self.transactions.borrow_mut().insert(signature, tx);
            self.stream.borrow_mut().insert(0, signature);
            signature
        }

        /// Listed in the stream but unknown to the transaction store
        pub fn insert_missing(&self) -> Signature {
            let signature = Signature::new_unique();
            self.stream.borrow_mut().insert(0, signature);
            signature
        }

        pub fn fail_fetch(&self, signature: &Signature) {
            self.failing.borrow_mut().insert(*signature);
        }

        pub fn fail_signature_list(&self) {
            self.fail_signature_list.set(true);
        }

        pub fn drop_confirmations(&self) {
            self.confirm_result.set(false);
        }

        pub fn broadcast_count(&self) -> usize {
            self.broadcasts.get()
        }
    }

    /// System transfer data: u32 LE discriminant 2, then u64 LE lamports
    fn parse_system_transfer(data: &[u8]) -> Option<u64> {
        if data.len() != 12 || data[..4] != [2, 0, 0, 0] {
            return None;
        }
        let mut lamports = [0u8; 8];
        lamports.copy_from_slice(&data[4..]);
        Some(u64::from_le_bytes(lamports))
    }

    impl LedgerClient for MockLedger {
        fn fetch_signatures(&self, program: &Pubkey, limit: usize) -> Result<Vec<Signature>, LedgerError> {
            if self.fail_signature_list.get() {
                return Err(LedgerError::Rpc("connection refused".to_string()));
            }
            assert_eq!(*program, MEMO_PROGRAM_ID);
            Ok(self.stream.borrow().iter().take(limit).copied().collect())
        }

        fn fetch_transaction(&self, signature: &Signature) -> Result<Option<LedgerTransaction>, LedgerError> {
            if self.failing.borrow().contains(signature) {
                return Err(LedgerError::Rpc("timeout".to_string()));
            }
            Ok(self.transactions.borrow().get(signature).cloned())
        }

        fn fetch_balance(&self, account: &Pubkey) -> Result<u64, LedgerError> {
            Ok(self.balance(account))
        }

        fn fetch_account_data(&self, account: &Pubkey) -> Result<Option<Vec<u8>>, LedgerError> {
            Ok(self.accounts.borrow().get(account).cloned())
        }

        fn latest_blockhash(&self) -> Result<Hash, LedgerError> {
            Ok(self.blockhash)
        }

        fn broadcast(&self, transaction: &Transaction) -> Result<Signature, LedgerError> {
            transaction
                .verify()
                .map_err(|e| LedgerError::Rpc(format!("signature verification failed: {}", e)))?;
            if transaction.message.recent_blockhash != self.blockhash {
                return Err(LedgerError::Rpc("blockhash not found".to_string()));
            }

            let keys = transaction.message.account_keys.clone();
            let mut balances = self.balances.borrow().clone();
            let pre_balances: Vec<u64> = keys
                .iter()
                .map(|k| balances.get(k).copied().unwrap_or(0))
                .collect();

            let payer = keys[0];
            let payer_balance = balances.entry(payer).or_insert(0);
            if *payer_balance < FEE_LAMPORTS {
                return Err(LedgerError::Rpc("insufficient funds for fee".to_string()));
            }
            *payer_balance -= FEE_LAMPORTS;

            let mut memos = Vec::new();
            for ix in &transaction.message.instructions {
                let program = keys[ix.program_id_index as usize];
                if program == MEMO_PROGRAM_ID {
                    let memo = String::from_utf8(ix.data.clone())
                        .map_err(|e| LedgerError::Malformed(e.to_string()))?;
                    memos.push(memo);
                } else if program == system_program::id() {
                    let lamports = parse_system_transfer(&ix.data)
                        .ok_or_else(|| LedgerError::Malformed("unsupported system instruction".to_string()))?;
                    let from = keys[ix.accounts[0] as usize];
                    let to = keys[ix.accounts[1] as usize];
                    let from_balance = balances.entry(from).or_insert(0);
                    if *from_balance < lamports {
                        return Err(LedgerError::Rpc("insufficient lamports".to_string()));
                    }
                    *from_balance -= lamports;
                    *balances.entry(to).or_insert(0) += lamports;
                }
            }

            let post_balances = keys
                .iter()
                .map(|k| balances.get(k).copied().unwrap_or(0))
                .collect();
            *self.balances.borrow_mut() = balances;
            self.broadcasts.set(self.broadcasts.get() + 1);

            let signature = transaction.signatures[0];
            let has_memo = !memos.is_empty();
            self.transactions.borrow_mut().insert(
                signature,
                LedgerTransaction {
                    signature,
                    memos,
                    account_keys: keys,
                    pre_balances,
                    post_balances,
                    block_time: Some(1_700_000_000),
                },
            );
            if has_memo {
                self.stream.borrow_mut().insert(0, signature);
            }
            Ok(signature)
        }

        fn confirm(&self, signature: &Signature) -> Result<bool, LedgerError> {
            Ok(self.confirm_result.get() && self.transactions.borrow().contains_key(signature))
        }
    }
}

#[cfg(test)]
mod scan_tests {
    use super::mock_ledger::MockLedger;
    use crate::crypto::{derive_stealth_address, MetaKeypair};
    use crate::error::ScanError;
    use crate::ledger::LedgerTransaction;
    use crate::log::capture::logged;
    use crate::log::Logger;
    use crate::memo::{encode_memo, MEMO_PROGRAM_ID};
    use crate::scanner::{scan, Scanner};
    use solana_sdk::{pubkey::Pubkey, signature::Signature, system_program};

    /// A payer -> stealth transfer carrying `memo`
    fn payment(memo: String, stealth: Pubkey, pre: u64, post: u64) -> LedgerTransaction {
        LedgerTransaction {
            signature: Signature::new_unique(),
            memos: vec![memo],
            account_keys: vec![Pubkey::new_unique(), stealth, system_program::id()],
            pre_balances: vec![10_000_000_000, pre, 1],
            post_balances: vec![9_000_000_000, post, 1],
            block_time: Some(1_700_000_000),
        }
    }

    fn payment_to(meta: &MetaKeypair, lamports: u64) -> LedgerTransaction {
        let stealth = derive_stealth_address(&meta.public_key()).unwrap();
        payment(stealth.memo.clone(), stealth.address(), 0, lamports)
    }

    #[test]
    fn test_scan_finds_exactly_one_match_among_noise() {
        let ledger = MockLedger::new();
        let meta = MetaKeypair::generate();
        let stranger = MetaKeypair::generate();

        let ours = ledger.insert(payment_to(&meta, 2_000_000));

        // Another recipient's payment
        ledger.insert(payment_to(&stranger, 3_000_000));

        // Wrong version prefix
        let foreign = derive_stealth_address(&meta.public_key()).unwrap();
        ledger.insert(payment(
            foreign.memo.replacen("ADLSv1:", "ADLSv2:", 1),
            foreign.address(),
            0,
            4_000_000,
        ));

        // Undecodable payloads and unrelated memos
        ledger.insert(payment(format!("ADLSv1:{}", "zz".repeat(32)), Pubkey::new_unique(), 0, 1));
        ledger.insert(payment("ADLSv1:abcd".to_string(), Pubkey::new_unique(), 0, 1));
        ledger.insert(payment("gm".to_string(), Pubkey::new_unique(), 0, 1));

        // Valid hex that is not a curve point
        let mut off_curve = [0u8; 32];
        off_curve[0] = 2;
        ledger.insert(payment(encode_memo(&off_curve), Pubkey::new_unique(), 0, 1));

        let found = scan(&ledger, &meta, 100, Logger::silent()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].signature, ours);
        assert_eq!(found[0].amount, 2_000_000);
        assert_eq!(found[0].block_time, Some(1_700_000_000));
    }

    #[test]
    fn test_matched_payment_with_balance_decrease_reports_zero() {
        let ledger = MockLedger::new();
        let meta = MetaKeypair::generate();
        let stealth = derive_stealth_address(&meta.public_key()).unwrap();
        ledger.insert(payment(stealth.memo.clone(), stealth.address(), 5_000_000, 1_000_000));

        let found = scan(&ledger, &meta, 10, Logger::silent()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount, 0);
        assert_eq!(found[0].stealth_address, stealth.address());
        assert_eq!(found[0].ephemeral_pubkey, stealth.ephemeral_pubkey);
    }

    #[test]
    fn test_memo_without_matching_account_is_not_a_match() {
        let ledger = MockLedger::new();
        let meta = MetaKeypair::generate();
        let stealth = derive_stealth_address(&meta.public_key()).unwrap();

        // Right memo, but the funds went elsewhere
        ledger.insert(payment(stealth.memo.clone(), Pubkey::new_unique(), 0, 1_000_000));
        assert!(scan(&ledger, &meta, 10, Logger::silent()).unwrap().is_empty());
    }

    #[test]
    fn test_results_keep_fetch_order_and_respect_limit() {
        let ledger = MockLedger::new();
        let meta = MetaKeypair::generate();

        let oldest = ledger.insert(payment_to(&meta, 1_000_000));
        let middle = ledger.insert(payment_to(&meta, 2_000_000));
        let newest = ledger.insert(payment_to(&meta, 3_000_000));

        let found = scan(&ledger, &meta, 10, Logger::silent()).unwrap();
        let order: Vec<Signature> = found.iter().map(|t| t.signature).collect();
        assert_eq!(order, vec![newest, middle, oldest]);

        let found = scan(&ledger, &meta, 1, Logger::silent()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].signature, newest);

        assert!(scan(&ledger, &meta, 0, Logger::silent()).unwrap().is_empty());
    }

    #[test]
    fn test_per_transaction_failures_are_skipped() {
        let ledger = MockLedger::new();
        let meta = MetaKeypair::generate();

        let first = ledger.insert(payment_to(&meta, 1_000_000));
        let broken = ledger.insert(payment_to(&meta, 2_000_000));
        ledger.fail_fetch(&broken);
        let missing = ledger.insert_missing();
        let last = ledger.insert(payment_to(&meta, 3_000_000));

        let report = Scanner::new(&ledger, &meta, Logger::silent())
            .scan_report(10)
            .unwrap();

        assert_eq!(report.examined, 4);
        let matched: Vec<Signature> = report.matches.iter().map(|t| t.signature).collect();
        assert_eq!(matched, vec![last, first]);

        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].signature, missing);
        assert_eq!(report.skipped[0].stage, "not_found");
        assert_eq!(report.skipped[1].signature, broken);
        assert_eq!(report.skipped[1].stage, "fetch_transaction");
        assert!(report.skipped[1].reason.contains("timeout"));
    }

    #[test]
    fn test_verbose_scan_logs_signature_and_account_fields() {
        let ledger = MockLedger::new();
        let meta = MetaKeypair::generate();

        let ours = ledger.insert(payment_to(&meta, 1_000_000));
        let broken = ledger.insert(payment_to(&meta, 2_000_000));
        ledger.fail_fetch(&broken);

        let (report, out) = logged(|| {
            Scanner::new(&ledger, &meta, Logger::verbose())
                .scan_report(10)
                .unwrap()
        });

        assert_eq!(report.matches.len(), 1);
        let stealth = report.matches[0].stealth_address;

        assert!(out.contains("stage=\"fetch_transaction\""));
        assert!(out.contains(&format!("signature={}", broken)));
        assert!(out.contains("stage=\"match\""));
        assert!(out.contains(&format!("signature={}", ours)));
        assert!(out.contains(&format!("account={}", stealth)));
        assert!(out.contains(&format!("account={}", MEMO_PROGRAM_ID)));

        let (_, quiet) = logged(|| {
            Scanner::new(&ledger, &meta, Logger::silent())
                .scan_report(10)
                .unwrap()
        });
        assert!(quiet.is_empty());
    }

    #[test]
    fn test_signature_list_failure_is_fatal() {
        let ledger = MockLedger::new();
        let meta = MetaKeypair::generate();
        ledger.insert(payment_to(&meta, 1_000_000));
        ledger.fail_signature_list();

        assert!(matches!(
            scan(&ledger, &meta, 10, Logger::silent()),
            Err(ScanError::SignatureFetch { .. })
        ));
    }

    #[test]
    fn test_inspect_single_signature() {
        let ledger = MockLedger::new();
        let meta = MetaKeypair::generate();
        let ours = ledger.insert(payment_to(&meta, 1_500_000));
        let theirs = ledger.insert(payment_to(&MetaKeypair::generate(), 1_500_000));

        let scanner = Scanner::new(&ledger, &meta, Logger::silent());
        assert_eq!(scanner.inspect(&ours).unwrap().unwrap().amount, 1_500_000);
        assert!(scanner.inspect(&theirs).unwrap().is_none());
        assert!(matches!(
            scanner.inspect(&Signature::new_unique()),
            Err(ScanError::TransactionNotFound { .. })
        ));
    }
}

#[cfg(test)]
mod payment_flow_tests {
    use super::mock_ledger::{MockLedger, FEE_LAMPORTS};
    use crate::crypto::{verify_signature, MetaKeypair};
    use crate::error::{RegistryError, TransferError, WithdrawError};
    use crate::log::Logger;
    use crate::recover::recover;
    use crate::registry::{registry_address, RegistryAccount};
    use crate::scanner::{scan, StealthTransaction};
    use crate::transfer::{
        resolve_recipient, send_stealth_payment, Recipient, MIN_PAYMENT_LAMPORTS,
    };
    use crate::withdraw::{build_withdrawal, execute_withdrawal, WITHDRAW_FEE_BUFFER_LAMPORTS};
    use solana_sdk::{
        hash::Hash,
        pubkey::Pubkey,
        signature::{Keypair, Signature, Signer},
    };

    const SOL: u64 = 1_000_000_000;

    #[test]
    fn test_send_scan_recover_withdraw() {
        let ledger = MockLedger::new();
        let payer = Keypair::new();
        ledger.fund(&payer.pubkey(), 10 * SOL);
        let meta = MetaKeypair::generate();

        let sent = send_stealth_payment(&ledger, &payer, &meta.public_key(), SOL, Logger::silent())
            .unwrap();
        assert_eq!(ledger.balance(&sent.stealth_address), SOL);
        assert_eq!(ledger.balance(&payer.pubkey()), 9 * SOL - FEE_LAMPORTS);
        assert!(sent.memo.starts_with("ADLSv1:"));

        let found = scan(&ledger, &meta, 10, Logger::silent()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].signature, sent.signature);
        assert_eq!(found[0].stealth_address, sent.stealth_address);
        assert_eq!(found[0].amount, SOL);
        assert_eq!(found[0].ephemeral_pubkey, sent.ephemeral_pubkey);

        let withdrawable = recover(&found[0], &meta).unwrap();
        let message = b"proof of control";
        let signature = withdrawable.sign(message);
        assert!(verify_signature(message, &signature, &sent.stealth_address.to_bytes()));

        let destination = Pubkey::new_unique();
        let done = execute_withdrawal(
            &ledger,
            &withdrawable,
            &destination,
            None,
            WITHDRAW_FEE_BUFFER_LAMPORTS,
            Logger::silent(),
        )
        .unwrap();

        assert_eq!(done.amount, SOL - WITHDRAW_FEE_BUFFER_LAMPORTS);
        assert_eq!(ledger.balance(&destination), SOL - WITHDRAW_FEE_BUFFER_LAMPORTS);
        assert_eq!(ledger.balance(&sent.stealth_address), 0);
    }

    #[test]
    fn test_partial_withdrawal_leaves_remainder() {
        let ledger = MockLedger::new();
        let payer = Keypair::new();
        ledger.fund(&payer.pubkey(), 10 * SOL);
        let meta = MetaKeypair::generate();

        let sent = send_stealth_payment(&ledger, &payer, &meta.public_key(), SOL, Logger::silent())
            .unwrap();
        let found = scan(&ledger, &meta, 10, Logger::silent()).unwrap();
        let withdrawable = recover(&found[0], &meta).unwrap();

        let destination = Pubkey::new_unique();
        execute_withdrawal(
            &ledger,
            &withdrawable,
            &destination,
            Some(SOL / 4),
            WITHDRAW_FEE_BUFFER_LAMPORTS,
            Logger::silent(),
        )
        .unwrap();

        assert_eq!(ledger.balance(&destination), SOL / 4);
        assert_eq!(
            ledger.balance(&sent.stealth_address),
            SOL - SOL / 4 - FEE_LAMPORTS
        );
    }

    #[test]
    fn test_withdrawal_rejected_when_balance_does_not_cover_fee() {
        let ledger = MockLedger::new();
        let meta = MetaKeypair::generate();
        let payer = Keypair::new();
        ledger.fund(&payer.pubkey(), 10 * SOL);

        let sent = send_stealth_payment(&ledger, &payer, &meta.public_key(), SOL, Logger::silent())
            .unwrap();
        let found = scan(&ledger, &meta, 10, Logger::silent()).unwrap();
        let withdrawable = recover(&found[0], &meta).unwrap();

        // Drain down to the fee buffer
        execute_withdrawal(
            &ledger,
            &withdrawable,
            &Pubkey::new_unique(),
            Some(SOL - 2 * FEE_LAMPORTS),
            WITHDRAW_FEE_BUFFER_LAMPORTS,
            Logger::silent(),
        )
        .unwrap();
        assert_eq!(ledger.balance(&sent.stealth_address), FEE_LAMPORTS);

        let broadcasts = ledger.broadcast_count();
        let err = execute_withdrawal(
            &ledger,
            &withdrawable,
            &Pubkey::new_unique(),
            None,
            WITHDRAW_FEE_BUFFER_LAMPORTS,
            Logger::silent(),
        )
        .unwrap_err();
        assert!(matches!(err, WithdrawError::InsufficientBalance { balance: 5_000, .. }));
        assert_eq!(ledger.broadcast_count(), broadcasts);
    }

    #[test]
    fn test_withdrawal_transaction_is_signed_by_stealth_address() {
        let ledger = MockLedger::new();
        let payer = Keypair::new();
        ledger.fund(&payer.pubkey(), 10 * SOL);
        let meta = MetaKeypair::generate();

        send_stealth_payment(&ledger, &payer, &meta.public_key(), SOL, Logger::silent()).unwrap();
        let found = scan(&ledger, &meta, 10, Logger::silent()).unwrap();
        let withdrawable = recover(&found[0], &meta).unwrap();

        let prepared =
            build_withdrawal(&withdrawable, &Pubkey::new_unique(), SOL / 2, Hash::new_unique())
                .unwrap();
        assert_eq!(prepared.transaction.message.account_keys[0], found[0].stealth_address);
        assert!(prepared.transaction.verify().is_ok());
    }

    #[test]
    fn test_recover_rejects_foreign_payment() {
        let ledger = MockLedger::new();
        let payer = Keypair::new();
        ledger.fund(&payer.pubkey(), 10 * SOL);
        let alice = MetaKeypair::generate();
        let bob = MetaKeypair::generate();

        send_stealth_payment(&ledger, &payer, &alice.public_key(), SOL, Logger::silent()).unwrap();
        let found = scan(&ledger, &alice, 10, Logger::silent()).unwrap();

        assert!(matches!(
            recover(&found[0], &bob),
            Err(WithdrawError::AddressMismatch { .. })
        ));

        let forged = StealthTransaction {
            stealth_address: Pubkey::new_unique(),
            ..found[0].clone()
        };
        assert!(matches!(
            recover(&forged, &alice),
            Err(WithdrawError::AddressMismatch { .. })
        ));
    }

    #[test]
    fn test_send_rejects_small_payment_and_underfunded_payer() {
        let ledger = MockLedger::new();
        let payer = Keypair::new();
        ledger.fund(&payer.pubkey(), SOL);
        let meta = MetaKeypair::generate();

        assert!(matches!(
            send_stealth_payment(
                &ledger,
                &payer,
                &meta.public_key(),
                MIN_PAYMENT_LAMPORTS - 1,
                Logger::silent()
            ),
            Err(TransferError::PaymentTooSmall { .. })
        ));

        assert!(matches!(
            send_stealth_payment(&ledger, &payer, &meta.public_key(), SOL, Logger::silent()),
            Err(TransferError::InsufficientBalance { balance, .. }) if balance == SOL
        ));
        assert_eq!(ledger.broadcast_count(), 0);
    }

    #[test]
    fn test_unconfirmed_payment_is_an_error() {
        let ledger = MockLedger::new();
        let payer = Keypair::new();
        ledger.fund(&payer.pubkey(), 10 * SOL);
        ledger.drop_confirmations();
        let meta = MetaKeypair::generate();

        assert!(matches!(
            send_stealth_payment(&ledger, &payer, &meta.public_key(), SOL, Logger::silent()),
            Err(TransferError::NotConfirmed { .. })
        ));
    }

    #[test]
    fn test_registry_resolution() {
        let ledger = MockLedger::new();
        let program = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let meta = MetaKeypair::generate();

        assert!(matches!(
            resolve_recipient(&ledger, &program, &Recipient::Registered(owner), Logger::silent()),
            Err(TransferError::Registry(RegistryError::NotRegistered { .. }))
        ));

        let (account, bump) = registry_address(&owner, &program);
        ledger.set_account_data(
            &account,
            RegistryAccount {
                owner: owner.to_bytes(),
                meta_pubkey: meta.public_key(),
                bump,
            }
            .to_account_data()
            .unwrap(),
        );

        let resolved =
            resolve_recipient(&ledger, &program, &Recipient::Registered(owner), Logger::silent())
                .unwrap();
        assert_eq!(resolved, meta.public_key());

        let direct = resolve_recipient(
            &ledger,
            &program,
            &Recipient::MetaPubkey(meta.public_key()),
            Logger::silent(),
        )
        .unwrap();
        assert_eq!(direct, meta.public_key());
    }

    #[test]
    fn test_registry_rejects_entry_for_other_owner() {
        let ledger = MockLedger::new();
        let program = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        let (account, bump) = registry_address(&owner, &program);
        ledger.set_account_data(
            &account,
            RegistryAccount {
                owner: Pubkey::new_unique().to_bytes(),
                meta_pubkey: [9u8; 32],
                bump,
            }
            .to_account_data()
            .unwrap(),
        );

        assert!(matches!(
            resolve_recipient(&ledger, &program, &Recipient::Registered(owner), Logger::silent()),
            Err(TransferError::Registry(RegistryError::InvalidAccount { .. }))
        ));
    }

    #[test]
    fn test_unknown_signature_is_not_confirmed() {
        use crate::ledger::LedgerClient;
        let ledger = MockLedger::new();
        assert!(!ledger.confirm(&Signature::new_unique()).unwrap());
    }
}
