//! Solana JSON-RPC backing for the core ledger interface

use adls_core::{LedgerClient, LedgerError, LedgerTransaction, MEMO_PROGRAM_ID};
use serde_json::json;
use solana_client::{
    client_error::ClientError,
    rpc_client::{GetConfirmedSignaturesForAddress2Config, RpcClient},
    rpc_config::RpcTransactionConfig,
    rpc_request::RpcRequest,
};
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};
use solana_transaction_status::{
    option_serializer::OptionSerializer, EncodedConfirmedTransactionWithStatusMeta,
    EncodedTransaction, UiMessage, UiTransactionEncoding,
};

/// Highest transaction version the scanner asks the node for
const MAX_TRANSACTION_VERSION: u8 = 0;

/// getSignaturesForAddress rejects larger limits
pub const MAX_SIGNATURES_PER_REQUEST: usize = 1000;

pub struct RpcLedger {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcLedger {
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
            commitment,
        }
    }
}

fn rpc_error(err: ClientError) -> LedgerError {
    LedgerError::Rpc(err.to_string())
}

fn parse_pubkey(key: &str) -> Result<Pubkey, LedgerError> {
    key.parse()
        .map_err(|_| LedgerError::Malformed(format!("invalid account key {}", key)))
}

/// Collect up to `limit` signatures, newest first, from a paged listing
///
/// `fetch_page(before, page_limit)` returns the signatures older than
/// `before` (or the newest ones when `None`). Paging stops once `limit`
/// signatures are collected or a page comes back short.
pub fn collect_signature_pages<F>(limit: usize, mut fetch_page: F) -> Result<Vec<Signature>, LedgerError>
where
    F: FnMut(Option<Signature>, usize) -> Result<Vec<Signature>, LedgerError>,
{
    let mut signatures = Vec::with_capacity(limit.min(MAX_SIGNATURES_PER_REQUEST));
    let mut before = None;

    while signatures.len() < limit {
        let page_limit = (limit - signatures.len()).min(MAX_SIGNATURES_PER_REQUEST);
        let page = fetch_page(before, page_limit)?;
        let short = page.len() < page_limit;

        before = page.last().copied();
        signatures.extend(page.into_iter().take(page_limit));

        if short || before.is_none() {
            break;
        }
    }

    Ok(signatures)
}

/// Instruction as it appears in a JSON-encoded message
pub struct RawInstruction<'a> {
    pub program_id_index: u8,
    /// base58
    pub data: &'a str,
}

/// The pieces of a JSON-encoded confirmed transaction the scanner reads
pub struct RawTransactionParts<'a> {
    pub static_keys: &'a [String],
    pub loaded_writable: &'a [String],
    pub loaded_readonly: &'a [String],
    pub instructions: Vec<RawInstruction<'a>>,
    pub pre_balances: Vec<u64>,
    pub post_balances: Vec<u64>,
    pub block_time: Option<i64>,
}

/// Assemble a [`LedgerTransaction`]
///
/// Account keys are the static keys followed by loaded writable then loaded
/// readonly addresses, which is the order balances are reported in. Memo
/// payloads that are not UTF-8 are dropped.
pub fn assemble_transaction(
    signature: Signature,
    parts: RawTransactionParts<'_>,
) -> Result<LedgerTransaction, LedgerError> {
    let account_keys = parts
        .static_keys
        .iter()
        .chain(parts.loaded_writable)
        .chain(parts.loaded_readonly)
        .map(|key| parse_pubkey(key))
        .collect::<Result<Vec<_>, _>>()?;

    let mut memos = Vec::new();
    for ix in &parts.instructions {
        let program = account_keys
            .get(ix.program_id_index as usize)
            .ok_or_else(|| {
                LedgerError::Malformed(format!("program index {} out of range", ix.program_id_index))
            })?;
        if *program != MEMO_PROGRAM_ID {
            continue;
        }

        let data = bs58::decode(ix.data)
            .into_vec()
            .map_err(|e| LedgerError::Malformed(format!("instruction data: {}", e)))?;
        if let Ok(memo) = String::from_utf8(data) {
            memos.push(memo);
        }
    }

    Ok(LedgerTransaction {
        signature,
        memos,
        account_keys,
        pre_balances: parts.pre_balances,
        post_balances: parts.post_balances,
        block_time: parts.block_time,
    })
}

fn decode_confirmed(
    signature: Signature,
    confirmed: EncodedConfirmedTransactionWithStatusMeta,
) -> Result<LedgerTransaction, LedgerError> {
    let ui_tx = match confirmed.transaction.transaction {
        EncodedTransaction::Json(ui) => ui,
        _ => return Err(LedgerError::Malformed("expected JSON-encoded transaction".to_string())),
    };
    let message = match ui_tx.message {
        UiMessage::Raw(raw) => raw,
        UiMessage::Parsed(_) => {
            return Err(LedgerError::Malformed("expected raw message".to_string()))
        }
    };
    let meta = confirmed
        .transaction
        .meta
        .ok_or_else(|| LedgerError::Malformed(format!("{} has no status meta", signature)))?;

    let (writable, readonly) = match meta.loaded_addresses {
        OptionSerializer::Some(loaded) => (loaded.writable, loaded.readonly),
        _ => (Vec::new(), Vec::new()),
    };

    let instructions = message
        .instructions
        .iter()
        .map(|ix| RawInstruction {
            program_id_index: ix.program_id_index,
            data: &ix.data,
        })
        .collect();

    assemble_transaction(
        signature,
        RawTransactionParts {
            static_keys: &message.account_keys,
            loaded_writable: &writable,
            loaded_readonly: &readonly,
            instructions,
            pre_balances: meta.pre_balances,
            post_balances: meta.post_balances,
            block_time: confirmed.block_time,
        },
    )
}

impl LedgerClient for RpcLedger {
    fn fetch_signatures(&self, program: &Pubkey, limit: usize) -> Result<Vec<Signature>, LedgerError> {
        collect_signature_pages(limit, |before, page_limit| {
            let config = GetConfirmedSignaturesForAddress2Config {
                before,
                limit: Some(page_limit),
                commitment: Some(self.commitment),
                ..Default::default()
            };
            let statuses = self
                .client
                .get_signatures_for_address_with_config(program, config)
                .map_err(rpc_error)?;

            statuses
                .iter()
                .map(|status| {
                    status
                        .signature
                        .parse::<Signature>()
                        .map_err(|_| LedgerError::Malformed(format!("invalid signature {}", status.signature)))
                })
                .collect()
        })
    }

    fn fetch_transaction(&self, signature: &Signature) -> Result<Option<LedgerTransaction>, LedgerError> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Json),
            commitment: Some(self.commitment),
            max_supported_transaction_version: Some(MAX_TRANSACTION_VERSION),
        };

        // getTransaction answers null for unknown signatures
        let confirmed: Option<EncodedConfirmedTransactionWithStatusMeta> = self
            .client
            .send(RpcRequest::GetTransaction, json!([signature.to_string(), config]))
            .map_err(rpc_error)?;

        confirmed
            .map(|confirmed| decode_confirmed(*signature, confirmed))
            .transpose()
    }

    fn fetch_balance(&self, account: &Pubkey) -> Result<u64, LedgerError> {
        self.client.get_balance(account).map_err(rpc_error)
    }

    fn fetch_account_data(&self, account: &Pubkey) -> Result<Option<Vec<u8>>, LedgerError> {
        let response = self
            .client
            .get_account_with_commitment(account, self.commitment)
            .map_err(rpc_error)?;
        Ok(response.value.map(|account| account.data))
    }

    fn latest_blockhash(&self) -> Result<Hash, LedgerError> {
        self.client.get_latest_blockhash().map_err(rpc_error)
    }

    fn broadcast(&self, transaction: &Transaction) -> Result<Signature, LedgerError> {
        self.client.send_transaction(transaction).map_err(rpc_error)
    }

    fn confirm(&self, signature: &Signature) -> Result<bool, LedgerError> {
        self.client
            .poll_for_signature_with_commitment(signature, self.commitment)
            .map_err(rpc_error)?;
        let status = self.client.get_signature_status(signature).map_err(rpc_error)?;
        Ok(matches!(status, Some(Ok(()))))
    }
}
