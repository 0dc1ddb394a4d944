//! Explicit logging context
//!
//! Passed by value into the scanner and the transfer/withdraw entry points.
//! A silent logger emits nothing; a verbose one forwards to `tracing`, so
//! the embedding binary decides where events go.
//!
//! Every event carries a `stage` field. Events about a transaction carry
//! `signature`, events about an account carry `account`.

use solana_sdk::{pubkey::Pubkey, signature::Signature};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Silent,
    Verbose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    pub fn silent() -> Self {
        Self::new(LogLevel::Silent)
    }

    pub fn verbose() -> Self {
        Self::new(LogLevel::Verbose)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn is_verbose(&self) -> bool {
        self.level == LogLevel::Verbose
    }

    pub fn info(&self, stage: &'static str, message: impl std::fmt::Display) {
        if self.is_verbose() {
            tracing::info!(stage, "{}", message);
        }
    }

    pub fn debug_tx(&self, stage: &'static str, signature: &Signature, message: impl std::fmt::Display) {
        if self.is_verbose() {
            tracing::debug!(stage, %signature, "{}", message);
        }
    }

    pub fn info_tx(&self, stage: &'static str, signature: &Signature, message: impl std::fmt::Display) {
        if self.is_verbose() {
            tracing::info!(stage, %signature, "{}", message);
        }
    }

    pub fn warn_tx(&self, stage: &'static str, signature: &Signature, message: impl std::fmt::Display) {
        if self.is_verbose() {
            tracing::warn!(stage, %signature, "{}", message);
        }
    }

    pub fn debug_account(&self, stage: &'static str, account: &Pubkey, message: impl std::fmt::Display) {
        if self.is_verbose() {
            tracing::debug!(stage, %account, "{}", message);
        }
    }

    pub fn info_account(&self, stage: &'static str, account: &Pubkey, message: impl std::fmt::Display) {
        if self.is_verbose() {
            tracing::info!(stage, %account, "{}", message);
        }
    }

    /// Event about `account` within the transaction `signature`
    pub fn debug_payment(
        &self,
        stage: &'static str,
        signature: &Signature,
        account: &Pubkey,
        message: impl std::fmt::Display,
    ) {
        if self.is_verbose() {
            tracing::debug!(stage, %signature, %account, "{}", message);
        }
    }

    pub fn info_payment(
        &self,
        stage: &'static str,
        signature: &Signature,
        account: &Pubkey,
        message: impl std::fmt::Display,
    ) {
        if self.is_verbose() {
            tracing::info!(stage, %signature, %account, "{}", message);
        }
    }
}
