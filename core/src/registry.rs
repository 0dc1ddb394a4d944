//! Meta-address registry (read-only)
//!
//! Recipients publish their meta public key in a program-owned account at
//! PDA(["registry", owner]). Layout:
//!
//! +-----------------+-----------+-----------------+--------+
//! | 0..8            | 8..40     | 40..72          | 72     |
//! +-----------------+-----------+-----------------+--------+
//! | discriminator   | owner     | meta public key | bump   |
//! +-----------------+-----------+-----------------+--------+

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::error::RegistryError;
use crate::ledger::LedgerClient;
use crate::log::Logger;

pub const REGISTRY_SEED: &[u8] = b"registry";

/// sha256("account:MetaRegistry")[..8]
pub const REGISTRY_DISCRIMINATOR: [u8; 8] = [226, 65, 156, 86, 239, 43, 97, 63];

/// Account discriminator (8) + owner (32) + meta_pubkey (32) + bump (1)
pub const REGISTRY_ACCOUNT_SIZE: usize = 8 + 32 + 32 + 1;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegistryAccount {
    pub owner: [u8; 32],
    pub meta_pubkey: [u8; 32],
    pub bump: u8,
}

impl RegistryAccount {
    pub fn owner(&self) -> Pubkey {
        Pubkey::new_from_array(self.owner)
    }

    /// Parse raw account data fetched from `account`
    pub fn parse(account: &Pubkey, data: &[u8]) -> Result<Self, RegistryError> {
        if data.len() < REGISTRY_ACCOUNT_SIZE {
            return Err(RegistryError::InvalidAccount {
                account: *account,
                reason: format!(
                    "expected at least {} bytes, got {}",
                    REGISTRY_ACCOUNT_SIZE,
                    data.len()
                ),
            });
        }

        if data[..8] != REGISTRY_DISCRIMINATOR {
            return Err(RegistryError::InvalidAccount {
                account: *account,
                reason: "wrong account discriminator".to_string(),
            });
        }

        Self::deserialize(&mut &data[8..]).map_err(|e| RegistryError::InvalidAccount {
            account: *account,
            reason: e.to_string(),
        })
    }

    /// Discriminator followed by the Borsh body
    pub fn to_account_data(&self) -> std::io::Result<Vec<u8>> {
        let mut data = Vec::with_capacity(REGISTRY_ACCOUNT_SIZE);
        data.extend_from_slice(&REGISTRY_DISCRIMINATOR);
        self.serialize(&mut data)?;
        Ok(data)
    }
}

/// PDA(["registry", owner]) under `program`
pub fn registry_address(owner: &Pubkey, program: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REGISTRY_SEED, owner.as_ref()], program)
}

/// Resolve a wallet's registered meta public key
pub fn lookup_meta_pubkey<L: LedgerClient + ?Sized>(
    ledger: &L,
    program: &Pubkey,
    owner: &Pubkey,
    logger: Logger,
) -> Result<[u8; 32], RegistryError> {
    let (account, _bump) = registry_address(owner, program);
    logger.debug_account("registry", &account, format!("looking up {}", owner));

    let data = ledger
        .fetch_account_data(&account)
        .map_err(|source| RegistryError::Fetch { account, source })?
        .ok_or(RegistryError::NotRegistered { owner: *owner })?;

    let entry = RegistryAccount::parse(&account, &data)?;
    if entry.owner() != *owner {
        return Err(RegistryError::InvalidAccount {
            account,
            reason: format!("registered owner {} does not match {}", entry.owner(), owner),
        });
    }

    Ok(entry.meta_pubkey)
}
