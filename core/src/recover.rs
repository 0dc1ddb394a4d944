//! Recovery of the one-time spending key for a matched payment

use solana_sdk::pubkey::Pubkey;

use crate::crypto::{
    recover_stealth_secret, sign_with_scalar, CurveEngine, Ed25519, MetaKeypair, SecretScalar,
    StealthSigner, SIGNATURE_LEN,
};
use crate::error::{CryptoError, WithdrawError};
use crate::scanner::StealthTransaction;

/// A matched payment together with the secret that can spend it
///
/// Sign once, then drop; the secret is zeroized with it.
#[derive(Debug)]
pub struct WithdrawableTransaction {
    pub transaction: StealthTransaction,
    stealth_secret: SecretScalar,
}

impl WithdrawableTransaction {
    pub fn stealth_address(&self) -> Pubkey {
        self.transaction.stealth_address
    }

    pub fn stealth_secret(&self) -> &SecretScalar {
        &self.stealth_secret
    }

    /// Solana signer whose public key is the stealth address
    pub fn signer(&self) -> Result<StealthSigner, CryptoError> {
        StealthSigner::from_secret(&self.stealth_secret)
    }

    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LEN] {
        sign_with_recovered_key(message, &self.stealth_secret)
    }
}

/// Recover the one-time secret for a matched payment
///
/// Fails if the recovered key does not open the payment's stealth address.
pub fn recover(
    transaction: &StealthTransaction,
    meta: &MetaKeypair,
) -> Result<WithdrawableTransaction, WithdrawError> {
    let stealth_secret = recover_stealth_secret(meta, &transaction.ephemeral_pubkey)?;

    let derived = Pubkey::new_from_array(Ed25519::point_to_bytes(&Ed25519::mul_base(
        &stealth_secret.to_scalar(),
    )));
    if derived != transaction.stealth_address {
        return Err(WithdrawError::AddressMismatch {
            expected: transaction.stealth_address,
            derived,
        });
    }

    Ok(WithdrawableTransaction {
        transaction: transaction.clone(),
        stealth_secret,
    })
}

/// Sign `message` with a recovered stealth secret
pub fn sign_with_recovered_key(message: &[u8], stealth_secret: &SecretScalar) -> [u8; SIGNATURE_LEN] {
    sign_with_scalar(message, stealth_secret)
}
