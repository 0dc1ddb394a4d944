//! Raw-scalar Ed25519 signing
//!
//! Recovered one-time keys are finished scalars (p = m + d), not seeds, so
//! the standard "hash the seed, clamp, take the prefix" expansion would sign
//! for a different public key. This module signs with the scalar directly:
//!
//! ```text
//! A = a·G
//! r = random 32 bytes mod L
//! R = r·G
//! k = SHA512(R || A || M) mod L
//! S = r + k·a (mod L)
//! sig = R || S
//! ```
//!
//! The nonce is random rather than derived from key and message. A repeated
//! r across two messages reveals a = (S1 - S2) / (k1 - k2); each stealth key
//! is expected to sign once and be discarded.

use curve25519_dalek::{edwards::CompressedEdwardsY, scalar::Scalar};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use sha2::{Digest, Sha512};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Signature, Signer, SignerError},
};
use zeroize::Zeroize;

use super::engine::{CurveEngine, Ed25519};
use super::secret::SecretScalar;
use crate::error::CryptoError;

pub const SIGNATURE_LEN: usize = 64;

/// k = SHA512(R || A || M) reduced mod L
fn challenge(commitment: &[u8; 32], public: &[u8; 32], message: &[u8]) -> Scalar {
    let mut hasher = Sha512::new();
    hasher.update(commitment);
    hasher.update(public);
    hasher.update(message);
    let mut wide = [0u8; 64];
    wide.copy_from_slice(&hasher.finalize());
    Ed25519::scalar_from_wide(&wide)
}

/// Sign `message` with a raw scalar and a fresh OS-random nonce
pub fn sign_with_scalar(message: &[u8], secret: &SecretScalar) -> [u8; SIGNATURE_LEN] {
    sign_with_scalar_rng(message, secret, &mut OsRng)
}

pub fn sign_with_scalar_rng<R: RngCore + CryptoRng>(
    message: &[u8],
    secret: &SecretScalar,
    rng: &mut R,
) -> [u8; SIGNATURE_LEN] {
    let mut nonce_bytes = [0u8; 32];
    rng.fill_bytes(&mut nonce_bytes);
    let nonce = Ed25519::scalar_from_bytes(&nonce_bytes);
    nonce_bytes.zeroize();

    sign_with_nonce(message, &secret.to_scalar(), &nonce)
}

pub(crate) fn sign_with_nonce(message: &[u8], secret: &Scalar, nonce: &Scalar) -> [u8; SIGNATURE_LEN] {
    let public = Ed25519::point_to_bytes(&Ed25519::mul_base(secret));
    let commitment = Ed25519::point_to_bytes(&Ed25519::mul_base(nonce));

    let k = challenge(&commitment, &public, message);
    let s = Ed25519::scalar_add(nonce, &Ed25519::scalar_mul(&k, secret));

    let mut signature = [0u8; SIGNATURE_LEN];
    signature[..32].copy_from_slice(&commitment);
    signature[32..].copy_from_slice(&Ed25519::scalar_to_bytes(&s));
    signature
}

/// Cofactorless Ed25519 verification: S·G == R + k·A
///
/// Rejects non-canonical S and undecodable A or R.
pub fn verify_signature(message: &[u8], signature: &[u8; SIGNATURE_LEN], public: &[u8; 32]) -> bool {
    let Some(public_point) = Ed25519::point_from_bytes(public) else {
        return false;
    };

    let mut commitment = [0u8; 32];
    commitment.copy_from_slice(&signature[..32]);
    if CompressedEdwardsY(commitment).decompress().is_none() {
        return false;
    }

    let mut s_bytes = [0u8; 32];
    s_bytes.copy_from_slice(&signature[32..]);
    let Some(s) = Scalar::from_canonical_bytes(s_bytes) else {
        return false;
    };

    let k = challenge(&commitment, public, message);
    let lhs = Ed25519::mul_base(&s);
    let rhs_minus_r = Ed25519::point_mul(&public_point, &k);
    let expected_r = lhs - rhs_minus_r;

    Ed25519::point_to_bytes(&expected_r) == commitment
}

// ============================================================================
// Stealth Signer
// ============================================================================

/// A Solana signer backed by a recovered one-time scalar
///
/// Solana's `Keypair` expands a seed, which would produce a different scalar
/// than p = m + d. This signer uses p as-is, so its public key is exactly the
/// stealth address.
pub struct StealthSigner {
    pubkey: Pubkey,
    secret: SecretScalar,
}

impl StealthSigner {
    /// Rejects a scalar that reduces to zero (public key would be the identity)
    pub fn from_secret(secret: &SecretScalar) -> Result<Self, CryptoError> {
        if secret.is_zero() {
            return Err(CryptoError::DegenerateScalar);
        }
        let public = Ed25519::point_to_bytes(&Ed25519::mul_base(&secret.to_scalar()));
        Ok(Self {
            pubkey: Pubkey::new_from_array(public),
            secret: secret.clone(),
        })
    }

    pub fn from_scalar(scalar: &Scalar) -> Result<Self, CryptoError> {
        Self::from_secret(&SecretScalar::from_scalar(scalar))
    }
}

impl Signer for StealthSigner {
    fn pubkey(&self) -> Pubkey {
        self.pubkey
    }

    fn try_pubkey(&self) -> Result<Pubkey, SignerError> {
        Ok(self.pubkey)
    }

    fn try_sign_message(&self, message: &[u8]) -> Result<Signature, SignerError> {
        Ok(Signature::from(sign_with_scalar(message, &self.secret)))
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

// Implement PartialEq for Signer trait requirements
impl PartialEq for StealthSigner {
    fn eq(&self, other: &Self) -> bool {
        self.pubkey == other.pubkey
    }
}

impl std::fmt::Debug for StealthSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StealthSigner")
            .field("pubkey", &self.pubkey)
            .finish_non_exhaustive()
    }
}
