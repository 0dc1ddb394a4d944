//! Stealth protocol
//!
//! Sender side needs only the recipient's meta public key M:
//!
//! ```text
//! R  = r·G                       (fresh ephemeral key)
//! ss = SHA256(r·M)
//! d  = H_s(ss || DOMAIN_TAG)
//! P  = M + d·G                   (one-time address)
//! ```
//!
//! Recipient side recomputes ss = SHA256(m·R), which equals the sender's
//! value because r·M = r·m·G = m·R, and recovers p = m + d so that p·G = P.

use curve25519_dalek::{edwards::EdwardsPoint, scalar::Scalar};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use solana_sdk::pubkey::Pubkey;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::engine::{hash_bytes, hash_to_scalar, CurveEngine, Ed25519};
use super::secret::SecretScalar;
use crate::error::CryptoError;
use crate::memo::encode_memo;

/// Domain separation tag mixed into the one-time key derivation
pub const DOMAIN_TAG: &str = "ADLS/stealth/v1";

/// Message a wallet signs to derive its meta key
///
/// Ed25519 signatures are deterministic, so the same wallet always yields
/// the same meta keypair.
pub const META_KEY_MESSAGE: &[u8] = b"ADLS meta key derivation v1";

// ============================================================================
// Meta Keypair
// ============================================================================

/// Long-lived recipient identity
///
/// Clone is NOT derived to prevent accidental secret duplication.
pub struct MetaKeypair {
    /// Scalar-seed bytes (m), reduced on use
    secret: SecretScalar,
    /// M = m·G, compressed
    public: [u8; 32],
    public_point: EdwardsPoint,
}

impl MetaKeypair {
    /// Derive from a 64-byte wallet signature over [`META_KEY_MESSAGE`]
    ///
    /// meta secret = SHA256(signature)
    pub fn from_signature(signature: &[u8]) -> Result<Self, CryptoError> {
        if signature.len() != 64 {
            return Err(CryptoError::InvalidSignatureLength {
                actual: signature.len(),
            });
        }
        let mut seed = hash_bytes(&[signature]);
        let keypair = Self::from_secret(&seed);
        seed.zeroize();
        Ok(keypair)
    }

    /// Reconstruct from the 32-byte secret
    pub fn from_secret(secret: &[u8; 32]) -> Self {
        let secret = SecretScalar::from_bytes(*secret);
        let public_point = Ed25519::mul_base(&secret.to_scalar());
        Self {
            public: Ed25519::point_to_bytes(&public_point),
            public_point,
            secret,
        }
    }

    /// Reconstruct from a secret and the public key the caller holds for it
    pub fn from_parts(secret: &[u8; 32], public: &[u8; 32]) -> Result<Self, CryptoError> {
        let keypair = Self::from_secret(secret);
        if !bool::from(keypair.public.ct_eq(public)) {
            return Err(CryptoError::MetaKeyMismatch);
        }
        Ok(keypair)
    }

    /// Random meta keypair using OS entropy
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let keypair = Self::from_secret(&bytes);
        bytes.zeroize();
        keypair
    }

    /// Compressed meta public key M
    pub fn public_key(&self) -> [u8; 32] {
        self.public
    }

    /// Meta public key as a Solana address
    pub fn pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.public)
    }

    /// Export the secret bytes
    ///
    /// WARNING: Handle these bytes with extreme care!
    pub fn export_secret(&self) -> [u8; 32] {
        *self.secret.as_bytes()
    }

    pub(crate) fn scalar(&self) -> Scalar {
        self.secret.to_scalar()
    }

    pub(crate) fn public_point(&self) -> &EdwardsPoint {
        &self.public_point
    }
}

impl std::fmt::Debug for MetaKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaKeypair")
            .field("public", &hex::encode(self.public))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Ephemeral Keypair
// ============================================================================

/// Per-transfer sender key; the public half travels in the memo
pub struct EphemeralKeypair {
    secret: SecretScalar,
    public: [u8; 32],
}

impl EphemeralKeypair {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        let keypair = Self::from_secret(&bytes);
        bytes.zeroize();
        keypair
    }

    pub fn from_secret(secret: &[u8; 32]) -> Self {
        let secret = SecretScalar::from_bytes(*secret);
        let public = Ed25519::point_to_bytes(&Ed25519::mul_base(&secret.to_scalar()));
        Self { secret, public }
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.public
    }

    pub fn secret(&self) -> &SecretScalar {
        &self.secret
    }
}

// ============================================================================
// Shared derivation steps
// ============================================================================

/// SHA256(secret·point)
pub fn shared_secret(secret: &Scalar, point: &EdwardsPoint) -> [u8; 32] {
    let shared_point = Ed25519::point_mul(point, secret);
    hash_bytes(&[&Ed25519::point_to_bytes(&shared_point)])
}

/// H_s(shared || DOMAIN_TAG)
pub fn domain_scalar(shared: &[u8; 32]) -> Scalar {
    hash_to_scalar(&[shared, DOMAIN_TAG.as_bytes()])
}

// ============================================================================
// Sender Side
// ============================================================================

/// Output of a sender-side derivation
pub struct StealthAddress {
    /// One-time address P, the payment destination
    pub stealth_pubkey: [u8; 32],
    /// Ephemeral public key R
    pub ephemeral_pubkey: [u8; 32],
    /// Memo to attach to the transfer
    pub memo: String,
    /// Discard after the transfer is broadcast
    ephemeral: EphemeralKeypair,
}

impl StealthAddress {
    pub fn address(&self) -> Pubkey {
        Pubkey::new_from_array(self.stealth_pubkey)
    }

    pub fn ephemeral(&self) -> &EphemeralKeypair {
        &self.ephemeral
    }
}

/// Derive a fresh one-time address for `meta_pubkey` using OS entropy
pub fn derive_stealth_address(meta_pubkey: &[u8; 32]) -> Result<StealthAddress, CryptoError> {
    derive_stealth_address_with_rng(meta_pubkey, &mut OsRng)
}

pub fn derive_stealth_address_with_rng<R: RngCore + CryptoRng>(
    meta_pubkey: &[u8; 32],
    rng: &mut R,
) -> Result<StealthAddress, CryptoError> {
    derive_with_ephemeral(meta_pubkey, EphemeralKeypair::generate(rng))
}

/// Derive with a caller-supplied ephemeral keypair
pub fn derive_with_ephemeral(
    meta_pubkey: &[u8; 32],
    ephemeral: EphemeralKeypair,
) -> Result<StealthAddress, CryptoError> {
    let meta_point =
        Ed25519::point_from_bytes(meta_pubkey).ok_or(CryptoError::InvalidMetaPublicKey)?;

    // A small-order M makes r·M guessable, so anyone could recompute d
    if meta_point.is_small_order() {
        return Err(CryptoError::DegenerateMetaPublicKey);
    }

    let mut shared = shared_secret(&ephemeral.secret.to_scalar(), &meta_point);
    let d = domain_scalar(&shared);
    shared.zeroize();

    let stealth_point = Ed25519::point_add(&meta_point, &Ed25519::mul_base(&d));
    let ephemeral_pubkey = ephemeral.public;

    Ok(StealthAddress {
        stealth_pubkey: Ed25519::point_to_bytes(&stealth_point),
        ephemeral_pubkey,
        memo: encode_memo(&ephemeral_pubkey),
        ephemeral,
    })
}

// ============================================================================
// Recipient Side
// ============================================================================

fn recipient_domain_scalar(meta: &MetaKeypair, ephemeral_pubkey: &[u8; 32]) -> Option<Scalar> {
    let ephemeral_point = Ed25519::point_from_bytes(ephemeral_pubkey)?;
    let mut shared = shared_secret(&meta.scalar(), &ephemeral_point);
    let d = domain_scalar(&shared);
    shared.zeroize();
    Some(d)
}

/// The one-time address a payment announcing `ephemeral_pubkey` would use
///
/// `None` if the ephemeral key is not a curve point.
pub fn expected_stealth_address(meta: &MetaKeypair, ephemeral_pubkey: &[u8; 32]) -> Option<[u8; 32]> {
    let d = recipient_domain_scalar(meta, ephemeral_pubkey)?;
    let point = Ed25519::point_add(meta.public_point(), &Ed25519::mul_base(&d));
    Some(Ed25519::point_to_bytes(&point))
}

/// Detection test against an observed address (constant-time compare)
pub fn check_stealth_address(
    meta: &MetaKeypair,
    ephemeral_pubkey: &[u8; 32],
    candidate: &[u8; 32],
) -> bool {
    match expected_stealth_address(meta, ephemeral_pubkey) {
        Some(expected) => bool::from(expected.ct_eq(candidate)),
        None => false,
    }
}

/// p = m + d (mod L)
pub fn recover_stealth_secret(
    meta: &MetaKeypair,
    ephemeral_pubkey: &[u8; 32],
) -> Result<SecretScalar, CryptoError> {
    let d = recipient_domain_scalar(meta, ephemeral_pubkey)
        .ok_or(CryptoError::InvalidEphemeralKey)?;
    let p = Ed25519::scalar_add(&meta.scalar(), &d);
    Ok(SecretScalar::from_scalar(&p))
}
