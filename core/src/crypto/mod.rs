//! Cryptographic core: curve engine, stealth derivation and raw-scalar signing

pub mod engine;
pub mod secret;
pub mod signer;
pub mod stealth;

pub use engine::{hash_bytes, hash_to_scalar, CurveEngine, Ed25519};
pub use secret::SecretScalar;
pub use signer::{sign_with_scalar, sign_with_scalar_rng, verify_signature, StealthSigner, SIGNATURE_LEN};
pub use stealth::{
    check_stealth_address, derive_stealth_address, derive_stealth_address_with_rng,
    derive_with_ephemeral, domain_scalar, expected_stealth_address, recover_stealth_secret,
    shared_secret, EphemeralKeypair, MetaKeypair, StealthAddress, DOMAIN_TAG, META_KEY_MESSAGE,
};
