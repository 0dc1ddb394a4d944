//! Stealth derivation test vectors
//!
//! Fixed meta and ephemeral secrets with every intermediate value pinned:
//! M, R, the shared secret, the domain scalar d, the one-time address P and
//! the spending scalar p. Any change to hashing, tags or encodings breaks
//! interoperability and shows up here first.

#[cfg(test)]
#[allow(clippy::op_ref)]
#[allow(non_snake_case)] // Crypto notation uses M, R, P, etc.
mod stealth_test_vectors {
    use crate::crypto::{
        derive_with_ephemeral, domain_scalar, recover_stealth_secret, shared_secret, CurveEngine,
        Ed25519, EphemeralKeypair, MetaKeypair,
    };
    use crate::memo::{decode_memo, encode_memo};
    use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;

    fn bytes32(hex_str: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut out).unwrap();
        out
    }

    /// m = 0x01, 0x02, ..., 0x20 (little-endian, reduced on use)
    fn meta_secret() -> [u8; 32] {
        let mut m = [0u8; 32];
        for (i, b) in m.iter_mut().enumerate() {
            *b = (i + 1) as u8;
        }
        m
    }

    const EPHEMERAL_SECRET: [u8; 32] = [0x42; 32];

    const M_HEX: &str = "ce92350b547b6cf028df0618bf9aba55f949930059308d83ebd727e13472ed99";
    const R_HEX: &str = "007caf7a553a894389dd562115b17e78ba84a5c7692677f216c54385dc5c6ff1";
    const SHARED_HEX: &str = "eb01678ede8383740c0c777a4e2426428bc14a52475fec4e700b6e6ed54653a7";
    const D_HEX: &str = "77b684d4b10b721aa25651b41725bee52110b2c74d3d8d71c07c6013c3fc3f0d";
    const P_HEX: &str = "c08eadc70f802cde2af8bdcc265eca4d89e3ada8748aaca6323decc960277346";
    const SPEND_HEX: &str = "9e109c1e824b5472fe266d7a673f0fcc3222c5db6253a489d9967b2fe01a5f0d";

    #[test]
    fn test_vector_basepoint_encoding() {
        assert_eq!(
            hex::encode(ED25519_BASEPOINT_POINT.compress().to_bytes()),
            "5866666666666666666666666666666666666666666666666666666666666666"
        );
    }

    #[test]
    fn test_vector_public_keys() {
        let meta = MetaKeypair::from_secret(&meta_secret());
        assert_eq!(hex::encode(meta.public_key()), M_HEX);

        let ephemeral = EphemeralKeypair::from_secret(&EPHEMERAL_SECRET);
        assert_eq!(hex::encode(ephemeral.public_key()), R_HEX);
    }

    #[test]
    fn test_vector_shared_secret_both_sides() {
        let m = Ed25519::scalar_from_bytes(&meta_secret());
        let r = Ed25519::scalar_from_bytes(&EPHEMERAL_SECRET);
        let M = Ed25519::point_from_bytes(&bytes32(M_HEX)).unwrap();
        let R = Ed25519::point_from_bytes(&bytes32(R_HEX)).unwrap();

        // r·M == m·R
        let sender = shared_secret(&r, &M);
        let recipient = shared_secret(&m, &R);
        assert_eq!(sender, recipient);
        assert_eq!(hex::encode(sender), SHARED_HEX);

        let d = domain_scalar(&sender);
        assert_eq!(hex::encode(Ed25519::scalar_to_bytes(&d)), D_HEX);
    }

    #[test]
    fn test_vector_stealth_address_and_memo() {
        let meta = MetaKeypair::from_secret(&meta_secret());
        let ephemeral = EphemeralKeypair::from_secret(&EPHEMERAL_SECRET);

        let stealth = derive_with_ephemeral(&meta.public_key(), ephemeral).unwrap();
        assert_eq!(hex::encode(stealth.stealth_pubkey), P_HEX);
        assert_eq!(hex::encode(stealth.ephemeral_pubkey), R_HEX);
        assert_eq!(stealth.memo, format!("ADLSv1:{}", R_HEX));
        assert_eq!(stealth.memo, encode_memo(&bytes32(R_HEX)));
        assert_eq!(decode_memo(&stealth.memo), Some(bytes32(R_HEX)));
    }

    #[test]
    fn test_vector_spending_key() {
        let meta = MetaKeypair::from_secret(&meta_secret());
        let p = recover_stealth_secret(&meta, &bytes32(R_HEX)).unwrap();
        assert_eq!(hex::encode(p.as_bytes()), SPEND_HEX);

        // p·G == P
        let P = &p.to_scalar() * &ED25519_BASEPOINT_POINT;
        assert_eq!(hex::encode(P.compress().to_bytes()), P_HEX);
    }

    #[test]
    fn test_vector_meta_key_from_signature() {
        // meta secret = SHA256(signature)
        let meta = MetaKeypair::from_signature(&[0x07u8; 64]).unwrap();
        assert_eq!(
            hex::encode(meta.export_secret()),
            "6cfeeb3aa25d3f411dae5eec17d7369ca7153e72dcf54bcf4c3daec0f5b21fc7"
        );
        assert_eq!(
            hex::encode(meta.public_key()),
            "3b004f91cfd43f771f62a93c8418dfa3d377ba67951a51226ebc1aa892262db1"
        );
    }

    #[test]
    fn test_vector_derivation_is_deterministic() {
        let meta = MetaKeypair::from_secret(&meta_secret());
        let a = derive_with_ephemeral(
            &meta.public_key(),
            EphemeralKeypair::from_secret(&EPHEMERAL_SECRET),
        )
        .unwrap();
        let b = derive_with_ephemeral(
            &meta.public_key(),
            EphemeralKeypair::from_secret(&EPHEMERAL_SECRET),
        )
        .unwrap();
        assert_eq!(a.stealth_pubkey, b.stealth_pubkey);
        assert_eq!(a.memo, b.memo);
    }
}
