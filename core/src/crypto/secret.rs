use curve25519_dalek::scalar::Scalar;
use zeroize::Zeroize;

use super::engine::{CurveEngine, Ed25519};

/// A 32-byte secret scalar that zeroizes its contents on drop
///
/// Holds meta, ephemeral and one-time stealth secrets. The bytes are always
/// the canonical (reduced) encoding once they have passed through
/// [`SecretScalar::from_scalar`]; [`SecretScalar::from_bytes`] keeps raw seed
/// bytes and reduces on every [`SecretScalar::to_scalar`] call.
#[derive(Clone)]
pub struct SecretScalar {
    bytes: [u8; 32],
}

impl SecretScalar {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Create from a curve25519-dalek Scalar
    pub fn from_scalar(scalar: &Scalar) -> Self {
        Self {
            bytes: Ed25519::scalar_to_bytes(scalar),
        }
    }

    /// Reduced scalar value
    pub fn to_scalar(&self) -> Scalar {
        Ed25519::scalar_from_bytes(&self.bytes)
    }

    /// Get the raw bytes (use carefully)
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Whether the value reduces to zero
    pub fn is_zero(&self) -> bool {
        self.to_scalar() == Scalar::zero()
    }
}

impl Drop for SecretScalar {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretScalar(..)")
    }
}

impl PartialEq for SecretScalar {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        bool::from(self.bytes.ct_eq(&other.bytes))
    }
}

impl Eq for SecretScalar {}
