//! Scalar/point engine
//!
//! Everything above this module talks to the curve through [`CurveEngine`].
//! Byte buffers are little-endian and every conversion into a scalar reduces
//! modulo the group order L; there is no rejection of out-of-range input.

use curve25519_dalek::{
    constants::ED25519_BASEPOINT_POINT,
    edwards::{CompressedEdwardsY, EdwardsPoint},
    scalar::Scalar,
};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Group operations the stealth protocol needs from a curve backend
pub trait CurveEngine {
    type Scalar: Copy;
    type Point: Copy;

    /// Interpret 32 little-endian bytes as an integer and reduce mod L
    fn scalar_from_bytes(bytes: &[u8; 32]) -> Self::Scalar;

    /// Interpret 64 little-endian bytes as an integer and reduce mod L
    fn scalar_from_wide(bytes: &[u8; 64]) -> Self::Scalar;

    /// Fixed-width little-endian encoding, always 32 bytes
    fn scalar_to_bytes(scalar: &Self::Scalar) -> [u8; 32];

    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    fn scalar_mul(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// scalar·G
    fn mul_base(scalar: &Self::Scalar) -> Self::Point;

    fn point_add(a: &Self::Point, b: &Self::Point) -> Self::Point;

    /// scalar·point
    fn point_mul(point: &Self::Point, scalar: &Self::Scalar) -> Self::Point;

    /// Decompress a 32-byte encoding, `None` if it is not on the curve
    fn point_from_bytes(bytes: &[u8; 32]) -> Option<Self::Point>;

    fn point_to_bytes(point: &Self::Point) -> [u8; 32];

    /// Accepts a 32- or 64-byte buffer; any other length is a structural error
    ///
    /// A 64-byte buffer is reduced as a full 512-bit integer, the same rule
    /// Ed25519 applies to SHA-512 output. Its high 32 bytes are not dropped,
    /// so two buffers that agree only in their low 32 bytes give different
    /// scalars.
    fn scalar_from_slice(bytes: &[u8]) -> Result<Self::Scalar, CryptoError> {
        match bytes.len() {
            32 => {
                let mut buf = [0u8; 32];
                buf.copy_from_slice(bytes);
                let scalar = Self::scalar_from_bytes(&buf);
                buf.zeroize();
                Ok(scalar)
            }
            64 => {
                let mut buf = [0u8; 64];
                buf.copy_from_slice(bytes);
                let scalar = Self::scalar_from_wide(&buf);
                buf.zeroize();
                Ok(scalar)
            }
            actual => Err(CryptoError::InvalidScalarLength { actual }),
        }
    }
}

/// Ed25519 (edwards25519) backed by curve25519-dalek
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519;

impl CurveEngine for Ed25519 {
    type Scalar = Scalar;
    type Point = EdwardsPoint;

    fn scalar_from_bytes(bytes: &[u8; 32]) -> Scalar {
        Scalar::from_bytes_mod_order(*bytes)
    }

    fn scalar_from_wide(bytes: &[u8; 64]) -> Scalar {
        Scalar::from_bytes_mod_order_wide(bytes)
    }

    fn scalar_to_bytes(scalar: &Scalar) -> [u8; 32] {
        scalar.to_bytes()
    }

    fn scalar_add(a: &Scalar, b: &Scalar) -> Scalar {
        a + b
    }

    fn scalar_mul(a: &Scalar, b: &Scalar) -> Scalar {
        a * b
    }

    fn mul_base(scalar: &Scalar) -> EdwardsPoint {
        scalar * &ED25519_BASEPOINT_POINT
    }

    fn point_add(a: &EdwardsPoint, b: &EdwardsPoint) -> EdwardsPoint {
        a + b
    }

    fn point_mul(point: &EdwardsPoint, scalar: &Scalar) -> EdwardsPoint {
        point * scalar
    }

    fn point_from_bytes(bytes: &[u8; 32]) -> Option<EdwardsPoint> {
        CompressedEdwardsY(*bytes).decompress()
    }

    fn point_to_bytes(point: &EdwardsPoint) -> [u8; 32] {
        point.compress().to_bytes()
    }
}

/// SHA-256 over the concatenation of `parts`
pub fn hash_bytes(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// bytesToScalar(SHA-256(parts))
pub fn hash_to_scalar(parts: &[&[u8]]) -> Scalar {
    let mut digest = hash_bytes(parts);
    let scalar = Ed25519::scalar_from_bytes(&digest);
    digest.zeroize();
    scalar
}
