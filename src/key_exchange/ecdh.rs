//! [Elliptic-curve Diffie-Hellman](https://en.wikipedia.org/wiki/Elliptic-curve_Diffie%E2%80%93Hellman)
//! key exchange: `generate` a private/public pair, `exchange` two parties'
//! key pairs and cross-check the shared secret both sides compute, or
//! `compute_shared` directly from one party's private scalar and the other
//! party's public point.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::ec::{Curve, EcError, Point};
use crate::numeric::{random_bits, EntropyError};

/// Default bit length for a freshly generated private scalar.
pub const DEFAULT_PRIVATE_KEY_BITS: u32 = 256;

/// Failures performing a key exchange.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EcdhError {
    /// A supplied point failed curve validation.
    Ec(EcError),
    /// The two parties computed different shared secrets — either a bug,
    /// or one of the supplied public keys didn't actually belong to the
    /// claimed private key.
    SharedMismatch,
}

impl From<EcError> for EcdhError {
    fn from(err: EcError) -> EcdhError {
        EcdhError::Ec(err)
    }
}

/// A generated ECDH key pair: a private scalar and its corresponding
/// public point `private * G`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcdhKeyPair {
    pub private: BigUint,
    pub public: Point,
}

/// Generate a key pair with [`DEFAULT_PRIVATE_KEY_BITS`] bits of private
/// scalar.
///
/// # Errors
///
/// Returns [`EntropyError`] if the OS CSPRNG could not be read.
pub fn generate_keypair(curve: &Curve) -> Result<EcdhKeyPair, EntropyError> {
    generate_keypair_with_bits(curve, DEFAULT_PRIVATE_KEY_BITS)
}

/// Generate a key pair with an explicit private scalar bit length. A
/// private scalar of zero (astronomically unlikely, but guarded against
/// explicitly) is replaced with `1`.
///
/// # Errors
///
/// Returns [`EntropyError`] if the OS CSPRNG could not be read.
pub fn generate_keypair_with_bits(curve: &Curve, bits: u32) -> Result<EcdhKeyPair, EntropyError> {
    let mut private = random_bits(u64::from(bits))?;
    if private.is_zero() {
        private = BigUint::one();
    }

    let public = curve.scalar_mul(&curve.g, &private);

    Ok(EcdhKeyPair { private, public })
}

/// Public key corresponding to a given private scalar, `private * G`.
#[must_use]
pub fn public_key_for(curve: &Curve, private: &BigUint) -> Point {
    curve.scalar_mul(&curve.g, private)
}

/// Compute the shared secret `private * public`, validating that
/// `public` actually lies on `curve` first.
///
/// # Errors
///
/// Returns [`EcdhError::Ec`] if `public` is not on the curve.
pub fn compute_shared(curve: &Curve, private: &BigUint, public: &Point) -> Result<Point, EcdhError> {
    curve.validate_point(public)?;
    Ok(curve.scalar_mul(public, private))
}

/// Run a full two-party exchange: each side computes the shared secret
/// from its own private scalar and the other side's public key, and the
/// two results are cross-checked before being returned.
///
/// # Errors
///
/// Returns [`EcdhError::Ec`] if either public key is not on the curve, or
/// [`EcdhError::SharedMismatch`] if the two sides disagree on the shared
/// secret (which can only happen if a caller supplied a public key that
/// doesn't correspond to the claimed private key).
pub fn exchange(
    curve: &Curve,
    priv_a: &BigUint,
    pub_a: &Point,
    priv_b: &BigUint,
    pub_b: &Point,
) -> Result<Point, EcdhError> {
    let shared_a = compute_shared(curve, priv_a, pub_b)?;
    let shared_b = compute_shared(curve, priv_b, pub_a)?;

    if shared_a != shared_b {
        return Err(EcdhError::SharedMismatch);
    }

    Ok(shared_a)
}
