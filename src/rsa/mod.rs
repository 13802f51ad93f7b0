//! [RSA](https://en.wikipedia.org/wiki/RSA_(cryptosystem)) public-key cryptosystem.
//!
//! Textbook (unpadded) RSA: `encrypt(m) = m^e mod n`, `decrypt(c) = c^d mod n`.
//! There is no OAEP/PKCS#1 padding here and there are no signatures — see the
//! crate-level docs for why.

mod text;

use num_bigint::BigUint;
use num_traits::One;
use once_cell::sync::Lazy;

use crate::numeric::primes::{generate_prime, PrimeError};
use crate::numeric::{inv_mod, EntropyError};

pub use text::{is_printable, pack_bytes, unpack_bytes};

/// Bit length of `p` used by [`generate_keypair`]. `n` ends up
/// `BITS_P + BITS_Q` (~339) bits — deliberately undersized, and therefore
/// insecure; see the crate-level docs.
pub const BITS_P: u32 = 166;
/// Bit length of `q` used by [`generate_keypair`].
pub const BITS_Q: u32 = 173;

/// Default RSA public exponent. Stepped by `+2` during key generation if it
/// isn't coprime to `phi(n)`.
pub static DEFAULT_E: Lazy<BigUint> = Lazy::new(|| BigUint::from(65537_usize));

/// Failures generating or using an RSA key pair.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RsaError {
    /// A generated prime candidate failed its final Miller-Rabin
    /// confirmation.
    PrimalityCheckFailed,
    /// The plaintext integer is `>= n` and cannot be represented modulo it.
    MessageTooLarge,
    /// `e` has no inverse modulo `phi(n)` (should not happen once `e` has
    /// been stepped to coprimality, but `generate_keypair_from_primes`
    /// exposes the possibility directly).
    ExponentNotInvertible,
    /// The OS CSPRNG could not be read while drawing a prime candidate.
    Entropy(EntropyError),
}

impl From<PrimeError> for RsaError {
    fn from(err: PrimeError) -> RsaError {
        match err {
            PrimeError::PrimalityCheckFailed => RsaError::PrimalityCheckFailed,
            PrimeError::Entropy(e) => RsaError::Entropy(e),
        }
    }
}

/// An RSA public key: modulus `n` and public exponent `e`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: BigUint,
    pub e: BigUint,
}

/// An RSA private key: modulus `n` and private exponent `d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: BigUint,
    pub d: BigUint,
}

/// A generated RSA key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub public: RsaPublicKey,
    pub private: RsaPrivateKey,
}

impl RsaPublicKey {
    /// `ciphertext = message^e mod n`. Fails if `message >= n`.
    pub fn encrypt(&self, message: &BigUint) -> Result<BigUint, RsaError> {
        if message >= &self.n {
            return Err(RsaError::MessageTooLarge);
        }

        Ok(message.modpow(&self.e, &self.n))
    }
}

impl RsaPrivateKey {
    /// `message = ciphertext^d mod n`.
    #[must_use]
    pub fn decrypt(&self, ciphertext: &BigUint) -> BigUint {
        ciphertext.modpow(&self.d, &self.n)
    }
}

/// Generate an RSA key pair using the default bit lengths
/// ([`BITS_P`]/[`BITS_Q`]) and the default public exponent ([`DEFAULT_E`]).
///
/// # Errors
///
/// Returns [`RsaError::PrimalityCheckFailed`] if prime generation's final
/// confirmation fails (see [`crate::numeric::primes::generate_prime`]).
pub fn generate_keypair() -> Result<RsaKeyPair, RsaError> {
    generate_keypair_with_bits(BITS_P, BITS_Q)
}

/// Generate an RSA key pair with explicit prime bit lengths.
///
/// # Errors
///
/// See [`generate_keypair`].
pub fn generate_keypair_with_bits(bits_p: u32, bits_q: u32) -> Result<RsaKeyPair, RsaError> {
    let p = generate_prime(bits_p)?;
    let mut q = generate_prime(bits_q)?;

    while q == p {
        q = generate_prime(bits_q)?;
    }

    generate_keypair_from_primes(&p, &q, &DEFAULT_E)
}

/// Derive an RSA key pair from explicit primes `p`, `q` and a candidate
/// public exponent `e`. If `e` is not coprime to `phi(n) = (p-1)(q-1)`, it
/// is stepped by `+2` until it is.
///
/// # Errors
///
/// Returns [`RsaError::ExponentNotInvertible`] in the (expected to be
/// unreachable, since the stepping loop always finds a coprime `e`) case
/// that a coprime `e` still has no inverse mod `phi(n)`.
pub fn generate_keypair_from_primes(
    p: &BigUint,
    q: &BigUint,
    e: &BigUint,
) -> Result<RsaKeyPair, RsaError> {
    let one = BigUint::one();
    let p_1 = p - &one;
    let q_1 = q - &one;
    let phi = &p_1 * &q_1;
    let n = p * q;

    let mut e = e.clone();
    while inv_mod(&e, &phi).is_none() {
        e += BigUint::from(2_usize);
    }

    let d = inv_mod(&e, &phi).ok_or(RsaError::ExponentNotInvertible)?;

    Ok(RsaKeyPair {
        public: RsaPublicKey { n: n.clone(), e },
        private: RsaPrivateKey { n, d },
    })
}

#[cfg(test)]
mod test {
    use num_bigint::BigUint;

    use super::{generate_keypair, generate_keypair_from_primes, generate_keypair_with_bits};

    #[test]
    fn test_known_vector() {
        // textbook RSA vector: p=61, q=53, e=17, d=2753, M=65 -> C=0xa65
        let keypair = generate_keypair_from_primes(
            &BigUint::from(61_usize),
            &BigUint::from(53_usize),
            &BigUint::from(17_usize),
        )
        .unwrap();

        assert_eq!(keypair.public.n, BigUint::from(3233_usize));
        assert_eq!(keypair.public.e, BigUint::from(17_usize));
        assert_eq!(keypair.private.d, BigUint::from(2753_usize));

        let ciphertext = keypair.public.encrypt(&BigUint::from(65_usize)).unwrap();
        assert_eq!(ciphertext, BigUint::from(2725_usize));
        assert_eq!(format!("{ciphertext:x}"), "a65");

        assert_eq!(keypair.private.decrypt(&ciphertext), BigUint::from(65_usize));
    }

    #[test]
    fn test_message_too_large() {
        let keypair = generate_keypair_from_primes(
            &BigUint::from(61_usize),
            &BigUint::from(53_usize),
            &BigUint::from(17_usize),
        )
        .unwrap();

        assert!(keypair.public.encrypt(&BigUint::from(4000_usize)).is_err());
    }

    #[test]
    fn test_round_trip_small_keys() {
        let keypair = generate_keypair_with_bits(32, 32).unwrap();

        for m in [0_usize, 1, 42, 12345] {
            let plaintext = BigUint::from(m);
            if plaintext >= keypair.public.n {
                continue;
            }
            let ciphertext = keypair.public.encrypt(&plaintext).unwrap();
            assert_eq!(keypair.private.decrypt(&ciphertext), plaintext);
        }
    }

    #[test]
    fn test_round_trip_default_bit_lengths() {
        let keypair = generate_keypair().unwrap();
        let plaintext = BigUint::from(424_242_usize);

        let ciphertext = keypair.public.encrypt(&plaintext).unwrap();
        assert_eq!(keypair.private.decrypt(&ciphertext), plaintext);
    }
}
