//! Modular-arithmetic primitives that sit on top of [`num_bigint`].
//!
//! `num-bigint`'s `BigUint`/`BigInt` already provide arbitrary-precision
//! storage, comparison, and the basic ring operations. This module adds the
//! handful of number-theoretic operations the RSA and EC engines need that
//! the crate doesn't supply directly: the extended Euclidean algorithm,
//! modular inverse, the Legendre symbol, and exact-bit-length random
//! sampling. [`primes`] builds prime generation and Miller-Rabin on top.

pub mod primes;

use num_bigint::{BigInt, BigUint, ToBigInt};
use num_traits::{One, Signed, Zero};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

/// Reduce `x` into the canonical non-negative residue `[0, n)`.
///
/// Rust's `%` follows the sign of the dividend (`-1 % 5 == -1`); this
/// performs mathematical modulo instead (`-1 mod 5 == 4`).
#[must_use]
pub fn math_mod(x: &BigInt, n: &BigUint) -> BigUint {
    let n_bigint = n.to_bigint().unwrap();

    (((x % &n_bigint) + &n_bigint) % &n_bigint)
        .to_biguint()
        .unwrap()
}

/// [Extended Euclidean algorithm](https://en.wikipedia.org/wiki/Extended_Euclidean_algorithm).
///
/// Returns `(gcd, x, y)` such that `a*x + b*y = gcd`.
#[must_use]
pub fn egcd(a: BigInt, b: BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() {
        return (b, BigInt::zero(), BigInt::one());
    }

    let (g, y, x) = egcd(&b % &a, a.clone());

    (g, x - (&b / &a) * &y, y)
}

/// [Modular multiplicative inverse](https://en.wikipedia.org/wiki/Modular_multiplicative_inverse)
/// of `a` modulo `n`.
///
/// Returns `None` if `a` is not a unit mod `n` (i.e. `gcd(a, n) != 1`).
#[must_use]
pub fn inv_mod(a: &BigUint, n: &BigUint) -> Option<BigUint> {
    if n.is_one() {
        return Some(BigUint::zero());
    }

    let a_bigint = math_mod(&a.to_bigint().unwrap(), n).to_bigint().unwrap();
    let (g, x, _) = egcd(a_bigint, n.to_bigint().unwrap());

    if !g.abs().is_one() {
        return None;
    }

    Some(math_mod(&x, n))
}

/// [Legendre symbol](https://en.wikipedia.org/wiki/Legendre_symbol) `(a/p)`.
///
/// `p` must be an odd prime. Returns `1` if `a` is a non-zero quadratic
/// residue mod `p`, `-1` if it is a non-residue, and `0` if `p` divides `a`.
#[must_use]
pub fn legendre_symbol(a: &BigUint, p: &BigUint) -> i8 {
    if a.is_zero() {
        return 0;
    }

    let exp = (p - BigUint::one()) / BigUint::from(2_usize);
    let result = a.modpow(&exp, p);

    if result.is_one() {
        1
    } else {
        // result == p - 1, i.e. -1 mod p
        -1
    }
}

/// The OS CSPRNG could not be read.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EntropyError(String);

impl std::fmt::Display for EntropyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for EntropyError {}

/// Draw a uniformly random integer with exactly `bits` bits of storage,
/// i.e. a value in `[0, 2^bits)`, from the OS CSPRNG.
///
/// The caller is responsible for forcing any bits (e.g. the top bit, to
/// guarantee an exact bit-length) afterwards. This is the entry point used
/// for key material (RSA primes, ECDH private scalars), so the raw byte
/// buffer is drawn into a [`Zeroizing`] wrapper and scrubbed on drop —
/// `BigUint`'s own internal limb storage isn't reachable for scrubbing, so
/// only the buffer this function owns is covered, not the `BigUint` that
/// gets built from it.
///
/// # Errors
///
/// Returns [`EntropyError`] if the OS CSPRNG fails to fill the buffer,
/// rather than panicking the way [`RngCore::fill_bytes`] does.
pub fn random_bits(bits: u64) -> Result<BigUint, EntropyError> {
    let byte_len = usize::try_from((bits + 7) / 8).expect("bit length fits in a usize");
    let mut buf = Zeroizing::new(vec![0_u8; byte_len]);
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| EntropyError(e.to_string()))?;

    let excess_bits = u32::try_from(byte_len as u64 * 8 - bits).expect("excess < 8");
    if excess_bits > 0 {
        buf[0] &= 0xFF_u8 >> excess_bits;
    }

    Ok(BigUint::from_bytes_be(&buf))
}
