//! Prime generation and the [Miller-Rabin](https://en.wikipedia.org/wiki/Miller%E2%80%93Rabin_primality_test)
//! primality test.
//!
//! Generation draws random bits, forces the top and bottom bit, then
//! searches upward for the next
//! prime (rather than repeatedly discarding and resampling a fresh
//! candidate). The search itself uses a cheap trial-division sieve plus a
//! handful of Miller-Rabin rounds; the prime that search lands on is then
//! confirmed with the full round count before being handed back.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;

use super::{random_bits, EntropyError};

const FIRST_PRIMES_COUNT: usize = 2048;

/// Default Miller-Rabin round count. Gives a false-positive probability of
/// at most `4^-25` — the same figure `mpz_probab_prime_p` uses.
pub const DEFAULT_ROUNDS: u32 = 25;

/// Round count used while *searching* for a candidate; confirmation of the
/// winning candidate always uses [`DEFAULT_ROUNDS`].
const SEARCH_ROUNDS: u32 = 5;

/// Failure generating or confirming a prime.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PrimeError {
    /// The candidate returned by the next-prime search failed the final,
    /// full-round Miller-Rabin confirmation. This should not happen in
    /// practice (the search already filters with Miller-Rabin); surfacing
    /// it as an error rather than panicking keeps the engine's contract
    /// that every failure is reported, not crashed into.
    PrimalityCheckFailed,
    /// The OS CSPRNG could not be read while drawing a candidate.
    Entropy(EntropyError),
}

impl From<EntropyError> for PrimeError {
    fn from(err: EntropyError) -> PrimeError {
        PrimeError::Entropy(err)
    }
}

pub static FIRST_PRIMES: Lazy<Vec<BigUint>> = Lazy::new(|| {
    let mut primes = Vec::with_capacity(FIRST_PRIMES_COUNT);
    primes.push(2_usize);

    for x in (3_usize..).step_by(2) {
        let is_prime = primes.iter().all(|&prime| x % prime != 0);

        if is_prime {
            primes.push(x);
        }

        if primes.len() == FIRST_PRIMES_COUNT {
            break;
        }
    }

    primes.into_iter().map(BigUint::from).collect()
});

/// Quick rejection sieve against the first few thousand primes.
fn passes_trial_division(candidate: &BigUint) -> bool {
    FIRST_PRIMES
        .iter()
        .all(|prime| candidate == prime || !(candidate % prime).is_zero())
}

// Rewrite `n - 1` as `2^s * d` with `d` odd.
fn rewrite(mut d: BigUint) -> (u64, BigUint) {
    let mut s = 0_u64;

    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    (s, d)
}

/// [Miller-Rabin primality test](https://en.wikipedia.org/wiki/Miller%E2%80%93Rabin_primality_test),
/// `rounds` independent witnesses drawn from the OS CSPRNG.
#[must_use]
pub fn miller_rabin(candidate: &BigUint, rounds: u32) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2_usize);

    if *candidate == two {
        return true;
    }
    if candidate.is_even() || candidate < &two {
        return false;
    }

    let candidate_minus_one = candidate - &one;
    let (s, d) = rewrite(candidate_minus_one.clone());

    'rounds: for _ in 0..rounds {
        let basis = gen_biguint_range(&two, candidate);
        let mut v = basis.modpow(&d, candidate);

        if v.is_one() || v == candidate_minus_one {
            continue;
        }

        for _ in 1..s {
            v = v.modpow(&two, candidate);

            if v == candidate_minus_one {
                continue 'rounds;
            }
            if v.is_one() {
                return false;
            }
        }

        return false;
    }

    true
}

/// Uniform random value in `[low, high)`, drawn from the OS CSPRNG.
fn gen_biguint_range(low: &BigUint, high: &BigUint) -> BigUint {
    use num_bigint::RandBigInt;

    OsRng.gen_biguint_range(low, high)
}

/// Smallest prime `>= candidate`, found by incrementing through odd
/// numbers (mirrors GMP's `mpz_nextprime`).
#[must_use]
pub fn next_prime(candidate: &BigUint) -> BigUint {
    let two = BigUint::from(2_usize);

    if *candidate <= two {
        return two;
    }

    let mut p = candidate.clone();
    if p.is_even() {
        p += BigUint::one();
    }

    loop {
        if passes_trial_division(&p) && miller_rabin(&p, SEARCH_ROUNDS) {
            return p;
        }
        p += &two;
    }
}

/// Draw a random `bits`-bit odd candidate with the top bit forced, suitable
/// as a `next_prime` search seed.
///
/// # Errors
///
/// Returns [`EntropyError`] if the OS CSPRNG could not be read.
pub fn random_odd_candidate(bits: u32) -> Result<BigUint, EntropyError> {
    let mut candidate = random_bits(u64::from(bits))?;
    candidate.set_bit(u64::from(bits - 1), true); // force exact bit length
    candidate.set_bit(0, true); // force odd
    Ok(candidate)
}

/// Generate a prime of exactly `bits` bits: draw a random odd candidate
/// with the top bit set, search forward for the next prime, and confirm
/// with [`DEFAULT_ROUNDS`] Miller-Rabin rounds.
///
/// # Errors
///
/// Returns [`PrimeError::PrimalityCheckFailed`] if the candidate the search
/// lands on fails the final confirmation round, or [`PrimeError::Entropy`]
/// if the OS CSPRNG could not be read.
pub fn generate_prime(bits: u32) -> Result<BigUint, PrimeError> {
    let candidate = random_odd_candidate(bits)?;
    let p = next_prime(&candidate);

    if miller_rabin(&p, DEFAULT_ROUNDS) {
        Ok(p)
    } else {
        Err(PrimeError::PrimalityCheckFailed)
    }
}

#[cfg(test)]
mod test {
    use num_bigint::BigUint;

    use super::{generate_prime, miller_rabin, next_prime};

    #[test]
    fn test_miller_rabin_known_primes() {
        for p in [2u32, 3, 5, 7, 11, 13, 97, 7919] {
            assert!(miller_rabin(&BigUint::from(p), 25), "{p} should be prime");
        }
    }

    #[test]
    fn test_miller_rabin_known_composites() {
        for n in [1u32, 4, 15, 21, 100, 7921] {
            assert!(!miller_rabin(&BigUint::from(n), 25), "{n} should be composite");
        }
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(&BigUint::from(14_usize)), BigUint::from(17_usize));
        assert_eq!(next_prime(&BigUint::from(17_usize)), BigUint::from(17_usize));
        assert_eq!(next_prime(&BigUint::from(1_usize)), BigUint::from(2_usize));
    }

    #[test]
    fn test_generate_prime_has_exact_bit_length() {
        for bits in [16_u32, 64, 128] {
            let p = generate_prime(bits).unwrap();
            assert_eq!(p.bits(), u64::from(bits));
            assert!(miller_rabin(&p, 25));
        }
    }
}
