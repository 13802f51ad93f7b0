//! [Tonelli-Shanks](https://en.wikipedia.org/wiki/Tonelli%E2%80%93Shanks_algorithm)
//! modular square root, used to recover a point's `y` coordinate from `x`
//! on a short-Weierstrass curve.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::numeric::legendre_symbol;

/// `y2` has no square root modulo `m`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct NoSquareRoot;

/// Find `y` such that `y^2 = y2 (mod m)`, `m` an odd prime.
///
/// Returns `Ok(0)` immediately if `y2` is zero. Otherwise pre-checks
/// feasibility with the Legendre symbol, then takes the `p = 3 (mod 4)`
/// fast path (`y = y2^((m+1)/4) mod m`) when it applies, falling back to
/// the general Tonelli-Shanks loop.
///
/// # Errors
///
/// Returns [`NoSquareRoot`] if `y2` is not a quadratic residue mod `m`.
pub fn sqrt_mod(y2: &BigUint, m: &BigUint) -> Result<BigUint, NoSquareRoot> {
    if y2.is_zero() {
        return Ok(BigUint::zero());
    }

    if legendre_symbol(y2, m) != 1 {
        return Err(NoSquareRoot);
    }

    let one = BigUint::one();
    let two = BigUint::from(2_usize);
    let four = BigUint::from(4_usize);

    // m = 3 (mod 4) fast path
    if m.mod_floor(&four) == BigUint::from(3_usize) {
        let exp = (m + &one) / &four;
        return Ok(y2.modpow(&exp, m));
    }

    // General case.
    let mut q = m - &one;
    let mut s = 0_u64;
    while q.is_even() {
        q >>= 1;
        s += 1;
    }

    let mut z = two.clone();
    while legendre_symbol(&z, m) != -1 {
        z += &one;
    }

    let mut c = z.modpow(&q, m);
    let mut r = y2.modpow(&((&q + &one) / &two), m);
    let mut t = y2.modpow(&q, m);
    let mut e = s;

    while t != one {
        let mut i = 1_u64;
        let mut tmp = t.clone();
        while i < e {
            tmp = tmp.modpow(&two, m);
            if tmp == one {
                break;
            }
            i += 1;
        }

        let b = c.modpow(&(BigUint::one() << (e - i - 1)), m);
        r = (&r * &b) % m;
        c = (&b * &b) % m;
        t = (&t * &c) % m;
        e = i;
    }

    Ok(r % m)
}

#[cfg(test)]
mod test {
    use num_bigint::BigUint;

    use super::sqrt_mod;

    #[test]
    fn test_sqrt_mod_zero() {
        assert_eq!(sqrt_mod(&BigUint::from(0_usize), &BigUint::from(13_usize)), Ok(BigUint::from(0_usize)));
    }

    #[test]
    fn test_sqrt_mod_p_equiv_3_mod_4() {
        // 11 = 3 (mod 4), taking the fast path; 9 is a QR mod 11 (3^2 = 9).
        let root = sqrt_mod(&BigUint::from(9_usize), &BigUint::from(11_usize)).unwrap();
        assert_eq!((&root * &root) % BigUint::from(11_usize), BigUint::from(9_usize));
    }

    #[test]
    fn test_sqrt_mod_general_case() {
        // 17 = 1 (mod 4), forcing the general Tonelli-Shanks loop.
        // 15 is a QR mod 17 (7^2 = 49 = 15 mod 17).
        let root = sqrt_mod(&BigUint::from(15_usize), &BigUint::from(17_usize)).unwrap();
        assert_eq!((&root * &root) % BigUint::from(17_usize), BigUint::from(15_usize));
    }

    #[test]
    fn test_sqrt_mod_non_residue() {
        assert!(sqrt_mod(&BigUint::from(2_usize), &BigUint::from(13_usize)).is_err());
    }

    #[test]
    fn test_sqrt_mod_default_curve() {
        // y^2 for the default curve's generator x=3: x^3 + a*x + b mod m
        let m = BigUint::from(524287_usize);
        let a = BigUint::from(5_usize);
        let b = BigUint::from(87_usize);
        let x = BigUint::from(3_usize);
        let y2 = (&x * &x * &x + &a * &x + &b) % &m;

        let y = sqrt_mod(&y2, &m).unwrap();
        assert_eq!((&y * &y) % &m, y2);
        // One of the two roots should be the documented generator y.
        let other_root = &m - &y;
        assert!(
            y == BigUint::from(47926_usize) || other_root == BigUint::from(47926_usize)
        );
    }
}
