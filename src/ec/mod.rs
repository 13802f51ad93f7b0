//! Short-Weierstrass elliptic curves over a prime field: `y^2 = x^3 + a*x +
//! b (mod m)`.
//!
//! Points are represented with a tagged [`Point`] enum rather than a `(0,
//! 0)` sentinel for the identity — `(0, 0)` is a value `x`/`y` could
//! otherwise legitimately take, and conflating it with the point at
//! infinity is a latent correctness bug waiting for the right curve
//! parameters to trigger it.

pub mod modsqrt;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use once_cell::sync::Lazy;

use crate::numeric::inv_mod;

/// A point on a short-Weierstrass curve, or the point at infinity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    Identity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    #[must_use]
    pub fn affine(x: BigUint, y: BigUint) -> Point {
        Point::Affine { x, y }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Identity)
    }
}

/// Failures validating curve parameters or points.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EcError {
    /// `b = 0 (mod m)` (or some other degenerate parameter combination)
    /// makes the curve singular.
    InvalidCurveParameters(String),
    /// A supplied point does not satisfy `y^2 = x^3 + a*x + b (mod m)`.
    NotOnCurve,
    /// `y^2` has no square root modulo `m` (see [`modsqrt`]).
    NoSquareRoot,
}

impl From<modsqrt::NoSquareRoot> for EcError {
    fn from(_: modsqrt::NoSquareRoot) -> EcError {
        EcError::NoSquareRoot
    }
}

/// A short-Weierstrass curve `y^2 = x^3 + a*x + b (mod m)` together with a
/// base point `g`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    pub a: BigUint,
    pub b: BigUint,
    pub m: BigUint,
    pub g: Point,
}

/// The default curve's parameters: `a=5, b=87, m=524287`,
/// generator `(3, 47926)`.
pub static DEFAULT_CURVE: Lazy<Curve> = Lazy::new(|| Curve {
    a: BigUint::from(5_usize),
    b: BigUint::from(87_usize),
    m: BigUint::from(524287_usize),
    g: Point::affine(BigUint::from(3_usize), BigUint::from(47926_usize)),
});

impl Curve {
    /// Construct a curve, checking that it isn't degenerate.
    ///
    /// # Errors
    ///
    /// Returns [`EcError::InvalidCurveParameters`] if `b = 0 (mod m)`
    /// (the curve would pass through the origin along both axes, and the
    /// group law's chord-and-tangent construction breaks down at such
    /// points) or if `m` is not odd.
    pub fn new(a: BigUint, b: BigUint, m: BigUint, g: Point) -> Result<Curve, EcError> {
        if m.is_even() {
            return Err(EcError::InvalidCurveParameters(
                "modulus must be odd".to_string(),
            ));
        }
        if (&b % &m).is_zero() {
            return Err(EcError::InvalidCurveParameters(
                "b must not be 0 mod m".to_string(),
            ));
        }

        Ok(Curve { a, b, m, g })
    }

    /// `y^2` for a given `x`, i.e. `x^3 + a*x + b (mod m)`.
    #[must_use]
    pub fn rhs(&self, x: &BigUint) -> BigUint {
        (x * x * x + &self.a * x + &self.b) % &self.m
    }

    /// Recover a point on the curve from its `x` coordinate, taking the
    /// smaller of the two roots as `y` when both are valid.
    ///
    /// # Errors
    ///
    /// Returns [`EcError::NoSquareRoot`] if `x^3 + a*x + b` is not a
    /// quadratic residue mod `m`.
    pub fn point_from_x(&self, x: &BigUint) -> Result<Point, EcError> {
        let y2 = self.rhs(x);
        let y = modsqrt::sqrt_mod(&y2, &self.m)?;
        Ok(Point::affine(x.clone(), y))
    }

    /// Whether `point` satisfies `y^2 = x^3 + a*x + b (mod m)`. The
    /// identity is trivially on every curve.
    #[must_use]
    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Identity => true,
            Point::Affine { x, y } => (y * y) % &self.m == self.rhs(x),
        }
    }

    /// # Errors
    ///
    /// Returns [`EcError::NotOnCurve`] if `point` is not on the curve.
    pub fn validate_point(&self, point: &Point) -> Result<(), EcError> {
        if self.is_on_curve(point) {
            Ok(())
        } else {
            Err(EcError::NotOnCurve)
        }
    }

    /// Affine point addition (and doubling, when `p == q`), following the
    /// standard chord-and-tangent construction.
    #[must_use]
    pub fn add(&self, p: &Point, q: &Point) -> Point {
        let (px, py, qx, qy) = match (p, q) {
            (Point::Identity, _) => return q.clone(),
            (_, Point::Identity) => return p.clone(),
            (Point::Affine { x: px, y: py }, Point::Affine { x: qx, y: qy }) => {
                (px, py, qx, qy)
            }
        };

        if px == qx && (py + qy) % &self.m == BigUint::zero() {
            return Point::Identity;
        }

        let lambda = if px == qx && py == qy {
            let numerator = (BigUint::from(3_usize) * px * px + &self.a) % &self.m;
            let denominator = (BigUint::from(2_usize) * py) % &self.m;
            let inv = inv_mod(&denominator, &self.m)
                .expect("point known to be on an odd-modulus curve has invertible 2y");
            (numerator * inv) % &self.m
        } else {
            let numerator = math_sub(qy, py, &self.m);
            let denominator = math_sub(qx, px, &self.m);
            let inv = inv_mod(&denominator, &self.m)
                .expect("distinct x coordinates on a prime-modulus curve have invertible difference");
            (numerator * inv) % &self.m
        };

        let rx = math_sub(&((&lambda * &lambda) % &self.m), &(px + qx), &self.m);
        let ry = math_sub(&(&lambda * math_sub(px, &rx, &self.m)), py, &self.m);

        Point::affine(rx, ry)
    }

    /// Scalar multiplication `n * p`, LSB-first double-and-add.
    #[must_use]
    pub fn scalar_mul(&self, p: &Point, n: &BigUint) -> Point {
        let mut result = Point::Identity;
        let mut base = p.clone();
        let bits = n.bits();

        for i in 0..bits {
            if n.bit(i) {
                result = self.add(&result, &base);
            }
            base = self.add(&base, &base);
        }

        result
    }
}

/// Subtraction modulo `m`. Operands need not already be reduced (`px + qx`
/// in [`Curve::add`] can run up to `2m - 2`) — each is brought into
/// `[0, m)` first, so the `else` branch's `m - (y - x)` can never underflow.
fn math_sub(x: &BigUint, y: &BigUint, m: &BigUint) -> BigUint {
    let x = x % m;
    let y = y % m;

    if x >= y {
        (x - y) % m
    } else {
        (m - (y - x)) % m
    }
}

#[cfg(test)]
mod test {
    use num_bigint::BigUint;

    use super::{Curve, Point, DEFAULT_CURVE};

    #[test]
    fn test_identity_is_additive_unit() {
        let curve = &*DEFAULT_CURVE;
        let g = curve.g.clone();

        assert_eq!(curve.add(&Point::Identity, &g), g);
        assert_eq!(curve.add(&g, &Point::Identity), g);
    }

    #[test]
    fn test_generator_is_on_curve() {
        let curve = &*DEFAULT_CURVE;
        assert!(curve.is_on_curve(&curve.g));
    }

    #[test]
    fn test_doubling_matches_addition() {
        let curve = &*DEFAULT_CURVE;
        let g = curve.g.clone();

        let doubled = curve.add(&g, &g);
        let via_scalar = curve.scalar_mul(&g, &BigUint::from(2_usize));

        assert_eq!(doubled, via_scalar);
        assert!(curve.is_on_curve(&doubled));
    }

    #[test]
    fn test_scalar_mul_distributes_over_addition() {
        let curve = &*DEFAULT_CURVE;
        let g = curve.g.clone();

        let three_g = curve.scalar_mul(&g, &BigUint::from(3_usize));
        let two_g_plus_g = curve.add(&curve.scalar_mul(&g, &BigUint::from(2_usize)), &g);

        assert_eq!(three_g, two_g_plus_g);
    }

    #[test]
    fn test_doubling_past_the_midpoint_does_not_panic() {
        // 4*G doubled to 8*G pushes px + qx past m, which used to panic
        // inside math_sub before it reduced its operands.
        let curve = &*DEFAULT_CURVE;
        let four_g = curve.scalar_mul(&curve.g, &BigUint::from(4_usize));
        let eight_g = curve.add(&four_g, &four_g);

        assert!(curve.is_on_curve(&eight_g));
        assert_eq!(eight_g, curve.scalar_mul(&curve.g, &BigUint::from(8_usize)));
    }

    #[test]
    fn test_scalar_mul_agrees_with_repeated_doubling_across_many_scalars() {
        // Exercises every doubling step over a wide scalar range so any
        // coordinate pair that sums past `m` is covered, not just 8*G.
        let curve = &*DEFAULT_CURVE;
        let mut acc = Point::Identity;

        for k in 0_u32..200 {
            assert_eq!(acc, curve.scalar_mul(&curve.g, &BigUint::from(k)));
            acc = curve.add(&acc, &curve.g);
        }
    }

    #[test]
    fn test_point_from_x_round_trips() {
        let curve = &*DEFAULT_CURVE;
        let recovered = curve.point_from_x(&BigUint::from(3_usize)).unwrap();

        match recovered {
            Point::Affine { x, y } => {
                assert_eq!(x, BigUint::from(3_usize));
                // one of the two square roots of y^2 is the generator's documented y
                let other = &curve.m - &y;
                assert!(y == BigUint::from(47926_usize) || other == BigUint::from(47926_usize));
            }
            Point::Identity => panic!("expected an affine point"),
        }
    }

    #[test]
    fn test_degenerate_b_is_rejected() {
        let err = Curve::new(
            BigUint::from(5_usize),
            BigUint::from(524287_usize), // b = 0 (mod m)
            BigUint::from(524287_usize),
            Point::Identity,
        );
        assert!(err.is_err());
    }
}
