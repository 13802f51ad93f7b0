//! JSON payload shapes and command implementations for the `ecdh`
//! dispatcher's `generate`, `exchange`, and `compute_shared` actions.

use serde::Serialize;

use super::{parse_biguint, CliError};
use crate::ec::{Curve, Point, DEFAULT_CURVE};
use crate::key_exchange::ecdh;

#[derive(Serialize)]
pub struct CurveOutput {
    pub a: String,
    pub b: String,
    pub m: String,
    pub generator: PointOutput,
}

#[derive(Serialize)]
pub struct PointOutput {
    pub x: String,
    pub y: String,
}

impl From<&Point> for PointOutput {
    fn from(point: &Point) -> PointOutput {
        match point {
            Point::Identity => PointOutput {
                x: "0".to_string(),
                y: "0".to_string(),
            },
            Point::Affine { x, y } => PointOutput {
                x: x.to_str_radix(16),
                y: y.to_str_radix(16),
            },
        }
    }
}

#[derive(Serialize)]
pub struct PartyOutput {
    #[serde(rename = "privateKey")]
    pub private_key: String,
    #[serde(rename = "publicKey")]
    pub public_key: PointOutput,
}

#[derive(Serialize)]
pub struct GenerateOutput {
    pub success: bool,
    pub action: &'static str,
    pub curve: CurveOutput,
    pub alice: PartyOutput,
    pub bob: PartyOutput,
}

#[derive(Serialize)]
pub struct ExchangeOutput {
    pub success: bool,
    pub action: &'static str,
    pub curve: CurveOutput,
    pub alice: PartyOutput,
    pub bob: PartyOutput,
    #[serde(rename = "sharedSecret")]
    pub shared_secret: PointOutput,
}

#[derive(Serialize)]
pub struct ComputeSharedOutput {
    pub success: bool,
    pub action: &'static str,
    #[serde(rename = "sharedSecret")]
    pub shared_secret: PointOutput,
}

/// Curve parameters parsed from `[a, b, m, gx, gy]` (decimal a/b/m,
/// hex gx/gy), falling back to [`DEFAULT_CURVE`] when `args` is empty.
fn curve_from_args(args: &[String]) -> Result<Curve, CliError> {
    if args.is_empty() {
        return Ok(DEFAULT_CURVE.clone());
    }

    let [a, b, m, gx, gy] = args else {
        return Err(CliError::InvalidCurveParameters(
            "expected 5 curve parameters: a b m gx gy".to_string(),
        ));
    };

    let a = parse_biguint("a", a, 10)?;
    let b = parse_biguint("b", b, 10)?;
    let m = parse_biguint("m", m, 10)?;
    let gx = parse_biguint("gx", gx, 16)?;
    let gy = parse_biguint("gy", gy, 16)?;

    Ok(Curve::new(a, b, m, Point::affine(gx, gy))?)
}

/// `ecdh generate [a b m gx gy [priv_a priv_b]]`.
///
/// 5 positional arguments supply custom curve parameters, 7 additionally supply fixed
/// private keys (hex). Any other count is a usage error.
///
/// # Errors
///
/// Returns [`CliError::InvalidCurveParameters`] or
/// [`CliError::InvalidIntegerLiteral`] on malformed arguments.
pub fn generate(args: &[String]) -> Result<GenerateOutput, CliError> {
    let (curve_args, priv_args): (&[String], &[String]) = match args.len() {
        0 => (&[], &[]),
        5 => (args, &[]),
        7 => (&args[..5], &args[5..]),
        _ => {
            return Err(CliError::Usage(
                "ecdh generate [a b m gx gy [priv_a priv_b]]".to_string(),
            ))
        }
    };

    let curve = curve_from_args(curve_args)?;

    let (priv_a, priv_b) = if priv_args.is_empty() {
        let alice = ecdh::generate_keypair(&curve)?;
        let bob = ecdh::generate_keypair(&curve)?;
        (alice.private, bob.private)
    } else {
        let priv_a = parse_biguint("priv_a", &priv_args[0], 16)?;
        let priv_b = parse_biguint("priv_b", &priv_args[1], 16)?;
        (priv_a, priv_b)
    };

    let pub_a = ecdh::public_key_for(&curve, &priv_a);
    let pub_b = ecdh::public_key_for(&curve, &priv_b);

    Ok(GenerateOutput {
        success: true,
        action: "generate",
        curve: CurveOutput {
            a: curve.a.to_str_radix(10),
            b: curve.b.to_str_radix(10),
            m: curve.m.to_str_radix(10),
            generator: (&curve.g).into(),
        },
        alice: PartyOutput {
            private_key: priv_a.to_str_radix(16),
            public_key: (&pub_a).into(),
        },
        bob: PartyOutput {
            private_key: priv_b.to_str_radix(16),
            public_key: (&pub_b).into(),
        },
    })
}

/// `ecdh exchange <a> <b> <m> <gx> <gy> <priv_a> <priv_b> [pub_ax pub_ay pub_bx pub_by]`.
///
/// # Errors
///
/// Returns [`CliError::InvalidCurveParameters`]/[`CliError::InvalidIntegerLiteral`]
/// on malformed arguments, or [`CliError::SharedMismatch`] if the two
/// sides disagree on the shared secret.
pub fn exchange(args: &[String]) -> Result<ExchangeOutput, CliError> {
    if args.len() != 7 && args.len() != 11 {
        return Err(CliError::Usage(
            "ecdh exchange a b m gx gy priv_a priv_b [pub_ax pub_ay pub_bx pub_by]".to_string(),
        ));
    }

    let curve = curve_from_args(&args[..5])?;
    let priv_a = parse_biguint("priv_a", &args[5], 16)?;
    let priv_b = parse_biguint("priv_b", &args[6], 16)?;

    let (pub_a, pub_b) = if args.len() == 11 {
        let pub_ax = parse_biguint("pub_ax", &args[7], 16)?;
        let pub_ay = parse_biguint("pub_ay", &args[8], 16)?;
        let pub_bx = parse_biguint("pub_bx", &args[9], 16)?;
        let pub_by = parse_biguint("pub_by", &args[10], 16)?;
        (Point::affine(pub_ax, pub_ay), Point::affine(pub_bx, pub_by))
    } else {
        (
            ecdh::public_key_for(&curve, &priv_a),
            ecdh::public_key_for(&curve, &priv_b),
        )
    };

    let shared = ecdh::exchange(&curve, &priv_a, &pub_a, &priv_b, &pub_b)?;

    Ok(ExchangeOutput {
        success: true,
        action: "exchange",
        curve: CurveOutput {
            a: curve.a.to_str_radix(10),
            b: curve.b.to_str_radix(10),
            m: curve.m.to_str_radix(10),
            generator: (&curve.g).into(),
        },
        alice: PartyOutput {
            private_key: priv_a.to_str_radix(16),
            public_key: (&pub_a).into(),
        },
        bob: PartyOutput {
            private_key: priv_b.to_str_radix(16),
            public_key: (&pub_b).into(),
        },
        shared_secret: (&shared).into(),
    })
}

/// `ecdh compute_shared <a> <b> <m> <priv> <pub_x> <pub_y>`.
///
/// # Errors
///
/// Returns [`CliError::InvalidCurveParameters`]/[`CliError::InvalidIntegerLiteral`]
/// on malformed arguments.
pub fn compute_shared(args: &[String]) -> Result<ComputeSharedOutput, CliError> {
    let [a, b, m, private, pub_x, pub_y] = args else {
        return Err(CliError::Usage(
            "ecdh compute_shared a b m private pub_x pub_y".to_string(),
        ));
    };

    let a = parse_biguint("a", a, 10)?;
    let b = parse_biguint("b", b, 10)?;
    let m = parse_biguint("m", m, 10)?;
    let private = parse_biguint("private", private, 16)?;
    let pub_x = parse_biguint("pub_x", pub_x, 16)?;
    let pub_y = parse_biguint("pub_y", pub_y, 16)?;

    // compute_shared doesn't take a generator; it only needs a, b, m to
    // validate the supplied public point.
    let curve = Curve::new(a, b, m, Point::Identity)?;
    let public = Point::affine(pub_x, pub_y);

    let shared = ecdh::compute_shared(&curve, &private, &public)?;

    Ok(ComputeSharedOutput {
        success: true,
        action: "compute_shared",
        shared_secret: (&shared).into(),
    })
}
