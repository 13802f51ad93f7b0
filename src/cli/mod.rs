//! Shared argument-parsing and JSON-output plumbing for the five binaries.
//!
//! Every binary here speaks one protocol to its caller: a single line of
//! JSON on success, a single line of `{"error": "..."}` on failure, always
//! on stdout, with a non-zero exit code in the failure case. `clap`'s
//! default behavior (print usage to stderr, exit 2) doesn't fit that
//! contract, so binaries call [`parse_or_usage_error`] instead of
//! `Parser::parse`.

pub mod ecdh;
pub mod rsa;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use serde::Serialize;

use crate::ec::EcError;
use crate::key_exchange::ecdh::EcdhError;
use crate::numeric::primes::PrimeError;
use crate::numeric::EntropyError;
use crate::rsa::RsaError;

/// Errors surfaced at the CLI boundary. Domain errors
/// ([`RsaError`], [`EcError`], [`EcdhError`], [`PrimeError`]) are folded
/// into this narrower, string-free set via the `From` impls below so every
/// binary emits the same JSON error shape regardless of which module
/// failed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CliError {
    /// Argument parsing failed; `message` is clap's own diagnostic.
    Usage(String),
    /// The first positional argument wasn't a recognized subcommand.
    UnknownCommand(String),
    /// A numeric argument failed to parse under its expected radix.
    InvalidIntegerLiteral { field: &'static str, value: String, radix: u32 },
    /// Prime generation's final confirmation round failed.
    PrimalityCheckFailed,
    /// An RSA plaintext integer is `>= n`.
    MessageTooLarge,
    /// An RSA ciphertext integer is out of range or otherwise malformed.
    InvalidCiphertext,
    /// An `x` coordinate has no corresponding `y` on the curve.
    NoSquareRoot,
    /// The supplied curve parameters, or a supplied point, don't form a
    /// valid curve / lie on it.
    InvalidCurveParameters(String),
    /// The two parties' computed shared secrets disagree.
    SharedMismatch,
    /// The OS CSPRNG could not be reached.
    EntropyFailure(String),
}

impl From<PrimeError> for CliError {
    fn from(err: PrimeError) -> CliError {
        match err {
            PrimeError::PrimalityCheckFailed => CliError::PrimalityCheckFailed,
            PrimeError::Entropy(e) => CliError::EntropyFailure(e.to_string()),
        }
    }
}

impl From<RsaError> for CliError {
    fn from(err: RsaError) -> CliError {
        match err {
            RsaError::PrimalityCheckFailed => CliError::PrimalityCheckFailed,
            RsaError::MessageTooLarge => CliError::MessageTooLarge,
            RsaError::ExponentNotInvertible => {
                CliError::InvalidCurveParameters("public exponent has no inverse".to_string())
            }
            RsaError::Entropy(e) => CliError::EntropyFailure(e.to_string()),
        }
    }
}

impl From<EntropyError> for CliError {
    fn from(err: EntropyError) -> CliError {
        CliError::EntropyFailure(err.to_string())
    }
}

impl From<EcError> for CliError {
    fn from(err: EcError) -> CliError {
        match err {
            EcError::InvalidCurveParameters(msg) => CliError::InvalidCurveParameters(msg),
            EcError::NotOnCurve => {
                CliError::InvalidCurveParameters("point is not on the curve".to_string())
            }
            EcError::NoSquareRoot => CliError::NoSquareRoot,
        }
    }
}

impl From<EcdhError> for CliError {
    fn from(err: EcdhError) -> CliError {
        match err {
            EcdhError::Ec(ec_err) => ec_err.into(),
            EcdhError::SharedMismatch => CliError::SharedMismatch,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::UnknownCommand(cmd) => write!(f, "unknown action: {cmd}"),
            CliError::InvalidIntegerLiteral { field, value, radix } => {
                write!(f, "invalid {field} (expected base-{radix} integer): {value}")
            }
            CliError::PrimalityCheckFailed => write!(f, "primality check failed"),
            CliError::MessageTooLarge => write!(f, "message is too large for this modulus"),
            CliError::InvalidCiphertext => write!(f, "invalid ciphertext"),
            CliError::NoSquareRoot => write!(f, "no square root exists for the given x"),
            CliError::InvalidCurveParameters(msg) => write!(f, "invalid curve parameters: {msg}"),
            CliError::SharedMismatch => write!(f, "shared secrets do not match"),
            CliError::EntropyFailure(msg) => write!(f, "entropy source unavailable: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

#[derive(Serialize)]
struct JsonError<'a> {
    error: &'a str,
}

/// Render `err` as a single line of `{"error": "..."}` JSON.
#[must_use]
pub fn error_json(err: &CliError) -> String {
    serde_json::to_string(&JsonError { error: &err.to_string() })
        .unwrap_or_else(|_| "{\"error\":\"failed to render error\"}".to_string())
}

/// Parse `args` (including the program name in position 0) with `clap`,
/// converting a parse failure into a [`CliError::Usage`] instead of
/// letting clap print its own usage text and exit. An unrecognized
/// subcommand is reported as [`CliError::UnknownCommand`] instead, so
/// callers can distinguish "no such action" from a malformed argument list.
///
/// # Errors
///
/// Returns [`CliError::UnknownCommand`] if the first positional argument
/// isn't a recognized subcommand, or [`CliError::Usage`] if `args`
/// otherwise doesn't parse under `T`.
pub fn parse_or_usage_error<T, I, S>(args: I) -> Result<T, CliError>
where
    T: Parser,
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    T::try_parse_from(args).map_err(|e| {
        if e.kind() == ErrorKind::InvalidSubcommand {
            if let Some(ContextValue::String(cmd)) = e.get(ContextKind::InvalidSubcommand) {
                return CliError::UnknownCommand(cmd.clone());
            }
        }
        CliError::Usage(e.to_string())
    })
}

/// Parse a non-negative integer literal under the given radix (10 or 16),
/// tagging the error with which field failed for a useful JSON message.
///
/// # Errors
///
/// Returns [`CliError::InvalidIntegerLiteral`] if `value` doesn't parse.
pub fn parse_biguint(
    field: &'static str,
    value: &str,
    radix: u32,
) -> Result<num_bigint::BigUint, CliError> {
    num_bigint::BigUint::parse_bytes(value.as_bytes(), radix).ok_or_else(|| {
        CliError::InvalidIntegerLiteral {
            field,
            value: value.to_string(),
            radix,
        }
    })
}

/// Print a JSON success payload to stdout and exit 0, or print a JSON
/// error payload and exit 1.
pub fn emit_and_exit<T: Serialize>(result: Result<T, CliError>) -> ! {
    match result {
        Ok(value) => {
            match serde_json::to_string_pretty(&value) {
                Ok(json) => println!("{json}"),
                Err(_) => println!("{{\"error\":\"failed to render success payload\"}}"),
            }
            std::process::exit(0);
        }
        Err(err) => {
            println!("{}", error_json(&err));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod test {
    use clap::{Parser, Subcommand};

    use super::{error_json, parse_or_usage_error, CliError};

    #[derive(Parser)]
    #[command(name = "test-cli")]
    struct TestCli {
        #[command(subcommand)]
        command: TestCommand,
    }

    #[derive(Subcommand)]
    enum TestCommand {
        Generate,
    }

    #[test]
    fn test_error_json_shape() {
        let json = error_json(&CliError::MessageTooLarge);
        assert_eq!(json, "{\"error\":\"message is too large for this modulus\"}");
    }

    #[test]
    fn test_unrecognized_subcommand_is_unknown_command() {
        let err = parse_or_usage_error::<TestCli, _, _>(["test-cli", "bogus"]).unwrap_err();
        assert_eq!(err, CliError::UnknownCommand("bogus".to_string()));
    }

    #[test]
    fn test_missing_subcommand_is_a_usage_error() {
        let err = parse_or_usage_error::<TestCli, _, _>(["test-cli"]).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_invalid_integer_literal_message() {
        let err = CliError::InvalidIntegerLiteral {
            field: "n",
            value: "not-a-number".to_string(),
            radix: 10,
        };
        assert!(err.to_string().contains("not-a-number"));
    }
}
