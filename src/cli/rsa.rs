//! JSON payload shapes and command implementations shared by the `rsa`
//! dispatcher and its `rsa_keygen`/`rsa_encrypt`/`rsa_decrypt` split
//! variants.

use num_bigint::BigUint;
use serde::Serialize;

use super::{parse_biguint, CliError};
use crate::rsa::{self, pack_bytes, unpack_bytes, RsaPrivateKey, RsaPublicKey};

#[derive(Serialize)]
pub struct KeyPairOutput {
    #[serde(rename = "publicKey")]
    pub public_key: PublicKeyOutput,
    #[serde(rename = "privateKey")]
    pub private_key: PrivateKeyOutput,
}

#[derive(Serialize)]
pub struct PublicKeyOutput {
    pub n: String,
    pub e: String,
}

#[derive(Serialize)]
pub struct PrivateKeyOutput {
    pub n: String,
    pub d: String,
}

#[derive(Serialize)]
pub struct EncryptOutput {
    pub success: bool,
    pub encrypted: String,
    #[serde(rename = "originalNumber")]
    pub original_number: String,
    #[serde(rename = "originalText")]
    pub original_text: String,
}

#[derive(Serialize)]
pub struct DecryptOutput {
    pub success: bool,
    #[serde(rename = "decryptedNumber")]
    pub decrypted_number: String,
    #[serde(rename = "decryptedText", skip_serializing_if = "Option::is_none")]
    pub decrypted_text: Option<String>,
}

/// `rsa generate` / `rsa_keygen`.
///
/// # Errors
///
/// Returns [`CliError::PrimalityCheckFailed`] if prime generation fails.
pub fn generate() -> Result<KeyPairOutput, CliError> {
    let keypair = rsa::generate_keypair()?;

    Ok(KeyPairOutput {
        public_key: PublicKeyOutput {
            n: keypair.public.n.to_str_radix(10),
            e: keypair.public.e.to_str_radix(10),
        },
        private_key: PrivateKeyOutput {
            n: keypair.private.n.to_str_radix(10),
            d: keypair.private.d.to_str_radix(10),
        },
    })
}

/// `rsa encrypt <message> <n> <e>` / `rsa_encrypt …`.
///
/// `message` is first tried as a base-10 integer literal; if that fails,
/// it is packed as UTF-8 bytes into an integer (see
/// [`crate::rsa::pack_bytes`]).
///
/// # Errors
///
/// Returns [`CliError::InvalidIntegerLiteral`] if `n`/`e` don't parse, or
/// [`CliError::MessageTooLarge`] if the resulting integer is `>= n`.
pub fn encrypt(message: &str, n: &str, e: &str) -> Result<EncryptOutput, CliError> {
    let n = parse_biguint("n", n, 10)?;
    let e = parse_biguint("e", e, 10)?;
    let public_key = RsaPublicKey { n, e };

    let number = BigUint::parse_bytes(message.as_bytes(), 10)
        .unwrap_or_else(|| pack_bytes(message.as_bytes()));

    let encrypted = public_key.encrypt(&number)?;

    Ok(EncryptOutput {
        success: true,
        encrypted: encrypted.to_str_radix(16),
        original_number: number.to_str_radix(10),
        original_text: message.to_string(),
    })
}

/// `rsa decrypt <ciphertext_hex> <n> <d>` / `rsa_decrypt …`.
///
/// # Errors
///
/// Returns [`CliError::InvalidCiphertext`] if `ciphertext_hex` isn't valid
/// hex, or [`CliError::InvalidIntegerLiteral`] if `n`/`d` don't parse.
pub fn decrypt(ciphertext_hex: &str, n: &str, d: &str) -> Result<DecryptOutput, CliError> {
    let n = parse_biguint("n", n, 10)?;
    let d = parse_biguint("d", d, 10)?;
    let private_key = RsaPrivateKey { n, d };

    let ciphertext = BigUint::parse_bytes(ciphertext_hex.as_bytes(), 16)
        .ok_or(CliError::InvalidCiphertext)?;

    let message = private_key.decrypt(&ciphertext);
    let bytes = unpack_bytes(&message);

    let decrypted_text = if rsa::is_printable(&bytes) {
        Some(String::from_utf8_lossy(&bytes).into_owned())
    } else {
        None
    };

    Ok(DecryptOutput {
        success: true,
        decrypted_number: message.to_str_radix(10),
        decrypted_text,
    })
}
