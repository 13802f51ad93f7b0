//! `rsa generate|encrypt|decrypt` — a single dispatcher over the three
//! RSA operations. See [`rsa_keygen`], [`rsa_encrypt`], [`rsa_decrypt`]
//! for the equivalent split binaries.

use clap::{Parser, Subcommand};

use classical_pke::cli::{self, rsa as cli_rsa};

#[derive(Parser)]
#[command(name = "rsa", about = "Textbook RSA: generate, encrypt, decrypt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a fresh key pair.
    Generate,
    /// Encrypt a message (decimal integer or text) under a public key.
    Encrypt { message: String, n: String, e: String },
    /// Decrypt a hex ciphertext under a private key.
    Decrypt { ciphertext: String, n: String, d: String },
}

fn main() {
    let cli = match cli::parse_or_usage_error::<Cli, _, _>(std::env::args()) {
        Ok(cli) => cli,
        Err(err) => cli::emit_and_exit::<()>(Err(err)),
    };

    match cli.command {
        Command::Generate => cli::emit_and_exit(cli_rsa::generate()),
        Command::Encrypt { message, n, e } => {
            cli::emit_and_exit(cli_rsa::encrypt(&message, &n, &e));
        }
        Command::Decrypt { ciphertext, n, d } => {
            cli::emit_and_exit(cli_rsa::decrypt(&ciphertext, &n, &d));
        }
    }
}
