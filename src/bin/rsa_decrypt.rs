//! `rsa_decrypt <ciphertext_hex> <n> <d>` — equivalent to `rsa decrypt`,
//! as a standalone binary.

use clap::Parser;

use classical_pke::cli::{self, rsa as cli_rsa};

#[derive(Parser)]
#[command(name = "rsa_decrypt", about = "Decrypt a ciphertext under an RSA private key")]
struct Cli {
    ciphertext: String,
    n: String,
    d: String,
}

fn main() {
    let cli = match cli::parse_or_usage_error::<Cli, _, _>(std::env::args()) {
        Ok(cli) => cli,
        Err(err) => cli::emit_and_exit::<()>(Err(err)),
    };

    cli::emit_and_exit(cli_rsa::decrypt(&cli.ciphertext, &cli.n, &cli.d));
}
