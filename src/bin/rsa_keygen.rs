//! `rsa_keygen` — equivalent to `rsa generate`, as a standalone binary.

use clap::Parser;

use classical_pke::cli::{self, rsa as cli_rsa};

#[derive(Parser)]
#[command(name = "rsa_keygen", about = "Generate a textbook RSA key pair")]
struct Cli;

fn main() {
    let _cli = match cli::parse_or_usage_error::<Cli, _, _>(std::env::args()) {
        Ok(cli) => cli,
        Err(err) => cli::emit_and_exit::<()>(Err(err)),
    };

    cli::emit_and_exit(cli_rsa::generate());
}
