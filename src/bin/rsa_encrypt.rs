//! `rsa_encrypt <message> <n> <e>` — equivalent to `rsa encrypt`, as a
//! standalone binary.

use clap::Parser;

use classical_pke::cli::{self, rsa as cli_rsa};

#[derive(Parser)]
#[command(name = "rsa_encrypt", about = "Encrypt a message under an RSA public key")]
struct Cli {
    message: String,
    n: String,
    e: String,
}

fn main() {
    let cli = match cli::parse_or_usage_error::<Cli, _, _>(std::env::args()) {
        Ok(cli) => cli,
        Err(err) => cli::emit_and_exit::<()>(Err(err)),
    };

    cli::emit_and_exit(cli_rsa::encrypt(&cli.message, &cli.n, &cli.e));
}
