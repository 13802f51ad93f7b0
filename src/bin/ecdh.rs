//! `ecdh generate|exchange|compute_shared` — elliptic-curve Diffie-Hellman
//! over the default curve (or custom parameters supplied as trailing
//! positional arguments; see [`classical_pke::cli::ecdh`] for the exact
//! argument-count conventions each action accepts).

use clap::{Parser, Subcommand};

use classical_pke::cli::{self, ecdh as cli_ecdh};

#[derive(Parser)]
#[command(name = "ecdh", about = "Elliptic-curve Diffie-Hellman key exchange")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a key pair, optionally with custom curve parameters
    /// and/or fixed private keys.
    Generate {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run a full two-party exchange and cross-check the shared secret.
    Exchange {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Compute a shared secret from one private scalar and one public
    /// point.
    #[command(name = "compute_shared")]
    ComputeShared {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() {
    let cli = match cli::parse_or_usage_error::<Cli, _, _>(std::env::args()) {
        Ok(cli) => cli,
        Err(err) => cli::emit_and_exit::<()>(Err(err)),
    };

    match cli.command {
        Command::Generate { args } => cli::emit_and_exit(cli_ecdh::generate(&args)),
        Command::Exchange { args } => cli::emit_and_exit(cli_ecdh::exchange(&args)),
        Command::ComputeShared { args } => cli::emit_and_exit(cli_ecdh::compute_shared(&args)),
    }
}
