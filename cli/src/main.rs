use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod export;
mod inspect;
mod output;
mod utils;

use error::Result;

#[derive(Parser)]
#[command(name = "sshrsa")]
#[command(about = "OpenSSH RSA public key toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an id_rsa.pub style key and show its components
    Inspect {
        #[command(flatten)]
        config: inspect::Config,
    },
    /// Convert an OpenSSH public key to PKCS#1, SubjectPublicKeyInfo or OpenSSH
    Export {
        #[command(flatten)]
        config: export::Config,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { config } => inspect::execute(config)?,
        Commands::Export { config } => export::execute(config)?,
    }

    Ok(())
}
