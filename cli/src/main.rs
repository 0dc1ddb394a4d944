//! ADLS CLI - Command line interface for single-key stealth payments

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod rpc;


use commands::*;
use config::Settings;

#[derive(Parser)]
#[command(name = "adls")]
#[command(version = "0.1.0")]
#[command(about = "Single-key stealth addresses for Solana")]
#[command(long_about = r#"
ADLS enables private payments on Solana using one-time stealth addresses.

Your meta-address is derived from your wallet. Senders pay a fresh address
for every payment and announce it in a memo; only you can find and spend
those payments.

Quick Start:
  1. adls address           Show your meta-address
  2. adls send              Pay someone's meta-address
  3. adls scan              Check for incoming payments
  4. adls withdraw          Move received funds to your wallet
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Solana RPC URL (overrides the config file)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Path to keypair file
    #[arg(long, global = true)]
    keypair: Option<String>,

    /// Path to config file (default: ~/.adls/config.json)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Emit protocol events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show your stealth meta-address
    Address,

    /// Send SOL to a stealth meta-address
    Send {
        /// Recipient: meta-address (adls:... or hex) or a registered wallet address
        #[arg(short, long)]
        to: String,

        /// Amount of SOL to send
        #[arg(short, long)]
        amount: f64,
    },

    /// Scan for incoming stealth payments
    Scan {
        /// Number of recent memo transactions to examine
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show total balance across matched stealth addresses
    Balance {
        /// Number of recent memo transactions to examine
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Withdraw funds received in a stealth payment
    Withdraw {
        /// Signature of the payment transaction (from scan results)
        #[arg(short, long)]
        signature: String,

        /// Destination address (default: your main wallet)
        #[arg(short, long)]
        to: Option<String>,

        /// Amount to withdraw in SOL (default: full balance)
        #[arg(short, long)]
        amount: Option<f64>,
    },

    /// Show configuration and wallet info
    Info,
}

fn init_logging(verbose: bool) {
    if !verbose {
        return;
    }
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("adls_core=debug,adls=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::resolve(cli.rpc_url, cli.keypair, cli.config, cli.verbose)?;

    match cli.command {
        Commands::Address => {
            address::run(&settings)?;
        }
        Commands::Send { to, amount } => {
            send::run(&settings, &to, amount).await?;
        }
        Commands::Scan { limit } => {
            scan::run(&settings, limit).await?;
        }
        Commands::Balance { limit } => {
            balance::run(&settings, limit).await?;
        }
        Commands::Withdraw { signature, to, amount } => {
            withdraw::run(&settings, &signature, to.as_deref(), amount).await?;
        }
        Commands::Info => {
            info::run(&settings)?;
        }
    }

    Ok(())
}
