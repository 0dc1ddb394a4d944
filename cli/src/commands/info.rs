//! Show configuration and wallet info

use adls_core::LedgerClient;
use anyhow::Result;
use colored::Colorize;
use solana_sdk::signer::Signer;

use crate::config::{
    derive_meta_keypair, format_meta_address, lamports_to_sol, load_solana_keypair, Settings,
};
use crate::rpc::RpcLedger;

pub fn run(settings: &Settings) -> Result<()> {
    println!();
    println!("{}", "ADLS Configuration".yellow().bold());
    println!();

    println!("{}:", "Config File".cyan());
    if settings.config_path.exists() {
        println!("  {}", settings.config_path.display());
    } else {
        println!("  {} {}", settings.config_path.display(), "(not found, using defaults)".dimmed());
    }
    println!();

    println!("{}:", "RPC Endpoint".cyan());
    println!("  {} ({:?})", settings.rpc_url, settings.commitment.commitment);
    println!();

    println!("{}:", "Registry Program".cyan());
    println!("  {}", settings.registry_program);
    println!();

    println!("{}:", "Scanning".cyan());
    println!("  Default limit: {} transactions", settings.scan_limit);
    println!("  Fee buffer:    {} lamports", settings.fee_buffer_lamports);
    println!();

    let keypair_path = settings.keypair_path()?;
    println!("{}:", "Solana Wallet".cyan());
    match load_solana_keypair(&keypair_path) {
        Ok(wallet) => {
            println!("  Keypair: {}", keypair_path.display());
            println!("  Address: {}", wallet.pubkey());

            let ledger = RpcLedger::new(&settings.rpc_url, settings.commitment);
            if let Ok(balance) = ledger.fetch_balance(&wallet.pubkey()) {
                println!("  Balance: {} SOL", lamports_to_sol(balance));
            }

            let meta = derive_meta_keypair(&wallet)?;
            println!("  Meta-address: {}", format_meta_address(&meta.public_key()));
        }
        Err(_) => {
            println!("  {}", "NOT CONFIGURED".red());
            println!("  Run 'solana-keygen new' to create a wallet");
        }
    }

    Ok(())
}
