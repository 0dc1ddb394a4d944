//! Show total balance across matched stealth addresses

use adls_core::{LedgerClient, Scanner};
use anyhow::{Context, Result};
use colored::Colorize;
use solana_sdk::pubkey::Pubkey;

use crate::commands::scan::print_skipped;
use crate::config::{derive_meta_keypair, lamports_to_sol, load_solana_keypair, Settings};
use crate::rpc::RpcLedger;

pub async fn run(settings: &Settings, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(settings.scan_limit);
    println!("{}", "Calculating total stealth balance...".cyan());

    let wallet = load_solana_keypair(&settings.keypair_path()?)?;
    let meta = derive_meta_keypair(&wallet)?;
    let ledger = RpcLedger::new(&settings.rpc_url, settings.commitment);

    let report = Scanner::new(&ledger, &meta, settings.logger)
        .scan_report(limit)
        .context("Scan failed")?;
    print_skipped(&report);

    let mut addresses: Vec<(Pubkey, u64)> = Vec::new();
    for payment in &report.matches {
        if addresses.iter().any(|(a, _)| *a == payment.stealth_address) {
            continue;
        }
        let balance = ledger
            .fetch_balance(&payment.stealth_address)
            .with_context(|| format!("Failed to fetch balance of {}", payment.stealth_address))?;
        addresses.push((payment.stealth_address, balance));
    }

    let total_balance: u64 = addresses.iter().map(|(_, b)| b).sum();
    let funded = addresses.iter().filter(|(_, b)| *b > 0).count();

    println!();
    println!("{}", "Stealth Balance Summary".yellow().bold());
    println!();
    for (address, balance) in &addresses {
        let status = if *balance > 0 {
            "AVAILABLE".green()
        } else {
            "WITHDRAWN".dimmed()
        };
        println!("  {} {} SOL [{}]", address, lamports_to_sol(*balance), status);
    }
    if !addresses.is_empty() {
        println!();
    }
    println!(
        "{}",
        format!(
            "Total available: {} SOL ({} of {} address(es))",
            lamports_to_sol(total_balance),
            funded,
            addresses.len()
        )
        .green()
        .bold()
    );

    Ok(())
}
