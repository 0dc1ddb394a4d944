//! Scan the memo stream for incoming stealth payments

use adls_core::{ScanReport, Scanner, StealthTransaction};
use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use colored::Colorize;

use crate::config::{derive_meta_keypair, lamports_to_sol, load_solana_keypair, Settings};
use crate::rpc::RpcLedger;

pub fn format_block_time(block_time: Option<i64>) -> String {
    block_time
        .and_then(|t| Utc.timestamp_opt(t, 0).single())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn print_payment(index: usize, payment: &StealthTransaction) {
    println!("{}. {}", index + 1, "Payment".yellow());
    println!("   Signature: {}", payment.signature);
    println!("   Address:   {}", payment.stealth_address);
    println!("   Received:  {} SOL", lamports_to_sol(payment.amount));
    println!("   Time:      {}", format_block_time(payment.block_time));
    println!();
}

pub fn print_skipped(report: &ScanReport) {
    if !report.skipped.is_empty() {
        println!(
            "{}",
            format!("Skipped {} transaction(s) that could not be fetched", report.skipped.len()).dimmed()
        );
    }
}

pub async fn run(settings: &Settings, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(settings.scan_limit);
    println!("{}", "Scanning for incoming stealth payments...".cyan());

    let wallet = load_solana_keypair(&settings.keypair_path()?)?;
    let meta = derive_meta_keypair(&wallet)?;
    let ledger = RpcLedger::new(&settings.rpc_url, settings.commitment);

    println!("Checking the {} most recent memo transactions...", limit);
    let report = Scanner::new(&ledger, &meta, settings.logger)
        .scan_report(limit)
        .context("Scan failed")?;

    print_skipped(&report);
    println!();

    if report.matches.is_empty() {
        println!("{}", "No incoming payments found.".yellow());
        println!(
            "{}",
            "Try a larger --limit to look further back.".dimmed()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} payment(s):", report.matches.len()).green().bold()
    );
    println!();

    for (i, payment) in report.matches.iter().enumerate() {
        print_payment(i, payment);
    }

    let total: u64 = report.matches.iter().map(|p| p.amount).sum();
    println!(
        "{}",
        format!("Total received: {} SOL", lamports_to_sol(total)).green().bold()
    );
    println!();
    println!(
        "{}",
        "Use 'adls withdraw --signature <signature>' to withdraw funds.".dimmed()
    );

    Ok(())
}
