//! Withdraw funds from a stealth address

use adls_core::withdraw::execute_withdrawal;
use adls_core::{recover, Scanner};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use solana_sdk::{pubkey::Pubkey, signature::Signature, signer::Signer};

use crate::config::{
    derive_meta_keypair, lamports_to_sol, load_solana_keypair, parse_sol_amount, Settings,
};
use crate::rpc::RpcLedger;

pub async fn run(
    settings: &Settings,
    signature: &str,
    to_address: Option<&str>,
    amount: Option<f64>,
) -> Result<()> {
    println!("{}", "Preparing withdrawal...".cyan());

    let signature: Signature = signature.parse().context("Invalid transaction signature")?;
    let requested = amount.map(parse_sol_amount).transpose()?;

    let wallet = load_solana_keypair(&settings.keypair_path()?)?;
    let meta = derive_meta_keypair(&wallet)?;

    // Default destination is the main wallet
    let destination: Pubkey = match to_address {
        Some(addr) => addr.parse().context("Invalid destination address")?,
        None => wallet.pubkey(),
    };

    let ledger = RpcLedger::new(&settings.rpc_url, settings.commitment);
    let scanner = Scanner::new(&ledger, &meta, settings.logger);

    let payment = match scanner.inspect(&signature).context("Failed to inspect transaction")? {
        Some(payment) => payment,
        None => bail!(
            "Transaction {} is not a stealth payment to your meta-address",
            signature
        ),
    };
    println!(
        "Found payment: {} SOL to {}",
        lamports_to_sol(payment.amount),
        payment.stealth_address
    );

    let withdrawable = recover(&payment, &meta).context("Could not recover the spending key")?;

    println!();
    println!("Withdrawing to {}...", destination);
    let done = execute_withdrawal(
        &ledger,
        &withdrawable,
        &destination,
        requested,
        settings.fee_buffer_lamports,
        settings.logger,
    )
    .context("Withdrawal failed")?;

    println!();
    println!("{}", "Withdrawal successful!".green().bold());
    println!();
    println!("Transaction: {}", done.signature);
    println!("Amount:      {} SOL", lamports_to_sol(done.amount));
    println!("From:        {}", done.source);
    println!("To:          {}", done.destination);

    Ok(())
}
