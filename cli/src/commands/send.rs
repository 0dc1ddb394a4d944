//! Send SOL to a stealth meta-address

use adls_core::transfer::{resolve_recipient, send_stealth_payment, Recipient};
use anyhow::{Context, Result};
use colored::Colorize;
use solana_sdk::signer::Signer;

use crate::config::{
    format_meta_address, lamports_to_sol, load_solana_keypair, parse_recipient, parse_sol_amount,
    Settings,
};
use crate::rpc::RpcLedger;

pub async fn run(settings: &Settings, recipient: &str, amount_sol: f64) -> Result<()> {
    println!("{}", "Preparing stealth payment...".cyan());

    let lamports = parse_sol_amount(amount_sol)?;
    let recipient = parse_recipient(recipient)?;
    let payer = load_solana_keypair(&settings.keypair_path()?)?;
    let ledger = RpcLedger::new(&settings.rpc_url, settings.commitment);

    if let Recipient::Registered(owner) = recipient {
        println!("Looking up registered meta-address for {}...", owner);
    }
    let meta_pubkey = resolve_recipient(&ledger, &settings.registry_program, &recipient, settings.logger)
        .context("Could not resolve recipient")?;
    println!("Recipient:       {}", format_meta_address(&meta_pubkey));

    println!("Sending {} SOL from {}...", lamports_to_sol(lamports), payer.pubkey());
    let sent = send_stealth_payment(&ledger, &payer, &meta_pubkey, lamports, settings.logger)
        .context("Failed to send stealth payment")?;

    println!();
    println!("{}", "Payment sent successfully!".green().bold());
    println!();
    println!("Transaction:  {}", sent.signature);
    println!("Amount:       {} SOL", lamports_to_sol(sent.amount));
    println!("Stealth addr: {}", sent.stealth_address);
    println!("Memo:         {}", sent.memo);
    println!();
    println!(
        "{}",
        "The recipient can find this payment with 'adls scan'.".dimmed()
    );

    Ok(())
}
