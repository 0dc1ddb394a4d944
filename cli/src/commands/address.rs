//! Display the wallet's meta-address

use anyhow::Result;
use colored::Colorize;
use solana_sdk::signer::Signer;

use crate::config::{derive_meta_keypair, format_meta_address, load_solana_keypair, Settings};

pub fn run(settings: &Settings) -> Result<()> {
    let wallet = load_solana_keypair(&settings.keypair_path()?)?;
    let meta = derive_meta_keypair(&wallet)?;

    println!();
    println!("{}", "Your Stealth Meta-Address".yellow().bold());
    println!();
    println!("{}", format_meta_address(&meta.public_key()));
    println!();
    println!("{}:", "Details".dimmed());
    println!("  Wallet:       {}", wallet.pubkey());
    println!("  Meta pubkey:  {}", hex::encode(meta.public_key()));
    println!();
    println!(
        "{}",
        "Share the meta-address above to receive private payments.".dimmed()
    );
    println!(
        "{}",
        "It is derived from your wallet signature; the same wallet always yields the same address."
            .dimmed()
    );

    Ok(())
}
