//! Configuration, wallet loading and meta-address formatting for the ADLS CLI

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use adls_core::crypto::META_KEY_MESSAGE;
use adls_core::transfer::Recipient;
use adls_core::withdraw::WITHDRAW_FEE_BUFFER_LAMPORTS;
use adls_core::{Logger, MetaKeypair};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

/// Default directory for ADLS settings
const ADLS_DIR: &str = ".adls";
const CONFIG_FILE: &str = "config.json";

/// Text prefix for meta-addresses
pub const META_ADDRESS_PREFIX: &str = "adls:";

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_REGISTRY_PROGRAM_ID: &str = "D8x7uzE1uCRGq55Mbkh39f5xCmMh25khBf7MVdDm3xMr";
pub const DEFAULT_SCAN_LIMIT: usize = 100;

pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Contents of `~/.adls/config.json`; every field is optional on disk
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    pub rpc_url: String,
    pub registry_program_id: String,
    pub scan_limit: usize,
    pub fee_buffer_lamports: u64,
    /// processed | confirmed | finalized
    pub commitment: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            registry_program_id: DEFAULT_REGISTRY_PROGRAM_ID.to_string(),
            scan_limit: DEFAULT_SCAN_LIMIT,
            fee_buffer_lamports: WITHDRAW_FEE_BUFFER_LAMPORTS,
            commitment: "confirmed".to_string(),
        }
    }
}

/// Values resolved from flags, config file and defaults, in that order
#[derive(Debug, Clone)]
pub struct Settings {
    pub rpc_url: String,
    pub keypair_path: Option<PathBuf>,
    pub config_path: PathBuf,
    pub registry_program: Pubkey,
    pub scan_limit: usize,
    pub fee_buffer_lamports: u64,
    pub commitment: CommitmentConfig,
    pub logger: Logger,
}

/// Get the ADLS directory path
pub fn adls_dir() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("Could not find home directory")?
        .join(ADLS_DIR))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(adls_dir()?.join(CONFIG_FILE))
}

pub fn default_keypair_path() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("Could not find home directory")?
        .join(".config")
        .join("solana")
        .join("id.json"))
}

/// Load config from disk; a missing file yields defaults
pub fn load_config(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: CliConfig = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

pub fn parse_commitment(level: &str) -> Result<CommitmentConfig> {
    let commitment = CommitmentLevel::from_str(level)
        .map_err(|_| anyhow::anyhow!("Unknown commitment level '{}'", level))?;
    Ok(CommitmentConfig { commitment })
}

impl Settings {
    pub fn resolve(
        rpc_url: Option<String>,
        keypair: Option<String>,
        config_path: Option<String>,
        verbose: bool,
    ) -> Result<Self> {
        let config_path = match config_path {
            Some(p) => PathBuf::from(p),
            None => default_config_path()?,
        };
        let config = load_config(&config_path)?;

        let registry_program = config
            .registry_program_id
            .parse()
            .with_context(|| format!("Invalid registry program id '{}'", config.registry_program_id))?;

        Ok(Self {
            rpc_url: rpc_url.unwrap_or(config.rpc_url),
            keypair_path: keypair.map(PathBuf::from),
            config_path,
            registry_program,
            scan_limit: config.scan_limit,
            fee_buffer_lamports: config.fee_buffer_lamports,
            commitment: parse_commitment(&config.commitment)?,
            logger: if verbose { Logger::verbose() } else { Logger::silent() },
        })
    }

    pub fn keypair_path(&self) -> Result<PathBuf> {
        match &self.keypair_path {
            Some(p) => Ok(p.clone()),
            None => default_keypair_path(),
        }
    }
}

/// Load a Solana keypair file (JSON byte array)
pub fn load_solana_keypair(path: &Path) -> Result<Keypair> {
    if !path.exists() {
        bail!(
            "Solana keypair not found at {:?}. Generate one with 'solana-keygen new' or specify path with --keypair",
            path
        );
    }

    let keypair_json = fs::read_to_string(path)?;
    let bytes: Vec<u8> = serde_json::from_str(&keypair_json).context("Keypair file is not a JSON byte array")?;
    let keypair = Keypair::from_bytes(&bytes).context("Invalid keypair bytes")?;

    Ok(keypair)
}

/// Meta keypair for a wallet: the wallet signs a fixed message and the
/// signature seeds the meta secret
pub fn derive_meta_keypair(wallet: &Keypair) -> Result<MetaKeypair> {
    let signature = wallet.sign_message(META_KEY_MESSAGE);
    MetaKeypair::from_signature(signature.as_ref()).context("Failed to derive meta key")
}

/// Format a meta public key for display
pub fn format_meta_address(meta_pubkey: &[u8; 32]) -> String {
    format!("{}{}", META_ADDRESS_PREFIX, bs58::encode(meta_pubkey).into_string())
}

/// Parse a meta-address: `adls:<base58>`, bare base58, or 64 hex characters
pub fn parse_meta_address(input: &str) -> Result<[u8; 32]> {
    let input = input.trim();
    let encoded = input.strip_prefix(META_ADDRESS_PREFIX).unwrap_or(input);

    let bytes = if encoded.len() == 64 && encoded.chars().all(|c| c.is_ascii_hexdigit()) {
        hex::decode(encoded)?
    } else {
        bs58::decode(encoded).into_vec().context("Meta-address is not valid base58")?
    };

    if bytes.len() != 32 {
        bail!("Invalid meta-address length: expected 32 bytes, got {}", bytes.len());
    }

    let mut meta_pubkey = [0u8; 32];
    meta_pubkey.copy_from_slice(&bytes);
    Ok(meta_pubkey)
}

/// `adls:` or hex means a meta public key; a bare base58 key is a wallet
/// whose meta public key lives in the registry
pub fn parse_recipient(input: &str) -> Result<Recipient> {
    let input = input.trim();
    if input.starts_with(META_ADDRESS_PREFIX) || input.len() == 64 {
        return Ok(Recipient::MetaPubkey(parse_meta_address(input)?));
    }

    let owner: Pubkey = input
        .parse()
        .context("Recipient is neither a meta-address nor a wallet address")?;
    Ok(Recipient::Registered(owner))
}

pub fn parse_sol_amount(sol: f64) -> Result<u64> {
    if !sol.is_finite() || sol <= 0.0 {
        bail!("Amount must be a positive number of SOL");
    }
    Ok((sol * LAMPORTS_PER_SOL).round() as u64)
}

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL
}
