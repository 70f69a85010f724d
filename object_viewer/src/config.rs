//! Env parsing and constants.

use std::fmt;

use alloy::primitives::{address, Address};
use alloy_chains::Chain;
use url::Url;

use crate::data::LedgerConfig;
use crate::scene::LayoutMode;

const RPC_URL_VAR: &str = "RPC_URL";
const CONTRACT_VAR: &str = "CONTRACT_ADDRESS";
const CHAIN_ID_VAR: &str = "CHAIN_ID";
const WALLET_KEY_VAR: &str = "WALLET_PRIVATE_KEY";
const LAYOUT_VAR: &str = "OBJECT_LAYOUT";

const DEFAULT_RPC: &str = "http://127.0.0.1:8545";
const DEFAULT_CONTRACT: Address = address!("3284C53B6F151B418849671D967be11FD6093495");
/// Anvil's default chain id.
const DEFAULT_CHAIN_ID: u64 = 31337;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL in {var}: {value:?}: {source}")]
    Url {
        var: &'static str,
        value: String,
        source: url::ParseError,
    },
    #[error("invalid address in {var}: {value:?}")]
    Address { var: &'static str, value: String },
    #[error("invalid chain id in {var}: {value:?}")]
    ChainId { var: &'static str, value: String },
    #[error("invalid layout in {var}: {value:?} (expected \"grid\" or \"stored\")")]
    Layout { var: &'static str, value: String },
}

/// Everything the viewer reads from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub ledger: LedgerConfig,
    pub wallet_key: Option<String>,
    pub layout: LayoutMode,
}

// Keeps the private key out of logs.
impl fmt::Debug for ViewerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerConfig")
            .field("ledger", &self.ledger)
            .field("wallet_key", &self.wallet_key.as_ref().map(|_| "<redacted>"))
            .field("layout", &self.layout)
            .finish()
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig {
                chain: Chain::from_id(DEFAULT_CHAIN_ID),
                rpc_url: Url::parse(DEFAULT_RPC).expect("default RPC URL is valid"),
                contract: DEFAULT_CONTRACT,
            },
            wallet_key: None,
            layout: LayoutMode::AutoGrid,
        }
    }
}

impl ViewerConfig {
    /// Read configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = env_value(RPC_URL_VAR) {
            config.ledger.rpc_url = raw.parse::<Url>().map_err(|source| ConfigError::Url {
                var: RPC_URL_VAR,
                value: raw.clone(),
                source,
            })?;
        }
        if let Some(raw) = env_value(CONTRACT_VAR) {
            config.ledger.contract = raw.parse::<Address>().map_err(|_| ConfigError::Address {
                var: CONTRACT_VAR,
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = env_value(CHAIN_ID_VAR) {
            let id = raw.parse::<u64>().map_err(|_| ConfigError::ChainId {
                var: CHAIN_ID_VAR,
                value: raw.clone(),
            })?;
            config.ledger.chain = Chain::from_id(id);
        }
        if let Some(raw) = env_value(LAYOUT_VAR) {
            config.layout = parse_layout(&raw).ok_or(ConfigError::Layout {
                var: LAYOUT_VAR,
                value: raw,
            })?;
        }
        config.wallet_key = env_value(WALLET_KEY_VAR);

        Ok(config)
    }
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_layout(raw: &str) -> Option<LayoutMode> {
    match raw.to_ascii_lowercase().as_str() {
        "grid" | "auto" => Some(LayoutMode::AutoGrid),
        "stored" => Some(LayoutMode::Stored),
        _ => None,
    }
}
