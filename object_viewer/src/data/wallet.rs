//! Local-key wallet: the native stand-in for a browser-injected provider.

use std::str::FromStr;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use alloy_chains::Chain;

use crate::data::{WalletError, WalletProvider};

/// Wallet backed by a hex private key. The key is parsed when account
/// access is requested, so a bad key surfaces as a rejected connection.
pub struct LocalWallet {
    key: String,
    chain: Chain,
}

impl LocalWallet {
    pub fn new(key: impl Into<String>, chain: Chain) -> Self {
        Self {
            key: key.into(),
            chain,
        }
    }

    /// `None` when no key is configured, i.e. no provider is present.
    pub fn from_key(key: Option<&str>, chain: Chain) -> Option<Self> {
        key.filter(|k| !k.trim().is_empty())
            .map(|k| Self::new(k.trim(), chain))
    }

    fn parse_signer(&self) -> Result<PrivateKeySigner, WalletError> {
        let signer = PrivateKeySigner::from_str(&self.key)
            .map_err(|err| WalletError::Rejected(format!("invalid private key: {err}")))?;
        Ok(signer.with_chain_id(Some(self.chain.id())))
    }
}

impl WalletProvider for LocalWallet {
    type Signer = PrivateKeySigner;

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(vec![self.parse_signer()?.address()])
    }

    fn signer(&self, account: Address) -> Result<PrivateKeySigner, WalletError> {
        let signer = self.parse_signer()?;
        if signer.address() != account {
            return Err(WalletError::Rejected(format!(
                "no key for account {account}"
            )));
        }
        Ok(signer)
    }
}
