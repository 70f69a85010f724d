//! Session controller: wallet connection, contract client, fetched objects.
//!
//! Every operation reports failure as a [`SessionError`] and leaves the
//! session usable. Nothing is retried.

use alloy::primitives::{Address, TxHash, U256};
use tracing::{info, warn};

use crate::data::{
    LedgerConfig, LedgerError, MintRequest, ObjectDescriptor, ObjectLedger, PendingMint,
    WalletError, WalletProvider, MINT_PAYMENT_WEI,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no wallet provider detected")]
    ProviderUnavailable,
    #[error("connection rejected: {0}")]
    ConnectionRejected(String),
    #[error("contract not loaded yet")]
    ContractNotReady,
    #[error("failed to load objects: {0}")]
    FetchFailed(String),
    #[error("mint failed: {0}")]
    TransactionFailed(String),
}

impl From<WalletError> for SessionError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Rejected(reason) => SessionError::ConnectionRejected(reason),
        }
    }
}

/// Result of a confirmed mint. The follow-up refresh can fail on its own.
#[derive(Debug)]
pub struct MintOutcome {
    pub tx_hash: TxHash,
    pub refresh: Result<usize, SessionError>,
}

pub struct Session<W, L>
where
    W: WalletProvider,
    L: ObjectLedger<Signer = W::Signer>,
{
    wallet: Option<W>,
    config: LedgerConfig,
    account: Option<Address>,
    contract: Option<L>,
    objects: Vec<ObjectDescriptor>,
}

impl<W, L> Session<W, L>
where
    W: WalletProvider,
    L: ObjectLedger<Signer = W::Signer>,
{
    /// `wallet` is `None` when no provider is present.
    pub fn new(wallet: Option<W>, config: LedgerConfig) -> Self {
        Self {
            wallet,
            config,
            account: None,
            contract: None,
            objects: Vec::new(),
        }
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn is_connected(&self) -> bool {
        self.contract.is_some()
    }

    pub fn objects(&self) -> &[ObjectDescriptor] {
        &self.objects
    }

    /// Request account access and bind the contract client to its signer.
    pub async fn connect(&mut self) -> Result<Address, SessionError> {
        let result = self.try_connect().await;
        match &result {
            Ok(account) => info!(%account, contract = %self.config.contract, "wallet connected"),
            Err(err) => warn!("connection error: {err}"),
        }
        result
    }

    async fn try_connect(&mut self) -> Result<Address, SessionError> {
        let wallet = self
            .wallet
            .as_ref()
            .ok_or(SessionError::ProviderUnavailable)?;

        let accounts = wallet.request_accounts().await?;
        let account = *accounts
            .first()
            .ok_or_else(|| SessionError::ConnectionRejected("no accounts authorized".into()))?;
        let signer = wallet.signer(account)?;
        let contract = L::bind(&self.config, signer)
            .map_err(|err| SessionError::ConnectionRejected(err.to_string()))?;

        self.account = Some(account);
        self.contract = Some(contract);
        Ok(account)
    }

    /// Replace the held objects with the ledger's full list.
    pub async fn fetch_all(&mut self) -> Result<&[ObjectDescriptor], SessionError> {
        let contract = self.contract.as_ref().ok_or_else(|| {
            warn!("fetch requested before the contract was loaded");
            SessionError::ContractNotReady
        })?;

        let raw = contract.get_objects().await.map_err(|err| {
            warn!("fetch error: {err}");
            SessionError::FetchFailed(err.to_string())
        })?;

        self.objects = raw.iter().map(|object| object.to_descriptor()).collect();
        info!(count = self.objects.len(), "objects loaded");
        Ok(&self.objects)
    }

    /// Submit a mint, wait for confirmation, then refresh once.
    pub async fn mint(&mut self, request: &MintRequest) -> Result<MintOutcome, SessionError> {
        let contract = self.contract.as_ref().ok_or_else(|| {
            warn!("mint requested before the contract was loaded");
            SessionError::ContractNotReady
        })?;

        info!(
            name = %request.name,
            w = request.w,
            h = request.h,
            d = request.d,
            x = request.x,
            y = request.y,
            z = request.z,
            "minting object"
        );

        let tx_hash = submit_and_confirm(contract, request).await.map_err(|err| {
            warn!("mint error: {err}");
            SessionError::TransactionFailed(err.to_string())
        })?;
        info!(%tx_hash, "mint confirmed");

        let refresh = self.fetch_all().await.map(|objects| objects.len());
        Ok(MintOutcome { tx_hash, refresh })
    }
}

async fn submit_and_confirm<L: ObjectLedger>(
    contract: &L,
    request: &MintRequest,
) -> Result<TxHash, LedgerError> {
    let pending = contract
        .mint(request, U256::from(MINT_PAYMENT_WEI))
        .await?;
    tracing::debug!(tx_hash = %pending.tx_hash(), "mint submitted");
    pending.confirm().await
}
