mod channel;
pub mod evm;
mod model;
pub mod wallet;

use std::future::Future;

use alloy::primitives::{Address, TxHash, U256};
use alloy_chains::Chain;
use url::Url;

pub use channel::{SessionChannel, SessionCommand, SessionEvent, SessionWorker};
pub use model::{signed_to_f64, unsigned_to_f64, LedgerObject, MintRequest, ObjectDescriptor};

/// Fixed payment attached to every mint, in wei.
pub const MINT_PAYMENT_WEI: u64 = 1;

/// Where the object contract lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    pub chain: Chain,
    pub rpc_url: Url,
    pub contract: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("wallet rejected the request: {0}")]
    Rejected(String),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("failed to bind contract client: {0}")]
    Bind(String),
    #[error("contract call failed: {0}")]
    Call(String),
    #[error("cannot encode {field}: {reason}")]
    Encode { field: &'static str, reason: String },
    #[error("transaction submission failed: {0}")]
    Submit(String),
    #[error("transaction confirmation failed: {0}")]
    Confirmation(String),
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
}

/// Account access and signing, the way an injected browser wallet exposes them.
pub trait WalletProvider: Send + Sync + 'static {
    type Signer: Clone + Send + Sync + 'static;

    fn request_accounts(&self) -> impl Future<Output = Result<Vec<Address>, WalletError>> + Send;

    fn signer(&self, account: Address) -> Result<Self::Signer, WalletError>;
}

/// A transaction that has been submitted but not yet mined.
pub trait PendingMint: Send {
    fn tx_hash(&self) -> TxHash;

    /// Wait for the receipt. A reverted receipt is an error.
    fn confirm(self) -> impl Future<Output = Result<TxHash, LedgerError>> + Send;
}

/// Client for the object contract, bound to a signer.
pub trait ObjectLedger: Sized + Send + Sync + 'static {
    type Signer;
    type Pending: PendingMint;

    fn bind(config: &LedgerConfig, signer: Self::Signer) -> Result<Self, LedgerError>;

    fn get_objects(&self) -> impl Future<Output = Result<Vec<LedgerObject>, LedgerError>> + Send;

    fn mint(
        &self,
        request: &MintRequest,
        payment: U256,
    ) -> impl Future<Output = Result<Self::Pending, LedgerError>> + Send;
}
