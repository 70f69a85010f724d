//! Object contract client: alloy `sol!` binding over an HTTP provider.

use alloy::network::{Ethereum, EthereumWallet, ReceiptResponse};
use alloy::primitives::{TxHash, I256, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;

use crate::data::model::{LedgerObject, MintRequest};
use crate::data::{LedgerConfig, LedgerError, ObjectLedger, PendingMint};

sol! {
    #[sol(rpc)]
    contract MetaverseObjects {
        struct Object3D {
            string name;
            uint256 w;
            uint256 h;
            uint256 d;
            int256 x;
            int256 y;
            int256 z;
        }

        function getObjects() external view returns (Object3D[] memory);

        function mint(
            string name,
            uint256 w,
            uint256 h,
            uint256 d,
            int256 x,
            int256 y,
            int256 z
        ) external payable;
    }
}

/// Object contract client signing with a local key.
pub struct EvmObjectLedger {
    contract: MetaverseObjects::MetaverseObjectsInstance<DynProvider>,
}

impl ObjectLedger for EvmObjectLedger {
    type Signer = PrivateKeySigner;
    type Pending = EvmPendingMint;

    fn bind(config: &LedgerConfig, signer: PrivateKeySigner) -> Result<Self, LedgerError> {
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(config.rpc_url.clone())
            .erased();
        Ok(Self {
            contract: MetaverseObjects::new(config.contract, provider),
        })
    }

    async fn get_objects(&self) -> Result<Vec<LedgerObject>, LedgerError> {
        let objects = self
            .contract
            .getObjects()
            .call()
            .await
            .map_err(|err| LedgerError::Call(err.to_string()))?;
        Ok(objects.into_iter().map(object_from_call).collect())
    }

    async fn mint(
        &self,
        request: &MintRequest,
        payment: U256,
    ) -> Result<EvmPendingMint, LedgerError> {
        let pending = self
            .contract
            .mint(
                request.name.clone(),
                encode_dimension("w", request.w)?,
                encode_dimension("h", request.h)?,
                encode_dimension("d", request.d)?,
                encode_coordinate("x", request.x)?,
                encode_coordinate("y", request.y)?,
                encode_coordinate("z", request.z)?,
            )
            .value(payment)
            .send()
            .await
            .map_err(|err| LedgerError::Submit(err.to_string()))?;
        Ok(EvmPendingMint(pending))
    }
}

/// A submitted mint transaction awaiting its receipt.
pub struct EvmPendingMint(PendingTransactionBuilder<Ethereum>);

impl PendingMint for EvmPendingMint {
    fn tx_hash(&self) -> TxHash {
        *self.0.tx_hash()
    }

    async fn confirm(self) -> Result<TxHash, LedgerError> {
        let receipt = self
            .0
            .get_receipt()
            .await
            .map_err(|err| LedgerError::Confirmation(err.to_string()))?;
        if !receipt.status() {
            return Err(LedgerError::Reverted(receipt.transaction_hash));
        }
        Ok(receipt.transaction_hash)
    }
}

fn object_from_call(object: MetaverseObjects::Object3D) -> LedgerObject {
    LedgerObject {
        name: object.name,
        w: object.w,
        h: object.h,
        d: object.d,
        x: object.x,
        y: object.y,
        z: object.z,
    }
}

fn encode_dimension(field: &'static str, value: i64) -> Result<U256, LedgerError> {
    u64::try_from(value)
        .map(U256::from)
        .map_err(|_| LedgerError::Encode {
            field,
            reason: format!("{value} is negative"),
        })
}

fn encode_coordinate(field: &'static str, value: i64) -> Result<I256, LedgerError> {
    I256::try_from(value).map_err(|err| LedgerError::Encode {
        field,
        reason: err.to_string(),
    })
}
