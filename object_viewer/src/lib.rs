//! On-chain 3D object viewer — minted objects as boxes in an orbitable scene.
//!
//! Library root: data, session, scene, and SDK builder modules.

mod camera;
pub mod config;
pub mod data;
pub mod render;
pub mod scene;
pub mod session;
mod ui;

pub mod prelude;
pub mod sdk;

pub use data::evm::EvmObjectLedger;
pub use data::wallet::LocalWallet;
pub use data::{
    LedgerConfig, MintRequest, ObjectDescriptor, ObjectLedger, SessionChannel, SessionCommand,
    SessionEvent, SessionWorker, WalletProvider,
};
pub use session::{Session, SessionError};
