//! Minimal prelude for SDK consumers.

pub use crate::config::ViewerConfig;
pub use crate::data::{LedgerConfig, MintRequest, ObjectDescriptor, ObjectLedger, WalletProvider};
pub use crate::render::{BoxGridRenderer, ObjectRenderer};
pub use crate::scene::{LayoutMode, SceneObjects, SceneState};
pub use crate::sdk::ViewerBuilder;
pub use crate::session::{Session, SessionError};
