//! Wallet persistence
//!
//! The controller never saves wallets itself; it only marks records dirty.
//! This module stores wallet files and clears dirty flags once a save has
//! succeeded.

/// Wallet store trait and file-based implementation
pub mod repositories;
/// Dirty-wallet save pass
pub mod service;

pub use repositories::{FileWalletStore, WalletStore};
pub use service::{PersistenceService, SaveReport};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}
