use crate::model::WalletHandle;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a transaction reported by the network service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionRef {
	pub hash: String,
}

impl TransactionRef {
	pub fn new(hash: impl Into<String>) -> Self {
		Self { hash: hash.into() }
	}
}

impl fmt::Display for TransactionRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.hash)
	}
}

/// Public key added to a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRef {
	pub public_key: Vec<u8>,
}

impl fmt::Display for KeyRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "pub:{}", hex::encode(&self.public_key))
	}
}

/// Wallet and transaction lifecycle callbacks delivered by the network
/// service, possibly from a thread other than the foreground one.
///
/// A `None` wallet marks a malformed event; the relay drops it.
#[derive(Debug, Clone)]
pub enum NetworkEvent {
	CoinsReceived {
		wallet: Option<WalletHandle>,
		transaction: TransactionRef,
		prev_balance: u128,
		new_balance: u128,
	},
	CoinsSent {
		wallet: Option<WalletHandle>,
		transaction: TransactionRef,
		prev_balance: u128,
		new_balance: u128,
	},
	TransactionConfidenceChanged {
		wallet: Option<WalletHandle>,
		transaction: TransactionRef,
	},
	WalletChanged {
		wallet: Option<WalletHandle>,
	},
	Reorganize {
		wallet: Option<WalletHandle>,
	},
	BlockDownloaded,
	KeyAdded {
		key: KeyRef,
	},
}

impl NetworkEvent {
	/// Short name used in log lines
	pub fn kind(&self) -> &'static str {
		match self {
			NetworkEvent::CoinsReceived { .. } => "coins_received",
			NetworkEvent::CoinsSent { .. } => "coins_sent",
			NetworkEvent::TransactionConfidenceChanged { .. } => "confidence_changed",
			NetworkEvent::WalletChanged { .. } => "wallet_changed",
			NetworkEvent::Reorganize { .. } => "reorganize",
			NetworkEvent::BlockDownloaded => "block_downloaded",
			NetworkEvent::KeyAdded { .. } => "key_added",
		}
	}
}
