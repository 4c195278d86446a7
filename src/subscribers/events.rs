//! Notifications delivered to display subscribers and busy listeners.
//!
//! Subscribers are capabilities: anything implementing [`DisplaySubscriber`]
//! can be registered with the controller. A subscriber that returns an error
//! or panics only loses its own delivery; the rest of the fan-out continues.

use crate::model::{WalletHandle, WalletRecord};
use crate::network::TransactionRef;

use std::sync::Arc;

/// Events fanned out to every registered display subscriber.
#[derive(Debug, Clone)]
pub enum DisplayEvent {
	CoinsReceived {
		wallet: WalletHandle,
		transaction: TransactionRef,
		prev_balance: u128,
		new_balance: u128,
	},
	CoinsSent {
		wallet: WalletHandle,
		transaction: TransactionRef,
		prev_balance: u128,
		new_balance: u128,
	},
	TransactionConfidenceChanged {
		wallet: WalletHandle,
		transaction: TransactionRef,
	},
	Reorganize {
		wallet: WalletHandle,
	},
	BlockDownloaded,
	/// Generic "something changed, redraw" notification.
	DataChanged,
	/// Wallet files were modified by another process.
	FilesChangedExternally {
		record: Arc<WalletRecord>,
	},
}

impl DisplayEvent {
	pub fn kind(&self) -> &'static str {
		match self {
			DisplayEvent::CoinsReceived { .. } => "coins_received",
			DisplayEvent::CoinsSent { .. } => "coins_sent",
			DisplayEvent::TransactionConfidenceChanged { .. } => "confidence_changed",
			DisplayEvent::Reorganize { .. } => "reorganize",
			DisplayEvent::BlockDownloaded => "block_downloaded",
			DisplayEvent::DataChanged => "data_changed",
			DisplayEvent::FilesChangedExternally { .. } => "files_changed_externally",
		}
	}
}

/// Error returned by a subscriber that failed to handle a notification
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
	#[error("Subscriber failed: {0}")]
	Failed(String),

	#[error("Subscriber panicked")]
	Panicked,
}

/// A sink for display notifications.
pub trait DisplaySubscriber: Send + Sync {
	/// Handle one notification.
	fn on_event(&self, event: &DisplayEvent) -> Result<(), SubscriberError>;

	/// Name used in log lines.
	fn name(&self) -> &str;
}

/// Receives the wallet-busy state whenever it changes.
pub trait BusyListener: Send + Sync {
	fn wallet_busy_change(&self, is_busy: bool) -> Result<(), SubscriberError>;

	fn name(&self) -> &str;
}
