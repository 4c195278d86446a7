//! Relay from network service callbacks to model state and display
//! subscribers.
//!
//! Every callback may arrive on a network thread. Dirty flags are atomic, so
//! marking needs no lock. All fan-outs run immediately on the calling thread,
//! except wallet-changed, which goes through the coalescing
//! [`DeferredNotifier`] because it fires at a high rate.

use crate::controller::DeferredNotifier;
use crate::model::{Model, WalletHandle};
use crate::network::{KeyRef, NetworkEvent, TransactionRef};
use crate::subscribers::{DisplayEvent, SubscriberRegistry};

use std::sync::Arc;
use tracing::debug;

pub struct NetworkEventRelay {
	model: Arc<Model>,
	subscribers: Arc<SubscriberRegistry>,
	notifier: DeferredNotifier,
}

impl NetworkEventRelay {
	pub fn new(
		model: Arc<Model>,
		subscribers: Arc<SubscriberRegistry>,
		notifier: DeferredNotifier,
	) -> Self {
		Self {
			model,
			subscribers,
			notifier,
		}
	}

	/// Dispatch one network event to its handler.
	pub fn relay(&self, event: NetworkEvent) {
		match event {
			NetworkEvent::CoinsReceived {
				wallet,
				transaction,
				prev_balance,
				new_balance,
			} => {
				if let Some(wallet) = wallet {
					self.coins_received(wallet, transaction, prev_balance, new_balance);
				}
			}
			NetworkEvent::CoinsSent {
				wallet,
				transaction,
				prev_balance,
				new_balance,
			} => {
				if let Some(wallet) = wallet {
					self.coins_sent(wallet, transaction, prev_balance, new_balance);
				}
			}
			NetworkEvent::TransactionConfidenceChanged {
				wallet,
				transaction,
			} => {
				if let Some(wallet) = wallet {
					self.transaction_confidence_changed(wallet, transaction);
				}
			}
			NetworkEvent::WalletChanged { wallet } => {
				if let Some(wallet) = wallet {
					self.wallet_changed(&wallet);
				}
			}
			NetworkEvent::Reorganize { wallet } => {
				if let Some(wallet) = wallet {
					self.reorganize(wallet);
				}
			}
			NetworkEvent::BlockDownloaded => self.block_downloaded(),
			NetworkEvent::KeyAdded { key } => self.key_added(&key),
		}
	}

	pub fn coins_received(
		&self,
		wallet: WalletHandle,
		transaction: TransactionRef,
		prev_balance: u128,
		new_balance: u128,
	) {
		self.subscribers.notify_all_displays(&DisplayEvent::CoinsReceived {
			wallet,
			transaction,
			prev_balance,
			new_balance,
		});
	}

	pub fn coins_sent(
		&self,
		wallet: WalletHandle,
		transaction: TransactionRef,
		prev_balance: u128,
		new_balance: u128,
	) {
		self.subscribers.notify_all_displays(&DisplayEvent::CoinsSent {
			wallet,
			transaction,
			prev_balance,
			new_balance,
		});
	}

	pub fn transaction_confidence_changed(&self, wallet: WalletHandle, transaction: TransactionRef) {
		self.subscribers
			.notify_all_displays(&DisplayEvent::TransactionConfidenceChanged { wallet, transaction });
	}

	/// Mark the matching record dirty and schedule a deferred redraw.
	pub fn wallet_changed(&self, wallet: &WalletHandle) {
		if let Some(record) = self.model.find_record(wallet) {
			record.mark_dirty();
		}
		self.notifier.request_data_changed();
	}

	pub fn reorganize(&self, wallet: WalletHandle) {
		debug!("Reorganize for {}", wallet.id());
		for record in self.model.all_records() {
			if record.wallet() == &wallet {
				record.mark_dirty();
				debug!("Marking wallet {:?} as dirty", record.path());
			}
		}
		self.subscribers.notify_all_displays(&DisplayEvent::Reorganize { wallet });
	}

	/// Every wallet's last-seen block height moves, so all records go dirty.
	pub fn block_downloaded(&self) {
		self.subscribers.notify_all_displays(&DisplayEvent::BlockDownloaded);
		for record in self.model.all_records() {
			record.mark_dirty();
		}
	}

	pub fn key_added(&self, key: &KeyRef) {
		debug!("Key added: {}", key);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::controller::{ForegroundQueue, foreground_channel};
	use crate::model::{Wallet, WalletRecord};
	use crate::test_support::{FailingSubscriber, RecordingSubscriber};

	struct Fixture {
		model: Arc<Model>,
		relay: NetworkEventRelay,
		queue: ForegroundQueue,
		first: Arc<RecordingSubscriber>,
		second: Arc<RecordingSubscriber>,
		wallets: Vec<WalletHandle>,
	}

	fn fixture(wallet_count: usize) -> Fixture {
		let model = Arc::new(Model::new());
		let subscribers = Arc::new(SubscriberRegistry::new());
		let first = RecordingSubscriber::new("first");
		let second = RecordingSubscriber::new("second");
		subscribers.register_display(first.clone());
		subscribers.register_display(Arc::new(FailingSubscriber));
		subscribers.register_display(second.clone());

		let wallets: Vec<_> = (0..wallet_count)
			.map(|i| {
				let handle = WalletHandle::new(Wallet::new(vec![7; 4]));
				model.add_record(WalletRecord::new(handle.clone(), format!("{i}.wallet")));
				handle
			})
			.collect();

		let (notifier, queue) = foreground_channel(subscribers.clone());
		Fixture {
			relay: NetworkEventRelay::new(model.clone(), subscribers, notifier),
			model,
			queue,
			first,
			second,
			wallets,
		}
	}

	fn dirty_flags(model: &Model) -> Vec<bool> {
		model.all_records().iter().map(|r| r.is_dirty()).collect()
	}

	#[test]
	fn test_wallet_changed_marks_only_matching_record() {
		let mut fx = fixture(3);
		for _ in 0..10 {
			fx.relay.relay(NetworkEvent::WalletChanged {
				wallet: Some(fx.wallets[1].clone()),
			});
		}

		assert_eq!(dirty_flags(&fx.model), vec![false, true, false]);
		assert!(fx.first.kinds().is_empty());

		assert_eq!(fx.queue.drain_pending(), 1);
		assert_eq!(fx.first.kinds(), vec!["data_changed"]);
		assert_eq!(fx.second.kinds(), vec!["data_changed"]);
	}

	#[test]
	fn test_wallet_changed_for_unknown_wallet_still_redraws() {
		let mut fx = fixture(2);
		let stranger = WalletHandle::new(Wallet::new(vec![7; 4]));
		fx.relay.wallet_changed(&stranger);

		assert_eq!(dirty_flags(&fx.model), vec![false, false]);
		assert_eq!(fx.queue.drain_pending(), 1);
	}

	#[test]
	fn test_reorganize_marks_and_fans_out_immediately() {
		let mut fx = fixture(3);
		fx.relay.relay(NetworkEvent::Reorganize {
			wallet: Some(fx.wallets[2].clone()),
		});

		assert_eq!(dirty_flags(&fx.model), vec![false, false, true]);
		assert_eq!(fx.first.kinds(), vec!["reorganize"]);
		assert_eq!(fx.second.kinds(), vec!["reorganize"]);
		assert_eq!(fx.queue.drain_pending(), 0);
	}

	#[test]
	fn test_block_downloaded_marks_all_records() {
		let fx = fixture(3);
		fx.relay.relay(NetworkEvent::BlockDownloaded);

		assert_eq!(dirty_flags(&fx.model), vec![true, true, true]);
		assert_eq!(fx.first.kinds(), vec!["block_downloaded"]);
		assert_eq!(fx.second.kinds(), vec!["block_downloaded"]);
	}

	#[test]
	fn test_coin_and_confidence_events_pass_through() {
		let fx = fixture(1);
		let tx = TransactionRef::new("abcd");
		fx.relay.relay(NetworkEvent::CoinsReceived {
			wallet: Some(fx.wallets[0].clone()),
			transaction: tx.clone(),
			prev_balance: 10,
			new_balance: 25,
		});
		fx.relay.relay(NetworkEvent::CoinsSent {
			wallet: Some(fx.wallets[0].clone()),
			transaction: tx.clone(),
			prev_balance: 25,
			new_balance: 5,
		});
		fx.relay.relay(NetworkEvent::TransactionConfidenceChanged {
			wallet: Some(fx.wallets[0].clone()),
			transaction: tx.clone(),
		});

		assert_eq!(
			fx.first.kinds(),
			vec!["coins_received", "coins_sent", "confidence_changed"]
		);
		assert_eq!(dirty_flags(&fx.model), vec![false]);
		match &fx.second.events()[0] {
			DisplayEvent::CoinsReceived {
				wallet,
				transaction,
				prev_balance,
				new_balance,
			} => {
				assert_eq!(wallet, &fx.wallets[0]);
				assert_eq!(transaction, &tx);
				assert_eq!((*prev_balance, *new_balance), (10, 25));
			}
			other => panic!("unexpected event {other:?}"),
		}
	}

	#[test]
	fn test_missing_wallet_is_dropped() {
		let mut fx = fixture(2);
		fx.relay.relay(NetworkEvent::WalletChanged { wallet: None });
		fx.relay.relay(NetworkEvent::Reorganize { wallet: None });
		fx.relay.relay(NetworkEvent::CoinsReceived {
			wallet: None,
			transaction: TransactionRef::new("ff"),
			prev_balance: 0,
			new_balance: 1,
		});

		assert_eq!(dirty_flags(&fx.model), vec![false, false]);
		assert!(fx.first.kinds().is_empty());
		assert_eq!(fx.queue.drain_pending(), 0);
	}

	#[test]
	fn test_key_added_has_no_effect() {
		let mut fx = fixture(1);
		fx.relay.relay(NetworkEvent::KeyAdded {
			key: KeyRef {
				public_key: vec![2, 3],
			},
		});
		assert_eq!(dirty_flags(&fx.model), vec![false]);
		assert!(fx.first.kinds().is_empty());
		assert_eq!(fx.queue.drain_pending(), 0);
	}

	#[test]
	fn test_dirty_marks_from_network_thread_are_visible() {
		let mut fx = fixture(4);
		let relay = Arc::new(fx.relay);
		let wallets = fx.wallets.clone();
		let network = {
			let relay = relay.clone();
			std::thread::spawn(move || {
				for wallet in wallets.iter().take(2) {
					relay.wallet_changed(wallet);
				}
			})
		};
		network.join().unwrap();

		assert_eq!(dirty_flags(&fx.model), vec![true, true, false, false]);
		assert_eq!(fx.queue.drain_pending(), 1);
	}
}
