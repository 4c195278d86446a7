//! Network service seam and the event feed loop.

use crate::model::{WalletHandle, WalletRecord};
use crate::network::{NetworkEvent, NetworkEventRelay};
use crate::persistence::WalletStore;

use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// The blockchain network service. It owns wallet loading because loaded
/// wallets must be attached to its peer group before events flow.
#[async_trait::async_trait]
pub trait NetworkService: Send + Sync {
	async fn add_wallet_from_filename(&self, path: &Path) -> std::io::Result<WalletRecord>;
}

/// Network service that loads wallets from a [`WalletStore`] without any
/// peer connectivity. Events are fed in separately through [`spawn_feed`].
pub struct LocalNetworkService {
	store: Arc<dyn WalletStore>,
}

impl LocalNetworkService {
	pub fn new(store: Arc<dyn WalletStore>) -> Self {
		Self { store }
	}
}

#[async_trait::async_trait]
impl NetworkService for LocalNetworkService {
	async fn add_wallet_from_filename(&self, path: &Path) -> std::io::Result<WalletRecord> {
		let wallet = self.store.load(path).await?;
		debug!("Loaded {} bytes of wallet data from {:?}", wallet.contents().len(), path);
		Ok(WalletRecord::new(WalletHandle::new(wallet), path))
	}
}

/// Relay events from a network feed until the sending side closes.
///
/// Resolves to the number of events relayed.
pub fn spawn_feed(
	relay: Arc<NetworkEventRelay>,
	mut events: UnboundedReceiver<NetworkEvent>,
) -> JoinHandle<usize> {
	tokio::spawn(async move {
		let mut relayed = 0;
		while let Some(event) = events.recv().await {
			debug!("Relaying network event: {}", event.kind());
			relay.relay(event);
			relayed += 1;
		}
		info!("Network feed closed after {} events", relayed);
		relayed
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::controller::foreground_channel;
	use crate::model::Model;
	use crate::persistence::FileWalletStore;
	use crate::subscribers::SubscriberRegistry;
	use crate::test_support::RecordingSubscriber;

	#[tokio::test]
	async fn test_local_service_loads_wallet_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("main.wallet");
		tokio::fs::write(&path, b"wallet-bytes").await.unwrap();

		let service = LocalNetworkService::new(Arc::new(FileWalletStore::new(dir.path().join("meta"))));
		let record = service.add_wallet_from_filename(&path).await.unwrap();

		assert_eq!(record.path(), path.as_path());
		assert_eq!(record.wallet().wallet().contents(), b"wallet-bytes");
		assert!(!record.is_dirty());
	}

	#[tokio::test]
	async fn test_local_service_propagates_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let service = LocalNetworkService::new(Arc::new(FileWalletStore::new(dir.path().to_path_buf())));
		let err = service
			.add_wallet_from_filename(&dir.path().join("missing.wallet"))
			.await
			.unwrap_err();
		assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
	}

	#[tokio::test]
	async fn test_feed_relays_until_closed() {
		let model = Arc::new(Model::new());
		model.add_record(WalletRecord::new(WalletHandle::new(crate::model::Wallet::new(vec![])), "a.wallet"));
		let subscribers = Arc::new(SubscriberRegistry::new());
		let recorder = RecordingSubscriber::new("recorder");
		subscribers.register_display(recorder.clone());
		let (notifier, _queue) = foreground_channel(subscribers.clone());
		let relay = Arc::new(NetworkEventRelay::new(model.clone(), subscribers, notifier));

		let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
		let feed = spawn_feed(relay, receiver);
		sender.send(NetworkEvent::BlockDownloaded).unwrap();
		sender.send(NetworkEvent::BlockDownloaded).unwrap();
		drop(sender);

		assert_eq!(feed.await.unwrap(), 2);
		assert_eq!(recorder.kinds(), vec!["block_downloaded", "block_downloaded"]);
		assert!(model.all_records()[0].is_dirty());
	}
}
