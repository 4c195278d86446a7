use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use wallet_event_controller::controller::{ControllerBuilder, LoggingFrontend};
use wallet_event_controller::model::preferences as keys;
use wallet_event_controller::network::{LocalNetworkService, NetworkEvent, TransactionRef, spawn_feed};
use wallet_event_controller::persistence::{FileWalletStore, PersistenceService};
use wallet_event_controller::subscribers::{DisplayEvent, DisplaySubscriber, SubscriberError};
use wallet_event_controller::ControllerConfig;

/// Display subscriber that writes every notification to the log
struct LogDisplay;

impl DisplaySubscriber for LogDisplay {
	fn on_event(&self, event: &DisplayEvent) -> Result<(), SubscriberError> {
		info!("Display update: {}", event.kind());
		Ok(())
	}

	fn name(&self) -> &str {
		"log-display"
	}
}

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
		)
		.with_target(false)
		.with_thread_ids(true)
		.with_timer(tracing_subscriber::fmt::time::time())
		.init();

	let config = match std::env::var_os("WALLET_CONTROLLER_CONFIG") {
		Some(path) => match ControllerConfig::from_file(Path::new(&path)) {
			Ok(config) => config,
			Err(e) => {
				error!("Failed to load config from {:?}: {}", path, e);
				return;
			}
		},
		None => ControllerConfig::default(),
	};
	info!("Starting wallet event controller with {:?}", config);

	let store = Arc::new(FileWalletStore::new(config.data_dir.clone()));
	let persistence = PersistenceService::new(store.clone());
	let (controller, queue) = ControllerBuilder::new(config)
		.with_network_service(Arc::new(LocalNetworkService::new(store)))
		.with_navigator(Arc::new(LoggingFrontend))
		.with_message_sink(Arc::new(LoggingFrontend))
		.build();
	let controller = Arc::new(controller);
	controller.register_display(Arc::new(LogDisplay));

	for path in std::env::args().skip(1).map(PathBuf::from) {
		if let Err(e) = controller.add_wallet(&path).await {
			warn!("Skipping wallet {:?}: {}", path, e);
		}
	}

	let notifier = controller.notifier();
	let foreground = tokio::spawn(queue.run());
	let (feed_sender, feed_receiver) = tokio::sync::mpsc::unbounded_channel();
	let feed = spawn_feed(controller.relay(), feed_receiver);

	info!("Commands: open <uri> | policy <show-dialog> <use-uri> | block | changed | received <tx> | save | quit");
	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	loop {
		let line = match lines.next_line().await {
			Ok(Some(line)) => line,
			Ok(None) => break,
			Err(e) => {
				error!("Failed to read command: {}", e);
				break;
			}
		};
		let mut words = line.split_whitespace();
		let active_wallet = controller.active_record().ok().map(|r| r.wallet().clone());
		let event = match (words.next(), words.next(), words.next()) {
			(Some("open"), Some(_), _) => {
				let uri = line.trim_start().trim_start_matches("open").trim();
				info!("Intake outcome: {:?}", controller.open_uri_event(uri));
				None
			}
			(Some("policy"), Some(show_dialog), Some(use_uri)) => {
				controller.set_preference(keys::OPEN_URI_SHOW_DIALOG, show_dialog);
				controller.set_preference(keys::OPEN_URI_USE_URI, use_uri);
				None
			}
			(Some("block"), _, _) => Some(NetworkEvent::BlockDownloaded),
			(Some("changed"), _, _) => Some(NetworkEvent::WalletChanged {
				wallet: active_wallet,
			}),
			(Some("received"), Some(tx), _) => Some(NetworkEvent::CoinsReceived {
				wallet: active_wallet,
				transaction: TransactionRef::new(tx),
				prev_balance: 0,
				new_balance: 0,
			}),
			(Some("save"), _, _) => {
				let report = persistence.save_dirty(controller.model()).await;
				info!("Saved {} wallets, {} failed", report.saved, report.failed);
				None
			}
			(Some("quit"), _, _) => {
				info!("Quit response: {:?}", controller.quit_event());
				break;
			}
			_ => {
				warn!("Unrecognised command: {}", line);
				None
			}
		};
		if let Some(event) = event {
			if feed_sender.send(event).is_err() {
				error!("Network feed stopped");
				break;
			}
		}
	}

	drop(feed_sender);
	if let Ok(relayed) = feed.await {
		info!("Relayed {} network events", relayed);
	}
	notifier.shutdown();
	if let Ok(delivered) = foreground.await {
		info!("Delivered {} deferred updates", delivered);
	}
}
