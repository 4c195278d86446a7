//! The controller: composition root between the network service, display
//! subscribers and payment URI intake.
//!
//! The controller owns the subscriber registry and the pending-URI cell and
//! shares the model with the network relay and the persistence layer. It is
//! `Send + Sync`; wrap it in an `Arc` to call it from network threads,
//! platform callbacks and the foreground context at once.
//!
//! - `builder`: wires a controller and its foreground queue together
//! - `scheduler`: coalesced deferred delivery of data-changed notifications
//! - `view`: view transitions and status messages
//! - `types`: errors and platform quit handling

/// Controller construction
pub mod builder;
/// Deferred fan-out onto the foreground context
pub mod scheduler;
/// Controller errors and platform types
mod types;
/// View and message seams
pub mod view;

pub use builder::ControllerBuilder;
pub use scheduler::{DeferredNotifier, ForegroundQueue, ForegroundTask, foreground_channel};
pub use types::*;
pub use view::{LoggingFrontend, Message, MessageSink, View, ViewNavigator};

use crate::model::{Model, WalletRecord};
use crate::network::{NetworkEvent, NetworkEventRelay, NetworkService};
use crate::subscribers::{
	BusyListener, DisplayEvent, DisplaySubscriber, FanOutReport, SubscriberRegistry,
};
use crate::uri::{IntakeOutcome, UriIntake};

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct Controller {
	model: Arc<Model>,
	subscribers: Arc<SubscriberRegistry>,
	relay: Arc<NetworkEventRelay>,
	intake: UriIntake,
	notifier: DeferredNotifier,
	network_service: Option<Arc<dyn NetworkService>>,
	navigator: Arc<dyn ViewNavigator>,
	messages: Arc<dyn MessageSink>,
	quit_handler: Option<Arc<dyn QuitHandler>>,
}

impl Controller {
	pub fn model(&self) -> &Arc<Model> {
		&self.model
	}

	/// Relay to hand to the network feed.
	pub fn relay(&self) -> Arc<NetworkEventRelay> {
		self.relay.clone()
	}

	pub fn notifier(&self) -> DeferredNotifier {
		self.notifier.clone()
	}

	pub fn register_display(&self, subscriber: Arc<dyn DisplaySubscriber>) {
		self.subscribers.register_display(subscriber);
	}

	pub fn register_busy_listener(&self, listener: Arc<dyn BusyListener>) {
		self.subscribers.register_busy_listener(listener);
	}

	pub fn clear_busy_listeners(&self) {
		self.subscribers.clear_busy_listeners();
	}

	/// Number of busy listeners, logged for diagnostics.
	pub fn busy_listener_count(&self) -> usize {
		self.subscribers.busy_listener_count()
	}

	/// Load a wallet file through the network service and register it.
	///
	/// Load failures are returned unchanged; there is no retry here.
	pub async fn add_wallet(&self, path: &Path) -> Result<Arc<WalletRecord>, ControllerError> {
		let service = self
			.network_service
			.as_ref()
			.ok_or(ControllerError::NoNetworkService)?;
		let record = service.add_wallet_from_filename(path).await.map_err(|e| {
			error!("Failed to load wallet from {:?}: {}", path, e);
			ControllerError::WalletLoad(e)
		})?;
		info!("Added wallet {} from {:?}", record.wallet().id(), path);
		Ok(self.model.add_record(record))
	}

	pub fn active_record(&self) -> Result<Arc<WalletRecord>, ControllerError> {
		Ok(self.model.active_record()?)
	}

	pub fn all_records(&self) -> Vec<Arc<WalletRecord>> {
		self.model.all_records()
	}

	pub fn preference(&self, key: &str) -> Option<String> {
		self.model.preference(key)
	}

	pub fn set_preference(&self, key: &str, value: &str) {
		self.model.set_preference(key, value);
	}

	pub fn set_active_preference(&self, key: &str, value: &str) -> Result<(), ControllerError> {
		Ok(self.model.set_active_preference(key, value)?)
	}

	pub fn fire_busy_change(&self, is_busy: bool) -> FanOutReport {
		self.subscribers.notify_busy_change(is_busy)
	}

	pub fn fire_block_downloaded(&self) {
		self.relay.block_downloaded();
	}

	pub fn fire_data_changed_update_now(&self) -> FanOutReport {
		self.subscribers.notify_all_displays(&DisplayEvent::DataChanged)
	}

	pub fn fire_data_changed_update_later(&self) -> bool {
		self.notifier.request_data_changed()
	}

	/// Wallet files were rewritten outside this process.
	pub fn fire_files_changed_by_another_process(&self, record: Arc<WalletRecord>) {
		self.subscribers
			.notify_all_displays(&DisplayEvent::FilesChangedExternally { record });
		self.fire_data_changed_update_now();
	}

	/// Entry point for network callbacks.
	pub fn on_network_event(&self, event: NetworkEvent) {
		self.relay.relay(event);
	}

	/// Platform "open URI" callback. Replaces any unhandled URI, then runs
	/// an intake cycle.
	pub fn open_uri_event(&self, raw: &str) -> IntakeOutcome {
		if let Some(replaced) = self.intake.pending().submit(raw) {
			debug!("Discarding unhandled payment URI {:?}", replaced);
		}
		self.handle_open_uri()
	}

	pub fn handle_open_uri(&self) -> IntakeOutcome {
		self.intake
			.handle_open_uri(&self.model, self.navigator.as_ref(), self.messages.as_ref())
	}

	pub fn quit_event(&self) -> QuitResponse {
		match &self.quit_handler {
			Some(handler) => handler.request_quit(),
			None => QuitResponse::Accept,
		}
	}

	pub fn about_event(&self) {
		self.navigator.display_view(View::HelpAbout);
	}

	pub fn preferences_event(&self) {
		self.navigator.display_view(View::Preferences);
	}
}
