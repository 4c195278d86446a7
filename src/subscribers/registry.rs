use crate::subscribers::events::{BusyListener, DisplayEvent, DisplaySubscriber, SubscriberError};

use parking_lot::RwLock;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use tracing::{debug, error};

/// Outcome of one fan-out pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutReport {
	pub delivered: usize,
	pub failed: usize,
}

/// Registered display subscribers and busy listeners.
///
/// Both sets are copy-on-write: registration swaps in a new vector and
/// fan-out iterates over the snapshot taken when it started, so a concurrent
/// registration is either fully visible to a pass or not at all.
#[derive(Default)]
pub struct SubscriberRegistry {
	displays: RwLock<Arc<Vec<Arc<dyn DisplaySubscriber>>>>,
	busy_listeners: RwLock<Arc<Vec<Arc<dyn BusyListener>>>>,
}

impl SubscriberRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register_display(&self, subscriber: Arc<dyn DisplaySubscriber>) {
		let mut guard = self.displays.write();
		Arc::make_mut(&mut *guard).push(subscriber);
	}

	pub fn register_busy_listener(&self, listener: Arc<dyn BusyListener>) {
		let mut guard = self.busy_listeners.write();
		Arc::make_mut(&mut *guard).push(listener);
	}

	pub fn clear_busy_listeners(&self) {
		*self.busy_listeners.write() = Arc::new(Vec::new());
	}

	pub fn display_count(&self) -> usize {
		self.displays.read().len()
	}

	pub fn busy_listener_count(&self) -> usize {
		let count = self.busy_listeners.read().len();
		debug!("There are {} wallet busy listeners", count);
		count
	}

	/// Invoke every busy listener, in registration order.
	pub fn notify_busy_change(&self, is_busy: bool) -> FanOutReport {
		let snapshot = self.busy_listeners.read().clone();
		let mut report = FanOutReport::default();
		for listener in snapshot.iter() {
			match isolate(|| listener.wallet_busy_change(is_busy)) {
				Ok(()) => report.delivered += 1,
				Err(e) => {
					error!("Busy listener {} failed: {}", listener.name(), e);
					report.failed += 1;
				}
			}
		}
		report
	}

	/// Deliver an event to every display subscriber.
	pub fn notify_all_displays(&self, event: &DisplayEvent) -> FanOutReport {
		let snapshot = self.displays.read().clone();
		let mut report = FanOutReport::default();
		for subscriber in snapshot.iter() {
			match isolate(|| subscriber.on_event(event)) {
				Ok(()) => report.delivered += 1,
				Err(e) => {
					error!(
						"Display subscriber {} failed to process {}: {}",
						subscriber.name(),
						event.kind(),
						e
					);
					report.failed += 1;
				}
			}
		}
		report
	}
}

fn isolate<F>(call: F) -> Result<(), SubscriberError>
where
	F: FnOnce() -> Result<(), SubscriberError>,
{
	catch_unwind(AssertUnwindSafe(call)).unwrap_or(Err(SubscriberError::Panicked))
}
