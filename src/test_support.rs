//! Recording collaborators shared by the unit tests.

use crate::controller::{Message, MessageSink, View, ViewNavigator};
use crate::subscribers::{BusyListener, DisplayEvent, DisplaySubscriber, SubscriberError};

use parking_lot::Mutex;
use std::sync::Arc;

pub struct RecordingSubscriber {
	name: String,
	events: Mutex<Vec<DisplayEvent>>,
}

impl RecordingSubscriber {
	pub fn new(name: &str) -> Arc<Self> {
		Arc::new(Self {
			name: name.to_string(),
			events: Mutex::new(Vec::new()),
		})
	}

	pub fn events(&self) -> Vec<DisplayEvent> {
		self.events.lock().clone()
	}

	pub fn kinds(&self) -> Vec<&'static str> {
		self.events.lock().iter().map(|e| e.kind()).collect()
	}
}

impl DisplaySubscriber for RecordingSubscriber {
	fn on_event(&self, event: &DisplayEvent) -> Result<(), SubscriberError> {
		self.events.lock().push(event.clone());
		Ok(())
	}

	fn name(&self) -> &str {
		&self.name
	}
}

pub struct FailingSubscriber;

impl DisplaySubscriber for FailingSubscriber {
	fn on_event(&self, _event: &DisplayEvent) -> Result<(), SubscriberError> {
		Err(SubscriberError::Failed("render failed".to_string()))
	}

	fn name(&self) -> &str {
		"failing"
	}
}

#[derive(Default)]
pub struct RecordingBusyListener {
	states: Mutex<Vec<bool>>,
}

impl RecordingBusyListener {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn states(&self) -> Vec<bool> {
		self.states.lock().clone()
	}
}

impl BusyListener for RecordingBusyListener {
	fn wallet_busy_change(&self, is_busy: bool) -> Result<(), SubscriberError> {
		self.states.lock().push(is_busy);
		Ok(())
	}

	fn name(&self) -> &str {
		"recording"
	}
}

#[derive(Default)]
pub struct RecordingNavigator {
	views: Mutex<Vec<View>>,
}

impl RecordingNavigator {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn views(&self) -> Vec<View> {
		self.views.lock().clone()
	}
}

impl ViewNavigator for RecordingNavigator {
	fn display_view(&self, view: View) {
		self.views.lock().push(view);
	}
}

#[derive(Default)]
pub struct RecordingMessages {
	messages: Mutex<Vec<Message>>,
}

impl RecordingMessages {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn messages(&self) -> Vec<Message> {
		self.messages.lock().clone()
	}
}

impl MessageSink for RecordingMessages {
	fn post(&self, message: Message) {
		self.messages.lock().push(message);
	}
}
