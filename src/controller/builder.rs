//! Controller builder
//!
//! Wires the model, subscriber registry, network relay, URI intake and
//! foreground queue together. Collaborators not supplied fall back to
//! logging-only implementations.

use crate::config::ControllerConfig;
use crate::controller::{
	Controller, ForegroundQueue, LoggingFrontend, MessageSink, QuitHandler, ViewNavigator,
	foreground_channel,
};
use crate::model::Model;
use crate::network::{NetworkEventRelay, NetworkService};
use crate::subscribers::SubscriberRegistry;
use crate::uri::{Bip21UriParser, PaymentUriParser, UriIntake};

use std::sync::Arc;

pub struct ControllerBuilder {
	config: ControllerConfig,
	model: Option<Arc<Model>>,
	network_service: Option<Arc<dyn NetworkService>>,
	parser: Option<Arc<dyn PaymentUriParser>>,
	navigator: Option<Arc<dyn ViewNavigator>>,
	messages: Option<Arc<dyn MessageSink>>,
	quit_handler: Option<Arc<dyn QuitHandler>>,
}

impl ControllerBuilder {
	pub fn new(config: ControllerConfig) -> Self {
		Self {
			config,
			model: None,
			network_service: None,
			parser: None,
			navigator: None,
			messages: None,
			quit_handler: None,
		}
	}

	/// Use an existing model instead of an empty one
	pub fn with_model(mut self, model: Arc<Model>) -> Self {
		self.model = Some(model);
		self
	}

	pub fn with_network_service(mut self, service: Arc<dyn NetworkService>) -> Self {
		self.network_service = Some(service);
		self
	}

	/// Replace the built-in payment URI parser
	pub fn with_parser(mut self, parser: Arc<dyn PaymentUriParser>) -> Self {
		self.parser = Some(parser);
		self
	}

	pub fn with_navigator(mut self, navigator: Arc<dyn ViewNavigator>) -> Self {
		self.navigator = Some(navigator);
		self
	}

	pub fn with_message_sink(mut self, messages: Arc<dyn MessageSink>) -> Self {
		self.messages = Some(messages);
		self
	}

	pub fn with_quit_handler(mut self, handler: Arc<dyn QuitHandler>) -> Self {
		self.quit_handler = Some(handler);
		self
	}

	/// Build the controller and the queue the foreground context drains.
	pub fn build(self) -> (Controller, ForegroundQueue) {
		let model = self.model.unwrap_or_default();
		let subscribers = Arc::new(SubscriberRegistry::new());
		let (notifier, queue) = foreground_channel(subscribers.clone());
		let relay = Arc::new(NetworkEventRelay::new(
			model.clone(),
			subscribers.clone(),
			notifier.clone(),
		));
		let parser = self
			.parser
			.unwrap_or_else(|| Arc::new(Bip21UriParser::new(self.config.uri_scheme.clone())));
		let intake = UriIntake::new(parser, self.config.amount_format);

		let controller = Controller {
			model,
			subscribers,
			relay,
			intake,
			notifier,
			network_service: self.network_service,
			navigator: self.navigator.unwrap_or_else(|| Arc::new(LoggingFrontend)),
			messages: self.messages.unwrap_or_else(|| Arc::new(LoggingFrontend)),
			quit_handler: self.quit_handler,
		};
		(controller, queue)
	}
}
