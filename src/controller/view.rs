//! View transitions and status messages requested by the controller.
//! Rendering and localization live behind these traits.

use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
	SendBitcoin,
	ShowOpenUriDialog,
	Preferences,
	HelpAbout,
}

pub trait ViewNavigator: Send + Sync {
	fn display_view(&self, view: View);
}

/// Status messages posted for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
	PaymentRequestIgnored,
}

impl Message {
	/// Localization key for the message text
	pub fn key(&self) -> &'static str {
		match self {
			Message::PaymentRequestIgnored => "showOpenUriView.paymentRequestIgnored",
		}
	}
}

pub trait MessageSink: Send + Sync {
	fn post(&self, message: Message);
}

/// Navigator and message sink that only log, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingFrontend;

impl ViewNavigator for LoggingFrontend {
	fn display_view(&self, view: View) {
		info!("Displaying view {:?}", view);
	}
}

impl MessageSink for LoggingFrontend {
	fn post(&self, message: Message) {
		info!("Message posted: {}", message.key());
	}
}
