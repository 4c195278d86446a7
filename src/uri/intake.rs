//! Payment request intake.
//!
//! URIs arrive from platform callbacks on any thread and land in a
//! single-slot [`PendingUri`] cell; a newer URI replaces an unhandled older
//! one. [`UriIntake::handle_open_uri`] then reads the routing policy, takes
//! the pending URI and writes it either straight into the active wallet's
//! send preferences or into the global preview preferences for
//! confirmation. The cycle runs under one lock so two submissions can never
//! be interleaved; the resulting view or message is requested afterwards.
//!
//! Failures never propagate to the caller: a platform callback has nowhere
//! to send them. They are logged and reported through [`IntakeOutcome`].

use crate::config::AmountFormat;
use crate::controller::{Message, MessageSink, View, ViewNavigator};
use crate::model::{Model, ModelError, preferences as keys};
use crate::uri::{IntakeOutcome, ParsedPayment, PaymentUri, PaymentUriParser};
use crate::utils::format_amount;

use parking_lot::Mutex;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, error};

pub const ENCODED_SPACE: &str = "%20";

/// Single-slot handoff cell for the most recent unhandled URI.
#[derive(Debug, Default)]
pub struct PendingUri {
	slot: Mutex<Option<String>>,
}

impl PendingUri {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store a URI, returning the unhandled one it replaced.
	pub fn submit(&self, raw: impl Into<String>) -> Option<String> {
		self.slot.lock().replace(raw.into())
	}

	/// Remove and return the pending URI.
	pub fn take(&self) -> Option<String> {
		self.slot.lock().take()
	}

	pub fn is_pending(&self) -> bool {
		self.slot.lock().is_some()
	}
}

/// Frontend call to make once the cycle lock is released
enum FrontendRequest {
	View(View),
	Message(Message),
}

pub struct UriIntake {
	pending: PendingUri,
	parser: Arc<dyn PaymentUriParser>,
	amount_format: AmountFormat,
	cycle: Mutex<()>,
}

impl UriIntake {
	pub fn new(parser: Arc<dyn PaymentUriParser>, amount_format: AmountFormat) -> Self {
		Self {
			pending: PendingUri::new(),
			parser,
			amount_format,
			cycle: Mutex::new(()),
		}
	}

	pub fn pending(&self) -> &PendingUri {
		&self.pending
	}

	/// Run one intake cycle against the current pending URI.
	///
	/// The navigator and message sink are called after the cycle lock is
	/// released, so either may re-enter intake.
	pub fn handle_open_uri(
		&self,
		model: &Model,
		navigator: &dyn ViewNavigator,
		messages: &dyn MessageSink,
	) -> IntakeOutcome {
		let (outcome, request) = self.run_cycle(model);
		match request {
			Some(FrontendRequest::View(view)) => navigator.display_view(view),
			Some(FrontendRequest::Message(message)) => messages.post(message),
			None => {}
		}
		outcome
	}

	fn run_cycle(&self, model: &Model) -> (IntakeOutcome, Option<FrontendRequest>) {
		let _cycle = self.cycle.lock();

		let show_dialog = model.preference(keys::OPEN_URI_SHOW_DIALOG);
		let use_uri = model.preference(keys::OPEN_URI_USE_URI);
		let show_dialog_false = keys::is_explicitly_false(show_dialog.as_deref());

		if show_dialog_false && keys::is_explicitly_false(use_uri.as_deref()) {
			let discarded = self.pending.take();
			debug!(
				"Payment URI {:?} ignored because use URI = {:?}, show dialog = {:?}",
				discarded, use_uri, show_dialog
			);
			return (
				IntakeOutcome::IgnoredByPolicy,
				Some(FrontendRequest::Message(Message::PaymentRequestIgnored)),
			);
		}

		let raw = match self.pending.take() {
			Some(raw) if !raw.trim().is_empty() => raw,
			_ => {
				debug!("No payment URI found to handle");
				return (IntakeOutcome::NothingPending, None);
			}
		};

		// Older producers did not percent-encode labels
		let uri = raw.replace(' ', ENCODED_SPACE);
		let parsed = match self.parser.parse(&uri) {
			Ok(parsed) => parsed,
			Err(e) => {
				error!("Could not parse the URI '{}', aborting: {}", uri, e);
				return (IntakeOutcome::ParseFailed, None);
			}
		};
		let payment = self.derive_payment(parsed);
		let amount = format_amount(payment.amount, self.amount_format);

		if show_dialog_false {
			match Self::route_to_send(model, &payment, &amount) {
				Ok(()) => {
					debug!("Routing straight to send view for address = {}", payment.address);
					(
						IntakeOutcome::RoutedToSend(payment),
						Some(FrontendRequest::View(View::SendBitcoin)),
					)
				}
				Err(e) => {
					error!("Cannot route payment to {}: {}", payment.address, e);
					(IntakeOutcome::NoActiveWallet, None)
				}
			}
		} else {
			model.set_preference(keys::OPEN_URI_ADDRESS, &payment.address);
			model.set_preference(keys::OPEN_URI_LABEL, &payment.label);
			model.set_preference(keys::OPEN_URI_AMOUNT, &amount);
			debug!("Routing to show open URI view for address = {}", payment.address);
			(
				IntakeOutcome::RoutedToConfirm(payment),
				Some(FrontendRequest::View(View::ShowOpenUriDialog)),
			)
		}
	}

	fn derive_payment(&self, parsed: PaymentUri) -> ParsedPayment {
		let label = match parsed.label.as_deref() {
			None => String::new(),
			Some(encoded) => decode_label(encoded).unwrap_or_else(|e| {
				error!("Could not decode the label '{}' as UTF-8: {}", encoded, e);
				String::new()
			}),
		};
		ParsedPayment {
			address: parsed.address,
			label,
			amount: parsed.amount.unwrap_or(0),
		}
	}

	fn route_to_send(model: &Model, payment: &ParsedPayment, amount: &str) -> Result<(), ModelError> {
		let record = model.active_record()?;
		record.set_preference(keys::SEND_ADDRESS, &payment.address);
		record.set_preference(keys::SEND_LABEL, &payment.label);
		record.set_preference(keys::SEND_AMOUNT, amount);
		record.set_preference(keys::SEND_PERFORM_PASTE_NOW, keys::TRUE);
		model.set_preference(keys::BRING_TO_FRONT, keys::TRUE);
		Ok(())
	}
}

/// Form-style decode: `+` is a space, `%XX` sequences must form UTF-8.
fn decode_label(encoded: &str) -> Result<String, std::string::FromUtf8Error> {
	let spaced = encoded.replace('+', " ");
	urlencoding::decode(&spaced).map(Cow::into_owned)
}
