//! Payment URI parsing.
//!
//! Intake only depends on the [`PaymentUriParser`] trait. [`Bip21UriParser`]
//! handles `scheme:address?amount=..&label=..` requests.

use crate::uri::{PaymentUri, UriParseError};
use crate::utils::parse_coin_amount;

use url::Url;

pub trait PaymentUriParser: Send + Sync {
	fn parse(&self, uri: &str) -> Result<PaymentUri, UriParseError>;
}

#[derive(Debug, Clone)]
pub struct Bip21UriParser {
	scheme: String,
}

impl Bip21UriParser {
	pub fn new(scheme: impl Into<String>) -> Self {
		Self {
			scheme: scheme.into(),
		}
	}
}

impl Default for Bip21UriParser {
	fn default() -> Self {
		Self::new("bitcoin")
	}
}

impl PaymentUriParser for Bip21UriParser {
	fn parse(&self, uri: &str) -> Result<PaymentUri, UriParseError> {
		let url = Url::parse(uri)?;
		if !url.scheme().eq_ignore_ascii_case(&self.scheme) {
			return Err(UriParseError::WrongScheme(url.scheme().to_string()));
		}

		// `scheme://address` is produced by some wallets
		let address = match url.host_str() {
			Some(host) if url.path().is_empty() || url.path() == "/" => host,
			_ => url.path(),
		};
		if address.is_empty() {
			return Err(UriParseError::MissingAddress);
		}
		if !address.bytes().all(|b| b.is_ascii_alphanumeric()) {
			return Err(UriParseError::InvalidAddress(address.to_string()));
		}

		let mut label = None;
		let mut amount = None;
		for pair in url.query().unwrap_or_default().split('&') {
			if pair.is_empty() {
				continue;
			}
			let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
			match key {
				"amount" => {
					if amount.is_some() {
						return Err(UriParseError::DuplicateParameter(key.to_string()));
					}
					let units = parse_coin_amount(value)
						.ok_or_else(|| UriParseError::InvalidAmount(value.to_string()))?;
					amount = Some(units);
				}
				"label" => {
					if label.is_some() {
						return Err(UriParseError::DuplicateParameter(key.to_string()));
					}
					label = Some(value.to_string());
				}
				_ if key.starts_with("req-") => {
					return Err(UriParseError::UnknownRequiredParameter(key.to_string()));
				}
				_ => {}
			}
		}

		Ok(PaymentUri {
			address: address.to_string(),
			label,
			amount,
		})
	}
}
