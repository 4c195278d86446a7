/// Structured result of the external payment URI parser.
///
/// The label is still in its encoded form; intake decodes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentUri {
	pub address: String,
	pub label: Option<String>,
	/// Requested amount in base units
	pub amount: Option<u128>,
}

/// Payment details derived from a parsed URI, ready to route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPayment {
	pub address: String,
	/// Decoded label, empty when absent or undecodable
	pub label: String,
	pub amount: u128,
}

/// Result of one intake cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
	/// Both policy flags are false; the request was dropped.
	IgnoredByPolicy,
	/// No URI was pending.
	NothingPending,
	/// The pending URI could not be parsed.
	ParseFailed,
	/// Direct routing needs an active wallet and none is loaded.
	NoActiveWallet,
	/// Written to the active wallet's send preferences.
	RoutedToSend(ParsedPayment),
	/// Written to the global open-URI preview preferences.
	RoutedToConfirm(ParsedPayment),
}

/// Errors raised while parsing a payment URI
#[derive(Debug, thiserror::Error)]
pub enum UriParseError {
	#[error("Invalid URI syntax: {0}")]
	Syntax(#[from] url::ParseError),

	#[error("Unsupported scheme: {0}")]
	WrongScheme(String),

	#[error("Missing address")]
	MissingAddress,

	#[error("Invalid address: {0}")]
	InvalidAddress(String),

	#[error("Invalid amount: {0}")]
	InvalidAmount(String),

	#[error("Duplicate parameter: {0}")]
	DuplicateParameter(String),

	#[error("Unsupported required parameter: {0}")]
	UnknownRequiredParameter(String),
}
