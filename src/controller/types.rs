use crate::model::ModelError;

/// Errors surfaced to callers of the controller
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
	#[error("No network service attached")]
	NoNetworkService,

	#[error("Wallet load error: {0}")]
	WalletLoad(#[from] std::io::Error),

	#[error("Model error: {0}")]
	Model(#[from] ModelError),
}

/// Answer to a platform quit request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitResponse {
	Accept,
	Veto,
}

/// Decides whether the application may quit, e.g. after saving wallets.
pub trait QuitHandler: Send + Sync {
	fn request_quit(&self) -> QuitResponse;
}
