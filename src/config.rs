//! Controller configuration.
//!
//! Loaded from a JSON file; any field left out takes its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How amounts are rendered into preference strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountFormat {
	/// Integer count of base units, e.g. `50000000`.
	#[default]
	BaseUnits,
	/// Decimal coin value, e.g. `0.5`.
	Coin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
	/// URI scheme accepted by the built-in payment URI parser
	pub uri_scheme: String,
	/// Rendering used for amounts written to preferences
	pub amount_format: AmountFormat,
	/// Directory holding wallet metadata sidecars
	pub data_dir: PathBuf,
}

impl Default for ControllerConfig {
	fn default() -> Self {
		Self {
			uri_scheme: "bitcoin".to_string(),
			amount_format: AmountFormat::default(),
			data_dir: PathBuf::from("./wallet-data"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON parse error: {0}")]
	Json(#[from] serde_json::Error),
}

impl ControllerConfig {
	pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		Ok(serde_json::from_str(&content)?)
	}
}
