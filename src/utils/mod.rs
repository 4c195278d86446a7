//!
//! Utility module for the wallet controller.
//!
//! Re-exports amount helpers used by URI intake and configuration.
/// Non-localized amount parsing and rendering
pub mod amount;

pub use amount::{COIN, format_amount, parse_coin_amount};
