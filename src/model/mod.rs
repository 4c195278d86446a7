//! Wallet records and preferences shared between the controller, the
//! network relay and the persistence layer.

/// Preference key constants
pub mod preferences;
/// Ordered wallet registry and preference store
mod registry;
/// Wallet identity, records and model errors
mod types;

pub use registry::Model;
pub use types::*;
