//! Network service integration
//!
//! The network service is an opaque event source. This module defines the
//! events it delivers, the seam used to load wallets through it, and the
//! relay that turns its callbacks into dirty flags and display fan-out.

/// Event relay onto model state and subscribers
pub mod relay;
/// Network service trait and feed loop
pub mod service;
/// Network event and handle types
mod types;

pub use relay::NetworkEventRelay;
pub use service::{LocalNetworkService, NetworkService, spawn_feed};
pub use types::*;
