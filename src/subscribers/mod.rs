//! Display subscribers and busy listeners, and the registry that fans
//! notifications out to them.

/// Notification types and subscriber capabilities
pub mod events;
/// Copy-on-write subscriber sets with isolated fan-out
pub mod registry;

pub use events::*;
pub use registry::{FanOutReport, SubscriberRegistry};
