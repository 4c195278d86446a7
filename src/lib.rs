//! Wallet event controller
//!
//! Mediates between a blockchain network service delivering wallet events
//! on its own threads, any number of display subscribers, and platform
//! "open URI" callbacks carrying payment requests, for a client with several
//! wallets loaded at once.

pub mod config;
pub mod controller;
pub mod model;
pub mod network;
pub mod persistence;
pub mod subscribers;
pub mod uri;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use config::{AmountFormat, ControllerConfig};
pub use controller::{Controller, ControllerBuilder, ControllerError, ForegroundQueue};
