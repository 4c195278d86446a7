//! Inbound payment URI handling: the pending-URI cell, the parser seam and
//! the routing of parsed requests into preferences.

/// Pending URI cell and the intake cycle
pub mod intake;
/// Payment URI parser trait and the built-in implementation
pub mod parser;
/// Parsed payment types, outcomes and errors
mod types;

pub use intake::{PendingUri, UriIntake};
pub use parser::{Bip21UriParser, PaymentUriParser};
pub use types::*;
