//! Transport-agnostic application core.
//!
//! Holds the shared [`AppContext`] and the router both transports feed
//! updates into.

mod context;
#[cfg(test)]
pub(crate) mod fixtures;
mod router;

pub use context::AppContext;
pub use router::{handle_message, handle_update};
