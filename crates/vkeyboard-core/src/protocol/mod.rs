//! Protocol module containing the inbound message types.

pub mod messages;

pub use messages::*;
