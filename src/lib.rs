//! rouillexferd library
//!
//! A minimal file transfer daemon and its companion client: one control
//! connection per request, one dial-back data connection per payload,
//! everything framed with an 8-byte big-endian length prefix.

pub mod client;
pub mod config;
pub mod constants;
pub mod core_cli;
pub mod core_error;
pub mod core_ftcommand;
pub mod core_network;
pub mod core_proto;
pub mod server;
pub mod session;
