// Wire-level building blocks: every message and payload on either
// connection goes through the length-prefixed frame codec.
pub mod frame;
pub mod stream;
