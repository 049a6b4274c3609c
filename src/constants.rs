// src/constants.rs

/// How many bytes the file streamer reads from disk per chunk. Tunable,
/// never part of the wire contract.
pub const DEFAULT_CHUNK_SIZE: usize = 10 * 1024;

pub const DEFAULT_LISTEN_PORT: u16 = 2121;

// Control-connection reply tokens.
pub const LIST_REPLY: &str = "LIST_REPLY";
pub const GET_REPLY: &str = "GET_REPLY";
pub const REPLY_OK: &str = "OK";
pub const REPLY_FAIL: &str = "FAIL";
pub const REPLY_UNKNOWN: &str = "UNK_CMD";
