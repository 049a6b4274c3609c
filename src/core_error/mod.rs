use thiserror::Error;

/// Everything that can go wrong while serving one request. Workers log
/// these and exit; nothing here ever crosses to another connection.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("file not found: {0}")]
    NotFound(String),

    /// The source stopped yielding bytes after the length frame was
    /// committed. Cannot be signaled on the wire; the peer detects the
    /// short payload itself.
    #[error("transfer interrupted after {sent} of {total} bytes")]
    PartialTransfer { sent: u64, total: u64 },
}
