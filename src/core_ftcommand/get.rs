use crate::constants::{GET_REPLY, REPLY_FAIL, REPLY_OK};
use crate::core_error::TransferError;
use crate::core_proto::{frame, stream};
use log::{info, warn};
use std::path::Path;
use tokio::io::AsyncWrite;

/// Handles the GET command.
///
/// Echoes `GET_REPLY` on the control connection, then opens the file
/// before committing to anything further: an unopenable file is answered
/// with `FAIL` and no data-connection payload. Once `OK` is on the wire
/// the length frame and body follow on the data connection; a streaming
/// failure past that point cannot be signaled and the client detects the
/// short payload itself.
pub async fn handle_get_command<C, D>(
    ctrl: &mut C,
    data: &mut D,
    serve_dir: &Path,
    filename: &str,
    data_port: &str,
    chunk_size: usize,
) -> Result<(), TransferError>
where
    C: AsyncWrite + Unpin,
    D: AsyncWrite + Unpin,
{
    frame::send_msg(GET_REPLY, ctrl).await?;
    info!("File {:?} requested on port {}", filename, data_port);

    let path = serve_dir.join(filename);
    let (mut file, size) = match stream::open_for_send(&path).await {
        Ok(opened) => opened,
        Err(TransferError::NotFound(_)) => {
            warn!("File not found: {:?}", path);
            frame::send_msg(REPLY_FAIL, ctrl).await?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    frame::send_msg(REPLY_OK, ctrl).await?;
    stream::send_file(&mut file, size, data, chunk_size).await?;
    info!("Sent {:?} ({} bytes)", path, size);
    Ok(())
}
