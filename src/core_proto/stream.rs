use crate::core_error::TransferError;
use crate::core_proto::frame;
use std::cmp;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Opens `path` for streaming and returns the handle together with its
/// total byte length. An unopenable file maps to `NotFound`; streaming is
/// never attempted on a handle that failed to open.
pub async fn open_for_send(path: &Path) -> Result<(File, u64), TransferError> {
    let file = File::open(path)
        .await
        .map_err(|_| TransferError::NotFound(path.display().to_string()))?;
    let size = file.metadata().await?.len();
    Ok((file, size))
}

/// Streams `size` bytes of `file` through the connection as one
/// length-prefixed payload, reading `chunk_size` bytes from disk at a time
/// and writing each chunk fully before the next read.
///
/// A zero-length file sends only the 8-byte zero prefix. A file that runs
/// dry before `size` bytes were read is a `PartialTransfer`; the length
/// frame is already committed at that point and the peer sees a short
/// payload.
pub async fn send_file<W>(
    file: &mut File,
    size: u64,
    writer: &mut W,
    chunk_size: usize,
) -> Result<(), TransferError>
where
    W: AsyncWrite + Unpin,
{
    frame::send_num(size, writer).await?;

    let mut buffer = vec![0u8; chunk_size];
    let mut sent: u64 = 0;
    while sent < size {
        let want = cmp::min(chunk_size as u64, size - sent) as usize;
        let n = file.read(&mut buffer[..want]).await?;
        if n == 0 {
            return Err(TransferError::PartialTransfer { sent, total: size });
        }
        writer.write_all(&buffer[..n]).await?;
        sent += n as u64;
    }
    Ok(())
}

/// Receives one length-prefixed payload into `out`, reading the connection
/// in `chunk_size` slices. Returns the byte count announced by the sender.
///
/// The length frame must be complete before any payload byte counts; a
/// connection that dies mid-body is a `PartialTransfer`.
pub async fn recv_file<R, W>(
    reader: &mut R,
    out: &mut W,
    chunk_size: usize,
) -> Result<u64, TransferError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let size = frame::recv_num(reader).await?;

    let mut buffer = vec![0u8; chunk_size];
    let mut received: u64 = 0;
    while received < size {
        let want = cmp::min(chunk_size as u64, size - received) as usize;
        let n = reader.read(&mut buffer[..want]).await?;
        if n == 0 {
            return Err(TransferError::PartialTransfer {
                sent: received,
                total: size,
            });
        }
        out.write_all(&buffer[..n]).await?;
        received += n as u64;
    }
    Ok(size)
}
