use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Writes `num` through the connection as 8 raw big-endian bytes.
///
/// A short write is an error, not retried here; `write_all` already loops
/// until the whole prefix is on the wire or the connection dies.
pub async fn send_num<W>(num: u64, writer: &mut W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&num.to_be_bytes()).await
}

/// Reads exactly 8 bytes and decodes them big-endian. A short read
/// surfaces as `UnexpectedEof`.
pub async fn recv_num<R>(reader: &mut R) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf).await?;
    Ok(u64::from_be_bytes(buf))
}

/// Sends a text message through the connection, length prefix first.
///
/// Commands, ports, filenames, replies and listings all travel this way,
/// so the receiver never needs delimiters or escaping.
pub async fn send_msg<W>(msg: &str, writer: &mut W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    send_num(msg.len() as u64, writer).await?;
    writer.write_all(msg.as_bytes()).await
}

/// Receives one length-prefixed text message, looping over partial reads
/// until the full frame is in. A zero-length frame is a valid empty
/// message.
pub async fn recv_msg<R>(reader: &mut R) -> io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let size = recv_num(reader).await? as usize;
    let mut buf = vec![0u8; size];
    reader.read_exact(&mut buf).await?;
    String::from_utf8(buf)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    #[tokio::test]
    async fn num_round_trip() {
        let (mut tx, mut rx) = duplex(64);
        for num in [0u64, 1, 8, 1024, u64::MAX] {
            send_num(num, &mut tx).await.unwrap();
            assert_eq!(recv_num(&mut rx).await.unwrap(), num);
        }
    }

    #[tokio::test]
    async fn num_is_big_endian_on_the_wire() {
        let (mut tx, mut rx) = duplex(64);
        send_num(0x0102030405060708, &mut tx).await.unwrap();
        let mut raw = [0u8; 8];
        rx.read_exact(&mut raw).await.unwrap();
        assert_eq!(raw, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[tokio::test]
    async fn msg_round_trip() {
        let (mut tx, mut rx) = duplex(64);
        send_msg("LIST_REPLY", &mut tx).await.unwrap();
        assert_eq!(recv_msg(&mut rx).await.unwrap(), "LIST_REPLY");
    }

    #[tokio::test]
    async fn empty_msg_is_valid() {
        let (mut tx, mut rx) = duplex(64);
        send_msg("", &mut tx).await.unwrap();
        assert_eq!(recv_msg(&mut rx).await.unwrap(), "");
    }

    #[tokio::test]
    async fn large_msg_survives_tiny_transport_buffers() {
        // A 16-byte duplex forces both halves through many partial
        // reads/writes, so neither side may assume one call moves a frame.
        let (mut tx, mut rx) = duplex(16);
        let msg: String = (0..200_000)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let sent = msg.clone();
        let sender = tokio::spawn(async move { send_msg(&sent, &mut tx).await });
        let received = recv_msg(&mut rx).await.unwrap();
        sender.await.unwrap().unwrap();
        assert_eq!(received, msg);
    }

    #[tokio::test]
    async fn short_length_prefix_is_an_error() {
        let (mut tx, mut rx) = duplex(64);
        tx.write_all(&[0u8; 4]).await.unwrap();
        drop(tx);
        let err = recv_num(&mut rx).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[tokio::test]
    async fn truncated_payload_is_an_error() {
        let (mut tx, mut rx) = duplex(64);
        send_num(10, &mut tx).await.unwrap();
        tx.write_all(b"only5").await.unwrap();
        drop(tx);
        let err = recv_msg(&mut rx).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
