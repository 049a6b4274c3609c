use crate::core_ftcommand::ftcommand::FtCommand;
use crate::core_proto::frame;
use std::io;
use std::net::IpAddr;
use tokio::io::AsyncRead;

/// The ordered values a client sends before any reply is issued: data
/// port, command token, and the filename when the command is GET. Read
/// once per control connection, immutable afterwards.
#[derive(Debug)]
pub struct Preamble {
    pub data_port: String,
    pub command: Option<FtCommand>,
    /// Token as received, kept for logging and the unknown-command reply.
    pub raw_command: String,
    pub filename: Option<String>,
}

impl Preamble {
    /// Reads the preamble off the control connection. Field order is
    /// fixed; the filename frame exists only after a GET token.
    pub async fn read<R>(reader: &mut R) -> io::Result<Preamble>
    where
        R: AsyncRead + Unpin,
    {
        let data_port = frame::recv_msg(reader).await?;
        let raw_command = frame::recv_msg(reader).await?;
        let command = FtCommand::from_str(&raw_command);
        let filename = match command {
            Some(FtCommand::GET) => Some(frame::recv_msg(reader).await?),
            _ => None,
        };
        Ok(Preamble {
            data_port,
            command,
            raw_command,
            filename,
        })
    }
}

/// Everything one worker knows about its request. Built after the
/// preamble is in, dropped when the worker exits; never shared.
#[derive(Debug)]
pub struct Session {
    pub peer_ip: IpAddr,
    pub preamble: Preamble,
}

impl Session {
    pub fn new(peer_ip: IpAddr, preamble: Preamble) -> Self {
        Self { peer_ip, preamble }
    }

    /// The client's advertised data port as a number. The client sends it
    /// as text; a garbled value fails here and the data connection is
    /// never attempted.
    pub fn data_port(&self) -> io::Result<u16> {
        self.preamble.data_port.parse::<u16>().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("bad data port {:?}: {}", self.preamble.data_port, e),
            )
        })
    }
}
