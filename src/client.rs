use crate::constants::{
    DEFAULT_CHUNK_SIZE, GET_REPLY, LIST_REPLY, REPLY_FAIL, REPLY_OK, REPLY_UNKNOWN,
};
use crate::core_proto::{frame, stream};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use tokio::net::{TcpListener, TcpStream};

/// One client request: which server to ask, which port to listen on for
/// the server's data connection, and the raw command token to send.
#[derive(Debug)]
pub struct Request {
    pub host: String,
    pub server_port: u16,
    /// Local port the server will dial back to. 0 picks an ephemeral
    /// port; the actually bound port is what gets advertised.
    pub data_port: u16,
    pub command: String,
    pub filename: Option<String>,
    /// Where to write a fetched file. Defaults to the remote filename in
    /// the current directory, as the server sent it.
    pub output: Option<PathBuf>,
}

/// What a completed exchange produced.
#[derive(Debug)]
pub enum Outcome {
    Listing(String),
    Saved { path: PathBuf, bytes: u64 },
    NotFound(String),
}

/// Runs one full exchange against the server.
///
/// The data listener is bound before the control connection opens, so the
/// server's dial-back always finds someone listening. Preamble order is
/// fixed: data port, command, then the filename only for GET.
pub async fn execute(request: &Request) -> Result<Outcome> {
    let data_listener = TcpListener::bind(("0.0.0.0", request.data_port))
        .await
        .with_context(|| format!("Failed to bind data port {}", request.data_port))?;
    let advertised_port = data_listener.local_addr()?.port();

    let mut ctrl = TcpStream::connect((request.host.as_str(), request.server_port))
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}:{}",
                request.host, request.server_port
            )
        })?;
    debug!("Control connection established, advertising data port {}", advertised_port);

    frame::send_msg(&advertised_port.to_string(), &mut ctrl).await?;
    frame::send_msg(&request.command, &mut ctrl).await?;
    if request.command == "GET" {
        let filename = request
            .filename
            .as_deref()
            .context("GET requires a filename")?;
        frame::send_msg(filename, &mut ctrl).await?;
    }

    let (mut data, _) = data_listener.accept().await?;
    let reply = frame::recv_msg(&mut ctrl).await?;

    match reply.as_str() {
        LIST_REPLY => {
            let listing = frame::recv_msg(&mut data).await?;
            Ok(Outcome::Listing(listing))
        }
        GET_REPLY => {
            let filename = request.filename.as_deref().unwrap_or_default();
            let status = frame::recv_msg(&mut ctrl).await?;
            match status.as_str() {
                REPLY_OK => {
                    let path = request
                        .output
                        .clone()
                        .unwrap_or_else(|| PathBuf::from(filename));
                    if path.exists() {
                        bail!("local file {:?} already exists", path);
                    }
                    let mut out = tokio::fs::File::create(&path)
                        .await
                        .with_context(|| format!("Failed to create {:?}", path))?;
                    let bytes = stream::recv_file(&mut data, &mut out, DEFAULT_CHUNK_SIZE).await?;
                    info!("Received {:?} ({} bytes)", path, bytes);
                    Ok(Outcome::Saved { path, bytes })
                }
                REPLY_FAIL => Ok(Outcome::NotFound(filename.to_string())),
                other => bail!("unexpected GET status {:?}", other),
            }
        }
        REPLY_UNKNOWN => bail!("server rejected command {:?} as unknown", request.command),
        other => bail!("unexpected reply {:?}", other),
    }
}
