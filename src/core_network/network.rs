use crate::config::Config;
use crate::core_error::TransferError;
use crate::core_ftcommand::handlers;
use crate::core_network::port;
use crate::session::{Preamble, Session};
use anyhow::Result;
use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// Binds the control listener and serves forever.
pub async fn start_server(config: Arc<Config>) -> Result<()> {
    let listener = TcpListener::bind(format!(
        "{}:{}",
        config.server.bind_address, config.server.listen_port
    ))
    .await?;
    info!("Server listening on port {}", config.server.listen_port);

    serve(listener, config).await
}

/// The accept loop. Each accepted control connection is handed to its own
/// spawned worker and never looked at again; a failed `accept` is logged
/// and the loop keeps going.
pub async fn serve(listener: TcpListener, config: Arc<Config>) -> Result<()> {
    loop {
        let (socket, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Connection from {}", addr);

        let config = Arc::clone(&config);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, addr, config).await {
                warn!("Connection error from {}: {}", addr, e);
            }
        });
    }
}

/// Runs one request end to end: preamble, data connect, dispatch, close.
///
/// Everything before the first reply fails silently toward the client;
/// the connection just dies and the reason lands in the log. The data
/// connection closes before the control connection, whichever way the
/// dispatch went.
pub async fn handle_connection(
    mut ctrl: TcpStream,
    addr: SocketAddr,
    config: Arc<Config>,
) -> Result<(), TransferError> {
    let preamble = Preamble::read(&mut ctrl).await?;
    let session = Session::new(addr.ip(), preamble);

    // No wire message exists for a failed data connect; the client only
    // ever observes its listener going unanswered.
    let mut data = port::setup_data_connection(session.peer_ip, session.data_port()?).await?;

    let outcome = handlers::dispatch_command(&session, &mut ctrl, &mut data, &config).await;

    drop(data);
    drop(ctrl);
    outcome
}
