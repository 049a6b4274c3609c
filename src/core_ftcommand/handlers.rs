use crate::config::Config;
use crate::constants::REPLY_UNKNOWN;
use crate::core_error::TransferError;
use crate::core_ftcommand::ftcommand::FtCommand;
use crate::core_ftcommand::{get, list};
use crate::core_proto::frame;
use crate::session::Session;
use std::path::Path;
use tokio::io::AsyncWrite;

/// Runs the reply/payload exchange for one parsed preamble: exactly one
/// control reply sequence, at most one data-connection payload. The data
/// connection is already open at this point and is closed by the caller
/// whichever branch runs. An unrecognized token is answered with
/// `UNK_CMD` on the control connection and surfaced to the worker as an
/// error; nothing travels on the data connection for that branch.
pub async fn dispatch_command<C, D>(
    session: &Session,
    ctrl: &mut C,
    data: &mut D,
    config: &Config,
) -> Result<(), TransferError>
where
    C: AsyncWrite + Unpin,
    D: AsyncWrite + Unpin,
{
    let serve_dir = Path::new(&config.server.serve_dir);
    let data_port = session.preamble.data_port.as_str();

    match session.preamble.command {
        Some(FtCommand::LIST) => list::handle_list_command(ctrl, data, serve_dir, data_port).await,
        Some(FtCommand::GET) => {
            // The preamble reader only parses GET after the filename frame.
            let filename = session.preamble.filename.as_deref().unwrap_or_default();
            get::handle_get_command(
                ctrl,
                data,
                serve_dir,
                filename,
                data_port,
                config.server.chunk_size,
            )
            .await
        }
        None => {
            frame::send_msg(REPLY_UNKNOWN, ctrl).await?;
            Err(TransferError::UnknownCommand(
                session.preamble.raw_command.clone(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Preamble;
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::io::{duplex, AsyncReadExt};

    fn session_for(raw_command: &str, filename: Option<&str>) -> Session {
        let command = FtCommand::from_str(raw_command);
        Session::new(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            Preamble {
                data_port: String::from("6000"),
                command,
                raw_command: raw_command.to_string(),
                filename: filename.map(str::to_string),
            },
        )
    }

    #[tokio::test]
    async fn unknown_command_replies_unk_cmd_and_sends_no_payload() {
        let session = session_for("DELETE", None);
        let config = Config::default();

        let (mut ctrl_tx, mut ctrl_rx) = duplex(256);
        let (mut data_tx, mut data_rx) = duplex(256);
        let err = dispatch_command(&session, &mut ctrl_tx, &mut data_tx, &config)
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::UnknownCommand(ref cmd) if cmd == "DELETE"));
        drop(ctrl_tx);
        drop(data_tx);

        assert_eq!(frame::recv_msg(&mut ctrl_rx).await.unwrap(), "UNK_CMD");
        let mut ctrl_rest = Vec::new();
        ctrl_rx.read_to_end(&mut ctrl_rest).await.unwrap();
        assert!(ctrl_rest.is_empty());
        let mut data_rest = Vec::new();
        data_rx.read_to_end(&mut data_rest).await.unwrap();
        assert!(data_rest.is_empty());
    }

    #[tokio::test]
    async fn list_dispatches_to_the_list_handler() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("x.txt"), b"x").unwrap();
        let session = session_for("LIST", None);
        let mut config = Config::default();
        config.server.serve_dir = dir.path().display().to_string();

        let (mut ctrl_tx, mut ctrl_rx) = duplex(256);
        let (mut data_tx, mut data_rx) = duplex(256);
        dispatch_command(&session, &mut ctrl_tx, &mut data_tx, &config)
            .await
            .unwrap();

        assert_eq!(frame::recv_msg(&mut ctrl_rx).await.unwrap(), "LIST_REPLY");
        assert_eq!(frame::recv_msg(&mut data_rx).await.unwrap(), "x.txt\n");
    }
}
