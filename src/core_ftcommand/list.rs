use crate::constants::LIST_REPLY;
use crate::core_error::TransferError;
use crate::core_proto::frame;
use log::info;
use std::io;
use std::path::Path;
use tokio::io::AsyncWrite;

/// Joins the entry names of `path` with newlines, in whatever order the
/// directory enumeration yields them. Clients do not depend on order, so
/// none is imposed. The listing is built per request, never cached.
pub async fn list_directory(path: &Path) -> io::Result<String> {
    let mut entries = tokio::fs::read_dir(path).await?;
    let mut listing = String::new();
    while let Some(entry) = entries.next_entry().await? {
        listing.push_str(&entry.file_name().to_string_lossy());
        listing.push('\n');
    }
    Ok(listing)
}

/// Handles the LIST command.
///
/// Echoes `LIST_REPLY` on the control connection, then sends the serving
/// directory's listing as one framed message over the data connection.
/// Failures after the reply are the caller's to log; the client is never
/// told about them.
pub async fn handle_list_command<C, D>(
    ctrl: &mut C,
    data: &mut D,
    serve_dir: &Path,
    data_port: &str,
) -> Result<(), TransferError>
where
    C: AsyncWrite + Unpin,
    D: AsyncWrite + Unpin,
{
    frame::send_msg(LIST_REPLY, ctrl).await?;
    info!("Directory listing requested on port {}", data_port);

    let listing = list_directory(serve_dir).await?;
    frame::send_msg(&listing, data).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs::File;
    use tempfile::tempdir;
    use tokio::io::duplex;

    #[tokio::test]
    async fn listing_holds_exactly_the_enumerated_names() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.txt")).unwrap();
        File::create(dir.path().join("b.txt")).unwrap();

        let listing = list_directory(dir.path()).await.unwrap();
        let names: HashSet<&str> = listing.lines().collect();
        assert_eq!(names, HashSet::from(["a.txt", "b.txt"]));
    }

    #[tokio::test]
    async fn empty_directory_lists_as_empty_text() {
        let dir = tempdir().unwrap();
        assert_eq!(list_directory(dir.path()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn unopenable_path_is_an_error() {
        assert!(list_directory(Path::new("/no/such/dir")).await.is_err());
    }

    #[tokio::test]
    async fn replies_then_sends_listing_over_data() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("only.txt")).unwrap();

        let (mut ctrl_tx, mut ctrl_rx) = duplex(256);
        let (mut data_tx, mut data_rx) = duplex(256);
        handle_list_command(&mut ctrl_tx, &mut data_tx, dir.path(), "6000")
            .await
            .unwrap();

        assert_eq!(frame::recv_msg(&mut ctrl_rx).await.unwrap(), "LIST_REPLY");
        assert_eq!(frame::recv_msg(&mut data_rx).await.unwrap(), "only.txt\n");
    }
}
