use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpStream;

/// Opens the outbound data connection: the server is the connecting party
/// for this leg, dialing the control peer's address at the port the
/// client advertised in its preamble.
pub async fn setup_data_connection(ip: IpAddr, port: u16) -> Result<TcpStream, std::io::Error> {
    let addr = SocketAddr::new(ip, port);
    let data_stream = TcpStream::connect(addr).await?;
    Ok(data_stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn connects_to_an_advertised_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let connect = setup_data_connection(IpAddr::V4(Ipv4Addr::LOCALHOST), port);
        let (accepted, _) = tokio::join!(listener.accept(), connect);
        assert!(accepted.is_ok());
    }

    #[tokio::test]
    async fn refused_port_is_an_error() {
        // Bind then drop to find a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = setup_data_connection(IpAddr::V4(Ipv4Addr::LOCALHOST), port).await;
        assert!(result.is_err());
    }
}
