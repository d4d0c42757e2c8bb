// Socket setup for the HTTP server. A host of "*" binds a wildcard socket,
// preferring an IPv6 dual-stack listener and falling back to IPv4.

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub async fn create_listener(host: &str, port: u16) -> std::io::Result<(String, TcpListener)> {
    if host == "*" {
        return match bind_wildcard(Domain::IPV6, format!("[::]:{}", port)) {
            Ok(bound) => Ok(bound),
            Err(err) => {
                tracing::warn!("IPv6 dual-stack bind failed: {}. Falling back to IPv4.", err);
                bind_wildcard(Domain::IPV4, format!("0.0.0.0:{}", port))
            }
        };
    }

    let addr = format!("{}:{}", host, port);
    tracing::info!("Binding server to {}...", addr);

    let listener = TcpListener::bind(&addr).await?;
    Ok((addr, listener))
}

fn bind_wildcard(domain: Domain, str_addr: String) -> std::io::Result<(String, TcpListener)> {
    let addr: SocketAddr = str_addr
        .parse()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

    tracing::info!("Binding server to {}...", str_addr);

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    if domain == Domain::IPV6 {
        // Dual-stack where the platform allows it; plain IPv6 otherwise.
        if let Err(err) = socket.set_only_v6(false) {
            tracing::warn!(
                "Failed to enable dual-stack mode: {}. Continuing anyway.",
                err
            );
        }
    }

    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;

    // Tokio needs the socket in non-blocking mode
    socket.set_nonblocking(true)?;

    let std_listener: std::net::TcpListener = socket.into();
    let listener = TcpListener::from_std(std_listener)?;

    Ok((str_addr, listener))
}
