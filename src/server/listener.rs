use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::info;

use crate::error::ServerError;

/// Only one client may wait in the accept queue.
const BACKLOG: u32 = 1;

/// The bound, listening IPv4 socket. Closed once, when dropped or passed to
/// [`Listener::close`].
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    local_addr: SocketAddr,
}

impl Listener {
    /// Creates a reusable-address socket, binds it to `addr`, and listens.
    pub async fn bind(addr: &str) -> Result<Self, ServerError> {
        let setup = |source| ServerError::Setup {
            context: format!("failed to listen on {addr}"),
            source,
        };

        let sock_addr: SocketAddr = tokio::net::lookup_host(addr)
            .await
            .map_err(setup)?
            .find(SocketAddr::is_ipv4)
            .ok_or_else(|| {
                setup(std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    "no IPv4 address to bind",
                ))
            })?;

        let socket = TcpSocket::new_v4().map_err(setup)?;
        socket.set_reuseaddr(true).map_err(setup)?;
        socket.bind(sock_addr).map_err(setup)?;
        let inner = socket.listen(BACKLOG).map_err(setup)?;
        let local_addr = inner.local_addr().map_err(setup)?;

        info!("Listening on {}", local_addr);
        Ok(Self { inner, local_addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Waits for a pending peer and accepts it.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr), ServerError> {
        self.inner.accept().await.map_err(ServerError::Accept)
    }

    /// Closes the socket, returning any error left pending on it.
    pub fn close(self) -> Option<std::io::Error> {
        info!("Closing listener on {}", self.local_addr);
        let inner = match self.inner.into_std() {
            Ok(inner) => inner,
            Err(e) => return Some(e),
        };
        let pending = match inner.take_error() {
            Ok(pending) => pending,
            Err(e) => Some(e),
        };
        drop(inner);
        pending
    }
}
