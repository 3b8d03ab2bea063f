//! UdpTransport - unconnected UDP socket used as a fire-and-forget transport

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use contracts::DatagramTransport;
use tokio::net::UdpSocket;

/// Outbound UDP socket for one endpoint
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Create a socket able to reach `target`
    ///
    /// Binds an ephemeral local port of the target's address family. No
    /// datagram is exchanged, so reachability is unknown until the first send.
    pub async fn for_target(target: SocketAddr) -> std::io::Result<Self> {
        let local: SocketAddr = match target {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(local).await?;
        Ok(Self { socket })
    }

    /// Local address of the socket
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl DatagramTransport for UdpTransport {
    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> std::io::Result<usize> {
        self.socket.send_to(payload, target).await
    }
}
