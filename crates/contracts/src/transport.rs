//! DatagramTransport trait - outbound datagram interface
//!
//! Defines the abstract interface the fan-out sender writes frames through.

use std::net::SocketAddr;

/// Outbound, unconnected datagram handle
///
/// One handle is owned per endpoint.
#[trait_variant::make(DatagramTransport: Send)]
pub trait LocalDatagramTransport {
    /// Send one datagram to `target`
    ///
    /// Returns the number of bytes handed to the transport, which may be
    /// shorter than `payload`.
    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> std::io::Result<usize>;
}
