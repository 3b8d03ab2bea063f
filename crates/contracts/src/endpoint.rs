//! EndpointDescriptor - a configured datagram destination

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the number of configured endpoints
pub const MAX_ENDPOINTS: usize = 10;

/// Highest port accepted for the single-endpoint fixed layout
pub const FIXED_LAYOUT_MAX_PORT: u16 = 32767;

/// Unresolved `host:port` destination
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Literal IP address or resolvable name
    pub host: String,
    /// Destination port
    pub port: u16,
}

impl EndpointDescriptor {
    /// Create a descriptor
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for EndpointDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
