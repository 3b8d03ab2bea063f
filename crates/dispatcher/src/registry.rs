//! EndpointRegistry - resolved destinations, each with its own outbound socket

use std::net::SocketAddr;
use std::sync::Arc;

use contracts::{ContractError, DatagramTransport, EndpointDescriptor, MAX_ENDPOINTS};
use tracing::{debug, info, instrument, warn};

use crate::error::DispatcherError;
use crate::metrics::EndpointMetrics;
use crate::transport::UdpTransport;

/// Resolved destination
///
/// Address and handle stay valid for the process lifetime; there is no
/// re-resolution or reconnection.
#[derive(Debug)]
pub struct Endpoint<T> {
    descriptor: EndpointDescriptor,
    addr: SocketAddr,
    transport: T,
    metrics: Arc<EndpointMetrics>,
}

impl<T> Endpoint<T> {
    /// Create an endpoint from an already opened transport
    pub fn new(descriptor: EndpointDescriptor, addr: SocketAddr, transport: T) -> Self {
        Self {
            descriptor,
            addr,
            transport,
            metrics: Arc::new(EndpointMetrics::new()),
        }
    }

    /// Configured `host:port`
    pub fn descriptor(&self) -> &EndpointDescriptor {
        &self.descriptor
    }

    /// Resolved destination address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Outbound handle
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Shared metrics
    pub fn metrics(&self) -> &Arc<EndpointMetrics> {
        &self.metrics
    }
}

/// Ordered, bounded set of resolved endpoints
#[derive(Debug)]
pub struct EndpointRegistry<T = UdpTransport> {
    endpoints: Vec<Endpoint<T>>,
}

impl<T: DatagramTransport> EndpointRegistry<T> {
    /// Build a registry from resolved endpoints (fan-out order is preserved)
    pub fn from_endpoints(endpoints: Vec<Endpoint<T>>) -> Result<Self, DispatcherError> {
        if endpoints.is_empty() {
            return Err(DispatcherError::NoEndpoints);
        }
        if endpoints.len() > MAX_ENDPOINTS {
            return Err(DispatcherError::TooManyEndpoints {
                count: endpoints.len(),
                max: MAX_ENDPOINTS,
            });
        }
        Ok(Self { endpoints })
    }
}

impl<T> EndpointRegistry<T> {
    /// Endpoints in fan-out order
    pub fn endpoints(&self) -> &[Endpoint<T>] {
        &self.endpoints
    }

    /// Number of endpoints
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Always false for a constructed registry
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Resolution options
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Narrate socket creation at info level
    pub verbose: bool,
}

impl EndpointRegistry<UdpTransport> {
    /// Resolve every descriptor and open one outbound socket per endpoint
    ///
    /// Any endpoint that fails aborts the whole registry; a partially resolved
    /// registry is never returned.
    #[instrument(
        name = "endpoint_registry_resolve",
        skip(descriptors, options),
        fields(endpoint_count = descriptors.len())
    )]
    pub async fn resolve(
        descriptors: &[EndpointDescriptor],
        options: ResolveOptions,
    ) -> Result<Self, DispatcherError> {
        if descriptors.len() > MAX_ENDPOINTS {
            return Err(DispatcherError::TooManyEndpoints {
                count: descriptors.len(),
                max: MAX_ENDPOINTS,
            });
        }

        let mut endpoints = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            endpoints.push(resolve_endpoint(descriptor, options).await?);
        }
        Self::from_endpoints(endpoints)
    }
}

/// Resolve one descriptor, keeping the first candidate that yields a socket
#[instrument(name = "endpoint_resolve", skip(options), fields(endpoint = %descriptor))]
async fn resolve_endpoint(
    descriptor: &EndpointDescriptor,
    options: ResolveOptions,
) -> Result<Endpoint<UdpTransport>, DispatcherError> {
    let candidates = tokio::net::lookup_host((descriptor.host.as_str(), descriptor.port))
        .await
        .map_err(|e| ContractError::resolve(&descriptor.host, descriptor.port, e.to_string()))?;

    let mut last_error = None;
    for addr in candidates {
        match UdpTransport::for_target(addr).await {
            Ok(transport) => {
                if options.verbose {
                    info!(
                        endpoint = %descriptor,
                        addr = %addr,
                        "UDP socket to {} created",
                        addr.ip()
                    );
                } else {
                    debug!(endpoint = %descriptor, addr = %addr, "UDP socket created");
                }
                return Ok(Endpoint::new(descriptor.clone(), addr, transport));
            }
            Err(e) => {
                warn!(
                    endpoint = %descriptor,
                    addr = %addr,
                    error = %e,
                    "socket creation failed, trying next candidate"
                );
                last_error = Some(e);
            }
        }
    }

    let err = match last_error {
        Some(e) => ContractError::socket_create(descriptor.to_string(), e.to_string()),
        None => ContractError::resolve(&descriptor.host, descriptor.port, "no addresses returned"),
    };
    Err(err.into())
}
