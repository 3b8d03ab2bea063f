//! # Dispatcher
//!
//! Frame delivery.
//!
//! Responsible for:
//! - Resolving configured `host:port` pairs into an [`EndpointRegistry`]
//! - Fan-out of each encoded frame to every endpoint, in order
//! - Isolating failing endpoints: errors are logged and counted, never fatal

pub mod error;
pub mod fanout;
pub mod metrics;
pub mod registry;
pub mod transport;

pub use contracts::{DatagramTransport, Frame};
pub use error::DispatcherError;
pub use fanout::{DeliveryOutcome, DeliveryStatus, FanOutReport, fan_out};
pub use metrics::{EndpointMetrics, MetricsSnapshot};
pub use registry::{Endpoint, EndpointRegistry, ResolveOptions};
pub use transport::UdpTransport;
