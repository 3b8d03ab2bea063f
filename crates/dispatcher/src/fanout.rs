//! Fan-out sender - one copy of every frame to every endpoint

use contracts::{DatagramTransport, Frame};
use metrics::counter;
use tracing::{error, trace, warn};

use crate::registry::{Endpoint, EndpointRegistry};

/// Result of sending one frame to one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Whole frame handed to the transport
    Sent,
    /// Only part of the frame was handed over
    Short { sent: usize, expected: usize },
    /// Transport rejected the datagram
    Failed(String),
}

impl DeliveryStatus {
    /// True for a complete send
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Short { .. } => "short",
            Self::Failed(_) => "failed",
        }
    }
}

/// Per-endpoint outcome of one fan-out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// Endpoint as configured (`host:port`)
    pub endpoint: String,
    /// What happened
    pub status: DeliveryStatus,
}

/// Outcomes of one fan-out, in registry order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutReport {
    pub outcomes: Vec<DeliveryOutcome>,
}

impl FanOutReport {
    /// Endpoints that received the full frame
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_sent()).count()
    }

    /// Endpoints with a short write or error
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.delivered()
    }
}

/// Send `frame` to every endpoint of `registry`
///
/// Each send is independent: a short write or error is logged and recorded,
/// then the next endpoint is served. Nothing is retried.
pub async fn fan_out<T: DatagramTransport + Sync>(
    frame: &Frame,
    registry: &EndpointRegistry<T>,
) -> FanOutReport {
    let mut outcomes = Vec::with_capacity(registry.len());
    for endpoint in registry.endpoints() {
        let status = deliver(frame, endpoint).await;
        counter!(
            "adc_bridge_datagrams_total",
            "endpoint" => endpoint.descriptor().to_string(),
            "status" => status.label()
        )
        .increment(1);
        outcomes.push(DeliveryOutcome {
            endpoint: endpoint.descriptor().to_string(),
            status,
        });
    }
    FanOutReport { outcomes }
}

async fn deliver<T: DatagramTransport + Sync>(
    frame: &Frame,
    endpoint: &Endpoint<T>,
) -> DeliveryStatus {
    let expected = frame.len();
    match endpoint
        .transport()
        .send_to(frame.as_bytes(), endpoint.addr())
        .await
    {
        Ok(sent) if sent == expected => {
            endpoint.metrics().record_sent(sent);
            trace!(endpoint = %endpoint.descriptor(), seq = frame.seq, bytes = sent, "Sent");
            DeliveryStatus::Sent
        }
        Ok(sent) => {
            endpoint.metrics().record_short(sent);
            warn!(
                endpoint = %endpoint.descriptor(),
                seq = frame.seq,
                sent,
                expected,
                "Mismatch in number of ADC bytes sent"
            );
            DeliveryStatus::Short { sent, expected }
        }
        Err(e) => {
            // Log but don't fail - UDP is best-effort
            endpoint.metrics().inc_failure_count();
            error!(
                endpoint = %endpoint.descriptor(),
                seq = frame.seq,
                error = %e,
                "UDP send failed"
            );
            DeliveryStatus::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::EndpointDescriptor;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    fn payload(bytes: &[u8]) -> Frame {
        Frame::new(1, bytes.to_vec().into())
    }

    /// Mock transport for testing
    #[derive(Default)]
    struct MockTransport {
        fail: bool,
        truncate_to: Option<usize>,
        sent: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl DatagramTransport for MockTransport {
        async fn send_to(&self, payload: &[u8], _target: SocketAddr) -> std::io::Result<usize> {
            if self.fail {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "unreachable",
                ));
            }
            let len = self.truncate_to.unwrap_or(payload.len()).min(payload.len());
            self.sent.lock().unwrap().push(payload[..len].to_vec());
            Ok(len)
        }
    }

    fn endpoint(port: u16, transport: MockTransport) -> Endpoint<MockTransport> {
        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        Endpoint::new(EndpointDescriptor::new("127.0.0.1", port), addr, transport)
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_remaining_endpoints() {
        let first = Arc::new(Mutex::new(Vec::new()));
        let last = Arc::new(Mutex::new(Vec::new()));
        let registry = EndpointRegistry::from_endpoints(vec![
            endpoint(
                1,
                MockTransport {
                    sent: Arc::clone(&first),
                    ..Default::default()
                },
            ),
            endpoint(
                2,
                MockTransport {
                    fail: true,
                    ..Default::default()
                },
            ),
            endpoint(
                3,
                MockTransport {
                    sent: Arc::clone(&last),
                    ..Default::default()
                },
            ),
        ])
        .unwrap();

        let report = fan_out(&payload(&[1, 2, 3]), &registry).await;

        assert_eq!(report.delivered(), 2);
        assert_eq!(report.failed(), 1);
        assert!(matches!(report.outcomes[1].status, DeliveryStatus::Failed(_)));
        assert_eq!(first.lock().unwrap().len(), 1);
        assert_eq!(last.lock().unwrap()[0], vec![1, 2, 3]);
        assert_eq!(registry.endpoints()[1].metrics().failure_count(), 1);
        assert_eq!(registry.endpoints()[2].metrics().sent_count(), 1);
    }

    #[tokio::test]
    async fn test_short_write_reported() {
        let registry = EndpointRegistry::from_endpoints(vec![endpoint(
            1,
            MockTransport {
                truncate_to: Some(2),
                ..Default::default()
            },
        )])
        .unwrap();

        let report = fan_out(&payload(&[1, 2, 3, 4]), &registry).await;

        assert_eq!(
            report.outcomes[0].status,
            DeliveryStatus::Short {
                sent: 2,
                expected: 4
            }
        );
        assert_eq!(registry.endpoints()[0].metrics().short_count(), 1);
        assert_eq!(registry.endpoints()[0].metrics().bytes_sent(), 2);
    }

    #[tokio::test]
    async fn test_outcomes_follow_registry_order() {
        let registry = EndpointRegistry::from_endpoints(vec![
            endpoint(7, MockTransport::default()),
            endpoint(8, MockTransport::default()),
        ])
        .unwrap();

        let report = fan_out(&payload(&[0]), &registry).await;
        let names: Vec<&str> = report.outcomes.iter().map(|o| o.endpoint.as_str()).collect();
        assert_eq!(names, vec!["127.0.0.1:7", "127.0.0.1:8"]);
    }
}
