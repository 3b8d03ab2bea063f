//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - Sysfs channels -> encoder -> UDP on loopback
//! - Fan-out with a failing endpoint
//! - Fixed layout frames
//! - Configuration file driven runs

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
        assert_eq!(contracts::FrameLayout::default(), contracts::FrameLayout::Counted);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::net::SocketAddr;
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;

    use codec::{decode, FrameEncoder};
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{
        ChannelSet, DatagramTransport, EndpointDescriptor, FrameLayout, SamplingPeriod,
        FIXED_LAYOUT_CHANNELS,
    };
    use dispatcher::{Endpoint, EndpointRegistry, ResolveOptions, UdpTransport};
    use ingestion::{ChannelBank, ChannelSource, MockChannel};
    use scheduler::{Scheduler, SchedulerConfig, SchedulerState, StopReason, TickContext};
    use tokio::net::UdpSocket;

    async fn receiver() -> (UdpSocket, u16) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = socket.local_addr().unwrap().port();
        (socket, port)
    }

    async fn recv(socket: &UdpSocket) -> Vec<u8> {
        let mut buf = [0u8; 128];
        let (len, _) = tokio::time::timeout(Duration::from_secs(2), socket.recv_from(&mut buf))
            .await
            .expect("datagram not received in time")
            .unwrap();
        buf[..len].to_vec()
    }

    fn write_channels(dir: &Path, values: &[&str]) {
        for (i, value) in values.iter().enumerate() {
            std::fs::write(dir.join(format!("in_voltage{i}_raw")), value).unwrap();
        }
    }

    async fn run_once<T>(bank: ChannelBank, layout: FrameLayout, registry: EndpointRegistry<T>)
    where
        T: DatagramTransport + Send + Sync + 'static,
    {
        let encoder = FrameEncoder::new(layout, bank.channel_set());
        let context = TickContext::new(bank, encoder, Arc::new(registry)).unwrap();
        let period = SamplingPeriod::from_frequency(100.0).unwrap();
        let scheduler =
            Scheduler::new(SchedulerConfig::new(period).with_max_ticks(1), context).unwrap();
        let report = scheduler.run(std::future::pending::<()>()).await.unwrap();
        assert_eq!(report.stop_reason, StopReason::MaxTicks);
        assert_eq!(report.stats.ticks_completed, 1);
    }

    /// End-to-end test: sysfs files -> ChannelBank -> FrameEncoder -> UDP
    #[tokio::test]
    async fn test_e2e_sysfs_to_udp() {
        let dir = tempfile::tempdir().unwrap();
        write_channels(dir.path(), &["100\n", "4095\n"]);
        let (socket, port) = receiver().await;

        let set = ChannelSet::new(2).unwrap();
        let bank = ChannelBank::open_sysfs(&set, dir.path()).unwrap();
        let registry = EndpointRegistry::resolve(
            &[EndpointDescriptor::new("127.0.0.1", port)],
            ResolveOptions::default(),
        )
        .await
        .unwrap();

        run_once(bank, FrameLayout::Counted, registry).await;

        assert_eq!(recv(&socket).await, vec![0x02, 0x01, 0x64, 0x00, 0x02, 0xFF, 0x0F]);
    }

    #[tokio::test]
    async fn test_e2e_malformed_reading_sends_zero() {
        let dir = tempfile::tempdir().unwrap();
        write_channels(dir.path(), &["garbage", "70000"]);
        let (socket, port) = receiver().await;

        let bank = ChannelBank::open_sysfs(&ChannelSet::new(2).unwrap(), dir.path()).unwrap();
        let registry = EndpointRegistry::resolve(
            &[EndpointDescriptor::new("127.0.0.1", port)],
            ResolveOptions::default(),
        )
        .await
        .unwrap();

        run_once(bank, FrameLayout::Counted, registry).await;

        let frame = decode(FrameLayout::Counted, &recv(&socket).await).unwrap();
        assert_eq!(frame.samples(), vec![0, 4464]);
    }

    #[tokio::test]
    async fn test_missing_channel_file_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        write_channels(dir.path(), &["1"]);

        let err = ChannelBank::open_sysfs(&ChannelSet::new(2).unwrap(), dir.path()).unwrap_err();
        assert!(err.to_string().contains("Could not open port ADC1"), "got: {err}");
    }

    /// Transport that is either a real UDP socket or permanently broken
    enum TestTransport {
        Udp(UdpTransport),
        Broken,
    }

    impl DatagramTransport for TestTransport {
        async fn send_to(&self, payload: &[u8], target: SocketAddr) -> std::io::Result<usize> {
            match self {
                Self::Udp(transport) => transport.send_to(payload, target).await,
                Self::Broken => Err(std::io::Error::new(
                    std::io::ErrorKind::NetworkUnreachable,
                    "network unreachable",
                )),
            }
        }
    }

    #[tokio::test]
    async fn test_fan_out_survives_failing_endpoint() {
        let (first, first_port) = receiver().await;
        let (last, last_port) = receiver().await;

        let mut endpoints = Vec::new();
        for port in [first_port, 9, last_port] {
            let addr: SocketAddr = ([127, 0, 0, 1], port).into();
            let transport = if port == 9 {
                TestTransport::Broken
            } else {
                TestTransport::Udp(UdpTransport::for_target(addr).await.unwrap())
            };
            endpoints.push(Endpoint::new(
                EndpointDescriptor::new("127.0.0.1", port),
                addr,
                transport,
            ));
        }
        let registry = EndpointRegistry::from_endpoints(endpoints).unwrap();
        let bank = ChannelBank::from_sources(vec![
            Box::new(MockChannel::fixed(0, 100)),
            Box::new(MockChannel::fixed(1, 4095)),
        ])
        .unwrap();

        run_once(bank, FrameLayout::Counted, registry).await;

        let expected = vec![0x02, 0x01, 0x64, 0x00, 0x02, 0xFF, 0x0F];
        assert_eq!(recv(&first).await, expected);
        assert_eq!(recv(&last).await, expected);
    }

    #[tokio::test]
    async fn test_fixed_layout_frame() {
        let (socket, port) = receiver().await;
        let sources: Vec<Box<dyn ChannelSource>> = (0..FIXED_LAYOUT_CHANNELS as u8)
            .map(|i| Box::new(MockChannel::fixed(i, 1000 + u16::from(i))) as Box<dyn ChannelSource>)
            .collect();
        let bank = ChannelBank::from_sources(sources).unwrap();
        let registry = EndpointRegistry::resolve(
            &[EndpointDescriptor::new("127.0.0.1", port)],
            ResolveOptions::default(),
        )
        .await
        .unwrap();

        run_once(bank, FrameLayout::Fixed, registry).await;

        let payload = recv(&socket).await;
        assert_eq!(payload.len(), 32);
        let frame = decode(FrameLayout::Fixed, &payload).unwrap();
        assert_eq!(frame.entries[0], (1, 1000));
        assert_eq!(frame.entries[7], (8, 1007));
    }

    /// Configuration file -> validated blueprint -> running scheduler
    #[tokio::test]
    async fn test_config_driven_run() {
        let dir = tempfile::tempdir().unwrap();
        write_channels(dir.path(), &["1", "2", "3"]);
        let (socket, port) = receiver().await;

        let toml = format!(
            r#"
frequency_hz = 200.0
channel_count = 3

[channels]
iio_device = "{}"

[[endpoints]]
host = "127.0.0.1"
port = {port}
"#,
            dir.path().display()
        );
        let blueprint = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();

        let period = SamplingPeriod::from_frequency(blueprint.frequency_hz).unwrap();
        assert_eq!(period.to_string(), "0 sec + 5000000 nsec");

        let set = ChannelSet::new(blueprint.channel_count).unwrap();
        let bank = ChannelBank::open_sysfs(&set, &blueprint.channels.iio_device).unwrap();
        let registry = EndpointRegistry::resolve(&blueprint.endpoints, ResolveOptions::default())
            .await
            .unwrap();
        let registry = Arc::new(registry);
        let encoder = FrameEncoder::new(blueprint.layout, set);
        let context = TickContext::new(bank, encoder, Arc::clone(&registry)).unwrap();
        let scheduler =
            Scheduler::new(SchedulerConfig::new(period).with_max_ticks(3), context).unwrap();
        let state = scheduler.subscribe();

        let report = scheduler.run(std::future::pending::<()>()).await.unwrap();

        assert_eq!(*state.borrow(), SchedulerState::Terminated);
        assert_eq!(report.stats.expirations(), 3);
        let first = decode(FrameLayout::Counted, &recv(&socket).await).unwrap();
        assert_eq!(first.samples(), vec![1, 2, 3]);

        let sent = registry.endpoints()[0].metrics().sent_count();
        assert_eq!(sent, report.stats.ticks_completed);
    }

    #[tokio::test]
    async fn test_shutdown_signal_terminates_run() {
        let bank = ChannelBank::from_sources(vec![Box::new(MockChannel::fixed(0, 1))]).unwrap();
        let (_socket, port) = receiver().await;
        let registry = EndpointRegistry::resolve(
            &[EndpointDescriptor::new("127.0.0.1", port)],
            ResolveOptions::default(),
        )
        .await
        .unwrap();
        let encoder = FrameEncoder::new(FrameLayout::Counted, bank.channel_set());
        let context = TickContext::new(bank, encoder, Arc::new(registry)).unwrap();
        let period = SamplingPeriod::from_frequency(50.0).unwrap();
        let scheduler = Scheduler::new(SchedulerConfig::new(period), context).unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(120)).await;
            let _ = tx.send(());
        });

        let report = scheduler
            .run(async {
                let _ = rx.await;
            })
            .await
            .unwrap();

        assert_eq!(report.stop_reason, StopReason::Shutdown);
        assert!(report.stats.ticks_completed >= 1);
    }

    #[test]
    fn test_run_summary_from_counters() {
        let summary = observability::RunSummary {
            ticks_fired: 9,
            ticks_completed: 9,
            ticks_missed: 1,
            ..Default::default()
        };
        assert!((summary.miss_rate() - 10.0).abs() < 1e-10);
    }
}
