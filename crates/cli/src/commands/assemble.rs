//! Merge configuration file and flags into one validated blueprint.

use config_loader::{parse_endpoint_list, ConfigLoader};
use contracts::{
    BridgeBlueprint, ChannelSourceConfig, ContractError, EndpointDescriptor, FrameLayout,
    FIXED_LAYOUT_CHANNELS,
};
use tracing::info;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Build the blueprint: file values first, flags on top, then validation
///
/// Nothing outside the configuration file is touched.
pub fn assemble_blueprint(cli: &Cli) -> Result<BridgeBlueprint> {
    let base = match &cli.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            Some(ConfigLoader::read_from_path(path)?)
        }
        None => None,
    };

    let layout = cli
        .layout
        .map(FrameLayout::from)
        .or_else(|| base.as_ref().map(|b| b.layout))
        .unwrap_or_default();

    let frequency_hz = cli
        .frequency
        .or_else(|| base.as_ref().map(|b| b.frequency_hz))
        .ok_or_else(|| CliError::missing("-f <frequencyHz>"))?;

    let channel_count = match (cli.channels, base.as_ref().map(|b| b.channel_count), layout) {
        (Some(count), _, _) | (None, Some(count), _) => count,
        (None, None, FrameLayout::Fixed) => FIXED_LAYOUT_CHANNELS,
        (None, None, FrameLayout::Counted) => return Err(CliError::missing("-n <channelCount>")),
    };

    let endpoints = match (&cli.hosts, layout) {
        (Some(hosts), FrameLayout::Counted) => parse_endpoint_list(hosts)?,
        (Some(host), FrameLayout::Fixed) => {
            let host = fixed_layout_host(host)?;
            let port = cli
                .port
                .or_else(|| base.as_ref().and_then(|b| b.endpoints.first()).map(|e| e.port))
                .ok_or_else(|| CliError::missing("-p <port>"))?;
            vec![EndpointDescriptor::new(host, port)]
        }
        (None, _) => {
            let mut endpoints = base
                .as_ref()
                .map(|b| b.endpoints.clone())
                .filter(|e| !e.is_empty())
                .ok_or_else(|| CliError::missing("-h <endpointList>"))?;
            if let (Some(port), FrameLayout::Fixed) = (cli.port, layout) {
                endpoints.iter_mut().for_each(|e| e.port = port);
            }
            endpoints
        }
    };

    let mut channels = base
        .as_ref()
        .map(|b| b.channels.clone())
        .unwrap_or_else(ChannelSourceConfig::default);
    if let Some(dir) = &cli.iio_device {
        channels.iio_device = dir.clone();
    }

    let blueprint = BridgeBlueprint {
        version: base.as_ref().map(|b| b.version).unwrap_or_default(),
        layout,
        frequency_hz,
        channel_count,
        verbose: cli.verbose > 0 || base.as_ref().is_some_and(|b| b.verbose),
        channels,
        endpoints,
    };

    ConfigLoader::validate(&blueprint)?;
    Ok(blueprint)
}

/// The single fixed-layout host; its port comes from `-p`
///
/// One colon means `host:port` was passed. IPv6 literals carry several.
fn fixed_layout_host(host: &str) -> Result<&str> {
    let host = host.trim();
    if host.matches(':').count() == 1 {
        return Err(ContractError::config_parse(format!(
            "'{host}': the fixed layout takes a bare host, pass the port with -p"
        ))
        .into());
    }
    Ok(host)
}
