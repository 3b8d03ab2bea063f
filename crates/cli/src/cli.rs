//! CLI argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use contracts::FrameLayout;

/// ADC Bridge - fixed-rate ADC sampling streamed over UDP
#[derive(Parser, Debug, Clone)]
#[command(
    name = "adc-bridge",
    author,
    version,
    about = "Sample ADC channels at a fixed rate and send each reading as a UDP datagram",
    long_about = "Reads the IIO voltage channels of an on-board ADC at a fixed frequency.\n\n\
                  Every tick reads all configured channels, packs them into one binary \n\
                  frame and sends a copy of it to each configured endpoint.",
    disable_help_flag = true
)]
pub struct Cli {
    /// Print help (`-h` selects the endpoints)
    #[allow(dead_code)]
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,

    /// Endpoints as host1:port1[,host2:port2[,...]], or a single host for the fixed layout
    #[arg(short = 'h', long = "hosts", value_name = "ENDPOINTS", env = "ADC_BRIDGE_HOSTS")]
    pub hosts: Option<String>,

    /// Destination port for the fixed layout (0-32767)
    #[arg(short = 'p', long, env = "ADC_BRIDGE_PORT")]
    pub port: Option<u16>,

    /// Sampling frequency in Hz
    #[arg(short = 'f', long, value_name = "HZ", env = "ADC_BRIDGE_FREQUENCY")]
    pub frequency: Option<f64>,

    /// Number of channels to sample, starting at ADC0
    #[arg(short = 'n', long = "channels", value_name = "COUNT", env = "ADC_BRIDGE_CHANNELS")]
    pub channels: Option<usize>,

    /// Frame layout sent on the wire
    #[arg(long, value_enum, env = "ADC_BRIDGE_LAYOUT")]
    pub layout: Option<LayoutArg>,

    /// Path to configuration file (TOML or JSON); flags override its values
    #[arg(short = 'c', long, env = "ADC_BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// IIO device directory holding in_voltage<N>_raw
    #[arg(long, env = "ADC_BRIDGE_IIO_DEVICE")]
    pub iio_device: Option<PathBuf>,

    /// Stop after this many timer expirations (0 = unlimited)
    #[arg(long, default_value = "0", env = "ADC_BRIDGE_MAX_TICKS")]
    pub max_ticks: u64,

    /// Validate configuration and exit without touching hardware or network
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "ADC_BRIDGE_METRICS_PORT")]
    pub metrics_port: u16,

    /// Narrate setup; repeat for more logging (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, env = "ADC_BRIDGE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "compact", env = "ADC_BRIDGE_LOG_FORMAT")]
    pub log_format: LogFormat,
}

/// Frame layout
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutArg {
    /// Count byte followed by 3 bytes per channel
    Counted,
    /// 8 channels of 4 bytes, single endpoint
    Fixed,
}

impl From<LayoutArg> for FrameLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Counted => FrameLayout::Counted,
            LayoutArg::Fixed => FrameLayout::Fixed,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
