//! Configuration validation
//!
//! Rules:
//! - frequency_hz finite, > 0, with a non-zero period
//! - counted layout: 1 <= channel_count <= MAX_CHANNELS
//! - fixed layout: exactly 8 channels, one endpoint, port <= 32767
//! - 1..=MAX_ENDPOINTS endpoints with non-empty hosts

use contracts::{
    BridgeBlueprint, ChannelSet, ContractError, FrameLayout, SamplingPeriod,
    FIXED_LAYOUT_CHANNELS, FIXED_LAYOUT_MAX_PORT, MAX_ENDPOINTS,
};

/// Validate a BridgeBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &BridgeBlueprint) -> Result<(), ContractError> {
    validate_frequency(blueprint)?;
    validate_channels(blueprint)?;
    validate_endpoints(blueprint)?;
    Ok(())
}

/// Validate the sampling frequency
fn validate_frequency(blueprint: &BridgeBlueprint) -> Result<(), ContractError> {
    SamplingPeriod::from_frequency(blueprint.frequency_hz)
        .map(|_| ())
        .map_err(|e| ContractError::config_validation("frequency_hz", e.to_string()))
}

/// Validate the channel count against the layout
fn validate_channels(blueprint: &BridgeBlueprint) -> Result<(), ContractError> {
    match blueprint.layout {
        FrameLayout::Counted => ChannelSet::new(blueprint.channel_count).map(|_| ()),
        FrameLayout::Fixed => {
            if blueprint.channel_count != FIXED_LAYOUT_CHANNELS {
                return Err(ContractError::config_validation(
                    "channel_count",
                    format!(
                        "fixed layout always carries {FIXED_LAYOUT_CHANNELS} channels, got {}",
                        blueprint.channel_count
                    ),
                ));
            }
            Ok(())
        }
    }
}

/// Validate endpoint list
fn validate_endpoints(blueprint: &BridgeBlueprint) -> Result<(), ContractError> {
    let count = blueprint.endpoints.len();
    if count == 0 || count > MAX_ENDPOINTS {
        return Err(ContractError::config_validation(
            "endpoints",
            format!("expected 1..={MAX_ENDPOINTS} endpoints, got {count}"),
        ));
    }

    for (idx, endpoint) in blueprint.endpoints.iter().enumerate() {
        if endpoint.host.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("endpoints[{idx}].host"),
                "host cannot be empty",
            ));
        }
    }

    if blueprint.layout == FrameLayout::Fixed {
        if count != 1 {
            return Err(ContractError::config_validation(
                "endpoints",
                format!("fixed layout sends to a single endpoint, got {count}"),
            ));
        }
        let port = blueprint.endpoints[0].port;
        if port > FIXED_LAYOUT_MAX_PORT {
            return Err(ContractError::config_validation(
                "endpoints[0].port",
                format!("port must be in 0..={FIXED_LAYOUT_MAX_PORT}, got {port}"),
            ));
        }
    }

    Ok(())
}
