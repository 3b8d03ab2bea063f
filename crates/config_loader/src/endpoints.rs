//! Endpoint list parsing
//!
//! The operator passes every destination in one string:
//! `host1:port1[,host2:port2[,...]]`. Empty segments between delimiters are
//! skipped, tokens after the port are ignored, and only the first
//! [`MAX_ENDPOINTS`] pairs are taken.

use contracts::{ContractError, EndpointDescriptor, MAX_ENDPOINTS};

/// Usage hint appended to endpoint list errors
pub const ENDPOINT_LIST_USAGE: &str = "use host1:port1[,host2:port2[,...]]";

const PAIR_DELIMITER: char = ',';
const HOST_PORT_DELIMITER: char = ':';

/// Parse a delimited endpoint list into ordered descriptors
///
/// # Errors
/// - a pair without host or port
/// - a non-numeric or out-of-range port
/// - a list with no pairs at all
pub fn parse_endpoint_list(input: &str) -> Result<Vec<EndpointDescriptor>, ContractError> {
    let endpoints = input
        .split(PAIR_DELIMITER)
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .take(MAX_ENDPOINTS)
        .map(parse_pair)
        .collect::<Result<Vec<_>, _>>()?;

    if endpoints.is_empty() {
        return Err(list_error(input, "no host:port pairs"));
    }

    Ok(endpoints)
}

/// Parse a single `host:port` pair
pub fn parse_pair(pair: &str) -> Result<EndpointDescriptor, ContractError> {
    let mut tokens = pair
        .split(HOST_PORT_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty());

    let (Some(host), Some(port)) = (tokens.next(), tokens.next()) else {
        return Err(list_error(pair, "missing host or port"));
    };

    let port = parse_port(port).map_err(|message| list_error(pair, message))?;
    Ok(EndpointDescriptor::new(host, port))
}

/// Parse a numeric port
pub fn parse_port(port: &str) -> Result<u16, String> {
    port.parse::<u16>()
        .map_err(|e| format!("invalid port '{port}': {e}"))
}

fn list_error(input: &str, message: impl AsRef<str>) -> ContractError {
    ContractError::config_parse(format!(
        "endpoint list '{input}' was improperly formatted ({}), {ENDPOINT_LIST_USAGE}",
        message.as_ref()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_pairs_in_order() {
        let endpoints = parse_endpoint_list("a.example:5800,b.example:5801").unwrap();
        assert_eq!(
            endpoints,
            vec![
                EndpointDescriptor::new("a.example", 5800),
                EndpointDescriptor::new("b.example", 5801),
            ]
        );
    }

    #[test]
    fn test_missing_port_is_error() {
        let err = parse_endpoint_list("a.example").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains(ENDPOINT_LIST_USAGE), "got: {err}");
    }

    #[test]
    fn test_missing_host_is_error() {
        assert!(parse_endpoint_list(":5800").is_err());
    }

    #[test]
    fn test_one_bad_pair_fails_whole_list() {
        assert!(parse_endpoint_list("a:1,b,c:3").is_err());
    }

    #[test]
    fn test_empty_list_is_error() {
        assert!(parse_endpoint_list("").is_err());
        assert!(parse_endpoint_list(",,").is_err());
    }

    #[test]
    fn test_empty_segments_skipped() {
        let endpoints = parse_endpoint_list(",a:1,,b:2,").unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[1].host, "b");
    }

    #[test]
    fn test_non_numeric_port_is_error() {
        let err = parse_endpoint_list("a:http").unwrap_err();
        assert!(err.to_string().contains("invalid port"), "got: {err}");
    }

    #[test]
    fn test_extra_tokens_ignored() {
        let endpoints = parse_endpoint_list("roborio-local:5801:junk").unwrap();
        assert_eq!(endpoints[0], EndpointDescriptor::new("roborio-local", 5801));
    }

    #[test]
    fn test_caps_at_max_endpoints() {
        let list: Vec<String> = (0..MAX_ENDPOINTS + 3)
            .map(|i| format!("h{i}:{}", 5000 + i))
            .collect();
        let endpoints = parse_endpoint_list(&list.join(",")).unwrap();
        assert_eq!(endpoints.len(), MAX_ENDPOINTS);
        assert_eq!(endpoints[MAX_ENDPOINTS - 1].host, format!("h{}", MAX_ENDPOINTS - 1));
    }
}
