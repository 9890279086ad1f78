// Utility functions for host validation and argument parsing

use crate::constants::{MAX_LABEL_LEN, MAX_NAME_LEN};
use regex::Regex;
use std::sync::LazyLock;

static DOMAIN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z](?:[a-z0-9-]*[a-z0-9])?$")
        .expect("domain name pattern is valid")
});

/// Strip the port from a Host header value (`example.com:8080`, `[::1]:8080`)
pub fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return match rest.find(']') {
            Some(end) => &host[..end + 2],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') && port.bytes().all(|b| b.is_ascii_digit()) => {
            name
        }
        _ => host,
    }
}

/// Normalize a Host header value into a lookup key: no port, lowercase, no trailing dot
pub fn normalize_host(host: &str) -> String {
    strip_port(host.trim())
        .trim_end_matches('.')
        .to_ascii_lowercase()
}

/// Whether `host` (already normalized) is a multi-label DNS name
///
/// IP literals and single-label names such as `localhost` are not.
pub fn is_domain_name(host: &str) -> bool {
    if host.is_empty() || host.len() > MAX_NAME_LEN {
        return false;
    }
    if host.split('.').any(|label| label.len() > MAX_LABEL_LEN) {
        return false;
    }
    DOMAIN_NAME.is_match(host)
}

/// Parse duration string (e.g., "60s", "5m", "1h") into Duration
pub fn parse_duration(s: &str) -> anyhow::Result<tokio::time::Duration> {
    use anyhow::Context;
    use tokio::time::Duration;

    let s = s.trim();
    if let Some(stripped) = s.strip_suffix("ms") {
        let millis: u64 = stripped.parse().context("Invalid duration format")?;
        Ok(Duration::from_millis(millis))
    } else if let Some(stripped) = s.strip_suffix('s') {
        let secs: u64 = stripped.parse().context("Invalid duration format")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(stripped) = s.strip_suffix('m') {
        let mins: u64 = stripped.parse().context("Invalid duration format")?;
        Ok(Duration::from_secs(mins * 60))
    } else if let Some(stripped) = s.strip_suffix('h') {
        let hours: u64 = stripped.parse().context("Invalid duration format")?;
        Ok(Duration::from_secs(hours * 3600))
    } else {
        // Bare numbers are seconds
        let secs: u64 = s.parse().context("Invalid duration format")?;
        Ok(Duration::from_secs(secs))
    }
}
