// Server configuration

use crate::constants::{
    client_version, CURRENT_COMMIT, DEFAULT_DEPTH_LIMIT, DEFAULT_REQUEST_TIMEOUT_SECS,
    PROTOCOL_VERSION,
};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("path prefix {0:?} must start with '/'")]
    PrefixNotAbsolute(String),
    #[error("path prefix {0:?} must not end with '/'")]
    PrefixTrailingSlash(String),
    #[error("path prefix {0:?} must not contain {1:?}")]
    PrefixForbidden(String, &'static str),
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
    #[error("depth limit must be greater than zero")]
    ZeroDepthLimit,
}

/// Values reported by `/version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub commit: String,
    pub client_version: String,
    pub protocol_version: String,
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self {
            commit: CURRENT_COMMIT.to_string(),
            client_version: client_version(),
            protocol_version: PROTOCOL_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Prefixes a reverse proxy may announce through `X-Ipfs-Gateway-Prefix`
    pub path_prefixes: Vec<String>,
    /// Resolve the Host header as a mutable name when the path has no scope
    pub hostname_routing: bool,
    pub request_timeout: Duration,
    pub depth_limit: usize,
    pub version: VersionInfo,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            path_prefixes: Vec::new(),
            hostname_routing: true,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            depth_limit: DEFAULT_DEPTH_LIMIT,
            version: VersionInfo::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for prefix in &self.path_prefixes {
            validate_configured_prefix(prefix)?;
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.depth_limit == 0 {
            return Err(ConfigError::ZeroDepthLimit);
        }
        Ok(())
    }
}

/// Operator-supplied prefixes end up verbatim in links and `Location` headers
pub fn validate_configured_prefix(prefix: &str) -> Result<(), ConfigError> {
    if !prefix.starts_with('/') {
        return Err(ConfigError::PrefixNotAbsolute(prefix.to_string()));
    }
    if prefix.ends_with('/') {
        return Err(ConfigError::PrefixTrailingSlash(prefix.to_string()));
    }
    for forbidden in ["//", "?", "#", "\"", "\\"] {
        if prefix.contains(forbidden) {
            return Err(ConfigError::PrefixForbidden(prefix.to_string(), forbidden));
        }
    }
    if prefix.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ConfigError::PrefixForbidden(prefix.to_string(), " "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.hostname_routing);
        assert_eq!(config.depth_limit, DEFAULT_DEPTH_LIMIT);
    }

    #[test]
    fn test_prefix_validation() {
        assert!(validate_configured_prefix("/good-prefix").is_ok());
        assert!(validate_configured_prefix("/a/b").is_ok());

        assert_eq!(
            validate_configured_prefix("good-prefix"),
            Err(ConfigError::PrefixNotAbsolute("good-prefix".into()))
        );
        assert_eq!(
            validate_configured_prefix("/good-prefix/"),
            Err(ConfigError::PrefixTrailingSlash("/good-prefix/".into()))
        );
        assert!(validate_configured_prefix("/").is_err());
        assert!(validate_configured_prefix("//evil.com").is_err());
        assert!(validate_configured_prefix("/a?b").is_err());
        assert!(validate_configured_prefix("/a#b").is_err());
        assert!(validate_configured_prefix("/a b").is_err());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = ServerConfig {
            request_timeout: Duration::ZERO,
            ..ServerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        let config = ServerConfig {
            depth_limit: 0,
            ..ServerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDepthLimit));
    }
}
