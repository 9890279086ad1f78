// Routing prefix - the only form of the prefix hint that links and redirects accept

use std::fmt;

/// A prefix the operator allowed, or nothing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingPrefix(Option<String>);

impl RoutingPrefix {
    pub fn none() -> Self {
        Self(None)
    }

    /// Empty string when no prefix was accepted
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for RoutingPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accept the untrusted prefix hint only if it is exactly one of the configured prefixes
pub fn validate_prefix(candidate: Option<&[u8]>, configured: &[String]) -> RoutingPrefix {
    let Some(candidate) = candidate else {
        return RoutingPrefix::none();
    };
    match configured.iter().find(|allowed| allowed.as_bytes() == candidate) {
        Some(allowed) => RoutingPrefix(Some(allowed.clone())),
        None => {
            log::debug!(
                "[Gateway] ignoring prefix hint {:?}",
                String::from_utf8_lossy(candidate)
            );
            RoutingPrefix::none()
        }
    }
}
