// Request routing - turns host, path and prefix into a content path and its canonical form

use crate::constants::{IPFS_SCOPE, IPNS_SCOPE};
use crate::content_path::{validate_segment, ContentPath};
use crate::server::config::ServerConfig;
use crate::server::error::GatewayError;
use crate::server::prefix::RoutingPrefix;
use crate::server::utils::{is_domain_name, normalize_host};
use axum::http::Uri;
use percent_encoding::percent_decode_str;

/// Where a request points and how it was addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRoute {
    /// `/ipfs/...` or `/ipns/...` path to resolve and fetch
    pub content_path: ContentPath,
    /// The host name stood in for the `/ipns/<host>` part of the path
    pub hostname_routed: bool,
    /// Requested segments after the prefix, decoded
    pub segments: Vec<String>,
    /// The same segments as they appeared on the wire
    pub raw_segments: Vec<String>,
    pub trailing_slash: bool,
}

impl RequestRoute {
    /// Number of leading segments that name the routing root
    pub fn root_depth(&self) -> usize {
        if self.hostname_routed {
            0
        } else {
            2
        }
    }

    /// Last requested segment below the routing root, if any
    pub fn file_name(&self) -> Option<&str> {
        self.segments
            .get(self.root_depth()..)
            .and_then(|rest| rest.last())
            .map(String::as_str)
    }
}

/// Request-scoped state threaded through resolution and rendering
#[derive(Debug, Clone)]
pub struct GatewayRequestContext {
    /// Host with port stripped and lowercased
    pub host: String,
    pub prefix: RoutingPrefix,
    pub query: Option<String>,
    pub route: RequestRoute,
    /// Names visited while resolving, for diagnostics
    pub trail: Vec<String>,
}

impl GatewayRequestContext {
    pub fn from_request(
        host: Option<&str>,
        uri: &Uri,
        prefix: RoutingPrefix,
        config: &ServerConfig,
    ) -> Result<Self, GatewayError> {
        let host = host.map(normalize_host).unwrap_or_default();
        let route = resolve_request(&host, uri.path(), &prefix, config.hostname_routing)?;
        Ok(Self {
            host,
            prefix,
            query: uri.query().filter(|q| !q.is_empty()).map(str::to_string),
            route,
            trail: Vec::new(),
        })
    }

    /// Canonical path as shown to users: prefix plus the requested segments
    pub fn canonical_path(&self) -> String {
        let mut path = self.prefix.as_str().to_string();
        path.push('/');
        for segment in &self.route.segments {
            path.push_str(segment);
            path.push('/');
        }
        path
    }

    /// The path that was requested, in `/ipfs/` or `/ipns/` form and still encoded
    pub fn requested_path(&self) -> String {
        let mut path = String::new();
        if self.route.hostname_routed {
            path.push('/');
            path.push_str(IPNS_SCOPE);
            path.push('/');
            path.push_str(&self.host);
        }
        for segment in &self.route.raw_segments {
            path.push('/');
            path.push_str(segment);
        }
        if self.route.trailing_slash {
            path.push('/');
        }
        path
    }
}

/// Decide what a request addresses
///
/// `host` must already be normalized. Explicitly scoped paths win over hostname routing.
pub fn resolve_request(
    host: &str,
    raw_path: &str,
    prefix: &RoutingPrefix,
    hostname_routing: bool,
) -> Result<RequestRoute, GatewayError> {
    let path = strip_prefix(raw_path, prefix.as_str());
    let raw_segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let mut segments = Vec::with_capacity(raw_segments.len());
    for raw in &raw_segments {
        let decoded = percent_decode_str(raw)
            .decode_utf8()
            .map_err(|_| GatewayError::InvalidPath(format!("invalid path segment: {:?}", raw)))?;
        validate_segment(&decoded)?;
        segments.push(decoded.into_owned());
    }

    let explicit = matches!(
        segments.first().map(String::as_str),
        Some(IPFS_SCOPE) | Some(IPNS_SCOPE)
    );

    let (content_path, hostname_routed) = if explicit {
        (ContentPath::from_segments(&segments)?, false)
    } else if hostname_routing && is_domain_name(host) {
        (ContentPath::ipns(host)?.join(&segments)?, true)
    } else {
        return Err(GatewayError::NotFound);
    };

    Ok(RequestRoute {
        content_path,
        hostname_routed,
        segments,
        raw_segments,
        trailing_slash: path.ends_with('/'),
    })
}

/// Remove `prefix` from the start of `path` on a segment boundary
fn strip_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return path;
    }
    match path.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}
