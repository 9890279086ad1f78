//! Global constants and helpers for version identification, path scopes, request headers, resolution limits and server defaults
// Constants for version and binary identification

/// Binary name used in user agents and version output
pub const BINARY_NAME: &str = "cidgate";

/// Package version from Cargo.toml (set at compile time)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit hash baked in at build time (`CIDGATE_COMMIT=<hash> cargo build`), empty otherwise
pub const CURRENT_COMMIT: &str = match option_env!("CIDGATE_COMMIT") {
    Some(commit) => commit,
    None => "",
};

/// Protocol version advertised on `/version`
pub const PROTOCOL_VERSION: &str = "ipfs/0.1.0";

/// Returns the client version string (e.g. "cidgate/0.1.0")
pub fn client_version() -> String {
    format!("{}/{}", BINARY_NAME, VERSION)
}

// ============================================================================
// Path Scope Constants
// ============================================================================

/// Leading segment of content-addressed paths (`/ipfs/<cid>/...`)
pub const IPFS_SCOPE: &str = "ipfs";

/// Leading segment of mutable-name paths (`/ipns/<name>/...`)
pub const IPNS_SCOPE: &str = "ipns";

/// Child name served in place of a directory listing
pub const INDEX_DOCUMENT: &str = "index.html";

// ============================================================================
// Request/Response Header Constants
// ============================================================================

/// Client hint carrying the path prefix a reverse proxy mounted the gateway under
pub const PREFIX_HEADER: &str = "x-ipfs-gateway-prefix";

/// Response header carrying the content path that was served
pub const PATH_HEADER: &str = "x-ipfs-path";

/// Cache-Control value for immutable `/ipfs/` responses
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=29030400, immutable";

// ============================================================================
// Resolution Constants
// ============================================================================

/// Maximum number of name indirections followed by `NameResolver::resolve`
pub const DEFAULT_DEPTH_LIMIT: usize = 32;

/// Maximum length of a mutable name / hostname
pub const MAX_NAME_LEN: usize = 253;

/// Maximum length of a single hostname label
pub const MAX_LABEL_LEN: usize = 63;

// ============================================================================
// Server Defaults
// ============================================================================

/// Default listen host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Default time allowed for resolution and fetch of one request (in seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Body returned for unknown paths and missing content
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Prefix of every resolution failure body
pub const RESOLVE_ERROR_PREFIX: &str = "Path Resolve error";
