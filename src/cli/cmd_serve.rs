// Serve command - start the HTTP gateway over an in-memory store
use super::utils::{parse_publish, PublishArg};
use anyhow::Result;
use clap::{Args, ValueHint};
use std::path::PathBuf;

#[cfg(feature = "server")]
use tokio::time::Duration;

#[cfg(feature = "server")]
fn parse_duration_for_clap(s: &str) -> Result<Duration, String> {
    cidgate::server::parse_duration(s).map_err(|e| e.to_string())
}

#[derive(Args)]
#[command(
    about = "Start the HTTP gateway",
    long_about = "Start an HTTP gateway serving content by identifier and by name.

Content is imported into an in-memory store from the paths given with --add and
--publish. Requests for /ipfs/<cid>/... are served directly. Requests for
/ipns/<name>/..., or for any other path on a host whose name is published, are
resolved through the name table first (following up to --depth-limit
indirections).

When the gateway sits behind a reverse proxy mounted under a sub-path, list that
sub-path with --path-prefix. The proxy announces it through the
X-Ipfs-Gateway-Prefix header, and only exact matches are used in links and
redirects.",
    help_template = crate::clap_help!(
        examples: "  # Serve a directory on the default port (8080)\n  \
                   {bin} serve --add ./site\n\n  \
                   # Publish a directory under a host name\n  \
                   {bin} serve --publish example.net=./site\n\n  \
                   # Name pointing to another name\n  \
                   {bin} serve --publish example.net=./site --publish www.example.net=/ipns/example.net\n\n  \
                   # Behind a proxy mounted at /gateway\n  \
                   {bin} serve --add ./site --path-prefix /gateway\n\n  \
                   # Custom host, port and timeout\n  \
                   {bin} serve --host 0.0.0.0 --port 3000 --timeout 30s --add ./site"
    )
)]
pub struct ServeCommand {
    /// HTTP server port
    #[arg(long, default_value_t = cidgate::constants::DEFAULT_PORT, env = "CIDGATE_PORT", help_heading = "Server Options")]
    pub port: u16,

    /// HTTP server host
    #[arg(long, default_value = cidgate::constants::DEFAULT_HOST, env = "CIDGATE_HOST", help_heading = "Server Options")]
    pub host: String,

    /// Allowed path prefix announced by a reverse proxy (repeatable)
    #[arg(long = "path-prefix", value_name = "PREFIX", env = "CIDGATE_PATH_PREFIXES", value_delimiter = ',', help_heading = "Server Options")]
    pub path_prefixes: Vec<String>,

    /// Do not resolve the Host header as a mutable name
    #[arg(long, help_heading = "Server Options")]
    pub no_hostname_routing: bool,

    /// Time allowed for resolving and fetching one request
    #[cfg(feature = "server")]
    #[arg(long, default_value = "60s", value_parser = parse_duration_for_clap, help_heading = "Server Options")]
    pub timeout: Duration,

    #[cfg(not(feature = "server"))]
    #[arg(long, default_value = "60s", help_heading = "Server Options")]
    pub timeout: String,

    /// Maximum number of name indirections followed
    #[arg(long, default_value_t = cidgate::constants::DEFAULT_DEPTH_LIMIT, help_heading = "Server Options")]
    pub depth_limit: usize,

    /// Commit hash reported by /version
    #[arg(long, env = "CIDGATE_COMMIT", help_heading = "Server Options")]
    pub commit: Option<String>,

    /// File or directory to import (repeatable)
    #[arg(long = "add", value_name = "PATH", value_hint = ValueHint::AnyPath, help_heading = "Content Options")]
    pub adds: Vec<PathBuf>,

    /// Publish NAME pointing at a content path or a local path to import (repeatable)
    #[arg(long = "publish", value_name = "NAME=TARGET", value_parser = parse_publish, help_heading = "Content Options")]
    pub publishes: Vec<PublishArg>,

    /// Include dot-files when importing
    #[arg(long, help_heading = "Content Options")]
    pub hidden: bool,
}

pub fn run(cmd: ServeCommand, quiet: bool) -> Result<()> {
    #[cfg(not(feature = "server"))]
    {
        let _ = (cmd, quiet); // Suppress unused warnings when server feature is disabled
        anyhow::bail!("Server feature is not enabled. Rebuild with --features server");
    }

    #[cfg(feature = "server")]
    {
        run_server(cmd, quiet)
    }
}

#[cfg(feature = "server")]
fn run_server(cmd: ServeCommand, quiet: bool) -> Result<()> {
    use super::utils::seed_backends;
    use anyhow::Context;
    use cidgate::server::{start_server, ServerConfig, StartupConfig, VersionInfo};
    use cidgate::{GatewayRuntime, ImportOptions};
    use std::sync::Arc;
    use tokio::runtime::Runtime;

    let options = ImportOptions { hidden: cmd.hidden };
    let (store, names) = seed_backends(&cmd.adds, &cmd.publishes, options)?;
    if store.is_empty() && !quiet {
        eprintln!("⚠️  No content imported. Use --add or --publish to serve something.");
    }

    let mut version = VersionInfo::default();
    if let Some(commit) = cmd.commit {
        version.commit = commit;
    }

    let startup_config = StartupConfig {
        host: cmd.host,
        port: cmd.port,
        server: ServerConfig {
            path_prefixes: cmd.path_prefixes,
            hostname_routing: !cmd.no_hostname_routing,
            request_timeout: cmd.timeout,
            depth_limit: cmd.depth_limit,
            version,
        },
    };

    // Create tokio runtime for async operations
    let rt = Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(start_server(
        startup_config,
        Arc::new(names),
        Arc::new(store),
        GatewayRuntime::new(),
    ))
}
