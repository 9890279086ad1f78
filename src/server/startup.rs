// Server startup: configuration checks, binding and graceful shutdown

use crate::constants;
use crate::format::format_duration_verbose;
use crate::namesys::NameResolver;
use crate::runtime::GatewayRuntime;
use crate::server::{Server, ServerConfig};
use crate::store::ContentStore;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Configuration for server startup
pub struct StartupConfig {
    pub host: String,
    pub port: u16,
    pub server: ServerConfig,
}

/// Bind the listen socket; port 0 picks a free port
pub async fn bind_listener(host: &str, port: u16) -> Result<TcpListener> {
    let addr = format!("{}:{}", host, port);
    let socket_addr: SocketAddr = addr.parse().context("Invalid address format")?;
    TcpListener::bind(socket_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))
}

/// Serve until Ctrl+C or until `runtime` is asked to shut down
pub async fn serve(listener: TcpListener, server: &Server, runtime: &GatewayRuntime) -> Result<()> {
    axum::serve(listener, server.router())
        .with_graceful_shutdown(runtime.create_shutdown_future())
        .await
        .context("Server error")?;

    log::info!("[Server] stopped");
    Ok(())
}

/// Main server startup function
pub async fn start_server(
    config: StartupConfig,
    resolver: Arc<dyn NameResolver>,
    store: Arc<dyn ContentStore>,
    runtime: GatewayRuntime,
) -> Result<()> {
    let server = Server::new(resolver, store, config.server).context("Invalid server configuration")?;
    let listener = bind_listener(&config.host, config.port).await?;
    let local_addr = listener.local_addr().context("Failed to read bound address")?;

    display_server_info(&server, local_addr);
    eprintln!("\nPress Ctrl+C to stop\n");

    serve(listener, &server, &runtime).await
}

fn display_server_info(server: &Server, addr: SocketAddr) {
    let config = server.config();

    eprintln!("{} gateway started", constants::BINARY_NAME);
    eprintln!("  Version: {}", config.version.client_version);
    eprintln!("  Listening: http://{}", addr);

    if config.hostname_routing {
        eprintln!("  Hostname routing: ENABLED (Host header resolved as /ipns/<host>)");
    } else {
        eprintln!("  Hostname routing: disabled");
    }

    if config.path_prefixes.is_empty() {
        eprintln!("  Path prefixes: none");
    } else {
        eprintln!("  Path prefixes: {}", config.path_prefixes.join(", "));
    }

    eprintln!(
        "  Request timeout: {}",
        format_duration_verbose(config.request_timeout)
    );
    eprintln!("  Name depth limit: {}", config.depth_limit);
}
