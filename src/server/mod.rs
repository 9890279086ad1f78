// HTTP gateway serving content-addressed data by path or by host name

mod config;
mod error;
mod handle_gateway;
mod handle_version;
mod listing;
mod prefix;
mod redirect;
mod render;
mod request;
mod routes;
mod startup;
mod utils;

use crate::namesys::NameResolver;
use crate::store::ContentStore;
use axum::Router;
use std::sync::Arc;

pub use config::{validate_configured_prefix, ConfigError, ServerConfig, VersionInfo};
pub use error::GatewayError;
pub use listing::{escape_html, render_listing, ListingEntry};
pub use prefix::{validate_prefix, RoutingPrefix};
pub use redirect::needs_redirect;
pub use render::{content_type_for, render};
pub use request::{resolve_request, GatewayRequestContext, RequestRoute};
pub use startup::{bind_listener, serve, start_server, StartupConfig};
pub use utils::{is_domain_name, normalize_host, parse_duration};

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct ServerState {
    pub resolver: Arc<dyn NameResolver>,
    pub store: Arc<dyn ContentStore>,
    pub config: Arc<ServerConfig>,
}

pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(
        resolver: Arc<dyn NameResolver>,
        store: Arc<dyn ContentStore>,
        config: ServerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: ServerState {
                resolver,
                store,
                config: Arc::new(config),
            },
        })
    }

    pub fn router(&self) -> Router {
        routes::create_router(self.state.clone())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.state.config
    }
}
