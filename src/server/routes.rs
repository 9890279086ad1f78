// Route setup and configuration

use crate::server::handle_gateway::{handle_gateway, handle_method_not_allowed};
use crate::server::handle_version::handle_version;
use crate::server::ServerState;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub fn create_router(state: ServerState) -> Router {
    let gateway = get(handle_gateway).fallback(handle_method_not_allowed);

    Router::new()
        .route(
            "/version",
            get(handle_version).fallback(handle_method_not_allowed),
        )
        .route("/", gateway.clone())
        // Everything else is content, addressed by scope or by host name
        .route("/{*path}", gateway)
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}
