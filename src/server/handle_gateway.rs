// Gateway handler - prefix validation, resolution, fetch and rendering for one request

use crate::constants::PREFIX_HEADER;
use crate::content_path::{ContentPath, PathRoot};
use crate::format::format_duration_ms;
use crate::namesys::resolve_trail;
use crate::server::error::GatewayError;
use crate::server::prefix::validate_prefix;
use crate::server::render::render;
use crate::server::request::GatewayRequestContext;
use crate::server::ServerState;
use crate::store::fetch;
use axum::{
    extract::State,
    http::{header, HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
};
use std::time::Instant;

pub async fn handle_gateway(
    State(state): State<ServerState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let outcome = tokio::time::timeout(
        state.config.request_timeout,
        serve_request(&state, &uri, &headers),
    )
    .await
    .unwrap_or(Err(GatewayError::Timeout));

    match outcome {
        Ok(response) => {
            log::debug!(
                "[Gateway] {} -> {} in {}",
                uri,
                response.status(),
                format_duration_ms(started.elapsed())
            );
            response
        }
        Err(e) => {
            let status = e.status();
            if status.is_server_error() {
                log::warn!("[Gateway] {} -> {}: {}", uri, status, e);
            } else {
                log::debug!("[Gateway] {} -> {}: {}", uri, status, e);
            }
            e.into_response()
        }
    }
}

/// Anything but GET and HEAD on gateway paths
pub async fn handle_method_not_allowed(method: Method) -> Response {
    GatewayError::MethodNotAllowed(method.to_string()).into_response()
}

async fn serve_request(
    state: &ServerState,
    uri: &Uri,
    headers: &HeaderMap,
) -> Result<Response, GatewayError> {
    let prefix = validate_prefix(
        headers.get(PREFIX_HEADER).map(|value| value.as_bytes()),
        &state.config.path_prefixes,
    );
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.host());

    let mut ctx = GatewayRequestContext::from_request(host, uri, prefix, &state.config)?;
    let path = resolve_content_path(state, &mut ctx).await?;
    let resolved = fetch(state.store.as_ref(), &path).await?;
    render(state.store.as_ref(), resolved, &ctx, headers).await
}

/// Turn the requested path into an `/ipfs/` path, recording the names visited
async fn resolve_content_path(
    state: &ServerState,
    ctx: &mut GatewayRequestContext,
) -> Result<ContentPath, GatewayError> {
    let requested = &ctx.route.content_path;
    let name = match requested.root() {
        PathRoot::Ipfs(_) => return Ok(requested.clone()),
        PathRoot::Ipns(name) => name.clone(),
    };

    let resolution = resolve_trail(state.resolver.as_ref(), &name, state.config.depth_limit).await?;
    let path = resolution.path.join(requested.segments())?;
    ctx.trail = resolution.trail;
    log::debug!("[Gateway] {} resolved to {} via {:?}", requested, path, ctx.trail);
    Ok(path)
}
