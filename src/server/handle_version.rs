// Version handler

use crate::server::ServerState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};

pub async fn handle_version(State(state): State<ServerState>) -> impl IntoResponse {
    let version = &state.config.version;
    let body = format!(
        "Commit: {}\nClient Version: {}\nProtocol Version: {}\n",
        version.commit, version.client_version, version.protocol_version
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
}
