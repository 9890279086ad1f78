// Trailing-slash redirects for directory requests

use crate::node::Node;
use crate::server::listing::escape_html;
use crate::server::request::GatewayRequestContext;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Location a directory requested without a trailing slash must be redirected to
///
/// Built only from the accepted prefix and the non-empty raw segments, so it always
/// starts with a single `/`.
pub fn needs_redirect(node: &Node, ctx: &GatewayRequestContext) -> Option<String> {
    if !node.is_directory() || ctx.route.trailing_slash {
        return None;
    }

    let mut location = ctx.prefix.as_str().to_string();
    location.push('/');
    for segment in &ctx.route.raw_segments {
        location.push_str(segment);
        location.push('/');
    }
    if let Some(query) = &ctx.query {
        location.push('?');
        location.push_str(query);
    }
    Some(location)
}

pub fn redirect_response(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => {
            let body = format!("<a href=\"{}\">Found</a>.\n", escape_html(location));
            let mut response = (StatusCode::FOUND, body).into_response();
            response.headers_mut().insert(header::LOCATION, value);
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            );
            response
        }
        Err(_) => {
            // Raw segments come from the request line, so this needs a broken proxy
            log::warn!("[Gateway] unrepresentable redirect location {:?}", location);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
