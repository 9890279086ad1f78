// Gateway error taxonomy and its mapping onto HTTP responses

use crate::constants::NOT_FOUND_BODY;
use crate::content_path::PathError;
use crate::namesys::ResolveError;
use crate::store::StoreError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The mutable name could not be turned into a content path
    #[error("Path Resolve error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("404 page not found")]
    NotFound,
    /// Malformed identifier or path segment
    #[error("Path Resolve error: {0}")]
    InvalidPath(String),
    #[error("Path Resolve error: request timed out")]
    Timeout,
    #[error("Method {0} not allowed: read only access")]
    MethodNotAllowed(String),
    /// Store failure other than a missing node
    #[error("Path Resolve error: {0}")]
    Backend(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Resolve(_) | GatewayError::Backend(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            GatewayError::Timeout => StatusCode::REQUEST_TIMEOUT,
            GatewayError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<PathError> for GatewayError {
    fn from(e: PathError) -> Self {
        match e {
            // `/ipfs` or `/ipns` alone addresses nothing
            PathError::MissingIdentifier(_) => GatewayError::NotFound,
            other => GatewayError::InvalidPath(other.to_string()),
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(e: StoreError) -> Self {
        if e.is_not_found() {
            GatewayError::NotFound
        } else {
            GatewayError::Backend(e.to_string())
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            GatewayError::NotFound => NOT_FOUND_BODY.to_string(),
            other => other.to_string(),
        };
        let mut response = (status, body).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        if status == StatusCode::METHOD_NOT_ALLOWED {
            headers.insert(header::ALLOW, HeaderValue::from_static("GET, HEAD"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cid::Cid;
    use crate::constants::RESOLVE_ERROR_PREFIX;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::from(ResolveError::NotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(GatewayError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            GatewayError::InvalidPath("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(GatewayError::Timeout.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            GatewayError::MethodNotAllowed("POST".into()).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn test_messages() {
        let err = GatewayError::from(ResolveError::NotFound);
        assert_eq!(
            err.to_string(),
            format!("{}: could not resolve name", RESOLVE_ERROR_PREFIX)
        );
        assert_eq!(format!("{}\n", GatewayError::NotFound), NOT_FOUND_BODY);
        assert_eq!(
            GatewayError::MethodNotAllowed("POST".into()).to_string(),
            "Method POST not allowed: read only access"
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(
            GatewayError::from(PathError::MissingIdentifier("ipfs")),
            GatewayError::NotFound
        );
        assert!(matches!(
            GatewayError::from(PathError::InvalidSegment("..".into())),
            GatewayError::InvalidPath(_)
        ));
        assert_eq!(
            GatewayError::from(StoreError::NotFound(Cid::digest(b"x"))),
            GatewayError::NotFound
        );
        assert!(matches!(
            GatewayError::from(StoreError::Backend("disk".into())),
            GatewayError::Backend(_)
        ));
    }
}
