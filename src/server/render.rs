// Content rendering - files, implicit index documents and directory listings

use crate::cid::Cid;
use crate::constants::{IMMUTABLE_CACHE_CONTROL, INDEX_DOCUMENT, PATH_HEADER};
use crate::node::{Directory, Node};
use crate::store::{ContentStore, Resolved};
use crate::server::error::GatewayError;
use crate::server::listing::{render_listing, ListingEntry};
use crate::server::redirect::{needs_redirect, redirect_response};
use crate::server::request::GatewayRequestContext;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Produce the response for a fetched node
pub async fn render(
    store: &dyn ContentStore,
    resolved: Resolved,
    ctx: &GatewayRequestContext,
    request_headers: &HeaderMap,
) -> Result<Response, GatewayError> {
    if let Some(location) = needs_redirect(&resolved.node, ctx) {
        log::debug!("[Gateway] redirecting {} to {}", ctx.requested_path(), location);
        return Ok(redirect_response(&location));
    }

    match resolved.node {
        Node::File(data) => {
            let content_type = content_type_for(ctx.route.file_name(), &data);
            Ok(content_response(ctx, &resolved.cid, request_headers, &content_type, data))
        }
        Node::Directory(dir) => render_directory(store, resolved.cid, dir, ctx, request_headers).await,
    }
}

async fn render_directory(
    store: &dyn ContentStore,
    cid: Cid,
    dir: Directory,
    ctx: &GatewayRequestContext,
    request_headers: &HeaderMap,
) -> Result<Response, GatewayError> {
    if let Some(index) = dir.get(INDEX_DOCUMENT) {
        match store.get(&index.cid).await? {
            Node::File(data) => {
                return Ok(content_response(
                    ctx,
                    &index.cid,
                    request_headers,
                    HTML_CONTENT_TYPE,
                    data,
                ));
            }
            // One hop only: an index.html directory is listed like any other child
            Node::Directory(_) => {
                log::debug!("[Gateway] {} is a directory, listing instead", INDEX_DOCUMENT);
            }
        }
    }

    if is_not_modified(request_headers, &cid) {
        return Ok(not_modified(ctx, &cid));
    }

    let entries: Vec<ListingEntry> = dir
        .links()
        .iter()
        .map(|link| ListingEntry {
            name: link.name.clone(),
            size: link.size,
            is_directory: link.is_directory(),
        })
        .collect();

    let html = render_listing(&entries, ctx);
    let mut response = (StatusCode::OK, html).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(HTML_CONTENT_TYPE),
    );
    apply_content_headers(response.headers_mut(), ctx, &cid);
    Ok(response)
}

fn content_response(
    ctx: &GatewayRequestContext,
    cid: &Cid,
    request_headers: &HeaderMap,
    content_type: &str,
    data: Bytes,
) -> Response {
    if is_not_modified(request_headers, cid) {
        return not_modified(ctx, cid);
    }

    let mut response = Response::new(Body::from(data));
    if let Ok(value) = HeaderValue::from_str(content_type) {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    apply_content_headers(response.headers_mut(), ctx, cid);
    response
}

fn not_modified(ctx: &GatewayRequestContext, cid: &Cid) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    apply_content_headers(response.headers_mut(), ctx, cid);
    response
}

/// Quoted identifier used as the entity tag
pub fn etag_for(cid: &Cid) -> String {
    format!("\"{}\"", cid)
}

/// Whether `If-None-Match` already names this node
pub fn is_not_modified(request_headers: &HeaderMap, cid: &Cid) -> bool {
    let etag = etag_for(cid);
    request_headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|tag| tag.trim().trim_start_matches("W/"))
        .any(|tag| tag == "*" || tag == etag)
}

fn apply_content_headers(headers: &mut HeaderMap, ctx: &GatewayRequestContext, cid: &Cid) {
    if let Ok(value) = HeaderValue::from_str(&ctx.requested_path()) {
        headers.insert(HeaderName::from_static(PATH_HEADER), value);
    }
    if let Ok(value) = HeaderValue::from_str(&etag_for(cid)) {
        headers.insert(header::ETAG, value);
    }
    if ctx.route.content_path.is_ipfs() {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(IMMUTABLE_CACHE_CONTROL),
        );
    }
}

/// Content type from the file name extension, falling back to sniffing the payload
pub fn content_type_for(name: Option<&str>, data: &[u8]) -> String {
    let guessed = name
        .filter(|name| name.contains('.'))
        .and_then(|name| mime_guess::from_path(name).first());
    if let Some(mime) = guessed {
        let is_text = mime.type_() == mime_guess::mime::TEXT;
        return if is_text && mime.get_param(mime_guess::mime::CHARSET).is_none() {
            format!("{}; charset=utf-8", mime.essence_str())
        } else {
            mime.to_string()
        };
    }
    sniff_content_type(data).to_string()
}

fn sniff_content_type(data: &[u8]) -> &'static str {
    let head = &data[..data.len().min(512)];
    let lowered = String::from_utf8_lossy(head).trim_start().to_ascii_lowercase();
    if lowered.starts_with("<!doctype html") || lowered.starts_with("<html") {
        return HTML_CONTENT_TYPE;
    }
    match std::str::from_utf8(data) {
        Ok(text) if !text.contains('\0') => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type_for(Some("a.txt"), b"x"), "text/plain; charset=utf-8");
        assert_eq!(content_type_for(Some("index.html"), b""), "text/html; charset=utf-8");
        assert_eq!(content_type_for(Some("logo.png"), b""), "image/png");
    }

    #[test]
    fn test_content_type_sniffing() {
        assert_eq!(content_type_for(None, b"fnord"), "text/plain; charset=utf-8");
        assert_eq!(
            content_type_for(Some("README"), b"  <!DOCTYPE html><p>"),
            HTML_CONTENT_TYPE
        );
        assert_eq!(content_type_for(None, b"<html>"), HTML_CONTENT_TYPE);
        assert_eq!(content_type_for(None, &[0u8, 159, 146, 150]), "application/octet-stream");
    }

    #[test]
    fn test_if_none_match() {
        let cid = Cid::digest(b"x");
        let mut headers = HeaderMap::new();
        assert!(!is_not_modified(&headers, &cid));

        headers.insert(
            header::IF_NONE_MATCH,
            HeaderValue::from_str(&etag_for(&cid)).unwrap(),
        );
        assert!(is_not_modified(&headers, &cid));
        assert!(!is_not_modified(&headers, &Cid::digest(b"y")));

        let list = format!("\"other\", W/{}", etag_for(&cid));
        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_str(&list).unwrap());
        assert!(is_not_modified(&headers, &cid));
    }
}
