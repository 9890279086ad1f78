// Directory listing HTML

use crate::format::format_bytes;
use crate::server::request::GatewayRequestContext;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Write;

/// Everything but RFC 3986 unreserved characters is encoded inside a segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One row of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub size: u64,
    pub is_directory: bool,
}

/// HTML-escape text and attribute values (`&`, `<`, `>`, `"`, `'`)
pub fn escape_html(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).replace('\'', "&#39;")
}

pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Percent-encoded `/a/b` form of `segments` (empty for no segments)
pub fn encode_path<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(&encode_segment(segment.as_ref()));
    }
    out
}

/// Href of the parent directory, never above the routing root
pub fn parent_href(ctx: &GatewayRequestContext) -> String {
    let segments = &ctx.route.segments;
    let floor = ctx.route.root_depth().min(segments.len());
    let end = segments.len().saturating_sub(1).max(floor);
    format!("{}{}/", ctx.prefix, encode_path(&segments[..end]))
}

/// Render the listing of a directory at the request's canonical path
pub fn render_listing(entries: &[ListingEntry], ctx: &GatewayRequestContext) -> String {
    let title = escape_html(&format!("Index of {}", ctx.canonical_path()));
    let base = format!("{}{}", ctx.prefix, encode_path(&ctx.route.segments));

    let mut html = String::with_capacity(512 + entries.len() * 128);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", title);
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{}</h1>", title);
    html.push_str("<table>\n");
    let _ = writeln!(
        html,
        "<tr><td><a href=\"{}\">..</a></td><td></td></tr>",
        escape_html(&parent_href(ctx))
    );

    for entry in entries {
        let suffix = if entry.is_directory { "/" } else { "" };
        let href = format!("{}/{}{}", base, encode_segment(&entry.name), suffix);
        let _ = writeln!(
            html,
            "<tr><td><a href=\"{}\">{}{}</a></td><td>{}</td></tr>",
            escape_html(&href),
            escape_html(&entry.name),
            suffix,
            format_bytes(entry.size)
        );
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}
