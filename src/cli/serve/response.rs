//! HTTP response handlers.

use crate::embed::serve::{INDEX_HTML, IndexVars};
use crate::utils::mime::types::{HTML, PLAIN, SVG};
use anyhow::Result;
use tiny_http::{Header, Request, Response, StatusCode};

/// Respond with the upload page.
pub fn respond_index(request: Request) -> Result<()> {
    let body = INDEX_HTML.render(&IndexVars::default());
    send_body(request, 200, HTML, body.into_bytes())
}

/// Respond with an assembled sprite.
pub fn respond_sprite(request: Request, sprite: String) -> Result<()> {
    send_body(request, 200, SVG, sprite.into_bytes())
}

/// Respond with 400 and the parse error.
pub fn respond_bad_request(request: Request, error: &serde_json::Error) -> Result<()> {
    let body = format!("400 Bad Request: {error}");
    send_body(request, 400, PLAIN, body.into_bytes())
}

/// Respond with 500 and the full error chain.
pub fn respond_error(request: Request, error: &anyhow::Error) -> Result<()> {
    send_body(request, 500, PLAIN, format!("{error:#}").into_bytes())
}

pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

pub fn respond_method_not_allowed(request: Request, allow: &'static str) -> Result<()> {
    let response = Response::from_data(b"405 Method Not Allowed".to_vec())
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", PLAIN))
        .with_header(make_header("Allow", allow));
    request.respond(response)?;
    Ok(())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
