//! HTTP front end: upload page and sprite assembly on demand.
//!
//! | Route           | Response                               |
//! |-----------------|----------------------------------------|
//! | `GET /`         | upload page (`text/html`)              |
//! | `POST /process` | sprite from a JSON array of SVG bodies |
//!
//! Symbols are named `svg-0`, `svg-1`, … in request order.

mod lifecycle;
mod response;

pub use lifecycle::setup_shutdown_handler;

use crate::{
    config::SpriteConfig,
    log,
    sprite::{Sprite, SymbolId},
};
use anyhow::{Context, Result};
use std::{io::Read, sync::Arc};
use thiserror::Error;
use tiny_http::{Method, Request, Server};

/// Request handler threads.
const WORKERS: usize = 4;

/// Bind the server and block on the request loop until Ctrl+C.
pub fn serve(config: &SpriteConfig, sprite: Arc<Sprite>) -> Result<()> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);

    run_request_loop(&server, &sprite)
}

fn run_request_loop(server: &Server, sprite: &Arc<Sprite>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(WORKERS)
        .build()
        .context("Failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let sprite = Arc::clone(sprite);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &sprite) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Known routes, resolved from method and path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Index,
    Process,
    MethodNotAllowed(&'static str),
    NotFound,
}

fn route(method: &Method, url: &str) -> Route {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match (path, method) {
        ("/", Method::Get) => Route::Index,
        ("/", _) => Route::MethodNotAllowed("GET"),
        ("/process", Method::Post) => Route::Process,
        ("/process", _) => Route::MethodNotAllowed("POST"),
        _ => Route::NotFound,
    }
}

/// Handle a single HTTP request
fn handle_request(mut request: Request, sprite: &Sprite) -> Result<()> {
    if lifecycle::is_shutdown() {
        return response::respond_unavailable(request);
    }

    match route(request.method(), request.url()) {
        Route::Index => response::respond_index(request),
        Route::Process => {
            let result = process(sprite, request.as_reader());
            match result {
                Ok(markup) => response::respond_sprite(request, markup),
                Err(ProcessError::Json(e)) => response::respond_bad_request(request, &e),
                Err(ProcessError::Assemble(e)) => {
                    log!("serve"; "process failed: {e:#}");
                    response::respond_error(request, &e)
                }
            }
        }
        Route::MethodNotAllowed(allow) => response::respond_method_not_allowed(request, allow),
        Route::NotFound => response::respond_not_found(request),
    }
}

#[derive(Debug, Error)]
enum ProcessError {
    #[error("invalid request body: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Assemble(anyhow::Error),
}

/// Assemble a sprite from a JSON array of raw SVG documents.
fn process(sprite: &Sprite, body: impl Read) -> Result<String, ProcessError> {
    let images: Vec<String> = serde_json::from_reader(body)?;
    let images: Vec<_> = images
        .into_iter()
        .enumerate()
        .map(|(index, content)| (SymbolId::from_index(index), content))
        .collect();

    sprite
        .assemble(&images)
        .with_context(|| format!("Failed to assemble {} image(s)", images.len()))
        .map_err(ProcessError::Assemble)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::Palette;
    use crate::utils::mime::types::{HTML, PLAIN, SVG};
    use std::io::Write;
    use std::net::TcpStream;
    use std::time::Duration;

    fn sprite() -> Sprite {
        Sprite::new(Palette::default()).unwrap()
    }

    /// Send one raw request through a local listener, return the raw response.
    fn exchange(raw_request: String) -> String {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();

        let client = std::thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.set_read_timeout(Some(Duration::from_secs(10))).unwrap();
            stream.write_all(raw_request.as_bytes()).unwrap();
            let mut response = String::new();
            stream.read_to_string(&mut response).unwrap();
            response
        });

        let request = server.recv().unwrap();
        handle_request(request, &sprite()).unwrap();
        client.join().unwrap()
    }

    fn get(path: &str) -> String {
        exchange(format!(
            "GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
        ))
    }

    fn post(path: &str, body: &str) -> String {
        exchange(format!(
            "POST {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
             Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ))
    }

    fn status(response: &str) -> u16 {
        response
            .split_whitespace()
            .nth(1)
            .and_then(|code| code.parse().ok())
            .unwrap()
    }

    fn header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
        let (head, _) = response.split_once("\r\n\r\n")?;
        head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }

    fn body(response: &str) -> &str {
        response.split_once("\r\n\r\n").map_or("", |(_, body)| body)
    }

    #[test]
    fn test_http_index() {
        let response = get("/");
        assert_eq!(status(&response), 200);
        assert_eq!(header(&response, "Content-Type"), Some(HTML));
        assert!(body(&response).contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_http_process() {
        let response = post("/process", r#"["<svg viewBox=\"0 0 4 4\"/>"]"#);
        assert_eq!(status(&response), 200);
        assert_eq!(header(&response, "Content-Type"), Some(SVG));
        assert_eq!(
            body(&response),
            r#"<svg xmlns="http://www.w3.org/2000/svg" style="display:none"><symbol viewBox="0 0 4 4" id="svg-0"/></svg>"#
        );
    }

    #[test]
    fn test_http_bad_json() {
        let response = post("/process", "{not json");
        assert_eq!(status(&response), 400);
        assert_eq!(header(&response, "Content-Type"), Some(PLAIN));
        assert!(body(&response).starts_with("400 Bad Request"));
    }

    #[test]
    fn test_http_malformed_svg() {
        let response = post("/process", r#"["<svg>"]"#);
        assert_eq!(status(&response), 500);
        assert!(body(&response).contains("Failed to assemble 1 image(s)"));
    }

    #[test]
    fn test_http_wrong_method() {
        let response = get("/process");
        assert_eq!(status(&response), 405);
        assert_eq!(header(&response, "Allow"), Some("POST"));

        let response = post("/", "[]");
        assert_eq!(status(&response), 405);
        assert_eq!(header(&response, "Allow"), Some("GET"));
    }

    #[test]
    fn test_http_unknown_route() {
        let response = get("/sprite.svg");
        assert_eq!(status(&response), 404);
        assert_eq!(header(&response, "Content-Type"), Some(PLAIN));
    }

    #[test]
    fn test_route() {
        assert_eq!(route(&Method::Get, "/"), Route::Index);
        assert_eq!(route(&Method::Get, "/?lang=en"), Route::Index);
        assert_eq!(route(&Method::Post, "/process"), Route::Process);
        assert_eq!(route(&Method::Get, "/process"), Route::MethodNotAllowed("POST"));
        assert_eq!(route(&Method::Delete, "/"), Route::MethodNotAllowed("GET"));
        assert_eq!(route(&Method::Get, "/sprite.svg"), Route::NotFound);
    }

    #[test]
    fn test_process_names_symbols_by_index() {
        let body = serde_json::to_vec(&[
            r##"<svg viewBox="0 0 8 8"><rect width="8" height="8" fill="#56A3BC"/></svg>"##,
            r#"<svg viewBox="0 0 4 4"/>"#,
        ])
        .unwrap();
        let markup = process(&sprite(), body.as_slice()).unwrap();

        assert_eq!(
            markup,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" style="display:none">"#,
                r#"<symbol viewBox="0 0 8 8" id="svg-0">"#,
                r#"<rect width="8" height="8" style="fill: var(--svg-ac)"/>"#,
                r#"</symbol>"#,
                r#"<symbol viewBox="0 0 4 4" id="svg-1"/>"#,
                r#"</svg>"#,
            )
        );
    }

    #[test]
    fn test_process_empty_batch() {
        let markup = process(&sprite(), &b"[]"[..]).unwrap();
        assert_eq!(
            markup,
            r#"<svg xmlns="http://www.w3.org/2000/svg" style="display:none"></svg>"#
        );
    }

    #[test]
    fn test_process_rejects_malformed_json() {
        for body in [&b"not json"[..], &br#"{"a": 1}"#[..], &b"[1, 2]"[..]] {
            assert!(matches!(
                process(&sprite(), body),
                Err(ProcessError::Json(_))
            ));
        }
    }

    #[test]
    fn test_process_reports_error_chain() {
        let err = process(&sprite(), &br#"["<svg>"]"#[..]).unwrap_err();
        let ProcessError::Assemble(err) = err else {
            panic!("expected assemble error");
        };
        let chain = format!("{err:#}");
        assert!(chain.contains("Failed to assemble 1 image(s)"));
        assert!(chain.contains("svg-0"));
    }
}
