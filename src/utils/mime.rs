//! MIME types served by the HTTP front end.

/// Content-Type values.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const SVG: &str = "image/svg+xml";
}
