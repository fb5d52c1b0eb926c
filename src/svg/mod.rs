//! SVG optimization engine.
//!
//! A small tree-rewriting optimizer: markup is parsed into a [`Document`],
//! run through an ordered list of named [`Pass`]es, and serialized back.
//!
//! # Architecture
//!
//! ```text
//! SVG markup
//!     │
//!     ▼
//! ┌───────┐
//! │ parse │ ──► Document (prolog dropped)
//! └───┬───┘
//!     │
//!     ▼
//! ┌──────────┐
//! │ Pipeline │ ──► passes in order, repeated while output shrinks (multipass)
//! └────┬─────┘
//!      │
//!      ▼
//! ┌───────────┐
//! │ serialize │ ──► compact markup
//! └───────────┘
//! ```
//!
//! # Modules
//!
//! - [`document`]: tree types
//! - [`css`]: stylesheet subset used by style inlining
//! - [`passes`]: the individual structural passes
//! - [`pipeline`]: pass composition and the default preset

pub mod css;
mod document;
mod parse;
pub mod passes;
mod pipeline;
mod serialize;

pub use document::{Document, Element, Node};
pub use pipeline::{Pass, Pipeline, preset_default};

use thiserror::Error;

/// Errors raised while parsing markup or configuring passes.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("XML parse error at position {position}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed attribute")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid character reference")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("markup is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("document has no root element")]
    Empty,

    #[error("second root element `<{0}>`")]
    MultipleRoots(String),

    #[error("element `<{0}>` is never closed")]
    Unclosed(String),

    #[error("closing tag `</{0}>` without an opening tag")]
    UnexpectedEnd(String),

    #[error("text content outside the root element")]
    TextOutsideRoot,

    #[error("invalid attribute pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
