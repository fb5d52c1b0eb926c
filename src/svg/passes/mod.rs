//! Structural passes.
//!
//! Each pass is a unit struct (or a small config struct) implementing
//! [`Pass`](super::Pass). Names follow the camelCase plugin names users of
//! other SVG optimizers already know.
//!
//! - `cleanup`: comments, metadata, editor data, attribute hygiene, namespaces
//! - `colors`: color literal normalization
//! - `paint`: default attributes, unknown elements, invisible stroke and fill
//! - `hidden`: elements that never render
//! - `groups`: group collapsing and empty container removal
//! - `styles`: style inlining, style → attributes, style element removal
//! - `dimensions`: width/height → viewBox
//! - `attrs`: pattern-based attribute removal

mod attrs;
mod cleanup;
mod colors;
mod dimensions;
mod groups;
mod hidden;
mod paint;
mod styles;

pub use attrs::RemoveAttrs;
pub use cleanup::{
    CleanupAttrs, RemoveComments, RemoveEditorsNsData, RemoveEmptyAttrs, RemoveMetadata,
    RemoveUnusedNs,
};
pub use colors::ConvertColors;
pub use dimensions::RemoveDimensions;
pub use groups::{CollapseGroups, RemoveEmptyContainers};
pub use hidden::RemoveHiddenElems;
pub use paint::{RemoveUnknownsAndDefaults, RemoveUselessStrokeAndFill};
pub use styles::{ConvertStyleToAttrs, InlineStyles, RemoveStyleElement};
