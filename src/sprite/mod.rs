//! Icon sprite assembly.
//!
//! Turns a batch of SVG images into one hidden sprite document whose
//! `<symbol>` children can be referenced with `<use href="#id">`:
//!
//! ```text
//! (SymbolId, markup) ──► optimize ──► recolor + retag ──► <symbol> ─┐
//! (SymbolId, markup) ──► optimize ──► recolor + retag ──► <symbol> ─┼─► wrap
//! ...                                                               ─┘
//! ```
//!
//! Hard-coded palette colors become `var(--svg-<role>)` references, so a
//! page can theme every icon through custom properties.
//!
//! # Modules
//!
//! - [`id`]: symbol identifiers derived from file names
//! - [`palette`]: color → role mapping and exclusions
//! - [`rewrite`]: per-element color and root rewriters
//! - [`optimize`]: the fixed optimization preset
//! - [`assemble`]: the [`Sprite`] component shared by both drivers

mod assemble;
mod id;
pub mod optimize;
mod palette;
pub mod rewrite;

pub use assemble::Sprite;
pub use id::{SymbolId, derive};
pub use palette::Palette;

use thiserror::Error;

use crate::svg::SvgError;

/// Errors raised while deriving identifiers or assembling a sprite.
#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("file name `{0}` is too short to derive a symbol id")]
    NameTooShort(String),

    #[error("symbol id `{0}` contains whitespace")]
    InvalidId(String),

    #[error("duplicate symbol id `{0}`")]
    DuplicateId(String),

    #[error("failed to optimize `{id}`")]
    Optimize {
        id: String,
        #[source]
        source: SvgError,
    },

    #[error(transparent)]
    Svg(#[from] SvgError),
}
