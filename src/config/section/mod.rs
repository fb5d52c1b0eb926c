//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sprite.toml`:
//!
//! | Module    | TOML Section | Purpose                              |
//! |-----------|--------------|--------------------------------------|
//! | `build`   | `[build]`    | Input/output paths, demo page        |
//! | `palette` | `[palette]`  | Color → role mapping, exclusions     |
//! | `serve`   | `[serve]`    | HTTP server                          |

mod build;
mod palette;
mod serve;

pub use build::BuildConfig;
pub use palette::PaletteConfig;
pub use serve::ServeConfig;
