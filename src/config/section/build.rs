//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! input = "icons"             # Directory of source SVG files
//! output = "output"           # Directory receiving the generated files
//! html = "index.html"         # Demo page file name
//! sprite = "sprite.svg"       # Raw sprite file name
//! preview = ["clock", "car-2-colors"]
//! ```
//!
//! `input` and `output` are resolved against the directory holding the
//! config file. `html` and `sprite` are plain file names inside `output`.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Symbols shown on the demo page unless configured otherwise.
pub const DEFAULT_PREVIEW: &[&str] = &[
    "car-2-colors",
    "clock-2-colors",
    "clock",
    "calendar-2-colors",
    "group-16580",
    "offices-2-colors",
    "place-chair-2-colors",
];

/// Batch build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub html: PathBuf,
    pub sprite: PathBuf,
    /// Symbol ids referenced by the demo page, one `<use>` per row.
    pub preview: Vec<String>,
}

impl BuildConfig {
    pub const HTML: FieldPath = FieldPath::new("build.html");
    pub const SPRITE: FieldPath = FieldPath::new("build.sprite");
    pub const PREVIEW: FieldPath = FieldPath::new("build.preview");

    /// Demo page location.
    pub fn html_path(&self) -> PathBuf {
        self.output.join(&self.html)
    }

    /// Raw sprite location.
    pub fn sprite_path(&self) -> PathBuf {
        self.output.join(&self.sprite)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, name) in [(Self::HTML, &self.html), (Self::SPRITE, &self.sprite)] {
            if !is_file_name(name) {
                diag.error_with_hint(
                    field,
                    format!("`{}` is not a plain file name", name.display()),
                    "files are always written inside `build.output`",
                );
            }
        }
        if self.html == self.sprite {
            diag.error(Self::SPRITE, "must differ from `build.html`");
        }

        for id in &self.preview {
            if id.is_empty() || id.chars().any(char::is_whitespace) {
                diag.error(Self::PREVIEW, format!("invalid symbol id `{id}`"));
            }
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: "icons".into(),
            output: "output".into(),
            html: "index.html".into(),
            sprite: "sprite.svg".into(),
            preview: DEFAULT_PREVIEW.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Exactly one normal path component.
fn is_file_name(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
