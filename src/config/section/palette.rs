//! `[palette]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [palette]
//! excluded = ["none"]
//!
//! [palette.colors]
//! "#ababab" = "fg"
//! "#56a3bc" = "ac"
//! ```
//!
//! Each role `r` becomes a `var(--svg-r)` reference in the sprite. Setting
//! `colors` replaces the whole default table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::sprite::Palette;

/// Color → role table and never-stripped values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub colors: BTreeMap<String, String>,
    pub excluded: Vec<String>,
}

impl PaletteConfig {
    pub const COLORS: FieldPath = FieldPath::new("palette.colors");
    pub const EXCLUDED: FieldPath = FieldPath::new("palette.excluded");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (color, role) in &self.colors {
            if color.trim().is_empty() {
                diag.error(Self::COLORS, "color key must not be empty");
            }
            if !is_role_name(role) {
                diag.error_with_hint(
                    Self::COLORS,
                    format!("invalid role `{role}` for `{color}`"),
                    "roles are used as `--svg-<role>`: letters, digits, `-` and `_` only",
                );
            }
        }

        if self.excluded.iter().any(|value| value.trim().is_empty()) {
            diag.error(Self::EXCLUDED, "excluded values must not be empty");
        }
    }

    pub fn to_palette(&self) -> Palette {
        Palette::new(self.colors.clone(), self.excluded.clone())
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: [
                ("#ababab", "fg"),
                ("#56a3bc", "ac"),
                ("#cce3eb", "ac"),
                ("#707070", "fg"),
            ]
            .into_iter()
            .map(|(color, role)| (color.to_string(), role.to_string()))
            .collect(),
            excluded: vec!["none".to_string()],
        }
    }
}

fn is_role_name(role: &str) -> bool {
    !role.is_empty()
        && role
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
