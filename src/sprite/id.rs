//! Symbol identifiers.

use std::fmt;

use super::SpriteError;

/// Length of the extension stripped from file names (`.svg`).
const EXTENSION_LEN: usize = 4;

/// A lowercase, whitespace-free `<symbol>` id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(String);

impl SymbolId {
    /// Positional id used when no file name is available (`svg-0`, `svg-1`, ...).
    pub fn from_index(index: usize) -> Self {
        Self(format!("svg-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SymbolId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive a symbol id from a file name.
///
/// Drops the last four characters, lowercases, and turns spaces and
/// underscores into hyphens: `Group 16580.svg` → `group-16580`.
pub fn derive(name: &str) -> Result<SymbolId, SpriteError> {
    let len = name.chars().count();
    if len <= EXTENSION_LEN {
        return Err(SpriteError::NameTooShort(name.to_string()));
    }

    let stem: String = name.chars().take(len - EXTENSION_LEN).collect();
    let id: String = stem
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect();

    if id.chars().any(char::is_whitespace) {
        return Err(SpriteError::InvalidId(id));
    }
    Ok(SymbolId(id))
}
