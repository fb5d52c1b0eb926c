//! Color → role mapping.

use std::collections::{HashMap, HashSet};

/// Maps lowercase color literals to semantic roles, plus the literals that
/// are never stripped from elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: HashMap<String, String>,
    excluded: HashSet<String>,
}

impl Palette {
    /// Build a palette. Keys and exclusions are lowercased.
    pub fn new<C, E>(colors: C, excluded: E) -> Self
    where
        C: IntoIterator<Item = (String, String)>,
        E: IntoIterator<Item = String>,
    {
        Self {
            colors: colors
                .into_iter()
                .map(|(color, role)| (color.to_lowercase(), role))
                .collect(),
            excluded: excluded.into_iter().map(|v| v.to_lowercase()).collect(),
        }
    }

    /// Role for a color literal, compared case-insensitively.
    pub fn role(&self, color: &str) -> Option<&str> {
        self.colors.get(&color.to_lowercase()).map(String::as_str)
    }

    pub fn is_excluded(&self, value: &str) -> bool {
        self.excluded.contains(&value.to_lowercase())
    }

    /// Distinct role names, sorted.
    pub fn roles(&self) -> Vec<&str> {
        let mut roles: Vec<&str> = self.colors.values().map(String::as_str).collect();
        roles.sort_unstable();
        roles.dedup();
        roles
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            [
                ("#ababab", "fg"),
                ("#56a3bc", "ac"),
                ("#cce3eb", "ac"),
                ("#707070", "fg"),
            ]
            .map(|(color, role)| (color.to_string(), role.to_string())),
            ["none".to_string()],
        )
    }
}
