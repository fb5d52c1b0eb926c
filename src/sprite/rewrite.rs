//! Per-element rewriters applied after optimization.
//!
//! Both run in the same traversal; neither looks at children.

use crate::svg::Element;

use super::{Palette, SymbolId};

/// Paint attributes inspected for palette colors, in this order.
const PAINT_ATTRS: [&str; 2] = ["fill", "stroke"];

/// Replaces palette colors with `var(--svg-<role>)` style declarations.
///
/// Every inspected paint value outside the exclusion set is removed, mapped
/// or not. An unmapped color is therefore dropped without replacement.
pub struct ColorRewrite<'a> {
    palette: &'a Palette,
}

impl<'a> ColorRewrite<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    pub fn rewrite(&self, elem: &mut Element) {
        let mut declarations = Vec::new();

        for attr in PAINT_ATTRS {
            let value = elem.attrs.get(attr).unwrap_or_default().to_lowercase();
            if value.is_empty() {
                continue;
            }
            if let Some(role) = self.palette.role(&value) {
                declarations.push(format!("{attr}: var(--svg-{role})"));
            }
            if !self.palette.is_excluded(&value) {
                elem.attrs.remove(attr);
            }
        }

        if !declarations.is_empty() {
            elem.attrs.set("style", declarations.join("; "));
        }
    }
}

/// Turns `<svg>` elements into `<symbol id="...">`.
pub struct SymbolRewrite<'a> {
    id: &'a SymbolId,
}

impl<'a> SymbolRewrite<'a> {
    pub fn new(id: &'a SymbolId) -> Self {
        Self { id }
    }

    pub fn rewrite(&self, elem: &mut Element) {
        if elem.is_tag("svg") {
            elem.name = "symbol".to_string();
            elem.attrs.set("id", self.id.as_str());
        }
    }
}
