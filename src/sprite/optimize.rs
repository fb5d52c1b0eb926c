//! The optimization preset used for sprite symbols.

use crate::svg::passes::{
    ConvertStyleToAttrs, InlineStyles, RemoveAttrs, RemoveDimensions, RemoveStyleElement,
};
use crate::svg::{Pipeline, SvgError, preset_default};

/// Attributes removed from every image, as `element#attribute#value` patterns.
pub const REMOVED_ATTRS: &[&str] = &[
    "*#^data-.+$#*",
    "*#^style$#*",
    "*#^opacity$#*",
    "^svg$#^(xmlns|version|x|y|xml:space)$#*",
];

/// The default passes followed by style flattening, sizing and attribute
/// removal, repeated while the output keeps shrinking.
pub fn preset() -> Result<Pipeline, SvgError> {
    Ok(preset_default()
        .pipe(InlineStyles {
            only_matched_once: false,
            remove_matched_selectors: true,
        })
        .pipe(ConvertStyleToAttrs)
        .pipe(RemoveDimensions)
        .pipe(RemoveAttrs::new("#", REMOVED_ATTRS)?)
        .pipe(RemoveStyleElement)
        .multipass(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimize(content: &str) -> Result<String, SvgError> {
        preset().unwrap().optimize(content)
    }

    #[test]
    fn test_preset_order() {
        let names = preset().unwrap().names();
        assert_eq!(
            &names[names.len() - 6..],
            &[
                "removeEmptyContainers",
                "inlineStyles",
                "convertStyleToAttrs",
                "removeDimensions",
                "removeAttrs",
                "removeStyleElement",
            ]
        );
    }

    #[test]
    fn test_optimize_illustrator_export() {
        let input = concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" "#,
            r#"version="1.1" x="0px" y="0px" width="24" height="24" viewBox="0 0 24 24" data-name="Layer 1">"#,
            r#"<defs><style>.cls-1{fill:#56A3BC;opacity:.8}</style></defs>"#,
            r#"<title>clock</title>"#,
            r#"<g><circle class="cls-1" cx="12" cy="12" r="10"/></g>"#,
            r#"</svg>"#,
        );
        assert_eq!(
            optimize(input).unwrap(),
            r##"<svg viewBox="0 0 24 24"><circle cx="12" cy="12" r="10" fill="#56a3bc"/></svg>"##
        );
    }

    #[test]
    fn test_optimize_derives_viewbox() {
        assert_eq!(
            optimize(r#"<svg width="16px" height="16px"><rect width="4" height="4"/></svg>"#).unwrap(),
            r#"<svg viewBox="0 0 16 16"><rect width="4" height="4"/></svg>"#
        );
    }

    #[test]
    fn test_optimize_rejects_malformed_markup() {
        assert!(optimize("<svg><path></svg>").is_err());
    }
}
