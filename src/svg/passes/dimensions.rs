//! Sizing removal.

use crate::svg::{Document, Element, Pass};

/// Removes `width`/`height` from `<svg>` elements so the image scales with
/// its container. Without a `viewBox`, one is derived from numeric
/// dimensions first; non-numeric dimensions are left untouched.
pub struct RemoveDimensions;

impl Pass for RemoveDimensions {
    fn name(&self) -> &'static str {
        "removeDimensions"
    }

    fn apply(&self, doc: &mut Document) {
        doc.walk_mut(&mut |elem| {
            if elem.is_tag("svg") {
                remove_dimensions(elem);
            }
        });
    }
}

fn remove_dimensions(elem: &mut Element) {
    if !elem.attrs.contains("viewBox") {
        let width = elem.attrs.get("width").and_then(parse_length);
        let height = elem.attrs.get("height").and_then(parse_length);
        let (Some(width), Some(height)) = (width, height) else {
            return;
        };
        elem.attrs.set("viewBox", format!("0 0 {width} {height}"));
    }

    elem.attrs.remove("width");
    elem.attrs.remove("height");
}

/// `24` or `24px`.
fn parse_length(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    raw.strip_suffix("px").unwrap_or(raw).trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        let mut doc = Document::parse(input).unwrap();
        RemoveDimensions.apply(&mut doc);
        doc.to_markup()
    }

    #[test]
    fn test_removes_when_viewbox_present() {
        assert_eq!(
            run(r#"<svg width="24" height="24" viewBox="0 0 48 48"/>"#),
            r#"<svg viewBox="0 0 48 48"/>"#
        );
    }

    #[test]
    fn test_derives_viewbox() {
        assert_eq!(
            run(r#"<svg width="24px" height="12.5"/>"#),
            r#"<svg viewBox="0 0 24 12.5"/>"#
        );
    }

    #[test]
    fn test_keeps_relative_dimensions() {
        assert_eq!(
            run(r#"<svg width="100%" height="2em"/>"#),
            r#"<svg width="100%" height="2em"/>"#
        );
    }

    #[test]
    fn test_other_elements_untouched() {
        assert_eq!(
            run(r#"<svg viewBox="0 0 1 1"><rect width="1" height="1"/></svg>"#),
            r#"<svg viewBox="0 0 1 1"><rect width="1" height="1"/></svg>"#
        );
    }
}
