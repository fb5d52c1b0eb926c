//! Removal of elements that never render.

use crate::svg::css::parse_declarations;
use crate::svg::{Document, Element, Node, Pass};

/// Drops hidden and zero-sized elements: `display="none"` (except
/// markers), `visibility="hidden"` without a visible descendant,
/// `opacity="0"` outside clip paths, zero-sized shapes, patterns and
/// images, paths without drawing data, and polylines or polygons without
/// points. The `style` attribute overrides the attribute of the same name.
pub struct RemoveHiddenElems;

impl Pass for RemoveHiddenElems {
    fn name(&self) -> &'static str {
        "removeHiddenElems"
    }

    fn apply(&self, doc: &mut Document) {
        prune(&mut doc.root, false);
    }
}

fn prune(elem: &mut Element, in_clip_path: bool) {
    let in_clip_path = in_clip_path || elem.is_tag("clipPath");
    elem.children.retain(|node| match node {
        Node::Element(child) => !is_hidden(child, in_clip_path),
        _ => true,
    });
    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        prune(child, in_clip_path);
    }
}

/// Presentation value, `style` first.
fn property(elem: &Element, name: &str) -> Option<String> {
    elem.attrs
        .get("style")
        .and_then(parse_declarations)
        .and_then(|decls| decls.into_iter().rev().find(|decl| decl.name == name))
        .map(|decl| decl.value)
        .or_else(|| elem.attrs.get(name).map(str::to_string))
}

fn is_zero(elem: &Element, attr: &str) -> bool {
    elem.attrs
        .get(attr)
        .and_then(|value| value.trim().parse::<f64>().ok())
        .is_some_and(|value| value == 0.0)
}

fn has_visible_descendant(elem: &Element) -> bool {
    elem.child_elements().any(|child| {
        property(child, "visibility").as_deref() == Some("visible") || has_visible_descendant(child)
    })
}

fn is_hidden(elem: &Element, in_clip_path: bool) -> bool {
    if property(elem, "display").as_deref() == Some("none") && !elem.is_tag("marker") {
        return true;
    }
    if property(elem, "visibility").as_deref() == Some("hidden") && !has_visible_descendant(elem) {
        return true;
    }
    if !in_clip_path
        && property(elem, "opacity")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .is_some_and(|value| value == 0.0)
    {
        return true;
    }

    let childless = elem.children.is_empty();
    match elem.name.as_str() {
        "circle" => childless && is_zero(elem, "r"),
        "ellipse" => childless && (is_zero(elem, "rx") || is_zero(elem, "ry")),
        "rect" => childless && (is_zero(elem, "width") || is_zero(elem, "height")),
        "pattern" | "image" => is_zero(elem, "width") || is_zero(elem, "height"),
        "path" => !elem
            .attrs
            .get("d")
            .is_some_and(|d| d.trim_start().starts_with(['M', 'm'])),
        "polyline" | "polygon" => elem
            .attrs
            .get("points")
            .is_none_or(|points| points.trim().is_empty()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        let mut doc = Document::parse(input).unwrap();
        RemoveHiddenElems.apply(&mut doc);
        doc.to_markup()
    }

    #[test]
    fn test_display_none() {
        assert_eq!(
            run(r#"<svg><g display="none"><path d="M0 0"/></g><path d="M1 1" style="display:none"/><marker display="none"/></svg>"#),
            r#"<svg><marker display="none"/></svg>"#
        );
    }

    #[test]
    fn test_visibility_hidden_keeps_visible_descendants() {
        assert_eq!(
            run(concat!(
                r#"<svg><g visibility="hidden"><path d="M0 0"/></g>"#,
                r#"<g visibility="hidden"><g><path d="M0 0" visibility="visible"/></g></g></svg>"#,
            )),
            r#"<svg><g visibility="hidden"><g><path d="M0 0" visibility="visible"/></g></g></svg>"#
        );
    }

    #[test]
    fn test_zero_opacity_outside_clip_paths() {
        assert_eq!(
            run(r#"<svg><path d="M0 0" opacity="0"/><clipPath id="c"><path d="M0 0" opacity="0"/></clipPath></svg>"#),
            r#"<svg><clipPath id="c"><path d="M0 0" opacity="0"/></clipPath></svg>"#
        );
    }

    #[test]
    fn test_zero_sized_shapes() {
        assert_eq!(
            run(concat!(
                r#"<svg><circle r="0"/><ellipse rx="2" ry="0"/><rect width="0" height="4"/>"#,
                r#"<image width="0" height="4"/><pattern width="4" height="0.0"/>"#,
                r#"<circle r="0"><animate attributeName="r" to="4"/></circle>"#,
                r#"<rect width="4" height="4"/></svg>"#,
            )),
            r#"<svg><circle r="0"><animate attributeName="r" to="4"/></circle><rect width="4" height="4"/></svg>"#
        );
    }

    #[test]
    fn test_paths_and_polylines_without_data() {
        assert_eq!(
            run(r#"<svg><path/><path d=""/><path d="L1 1"/><path d=" m1 1h2"/><polyline/><polygon points=" "/><polygon points="0 0 1 1"/></svg>"#),
            r#"<svg><path d=" m1 1h2"/><polygon points="0 0 1 1"/></svg>"#
        );
    }
}
