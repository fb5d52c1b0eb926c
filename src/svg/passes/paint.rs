//! Presentation attribute cleanup: default values, overrides that repeat
//! the inherited value, unknown elements, and paint that never shows.
//!
//! Both passes compute presentation values the way a renderer inherits
//! them, from attributes and `style` attributes. A document with a
//! `<style>` sheet is left alone since rules there could change the result.

use std::collections::HashMap;

use super::styles::PRESENTATION_ATTRS;
use crate::svg::css::parse_declarations;
use crate::svg::{Document, Element, Node, Pass};

/// Presentation properties passed down to children.
const INHERITABLE: &[&str] = &[
    "clip-rule",
    "color",
    "color-interpolation",
    "color-interpolation-filters",
    "color-profile",
    "color-rendering",
    "cursor",
    "direction",
    "dominant-baseline",
    "fill",
    "fill-opacity",
    "fill-rule",
    "font",
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "glyph-orientation-horizontal",
    "glyph-orientation-vertical",
    "image-rendering",
    "letter-spacing",
    "marker",
    "marker-end",
    "marker-mid",
    "marker-start",
    "paint-order",
    "pointer-events",
    "shape-rendering",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "text-anchor",
    "text-rendering",
    "visibility",
    "word-spacing",
    "writing-mode",
];

/// Initial values of presentation attributes. Colors use the long hex
/// form `convertColors` produces.
const PRESENTATION_DEFAULTS: &[(&str, &str)] = &[
    ("alignment-baseline", "baseline"),
    ("baseline-shift", "baseline"),
    ("clip", "auto"),
    ("clip-path", "none"),
    ("clip-rule", "nonzero"),
    ("color-interpolation", "sRGB"),
    ("color-interpolation-filters", "linearRGB"),
    ("color-rendering", "auto"),
    ("direction", "ltr"),
    ("display", "inline"),
    ("dominant-baseline", "auto"),
    ("fill", "#000000"),
    ("fill-opacity", "1"),
    ("fill-rule", "nonzero"),
    ("font-size-adjust", "none"),
    ("font-stretch", "normal"),
    ("font-style", "normal"),
    ("font-variant", "normal"),
    ("font-weight", "normal"),
    ("image-rendering", "auto"),
    ("letter-spacing", "normal"),
    ("marker-end", "none"),
    ("marker-mid", "none"),
    ("marker-start", "none"),
    ("mask", "none"),
    ("opacity", "1"),
    ("paint-order", "normal"),
    ("shape-rendering", "auto"),
    ("stop-color", "#000000"),
    ("stop-opacity", "1"),
    ("stroke", "none"),
    ("stroke-dasharray", "none"),
    ("stroke-dashoffset", "0"),
    ("stroke-linecap", "butt"),
    ("stroke-linejoin", "miter"),
    ("stroke-miterlimit", "4"),
    ("stroke-opacity", "1"),
    ("stroke-width", "1"),
    ("text-anchor", "start"),
    ("text-decoration", "none"),
    ("text-rendering", "auto"),
    ("unicode-bidi", "normal"),
    ("vector-effect", "none"),
    ("visibility", "visible"),
    ("word-spacing", "normal"),
    ("writing-mode", "lr-tb"),
];

/// `(element, attribute, default)` for non-presentation attributes.
const ELEMENT_DEFAULTS: &[(&str, &str, &str)] = &[
    ("svg", "x", "0"),
    ("svg", "y", "0"),
    ("svg", "width", "100%"),
    ("svg", "height", "100%"),
    ("svg", "preserveAspectRatio", "xMidYMid meet"),
    ("svg", "zoomAndPan", "magnify"),
    ("svg", "version", "1.1"),
    ("svg", "baseProfile", "none"),
    ("rect", "x", "0"),
    ("rect", "y", "0"),
    ("circle", "cx", "0"),
    ("circle", "cy", "0"),
    ("ellipse", "cx", "0"),
    ("ellipse", "cy", "0"),
    ("line", "x1", "0"),
    ("line", "y1", "0"),
    ("line", "x2", "0"),
    ("line", "y2", "0"),
    ("image", "x", "0"),
    ("image", "y", "0"),
    ("image", "preserveAspectRatio", "xMidYMid meet"),
    ("use", "x", "0"),
    ("use", "y", "0"),
    ("linearGradient", "x1", "0"),
    ("linearGradient", "y1", "0"),
    ("linearGradient", "x2", "100%"),
    ("linearGradient", "y2", "0"),
    ("linearGradient", "spreadMethod", "pad"),
    ("linearGradient", "gradientUnits", "objectBoundingBox"),
    ("radialGradient", "cx", "50%"),
    ("radialGradient", "cy", "50%"),
    ("radialGradient", "r", "50%"),
    ("radialGradient", "spreadMethod", "pad"),
    ("radialGradient", "gradientUnits", "objectBoundingBox"),
    ("pattern", "x", "0"),
    ("pattern", "y", "0"),
    ("pattern", "patternUnits", "objectBoundingBox"),
    ("pattern", "patternContentUnits", "userSpaceOnUse"),
    ("clipPath", "clipPathUnits", "userSpaceOnUse"),
    ("mask", "maskUnits", "objectBoundingBox"),
    ("mask", "maskContentUnits", "userSpaceOnUse"),
    ("marker", "markerUnits", "strokeWidth"),
    ("marker", "refX", "0"),
    ("marker", "refY", "0"),
    ("marker", "markerWidth", "3"),
    ("marker", "markerHeight", "3"),
    ("filter", "filterUnits", "objectBoundingBox"),
    ("filter", "primitiveUnits", "userSpaceOnUse"),
    ("textPath", "startOffset", "0"),
];

/// SVG 1.1 and SVG 2 element names.
const KNOWN_ELEMENTS: &[&str] = &[
    "a",
    "altGlyph",
    "altGlyphDef",
    "altGlyphItem",
    "animate",
    "animateColor",
    "animateMotion",
    "animateTransform",
    "circle",
    "clipPath",
    "color-profile",
    "cursor",
    "defs",
    "desc",
    "discard",
    "ellipse",
    "feBlend",
    "feColorMatrix",
    "feComponentTransfer",
    "feComposite",
    "feConvolveMatrix",
    "feDiffuseLighting",
    "feDisplacementMap",
    "feDistantLight",
    "feDropShadow",
    "feFlood",
    "feFuncA",
    "feFuncB",
    "feFuncG",
    "feFuncR",
    "feGaussianBlur",
    "feImage",
    "feMerge",
    "feMergeNode",
    "feMorphology",
    "feOffset",
    "fePointLight",
    "feSpecularLighting",
    "feSpotLight",
    "feTile",
    "feTurbulence",
    "filter",
    "font",
    "font-face",
    "font-face-format",
    "font-face-name",
    "font-face-src",
    "font-face-uri",
    "foreignObject",
    "g",
    "glyph",
    "glyphRef",
    "hatch",
    "hatchpath",
    "hkern",
    "image",
    "line",
    "linearGradient",
    "marker",
    "mask",
    "mesh",
    "meshgradient",
    "meshpatch",
    "meshrow",
    "metadata",
    "missing-glyph",
    "mpath",
    "path",
    "pattern",
    "polygon",
    "polyline",
    "radialGradient",
    "rect",
    "script",
    "set",
    "solidcolor",
    "stop",
    "style",
    "svg",
    "switch",
    "symbol",
    "text",
    "textPath",
    "title",
    "tref",
    "tspan",
    "use",
    "view",
    "vkern",
];

/// Basic shapes, the only elements whose paint is stripped.
const SHAPES: &[&str] = &[
    "circle", "ellipse", "line", "path", "polygon", "polyline", "rect",
];

fn has_style_sheet(doc: &Document) -> bool {
    let mut found = false;
    doc.walk(&mut |elem: &Element| found |= elem.is_tag("style") || elem.is_tag("script"));
    found
}

// ============================================================================
// Computed style
// ============================================================================

/// Presentation values in effect on one element.
#[derive(Debug, Clone, Default)]
struct Computed(HashMap<String, String>);

impl Computed {
    /// Values of `elem` given its parent's: the inheritable ones, then the
    /// element's presentation attributes, then its `style` attribute.
    /// `None` if that attribute cannot be parsed.
    fn of(elem: &Element, parent: &Computed) -> Option<Self> {
        let mut values: HashMap<String, String> = parent
            .0
            .iter()
            .filter(|(name, _)| INHERITABLE.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        for (name, value) in elem.attrs.iter() {
            if PRESENTATION_ATTRS.contains(&name) {
                values.insert(name.to_string(), value.to_string());
            }
        }
        if let Some(style) = elem.attrs.get("style") {
            for decl in parse_declarations(style)? {
                if PRESENTATION_ATTRS.contains(&decl.name.as_str()) {
                    values.insert(decl.name, decl.value);
                }
            }
        }

        Some(Self(values))
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn is(&self, name: &str, value: &str) -> bool {
        self.get(name) == Some(value)
    }
}

// ============================================================================
// removeUnknownsAndDefaults
// ============================================================================

/// Drops unknown elements, attributes set to their default value, and
/// inheritable attributes that repeat the parent's value.
///
/// Namespaced elements and attributes, `data-*`, `aria-*` and elements with
/// an `id` keep their attributes. `foreignObject` content is not visited.
pub struct RemoveUnknownsAndDefaults;

impl Pass for RemoveUnknownsAndDefaults {
    fn name(&self) -> &'static str {
        "removeUnknownsAndDefaults"
    }

    fn apply(&self, doc: &mut Document) {
        let attrs = !has_style_sheet(doc);
        clean(&mut doc.root, &Computed::default(), attrs);
    }
}

fn clean(elem: &mut Element, parent: &Computed, attrs: bool) {
    if elem.is_tag("foreignObject") {
        return;
    }

    elem.children.retain(|node| match node {
        Node::Element(child) => {
            child.name.contains(':') || KNOWN_ELEMENTS.contains(&child.name.as_str())
        }
        _ => true,
    });

    if attrs && !elem.name.contains(':') && !elem.attrs.contains("id") {
        strip_defaults(elem, parent);
    }

    let Some(computed) = Computed::of(elem, parent) else {
        return;
    };
    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        clean(child, &computed, attrs);
    }
}

fn strip_defaults(elem: &mut Element, parent: &Computed) {
    let tag = elem.name.as_str();
    elem.attrs.retain(|name, value| {
        if name == "xmlns"
            || name.contains(':')
            || name.starts_with("data-")
            || name.starts_with("aria-")
        {
            return true;
        }

        let inherited = parent.get(name);
        if inherited.is_none() && default_value(tag, name) == Some(value) {
            return false;
        }
        !(INHERITABLE.contains(&name) && inherited == Some(value))
    });
}

fn default_value(tag: &str, attr: &str) -> Option<&'static str> {
    ELEMENT_DEFAULTS
        .iter()
        .find(|(t, a, _)| *t == tag && *a == attr)
        .map(|(_, _, value)| *value)
        .or_else(|| {
            PRESENTATION_DEFAULTS
                .iter()
                .find(|(a, _)| *a == attr)
                .map(|(_, value)| *value)
        })
}

// ============================================================================
// removeUselessStrokeAndFill
// ============================================================================

/// Drops `stroke*` attributes from shapes whose stroke never shows, and
/// `fill-*` attributes from shapes whose fill never shows.
///
/// An explicit `none` is kept where the parent would otherwise pass a
/// visible paint down. Elements with an `id` and their subtrees are
/// skipped, as are strokes that still size a `marker-end`.
pub struct RemoveUselessStrokeAndFill;

impl Pass for RemoveUselessStrokeAndFill {
    fn name(&self) -> &'static str {
        "removeUselessStrokeAndFill"
    }

    fn apply(&self, doc: &mut Document) {
        if has_style_sheet(doc) {
            return;
        }
        strip_paint(&mut doc.root, &Computed::default());
    }
}

fn strip_paint(elem: &mut Element, parent: &Computed) {
    // Referenced elements may be painted by a `<use>` elsewhere
    if elem.attrs.contains("id") {
        return;
    }
    let Some(computed) = Computed::of(elem, parent) else {
        return;
    };

    if SHAPES.contains(&elem.name.as_str()) {
        strip_stroke(elem, &computed, parent);
        strip_fill(elem, &computed);
    }

    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        strip_paint(child, &computed);
    }
}

fn strip_stroke(elem: &mut Element, computed: &Computed, parent: &Computed) {
    let zero_width = computed.is("stroke-width", "0");
    let invisible = computed.get("stroke").is_none_or(|stroke| stroke == "none")
        || computed.is("stroke-opacity", "0")
        || zero_width;
    if !invisible || !(zero_width || computed.get("marker-end").is_none()) {
        return;
    }

    elem.attrs.retain(|name, _| !name.starts_with("stroke"));
    if parent.get("stroke").is_some_and(|stroke| stroke != "none") {
        elem.attrs.set("stroke", "none");
    }
}

fn strip_fill(elem: &mut Element, computed: &Computed) {
    let none = computed.is("fill", "none");
    if !none && !computed.is("fill-opacity", "0") {
        return;
    }

    elem.attrs.retain(|name, _| !name.starts_with("fill-"));
    if !none {
        elem.attrs.set("fill", "none");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(pass: impl Pass, input: &str) -> String {
        let mut doc = Document::parse(input).unwrap();
        pass.apply(&mut doc);
        doc.to_markup()
    }

    #[test]
    fn test_defaults_are_removed() {
        assert_eq!(
            run(
                RemoveUnknownsAndDefaults,
                r##"<svg version="1.1" viewBox="0 0 4 4"><rect x="0" y="1" width="4" height="4" fill="#000000" stroke="none" stroke-width="1" opacity="1"/></svg>"##
            ),
            r#"<svg viewBox="0 0 4 4"><rect y="1" width="4" height="4"/></svg>"#
        );
    }

    #[test]
    fn test_defaults_kept_under_inherited_value() {
        assert_eq!(
            run(
                RemoveUnknownsAndDefaults,
                r##"<svg><g fill="#56a3bc"><path d="M0 0" fill="#000000"/></g></svg>"##
            ),
            r##"<svg><g fill="#56a3bc"><path d="M0 0" fill="#000000"/></g></svg>"##
        );
        assert_eq!(
            run(
                RemoveUnknownsAndDefaults,
                r##"<svg><g style="stroke:#56a3bc"><path d="M0 0" stroke="none"/></g></svg>"##
            ),
            r##"<svg><g style="stroke:#56a3bc"><path d="M0 0" stroke="none"/></g></svg>"##
        );
    }

    #[test]
    fn test_useless_overrides_are_removed() {
        assert_eq!(
            run(
                RemoveUnknownsAndDefaults,
                r##"<svg><g fill="#56a3bc" opacity="0.5"><path d="M0 0" fill="#56a3bc" opacity="0.5"/><path id="a" d="M1 1" fill="#56a3bc"/></g></svg>"##
            ),
            r##"<svg><g fill="#56a3bc" opacity="0.5"><path d="M0 0" opacity="0.5"/><path id="a" d="M1 1" fill="#56a3bc"/></g></svg>"##
        );
    }

    #[test]
    fn test_unknown_elements_are_removed() {
        assert_eq!(
            run(
                RemoveUnknownsAndDefaults,
                r#"<svg><foo><path d="M0 0"/></foo><i:pgf/><foreignObject><div/></foreignObject><path d="M0 0" data-name="x" aria-label="y"/></svg>"#
            ),
            r#"<svg><i:pgf/><foreignObject><div/></foreignObject><path d="M0 0" data-name="x" aria-label="y"/></svg>"#
        );
    }

    #[test]
    fn test_style_sheet_keeps_attributes() {
        let input = r#"<svg><style>.a{stroke:red}</style><path class="a" d="M0 0" stroke="none"/></svg>"#;
        assert_eq!(run(RemoveUnknownsAndDefaults, input), input);
        assert_eq!(run(RemoveUselessStrokeAndFill, input), input);
    }

    #[test]
    fn test_invisible_stroke_is_stripped() {
        assert_eq!(
            run(
                RemoveUselessStrokeAndFill,
                r##"<svg><path d="M0 0" stroke="none" stroke-width="2"/><path d="M0 0" stroke="#707070" stroke-opacity="0"/><path d="M0 0" stroke-linecap="round"/><path d="M0 0" stroke="#707070" stroke-width="2"/></svg>"##
            ),
            r##"<svg><path d="M0 0"/><path d="M0 0"/><path d="M0 0"/><path d="M0 0" stroke="#707070" stroke-width="2"/></svg>"##
        );
    }

    #[test]
    fn test_stroke_none_kept_against_parent() {
        assert_eq!(
            run(
                RemoveUselessStrokeAndFill,
                r##"<svg><g stroke="#707070"><path d="M0 0" stroke="none" stroke-width="3"/></g></svg>"##
            ),
            r##"<svg><g stroke="#707070"><path d="M0 0" stroke="none"/></g></svg>"##
        );
    }

    #[test]
    fn test_marker_end_keeps_stroke_width() {
        let input = r#"<svg><path d="M0 0" stroke-width="2" marker-end="url(#m)"/></svg>"#;
        assert_eq!(run(RemoveUselessStrokeAndFill, input), input);
    }

    #[test]
    fn test_invisible_fill_is_stripped() {
        assert_eq!(
            run(
                RemoveUselessStrokeAndFill,
                r##"<svg><path d="M0 0" fill="none" fill-rule="evenodd"/><path d="M0 0" fill="#56a3bc" fill-opacity="0"/></svg>"##
            ),
            r#"<svg><path d="M0 0" fill="none"/><path d="M0 0" fill="none"/></svg>"#
        );
    }

    #[test]
    fn test_ids_skip_subtree() {
        let input = r#"<svg><g id="icon"><path d="M0 0" stroke="none"/></g></svg>"#;
        assert_eq!(run(RemoveUselessStrokeAndFill, input), input);
    }
}
