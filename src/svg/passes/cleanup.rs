//! Cleanup passes that never change rendering.

use std::collections::HashSet;

use crate::svg::{Document, Element, Node, Pass};

/// Namespaces written by editors that carry no rendering information.
const EDITOR_NAMESPACES: &[&str] = &[
    "http://creativecommons.org/ns#",
    "http://inkscape.sourceforge.net/DTD/sodipodi-0.dtd",
    "http://ns.adobe.com/AdobeIllustrator/10.0/",
    "http://ns.adobe.com/AdobeSVGViewerExtensions/3.0/",
    "http://ns.adobe.com/Extensibility/1.0/",
    "http://ns.adobe.com/Flows/1.0/",
    "http://ns.adobe.com/GenericCustomNamespace/1.0/",
    "http://ns.adobe.com/Graphs/1.0/",
    "http://ns.adobe.com/ImageReplacement/1.0/",
    "http://ns.adobe.com/SaveForWeb/1.0/",
    "http://ns.adobe.com/Variables/1.0/",
    "http://ns.adobe.com/XPath/1.0/",
    "http://purl.org/dc/elements/1.1/",
    "http://schemas.microsoft.com/visio/2003/SVGExtensions/",
    "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd",
    "http://taptrix.com/vectorillustrator/svg_extensions",
    "http://www.bohemiancoding.com/sketch/ns",
    "http://www.figma.com/figma/ns",
    "http://www.inkscape.org/namespaces/inkscape",
    "http://www.serif.com/",
    "http://www.vector.evaxdesign.sk",
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
];

/// Conditional processing attributes, meaningful even when empty.
const CONDITIONAL_ATTRS: &[&str] = &["requiredExtensions", "requiredFeatures", "systemLanguage"];

/// Prefix of a qualified name (`inkscape:label` → `inkscape`).
fn prefix_of(name: &str) -> Option<&str> {
    name.split_once(':').map(|(prefix, _)| prefix)
}

// ============================================================================
// removeComments
// ============================================================================

/// Drops comments, except `<!--! ... -->` legal notices.
pub struct RemoveComments;

impl Pass for RemoveComments {
    fn name(&self) -> &'static str {
        "removeComments"
    }

    fn apply(&self, doc: &mut Document) {
        doc.retain_nodes(|node| match node {
            Node::Comment(text) => text.starts_with('!'),
            _ => true,
        });
    }
}

// ============================================================================
// removeMetadata
// ============================================================================

/// Drops `<metadata>`, `<title>` and `<desc>`.
pub struct RemoveMetadata;

impl Pass for RemoveMetadata {
    fn name(&self) -> &'static str {
        "removeMetadata"
    }

    fn apply(&self, doc: &mut Document) {
        doc.retain_nodes(|node| match node {
            Node::Element(elem) => !matches!(elem.name.as_str(), "metadata" | "title" | "desc"),
            _ => true,
        });
    }
}

// ============================================================================
// removeEditorsNSData
// ============================================================================

/// Drops elements, attributes and namespace declarations belonging to
/// editor namespaces (Inkscape, Sodipodi, Illustrator, Sketch, ...).
pub struct RemoveEditorsNsData;

impl Pass for RemoveEditorsNsData {
    fn name(&self) -> &'static str {
        "removeEditorsNSData"
    }

    fn apply(&self, doc: &mut Document) {
        let mut prefixes = HashSet::new();
        doc.root.attrs.retain(|name, value| {
            if let Some(prefix) = name.strip_prefix("xmlns:")
                && EDITOR_NAMESPACES.contains(&value)
            {
                prefixes.insert(prefix.to_string());
                return false;
            }
            true
        });

        if prefixes.is_empty() {
            return;
        }

        let is_editor = |name: &str| prefix_of(name).is_some_and(|p| prefixes.contains(p));

        doc.retain_nodes(|node| match node {
            Node::Element(elem) => !is_editor(&elem.name),
            _ => true,
        });
        doc.walk_mut(&mut |elem| elem.attrs.retain(|name, _| !is_editor(name)));
    }
}

// ============================================================================
// cleanupAttrs
// ============================================================================

/// Collapses whitespace runs (including newlines) in attribute values and
/// trims them.
pub struct CleanupAttrs;

impl Pass for CleanupAttrs {
    fn name(&self) -> &'static str {
        "cleanupAttrs"
    }

    fn apply(&self, doc: &mut Document) {
        doc.walk_mut(&mut |elem| {
            for (_, value) in elem.attrs.values_mut() {
                if value.contains(char::is_whitespace) {
                    *value = value.split_whitespace().collect::<Vec<_>>().join(" ");
                }
            }
        });
    }
}

// ============================================================================
// removeEmptyAttrs
// ============================================================================

/// Drops attributes with empty values.
pub struct RemoveEmptyAttrs;

impl Pass for RemoveEmptyAttrs {
    fn name(&self) -> &'static str {
        "removeEmptyAttrs"
    }

    fn apply(&self, doc: &mut Document) {
        doc.walk_mut(&mut |elem| {
            elem.attrs
                .retain(|name, value| !value.is_empty() || CONDITIONAL_ATTRS.contains(&name));
        });
    }
}

// ============================================================================
// removeUnusedNS
// ============================================================================

/// Drops `xmlns:prefix` declarations on the root that nothing uses.
pub struct RemoveUnusedNs;

impl Pass for RemoveUnusedNs {
    fn name(&self) -> &'static str {
        "removeUnusedNS"
    }

    fn apply(&self, doc: &mut Document) {
        let mut used = HashSet::new();
        doc.walk(&mut |elem: &Element| {
            if let Some(prefix) = prefix_of(&elem.name) {
                used.insert(prefix.to_string());
            }
            for (name, _) in elem.attrs.iter() {
                if name.starts_with("xmlns:") {
                    continue;
                }
                if let Some(prefix) = prefix_of(name) {
                    used.insert(prefix.to_string());
                }
            }
        });

        doc.root.attrs.retain(|name, _| match name.strip_prefix("xmlns:") {
            Some(prefix) => used.contains(prefix),
            None => true,
        });
    }
}
