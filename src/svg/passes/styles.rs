//! Style handling: `<style>` inlining, style-to-attribute conversion and
//! `<style>` removal.

use std::collections::HashSet;

use crate::svg::css::{
    self, Declaration, Stylesheet, cascade, parse_declarations, write_declarations,
};
use crate::svg::{Document, Element, Node, Pass};

/// CSS properties that have an equivalent presentation attribute.
pub(super) const PRESENTATION_ATTRS: &[&str] = &[
    "alignment-baseline",
    "baseline-shift",
    "clip",
    "clip-path",
    "clip-rule",
    "color",
    "color-interpolation",
    "color-interpolation-filters",
    "color-profile",
    "color-rendering",
    "cursor",
    "direction",
    "display",
    "dominant-baseline",
    "enable-background",
    "fill",
    "fill-opacity",
    "fill-rule",
    "filter",
    "flood-color",
    "flood-opacity",
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
    "lighting-color",
    "marker-end",
    "marker-mid",
    "marker-start",
    "mask",
    "opacity",
    "overflow",
    "paint-order",
    "pointer-events",
    "shape-rendering",
    "stop-color",
    "stop-opacity",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "text-anchor",
    "text-decoration",
    "text-overflow",
    "text-rendering",
    "unicode-bidi",
    "vector-effect",
    "visibility",
    "word-spacing",
    "writing-mode",
];

/// A `<style>` element holding CSS (no `type`, or `text/css`).
fn is_css_style(elem: &Element) -> bool {
    elem.is_tag("style")
        && elem
            .attrs
            .get("type")
            .is_none_or(|ty| ty.is_empty() || ty.eq_ignore_ascii_case("text/css"))
}

// ============================================================================
// inlineStyles
// ============================================================================

/// Moves declarations from `<style>` rules into matching elements' `style`
/// attributes.
pub struct InlineStyles {
    /// Only inline selectors that match exactly one element.
    pub only_matched_once: bool,
    /// Drop inlined selectors from their stylesheet afterwards.
    pub remove_matched_selectors: bool,
}

/// A compound selector located by index into the collected sheets.
struct Candidate {
    sheet: usize,
    rule: usize,
    selector: usize,
    specificity: u32,
    order: usize,
}

impl Candidate {
    fn matches(&self, sheets: &[Option<Stylesheet<'_>>], elem: &Element) -> bool {
        sheets[self.sheet]
            .as_ref()
            .and_then(|sheet| sheet.selector(self.rule, self.selector))
            .is_some_and(|selector| css::matches(selector, elem))
    }
}

impl Pass for InlineStyles {
    fn name(&self) -> &'static str {
        "inlineStyles"
    }

    fn apply(&self, doc: &mut Document) {
        let mut sources = Vec::new();
        doc.walk(&mut |elem: &Element| {
            if is_css_style(elem) {
                sources.push(elem.text_content());
            }
        });
        // Sheets lightningcss cannot parse are left in place untouched
        let mut sheets: Vec<Option<Stylesheet<'_>>> =
            sources.iter().map(|source| Stylesheet::parse(source)).collect();
        if sheets.iter().flatten().all(Stylesheet::is_empty) {
            return;
        }

        let mut candidates = collect_candidates(&sheets);
        candidates.sort_by_key(|c| (c.specificity, c.order));

        // Match counts, excluding the style elements themselves.
        let mut hits = vec![0usize; candidates.len()];
        doc.walk(&mut |elem: &Element| {
            if elem.is_tag("style") {
                return;
            }
            for (n, candidate) in candidates.iter().enumerate() {
                if candidate.matches(&sheets, elem) {
                    hits[n] += 1;
                }
            }
        });
        let usable: Vec<bool> = hits
            .iter()
            .map(|&count| count > 0 && (!self.only_matched_once || count == 1))
            .collect();
        if !usable.contains(&true) {
            return;
        }

        let rule_declarations: Vec<Vec<Declaration>> = candidates
            .iter()
            .map(|c| {
                sheets[c.sheet]
                    .as_ref()
                    .map(|sheet| sheet.declarations(c.rule))
                    .unwrap_or_default()
            })
            .collect();

        doc.walk_mut(&mut |elem| {
            if elem.is_tag("style") {
                return;
            }
            let mut computed: Vec<Declaration> = Vec::new();
            for (n, candidate) in candidates.iter().enumerate() {
                if usable[n] && candidate.matches(&sheets, elem) {
                    for decl in &rule_declarations[n] {
                        cascade(&mut computed, decl);
                    }
                }
            }
            if computed.is_empty() {
                return;
            }
            if let Some(inline) = elem.attrs.get("style") {
                let Some(inline) = parse_declarations(inline) else {
                    return;
                };
                for decl in &inline {
                    cascade(&mut computed, decl);
                }
            }
            elem.attrs.set("style", write_declarations(&computed));
        });

        if !self.remove_matched_selectors {
            return;
        }

        let mut matched: Vec<&Candidate> = candidates
            .iter()
            .zip(&usable)
            .filter(|(_, u)| **u)
            .map(|(c, _)| c)
            .collect();
        let mut dropped_classes: HashSet<String> = matched
            .iter()
            .filter_map(|c| sheets[c.sheet].as_ref()?.selector(c.rule, c.selector))
            .flat_map(|selector| css::classes(selector).map(str::to_string))
            .collect();

        // Highest selector index first so earlier indices stay valid.
        matched.sort_by_key(|c| std::cmp::Reverse((c.sheet, c.rule, c.selector)));
        for candidate in matched {
            if let Some(sheet) = &mut sheets[candidate.sheet] {
                sheet.remove_selector(candidate.rule, candidate.selector);
            }
        }
        for sheet in sheets.iter_mut().flatten() {
            sheet.prune();
        }

        // `None` keeps the original text of that style element
        let rewritten: Vec<Option<String>> = sheets
            .iter()
            .map(|sheet| sheet.as_ref().and_then(Stylesheet::to_css))
            .collect();
        let remaining_css: String = rewritten
            .iter()
            .zip(&sources)
            .map(|(css, source)| css.as_deref().unwrap_or(source))
            .collect();
        dropped_classes.retain(|class| !remaining_css.contains(&format!(".{class}")));
        if !dropped_classes.is_empty() {
            doc.walk_mut(&mut |elem| strip_classes(elem, &dropped_classes));
        }

        let mut index = 0;
        doc.walk_mut(&mut |elem| {
            if !is_css_style(elem) {
                return;
            }
            let Some(rewritten) = rewritten.get(index) else {
                return;
            };
            index += 1;
            let Some(css) = rewritten else {
                return;
            };

            let cdata = elem.children.iter().any(|n| matches!(n, Node::CData(_)));
            elem.children = match (css.is_empty(), cdata) {
                (true, _) => Vec::new(),
                (false, true) => vec![Node::CData(css.clone())],
                (false, false) => vec![Node::Text(css.clone())],
            };
        });
        doc.retain_nodes(|node| match node {
            Node::Element(elem) => !(is_css_style(elem) && elem.children.is_empty()),
            _ => true,
        });
    }
}

fn collect_candidates(sheets: &[Option<Stylesheet<'_>>]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut order = 0;
    for (sheet_index, sheet) in sheets.iter().enumerate() {
        let Some(sheet) = sheet else {
            continue;
        };
        for (rule_index, selectors) in sheet.style_rules() {
            for (selector_index, selector) in selectors.iter().enumerate() {
                if !css::is_compound(selector) {
                    continue;
                }
                candidates.push(Candidate {
                    sheet: sheet_index,
                    rule: rule_index,
                    selector: selector_index,
                    specificity: selector.specificity(),
                    order,
                });
                order += 1;
            }
        }
    }
    candidates
}

fn strip_classes(elem: &mut Element, dropped: &HashSet<String>) {
    let Some(class) = elem.attrs.get("class") else {
        return;
    };
    let kept = class
        .split_ascii_whitespace()
        .filter(|name| !dropped.contains(*name))
        .collect::<Vec<_>>()
        .join(" ");
    if kept.is_empty() {
        elem.attrs.remove("class");
    } else {
        elem.attrs.set("class", kept);
    }
}

// ============================================================================
// convertStyleToAttrs
// ============================================================================

/// Turns non-important `style` declarations into presentation attributes.
/// Declarations without an attribute equivalent stay in `style`.
pub struct ConvertStyleToAttrs;

impl Pass for ConvertStyleToAttrs {
    fn name(&self) -> &'static str {
        "convertStyleToAttrs"
    }

    fn apply(&self, doc: &mut Document) {
        doc.walk_mut(&mut |elem| {
            let Some(style) = elem.attrs.get("style") else {
                return;
            };
            let Some(declarations) = parse_declarations(style) else {
                return;
            };
            let (converted, kept): (Vec<_>, Vec<_>) =
                declarations.into_iter().partition(|decl| {
                    !decl.important && PRESENTATION_ATTRS.contains(&decl.name.as_str())
                });

            for decl in converted {
                elem.attrs.set(decl.name, decl.value);
            }
            if kept.is_empty() {
                elem.attrs.remove("style");
            } else {
                elem.attrs.set("style", write_declarations(&kept));
            }
        });
    }
}

// ============================================================================
// removeStyleElement
// ============================================================================

/// Drops every `<style>` element.
pub struct RemoveStyleElement;

impl Pass for RemoveStyleElement {
    fn name(&self) -> &'static str {
        "removeStyleElement"
    }

    fn apply(&self, doc: &mut Document) {
        doc.retain_nodes(|node| !matches!(node, Node::Element(elem) if elem.is_tag("style")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(input: &str) -> String {
        let mut doc = Document::parse(input).unwrap();
        InlineStyles {
            only_matched_once: false,
            remove_matched_selectors: true,
        }
        .apply(&mut doc);
        doc.to_markup()
    }

    #[test]
    fn test_inline_class_rules() {
        let input = "<svg><style>.cls-1{fill:#56a3bc}.cls-2{stroke:#707070}</style>\
                     <path class=\"cls-1\"/><path class=\"cls-2\"/><path class=\"cls-1\"/></svg>";
        assert_eq!(
            inline(input),
            "<svg><path style=\"fill:#56a3bc\"/><path style=\"stroke:#707070\"/>\
             <path style=\"fill:#56a3bc\"/></svg>"
        );
    }

    #[test]
    fn test_specificity_then_source_order() {
        let input = "<svg><style>#p{fill:#56a3bc}.a{fill:#ababab}\
                     path{fill:#707070;stroke:#cce3eb}.b{stroke:#123456}</style>\
                     <path id=\"p\" class=\"a b\"/></svg>";
        assert_eq!(
            inline(input),
            "<svg><path id=\"p\" style=\"fill:#56a3bc;stroke:#123456\"/></svg>"
        );
    }

    #[test]
    fn test_important_and_inline_precedence() {
        let input = "<svg><style>.a{fill:#56a3bc!important;stroke:#707070}</style>\
                     <path class=\"a\" style=\"fill:#ababab;stroke:#cce3eb\"/></svg>";
        assert_eq!(
            inline(input),
            "<svg><path style=\"stroke:#cce3eb;fill:#56a3bc!important\"/></svg>"
        );
    }

    #[test]
    fn test_unsupported_rules_are_kept() {
        let input = "<svg><style>.a{fill:#56a3bc}g .a{stroke:#707070}</style><g><path class=\"a\"/></g></svg>";
        assert_eq!(
            inline(input),
            "<svg><style>g .a{stroke:#707070}</style><g><path class=\"a\" style=\"fill:#56a3bc\"/></g></svg>"
        );
    }

    #[test]
    fn test_cdata_is_preserved() {
        let input = "<svg><style><![CDATA[.a{fill:#56a3bc}@media print{.a{fill:#707070}}]]></style><path class=\"a\"/></svg>";
        assert_eq!(
            inline(input),
            "<svg><style><![CDATA[@media print{.a{fill:#707070}}]]></style><path class=\"a\" style=\"fill:#56a3bc\"/></svg>"
        );
    }

    #[test]
    fn test_only_matched_once() {
        let mut doc = Document::parse(
            "<svg><style>.a{fill:#56a3bc}.b{stroke:#707070}</style><path class=\"a b\"/><path class=\"a\"/></svg>",
        )
        .unwrap();
        InlineStyles {
            only_matched_once: true,
            remove_matched_selectors: true,
        }
        .apply(&mut doc);
        assert_eq!(
            doc.to_markup(),
            "<svg><style>.a{fill:#56a3bc}</style><path class=\"a\" style=\"stroke:#707070\"/><path class=\"a\"/></svg>"
        );
    }

    #[test]
    fn test_selectors_can_be_kept() {
        let mut doc = Document::parse(
            "<svg><style>.a{fill:#56a3bc}</style><path class=\"a\"/></svg>",
        )
        .unwrap();
        InlineStyles {
            only_matched_once: false,
            remove_matched_selectors: false,
        }
        .apply(&mut doc);
        assert_eq!(
            doc.to_markup(),
            "<svg><style>.a{fill:#56a3bc}</style><path class=\"a\" style=\"fill:#56a3bc\"/></svg>"
        );
    }

    #[test]
    fn test_convert_style_to_attrs() {
        let mut doc = Document::parse(
            r##"<svg><path fill="#ababab" style="fill:#56a3bc;stroke-width:2;mix-blend-mode:multiply;stroke:#707070!important"/></svg>"##,
        )
        .unwrap();
        ConvertStyleToAttrs.apply(&mut doc);
        assert_eq!(
            doc.to_markup(),
            r##"<svg><path fill="#56a3bc" style="mix-blend-mode:multiply;stroke:#707070!important" stroke-width="2"/></svg>"##
        );
    }

    #[test]
    fn test_convert_style_drops_empty_style() {
        let mut doc = Document::parse(r##"<svg><path style="fill:#56A3BC"/></svg>"##).unwrap();
        ConvertStyleToAttrs.apply(&mut doc);
        assert_eq!(doc.to_markup(), r##"<svg><path fill="#56a3bc"/></svg>"##);
    }

    #[test]
    fn test_remove_style_element() {
        let mut doc =
            Document::parse("<svg><style>@font-face{}</style><g><style/></g></svg>").unwrap();
        RemoveStyleElement.apply(&mut doc);
        assert_eq!(doc.to_markup(), "<svg><g/></svg>");
    }
}
