//! `<style>` and `style` attribute support on top of lightningcss.
//!
//! Parsing, specificity and serialization come from lightningcss. Only
//! matching a selector against a single element lives here, and only
//! compound selectors made of a type (or `*`), classes and ids are matched.

use lightningcss::{
    declaration::DeclarationBlock,
    printer::PrinterOptions,
    properties::Property,
    rules::CssRule,
    selector::{Component, Selector},
    stylesheet::{ParserOptions, StyleAttribute, StyleSheet},
};

use super::Element;

/// Invalid rules and declarations are skipped instead of failing the sheet.
fn parser_options<'i>() -> ParserOptions<'static, 'i> {
    ParserOptions {
        error_recovery: true,
        ..ParserOptions::default()
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// A single `name: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    fn from_property(property: &Property<'_>, important: bool) -> Option<Self> {
        let css = property
            .to_css_string(false, PrinterOptions::default())
            .ok()?;
        let (name, value) = css.split_once(':')?;
        Some(Self {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
            important,
        })
    }
}

/// Flatten a parsed block, normal declarations first.
fn block_declarations(block: &DeclarationBlock<'_>) -> Vec<Declaration> {
    let normal = block.declarations.iter().map(|p| (p, false));
    let important = block.important_declarations.iter().map(|p| (p, true));
    normal
        .chain(important)
        .filter_map(|(property, important)| Declaration::from_property(property, important))
        .collect()
}

/// Parse a `style` attribute value. `None` if lightningcss rejects it.
pub fn parse_declarations(style: &str) -> Option<Vec<Declaration>> {
    let attr = StyleAttribute::parse(style, parser_options()).ok()?;
    Some(block_declarations(&attr.declarations))
}

/// Serialize declarations into compact `a:b;c:d` form.
pub fn write_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|decl| {
            if decl.important {
                format!("{}:{}!important", decl.name, decl.value)
            } else {
                format!("{}:{}", decl.name, decl.value)
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Merge `incoming` into `target` following cascade precedence:
/// a later declaration wins unless it would override an `!important` one
/// without being important itself.
pub fn cascade(target: &mut Vec<Declaration>, incoming: &Declaration) {
    match target.iter_mut().find(|decl| decl.name == incoming.name) {
        Some(existing) if existing.important && !incoming.important => {}
        Some(existing) => *existing = incoming.clone(),
        None => target.push(incoming.clone()),
    }
}

// ============================================================================
// Selectors
// ============================================================================

/// Whether every component can be checked on one element.
pub fn is_compound(selector: &Selector<'_>) -> bool {
    let mut components = selector.iter_raw_match_order().peekable();
    components.peek().is_some()
        && components.all(|component| {
            matches!(
                component,
                Component::ExplicitUniversalType
                    | Component::LocalName(_)
                    | Component::ID(_)
                    | Component::Class(_)
            )
        })
}

pub fn matches(selector: &Selector<'_>, elem: &Element) -> bool {
    if !is_compound(selector) {
        return false;
    }

    let class_attr = elem.attrs.get("class").unwrap_or_default();
    selector
        .iter_raw_match_order()
        .all(|component| match component {
            Component::ExplicitUniversalType => true,
            Component::LocalName(local) => elem.name == *local.name.0,
            Component::ID(id) => elem.attrs.get("id") == Some(&*id.0),
            Component::Class(class) => class_attr
                .split_ascii_whitespace()
                .any(|name| name == &*class.0),
            _ => false,
        })
}

/// Class names a selector refers to.
pub fn classes<'a>(selector: &'a Selector<'_>) -> impl Iterator<Item = &'a str> {
    selector
        .iter_raw_match_order()
        .filter_map(|component| match component {
            Component::Class(class) => Some(&*class.0),
            _ => None,
        })
}

// ============================================================================
// Stylesheet
// ============================================================================

/// A parsed `<style>` body. Rules are addressed by their top-level index.
pub struct Stylesheet<'i> {
    sheet: StyleSheet<'i, 'static>,
}

impl<'i> Stylesheet<'i> {
    pub fn parse(css: &'i str) -> Option<Self> {
        let sheet = StyleSheet::parse(css, parser_options()).ok()?;
        Some(Self { sheet })
    }

    pub fn is_empty(&self) -> bool {
        self.sheet.rules.0.is_empty()
    }

    /// Top-level style rules without nested rules, as
    /// `(rule index, selectors)`. At-rules are never inlined.
    pub fn style_rules(&self) -> impl Iterator<Item = (usize, &[Selector<'i>])> {
        self.sheet
            .rules
            .0
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| match rule {
                CssRule::Style(style) if style.rules.0.is_empty() => {
                    Some((index, style.selectors.0.as_slice()))
                }
                _ => None,
            })
    }

    pub fn selector(&self, rule: usize, selector: usize) -> Option<&Selector<'i>> {
        match self.sheet.rules.0.get(rule)? {
            CssRule::Style(style) => style.selectors.0.get(selector),
            _ => None,
        }
    }

    pub fn declarations(&self, rule: usize) -> Vec<Declaration> {
        match self.sheet.rules.0.get(rule) {
            Some(CssRule::Style(style)) => block_declarations(&style.declarations),
            _ => Vec::new(),
        }
    }

    /// Drop one selector from a rule's selector list.
    pub fn remove_selector(&mut self, rule: usize, selector: usize) {
        if let Some(CssRule::Style(style)) = self.sheet.rules.0.get_mut(rule)
            && selector < style.selectors.0.len()
        {
            style.selectors.0.remove(selector);
        }
    }

    /// Drop style rules left without selectors. Shifts rule indices.
    pub fn prune(&mut self) {
        self.sheet
            .rules
            .0
            .retain(|rule| !matches!(rule, CssRule::Style(style) if style.selectors.0.is_empty()));
    }

    /// Minified serialization.
    pub fn to_css(&self) -> Option<String> {
        let result = self
            .sheet
            .to_css(PrinterOptions {
                minify: true,
                ..PrinterOptions::default()
            })
            .ok()?;
        Some(result.code)
    }
}
