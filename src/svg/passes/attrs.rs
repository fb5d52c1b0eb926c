//! Pattern-based attribute removal.
//!
//! Patterns have the form `element<sep>attribute<sep>value`, each part a
//! regular expression, `*` meaning "anything". Missing trailing parts
//! default to `*`; a single part names the attribute only.
//!
//! ```text
//! *#^data-.+$#*                          any data-* attribute
//! ^svg$#^(xmlns|version|x|y)$#*          a few attributes on <svg>
//! ```

use regex::Regex;

use crate::svg::{Document, Pass, SvgError};

/// Removes attributes matching any of the configured patterns.
pub struct RemoveAttrs {
    patterns: Vec<AttrPattern>,
}

struct AttrPattern {
    element: Regex,
    attribute: Regex,
    value: Regex,
}

impl RemoveAttrs {
    pub fn new<S: AsRef<str>>(separator: &str, patterns: &[S]) -> Result<Self, SvgError> {
        let patterns = patterns
            .iter()
            .map(|pattern| AttrPattern::parse(pattern.as_ref(), separator))
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }
}

impl AttrPattern {
    fn parse(pattern: &str, separator: &str) -> Result<Self, SvgError> {
        let parts: Vec<&str> = pattern.split(separator).collect();
        let (element, attribute, value) = match parts.as_slice() {
            [attribute] => ("*", *attribute, "*"),
            [element, attribute] => (*element, *attribute, "*"),
            [element, attribute, value] => (*element, *attribute, *value),
            _ => {
                return Err(SvgError::Pattern {
                    pattern: pattern.to_string(),
                    source: regex::Error::Syntax(format!(
                        "expected at most 3 parts separated by `{separator}`"
                    )),
                });
            }
        };

        let compile = |part: &str| {
            let expr = if part == "*" { ".*" } else { part };
            Regex::new(expr).map_err(|source| SvgError::Pattern {
                pattern: pattern.to_string(),
                source,
            })
        };

        Ok(Self {
            element: compile(element)?,
            attribute: compile(attribute)?,
            value: compile(value)?,
        })
    }
}

impl Pass for RemoveAttrs {
    fn name(&self) -> &'static str {
        "removeAttrs"
    }

    fn apply(&self, doc: &mut Document) {
        doc.walk_mut(&mut |elem| {
            for pattern in &self.patterns {
                if !pattern.element.is_match(&elem.name) {
                    continue;
                }
                elem.attrs.retain(|name, value| {
                    !(pattern.attribute.is_match(name) && pattern.value.is_match(value))
                });
            }
        });
    }
}
