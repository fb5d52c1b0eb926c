//! SVG parsing on top of quick-xml's pull reader.

use std::{borrow::Cow, collections::HashMap, sync::LazyLock};

use quick_xml::{
    Reader,
    escape::{resolve_predefined_entity, unescape_with},
    events::{BytesStart, Event},
};
use regex::Regex;

use super::{Document, Element, Node, SvgError};

/// Elements whose whitespace-only text is significant.
const TEXT_CONTENT_ELEMENTS: &[&str] = &["text", "tspan", "textPath", "title", "desc"];

/// `<!ENTITY name "value">` declarations in a doctype's internal subset.
/// Parameter entities (`<!ENTITY % name ...>`) are not matched.
static ENTITY_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!ENTITY\s+([^\s%"'>]+)\s+(?:"([^"]*)"|'([^']*)')\s*>"#).unwrap()
});

/// Internal entities declared in the doctype, e.g. Illustrator's
/// `<!ENTITY ns_extend "http://ns.adobe.com/Extensibility/1.0/">`.
#[derive(Debug, Default)]
struct Entities(HashMap<String, String>);

impl Entities {
    fn declare(&mut self, doctype: &str) {
        for caps in ENTITY_DECL.captures_iter(doctype) {
            let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            // The first declaration of an entity is binding
            self.0
                .entry(caps[1].to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    /// Replace entity and character references in `raw`.
    fn unescape<'a>(&self, raw: &'a str) -> Result<Cow<'a, str>, SvgError> {
        let resolved = unescape_with(raw, |name| {
            resolve_predefined_entity(name).or_else(|| self.0.get(name).map(String::as_str))
        })?;
        Ok(resolved)
    }
}

/// Parse markup into a [`Document`].
///
/// The XML declaration, doctype and processing instructions are dropped,
/// as is whitespace-only text outside text content elements. Internal
/// entities declared in the doctype are expanded in text and attributes.
pub fn parse(content: &str) -> Result<Document, SvgError> {
    let mut reader = Reader::from_str(content);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut entities = Entities::default();

    loop {
        let event = reader.read_event().map_err(|source| SvgError::Xml {
            position: reader.error_position() as u64,
            source,
        })?;

        match event {
            Event::Start(start) => stack.push(open_element(&start, &entities)?),
            Event::Empty(start) => {
                let elem = open_element(&start, &entities)?;
                attach(&mut stack, &mut root, elem)?;
            }
            Event::End(end) => {
                let elem = stack.pop().ok_or_else(|| {
                    SvgError::UnexpectedEnd(String::from_utf8_lossy(end.name().as_ref()).into())
                })?;
                attach(&mut stack, &mut root, elem)?;
            }
            Event::Text(text) => {
                let raw = std::str::from_utf8(&text)?;
                push_text(&mut stack, entities.unescape(raw)?)?;
            }
            Event::GeneralRef(reference) => {
                let name = std::str::from_utf8(&reference)?;
                let entity = format!("&{name};");
                push_text(&mut stack, Cow::Owned(entities.unescape(&entity)?.into_owned()))?;
            }
            Event::CData(data) => {
                let text = std::str::from_utf8(&data)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::CData(text.to_string()));
                }
            }
            Event::Comment(comment) => {
                // Comments outside the root element are dropped with the prolog
                let text = std::str::from_utf8(&comment)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Comment(text.to_string()));
                }
            }
            Event::DocType(doctype) => entities.declare(std::str::from_utf8(&doctype)?),
            Event::Decl(_) | Event::PI(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(SvgError::Unclosed(open.name.clone()));
    }

    root.map(Document::new).ok_or(SvgError::Empty)
}

fn open_element(start: &BytesStart<'_>, entities: &Entities) -> Result<Element, SvgError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut elem = Element::new(name);

    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let raw = std::str::from_utf8(&attr.value)?;
        elem.attrs.set(key, entities.unescape(raw)?.into_owned());
    }

    Ok(elem)
}

/// Append a finished element to its parent, or make it the root.
fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    elem: Element,
) -> Result<(), SvgError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(elem)),
        None if root.is_some() => return Err(SvgError::MultipleRoots(elem.name)),
        None => *root = Some(elem),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: Cow<'_, str>) -> Result<(), SvgError> {
    let Some(parent) = stack.last_mut() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(SvgError::TextOutsideRoot);
    };

    let significant = TEXT_CONTENT_ELEMENTS.contains(&parent.name.as_str());
    if text.trim().is_empty() && !significant {
        return Ok(());
    }

    // Entity references split text into several events; merge them back
    if let Some(Node::Text(previous)) = parent.children.last_mut() {
        previous.push_str(&text);
    } else {
        parent.children.push(Node::Text(text.into_owned()));
    }
    Ok(())
}
