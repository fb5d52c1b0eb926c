//! Compact markup output.

use quick_xml::escape::{escape, partial_escape};

use super::{Element, Node};

/// Serialize an element tree without indentation or insignificant whitespace.
pub fn to_markup(root: &Element) -> String {
    let mut out = String::with_capacity(1024);
    write_element(&mut out, root);
    out
}

fn write_element(out: &mut String, elem: &Element) {
    out.push('<');
    out.push_str(&elem.name);
    for (name, value) in elem.attrs.iter() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }

    if elem.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &elem.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&elem.name);
    out.push('>');
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(elem) => write_element(out, elem),
        Node::Text(text) => out.push_str(&partial_escape(text)),
        Node::CData(text) => {
            out.push_str("<![CDATA[");
            out.push_str(text);
            out.push_str("]]>");
        }
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::Document;

    #[test]
    fn test_self_closing_when_empty() {
        let elem = Element::new("path").with_attr("d", "M0 0");
        assert_eq!(to_markup(&elem), r#"<path d="M0 0"/>"#);
    }

    #[test]
    fn test_escapes_attribute_values() {
        let elem = Element::new("g").with_attr("data-x", r#"a "b" & <c>"#);
        assert_eq!(
            to_markup(&elem),
            r#"<g data-x="a &quot;b&quot; &amp; &lt;c&gt;"/>"#
        );
    }

    #[test]
    fn test_reparse_is_stable() {
        let input = r#"<svg viewBox="0 0 24 24"><style><![CDATA[.a{fill:red}]]></style><!--x--><text>1 &lt; 2</text></svg>"#;
        let first = Document::parse(input).unwrap().to_markup();
        let second = Document::parse(&first).unwrap().to_markup();
        assert_eq!(first, input);
        assert_eq!(first, second);
    }
}
