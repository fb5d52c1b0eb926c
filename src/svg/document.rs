//! Markup tree for a single SVG image.
//!
//! Attributes keep their source order so that output is deterministic,
//! but no pass relies on that order.

use super::SvgError;

// ============================================================================
// Node / Element
// ============================================================================

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Unescaped character data.
    Text(String),
    CData(String),
    Comment(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(elem) => Some(elem),
            _ => None,
        }
    }
}

/// An element with a qualified tag name, attributes and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Attributes::default(),
            children: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(name, value);
        self
    }

    #[cfg(test)]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    #[inline]
    pub fn is_tag(&self, name: &str) -> bool {
        self.name == name
    }

    /// Iterate over direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text and CDATA content of direct children.
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) | Node::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Visit this element and all descendant elements, parents first.
    pub fn walk(&self, f: &mut impl FnMut(&Element)) {
        f(self);
        for child in self.child_elements() {
            child.walk(f);
        }
    }

    /// Mutable pre-order traversal over this element and its descendants.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in self.children.iter_mut().filter_map(Node::as_element_mut) {
            child.walk_mut(f);
        }
    }

    /// Recursively drop child nodes for which `keep` returns false.
    ///
    /// Children are filtered before descending, so removed subtrees are
    /// never visited.
    pub fn retain_nodes(&mut self, keep: &mut impl FnMut(&Node) -> bool) {
        self.children.retain(|node| keep(node));
        for child in self.children.iter_mut().filter_map(Node::as_element_mut) {
            child.retain_nodes(keep);
        }
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// Ordered attribute list with map-like accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(key, _)| key == name)
    }

    /// Insert or overwrite. A new attribute is appended at the end.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.0.iter().position(|(key, _)| key == name)?;
        Some(self.0.remove(index).1)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.0.retain(|(key, value)| keep(key, value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Mutable access to values, names stay fixed.
    pub fn values_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> {
        self.0.iter_mut().map(|(key, value)| (key.as_str(), value))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::default();
        for (key, value) in iter {
            attrs.set(key, value);
        }
        attrs
    }
}

// ============================================================================
// Document
// ============================================================================

/// A parsed SVG image. The prolog is not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parse SVG markup into a tree.
    pub fn parse(content: &str) -> Result<Self, SvgError> {
        super::parse::parse(content)
    }

    /// Serialize back to compact markup.
    pub fn to_markup(&self) -> String {
        super::serialize::to_markup(&self.root)
    }

    pub fn walk(&self, f: &mut impl FnMut(&Element)) {
        self.root.walk(f);
    }

    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        self.root.walk_mut(f);
    }

    /// Recursively drop nodes below the root. The root itself always stays.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(&Node) -> bool) {
        self.root.retain_nodes(&mut keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("svg")
            .with_attr("viewBox", "0 0 10 10")
            .with_child(Node::Element(
                Element::new("g").with_child(Node::Element(Element::new("path"))),
            ))
            .with_child(Node::Comment("note".into()))
    }

    #[test]
    fn test_attributes_set_overwrites_in_place() {
        let mut attrs: Attributes = [("a", "1"), ("b", "2")].into_iter().collect();
        attrs.set("a", "3");
        attrs.set("c", "4");
        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2"), ("c", "4")]);
    }

    #[test]
    fn test_attributes_remove() {
        let mut attrs: Attributes = [("fill", "red")].into_iter().collect();
        assert_eq!(attrs.remove("fill").as_deref(), Some("red"));
        assert_eq!(attrs.remove("fill"), None);
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_walk_visits_parents_first() {
        let root = sample();
        let mut names = Vec::new();
        root.walk(&mut |elem| names.push(elem.name.clone()));
        assert_eq!(names, vec!["svg", "g", "path"]);
    }

    #[test]
    fn test_retain_nodes_skips_removed_subtrees() {
        let mut doc = Document::new(sample());
        let mut visited = Vec::new();
        doc.retain_nodes(|node| {
            if let Node::Element(elem) = node {
                visited.push(elem.name.clone());
                return !elem.is_tag("g");
            }
            true
        });
        assert_eq!(visited, vec!["g"]);
        assert_eq!(doc.root.children.len(), 1);
    }

    #[test]
    fn test_child_elements_skip_other_nodes() {
        let mut root = sample();
        assert_eq!(root.children[1].as_element(), None);
        assert_eq!(root.child_elements().count(), 1);

        if let Some(g) = root.children[0].as_element_mut() {
            g.attrs.set("fill", "none");
        }
        assert_eq!(root.child_elements().next().unwrap().attrs.get("fill"), Some("none"));
    }

    #[test]
    fn test_text_content() {
        let elem = Element::new("style")
            .with_child(Node::Text(".a{".into()))
            .with_child(Node::CData("fill:red}".into()));
        assert_eq!(elem.text_content(), ".a{fill:red}");
    }
}
