//! Group and container simplification.

use crate::svg::{Document, Element, Node, Pass};

/// Containers that render nothing once they have no children.
const CONTAINERS: &[&str] = &["defs", "g", "marker", "switch", "symbol"];

/// Replaces attribute-less `<g>` elements with their children.
pub struct CollapseGroups;

impl Pass for CollapseGroups {
    fn name(&self) -> &'static str {
        "collapseGroups"
    }

    fn apply(&self, doc: &mut Document) {
        collapse(&mut doc.root);
    }
}

fn collapse(elem: &mut Element) {
    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        collapse(child);
    }

    if !elem
        .child_elements()
        .any(|c| c.is_tag("g") && c.attrs.is_empty())
    {
        return;
    }

    let children = std::mem::take(&mut elem.children);
    for node in children {
        match node {
            Node::Element(group) if group.is_tag("g") && group.attrs.is_empty() => {
                elem.children.extend(group.children);
            }
            other => elem.children.push(other),
        }
    }
}

/// Removes empty containers below the root. A `<g>` carrying a `filter`
/// still renders and is kept.
pub struct RemoveEmptyContainers;

impl Pass for RemoveEmptyContainers {
    fn name(&self) -> &'static str {
        "removeEmptyContainers"
    }

    fn apply(&self, doc: &mut Document) {
        prune(&mut doc.root);
    }
}

fn prune(elem: &mut Element) {
    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        prune(child);
    }
    elem.children.retain(|node| match node {
        Node::Element(child) => !is_empty_container(child),
        _ => true,
    });
}

fn is_empty_container(elem: &Element) -> bool {
    CONTAINERS.contains(&elem.name.as_str())
        && elem.children.is_empty()
        && !(elem.is_tag("g") && elem.attrs.contains("filter"))
}
