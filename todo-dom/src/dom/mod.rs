//! In-memory document
//!
//! A small element tree standing in for the browser DOM: elements with
//! classes, attributes and text, live input state, and a single focus.
//! Node ids are generational, so an id kept across a re-render of its
//! subtree goes stale instead of silently pointing at a new element.

mod html;
mod input;

pub use input::*;

use crate::error::DomError;
use crate::selector::Selector;
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of an element in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    input: Option<InputState>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// Element tree with focus tracking
#[derive(Debug, Clone, Default)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    focused: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element. `<input>` elements get live input state.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let tag = tag.to_ascii_lowercase();
        let element = Element {
            input: (tag == "input").then(InputState::default),
            tag,
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        };

        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.element = Some(element);
                NodeId { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, element: Some(element) });
                NodeId { index, generation: 0 }
            }
        }
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.element.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_mut())
            .ok_or(DomError::StaleNode(id))
    }

    // ------------------------------------------------------------------
    // Tree structure
    // ------------------------------------------------------------------

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.element(id).and_then(|el| el.parent)
    }

    /// Children in document order; empty for stale ids
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.element(id).map(|el| el.children.as_slice()).unwrap_or(&[])
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.element_mut(child)?;
        self.element_mut(parent)?;
        if self.contains(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }

        self.detach(child);
        self.element_mut(parent)?.children.push(child);
        self.element_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// True if `node` is `ancestor` or one of its descendants
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Remove an element and everything under it
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        self.element_mut(id)?;
        self.detach(id);
        self.free_subtree(id);
        Ok(())
    }

    /// Remove every descendant of an element, keeping the element itself
    pub fn clear_children(&mut self, id: NodeId) -> Result<(), DomError> {
        let children = std::mem::take(&mut self.element_mut(id)?.children);
        for child in children {
            self.free_subtree(child);
        }
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Ok(el) = self.element_mut(parent) {
            el.children.retain(|child| *child != id);
        }
        if let Ok(el) = self.element_mut(id) {
            el.parent = None;
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.index as usize)
                .filter(|slot| slot.generation == current.generation)
            else {
                continue;
            };
            if let Some(element) = slot.element.take() {
                pending.extend(element.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
            }
            if self.focused == Some(current) {
                self.focused = None;
            }
        }
    }

    // ------------------------------------------------------------------
    // Classes, attributes, text
    // ------------------------------------------------------------------

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        if !el.classes.iter().any(|c| c == class) {
            el.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        self.element_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        self.element(id).map(|el| el.classes.as_slice()).unwrap_or(&[])
    }

    /// Set an attribute. `id` and `class` update the element's identity and
    /// class list; `value` and `checked` update input state on inputs.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        match (name, el.input.as_mut()) {
            ("id", _) => el.id = Some(value.to_string()),
            ("class", _) => {
                el.classes = value.split_whitespace().map(str::to_string).collect();
            }
            ("value", Some(input)) => input.set_value(value),
            ("checked", Some(input)) => input.set_checked(value != "false"),
            _ => {
                el.attributes.insert(name.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        let el = self.element(id)?;
        match (name, el.input.as_ref()) {
            ("id", _) => el.id.clone(),
            ("class", _) => (!el.classes.is_empty()).then(|| el.classes.join(" ")),
            ("value", Some(input)) => Some(input.value().to_string()),
            ("checked", Some(input)) => input.checked().then(String::new),
            _ => el.attributes.get(name).cloned(),
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        self.element_mut(id)?.text = text.into();
        Ok(())
    }

    /// The element's own text followed by its descendants' text
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(el) = self.element(id) {
            out.push_str(&el.text);
            for child in &el.children {
                self.collect_text(*child, out);
            }
        }
    }

    // ------------------------------------------------------------------
    // Inputs and focus
    // ------------------------------------------------------------------

    /// Typed handle for an element, if it is an input
    pub fn as_input(&self, id: NodeId) -> Option<InputId> {
        self.element(id)
            .filter(|el| el.input.is_some())
            .map(|_| InputId::new(id))
    }

    pub fn input(&self, id: InputId) -> Option<&InputState> {
        self.element(id.node()).and_then(|el| el.input.as_ref())
    }

    pub fn input_mut(&mut self, id: InputId) -> Result<&mut InputState, DomError> {
        self.element_mut(id.node())?
            .input
            .as_mut()
            .ok_or(DomError::NotAnInput(id.node()))
    }

    pub fn focus(&mut self, id: NodeId) -> Result<(), DomError> {
        self.element_mut(id)?;
        self.focused = Some(id);
        Ok(())
    }

    /// Drop focus if `id` holds it
    pub fn blur(&mut self, id: NodeId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|id| self.is_alive(*id))
    }

    pub fn has_focus(&self, id: NodeId) -> bool {
        self.focused() == Some(id)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.element(id)
            .is_some_and(|el| selector.matches_parts(&el.tag, el.id.as_deref(), &el.classes))
    }

    /// First descendant of `scope` (in document order) matching `selector`.
    /// `scope` itself is never a candidate.
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope).find(|id| self.matches(*id, selector))
    }

    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope).filter(|id| self.matches(*id, selector)).collect()
    }

    /// First input under `scope` matching `selector`
    pub fn query_input(&self, scope: NodeId, selector: &Selector) -> Option<InputId> {
        self.descendants(scope)
            .filter(|id| self.matches(*id, selector))
            .find_map(|id| self.as_input(id))
    }

    /// Descendants of `scope` in document (pre-)order
    pub fn descendants(&self, scope: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children(next).iter().rev().copied());
            Some(next)
        })
    }

    /// Serialize an element and its subtree
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        html::write_element(self, id, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    fn sample() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        let ul = doc.create_element("ul");
        let first = doc.create_element("li");
        let second = doc.create_element("li");
        doc.add_class(second, "done").unwrap();
        let label = doc.create_element("label");
        doc.set_text(label, "hello").unwrap();
        doc.append_child(root, ul).unwrap();
        doc.append_child(ul, first).unwrap();
        doc.append_child(ul, second).unwrap();
        doc.append_child(first, label).unwrap();
        (doc, root)
    }

    #[test]
    fn test_query_selector_document_order() {
        let (doc, root) = sample();
        let first = doc.query_selector(root, &sel("li")).unwrap();
        assert!(!doc.has_class(first, "done"));
        assert_eq!(doc.query_selector_all(root, &sel("li")).len(), 2);
        assert!(doc.query_selector(root, &sel("li.done")).is_some());
        assert_eq!(doc.query_selector(root, &sel("div")), None);
        assert_eq!(doc.text_content(root), "hello");
    }

    #[test]
    fn test_clear_children_makes_ids_stale() {
        let (mut doc, root) = sample();
        let label = doc.query_selector(root, &sel("label")).unwrap();
        doc.focus(label).unwrap();
        doc.clear_children(root).unwrap();

        assert!(doc.is_alive(root));
        assert!(!doc.is_alive(label));
        assert_eq!(doc.focused(), None);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.set_text(label, "x"), Err(DomError::StaleNode(label)));

        // Reused slots get a new generation
        let fresh = doc.create_element("span");
        assert_ne!(fresh, label);
        assert!(!doc.is_alive(label));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let (mut doc, root) = sample();
        let ul = doc.query_selector(root, &sel("ul")).unwrap();
        assert_eq!(
            doc.append_child(ul, root),
            Err(DomError::Cycle { parent: ul, child: root })
        );
        assert_eq!(
            doc.append_child(root, root),
            Err(DomError::Cycle { parent: root, child: root })
        );
    }

    #[test]
    fn test_append_moves_existing_child() {
        let (mut doc, root) = sample();
        let label = doc.query_selector(root, &sel("label")).unwrap();
        let ul = doc.query_selector(root, &sel("ul")).unwrap();
        doc.append_child(root, label).unwrap();
        assert_eq!(doc.parent(label), Some(root));
        assert_eq!(doc.children(root), &[ul, label]);
    }

    #[test]
    fn test_input_attributes() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.set_attribute(input, "class", "toggle  big").unwrap();
        doc.set_attribute(input, "type", "checkbox").unwrap();
        doc.set_attribute(input, "checked", "").unwrap();
        doc.set_attribute(input, "value", "Buy milk").unwrap();

        let typed = doc.as_input(input).unwrap();
        assert!(doc.input(typed).unwrap().checked());
        assert_eq!(doc.input(typed).unwrap().value(), "Buy milk");
        assert_eq!(doc.attribute(input, "class").as_deref(), Some("toggle big"));
        assert_eq!(doc.attribute(input, "type").as_deref(), Some("checkbox"));

        let label = doc.create_element("label");
        assert_eq!(doc.as_input(label), None);
        assert_eq!(doc.input_mut(InputId::new(label)).err(), Some(DomError::NotAnInput(label)));

        doc.remove(input).unwrap();
        assert_eq!(doc.input_mut(typed).err(), Some(DomError::StaleNode(input)));
    }

    #[test]
    fn test_focus_and_blur() {
        let mut doc = Document::new();
        let a = doc.create_element("input");
        let b = doc.create_element("input");
        doc.focus(a).unwrap();
        doc.blur(b);
        assert!(doc.has_focus(a));
        doc.focus(b).unwrap();
        assert!(!doc.has_focus(a));
        doc.blur(b);
        assert_eq!(doc.focused(), None);
    }
}
