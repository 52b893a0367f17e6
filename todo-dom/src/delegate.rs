//! Delegated event listeners
//!
//! Listeners are attached to a root element and filter events by a
//! descendant selector, the way `$(root).on("click", ".toggle", ...)` works
//! in a browser. A listener carries an action value instead of a closure;
//! dispatch returns the matched actions and the caller runs them with full
//! access to its own state and the document.

use crate::core::{Event, EventKind, Key};
use crate::dom::{Document, InputId, NodeId};
use crate::error::DomError;
use crate::selector::Selector;
use std::collections::BTreeMap;

/// The element a listener matched, typed by what the binding asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Element(NodeId),
    Input(InputId),
}

impl Target {
    pub fn node(&self) -> NodeId {
        match self {
            Target::Element(id) => *id,
            Target::Input(input) => input.node(),
        }
    }

    pub fn as_input(&self) -> Option<InputId> {
        match self {
            Target::Input(input) => Some(*input),
            Target::Element(_) => None,
        }
    }
}

/// One listener: event kind, selector, optional key filter and the action
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<A> {
    kind: EventKind,
    selector: Selector,
    key: Option<Key>,
    inputs_only: bool,
    action: A,
}

impl<A> Binding<A> {
    pub fn new(kind: EventKind, selector: &str, action: A) -> Result<Self, DomError> {
        Ok(Self {
            kind,
            selector: Selector::parse(selector)?,
            key: None,
            inputs_only: false,
            action,
        })
    }

    /// Only fire for this exact key
    pub fn key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    /// Only match input elements; the handler receives a [`Target::Input`]
    pub fn input(mut self) -> Self {
        self.inputs_only = true;
        self
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    fn accepts(&self, event: &Event) -> bool {
        if self.kind != event.kind {
            return false;
        }
        match self.key {
            Some(key) => event.key == Some(key),
            None => true,
        }
    }

    fn find_target(&self, doc: &Document, path: &[NodeId]) -> Option<Target> {
        path.iter()
            .copied()
            .filter(|id| doc.matches(*id, &self.selector))
            .find_map(|id| {
                if self.inputs_only {
                    doc.as_input(id).map(Target::Input)
                } else {
                    Some(Target::Element(id))
                }
            })
    }
}

/// A matched listener, ready to be handled
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch<A> {
    pub action: A,
    pub target: Target,
}

/// Delegated listeners grouped by root element
#[derive(Debug, Clone)]
pub struct EventListeners<A> {
    roots: BTreeMap<NodeId, Vec<Binding<A>>>,
}

impl<A> Default for EventListeners<A> {
    fn default() -> Self {
        Self {
            roots: BTreeMap::new(),
        }
    }
}

impl<A: Clone> EventListeners<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` for `kind` events on descendants of `root`
    /// matching `selector`.
    pub fn add_event_listener(
        &mut self,
        root: NodeId,
        kind: EventKind,
        selector: &str,
        action: A,
    ) -> Result<(), DomError> {
        self.add(root, Binding::new(kind, selector, action)?);
        Ok(())
    }

    pub fn add(&mut self, root: NodeId, binding: Binding<A>) {
        tracing::trace!(%root, kind = %binding.kind, selector = %binding.selector, "listener added");
        self.roots.entry(root).or_default().push(binding);
    }

    /// Drop every listener attached to `root`
    pub fn clear(&mut self, root: NodeId) {
        self.roots.remove(&root);
    }

    /// Forget listeners whose root element no longer exists
    pub fn prune(&mut self, doc: &Document) {
        self.roots.retain(|root, _| doc.is_alive(*root));
    }

    pub fn len(&self, root: NodeId) -> usize {
        self.roots.get(&root).map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.values().all(Vec::is_empty)
    }

    /// Find every listener that fires for `event`.
    ///
    /// The event bubbles from its target up to each root containing it; a
    /// listener matches the closest element on that path that satisfies its
    /// selector. Results keep registration order.
    pub fn dispatch(&self, doc: &Document, event: &Event) -> Vec<Dispatch<A>> {
        let mut matched = Vec::new();
        for (root, bindings) in &self.roots {
            if !doc.contains(*root, event.target) {
                continue;
            }
            let path = bubble_path(doc, event.target, *root);
            for binding in bindings.iter().filter(|b| b.accepts(event)) {
                if let Some(target) = binding.find_target(doc, &path) {
                    matched.push(Dispatch {
                        action: binding.action.clone(),
                        target,
                    });
                }
            }
        }
        tracing::trace!(kind = %event.kind, target = %event.target, matched = matched.len(), "dispatch");
        matched
    }
}

/// Nodes from `target` up to and including `root`
fn bubble_path(doc: &Document, target: NodeId, root: NodeId) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(target);
    while let Some(id) = current {
        path.push(id);
        if id == root {
            break;
        }
        current = doc.parent(id);
    }
    path
}
