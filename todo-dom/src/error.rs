//! Error types for the document, selectors and templates

use crate::dom::NodeId;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DomError {
    #[error("node {0} is no longer part of the document")]
    #[diagnostic(code(todo_dom::stale_node))]
    StaleNode(NodeId),

    #[error("invalid selector `{selector}`: {reason}")]
    #[diagnostic(
        code(todo_dom::invalid_selector),
        help("selectors are a tag name, `.class` parts and an optional `#id`, e.g. `li.completed`")
    )]
    InvalidSelector { selector: String, reason: String },

    #[error("node {0} is not an input element")]
    #[diagnostic(code(todo_dom::not_an_input))]
    NotAnInput(NodeId),

    #[error("cannot append {child} to {parent}: {parent} is inside {child}")]
    #[diagnostic(code(todo_dom::cycle))]
    Cycle { parent: NodeId, child: NodeId },
}

/// Failure while executing a template against a root element
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum TemplateError {
    #[error("template root is not usable")]
    #[diagnostic(code(todo_dom::template::root))]
    Root(#[source] DomError),

    #[error("template data is missing field `{0}`")]
    #[diagnostic(
        code(todo_dom::template::missing_field),
        help("the data passed to the template must be a JSON object carrying every field the template reads")
    )]
    MissingField(String),

    #[error("template field `{field}` should be {expected}")]
    #[diagnostic(code(todo_dom::template::field_type))]
    FieldType { field: String, expected: &'static str },

    #[error("template `{name}` is malformed: {reason}")]
    #[diagnostic(code(todo_dom::template::malformed))]
    Malformed { name: String, reason: String },
}

impl From<DomError> for TemplateError {
    fn from(err: DomError) -> Self {
        TemplateError::Root(err)
    }
}
