//! Template contract
//!
//! A template (re)writes the subtree under a root element from a JSON data
//! snapshot. Templates are plain values handed to whoever renders with them;
//! there is no global registry.

use crate::dom::{Document, NodeId};
use crate::error::TemplateError;
use serde_json::Value;
use std::rc::Rc;

pub trait Template {
    /// Name used in logs and errors
    fn name(&self) -> &str {
        "template"
    }

    /// Replace the markup under `root` with the rendering of `data`
    fn execute(&self, doc: &mut Document, root: NodeId, data: &Value) -> Result<(), TemplateError>;
}

impl<T: Template + ?Sized> Template for Rc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&self, doc: &mut Document, root: NodeId, data: &Value) -> Result<(), TemplateError> {
        (**self).execute(doc, root, data)
    }
}

impl<T: Template + ?Sized> Template for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&self, doc: &mut Document, root: NodeId, data: &Value) -> Result<(), TemplateError> {
        (**self).execute(doc, root, data)
    }
}

/// A template backed by a closure
pub struct FnTemplate<F> {
    name: String,
    render: F,
}

impl<F> FnTemplate<F>
where
    F: Fn(&mut Document, NodeId, &Value) -> Result<(), TemplateError>,
{
    pub fn new(name: impl Into<String>, render: F) -> Self {
        Self {
            name: name.into(),
            render,
        }
    }
}

impl<F> Template for FnTemplate<F>
where
    F: Fn(&mut Document, NodeId, &Value) -> Result<(), TemplateError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, doc: &mut Document, root: NodeId, data: &Value) -> Result<(), TemplateError> {
        (self.render)(doc, root, data)
    }
}

impl<F> std::fmt::Debug for FnTemplate<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTemplate").field("name", &self.name).finish()
    }
}

/// Read a required string field
pub fn str_field<'a>(data: &'a Value, field: &str) -> Result<&'a str, TemplateError> {
    data.get(field)
        .ok_or_else(|| TemplateError::MissingField(field.to_string()))?
        .as_str()
        .ok_or_else(|| TemplateError::FieldType {
            field: field.to_string(),
            expected: "a string",
        })
}

/// Read a required boolean field
pub fn bool_field(data: &Value, field: &str) -> Result<bool, TemplateError> {
    data.get(field)
        .ok_or_else(|| TemplateError::MissingField(field.to_string()))?
        .as_bool()
        .ok_or_else(|| TemplateError::FieldType {
            field: field.to_string(),
            expected: "a boolean",
        })
}

/// Read an optional boolean field; absent or `null` means `false`
pub fn opt_bool_field(data: &Value, field: &str) -> Result<bool, TemplateError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(_) => bool_field(data, field),
    }
}
