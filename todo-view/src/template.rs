//! The todo row template
//!
//! Produces the fixed TodoMVC row shape under the view's root:
//!
//! ```text
//! <li class="[completed] [editing]" data-id="..">
//!   <div class="view">
//!     <input class="toggle" type="checkbox" [checked]>
//!     <label>title</label>
//!     <button class="destroy"></button>
//!   </div>
//!   <input class="edit" value="title">
//! </li>
//! ```
//!
//! Element tags and classes are derived from the configured selectors, so the
//! template and the view always agree on what they look for.

use crate::config::{ClassConfig, SelectorConfig, ViewConfig};
use serde_json::Value;
use todo_dom::template::{bool_field, opt_bool_field, str_field};
use todo_dom::{Document, NodeId, Selector, Template, TemplateError};

const NAME: &str = "todo";

#[derive(Debug, Clone)]
pub struct TodoTemplate {
    selectors: SelectorConfig,
    classes: ClassConfig,
}

/// Parsed selector plus the tag to create for it
struct Part {
    selector: Selector,
    tag: String,
}

impl TodoTemplate {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            selectors: config.selectors.clone(),
            classes: config.classes.clone(),
        }
    }

    fn part(
        &self,
        name: &str,
        source: &str,
        default_tag: &str,
        required_tag: Option<&str>,
    ) -> Result<Part, TemplateError> {
        let selector = Selector::parse(source).map_err(|err| malformed(format!("{name} selector: {err}")))?;
        let tag = selector.tag().unwrap_or(default_tag).to_string();
        if let Some(required) = required_tag {
            if tag != required {
                return Err(malformed(format!("{name} must be an <{required}>, not <{tag}>")));
            }
        }
        Ok(Part { selector, tag })
    }

    fn create(doc: &mut Document, part: &Part) -> Result<NodeId, TemplateError> {
        let id = doc.create_element(&part.tag);
        if let Some(dom_id) = part.selector.id() {
            doc.set_attribute(id, "id", dom_id)?;
        }
        for class in part.selector.classes() {
            doc.add_class(id, class)?;
        }
        Ok(id)
    }
}

impl Default for TodoTemplate {
    fn default() -> Self {
        Self::new(&ViewConfig::default())
    }
}

impl Template for TodoTemplate {
    fn name(&self) -> &str {
        NAME
    }

    fn execute(&self, doc: &mut Document, root: NodeId, data: &Value) -> Result<(), TemplateError> {
        // Validate everything before touching the document
        let title = str_field(data, "title")?;
        let completed = bool_field(data, "completed")?;
        let editing = opt_bool_field(data, "editing")?;
        let todo_id = data.get("id").and_then(Value::as_u64);

        let s = &self.selectors;
        let row = self.part("row", &s.row, "li", None)?;
        let toggle = self.part("toggle", &s.toggle, "input", Some("input"))?;
        let label = self.part("label", &s.label, "label", None)?;
        let destroy = self.part("destroy", &s.destroy, "button", None)?;
        let edit = self.part("edit", &s.edit, "input", Some("input"))?;

        doc.clear_children(root)?;

        let row = Self::create(doc, &row)?;
        if completed {
            doc.add_class(row, &self.classes.completed)?;
        }
        if editing {
            doc.add_class(row, &self.classes.editing)?;
        }
        if let Some(todo_id) = todo_id {
            doc.set_attribute(row, "data-id", &todo_id.to_string())?;
        }

        let view = doc.create_element("div");
        doc.add_class(view, "view")?;

        let toggle = Self::create(doc, &toggle)?;
        doc.set_attribute(toggle, "type", "checkbox")?;
        doc.set_attribute(toggle, "checked", if completed { "true" } else { "false" })?;

        let label = Self::create(doc, &label)?;
        doc.set_text(label, title)?;

        let destroy = Self::create(doc, &destroy)?;

        let edit = Self::create(doc, &edit)?;
        doc.set_attribute(edit, "value", title)?;

        doc.append_child(root, row)?;
        doc.append_child(row, view)?;
        doc.append_child(view, toggle)?;
        doc.append_child(view, label)?;
        doc.append_child(view, destroy)?;
        doc.append_child(row, edit)?;
        Ok(())
    }
}

fn malformed(reason: String) -> TemplateError {
    TemplateError::Malformed {
        name: NAME.to_string(),
        reason,
    }
}
