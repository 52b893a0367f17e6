//! Error types for the todo view

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;
use todo_dom::{DomError, TemplateError};

#[derive(Debug, Error, Diagnostic)]
pub enum ViewError {
    /// Template execution failed; no listeners were attached.
    #[error("rendering todo {todo} with template `{template}` failed")]
    #[diagnostic(code(todo_view::render))]
    Render {
        todo: u64,
        template: String,
        #[source]
        #[diagnostic_source]
        source: TemplateError,
    },

    /// The rendered markup lacks an element the view relies on. This is a
    /// bug in the template, not a user-facing condition.
    #[error("rendered todo row has no element matching `{selector}`")]
    #[diagnostic(
        code(todo_view::structural_violation),
        help("the template must produce a row, a toggle, a destroy button, a label and an edit input")
    )]
    StructuralViolation { selector: String },

    #[error("todo view has not been rendered yet")]
    #[diagnostic(code(todo_view::not_rendered))]
    NotRendered,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Dom(#[from] DomError),
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(code(todo_view::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration")]
    #[diagnostic(code(todo_view::config::parse))]
    Parse(#[from] toml::de::Error),

    #[error("`{key}` is not a usable selector")]
    #[diagnostic(code(todo_view::config::selector))]
    Selector {
        key: String,
        #[source]
        #[diagnostic_source]
        source: DomError,
    },

    #[error("`{key}` = {value:?} is not a single class name")]
    #[diagnostic(code(todo_view::config::class_name))]
    ClassName { key: String, value: String },
}
