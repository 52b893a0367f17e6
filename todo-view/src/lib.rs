//! Todo View - the TodoMVC item row
//!
//! [`TodoItemView`] renders one [`Todo`] through a [`TodoTemplate`] into a
//! [`todo_dom::Document`] and turns clicks and key presses on the row into
//! model mutations and edit-mode transitions.
//!
//! ```no_run
//! use std::rc::Rc;
//! use todo_dom::prelude::*;
//! use todo_view::{TodoItemView, TodoList, TodoTemplate};
//!
//! # fn main() -> Result<(), todo_view::ViewError> {
//! let list = TodoList::new();
//! let mut doc = Document::new();
//! let mut view = TodoItemView::new(list.add("Buy milk"), Rc::new(TodoTemplate::default()));
//! view.render(&mut doc)?;
//!
//! let root = view.element().expect("rendered");
//! let label = doc.query_selector(root, &Selector::parse("label")?).expect("label");
//! view.handle_event(&mut doc, &Event::double_click(label))?;
//! assert!(view.is_editing());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod template;
pub mod views;

pub use config::ViewConfig;
pub use error::{ConfigError, ViewError};
pub use models::{Todo, TodoId, TodoList, TodoModel, TodoRecord};
pub use template::TodoTemplate;
pub use views::{EditState, TodoAction, TodoItemView};
