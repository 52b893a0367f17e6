//! Todo row example
//!
//! Renders one todo, edits it with the keyboard and prints the markup after
//! each step. Run with `RUST_LOG=todo_view=debug` to watch the transitions.

use std::rc::Rc;
use todo_dom::prelude::*;
use todo_view::{logging, TodoItemView, TodoList, TodoModel, TodoTemplate, ViewConfig, ViewError};

fn main() -> miette::Result<()> {
    logging::init();

    let config = ViewConfig::load(std::path::Path::new("."))?;
    let list = TodoList::new();
    let todo = list.add("Buy milk");

    let mut doc = Document::new();
    let ul = doc.create_element("ul");
    doc.add_class(ul, "todo-list").map_err(ViewError::from)?;

    let template = Rc::new(TodoTemplate::new(&config));
    let mut view = TodoItemView::with_config(todo.clone(), template, config);
    view.render(&mut doc)?;
    let root = view.element().ok_or(ViewError::NotRendered)?;
    doc.append_child(ul, root).map_err(ViewError::from)?;
    println!("rendered:  {}", doc.outer_html(ul));

    let find = |doc: &Document, selector: &str| -> Result<NodeId, ViewError> {
        let selector = Selector::parse(selector)?;
        doc.query_selector(root, &selector)
            .ok_or_else(|| ViewError::StructuralViolation { selector: selector.to_string() })
    };

    let label = find(&doc, "label")?;
    view.handle_event(&mut doc, &Event::double_click(label))?;
    println!("editing:   {}", doc.outer_html(ul));

    let edit = find(&doc, ".edit")?;
    if let Some(input) = doc.as_input(edit) {
        doc.input_mut(input).map_err(ViewError::from)?.insert_text(" now");
    }
    view.handle_event(&mut doc, &Event::key_press(edit, Key::Enter))?;
    view.render(&mut doc)?;
    println!("committed: {}", doc.outer_html(ul));

    let toggle = find(&doc, ".toggle")?;
    view.handle_event(&mut doc, &Event::click(toggle))?;
    view.render(&mut doc)?;
    println!("toggled:   {}", doc.outer_html(ul));

    println!("title = {:?}, completed = {}", todo.title(), todo.completed());
    Ok(())
}
