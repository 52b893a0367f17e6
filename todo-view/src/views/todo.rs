//! The todo item view
//!
//! One view per todo record. It renders the record through an injected
//! template, binds delegated listeners on its root element, and runs the
//! edit-mode state machine:
//!
//! ```text
//!            dblclick label
//!  Viewing ------------------> Editing
//!     ^                          |
//!     +---- blur / Enter --------+  (commit: title <- input value)
//!     +---- Escape --------------+  (cancel: input value <- title)
//! ```
//!
//! The edit state is a field of the view; the `editing` class on the row is
//! only its projection into the markup.

use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::models::{Todo, TodoId, TodoModel};
use serde_json::json;
use std::fmt;
use std::rc::Rc;
use todo_dom::core::{Event, EventKind, Key};
use todo_dom::{
    Binding, Dispatch, Document, EventListeners, InputId, InputState, NodeId, Selector, Template, TemplateError,
};

/// Whether the row shows the title or the edit input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing,
}

/// What a delegated listener asks the view to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoAction {
    Toggle,
    Remove,
    Edit,
    CommitEdit,
    CancelEdit,
}

/// View for a single todo item
pub struct TodoItemView<M = Todo> {
    model: M,
    template: Rc<dyn Template>,
    config: ViewConfig,
    element: Option<NodeId>,
    listeners: EventListeners<TodoAction>,
    state: EditState,
}

impl<M: TodoModel> TodoItemView<M> {
    /// Create a view for `model`. Nothing is attached to a document until
    /// the first [`render`](Self::render).
    pub fn new(model: M, template: Rc<dyn Template>) -> Self {
        Self::with_config(model, template, ViewConfig::default())
    }

    pub fn with_config(model: M, template: Rc<dyn Template>, config: ViewConfig) -> Self {
        Self {
            model,
            template,
            config,
            element: None,
            listeners: EventListeners::new(),
            state: EditState::Viewing,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == EditState::Editing
    }

    /// Root element, once rendered or assigned
    pub fn element(&self) -> Option<NodeId> {
        self.element
    }

    /// Render into an existing element instead of creating one
    pub fn set_element(&mut self, element: NodeId) {
        if let Some(old) = self.element.replace(element) {
            self.listeners.clear(old);
        }
    }

    /// Number of listeners currently bound
    pub fn listener_count(&self) -> usize {
        self.element.map(|root| self.listeners.len(root)).unwrap_or(0)
    }

    /// Render the todo and (re-)bind its event listeners.
    ///
    /// On the first call a detached `<div>` root is created; mounting it is
    /// up to the caller. If the template fails, or re-rendering in edit mode
    /// finds no row or edit input, no listeners are bound and the markup
    /// under the root is left as the template left it.
    pub fn render(&mut self, doc: &mut Document) -> Result<(), ViewError> {
        let root = match self.element {
            Some(root) => root,
            None => {
                let root = doc.create_element("div");
                self.element = Some(root);
                root
            }
        };
        self.listeners.clear(root);

        // A pending edit survives the markup being replaced
        let draft = match self.state {
            EditState::Editing => self
                .find_edit_input(doc, root)
                .and_then(|input| doc.input(input).cloned()),
            EditState::Viewing => None,
        };

        let record = self.model.snapshot();
        let data = json!({
            "id": record.id,
            "title": record.title,
            "completed": record.completed,
            "editing": self.is_editing(),
        });

        self.template
            .execute(doc, root, &data)
            .map_err(|source| self.render_failed(record.id, source))?;

        // Markup that cannot hold the edit state counts as a failed render
        if self.state == EditState::Editing {
            self.restore_edit(doc, root, draft)
                .map_err(|source| self.render_failed(record.id, source))?;
        }

        self.delegate_events(root)?;

        tracing::debug!(todo = record.id, state = ?self.state, "rendered");
        Ok(())
    }

    fn restore_edit(
        &self,
        doc: &mut Document,
        root: NodeId,
        draft: Option<InputState>,
    ) -> Result<(), TemplateError> {
        let missing = |selector: &str| TemplateError::Malformed {
            name: self.template.name().to_string(),
            reason: format!("no element matching `{selector}` to edit in"),
        };
        let row_selector = Selector::parse(&self.config.selectors.row)?;
        let row = doc
            .query_selector(root, &row_selector)
            .ok_or_else(|| missing(&self.config.selectors.row))?;
        let input = self
            .find_edit_input(doc, root)
            .ok_or_else(|| missing(&self.config.selectors.edit))?;

        doc.add_class(row, &self.config.classes.editing)?;
        if let Some(draft) = draft {
            *doc.input_mut(input)? = draft;
        }
        doc.focus(input.node())?;
        Ok(())
    }

    fn render_failed(&self, todo: TodoId, source: TemplateError) -> ViewError {
        tracing::warn!(todo, template = self.template.name(), error = %source, "render failed");
        ViewError::Render {
            todo,
            template: self.template.name().to_string(),
            source,
        }
    }

    /// Bind all listeners for a freshly rendered root
    fn delegate_events(&mut self, root: NodeId) -> Result<(), ViewError> {
        let s = &self.config.selectors;
        let bindings = [
            Binding::new(EventKind::Click, &s.toggle, TodoAction::Toggle)?,
            Binding::new(EventKind::Click, &s.destroy, TodoAction::Remove)?,
            Binding::new(EventKind::DoubleClick, &s.label, TodoAction::Edit)?,
            Binding::new(EventKind::Blur, &s.edit, TodoAction::CommitEdit)?.input(),
            Binding::new(EventKind::KeyPress, &s.edit, TodoAction::CommitEdit)?
                .input()
                .key(Key::Enter),
            Binding::new(EventKind::KeyDown, &s.edit, TodoAction::CancelEdit)?
                .input()
                .key(Key::Escape),
        ];
        for binding in bindings {
            self.listeners.add(root, binding);
        }
        Ok(())
    }

    /// Run every handler bound to `event`. Returns whether any ran.
    ///
    /// A [`ViewError::StructuralViolation`] means the rendered markup is
    /// broken; callers should treat it as a bug, not retry.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event) -> Result<bool, ViewError> {
        if self.element.is_none() {
            return Err(ViewError::NotRendered);
        }

        let hits = self.listeners.dispatch(doc, event);
        for Dispatch { action, target } in &hits {
            tracing::trace!(todo = self.model.id(), ?action, "handling {}", event.kind);
            match (action, target.as_input()) {
                (TodoAction::Toggle, _) => {
                    self.row(doc)?;
                    self.toggle();
                }
                (TodoAction::Remove, _) => {
                    self.row(doc)?;
                    self.remove();
                }
                (TodoAction::Edit, _) => self.edit(doc)?,
                (TodoAction::CommitEdit, Some(input)) => self.commit_input(doc, input)?,
                (TodoAction::CancelEdit, Some(input)) => self.cancel_input(doc, input)?,
                (TodoAction::CommitEdit | TodoAction::CancelEdit, None) => {
                    return Err(self.violation(&self.config.selectors.edit));
                }
            }
        }
        Ok(!hits.is_empty())
    }

    /// Toggle the completeness of the todo
    pub fn toggle(&self) {
        self.model.toggle_done();
    }

    /// Ask the owning list to drop the todo
    pub fn remove(&self) {
        self.model.remove();
    }

    /// Enter edit mode: mark the row, focus the input and put the cursor
    /// after the last character. Running it again while editing changes
    /// nothing.
    pub fn edit(&mut self, doc: &mut Document) -> Result<(), ViewError> {
        let row = self.row(doc)?;
        let input = self.edit_input(doc)?;

        self.transition(EditState::Editing);
        doc.add_class(row, &self.config.classes.editing)?;
        doc.focus(input.node())?;
        let state = doc.input_mut(input)?;
        let end = state.char_len();
        state.set_cursor(end);
        Ok(())
    }

    /// Commit the edit input's value as the new title
    pub fn commit_edit(&mut self, doc: &mut Document) -> Result<(), ViewError> {
        let input = self.edit_input(doc)?;
        self.commit_input(doc, input)
    }

    /// Throw the pending edit away and restore the committed title
    pub fn cancel_edit(&mut self, doc: &mut Document) -> Result<(), ViewError> {
        let input = self.edit_input(doc)?;
        self.cancel_input(doc, input)
    }

    fn commit_input(&mut self, doc: &mut Document, input: InputId) -> Result<(), ViewError> {
        // Blur after Enter or after a cancel lands here while viewing
        if self.state != EditState::Editing {
            return Ok(());
        }
        let row = self.row(doc)?;
        let value = doc
            .input(input)
            .map(|state| state.value().to_string())
            .ok_or_else(|| self.violation(&self.config.selectors.edit))?;

        if self.config.behavior.commit_exits_editing {
            self.transition(EditState::Viewing);
            doc.remove_class(row, &self.config.classes.editing)?;
            doc.blur(input.node());
        }
        self.model.set_title(&value);
        Ok(())
    }

    fn cancel_input(&mut self, doc: &mut Document, input: InputId) -> Result<(), ViewError> {
        let row = self.row(doc)?;

        self.transition(EditState::Viewing);
        doc.remove_class(row, &self.config.classes.editing)?;
        doc.input_mut(input)?.set_value(self.model.title());
        doc.blur(input.node());
        Ok(())
    }

    /// Remove the root element from the document and drop all listeners
    pub fn dispose(mut self, doc: &mut Document) -> Result<(), ViewError> {
        if let Some(root) = self.element.take() {
            self.listeners.clear(root);
            if doc.is_alive(root) {
                doc.remove(root)?;
            }
        }
        Ok(())
    }

    fn transition(&mut self, next: EditState) {
        if self.state != next {
            tracing::debug!(todo = self.model.id(), from = ?self.state, to = ?next, "edit state");
            self.state = next;
        }
    }

    fn root(&self) -> Result<NodeId, ViewError> {
        self.element.ok_or(ViewError::NotRendered)
    }

    fn row(&self, doc: &Document) -> Result<NodeId, ViewError> {
        let root = self.root()?;
        let selector = Selector::parse(&self.config.selectors.row)?;
        doc.query_selector(root, &selector)
            .ok_or_else(|| self.violation(&self.config.selectors.row))
    }

    fn edit_input(&self, doc: &Document) -> Result<InputId, ViewError> {
        let root = self.root()?;
        self.find_edit_input(doc, root)
            .ok_or_else(|| self.violation(&self.config.selectors.edit))
    }

    fn find_edit_input(&self, doc: &Document, root: NodeId) -> Option<InputId> {
        let selector = Selector::parse(&self.config.selectors.edit).ok()?;
        doc.query_input(root, &selector)
    }

    fn violation(&self, selector: &str) -> ViewError {
        tracing::error!(todo = self.model.id(), selector, "rendered todo is missing an element");
        ViewError::StructuralViolation {
            selector: selector.to_string(),
        }
    }
}

impl<M: TodoModel> fmt::Debug for TodoItemView<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoItemView")
            .field("todo", &self.model.id())
            .field("template", &self.template.name())
            .field("element", &self.element)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoList;
    use crate::template::TodoTemplate;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::cell::Cell;
    use todo_dom::template::str_field;
    use todo_dom::FnTemplate;

    struct Harness {
        doc: Document,
        list: TodoList,
        todo: Todo,
        view: TodoItemView,
    }

    impl Harness {
        fn new(title: &str, completed: bool) -> Self {
            Self::with_config(title, completed, ViewConfig::default())
        }

        fn with_config(title: &str, completed: bool, config: ViewConfig) -> Self {
            let list = TodoList::new();
            let todo = list.add(title);
            if completed {
                todo.toggle_done();
            }
            let template = Rc::new(TodoTemplate::new(&config));
            let mut view = TodoItemView::with_config(todo.clone(), template, config);
            let mut doc = Document::new();
            view.render(&mut doc).unwrap();
            Self { doc, list, todo, view }
        }

        fn find(&self, selector: &str) -> NodeId {
            let root = self.view.element().unwrap();
            self.doc
                .query_selector(root, &Selector::parse(selector).unwrap())
                .unwrap()
        }

        fn edit_input(&self) -> InputId {
            self.doc.as_input(self.find(".edit")).unwrap()
        }

        fn input_value(&self) -> String {
            self.doc.input(self.edit_input()).unwrap().value().to_string()
        }

        fn send(&mut self, event: Event) -> Result<bool, ViewError> {
            self.view.handle_event(&mut self.doc, &event)
        }

        fn double_click_label(&mut self) {
            let label = self.find("label");
            assert!(self.send(Event::double_click(label)).unwrap());
        }

        fn type_text(&mut self, text: &str) {
            let input = self.edit_input();
            self.doc.input_mut(input).unwrap().insert_text(text);
        }

        fn replace_text(&mut self, text: &str) {
            let input = self.edit_input();
            self.doc.input_mut(input).unwrap().set_value(text);
        }

        fn row_editing(&self) -> bool {
            self.doc.has_class(self.find("li"), "editing")
        }
    }

    #[test]
    fn test_render_reflects_record() {
        for (title, completed) in [("Buy milk", false), ("Walk the dog", true), ("", false)] {
            let h = Harness::new(title, completed);
            let toggle = h.doc.as_input(h.find(".toggle")).unwrap();

            assert_eq!(h.doc.input(toggle).unwrap().checked(), completed);
            assert_eq!(h.doc.text_content(h.find("label")), title);
            assert_eq!(h.doc.has_class(h.find("li"), "completed"), completed);
            assert_eq!(h.input_value(), title);
            assert_eq!(h.view.listener_count(), 6);
            assert_eq!(h.view.state(), EditState::Viewing);
        }
    }

    #[test]
    fn test_toggle_click() {
        let mut h = Harness::new("Buy milk", false);
        let toggle = h.find(".toggle");
        assert!(h.send(Event::click(toggle)).unwrap());
        assert!(h.todo.completed());

        h.view.render(&mut h.doc).unwrap();
        let toggle = h.doc.as_input(h.find(".toggle")).unwrap();
        assert!(h.doc.input(toggle).unwrap().checked());
    }

    #[test]
    fn test_destroy_requests_removal_once() {
        let mut h = Harness::new("Buy milk", false);
        let removals = Rc::new(Cell::new(0));
        let seen = Rc::clone(&removals);
        h.list.subscribe(move || seen.set(seen.get() + 1));

        let destroy = h.find(".destroy");
        assert!(h.send(Event::click(destroy)).unwrap());

        assert_eq!(removals.get(), 1);
        assert!(h.list.is_empty());
    }

    #[test]
    fn test_buy_milk_commit_scenario() {
        let mut h = Harness::new("Buy milk", false);
        let toggle = h.doc.as_input(h.find(".toggle")).unwrap();
        assert!(!h.doc.input(toggle).unwrap().checked());
        assert_eq!(h.doc.text_content(h.find("label")), "Buy milk");

        h.double_click_label();
        let edit = h.edit_input();
        assert!(h.row_editing());
        assert!(h.view.is_editing());
        assert!(h.doc.has_focus(edit.node()));
        assert_eq!(h.input_value(), "Buy milk");
        assert_eq!(h.doc.input(edit).unwrap().cursor(), Some(8));

        h.type_text(" now");
        assert!(h.send(Event::key_press(edit.node(), Key::Enter)).unwrap());

        assert_eq!(h.todo.title(), "Buy milk now");
        assert_eq!(h.view.state(), EditState::Viewing);
        assert!(!h.row_editing());
        assert!(!h.doc.has_focus(edit.node()));
    }

    #[test]
    fn test_buy_milk_cancel_scenario() {
        let mut h = Harness::new("Buy milk", false);
        h.double_click_label();
        h.replace_text("X");

        let edit = h.edit_input();
        assert!(h.send(Event::key_down(edit.node(), Key::Escape)).unwrap());

        assert_eq!(h.todo.title(), "Buy milk");
        assert!(!h.row_editing());
        assert_eq!(h.input_value(), "Buy milk");
        assert!(!h.doc.has_focus(edit.node()));
        assert_eq!(h.view.state(), EditState::Viewing);

        // The blur that follows a cancel must not commit anything
        h.replace_text("stale");
        assert!(h.send(Event::blur(edit.node())).unwrap());
        assert_eq!(h.todo.title(), "Buy milk");
    }

    #[test]
    fn test_blur_commits_like_enter() {
        let mut h = Harness::new("Buy milk", false);
        h.double_click_label();
        h.replace_text("   ");

        let edit = h.edit_input();
        assert!(h.send(Event::blur(edit.node())).unwrap());

        assert_eq!(h.todo.title(), "   ");
        assert!(!h.row_editing());
    }

    #[test]
    fn test_empty_title_is_committed_verbatim() {
        let mut h = Harness::new("Buy milk", false);
        h.double_click_label();
        h.replace_text("");

        let edit = h.edit_input();
        h.send(Event::key_press(edit.node(), Key::Enter)).unwrap();
        assert_eq!(h.todo.title(), "");
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut h = Harness::new("Buy milk", false);
        h.double_click_label();
        h.type_text("!");
        let edit = h.edit_input().node();

        assert!(!h.send(Event::key_press(edit, Key::Char('a'))).unwrap());
        assert!(!h.send(Event::key_press(edit, Key::Escape)).unwrap());
        assert!(!h.send(Event::key_down(edit, Key::Enter)).unwrap());
        assert!(!h.send(Event::key_down(edit, Key::Tab)).unwrap());

        assert_eq!(h.todo.title(), "Buy milk");
        assert!(h.view.is_editing());
        assert_eq!(h.input_value(), "Buy milk!");
    }

    #[test]
    fn test_double_click_while_editing() {
        let mut h = Harness::new("Buy milk", false);
        h.double_click_label();
        let edit = h.edit_input();
        h.doc.input_mut(edit).unwrap().set_cursor(2);

        h.double_click_label();
        assert!(h.view.is_editing());
        assert!(h.row_editing());
        assert_eq!(h.doc.input(edit).unwrap().cursor(), Some(8));
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mut h = Harness::new("Buy milk", false);
        h.double_click_label();
        h.view.commit_edit(&mut h.doc).unwrap();
        h.view.commit_edit(&mut h.doc).unwrap();
        assert_eq!(h.todo.title(), "Buy milk");
    }

    #[test]
    fn test_commit_can_keep_edit_mode() {
        let mut config = ViewConfig::default();
        config.behavior.commit_exits_editing = false;
        let mut h = Harness::with_config("Buy milk", false, config);
        h.double_click_label();
        h.type_text(" now");

        let edit = h.edit_input().node();
        h.send(Event::key_press(edit, Key::Enter)).unwrap();
        h.send(Event::key_press(edit, Key::Enter)).unwrap();

        assert_eq!(h.todo.title(), "Buy milk now");
        assert!(h.view.is_editing());
        assert!(h.row_editing());
    }

    #[test]
    fn test_rerender_does_not_duplicate_listeners() {
        let mut h = Harness::new("Buy milk", false);
        h.view.render(&mut h.doc).unwrap();
        h.view.render(&mut h.doc).unwrap();
        assert_eq!(h.view.listener_count(), 6);

        let toggle = h.find(".toggle");
        h.send(Event::click(toggle)).unwrap();
        assert!(h.todo.completed());
    }

    #[test]
    fn test_rerender_keeps_pending_edit() {
        let mut h = Harness::new("Buy milk", false);
        h.double_click_label();
        h.type_text(" later");

        h.view.render(&mut h.doc).unwrap();

        let edit = h.edit_input();
        assert!(h.row_editing());
        assert!(h.doc.has_focus(edit.node()));
        assert_eq!(h.input_value(), "Buy milk later");
        assert_eq!(h.doc.input(edit).unwrap().cursor(), Some(14));
        assert_eq!(h.todo.title(), "Buy milk");
    }

    #[test]
    fn test_stale_nodes_from_before_render_do_nothing() {
        let mut h = Harness::new("Buy milk", false);
        let old_toggle = h.find(".toggle");
        h.view.render(&mut h.doc).unwrap();

        assert!(!h.send(Event::click(old_toggle)).unwrap());
        assert!(!h.todo.completed());
    }

    #[test]
    fn test_render_failure_binds_nothing() {
        let todo = Todo::new("Buy milk");
        let broken = FnTemplate::new("broken", |_: &mut Document, _: NodeId, _: &Value| {
            Err(TemplateError::Malformed {
                name: "broken".into(),
                reason: "unclosed tag".into(),
            })
        });
        let mut view = TodoItemView::new(todo, Rc::new(broken));
        let mut doc = Document::new();

        let err = view.render(&mut doc).unwrap_err();
        assert!(matches!(err, ViewError::Render { ref template, .. } if template == "broken"));
        assert_eq!(view.listener_count(), 0);
        assert!(view.element().is_some());
    }

    #[test]
    fn test_failed_rerender_drops_old_listeners() {
        let strict = FnTemplate::new("strict", |_: &mut Document, _: NodeId, data: &Value| {
            match str_field(data, "title")? {
                "" => Err(TemplateError::Malformed {
                    name: "strict".into(),
                    reason: "empty title".into(),
                }),
                _ => Ok(()),
            }
        });
        let todo = Todo::new("Buy milk");
        let mut view = TodoItemView::new(todo.clone(), Rc::new(strict));
        let mut doc = Document::new();

        view.render(&mut doc).unwrap();
        assert_eq!(view.listener_count(), 6);

        todo.set_title("");
        assert!(view.render(&mut doc).is_err());
        assert_eq!(view.listener_count(), 0);
    }

    #[test]
    fn test_rerender_while_editing_without_row_binds_nothing() {
        let rowless = Rc::new(Cell::new(false));
        let flag = Rc::clone(&rowless);
        let template = FnTemplate::new("flaky", move |doc: &mut Document, root: NodeId, data: &Value| {
            if flag.get() {
                doc.clear_children(root)?;
                let label = doc.create_element("label");
                doc.set_text(label, str_field(data, "title")?)?;
                doc.append_child(root, label)?;
                Ok(())
            } else {
                TodoTemplate::default().execute(doc, root, data)
            }
        });
        let todo = Todo::new("Buy milk");
        let mut view = TodoItemView::new(todo, Rc::new(template));
        let mut doc = Document::new();
        view.render(&mut doc).unwrap();

        let root = view.element().unwrap();
        let label = doc.query_selector(root, &Selector::parse("label").unwrap()).unwrap();
        assert!(view.handle_event(&mut doc, &Event::double_click(label)).unwrap());
        assert!(view.is_editing());

        rowless.set(true);
        let err = view.render(&mut doc).unwrap_err();
        assert!(matches!(
            err,
            ViewError::Render {
                source: TemplateError::Malformed { .. },
                ..
            }
        ));
        assert_eq!(view.listener_count(), 0);
        assert_eq!(view.state(), EditState::Editing);
    }

    #[test]
    fn test_missing_edit_input_is_a_structural_violation() {
        let template = FnTemplate::new("no-edit", |doc: &mut Document, root: NodeId, data: &Value| {
            doc.clear_children(root)?;
            let li = doc.create_element("li");
            let label = doc.create_element("label");
            doc.set_text(label, str_field(data, "title")?)?;
            doc.append_child(root, li)?;
            doc.append_child(li, label)?;
            Ok(())
        });
        let mut view = TodoItemView::new(Todo::new("Buy milk"), Rc::new(template));
        let mut doc = Document::new();
        view.render(&mut doc).unwrap();

        let root = view.element().unwrap();
        let label = doc.query_selector(root, &Selector::parse("label").unwrap()).unwrap();
        let err = view.handle_event(&mut doc, &Event::double_click(label)).unwrap_err();

        assert!(matches!(err, ViewError::StructuralViolation { ref selector } if selector == ".edit"));
        assert_eq!(view.state(), EditState::Viewing);
    }

    #[test]
    fn test_missing_row_is_a_structural_violation() {
        let mut h = Harness::new("Buy milk", false);
        let row = h.find("li");
        let root = h.view.element().unwrap();
        // Re-parent the row's children onto the root and drop the row
        let view_div = h.find("div.view");
        h.doc.append_child(root, view_div).unwrap();
        h.doc.remove(row).unwrap();

        let toggle = h.find(".toggle");
        let err = h.send(Event::click(toggle)).unwrap_err();
        assert!(matches!(err, ViewError::StructuralViolation { ref selector } if selector == "li"));
        assert!(!h.todo.completed());
    }

    #[test]
    fn test_handle_before_render() {
        let mut view = TodoItemView::new(Todo::new("a"), Rc::new(TodoTemplate::default()));
        let mut doc = Document::new();
        let node = doc.create_element("label");
        assert!(matches!(
            view.handle_event(&mut doc, &Event::double_click(node)),
            Err(ViewError::NotRendered)
        ));
    }

    #[test]
    fn test_views_only_react_to_their_own_row() {
        let list = TodoList::new();
        let template: Rc<dyn Template> = Rc::new(TodoTemplate::default());
        let mut doc = Document::new();
        let ul = doc.create_element("ul");

        let mut views: Vec<TodoItemView> = ["one", "two"]
            .into_iter()
            .map(|title| TodoItemView::new(list.add(title), Rc::clone(&template)))
            .collect();
        for view in &mut views {
            view.render(&mut doc).unwrap();
            doc.append_child(ul, view.element().unwrap()).unwrap();
        }

        let second_root = views[1].element().unwrap();
        let toggle = doc.query_selector(second_root, &Selector::parse(".toggle").unwrap()).unwrap();
        let mut handled = 0;
        for view in &mut views {
            if view.handle_event(&mut doc, &Event::click(toggle)).unwrap() {
                handled += 1;
            }
        }

        assert_eq!(handled, 1);
        assert_eq!(
            list.records().iter().map(|r| r.completed).collect::<Vec<_>>(),
            vec![false, true]
        );
    }

    #[test]
    fn test_dispose_removes_root() {
        let mut h = Harness::new("Buy milk", false);
        let root = h.view.element().unwrap();
        let view = std::mem::replace(
            &mut h.view,
            TodoItemView::new(h.todo.clone(), Rc::new(TodoTemplate::default())),
        );
        view.dispose(&mut h.doc).unwrap();
        assert!(!h.doc.is_alive(root));
        assert!(h.doc.is_empty());
    }
}
