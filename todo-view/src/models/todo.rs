//! Todo records and the list that owns them

use serde::{Deserialize, Serialize};
use todo_dom::core::{State, Subscription, WeakState};

/// Unique identifier for todos
pub type TodoId = u64;

/// Helper to generate unique todo IDs
pub fn next_todo_id() -> TodoId {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Plain data of one todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

impl TodoRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: next_todo_id(),
            title: title.into(),
            completed: false,
        }
    }
}

/// What a todo view needs from its model.
///
/// Methods take `&self`: the view observes and mutates a record it does not
/// own, so implementations use shared handles.
pub trait TodoModel {
    fn id(&self) -> TodoId;

    /// Flip the completed flag
    fn toggle_done(&self);

    /// Ask the owning collection to drop this todo
    fn remove(&self);

    /// Store `title` exactly as given
    fn set_title(&self, title: &str);

    fn title(&self) -> String;

    fn completed(&self) -> bool;

    fn snapshot(&self) -> TodoRecord;
}

/// Shared handle to a todo record, optionally owned by a [`TodoList`]
#[derive(Clone)]
pub struct Todo {
    record: State<TodoRecord>,
    list: WeakState<Vec<Todo>>,
}

impl Todo {
    /// A todo that does not belong to any list
    pub fn new(title: impl Into<String>) -> Self {
        Self::from_record(TodoRecord::new(title))
    }

    pub fn from_record(record: TodoRecord) -> Self {
        Self {
            record: State::new(record),
            list: WeakState::default(),
        }
    }

    /// Run `callback` after every change to this todo
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.record.subscribe(callback)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.record.unsubscribe(subscription)
    }

    /// True if both handles refer to the same record
    pub fn same_as(&self, other: &Todo) -> bool {
        self.record.ptr_eq(&other.record)
    }
}

impl TodoModel for Todo {
    fn id(&self) -> TodoId {
        self.record.with(|r| r.id)
    }

    fn toggle_done(&self) {
        self.record.update(|r| r.completed = !r.completed);
    }

    fn remove(&self) {
        let Some(list) = self.list.upgrade() else {
            tracing::debug!(todo = self.id(), "remove on a todo without a list");
            return;
        };
        let present = list.with(|todos| todos.iter().any(|t| t.same_as(self)));
        if present {
            list.update(|todos| todos.retain(|t| !t.same_as(self)));
            tracing::debug!(todo = self.id(), "todo removed");
        }
    }

    fn set_title(&self, title: &str) {
        self.record.update(|r| r.title = title.to_string());
    }

    fn title(&self) -> String {
        self.record.with(|r| r.title.clone())
    }

    fn completed(&self) -> bool {
        self.record.with(|r| r.completed)
    }

    fn snapshot(&self) -> TodoRecord {
        self.record.get()
    }
}

impl std::fmt::Debug for Todo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.record.with(|r| f.debug_tuple("Todo").field(r).finish())
    }
}

/// Ordered collection owning its todos
#[derive(Debug, Clone)]
pub struct TodoList {
    todos: State<Vec<Todo>>,
}

impl TodoList {
    pub fn new() -> Self {
        Self {
            todos: State::new(Vec::new()),
        }
    }

    /// Append a new todo and return a handle to it
    pub fn add(&self, title: impl Into<String>) -> Todo {
        self.insert(TodoRecord::new(title))
    }

    pub fn insert(&self, record: TodoRecord) -> Todo {
        let todo = Todo {
            record: State::new(record),
            list: self.todos.downgrade(),
        };
        self.todos.update(|todos| todos.push(todo.clone()));
        todo
    }

    pub fn get(&self, id: TodoId) -> Option<Todo> {
        self.todos.with(|todos| todos.iter().find(|t| t.id() == id).cloned())
    }

    /// Drop the todo with this id; false if there was none
    pub fn remove(&self, id: TodoId) -> bool {
        match self.get(id) {
            Some(todo) => {
                todo.remove();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.todos.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.todos.get()
    }

    pub fn records(&self) -> Vec<TodoRecord> {
        self.todos.with(|todos| todos.iter().map(TodoModel::snapshot).collect())
    }

    /// Run `callback` whenever todos are added or removed
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.todos.subscribe(callback)
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}
