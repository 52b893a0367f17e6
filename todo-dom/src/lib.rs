//! Todo DOM - the toolkit layer under the TodoMVC views
//!
//! An in-memory document, compound selectors, delegated event listeners,
//! the template contract and a small reactive state cell.

pub mod core;
pub mod delegate;
pub mod dom;
pub mod error;
pub mod selector;
pub mod template;

pub use delegate::{Binding, Dispatch, EventListeners, Target};
pub use dom::{Document, InputId, InputState, NodeId};
pub use error::{DomError, TemplateError};
pub use selector::Selector;
pub use template::{FnTemplate, Template};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{Event, EventKind, Key, State, Subscription, WeakState};
    pub use crate::delegate::{Binding, Dispatch, EventListeners, Target};
    pub use crate::dom::{Document, InputId, InputState, NodeId};
    pub use crate::error::{DomError, TemplateError};
    pub use crate::selector::Selector;
    pub use crate::template::{FnTemplate, Template};
}
