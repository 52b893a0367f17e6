//! Views

mod todo;

pub use todo::*;
