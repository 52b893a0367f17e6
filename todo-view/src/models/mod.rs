//! Models backing the views

mod todo;

pub use todo::*;
