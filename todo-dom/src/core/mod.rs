//! Core types for Todo DOM

mod events;
mod state;

pub use events::*;
pub use state::*;
