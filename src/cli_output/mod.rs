//! Terminal output for the record lists and the list state.

mod boxes;

pub use boxes::*;
