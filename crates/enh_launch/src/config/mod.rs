//! Recipe configuration parsing and substitution

mod recipe;
mod substitution;

pub use recipe::*;
pub use substitution::*;
