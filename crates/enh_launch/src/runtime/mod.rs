//! Runtime components for invoking the pipeline

pub mod invocation;
pub mod launcher;
pub mod process;

pub use invocation::*;
pub use launcher::*;
pub use process::*;
