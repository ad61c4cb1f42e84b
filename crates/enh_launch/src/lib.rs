//! Speech Enhancement Recipe Launcher
//!
//! Invokes the external enhancement pipeline (`enh.sh`) with the fixed
//! settings of this recipe, followed by whatever arguments the caller gave
//! the launcher. The launcher exits with the pipeline's exit code.
//!
//! # Overview
//!
//! - The fixed flags live in a YAML [`Recipe`] embedded in the binary
//! - Caller arguments are opaque and forwarded unmodified, in order
//! - Any undefined `$(arg ...)` / `$(env ...)` reference aborts before the
//!   pipeline is spawned
//! - The pipeline is spawned exactly once, with inherited standard streams
//!
//! # Built-in Recipe
//!
//! ```yaml
//! version: "1.0"
//! executable: "./enh.sh"
//! flags:
//!   fs: 16k
//!   lang: en
//!   train_set: train_nodev
//!   valid_set: train_dev
//!   test_sets: "train_dev test"
//!   inference_model: "valid.loss.best.pth"
//! ```

pub mod cli;
pub mod config;
pub mod runtime;

pub use cli::PassthroughArgs;
pub use config::{ArgValue, Recipe, RecipeError, SubstitutionContext, SubstitutionError};
pub use runtime::{
    ExitOutcome, Invocation, LaunchError, Launcher, PipelineProcess, ProcessError,
};
