//! Launcher - resolves the recipe and runs the pipeline once

use crate::cli::PassthroughArgs;
use crate::config::{Recipe, RecipeError, SubstitutionContext};
use crate::runtime::invocation::Invocation;
use crate::runtime::process::{ExitOutcome, PipelineProcess, ProcessError, EXIT_FAILURE};

/// Forwards a recipe's fixed flags plus caller arguments to its pipeline
#[derive(Debug)]
pub struct Launcher {
    recipe: Recipe,
    subst_ctx: SubstitutionContext,
    process: PipelineProcess,
}

impl Launcher {
    pub fn new(recipe: Recipe) -> Self {
        let subst_ctx = recipe.substitution_context();
        Self {
            recipe,
            subst_ctx,
            process: PipelineProcess,
        }
    }

    /// Launcher for the built-in enhancement recipe
    pub fn builtin() -> Result<Self, LaunchError> {
        Ok(Self::new(Recipe::builtin()?))
    }

    /// Add an environment override visible to `$(env ...)` references
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.subst_ctx = self.subst_ctx.with_env(name, value);
        self
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Build the full argument list without running anything
    ///
    /// Fails if any recipe value references an undefined variable.
    pub fn plan(&self, passthrough: PassthroughArgs) -> Result<Invocation, LaunchError> {
        let (executable, fixed) = self.recipe.resolve(&self.subst_ctx)?;
        Ok(Invocation::new(executable, fixed, passthrough.into_vec()))
    }

    /// Run the pipeline once and report how it terminated
    pub async fn run(&self, passthrough: PassthroughArgs) -> Result<ExitOutcome, LaunchError> {
        let invocation = self.plan(passthrough)?;
        log::info!("Running: {}", invocation);

        let outcome = self.process.run(&invocation).await?;
        log::info!("Pipeline exited with code {}", outcome.exit_code());
        Ok(outcome)
    }
}

/// Errors that stop the launcher before the pipeline reports a status
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Recipe error: {0}")]
    Recipe(#[from] RecipeError),

    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl LaunchError {
    /// Exit code the launcher terminates with for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::Recipe(_) => EXIT_FAILURE,
            LaunchError::Process(e) => e.exit_code(),
        }
    }
}
