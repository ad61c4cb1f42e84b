//! Recipe YAML schema definitions

use crate::config::{SubstitutionContext, SubstitutionError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Recipe embedded in the launcher binary
const BUILTIN_RECIPE: &str = include_str!("../../recipes/enh.yaml");

/// A pipeline recipe: the entry point and the fixed flags forwarded to it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    /// Recipe format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Pipeline entry point
    pub executable: String,

    /// Named values usable in flags as `$(arg name)`
    #[serde(default)]
    pub args: IndexMap<String, ArgDefinition>,

    /// Fixed flags, forwarded as `--name value` in declaration order
    #[serde(default)]
    pub flags: IndexMap<String, ArgValue>,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Argument definition with default value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgDefinition {
    pub default: ArgValue,
    #[serde(default)]
    pub description: Option<String>,
}

/// Flag values can be strings, booleans, or numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ArgValue {
    /// Convert to the token passed on the command line
    pub fn as_str(&self) -> String {
        match self {
            ArgValue::Bool(b) => b.to_string(),
            ArgValue::Int(i) => i.to_string(),
            ArgValue::Float(f) => f.to_string(),
            ArgValue::String(s) => s.clone(),
        }
    }
}

impl Recipe {
    /// The speech enhancement recipe shipped with the launcher
    pub fn builtin() -> Result<Self, RecipeError> {
        Self::from_yaml(BUILTIN_RECIPE)
    }

    /// Parse a recipe from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, RecipeError> {
        let recipe: Recipe = serde_yaml::from_str(content)?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Validate the recipe configuration
    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.executable.trim().is_empty() {
            return Err(RecipeError::Validation(
                "'executable' must not be empty".to_string(),
            ));
        }

        for name in self.flags.keys() {
            if name.is_empty() {
                return Err(RecipeError::Validation(
                    "flag names must not be empty".to_string(),
                ));
            }
            if name.starts_with('-') {
                return Err(RecipeError::Validation(format!(
                    "Flag '{}': write the name without leading dashes",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Build the substitution context from the recipe's argument defaults
    pub fn substitution_context(&self) -> SubstitutionContext {
        let args: HashMap<String, String> = self
            .args
            .iter()
            .map(|(name, def)| (name.clone(), def.default.as_str()))
            .collect();
        SubstitutionContext::new().with_args(args)
    }

    /// Resolve the executable and the fixed flag tokens
    pub fn resolve(
        &self,
        ctx: &SubstitutionContext,
    ) -> Result<(String, Vec<String>), RecipeError> {
        let executable =
            ctx.substitute(&self.executable)
                .map_err(|e| RecipeError::SubstitutionFailed {
                    context: "executable".to_string(),
                    source: e,
                })?;

        let mut tokens = Vec::with_capacity(self.flags.len() * 2);
        for (name, value) in &self.flags {
            let resolved = ctx.substitute(&value.as_str()).map_err(|e| {
                RecipeError::SubstitutionFailed {
                    context: format!("flag '{}'", name),
                    source: e,
                }
            })?;
            tokens.push(format!("--{}", name));
            tokens.push(resolved);
        }

        Ok((executable, tokens))
    }
}

/// Errors that can occur when loading or resolving a recipe
#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("Failed to parse recipe: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Substitution failed in {context}: {source}")]
    SubstitutionFailed {
        context: String,
        #[source]
        source: SubstitutionError,
    },
}
