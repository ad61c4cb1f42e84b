//! Strict substitution engine for $(arg) and $(env) references
//!
//! Every reference must resolve. An undefined name is an error, never an
//! empty string, so a misconfigured recipe aborts before the pipeline runs.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex for matching substitution patterns: $(type value)
static SUBSTITUTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\((\w+)\s+([^)]+)\)|\$\((\w+)\)").unwrap());

/// Upper bound on substitution passes (nested references)
const MAX_ITERATIONS: usize = 10;

/// Substitution context containing all available variables
#[derive(Debug, Clone, Default)]
pub struct SubstitutionContext {
    /// Recipe arguments
    pub args: HashMap<String, String>,
    /// Environment overrides, checked before the process environment
    pub env: HashMap<String, String>,
}

impl SubstitutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    pub fn with_args(mut self, args: HashMap<String, String>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    /// Substitute all patterns in a string
    pub fn substitute(&self, input: &str) -> Result<String, SubstitutionError> {
        let mut result = input.to_string();
        let mut last_result = String::new();
        let mut iterations = 0;

        while result != last_result && iterations < MAX_ITERATIONS {
            last_result = result.clone();
            result = self.substitute_once(&result)?;
            iterations += 1;
        }

        if iterations >= MAX_ITERATIONS && SUBSTITUTION_PATTERN.is_match(&result) {
            return Err(SubstitutionError::MaxIterationsExceeded(input.to_string()));
        }

        Ok(result)
    }

    fn substitute_once(&self, input: &str) -> Result<String, SubstitutionError> {
        let mut error: Option<SubstitutionError> = None;

        let result = SUBSTITUTION_PATTERN.replace_all(input, |caps: &Captures| {
            if error.is_some() {
                return String::new();
            }

            match self.resolve_capture(caps) {
                Ok(value) => value,
                Err(e) => {
                    error = Some(e);
                    String::new()
                }
            }
        });

        if let Some(e) = error {
            return Err(e);
        }

        Ok(result.into_owned())
    }

    fn resolve_capture(&self, caps: &Captures) -> Result<String, SubstitutionError> {
        // $(type value), e.g. $(arg data_root)
        if let (Some(subst_type), Some(value)) = (caps.get(1), caps.get(2)) {
            return self.resolve_typed(subst_type.as_str(), value.as_str().trim());
        }

        // $(type) with no name is always missing its operand
        if let Some(subst_type) = caps.get(3) {
            return Err(SubstitutionError::MissingName(subst_type.as_str().to_string()));
        }

        Err(SubstitutionError::InvalidPattern(
            caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default(),
        ))
    }

    fn resolve_typed(&self, subst_type: &str, name: &str) -> Result<String, SubstitutionError> {
        match subst_type {
            "arg" => self.resolve_arg(name),
            "env" => self.resolve_env(name),
            _ => Err(SubstitutionError::UnknownType(subst_type.to_string())),
        }
    }

    fn resolve_arg(&self, name: &str) -> Result<String, SubstitutionError> {
        self.args
            .get(name)
            .cloned()
            .ok_or_else(|| SubstitutionError::UndefinedArg(name.to_string()))
    }

    fn resolve_env(&self, name: &str) -> Result<String, SubstitutionError> {
        if let Some(value) = self.env.get(name) {
            return Ok(value.clone());
        }

        std::env::var(name).map_err(|_| SubstitutionError::UndefinedEnv(name.to_string()))
    }
}

/// Errors that can occur during substitution
#[derive(Debug, thiserror::Error)]
pub enum SubstitutionError {
    #[error("Unknown substitution type: {0}")]
    UnknownType(String),

    #[error("Substitution '$({0})' is missing a variable name")]
    MissingName(String),

    #[error("Undefined argument: {0}")]
    UndefinedArg(String),

    #[error("Undefined environment variable: {0}")]
    UndefinedEnv(String),

    #[error("Invalid substitution pattern: {0}")]
    InvalidPattern(String),

    #[error("Maximum substitution iterations exceeded for: {0}")]
    MaxIterationsExceeded(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_substitution() {
        let ctx = SubstitutionContext::new().with_arg("train", "train_nodev");

        let result = ctx.substitute("$(arg train)").unwrap();
        assert_eq!(result, "train_nodev");
    }

    #[test]
    fn test_env_override_substitution() {
        let ctx = SubstitutionContext::new().with_env("ENH_EXP_DIR", "exp/enh");

        let result = ctx.substitute("$(env ENH_EXP_DIR)/valid.loss.best.pth").unwrap();
        assert_eq!(result, "exp/enh/valid.loss.best.pth");
    }

    #[test]
    fn test_env_falls_back_to_process_environment() {
        let Ok(path) = std::env::var("PATH") else {
            return;
        };
        let ctx = SubstitutionContext::new();

        assert_eq!(ctx.substitute("$(env PATH)").unwrap(), path);
    }

    #[test]
    fn test_undefined_arg_error() {
        let ctx = SubstitutionContext::new();

        let result = ctx.substitute("$(arg undefined)");
        assert!(matches!(result, Err(SubstitutionError::UndefinedArg(name)) if name == "undefined"));
    }

    #[test]
    fn test_undefined_env_error() {
        let ctx = SubstitutionContext::new();

        let result = ctx.substitute("$(env ENH_LAUNCH_SURELY_UNSET_VARIABLE)");
        assert!(matches!(result, Err(SubstitutionError::UndefinedEnv(_))));
    }

    #[test]
    fn test_unknown_type_error() {
        let ctx = SubstitutionContext::new();

        let result = ctx.substitute("$(find something)");
        assert!(matches!(result, Err(SubstitutionError::UnknownType(t)) if t == "find"));
    }

    #[test]
    fn test_missing_name_error() {
        let ctx = SubstitutionContext::new();

        assert!(matches!(
            ctx.substitute("$(arg)"),
            Err(SubstitutionError::MissingName(_))
        ));
    }

    #[test]
    fn test_nested_substitution() {
        let ctx = SubstitutionContext::new()
            .with_arg("outer", "$(arg inner)")
            .with_arg("inner", "resolved");

        let result = ctx.substitute("$(arg outer)").unwrap();
        assert_eq!(result, "resolved");
    }

    #[test]
    fn test_self_reference_exceeds_iterations() {
        let ctx = SubstitutionContext::new().with_arg("loop", "x$(arg loop)");

        let result = ctx.substitute("$(arg loop)");
        assert!(matches!(result, Err(SubstitutionError::MaxIterationsExceeded(_))));
    }

    #[test]
    fn test_no_substitution_needed() {
        let ctx = SubstitutionContext::new();

        let result = ctx.substitute("train_dev test").unwrap();
        assert_eq!(result, "train_dev test");
    }
}
