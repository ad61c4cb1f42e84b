//! The argument list handed to the pipeline

use std::ffi::{OsStr, OsString};

/// A fully built pipeline command line
///
/// Constructed once: the fixed recipe tokens come first, the caller's
/// passthrough tokens follow in their original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    executable: OsString,
    fixed: Vec<OsString>,
    passthrough: Vec<OsString>,
}

impl Invocation {
    pub fn new<E, F, P>(executable: E, fixed: F, passthrough: P) -> Self
    where
        E: Into<OsString>,
        F: IntoIterator,
        F::Item: Into<OsString>,
        P: IntoIterator,
        P::Item: Into<OsString>,
    {
        Self {
            executable: executable.into(),
            fixed: fixed.into_iter().map(Into::into).collect(),
            passthrough: passthrough.into_iter().map(Into::into).collect(),
        }
    }

    pub fn executable(&self) -> &OsStr {
        &self.executable
    }

    pub fn fixed(&self) -> &[OsString] {
        &self.fixed
    }

    pub fn passthrough(&self) -> &[OsString] {
        &self.passthrough
    }

    /// All arguments in the order the pipeline receives them
    pub fn args(&self) -> impl Iterator<Item = &OsStr> {
        self.fixed
            .iter()
            .chain(self.passthrough.iter())
            .map(OsString::as_os_str)
    }
}

/// Space-joined command line, for logging only
impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.executable.to_string_lossy())?;
        for arg in self.args() {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
