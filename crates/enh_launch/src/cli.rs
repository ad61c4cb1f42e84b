//! Command-line interface for enh_launch
//!
//! The launcher has no options of its own. Every argument is an opaque
//! token for the pipeline, so nothing here parses or validates; even
//! `--help` goes straight through to `enh.sh`.

use std::ffi::OsString;

/// Arguments given to the launcher, forwarded verbatim after the fixed flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassthroughArgs(Vec<OsString>);

impl PassthroughArgs {
    /// Collect the process arguments after the program name
    pub fn from_env() -> Self {
        Self::from_iter(std::env::args_os().skip(1))
    }

    pub fn as_slice(&self) -> &[OsString] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<OsString> {
        self.0
    }
}

impl<T: Into<OsString>> FromIterator<T> for PassthroughArgs {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
