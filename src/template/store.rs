//! Fragment lookup on disk

use std::path::PathBuf;

use crate::error::InlineError;
use crate::parser::Placeholder;

/// A fragment read from the components tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub path: PathBuf,
    pub content: String,
}

/// Maps placeholders to fragment files below a base directory
#[derive(Debug, Clone)]
pub struct FragmentStore {
    base_path: PathBuf,
}

impl FragmentStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// `<base>/<kind folder>/<category>/<name>.<ext>`
    pub fn fragment_path(&self, placeholder: &Placeholder) -> PathBuf {
        self.base_path.join(placeholder.relative_path())
    }

    /// Load the fragment a placeholder refers to.
    ///
    /// A missing file is not an error and yields `Ok(None)`. An existing path
    /// that cannot be read as UTF-8 text (a directory, bad permissions,
    /// binary content) is.
    pub fn load(&self, placeholder: &Placeholder) -> Result<Option<Fragment>, InlineError> {
        let path = self.fragment_path(placeholder);
        if !path.exists() {
            return Ok(None);
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(Fragment { path, content })),
            Err(source) => Err(InlineError::Read { path, source }),
        }
    }
}
