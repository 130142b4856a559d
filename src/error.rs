//! Error types for fragment resolution

use std::path::PathBuf;

use thiserror::Error;

/// Failure to resolve a single placeholder.
///
/// These never abort a resolution: the reporter is told and the placeholder
/// stays in the output verbatim.
#[derive(Debug, Error)]
pub enum InlineError {
    /// The fragment path exists but could not be read as text
    #[error("failed to read fragment {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fragment is already being inlined further up the include chain
    #[error("circular fragment inclusion: {}", format_chain(chain))]
    CircularInclude { chain: Vec<PathBuf> },

    /// Fragments are nested deeper than the configured limit
    #[error("fragment {} exceeds the maximum nesting depth of {max}", path.display())]
    DepthExceeded { path: PathBuf, max: usize },
}

impl InlineError {
    /// Path of the fragment the error is about
    pub fn path(&self) -> &std::path::Path {
        match self {
            InlineError::Read { path, .. } | InlineError::DepthExceeded { path, .. } => path,
            InlineError::CircularInclude { chain } => chain
                .last()
                .map(PathBuf::as_path)
                .unwrap_or_else(|| std::path::Path::new("")),
        }
    }
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
