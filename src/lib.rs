//! Fragment Inliner - recursive placeholder inlining for static HTML
//!
//! Templates embed placeholders like `{app:{header}}`; each one is replaced
//! by the contents of the matching fragment file from a `components`
//! directory, which may itself contain placeholders.
//!
//! # Example
//!
//! ```rust
//! use fragment_inliner::inline;
//!
//! // Placeholders without a fragment are left untouched
//! let html = inline("<body>{app:{missing}}</body>", "components");
//! assert_eq!(html, "<body>{app:{missing}}</body>");
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;
pub mod template;

use std::path::PathBuf;

pub use build::{inline_dir, inline_file, BuildError, BuildSummary};
pub use config::{ConfigError, InlinerConfig};
pub use error::InlineError;
pub use parser::{placeholders, scan, Kind, Placeholder, Segment};
pub use report::{CollectingReporter, NullReporter, Reporter, StderrReporter, TokenFailure};
pub use template::{Fragment, FragmentStore, Inliner, Resolution, ResolutionContext};

/// Resolve placeholders in `content` against `components_dir` with default
/// settings, discarding reports.
pub fn inline(content: &str, components_dir: impl Into<PathBuf>) -> String {
    Inliner::new(InlinerConfig::new().with_components_dir(components_dir)).resolve(content)
}
