//! Reporting of per-placeholder failures and progress
//!
//! The resolver never prints anything itself; it hands events to a
//! [`Reporter`]. Failures are rendered with source context using ariadne.

use std::cell::RefCell;
use std::path::Path;

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::error::InlineError;
use crate::parser::Span;

/// A placeholder that could not be inlined
#[derive(Debug)]
pub struct TokenFailure<'a> {
    pub error: &'a InlineError,
    /// The placeholder text as it appears in the source
    pub token: &'a str,
    /// Byte range of the placeholder in `source`
    pub span: Span,
    /// Text the placeholder was found in
    pub source: &'a str,
    /// Display name of `source` (a fragment path or `<input>`)
    pub origin: &'a str,
}

impl TokenFailure<'_> {
    /// Format the failure with source context using ariadne
    pub fn format(&self) -> String {
        // ariadne counts characters, not bytes
        let start = self.source[..self.span.start].chars().count();
        let end = start + self.token.chars().count();
        let origin = self.origin;

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, origin, start)
            .with_message(format!("could not inline {}", self.token))
            .with_label(
                Label::new((origin, start..end))
                    .with_message(self.error.to_string())
                    .with_color(Color::Red),
            )
            .with_note(format!("fragment: {}", self.error.path().display()))
            .finish()
            .write((origin, Source::from(self.source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: could not inline {}: {}\n", origin, self.token, self.error),
        }
    }
}

/// Receiver for events raised while resolving placeholders
pub trait Reporter {
    /// A placeholder failed to resolve and was left verbatim
    fn report_error(&self, failure: &TokenFailure<'_>);

    /// A fragment was inlined at the given nesting depth (1 = top level)
    fn report_inlined(&self, _path: &Path, _depth: usize) {}
}

/// Writes diagnostics to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrReporter {
    /// Also log every inlined fragment
    pub verbose: bool,
}

impl StderrReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for StderrReporter {
    fn report_error(&self, failure: &TokenFailure<'_>) {
        eprint!("{}", failure.format());
    }

    fn report_inlined(&self, path: &Path, depth: usize) {
        if self.verbose {
            eprintln!("{}inlined {}", "  ".repeat(depth.saturating_sub(1)), path.display());
        }
    }
}

/// Keeps error messages in memory
#[derive(Debug, Default)]
pub struct CollectingReporter {
    errors: RefCell<Vec<String>>,
    inlined: RefCell<Vec<String>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages of all reported failures, in order
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    /// Paths of all inlined fragments, in order
    pub fn inlined(&self) -> Vec<String> {
        self.inlined.borrow().clone()
    }
}

impl Reporter for CollectingReporter {
    fn report_error(&self, failure: &TokenFailure<'_>) {
        self.errors.borrow_mut().push(failure.error.to_string());
    }

    fn report_inlined(&self, path: &Path, _depth: usize) {
        self.inlined.borrow_mut().push(path.display().to_string());
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report_error(&self, _failure: &TokenFailure<'_>) {}
}
