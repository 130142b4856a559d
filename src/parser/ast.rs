//! Placeholder types recognised in template source

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Fragment kind, selecting the folder and file extension of a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    App,
    Deferred,
    Svg,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::App => "app",
            Kind::Deferred => "deferred",
            Kind::Svg => "svg",
        }
    }

    /// Folder below the components directory holding fragments of this kind.
    ///
    /// Everything lives under `app`; non-app kinds get an underscore-prefixed
    /// subfolder.
    pub fn folder(&self) -> PathBuf {
        match self {
            Kind::App => PathBuf::from("app"),
            other => Path::new("app").join(format!("_{}", other.as_str())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Kind::Svg => "svg",
            Kind::App | Kind::Deferred => "html",
        }
    }

    /// Whether inlined content gets wrapped in START/END comments
    pub fn has_banner(&self) -> bool {
        matches!(self, Kind::Svg)
    }
}

impl FromStr for Kind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app" => Ok(Kind::App),
            "deferred" => Ok(Kind::Deferred),
            "svg" => Ok(Kind::Svg),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `{kind:{category}}` or `{kind:{category}:{name}}` token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: Kind,
    /// Subfolder holding the fragment
    pub category: String,
    /// Fragment file stem; falls back to the category when absent
    pub name: Option<String>,
}

impl Placeholder {
    pub fn new(kind: Kind, category: impl Into<String>) -> Self {
        Self {
            kind,
            category: category.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn fragment_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.category)
    }

    /// Path of the fragment relative to the components directory
    pub fn relative_path(&self) -> PathBuf {
        self.kind
            .folder()
            .join(&self.category)
            .join(format!("{}.{}", self.fragment_name(), self.kind.extension()))
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{{{}:{{{}}}:{{{}}}}}", self.kind, self.category, name),
            None => write!(f, "{{{}:{{{}}}}}", self.kind, self.category),
        }
    }
}

/// A piece of scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text, copied through unchanged
    Text(&'a str),
    /// A recognised placeholder together with its original text
    Placeholder {
        placeholder: Placeholder,
        raw: &'a str,
        span: Span,
    },
}
