//! Writing resolved templates to disk
//!
//! The resolver only returns strings; this module reads template files,
//! resolves them and persists the results.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::template::Inliner;

/// Errors that abort a build
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
}

/// Counts from a directory build
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    /// HTML files resolved and written
    pub written: usize,
    /// Entries ignored: non-HTML files and symlinked directories
    pub skipped: usize,
}

/// Resolve one template file and write the result to `output`
pub fn inline_file(inliner: &Inliner<'_>, input: &Path, output: &Path) -> Result<(), BuildError> {
    let content = fs::read_to_string(input).map_err(|source| BuildError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let resolved = inliner.resolve_named(&content, &input.display().to_string());
    write_output(output, &resolved)
}

/// Resolve every `.html` file below `src` into the same relative path below
/// `dest`.
///
/// The components directory and `dest` itself are not descended into when
/// they live inside `src`.
pub fn inline_dir(inliner: &Inliner<'_>, src: &Path, dest: &Path) -> Result<BuildSummary, BuildError> {
    if !src.is_dir() {
        return Err(BuildError::NotADirectory {
            path: src.to_path_buf(),
        });
    }
    fs::create_dir_all(dest).map_err(|source| BuildError::Write {
        path: dest.to_path_buf(),
        source,
    })?;

    let excluded: Vec<PathBuf> = [inliner.config().components_dir.as_path(), dest]
        .iter()
        .filter_map(|p| p.canonicalize().ok())
        .collect();

    let mut summary = BuildSummary::default();
    walk(inliner, src, dest, &excluded, &mut summary)?;
    Ok(summary)
}

fn walk(
    inliner: &Inliner<'_>,
    src: &Path,
    dest: &Path,
    excluded: &[PathBuf],
    summary: &mut BuildSummary,
) -> Result<(), BuildError> {
    let read_err = |source| BuildError::Read {
        path: src.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(src)
        .map_err(read_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let target = dest.join(entry.file_name());
        // symlinks are not followed into directories
        let file_type = entry.file_type().map_err(read_err)?;

        if file_type.is_dir() {
            let skip = path
                .canonicalize()
                .map(|c| excluded.contains(&c))
                .unwrap_or(false);
            if !skip {
                walk(inliner, &path, &target, excluded, summary)?;
            }
        } else if is_html(&path) && path.is_file() {
            inline_file(inliner, &path, &target)?;
            summary.written += 1;
        } else {
            summary.skipped += 1;
        }
    }

    Ok(())
}

fn is_html(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html")
}

fn write_output(path: &Path, content: &str) -> Result<(), BuildError> {
    let write_err = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, content).map_err(write_err)
}
