//! File discovery and per-file analysis
//!
//! Each file is read, parsed and checked on its own; files share nothing, so
//! they are analysed in parallel and reported in path order.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::analyzer::Analyzer;
use crate::context::CheckContext;
use crate::diagnostic::Diagnostic;
use crate::error::{AddlintError, Result};
use crate::types::LiteralTypes;

/// A diagnostic tied to the file it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// File the diagnostic belongs to
    pub file: PathBuf,

    /// The diagnostic itself
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.diagnostic)
    }
}

/// Outcome of analysing one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// The analysed file
    pub path: PathBuf,

    /// Diagnostics in source order
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// Pair every diagnostic with this report's path.
    pub fn findings(&self) -> impl Iterator<Item = Finding> + '_ {
        self.diagnostics.iter().map(|d| Finding {
            file: self.path.clone(),
            diagnostic: d.clone(),
        })
    }
}

/// Expand paths into the sorted list of Rust files to analyse.
///
/// Files are taken as given. Directories are walked recursively, keeping
/// `*.rs` files and skipping `target` and hidden directories.
///
/// # Errors
///
/// Returns [`AddlintError::Io`] if a path does not exist.
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let walker = WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));
            for entry in walker {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && is_rust_file(entry.path()) => {
                        files.push(entry.into_path());
                    }
                    Ok(_) => {}
                    Err(err) => warn!("skipping unreadable entry: {}", err),
                }
            }
        } else {
            return Err(AddlintError::Io {
                path: path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no such file or directory",
                ),
            });
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "target" || name.starts_with('.')
}

fn is_rust_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rs")
}

/// Parse and check one source text.
///
/// Spans created on the current thread are invalidated afterwards, so the
/// caller must not hold `syn` nodes parsed earlier on the same thread.
///
/// # Errors
///
/// Returns [`AddlintError::Parse`] for invalid Rust, or whatever the
/// analyzer itself fails with.
pub fn analyze_source(
    path: &Path,
    source: &str,
    analyzer: &dyn Analyzer,
    ctx: &CheckContext,
) -> Result<Vec<Diagnostic>> {
    let diagnostics = parse_and_run(path, source, analyzer, ctx);
    // Positions are plain numbers by now; drop this file's text from the
    // thread's span table so long runs on pool threads stay flat.
    proc_macro2::extra::invalidate_current_thread_spans();
    let diagnostics = diagnostics?;
    debug!(
        "{}: {} diagnostic(s) from {}",
        path.display(),
        diagnostics.len(),
        analyzer.name()
    );
    Ok(diagnostics)
}

fn parse_and_run(
    path: &Path,
    source: &str,
    analyzer: &dyn Analyzer,
    ctx: &CheckContext,
) -> Result<Vec<Diagnostic>> {
    let file = syn::parse_file(source).map_err(|e| AddlintError::parse(path, &e))?;
    let diagnostics = analyzer.run(&file, &LiteralTypes, ctx)?.collect();
    Ok(diagnostics)
}

/// Read, parse and check one file.
pub fn analyze_file(
    path: &Path,
    analyzer: &dyn Analyzer,
    ctx: &CheckContext,
) -> Result<FileReport> {
    let source = fs::read_to_string(path).map_err(|source| AddlintError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let diagnostics = analyze_source(path, &source, analyzer, ctx)?;
    Ok(FileReport {
        path: path.to_path_buf(),
        diagnostics,
    })
}

/// Check every file in parallel. Results keep the order of `files`.
pub fn analyze_files(
    files: &[PathBuf],
    analyzer: &dyn Analyzer,
    ctx: &CheckContext,
) -> Vec<Result<FileReport>> {
    files
        .par_iter()
        .map(|path| analyze_file(path, analyzer, ctx))
        .collect()
}
