use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error};
use walkdir::WalkDir;

use crate::config::CONFIG_FILE_NAME;
use crate::error::LintError;

/// Extensions of server-side sources
pub const SERVER_EXTENSIONS: [&str; 4] = ["js", "mjs", "cjs", "ts"];

/// Extensions of client-side sources (server ones plus component files)
pub const CLIENT_EXTENSIONS: [&str; 6] = ["js", "mjs", "cjs", "ts", "jsx", "tsx"];

/// Which side of the comparison a tree belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Server,
    Client,
}

impl SourceKind {
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            SourceKind::Server => &SERVER_EXTENSIONS,
            SourceKind::Client => &CLIENT_EXTENSIONS,
        }
    }
}

/// Files found under one root
#[derive(Debug, Default)]
pub struct FoundFiles {
    /// Source files in traversal order (sorted by file name within each directory)
    pub sources: Vec<PathBuf>,
    pub config_files: Vec<PathBuf>,
}

/// A file that was skipped during scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Find all source files of `kind` under `dir`, plus any route-linter.json.
pub fn find_files(dir: &Path, kind: SourceKind, ignore_patterns: &[String]) -> FoundFiles {
    let mut found = FoundFiles::default();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                error!("Skipping unreadable directory entry: {}", err);
                None
            }
        })
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        if is_ignored(path, dir, ignore_patterns) {
            debug!("Ignoring {}", path.display());
            continue;
        }

        if path.file_name().is_some_and(|name| name == CONFIG_FILE_NAME) {
            found.config_files.push(path.to_path_buf());
            continue;
        }

        if has_extension(path, kind.extensions()) {
            found.sources.push(path.to_path_buf());
        }
    }

    debug!(
        "Found {} {:?} source files under {}",
        found.sources.len(),
        kind,
        dir.display()
    );
    found
}

/// Whether `path` matches an ignore pattern below `root`.
///
/// A pattern matches whole path components: `dist` ignores `dist/app.js` and
/// `web/dist/app.js` but not `distributors.js`. Patterns with `/` must match a
/// run of consecutive components (`src/legacy`).
pub fn is_ignored(path: &Path, root: &Path, ignore_patterns: &[String]) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let components: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();

    ignore_patterns.iter().any(|pattern| {
        let parts: Vec<&str> = pattern.split('/').filter(|part| !part.is_empty()).collect();
        !parts.is_empty()
            && components
                .windows(parts.len())
                .any(|window| window.iter().zip(&parts).all(|(c, p)| c == p))
    })
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension().is_some_and(|extension| {
        let ext_str = extension.to_string_lossy().to_lowercase();
        extensions.iter().any(|candidate| *candidate == ext_str)
    })
}

/// Read a source file as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String, LintError> {
    std::fs::read_to_string(path).map_err(|source| LintError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })
}

impl SkippedFile {
    /// Log the failure and turn it into a report entry.
    pub fn record(path: &Path, err: &LintError) -> Self {
        error!("{}", err);
        Self {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}
