use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::debug;

use crate::file_finder::{SkippedFile, read_source};
use crate::model::{DeclaredRoute, HttpMethod};
use crate::patterns::RoutePatterns;

/// Routes declared across a server tree
#[derive(Debug, Default)]
pub struct RouteScan {
    pub routes: BTreeSet<DeclaredRoute>,
    pub skipped: Vec<SkippedFile>,
}

/// Find every `app.get('/path', ...)`-style declaration in one file's content.
///
/// Paths are returned verbatim; duplicates are left for the caller's set.
pub fn extract_routes_from_source(content: &str, patterns: &RoutePatterns) -> Vec<DeclaredRoute> {
    patterns
        .declaration
        .captures_iter(content)
        .filter_map(|caps| {
            // The verb alternation only admits supported methods
            let method: HttpMethod = caps[1].parse().ok()?;
            Some(DeclaredRoute::new(method, &caps[2]))
        })
        .collect()
}

/// Scan every file, skipping (and recording) the ones that cannot be read.
pub fn extract_routes(files: &[PathBuf], patterns: &RoutePatterns) -> RouteScan {
    let mut scan = RouteScan::default();

    for path in files {
        let content = match read_source(path) {
            Ok(content) => content,
            Err(err) => {
                scan.skipped.push(SkippedFile::record(path, &err));
                continue;
            }
        };

        let routes = extract_routes_from_source(&content, patterns);
        debug!("{}: {} route declarations", path.display(), routes.len());
        scan.routes.extend(routes);
    }

    scan
}
