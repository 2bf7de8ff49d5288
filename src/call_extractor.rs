use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::file_finder::{SkippedFile, read_source};
use crate::model::{FileLocation, HttpMethod, ObservedCall};
use crate::path_classifier::is_api_path;
use crate::patterns::CallPatterns;

/// Calls observed across a client tree, in discovery order
#[derive(Debug, Default)]
pub struct CallScan {
    pub calls: Vec<ObservedCall>,
    pub skipped: Vec<SkippedFile>,
}

/// Collects the calls of one file, at most one per (method, raw path).
struct FileCalls<'a> {
    path: &'a Path,
    content: &'a str,
    seen: HashSet<(HttpMethod, String)>,
    calls: Vec<ObservedCall>,
}

impl<'a> FileCalls<'a> {
    fn new(path: &'a Path, content: &'a str) -> Self {
        Self {
            path,
            content,
            seen: HashSet::new(),
            calls: Vec::new(),
        }
    }

    fn record(&mut self, method: HttpMethod, raw_path: &str, offset: usize) {
        if !is_api_path(raw_path) {
            debug!("{}: ignoring non-API path {}", self.path.display(), raw_path);
            return;
        }
        if !self.seen.insert((method, raw_path.to_string())) {
            return;
        }

        let line = line_of_offset(self.content, offset);
        self.calls.push(ObservedCall::new(
            method,
            raw_path,
            FileLocation::new(self.path, line),
        ));
    }
}

/// Find every API call in one file's content.
///
/// Explicit-method `fetch` calls are matched first; a `fetch` that carried a
/// `method` option is never recorded again as an implied GET.
pub fn extract_calls_from_source(
    content: &str,
    path: &Path,
    patterns: &CallPatterns,
) -> Vec<ObservedCall> {
    let mut file_calls = FileCalls::new(path, content);
    let mut explicit_sites = HashSet::new();

    for caps in patterns.explicit_fetch.captures_iter(content) {
        let Some(site) = caps.get(0) else { continue };
        explicit_sites.insert(site.start());

        match caps[2].parse::<HttpMethod>() {
            Ok(method) => file_calls.record(method, &caps[1], site.start()),
            Err(err) => debug!("{}: {}", path.display(), err),
        }
    }

    for caps in patterns.implicit_fetch.captures_iter(content) {
        let Some(site) = caps.get(0) else { continue };
        if explicit_sites.contains(&site.start()) {
            continue;
        }
        file_calls.record(HttpMethod::Get, &caps[1], site.start());
    }

    for caps in patterns.client_call.captures_iter(content) {
        let Some(site) = caps.get(0) else { continue };
        // The verb alternation only admits supported methods
        if let Ok(method) = caps[1].parse::<HttpMethod>() {
            file_calls.record(method, &caps[2], site.start());
        }
    }

    file_calls.calls
}

/// Scan every file, skipping (and recording) the ones that cannot be read.
pub fn extract_calls(files: &[PathBuf], patterns: &CallPatterns) -> CallScan {
    let mut scan = CallScan::default();

    for path in files {
        let content = match read_source(path) {
            Ok(content) => content,
            Err(err) => {
                scan.skipped.push(SkippedFile::record(path, &err));
                continue;
            }
        };

        let calls = extract_calls_from_source(&content, path, patterns);
        debug!("{}: {} API calls", path.display(), calls.len());
        scan.calls.extend(calls);
    }

    scan
}

fn line_of_offset(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}
