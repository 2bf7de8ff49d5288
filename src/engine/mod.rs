use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::analyzer::{MismatchReport, reconcile};
use crate::call_extractor::extract_calls;
use crate::config::{Config, DEFAULT_IGNORE_PATTERNS};
use crate::error::LintError;
use crate::file_finder::{FoundFiles, SkippedFile, SourceKind, find_files, is_ignored};
use crate::model::{DeclaredRoute, ObservedCall};
use crate::patterns::Patterns;
use crate::route_extractor::extract_routes;
use crate::suggest::{DEFAULT_THRESHOLD, FuzzyMatcher, SuggestionResult, suggest};

/// Inputs of one run
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub backend: PathBuf,
    pub frontend: PathBuf,
    pub suggest: bool,
    pub threshold: u8,
    /// Extra config file on top of the ones found in the trees
    pub config_file: Option<PathBuf>,
}

impl AnalysisOptions {
    pub fn new(backend: impl Into<PathBuf>, frontend: impl Into<PathBuf>) -> Self {
        Self {
            backend: backend.into(),
            frontend: frontend.into(),
            suggest: false,
            threshold: DEFAULT_THRESHOLD,
            config_file: None,
        }
    }
}

/// What happened to the optional suggestion step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    NotRequested,
    Unavailable,
    Computed(Vec<SuggestionResult>),
}

/// Everything a run produces, ready for formatting
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub backend_root: PathBuf,
    pub frontend_root: PathBuf,
    pub routes: BTreeSet<DeclaredRoute>,
    /// Calls in discovery order
    pub calls: Vec<ObservedCall>,
    pub report: MismatchReport,
    pub suggestions: SuggestionOutcome,
    pub skipped: Vec<SkippedFile>,
}

/// Scan both trees, reconcile them and optionally compute suggestions.
///
/// Unreadable source files are skipped and listed in the outcome. Only a
/// missing root directory or a broken configuration fails the run.
pub fn run_analysis(
    options: &AnalysisOptions,
    matcher: FuzzyMatcher,
) -> Result<AnalysisOutcome, LintError> {
    ensure_directory(&options.backend)?;
    ensure_directory(&options.frontend)?;

    let default_ignores: Vec<String> = DEFAULT_IGNORE_PATTERNS
        .iter()
        .map(|pattern| pattern.to_string())
        .collect();
    let mut backend_files = find_files(&options.backend, SourceKind::Server, &default_ignores);
    let mut frontend_files = find_files(&options.frontend, SourceKind::Client, &default_ignores);

    let config = load_config(options, &backend_files, &frontend_files)?;
    let config = {
        let ignore_patterns = config.effective_ignore_patterns();
        let before = backend_files.config_files.len() + frontend_files.config_files.len();
        apply_ignores(&mut backend_files, &options.backend, &ignore_patterns);
        apply_ignores(&mut frontend_files, &options.frontend, &ignore_patterns);
        let after = backend_files.config_files.len() + frontend_files.config_files.len();

        // Config files under an ignored directory do not count
        if after < before {
            load_config(options, &backend_files, &frontend_files)?
        } else {
            config
        }
    };

    let patterns = Patterns::from_config(&config)?;

    info!(
        "Scanning {} backend files in {}",
        backend_files.sources.len(),
        options.backend.display()
    );
    let route_scan = extract_routes(&backend_files.sources, &patterns.routes);

    info!(
        "Scanning {} frontend files in {}",
        frontend_files.sources.len(),
        options.frontend.display()
    );
    let call_scan = extract_calls(&frontend_files.sources, &patterns.calls);

    let report = reconcile(&route_scan.routes, &call_scan.calls);

    let suggestions = if options.suggest {
        match suggest(
            &report.undefined,
            &report.declared_keys,
            options.threshold,
            &matcher,
        ) {
            Ok(results) => SuggestionOutcome::Computed(results),
            Err(err) => {
                warn!("{}; skipping suggestions", err);
                SuggestionOutcome::Unavailable
            }
        }
    } else {
        SuggestionOutcome::NotRequested
    };

    let mut skipped = route_scan.skipped;
    skipped.extend(call_scan.skipped);

    Ok(AnalysisOutcome {
        backend_root: options.backend.clone(),
        frontend_root: options.frontend.clone(),
        routes: route_scan.routes,
        calls: call_scan.calls,
        report,
        suggestions,
        skipped,
    })
}

fn ensure_directory(path: &Path) -> Result<(), LintError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(LintError::MissingDirectory {
            path: path.to_path_buf(),
        })
    }
}

fn load_config(
    options: &AnalysisOptions,
    backend_files: &FoundFiles,
    frontend_files: &FoundFiles,
) -> Result<Config, LintError> {
    let mut config_paths: Vec<PathBuf> = backend_files
        .config_files
        .iter()
        .chain(frontend_files.config_files.iter())
        .cloned()
        .collect();
    if let Some(explicit) = &options.config_file {
        config_paths.push(explicit.clone());
    }
    for path in &config_paths {
        info!("Using configuration file: {}", path.display());
    }
    Config::new(config_paths)
}

fn apply_ignores(files: &mut FoundFiles, root: &Path, ignore_patterns: &[String]) {
    let keep = |path: &PathBuf| {
        let ignored = is_ignored(path, root, ignore_patterns);
        if ignored {
            debug!("Ignoring {}", path.display());
        }
        !ignored
    };
    files.sources.retain(keep);
    files.config_files.retain(keep);
}
