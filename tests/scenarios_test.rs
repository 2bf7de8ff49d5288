use route_linter::engine::{AnalysisOptions, AnalysisOutcome, SuggestionOutcome, run_analysis};
use route_linter::model::CanonicalKey;
use route_linter::suggest::{FuzzyMatcher, Suggestion};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Project {
    backend: TempDir,
    frontend: TempDir,
}

impl Project {
    fn new(routes: &str, calls: &str) -> Self {
        let backend = TempDir::new().expect("Failed to create backend dir");
        let frontend = TempDir::new().expect("Failed to create frontend dir");
        write(backend.path(), "routes.js", routes);
        write(frontend.path(), "client.js", calls);
        Self { backend, frontend }
    }

    fn run(&self, suggest: bool, threshold: u8, matcher: FuzzyMatcher) -> AnalysisOutcome {
        let mut options = AnalysisOptions::new(self.backend.path(), self.frontend.path());
        options.suggest = suggest;
        options.threshold = threshold;
        run_analysis(&options, matcher).expect("analysis should succeed")
    }
}

fn write(root: &Path, name: &str, content: &str) {
    fs::write(root.join(name), content).expect("Failed to write source file");
}

fn strings(keys: &BTreeSet<CanonicalKey>) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

fn only_suggestion(outcome: &AnalysisOutcome) -> Suggestion {
    match &outcome.suggestions {
        SuggestionOutcome::Computed(results) => {
            assert_eq!(results.len(), 1, "expected exactly one suggestion");
            results[0].clone().expect("expected a scored suggestion")
        }
        other => panic!("expected computed suggestions, got {:?}", other),
    }
}

#[test]
fn test_fetch_matches_get_route() {
    let project = Project::new("app.get('/api/users', h);", "fetch('/api/users');");

    let outcome = project.run(false, 70, FuzzyMatcher::Unavailable);

    assert!(outcome.report.unused.is_empty());
    assert!(outcome.report.undefined.is_empty());
}

#[test]
fn test_method_mismatch_reports_both_sides() {
    let project = Project::new("app.get('/api/users', h);", "axios.post('/api/users');");

    let outcome = project.run(false, 70, FuzzyMatcher::Unavailable);

    assert_eq!(strings(&outcome.report.unused), vec!["GET /api/users"]);
    assert_eq!(strings(&outcome.report.undefined), vec!["POST /api/users"]);
}

#[test]
fn test_route_param_spelling_is_a_known_mismatch() {
    let project = Project::new(
        "app.get('/api/items/:id', h);",
        "fetch(`/api/items/${id}`);",
    );

    let outcome = project.run(false, 70, FuzzyMatcher::Unavailable);

    assert_eq!(strings(&outcome.report.undefined), vec!["GET /api/items/:param"]);
    assert_eq!(strings(&outcome.report.unused), vec!["GET /api/items/:id"]);
}

#[test]
fn test_static_asset_fetch_is_not_a_call() {
    let project = Project::new("app.get('/api/users', h);", "fetch('/static/logo.png');");

    let outcome = project.run(false, 70, FuzzyMatcher::Unavailable);

    assert!(outcome.calls.is_empty());
    assert!(outcome.report.undefined.is_empty());
    assert_eq!(strings(&outcome.report.unused), vec!["GET /api/users"]);
}

#[test]
fn test_threshold_decides_acceptance() {
    let project = Project::new("router.get('/api/user', h);", "fetch('/api/usr');");
    let matcher = FuzzyMatcher::Available(|a, b| if a == b { 100 } else { 92 });

    let lenient = only_suggestion(&project.run(true, 70, matcher));
    let strict = only_suggestion(&project.run(true, 95, matcher));

    assert_eq!(lenient.undefined_key.as_str(), "GET /api/usr");
    assert_eq!(lenient.best_match.as_str(), "GET /api/user");
    assert!(lenient.accepted);
    assert_eq!(strict.score, lenient.score);
    assert!(!strict.accepted);
}

#[test]
fn test_no_backend_routes_means_no_candidates() {
    let project = Project::new("// nothing declared", "fetch('/api/users');");

    let outcome = project.run(true, 70, FuzzyMatcher::Available(|_, _| 100));

    let SuggestionOutcome::Computed(results) = &outcome.suggestions else {
        panic!("expected computed suggestions");
    };
    assert_eq!(results.len(), 1);
    assert!(results[0].is_err());
}

#[test]
fn test_same_run_twice_is_identical() {
    let project = Project::new(
        "app.get('/api/a', h); app.post('/api/b', h); app.put('/api/c/:param', h);",
        "fetch('/api/a'); axios.post('/api/bb'); axios.put(`/api/c/${x}`); fetch('/api/d');",
    );

    let first = project.run(false, 70, FuzzyMatcher::Unavailable);
    let second = project.run(false, 70, FuzzyMatcher::Unavailable);

    assert_eq!(first.report, second.report);
    assert_eq!(first.calls, second.calls);
}

#[test]
fn test_unreadable_frontend_file_does_not_abort() {
    let project = Project::new("app.get('/api/users', h);", "fetch('/api/users');");
    fs::write(project.frontend.path().join("broken.js"), [0xff, 0xfe, 0xfd])
        .expect("Failed to write binary file");

    let outcome = project.run(false, 70, FuzzyMatcher::Unavailable);

    assert_eq!(outcome.skipped.len(), 1);
    assert!(outcome.report.is_clean());
}
