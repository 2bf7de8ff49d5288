use std::path::Path;

use serde::Serialize;

use crate::engine::{AnalysisOutcome, SuggestionOutcome};
use crate::error::SuggestError;
use crate::file_finder::SkippedFile;
use crate::model::CanonicalKey;
use crate::suggest::SuggestionResult;

/// Output style of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct FormattedOutput {
    pub content: String,
}

impl FormattedOutput {
    pub fn new(outcome: &AnalysisOutcome, format: OutputFormat) -> Result<Self, serde_json::Error> {
        let content = match format {
            OutputFormat::Text => format_text(outcome),
            OutputFormat::Json => format_json(outcome)?,
        };
        Ok(Self { content })
    }

    pub fn print(&self) {
        println!("{}", self.content);
    }
}

pub fn format_text(outcome: &AnalysisOutcome) -> String {
    let report = &outcome.report;
    let mut output = String::new();

    output.push_str(&format!(
        "Found {} backend routes:\n",
        outcome.routes.len()
    ));
    for key in &report.declared_keys {
        output.push_str(&format!("  {}\n", key));
    }

    output.push_str(&format!(
        "\nFound {} frontend API calls:\n",
        outcome.calls.len()
    ));
    for call in &outcome.calls {
        output.push_str(&format!(
            "  {} {} (in {}:{})\n",
            call.method,
            call.path,
            call.origin.display_relative_to(&outcome.frontend_root),
            call.origin.line
        ));
    }

    output.push('\n');
    if report.is_clean() {
        output.push_str("✅  Every route is called and every call has a route.\n");
    }
    for key in &report.unused {
        output.push_str(&format!(
            "⚠️  Unused route: {} (defined in backend but never called)\n",
            key
        ));
    }
    for key in &report.undefined {
        output.push_str(&format!(
            "⚠️  Undefined call: {} (called from frontend but not defined)\n",
            key
        ));
    }

    match &outcome.suggestions {
        SuggestionOutcome::NotRequested => {}
        SuggestionOutcome::Unavailable => {
            output.push_str(
                "\nFuzzy matching is not available in this build; skipping suggestions.\n",
            );
        }
        SuggestionOutcome::Computed(results) => {
            output.push_str("\nSuggestions:\n");
            if results.is_empty() {
                output.push_str("  No undefined calls to suggest routes for.\n");
            }
            for result in results {
                output.push_str(&format_suggestion_line(outcome, result));
            }
        }
    }

    output.push_str(&format!(
        "\nSummary: {} unused routes, {} undefined calls",
        report.unused.len(),
        report.undefined.len()
    ));
    if !outcome.skipped.is_empty() {
        output.push_str(&format!(", {} files skipped", outcome.skipped.len()));
    }
    output.push('\n');

    output
}

fn format_suggestion_line(outcome: &AnalysisOutcome, result: &SuggestionResult) -> String {
    match result {
        Ok(suggestion) => {
            let origin = origin_of(outcome, &suggestion.undefined_key);
            if suggestion.accepted {
                format!(
                    "  {}: {} -> did you mean {}? (score {})\n",
                    origin, suggestion.undefined_key, suggestion.best_match, suggestion.score
                )
            } else {
                format!(
                    "  {}: {} -> no match above threshold (closest: {}, score {})\n",
                    origin, suggestion.undefined_key, suggestion.best_match, suggestion.score
                )
            }
        }
        Err(SuggestError::EmptyCandidateSet { undefined_key }) => format!(
            "  {}: {} -> no match (no backend routes to compare against)\n",
            origin_of(outcome, undefined_key),
            undefined_key
        ),
        Err(err) => format!("  {}\n", err),
    }
}

fn origin_of(outcome: &AnalysisOutcome, key: &CanonicalKey) -> String {
    outcome
        .report
        .undefined_origin
        .get(key)
        .map(|call| call.origin.display_relative_to(&outcome.frontend_root))
        .unwrap_or_else(|| "<unknown>".to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    backend_routes: Vec<&'a CanonicalKey>,
    frontend_calls: Vec<JsonCall>,
    unused: Vec<&'a CanonicalKey>,
    undefined: Vec<&'a CanonicalKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestions: Option<Vec<JsonSuggestion>>,
    suggestions_unavailable: bool,
    skipped_files: &'a [SkippedFile],
}

#[derive(Serialize)]
struct JsonCall {
    method: String,
    path: String,
    file: String,
    line: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSuggestion {
    undefined_key: CanonicalKey,
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    best_match: Option<CanonicalKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<u8>,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn format_json(outcome: &AnalysisOutcome) -> Result<String, serde_json::Error> {
    let report = &outcome.report;
    let frontend_root: &Path = &outcome.frontend_root;

    let suggestions = match &outcome.suggestions {
        SuggestionOutcome::Computed(results) => Some(
            results
                .iter()
                .filter_map(|result| json_suggestion(outcome, result))
                .collect(),
        ),
        _ => None,
    };

    let json = JsonReport {
        backend_routes: report.declared_keys.iter().collect(),
        frontend_calls: outcome
            .calls
            .iter()
            .map(|call| JsonCall {
                method: call.method.to_string(),
                path: call.path.clone(),
                file: call.origin.display_relative_to(frontend_root),
                line: call.origin.line,
            })
            .collect(),
        unused: report.unused.iter().collect(),
        undefined: report.undefined.iter().collect(),
        suggestions,
        suggestions_unavailable: outcome.suggestions == SuggestionOutcome::Unavailable,
        skipped_files: &outcome.skipped,
    };

    serde_json::to_string_pretty(&json)
}

fn json_suggestion(outcome: &AnalysisOutcome, result: &SuggestionResult) -> Option<JsonSuggestion> {
    match result {
        Ok(suggestion) => Some(JsonSuggestion {
            undefined_key: suggestion.undefined_key.clone(),
            file: origin_of(outcome, &suggestion.undefined_key),
            best_match: Some(suggestion.best_match.clone()),
            score: Some(suggestion.score),
            accepted: suggestion.accepted,
            error: None,
        }),
        Err(err @ SuggestError::EmptyCandidateSet { undefined_key }) => Some(JsonSuggestion {
            undefined_key: undefined_key.clone(),
            file: origin_of(outcome, undefined_key),
            best_match: None,
            score: None,
            accepted: false,
            error: Some(err.to_string()),
        }),
        Err(SuggestError::MatcherUnavailable) => None,
    }
}
