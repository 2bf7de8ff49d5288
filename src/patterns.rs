//! Compiled extraction patterns
//!
//! Patterns are built once per run from the [`Config`] and handed to the
//! extractors explicitly. They hold no state beyond the compiled regexes.

use regex::Regex;

use crate::config::Config;
use crate::error::LintError;

/// Router objects recognised without any configuration
pub const DEFAULT_ROUTER_IDENTIFIERS: [&str; 2] = ["app", "router"];

/// Client objects whose `.get(...)`, `.post(...)` etc. are treated as calls
pub const DEFAULT_CLIENT_IDENTIFIERS: [&str; 1] = ["axios"];

const VERBS: &str = "get|post|put|delete|patch";

/// Pattern for server-side `router.verb('/path', ...)` declarations
#[derive(Debug, Clone)]
pub struct RoutePatterns {
    /// Captures: 1 = verb, 2 = path
    pub declaration: Regex,
}

impl RoutePatterns {
    pub fn new<S: AsRef<str>>(extra_identifiers: &[S]) -> Result<Self, LintError> {
        let mut alternatives =
            identifier_alternatives(&DEFAULT_ROUTER_IDENTIFIERS, extra_identifiers)?;
        // Any identifier ending in `Router` (apiRouter, authRouter, ...)
        alternatives.push(r"\w+Router".to_string());

        let declaration = Regex::new(&format!(
            r#"(?i)\b(?:{})\.({VERBS})\s*\(\s*['"`](.*?)['"`]\s*(?:,|\))"#,
            alternatives.join("|")
        ))?;

        Ok(Self { declaration })
    }
}

/// Patterns for the three client call shapes
#[derive(Debug, Clone)]
pub struct CallPatterns {
    /// `fetch('/path', { ..., method: 'POST' })`. Captures: 1 = path, 2 = method
    pub explicit_fetch: Regex,
    /// `fetch('/path')`, method implied GET. Captures: 1 = path
    pub implicit_fetch: Regex,
    /// `axios.post('/path', ...)`. Captures: 1 = verb, 2 = path
    pub client_call: Regex,
}

impl CallPatterns {
    pub fn new<S: AsRef<str>>(extra_identifiers: &[S]) -> Result<Self, LintError> {
        let alternatives =
            identifier_alternatives(&DEFAULT_CLIENT_IDENTIFIERS, extra_identifiers)?;

        // The options object may contain one level of nested literals (headers)
        let explicit_fetch = Regex::new(
            r#"(?i)\bfetch\s*\(\s*['"`]([^'"`]+)['"`]\s*,\s*\{(?:[^{}]|\{[^{}]*\})*?['"]?\bmethod['"]?\s*:\s*['"`](\w+)['"`]"#,
        )?;
        let implicit_fetch = Regex::new(r#"(?i)\bfetch\s*\(\s*['"`]([^'"`]+)['"`]"#)?;
        let client_call = Regex::new(&format!(
            r#"(?i)\b(?:{})\.({VERBS})\s*\(\s*['"`]([^'"`]+)['"`]"#,
            alternatives.join("|")
        ))?;

        Ok(Self {
            explicit_fetch,
            implicit_fetch,
            client_call,
        })
    }
}

/// Everything the extractors need for one run
#[derive(Debug, Clone)]
pub struct Patterns {
    pub routes: RoutePatterns,
    pub calls: CallPatterns,
}

impl Patterns {
    pub fn from_config(config: &Config) -> Result<Self, LintError> {
        let router_identifiers: Vec<&String> = config.router_identifiers.iter().collect();
        let client_identifiers: Vec<&String> = config.client_identifiers.iter().collect();

        Ok(Self {
            routes: RoutePatterns::new(&router_identifiers)?,
            calls: CallPatterns::new(&client_identifiers)?,
        })
    }
}

fn identifier_alternatives<S: AsRef<str>>(
    defaults: &[&str],
    extra: &[S],
) -> Result<Vec<String>, LintError> {
    let mut alternatives: Vec<String> = defaults.iter().map(|id| id.to_string()).collect();

    for identifier in extra {
        let identifier = identifier.as_ref();
        if !is_plain_identifier(identifier) {
            return Err(LintError::InvalidIdentifier {
                identifier: identifier.to_string(),
            });
        }
        if !alternatives.iter().any(|existing| existing == identifier) {
            alternatives.push(regex::escape(identifier));
        }
    }

    Ok(alternatives)
}

fn is_plain_identifier(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns_compile() {
        let patterns = Patterns::from_config(&Config::default()).unwrap();

        assert!(patterns.routes.declaration.is_match("app.get('/api/users', h)"));
        assert!(patterns.calls.client_call.is_match("axios.get('/api/users')"));
    }

    #[test]
    fn test_router_suffix_identifiers_match() {
        let patterns = RoutePatterns::new::<&str>(&[]).unwrap();

        assert!(patterns.declaration.is_match("apiRouter.put('/api/items/:id', h)"));
        assert!(patterns.declaration.is_match("authRouter.get('/auth/login', h)"));
        assert!(!patterns.declaration.is_match("server.get('/api/users', h)"));
        assert!(!patterns.declaration.is_match("myapp.get('/api/users', h)"));
    }

    #[test]
    fn test_extra_router_identifier() {
        let patterns = RoutePatterns::new(&["server"]).unwrap();
        assert!(patterns.declaration.is_match("server.get('/api/users', h)"));
    }

    #[test]
    fn test_extra_client_identifier() {
        let patterns = CallPatterns::new(&["apiClient"]).unwrap();

        assert!(patterns.client_call.is_match("apiClient.post('/orders', data)"));
        assert!(patterns.client_call.is_match("axios.post('/orders', data)"));
    }

    #[test]
    fn test_invalid_identifier_is_rejected() {
        let err = CallPatterns::new(&["api.client"]).unwrap_err();
        assert!(matches!(
            err,
            LintError::InvalidIdentifier { identifier } if identifier == "api.client"
        ));

        assert!(RoutePatterns::new(&["1router"]).is_err());
        assert!(RoutePatterns::new(&[""]).is_err());
    }

    #[test]
    fn test_explicit_fetch_with_nested_headers() {
        let patterns = CallPatterns::new::<&str>(&[]).unwrap();
        let source = r#"fetch('/api/users', {
            headers: { 'Content-Type': 'application/json' },
            method: 'POST',
        })"#;

        let caps = patterns.explicit_fetch.captures(source).unwrap();

        assert_eq!(&caps[1], "/api/users");
        assert_eq!(&caps[2], "POST");
    }
}
