//! Path normalization
//!
//! Client code builds request paths with template literals, so the same
//! endpoint shows up as `/users/${id}`, `/users/${user.id}` and so on. Before
//! a call path can be compared with a declared route every interpolation span
//! is collapsed to a single placeholder token:
//!
//! - `/api/users/${userId}` → `/api/users/:param`
//! - `/api/orgs/${org}/teams/${team}` → `/api/orgs/:param/teams/:param`
//!
//! Nothing else is touched. Static segments, trailing slashes, case and query
//! strings are compared exactly as written.

/// Token every interpolation span is replaced with
pub const PLACEHOLDER: &str = ":param";

/// Collapse every `${...}` span in `raw` to [`PLACEHOLDER`].
pub fn normalize_path(raw: &str) -> String {
    replace_interpolations(raw, PLACEHOLDER)
}

/// Remove every `${...}` span from `raw` without leaving a placeholder.
pub fn strip_interpolations(raw: &str) -> String {
    replace_interpolations(raw, "")
}

/// Replace each `${...}` span with `replacement`.
///
/// A span runs from `${` to the first following `}`. An opening `${` with no
/// closing brace is left as literal text.
fn replace_interpolations(raw: &str, replacement: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find("${") {
        let after_open = &rest[start + 2..];
        match after_open.find('}') {
            Some(end) => {
                result.push_str(&rest[..start]);
                result.push_str(replacement);
                rest = &after_open[end + 1..];
            }
            None => break,
        }
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_single_interpolation() {
        assert_eq!(normalize_path("/api/users/${userId}"), "/api/users/:param");
    }

    #[test]
    fn test_normalize_multiple_interpolations() {
        assert_eq!(
            normalize_path("/api/organizations/${orgId}/teams/${teamId}/members"),
            "/api/organizations/:param/teams/:param/members"
        );
    }

    #[test]
    fn test_normalize_expression_interpolation() {
        assert_eq!(
            normalize_path("/api/users/${user.id}/posts"),
            "/api/users/:param/posts"
        );
    }

    #[test]
    fn test_normalize_leaves_static_paths_alone() {
        assert_eq!(normalize_path("/api/users"), "/api/users");
        assert_eq!(normalize_path("/api/users/"), "/api/users/");
        assert_eq!(normalize_path("/API/Users"), "/API/Users");
    }

    #[test]
    fn test_normalize_keeps_query_string() {
        assert_eq!(
            normalize_path("/api/products/search?q=${query}&page=${page}"),
            "/api/products/search?q=:param&page=:param"
        );
    }

    #[test]
    fn test_normalize_does_not_rename_route_params() {
        assert_eq!(normalize_path("/api/users/:id"), "/api/users/:id");
    }

    #[test]
    fn test_normalize_unterminated_interpolation() {
        assert_eq!(normalize_path("/api/users/${id"), "/api/users/${id");
        assert_eq!(
            normalize_path("/api/${a}/users/${id"),
            "/api/:param/users/${id"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let paths = [
            "/api/users",
            "/api/users/${id}",
            "${base}/api/${a}${b}",
            "/auth/verify-email?token=${token}",
            "/api/${",
            "",
        ];

        for path in paths {
            let once = normalize_path(path);
            assert_eq!(normalize_path(&once), once, "not idempotent for {path}");
        }
    }

    #[test]
    fn test_strip_interpolations() {
        assert_eq!(strip_interpolations("${API_URL}/api/users"), "/api/users");
        assert_eq!(strip_interpolations("/api/users/${id}"), "/api/users/");
    }
}
