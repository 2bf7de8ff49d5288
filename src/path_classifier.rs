use crate::url_normalizer::strip_interpolations;

/// Decide whether a call path targets the local API surface.
///
/// Only paths that look like API routes are kept: `/api` and `/auth`
/// prefixes or segments, `/graphql`, version prefixes such as `/v1/`, and the
/// slash-less `api/` and `auth/` forms. Absolute `http://` and `https://` URLs
/// are never local, whatever their path looks like. Everything else (static
/// assets, page routes) is rejected.
pub fn is_api_path(raw: &str) -> bool {
    let path = strip_interpolations(raw);

    if path.starts_with("http://") || path.starts_with("https://") {
        return false;
    }

    path.starts_with("/api")
        || path.contains("/api/")
        || path.starts_with("/auth")
        || path.contains("/auth/")
        || path.starts_with("/graphql")
        || has_version_prefix(&path)
        || path.starts_with("api/")
        || path.starts_with("auth/")
}

// `/v<digits>/`
fn has_version_prefix(path: &str) -> bool {
    let Some(rest) = path.strip_prefix("/v") else {
        return false;
    };
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && rest[digits..].starts_with('/')
}
