use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::url_normalizer::normalize_path;

/// HTTP methods the linter understands on both sides of the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported HTTP method: {}", self.0)
    }
}

impl std::error::Error for UnknownMethod {}

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    // Case-insensitive: `get`, `Get` and `GET` are all accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// The `"METHOD /path"` string both sides are compared on.
///
/// Ordering is plain lexicographic order of the string, which is what makes
/// the sets built from it iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn new(method: HttpMethod, path: &str) -> Self {
        CanonicalKey(format!("{} {}", method, path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A route registered on the server side
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeclaredRoute {
    pub method: HttpMethod,
    pub path: String,
}

impl DeclaredRoute {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// Declared paths are taken literally and never re-normalized.
    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::new(self.method, &self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileLocation {
    pub path: PathBuf,
    /// 1-based line of the first occurrence in the file
    pub line: usize,
}

impl FileLocation {
    pub fn new(path: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    /// Path shown to the user, relative to `root` when the file lives under it
    pub fn display_relative_to(&self, root: &Path) -> String {
        self.path
            .strip_prefix(root)
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }
}

/// A client-side HTTP call found in a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedCall {
    pub method: HttpMethod,
    /// Path literal as written, interpolation spans included
    pub path: String,
    pub origin: FileLocation,
}

impl ObservedCall {
    pub fn new(method: HttpMethod, path: impl Into<String>, origin: FileLocation) -> Self {
        Self {
            method,
            path: path.into(),
            origin,
        }
    }

    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::new(self.method, &normalize_path(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!("Delete".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
        assert_eq!("PATCH".parse::<HttpMethod>(), Ok(HttpMethod::Patch));
        assert!("HEAD".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_canonical_key_format() {
        let route = DeclaredRoute::new(HttpMethod::Post, "/api/users");
        assert_eq!(route.canonical_key().as_str(), "POST /api/users");
    }

    #[test]
    fn test_declared_and_observed_keys_share_a_space() {
        let route = DeclaredRoute::new(HttpMethod::Get, "/api/items/:param");
        let call = ObservedCall::new(
            HttpMethod::Get,
            "/api/items/${item.id}",
            FileLocation::new("src/items.js", 3),
        );

        assert_eq!(route.canonical_key(), call.canonical_key());
    }

    #[test]
    fn test_declared_path_is_not_normalized() {
        let route = DeclaredRoute::new(HttpMethod::Get, "/api/items/${id}");
        assert_eq!(route.canonical_key().as_str(), "GET /api/items/${id}");
    }

    #[test]
    fn test_display_relative_to_root() {
        let location = FileLocation::new("/repo/web/src/api.js", 10);
        assert_eq!(
            location.display_relative_to(Path::new("/repo/web")),
            "src/api.js"
        );
        assert_eq!(
            location.display_relative_to(Path::new("/elsewhere")),
            "/repo/web/src/api.js"
        );
    }
}
