use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::CanonicalKey;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to read {}: {source}", .path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{identifier}` is not a valid JavaScript identifier")]
    InvalidIdentifier { identifier: String },

    #[error("failed to compile extraction pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("{} is not a directory", .path.display())]
    MissingDirectory { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestError {
    #[error("no declared routes to compare {undefined_key} against")]
    EmptyCandidateSet { undefined_key: CanonicalKey },

    #[error("fuzzy matching is not available in this build")]
    MatcherUnavailable,
}
