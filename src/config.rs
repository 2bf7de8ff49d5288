use std::{collections::BTreeSet, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LintError;

/// Name of the config file picked up from either source tree
pub const CONFIG_FILE_NAME: &str = "route-linter.json";

/// Path fragments that are never scanned
pub const DEFAULT_IGNORE_PATTERNS: [&str; 4] = ["node_modules", "dist", "build", ".next"];

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    #[serde(rename = "ignorePatterns")]
    pub ignore_patterns: BTreeSet<String>,
    #[serde(default)]
    #[serde(rename = "routerIdentifiers")]
    pub router_identifiers: BTreeSet<String>,
    #[serde(default)]
    #[serde(rename = "clientIdentifiers")]
    pub client_identifiers: BTreeSet<String>,
}

impl Config {
    // Merge every config file found into one, by set union
    pub fn new(file_paths: Vec<PathBuf>) -> Result<Self, LintError> {
        let mut merged_config = Config::default();
        for path in file_paths {
            let config_content =
                std::fs::read_to_string(&path).map_err(|source| LintError::ConfigIo {
                    path: path.clone(),
                    source,
                })?;
            let config: Config = serde_json::from_str(&config_content)
                .map_err(|source| LintError::InvalidConfig { path, source })?;

            merged_config.ignore_patterns.extend(config.ignore_patterns);
            merged_config
                .router_identifiers
                .extend(config.router_identifiers);
            merged_config
                .client_identifiers
                .extend(config.client_identifiers);
        }

        Ok(merged_config)
    }

    /// Configured ignore patterns plus the built-in ones
    pub fn effective_ignore_patterns(&self) -> Vec<String> {
        let mut patterns: BTreeSet<String> = DEFAULT_IGNORE_PATTERNS
            .iter()
            .map(|pattern| pattern.to_string())
            .collect();
        patterns.extend(self.ignore_patterns.iter().cloned());
        patterns.into_iter().collect()
    }
}
