//! Static cross-referencing of server route declarations against client API calls.

pub mod analyzer;
pub mod call_extractor;
pub mod config;
pub mod engine;
pub mod error;
pub mod file_finder;
pub mod formatter;
pub mod model;
pub mod path_classifier;
pub mod patterns;
pub mod route_extractor;
pub mod suggest;
pub mod url_normalizer;
