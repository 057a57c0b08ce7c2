//! Errors raised while reading plugin files.
//!
//! None of these escape [`crate::load`]; the loader turns each one into an
//! error node titled with the offending path.

use std::path::PathBuf;

use thiserror::Error;

/// A file that could not be turned into data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No file matches the path, with or without a known extension.
    #[error("Can't find file.")]
    FileNotFound {
        /// The path or mask that was looked up.
        path: PathBuf,
    },

    /// The file exists but its extension has no parser.
    #[error("unsupported file format {path}, expected one of: {allowed}")]
    UnsupportedFormat {
        /// The rejected file.
        path: PathBuf,
        /// Comma-separated list of accepted extensions.
        allowed: String,
    },

    /// YAML syntax error.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        /// The file being parsed.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_yaml::Error,
    },

    /// JSON syntax error.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        /// The file being parsed.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_json::Error,
    },

    /// A `*`, `?` or `[` mask that is not a valid glob pattern.
    #[error("invalid file mask {pattern:?}: {source}")]
    InvalidGlob {
        /// The rejected mask.
        pattern: String,
        /// Underlying pattern error.
        source: glob::PatternError,
    },

    /// Reading the file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Convenience alias for loader results.
pub type LoadResult<T> = Result<T, LoadError>;
