//! Error types for the generator layer
//!
//! Provides error handling for:
//! - Ingress (definition files, manifest, template → values)
//! - Configuration loading
//! - Egress (rendered headers → files)

use cabi_render::RenderError;
use cabi_symbol::{RepositoryError, ValidationError};
use std::path::PathBuf;

/// Errors while reading input files
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Malformed record in a definition or manifest file
    #[error("invalid JSON in {path}: {message}")]
    SyntaxError { path: PathBuf, message: String },

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file exceeds the size limit
    #[error("{path} is too large: {size} bytes (max: {max})")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    /// Definition directory contains no definition files
    #[error("no definition files found under {0}")]
    NoDefinitions(PathBuf),
}

impl ParseError {
    /// Create syntax error for path
    pub fn syntax_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SyntaxError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors in the header template
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// Required mark line is absent
    #[error("template {path} is missing the mark '{mark}'")]
    MissingMark { path: PathBuf, mark: String },
}

/// Errors while writing generated headers
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// IO error during staging or write
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WriteError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors while loading `headergen.toml`
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected schema
    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config parsed but a value is unusable
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Combined generator error
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;
