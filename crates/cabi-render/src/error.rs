//! Error types for header rendering

use cabi_symbol::LayoutError;

/// Errors raised while rendering declarations or assembling headers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Canonical order names a group that is not loaded
    #[error("canonical order names unknown group '{group}'")]
    UnknownGroup { group: String },

    /// Strict documentation policy found an undocumented parameter
    #[error("function '{function}' has no comment for parameter '{param}'")]
    MissingParamComment { function: String, param: String },

    /// Struct field has no function definition
    #[error("struct field '{name}' of version {version} has no definition")]
    UnknownSymbol { name: String, version: String },

    /// Version manifest breaks the append-only layout
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Result type alias for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
