//! C API symbol model
//!
//! Function definitions, the definition repository and consistency checks
//! for the C API header generator.
//!
//! # Overview
//!
//! The symbol layer provides:
//! - **FunctionDef / FunctionGroup**: declarative input records
//! - **DefinitionRepository**: grouped definitions with a by-name index
//! - **AbiLayout**: append-only struct field order derived from versions
//! - **ConsistencyValidator**: group-set and version-symbol checks
//!
//! # Example
//!
//! ```rust
//! use cabi_symbol::{DefinitionRepository, DefinitionSource, FunctionDef, FunctionGroup};
//! use cabi_symbol::{ConsistencyValidator, VersionEntry};
//!
//! let group = FunctionGroup::new("helpers")
//!     .with_entry(FunctionDef::new("duckdb_library_version", "const char *"));
//! let repo = DefinitionRepository::load([DefinitionSource::new("helpers.json", group)]).unwrap();
//!
//! let versions = [VersionEntry::new("v0.0.1", ["duckdb_library_version"])];
//! let layout = ConsistencyValidator::new()
//!     .validate(repo.groups(), &["helpers"], &versions, &repo)
//!     .unwrap();
//! assert_eq!(layout.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod layout;
pub mod repository;
pub mod symbol;
pub mod validation;

// Re-exports
pub use layout::{AbiLayout, LayoutError, LayoutSection, LayoutViolation};
pub use repository::{DefinitionRepository, DefinitionSource, FunctionLookup, RepositoryError};
pub use symbol::{
    ApiManifest, FunctionComment, FunctionDef, FunctionGroup, FunctionParam, VersionEntry,
    VersionRef,
};
pub use validation::{ConsistencyValidator, ValidationError};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for symbol operations
    pub use crate::{
        AbiLayout, ApiManifest, ConsistencyValidator, DefinitionRepository, DefinitionSource,
        FunctionDef, FunctionGroup, FunctionLookup, FunctionParam, VersionEntry,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
