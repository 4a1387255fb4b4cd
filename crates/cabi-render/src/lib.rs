//! C API header rendering
//!
//! Renders the public header and the extension header from validated
//! function definitions.
//!
//! # Architecture
//!
//! ```text
//! FunctionDef ──► DeclarationRenderer ──┬─► HeaderAssembler ───────────► public header
//!                                       ├─► AbiStructBuilder ─┐
//! VersionEntry ──► AbiLayout ───────────┘                     └─► ExtensionHeaderAssembler ─► extension header
//! ```
//!
//! Every renderer borrows a [`RenderConfig`] and is a pure function of its
//! inputs, so rendering the same definitions twice yields identical bytes.
//!
//! # Example
//!
//! ```rust
//! use cabi_render::{DeclarationRenderer, RenderConfig};
//! use cabi_symbol::FunctionDef;
//!
//! let config = RenderConfig::new().with_api_prefix("");
//! let f = FunctionDef::new("duckdb_close", "void").with_param("duckdb_database *", "database");
//!
//! assert_eq!(
//!     DeclarationRenderer::new(&config).declaration(&f),
//!     "void duckdb_close(duckdb_database *database);"
//! );
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod abi_struct;
pub mod config;
pub mod declaration;
pub mod error;
pub mod extension;
pub mod header;

// Re-exports for convenience
pub use abi_struct::AbiStructBuilder;
pub use config::{BootstrapMacros, DeprecationGuard, DocPolicy, RenderConfig};
pub use declaration::DeclarationRenderer;
pub use error::{RenderError, RenderResult};
pub use extension::ExtensionHeaderAssembler;
pub use header::{banner_title, HeaderAssembler};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for rendering headers
    pub use crate::{
        AbiStructBuilder, DeclarationRenderer, DocPolicy, ExtensionHeaderAssembler,
        HeaderAssembler, RenderConfig, RenderError,
    };
    pub use cabi_symbol::{AbiLayout, FunctionDef, FunctionGroup, FunctionLookup, VersionEntry};
}
