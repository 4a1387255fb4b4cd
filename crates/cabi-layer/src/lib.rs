//! C API Generator Layer
//!
//! The boundary between the file system and the in-memory generator.
//!
//! # Core Operations
//!
//! - **Ingress**: Read definition files, the version manifest and the header template
//! - **Assemble**: Validate and render both headers in memory
//! - **Egress**: Write both headers once assembly has succeeded
//!
//! # Architecture
//!
//! ```text
//! headergen.toml → GeneratorConfig
//!                        ↓
//! functions/**/*.json → GroupParser → DefinitionRepository ─┐
//! extension_api.json  → ManifestParser → ApiManifest ───────┼→ assemble → GeneratedHeaders → egress → files
//! header_base.hpp     → HeaderTemplate ─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use cabi_layer::GeneratorLayer;
//!
//! # fn example() -> Result<(), cabi_layer::GeneratorError> {
//! let layer = GeneratorLayer::from_config_file("headergen.toml")?;
//!
//! // Validate and render without touching the outputs
//! let headers = layer.check()?;
//! println!("{} struct fields", headers.layout.len());
//!
//! // Write both headers
//! layer.egress(&headers)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod config;
pub mod error;
pub mod layer;
pub mod parsers;
pub mod template;

// Re-exports for convenience
pub use config::GeneratorConfig;
pub use error::{
    ConfigError, GeneratorError, GeneratorResult, ParseError, TemplateError, WriteError,
};
pub use layer::{GeneratedHeaders, GeneratorLayer, LoadedApi};
pub use template::{file_banner, HeaderTemplate, TemplateMarks};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the generator layer
    pub use crate::config::GeneratorConfig;
    pub use crate::error::{GeneratorError, GeneratorResult};
    pub use crate::layer::{GeneratedHeaders, GeneratorLayer, LoadedApi};
    pub use crate::parsers::{GroupParser, ManifestParser, SourceParser};
    pub use crate::template::HeaderTemplate;
    pub use cabi_render::RenderConfig;
    pub use cabi_symbol::{AbiLayout, ApiManifest, DefinitionRepository};
}
