//! Rendering configuration
//!
//! Names, guard tokens and the documentation policy shared by every
//! assembler. Defaults reproduce the DuckDB C API headers.

use serde::{Deserialize, Serialize};

/// Conditional-compilation markers around deprecated declarations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecationGuard {
    /// Opening line, e.g. `#ifndef DUCKDB_API_NO_DEPRECATED`
    pub start: String,

    /// Closing line, e.g. `#endif`
    pub end: String,
}

impl DeprecationGuard {
    /// Create guard from its two marker lines
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Run `body` inside a guard pair when `active`
    pub(crate) fn wrap<E>(
        &self,
        out: &mut String,
        active: bool,
        body: impl FnOnce(&mut String) -> Result<(), E>,
    ) -> Result<(), E> {
        if active {
            out.push_str(&self.start);
            out.push('\n');
        }
        body(out)?;
        if active {
            out.push_str(&self.end);
            out.push('\n');
        }
        Ok(())
    }
}

impl Default for DeprecationGuard {
    fn default() -> Self {
        Self::new("#ifndef DUCKDB_API_NO_DEPRECATED", "#endif")
    }
}

/// What to do with a parameter that has no comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocPolicy {
    /// Skip the parameter line
    #[default]
    Permissive,

    /// Fail with `MissingParamComment`
    Strict,
}

impl DocPolicy {
    /// Policy from an "allow uncommented params" flag
    #[inline]
    #[must_use]
    pub fn from_allow_uncommented(allow: bool) -> Self {
        if allow {
            Self::Permissive
        } else {
            Self::Strict
        }
    }
}

/// Names of the three bootstrap macros in the extension header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapMacros {
    /// Defines the table pointer in the `init` translation unit
    pub main: String,

    /// Assigns the table pointer from the `init` argument
    pub load_api: String,

    /// Declares the table pointer in other translation units
    pub extern_decl: String,
}

impl Default for BootstrapMacros {
    fn default() -> Self {
        Self {
            main: "DUCKDB_EXTENSION_MAIN".to_string(),
            load_api: "DUCKDB_EXTENSION_LOAD_API".to_string(),
            extern_decl: "DUCKDB_EXTENSION_EXTERN".to_string(),
        }
    }
}

/// Configuration shared by the renderer and the assemblers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Prefix of public declarations; empty for none
    pub api_prefix: String,

    /// Type name of the function-pointer table
    pub struct_name: String,

    /// Name of the global table pointer used by redirect macros
    pub pointer_name: String,

    /// Name of the default-instance constructor
    pub create_fn: String,

    /// Deprecation guard markers
    pub guard: DeprecationGuard,

    /// Parameter documentation policy
    pub doc_policy: DocPolicy,

    /// Bootstrap macro names
    pub bootstrap: BootstrapMacros,
}

impl RenderConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With declaration prefix
    #[must_use]
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// With struct and pointer names
    #[must_use]
    pub fn with_table_names(
        mut self,
        struct_name: impl Into<String>,
        pointer_name: impl Into<String>,
    ) -> Self {
        self.struct_name = struct_name.into();
        self.pointer_name = pointer_name.into();
        self
    }

    /// With guard markers
    #[must_use]
    pub fn with_guard(mut self, guard: DeprecationGuard) -> Self {
        self.guard = guard;
        self
    }

    /// With documentation policy
    #[must_use]
    pub fn with_doc_policy(mut self, policy: DocPolicy) -> Self {
        self.doc_policy = policy;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            api_prefix: "DUCKDB_API".to_string(),
            struct_name: "duckdb_ext_api_v0".to_string(),
            pointer_name: "duckdb_ext_api".to_string(),
            create_fn: "CreateApi".to_string(),
            guard: DeprecationGuard::default(),
            doc_policy: DocPolicy::default(),
            bootstrap: BootstrapMacros::default(),
        }
    }
}
