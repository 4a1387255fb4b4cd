//! Function-pointer table rendering
//!
//! The table is laid out version by version in manifest order, so every
//! field published by an older version keeps its offset when a newer
//! version is appended.

use crate::config::RenderConfig;
use crate::declaration::DeclarationRenderer;
use crate::error::{RenderError, RenderResult};
use cabi_symbol::{AbiLayout, FunctionLookup, VersionEntry};

/// Builds the ABI struct and its default-instance constructor
#[derive(Debug, Clone, Copy)]
pub struct AbiStructBuilder<'a> {
    config: &'a RenderConfig,
}

impl<'a> AbiStructBuilder<'a> {
    /// Create builder over a configuration
    #[inline]
    #[must_use]
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Struct definition for a version manifest
    ///
    /// # Errors
    /// Fails when the versions break the append-only layout or reference
    /// an undefined function.
    pub fn build_struct<L>(&self, versions: &[VersionEntry], lookup: &L) -> RenderResult<String>
    where
        L: FunctionLookup + ?Sized,
    {
        let layout = AbiLayout::from_versions(versions)?;
        self.render_layout(&layout, lookup)
    }

    /// Struct definition for an already computed layout
    pub fn render_layout<L>(&self, layout: &AbiLayout, lookup: &L) -> RenderResult<String>
    where
        L: FunctionLookup + ?Sized,
    {
        let renderer = DeclarationRenderer::new(self.config);
        let mut out = String::from("typedef struct {\n");

        for section in layout.sections() {
            out.push_str("    // Version ");
            out.push_str(&section.version);
            out.push('\n');

            for name in &section.fields {
                let function = lookup.lookup(name).ok_or_else(|| RenderError::UnknownSymbol {
                    name: name.clone(),
                    version: section.version.clone(),
                })?;
                out.push_str("    ");
                out.push_str(&renderer.struct_member(function));
                out.push('\n');
            }
        }

        out.push_str("} ");
        out.push_str(&self.config.struct_name);
        out.push_str(";\n\n");
        Ok(out)
    }

    /// Constructor returning a table populated with every field, in struct order
    #[must_use]
    pub fn build_default_instance(&self, layout: &AbiLayout) -> String {
        let mut out = format!(
            "inline {} {}() {{\n    return {{\n",
            self.config.struct_name, self.config.create_fn
        );
        for field in layout.fields() {
            out.push_str("        ");
            out.push_str(field);
            out.push_str(",\n");
        }
        out.push_str("    };\n}\n\n");
        out
    }
}
