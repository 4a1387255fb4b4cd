//! Extension header assembly
//!
//! Emits the ABI struct, one redirect macro per function so extension code
//! keeps calling the plain C names, and the bootstrap macros that install
//! the table pointer. Groups are emitted in stored order; the canonical
//! order only governs the public header.

use crate::abi_struct::AbiStructBuilder;
use crate::config::RenderConfig;
use crate::declaration::DeclarationRenderer;
use crate::error::RenderResult;
use cabi_symbol::{FunctionGroup, FunctionLookup, VersionEntry};
use std::convert::Infallible;

/// Assembles the extension header body
#[derive(Debug, Clone, Copy)]
pub struct ExtensionHeaderAssembler<'a> {
    config: &'a RenderConfig,
}

impl<'a> ExtensionHeaderAssembler<'a> {
    /// Create assembler over a configuration
    #[inline]
    #[must_use]
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Full extension header body
    ///
    /// # Errors
    /// Propagates struct rendering failures.
    pub fn assemble<L>(
        &self,
        groups: &[FunctionGroup],
        versions: &[VersionEntry],
        lookup: &L,
    ) -> RenderResult<String>
    where
        L: FunctionLookup + ?Sized,
    {
        let mut out = AbiStructBuilder::new(self.config).build_struct(versions, lookup)?;
        out.push_str("\n\n");
        out.push_str(&self.redirect_macros(groups));
        out.push_str(&self.bootstrap_macros());
        Ok(out)
    }

    /// Per-group redirect macros with deprecation guards
    #[must_use]
    pub fn redirect_macros(&self, groups: &[FunctionGroup]) -> String {
        let renderer = DeclarationRenderer::new(self.config);
        let guard = &self.config.guard;
        let mut out = String::new();

        for group in groups {
            out.push_str("//! ");
            out.push_str(&group.group);
            out.push('\n');

            guard
                .wrap::<Infallible>(&mut out, group.deprecated, |out| {
                    for function in &group.entries {
                        guard.wrap::<Infallible>(out, function.deprecated, |out| {
                            out.push_str(&renderer.redirect_macro(function));
                            out.push('\n');
                            Ok(())
                        })?;
                    }
                    Ok(())
                })
                .unwrap_or_else(|never| match never {});
            out.push('\n');
        }

        out
    }

    /// The three fixed macros that install the table pointer
    #[must_use]
    pub fn bootstrap_macros(&self) -> String {
        let RenderConfig {
            struct_name,
            pointer_name,
            bootstrap,
            ..
        } = self.config;

        format!(
            "// Place in global scope of C/C++ file that contains the `init` function\n\
             #define {main} const {struct_name} *{pointer_name} = 0;\n\
             // First line in the `init` function should load the api struct using this function\n\
             #define {load}(v) {pointer_name} = v;\n\
             // Place in global scope of any C/C++ file that needs to access the extension API\n\
             #define {extern_decl} extern const {struct_name} *{pointer_name};\n",
            main = bootstrap.main,
            load = bootstrap.load_api,
            extern_decl = bootstrap.extern_decl,
        )
    }
}
