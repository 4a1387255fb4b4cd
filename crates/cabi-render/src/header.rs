//! Public header assembly
//!
//! Emits the declarations group by group in the canonical order, then the
//! ABI struct and its default-instance constructor.

use crate::abi_struct::AbiStructBuilder;
use crate::config::RenderConfig;
use crate::declaration::DeclarationRenderer;
use crate::error::{RenderError, RenderResult};
use cabi_symbol::{AbiLayout, FunctionGroup, FunctionLookup, VersionEntry};

const BANNER_RULE: &str = "//===--------------------------------------------------------------------===//";

/// Assembles the public header body
#[derive(Debug, Clone, Copy)]
pub struct HeaderAssembler<'a> {
    config: &'a RenderConfig,
}

impl<'a> HeaderAssembler<'a> {
    /// Create assembler over a configuration
    #[inline]
    #[must_use]
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Full header body: declarations, ABI struct, default instance
    ///
    /// # Errors
    /// Propagates [`RenderError`] from declaration and struct rendering.
    pub fn assemble<S, L>(
        &self,
        groups: &[FunctionGroup],
        canonical_order: &[S],
        versions: &[VersionEntry],
        lookup: &L,
    ) -> RenderResult<String>
    where
        S: AsRef<str>,
        L: FunctionLookup + ?Sized,
    {
        let layout = AbiLayout::from_versions(versions)?;
        let builder = AbiStructBuilder::new(self.config);

        let mut out = self.assemble_declarations(groups, canonical_order)?;
        out.push_str("\n\n");
        out.push_str(&builder.render_layout(&layout, lookup)?);
        out.push_str(&builder.build_default_instance(&layout));
        Ok(out)
    }

    /// Grouped declarations in canonical order
    ///
    /// # Errors
    /// - [`RenderError::UnknownGroup`] when the order names an absent group
    /// - [`RenderError::MissingParamComment`] under the strict doc policy
    pub fn assemble_declarations<S: AsRef<str>>(
        &self,
        groups: &[FunctionGroup],
        canonical_order: &[S],
    ) -> RenderResult<String> {
        let renderer = DeclarationRenderer::new(self.config);
        let guard = &self.config.guard;
        let mut remaining: Vec<&FunctionGroup> = groups.iter().collect();
        let mut out = String::new();

        for key in canonical_order.iter().map(|key| key.as_ref()) {
            let idx = remaining
                .iter()
                .position(|g| g.group == key)
                .ok_or_else(|| RenderError::UnknownGroup {
                    group: key.to_string(),
                })?;
            let group = remaining.remove(idx);

            out.push_str(BANNER_RULE);
            out.push_str("\n// ");
            out.push_str(&banner_title(&group.group));
            out.push('\n');
            out.push_str(BANNER_RULE);
            out.push_str("\n\n");

            if let Some(description) = &group.description {
                out.push_str(description);
                out.push('\n');
            }

            guard.wrap(&mut out, group.deprecated, |out| {
                for function in &group.entries {
                    guard.wrap(out, function.deprecated, |out| {
                        out.push_str(&renderer.doc(function)?);
                        out.push_str(&renderer.declaration(function));
                        out.push('\n');
                        Ok::<_, RenderError>(())
                    })?;
                    out.push('\n');
                }
                Ok::<_, RenderError>(())
            })?;
        }

        Ok(out)
    }
}

/// Group key as space-separated capitalised words: `open_connect` -> `Open Connect`
#[must_use]
pub fn banner_title(key: &str) -> String {
    key.to_lowercase()
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabi_symbol::FunctionDef;

    fn bare() -> RenderConfig {
        RenderConfig::new().with_api_prefix("")
    }

    #[test]
    fn banner_title_capitalises_words() {
        assert_eq!(banner_title("open_connect"), "Open Connect");
        assert_eq!(banner_title("date_time_timestamp_helpers"), "Date Time Timestamp Helpers");
        assert_eq!(banner_title("Helpers"), "Helpers");
    }

    #[test]
    fn single_helper_scenario() {
        let config = bare();
        let assembler = HeaderAssembler::new(&config);
        let groups = [FunctionGroup::new("helpers")
            .with_entry(FunctionDef::new("get_version", "const char *"))];

        let out = assembler.assemble_declarations(&groups, &["helpers"]).unwrap();

        let declarations: Vec<_> = out.lines().filter(|l| l.contains("get_version")).collect();
        assert_eq!(declarations, ["const char *get_version();"]);
        assert!(!out.contains("#ifndef"));
        assert!(!out.contains("/*!"));
    }

    #[test]
    fn single_helper_scenario_with_default_prefix() {
        let config = RenderConfig::new();
        let assembler = HeaderAssembler::new(&config);
        let groups = [FunctionGroup::new("helpers")
            .with_entry(FunctionDef::new("get_version", "const char *"))];

        let out = assembler.assemble_declarations(&groups, &["helpers"]).unwrap();

        let declarations: Vec<_> = out.lines().filter(|l| l.contains("get_version")).collect();
        assert_eq!(declarations, ["DUCKDB_API const char *get_version();"]);
    }

    #[test]
    fn groups_follow_canonical_order() {
        let config = bare();
        let assembler = HeaderAssembler::new(&config);
        let groups = [
            FunctionGroup::new("zeta").with_entry(FunctionDef::new("z", "void")),
            FunctionGroup::new("alpha").with_entry(FunctionDef::new("a", "void")),
        ];

        let out = assembler
            .assemble_declarations(&groups, &["alpha", "zeta"])
            .unwrap();
        assert!(out.find("// Alpha").unwrap() < out.find("// Zeta").unwrap());
    }

    #[test]
    fn unknown_group_in_order_fails() {
        let config = bare();
        let assembler = HeaderAssembler::new(&config);
        let groups = [FunctionGroup::new("alpha")];

        assert_eq!(
            assembler
                .assemble_declarations(&groups, &["alpha", "beta"])
                .unwrap_err(),
            RenderError::UnknownGroup {
                group: "beta".to_string()
            }
        );
    }

    #[test]
    fn group_listed_twice_fails_second_time() {
        let config = bare();
        let assembler = HeaderAssembler::new(&config);
        let groups = [FunctionGroup::new("alpha")];

        assert!(matches!(
            assembler.assemble_declarations(&groups, &["alpha", "alpha"]),
            Err(RenderError::UnknownGroup { .. })
        ));
    }

    #[test]
    fn description_follows_banner() {
        let config = bare();
        let assembler = HeaderAssembler::new(&config);
        let groups = [FunctionGroup::new("appender").with_description("// Appenders are fast.")];

        let out = assembler.assemble_declarations(&groups, &["appender"]).unwrap();
        assert!(out.contains("// Appender\n"));
        assert!(out.contains("===//\n\n// Appenders are fast.\n"));
    }

    #[test]
    fn full_header_ends_with_struct_and_constructor() {
        let config = bare();
        let assembler = HeaderAssembler::new(&config);
        let groups = [FunctionGroup::new("helpers")
            .with_entry(FunctionDef::new("get_version", "const char *"))];
        let versions = [VersionEntry::new("v1", ["get_version"])];
        let lookup: indexmap::IndexMap<String, FunctionDef> = groups[0]
            .entries
            .iter()
            .map(|f| (f.name.clone(), f.clone()))
            .collect();

        let out = assembler
            .assemble(&groups, &["helpers"], &versions, &lookup)
            .unwrap();

        let decl = out.find("const char *get_version();").unwrap();
        let table = out.find("typedef struct {").unwrap();
        let ctor = out.find("CreateApi()").unwrap();
        assert!(decl < table && table < ctor);
    }
}
