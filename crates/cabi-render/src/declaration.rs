//! Declaration rendering
//!
//! Turns one [`FunctionDef`] into the fragments the headers are built from:
//! the public declaration, its doc comment, the table field and the
//! redirect macro. Every operation is a pure function of the definition and
//! the configuration.

use crate::config::{DocPolicy, RenderConfig};
use crate::error::{RenderError, RenderResult};
use cabi_symbol::{FunctionDef, FunctionParam};

/// Renders single-function fragments
#[derive(Debug, Clone, Copy)]
pub struct DeclarationRenderer<'a> {
    config: &'a RenderConfig,
}

impl<'a> DeclarationRenderer<'a> {
    /// Create renderer over a configuration
    #[inline]
    #[must_use]
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Public declaration: `[PREFIX ]RET[ ]NAME(T N, ...);`
    #[must_use]
    pub fn declaration(&self, function: &FunctionDef) -> String {
        let mut out = String::new();
        if !self.config.api_prefix.is_empty() {
            out.push_str(&self.config.api_prefix);
            out.push(' ');
        }
        push_typed(&mut out, &function.return_type, &function.name);
        out.push('(');
        push_params(&mut out, &function.params);
        out.push_str(");");
        out
    }

    /// Block doc comment, empty when the function has no comment
    ///
    /// # Errors
    /// Under [`DocPolicy::Strict`], returns
    /// [`RenderError::MissingParamComment`] for the first parameter without
    /// an entry in `param_comments`.
    pub fn doc(&self, function: &FunctionDef) -> RenderResult<String> {
        let Some(comment) = &function.comment else {
            return Ok(String::new());
        };

        let mut out = String::from("/*!\n");
        out.push_str(&comment.description);
        if !comment.description.ends_with('\n') {
            out.push('\n');
        }

        for param in &function.params {
            match comment.param_comments.get(&param.name) {
                Some(text) => {
                    out.push_str("* ");
                    out.push_str(&param.name);
                    out.push_str(": ");
                    out.push_str(text);
                    out.push('\n');
                }
                None if self.config.doc_policy == DocPolicy::Strict => {
                    return Err(RenderError::MissingParamComment {
                        function: function.name.clone(),
                        param: param.name.clone(),
                    });
                }
                None => {}
            }
        }

        if let Some(ret) = &comment.return_value {
            out.push_str("* returns: ");
            out.push_str(ret);
            out.push('\n');
        }
        out.push_str("*/\n");
        Ok(out)
    }

    /// Table field: `RET (*NAME)(T N, ...);`
    #[must_use]
    pub fn struct_member(&self, function: &FunctionDef) -> String {
        let mut out = format!("{} (*{})(", function.return_type, function.name);
        push_params(&mut out, &function.params);
        out.push_str(");");
        out
    }

    /// Redirect macro: `#define NAME PTR->NAME`
    #[must_use]
    pub fn redirect_macro(&self, function: &FunctionDef) -> String {
        format!(
            "#define {name} {ptr}->{name}",
            name = function.name,
            ptr = self.config.pointer_name
        )
    }
}

/// Append `ty` and `name`, with a space only if `ty` does not end in `*`
pub(crate) fn push_typed(out: &mut String, ty: &str, name: &str) {
    out.push_str(ty);
    if !ty.ends_with('*') {
        out.push(' ');
    }
    out.push_str(name);
}

fn push_params(out: &mut String, params: &[FunctionParam]) {
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        push_typed(out, &param.ty, &param.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabi_symbol::FunctionComment;

    fn bare() -> RenderConfig {
        RenderConfig::new().with_api_prefix("")
    }

    fn open_fn() -> FunctionDef {
        FunctionDef::new("duckdb_open", "duckdb_state")
            .with_param("const char *", "path")
            .with_param("duckdb_database *", "out_database")
    }

    #[test]
    fn declaration_zero_params() {
        let config = bare();
        let renderer = DeclarationRenderer::new(&config);
        let f = FunctionDef::new("get_version", "const char *");

        assert_eq!(renderer.declaration(&f), "const char *get_version();");
    }

    #[test]
    fn declaration_pointer_spacing() {
        let config = bare();
        let renderer = DeclarationRenderer::new(&config);

        assert_eq!(
            renderer.declaration(&open_fn()),
            "duckdb_state duckdb_open(const char *path, duckdb_database *out_database);"
        );
    }

    #[test]
    fn declaration_with_prefix() {
        let config = RenderConfig::new();
        let renderer = DeclarationRenderer::new(&config);
        let f = FunctionDef::new("duckdb_vector_size", "idx_t");

        assert_eq!(
            renderer.declaration(&f),
            "DUCKDB_API idx_t duckdb_vector_size();"
        );
    }

    #[test]
    fn doc_absent_comment_is_empty() {
        let config = bare();
        let renderer = DeclarationRenderer::new(&config);

        assert_eq!(renderer.doc(&open_fn()).unwrap(), "");
    }

    #[test]
    fn doc_full_comment() {
        let config = bare();
        let renderer = DeclarationRenderer::new(&config);
        let f = open_fn().with_comment(
            FunctionComment::new("Opens a database.\n")
                .with_param("path", "Path to the database file.")
                .with_param("out_database", "The result database object.")
                .with_return("`DuckDBSuccess` on success."),
        );

        assert_eq!(
            renderer.doc(&f).unwrap(),
            "/*!\n\
             Opens a database.\n\
             * path: Path to the database file.\n\
             * out_database: The result database object.\n\
             * returns: `DuckDBSuccess` on success.\n\
             */\n"
        );
    }

    #[test]
    fn doc_permissive_skips_uncommented_param() {
        let config = bare();
        let renderer = DeclarationRenderer::new(&config);
        let f = open_fn().with_comment(FunctionComment::new("Opens.").with_param("path", "file"));

        let doc = renderer.doc(&f).unwrap();
        assert!(doc.contains("* path: file\n"));
        assert!(!doc.contains("out_database"));
    }

    #[test]
    fn doc_strict_rejects_uncommented_param() {
        let config = bare().with_doc_policy(DocPolicy::Strict);
        let renderer = DeclarationRenderer::new(&config);
        let f = open_fn().with_comment(FunctionComment::new("Opens.").with_param("path", "file"));

        assert_eq!(
            renderer.doc(&f).unwrap_err(),
            RenderError::MissingParamComment {
                function: "duckdb_open".to_string(),
                param: "out_database".to_string(),
            }
        );
    }

    #[test]
    fn struct_member_keeps_param_names() {
        let config = bare();
        let renderer = DeclarationRenderer::new(&config);

        assert_eq!(
            renderer.struct_member(&open_fn()),
            "duckdb_state (*duckdb_open)(const char *path, duckdb_database *out_database);"
        );
        assert_eq!(
            renderer.struct_member(&FunctionDef::new("get_version", "const char *")),
            "const char * (*get_version)();"
        );
    }

    #[test]
    fn redirect_macro_uses_pointer_name() {
        let config = RenderConfig::new();
        let renderer = DeclarationRenderer::new(&config);

        assert_eq!(
            renderer.redirect_macro(&open_fn()),
            "#define duckdb_open duckdb_ext_api->duckdb_open"
        );
    }
}
