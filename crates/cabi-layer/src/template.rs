//! Header template and file banner
//!
//! A template is a C header whose text before the start mark is dropped and
//! whose content mark line is replaced by the generated body. Both marks are
//! whole lines including their newline.

use crate::error::TemplateError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const FILE_RULE: &str = "//===----------------------------------------------------------------------===//";

/// Mark lines recognised in a header template
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplateMarks {
    /// Everything up to and including this line is dropped
    pub start: String,

    /// This line is replaced by the generated body
    pub content: String,
}

impl Default for TemplateMarks {
    fn default() -> Self {
        Self {
            start: "// DUCKDB_START_OF_HEADER".to_string(),
            content: "// DUCKDB_FUNCTIONS_ARE_GENERATED_HERE".to_string(),
        }
    }
}

/// A parsed header template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
    before: String,
    after: String,
}

impl HeaderTemplate {
    /// Template that emits the body unchanged
    #[inline]
    #[must_use]
    pub fn passthrough() -> Self {
        Self {
            before: String::new(),
            after: String::new(),
        }
    }

    /// Split template text around its marks
    ///
    /// # Errors
    /// [`TemplateError::MissingMark`] when either mark line is absent.
    pub fn parse(
        path: impl Into<PathBuf>,
        content: &str,
        marks: &TemplateMarks,
    ) -> Result<Self, TemplateError> {
        let path = path.into();
        let start = format!("{}\n", marks.start);
        let insert = format!("{}\n", marks.content);

        // templates checked out with CRLF line endings
        let content = content.replace("\r\n", "\n");
        let kept = content
            .find(&start)
            .map(|idx| &content[idx + start.len()..])
            .ok_or_else(|| TemplateError::MissingMark {
                path: path.clone(),
                mark: marks.start.clone(),
            })?;

        let (before, after) = kept
            .split_once(&insert)
            .ok_or_else(|| TemplateError::MissingMark {
                path,
                mark: marks.content.clone(),
            })?;

        Ok(Self {
            before: before.to_string(),
            after: after.to_string(),
        })
    }

    /// File text: banner, template head, body, template tail
    #[must_use]
    pub fn render(&self, banner: &str, body: &str) -> String {
        let mut out =
            String::with_capacity(banner.len() + self.before.len() + body.len() + self.after.len());
        out.push_str(banner);
        out.push_str(&self.before);
        out.push_str(body);
        out.push_str(&self.after);
        out
    }
}

impl Default for HeaderTemplate {
    fn default() -> Self {
        Self::passthrough()
    }
}

/// Banner naming the project and output file
#[must_use]
pub fn file_banner(project: &str, output: &Path) -> String {
    let file_name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!(
        "{FILE_RULE}\n\
         //\n\
         //                         {project}\n\
         //\n\
         // {file_name}\n\
         //\n\
         //\n\
         {FILE_RULE}\n"
    )
}
