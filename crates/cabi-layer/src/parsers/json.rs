//! JSON definition and manifest parsers
//!
//! Uses serde_json to read function groups and the version manifest.

use crate::error::ParseError;
use crate::parsers::SourceParser;
use cabi_symbol::{ApiManifest, DefinitionSource, FunctionGroup};
use std::path::Path;

/// Parser for one function-group definition file
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupParser;

impl GroupParser {
    /// Create new group parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for GroupParser {
    type Output = DefinitionSource;

    fn parse(&self, origin: &Path, content: &str) -> Result<Self::Output, ParseError> {
        let group: FunctionGroup = serde_json::from_str(content)
            .map_err(|e| ParseError::syntax_error(origin, e.to_string()))?;

        tracing::debug!(
            origin = %origin.display(),
            group = %group.group,
            entries = group.entries.len(),
            "parsed function group"
        );
        Ok(DefinitionSource::new(origin.display().to_string(), group))
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }
}

/// Parser for the version manifest
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestParser;

impl ManifestParser {
    /// Create new manifest parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for ManifestParser {
    type Output = ApiManifest;

    fn parse(&self, origin: &Path, content: &str) -> Result<Self::Output, ParseError> {
        let manifest: ApiManifest = serde_json::from_str(content)
            .map_err(|e| ParseError::syntax_error(origin, e.to_string()))?;

        tracing::debug!(
            origin = %origin.display(),
            versions = manifest.version_entries.len(),
            "parsed version manifest"
        );
        Ok(manifest)
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }
}
