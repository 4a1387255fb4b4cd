//! Consistency validation
//!
//! Checks the loaded groups against the canonical group order and the
//! version manifest against the defined symbols before anything is rendered.

use crate::layout::{AbiLayout, LayoutError};
use crate::repository::FunctionLookup;
use crate::symbol::{FunctionGroup, VersionEntry};
use std::collections::HashSet;

/// Cross-checks groups, canonical order and versions
///
/// Stateless; every check is a pure function of its inputs.
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyValidator;

impl ConsistencyValidator {
    /// Create new validator instance
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run every check
    ///
    /// # Returns
    /// - `Ok(layout)` with the struct layout the versions describe
    /// - `Err(ValidationError)` for the first failed check
    pub fn validate<S, L>(
        &self,
        groups: &[FunctionGroup],
        canonical_order: &[S],
        versions: &[VersionEntry],
        lookup: &L,
    ) -> Result<AbiLayout, ValidationError>
    where
        S: AsRef<str>,
        L: FunctionLookup + ?Sized,
    {
        self.validate_group_set(groups, canonical_order)?;
        self.validate_version_symbols(versions, lookup)?;
        let layout = AbiLayout::from_versions(versions)?;

        tracing::debug!(
            groups = groups.len(),
            versions = versions.len(),
            fields = layout.len(),
            "definitions are consistent"
        );
        Ok(layout)
    }

    /// Group keys must equal the canonical order exactly
    pub fn validate_group_set<S: AsRef<str>>(
        &self,
        groups: &[FunctionGroup],
        canonical_order: &[S],
    ) -> Result<(), ValidationError> {
        let present: HashSet<&str> = groups.iter().map(|g| g.group.as_str()).collect();

        let mut ordered = HashSet::with_capacity(canonical_order.len());
        let mut repeated = Vec::new();
        for key in canonical_order.iter().map(|key| key.as_ref()) {
            if !ordered.insert(key) && !repeated.iter().any(|r: &String| r.as_str() == key) {
                repeated.push(key.to_string());
            }
        }

        let missing: Vec<String> = canonical_order
            .iter()
            .map(|key| key.as_ref())
            .filter(|key| !present.contains(key))
            .map(str::to_string)
            .collect();
        let extra: Vec<String> = groups
            .iter()
            .map(|g| g.group.as_str())
            .filter(|key| !ordered.contains(key))
            .map(str::to_string)
            .collect();

        if missing.is_empty() && extra.is_empty() && repeated.is_empty() {
            return Ok(());
        }

        Err(ValidationError::GroupSetMismatch {
            missing: dedup(missing),
            extra,
            repeated,
        })
    }

    /// Every version entry must reference a defined function
    pub fn validate_version_symbols<L>(
        &self,
        versions: &[VersionEntry],
        lookup: &L,
    ) -> Result<(), ValidationError>
    where
        L: FunctionLookup + ?Sized,
    {
        for entry in versions {
            if let Some(name) = entry.names().find(|name| !lookup.contains(name)) {
                return Err(ValidationError::UnknownSymbol {
                    name: name.to_string(),
                    version: entry.version.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for ConsistencyValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn dedup(mut keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.retain(|k| seen.insert(k.clone()));
    keys
}

/// Validation errors with diagnostic information
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Loaded groups and canonical order disagree
    #[error("group set mismatch: missing {missing:?}, extra {extra:?}, repeated {repeated:?}")]
    GroupSetMismatch {
        /// In the canonical order but not loaded
        missing: Vec<String>,
        /// Loaded but not in the canonical order
        extra: Vec<String>,
        /// Listed more than once in the canonical order
        repeated: Vec<String>,
    },

    /// Version entry references an undefined function
    #[error("unknown symbol '{name}' referenced by version {version}")]
    UnknownSymbol { name: String, version: String },

    /// Version manifest breaks the append-only layout
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
