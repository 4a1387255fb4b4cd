//! Append-only ABI layout
//!
//! Folds the version manifest into the field order of the function-pointer
//! table. Published fields keep their offsets: a later version may restate
//! the published fields as a prefix or list only its new fields, but it can
//! never reorder or drop them.

use crate::symbol::VersionEntry;
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

/// Fields introduced by one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSection {
    /// Version label
    pub version: String,

    /// Names first published by this version, in struct order
    pub fields: Vec<String>,
}

/// Complete struct layout, oldest version first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AbiLayout {
    sections: Vec<LayoutSection>,
}

impl AbiLayout {
    /// Compute layout from versions in release order
    ///
    /// # Errors
    /// Returns [`LayoutError::AppendOnlyViolation`] if a version reorders,
    /// drops or repeats a field.
    pub fn from_versions(versions: &[VersionEntry]) -> Result<Self, LayoutError> {
        let mut published: Vec<&str> = Vec::new();
        let mut published_set: HashSet<&str> = HashSet::new();
        let mut sections = Vec::with_capacity(versions.len());

        for entry in versions {
            let names: Vec<&str> = entry.names().collect();

            let mut local = HashSet::with_capacity(names.len());
            for name in &names {
                if !local.insert(*name) {
                    return Err(LayoutError::violation(entry, name, LayoutViolation::Repeated));
                }
            }

            let restates_published = names.iter().any(|n| published_set.contains(n));
            let new_names = if restates_published {
                for (i, expected) in published.iter().enumerate() {
                    match names.get(i) {
                        Some(found) if found == expected => {}
                        _ if local.contains(expected) => {
                            return Err(LayoutError::violation(
                                entry,
                                expected,
                                LayoutViolation::Reordered,
                            ));
                        }
                        _ => {
                            return Err(LayoutError::violation(
                                entry,
                                expected,
                                LayoutViolation::Dropped,
                            ));
                        }
                    }
                }
                &names[published.len()..]
            } else {
                &names[..]
            };

            for &name in new_names {
                published.push(name);
                published_set.insert(name);
            }

            sections.push(LayoutSection {
                version: entry.version.clone(),
                fields: new_names.iter().map(|n| (*n).to_string()).collect(),
            });
        }

        Ok(Self { sections })
    }

    /// Sections in release order
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[LayoutSection] {
        &self.sections
    }

    /// All fields in struct order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter().map(String::as_str))
    }

    /// Struct position of a field
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields().position(|f| f == name)
    }

    /// Total number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }

    /// Check if the layout has no fields
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a version broke the append-only contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutViolation {
    /// A published field moved to another position
    Reordered,

    /// A published field is missing from a restating version
    Dropped,

    /// A field is listed twice in one version
    Repeated,
}

impl Display for LayoutViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reordered => write!(f, "published field moved"),
            Self::Dropped => write!(f, "published field dropped"),
            Self::Repeated => write!(f, "field listed twice"),
        }
    }
}

/// Layout errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Version breaks the append-only field order
    #[error("version '{version}' breaks the append-only layout at '{name}': {kind}")]
    AppendOnlyViolation {
        version: String,
        name: String,
        kind: LayoutViolation,
    },
}

impl LayoutError {
    fn violation(entry: &VersionEntry, name: &str, kind: LayoutViolation) -> Self {
        Self::AppendOnlyViolation {
            version: entry.version.clone(),
            name: name.to_string(),
            kind,
        }
    }
}
