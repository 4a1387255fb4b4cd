//! Function definitions and version manifests
//!
//! Plain value types for the declarative C API input. They are built once
//! from the definition files and never mutated afterwards, so they can be
//! shared read-only across threads.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A single function parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionParam {
    /// C type, e.g. `duckdb_connection *`
    #[serde(rename = "type")]
    pub ty: String,

    /// Parameter name
    pub name: String,
}

impl FunctionParam {
    /// Create new parameter
    #[inline]
    #[must_use]
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// Documentation attached to a function
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FunctionComment {
    /// Free-form description, emitted verbatim
    pub description: String,

    /// Parameter name -> explanation
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub param_comments: IndexMap<String, String>,

    /// Explanation of the return value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<String>,
}

impl FunctionComment {
    /// Create comment with description only
    #[inline]
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// With a parameter explanation
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.param_comments.insert(name.into(), text.into());
        self
    }

    /// With a return value explanation
    #[must_use]
    pub fn with_return(mut self, text: impl Into<String>) -> Self {
        self.return_value = Some(text.into());
        self
    }
}

/// One C API function
///
/// `group` is not part of the input records; the repository stamps it with
/// the key of the group that declared the function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Symbol name, globally unique across all groups
    pub name: String,

    /// C return type
    pub return_type: String,

    /// Parameters in declaration order
    #[serde(default)]
    pub params: Vec<FunctionParam>,

    /// Owning group key
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    /// Wrapped in a deprecation guard when set
    #[serde(default)]
    pub deprecated: bool,

    /// Optional documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<FunctionComment>,
}

impl FunctionDef {
    /// Create function without parameters
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            params: Vec::new(),
            group: String::new(),
            deprecated: false,
            comment: None,
        }
    }

    /// With an additional parameter
    #[must_use]
    pub fn with_param(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.params.push(FunctionParam::new(ty, name));
        self
    }

    /// With documentation
    #[must_use]
    pub fn with_comment(mut self, comment: FunctionComment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Mark as deprecated
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}

/// A named group of functions, one per definition file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionGroup {
    /// Unique group key, e.g. `open_connect`
    pub group: String,

    /// Free text emitted below the group banner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Wraps the whole group in a deprecation guard
    #[serde(default)]
    pub deprecated: bool,

    /// Functions in declaration order
    #[serde(default)]
    pub entries: Vec<FunctionDef>,
}

impl FunctionGroup {
    /// Create empty group
    #[inline]
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            description: None,
            deprecated: false,
            entries: Vec::new(),
        }
    }

    /// With description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With function entry
    #[must_use]
    pub fn with_entry(mut self, function: FunctionDef) -> Self {
        self.entries.push(function);
        self
    }

    /// Mark whole group as deprecated
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}

/// Reference from a version entry to a function
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionRef {
    /// Referenced function name
    pub name: String,
}

/// A release point of the extension API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Version label, e.g. `v0.0.1`
    pub version: String,

    /// Referenced functions in struct order
    #[serde(default)]
    pub entries: Vec<VersionRef>,
}

impl VersionEntry {
    /// Create version from names
    #[must_use]
    pub fn new<I, S>(version: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            version: version.into(),
            entries: names
                .into_iter()
                .map(|name| VersionRef { name: name.into() })
                .collect(),
        }
    }

    /// Referenced names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

impl Display for VersionEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} entries)", self.version, self.entries.len())
    }
}

/// The version manifest: every release of the extension API, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiManifest {
    /// Version entries in release order
    pub version_entries: Vec<VersionEntry>,
}

impl ApiManifest {
    /// Create manifest from versions
    #[inline]
    #[must_use]
    pub fn new(version_entries: Vec<VersionEntry>) -> Self {
        Self { version_entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_def_deserializes_with_defaults() {
        let json = r#"{"name": "duckdb_vector_size", "return_type": "idx_t"}"#;
        let def: FunctionDef = serde_json::from_str(json).unwrap();

        assert_eq!(def.name, "duckdb_vector_size");
        assert!(def.params.is_empty());
        assert!(!def.deprecated);
        assert!(def.comment.is_none());
        assert!(def.group.is_empty());
    }

    #[test]
    fn param_uses_type_key() {
        let json = r#"{"type": "duckdb_database *", "name": "out_database"}"#;
        let param: FunctionParam = serde_json::from_str(json).unwrap();

        assert_eq!(param.ty, "duckdb_database *");
        assert_eq!(param.name, "out_database");
    }

    #[test]
    fn param_comments_keep_input_order() {
        let json = r#"{
            "description": "Opens a database.",
            "param_comments": {"path": "file", "out_database": "handle", "config": "options"}
        }"#;
        let comment: FunctionComment = serde_json::from_str(json).unwrap();

        let keys: Vec<_> = comment.param_comments.keys().map(String::as_str).collect();
        assert_eq!(keys, ["path", "out_database", "config"]);
    }

    #[test]
    fn group_deserializes_entries_in_order() {
        let json = r#"{
            "group": "helpers",
            "deprecated": true,
            "entries": [
                {"name": "b", "return_type": "void"},
                {"name": "a", "return_type": "void"}
            ]
        }"#;
        let group: FunctionGroup = serde_json::from_str(json).unwrap();

        assert!(group.deprecated);
        assert_eq!(group.entries[0].name, "b");
        assert_eq!(group.entries[1].name, "a");
    }

    #[test]
    fn version_entry_names() {
        let entry = VersionEntry::new("v1", ["a", "b"]);
        assert_eq!(entry.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(entry.to_string(), "v1 (2 entries)");
    }
}
