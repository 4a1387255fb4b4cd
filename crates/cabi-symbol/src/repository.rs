//! Definition repository
//!
//! Provides [`DefinitionRepository`]: all function groups in load order plus
//! a by-name index into them. Loading rejects duplicate symbols eagerly.

use crate::symbol::{FunctionDef, FunctionGroup};
use indexmap::IndexMap;
use std::collections::HashMap;

/// A function group together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionSource {
    /// File path or any other label used in diagnostics
    pub origin: String,

    /// The declared group
    pub group: FunctionGroup,
}

impl DefinitionSource {
    /// Create new source
    #[inline]
    #[must_use]
    pub fn new(origin: impl Into<String>, group: FunctionGroup) -> Self {
        Self {
            origin: origin.into(),
            group,
        }
    }
}

/// Name-based function lookup
///
/// Implemented by the repository and by plain maps so the validator and the
/// assemblers can run over either.
pub trait FunctionLookup {
    /// Find function by symbol name
    fn lookup(&self, name: &str) -> Option<&FunctionDef>;

    /// Check whether a symbol is defined
    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

impl FunctionLookup for HashMap<String, FunctionDef> {
    fn lookup(&self, name: &str) -> Option<&FunctionDef> {
        self.get(name)
    }
}

impl FunctionLookup for IndexMap<String, FunctionDef> {
    fn lookup(&self, name: &str) -> Option<&FunctionDef> {
        self.get(name)
    }
}

/// Position of a function inside the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SymbolLocation {
    group: usize,
    entry: usize,
}

/// Immutable collection of every loaded function group
#[derive(Debug, Clone, Default)]
pub struct DefinitionRepository {
    /// Groups in load order
    groups: Vec<FunctionGroup>,

    /// Origin of each group, parallel to `groups`
    origins: Vec<String>,

    /// Symbol name -> location, in declaration order
    by_name: IndexMap<String, SymbolLocation>,
}

impl DefinitionRepository {
    /// Load sources into a repository
    ///
    /// Each source keeps its internal entry order. Every entry is stamped
    /// with the key of its group.
    ///
    /// # Errors
    /// - [`RepositoryError::DuplicateSymbol`] when two entries share a name
    /// - [`RepositoryError::DuplicateGroup`] when two sources declare the same group
    pub fn load<I>(sources: I) -> Result<Self, RepositoryError>
    where
        I: IntoIterator<Item = DefinitionSource>,
    {
        let mut repo = Self::default();

        for DefinitionSource { origin, mut group } in sources {
            if let Some(first) = repo.groups.iter().position(|g| g.group == group.group) {
                return Err(RepositoryError::DuplicateGroup {
                    group: group.group,
                    origin,
                    first_origin: repo.origins[first].clone(),
                });
            }

            let group_idx = repo.groups.len();
            for (entry_idx, function) in group.entries.iter_mut().enumerate() {
                if let Some(existing) = repo.by_name.get(&function.name) {
                    return Err(RepositoryError::DuplicateSymbol {
                        name: function.name.clone(),
                        origin,
                        first_origin: repo.origins[existing.group].clone(),
                    });
                }
                function.group.clone_from(&group.group);
                repo.by_name.insert(
                    function.name.clone(),
                    SymbolLocation {
                        group: group_idx,
                        entry: entry_idx,
                    },
                );
            }

            tracing::debug!(
                group = %group.group,
                origin = %origin,
                functions = group.entries.len(),
                "loaded function group"
            );
            repo.groups.push(group);
            repo.origins.push(origin);
        }

        Ok(repo)
    }

    /// Groups in load order
    #[inline]
    #[must_use]
    pub fn groups(&self) -> &[FunctionGroup] {
        &self.groups
    }

    /// Find group by key
    #[must_use]
    pub fn group(&self, key: &str) -> Option<&FunctionGroup> {
        self.groups.iter().find(|g| g.group == key)
    }

    /// Origin label of a group
    #[must_use]
    pub fn origin_of(&self, key: &str) -> Option<&str> {
        self.groups
            .iter()
            .position(|g| g.group == key)
            .map(|i| self.origins[i].as_str())
    }

    /// Find function by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.by_name
            .get(name)
            .map(|loc| &self.groups[loc.group].entries[loc.entry])
    }

    /// All symbol names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// All functions in declaration order
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.groups.iter().flat_map(|g| g.entries.iter())
    }

    /// Number of functions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Owned name -> definition map
    #[must_use]
    pub fn function_map(&self) -> IndexMap<String, FunctionDef> {
        self.functions()
            .map(|f| (f.name.clone(), f.clone()))
            .collect()
    }
}

impl FunctionLookup for DefinitionRepository {
    fn lookup(&self, name: &str) -> Option<&FunctionDef> {
        self.get(name)
    }
}

/// Repository load errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Two definitions share a symbol name
    #[error("duplicate symbol '{name}' in {origin} (first defined in {first_origin})")]
    DuplicateSymbol {
        name: String,
        origin: String,
        first_origin: String,
    },

    /// Two sources declare the same group key
    #[error("duplicate group '{group}' in {origin} (first declared in {first_origin})")]
    DuplicateGroup {
        group: String,
        origin: String,
        first_origin: String,
    },
}
