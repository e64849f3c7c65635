//! Literal catalog fixtures: parent descriptors plus ordered child lists.

use std::collections::HashSet;

use crate::error::SeedError;

/// A parent record to ensure, identified by its unique name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentSeed {
    pub name: String,
    pub description: String,
}

impl ParentSeed {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A child descriptor. Children are unique per (name, parent).
pub trait ChildSeed: Send + Sync {
    fn name(&self) -> &str;
}

impl ChildSeed for String {
    fn name(&self) -> &str {
        self
    }
}

/// Ordered children attached to the parent named `parent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildGroup<C> {
    pub parent: String,
    pub children: Vec<C>,
}

/// Parents in input order and child groups in input order.
///
/// Several groups may name the same parent; their children are applied in
/// the order the groups appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog<C> {
    pub parents: Vec<ParentSeed>,
    pub groups: Vec<ChildGroup<C>>,
}

impl<C: ChildSeed> Catalog<C> {
    pub fn new(parents: Vec<ParentSeed>, groups: Vec<ChildGroup<C>>) -> Self {
        Self { parents, groups }
    }

    /// Builds a catalog from a flat list of `(parent name, child)` entries,
    /// folding consecutive entries of the same parent into one group.
    pub fn from_entries<I>(parents: Vec<ParentSeed>, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, C)>,
    {
        let mut groups: Vec<ChildGroup<C>> = Vec::new();
        for (parent, child) in entries {
            match groups.last_mut() {
                Some(group) if group.parent == parent => group.children.push(child),
                _ => groups.push(ChildGroup {
                    parent,
                    children: vec![child],
                }),
            }
        }
        Self { parents, groups }
    }

    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    pub fn child_count(&self) -> usize {
        self.groups.iter().map(|group| group.children.len()).sum()
    }

    /// Children of `parent` across all of its groups, in input order.
    pub fn children_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a C> + 'a {
        self.groups
            .iter()
            .filter(move |group| group.parent == parent)
            .flat_map(|group| group.children.iter())
    }

    /// Groups naming a parent that is not part of the parent list.
    pub fn orphan_groups(&self) -> impl Iterator<Item = &ChildGroup<C>> {
        self.groups
            .iter()
            .filter(|group| !self.parents.iter().any(|p| p.name == group.parent))
    }

    /// Keeps only the first `limit` children, counted across groups in input
    /// order. Parents are kept even when they lose all of their children.
    pub fn limit_children(mut self, limit: usize) -> Self {
        let mut remaining = limit;
        for group in &mut self.groups {
            let keep = group.children.len().min(remaining);
            group.children.truncate(keep);
            remaining -= keep;
        }
        self.groups.retain(|group| !group.children.is_empty());
        self
    }

    /// Checks names are non-empty, parents unique and children unique per parent.
    pub fn validate(&self) -> Result<(), SeedError> {
        let mut parent_names = HashSet::new();
        for parent in &self.parents {
            if parent.name.trim().is_empty() {
                return Err(SeedError::InvalidCatalog(
                    "parent names must not be empty".to_string(),
                ));
            }
            if !parent_names.insert(parent.name.as_str()) {
                return Err(SeedError::InvalidCatalog(format!(
                    "duplicate parent '{}'",
                    parent.name
                )));
            }
        }

        let mut child_keys = HashSet::new();
        for group in &self.groups {
            for child in &group.children {
                if child.name().trim().is_empty() {
                    return Err(SeedError::InvalidCatalog(format!(
                        "empty child name under '{}'",
                        group.parent
                    )));
                }
                if !child_keys.insert((group.parent.as_str(), child.name())) {
                    return Err(SeedError::InvalidCatalog(format!(
                        "duplicate child '{}' under '{}'",
                        child.name(),
                        group.parent
                    )));
                }
            }
        }

        Ok(())
    }
}
