//! Session tags and object tag resolution
//!
//! Every touch session carries a tag set describing its source and kind
//! (for example `TUIO` + `Touch`, or `TUIO` + `Object` + a configured marker
//! tag). Tag sets are cloned per session from the configured base lists, so
//! appending to one session never mutates another.

use crate::config::ObjectMapping;

/// Ordered, duplicate-free set of tag strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag; already-present tags are not duplicated
    pub fn push(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.iter().any(|t| *t == tag) {
            self.tags.push(tag);
        }
    }

    /// Whether the set contains `tag`
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Iterate tags in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl From<&[String]> for TagSet {
    fn from(tags: &[String]) -> Self {
        let mut set = TagSet::new();
        for tag in tags {
            set.push(tag.clone());
        }
        set
    }
}

/// Resolves a configured tag string by fiducial marker class id.
///
/// Lookup is an ordered linear scan of the configured table; when duplicate
/// ids are configured the first entry wins, deterministically. A miss yields
/// `None`, which is a valid result, not an error.
#[derive(Debug, Clone, Default)]
pub struct ObjectTagResolver {
    mappings: Vec<ObjectMapping>,
}

impl ObjectTagResolver {
    /// Create a resolver over the configured mapping table
    pub fn new(mappings: Vec<ObjectMapping>) -> Self {
        Self { mappings }
    }

    /// First configured tag for `class_id`, if any
    pub fn resolve(&self, class_id: i32) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.id == class_id)
            .map(|m| m.tag.as_str())
    }
}
