//! Path-addressed error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::issue::ValidationIssue;

/// Key used for issues that do not point at a field.
pub const FORM_ERROR_KEY: &str = "_form";

/// Mapping from dotted field path to its error messages.
///
/// Keys iterate in sorted order. A key is never mapped to an empty list:
/// [`ErrorMap::set`] with no messages removes the key instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<String, Vec<String>>);

impl ErrorMap {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the list at `path`.
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    /// Replaces the messages at `path`.
    pub fn set(&mut self, path: impl Into<String>, messages: Vec<String>) {
        let path = path.into();
        if messages.is_empty() {
            self.0.remove(&path);
        } else {
            self.0.insert(path, messages);
        }
    }

    /// Removes the entry at `path`, returning its messages.
    pub fn remove(&mut self, path: &str) -> Option<Vec<String>> {
        self.0.remove(path)
    }

    /// Returns the messages at `path`.
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    /// Returns `true` if there is an entry at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// Number of paths with errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no path has errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Iterates over all paths.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over the entries for `field` and everything nested below it.
    pub fn within<'a>(&'a self, field: &'a str) -> impl Iterator<Item = (&'a str, &'a [String])> {
        self.iter().filter(move |(path, _)| is_within(path, field))
    }
}

impl FromIterator<(String, Vec<String>)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (path, messages) in iter {
            map.set(path, messages);
        }
        map
    }
}

impl IntoIterator for ErrorMap {
    type Item = (String, Vec<String>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Returns `true` if `path` is `field` itself or one of its children.
///
/// `items.0` is within `items`, `itemsCount` is not.
pub fn is_within(path: &str, field: &str) -> bool {
    match path.strip_prefix(field) {
        Some("") => true,
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}

/// Groups a batch of issues by dotted path.
///
/// Issues without a resolvable path land under [`FORM_ERROR_KEY`]. Message
/// order follows issue order and duplicates are kept.
pub fn convert_issues(issues: &[ValidationIssue]) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for issue in issues {
        let path = issue
            .dot_path()
            .unwrap_or_else(|| FORM_ERROR_KEY.to_string());
        errors.push(path, issue.message.clone());
    }
    errors
}
