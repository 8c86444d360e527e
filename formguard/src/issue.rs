//! Issues reported by a schema engine.

use serde::{Deserialize, Serialize};

/// A single segment of an issue path.
///
/// Engines report paths as a list of property keys and array indices. Some
/// wrap each segment in an object (`{"key": "name"}`), which deserializes to
/// [`PathSegment::Wrapped`]. Anything else is kept as [`PathSegment::Opaque`];
/// numbers outside the index range still render, any other value makes the
/// whole path unresolvable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Array index.
    Index(u64),
    /// Object property.
    Key(String),
    /// Segment wrapped in a path item object.
    Wrapped {
        /// The wrapped segment.
        key: Box<PathSegment>,
    },
    /// A segment with no string form (symbols, nested objects, ...).
    Opaque(serde_json::Value),
}

impl PathSegment {
    /// Creates a property segment.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Creates an index segment.
    pub fn index(index: u64) -> Self {
        Self::Index(index)
    }

    /// Renders this segment, or `None` if it cannot appear in a dotted path.
    fn render(&self) -> Option<String> {
        match self {
            Self::Key(key) => Some(key.clone()),
            Self::Index(index) => Some(index.to_string()),
            Self::Wrapped { key } => match key.as_ref() {
                Self::Wrapped { .. } => None,
                _ => key.render(),
            },
            Self::Opaque(serde_json::Value::Number(number)) => Some(number.to_string()),
            Self::Opaque(_) => None,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<u64> for PathSegment {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index as u64)
    }
}

/// One reported validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Human-readable message.
    pub message: String,
    /// Location of the failure within the validated value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
}

impl ValidationIssue {
    /// Creates a form-level issue with no path.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    /// Creates an issue at the given path.
    pub fn at<I, S>(path: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            message: message.into(),
            path: Some(path.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns the dotted form of this issue's path.
    ///
    /// `None` when the path is absent, renders to an empty string, or contains
    /// a segment that has no string form.
    pub fn dot_path(&self) -> Option<String> {
        let path = self.path.as_deref()?;
        if path.is_empty() {
            return None;
        }

        let mut dotted = String::new();
        for (i, segment) in path.iter().enumerate() {
            if i > 0 {
                dotted.push('.');
            }
            dotted.push_str(&segment.render()?);
        }
        (!dotted.is_empty()).then_some(dotted)
    }
}
