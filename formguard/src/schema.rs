//! The schema engine seam.
//!
//! The crate never inspects a schema. It hands the form's data snapshot to
//! [`Schema::validate`] and acts on the returned [`ValidationOutcome`].

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::issue::ValidationIssue;

/// Result of running a schema over a value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome<T> {
    /// The value passed; carries the engine's (possibly transformed) output.
    Valid(T),
    /// The value failed with one or more issues.
    Invalid(Vec<ValidationIssue>),
}

impl<T> ValidationOutcome<T> {
    /// Returns the reported issues, empty when valid.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(issues) => issues,
        }
    }

    /// Returns `true` if there is nothing to report.
    ///
    /// An `Invalid` outcome with an empty issue list counts as valid.
    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }

    /// Returns the output, if the value passed.
    pub fn into_output(self) -> Option<T> {
        match self {
            Self::Valid(output) => Some(output),
            Self::Invalid(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct RawOutcome {
    #[serde(default)]
    output: serde_json::Value,
    #[serde(default)]
    issues: Option<Vec<ValidationIssue>>,
}

impl ValidationOutcome<serde_json::Value> {
    /// Decodes the `{ "output": .. }` / `{ "issues": [..] }` result shape.
    ///
    /// A present, non-null `issues` field means failure; anything else is a
    /// success carrying `output` (or `null`).
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let raw: RawOutcome = serde_json::from_value(value)?;
        Ok(match raw.issues {
            Some(issues) => Self::Invalid(issues),
            None => Self::Valid(raw.output),
        })
    }
}

/// An asynchronous validation engine.
///
/// Engines that finish synchronously simply return without awaiting.
/// An `Err` means the engine itself broke, not that the value is invalid.
#[async_trait]
pub trait Schema: Send + Sync {
    /// The value the schema validates.
    type Input: Send + Sync;
    /// The value produced when validation passes.
    type Output: Send;

    /// Validates `value`.
    async fn validate(&self, value: &Self::Input) -> Result<ValidationOutcome<Self::Output>>;
}

/// A [`Schema`] backed by a closure.
///
/// Created with [`schema_fn`].
pub struct FnSchema<I, O, F> {
    f: F,
    _marker: PhantomData<fn(&I) -> O>,
}

/// Wraps a closure returning a future as a [`Schema`].
///
/// The future cannot borrow the input; copy what it needs out first.
///
/// ```ignore
/// let schema = schema_fn(|value: &serde_json::Value| {
///     let name = value["name"].as_str().unwrap_or_default().to_string();
///     async move {
///         if name.is_empty() {
///             Ok(ValidationOutcome::Invalid(vec![ValidationIssue::at(["name"], "Name is required")]))
///         } else {
///             Ok(ValidationOutcome::Valid(()))
///         }
///     }
/// });
/// ```
pub fn schema_fn<I, O, F, Fut>(f: F) -> FnSchema<I, O, F>
where
    F: Fn(&I) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ValidationOutcome<O>>> + Send + 'static,
{
    FnSchema {
        f,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<I, O, F, Fut> Schema for FnSchema<I, O, F>
where
    I: Send + Sync,
    O: Send,
    F: Fn(&I) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ValidationOutcome<O>>> + Send + 'static,
{
    type Input = I;
    type Output = O;

    async fn validate(&self, value: &I) -> Result<ValidationOutcome<O>> {
        (self.f)(value).await
    }
}

#[async_trait]
impl<S: Schema + ?Sized> Schema for std::sync::Arc<S> {
    type Input = S::Input;
    type Output = S::Output;

    async fn validate(&self, value: &Self::Input) -> Result<ValidationOutcome<Self::Output>> {
        (**self).validate(value).await
    }
}

impl<T> From<Vec<ValidationIssue>> for ValidationOutcome<T> {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        Self::Invalid(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use serde_json::json;

    #[test]
    fn test_from_json_success() {
        let outcome = ValidationOutcome::from_json(json!({ "value": 1, "output": { "a": 1 } })).unwrap();
        assert_eq!(outcome, ValidationOutcome::Valid(json!({ "a": 1 })));
    }

    #[test]
    fn test_from_json_issues() {
        let outcome = ValidationOutcome::from_json(json!({
            "issues": [{ "message": "required", "path": ["name"] }]
        }))
        .unwrap();
        assert!(!outcome.is_valid());
        assert_eq!(outcome.issues()[0].dot_path().as_deref(), Some("name"));
    }

    #[test]
    fn test_from_json_null_issues_is_success() {
        let outcome = ValidationOutcome::from_json(json!({ "issues": null })).unwrap();
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ValidationOutcome::from_json(json!({ "issues": "nope" })).unwrap_err();
        assert!(matches!(err, ValidationError::Decode(_)));
    }

    #[test]
    fn test_into_output() {
        assert_eq!(ValidationOutcome::Valid(7).into_output(), Some(7));
        let outcome: ValidationOutcome<i32> = vec![ValidationIssue::new("bad")].into();
        assert_eq!(outcome.into_output(), None);
    }

    #[test]
    fn test_empty_issue_list_is_valid() {
        let outcome: ValidationOutcome<()> = Vec::new().into();
        assert!(outcome.is_valid());
    }
}
