//! Validator configuration.

use std::collections::HashMap;

use serde::Deserialize;

/// Default message set on a field whose only errors are on its children.
pub const DEFAULT_SUMMARY_MESSAGE: &str = "One or more items are invalid";

/// How a field-level run applies its results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPolicy {
    /// Clear the field and everything nested below it, then re-apply fresh
    /// errors, summarizing child errors on the parent (default).
    #[default]
    Hierarchical,
    /// Only update fields the user has touched. Untouched fields keep
    /// whatever errors they had, even if the new run proves them valid.
    Touched,
}

/// Configuration for a [`FormValidator`](crate::FormValidator).
///
/// # Example
///
/// ```
/// use formguard::{FieldPolicy, ValidatorOptions};
///
/// let options = ValidatorOptions::default()
///     .with_dependency("password", ["confirmPassword"])
///     .with_policy(FieldPolicy::Touched);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Fields re-checked whenever the key field is validated, in order.
    pub dependencies: HashMap<String, Vec<String>>,

    /// Reconciliation policy for `validate_field`.
    ///
    /// Default: [`FieldPolicy::Hierarchical`]
    pub policy: FieldPolicy,

    /// Message set on a field whose only errors are on its children.
    ///
    /// Default: "One or more items are invalid"
    pub summary_message: String,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            dependencies: HashMap::new(),
            policy: FieldPolicy::default(),
            summary_message: DEFAULT_SUMMARY_MESSAGE.to_string(),
        }
    }
}

impl ValidatorOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares fields to re-check whenever `field` is validated.
    ///
    /// Calling this again for the same field appends to its list.
    pub fn with_dependency<I, S>(mut self, field: impl Into<String>, dependents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies
            .entry(field.into())
            .or_default()
            .extend(dependents.into_iter().map(Into::into));
        self
    }

    /// Sets the reconciliation policy.
    pub fn with_policy(mut self, policy: FieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the summary message for fields with only child errors.
    pub fn with_summary_message(mut self, message: impl Into<String>) -> Self {
        self.summary_message = message.into();
        self
    }

    /// Returns `field` followed by its dependents in configured order.
    pub fn fields_to_check<'a>(&'a self, field: &'a str) -> Vec<&'a str> {
        let mut fields = vec![field];
        if let Some(dependents) = self.dependencies.get(field) {
            fields.extend(dependents.iter().map(String::as_str));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_to_check_order() {
        let options = ValidatorOptions::new().with_dependency("password", ["confirmPassword", "hint"]);
        assert_eq!(
            options.fields_to_check("password"),
            vec!["password", "confirmPassword", "hint"]
        );
        assert_eq!(options.fields_to_check("email"), vec!["email"]);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let options: ValidatorOptions = serde_json::from_value(serde_json::json!({
            "dependencies": { "password": ["confirmPassword"] },
            "policy": "touched"
        }))
        .unwrap();

        assert_eq!(options.policy, FieldPolicy::Touched);
        assert_eq!(options.summary_message, DEFAULT_SUMMARY_MESSAGE);
        assert_eq!(options.fields_to_check("password"), vec!["password", "confirmPassword"]);
    }

    #[test]
    fn test_defaults() {
        let options = ValidatorOptions::default();
        assert_eq!(options.policy, FieldPolicy::Hierarchical);
        assert!(options.dependencies.is_empty());
    }
}
