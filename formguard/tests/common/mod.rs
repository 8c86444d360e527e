//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use formguard::{
    ErrorMap, FormModel, FormState, Schema, ValidationError, ValidationIssue, ValidationOutcome,
};
use serde_json::Value;
use simplelog::{Config, LevelFilter, TestLogger};
use tokio::sync::oneshot;

pub type Outcome = formguard::Result<ValidationOutcome<()>>;

pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

pub fn valid() -> Outcome {
    Ok(ValidationOutcome::Valid(()))
}

pub fn invalid(issues: Vec<ValidationIssue>) -> Outcome {
    Ok(ValidationOutcome::Invalid(issues))
}

pub fn issue(path: &str, message: &str) -> ValidationIssue {
    ValidationIssue::at(path.split('.'), message)
}

pub fn messages(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

/// A schema whose calls resolve only when the test releases them.
///
/// Each call takes the oldest gate created with [`GatedSchema::gate`], so gates
/// must be created in the order the calls will start.
#[derive(Default)]
pub struct GatedSchema {
    gates: Mutex<VecDeque<oneshot::Receiver<Outcome>>>,
}

impl GatedSchema {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gate(&self) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait]
impl Schema for GatedSchema {
    type Input = Value;
    type Output = ();

    async fn validate(&self, _value: &Value) -> Outcome {
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| ValidationError::engine("gate dropped"))?,
            None => Err(ValidationError::engine("no gate queued")),
        }
    }
}

/// A mutation observed on a [`RecordingForm`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetValidating(bool),
    SetErrors(ErrorMap),
    SetError(String, Vec<String>),
    RemoveError(String),
}

/// A [`FormState`] that logs every mutation it receives.
#[derive(Default)]
pub struct RecordingForm {
    pub state: FormState<Value>,
    log: Mutex<Vec<Mutation>>,
}

impl RecordingForm {
    pub fn new(data: Value) -> Self {
        Self {
            state: FormState::new(data),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear_log(&self) {
        self.log.lock().unwrap().clear();
    }

    fn record(&self, mutation: Mutation) {
        self.log.lock().unwrap().push(mutation);
    }
}

impl FormModel for RecordingForm {
    type Data = Value;

    fn data(&self) -> Value {
        self.state.data()
    }

    fn errors(&self) -> ErrorMap {
        self.state.errors()
    }

    fn is_touched(&self, field: &str) -> bool {
        self.state.is_touched(field)
    }

    fn set_is_validating(&self, validating: bool) {
        self.record(Mutation::SetValidating(validating));
        self.state.set_is_validating(validating);
    }

    fn set_errors(&self, errors: ErrorMap) {
        self.record(Mutation::SetErrors(errors.clone()));
        self.state.set_errors(errors);
    }

    fn set_error(&self, path: &str, messages: Vec<String>) {
        self.record(Mutation::SetError(path.to_string(), messages.clone()));
        self.state.set_error(path, messages);
    }

    fn remove_error(&self, path: &str) {
        self.record(Mutation::RemoveError(path.to_string()));
        self.state.remove_error(path);
    }
}

/// A deterministic signup schema: required email, password of at least 8
/// characters, matching confirmation and named tags.
pub fn signup_schema() -> impl Schema<Input = Value, Output = ()> {
    formguard::schema_fn(|data: &Value| {
        let mut issues = Vec::new();

        let email = data["email"].as_str().unwrap_or_default();
        if email.is_empty() {
            issues.push(issue("email", "Email is required"));
        }

        let password = data["password"].as_str().unwrap_or_default();
        if password.chars().count() < 8 {
            issues.push(issue("password", "Password must be at least 8 characters"));
        }
        if data["confirmPassword"].as_str().unwrap_or_default() != password {
            issues.push(issue("confirmPassword", "Passwords do not match"));
        }

        if let Some(tags) = data["tags"].as_array() {
            for (i, tag) in tags.iter().enumerate() {
                if tag["name"].as_str().unwrap_or_default().is_empty() {
                    issues.push(ValidationIssue::at(
                        [formguard::PathSegment::key("tags"), i.into(), "name".into()],
                        "Tag name is required",
                    ));
                }
            }
        }

        let outcome = if issues.is_empty() {
            ValidationOutcome::Valid(())
        } else {
            ValidationOutcome::Invalid(issues)
        };
        std::future::ready(Ok::<_, ValidationError>(outcome))
    })
}
