//! Supersession tracking for overlapping validation calls.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Identifies one validation call.
///
/// Tokens only support equality. Every token minted by a sequencer is
/// distinct from every other token it has minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallToken(u64);

impl std::fmt::Display for CallToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which registry a call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// Whole-form validation.
    Form,
    /// Validation of one field.
    Field(&'a str),
}

impl std::fmt::Display for Scope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form => write!(f, "form"),
            Self::Field(field) => write!(f, "field '{}'", field),
        }
    }
}

/// Tracks the most recently started call per scope.
///
/// Starting a call overwrites the current token for its scope, which makes
/// every earlier pending call in that scope stale. The form slot and the
/// per-field registry are independent: a form call never supersedes a field
/// call or the other way round.
#[derive(Debug, Default)]
pub struct CallSequencer {
    next: AtomicU64,
    form: Mutex<Option<CallToken>>,
    fields: DashMap<String, CallToken>,
}

impl CallSequencer {
    /// Creates a sequencer with no calls recorded.
    pub fn new() -> Self {
        Self::default()
    }

    fn mint(&self) -> CallToken {
        CallToken(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// Records a new whole-form call.
    pub fn begin_form_call(&self) -> CallToken {
        let token = self.mint();
        *self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
        token
    }

    /// Records a new call for `field`.
    pub fn begin_field_call(&self, field: &str) -> CallToken {
        let token = self.mint();
        self.fields.insert(field.to_string(), token);
        token
    }

    /// Records a new call for `scope`.
    pub fn begin(&self, scope: Scope<'_>) -> CallToken {
        match scope {
            Scope::Form => self.begin_form_call(),
            Scope::Field(field) => self.begin_field_call(field),
        }
    }

    /// Returns `true` if `token` is still the latest call for `scope`.
    pub fn is_current(&self, token: CallToken, scope: Scope<'_>) -> bool {
        match scope {
            Scope::Form => {
                *self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) == Some(token)
            }
            Scope::Field(field) => self
                .fields
                .get(field)
                .is_some_and(|current| *current == token),
        }
    }
}
