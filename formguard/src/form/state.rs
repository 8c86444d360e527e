use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::FormModel;
use crate::error_map::ErrorMap;

/// Internal state for a form
#[derive(Debug)]
struct FormInner<T> {
    /// Current form values
    data: T,
    /// Current validation errors
    errors: ErrorMap,
    /// Fields the user has interacted with
    touched: HashSet<String>,
    /// Whether a validation run is in progress
    validating: bool,
}

/// In-memory form state with interior mutability.
///
/// `FormState<T>` is cheap to clone: clones share the same underlying state,
/// so one handle can be given to a validator while another drives the UI.
///
/// # Example
///
/// ```ignore
/// let form = FormState::new(json!({ "email": "" }));
/// form.touch("email");
///
/// let valid = validator.validate_field("email", &form, false).await?;
/// if !valid {
///     println!("{:?}", form.error("email"));
/// }
/// ```
#[derive(Debug)]
pub struct FormState<T> {
    inner: Arc<RwLock<FormInner<T>>>,
}

impl<T> FormState<T> {
    /// Create a form holding `data` with no errors and nothing touched.
    pub fn new(data: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(FormInner {
                data,
                errors: ErrorMap::new(),
                touched: HashSet::new(),
                validating: false,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FormInner<T>> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FormInner<T>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the form data.
    pub fn set_data(&self, data: T) {
        self.write().data = data;
    }

    /// Update the form data using a closure.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut self.write().data);
    }

    /// Mark a field as touched.
    pub fn touch(&self, field: impl Into<String>) {
        self.write().touched.insert(field.into());
    }

    /// Mark a field as untouched.
    pub fn untouch(&self, field: &str) {
        self.write().touched.remove(field);
    }

    /// Get the messages for one path.
    pub fn error(&self, path: &str) -> Option<Vec<String>> {
        self.read().errors.get(path).map(<[String]>::to_vec)
    }

    /// Check if any error is set.
    pub fn has_errors(&self) -> bool {
        !self.read().errors.is_empty()
    }

    /// Check if a validation run is in progress.
    pub fn is_validating(&self) -> bool {
        self.read().validating
    }
}

impl<T: Default> Default for FormState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for FormState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + Sync> FormModel for FormState<T> {
    type Data = T;

    fn data(&self) -> T {
        self.read().data.clone()
    }

    fn errors(&self) -> ErrorMap {
        self.read().errors.clone()
    }

    fn is_touched(&self, field: &str) -> bool {
        self.read().touched.contains(field)
    }

    fn set_is_validating(&self, validating: bool) {
        self.write().validating = validating;
    }

    fn set_errors(&self, errors: ErrorMap) {
        self.write().errors = errors;
    }

    fn set_error(&self, path: &str, messages: Vec<String>) {
        self.write().errors.set(path, messages);
    }

    fn remove_error(&self, path: &str) {
        self.write().errors.remove(path);
    }
}
