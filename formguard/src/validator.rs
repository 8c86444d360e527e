//! Race-guarded validation of a form against a schema.

use log::debug;

use crate::error::Result;
use crate::error_map::{ErrorMap, convert_issues};
use crate::form::FormModel;
use crate::options::{FieldPolicy, ValidatorOptions};
use crate::reconcile::reconcile_field;
use crate::schema::{Schema, ValidationOutcome};
use crate::sequencer::{CallSequencer, CallToken, Scope};

/// Validates forms against a schema, discarding results from superseded calls.
///
/// Each validator owns its own call sequencer, so independent validators never
/// interfere with each other. A validator is usually created once per form and
/// shared by every trigger (input, blur, submit) on that form.
///
/// # Example
///
/// ```ignore
/// let validator = FormValidator::with_options(
///     schema,
///     ValidatorOptions::new().with_dependency("password", ["confirmPassword"]),
/// );
///
/// // On blur
/// validator.validate_field("password", &form, false).await?;
///
/// // On submit
/// if validator.validate_form(&form).await? {
///     // Proceed with form submission
/// }
/// ```
pub struct FormValidator<S> {
    schema: S,
    options: ValidatorOptions,
    sequencer: CallSequencer,
}

impl<S: Schema> FormValidator<S> {
    /// Create a validator with default options.
    pub fn new(schema: S) -> Self {
        Self::with_options(schema, ValidatorOptions::default())
    }

    /// Create a validator with the given options.
    pub fn with_options(schema: S, options: ValidatorOptions) -> Self {
        Self {
            schema,
            options,
            sequencer: CallSequencer::new(),
        }
    }

    /// The schema this validator runs.
    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// The options this validator was created with.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate the whole form.
    ///
    /// Clears every error before the schema runs, then replaces the error map
    /// with the new issues. Returns `Ok(false)` without touching the form if a
    /// newer whole-form call started while this one was pending.
    pub async fn validate_form<F>(&self, form: &F) -> Result<bool>
    where
        F: FormModel<Data = S::Input> + ?Sized,
    {
        let call = self.start(form, Scope::Form);
        form.set_errors(ErrorMap::new());

        let Some(outcome) = self.run(form, &call).await? else {
            return Ok(false);
        };

        if outcome.is_valid() {
            debug!("Form call {} passed", call.token);
            return Ok(true);
        }

        let errors = convert_issues(outcome.issues());
        debug!(
            "Form call {} failed: {} issues on {} paths",
            call.token,
            outcome.issues().len(),
            errors.len()
        );
        form.set_errors(errors);

        Ok(false)
    }

    /// Validate one field and its configured dependents.
    ///
    /// The schema always sees the full form data; only the application of the
    /// results is scoped to `field` and its dependents. `force` bypasses the
    /// touched check under [`FieldPolicy::Touched`] and has no effect under
    /// [`FieldPolicy::Hierarchical`]. Returns `Ok(false)` without touching the
    /// form if a newer call for the same field started while this one was
    /// pending.
    pub async fn validate_field<F>(&self, field: &str, form: &F, force: bool) -> Result<bool>
    where
        F: FormModel<Data = S::Input> + ?Sized,
    {
        let call = self.start(form, Scope::Field(field));

        let Some(outcome) = self.run(form, &call).await? else {
            return Ok(false);
        };

        if outcome.is_valid() {
            debug!("Field call {} for '{}' passed", call.token, field);
            form.remove_error(field);
            if self.options.policy == FieldPolicy::Hierarchical {
                self.apply(field, form, &ErrorMap::new(), force);
            }
            return Ok(true);
        }

        let errors = convert_issues(outcome.issues());
        let valid = self.apply(field, form, &errors, force);
        debug!(
            "Field call {} for '{}' finished: {}",
            call.token,
            field,
            if valid { "valid" } else { "invalid" }
        );

        Ok(valid)
    }

    /// Applies `errors` to `field` and its dependents. Every field is
    /// reconciled even after one turns out invalid.
    fn apply<F>(&self, field: &str, form: &F, errors: &ErrorMap, force: bool) -> bool
    where
        F: FormModel + ?Sized,
    {
        let mut valid = true;
        for key in self.options.fields_to_check(field) {
            valid &= reconcile_field(
                form,
                key,
                errors,
                self.options.policy,
                force,
                &self.options.summary_message,
            );
        }
        valid
    }

    fn start<'a, F>(&'a self, form: &'a F, scope: Scope<'a>) -> CallGuard<'a, F>
    where
        F: FormModel + ?Sized,
    {
        form.set_is_validating(true);
        let token = self.sequencer.begin(scope);
        debug!("Starting {} call {}", scope, token);

        CallGuard {
            form,
            sequencer: &self.sequencer,
            scope,
            token,
        }
    }

    /// Runs the schema over the current data. `None` means the call went
    /// stale while awaiting and its result, including any engine failure, is
    /// dropped.
    async fn run<F>(
        &self,
        form: &F,
        call: &CallGuard<'_, F>,
    ) -> Result<Option<ValidationOutcome<S::Output>>>
    where
        F: FormModel<Data = S::Input> + ?Sized,
    {
        let data = form.data();
        let result = self.schema.validate(&data).await;

        if !call.is_current() {
            match &result {
                Ok(_) => debug!("Discarding stale {} call {}", call.scope, call.token),
                Err(e) => debug!(
                    "Discarding stale {} call {} (engine failed: {})",
                    call.scope, call.token, e
                ),
            }
            return Ok(None);
        }

        result.map(Some)
    }
}

impl<S> std::fmt::Debug for FormValidator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidator")
            .field("options", &self.options)
            .field("sequencer", &self.sequencer)
            .finish_non_exhaustive()
    }
}

/// One in-flight validation call.
///
/// Dropping the guard lowers the validating flag, but only while the call is
/// still the latest for its scope. This covers normal completion, engine
/// failures and a dropped future alike; a superseded call leaves the flag to
/// the call that replaced it.
struct CallGuard<'a, F: FormModel + ?Sized> {
    form: &'a F,
    sequencer: &'a CallSequencer,
    scope: Scope<'a>,
    token: CallToken,
}

impl<F: FormModel + ?Sized> CallGuard<'_, F> {
    fn is_current(&self) -> bool {
        self.sequencer.is_current(self.token, self.scope)
    }
}

impl<F: FormModel + ?Sized> Drop for CallGuard<'_, F> {
    fn drop(&mut self) {
        if self.is_current() {
            self.form.set_is_validating(false);
        }
    }
}
