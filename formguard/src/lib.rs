//! Race-guarded schema validation for stateful forms.
//!
//! This crate sits between an asynchronous schema engine ([`Schema`]) and a
//! form container ([`FormModel`]). It turns the engine's flat list of
//! path-addressed issues into per-field errors, and makes sure a slow,
//! outdated validation run can never overwrite the results of a newer one.
//!
//! # Example
//!
//! ```ignore
//! use formguard::{FormState, FormValidator, ValidatorOptions};
//!
//! let validator = FormValidator::with_options(
//!     schema,
//!     ValidatorOptions::new().with_dependency("password", ["confirmPassword"]),
//! );
//! let form = FormState::new(json!({ "password": "", "confirmPassword": "" }));
//!
//! if !validator.validate_field("password", &form, false).await? {
//!     println!("{:?}", form.error("password"));
//! }
//! ```

pub mod error;
pub mod error_map;
pub mod form;
pub mod issue;
pub mod options;
pub mod schema;
pub mod sequencer;

mod reconcile;
mod validator;

pub use error::{Result, ValidationError};
pub use error_map::{ErrorMap, FORM_ERROR_KEY, convert_issues};
pub use form::{FormModel, FormState};
pub use issue::{PathSegment, ValidationIssue};
pub use options::{FieldPolicy, ValidatorOptions};
pub use schema::{FnSchema, Schema, ValidationOutcome, schema_fn};
pub use validator::FormValidator;
