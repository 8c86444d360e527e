//! The form model seam.

mod state;

pub use state::FormState;

use crate::error_map::ErrorMap;

/// Trait for form containers that can receive validation results.
///
/// This trait provides a common interface for reading the data to validate
/// and for setting/clearing path-addressed errors. Mutators take `&self`;
/// implementors use interior mutability.
pub trait FormModel: Send + Sync {
    /// The value handed to the schema.
    type Data: Send + Sync;

    /// Snapshot of the current form data.
    fn data(&self) -> Self::Data;

    /// Snapshot of the current errors.
    fn errors(&self) -> ErrorMap;

    /// Whether the user has interacted with `field`.
    fn is_touched(&self, field: &str) -> bool;

    /// Set the validating flag.
    fn set_is_validating(&self, validating: bool);

    /// Replace every error.
    fn set_errors(&self, errors: ErrorMap);

    /// Set the errors for one path.
    fn set_error(&self, path: &str, messages: Vec<String>);

    /// Clear the errors for one path.
    fn remove_error(&self, path: &str);
}
