//! Applying a converted batch of errors to a form.

use log::trace;

use crate::error_map::{ErrorMap, is_within};
use crate::form::FormModel;
use crate::options::FieldPolicy;

/// Applies `errors` to `field` under `policy` and reports whether the field
/// is valid.
pub(crate) fn reconcile_field<F: FormModel + ?Sized>(
    form: &F,
    field: &str,
    errors: &ErrorMap,
    policy: FieldPolicy,
    force: bool,
    summary: &str,
) -> bool {
    match policy {
        FieldPolicy::Touched => reconcile_touched(form, field, errors, force),
        FieldPolicy::Hierarchical => reconcile_hierarchical(form, field, errors, summary),
    }
}

fn reconcile_touched<F: FormModel + ?Sized>(form: &F, field: &str, errors: &ErrorMap, force: bool) -> bool {
    if !force && !form.is_touched(field) {
        trace!("Skipping untouched field '{}'", field);
        return !errors.contains(field);
    }

    match errors.get(field) {
        Some(messages) => {
            form.set_error(field, messages.to_vec());
            false
        }
        None => {
            form.remove_error(field);
            true
        }
    }
}

fn reconcile_hierarchical<F: FormModel + ?Sized>(
    form: &F,
    field: &str,
    errors: &ErrorMap,
    summary: &str,
) -> bool {
    // Clear first, unconditionally. A stale entry must not survive a run that
    // reported nothing for its exact path.
    let stale: Vec<String> = form
        .errors()
        .paths()
        .filter(|path| is_within(path, field))
        .map(str::to_string)
        .collect();
    for path in &stale {
        form.remove_error(path);
    }

    let mut direct = Vec::new();
    let mut children = Vec::new();
    for (path, messages) in errors.within(field) {
        if path == field {
            direct.extend_from_slice(messages);
        } else {
            children.push((path, messages));
        }
    }

    trace!(
        "Field '{}': cleared {}, {} direct, {} child paths",
        field,
        stale.len(),
        direct.len(),
        children.len()
    );

    if direct.is_empty() && children.is_empty() {
        return true;
    }

    if direct.is_empty() {
        form.set_error(field, vec![summary.to_string()]);
    } else {
        form.set_error(field, direct);
    }

    for (path, messages) in children {
        form.set_error(path, messages.to_vec());
    }

    false
}
