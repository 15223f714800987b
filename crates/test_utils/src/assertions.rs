//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for wizard types that give
//! more meaningful error messages than standard assertions.

use std::collections::BTreeMap;

use domain_claimant::{Field, ValidationErrors};
use domain_claims::{ClaimDraft, WizardError};

/// Asserts that a wizard error is a validation failure mentioning `field`
///
/// # Panics
///
/// Panics if the error is not a validation error or has no entry for the field
pub fn assert_blocked_on(error: &WizardError, field: Field) {
    match error.validation_errors() {
        Some(errors) => assert_field_error(errors, field),
        None => panic!("Expected validation error on {}, got: {}", field, error),
    }
}

/// Asserts that validation errors include `field`
pub fn assert_field_error(errors: &ValidationErrors, field: Field) {
    assert!(
        errors.has_error_for(field),
        "Expected an error for {}, got errors for {:?}",
        field,
        errors.fields()
    );
}

/// Asserts that validation errors cover exactly `fields`, in order
pub fn assert_only_fields(errors: &ValidationErrors, fields: &[Field]) {
    assert_eq!(
        errors.fields(),
        fields,
        "Unexpected set of failing fields"
    );
}

/// Asserts that every field present in `before` has the same value in `after`
///
/// This is the merge-only rule: later steps add to the draft and never clear
/// or rewrite what earlier steps wrote.
pub fn assert_draft_preserves(before: &ClaimDraft, after: &ClaimDraft) {
    let after_fields = draft_fields(after);

    for (key, value) in draft_fields(before) {
        assert_eq!(
            after_fields.get(key),
            Some(&value),
            "Field {} changed or disappeared after merge",
            key
        );
    }
}

fn draft_fields(draft: &ClaimDraft) -> BTreeMap<&'static str, String> {
    let pairs = [
        ("claimId", draft.claim_id.map(|id| id.to_string())),
        ("postcode", draft.postcode.clone()),
        ("address", draft.address.clone()),
        ("title", draft.title.map(|t| t.to_string())),
        ("firstName", draft.first_name.clone()),
        ("lastName", draft.last_name.clone()),
        ("email", draft.email.clone()),
        ("mobileNumber", draft.mobile_number.clone()),
        ("dobDay", draft.dob_day.map(|d| d.to_string())),
        ("dobMonth", draft.dob_month.map(|m| m.to_string())),
        ("dobYear", draft.dob_year.map(|y| y.to_string())),
        (
            "signatureImage",
            draft.signature_image.as_ref().map(|s| s.as_str().to_string()),
        ),
    ];
    pairs
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
}
