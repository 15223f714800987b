//! Field validation engine
//!
//! Rules are plain data: a field, a predicate and the message shown when the
//! predicate fails. Step validators keep one static table of rules per form
//! and run it top to bottom on every submit attempt.
//!
//! # Evaluation
//!
//! - Rules are checked in table order
//! - Once a field has failed, its remaining rules are skipped, so each field
//!   reports the first problem only
//! - Rules for other fields still run; a submit returns every failing field

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Form fields that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Postcode,
    Address,
    Title,
    FirstName,
    LastName,
    Email,
    MobileNumber,
    DobDay,
    DobMonth,
    DobYear,
    Signature,
}

impl Field {
    /// Returns the form key of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Postcode => "postcode",
            Field::Address => "address",
            Field::Title => "title",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::MobileNumber => "mobileNumber",
            Field::DobDay => "dobDay",
            Field::DobMonth => "dobMonth",
            Field::DobYear => "dobYear",
            Field::Signature => "signature",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation failure scoped to one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Non-empty list of field errors returned by a failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(transparent)]
#[error("Validation failed: {}", join_errors(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Creates an error list holding a single field error
    pub fn single(field: Field, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    /// Returns all field errors in the order they were found
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns the errors attached to one field
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter(move |e| e.field == field)
    }

    /// Returns true if any error is attached to the field
    pub fn has_error_for(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Returns the distinct fields carrying errors
    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = Vec::new();
        for error in &self.0 {
            if !fields.contains(&error.field) {
                fields.push(error.field);
            }
        }
        fields
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Accumulator for field errors during one validation pass
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error to the report
    pub fn add_error(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Returns true if the field already failed
    pub fn has_error_for(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Returns true while no error has been recorded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Runs a rule table against an input
    pub fn apply<T: ?Sized>(&mut self, rules: &[Rule<T>], input: &T) {
        for rule in rules {
            if self.has_error_for(rule.field) {
                continue;
            }
            if !(rule.check)(input) {
                self.add_error(rule.field, rule.message);
            }
        }
    }

    /// Finishes the pass, yielding the value only if nothing failed
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// A single validation rule: predicate plus the message shown on failure
pub struct Rule<T: ?Sized> {
    pub field: Field,
    pub message: &'static str,
    pub check: fn(&T) -> bool,
}

impl<T: ?Sized> Rule<T> {
    pub const fn new(field: Field, message: &'static str, check: fn(&T) -> bool) -> Self {
        Self {
            field,
            message,
            check,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        name: &'static str,
        age: i32,
    }

    const SAMPLE_RULES: &[Rule<Sample>] = &[
        Rule::new(Field::FirstName, "required", |p| !p.name.is_empty()),
        Rule::new(Field::FirstName, "too short", |p| p.name.len() > 2),
        Rule::new(Field::DobYear, "negative", |p| p.age >= 0),
    ];

    #[test]
    fn test_first_failure_per_field_only() {
        let mut report = ValidationReport::new();
        report.apply(SAMPLE_RULES, &Sample { name: "", age: -1 });
        let errors = report.finish(|| ()).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.for_field(Field::FirstName).count(), 1);
        assert_eq!(errors.errors()[0].message, "required");
        assert!(errors.has_error_for(Field::DobYear));
    }

    #[test]
    fn test_finish_ok_when_clean() {
        let mut report = ValidationReport::new();
        report.apply(SAMPLE_RULES, &Sample { name: "Ann", age: 30 });
        assert_eq!(report.finish(|| 7).unwrap(), 7);
    }


    #[test]
    fn test_display_lists_fields() {
        let errors = ValidationErrors::single(Field::Postcode, "Postcode is required");
        assert_eq!(
            errors.to_string(),
            "Validation failed: postcode: Postcode is required"
        );
    }

    #[test]
    fn test_field_serializes_camel_case() {
        let json = serde_json::to_string(&Field::MobileNumber).unwrap();
        assert_eq!(json, "\"mobileNumber\"");
    }
}
