//! Tests for core_kernel error types

use core_kernel::calendar::CalendarError;
use core_kernel::error::CoreError;
use core_kernel::ClaimId;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_from_calendar_error() {
    let calendar_error = CalendarError::InvalidMonth(13);
    let core_error: CoreError = calendar_error.into();

    assert!(matches!(core_error, CoreError::Calendar(_)));
    assert!(core_error.to_string().contains("13"));
}

#[test]
fn test_bad_claim_id_reports_input() {
    let error = "CLM-abc".parse::<ClaimId>().unwrap_err();
    assert!(error.to_string().contains("CLM-abc"));
}
