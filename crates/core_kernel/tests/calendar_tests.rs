//! Tests for calendar rules

use core_kernel::{days_in_month, is_leap_year, CalendarDate, CalendarError};
use proptest::prelude::*;

#[test]
fn test_month_lengths_in_common_year() {
    let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    for (index, days) in expected.iter().enumerate() {
        assert_eq!(days_in_month(index as u32 + 1, 2023), Some(*days));
    }
}

#[test]
fn test_leap_day_2024_is_valid() {
    assert!(CalendarDate::new(29, 2, 2024).is_ok());
}

#[test]
fn test_leap_day_2023_is_invalid() {
    assert_eq!(
        CalendarDate::new(29, 2, 2023),
        Err(CalendarError::InvalidDay { day: 29, month: 2, year: 2023 })
    );
}

#[test]
fn test_century_rule() {
    assert!(CalendarDate::new(29, 2, 2000).is_ok());
    assert!(CalendarDate::new(29, 2, 1900).is_err());
}

#[test]
fn test_day_zero_is_invalid() {
    assert!(CalendarDate::new(0, 1, 1990).is_err());
}

#[test]
fn test_to_naive_date() {
    let date = CalendarDate::new(15, 6, 1985).unwrap();
    let naive = date.to_naive_date().unwrap();
    assert_eq!(naive, chrono::NaiveDate::from_ymd_opt(1985, 6, 15).unwrap());
}

#[test]
fn test_is_future() {
    assert!(!CalendarDate::new(1, 1, 1990).unwrap().is_future());
    assert!(CalendarDate::new(1, 1, 9999).unwrap().is_future());
}

proptest! {
    #[test]
    fn leap_rule_matches_chrono(year in 1i32..9999i32) {
        let chrono_leap = chrono::NaiveDate::from_ymd_opt(year, 2, 29).is_some();
        prop_assert_eq!(is_leap_year(year), chrono_leap);
    }

    #[test]
    fn days_beyond_month_are_rejected(month in 1u32..=12u32, year in 1i32..9999i32, extra in 1u32..10u32) {
        let max = days_in_month(month, year).unwrap();
        prop_assert!(CalendarDate::new(max + extra, month, year).is_err());
        prop_assert!(CalendarDate::new(max, month, year).is_ok());
    }
}
