//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating step inputs, both ones that
//! satisfy the validators and ones that break exactly one rule.

use core_kernel::{current_year, days_in_month};
use domain_claimant::{PersonalDetailsForm, Title};
use proptest::prelude::*;

use crate::fixtures::{AddressFixtures, PersonalFixtures};

/// Strategy for well-formed postcodes (alphanumeric, 5-8 characters)
pub fn valid_postcode_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9]{5,8}"
}

/// Strategy for postcodes that break the length rule
pub fn wrong_length_postcode_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[A-Z0-9]{1,4}", "[A-Z0-9]{9,12}"]
}

/// Strategy picking one of the built-in Nyetimber Hill addresses
pub fn offered_address_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(AddressFixtures::offered())
}

/// Strategy for every accepted title
pub fn title_strategy() -> impl Strategy<Value = Title> {
    prop::sample::select(Title::ALL.to_vec())
}

/// Strategy for names made of letters and single hyphens
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,12}(-[A-Z][a-z]{1,12})?"
}

/// Strategy for mobile numbers of 10-15 digits
pub fn valid_mobile_strategy() -> impl Strategy<Value = String> {
    "[0-9]{10,15}"
}

/// Strategy for all-digit mobile numbers outside 10-15 digits
pub fn wrong_length_mobile_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{1,9}", "[0-9]{16,20}"]
}

/// Strategy for dates of birth that fit their month, 1900 up to last year
pub fn valid_dob_strategy() -> impl Strategy<Value = (i64, i64, i64)> {
    let last_year = i64::from(current_year()) - 1;
    (1900i64..=last_year, 1i64..=12).prop_flat_map(|(year, month)| {
        let max = i64::from(days_in_month(month as u32, year as i32).unwrap_or(28));
        (1i64..=max).prop_map(move |day| (day, month, year))
    })
}

/// Strategy for dates whose day runs past the end of the month
pub fn overflowing_dob_strategy() -> impl Strategy<Value = (i64, i64, i64)> {
    let last_year = i64::from(current_year()) - 1;
    (1900i64..=last_year, 1i64..=12, 1i64..=10).prop_map(|(year, month, overflow)| {
        let max = i64::from(days_in_month(month as u32, year as i32).unwrap_or(28));
        (max + overflow, month, year)
    })
}

/// Strategy for complete personal-details forms that pass validation
pub fn valid_personal_form_strategy() -> impl Strategy<Value = PersonalDetailsForm> {
    (
        title_strategy(),
        name_strategy(),
        name_strategy(),
        valid_mobile_strategy(),
        valid_dob_strategy(),
    )
        .prop_map(|(title, first_name, last_name, mobile_number, (day, month, year))| {
            PersonalDetailsForm {
                title: title.to_string(),
                email: format!("{}@example.com", first_name.to_lowercase()),
                first_name,
                last_name,
                mobile_number,
                dob_day: day,
                dob_month: month,
                dob_year: year,
            }
        })
}

/// Strategy for the fixture form with only the mobile number replaced
pub fn personal_form_with_mobile(
    mobile: impl Strategy<Value = String>,
) -> impl Strategy<Value = PersonalDetailsForm> {
    mobile.prop_map(|mobile_number| PersonalDetailsForm {
        mobile_number,
        ..PersonalFixtures::form()
    })
}
