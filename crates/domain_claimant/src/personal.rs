//! Personal-details step
//!
//! # Validation Rules
//!
//! - Title must be one of the fixed honorifics
//! - First and last name: required, letters and hyphens only
//! - Email must have a mailbox shape
//! - Mobile number: digits only, 10 to 15 of them
//! - Date of birth: month 1-12, day within the month (29 February only in
//!   leap years), year from 1900, and not in the future

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::ValidateEmail;

use core_kernel::{current_year, days_in_month, CalendarDate};

use crate::validation::{Field, Rule, ValidationErrors, ValidationReport};

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}-]+$").expect("name pattern is valid"));

/// Shortest accepted mobile number, in digits
pub const MOBILE_MIN_DIGITS: usize = 10;
/// Longest accepted mobile number, in digits
pub const MOBILE_MAX_DIGITS: usize = 15;
/// Earliest accepted birth year
pub const EARLIEST_BIRTH_YEAR: i64 = 1900;

/// Honorific chosen from a fixed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Title {
    Mr,
    Mrs,
    Ms,
    Miss,
    Dr,
    Prof,
    Rev,
    Sir,
    Lady,
    Lord,
}

impl Title {
    pub const ALL: [Title; 10] = [
        Title::Mr,
        Title::Mrs,
        Title::Ms,
        Title::Miss,
        Title::Dr,
        Title::Prof,
        Title::Rev,
        Title::Sir,
        Title::Lady,
        Title::Lord,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Mr => "Mr",
            Title::Mrs => "Mrs",
            Title::Ms => "Ms",
            Title::Miss => "Miss",
            Title::Dr => "Dr",
            Title::Prof => "Prof",
            Title::Rev => "Rev",
            Title::Sir => "Sir",
            Title::Lady => "Lady",
            Title::Lord => "Lord",
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Title {
    type Err = String;

    /// Case-insensitive; a trailing full stop (`Dr.`) is tolerated
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = s.trim().trim_end_matches('.');
        Title::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(candidate))
            .ok_or_else(|| format!("Unknown title: {}", s))
    }
}

impl TryFrom<String> for Title {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Title> for String {
    fn from(title: Title) -> String {
        title.as_str().to_string()
    }
}

/// Raw step-two input as submitted by the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetailsForm {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_number: String,
    pub dob_day: i64,
    pub dob_month: i64,
    pub dob_year: i64,
}

impl PersonalDetailsForm {
    /// Copy with surrounding whitespace removed from every text input
    fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            mobile_number: self.mobile_number.trim().to_string(),
            ..self.clone()
        }
    }

    /// Day bound for the submitted month and year, or 31 when the month is unusable
    fn max_day(&self) -> i64 {
        let month = u32::try_from(self.dob_month).ok();
        let year = i32::try_from(self.dob_year).ok();
        match (month, year) {
            (Some(month), Some(year)) => days_in_month(month, year).map(i64::from).unwrap_or(31),
            _ => 31,
        }
    }

    fn calendar_date(&self) -> Option<CalendarDate> {
        let day = u32::try_from(self.dob_day).ok()?;
        let month = u32::try_from(self.dob_month).ok()?;
        let year = i32::try_from(self.dob_year).ok()?;
        CalendarDate::new(day, month, year).ok()
    }
}

/// Validated step-two output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub title: Title,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Digits only
    pub mobile_number: String,
    pub date_of_birth: CalendarDate,
}

fn is_name(value: &str) -> bool {
    NAME_PATTERN.is_match(value)
}

const PERSONAL_RULES: &[Rule<PersonalDetailsForm>] = &[
    Rule::new(Field::Title, "Title is required", |f| !f.title.is_empty()),
    Rule::new(
        Field::Title,
        "Title must be one of Mr, Mrs, Ms, Miss, Dr, Prof, Rev, Sir, Lady, Lord",
        |f| f.title.parse::<Title>().is_ok(),
    ),
    Rule::new(Field::FirstName, "First name is required", |f| !f.first_name.is_empty()),
    Rule::new(
        Field::FirstName,
        "First name may only contain letters and hyphens",
        |f| is_name(&f.first_name),
    ),
    Rule::new(Field::LastName, "Last name is required", |f| !f.last_name.is_empty()),
    Rule::new(
        Field::LastName,
        "Last name may only contain letters and hyphens",
        |f| is_name(&f.last_name),
    ),
    Rule::new(Field::Email, "Email is required", |f| !f.email.is_empty()),
    Rule::new(Field::Email, "Enter a valid email address", |f| f.email.validate_email()),
    Rule::new(Field::MobileNumber, "Mobile number is required", |f| {
        !f.mobile_number.is_empty()
    }),
    Rule::new(
        Field::MobileNumber,
        "Mobile number may only contain digits",
        |f| f.mobile_number.chars().all(|c| c.is_ascii_digit()),
    ),
    Rule::new(
        Field::MobileNumber,
        "Mobile number must be between 10 and 15 digits",
        |f| (MOBILE_MIN_DIGITS..=MOBILE_MAX_DIGITS).contains(&f.mobile_number.len()),
    ),
    Rule::new(Field::DobMonth, "Month must be between 1 and 12", |f| {
        (1..=12).contains(&f.dob_month)
    }),
    Rule::new(Field::DobDay, "Day is not valid for the selected month", |f| {
        f.dob_day >= 1 && f.dob_day <= f.max_day()
    }),
    Rule::new(Field::DobYear, "Year must be 1900 or later", |f| {
        f.dob_year >= EARLIEST_BIRTH_YEAR
    }),
    Rule::new(Field::DobYear, "Date of birth cannot be in the future", |f| {
        match f.calendar_date() {
            Some(date) => !date.is_future(),
            None => f.dob_year <= i64::from(current_year()),
        }
    }),
];

/// Validator for the personal-details step
pub struct PersonalDetailsValidator;

impl PersonalDetailsValidator {
    /// Validates the form, returning trimmed and typed values
    pub fn validate(form: &PersonalDetailsForm) -> Result<PersonalDetails, ValidationErrors> {
        let form = form.trimmed();
        let mut report = ValidationReport::new();
        report.apply(PERSONAL_RULES, &form);

        report.finish(|| ())?;

        // Every rule passed, so both conversions succeed
        match (form.title.parse::<Title>(), form.calendar_date()) {
            (Ok(title), Some(date_of_birth)) => Ok(PersonalDetails {
                title,
                first_name: form.first_name,
                last_name: form.last_name,
                email: form.email,
                mobile_number: form.mobile_number,
                date_of_birth,
            }),
            _ => Err(ValidationErrors::single(Field::DobYear, "Date of birth is not valid")),
        }
    }
}
