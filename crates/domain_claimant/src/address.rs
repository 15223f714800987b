//! Address step: postcode shape and address selection
//!
//! The postcode-to-address lookup is an external collaborator. The validator
//! only accepts an address that the lookup actually offered for the postcode
//! being submitted.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use core_kernel::DomainPort;

use crate::error::ClaimantError;
use crate::validation::{Field, Rule, ValidationErrors, ValidationReport};

static POSTCODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("postcode pattern is valid"));

/// Shortest accepted postcode
pub const POSTCODE_MIN_LEN: usize = 5;
/// Longest accepted postcode
pub const POSTCODE_MAX_LEN: usize = 8;

/// Port to the postcode-to-address lookup
///
/// Returns a finite, ordered list of address lines. An empty list means the
/// postcode has no matches; it is not an error.
pub trait AddressLookup: DomainPort {
    fn lookup(&self, postcode: &str) -> Vec<String>;
}

/// Raw step-one input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressForm {
    pub postcode: String,
    pub address: String,
}

impl AddressForm {
    pub fn new(postcode: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            postcode: postcode.into(),
            address: address.into(),
        }
    }
}

/// Validated step-one output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDetails {
    pub postcode: String,
    pub address: String,
}

const POSTCODE_RULES: &[Rule<str>] = &[
    Rule::new(Field::Postcode, "Postcode is required", |p| !p.is_empty()),
    Rule::new(
        Field::Postcode,
        "Postcode may only contain letters and numbers",
        |p| POSTCODE_PATTERN.is_match(p),
    ),
    Rule::new(
        Field::Postcode,
        "Postcode must be between 5 and 8 characters",
        |p| (POSTCODE_MIN_LEN..=POSTCODE_MAX_LEN).contains(&p.chars().count()),
    ),
];

/// Validator for the address step
pub struct AddressValidator;

impl AddressValidator {
    /// Checks postcode shape only, returning the trimmed postcode
    pub fn validate_postcode(postcode: &str) -> Result<String, ValidationErrors> {
        let postcode = postcode.trim();
        let mut report = ValidationReport::new();
        report.apply(POSTCODE_RULES, postcode);
        report.finish(|| postcode.to_string())
    }

    /// Validates the full address step against the lookup
    ///
    /// The address must be non-empty and one of the lines the lookup returns
    /// for the submitted postcode. Membership is only checked once the
    /// postcode itself is well-formed.
    pub fn validate(
        form: &AddressForm,
        lookup: &dyn AddressLookup,
    ) -> Result<AddressDetails, ValidationErrors> {
        let postcode = form.postcode.trim();
        let address = form.address.trim();

        let mut report = ValidationReport::new();
        report.apply(POSTCODE_RULES, postcode);

        if address.is_empty() {
            report.add_error(Field::Address, "Select an address");
        } else if report.is_valid() {
            let offered = lookup.lookup(postcode);
            if !offered.iter().any(|candidate| candidate == address) {
                debug!(postcode, offered = offered.len(), "address not offered for postcode");
                report.add_error(Field::Address, "Select an address from the list for this postcode");
            }
        }

        report.finish(|| AddressDetails {
            postcode: postcode.to_string(),
            address: address.to_string(),
        })
    }
}

/// Lookup backed by a fixed postcode table
///
/// Keys are matched ignoring case and whitespace, so `bn1 3jf` finds the
/// `BN13JF` entry.
#[derive(Debug, Clone, Default)]
pub struct StaticAddressLookup {
    entries: HashMap<String, Vec<String>>,
}

fn normalize_postcode(postcode: &str) -> String {
    postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

impl StaticAddressLookup {
    /// Creates a lookup from `(postcode, addresses)` pairs
    pub fn from_entries<I, P, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, Vec<A>)>,
        P: AsRef<str>,
        A: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(postcode, addresses)| {
                (
                    normalize_postcode(postcode.as_ref()),
                    addresses.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// The built-in demonstration table
    pub fn builtin() -> Self {
        Self::from_entries([
            (
                "BN13JF",
                vec![
                    "1 Nyetimber Hill",
                    "2 Nyetimber Hill",
                    "3 Nyetimber Hill",
                    "4 Nyetimber Hill",
                    "5 Nyetimber Hill",
                ],
            ),
            (
                "SW1A1AA",
                vec!["Buckingham Palace"],
            ),
            (
                "M11AE",
                vec![
                    "Flat 1, 10 Piccadilly",
                    "Flat 2, 10 Piccadilly",
                    "Flat 3, 10 Piccadilly",
                ],
            ),
            (
                "EH11YZ",
                vec!["12 Royal Mile", "14 Royal Mile"],
            ),
        ])
    }

    /// Parses a JSON object of `{ "<postcode>": ["address", ...] }`
    pub fn from_json_str(json: &str) -> Result<Self, ClaimantError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::from_entries(raw))
    }

    /// Loads an address book file in the JSON format above
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClaimantError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ClaimantError::address_book(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Number of postcodes known to the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DomainPort for StaticAddressLookup {}

impl AddressLookup for StaticAddressLookup {
    fn lookup(&self, postcode: &str) -> Vec<String> {
        self.entries
            .get(&normalize_postcode(postcode))
            .cloned()
            .unwrap_or_default()
    }
}
