//! The accumulating claim record
//!
//! A [`ClaimDraft`] starts empty and grows one step at a time. Steps never
//! replace the record; each contributes a partial draft that is merged in,
//! so fields written by an earlier step survive every later merge.

use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

use core_kernel::ClaimId;
use domain_claimant::{AddressDetails, PersonalDetails, SignatureImage, Title};

use crate::workflow::WizardStep;

/// The in-progress claim, as persisted under the `formData` key
///
/// Keys are camelCase. Records written by the earlier form used a handful of
/// snake_case keys and `signatureDataUrl` / `databaseId`; those are still
/// accepted on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDraft {
    #[serde(default, alias = "databaseId", skip_serializing_if = "Option::is_none")]
    pub claim_id: Option<ClaimId>,

    // Step 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    // Step 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        alias = "mobile_number",
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub mobile_number: Option<String>,
    #[serde(
        default,
        alias = "dob_day",
        deserialize_with = "number_or_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dob_day: Option<u32>,
    #[serde(
        default,
        alias = "dob_month",
        deserialize_with = "number_or_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dob_month: Option<u32>,
    #[serde(
        default,
        alias = "dob_year",
        deserialize_with = "number_or_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dob_year: Option<i32>,

    // Step 3
    #[serde(default, alias = "signatureDataUrl", skip_serializing_if = "Option::is_none")]
    pub signature_image: Option<SignatureImage>,
}

/// A JSON value the earlier form may have written as either a string or a number
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose<T> {
    Number(T),
    Text(String),
}

/// Reads a string field that older records stored as a JSON number
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Loose<u64>>::deserialize(deserializer)?.map(|value| match value {
        Loose::Number(number) => number.to_string(),
        Loose::Text(text) => text,
    }))
}

/// Reads a numeric field that may arrive as a numeric string
fn number_or_text<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<Loose<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Loose::Number(number)) => Ok(Some(number)),
        Some(Loose::Text(text)) => text.trim().parse().map(Some).map_err(de::Error::custom),
    }
}

fn fill<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if let Some(value) = value {
        *slot = Some(value.clone());
    }
}

impl ClaimDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unions the present fields of `patch` into this draft
    ///
    /// Absent fields in the patch leave the existing value untouched.
    pub fn merge(&mut self, patch: &ClaimDraft) {
        fill(&mut self.claim_id, &patch.claim_id);
        fill(&mut self.postcode, &patch.postcode);
        fill(&mut self.address, &patch.address);
        fill(&mut self.title, &patch.title);
        fill(&mut self.first_name, &patch.first_name);
        fill(&mut self.last_name, &patch.last_name);
        fill(&mut self.email, &patch.email);
        fill(&mut self.mobile_number, &patch.mobile_number);
        fill(&mut self.dob_day, &patch.dob_day);
        fill(&mut self.dob_month, &patch.dob_month);
        fill(&mut self.dob_year, &patch.dob_year);
        fill(&mut self.signature_image, &patch.signature_image);
    }

    pub fn is_empty(&self) -> bool {
        *self == ClaimDraft::default()
    }

    pub fn has_address(&self) -> bool {
        self.postcode.is_some() && self.address.is_some()
    }

    pub fn has_personal_details(&self) -> bool {
        self.title.is_some()
            && self.first_name.is_some()
            && self.last_name.is_some()
            && self.email.is_some()
            && self.mobile_number.is_some()
            && self.dob_day.is_some()
            && self.dob_month.is_some()
            && self.dob_year.is_some()
    }

    pub fn has_signature(&self) -> bool {
        self.signature_image
            .as_ref()
            .is_some_and(|image| !image.is_blank())
    }

    /// The furthest step this draft's data supports: the first step whose
    /// fields are still missing, or Results when all are present
    pub fn reachable_step(&self) -> WizardStep {
        if !self.has_address() {
            WizardStep::Address
        } else if !self.has_personal_details() {
            WizardStep::PersonalDetails
        } else if !self.has_signature() {
            WizardStep::Signature
        } else {
            WizardStep::Results
        }
    }

    /// Builds the read-only view shown on the results step
    pub fn summary(&self) -> ResultsSummary {
        let date_of_birth = match (self.dob_day, self.dob_month, self.dob_year) {
            (Some(day), Some(month), Some(year)) => format!("{}/{}/{}", day, month, year),
            _ => String::new(),
        };
        let address_line = match (&self.address, &self.postcode) {
            (Some(address), Some(postcode)) => format!("{}, {}", address, postcode),
            (Some(address), None) => address.clone(),
            (None, Some(postcode)) => postcode.clone(),
            (None, None) => String::new(),
        };

        ResultsSummary {
            claim_id: self.claim_id,
            title: self.title.map(|t| t.to_string()).unwrap_or_default(),
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            mobile_number: self.mobile_number.clone().unwrap_or_default(),
            date_of_birth,
            address_line,
            has_signature: self.has_signature(),
        }
    }
}

impl From<AddressDetails> for ClaimDraft {
    fn from(details: AddressDetails) -> Self {
        Self {
            postcode: Some(details.postcode),
            address: Some(details.address),
            ..Default::default()
        }
    }
}

impl From<PersonalDetails> for ClaimDraft {
    fn from(details: PersonalDetails) -> Self {
        let dob = details.date_of_birth;
        Self {
            title: Some(details.title),
            first_name: Some(details.first_name),
            last_name: Some(details.last_name),
            email: Some(details.email),
            mobile_number: Some(details.mobile_number),
            dob_day: Some(dob.day()),
            dob_month: Some(dob.month()),
            dob_year: Some(dob.year()),
            ..Default::default()
        }
    }
}

impl From<SignatureImage> for ClaimDraft {
    fn from(image: SignatureImage) -> Self {
        Self {
            signature_image: Some(image),
            ..Default::default()
        }
    }
}

/// What the results step displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub claim_id: Option<ClaimId>,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_number: String,
    /// `d/m/yyyy`
    pub date_of_birth: String,
    /// `"<address>, <postcode>"`
    pub address_line: String,
    pub has_signature: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address_patch() -> ClaimDraft {
        ClaimDraft::from(AddressDetails {
            postcode: "BN13JF".to_string(),
            address: "3 Nyetimber Hill".to_string(),
        })
    }

    #[test]
    fn test_merge_keeps_earlier_fields() {
        let mut draft = address_patch();
        draft.merge(&ClaimDraft::from(SignatureImage::new("data:image/png;base64,AAAA")));

        assert_eq!(draft.postcode.as_deref(), Some("BN13JF"));
        assert_eq!(draft.address.as_deref(), Some("3 Nyetimber Hill"));
        assert!(draft.has_signature());
    }

    #[test]
    fn test_merge_with_empty_patch_is_noop() {
        let mut draft = address_patch();
        let before = draft.clone();
        draft.merge(&ClaimDraft::new());
        assert_eq!(draft, before);
    }

    #[test]
    fn test_reachable_step_follows_missing_data() {
        let mut draft = ClaimDraft::new();
        assert_eq!(draft.reachable_step(), WizardStep::Address);

        draft.merge(&address_patch());
        assert_eq!(draft.reachable_step(), WizardStep::PersonalDetails);
    }

    #[test]
    fn test_blank_signature_does_not_count() {
        let draft = ClaimDraft::from(SignatureImage::new(""));
        assert!(!draft.has_signature());
    }

    #[test]
    fn test_legacy_keys_are_accepted() {
        let json = r#"{
            "databaseId": "7",
            "postcode": "BN13JF",
            "address": "1 Nyetimber Hill",
            "mobile_number": "07700900123",
            "dob_day": 29,
            "dob_month": 2,
            "dob_year": 2024,
            "signatureDataUrl": "data:image/png;base64,AAAA"
        }"#;

        let draft: ClaimDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.claim_id, Some(ClaimId::new(7)));
        assert_eq!(draft.mobile_number.as_deref(), Some("07700900123"));
        assert_eq!(draft.dob_day, Some(29));
        assert!(draft.has_signature());
    }

    #[test]
    fn test_legacy_numeric_values_are_accepted() {
        let json = r#"{
            "databaseId": 7,
            "mobile_number": 7700900123,
            "dob_day": "15",
            "dob_month": 6,
            "dob_year": "1980"
        }"#;

        let draft: ClaimDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.claim_id, Some(ClaimId::new(7)));
        assert_eq!(draft.mobile_number.as_deref(), Some("7700900123"));
        assert_eq!((draft.dob_day, draft.dob_month, draft.dob_year), (Some(15), Some(6), Some(1980)));

        let rewritten = serde_json::to_value(&draft).unwrap();
        assert_eq!(rewritten["claimId"], "7");
        assert_eq!(rewritten["mobileNumber"], "7700900123");
    }

    #[test]
    fn test_non_numeric_day_is_rejected() {
        assert!(serde_json::from_str::<ClaimDraft>(r#"{"dobDay":"fifteen"}"#).is_err());
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent() {
        let json = serde_json::to_value(address_patch()).unwrap();
        assert_eq!(json["postcode"], "BN13JF");
        assert!(json.get("firstName").is_none());
        assert!(json.get("claimId").is_none());
    }

    #[test]
    fn test_summary_formats() {
        let mut draft = address_patch();
        draft.dob_day = Some(5);
        draft.dob_month = Some(11);
        draft.dob_year = Some(1988);

        let summary = draft.summary();
        assert_eq!(summary.address_line, "3 Nyetimber Hill, BN13JF");
        assert_eq!(summary.date_of_birth, "5/11/1988");
        assert!(!summary.has_signature);
    }
}
