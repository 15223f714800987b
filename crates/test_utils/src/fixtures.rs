//! Pre-built Test Fixtures
//!
//! Provides ready-to-use inputs for each wizard step. These fixtures are
//! consistent and predictable, and all of them pass their step's validator.

use core_kernel::ClaimId;
use domain_claimant::{
    AddressDetails, AddressForm, PersonalDetailsForm, SignatureImage, UploadedSignature,
};
use domain_claims::ClaimDraft;

/// Fixture for step 1 data
pub struct AddressFixtures;

impl AddressFixtures {
    /// Postcode with five built-in addresses
    pub fn postcode() -> &'static str {
        "BN13JF"
    }

    /// The address used in the reference walkthrough
    pub fn address() -> &'static str {
        "3 Nyetimber Hill"
    }

    /// Everything the built-in lookup returns for [`Self::postcode`]
    pub fn offered() -> Vec<String> {
        (1..=5).map(|n| format!("{} Nyetimber Hill", n)).collect()
    }

    /// A well-formed postcode the built-in lookup knows nothing about
    pub fn unknown_postcode() -> &'static str {
        "ZZ99ZZ"
    }

    pub fn form() -> AddressForm {
        AddressForm::new(Self::postcode(), Self::address())
    }

    pub fn details() -> AddressDetails {
        AddressDetails {
            postcode: Self::postcode().to_string(),
            address: Self::address().to_string(),
        }
    }
}

/// Fixture for step 2 data
pub struct PersonalFixtures;

impl PersonalFixtures {
    pub fn form() -> PersonalDetailsForm {
        PersonalDetailsForm {
            title: "Mr".to_string(),
            first_name: "John".to_string(),
            last_name: "Smith-Jones".to_string(),
            email: "john.smith@example.com".to_string(),
            mobile_number: "07700900123".to_string(),
            dob_day: 15,
            dob_month: 6,
            dob_year: 1980,
        }
    }

    /// Born on 29 February of a leap year
    pub fn leap_day_form() -> PersonalDetailsForm {
        PersonalDetailsForm {
            dob_day: 29,
            dob_month: 2,
            dob_year: 2000,
            ..Self::form()
        }
    }

    /// 29 February of a common year; fails on the day field
    pub fn non_leap_day_form() -> PersonalDetailsForm {
        PersonalDetailsForm {
            dob_day: 29,
            dob_month: 2,
            dob_year: 2023,
            ..Self::form()
        }
    }
}

/// Fixture for step 3 data
pub struct SignatureFixtures;

impl SignatureFixtures {
    /// A 1x1 transparent PNG as a data URL
    pub fn data_url() -> &'static str {
        "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg=="
    }

    pub fn image() -> SignatureImage {
        SignatureImage::new(Self::data_url())
    }

    /// A pad with something drawn on it
    pub fn drawn_pad() -> UploadedSignature {
        UploadedSignature::new(Self::data_url())
    }

    /// A pad with nothing drawn
    pub fn blank_pad() -> UploadedSignature {
        UploadedSignature::default()
    }
}

/// Fixture for drafts at each stage
pub struct DraftFixtures;

impl DraftFixtures {
    /// Draft after step 1
    pub fn after_address(claim_id: u64) -> ClaimDraft {
        let mut draft = ClaimDraft::from(AddressFixtures::details());
        draft.claim_id = Some(ClaimId::new(claim_id));
        draft
    }

    /// Draft after step 2
    pub fn after_personal_details(claim_id: u64) -> ClaimDraft {
        let mut draft = Self::after_address(claim_id);
        draft.merge(&ClaimDraft {
            title: Some(domain_claimant::Title::Mr),
            first_name: Some("John".to_string()),
            last_name: Some("Smith-Jones".to_string()),
            email: Some("john.smith@example.com".to_string()),
            mobile_number: Some("07700900123".to_string()),
            dob_day: Some(15),
            dob_month: Some(6),
            dob_year: Some(1980),
            ..Default::default()
        });
        draft
    }

    /// Draft with every step complete
    pub fn complete(claim_id: u64) -> ClaimDraft {
        let mut draft = Self::after_personal_details(claim_id);
        draft.merge(&ClaimDraft::from(SignatureFixtures::image()));
        draft
    }
}
