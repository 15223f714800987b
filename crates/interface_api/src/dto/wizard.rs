//! Wizard DTOs

use serde::{Deserialize, Serialize};

use domain_claims::{ClaimDraft, ResultsSummary, SubmissionReceipt, WizardController, WizardStep};

/// Snapshot of the wizard session returned by every wizard route
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardResponse {
    pub step: WizardStep,
    pub draft: ClaimDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ResultsSummary>,
    pub signature_saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<SubmissionReceipt>,
}

impl WizardResponse {
    pub fn from_controller(wizard: &WizardController) -> Self {
        Self {
            step: wizard.step(),
            draft: wizard.draft().clone(),
            summary: wizard.summary(),
            signature_saved: wizard.pending_signature().is_some(),
            receipt: wizard.last_receipt().cloned(),
        }
    }
}

/// Addresses offered for a postcode
#[derive(Debug, Serialize, Deserialize)]
pub struct AddressesResponse {
    pub postcode: String,
    pub addresses: Vec<String>,
}

/// Exported signature pad image
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveSignatureRequest {
    pub image: String,
}
