//! Wizard handlers
//!
//! Every mutating route returns the full session snapshot so a client can
//! render whichever step the wizard landed on.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use domain_claimant::{AddressForm, PersonalDetailsForm, UploadedSignature};
use domain_claims::SubmissionReceipt;

use crate::dto::{AddressesResponse, SaveSignatureRequest, WizardResponse};
use crate::error::ApiError;
use crate::AppState;

/// Current step and draft
pub async fn get_wizard(State(state): State<AppState>) -> Json<WizardResponse> {
    let wizard = state.wizard.lock().await;
    Json(WizardResponse::from_controller(&wizard))
}

/// Addresses for a postcode
pub async fn lookup_addresses(
    State(state): State<AppState>,
    Path(postcode): Path<String>,
) -> Result<Json<AddressesResponse>, ApiError> {
    let wizard = state.wizard.lock().await;
    let addresses = wizard.lookup_addresses(&postcode)?;
    Ok(Json(AddressesResponse {
        postcode,
        addresses,
    }))
}

/// Step 1 submit
pub async fn submit_address(
    State(state): State<AppState>,
    body: Result<Json<AddressForm>, JsonRejection>,
) -> Result<Json<WizardResponse>, ApiError> {
    let Json(form) = body?;
    let mut wizard = state.wizard.lock().await;
    wizard.submit_address(&form)?;
    Ok(Json(WizardResponse::from_controller(&wizard)))
}

/// Step 2 submit
pub async fn submit_personal_details(
    State(state): State<AppState>,
    body: Result<Json<PersonalDetailsForm>, JsonRejection>,
) -> Result<Json<WizardResponse>, ApiError> {
    let Json(form) = body?;
    let mut wizard = state.wizard.lock().await;
    wizard.submit_personal_details(&form)?;
    Ok(Json(WizardResponse::from_controller(&wizard)))
}

/// Saves the exported pad image as the pending signature
pub async fn save_signature(
    State(state): State<AppState>,
    body: Result<Json<SaveSignatureRequest>, JsonRejection>,
) -> Result<Json<WizardResponse>, ApiError> {
    let Json(request) = body?;
    let mut wizard = state.wizard.lock().await;
    let mut pad = UploadedSignature::new(request.image);
    wizard.save_signature(&mut pad)?;
    Ok(Json(WizardResponse::from_controller(&wizard)))
}

/// Clears the pad; a signature saved earlier is kept
pub async fn clear_signature(
    State(state): State<AppState>,
) -> Result<Json<WizardResponse>, ApiError> {
    let mut wizard = state.wizard.lock().await;
    wizard.clear_signature(&mut UploadedSignature::default())?;
    Ok(Json(WizardResponse::from_controller(&wizard)))
}

/// Step 3 submit
pub async fn submit_signature(
    State(state): State<AppState>,
) -> Result<Json<WizardResponse>, ApiError> {
    let mut wizard = state.wizard.lock().await;
    wizard.submit_signature()?;
    Ok(Json(WizardResponse::from_controller(&wizard)))
}

pub async fn back(State(state): State<AppState>) -> Result<Json<WizardResponse>, ApiError> {
    let mut wizard = state.wizard.lock().await;
    wizard.back()?;
    Ok(Json(WizardResponse::from_controller(&wizard)))
}

/// Clears the session and starts a new claim
pub async fn reset(State(state): State<AppState>) -> Result<Json<WizardResponse>, ApiError> {
    let mut wizard = state.wizard.lock().await;
    wizard.reset()?;
    Ok(Json(WizardResponse::from_controller(&wizard)))
}

/// Retries handing the completed claim to the submission sink
pub async fn submit_claim(
    State(state): State<AppState>,
) -> Result<Json<SubmissionReceipt>, ApiError> {
    let mut wizard = state.wizard.lock().await;
    let receipt = wizard.submit()?;
    Ok(Json(receipt))
}
