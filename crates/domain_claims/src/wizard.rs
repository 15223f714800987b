//! Wizard controller
//!
//! Owns the step pointer and the in-memory copy of the draft, runs the step
//! validators as guards, and executes the effect plans produced by
//! [`crate::workflow::plan`] against the injected [`DraftPort`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use core_kernel::{ClaimId, HealthCheckResult};
use domain_claimant::{
    AddressForm, AddressLookup, AddressValidator, Field, PersonalDetailsForm,
    PersonalDetailsValidator, SignatureImage, SignaturePad, SignatureValidator, ValidationErrors,
};

use crate::draft::{ClaimDraft, ResultsSummary};
use crate::error::WizardError;
use crate::ports::DraftPort;
use crate::submission::{SubmissionReceipt, SubmissionSink};
use crate::workflow::{plan, Effect, WizardEvent, WizardStep};

/// Drives one wizard session
pub struct WizardController {
    store: Arc<dyn DraftPort>,
    lookup: Arc<dyn AddressLookup>,
    sink: Arc<dyn SubmissionSink>,
    step: WizardStep,
    draft: ClaimDraft,
    pending_signature: Option<SignatureImage>,
    last_receipt: Option<SubmissionReceipt>,
}

impl WizardController {
    /// Rehydrates a session from the store
    ///
    /// Loading never writes. The stored step is honoured unless the draft
    /// cannot support it, in which case the wizard resumes at the first step
    /// whose data is missing.
    pub fn load(
        store: Arc<dyn DraftPort>,
        lookup: Arc<dyn AddressLookup>,
        sink: Arc<dyn SubmissionSink>,
    ) -> Self {
        let mut controller = Self {
            store,
            lookup,
            sink,
            step: WizardStep::Address,
            draft: ClaimDraft::new(),
            pending_signature: None,
            last_receipt: None,
        };
        controller.reload();
        controller
    }

    /// Re-reads step and draft from the store, discarding in-memory state
    pub fn reload(&mut self) {
        let mut draft = self.store.load_draft();
        if draft.claim_id.is_none() {
            draft.claim_id = self.store.load_claim_id();
        }

        let reachable = draft.reachable_step();
        let stored = self.store.load_step();
        let step = match stored {
            Some(stored) => stored.min(reachable),
            None => reachable,
        };
        if stored.is_some_and(|stored| stored != step) {
            warn!(stored = ?stored, resumed = %step, "stored step outruns draft, resuming earlier");
        }

        debug!(step = %step, claim_id = ?draft.claim_id, "wizard loaded");
        self.pending_signature = draft.signature_image.clone();
        self.step = step;
        self.draft = draft;
        self.last_receipt = None;
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ClaimDraft {
        &self.draft
    }

    pub fn claim_id(&self) -> Option<ClaimId> {
        self.draft.claim_id
    }

    /// The last explicitly saved signature, not yet necessarily submitted
    pub fn pending_signature(&self) -> Option<&SignatureImage> {
        self.pending_signature.as_ref()
    }

    pub fn last_receipt(&self) -> Option<&SubmissionReceipt> {
        self.last_receipt.as_ref()
    }

    pub fn store_health(&self) -> HealthCheckResult {
        self.store.health_check()
    }

    /// Addresses for a postcode; an unknown postcode yields an empty list
    pub fn lookup_addresses(&self, postcode: &str) -> Result<Vec<String>, WizardError> {
        let postcode = AddressValidator::validate_postcode(postcode)?;
        let addresses = self.lookup.lookup(&postcode);
        debug!(postcode = %postcode, matches = addresses.len(), "address lookup");
        Ok(addresses)
    }

    /// Step 1 submit
    pub fn submit_address(&mut self, form: &AddressForm) -> Result<WizardStep, WizardError> {
        self.require_step(WizardStep::Address, "submit address")?;
        let details = self.guard(AddressValidator::validate(form, self.lookup.as_ref()))?;
        self.apply(WizardEvent::AddressConfirmed(details))
    }

    /// Step 2 submit
    pub fn submit_personal_details(
        &mut self,
        form: &PersonalDetailsForm,
    ) -> Result<WizardStep, WizardError> {
        self.require_step(WizardStep::PersonalDetails, "submit personal details")?;
        let details = self.guard(PersonalDetailsValidator::validate(form))?;
        self.apply(WizardEvent::PersonalDetailsConfirmed(details))
    }

    /// Saves whatever is drawn on the pad as the pending signature
    pub fn save_signature(&mut self, pad: &mut dyn SignaturePad) -> Result<(), WizardError> {
        self.require_step(WizardStep::Signature, "save signature")?;
        if pad.is_empty() {
            return Err(self.blocked(ValidationErrors::single(
                Field::Signature,
                "Draw your signature before saving",
            )));
        }
        self.pending_signature = Some(SignatureImage::new(pad.save()));
        debug!("signature saved");
        Ok(())
    }

    /// Wipes the pad; an already saved signature stays saved
    pub fn clear_signature(&mut self, pad: &mut dyn SignaturePad) -> Result<(), WizardError> {
        self.require_step(WizardStep::Signature, "clear signature")?;
        pad.clear();
        Ok(())
    }

    /// Step 3 submit
    pub fn submit_signature(&mut self) -> Result<WizardStep, WizardError> {
        self.require_step(WizardStep::Signature, "submit signature")?;
        let image = self.guard(SignatureValidator::validate(self.pending_signature.as_ref()))?;
        self.apply(WizardEvent::SignatureConfirmed(image))
    }

    /// Moves to the previous step without touching the draft
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        self.apply(WizardEvent::Back)
    }

    /// Starts a new claim
    pub fn reset(&mut self) -> Result<(), WizardError> {
        self.store.clear()?;
        info!(claim_id = ?self.draft.claim_id, "wizard reset");
        self.step = WizardStep::Address;
        self.draft = ClaimDraft::new();
        self.pending_signature = None;
        self.last_receipt = None;
        Ok(())
    }

    /// The results view, available only on the results step
    pub fn summary(&self) -> Option<ResultsSummary> {
        self.step.is_terminal().then(|| self.draft.summary())
    }

    /// Hands the draft to the submission sink; may be retried from Results
    pub fn submit(&mut self) -> Result<SubmissionReceipt, WizardError> {
        self.require_step(WizardStep::Results, "submit claim")?;
        let receipt = self
            .sink
            .submit(&self.draft)
            .map_err(|e| WizardError::Submission(e.to_string()))?;
        info!(claim_id = %receipt.claim_id, "submission acknowledged");
        self.last_receipt = Some(receipt.clone());
        Ok(receipt)
    }

    fn require_step(&self, expected: WizardStep, event: &'static str) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::invalid_transition(self.step, event))
        }
    }

    fn guard<T>(&self, result: Result<T, ValidationErrors>) -> Result<T, WizardError> {
        result.map_err(|errors| self.blocked(errors))
    }

    fn blocked(&self, errors: ValidationErrors) -> WizardError {
        debug!(step = %self.step, errors = %errors, "guard blocked transition");
        WizardError::Validation(errors)
    }

    fn apply(&mut self, event: WizardEvent) -> Result<WizardStep, WizardError> {
        let transition = plan(self.step, event, &self.draft)?;
        let mut draft = self.draft.clone();
        let mut submit = false;

        for effect in transition.effects {
            match effect {
                Effect::AssignClaimId => {
                    let id = self.store.next_claim_id()?;
                    info!(claim_id = %id, "claim id assigned");
                    draft.claim_id = Some(id);
                }
                Effect::Merge(patch) => draft.merge(&patch),
                Effect::PersistDraft => {
                    self.store.save_draft(&draft)?;
                    self.draft = draft.clone();
                }
                Effect::PersistClaimId => {
                    if let Some(id) = draft.claim_id {
                        self.store.save_claim_id(id)?;
                    }
                }
                Effect::PersistStep(step) => self.store.save_step(step)?,
                Effect::Submit => submit = true,
            }
        }

        info!(from = %transition.from, to = %transition.to, "wizard transition");
        self.step = transition.to;

        if submit {
            if let Err(error) = self.submit() {
                warn!(error = %error, "submission failed, results still shown");
            }
        }
        Ok(self.step)
    }
}

impl std::fmt::Debug for WizardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardController")
            .field("step", &self.step)
            .field("draft", &self.draft)
            .field("pending_signature", &self.pending_signature.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MockDraftPort;
    use crate::submission::mock::RecordingSubmissionSink;
    use domain_claimant::{StaticAddressLookup, UploadedSignature};

    fn controller(store: &MockDraftPort) -> WizardController {
        WizardController::load(
            Arc::new(store.clone()),
            Arc::new(StaticAddressLookup::builtin()),
            Arc::new(RecordingSubmissionSink::new()),
        )
    }

    fn personal_form() -> PersonalDetailsForm {
        PersonalDetailsForm {
            title: "Mr".to_string(),
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "john@example.com".to_string(),
            mobile_number: "07700900123".to_string(),
            dob_day: 29,
            dob_month: 2,
            dob_year: 2024,
        }
    }

    #[test]
    fn test_fresh_load_starts_at_address() {
        let store = MockDraftPort::new();
        let wizard = controller(&store);
        assert_eq!(wizard.step(), WizardStep::Address);
        assert!(wizard.draft().is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_invalid_address_blocks_and_writes_nothing() {
        let store = MockDraftPort::new();
        let mut wizard = controller(&store);

        let err = wizard.submit_address(&AddressForm::new("BN13JF", "")).unwrap_err();
        assert!(err.validation_errors().unwrap().has_error_for(Field::Address));
        assert_eq!(wizard.step(), WizardStep::Address);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_failed_step_write_keeps_pointer() {
        let store = MockDraftPort::new();
        let mut wizard = controller(&store);
        store.fail_writes(true);

        let err = wizard
            .submit_address(&AddressForm::new("BN13JF", "1 Nyetimber Hill"))
            .unwrap_err();
        assert!(matches!(err, WizardError::Storage(_)));
        assert_eq!(wizard.step(), WizardStep::Address);
    }

    #[test]
    fn test_save_signature_requires_drawing() {
        let store = MockDraftPort::new();
        let mut wizard = controller(&store);
        wizard.submit_address(&AddressForm::new("BN13JF", "1 Nyetimber Hill")).unwrap();
        wizard.submit_personal_details(&personal_form()).unwrap();

        let mut pad = UploadedSignature::default();
        let err = wizard.save_signature(&mut pad).unwrap_err();
        assert!(err.validation_errors().unwrap().has_error_for(Field::Signature));
        assert!(wizard.submit_signature().is_err());
    }

    #[test]
    fn test_clear_keeps_saved_signature() {
        let store = MockDraftPort::new();
        let mut wizard = controller(&store);
        wizard.submit_address(&AddressForm::new("BN13JF", "1 Nyetimber Hill")).unwrap();
        wizard.submit_personal_details(&personal_form()).unwrap();

        let mut pad = UploadedSignature::new("data:image/png;base64,AAAA");
        wizard.save_signature(&mut pad).unwrap();
        wizard.clear_signature(&mut pad).unwrap();

        assert!(pad.is_empty());
        assert_eq!(wizard.submit_signature().unwrap(), WizardStep::Results);
    }

    #[test]
    fn test_signature_ops_outside_step_three_rejected() {
        let store = MockDraftPort::new();
        let mut wizard = controller(&store);
        let mut pad = UploadedSignature::new("data:image/png;base64,AAAA");

        assert!(matches!(
            wizard.save_signature(&mut pad),
            Err(WizardError::InvalidTransition { .. })
        ));
        assert!(matches!(
            wizard.submit_signature(),
            Err(WizardError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_summary_only_on_results() {
        let store = MockDraftPort::new();
        let wizard = controller(&store);
        assert!(wizard.summary().is_none());
    }
}
