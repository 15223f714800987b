//! Wizard state machine
//!
//! ```text
//! Address(1) -> PersonalDetails(2) -> Signature(3) -> Results(4)
//!            <-                   <-              <-            (Back)
//! ```
//!
//! [`plan`] is pure: given the current step, an event and the draft, it
//! returns the next step and the side effects the controller must run, in
//! order. Forward plans always persist the draft before the step pointer, so
//! an interrupted transition resumes on the same step with its data intact.

use std::fmt;

use serde::{Deserialize, Serialize};

use core_kernel::CoreError;
use domain_claimant::{AddressDetails, PersonalDetails, SignatureImage};

use crate::draft::ClaimDraft;
use crate::error::WizardError;

/// Position in the wizard
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum WizardStep {
    #[default]
    Address = 1,
    PersonalDetails = 2,
    Signature = 3,
    Results = 4,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Address,
        WizardStep::PersonalDetails,
        WizardStep::Signature,
        WizardStep::Results,
    ];

    /// The step number as stored under `currentStep`
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::Address),
            2 => Some(WizardStep::PersonalDetails),
            3 => Some(WizardStep::Signature),
            4 => Some(WizardStep::Results),
            _ => None,
        }
    }

    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn is_terminal(&self) -> bool {
        *self == WizardStep::Results
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = CoreError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number)
            .ok_or_else(|| CoreError::validation(format!("Unknown wizard step: {}", number)))
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}

/// A user event that may move the wizard
///
/// Forward events carry already-validated step output; the controller runs
/// the validators before building one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    AddressConfirmed(AddressDetails),
    PersonalDetailsConfirmed(PersonalDetails),
    SignatureConfirmed(SignatureImage),
    Back,
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::AddressConfirmed(_) => "submit address",
            WizardEvent::PersonalDetailsConfirmed(_) => "submit personal details",
            WizardEvent::SignatureConfirmed(_) => "submit signature",
            WizardEvent::Back => "go back",
        }
    }
}

/// Side effect instruction produced by [`plan`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Draw the next id from the counter and put it on the draft
    AssignClaimId,
    /// Union these fields into the draft
    Merge(ClaimDraft),
    /// Write the draft to `formData`
    PersistDraft,
    /// Mirror the claim id to `databaseId`
    PersistClaimId,
    /// Write the step pointer to `currentStep`
    PersistStep(WizardStep),
    /// Hand the final draft to the submission sink
    Submit,
}

/// Outcome of planning one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: WizardStep,
    pub to: WizardStep,
    pub effects: Vec<Effect>,
}

/// Plans the transition for `event` at `step`
///
/// Errors with [`WizardError::InvalidTransition`] when the event does not
/// belong to the current step, or on Back from the first step.
pub fn plan(step: WizardStep, event: WizardEvent, draft: &ClaimDraft) -> Result<Transition, WizardError> {
    let name = event.name();

    let (to, patch) = match (step, event) {
        (WizardStep::Address, WizardEvent::AddressConfirmed(details)) => {
            (WizardStep::PersonalDetails, ClaimDraft::from(details))
        }
        (WizardStep::PersonalDetails, WizardEvent::PersonalDetailsConfirmed(details)) => {
            (WizardStep::Signature, ClaimDraft::from(details))
        }
        (WizardStep::Signature, WizardEvent::SignatureConfirmed(image)) => {
            (WizardStep::Results, ClaimDraft::from(image))
        }
        (current, WizardEvent::Back) => {
            let previous = current
                .previous()
                .ok_or_else(|| WizardError::invalid_transition(current, name))?;
            return Ok(Transition {
                from: current,
                to: previous,
                effects: vec![Effect::PersistStep(previous)],
            });
        }
        (current, _) => return Err(WizardError::invalid_transition(current, name)),
    };

    let mut effects = Vec::with_capacity(6);
    if draft.claim_id.is_none() {
        effects.push(Effect::AssignClaimId);
    }
    effects.push(Effect::Merge(patch));
    effects.push(Effect::PersistDraft);
    effects.push(Effect::PersistClaimId);
    effects.push(Effect::PersistStep(to));
    if to.is_terminal() {
        effects.push(Effect::Submit);
    }

    Ok(Transition { from: step, to, effects })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ClaimId;

    fn address() -> AddressDetails {
        AddressDetails {
            postcode: "BN13JF".to_string(),
            address: "3 Nyetimber Hill".to_string(),
        }
    }

    #[test]
    fn test_step_numbers_round_trip() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_number(step.number()), Some(step));
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(5), None);
    }

    #[test]
    fn test_neighbours() {
        assert_eq!(WizardStep::Address.previous(), None);
        assert_eq!(WizardStep::Results.next(), None);
        assert_eq!(WizardStep::Signature.next(), Some(WizardStep::Results));
    }

    #[test]
    fn test_default_step_is_first() {
        assert_eq!(WizardStep::default(), WizardStep::Address);
        assert_eq!(WizardStep::default().number(), 1);
    }

    #[test]
    fn test_first_submit_assigns_id_and_persists_draft_before_step() {
        let transition = plan(
            WizardStep::Address,
            WizardEvent::AddressConfirmed(address()),
            &ClaimDraft::new(),
        )
        .unwrap();

        assert_eq!(transition.to, WizardStep::PersonalDetails);
        assert_eq!(transition.effects[0], Effect::AssignClaimId);

        let draft_at = transition.effects.iter().position(|e| *e == Effect::PersistDraft).unwrap();
        let step_at = transition
            .effects
            .iter()
            .position(|e| matches!(e, Effect::PersistStep(_)))
            .unwrap();
        assert!(draft_at < step_at);
    }

    #[test]
    fn test_existing_id_is_not_reassigned() {
        let draft = ClaimDraft {
            claim_id: Some(ClaimId::new(3)),
            ..Default::default()
        };
        let transition = plan(WizardStep::Address, WizardEvent::AddressConfirmed(address()), &draft).unwrap();
        assert!(!transition.effects.contains(&Effect::AssignClaimId));
    }

    #[test]
    fn test_back_only_moves_pointer() {
        let transition = plan(WizardStep::Results, WizardEvent::Back, &ClaimDraft::new()).unwrap();
        assert_eq!(transition.to, WizardStep::Signature);
        assert_eq!(transition.effects, vec![Effect::PersistStep(WizardStep::Signature)]);
    }

    #[test]
    fn test_back_from_first_step_is_rejected() {
        let result = plan(WizardStep::Address, WizardEvent::Back, &ClaimDraft::new());
        assert!(matches!(result, Err(WizardError::InvalidTransition { .. })));
    }

    #[test]
    fn test_event_for_other_step_is_rejected() {
        let result = plan(
            WizardStep::Signature,
            WizardEvent::AddressConfirmed(address()),
            &ClaimDraft::new(),
        );
        assert!(matches!(
            result,
            Err(WizardError::InvalidTransition { from: WizardStep::Signature, .. })
        ));
    }

    #[test]
    fn test_entering_results_submits() {
        let transition = plan(
            WizardStep::Signature,
            WizardEvent::SignatureConfirmed(SignatureImage::new("data:image/png;base64,AAAA")),
            &ClaimDraft::new(),
        )
        .unwrap();
        assert_eq!(transition.effects.last(), Some(&Effect::Submit));
    }

    #[test]
    fn test_step_serializes_as_number() {
        assert_eq!(serde_json::to_string(&WizardStep::Signature).unwrap(), "3");
        assert!(serde_json::from_str::<WizardStep>("9").is_err());
    }
}
