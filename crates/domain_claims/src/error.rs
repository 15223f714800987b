//! Claims domain errors

use thiserror::Error;

use core_kernel::PortError;
use domain_claimant::ValidationErrors;

use crate::workflow::WizardStep;

/// Errors that can occur while driving the wizard
#[derive(Debug, Error)]
pub enum WizardError {
    /// A guard rejected the submitted step
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Cannot {event} from step {from}")]
    InvalidTransition { from: WizardStep, event: &'static str },

    /// The draft store refused a write
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),

    #[error("Submission failed: {0}")]
    Submission(String),
}

impl WizardError {
    /// Creates an InvalidTransition error
    pub fn invalid_transition(from: WizardStep, event: &'static str) -> Self {
        WizardError::InvalidTransition { from, event }
    }

    /// Returns the field errors when a guard blocked the transition
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            WizardError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
