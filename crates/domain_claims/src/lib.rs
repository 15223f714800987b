//! Claim Intake Domain
//!
//! This crate drives the claim intake wizard: the accumulating
//! [`ClaimDraft`], the step state machine, and the controller that gates each
//! forward move on the step validators from `domain_claimant`.
//!
//! # Wizard Flow
//!
//! ```text
//! Address -> Personal Details -> Signature -> Results
//! ```
//!
//! Every successful forward move merges the step's fields into the draft,
//! persists the draft, then persists the new step. Back only moves the
//! pointer.

pub mod draft;
pub mod workflow;
pub mod ports;
pub mod submission;
pub mod wizard;
pub mod error;

pub use draft::{ClaimDraft, ResultsSummary};
pub use workflow::{plan, Effect, Transition, WizardEvent, WizardStep};
pub use ports::DraftPort;
pub use submission::{LoggingSubmissionSink, SubmissionReceipt, SubmissionSink};
pub use wizard::WizardController;
pub use error::WizardError;

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockDraftPort;
#[cfg(any(test, feature = "mock"))]
pub use submission::mock::RecordingSubmissionSink;
