//! Submission of the completed draft
//!
//! Forwarding to a real backend is not wired up yet; the default sink only
//! logs the draft and acknowledges it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{ClaimId, DomainPort, PortError};

use crate::draft::ClaimDraft;

/// Acknowledgement from a submission sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub claim_id: ClaimId,
    pub submitted_at: DateTime<Utc>,
}

/// Port receiving the final merged draft
pub trait SubmissionSink: DomainPort {
    fn submit(&self, draft: &ClaimDraft) -> Result<SubmissionReceipt, PortError>;
}

fn require_claim_id(draft: &ClaimDraft) -> Result<ClaimId, PortError> {
    draft
        .claim_id
        .ok_or_else(|| PortError::validation_field("Draft has no claim id", "claimId"))
}

/// Sink that records the submission in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSubmissionSink;

impl DomainPort for LoggingSubmissionSink {}

impl SubmissionSink for LoggingSubmissionSink {
    fn submit(&self, draft: &ClaimDraft) -> Result<SubmissionReceipt, PortError> {
        let claim_id = require_claim_id(draft)?;
        info!(
            claim_id = %claim_id,
            reference = %claim_id.reference(),
            postcode = draft.postcode.as_deref().unwrap_or_default(),
            has_signature = draft.has_signature(),
            "claim submitted"
        );
        Ok(SubmissionReceipt {
            claim_id,
            submitted_at: Utc::now(),
        })
    }
}

/// Recording sink with switchable failures
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default, Clone)]
    pub struct RecordingSubmissionSink {
        submitted: Arc<Mutex<Vec<ClaimDraft>>>,
        fail: Arc<AtomicBool>,
    }

    impl RecordingSubmissionSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_submissions(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        pub fn submitted(&self) -> Vec<ClaimDraft> {
            self.submitted
                .lock()
                .map(|drafts| drafts.clone())
                .unwrap_or_default()
        }
    }

    impl DomainPort for RecordingSubmissionSink {}

    impl SubmissionSink for RecordingSubmissionSink {
        fn submit(&self, draft: &ClaimDraft) -> Result<SubmissionReceipt, PortError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(PortError::ServiceUnavailable {
                    service: "submission".to_string(),
                });
            }
            let claim_id = require_claim_id(draft)?;
            if let Ok(mut drafts) = self.submitted.lock() {
                drafts.push(draft.clone());
            }
            Ok(SubmissionReceipt {
                claim_id,
                submitted_at: Utc::now(),
            })
        }
    }
}
