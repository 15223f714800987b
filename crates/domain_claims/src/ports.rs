//! Claims Domain Ports
//!
//! The wizard never touches storage directly. It receives a [`DraftPort`]
//! at construction, so the durable medium (in-memory map, JSON file,
//! browser-style key-value store) is chosen by whoever wires the
//! application, and tests can plug in [`mock::MockDraftPort`].
//!
//! # Failure semantics
//!
//! Reads never fail: a missing or corrupt value comes back as absent or
//! default. Writes return [`PortError`] so the controller can stop before the
//! step pointer moves.

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError};

use crate::draft::ClaimDraft;
use crate::workflow::WizardStep;

/// Durable storage for one wizard session
pub trait DraftPort: DomainPort + HealthCheckable {
    /// Stored step pointer, or `None` when absent or unreadable
    fn load_step(&self) -> Option<WizardStep>;

    fn save_step(&self, step: WizardStep) -> Result<(), PortError>;

    /// Stored draft, or an empty one when absent or unreadable
    fn load_draft(&self) -> ClaimDraft;

    fn save_draft(&self, draft: &ClaimDraft) -> Result<(), PortError>;

    /// The mirrored `databaseId`, if any
    fn load_claim_id(&self) -> Option<ClaimId>;

    fn save_claim_id(&self, id: ClaimId) -> Result<(), PortError>;

    /// Increments the persisted counter and returns the new id
    ///
    /// The counter is written back before the id is returned. Concurrent
    /// writers on the same medium can race.
    fn next_claim_id(&self) -> Result<ClaimId, PortError>;

    /// Removes the draft, step pointer and mirrored id; keeps the counter
    fn clear(&self) -> Result<(), PortError>;
}

/// Mock implementation of DraftPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex, MutexGuard};

    use core_kernel::HealthCheckResult;

    #[derive(Debug, Default, Clone)]
    struct MockState {
        step: Option<WizardStep>,
        draft: Option<ClaimDraft>,
        claim_id: Option<ClaimId>,
        last_used_id: u64,
        writes: usize,
    }

    /// In-memory DraftPort with switchable write failures
    ///
    /// Clones share state, so a clone handed to a second controller behaves
    /// like a page reload over the same storage.
    #[derive(Debug, Default, Clone)]
    pub struct MockDraftPort {
        state: Arc<Mutex<MockState>>,
        fail_writes: Arc<AtomicBool>,
    }

    impl MockDraftPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the step pointer and draft
        pub fn with_state(step: Option<WizardStep>, draft: ClaimDraft) -> Self {
            let port = Self::new();
            {
                let mut state = port.state();
                state.step = step;
                state.draft = Some(draft);
            }
            port
        }

        /// Pre-populates the id counter
        pub fn with_last_used_id(self, last_used_id: u64) -> Self {
            self.state().last_used_id = last_used_id;
            self
        }

        /// Makes every subsequent write fail with a storage error
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        pub fn last_used_id(&self) -> u64 {
            self.state().last_used_id
        }

        pub fn stored_step(&self) -> Option<WizardStep> {
            self.state().step
        }

        pub fn stored_draft(&self) -> Option<ClaimDraft> {
            self.state().draft.clone()
        }

        pub fn stored_claim_id(&self) -> Option<ClaimId> {
            self.state().claim_id
        }

        /// Number of successful writes so far
        pub fn write_count(&self) -> usize {
            self.state().writes
        }

        fn state(&self) -> MutexGuard<'_, MockState> {
            self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        fn write<F: FnOnce(&mut MockState)>(&self, apply: F) -> Result<(), PortError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(PortError::storage("mock store rejects writes"));
            }
            let mut state = self.state();
            apply(&mut state);
            state.writes += 1;
            Ok(())
        }
    }

    impl DomainPort for MockDraftPort {}

    impl HealthCheckable for MockDraftPort {
        fn health_check(&self) -> HealthCheckResult {
            if self.fail_writes.load(Ordering::SeqCst) {
                HealthCheckResult::unhealthy("mock-draft-port", "writes disabled")
            } else {
                HealthCheckResult::healthy("mock-draft-port")
            }
        }
    }

    impl DraftPort for MockDraftPort {
        fn load_step(&self) -> Option<WizardStep> {
            self.state().step
        }

        fn save_step(&self, step: WizardStep) -> Result<(), PortError> {
            self.write(|state| state.step = Some(step))
        }

        fn load_draft(&self) -> ClaimDraft {
            self.state().draft.clone().unwrap_or_default()
        }

        fn save_draft(&self, draft: &ClaimDraft) -> Result<(), PortError> {
            self.write(|state| state.draft = Some(draft.clone()))
        }

        fn load_claim_id(&self) -> Option<ClaimId> {
            self.state().claim_id
        }

        fn save_claim_id(&self, id: ClaimId) -> Result<(), PortError> {
            self.write(|state| state.claim_id = Some(id))
        }

        fn next_claim_id(&self) -> Result<ClaimId, PortError> {
            let mut next = None;
            self.write(|state| {
                if let Some(id) = ClaimId::after(state.last_used_id) {
                    state.last_used_id = id.value();
                    next = Some(id);
                }
            })?;
            next.ok_or_else(|| PortError::internal("claim id counter exhausted"))
        }

        fn clear(&self) -> Result<(), PortError> {
            self.write(|state| {
                state.step = None;
                state.draft = None;
                state.claim_id = None;
            })
        }
    }
}
